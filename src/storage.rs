use crate::models::{Dataset, RawRecord};
use anyhow::{Context, Result, bail};
use csv::WriterBuilder;
use log::info;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Load a dataset, choosing the parser from the file extension (`.json` or `.csv`).
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => load_json(path),
        Some("csv") => load_csv(path),
        _ => bail!(
            "unsupported dataset format: {} (expected .json or .csv)",
            path.display()
        ),
    }
}

/// Load a JSON array of `{name, medianIncome, democraticReps, republicanReps}` objects.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let raw: Vec<RawRecord> = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing JSON dataset {}", path.display()))?;
    finish(raw, path)
}

/// Parse a dataset from an in-memory JSON string.
pub fn parse_json(s: &str) -> Result<Dataset> {
    let raw: Vec<RawRecord> = serde_json::from_str(s).context("parsing JSON dataset")?;
    Ok(Dataset::from_raw(raw)?)
}

/// Load a CSV file with header `name,medianIncome,democraticReps,republicanReps`.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut raw = Vec::new();
    for (i, row) in rdr.deserialize::<RawRecord>().enumerate() {
        raw.push(row.with_context(|| format!("parsing CSV row {} of {}", i + 1, path.display()))?);
    }
    finish(raw, path)
}

fn finish(raw: Vec<RawRecord>, path: &Path) -> Result<Dataset> {
    let ds = Dataset::from_raw(raw)
        .with_context(|| format!("invalid dataset {}", path.display()))?;
    info!("loaded {} records from {}", ds.len(), path.display());
    Ok(ds)
}

/// Save records (in current order) as CSV with header.
pub fn save_csv<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    for r in dataset {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save records (in current order) as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(dataset)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use tempfile::tempdir;

    #[test]
    fn write_then_load_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let ds = Dataset::new(vec![
            Record::new("Georgia", 52_977.0, 10, 4),
            Record::new("Alaska", 73_181.0, 0, 1),
        ])
        .unwrap();
        save_csv(&ds, &csvp).unwrap();
        save_json(&ds, &jsonp).unwrap();
        assert_eq!(load_dataset(&csvp).unwrap(), ds);
        assert_eq!(load_dataset(&jsonp).unwrap(), ds);
    }

    #[test]
    fn unknown_extension_is_error() {
        assert!(load_dataset("states.xml").is_err());
    }
}
