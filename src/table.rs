//! Tabular view of the records, shown next to the chart.

use crate::format::currency;
use crate::models::Dataset;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub name: String,
    pub median_income: String,
    pub democratic_reps: u32,
    pub republican_reps: u32,
}

/// One row per record, in dataset order.
pub fn table_rows(dataset: &Dataset) -> Vec<TableRow> {
    dataset
        .records()
        .iter()
        .map(|r| TableRow {
            name: r.name.clone(),
            median_income: currency(r.median_income),
            democratic_reps: r.democratic_reps,
            republican_reps: r.republican_reps,
        })
        .collect()
}

const HEADERS: [&str; 4] = ["State", "Median income", "Dem. reps", "Rep. reps"];

/// Plain-text table with a header row, names left-aligned and numbers right-aligned.
pub fn render_text(rows: &[TableRow]) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            [
                r.name.clone(),
                r.median_income.clone(),
                r.democratic_reps.to_string(),
                r.republican_reps.to_string(),
            ]
        })
        .collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (w, c) in widths.iter_mut().zip(row) {
            *w = (*w).max(c.chars().count());
        }
    }
    let mut out = line(HEADERS, &widths);
    out.push('\n');
    for row in &cells {
        out.push_str(&line(
            [row[0].as_str(), row[1].as_str(), row[2].as_str(), row[3].as_str()],
            &widths,
        ));
        out.push('\n');
    }
    out
}

fn line(cols: [&str; 4], widths: &[usize; 4]) -> String {
    format!(
        "{:<w0$}  {:>w1$}  {:>w2$}  {:>w3$}",
        cols[0],
        cols[1],
        cols[2],
        cols[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    )
}
