use crate::models::Dataset;
use serde::{Deserialize, Serialize};

/// Summary of median income across the dataset plus delegation totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub democratic_reps: u64,
    pub republican_reps: u64,
}

/// Compute the summary. Datasets are never empty, so every field is defined.
pub fn summary(dataset: &Dataset) -> Summary {
    let mut vals: Vec<f64> = dataset.records().iter().map(|r| r.median_income).collect();
    vals.sort_by(f64::total_cmp);
    let count = vals.len();
    let mean = vals.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 1 {
        vals[count / 2]
    } else {
        (vals[count / 2 - 1] + vals[count / 2]) / 2.0
    };
    Summary {
        count,
        min: dataset.min_income(),
        max: dataset.max_income(),
        mean,
        median,
        democratic_reps: dataset.records().iter().map(|r| r.democratic_reps as u64).sum(),
        republican_reps: dataset.records().iter().map(|r| r.republican_reps as u64).sum(),
    }
}
