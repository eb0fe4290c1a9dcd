//! Records, the validated dataset and the two category orderings.

use crate::error::DatasetError;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One category (a US state in the bundled data).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique within a dataset; used as band-scale key and element identity.
    pub name: String,
    pub median_income: f64,
    pub democratic_reps: u32,
    pub republican_reps: u32,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        median_income: f64,
        democratic_reps: u32,
        republican_reps: u32,
    ) -> Self {
        Self {
            name: name.into(),
            median_income,
            democratic_reps,
            republican_reps,
        }
    }

    /// Share of Democratic representatives in the delegation, in `[0, 1]`.
    ///
    /// A delegation with no representatives at all scores `0.5` (neutral).
    pub fn partisan_score(&self) -> f64 {
        let total = self.democratic_reps as f64 + self.republican_reps as f64;
        if total == 0.0 {
            0.5
        } else {
            self.democratic_reps as f64 / total
        }
    }
}

/// Free function form of [`Record::partisan_score`].
pub fn partisan_score(record: &Record) -> f64 {
    record.partisan_score()
}

/// Row as read from JSON/CSV before validation.
///
/// Numbers are read loosely (optional, signed, fractional) so that invalid
/// input yields a [`DatasetError`] naming the offending record instead of a
/// bare deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub name: Option<String>,
    pub median_income: Option<f64>,
    pub democratic_reps: Option<f64>,
    pub republican_reps: Option<f64>,
}

impl RawRecord {
    /// Validate into a [`Record`]. `index` is only used for error messages.
    pub fn validate(self, index: usize) -> Result<Record, DatasetError> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(DatasetError::EmptyName { index }),
        };
        let median_income = require(&name, "medianIncome", self.median_income)?;
        check_amount(&name, "medianIncome", median_income)?;
        let democratic_reps = require_count(&name, "democraticReps", self.democratic_reps)?;
        let republican_reps = require_count(&name, "republicanReps", self.republican_reps)?;
        Ok(Record {
            name,
            median_income,
            democratic_reps,
            republican_reps,
        })
    }
}

fn require(name: &str, field: &'static str, v: Option<f64>) -> Result<f64, DatasetError> {
    v.ok_or_else(|| DatasetError::MissingField {
        name: name.to_string(),
        field,
    })
}

fn check_amount(name: &str, field: &'static str, v: f64) -> Result<(), DatasetError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(DatasetError::InvalidNumber {
            name: name.to_string(),
            field,
            expected: "number",
            value: v,
        })
    }
}

fn require_count(name: &str, field: &'static str, v: Option<f64>) -> Result<u32, DatasetError> {
    let v = require(name, field, v)?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
        Ok(v as u32)
    } else {
        Err(DatasetError::InvalidNumber {
            name: name.to_string(),
            field,
            expected: "integer",
            value: v,
        })
    }
}

/// Category orderings the chart can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Alphabetical by name (the unchecked toggle).
    AscendingByName,
    /// Highest median income first, ties broken by name (the checked toggle).
    DescendingByValue,
}

impl SortOrder {
    /// Map the toggle's checked state to an order.
    pub fn from_checked(checked: bool) -> Self {
        if checked {
            SortOrder::DescendingByValue
        } else {
            SortOrder::AscendingByName
        }
    }

    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortOrder::AscendingByName => a.name.cmp(&b.name),
            SortOrder::DescendingByValue => b
                .median_income
                .total_cmp(&a.median_income)
                .then_with(|| a.name.cmp(&b.name)),
        }
    }
}

/// Ordered, validated sequence of records.
///
/// Order is meaningful: it drives the band-scale domain and render sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset, rejecting empty input, empty or duplicate names and
    /// invalid incomes.
    pub fn new(records: Vec<Record>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }
        let mut seen: AHashSet<&str> = AHashSet::with_capacity(records.len());
        for (index, r) in records.iter().enumerate() {
            if r.name.trim().is_empty() {
                return Err(DatasetError::EmptyName { index });
            }
            check_amount(&r.name, "medianIncome", r.median_income)?;
            if !seen.insert(r.name.as_str()) {
                return Err(DatasetError::DuplicateName(r.name.clone()));
            }
        }
        Ok(Self { records })
    }

    /// Validate raw rows, failing on the first bad one.
    pub fn from_raw(raw: Vec<RawRecord>) -> Result<Self, DatasetError> {
        let records = raw
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.validate(i))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Names in current order.
    pub fn names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }

    pub fn max_income(&self) -> f64 {
        self.records
            .iter()
            .map(|r| r.median_income)
            .fold(0.0, f64::max)
    }

    pub fn min_income(&self) -> f64 {
        self.records
            .iter()
            .map(|r| r.median_income)
            .fold(f64::INFINITY, f64::min)
    }

    /// Reorder in place. Completes before any dependent scale is derived.
    pub fn sort(&mut self, order: SortOrder) {
        self.records.sort_by(|a, b| order.compare(a, b));
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_record_rejects_fractional_reps() {
        let raw = RawRecord {
            name: Some("Ohio".into()),
            median_income: Some(52_407.0),
            democratic_reps: Some(4.5),
            republican_reps: Some(12.0),
        };
        let err = raw.validate(0).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidNumber {
                field: "democraticReps",
                expected: "integer",
                ..
            }
        ));
    }

    #[test]
    fn descending_ties_fall_back_to_name() {
        let a = Record::new("B", 10.0, 0, 1);
        let b = Record::new("A", 10.0, 0, 1);
        assert_eq!(
            SortOrder::DescendingByValue.compare(&a, &b),
            Ordering::Greater
        );
    }
}
