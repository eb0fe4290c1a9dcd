use crate::error::ScaleError;
use ahash::AHashMap;

/// Categorical scale: equal-width slots for an ordered list of names.
///
/// The range is split into `n` slots of width `step = (end - start) / n`. Each
/// bar takes `step * (1 - padding)` of its slot, centred, leaving half the gap
/// on either side. Instances are never mutated; re-ordering produces a new
/// scale through [`BandScale::with_domain`].
#[derive(Debug, Clone)]
pub struct BandScale {
    domain: Vec<String>,
    lookup: AHashMap<String, usize>,
    range: (f64, f64),
    padding: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Build a band scale. Names are expected to be unique; for a repeated name
    /// the first slot wins.
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Result<Self, ScaleError> {
        if domain.is_empty() {
            return Err(ScaleError::EmptyDomain);
        }
        if !(0.0..1.0).contains(&padding) {
            return Err(ScaleError::InvalidPadding(padding));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ScaleError::NonFiniteRange);
        }
        let mut lookup = AHashMap::with_capacity(domain.len());
        for (i, name) in domain.iter().enumerate() {
            lookup.entry(name.clone()).or_insert(i);
        }
        let step = (range.1 - range.0).abs() / domain.len() as f64;
        Ok(Self {
            bandwidth: step * (1.0 - padding),
            domain,
            lookup,
            range,
            padding,
            step,
        })
    }

    /// Same range and padding, new ordering.
    pub fn with_domain(&self, domain: Vec<String>) -> Result<Self, ScaleError> {
        Self::new(domain, self.range, self.padding)
    }

    /// Left edge of the bar for `name`, or `None` for an unknown name.
    pub fn position(&self, name: &str) -> Option<f64> {
        let i = self.index_of(name)?;
        let lo = self.range.0.min(self.range.1);
        let slot = if self.range.1 >= self.range.0 {
            lo + self.step * i as f64
        } else {
            // reversed range: first name sits at the right
            lo + self.step * (self.domain.len() - 1 - i) as f64
        };
        Some(slot + self.step * self.padding / 2.0)
    }

    /// Horizontal centre of the bar for `name`.
    pub fn center(&self, name: &str) -> Option<f64> {
        self.position(name).map(|x| x + self.bandwidth / 2.0)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }
}

impl PartialEq for BandScale {
    fn eq(&self, other: &Self) -> bool {
        self.domain == other.domain && self.range == other.range && self.padding == other.padding
    }
}
