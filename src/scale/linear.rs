/// Affine map from a numeric domain to a pixel range.
///
/// For bar heights the domain is `[0, max]` and the range `[bottom, top]`, so
/// larger values land at smaller y coordinates. Values outside the domain are
/// extrapolated, not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain_min: f64, domain_max: f64, range: (f64, f64)) -> Self {
        Self {
            domain: (domain_min, domain_max),
            range,
        }
    }

    /// Value scale anchored at zero, so all bars share the baseline.
    pub fn from_zero(domain_max: f64, range: (f64, f64)) -> Self {
        Self::new(0.0, domain_max, range)
    }

    /// Map a domain value to pixels. A degenerate domain maps everything to
    /// the range start.
    pub fn value(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return r0;
        }
        r0 + (x - d0) / span * (r1 - r0)
    }

    /// Inverse of [`LinearScale::value`].
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return d0;
        }
        d0 + (px - r0) / span * (d1 - d0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Roughly `count` "nice" tick values (multiples of 1, 2 or 5 × 10ᵏ) inside
    /// the domain, in ascending domain order.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (a, b) = self.domain;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        nice_ticks(lo, hi, count)
    }
}

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Returns `(i1, i2, inc)`; a negative `inc` means ticks are `i / -inc`.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let m = 10f64.powf(-power) / factor;
        i1 = (start * m).round();
        i2 = (stop * m).round();
        if i1 / m < start {
            i1 += 1.0;
        }
        if i2 / m > stop {
            i2 -= 1.0;
        }
        inc = -m;
    } else {
        let m = 10f64.powf(power) * factor;
        i1 = (start / m).round();
        i2 = (stop / m).round();
        if i1 * m < start {
            i1 += 1.0;
        }
        if i2 * m > stop {
            i2 -= 1.0;
        }
        inc = m;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Nice ticks between `start <= stop`.
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (i1, i2, inc) = tick_spec(start, stop, count as f64);
    if !(i2 >= i1) {
        return Vec::new();
    }
    let n = (i2 - i1) as usize + 1;
    (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 { k / -inc } else { k * inc }
        })
        .collect()
}
