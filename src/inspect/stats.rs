/// Word-count distribution over talks with a usable transcript.
/// Every figure is truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthStats {
    pub mean: usize,
    pub median: usize,
    pub min: usize,
    pub max: usize,
    pub p95: usize,
}

impl LengthStats {
    /// `None` for an empty sample.
    pub fn from_counts(counts: &[usize], percentile_q: f64) -> Option<Self> {
        if counts.is_empty() {
            return None;
        }
        let mut sorted = counts.to_vec();
        sorted.sort_unstable();

        let n = sorted.len();
        let total: usize = sorted.iter().sum();
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2
        };

        Some(Self {
            mean: total / n,
            median,
            min: sorted[0],
            max: sorted[n - 1],
            p95: percentile(&sorted, percentile_q) as usize,
        })
    }
}

/// Quantile `q` of an ascending slice, interpolating linearly between the
/// closest ranks at position `(n - 1) * q`. Past the midpoint the value is
/// interpolated down from the upper rank, which keeps the rounding identical
/// to numpy's `linear` method.
pub fn percentile(sorted: &[usize], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0] as f64,
        n => {
            let pos = (n - 1) as f64 * q.clamp(0.0, 1.0);
            let lo = pos.floor() as usize;
            let hi = (lo + 1).min(n - 1);
            let frac = pos - lo as f64;
            let (a, b) = (sorted[lo] as f64, sorted[hi] as f64);
            if frac >= 0.5 {
                b - (b - a) * (1.0 - frac)
            } else {
                a + (b - a) * frac
            }
        }
    }
}
