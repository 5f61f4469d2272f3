//! Equal-width binning for the daily return distribution.

/// One histogram bucket over `[lower, upper)`; the last bucket is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl Bin {
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Share of `total` observations falling in this bin.
    pub fn probability(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.count as f64 / total as f64
        }
    }
}

/// Bin `values` into `ceil(sqrt(n))` equal-width buckets, at most `max_bins`.
///
/// Non-finite values are ignored. Returns no bins when nothing remains.
pub fn histogram(values: &[f64], max_bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < 1e-12 {
        return vec![Bin {
            lower: min,
            upper: max,
            count: finite.len(),
        }];
    }

    let num_bins = ((finite.len() as f64).sqrt().ceil() as usize).clamp(1, max_bins.max(1));
    let width = (max - min) / num_bins as f64;

    let mut bins: Vec<Bin> = (0..num_bins)
        .map(|i| Bin {
            lower: min + width * i as f64,
            upper: if i + 1 == num_bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for v in &finite {
        let idx = (((v - min) / width).floor() as usize).min(num_bins - 1);
        bins[idx].count += 1;
    }

    bins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_bins() {
        assert!(histogram(&[], 10).is_empty());
        assert!(histogram(&[f64::NAN], 10).is_empty());
    }

    #[test]
    fn identical_values_share_one_bin() {
        let bins = histogram(&[0.01, 0.01, 0.01], 10);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn counts_sum_to_input_and_max_lands_in_last_bin() {
        let values = [-0.02, -0.01, 0.0, 0.005, 0.01, 0.015, 0.02, 0.03, 0.04];
        let bins = histogram(&values, 50);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert!(bins.last().unwrap().count >= 1);
        assert_eq!(bins.first().unwrap().lower, -0.02);
        assert_eq!(bins.last().unwrap().upper, 0.04);
    }

    #[test]
    fn bin_count_is_capped() {
        let values: Vec<f64> = (0..400).map(|i| i as f64 / 1000.0).collect();
        assert_eq!(histogram(&values, 20).len(), 20);
        assert_eq!(histogram(&values, 0).len(), 1);
    }

    #[test]
    fn probability_of_bin() {
        let bin = Bin { lower: 0.0, upper: 1.0, count: 1 };
        assert_eq!(bin.probability(4), 0.25);
        assert_eq!(bin.probability(0), 0.0);
        assert_eq!(bin.midpoint(), 0.5);
    }
}
