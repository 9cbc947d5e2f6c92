use serde::Serialize;

/// One point on a cumulative distribution curve: the upper edge of a value
/// bin together with the percentage of samples at or below it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CdfPoint {
    /// Upper edge of the bin.
    pub upper: f64,
    /// Cumulative share of samples, in percent.
    pub cumulative_percent: f64,
}

/// Build a cumulative distribution curve over `bin_count` equal-width bins.
///
/// NaN and negative samples are discarded first. The value range is split
/// into half-open `(lo, hi]` bins, the lowest bin closed on both ends so the
/// minimum is counted. A synthetic zero point at the smallest sample anchors
/// the curve at the origin; the last point reaches 100%. Input that is empty
/// after filtering yields an empty curve.
pub fn build_cdf(values: &[f64], bin_count: usize) -> Vec<CdfPoint> {
    let samples: Vec<f64> =
        values.iter().copied().filter(|v| v.is_finite() && *v >= 0.0).collect();
    if samples.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Zero-width range: every sample sits in one bin.
    if max == min {
        return vec![
            CdfPoint { upper: min, cumulative_percent: 0.0 },
            CdfPoint { upper: max, cumulative_percent: 100.0 },
        ];
    }

    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for sample in &samples {
        let offset = ((sample - min) / width).ceil() as usize;
        let index = offset.saturating_sub(1).min(bin_count - 1);
        counts[index] += 1;
    }

    let total = samples.len() as f64;
    let mut points = Vec::with_capacity(bin_count + 1);
    points.push(CdfPoint { upper: min, cumulative_percent: 0.0 });
    let mut running = 0usize;
    for (i, count) in counts.iter().enumerate() {
        running += count;
        points.push(CdfPoint {
            upper: min + width * (i + 1) as f64,
            cumulative_percent: running as f64 / total * 100.0,
        });
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_is_non_decreasing_and_ends_at_hundred() {
        let values = [1.0, 2.0, 2.5, 3.0, 7.0, 9.0];
        let points = build_cdf(&values, 4);
        assert_eq!(points.len(), 5);
        for pair in points.windows(2) {
            assert!(pair[1].cumulative_percent >= pair[0].cumulative_percent);
        }
        assert!((points.last().unwrap().cumulative_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn curve_starts_at_origin_anchor() {
        let values = [3.0, 5.0, 9.0];
        let points = build_cdf(&values, 3);
        assert!((points[0].upper - 3.0).abs() < 1e-9);
        assert_eq!(points[0].cumulative_percent, 0.0);
    }

    #[test]
    fn negatives_and_nan_are_filtered() {
        let values = [-1.0, f64::NAN, 2.0, 4.0];
        let points = build_cdf(&values, 2);
        // Only 2.0 and 4.0 survive: one sample per bin.
        assert!((points[1].cumulative_percent - 50.0).abs() < 1e-9);
        assert!((points[2].cumulative_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_after_filtering_yields_empty_curve() {
        assert!(build_cdf(&[], 5).is_empty());
        assert!(build_cdf(&[-3.0, f64::NAN], 5).is_empty());
    }

    #[test]
    fn all_equal_samples_collapse_to_single_bin() {
        let points = build_cdf(&[2.0, 2.0, 2.0], 10);
        assert_eq!(points.len(), 2);
        assert!((points[1].cumulative_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn minimum_is_counted_by_lowest_bin() {
        let points = build_cdf(&[1.0, 10.0], 3);
        // 1.0 lands in the lowest bin even though the bins are (lo, hi].
        assert!((points[1].cumulative_percent - 50.0).abs() < 1e-9);
    }
}
