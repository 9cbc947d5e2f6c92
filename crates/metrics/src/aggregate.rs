use std::collections::BTreeMap;

use primitives::time::bucket_key;

/// Truncate each sample's timestamp to `precision` characters and average
/// the samples sharing a bucket. The result is ordered by bucket key, which
/// for these timestamps is chronological order.
pub fn bucket_mean(samples: Vec<(String, f64)>, precision: usize) -> BTreeMap<String, f64> {
    let mut groups: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for (time, value) in samples {
        let entry = groups.entry(bucket_key(&time, precision).to_owned()).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    groups.into_iter().map(|(key, (sum, count))| (key, sum / count as f64)).collect()
}

/// Sum samples per bucket. Grouping through the ordered map doubles as the
/// explicit re-sort: the running pass downstream must not depend on the
/// input file happening to be time-ordered.
pub fn bucket_sum(samples: Vec<(String, f64)>, precision: usize) -> BTreeMap<String, f64> {
    let mut groups: BTreeMap<String, f64> = BTreeMap::new();
    for (time, value) in samples {
        *groups.entry(bucket_key(&time, precision).to_owned()).or_insert(0.0) += value;
    }
    groups
}

/// Keep samples whose value is a non-negative finite number. Negative
/// derived values indicate a clock or ordering anomaly and are dropped, as
/// are the NaN markers produced by the duration normalizer.
pub fn retain_non_negative(samples: &mut Vec<(String, f64)>) {
    samples.retain(|(_, value)| value.is_finite() && *value >= 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitives::time::SECOND_PRECISION;

    #[test]
    fn bucket_mean_averages_within_a_second() {
        let samples = vec![
            ("2024-01-01 10:00:00.100000".to_owned(), 1.0),
            ("2024-01-01 10:00:00.900000".to_owned(), 3.0),
            ("2024-01-01 10:00:01.000000".to_owned(), 5.0),
        ];
        let series = bucket_mean(samples, SECOND_PRECISION);
        assert_eq!(series.len(), 2);
        assert!((series["2024-01-01 10:00:00"] - 2.0).abs() < 1e-9);
        assert!((series["2024-01-01 10:00:01"] - 5.0).abs() < 1e-9);
    }

    #[test]
    fn bucket_sum_totals_out_of_order_input() {
        let samples = vec![
            ("2024-01-01 10:00:01.000000".to_owned(), 10.0),
            ("2024-01-01 10:00:00.000000".to_owned(), 1.0),
            ("2024-01-01 10:00:00.500000".to_owned(), 2.0),
        ];
        let series = bucket_sum(samples, SECOND_PRECISION);
        assert!((series["2024-01-01 10:00:00"] - 3.0).abs() < 1e-9);
        // BTreeMap ordering puts the earlier bucket first regardless of input order.
        assert_eq!(series.keys().next().unwrap(), "2024-01-01 10:00:00");
    }

    #[test]
    fn retain_non_negative_drops_nan_and_negatives() {
        let mut samples = vec![
            ("a".to_owned(), 1.0),
            ("b".to_owned(), -0.5),
            ("c".to_owned(), f64::NAN),
            ("d".to_owned(), f64::INFINITY),
            ("e".to_owned(), 0.0),
        ];
        retain_non_negative(&mut samples);
        let keys: Vec<&str> = samples.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "e"]);
    }
}
