use chrono::NaiveDateTime;
use thiserror::Error;

/// Timestamp layout carrying fractional seconds, e.g. `2024-01-01 10:00:02.500000`.
///
/// `%.f` alone would also accept a missing fraction, so strict call sites
/// additionally require the dot; see [`parse_fractional`].
pub const FRACTIONAL_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.f";
/// Timestamp layout without fractional seconds, e.g. `2024-01-01 10:00:02`.
pub const WHOLE_SECOND_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Prefix length that identifies a timestamp up to whole seconds.
pub const SECOND_PRECISION: usize = 19;
/// Prefix length that identifies a timestamp up to microseconds.
pub const MICROSECOND_PRECISION: usize = 26;

/// Error returned when a log timestamp matches none of the known layouts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("time format wrong: {text}")]
pub struct TimeFormatError {
    /// The offending timestamp text.
    pub text: String,
}

impl TimeFormatError {
    fn new(text: &str) -> Self {
        Self { text: text.to_owned() }
    }
}

/// Parse a log timestamp, trying the fractional-seconds layout first and
/// falling back to the whole-seconds layout.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, TimeFormatError> {
    let trimmed = text.trim();
    parse_fractional(trimmed).or_else(|_| {
        NaiveDateTime::parse_from_str(trimmed, WHOLE_SECOND_LAYOUT)
            .map_err(|_| TimeFormatError::new(text))
    })
}

/// Seconds elapsed between two timestamps in the fractional-seconds layout.
///
/// Unlike [`parse_timestamp`] there is no whole-seconds fallback: records on
/// this path always carry microseconds and one without them is malformed.
/// The result is negative when `end` precedes `start`.
pub fn elapsed_seconds(end: &str, start: &str) -> Result<f64, TimeFormatError> {
    let end_time = parse_fractional(end.trim())?;
    let start_time = parse_fractional(start.trim())?;
    Ok(seconds_between(end_time, start_time))
}

/// Microseconds since the Unix epoch for a fractional-layout timestamp.
pub fn timestamp_micros(text: &str) -> Result<i64, TimeFormatError> {
    Ok(parse_fractional(text.trim())?.and_utc().timestamp_micros())
}

/// Truncate a timestamp string to its first `len` characters, yielding the
/// grouping key for per-second (or finer) aggregation.
pub fn bucket_key(text: &str, len: usize) -> &str {
    text.get(..len).unwrap_or(text)
}

/// Signed seconds between two already-parsed timestamps.
pub fn seconds_between(end: NaiveDateTime, start: NaiveDateTime) -> f64 {
    let delta = end - start;
    delta
        .num_microseconds()
        .map_or_else(|| delta.num_milliseconds() as f64 / 1e3, |micros| micros as f64 / 1e6)
}

fn parse_fractional(text: &str) -> Result<NaiveDateTime, TimeFormatError> {
    // `%.f` happily matches an absent fraction; the dot is what makes this
    // layout strict.
    if !text.contains('.') {
        return Err(TimeFormatError::new(text));
    }
    NaiveDateTime::parse_from_str(text, FRACTIONAL_LAYOUT)
        .map_err(|_| TimeFormatError::new(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_timestamp_fractional_layout() {
        let parsed = parse_timestamp("2024-01-01 10:00:02.500000").unwrap();
        assert_eq!(parsed.and_utc().timestamp_micros() % 1_000_000, 500_000);
    }

    #[test]
    fn parse_timestamp_whole_second_fallback() {
        let parsed = parse_timestamp("2024-01-01 10:00:02").unwrap();
        assert_eq!(parsed.and_utc().timestamp_micros() % 1_000_000, 0);
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        let err = parse_timestamp("not a time").unwrap_err();
        assert_eq!(err.text, "not a time");
    }

    #[test]
    fn parse_timestamp_trims_stray_tabs() {
        assert!(parse_timestamp("\t2024-01-01 10:00:02\t").is_ok());
    }

    #[test]
    fn fraction_is_left_aligned_not_nanoseconds() {
        // `.5` means half a second, the same way the node prints it.
        let secs =
            elapsed_seconds("2024-01-01 10:00:01.5", "2024-01-01 10:00:01.0").unwrap();
        assert!((secs - 0.5).abs() < 1e-9);
    }

    #[test]
    fn elapsed_seconds_basic() {
        let secs =
            elapsed_seconds("2024-01-01 10:00:02.500000", "2024-01-01 10:00:00.000000").unwrap();
        assert!((secs - 2.5).abs() < 1e-9);
    }

    #[test]
    fn elapsed_seconds_negative_when_reversed() {
        let secs =
            elapsed_seconds("2024-01-01 10:00:00.000000", "2024-01-01 10:00:02.500000").unwrap();
        assert!((secs + 2.5).abs() < 1e-9);
    }

    #[test]
    fn elapsed_seconds_has_no_whole_second_fallback() {
        // The fractional layout is mandatory on this path.
        assert!(elapsed_seconds("2024-01-01 10:00:02", "2024-01-01 10:00:00.000000").is_err());
    }

    #[test]
    fn timestamp_micros_counts_the_fraction() {
        let micros = timestamp_micros("2024-01-01 10:00:02.500000").unwrap();
        assert_eq!(micros % 1_000_000, 500_000);
    }

    #[test]
    fn bucket_key_truncates_to_second_precision() {
        assert_eq!(
            bucket_key("2024-01-01 10:00:02.500000", SECOND_PRECISION),
            "2024-01-01 10:00:02"
        );
    }

    #[test]
    fn bucket_key_keeps_short_input() {
        assert_eq!(bucket_key("2024-01-01", SECOND_PRECISION), "2024-01-01");
    }

    #[test]
    fn bucket_key_microsecond_precision() {
        assert_eq!(
            bucket_key("2024-01-01 10:00:02.500000", MICROSECOND_PRECISION),
            "2024-01-01 10:00:02.500000"
        );
    }
}
