//! Core primitives for the Gethscope project.
/// Cumulative distribution summaries
pub mod cdf;
/// Duration literal normalization
pub mod duration;
/// Timestamp parsing and bucketing
pub mod time;

pub use cdf::{CdfPoint, build_cdf};
pub use duration::normalize_duration;
pub use time::{
    MICROSECOND_PRECISION, SECOND_PRECISION, TimeFormatError, bucket_key, elapsed_seconds,
    parse_timestamp, seconds_between, timestamp_micros,
};
