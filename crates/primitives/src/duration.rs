/// Unit suffixes recognized on duration literals, most specific first so that
/// `ms`/`µs`/`ns` are stripped before a bare `s` could match their tail.
const UNIT_FACTORS: [(&str, f64); 6] = [
    ("ms", 1e-3),
    ("µs", 1e-6),
    ("ns", 1e-9),
    ("s", 1.0),
    ("m", 60.0),
    ("h", 3600.0),
];

/// Convert a duration literal such as `"1.5ms"` or `"2h"` into seconds.
///
/// Returns NaN when the remainder is not a number or the literal carries no
/// recognized unit; callers filter NaN out together with negative values.
pub fn normalize_duration(text: &str) -> f64 {
    let trimmed = text.trim();
    for (unit, factor) in UNIT_FACTORS {
        if let Some(number) = trimmed.strip_suffix(unit) {
            return number.parse::<f64>().map_or(f64::NAN, |value| value * factor);
        }
    }
    f64::NAN
}
