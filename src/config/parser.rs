use crate::ConfigError;
use chrono::Local;

/// Parses a non-negative integer argument
///
/// Negative values are rejected with a dedicated message rather than a
/// generic parse error, so `-1` reads as "must be >= 0".
///
/// # Example
///
/// ```
/// use depth_crawler::config::parse_non_negative;
///
/// let depth: u32 = parse_non_negative("2").unwrap();
/// assert_eq!(depth, 2);
/// assert!(parse_non_negative::<u32>("-1").is_err());
/// ```
pub fn parse_non_negative<T>(raw: &str) -> Result<T, ConfigError>
where
    T: TryFrom<i64>,
{
    let trimmed = raw.trim();
    let value: i64 = trimmed.parse().map_err(|_| ConfigError::InvalidCount {
        value: raw.to_string(),
        reason: "not an integer".to_string(),
    })?;

    if value < 0 {
        return Err(ConfigError::InvalidCount {
            value: raw.to_string(),
            reason: "must be >= 0".to_string(),
        });
    }

    T::try_from(value).map_err(|_| ConfigError::InvalidCount {
        value: raw.to_string(),
        reason: "out of range".to_string(),
    })
}

/// Parses the cross-level-uniqueness flag
///
/// Only `true` and `false` are accepted (case-insensitive); anything else is
/// an error instead of silently meaning `false`.
pub fn parse_bool_flag(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidFlag(raw.to_string())),
    }
}

/// Generates a run identifier from the local time, e.g. `2025-12-25_15-30-12`
pub fn generate_run_id() -> String {
    Local::now().format("%Y-%m-%d_%H-%M-%S").to_string()
}
