/// values written by dataframe tooling for a missing cell
const NULL_TOKENS: [&str; 5] = ["", "nan", "NaN", "null", "None"];

/// cleans a region code read from the stop table. missing values become None.
pub fn normalize_region_code(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if NULL_TOKENS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// cleans a local-authority code read from the stop table.
///
/// local-authority codes often pass through float columns on their way into the
/// stop table, so "14.0" and "14" must deduplicate to the same area. numeric
/// values with no fractional part are rendered as integers; other text is kept.
pub fn normalize_local_authority_code(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if NULL_TOKENS.contains(&trimmed) {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if !value.is_finite() => None,
        Ok(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            Some(format!("{}", value as i64))
        }
        _ => Some(trimmed.to_string()),
    }
}
