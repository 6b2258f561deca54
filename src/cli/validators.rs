//! Value parsers for numeric CLI arguments.

/// Parse and validate the smoothing factor (0.0 < factor < 1.0).
pub fn parse_factor(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(value > 0.0 && value < 1.0) {
        return Err(format!(
            "factor must be between 0.0 and 1.0 (exclusive), got {value}"
        ));
    }

    Ok(value)
}

/// Parse and validate a count that must be at least 1.
pub fn parse_positive(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid whole number"))?;

    if value == 0 {
        return Err("value must be at least 1".to_string());
    }

    Ok(value)
}
