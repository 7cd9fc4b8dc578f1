//! Display formatting for ages and probabilities

/// Round an age to the nearest tenth of a year
///
/// Whole numbers render without a fractional part, so `47.0` becomes `"47"`.
pub fn format_age(age: f64) -> String {
    trim_number((10.0 * age).round() / 10.0)
}

/// Format a probability as a percentage with adaptive precision
///
/// Values at the extremes of the distribution get two decimals, mid-range
/// values one. Anything below 0.01% or above 99.99% is shown as a bound.
pub fn format_percent(p: f64) -> String {
    if p < 0.0001 {
        return "< 0.01%".to_string();
    }
    if p > 0.9999 {
        return "> 99.99%".to_string();
    }

    let resolution = if p < 0.01 || p > 0.99 { 100.0 } else { 10.0 };
    format!("{}%", trim_number((100.0 * resolution * p).round() / resolution))
}

/// Shortest decimal rendering, without a trailing ".0" or a negative zero
fn trim_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(47.36), "47.4");
        assert_eq!(format_age(47.0), "47");
        assert_eq!(format_age(80.04), "80");
        assert_eq!(format_age(0.0), "0");
    }

    #[test]
    fn test_format_percent_bounds() {
        assert_eq!(format_percent(0.00005), "< 0.01%");
        assert_eq!(format_percent(0.9999999), "> 99.99%");
    }

    #[test]
    fn test_format_percent_resolution() {
        assert_eq!(format_percent(0.5), "50%");
        assert_eq!(format_percent(0.005), "0.5%");
        assert_eq!(format_percent(0.00123), "0.12%");
        assert_eq!(format_percent(0.123), "12.3%");
        assert_eq!(format_percent(0.995), "99.5%");
        assert_eq!(format_percent(0.9912), "99.12%");
    }
}
