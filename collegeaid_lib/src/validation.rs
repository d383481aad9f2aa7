use scorecard_api::types::SchoolID;

use crate::error::AidError;

pub const MAX_SEARCH_LENGTH: usize = 100;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: u32 = 12;

/// The dataset refuses pages larger than this.
pub const MAX_PER_PAGE: u32 = 100;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit. Unlike a required field, an empty result is allowed.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, AidError> {
    if input.len() > max_len {
        return Err(AidError::invalid(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    Ok(input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string())
}

/// Validate a search term: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, AidError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Resolve the page size, applying the default and the dataset's bounds.
pub fn validate_per_page(per_page: Option<u32>) -> Result<u32, AidError> {
    match per_page.unwrap_or(DEFAULT_PER_PAGE) {
        0 => Err(AidError::invalid("per_page must be a positive integer")),
        n if n > MAX_PER_PAGE => Err(AidError::invalid(format!(
            "per_page must be at most {}",
            MAX_PER_PAGE
        ))),
        n => Ok(n),
    }
}

/// Parse a raw page-size parameter as received from a query string.
pub fn parse_per_page(raw: Option<&str>) -> Result<u32, AidError> {
    let parsed = match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => Some(
            s.parse::<u32>()
                .map_err(|_| AidError::invalid(format!("per_page '{}' is not a positive integer", s)))?,
        ),
        None => None,
    };
    validate_per_page(parsed)
}

/// An income must be a finite, non-negative amount.
pub fn validate_income(income: f64) -> Result<f64, AidError> {
    if !income.is_finite() {
        return Err(AidError::invalid("income must be a finite number"));
    }
    if income < 0.0 {
        return Err(AidError::invalid("income must not be negative"));
    }
    Ok(income)
}

/// Parse an income supplied as text (`"65000"`, `" 65000.50 "`).
pub fn parse_income(raw: &str) -> Result<f64, AidError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AidError::invalid("income is required"));
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| AidError::invalid(format!("income '{}' is not a number", trimmed)))?;
    validate_income(value)
}

/// Parse a school id supplied as text.
pub fn parse_school_id(raw: &str) -> Result<SchoolID, AidError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AidError::invalid("schoolId is required"));
    }
    let id = trimmed
        .parse::<SchoolID>()
        .map_err(|_| AidError::invalid(format!("schoolId '{}' is not an integer", trimmed)))?;
    validate_school_id(id)
}

/// School ids are positive UNITIDs.
pub fn validate_school_id(id: SchoolID) -> Result<SchoolID, AidError> {
    if id <= 0 {
        return Err(AidError::invalid("schoolId must be a positive integer"));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_control_chars_and_trims() {
        assert_eq!(sanitize_text("  Emory\u{7}  ", 100).unwrap(), "Emory");
        assert_eq!(sanitize_text("   ", 100).unwrap(), "");
        assert!(sanitize_text(&"x".repeat(101), 100).is_err());
    }

    #[test]
    fn per_page_defaults_and_bounds() {
        assert_eq!(validate_per_page(None).unwrap(), 12);
        assert_eq!(validate_per_page(Some(1)).unwrap(), 1);
        assert_eq!(validate_per_page(Some(100)).unwrap(), 100);
        assert!(validate_per_page(Some(0)).is_err());
        assert!(validate_per_page(Some(101)).is_err());
    }

    #[test]
    fn per_page_parsing() {
        assert_eq!(parse_per_page(None).unwrap(), 12);
        assert_eq!(parse_per_page(Some("")).unwrap(), 12);
        assert_eq!(parse_per_page(Some(" 20 ")).unwrap(), 20);
        assert!(parse_per_page(Some("-1")).is_err());
        assert!(parse_per_page(Some("ten")).is_err());
    }

    #[test]
    fn income_validation() {
        assert_eq!(validate_income(0.0).unwrap(), 0.0);
        assert!(validate_income(-1.0).is_err());
        assert!(validate_income(f64::NAN).is_err());
        assert!(validate_income(f64::INFINITY).is_err());
    }

    #[test]
    fn income_parsing() {
        assert_eq!(parse_income("65000").unwrap(), 65000.0);
        assert_eq!(parse_income(" 1234.5 ").unwrap(), 1234.5);
        assert!(matches!(parse_income(""), Err(AidError::InvalidInput(_))));
        assert!(matches!(parse_income("lots"), Err(AidError::InvalidInput(_))));
        assert!(matches!(parse_income("-5"), Err(AidError::InvalidInput(_))));
    }

    #[test]
    fn school_id_parsing() {
        assert_eq!(parse_school_id("139755").unwrap(), 139755);
        assert!(parse_school_id("").is_err());
        assert!(parse_school_id("abc").is_err());
        assert!(parse_school_id("0").is_err());
    }
}
