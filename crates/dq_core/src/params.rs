//! Rule parameter parsing.
//!
//! Kept apart from predicate evaluation so that every parameter edge case can
//! be tested without a dataset. The evaluator and the remediation engine parse
//! parameters the same way through these functions.

use crate::ParamError;

/// Parses a numeric bound for `MIN`/`MAX` rules.
///
/// Surrounding whitespace is ignored. NaN is rejected since no value can be
/// compared against it.
pub fn parse_bound(param: Option<&str>) -> Result<f64, ParamError> {
    let text = param.ok_or(ParamError::MissingParameter)?.trim();
    match text.parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(ParamError::InvalidNumber(text.to_string())),
    }
}

/// Parses the comma-separated allowed values of an `IN_LIST` rule.
///
/// Elements are trimmed and empty elements are dropped, so the result may be
/// empty (e.g. for `","`).
pub fn parse_allowed_list(param: Option<&str>) -> Result<Vec<String>, ParamError> {
    let text = param.ok_or(ParamError::MissingParameter)?;
    Ok(text
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect())
}

/// Returns the pattern of a `REGEX` rule.
pub fn require_pattern(param: Option<&str>) -> Result<&str, ParamError> {
    param.ok_or(ParamError::MissingParameter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound(Some("0")), Ok(0.0));
        assert_eq!(parse_bound(Some(" -2.5 ")), Ok(-2.5));
        assert_eq!(parse_bound(Some("1e3")), Ok(1000.0));
        assert_eq!(parse_bound(Some("inf")), Ok(f64::INFINITY));
    }

    #[test]
    fn test_parse_bound_rejects_garbage() {
        assert_eq!(
            parse_bound(Some("abc")),
            Err(ParamError::InvalidNumber("abc".to_string()))
        );
        assert_eq!(
            parse_bound(Some("NaN")),
            Err(ParamError::InvalidNumber("NaN".to_string()))
        );
        assert_eq!(
            parse_bound(Some("")),
            Err(ParamError::InvalidNumber(String::new()))
        );
        assert_eq!(parse_bound(None), Err(ParamError::MissingParameter));
    }

    #[test]
    fn test_parse_allowed_list() {
        assert_eq!(
            parse_allowed_list(Some("OPEN, CLOSED ,PENDING")),
            Ok(vec![
                "OPEN".to_string(),
                "CLOSED".to_string(),
                "PENDING".to_string()
            ])
        );
        assert_eq!(parse_allowed_list(Some("A,,B,")), Ok(vec!["A".to_string(), "B".to_string()]));
        assert_eq!(parse_allowed_list(Some(" , ")), Ok(Vec::new()));
        assert_eq!(parse_allowed_list(None), Err(ParamError::MissingParameter));
    }

    #[test]
    fn test_require_pattern() {
        assert_eq!(require_pattern(Some("^a")), Ok("^a"));
        assert_eq!(require_pattern(None), Err(ParamError::MissingParameter));
    }
}
