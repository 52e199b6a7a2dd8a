use crate::utils::error::{CalcError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 取得必填欄位的文字內容；空白或只有空格視為未填
pub fn validate_required_field<'a>(field_name: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(CalcError::MissingField {
            field: field_name.to_string(),
        }),
    }
}

/// 將文字解析為有限的數值；`inf`、`NaN` 等一律視為非數字
pub fn parse_number(field_name: &str, text: &str) -> Result<f64> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::NotANumber {
            field: field_name.to_string(),
            value: text.to_string(),
        }),
    }
}

pub fn validate_min(field_name: &str, value: f64, min: f64, reason: &str) -> Result<()> {
    if value < min {
        return Err(CalcError::OutOfRange {
            field: field_name.to_string(),
            value,
            reason: reason.to_string(),
        });
    }
    Ok(())
}

pub fn validate_max(field_name: &str, value: f64, max: f64, reason: &str) -> Result<()> {
    if value > max {
        return Err(CalcError::OutOfRange {
            field: field_name.to_string(),
            value,
            reason: reason.to_string(),
        });
    }
    Ok(())
}

pub fn validate_finite_config(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_field() {
        assert_eq!(validate_required_field("start", Some(" 18.5 ")).unwrap(), "18.5");
        assert!(validate_required_field("start", Some("")).is_err());
        assert!(validate_required_field("start", Some("   ")).is_err());
        assert!(validate_required_field("start", None).is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("start", "18.5").unwrap(), 18.5);
        assert_eq!(parse_number("start", "-3").unwrap(), -3.0);
        assert!(parse_number("start", "abc").is_err());
        assert!(parse_number("start", "inf").is_err());
        assert!(parse_number("start", "NaN").is_err());
        assert!(parse_number("start", "12abc").is_err());
    }

    #[test]
    fn test_validate_bounds() {
        assert!(validate_min("start", 0.0, 0.0, "too small").is_ok());
        assert!(validate_min("start", -0.1, 0.0, "too small").is_err());
        assert!(validate_max("start", 54.0, 54.0, "too big").is_ok());
        assert!(validate_max("start", 54.1, 54.0, "too big").is_err());
    }

    #[test]
    fn test_validate_finite_config() {
        assert!(validate_finite_config("rules.min_index", -10.0).is_ok());
        assert!(validate_finite_config("rules.min_index", f64::NAN).is_err());
    }
}
