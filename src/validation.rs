//! Form Validation
//!
//! Checked synchronously before submit; failures never reach the server.

use crate::error::{ApiError, ApiResult};

fn invalid<T>(msg: impl Into<String>) -> ApiResult<T> {
    Err(ApiError::Validation(msg.into()))
}

/// Ten-digit phone number, spaces and dashes ignored
pub fn phone(raw: &str) -> ApiResult<String> {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
    if digits.len() == 10 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(digits)
    } else {
        invalid("Phone number must be 10 digits")
    }
}

pub fn pin(raw: &str) -> ApiResult<String> {
    let pin = raw.trim();
    if pin.len() == 4 && pin.chars().all(|c| c.is_ascii_digit()) {
        Ok(pin.to_string())
    } else {
        invalid("PIN must be 4 digits")
    }
}

pub fn password(raw: &str) -> ApiResult<String> {
    if raw.is_empty() {
        invalid("Password is required")
    } else {
        Ok(raw.to_string())
    }
}

pub fn required(label: &str, raw: &str) -> ApiResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        invalid(format!("{} is required", label))
    } else {
        Ok(value.to_string())
    }
}

/// Strictly positive amount
pub fn positive_amount(label: &str, raw: &str) -> ApiResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => invalid(format!("{} must be a positive number", label)),
    }
}

/// Zero or positive amount
pub fn non_negative_amount(label: &str, raw: &str) -> ApiResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => invalid(format!("{} must be zero or more", label)),
    }
}

pub fn date(label: &str, raw: &str) -> ApiResult<String> {
    match crate::format::parse_date(raw) {
        Some(d) => Ok(d.format("%Y-%m-%d").to_string()),
        None => invalid(format!("{} must be a valid date", label)),
    }
}

pub fn year(raw: i32) -> ApiResult<i32> {
    if (2000..=2100).contains(&raw) {
        Ok(raw)
    } else {
        invalid("Year is out of range")
    }
}

pub fn optional_text(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_normalizes_separators() {
        assert_eq!(phone("98000-00000").unwrap(), "9800000000");
        assert!(phone("12345").is_err());
        assert!(phone("98000000ab").is_err());
    }

    #[test]
    fn test_pin_is_four_digits() {
        assert_eq!(pin(" 0420 ").unwrap(), "0420");
        assert!(pin("12345").is_err());
        assert!(pin("12a4").is_err());
    }

    #[test]
    fn test_amounts() {
        assert_eq!(positive_amount("Amount", "250.5").unwrap(), 250.5);
        assert!(positive_amount("Amount", "0").is_err());
        assert_eq!(non_negative_amount("Amount", "0").unwrap(), 0.0);
        assert!(non_negative_amount("Amount", "-1").is_err());
        assert!(positive_amount("Amount", "lots").is_err());
    }

    #[test]
    fn test_required_and_optional() {
        assert_eq!(required("Name", "  Hari "), Ok("Hari".to_string()));
        assert_eq!(required("Name", "   "), Err(ApiError::Validation("Name is required".into())));
        assert_eq!(optional_text("  "), None);
    }

    #[test]
    fn test_date_and_year() {
        assert_eq!(date("Date", "2024-03-01").unwrap(), "2024-03-01");
        assert!(date("Date", "01/03/2024").is_err());
        assert!(year(1999).is_err());
        assert_eq!(year(2024), Ok(2024));
    }
}
