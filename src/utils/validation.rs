use crate::utils::error::{Result, TaxError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(TaxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(TaxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TaxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(TaxError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Parses a user-typed amount. Surrounding whitespace is ignored; anything
/// that is not a finite, non-negative number is an `InputError`.
pub fn parse_amount(field_name: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaxError::input(field_name, raw, "value is required"));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| TaxError::input(field_name, raw, "not a number"))?;

    if !value.is_finite() {
        return Err(TaxError::input(field_name, raw, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(TaxError::input(field_name, raw, "cannot be negative"));
    }

    Ok(value)
}
