use crate::utils::error::{OrderError, Result};
use rust_decimal::Decimal;
use uuid::Uuid;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_id(field_name: &str, id: &Uuid) -> Result<()> {
    if id.is_nil() {
        return Err(OrderError::invalid_argument(
            field_name,
            format!("{} cannot be empty", field_name),
        ));
    }
    Ok(())
}

pub fn validate_positive_decimal(field_name: &str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(OrderError::InvalidFreightParameters {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("{} must be greater than zero", field_name),
        });
    }
    Ok(())
}

pub fn validate_non_negative_decimal(field_name: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(OrderError::InvalidFreightParameters {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("{} cannot be negative", field_name),
        });
    }
    Ok(())
}

pub fn validate_decimal_at_most(field_name: &str, value: Decimal, max: Decimal) -> Result<()> {
    if value > max {
        return Err(OrderError::InvalidFreightParameters {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("{} cannot exceed {}", field_name, max),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(OrderError::ConfigValidationError {
            field: field_name.to_string(),
            message: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}
