//! Field checks shared by the `New*` input types.

use rust_decimal::Decimal;

use crate::DomainError;

pub(crate) fn required_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::required(field));
    }
    Ok(())
}

pub(crate) fn positive_id(field: &str, value: i64) -> Result<(), DomainError> {
    if value == 0 {
        return Err(DomainError::required(field));
    }
    if value < 0 {
        return Err(DomainError::invalid(field, "must be positive"));
    }
    Ok(())
}

pub(crate) fn non_negative_amount(field: &str, value: Decimal) -> Result<(), DomainError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::invalid(field, "must not be negative"));
    }
    Ok(())
}

pub(crate) fn non_negative_count(field: &str, value: i32) -> Result<(), DomainError> {
    if value < 0 {
        return Err(DomainError::invalid(field, "must not be negative"));
    }
    Ok(())
}

/// Checks one order or quotation line. `index` is the line's position in the request.
pub(crate) fn line_item(
    index: usize,
    product_id: i64,
    quantity: i32,
    unit_price: Decimal,
    discount: Decimal,
) -> Result<(), DomainError> {
    if product_id <= 0 {
        return Err(DomainError::invalid(
            format!("items[{index}].product_id"),
            "must be positive",
        ));
    }
    non_negative_count(&format!("items[{index}].quantity"), quantity)?;
    non_negative_amount(&format!("items[{index}].unit_price"), unit_price)?;
    non_negative_amount(&format!("items[{index}].discount"), discount)?;
    Ok(())
}
