//! Validation utilities for the back-office stock alerts service
//!
//! Includes France-specific validations for supplier records.

use rust_decimal::Decimal;

// ============================================================================
// Order Validations
// ============================================================================

/// Validate an ordered quantity (strictly positive)
pub fn validate_order_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Order quantity must be positive");
    }
    Ok(())
}

/// Validate a unit price (non-negative when provided)
pub fn validate_unit_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Unit price cannot be negative");
    }
    Ok(())
}

/// Validate SKU format (3-32 chars, uppercase alphanumeric with dashes)
pub fn validate_sku(sku: &str) -> Result<(), &'static str> {
    if sku.len() < 3 {
        return Err("SKU must be at least 3 characters");
    }
    if sku.len() > 32 {
        return Err("SKU must be at most 32 characters");
    }
    if !sku
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("SKU must be uppercase alphanumeric with dashes only");
    }
    Ok(())
}

/// Validate purchase order number format (PO-YYYY-NNNN)
pub fn validate_order_number(number: &str) -> Result<(), &'static str> {
    let parts: Vec<&str> = number.split('-').collect();
    if parts.len() != 3 || parts[0] != "PO" {
        return Err("Order number must match PO-YYYY-NNNN");
    }
    if parts[1].len() != 4 || !parts[1].chars().all(|c| c.is_ascii_digit()) {
        return Err("Order number year must be 4 digits");
    }
    if parts[2].is_empty() || !parts[2].chars().all(|c| c.is_ascii_digit()) {
        return Err("Order number sequence must be numeric");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

// ============================================================================
// France-Specific Validations
// ============================================================================

/// Validate a French phone number
/// Accepts: 0612345678, 06-12-34-56-78, +33612345678
pub fn validate_french_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // National format: 10 digits starting with 0
    if digits.len() == 10 && digits.starts_with('0') {
        return Ok(());
    }
    // International format with country code: 11 digits starting with 33
    if digits.len() == 11 && digits.starts_with("33") {
        return Ok(());
    }

    Err("Invalid French phone number format")
}

/// Validate a SIRET (French establishment identifier)
/// 14-digit number with Luhn checksum
pub fn validate_siret(siret: &str) -> Result<(), &'static str> {
    let digits: Vec<u32> = siret.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 14 || siret.chars().any(|c| !c.is_ascii_digit()) {
        return Err("SIRET must be 14 digits");
    }

    let mut sum = 0;
    for (i, &digit) in digits.iter().enumerate() {
        // Double every second digit from the right (even positions here)
        let mut d = if i % 2 == 0 { digit * 2 } else { digit };
        if d > 9 {
            d -= 9;
        }
        sum += d;
    }

    if sum % 10 != 0 {
        return Err("Invalid SIRET checksum");
    }

    Ok(())
}
