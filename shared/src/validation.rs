//! Validation rules for the Stock Control System
//!
//! Pure field-level checks shared by the ledger and any presentation layer.
//! Each returns a caller-facing message; the backend wraps them in its typed
//! error taxonomy.

use rust_decimal::Decimal;

/// Validate a product name: required, non-blank
pub fn validate_product_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name must not be empty");
    }
    Ok(())
}

/// Validate a purchase or sale price
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

/// Validate the minimum/maximum stock threshold pair
pub fn validate_stock_thresholds(min_stock: i32, max_stock: i32) -> Result<(), &'static str> {
    if min_stock < 0 {
        return Err("Minimum stock cannot be negative");
    }
    if max_stock < min_stock {
        return Err("Maximum stock must not be below minimum stock");
    }
    Ok(())
}

/// Validate a movement quantity
pub fn validate_movement_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

/// Validate a movement unit value
pub fn validate_unit_value(unit_value: Decimal) -> Result<(), &'static str> {
    if unit_value < Decimal::ZERO {
        return Err("Unit value cannot be negative");
    }
    Ok(())
}

/// Validate a caller-supplied listing limit
pub fn validate_listing_limit(limit: i64) -> Result<(), &'static str> {
    if limit < 0 {
        return Err("Limit cannot be negative");
    }
    Ok(())
}

/// Validate an initial on-hand quantity requested at product creation
pub fn validate_initial_stock(initial_stock: i32) -> Result<(), &'static str> {
    if initial_stock < 0 {
        return Err("Initial stock cannot be negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn blank_name_rejected() {
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name("Widget").is_ok());
    }

    #[test]
    fn negative_price_rejected() {
        assert!(validate_price(Decimal::new(-1, 2)).is_err());
        assert!(validate_price(Decimal::ZERO).is_ok());
    }

    #[test]
    fn inverted_thresholds_rejected() {
        assert!(validate_stock_thresholds(10, 5).is_err());
        assert!(validate_stock_thresholds(-1, 5).is_err());
        assert!(validate_stock_thresholds(5, 5).is_ok());
        assert!(validate_stock_thresholds(0, 100).is_ok());
    }

    #[test]
    fn non_positive_quantity_rejected() {
        assert!(validate_movement_quantity(0).is_err());
        assert!(validate_movement_quantity(-3).is_err());
        assert!(validate_movement_quantity(1).is_ok());
    }

    #[test]
    fn negative_limit_rejected() {
        assert!(validate_listing_limit(-1).is_err());
        assert!(validate_listing_limit(0).is_ok());
        assert!(validate_listing_limit(10).is_ok());
    }
}
