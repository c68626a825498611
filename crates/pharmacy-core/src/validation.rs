//! # Validation Module
//!
//! Input validation for catalog edits and checkout requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (axum)                                                  │
//! │  └── JSON shape (deserialization)                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, lengths, ranges                                  │
//! │  └── Runs before any store access                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE (mobile_number, invoice_number)                            │
//! │  └── CHECK (stock_quantity >= 0)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pharmacy_core::validation::{validate_mobile_number, validate_quantity};
//!
//! validate_mobile_number("9876543210").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{MedicineUpdate, NewMedicine, NewSupplier};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_PRICE_PAISE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_MOBILE_LEN: usize = 20;
const MAX_BATCH_LEN: usize = 50;
const MAX_ADDRESS_LEN: usize = 500;
const MAX_QUERY_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Checks that a field is non-empty after trimming, and returns the trimmed value.
///
/// ## Example
/// ```rust
/// use pharmacy_core::validation::validate_required;
///
/// assert_eq!(validate_required("customerName", "  Asha ").unwrap(), "Asha");
/// assert!(validate_required("customerName", "   ").is_err());
/// ```
pub fn validate_required<'a>(field: &str, value: &'a str) -> ValidationResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(value)
}

fn validate_max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Validates a person, supplier or medicine name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = validate_required(field, name)?;
    validate_max_len(field, name, MAX_NAME_LEN)
}

/// Validates a medicine name.
pub fn validate_medicine_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

/// Validates a batch number.
pub fn validate_batch_number(batch: &str) -> ValidationResult<()> {
    let batch = validate_required("batchNumber", batch)?;
    validate_max_len("batchNumber", batch, MAX_BATCH_LEN)
}

/// Validates a mobile number used as the customer key.
///
/// ## Rules
/// - Must not be empty
/// - At most 20 characters
/// - Digits, with an optional leading `+`; spaces and hyphens are tolerated
///
/// ## Example
/// ```rust
/// use pharmacy_core::validation::validate_mobile_number;
///
/// assert!(validate_mobile_number("9876543210").is_ok());
/// assert!(validate_mobile_number("+91 98765-43210").is_ok());
/// assert!(validate_mobile_number("call me").is_err());
/// ```
pub fn validate_mobile_number(mobile: &str) -> ValidationResult<()> {
    let mobile = validate_required("customerMobile", mobile)?;
    validate_max_len("customerMobile", mobile, MAX_MOBILE_LEN)?;

    let digits = mobile.strip_prefix('+').unwrap_or(mobile);
    let well_formed = digits
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
        && digits.chars().any(|c| c.is_ascii_digit());

    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "customerMobile".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(())
}

/// Validates an optional address.
pub fn validate_address(field: &str, address: Option<&str>) -> ValidationResult<()> {
    match address {
        Some(address) => validate_max_len(field, address.trim(), MAX_ADDRESS_LEN),
        None => Ok(()),
    }
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();
    validate_max_len("search", query, MAX_QUERY_LEN)?;
    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
///
/// ## Example
/// ```rust
/// use pharmacy_core::validation::validate_quantity;
///
/// assert!(validate_quantity(2).is_ok());
/// assert!(validate_quantity(0).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in paise: `0 ..= MAX_PRICE_PAISE`.
pub fn validate_price_paise(field: &str, paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    if paise > MAX_PRICE_PAISE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE_PAISE,
        });
    }
    Ok(())
}

/// Validates a GST percentage (0 to 100).
pub fn validate_gst_percentage(percent: u32) -> ValidationResult<()> {
    if percent > 100 {
        return Err(ValidationError::OutOfRange {
            field: "gstPercentage".to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(())
}

/// Validates a stock count or stock threshold (must not be negative).
pub fn validate_stock(field: &str, qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a flat discount against the amount it is taken off.
///
/// ## Rules
/// - Must not be negative
/// - Must not exceed subtotal + GST, so the grand total stays ≥ 0
///
/// ## Example
/// ```rust
/// use pharmacy_core::money::Money;
/// use pharmacy_core::validation::validate_discount;
///
/// let gross = Money::from_paise(11_200);
/// assert!(validate_discount(Money::from_paise(1_000), gross).is_ok());
/// assert!(validate_discount(Money::from_paise(11_201), gross).is_err());
/// ```
pub fn validate_discount(discount: Money, gross: Money) -> ValidationResult<()> {
    if discount.is_negative() {
        return Err(ValidationError::Negative {
            field: "discount".to_string(),
        });
    }

    if discount > gross {
        return Err(ValidationError::DiscountTooLarge {
            discount_paise: discount.paise(),
            gross_paise: gross.paise(),
        });
    }

    Ok(())
}

/// Parses a discount given in rupees into paise.
///
/// Rounds to the nearest paisa. Rejects NaN, infinities and negative amounts.
/// The upper bound depends on the invoice and is left to [`validate_discount`].
///
/// ## Example
/// ```rust
/// use pharmacy_core::validation::parse_discount_rupees;
///
/// assert_eq!(parse_discount_rupees(10.0).unwrap().paise(), 1_000);
/// assert!(parse_discount_rupees(-1.0).is_err());
/// ```
pub fn parse_discount_rupees(rupees: f64) -> ValidationResult<Money> {
    let discount = Money::from_rupees_decimal(rupees).ok_or_else(|| {
        ValidationError::InvalidFormat {
            field: "discount".to_string(),
            reason: "not a finite amount".to_string(),
        }
    })?;

    if discount.is_negative() {
        return Err(ValidationError::Negative {
            field: "discount".to_string(),
        });
    }

    Ok(discount)
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the number of lines on an invoice.
///
/// ## Rules
/// - At least one line
/// - At most [`MAX_CART_ITEMS`]
pub fn validate_cart_size(lines: usize) -> ValidationResult<()> {
    if lines == 0 {
        return Err(ValidationError::required("items"));
    }

    if lines > MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates every field of a new medicine.
pub fn validate_new_medicine(medicine: &NewMedicine) -> ValidationResult<()> {
    validate_medicine_name(&medicine.name)?;
    validate_batch_number(&medicine.batch_number)?;
    validate_price_paise("purchasePricePaise", medicine.purchase_price_paise)?;
    validate_price_paise("sellingPricePaise", medicine.selling_price_paise)?;
    validate_gst_percentage(medicine.gst_percentage)?;
    validate_stock("stockQuantity", medicine.stock_quantity)?;
    if let Some(level) = medicine.min_stock_level {
        validate_stock("minStockLevel", level)?;
    }
    Ok(())
}

/// Validates the fields present in a partial medicine update.
pub fn validate_medicine_update(update: &MedicineUpdate) -> ValidationResult<()> {
    if let Some(name) = &update.name {
        validate_medicine_name(name)?;
    }
    if let Some(batch) = &update.batch_number {
        validate_batch_number(batch)?;
    }
    if let Some(price) = update.purchase_price_paise {
        validate_price_paise("purchasePricePaise", price)?;
    }
    if let Some(price) = update.selling_price_paise {
        validate_price_paise("sellingPricePaise", price)?;
    }
    if let Some(gst) = update.gst_percentage {
        validate_gst_percentage(gst)?;
    }
    if let Some(stock) = update.stock_quantity {
        validate_stock("stockQuantity", stock)?;
    }
    if let Some(level) = update.min_stock_level {
        validate_stock("minStockLevel", level)?;
    }
    Ok(())
}

/// Validates a new supplier.
pub fn validate_new_supplier(supplier: &NewSupplier) -> ValidationResult<()> {
    validate_name("name", &supplier.name)?;
    validate_required("contactNumber", &supplier.contact_number)?;
    validate_address("address", Some(&supplier.address))?;
    validate_max_len("gstNumber", supplier.gst_number.trim(), 20)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MedicineCategory;
    use chrono::NaiveDate;

    fn new_medicine() -> NewMedicine {
        NewMedicine {
            name: "Cough Syrup 100ml".to_string(),
            category: MedicineCategory::Syrup,
            batch_number: "S456".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2027, 10, 15).unwrap(),
            purchase_price_paise: 4500,
            selling_price_paise: 8500,
            gst_percentage: 18,
            stock_quantity: 5,
            min_stock_level: None,
            supplier_id: None,
        }
    }

    #[test]
    fn test_validate_required_trims() {
        assert_eq!(validate_required("name", "  Asha  ").unwrap(), "Asha");
        assert_eq!(
            validate_required("name", "").unwrap_err(),
            ValidationError::required("name")
        );
    }

    #[test]
    fn test_validate_mobile_number() {
        assert!(validate_mobile_number("9876543210").is_ok());
        assert!(validate_mobile_number("+919876543210").is_ok());

        assert!(validate_mobile_number("").is_err());
        assert!(validate_mobile_number("+").is_err());
        assert!(validate_mobile_number("98765abc").is_err());
        assert!(validate_mobile_number(&"9".repeat(21)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_gst_percentage() {
        assert!(validate_gst_percentage(0).is_ok());
        assert!(validate_gst_percentage(28).is_ok());
        assert!(validate_gst_percentage(100).is_ok());
        assert!(validate_gst_percentage(101).is_err());
    }

    #[test]
    fn test_validate_discount() {
        let gross = Money::from_paise(11_200);
        assert!(validate_discount(Money::zero(), gross).is_ok());
        assert!(validate_discount(gross, gross).is_ok());
        assert!(matches!(
            validate_discount(Money::from_paise(-1), gross),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            validate_discount(Money::from_paise(11_201), gross),
            Err(ValidationError::DiscountTooLarge { .. })
        ));
    }

    #[test]
    fn test_parse_discount_rupees() {
        assert_eq!(parse_discount_rupees(10.0).unwrap().paise(), 1_000);
        assert_eq!(parse_discount_rupees(12.346).unwrap().paise(), 1_235);
        assert!(parse_discount_rupees(0.0).unwrap().is_zero());
        assert!(matches!(
            parse_discount_rupees(-0.5),
            Err(ValidationError::Negative { .. })
        ));
        assert!(matches!(
            parse_discount_rupees(f64::NAN),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_price_ceiling() {
        assert!(validate_price_paise("sellingPricePaise", 0).is_ok());
        assert!(validate_price_paise("sellingPricePaise", MAX_PRICE_PAISE).is_ok());
        assert_eq!(
            validate_price_paise("sellingPricePaise", 1_000_000_000_000_000).unwrap_err(),
            ValidationError::OutOfRange {
                field: "sellingPricePaise".to_string(),
                min: 0,
                max: MAX_PRICE_PAISE,
            }
        );

        let mut med = new_medicine();
        med.selling_price_paise = MAX_PRICE_PAISE + 1;
        assert!(validate_new_medicine(&med).is_err());

        let update = MedicineUpdate {
            purchase_price_paise: Some(MAX_PRICE_PAISE + 1),
            ..Default::default()
        };
        assert!(validate_medicine_update(&update).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_err());
        assert!(validate_cart_size(1).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS + 1).is_err());
    }

    #[test]
    fn test_validate_new_medicine() {
        assert!(validate_new_medicine(&new_medicine()).is_ok());

        let mut med = new_medicine();
        med.selling_price_paise = -1;
        assert!(validate_new_medicine(&med).is_err());

        let mut med = new_medicine();
        med.stock_quantity = -5;
        assert!(validate_new_medicine(&med).is_err());

        let mut med = new_medicine();
        med.name = "  ".to_string();
        assert!(validate_new_medicine(&med).is_err());
    }

    #[test]
    fn test_validate_medicine_update_checks_present_fields_only() {
        assert!(validate_medicine_update(&MedicineUpdate::default()).is_ok());

        let update = MedicineUpdate {
            gst_percentage: Some(150),
            ..Default::default()
        };
        assert!(validate_medicine_update(&update).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  para ").unwrap(), "para");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }
}
