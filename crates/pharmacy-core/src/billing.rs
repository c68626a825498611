//! # Billing
//!
//! Pure pricing rules for an invoice: request parsing, per-line GST and
//! aggregate totals. The storage side of checkout lives in `pharmacy-db`.
//!
//! ## Pricing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CreateInvoiceRequest                                                   │
//! │       │                                                                 │
//! │       ▼  CheckoutInput::from_request   (ValidationError)               │
//! │  CheckoutInput { customer, lines, discount, payment_mode }             │
//! │       │                                                                 │
//! │       ▼  price_line(medicine, qty)      per line, input order          │
//! │  PricedLine { rate, line_total, gst, total, batch, expiry }            │
//! │       │                                                                 │
//! │       ▼  InvoiceTotals::from_lines                                     │
//! │  subtotal = Σ rate × qty                                               │
//! │  gst_total = Σ gst                                                     │
//! │  grand_total = subtotal + gst_total − discount                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, CreateInvoiceRequest, Customer, Medicine, NewCustomer, PaymentMode};
use crate::validation::{
    parse_discount_rupees, validate_address, validate_cart_size, validate_mobile_number,
    validate_name, validate_quantity, ValidationResult,
};
use crate::{ValidationError, MAX_PRICE_PAISE};

// =============================================================================
// Checkout Input
// =============================================================================

/// A checkout request that passed input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutInput {
    /// Customer to create if the mobile number is unknown.
    pub customer: NewCustomer,
    pub lines: Vec<CartLine>,
    /// Non-negative. Its upper bound is checked once totals are known.
    pub discount: Money,
    pub payment_mode: PaymentMode,
}

impl CheckoutInput {
    /// Validates a raw request. Touches no store.
    ///
    /// ## Example
    /// ```rust
    /// use pharmacy_core::billing::CheckoutInput;
    /// use pharmacy_core::types::{CartLine, CreateInvoiceRequest, PaymentMode};
    ///
    /// let req = CreateInvoiceRequest {
    ///     customer_name: " Asha ".to_string(),
    ///     customer_mobile: "9876543210".to_string(),
    ///     customer_address: None,
    ///     items: vec![CartLine { medicine_id: 1, quantity: 2 }],
    ///     discount: Some(10.0),
    ///     payment_mode: Some("upi".to_string()),
    /// };
    /// let input = CheckoutInput::from_request(&req).unwrap();
    /// assert_eq!(input.customer.name, "Asha");
    /// assert_eq!(input.discount.paise(), 1_000);
    /// assert_eq!(input.payment_mode, PaymentMode::Upi);
    /// ```
    pub fn from_request(req: &CreateInvoiceRequest) -> ValidationResult<Self> {
        validate_name("customerName", &req.customer_name)?;
        validate_mobile_number(&req.customer_mobile)?;
        validate_address("customerAddress", req.customer_address.as_deref())?;

        validate_cart_size(req.items.len())?;
        for line in &req.items {
            if line.medicine_id <= 0 {
                return Err(ValidationError::MustBePositive {
                    field: "medicineId".to_string(),
                });
            }
            validate_quantity(line.quantity)?;
        }

        let discount = match req.discount {
            Some(rupees) => parse_discount_rupees(rupees)?,
            None => Money::zero(),
        };

        let payment_mode = PaymentMode::parse_optional(req.payment_mode.as_deref())?;

        let address = req
            .customer_address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        Ok(CheckoutInput {
            customer: NewCustomer {
                name: req.customer_name.trim().to_string(),
                mobile_number: req.customer_mobile.trim().to_string(),
                address,
            },
            lines: req.items.clone(),
            discount,
            payment_mode,
        })
    }
}

// =============================================================================
// Line Pricing
// =============================================================================

/// A cart line priced against the medicine as it was read at checkout.
///
/// Rate, batch and expiry are copied here and never re-read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLine {
    pub medicine_id: i64,
    pub medicine_name: String,
    pub quantity: i64,
    pub rate: Money,
    /// rate × quantity
    pub line_total: Money,
    pub gst: Money,
    /// line_total + gst
    pub total: Money,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
}

/// Prices `quantity` units of `medicine`.
///
/// Fails with [`CoreError::InsufficientStock`] when the shelf holds fewer
/// than `quantity` units, and with a validation error when the line amount
/// does not fit in `i64` paise.
///
/// ## Example
/// ```rust
/// # use chrono::{NaiveDate, Utc};
/// # use pharmacy_core::types::{Medicine, MedicineCategory};
/// use pharmacy_core::billing::price_line;
///
/// # let now = Utc::now();
/// # let medicine = Medicine {
/// #     id: 1, name: "Paracetamol 500mg".into(), category: MedicineCategory::Tablet,
/// #     batch_number: "B123".into(), expiry_date: NaiveDate::from_ymd_opt(2027, 12, 31).unwrap(),
/// #     purchase_price_paise: 1000, selling_price_paise: 2000, gst_percentage: 12,
/// #     stock_quantity: 100, min_stock_level: 20, supplier_id: None,
/// #     created_at: now, updated_at: now,
/// # };
/// let line = price_line(&medicine, 2).unwrap();
/// assert_eq!(line.gst.paise(), 480);
/// assert_eq!(line.total.paise(), 4480);
/// ```
pub fn price_line(medicine: &Medicine, quantity: i64) -> CoreResult<PricedLine> {
    if !medicine.can_sell(quantity) {
        return Err(CoreError::InsufficientStock {
            medicine: medicine.name.clone(),
            available: medicine.stock_quantity.max(0),
            requested: quantity,
        });
    }

    let out_of_range = || ValidationError::OutOfRange {
        field: "sellingPricePaise".to_string(),
        min: 0,
        max: MAX_PRICE_PAISE,
    };

    let rate = medicine.selling_price();
    let line_total = rate
        .checked_multiply_quantity(quantity)
        .ok_or_else(out_of_range)?;
    let gst = line_total.calculate_gst(medicine.gst_rate());
    let total = line_total.checked_add(gst).ok_or_else(out_of_range)?;

    Ok(PricedLine {
        medicine_id: medicine.id,
        medicine_name: medicine.name.clone(),
        quantity,
        rate,
        line_total,
        gst,
        total,
        batch_number: medicine.batch_number.clone(),
        expiry_date: medicine.expiry_date,
    })
}

// =============================================================================
// Totals
// =============================================================================

/// Aggregate amounts of an invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub gst_total: Money,
    pub discount: Money,
    pub grand_total: Money,
}

impl InvoiceTotals {
    /// Sums priced lines and applies the discount.
    ///
    /// The discount must lie in `0 ..= subtotal + gst_total`.
    pub fn from_lines(lines: &[PricedLine], discount: Money) -> ValidationResult<Self> {
        let subtotal = checked_sum("subtotal", lines.iter().map(|l| l.line_total))?;
        let gst_total = checked_sum("gstTotal", lines.iter().map(|l| l.gst))?;
        let gross = checked_sum("grandTotal", [subtotal, gst_total].into_iter())?;

        crate::validation::validate_discount(discount, gross)?;

        Ok(InvoiceTotals {
            subtotal,
            gst_total,
            discount,
            grand_total: gross - discount,
        })
    }
}

fn checked_sum(field: &str, mut amounts: impl Iterator<Item = Money>) -> ValidationResult<Money> {
    amounts
        .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
        .ok_or_else(|| ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        })
}

// =============================================================================
// Customer Resolution
// =============================================================================

/// Outcome of looking a customer up by mobile number.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomerResolution {
    /// Known mobile number; the stored record is reused unchanged.
    Existing(Customer),
    /// Unknown mobile number; inserted together with the invoice.
    New(NewCustomer),
}

impl CustomerResolution {
    /// Returns the stored id, if the customer already exists.
    pub fn existing_id(&self) -> Option<i64> {
        match self {
            CustomerResolution::Existing(c) => Some(c.id),
            CustomerResolution::New(_) => None,
        }
    }

    /// Mobile number of the customer either way.
    pub fn mobile_number(&self) -> &str {
        match self {
            CustomerResolution::Existing(c) => &c.mobile_number,
            CustomerResolution::New(c) => &c.mobile_number,
        }
    }
}

// =============================================================================
// Invoice Draft
// =============================================================================

/// Everything the store needs to commit an invoice in one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub invoice_number: String,
    pub date: DateTime<Utc>,
    pub customer: CustomerResolution,
    /// In request order.
    pub lines: Vec<PricedLine>,
    pub totals: InvoiceTotals,
    pub payment_mode: PaymentMode,
}

// =============================================================================
// Unit Tests
// =============================================================================
