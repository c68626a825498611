//! # Domain Types
//!
//! Core domain types used throughout the pharmacy POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Medicine     │   │     Invoice     │   │   InvoiceItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  invoice_id(FK) │       │
//! │  │  batch_number   │   │  invoice_number │   │  rate (frozen)  │       │
//! │  │  expiry_date    │   │  customer_id    │   │  batch (frozen) │       │
//! │  │  selling_price  │   │  grand_total    │   │  expiry(frozen) │       │
//! │  │  stock_quantity │   │  payment_mode   │   │  gst, total     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Supplier     │   │    Customer     │   │   PaymentMode   │       │
//! │  │  gst_number     │   │  mobile (UNIQUE)│   │  Cash/UPI/Card  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Money Fields
//! Every monetary field is an `i64` count of paise with a `_paise` suffix.
//! Accessor methods wrap them in [`Money`] for arithmetic.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// GST Rate
// =============================================================================

/// GST rate held in basis points (1200 = 12%).
///
/// Medicines carry whole-number percentages; basis points keep the rounding
/// arithmetic in [`Money::calculate_gst`] integer-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GstRate(u32);

impl GstRate {
    /// Creates a rate from a whole percentage (12 → 12%).
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        GstRate(percent * 100)
    }

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        GstRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate (exempt items).
    #[inline]
    pub const fn zero() -> Self {
        GstRate(0)
    }
}

impl Default for GstRate {
    fn default() -> Self {
        GstRate::zero()
    }
}

// =============================================================================
// Medicine Category
// =============================================================================

/// Dosage form of a medicine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum MedicineCategory {
    Tablet,
    Syrup,
    Injection,
    Capsule,
    Cream,
    Drops,
    Powder,
}

impl MedicineCategory {
    /// Every category, in display order.
    pub const ALL: [MedicineCategory; 7] = [
        MedicineCategory::Tablet,
        MedicineCategory::Syrup,
        MedicineCategory::Injection,
        MedicineCategory::Capsule,
        MedicineCategory::Cream,
        MedicineCategory::Drops,
        MedicineCategory::Powder,
    ];

    /// Returns the canonical label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MedicineCategory::Tablet => "Tablet",
            MedicineCategory::Syrup => "Syrup",
            MedicineCategory::Injection => "Injection",
            MedicineCategory::Capsule => "Capsule",
            MedicineCategory::Cream => "Cream",
            MedicineCategory::Drops => "Drops",
            MedicineCategory::Powder => "Powder",
        }
    }
}

impl fmt::Display for MedicineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MedicineCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        MedicineCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: MedicineCategory::ALL
                    .iter()
                    .map(|c| c.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Payment Mode
// =============================================================================

/// How the customer paid for an invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum PaymentMode {
    #[default]
    Cash,
    #[serde(rename = "UPI")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "UPI"))]
    Upi,
    Card,
}

impl PaymentMode {
    /// Returns the canonical label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Upi => "UPI",
            PaymentMode::Card => "Card",
        }
    }

    /// Parses an optional request value; absent or blank means Cash.
    ///
    /// ## Example
    /// ```rust
    /// use pharmacy_core::PaymentMode;
    ///
    /// assert_eq!(PaymentMode::parse_optional(None).unwrap(), PaymentMode::Cash);
    /// assert_eq!(PaymentMode::parse_optional(Some("upi")).unwrap(), PaymentMode::Upi);
    /// assert!(PaymentMode::parse_optional(Some("Cheque")).is_err());
    /// ```
    pub fn parse_optional(value: Option<&str>) -> Result<Self, ValidationError> {
        match value.map(str::trim) {
            None | Some("") => Ok(PaymentMode::Cash),
            Some(s) => s.parse(),
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMode::Cash),
            "upi" => Ok(PaymentMode::Upi),
            "card" => Ok(PaymentMode::Card),
            _ => Err(ValidationError::NotAllowed {
                field: "paymentMode".to_string(),
                allowed: vec!["Cash".to_string(), "UPI".to_string(), "Card".to_string()],
            }),
        }
    }
}

// =============================================================================
// Medicine
// =============================================================================

/// A medicine batch held in stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Medicine {
    pub id: i64,
    pub name: String,
    pub category: MedicineCategory,
    pub batch_number: String,
    #[ts(as = "String")]
    pub expiry_date: NaiveDate,
    pub purchase_price_paise: i64,
    pub selling_price_paise: i64,
    /// Whole-number GST percentage (12 = 12%).
    pub gst_percentage: u32,
    pub stock_quantity: i64,
    /// Stock at or below this level is flagged as low.
    pub min_stock_level: i64,
    /// Weak reference, the supplier may no longer exist.
    pub supplier_id: Option<i64>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Medicine {
    /// Returns the current selling price as Money.
    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_paise(self.selling_price_paise)
    }

    /// Returns the purchase price as Money.
    #[inline]
    pub fn purchase_price(&self) -> Money {
        Money::from_paise(self.purchase_price_paise)
    }

    /// Returns the GST rate.
    #[inline]
    pub fn gst_rate(&self) -> GstRate {
        GstRate::from_percent(self.gst_percentage)
    }

    /// Checks whether `quantity` units can be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock_quantity >= quantity
    }

    /// `stock_quantity ≤ min_stock_level`.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock_level
    }

    /// True when the batch expires on or before `today + days`.
    ///
    /// Already-expired batches count as expiring.
    pub fn expires_within(&self, today: NaiveDate, days: i64) -> bool {
        self.expiry_date <= today + Duration::days(days)
    }
}

/// Fields required to add a medicine to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewMedicine {
    pub name: String,
    pub category: MedicineCategory,
    pub batch_number: String,
    #[ts(as = "String")]
    pub expiry_date: NaiveDate,
    pub purchase_price_paise: i64,
    pub selling_price_paise: i64,
    pub gst_percentage: u32,
    pub stock_quantity: i64,
    /// Defaults to [`crate::DEFAULT_MIN_STOCK_LEVEL`].
    #[serde(default)]
    pub min_stock_level: Option<i64>,
    #[serde(default)]
    pub supplier_id: Option<i64>,
}

/// Partial update of a medicine. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct MedicineUpdate {
    pub name: Option<String>,
    pub category: Option<MedicineCategory>,
    pub batch_number: Option<String>,
    #[ts(as = "Option<String>")]
    pub expiry_date: Option<NaiveDate>,
    pub purchase_price_paise: Option<i64>,
    pub selling_price_paise: Option<i64>,
    pub gst_percentage: Option<u32>,
    pub stock_quantity: Option<i64>,
    pub min_stock_level: Option<i64>,
    pub supplier_id: Option<i64>,
}

impl MedicineUpdate {
    /// Applies the present fields onto `medicine`.
    pub fn apply_to(&self, medicine: &mut Medicine) {
        if let Some(name) = &self.name {
            medicine.name = name.trim().to_string();
        }
        if let Some(category) = self.category {
            medicine.category = category;
        }
        if let Some(batch) = &self.batch_number {
            medicine.batch_number = batch.trim().to_string();
        }
        if let Some(expiry) = self.expiry_date {
            medicine.expiry_date = expiry;
        }
        if let Some(price) = self.purchase_price_paise {
            medicine.purchase_price_paise = price;
        }
        if let Some(price) = self.selling_price_paise {
            medicine.selling_price_paise = price;
        }
        if let Some(gst) = self.gst_percentage {
            medicine.gst_percentage = gst;
        }
        if let Some(stock) = self.stock_quantity {
            medicine.stock_quantity = stock;
        }
        if let Some(level) = self.min_stock_level {
            medicine.min_stock_level = level;
        }
        if let Some(supplier_id) = self.supplier_id {
            medicine.supplier_id = Some(supplier_id);
        }
    }
}

/// Catalog listing filter. All present conditions must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineFilter {
    /// Case-insensitive substring of the medicine name.
    pub search: Option<String>,
    /// Only medicines at or below their minimum stock level.
    pub low_stock: bool,
    /// Only medicines expiring within this many days.
    pub expiring_within_days: Option<i64>,
}

impl MedicineFilter {
    /// Returns true when no condition is set.
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().map_or(true, |s| s.trim().is_empty())
            && !self.low_stock
            && self.expiring_within_days.is_none()
    }
}

// =============================================================================
// Supplier
// =============================================================================

/// A distributor the pharmacy buys from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_number: String,
    pub address: String,
    pub gst_number: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Fields required to register a supplier.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewSupplier {
    pub name: String,
    pub contact_number: String,
    pub address: String,
    pub gst_number: String,
}

// =============================================================================
// Customer
// =============================================================================

/// A billed customer, identified by mobile number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    /// Unique natural key used for find-or-create at checkout.
    pub mobile_number: String,
    pub address: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Fields for a customer created at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewCustomer {
    pub name: String,
    pub mobile_number: String,
    pub address: Option<String>,
}

// =============================================================================
// Invoice
// =============================================================================

/// A persisted sales invoice. Write-once.
///
/// Amounts are stored in paise and travel as decimal rupees
/// (`subtotal`, `discount`, `gstTotal`, `grandTotal`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    pub customer_id: Option<i64>,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    #[serde(rename = "subtotal", with = "crate::money::rupees")]
    #[ts(type = "number")]
    pub subtotal_paise: i64,
    #[serde(rename = "discount", with = "crate::money::rupees")]
    #[ts(type = "number")]
    pub discount_paise: i64,
    #[serde(rename = "gstTotal", with = "crate::money::rupees")]
    #[ts(type = "number")]
    pub gst_total_paise: i64,
    #[serde(rename = "grandTotal", with = "crate::money::rupees")]
    #[ts(type = "number")]
    pub grand_total_paise: i64,
    pub payment_mode: PaymentMode,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_paise(self.subtotal_paise)
    }

    #[inline]
    pub fn gst_total(&self) -> Money {
        Money::from_paise(self.gst_total_paise)
    }

    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_paise(self.discount_paise)
    }

    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_paise(self.grand_total_paise)
    }
}

/// A line of an invoice.
/// Uses snapshot pattern to freeze medicine data at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceItem {
    pub id: i64,
    pub invoice_id: i64,
    pub medicine_id: i64,
    pub quantity: i64,
    /// Selling price at time of sale (frozen).
    pub rate_paise: i64,
    pub gst_amount_paise: i64,
    /// rate × quantity + GST.
    pub total_amount_paise: i64,
    /// Batch at time of sale (frozen).
    pub batch_number: String,
    /// Expiry at time of sale (frozen).
    #[ts(as = "String")]
    pub expiry_date: NaiveDate,
}

impl InvoiceItem {
    #[inline]
    pub fn rate(&self) -> Money {
        Money::from_paise(self.rate_paise)
    }

    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_paise(self.total_amount_paise)
    }
}

/// An invoice item joined with the medicine's current name and category.
///
/// Both are `None` when the medicine has since been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub item: InvoiceItem,
    pub medicine_name: Option<String>,
    pub medicine_category: Option<MedicineCategory>,
}

/// Invoice detail view: the invoice, its customer and its lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetails {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub customer: Option<Customer>,
    pub items: Vec<InvoiceLine>,
}

// =============================================================================
// Checkout Request
// =============================================================================

/// One cart line as submitted by the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub medicine_id: i64,
    pub quantity: i64,
}

/// Request to issue an invoice.
///
/// Unknown fields are rejected so a misspelt field cannot be silently ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[ts(export)]
pub struct CreateInvoiceRequest {
    pub customer_name: String,
    pub customer_mobile: String,
    #[serde(default)]
    pub customer_address: Option<String>,
    pub items: Vec<CartLine>,
    /// Flat discount in rupees, rounded to the paisa. Defaults to zero.
    #[serde(default)]
    pub discount: Option<f64>,
    /// "Cash" | "UPI" | "Card", defaults to Cash.
    #[serde(default)]
    pub payment_mode: Option<String>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardStats {
    pub total_medicines: i64,
    pub low_stock_items: i64,
    pub expiring_soon_items: i64,
    pub todays_sales_paise: i64,
    pub total_customers: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn paracetamol() -> Medicine {
        let now = Utc::now();
        Medicine {
            id: 1,
            name: "Paracetamol 500mg".to_string(),
            category: MedicineCategory::Tablet,
            batch_number: "B123".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2026, 11, 10).unwrap(),
            purchase_price_paise: 1000,
            selling_price_paise: 2000,
            gst_percentage: 12,
            stock_quantity: 20,
            min_stock_level: 20,
            supplier_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_gst_rate_from_percent() {
        let rate = GstRate::from_percent(18);
        assert_eq!(rate.bps(), 1800);
        assert!((rate.percentage() - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_payment_mode_parsing() {
        assert_eq!(PaymentMode::parse_optional(None).unwrap(), PaymentMode::Cash);
        assert_eq!(PaymentMode::parse_optional(Some("  ")).unwrap(), PaymentMode::Cash);
        assert_eq!("UPI".parse::<PaymentMode>().unwrap(), PaymentMode::Upi);
        assert_eq!("card".parse::<PaymentMode>().unwrap(), PaymentMode::Card);
        assert!("cheque".parse::<PaymentMode>().is_err());
    }

    #[test]
    fn test_payment_mode_serde_labels() {
        assert_eq!(serde_json::to_string(&PaymentMode::Upi).unwrap(), "\"UPI\"");
        assert_eq!(serde_json::to_string(&PaymentMode::Cash).unwrap(), "\"Cash\"");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("syrup".parse::<MedicineCategory>().unwrap(), MedicineCategory::Syrup);
        assert!("Lozenge".parse::<MedicineCategory>().is_err());
    }

    #[test]
    fn test_low_stock_is_inclusive() {
        let mut med = paracetamol();
        assert!(med.is_low_stock());
        med.stock_quantity = 21;
        assert!(!med.is_low_stock());
    }

    #[test]
    fn test_expires_within() {
        let med = paracetamol();
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert!(med.expires_within(today, 30));
        assert!(!med.expires_within(today, 7));
    }

    #[test]
    fn test_medicine_update_keeps_missing_fields() {
        let mut med = paracetamol();
        let update = MedicineUpdate {
            selling_price_paise: Some(2200),
            stock_quantity: Some(150),
            ..Default::default()
        };
        update.apply_to(&mut med);

        assert_eq!(med.selling_price_paise, 2200);
        assert_eq!(med.stock_quantity, 150);
        assert_eq!(med.name, "Paracetamol 500mg");
        assert_eq!(med.gst_percentage, 12);
    }

    #[test]
    fn test_filter_is_empty() {
        assert!(MedicineFilter::default().is_empty());
        let filter = MedicineFilter {
            search: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(filter.is_empty());
        let filter = MedicineFilter {
            low_stock: true,
            ..Default::default()
        };
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let json = r#"{
            "customerName": "Asha",
            "customerMobile": "9876543210",
            "items": [{ "medicineId": 1, "quantity": 2 }]
        }"#;
        let req: CreateInvoiceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.items[0].medicine_id, 1);
        assert!(req.discount.is_none());
        assert!(req.payment_mode.is_none());
    }

    #[test]
    fn test_request_rejects_unknown_fields() {
        let json = r#"{
            "customerName": "Asha",
            "customerMobile": "9876543210",
            "items": [{ "medicineId": 1, "quantity": 2 }],
            "discountPaise": 1000
        }"#;
        let err = serde_json::from_str::<CreateInvoiceRequest>(json).unwrap_err();
        assert!(err.to_string().contains("discountPaise"));
    }

    #[test]
    fn test_invoice_amounts_serialize_as_rupees() {
        let now = Utc::now();
        let invoice = Invoice {
            id: 1,
            invoice_number: "INV-20261019-000001".to_string(),
            customer_id: Some(1),
            date: now,
            subtotal_paise: 10_000,
            discount_paise: 1_000,
            gst_total_paise: 1_200,
            grand_total_paise: 10_200,
            payment_mode: PaymentMode::Cash,
            created_at: now,
        };

        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["subtotal"], 100.0);
        assert_eq!(json["gstTotal"], 12.0);
        assert_eq!(json["discount"], 10.0);
        assert_eq!(json["grandTotal"], 102.0);
        assert!(json.get("grandTotalPaise").is_none());

        let back: Invoice = serde_json::from_value(json).unwrap();
        assert_eq!(back, invoice);
    }
}
