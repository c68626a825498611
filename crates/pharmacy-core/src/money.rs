//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Paise?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    40.0 * 0.12 = 4.800000000000001  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise (1 rupee = 100 paise)                      │
//! │    4000 paise × 12% = 480 paise exactly                                 │
//! │    Rounding happens once, at the GST step, half-up to a paisa           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pharmacy_core::money::Money;
//!
//! let rate = Money::from_paise(2000);              // ₹20.00
//! let line = rate * 2_i64;                         // ₹40.00
//! let total = line + Money::from_paise(480);       // ₹44.80
//! assert_eq!(total.to_string(), "₹44.80");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::GstRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in paise.
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction of a discount can be expressed directly
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as a bare integer** of paise; see [`rupees`] for fields that travel as decimal rupees
///
/// ## Where Money is Used
/// ```text
/// Medicine.selling_price_paise ──► PricedLine.rate ──► PricedLine.line_total
///                                                          │
///                                    calculate_gst ◄───────┘
///                                          │
///                                          ▼
///               InvoiceTotals { subtotal, gst_total, discount, grand_total }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use pharmacy_core::money::Money;
    ///
    /// let price = Money::from_paise(8500); // ₹85.00
    /// assert_eq!(price.paise(), 8500);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from rupees and paise.
    ///
    /// ## Example
    /// ```rust
    /// use pharmacy_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees_paise(250, 0).paise(), 25_000);
    /// assert_eq!(Money::from_rupees_paise(-5, 50).paise(), -550);
    /// ```
    #[inline]
    pub const fn from_rupees_paise(rupees: i64, paise: i64) -> Self {
        if rupees < 0 {
            Money(rupees * 100 - paise)
        } else {
            Money(rupees * 100 + paise)
        }
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates GST on this amount, rounding half-up to the nearest paisa.
    ///
    /// ## Implementation
    /// Integer math on basis points: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use pharmacy_core::money::Money;
    /// use pharmacy_core::types::GstRate;
    ///
    /// // ₹40.00 at 12% = ₹4.80
    /// let gst = Money::from_paise(4000).calculate_gst(GstRate::from_percent(12));
    /// assert_eq!(gst.paise(), 480);
    ///
    /// // ₹0.85 at 18% = 15.3 paise → 15 paise
    /// let gst = Money::from_paise(85).calculate_gst(GstRate::from_percent(18));
    /// assert_eq!(gst.paise(), 15);
    /// ```
    pub fn calculate_gst(&self, rate: GstRate) -> Money {
        // i128 so large invoice lines cannot overflow the intermediate product
        let gst = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(gst as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use pharmacy_core::money::Money;
    ///
    /// let rate = Money::from_paise(2000);
    /// assert_eq!(rate.multiply_quantity(3).paise(), 6000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Like [`Money::multiply_quantity`], but `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// Converts a decimal rupee amount, rounding to the nearest paisa
    /// (halves away from zero).
    ///
    /// Returns `None` for NaN, infinities and amounts outside `i64` paise.
    ///
    /// ## Example
    /// ```rust
    /// use pharmacy_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees_decimal(10.0), Some(Money::from_paise(1000)));
    /// assert_eq!(Money::from_rupees_decimal(0.125), Some(Money::from_paise(13)));
    /// assert_eq!(Money::from_rupees_decimal(f64::NAN), None);
    /// ```
    pub fn from_rupees_decimal(rupees: f64) -> Option<Self> {
        let paise = (rupees * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range
        if !paise.is_finite() || paise >= i64::MAX as f64 || paise < i64::MIN as f64 {
            return None;
        }
        Some(Money(paise as i64))
    }

    /// Value in rupees as a decimal number, e.g. `102.5` for 10250 paise.
    #[inline]
    pub fn to_rupees_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// Serde adapter for `i64` paise fields that travel as decimal rupees.
///
/// ```rust
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Total {
///     #[serde(with = "pharmacy_core::money::rupees")]
///     amount_paise: i64,
/// }
///
/// let json = serde_json::to_string(&Total { amount_paise: 10200 }).unwrap();
/// assert_eq!(json, r#"{"amount_paise":102.0}"#);
/// let back: Total = serde_json::from_str(r#"{"amount_paise":44.8}"#).unwrap();
/// assert_eq!(back.amount_paise, 4480);
/// ```
pub mod rupees {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Money;

    pub fn serialize<S: Serializer>(paise: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(Money::from_paise(*paise).to_rupees_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let rupees = f64::deserialize(deserializer)?;
        Money::from_rupees_decimal(rupees)
            .map(|m| m.paise())
            .ok_or_else(|| D::Error::custom(format!("invalid rupee amount: {rupees}")))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as rupees, e.g. `₹44.80`.
///
/// ## Note
/// For logs and receipts. Localised formatting belongs to the client.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
