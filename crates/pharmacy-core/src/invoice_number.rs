//! # Invoice Numbers
//!
//! Invoice numbers are produced by an injected generator so tests can pin
//! them while production uses a random, collision-resistant form.
//!
//! ```text
//! UuidInvoiceNumbers        INV-20261019-3f2a9c0b7e41
//! SequentialInvoiceNumbers  INV-20261019-000001
//! ```
//!
//! Uniqueness is also enforced by a UNIQUE index on `invoices.invoice_number`.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Default prefix of generated invoice numbers.
pub const DEFAULT_PREFIX: &str = "INV";

/// Produces the human-facing invoice number for a new invoice.
pub trait InvoiceNumberGenerator: Send + Sync {
    /// Returns a fresh number for an invoice created at `at`.
    fn next_number(&self, at: DateTime<Utc>) -> String;
}

/// `PREFIX-YYYYMMDD-<12 hex>` from a v4 UUID.
#[derive(Debug, Clone)]
pub struct UuidInvoiceNumbers {
    prefix: String,
}

impl UuidInvoiceNumbers {
    pub fn new(prefix: impl Into<String>) -> Self {
        UuidInvoiceNumbers {
            prefix: prefix.into(),
        }
    }
}

impl Default for UuidInvoiceNumbers {
    fn default() -> Self {
        UuidInvoiceNumbers::new(DEFAULT_PREFIX)
    }
}

impl InvoiceNumberGenerator for UuidInvoiceNumbers {
    fn next_number(&self, at: DateTime<Utc>) -> String {
        let random = Uuid::new_v4().simple().to_string();
        format!("{}-{}-{}", self.prefix, at.format("%Y%m%d"), &random[..12])
    }
}

/// `PREFIX-YYYYMMDD-NNNNNN` from an in-process counter.
///
/// The counter is not persisted; restart with [`SequentialInvoiceNumbers::starting_at`].
#[derive(Debug)]
pub struct SequentialInvoiceNumbers {
    prefix: String,
    next: AtomicU64,
}

impl SequentialInvoiceNumbers {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    pub fn starting_at(prefix: impl Into<String>, first: u64) -> Self {
        SequentialInvoiceNumbers {
            prefix: prefix.into(),
            next: AtomicU64::new(first),
        }
    }
}

impl InvoiceNumberGenerator for SequentialInvoiceNumbers {
    fn next_number(&self, at: DateTime<Utc>) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}-{:06}", self.prefix, at.format("%Y%m%d"), n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_uuid_numbers_format() {
        let number = UuidInvoiceNumbers::default().next_number(at());
        assert!(number.starts_with("INV-20261019-"));
        let suffix = &number["INV-20261019-".len()..];
        assert_eq!(suffix.len(), 12);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_uuid_numbers_are_distinct() {
        let generator = UuidInvoiceNumbers::new("PH");
        let numbers: HashSet<String> = (0..1000).map(|_| generator.next_number(at())).collect();
        assert_eq!(numbers.len(), 1000);
    }

    #[test]
    fn test_sequential_numbers() {
        let generator = SequentialInvoiceNumbers::new("INV");
        assert_eq!(generator.next_number(at()), "INV-20261019-000001");
        assert_eq!(generator.next_number(at()), "INV-20261019-000002");

        let resumed = SequentialInvoiceNumbers::starting_at("INV", 42);
        assert_eq!(resumed.next_number(at()), "INV-20261019-000042");
    }
}
