//! # Demo Data
//!
//! A small demo catalog for first runs, plus a generator for bulk test
//! medicines used by the `seed` binary.
//!
//! Expiry dates are relative to the day of seeding so the dashboard always
//! shows one low-stock item and one item expiring soon.

use chrono::{Duration, NaiveDate, Utc};
use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;
use pharmacy_core::{MedicineCategory, NewMedicine, NewSupplier};

/// Rows inserted by [`seed_demo`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub suppliers: usize,
    pub medicines: usize,
}

/// The demo supplier.
pub fn demo_supplier() -> NewSupplier {
    NewSupplier {
        name: "MediPharma Distributors".to_string(),
        contact_number: "9876543210".to_string(),
        address: "123 Pharma Street, Mumbai".to_string(),
        gst_number: "27AAAAA0000A1Z5".to_string(),
    }
}

/// The three demo medicines, linked to `supplier_id`.
pub fn demo_medicines(supplier_id: i64, today: NaiveDate) -> Vec<NewMedicine> {
    vec![
        NewMedicine {
            name: "Paracetamol 500mg".to_string(),
            category: MedicineCategory::Tablet,
            batch_number: "B123".to_string(),
            expiry_date: today + Duration::days(400),
            purchase_price_paise: 1_000,
            selling_price_paise: 2_000,
            gst_percentage: 12,
            stock_quantity: 100,
            min_stock_level: Some(20),
            supplier_id: Some(supplier_id),
        },
        NewMedicine {
            name: "Cough Syrup 100ml".to_string(),
            category: MedicineCategory::Syrup,
            batch_number: "S456".to_string(),
            expiry_date: today + Duration::days(150),
            purchase_price_paise: 4_500,
            selling_price_paise: 8_500,
            gst_percentage: 18,
            stock_quantity: 5,
            min_stock_level: Some(10),
            supplier_id: Some(supplier_id),
        },
        NewMedicine {
            name: "Vitamin C".to_string(),
            category: MedicineCategory::Tablet,
            batch_number: "V789".to_string(),
            expiry_date: today + Duration::days(20),
            purchase_price_paise: 15_000,
            selling_price_paise: 25_000,
            gst_percentage: 12,
            stock_quantity: 50,
            min_stock_level: Some(10),
            supplier_id: Some(supplier_id),
        },
    ]
}

/// Inserts the demo supplier and medicines into an empty catalog.
///
/// Does nothing when any medicine already exists.
pub async fn seed_demo(db: &Database) -> DbResult<SeedSummary> {
    let existing = db.medicines().count().await?;
    if existing > 0 {
        info!(existing, "Catalog not empty, skipping demo seed");
        return Ok(SeedSummary::default());
    }

    let supplier = db.suppliers().create(&demo_supplier()).await?;

    let medicines = demo_medicines(supplier.id, Utc::now().date_naive());
    for medicine in &medicines {
        db.medicines().create(medicine).await?;
    }

    let summary = SeedSummary {
        suppliers: 1,
        medicines: medicines.len(),
    };
    info!(?summary, "Demo data seeded");
    Ok(summary)
}

const GENERATED_NAMES: &[&str] = &[
    "Amoxicillin",
    "Azithromycin",
    "Cetirizine",
    "Ibuprofen",
    "Metformin",
    "Omeprazole",
    "Pantoprazole",
    "Diclofenac",
    "Levocetirizine",
    "Montelukast",
    "Atorvastatin",
    "Amlodipine",
    "Losartan",
    "Ondansetron",
    "Ranitidine",
    "Dolo",
];

const STRENGTHS: &[&str] = &["50mg", "100mg", "250mg", "500mg", "650mg"];

const GST_RATES: &[u32] = &[5, 12, 18];

/// Deterministic test medicine number `seed`.
///
/// ## Data
/// - Price ₹5.00 - ₹204.99, purchase price 60-79% of it
/// - Stock 0 - 200, minimum level 10
/// - Expiry 0 - 719 days from `today`
pub fn generate_medicine(seed: usize, today: NaiveDate) -> NewMedicine {
    let name = GENERATED_NAMES[seed % GENERATED_NAMES.len()];
    let strength = STRENGTHS[(seed / GENERATED_NAMES.len()) % STRENGTHS.len()];
    let category = MedicineCategory::ALL[seed % MedicineCategory::ALL.len()];

    let selling_price_paise = 500 + ((seed * 37) % 20_000) as i64;
    let purchase_price_paise = selling_price_paise * (60 + (seed % 20) as i64) / 100;

    NewMedicine {
        name: format!("{name} {strength}"),
        category,
        batch_number: format!("G{seed:06}"),
        expiry_date: today + Duration::days((seed * 13 % 720) as i64),
        purchase_price_paise,
        selling_price_paise,
        gst_percentage: GST_RATES[seed % GST_RATES.len()],
        stock_quantity: (seed % 201) as i64,
        min_stock_level: Some(10),
        supplier_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;
    use pharmacy_core::validation::validate_new_medicine;

    #[tokio::test]
    async fn test_seed_demo_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let first = seed_demo(&db).await.unwrap();
        assert_eq!(first, SeedSummary { suppliers: 1, medicines: 3 });

        let second = seed_demo(&db).await.unwrap();
        assert_eq!(second, SeedSummary::default());

        let stats = db.stats().dashboard().await.unwrap();
        assert_eq!(stats.total_medicines, 3);
        assert_eq!(stats.low_stock_items, 1);
        assert_eq!(stats.expiring_soon_items, 1);
    }

    #[test]
    fn test_generated_medicines_are_valid() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        for seed in 0..500 {
            let medicine = generate_medicine(seed, today);
            assert!(validate_new_medicine(&medicine).is_ok(), "seed {seed}");
        }
    }
}
