//! # Seed Data Generator
//!
//! Populates the database with medicines for development.
//!
//! ## Usage
//! ```bash
//! # Demo catalog (1 supplier, 3 medicines)
//! cargo run -p pharmacy-db --bin seed
//!
//! # Bulk medicines on top of the demo catalog
//! cargo run -p pharmacy-db --bin seed -- --count 5000
//!
//! # Specify database path
//! cargo run -p pharmacy-db --bin seed -- --db ./data/pharmacy.db
//! ```

use chrono::Utc;
use pharmacy_db::seed::{generate_medicine, seed_demo};
use pharmacy_db::{Database, DbConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 0;
    let mut db_path = String::from("./pharmacy_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse()?;
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Pharmacy POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Extra generated medicines (default: 0)");
                println!("  -d, --db <PATH>    Database file path (default: ./pharmacy_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Ignoring unknown argument: {other}");
            }
        }
        i += 1;
    }

    println!("Pharmacy POS Seed Data Generator");
    println!("================================");
    println!("Database:  {db_path}");
    println!("Generated: {count}");
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, migrations applied");

    let summary = seed_demo(&db).await?;
    if summary.medicines == 0 {
        println!("⚠ Catalog already populated, demo data skipped");
    } else {
        println!(
            "✓ Demo data: {} supplier, {} medicines",
            summary.suppliers, summary.medicines
        );
    }

    if count > 0 {
        println!();
        println!("Generating medicines...");

        let today = Utc::now().date_naive();
        let start = std::time::Instant::now();
        let mut generated = 0;

        for seed in 0..count {
            let medicine = generate_medicine(seed, today);
            if let Err(e) = db.medicines().create(&medicine).await {
                eprintln!("Failed to insert {}: {}", medicine.name, e);
                continue;
            }

            generated += 1;
            if generated % 500 == 0 {
                println!("  Generated {generated} medicines...");
            }
        }

        let elapsed = start.elapsed();
        println!("✓ Generated {generated} medicines in {elapsed:?}");
    }

    let stats = db.stats().dashboard().await?;
    println!();
    println!("Catalog:        {} medicines", stats.total_medicines);
    println!("Low stock:      {}", stats.low_stock_items);
    println!("Expiring soon:  {}", stats.expiring_soon_items);
    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
