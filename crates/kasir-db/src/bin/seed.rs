//! # Seed Data Generator
//!
//! Populates an empty database with a small demo catalog.
//!
//! ## Usage
//! ```bash
//! # Seed ./kasir_dev.db
//! cargo run -p kasir-db --bin seed
//!
//! # Seed a specific database
//! cargo run -p kasir-db --bin seed -- --db ./data/kasir.db
//! ```
//!
//! ## Generated Data
//! - Three categories (Makanan, Minuman, Alat Tulis)
//! - A handful of products per category, with prices in rupiah

use std::env;

use kasir_core::{CategoryInput, ProductInput};
use kasir_db::{Database, DbConfig};

/// Category name, description, and its products as (name, price, stock).
const CATALOG: &[(&str, &str, &[(&str, i64, i64)])] = &[
    (
        "Makanan",
        "Makanan ringan dan instan",
        &[
            ("Indomie Goreng", 3500, 120),
            ("Indomie Soto", 3500, 80),
            ("Chitato 68g", 11000, 40),
            ("Roti Tawar", 15000, 15),
        ],
    ),
    (
        "Minuman",
        "Minuman kemasan",
        &[
            ("Teh Botol Sosro", 4000, 60),
            ("Aqua 600ml", 3500, 100),
            ("Kopi Kapal Api Sachet", 1500, 200),
        ],
    ),
    (
        "Alat Tulis",
        "",
        &[("Pulpen Standard", 2500, 50), ("Buku Tulis 38 Lembar", 4500, 30)],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kasir_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasir POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file or sqlite:// URL (default: ./kasir_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Kasir POS Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products, skipping seed.", existing);
        return Ok(());
    }

    let mut generated = 0;
    for (category_name, description, products) in CATALOG {
        let category = db
            .categories()
            .insert(&CategoryInput {
                name: category_name.to_string(),
                description: description.to_string(),
            })
            .await?;

        for (name, price, stock) in products.iter() {
            db.products()
                .insert(&ProductInput {
                    name: name.to_string(),
                    price: *price,
                    stock: *stock,
                    category_id: Some(category.id),
                })
                .await?;
            generated += 1;
        }

        println!("  {} ({} products)", category.name, products.len());
    }

    println!();
    println!("✓ Seeded {} categories and {} products", CATALOG.len(), generated);

    db.close().await;
    Ok(())
}
