//! # Seed Data Generator
//!
//! Populates the database with demo products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p catalog-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p catalog-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p catalog-db --bin seed -- --db ./data/catalog.db
//! ```
//!
//! ## Generated Data
//! Products are spread across goods groups so sibling expansion has
//! something to chew on, and every third product gets a currently-open
//! on-sale window (every seventh an already-expired one).

use chrono::{Duration, Utc};
use std::env;

use catalog_core::{NewOnSale, NewProduct, UserRef};
use catalog_db::{migrations, Database, DbConfig};

/// Base names for generated products
const BASE_NAMES: &[&str] = &[
    "Widget", "Gadget", "Sprocket", "Gizmo", "Doohickey", "Contraption", "Thingamajig",
    "Whatsit", "Doodad", "Gimmick",
];

/// Variant suffixes within a goods group
const VARIANTS: &[&str] = &["Mini", "Standard", "Plus", "Pro", "Max"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./catalog_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
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
                println!("Product Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./catalog_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Product Catalog Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    // Connect to database
    let db = Database::new(DbConfig::new(&db_path)).await?;

    let (total, applied) = migrations::migration_status(db.pool()).await?;
    println!("✓ Connected to database ({applied}/{total} migrations applied)");

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Generate products
    println!();
    println!("Generating products...");

    let seeder = UserRef::new(1, "seeder");
    let now = Utc::now();
    let mut generated = 0usize;
    let start = std::time::Instant::now();

    'outer: for (group_idx, base) in BASE_NAMES.iter().cycle().enumerate() {
        // One goods group per base-name pass; variants are siblings.
        let goods_id = (group_idx + 1) as i64;

        for variant in VARIANTS {
            if generated >= count {
                break 'outer;
            }

            let product = db
                .products()
                .create(
                    NewProduct {
                        name: format!("{} {}", base, variant),
                        goods_id: Some(goods_id),
                    },
                    &seeder,
                )
                .await?;
            generated += 1;

            // Deterministic price from the running index
            let price_cents = 199 + ((generated * 17) % 800) as i64;

            if generated % 3 == 0 {
                db.on_sales()
                    .create(NewOnSale {
                        product_id: product.id,
                        price_cents,
                        quantity: (generated % 50) as i64 + 1,
                        begin_time: now - Duration::hours(1),
                        end_time: now + Duration::days(7),
                    })
                    .await?;
            }
            if generated % 7 == 0 {
                db.on_sales()
                    .create(NewOnSale {
                        product_id: product.id,
                        price_cents: price_cents + 100,
                        quantity: 5,
                        begin_time: now - Duration::days(14),
                        end_time: now - Duration::days(7),
                    })
                    .await?;
            }

            if generated % 100 == 0 {
                println!("  Generated {} products...", generated);
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    // Verify lookups against the fresh data
    println!();
    println!("Verifying lookups...");

    let sample_name = format!("{} {}", BASE_NAMES[0], VARIANTS[0]);
    let by_name = db.products().find_by_name(&sample_name, false).await?;
    println!("  find_by_name '{}': {} results", sample_name, by_name.len());

    if let Some(first) = by_name.first() {
        let expanded = db.products().find_by_id_with_all(first.id).await?;
        println!(
            "  find_by_id_with_all {}: {} on-sale, {} siblings",
            first.id,
            expanded.on_sale_list.map(|l| l.len()).unwrap_or(0),
            expanded.other_products.map(|l| l.len()).unwrap_or(0),
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
