//! Seeding walkthrough against a throwaway SQLite database
//!
//! This demo:
//! - Creates the schema in an in-memory database
//! - Seeds zones, countries and regions
//! - Seeds Belarus, Finland and Lithuania, twice
//! - Shows the English fallback for a city without Lithuanian text
//!
//! Run with `cargo run --example seed_sqlite`.

use cityseed_rs::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use cityseed_core::db::entities::{city, city_translation};

#[tokio::main]
async fn main() -> Result<(), SeedError> {
    println!("=== cityseed: SQLite walkthrough ===\n");

    let conn = db::connect(&DatabaseSettings::in_memory()).await?;
    db::ensure_schema(&conn).await?;

    // Step 1: parents
    let reference = seed_reference(&conn, &ReferenceData::embedded()?).await?;
    println!(
        "Reference: {} zones, {} countries, {} regions\n",
        reference.zones, reference.countries, reference.regions
    );

    // Step 2: cities, run twice to show the upsert
    let dataset = Dataset::embedded()?;
    let selection = ["BY", "FI", "LT"];
    for round in 1..=2 {
        let reports =
            seed_dataset(&conn, dataset, Some(&selection[..]), &SeedOptions::default()).await?;
        println!("--- Round {round} ---");
        for report in &reports {
            println!("{report}");
        }
        let total = city::Entity::find().count(&conn).await?;
        println!("City rows: {total}\n");
    }

    // Step 3: the fallback
    if let Some(row) = city::Entity::find()
        .filter(city::Column::Code.eq("LT-MAZ"))
        .one(&conn)
        .await?
    {
        let texts = city_translation::Entity::find()
            .filter(city_translation::Column::CityId.eq(row.id))
            .all(&conn)
            .await?;
        println!("--- Translations of {} ---", row.name);
        for t in texts {
            println!("{}: {} ({})", t.locale, t.name, t.description);
        }
    }

    Ok(())
}
