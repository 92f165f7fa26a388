// crates/cityseed-core/src/db/mod.rs

//! Database plumbing: connection pool and the create-if-missing schema.

pub mod entities;

use crate::settings::DatabaseSettings;
use entities::{city, city_translation, country, region, zone};
use sea_orm::sea_query::Index;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use std::time::Duration;
use tracing::debug;

/// Name of the unique index backing the translation upsert.
pub const TRANSLATION_UNIQUE_INDEX: &str = "idx_city_translations_city_locale";

/// Opens a connection pool from settings.
///
/// # Errors
///
/// Returns the driver error if the URL is malformed or the database is
/// unreachable.
pub async fn connect(settings: &DatabaseSettings) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(settings.url.to_owned());

    if let Some(max) = settings.max_connections {
        opt.max_connections(max);
    }

    if let Some(min) = settings.min_connections {
        opt.min_connections(min);
    }

    if let Some(timeout) = settings.connect_timeout {
        opt.connect_timeout(Duration::from_secs(timeout));
        opt.acquire_timeout(Duration::from_secs(timeout));
    }

    opt.sqlx_logging(settings.sqlx_logging);

    debug!(url = %settings.url, "connecting to database");
    Database::connect(opt).await
}

/// Creates the five tables and the `(city_id, locale)` unique index if they
/// do not exist yet. Existing tables are left untouched.
pub async fn ensure_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    // parents before children, so foreign keys resolve
    let tables = [
        schema.create_table_from_entity(country::Entity),
        schema.create_table_from_entity(zone::Entity),
        schema.create_table_from_entity(region::Entity),
        schema.create_table_from_entity(city::Entity),
        schema.create_table_from_entity(city_translation::Entity),
    ];
    for mut table in tables {
        table.if_not_exists();
        db.execute(backend.build(&table)).await?;
    }

    let index = Index::create()
        .if_not_exists()
        .name(TRANSLATION_UNIQUE_INDEX)
        .table(city_translation::Entity)
        .col(city_translation::Column::CityId)
        .col(city_translation::Column::Locale)
        .unique()
        .to_owned();
    db.execute(backend.build(&index)).await?;

    debug!("schema ready");
    Ok(())
}
