// crates/cityseed-core/src/seed/reference.rs
use crate::db::entities::{country, region, zone};
use crate::error::SeedError;
use crate::model::ReferenceData;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ConnectionTrait, EntityTrait,
};
use std::collections::HashMap;
use tracing::info;

/// Row counts written by [`seed_reference`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceReport {
    pub zones: usize,
    pub countries: usize,
    pub regions: usize,
}

/// Upserts zones (by `code`), countries (by `cca2`) and regions (by `code`).
///
/// Regions resolve their country through `cca2`, so countries are written
/// first. Safe to rerun.
///
/// # Errors
///
/// * `SeedError::MissingCountry` if a region names a country that is
///   neither in `reference` nor already in the database.
/// * `SeedError::Db` on any persistence failure.
pub async fn seed_reference<C: ConnectionTrait>(
    db: &C,
    reference: &ReferenceData,
) -> Result<ReferenceReport, SeedError> {
    let mut report = ReferenceReport::default();

    for z in &reference.zones {
        let row = zone::ActiveModel {
            id: NotSet,
            code: Set(z.code.clone()),
            name: Set(z.name.clone()),
        };
        zone::Entity::insert(row)
            .on_conflict(
                OnConflict::column(zone::Column::Code)
                    .update_column(zone::Column::Name)
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        report.zones += 1;
    }

    for c in &reference.countries {
        let row = country::ActiveModel {
            id: NotSet,
            cca2: Set(c.cca2.clone()),
            name: Set(c.name.clone()),
        };
        country::Entity::insert(row)
            .on_conflict(
                OnConflict::column(country::Column::Cca2)
                    .update_column(country::Column::Name)
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        report.countries += 1;
    }

    if !reference.regions.is_empty() {
        let country_ids: HashMap<String, i32> = country::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.cca2, c.id))
            .collect();

        for r in &reference.regions {
            let country_id = *country_ids
                .get(&r.country)
                .ok_or_else(|| SeedError::MissingCountry(r.country.clone()))?;
            let row = region::ActiveModel {
                id: NotSet,
                country_id: Set(country_id),
                code: Set(r.code.clone()),
                name: Set(r.name.clone()),
            };
            region::Entity::insert(row)
                .on_conflict(
                    OnConflict::column(region::Column::Code)
                        .update_columns([region::Column::CountryId, region::Column::Name])
                        .to_owned(),
                )
                .exec_without_returning(db)
                .await?;
            report.regions += 1;
        }
    }

    info!(
        zones = report.zones,
        countries = report.countries,
        regions = report.regions,
        "reference data seeded"
    );
    Ok(report)
}
