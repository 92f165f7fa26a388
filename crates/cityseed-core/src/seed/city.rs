// crates/cityseed-core/src/seed/city.rs
use super::{SeedOptions, SeedReport};
use crate::common::{CITY_LEVEL, CITY_SORT_ORDER};
use crate::db::entities::{city, city_translation, country, region, zone};
use crate::error::SeedError;
use crate::model::{CitySeed, CountryDataset};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, TransactionTrait,
};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Seeds one country's cities and their translations.
///
/// If the country row is missing nothing is written: the call logs a
/// warning and returns a skipped report, or fails in strict mode. Invalid
/// configured locales fail before any lookup.
pub async fn seed_country<C>(
    db: &C,
    data: &CountryDataset,
    opts: &SeedOptions,
) -> Result<SeedReport, SeedError>
where
    C: ConnectionTrait + TransactionTrait,
{
    opts.check_locales()?;
    let iso2 = data.iso2();

    let Some(country) = country::Entity::find()
        .filter(country::Column::Cca2.eq(iso2))
        .one(db)
        .await?
    else {
        if opts.strict {
            return Err(SeedError::MissingCountry(iso2.to_string()));
        }
        warn!(
            country = iso2,
            "country not found; seed reference data first. Skipping"
        );
        return Ok(SeedReport::skipped(iso2));
    };

    let report = if opts.atomic {
        // dropped without commit on error, which rolls back
        let txn = db.begin().await?;
        let report = write_cities(&txn, country.id, data, opts).await?;
        txn.commit().await?;
        report
    } else {
        write_cities(db, country.id, data, opts).await?
    };

    info!(
        country = iso2,
        cities = report.cities,
        translations = report.translations,
        "cities seeded"
    );
    Ok(report)
}

async fn write_cities<C: ConnectionTrait>(
    db: &C,
    country_id: i32,
    data: &CountryDataset,
    opts: &SeedOptions,
) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::new(data.iso2());
    let mut parents = ParentCache::new(country_id);

    for seed in data.cities() {
        let region_id = match seed.region.as_deref() {
            Some(code) => parents.region(db, code, &mut report).await?,
            None => None,
        };
        let zone_id = match seed.zone.as_deref() {
            Some(code) => parents.zone(db, code, &mut report).await?,
            None => None,
        };

        let city_id = upsert_city(db, seed, country_id, region_id, zone_id).await?;
        report.cities += 1;

        for locale in seed.locales(&opts.locales) {
            upsert_translation(db, city_id, seed, locale).await?;
            report.translations += 1;
        }
        debug!(code = %seed.code, city_id, "city written");
    }

    Ok(report)
}

// ---- CITY ----

/// Inserts the city or overwrites every mutable column of the row with the
/// same `code`, then returns its id.
async fn upsert_city<C: ConnectionTrait>(
    db: &C,
    seed: &CitySeed,
    country_id: i32,
    region_id: Option<i32>,
    zone_id: Option<i32>,
) -> Result<i32, SeedError> {
    let row = city::ActiveModel {
        id: NotSet,
        code: Set(seed.code.clone()),
        name: Set(seed.name.clone()),
        slug: Set(seed.slug.clone()),
        is_enabled: Set(true),
        is_default: Set(seed.is_default),
        is_capital: Set(seed.is_capital),
        latitude: Set(seed.latitude),
        longitude: Set(seed.longitude),
        population: Set(seed.population),
        postal_codes: Set(serde_json::json!(seed.postal_codes)),
        level: Set(CITY_LEVEL),
        sort_order: Set(CITY_SORT_ORDER),
        country_id: Set(country_id),
        region_id: Set(region_id),
        zone_id: Set(zone_id),
    };

    city::Entity::insert(row)
        .on_conflict(
            OnConflict::column(city::Column::Code)
                .update_columns([
                    city::Column::Name,
                    city::Column::Slug,
                    city::Column::IsEnabled,
                    city::Column::IsDefault,
                    city::Column::IsCapital,
                    city::Column::Latitude,
                    city::Column::Longitude,
                    city::Column::Population,
                    city::Column::PostalCodes,
                    city::Column::Level,
                    city::Column::SortOrder,
                    city::Column::CountryId,
                    city::Column::RegionId,
                    city::Column::ZoneId,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    // the insert id is not reported on the update path, so read it back
    city::Entity::find()
        .filter(city::Column::Code.eq(seed.code.as_str()))
        .one(db)
        .await?
        .map(|row| row.id)
        .ok_or_else(|| SeedError::CityNotFound(seed.code.clone()))
}

// ---- TRANSLATION ----

async fn upsert_translation<C: ConnectionTrait>(
    db: &C,
    city_id: i32,
    seed: &CitySeed,
    locale: &str,
) -> Result<(), SeedError> {
    let text = seed.translation(locale);
    let row = city_translation::ActiveModel {
        id: NotSet,
        city_id: Set(city_id),
        locale: Set(text.locale.to_string()),
        name: Set(text.name.to_string()),
        description: Set(text.description.to_string()),
    };

    city_translation::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([
                city_translation::Column::CityId,
                city_translation::Column::Locale,
            ])
            .update_columns([
                city_translation::Column::Name,
                city_translation::Column::Description,
            ])
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}

// ---- PARENTS ----

/// Region and zone ids looked up once per code for the duration of one
/// country. Misses are cached too, so each unknown code warns once.
struct ParentCache {
    country_id: i32,
    regions: HashMap<String, Option<i32>>,
    zones: HashMap<String, Option<i32>>,
}

impl ParentCache {
    fn new(country_id: i32) -> Self {
        Self {
            country_id,
            regions: HashMap::new(),
            zones: HashMap::new(),
        }
    }

    async fn region<C: ConnectionTrait>(
        &mut self,
        db: &C,
        code: &str,
        report: &mut SeedReport,
    ) -> Result<Option<i32>, SeedError> {
        if let Some(id) = self.regions.get(code) {
            return Ok(*id);
        }

        let found = region::Entity::find()
            .filter(region::Column::Code.eq(code))
            .one(db)
            .await?;
        let id = match found {
            Some(row) if row.country_id == self.country_id => Some(row.id),
            Some(_) => {
                warn!(region = code, "region belongs to another country; leaving it unset");
                None
            }
            None => {
                warn!(region = code, "region not found; leaving it unset");
                None
            }
        };
        if id.is_none() {
            report.unresolved_regions.push(code.to_string());
        }
        self.regions.insert(code.to_string(), id);
        Ok(id)
    }

    async fn zone<C: ConnectionTrait>(
        &mut self,
        db: &C,
        code: &str,
        report: &mut SeedReport,
    ) -> Result<Option<i32>, SeedError> {
        if let Some(id) = self.zones.get(code) {
            return Ok(*id);
        }

        let id = zone::Entity::find()
            .filter(zone::Column::Code.eq(code))
            .one(db)
            .await?
            .map(|row| row.id);
        if id.is_none() {
            warn!(zone = code, "zone not found; leaving it unset");
            report.unresolved_zones.push(code.to_string());
        }
        self.zones.insert(code.to_string(), id);
        Ok(id)
    }
}
