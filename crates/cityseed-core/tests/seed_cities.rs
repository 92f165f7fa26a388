// crates/cityseed-core/tests/seed_cities.rs
#![cfg(all(feature = "sqlite", feature = "embedded"))]

use cityseed_core::db::entities::{city, city_translation, country, region};
use cityseed_core::db;
use cityseed_core::seed::{seed_country, seed_dataset, seed_reference};
use cityseed_core::settings::{DatabaseSettings, SeedSettings};
use cityseed_core::{
    CitySearch, CountryDataset, Dataset, DatasetError, ReferenceData, SeedError, SeedOptions,
    SeedStatus,
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

// ---- HELPERS ----

async fn empty_db() -> DatabaseConnection {
    let conn = db::connect(&DatabaseSettings::in_memory()).await.unwrap();
    db::ensure_schema(&conn).await.unwrap();
    conn
}

async fn db_with_reference() -> DatabaseConnection {
    let conn = empty_db().await;
    seed_reference(&conn, &ReferenceData::embedded().unwrap())
        .await
        .unwrap();
    conn
}

fn dataset() -> &'static Dataset {
    Dataset::embedded().unwrap()
}

fn country_data(iso2: &str) -> &'static CountryDataset {
    dataset().country(iso2).unwrap()
}

async fn city_row(conn: &DatabaseConnection, code: &str) -> city::Model {
    city::Entity::find()
        .filter(city::Column::Code.eq(code))
        .one(conn)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("no row for {code}"))
}

async fn translation_row(
    conn: &DatabaseConnection,
    city_id: i32,
    locale: &str,
) -> city_translation::Model {
    city_translation::Entity::find()
        .filter(city_translation::Column::CityId.eq(city_id))
        .filter(city_translation::Column::Locale.eq(locale))
        .one(conn)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("no {locale} translation for city {city_id}"))
}

async fn counts(conn: &DatabaseConnection) -> (u64, u64) {
    let cities = city::Entity::find().count(conn).await.unwrap();
    let translations = city_translation::Entity::find().count(conn).await.unwrap();
    (cities, translations)
}

// ---- SCENARIOS ----

#[tokio::test]
async fn belarus_seeds_ten_cities() {
    let conn = db_with_reference().await;
    let report = seed_country(&conn, country_data("BY"), &SeedOptions::default())
        .await
        .unwrap();
    assert_eq!(report.status, SeedStatus::Seeded);
    assert_eq!(report.cities, 10);

    let rows = city::Entity::find()
        .order_by_asc(city::Column::Id)
        .all(&conn)
        .await
        .unwrap();
    let codes: Vec<&str> = rows.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(
        codes,
        [
            "BY-MIN", "BY-GOM", "BY-MOG", "BY-VIT", "BY-GRO", "BY-BRE", "BY-BOB", "BY-BAR",
            "BY-BOR", "BY-PIN"
        ]
    );

    let minsk = city_row(&conn, "BY-MIN").await;
    assert!(minsk.is_capital);
    assert!(minsk.is_default);
    assert!(minsk.is_enabled);
    assert_eq!(minsk.population, 2_009_786);
    assert_eq!(minsk.slug, "minsk");
    assert_eq!(minsk.level, 1);
    assert_eq!(minsk.sort_order, 0);
    assert_eq!(minsk.postal_codes(), vec!["220000"]);
    assert_eq!(translation_row(&conn, minsk.id, "lt").await.name, "Minskas");

    // only the capital carries the flag
    let capitals = city::Entity::find()
        .filter(city::Column::IsCapital.eq(true))
        .count(&conn)
        .await
        .unwrap();
    assert_eq!(capitals, 1);
}

#[tokio::test]
async fn rows_match_the_dataset() {
    let conn = db_with_reference().await;
    let data = country_data("LV");
    seed_country(&conn, data, &SeedOptions::default())
        .await
        .unwrap();

    let latvia = country::Entity::find()
        .filter(country::Column::Cca2.eq("LV"))
        .one(&conn)
        .await
        .unwrap()
        .unwrap();
    for seed in data.cities() {
        let row = city_row(&conn, &seed.code).await;
        assert_eq!(row.name, seed.name);
        assert_eq!(row.latitude, seed.latitude);
        assert_eq!(row.longitude, seed.longitude);
        assert_eq!(row.population, seed.population);
        assert_eq!(row.country_id, latvia.id);
        assert!(row.zone_id.is_some(), "{} has no zone", seed.code);
    }
}

#[tokio::test]
async fn finland_seeded_twice_is_idempotent() {
    let conn = db_with_reference().await;
    let opts = SeedOptions::default();

    seed_country(&conn, country_data("FI"), &opts).await.unwrap();
    let first_counts = counts(&conn).await;
    let first_rows = city::Entity::find().all(&conn).await.unwrap();
    let first_texts = city_translation::Entity::find().all(&conn).await.unwrap();

    seed_country(&conn, country_data("FI"), &opts).await.unwrap();
    assert_eq!(counts(&conn).await, first_counts);
    assert_eq!(city::Entity::find().all(&conn).await.unwrap(), first_rows);
    assert_eq!(
        city_translation::Entity::find().all(&conn).await.unwrap(),
        first_texts
    );

    let helsinki = city::Entity::find()
        .filter(city::Column::Code.eq("FI-18-HEL"))
        .all(&conn)
        .await
        .unwrap();
    assert_eq!(helsinki.len(), 1);
    assert_eq!(helsinki[0].name, "Helsinki");

    let uusimaa = region::Entity::find()
        .filter(region::Column::Code.eq("FI-18"))
        .one(&conn)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(helsinki[0].region_id, Some(uusimaa.id));
}

#[tokio::test]
async fn lithuanian_city_without_lt_text_falls_back_to_english() {
    let conn = db_with_reference().await;
    let data = country_data("LT");
    let mazeikiai = data.city("LT-MAZ").unwrap();
    assert!(!mazeikiai.translations.contains_key("lt"));

    seed_country(&conn, data, &SeedOptions::default())
        .await
        .unwrap();

    let row = city_row(&conn, "LT-MAZ").await;
    let en = translation_row(&conn, row.id, "en").await;
    let lt = translation_row(&conn, row.id, "lt").await;
    assert_eq!(lt.name, en.name);
    assert_eq!(lt.description, en.description);
    assert!(!lt.description.is_empty());

    // a city with its own text keeps it
    let klaipeda = city_row(&conn, "LT-KLJ").await;
    let lt = translation_row(&conn, klaipeda.id, "lt").await;
    assert_eq!(lt.description, "Klaipėda yra Lietuvos miestas.");
}

#[tokio::test]
async fn configured_locales_are_written_for_every_city() {
    let conn = db_with_reference().await;
    let opts = SeedOptions {
        locales: vec!["en".into(), "lt".into(), "pl".into()],
        ..SeedOptions::default()
    };
    let report = seed_country(&conn, country_data("EE"), &opts).await.unwrap();
    assert_eq!(report.translations, report.cities * 3);

    let tartu = city_row(&conn, "EE-TAY").await;
    let pl = translation_row(&conn, tartu.id, "pl").await;
    let en = translation_row(&conn, tartu.id, "en").await;
    assert_eq!(pl.name, en.name);
    assert_eq!(pl.description, en.description);
}

#[tokio::test]
async fn reseeding_overwrites_changed_values() {
    let conn = db_with_reference().await;
    seed_country(&conn, country_data("BY"), &SeedOptions::default())
        .await
        .unwrap();

    let mut changed = country_data("BY").clone();
    let minsk = changed
        .cities
        .iter_mut()
        .find(|c| c.code == "BY-MIN")
        .unwrap();
    minsk.population = 2_010_000;
    minsk.postal_codes.push("220001".into());
    if let Some(lt) = minsk.translations.get_mut("lt") {
        lt.description = Some("Atnaujintas aprašymas.".into());
    }
    seed_country(&conn, &changed, &SeedOptions::default())
        .await
        .unwrap();

    assert_eq!(counts(&conn).await.0, 10);
    let row = city_row(&conn, "BY-MIN").await;
    assert_eq!(row.population, 2_010_000);
    assert_eq!(row.postal_codes(), vec!["220000", "220001"]);
    let lt = translation_row(&conn, row.id, "lt").await;
    assert_eq!(lt.name, "Minskas");
    assert_eq!(lt.description, "Atnaujintas aprašymas.");
}

// ---- PRECONDITIONS ----

#[tokio::test]
async fn missing_country_is_skipped_without_writes() {
    let conn = empty_db().await;
    let report = seed_country(&conn, country_data("BY"), &SeedOptions::default())
        .await
        .unwrap();

    assert!(report.is_skipped());
    assert_eq!(report.cities, 0);
    assert_eq!(counts(&conn).await, (0, 0));
}

#[tokio::test]
async fn strict_mode_reports_missing_country() {
    let conn = empty_db().await;
    let opts = SeedOptions {
        strict: true,
        ..SeedOptions::default()
    };
    let err = seed_country(&conn, country_data("BY"), &opts)
        .await
        .unwrap_err();
    assert!(matches!(err, SeedError::MissingCountry(c) if c == "BY"));
    assert_eq!(counts(&conn).await, (0, 0));
}

#[tokio::test]
async fn unknown_region_leaves_reference_unset() {
    let conn = empty_db().await;
    let mut reference = ReferenceData::embedded().unwrap();
    reference.regions.clear();
    seed_reference(&conn, &reference).await.unwrap();

    let report = seed_country(&conn, country_data("FI"), &SeedOptions::default())
        .await
        .unwrap();
    assert_eq!(report.cities, 10);
    assert!(report.unresolved_regions.contains(&"FI-18".to_string()));
    // each missing code is reported once
    let mut deduped = report.unresolved_regions.clone();
    deduped.dedup();
    assert_eq!(deduped, report.unresolved_regions);

    let helsinki = city_row(&conn, "FI-18-HEL").await;
    assert_eq!(helsinki.region_id, None);
    assert!(helsinki.zone_id.is_some());
}

#[tokio::test]
async fn unknown_zone_leaves_reference_unset() {
    let conn = empty_db().await;
    let mut reference = ReferenceData::embedded().unwrap();
    reference.zones.retain(|z| z.code != "EU");
    seed_reference(&conn, &reference).await.unwrap();

    let report = seed_country(&conn, country_data("EE"), &SeedOptions::default())
        .await
        .unwrap();
    assert!(!report.is_skipped());
    assert_eq!(report.unresolved_zones, ["EU"]);

    let tallinn = city_row(&conn, "EE-TLL").await;
    assert_eq!(tallinn.zone_id, None);
}

#[tokio::test]
async fn invalid_configured_locales_fail_before_writing() {
    let conn = db_with_reference().await;
    for bad in ["EN", " lt", ""] {
        let opts = SeedOptions {
            locales: vec!["en".into(), bad.into()],
            ..SeedOptions::default()
        };
        let err = seed_country(&conn, country_data("BY"), &opts)
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::InvalidLocale(l) if l == bad));

        let err = seed_dataset(&conn, dataset(), Some(&["BY"][..]), &opts)
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::InvalidLocale(_)));
    }
    assert_eq!(counts(&conn).await, (0, 0));
}

#[tokio::test]
async fn locales_from_settings_are_trimmed_before_seeding() {
    let conn = db_with_reference().await;
    let settings = SeedSettings {
        locales: vec!["en".into(), " lt".into()],
        ..SeedSettings::default()
    };
    seed_country(&conn, country_data("BY"), &SeedOptions::from(&settings))
        .await
        .unwrap();

    let minsk = city_row(&conn, "BY-MIN").await;
    let locales: Vec<String> = city_translation::Entity::find()
        .filter(city_translation::Column::CityId.eq(minsk.id))
        .order_by_asc(city_translation::Column::Locale)
        .all(&conn)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.locale)
        .collect();
    assert_eq!(locales, ["en", "lt"]);
}

// ---- TRANSACTIONS ----

#[tokio::test]
async fn atomic_seed_rolls_back_the_whole_country() {
    let conn = db_with_reference().await;
    conn.execute_unprepared("DROP TABLE city_translations")
        .await
        .unwrap();

    let opts = SeedOptions {
        atomic: true,
        ..SeedOptions::default()
    };
    let err = seed_country(&conn, country_data("BY"), &opts)
        .await
        .unwrap_err();
    assert!(matches!(err, SeedError::Db(_)));
    assert_eq!(city::Entity::find().count(&conn).await.unwrap(), 0);
}

#[tokio::test]
async fn non_atomic_seed_keeps_rows_written_before_a_failure() {
    let conn = db_with_reference().await;
    conn.execute_unprepared("DROP TABLE city_translations")
        .await
        .unwrap();

    let err = seed_country(&conn, country_data("BY"), &SeedOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SeedError::Db(_)));
    // the first city went in before its translation failed
    assert_eq!(city::Entity::find().count(&conn).await.unwrap(), 1);
}

#[tokio::test]
async fn atomic_seed_commits_on_success() {
    let conn = db_with_reference().await;
    let opts = SeedOptions {
        atomic: true,
        ..SeedOptions::default()
    };
    seed_country(&conn, country_data("LT"), &opts).await.unwrap();
    assert_eq!(counts(&conn).await.0, 12);
}

// ---- WHOLE DATASET ----

#[tokio::test]
async fn seeding_everything_writes_every_city() {
    let conn = db_with_reference().await;
    let reports = seed_dataset(&conn, dataset(), None, &SeedOptions::default())
        .await
        .unwrap();

    assert_eq!(reports.len(), 30);
    assert!(reports.iter().all(|r| !r.is_skipped()));
    let stats = dataset().stats();
    assert_eq!(counts(&conn).await.0, stats.cities as u64);

    let capitals = city::Entity::find()
        .filter(city::Column::IsCapital.eq(true))
        .count(&conn)
        .await
        .unwrap();
    assert_eq!(capitals, 30);
}

#[tokio::test]
async fn selection_seeds_only_the_named_countries() {
    let conn = db_with_reference().await;
    let reports = seed_dataset(
        &conn,
        dataset(),
        Some(&["lt", "BY"][..]),
        &SeedOptions::default(),
    )
    .await
    .unwrap();

    // dataset order, not argument order
    let seeded: Vec<&str> = reports.iter().map(|r| r.country.as_str()).collect();
    assert_eq!(seeded, ["BY", "LT"]);
    assert_eq!(counts(&conn).await.0, 22);
}

#[tokio::test]
async fn selection_with_unknown_country_fails_before_writing() {
    let conn = db_with_reference().await;
    let err = seed_dataset(
        &conn,
        dataset(),
        Some(&["BY", "ZZ"][..]),
        &SeedOptions::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        SeedError::Dataset(DatasetError::UnknownCountry(c)) if c == "ZZ"
    ));
    assert_eq!(counts(&conn).await, (0, 0));
}

#[tokio::test]
async fn reference_seeding_is_idempotent() {
    let conn = empty_db().await;
    let reference = ReferenceData::embedded().unwrap();

    let first = seed_reference(&conn, &reference).await.unwrap();
    let second = seed_reference(&conn, &reference).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.countries, 30);

    assert_eq!(country::Entity::find().count(&conn).await.unwrap(), 30);
    assert_eq!(
        region::Entity::find().count(&conn).await.unwrap(),
        reference.regions.len() as u64
    );
}

#[tokio::test]
async fn region_with_unknown_country_is_rejected() {
    let conn = empty_db().await;
    let reference: ReferenceData = serde_json::from_str(
        r#"{ "regions": [ { "country": "FI", "code": "FI-18", "name": "Uusimaa" } ] }"#,
    )
    .unwrap();
    let err = seed_reference(&conn, &reference).await.unwrap_err();
    assert!(matches!(err, SeedError::MissingCountry(c) if c == "FI"));
}
