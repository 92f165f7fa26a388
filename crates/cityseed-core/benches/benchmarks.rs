// crates/cityseed-core/benches/benchmarks.rs
use cityseed_core::db;
use cityseed_core::seed::{seed_country, seed_reference};
use cityseed_core::settings::DatabaseSettings;
use cityseed_core::{CitySearch, CompressionMode, Dataset, ReferenceData, SeedOptions};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tokio::runtime::Runtime;

fn bench_load(c: &mut Criterion) {
    let data_dir = Dataset::default_data_dir();
    let bundle_dir = tempfile::tempdir().unwrap();
    let bundle = bundle_dir.path().join("cities.bin.gz");
    Dataset::load_path(&data_dir)
        .unwrap()
        .save_as(&bundle, CompressionMode::default())
        .unwrap();

    let mut group = c.benchmark_group("load");
    group.bench_function("json_dir", |b| {
        b.iter(|| Dataset::load_path(black_box(&data_dir)).unwrap())
    });
    group.bench_function("bundle", |b| {
        b.iter(|| Dataset::load_path(black_box(&bundle)).unwrap())
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let dataset = Dataset::load_path(Dataset::default_data_dir()).unwrap();
    c.bench_function("find_cities", |b| {
        b.iter(|| dataset.find_cities(black_box("siauliai")))
    });
}

fn bench_seed(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let dataset = Dataset::load_path(Dataset::default_data_dir()).unwrap();
    let belarus = dataset.country("BY").unwrap();
    let conn = rt.block_on(async {
        let conn = db::connect(&DatabaseSettings::in_memory()).await.unwrap();
        db::ensure_schema(&conn).await.unwrap();
        let reference = ReferenceData::load_path(Dataset::default_data_dir()).unwrap();
        seed_reference(&conn, &reference).await.unwrap();
        conn
    });
    let opts = SeedOptions::default();

    // every iteration after the first is the pure update path
    c.bench_function("reseed_belarus", |b| {
        b.iter(|| rt.block_on(seed_country(&conn, belarus, &opts)).unwrap())
    });
}

criterion_group!(benches, bench_load, bench_search, bench_seed);
criterion_main!(benches);
