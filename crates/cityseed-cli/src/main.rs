//! cityseed: validate and seed the city reference dataset
//!
//! Usage examples
//! --------------
//!
//! - Check the bundled data files
//!   $ cityseed validate
//!
//! - Look around the dataset
//!   $ cityseed countries
//!   $ cityseed cities by
//!   $ cityseed search vilnius
//!
//! - Seed a database: reference rows first, then cities
//!   $ cityseed --database-url sqlite://cities.db?mode=rwc reference
//!   $ cityseed --database-url sqlite://cities.db?mode=rwc seed BY FI LT
//!
//! - Precompile a bundle for faster loads
//!   $ cityseed compile --out cities.bin.gz
//!   $ cityseed --data cities.bin.gz seed --all
mod args;
mod telemetry;

use crate::args::{CliArgs, Commands};
use anyhow::{anyhow, Context};
use cityseed_core::model::BUNDLE_SUFFIX;
use cityseed_core::seed::{seed_dataset, seed_reference};
use cityseed_core::{
    db, CitySearch, CompressionMode, Dataset, ReferenceData, SeedOptions, Settings,
};
use clap::Parser;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    telemetry::init_telemetry(args.verbose);

    // 1. Settings: defaults < config files < environment < flags
    let mut settings = Settings::load(args.config.as_deref()).context("loading settings")?;
    if let Some(url) = args.database_url {
        settings.database.url = url;
    }
    if let Some(locales) = args.locales {
        settings.seed.locales = locales;
    }
    if args.data.is_some() {
        settings.seed.data = args.data;
    }

    match args.command {
        Commands::Validate => {
            let dataset = load_dataset(settings.seed.data.as_deref())?;
            let stats = dataset.stats();
            println!("Dataset is valid");
            println!("  Countries:    {}", stats.countries);
            println!("  Cities:       {}", stats.cities);
            println!("  Capitals:     {}", stats.capitals);
            println!("  Translations: {}", stats.translations);
        }

        Commands::Countries => {
            let dataset = load_dataset(settings.seed.data.as_deref())?;
            for country in dataset.countries() {
                let capital = country.capital().map(|c| c.name.as_str()).unwrap_or("-");
                println!(
                    "{}  {:>3} cities  capital: {}",
                    country.iso2(),
                    country.cities().len(),
                    capital
                );
            }
        }

        Commands::Cities { iso2 } => {
            let dataset = load_dataset(settings.seed.data.as_deref())?;
            let country = dataset
                .country(&iso2)
                .ok_or_else(|| anyhow!("country {iso2} is not in the dataset"))?;
            for city in country.cities() {
                let marker = if city.is_capital { "  [capital]" } else { "" };
                println!(
                    "{:<12} {:<28} {:>10}{}",
                    city.code, city.name, city.population, marker
                );
            }
        }

        Commands::Search { query } => {
            let dataset = load_dataset(settings.seed.data.as_deref())?;
            let hits = dataset.find_cities(&query);
            if hits.is_empty() {
                println!("No cities match '{query}'");
            }
            for (city, country) in hits {
                println!("{:<12} {} ({})", city.code, city.name, country.iso2());
            }
        }

        Commands::Reference { file } => {
            let reference = match file {
                Some(path) => ReferenceData::load_path(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => default_reference(settings.seed.data.as_deref())?,
            };

            let conn = db::connect(&settings.database).await?;
            db::ensure_schema(&conn).await?;
            let report = seed_reference(&conn, &reference).await?;
            println!(
                "Reference data: {} zones, {} countries, {} regions",
                report.zones, report.countries, report.regions
            );
        }

        Commands::Seed {
            countries,
            all,
            strict,
            atomic,
        } => {
            let dataset = load_dataset(settings.seed.data.as_deref())?;

            let mut opts = SeedOptions::from(&settings.seed);
            opts.strict |= strict;
            opts.atomic |= atomic;

            let codes: Vec<&str> = countries.iter().map(|s| s.trim()).collect();
            let selection = if all { None } else { Some(codes.as_slice()) };

            let conn = db::connect(&settings.database).await?;
            db::ensure_schema(&conn).await?;
            let reports = seed_dataset(&conn, &dataset, selection, &opts).await?;
            for report in &reports {
                println!("{report}");
            }
        }

        Commands::Compile { out, no_gzip } => {
            let dataset = load_dataset(settings.seed.data.as_deref())?;
            let (compression, default_name) = if no_gzip {
                (CompressionMode::None, "cities.bin".to_string())
            } else {
                (CompressionMode::default(), format!("cities{BUNDLE_SUFFIX}"))
            };
            let out = out.unwrap_or_else(|| PathBuf::from(default_name));
            dataset
                .save_as(&out, compression)
                .with_context(|| format!("writing {}", out.display()))?;
            info!(path = %out.display(), ?compression, "bundle written");
            println!("Wrote {}", out.display());
        }
    }

    Ok(())
}

/// The dataset at `data`, or the bundled one.
fn load_dataset(data: Option<&str>) -> anyhow::Result<Cow<'static, Dataset>> {
    if let Some(path) = data {
        let dataset =
            Dataset::load_path(path).with_context(|| format!("loading dataset from {path}"))?;
        return Ok(Cow::Owned(dataset));
    }

    #[cfg(feature = "embedded")]
    {
        Ok(Cow::Borrowed(Dataset::embedded()?))
    }
    #[cfg(not(feature = "embedded"))]
    {
        Ok(Cow::Owned(Dataset::load_path(Dataset::default_data_dir())?))
    }
}

/// `reference.json` in the data directory or its parent (so both `--data data`
/// and `--data data/cities` find it), otherwise the bundled reference file.
fn default_reference(data: Option<&str>) -> anyhow::Result<ReferenceData> {
    if let Some(data) = data {
        if let Some(path) = find_reference(Path::new(data)) {
            info!(path = %path.display(), "using reference file");
            return ReferenceData::load_path(&path)
                .with_context(|| format!("reading {}", path.display()));
        }
        warn!(data, "no reference.json next to the data; using the bundled one");
    }

    #[cfg(feature = "embedded")]
    {
        Ok(ReferenceData::embedded()?)
    }
    #[cfg(not(feature = "embedded"))]
    {
        Ok(ReferenceData::load_path(Dataset::default_data_dir())?)
    }
}

fn find_reference(data: &Path) -> Option<PathBuf> {
    let dir = if data.is_dir() { Some(data) } else { data.parent() };
    dir.into_iter()
        .flat_map(|d| [Some(d), d.parent()])
        .flatten()
        .map(|d| d.join("reference.json"))
        .find(|p| p.is_file())
}
