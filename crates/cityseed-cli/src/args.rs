use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for cityseed
#[derive(Debug, Parser)]
#[command(
    name = "cityseed",
    version,
    about = "Validate the city reference dataset and seed it into a database"
)]
pub struct CliArgs {
    /// Data directory, single data file or bundle (default: the bundled dataset)
    #[arg(short = 'd', long = "data", global = true)]
    pub data: Option<String>,

    /// Database URL, e.g. sqlite://cityseed.db?mode=rwc or postgres://user@host/db
    #[arg(long = "database-url", global = true)]
    pub database_url: Option<String>,

    /// Comma-separated locales written for every city (e.g. en,lt)
    #[arg(short = 'l', long = "locales", global = true, value_delimiter = ',')]
    pub locales: Option<Vec<String>>,

    /// Configuration file (TOML, JSON or YAML)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Debug-level logging for the seeder
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load and validate the dataset, then print a summary
    Validate,

    /// List all countries in the dataset
    Countries,

    /// List the cities of one country
    Cities {
        /// ISO2 code of the country (e.g. BY)
        iso2: String,
    },

    /// Search cities by name (accent- and case-insensitive)
    Search {
        /// Substring to search
        query: String,
    },

    /// Seed zones, countries and regions
    Reference {
        /// Reference file (default: reference.json next to the data, or the bundled one)
        #[arg(short = 'f', long = "file")]
        file: Option<PathBuf>,
    },

    /// Seed cities and their translations
    Seed {
        /// ISO2 codes of the countries to seed (e.g. BY FI LT)
        #[arg(required_unless_present = "all")]
        countries: Vec<String>,

        /// Seed every country in the dataset
        #[arg(long, conflicts_with = "countries")]
        all: bool,

        /// Fail when a country row is missing instead of skipping it
        #[arg(long)]
        strict: bool,

        /// One transaction per country
        #[arg(long)]
        atomic: bool,
    },

    /// Write the validated dataset as a bincode bundle
    Compile {
        /// Output path (default: cities.bin.gz, or cities.bin with --no-gzip)
        #[arg(short = 'o', long = "out")]
        out: Option<PathBuf>,

        /// Write an uncompressed bundle
        #[arg(long = "no-gzip")]
        no_gzip: bool,
    },
}
