use anyhow::{bail, Context, Result};
use catalog::persist::{open_catalog, save_catalog, CatalogPaths};
use catalog::schema::{RawDestination, RawTour};
use catalog::{Catalog, CatalogQuery, DisplayCurrency};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "catalog-builder")]
#[command(about = "Validate tour data and build catalog snapshots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize raw JSON/JSONL tour records and write a snapshot
    Build {
        /// Tour input path (file or directory of .json / .jsonl files)
        #[arg(long)]
        input: String,
        /// Destinations JSON file
        #[arg(long)]
        destinations: Option<String>,
        /// Output snapshot directory
        #[arg(long)]
        output: String,
    },
    /// Run a listing query string against a catalog
    Query {
        /// Snapshot directory; the bundled catalog is used when omitted
        #[arg(long)]
        catalog: Option<String>,
        /// Display currency for prices and price bounds
        #[arg(long, default_value = "usd")]
        currency: DisplayCurrency,
        /// e.g. "country=Japan&sort=priceAsc"
        #[arg(default_value = "")]
        query: String,
    },
    /// Print a tour with its itinerary
    Show {
        #[arg(long)]
        catalog: Option<String>,
        #[arg(long, default_value = "usd")]
        currency: DisplayCurrency,
        slug: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, destinations, output } => build_catalog(&input, destinations.as_deref(), &output),
        Commands::Query { catalog, currency, query } => {
            let catalog = open_catalog(catalog.as_deref().map(Path::new))?;
            run_query(&catalog, &query, currency);
            Ok(())
        }
        Commands::Show { catalog, currency, slug } => {
            let catalog = open_catalog(catalog.as_deref().map(Path::new))?;
            show_tour(&catalog, &slug, currency)
        }
    }
}

fn build_catalog(input: &str, destinations: Option<&str>, output: &str) -> Result<()> {
    let input_path = Path::new(input);
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    } else {
        bail!("input not found: {input}");
    }

    let mut tours: Vec<RawTour> = Vec::new();
    for file in &files {
        let before = tours.len();
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(file, &mut tours)?;
        } else {
            read_json(file, &mut tours)?;
        }
        tracing::debug!(file = %file.display(), records = tours.len() - before, "read tour file");
    }

    let mut raw_destinations: Vec<RawDestination> = Vec::new();
    if let Some(path) = destinations {
        read_json(Path::new(path), &mut raw_destinations)?;
    }
    tracing::info!(files = files.len(), tours = tours.len(), destinations = raw_destinations.len(), "ingested records");

    let catalog = Catalog::from_raw(tours, raw_destinations).context("catalog validation failed")?;
    let created_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "".into());
    let meta = save_catalog(&CatalogPaths::new(output), &catalog, created_at)?;

    tracing::info!(output, num_tours = meta.num_tours, num_destinations = meta.num_destinations, "snapshot build complete");
    Ok(())
}

fn read_jsonl<T: DeserializeOwned>(file: &Path, out: &mut Vec<T>) -> Result<()> {
    let f = File::open(file)?;
    let reader = BufReader::new(f);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let rec: T = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        out.push(rec);
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(file: &Path, out: &mut Vec<T>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("open {}", file.display()))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                out.push(serde_json::from_value(v).with_context(|| file.display().to_string())?);
            }
        }
        serde_json::Value::Object(_) => {
            out.push(serde_json::from_value(json).with_context(|| file.display().to_string())?);
        }
        _ => tracing::warn!(file = %file.display(), "expected a JSON object or array, skipping"),
    }
    Ok(())
}

fn run_query(catalog: &Catalog, qs: &str, currency: DisplayCurrency) {
    let query = CatalogQuery::from_query_string(qs);
    let result = catalog.query(&query, currency);
    println!("?{}", query.to_query_string());
    if result.is_empty() {
        println!("no tours match");
        return;
    }
    println!("{} result(s), page {}/{}", result.total, result.page, result.page_count);
    for t in &result.items {
        println!(
            "{:<34} {:<22} {:>3}D {:>12}  {:.1}★  [{}]",
            t.slug,
            t.country,
            t.duration_days,
            currency.format(t.price_from),
            t.rating,
            t.tags.join(", ")
        );
    }
}

fn show_tour(catalog: &Catalog, slug: &str, currency: DisplayCurrency) -> Result<()> {
    let Some(tour) = catalog.lookup_by_slug(slug) else {
        bail!("tour not found: {slug}");
    };
    println!("{} ({}, {} days, from {})", tour.title, tour.country, tour.duration_days, currency.format(tour.price_from));
    println!("{:.1}★ from {} reviews", tour.rating, tour.reviews_count);
    println!("{}", tour.summary);
    for day in &tour.itinerary {
        match &day.subtitle {
            Some(sub) => println!("  Day {}: {} ({})", day.day, day.title, sub),
            None => println!("  Day {}: {}", day.day, day.title),
        }
        for d in &day.details {
            println!("    - {d}");
        }
    }
    println!("Included: {}", tour.included.join(", "));
    println!("Excluded: {}", tour.excluded.join(", "));
    let related: Vec<&str> = catalog.related(tour).iter().map(|t| t.slug.as_str()).collect();
    if !related.is_empty() {
        println!("Related: {}", related.join(", "));
    }
    Ok(())
}
