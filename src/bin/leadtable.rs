//! leadtable CLI
//!
//! Command-line front end over a file-backed leads table.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use leadtable::import::ImportStager;
use leadtable::query::date::parse_date;
use leadtable::{Config, FileBlobStore, FilterCriteria, LeadTable, Record, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Columns shown by `list`
const COLUMNS: [&str; 7] = [
    "ID",
    "Lead Name",
    "Stage",
    "Source",
    "Responsible",
    "Created",
    "Follow Up",
];

/// leadtable
#[derive(Parser, Debug)]
#[command(name = "leadtable")]
#[command(about = "Manage a leads table: import, filter, sort, page, export")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./leadtable_data")]
    data_dir: String,

    /// Storage key of the collection
    #[arg(short, long, default_value = "leadsData")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import leads from a CSV file
    Import {
        /// CSV file to import
        file: PathBuf,

        /// Keep records whose ID already exists
        #[arg(long)]
        allow_duplicates: bool,

        /// Show the preview without importing
        #[arg(long)]
        dry_run: bool,
    },

    /// Export all leads to CSV
    Export {
        /// Directory to write the export into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// List leads
    List {
        /// Case-insensitive search in name, first name and ID
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long)]
        stage: Option<String>,

        #[arg(long)]
        source: Option<String>,

        #[arg(long)]
        responsible: Option<String>,

        /// Created on this day (DD/MM/YYYY)
        #[arg(long, value_parser = parse_day)]
        date: Option<NaiveDate>,

        /// Sort key: id, name, stage, source, responsible, created, followup
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Records per page
        #[arg(long, default_value = "10")]
        page_size: usize,
    },

    /// Add a lead from NAME=VALUE pairs
    Add {
        #[arg(value_parser = parse_pair, required = true)]
        fields: Vec<(String, String)>,
    },

    /// Set one field on the leads with an ID
    Update {
        id: String,
        field: String,
        value: String,
    },

    /// Delete the leads with an ID
    Delete {
        id: String,
    },

    /// Show lead counts per stage
    Stats,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,leadtable=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("leadtable v{}", leadtable::VERSION);
    tracing::debug!("Data directory: {}", args.data_dir);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut builder = Config::builder()
        .data_dir(&args.data_dir)
        .storage_key(&args.key);
    if let Commands::List { page_size, .. } = &args.command {
        builder = builder.page_size(*page_size);
    }
    let config = builder.build();

    let blobs = FileBlobStore::open(&config.data_dir)?;
    // Surface a bad key now instead of as a logged persist failure later
    blobs.blob_path(&config.storage_key)?;
    let mut table = LeadTable::open(blobs, &config);

    match args.command {
        Commands::Import {
            file,
            allow_duplicates,
            dry_run,
        } => {
            let mut stager = ImportStager::new();
            stager.begin(file);
            let preview = stager.wait(Duration::from_millis(config.import_timeout_ms))?;

            println!(
                "Preview: {} rows ({} dropped), columns: {}",
                preview.len(),
                preview.dropped_rows(),
                preview.headers().join(", ")
            );
            print_rows(preview.rows(config.preview_rows));

            if dry_run {
                return Ok(());
            }
            if let Some(preview) = stager.take_preview() {
                let skip = config.skip_duplicates && !allow_duplicates;
                let outcome = table.import(preview, skip);
                println!(
                    "Imported {} leads, skipped {} duplicates",
                    outcome.imported, outcome.skipped
                );
            }
        }

        Commands::Export { out_dir } => {
            let export = table.export(Local::now().date_naive())?;
            fs::create_dir_all(&out_dir)?;
            let path = out_dir.join(&export.filename);
            fs::write(&path, export.contents)?;
            println!("Exported {} leads to {}", table.records().len(), path.display());
        }

        Commands::List {
            search,
            stage,
            source,
            responsible,
            date,
            sort,
            desc,
            page,
            ..
        } => {
            table.set_criteria(FilterCriteria {
                search_term: search,
                stage,
                source,
                responsible,
                date,
            });
            if let Some(key) = sort {
                if !table.sort_by(&key) {
                    println!("Unknown sort key '{}', showing unsorted", key);
                } else if desc {
                    table.sort_by(&key);
                }
            }
            if !table.go_to_page(page) {
                println!("Page {} is out of range", page);
                return Ok(());
            }

            let current = table.current_page();
            print_rows(current.items);
            println!(
                "Showing {} to {} of {} (page {} of {})",
                current.range_start,
                current.range_end,
                current.total,
                table.page_number(),
                table.total_pages().max(1)
            );
        }

        Commands::Add { fields } => {
            let record = Record::from_pairs(fields);
            println!("Added lead {}", record.id());
            table.add(record);
        }

        Commands::Update { id, field, value } => {
            let updated = table.update_field(&id, &field, &value);
            println!("Updated {} lead(s)", updated);
        }

        Commands::Delete { id } => {
            let removed = table.delete(&id);
            println!("Deleted {} lead(s)", removed);
        }

        Commands::Stats => {
            let stats = table.stats();
            println!("Total: {}", stats.total);
            for (stage, count) in &stats.by_stage {
                println!("  {:<12} {}", stage, count);
            }
        }
    }

    Ok(())
}

fn print_rows(rows: &[Record]) {
    let header: Vec<String> = COLUMNS.iter().map(|c| format!("{:<16}", c)).collect();
    println!("{}", header.join(" ").trim_end());
    for record in rows {
        let cells: Vec<String> = COLUMNS
            .iter()
            .map(|c| format!("{:<16}", truncate(record.get(c).unwrap_or(""), 16)))
            .collect();
        println!("{}", cells.join(" ").trim_end());
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

fn parse_day(value: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("expected DD/MM/YYYY, got '{}'", value))
}

fn parse_pair(value: &str) -> std::result::Result<(String, String), String> {
    let (name, field_value) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", value))?;
    Ok((name.trim().to_string(), field_value.to_string()))
}
