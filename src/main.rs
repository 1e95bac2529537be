use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use contact_cleaner::clean::{self, dedupe, retain_contactable};
use contact_cleaner::config::Settings;
use contact_cleaner::input::{self, ColumnMapping};
use contact_cleaner::report::BatchReport;
use contact_cleaner::{CleanedContact, RawContact};

#[derive(Parser)]
#[command(name = "contact_cleaner", about = "Clean, score and deduplicate contact records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a single contact given as a JSON object ("-" reads stdin)
    Contact {
        json: String,
        #[arg(long)]
        pretty: bool,
    },
    /// Clean a .json or .csv batch and write the cleaned records as JSON
    Batch {
        input: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        opts: BatchOpts,
        #[arg(long)]
        pretty: bool,
    },
    /// Show columns and the first rows of an input file
    Preview {
        input: PathBuf,
        /// Rows to show (default from settings)
        #[arg(short = 'n', long)]
        rows: Option<usize>,
    },
    /// Clean a batch and print only the summary
    Stats {
        input: PathBuf,
        #[command(flatten)]
        opts: BatchOpts,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct BatchOpts {
    /// Keep records sharing a phone or email
    #[arg(long)]
    no_dedupe: bool,
    /// Drop records with neither a valid phone nor a valid email
    #[arg(long)]
    require_contact: bool,
    /// Column mapping, e.g. --map phone=Mobile (repeatable)
    #[arg(long = "map", value_name = "FIELD=COLUMN")]
    mappings: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;
    info!(?settings, "settings loaded");

    let result = match cli.command {
        Commands::Contact { json, pretty } => {
            let text = if json == "-" {
                std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
            } else {
                json
            };
            let value: serde_json::Value =
                serde_json::from_str(&text).context("Contact is not valid JSON")?;
            let cleaned = contact_cleaner::clean_contact_value(&value);
            write_json(&mut std::io::stdout().lock(), &cleaned, pretty)?;
            Ok(())
        }
        Commands::Batch {
            input,
            output,
            opts,
            pretty,
        } => {
            let (cleaned, report) = run_batch(&input, &opts, &settings)?;
            match &output {
                Some(path) => {
                    let file = std::fs::File::create(path)
                        .with_context(|| format!("Failed to create {:?}", path))?;
                    let mut writer = std::io::BufWriter::new(file);
                    write_json(&mut writer, &cleaned, pretty)?;
                    writer.flush()?;
                    eprintln!("Wrote {} contacts to {:?}", cleaned.len(), path);
                }
                None => write_json(&mut std::io::stdout().lock(), &cleaned, pretty)?,
            }
            eprintln!("{}", report.summary());
            Ok(())
        }
        Commands::Preview { input, rows } => {
            let all = input::load_rows(&input)
                .with_context(|| format!("Failed to load {:?}", input))?;
            if all.is_empty() {
                println!("Input is empty.");
                return Ok(());
            }
            let preview = input::preview(&all, rows.unwrap_or(settings.preview_rows));
            write_json(&mut std::io::stdout().lock(), &preview, true)?;
            Ok(())
        }
        Commands::Stats { input, opts, json } => {
            let (_, report) = run_batch(&input, &opts, &settings)?;
            if json {
                write_json(&mut std::io::stdout().lock(), &report, true)?;
            } else {
                println!("{}", report.summary());
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn run_batch(
    path: &Path,
    opts: &BatchOpts,
    settings: &Settings,
) -> anyhow::Result<(Vec<CleanedContact>, BatchReport)> {
    let mapping = ColumnMapping::parse(&opts.mappings)?;
    let rows = input::load_rows(path).with_context(|| format!("Failed to load {:?}", path))?;
    let contacts = mapping.to_contacts(&rows);

    let mut cleaned = clean_in_chunks(&contacts, settings.chunk_size);
    let total = cleaned.len();
    if settings.dedupe && !opts.no_dedupe {
        cleaned = dedupe(cleaned);
    }
    let after_dedupe = cleaned.len();
    if settings.require_contact || opts.require_contact {
        cleaned = retain_contactable(cleaned);
    }

    let report = BatchReport::build(total, after_dedupe, &cleaned);
    info!(
        total,
        kept = report.total_kept,
        duplicates = report.duplicates_skipped,
        "batch cleaned"
    );
    Ok((cleaned, report))
}

/// Parallel cleaning per chunk. Chunks are appended in input order, which the
/// first-seen dedupe rule depends on.
fn clean_in_chunks(contacts: &[RawContact], chunk_size: usize) -> Vec<CleanedContact> {
    let pb = ProgressBar::new(contacts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut cleaned = Vec::with_capacity(contacts.len());
    for chunk in contacts.chunks(chunk_size.max(1)) {
        cleaned.extend(clean::clean_all(chunk));
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    cleaned
}

fn write_json<W: Write, T: serde::Serialize>(
    out: &mut W,
    value: &T,
    pretty: bool,
) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
