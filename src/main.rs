mod crawler;
mod extract;
mod output;
mod pipeline;
mod settings;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use pipeline::metrics::StageTracker;
use settings::Thresholds;

#[derive(Parser)]
#[command(name = "telugu_scraper", about = "Telugu news text scraper and cleaner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a page (optionally its same-domain links) and save cleaned text
    Scrape {
        /// Seed/page URL to scrape
        url: String,
        /// Also follow links from the seed page (same domain)
        #[arg(long)]
        follow: bool,
        /// Max pages to follow when --follow is set
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
        /// Concurrent requests while following links
        #[arg(short, long, default_value = "4")]
        concurrency: usize,
        /// Per-request timeout in seconds
        #[arg(long, default_value = "20")]
        timeout_secs: u64,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Clean a local text file (one paragraph per line) and save the result
    Clean {
        /// Input UTF-8 text file
        input: PathBuf,
        #[command(flatten)]
        out: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Directory for raw_telugu_N.txt files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    output: &'a Path,
    paragraphs: usize,
    records: usize,
    followed: usize,
    skipped: usize,
    thresholds: &'a Thresholds,
    stages: &'a StageTracker,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let thresholds = Thresholds::from_env();
    info!(?thresholds, "Starting");

    let (paragraphs, followed, skipped, out) = match cli.command {
        Commands::Scrape {
            url,
            follow,
            limit,
            concurrency,
            timeout_secs,
            out,
        } => {
            let opts = crawler::CrawlOptions {
                follow,
                limit,
                concurrency,
                timeout: Duration::from_secs(timeout_secs),
            };
            let crawl = crawler::crawl(&url, &opts).await?;
            (crawl.paragraphs, crawl.followed, crawl.skipped, out)
        }
        Commands::Clean { input, out } => {
            let paragraphs = output::read_paragraphs(&input)?;
            (paragraphs, 0, 0, out)
        }
    };

    let run = pipeline::clean(&paragraphs, &thresholds);
    let records = run.document.records();
    if run.document.is_empty() {
        warn!("No lines survived cleaning; writing an empty file");
    }

    let path = output::next_output_path(&out.out_dir)?;
    output::write_records(&path, &records)?;

    if out.json {
        let summary = RunSummary {
            output: &path,
            paragraphs: paragraphs.len(),
            records: records.len(),
            followed,
            skipped,
            thresholds: &thresholds,
            stages: &run.tracker,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Cleaned {} paragraphs ({} pages followed, {} skipped)",
            paragraphs.len(),
            followed,
            skipped
        );
        run.tracker.print();
        println!("Saved {} lines (incl. headline) to {}", records.len(), path.display());
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 && !out.json {
        println!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

/// `1.5s` under a minute, then whole `2m 5s` / `1h 2m 5s`.
fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let (h, m, s) = (total / 3600, total / 60 % 60, total % 60);
    match (h, m) {
        (0, 0) => format!("{:.1}s", d.as_secs_f64()),
        (0, _) => format!("{m}m {s}s"),
        _ => format!("{h}h {m}m {s}s"),
    }
}
