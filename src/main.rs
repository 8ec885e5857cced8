//! Learn-Harvest main entry point
//!
//! Command-line interface for harvesting a training course into a persisted
//! tree, a flattened JSONL training stream, and a run summary.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use learn_harvest::config::{self, ScrapeConfig};
use learn_harvest::crawler::{Crawler, HttpFetcher};
use learn_harvest::{output, resume};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Learn-Harvest: course content harvester
///
/// Crawls a structured training course (course → learning paths → modules →
/// units), extracts unit content, and writes training data artifacts.
/// Re-running against the same course reuses previously harvested units.
#[derive(Parser, Debug)]
#[command(name = "learn-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Harvest training course content", long_about = None)]
struct Cli {
    /// Course URL (e.g. https://learn.microsoft.com/en-us/training/courses/dp-100t01)
    #[arg(value_name = "COURSE_URL")]
    course_url: String,

    /// Path to optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of learning paths to process
    #[arg(long, value_name = "N")]
    max_paths: Option<usize>,

    /// Maximum number of modules per learning path
    #[arg(long, value_name = "N")]
    max_modules: Option<usize>,

    /// Maximum number of units per module
    #[arg(long, value_name = "N")]
    max_units: Option<usize>,

    /// Skip content extraction (structure only)
    #[arg(long)]
    no_content: bool,

    /// Start from scratch (ignore previously harvested data)
    #[arg(long)]
    no_resume: bool,

    /// Output directory for artifacts
    #[arg(long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let started_at = Utc::now();

    tracing::info!("Target: {}", cli.course_url);
    tracing::info!("Extract content: {}", config.crawler.extract_content);
    if let Some(n) = config.limits.max_paths {
        tracing::info!("Max learning paths: {}", n);
    }
    if let Some(n) = config.limits.max_modules_per_path {
        tracing::info!("Max modules per path: {}", n);
    }
    if let Some(n) = config.limits.max_units_per_module {
        tracing::info!("Max units per module: {}", n);
    }

    let output_dir = PathBuf::from(&config.output.directory);
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let fetcher = HttpFetcher::new(&config.crawler).context("building HTTP client")?;
    let mut crawler = Crawler::new(fetcher, config.clone());

    // Course rank: a failure here is the one fatal outcome
    let discovery = crawler.discover(&cli.course_url).await.map_err(|e| {
        tracing::error!("Failed to scrape course - no data extracted");
        e
    })?;

    // Resume is keyed on course identity (the title-derived slug), decided
    // before the deeper ranks run
    let prior = if config.crawler.resume {
        resume::load_prior_tree(&output_dir, &discovery.title)
    } else {
        None
    };

    let tree = crawler.build_tree(discovery, prior.as_ref()).await;
    if tree.learning_paths.is_empty() {
        // Every path subtree failed; never overwrite a good prior tree with
        // an empty one
        tracing::error!("Failed to scrape course - no data extracted");
        anyhow::bail!("no data extracted from {}", cli.course_url);
    }

    let files = write_artifacts(&tree, &output_dir, started_at, &config)?;

    println!("=== HARVEST COMPLETE ===");
    println!("Course: {}", tree.title);
    println!("Learning paths: {}", tree.learning_paths.len());
    println!(
        "Total modules: {}",
        tree.learning_paths.iter().map(|p| p.modules.len()).sum::<usize>()
    );
    println!(
        "Total units: {}",
        tree.learning_paths
            .iter()
            .flat_map(|p| &p.modules)
            .map(|m| m.units.len())
            .sum::<usize>()
    );
    for file in &files {
        println!("Wrote: {}", output_dir.join(file).display());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("learn_harvest=info,warn"),
            1 => EnvFilter::new("learn_harvest=debug,info"),
            2 => EnvFilter::new("learn_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file (or defaults) and layers CLI flags on top
fn build_config(cli: &Cli) -> anyhow::Result<ScrapeConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            config::load_config(path)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => ScrapeConfig::default(),
    };

    if let Some(n) = cli.max_paths {
        config.limits.max_paths = Some(n);
    }
    if let Some(n) = cli.max_modules {
        config.limits.max_modules_per_path = Some(n);
    }
    if let Some(n) = cli.max_units {
        config.limits.max_units_per_module = Some(n);
    }
    if cli.no_content {
        config.crawler.extract_content = false;
    }
    if cli.no_resume {
        config.crawler.resume = false;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }

    // CLI-supplied selections go through the same fallback policy as file
    // values
    config::normalize(&mut config);
    config::validate(&config)?;

    Ok(config)
}

/// Writes the complete tree, training records, and run summary; returns the
/// artifact filenames
fn write_artifacts(
    tree: &learn_harvest::CourseTree,
    output_dir: &Path,
    started_at: chrono::DateTime<Utc>,
    config: &ScrapeConfig,
) -> anyhow::Result<Vec<String>> {
    let slug = output::course_slug(&tree.title);
    let mut files = Vec::new();

    let tree_file = output::tree_path(output_dir, &slug);
    output::write_complete_tree(tree, &tree_file)?;
    files.push(file_name(&tree_file));

    if config.crawler.extract_content {
        let training_file = output::training_path(output_dir, &slug);
        output::write_training_jsonl(tree, &training_file)?;
        files.push(file_name(&training_file));
    }

    let summary = output::RunSummary::new(tree, started_at, config, files.clone());
    let summary_file = output::summary_path(output_dir, &slug);
    output::write_summary(&summary, &summary_file)?;
    files.push(file_name(&summary_file));

    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
