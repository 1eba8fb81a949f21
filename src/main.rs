//! Catalog-Harvest main entry point
//!
//! This is the command-line interface for the Catalog-Harvest course catalog harvester.

use anyhow::Context;
use catalog_harvest::config::{load_config_with_hash, validate, Config};
use catalog_harvest::crawler::{Coordinator, SubjectResolution};
use catalog_harvest::output::{print_summary, JsonFileSink, RunStatus};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog-Harvest: an academic course catalog harvester
///
/// Walks the course catalog down to the current term, collects every course of
/// every subject together with its offering history, and writes one JSON file
/// per subject.
#[derive(Parser, Debug)]
#[command(name = "catalog-harvest")]
#[command(version)]
#[command(about = "Harvests course offering history from an XML course catalog", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,

    /// Only harvest this subject code (repeatable)
    #[arg(long = "subject", value_name = "CODE")]
    subjects: Vec<String>,

    /// Directory to write JSON files into
    #[arg(long, value_name = "DIR")]
    data_dir: Option<String>,

    /// Validate config and show what would be harvested without sending requests
    #[arg(long, conflicts_with = "list_subjects")]
    dry_run: bool,

    /// Resolve the current term and print its subjects, then exit
    #[arg(long, conflicts_with = "dry_run")]
    list_subjects: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if !cli.subjects.is_empty() {
        config.catalog.subjects = cli.subjects.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.output.data_dir = dir.clone();
    }
    validate(&config).context("invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.list_subjects {
        handle_list_subjects(config).await?;
    } else {
        handle_harvest(config, cli.yes).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_harvest=info,warn"),
            1 => EnvFilter::new("catalog_harvest=debug,info"),
            2 => EnvFilter::new("catalog_harvest=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Catalog-Harvest Dry Run ===\n");

    println!("Catalog:");
    println!("  Root URL: {}", config.catalog.root_url);
    println!("  Year policy: {:?}", config.catalog.year_policy);
    println!("  Term policy: {:?}", config.catalog.term_policy);
    if config.catalog.subjects.is_empty() {
        println!("  Subjects: all");
    } else {
        println!("  Subjects: {}", config.catalog.subjects.join(", "));
    }

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);
    println!(
        "  Retries: {} ({}ms apart)",
        config.http.max_retries, config.http.retry_delay_ms
    );

    println!("\nCrawler:");
    println!(
        "  Max concurrent courses: {}",
        config.crawler.max_concurrent_courses
    );

    println!("\nOutput:");
    println!("  Data directory: {}", config.output.data_dir);
    println!("  Subject index: {}", config.output.subjects_file);
    println!("  Last updated: {}", config.output.last_updated_file);

    println!("\n✓ Configuration is valid");
}

/// Handles the --list-subjects mode: resolves and prints subjects only
async fn handle_list_subjects(config: Config) -> anyhow::Result<()> {
    let coordinator = Coordinator::new(config)?;

    match coordinator.resolve().await? {
        SubjectResolution::Resolved(subjects) => {
            println!("{} subjects:", subjects.len());
            for subject in subjects {
                println!("  {:<8} {}", subject.name, subject.link);
            }
            Ok(())
        }
        SubjectResolution::ResolutionFailed(reason) => {
            anyhow::bail!("catalog resolution failed: {}", reason)
        }
    }
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config, skip_prompt: bool) -> anyhow::Result<()> {
    if !skip_prompt {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        if !confirm_requests(&mut stdin.lock(), &mut stdout)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    tracing::info!("Harvesting from {}", config.catalog.root_url);
    let sink = JsonFileSink::new(&config.output);
    let coordinator = Coordinator::new(config)?;

    let summary = match coordinator.run(&sink).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            return Err(e.into());
        }
    };

    print_summary(&summary);

    if let RunStatus::ResolutionFailed(reason) = summary.status {
        anyhow::bail!("catalog resolution failed: {}", reason);
    }
    Ok(())
}

/// Warns about the request volume and asks the user to opt in
///
/// Returns true only for an explicit "y" or "yes" answer.
fn confirm_requests<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<bool> {
    writeln!(
        output,
        "WARNING: a full harvest sends thousands of requests to the catalog server."
    )?;
    write!(output, "Continue? [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
