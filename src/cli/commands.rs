use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::cli::report::{format_scan_summary, format_session_report};
use crate::config::{Config, load_config};
use crate::pipeline::AppendPipeline;
use crate::scanner::scan_sessions;
use crate::storage::{ProcessedSessions, load_analysis, save_analysis};
use crate::utils::{format_path_with_tilde, get_claude_dir};

#[derive(Parser)]
#[command(name = "goldfish")]
#[command(version = "0.1.0")]
#[command(about = "Classify Claude Code sessions and append them to project memory", long_about = None)]
pub struct Cli {
    /// Path to config.yaml (default: $GOLDFISH_HOME/.goldfish/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract and classify sessions, writing session-analysis.json
    Scan(ScanArgs),
    /// Append newly classified sessions to project large.md and inbox.md
    Append,
    /// Scan, then append
    Sync(ScanArgs),
}

#[derive(Args)]
pub struct ScanArgs {
    /// Claude directory to scan (default: ~/.claude)
    #[arg(long)]
    pub claude_dir: Option<PathBuf>,

    /// Print a report block for every kept session
    #[arg(long)]
    pub report: bool,
}

/// Run the parsed command line
pub fn execute(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = load_config(cli.config.as_deref())?;
    match command {
        Commands::Scan(args) => scan(&config, &args),
        Commands::Append => append(&config),
        Commands::Sync(args) => {
            scan(&config, &args)?;
            println!();
            append(&config)
        }
    }
}

fn scan(config: &Config, args: &ScanArgs) -> Result<()> {
    let claude_dir = match &args.claude_dir {
        Some(dir) => dir.clone(),
        None => get_claude_dir()?,
    };
    println!("Scanning {}", format_path_with_tilde(&claude_dir));

    let outcome = scan_sessions(&claude_dir, config)?;
    println!("Found {} session files to analyze", outcome.discovered);

    if args.report {
        for session in &outcome.sessions {
            println!("{}\n", format_session_report(session));
        }
    }

    if outcome.skipped_metadata > 0 || outcome.skipped_empty > 0 {
        println!(
            "Skipped: {} metadata-only, {} empty/abandoned",
            outcome.skipped_metadata, outcome.skipped_empty
        );
    }
    if outcome.failed > 0 {
        println!("Failed to read: {} session files", outcome.failed);
    }
    println!("{}", format_scan_summary(&outcome.sessions));

    let analysis_path = config.analysis_path();
    save_analysis(&analysis_path, &outcome.sessions)?;
    println!(
        "\nSaved {} sessions to {}",
        outcome.sessions.len(),
        format_path_with_tilde(&analysis_path)
    );

    Ok(())
}

fn append(config: &Config) -> Result<()> {
    let analysis_path = config.analysis_path();
    let Some(sessions) = load_analysis(&analysis_path)? else {
        println!(
            "No session-analysis.json found at {}. Run `goldfish scan` first.",
            format_path_with_tilde(&analysis_path)
        );
        return Ok(());
    };
    println!("Found {} total sessions", sessions.len());

    let mut processed = ProcessedSessions::load(&config.processed_path())?;
    println!("Already processed: {} sessions", processed.len());

    let report = AppendPipeline::new(config).run(&sessions, &mut processed);
    let summary = report.summary();
    if summary.total() == summary.skipped_already_processed {
        println!("\nNo new sessions to process.");
        return Ok(());
    }

    println!();
    for outcome in report.notable() {
        println!("{}", outcome);
    }
    println!("\n{}", summary);
    if summary.appended > 0 {
        println!("\nRun /gfsave to generate quality summaries.");
    }

    Ok(())
}
