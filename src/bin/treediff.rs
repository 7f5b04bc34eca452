//! # treediff CLI
//!
//! Compares two directory trees and opens every changed file pair in a
//! side-by-side diff viewer.
//!
//! ## Usage
//! ```bash
//! # Ask for both directories, relative to the current one
//! treediff
//!
//! # Compare two directories directly
//! treediff release-1.0 release-1.1
//!
//! # Match files by relative path and use a wider viewer
//! treediff old new --by-path --width 120
//!
//! # Never stop for input (no pauses, install without asking)
//! treediff old new --yes --install manual
//! ```

use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::*;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use treediff::{
    AptProvisioner, AutoPrompter, CompareOptions, CompareReport, ExternalViewer, KeyMode,
    ManualProvisioner, Prompter, TerminalPrompter, ToolProvisioner, TreeComparatorBuilder,
    TreeDiffError,
};

/// treediff - open changed files of two directory trees side by side
#[derive(Parser)]
#[command(name = "treediff")]
#[command(version)]
#[command(about = "Compare two directory trees and view every changed file side by side")]
#[command(long_about = None)]
struct Cli {
    /// First directory, relative to the current one (prompted when omitted)
    left: Option<String>,

    /// Second directory, relative to the current one (prompted when omitted)
    right: Option<String>,

    /// Side-by-side viewer program
    #[arg(long, default_value = treediff::viewer::DEFAULT_VIEWER)]
    viewer: String,

    /// Column width passed to the viewer
    #[arg(short = 'W', long, default_value_t = treediff::viewer::DEFAULT_WIDTH)]
    width: u16,

    /// Match files by path relative to each root instead of bare file name
    #[arg(long)]
    by_path: bool,

    /// How a missing viewer gets installed
    #[arg(long, value_enum, default_value = "apt")]
    install: InstallMode,

    /// Do not stop for input: skip pauses and confirm the install
    #[arg(short, long)]
    yes: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum InstallMode {
    /// sudo apt-get install
    Apt,
    /// Print instructions only
    Manual,
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Disable colors if needed
    if std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli) {
        let message = match e.downcast_ref::<TreeDiffError>() {
            Some(err) => err.user_message(),
            None => format!("{:#}", e),
        };
        eprintln!("{}: {}", "Error".red().bold(), message);
        std::process::exit(1);
    }
}

/// Main command runner
fn run(cli: Cli) -> anyhow::Result<()> {
    let base = std::env::current_dir().context("cannot determine the current directory")?;

    let provisioner: Box<dyn ToolProvisioner> = match cli.install {
        InstallMode::Apt => Box::new(AptProvisioner),
        InstallMode::Manual => Box::new(ManualProvisioner),
    };

    let options = CompareOptions {
        key_mode: if cli.by_path {
            KeyMode::RelativePath
        } else {
            KeyMode::FileName
        },
        clear_screen: !cli.yes && std::io::stdout().is_terminal(),
        tool: cli.viewer.clone(),
    };
    let viewer = ExternalViewer::new(cli.viewer, cli.width);

    let prompter: Box<dyn Prompter> = if cli.yes {
        Box::new(AutoPrompter::yes())
    } else {
        Box::new(TerminalPrompter)
    };

    let mut comparator = TreeComparatorBuilder::new()
        .options(options)
        .build(viewer, prompter);

    let report = comparator.run_session(
        provisioner.as_ref(),
        &base,
        cli.left.as_deref(),
        cli.right.as_deref(),
    )?;

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &CompareReport) {
    println!();
    if report.viewed == 0 {
        println!(
            "{} {} shared files, none changed",
            "✓".green().bold(),
            report.checked.to_string().cyan()
        );
    } else {
        println!(
            "{} {} of {} shared files changed",
            "≠".yellow().bold(),
            report.viewed.to_string().yellow(),
            report.checked.to_string().cyan()
        );
    }

    if report.only_left > 0 || report.only_right > 0 {
        println!(
            "  Not compared: {} only in first, {} only in second",
            report.only_left.to_string().dimmed(),
            report.only_right.to_string().dimmed()
        );
    }
}
