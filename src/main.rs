//! CLI entry point for interface-organizer
//!
//! Reads an interface file, prints it reorganised by menu, optionally
//! reports key conflicts, and optionally writes the result back out.

use anyhow::Context;
use clap::Parser;
use colored::*;
use interface_organizer::config::{self, InterfaceFile, OrganizerConfig};
use interface_organizer::core::{parse_document, serialize, write_report, Document};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "interface-organizer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to interface.txt (usually in data/init/)
    interface_file: PathBuf,

    /// Check for conflicting key bindings
    #[arg(short, long)]
    check_conflicts: bool,

    /// Do not print organised key bindings to the terminal
    #[arg(short, long)]
    quiet: bool,

    /// Replace the interface file contents with the organised contents
    #[arg(short, long)]
    replace: bool,

    /// Write organised key bindings to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to the menu map (binding name → menu)
    #[arg(short, long, default_value = config::DEFAULT_MENU_MAP)]
    menu_map: PathBuf,

    /// Menu to write first (repeatable, overrides the menu map's priority)
    #[arg(short, long = "priority", value_name = "MENU")]
    priority: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let menu_map_path = config::expand_path(&cli.menu_map)?;
    let organizer_config = OrganizerConfig::load(&menu_map_path)
        .with_context(|| format!("Failed to load menu map {}", menu_map_path.display()))?;
    let lookup = organizer_config.lookup()?;

    let interface_path = config::expand_path(&cli.interface_file)?;
    let reader = BufReader::new(
        File::open(&interface_path)
            .with_context(|| format!("Failed to read {}", interface_path.display()))?,
    );
    let document = parse_document(reader, &lookup)
        .with_context(|| format!("Failed to parse {}", interface_path.display()))?;

    tracing::info!(
        "Parsed {} bindings across {} menus",
        document.total_bindings(),
        document.menus().count()
    );

    let priority = if cli.priority.is_empty() {
        &organizer_config.priority
    } else {
        &cli.priority
    };
    let organized = serialize(&document, priority.as_slice());

    if !cli.quiet {
        println!("{}", printable(&organized));
    }

    if cli.check_conflicts {
        report_conflicts(&organizer_config, &document)?;
    }

    if let Some(output) = &cli.output {
        let output = config::expand_path(output)?;
        config::write_organized(&output, &organized)?;
        eprintln!("{} Wrote {}", "✓".green(), output.display());
    }

    if cli.replace {
        let backup = InterfaceFile::new(interface_path.clone())?.replace(&organized)?;
        eprintln!(
            "{} Replaced {} (backup: {})",
            "✓".green(),
            interface_path.display(),
            backup.display()
        );
    }

    Ok(())
}

/// Print the conflict report for every known menu
fn report_conflicts(organizer_config: &OrganizerConfig, document: &Document) -> anyhow::Result<()> {
    let report = organizer_config.detector().find_document_conflicts(document);
    write_report(&mut std::io::stdout().lock(), &report)?;
    Ok(())
}

/// ASCII-only view of the output for the terminal
fn printable(bytes: &[u8]) -> String {
    bytes
        .iter()
        .filter(|b| b.is_ascii())
        .map(|b| *b as char)
        .collect()
}
