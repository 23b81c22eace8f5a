//! Abbrevcheck CLI - Verify command-abbreviation tables
//!
//! This is the main entry point for the abbrevcheck command-line interface.
//! Abbrevcheck checks that the short spellings of a command-line system's
//! commands still expand to the canonical commands they are supposed to.
//!
//! ## Commands
//!
//! ### `verify` - Verify abbreviation tables
//! Discover mapping-table files under the given paths, resolve every
//! abbreviation through an external resolver command, and report every
//! entry that no longer expands correctly. Exits non-zero if any table
//! failed.
//!
//! ### `list` - List discovered tables
//! Show the mapping-table files that would be verified, with entry counts.
//!
//! ## Resolver command
//!
//! The resolver is a shell command template; every `{}` is replaced with the
//! (quoted) abbreviation, and its stdout is taken as the canonical form:
//!
//! ```bash
//! abbrevcheck verify abbrevs/ --resolver "lldb --batch -o 'help {}'"
//! ```
//!
//! ## Configuration
//!
//! Defaults (table paths, ignore patterns, resolver command) come from a
//! `config.yaml` in the current directory; CLI arguments override it.
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Control logging verbosity (e.g., `info`, `debug`, `trace`)

use abbrevcheck::{
    config::Config,
    logging::init_logging,
    resolver::AbbreviationResolver,
    table::{compile_ignore_patterns, discover_tables, MappingTable},
    ProcessInterpreter,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Verify command-abbreviation tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify abbreviation tables against a resolver command
    Verify {
        /// Table files or directories (uses config defaults if none specified)
        paths: Vec<PathBuf>,

        /// Resolver command template; "{}" is replaced with the abbreviation
        #[arg(short, long)]
        resolver: Option<String>,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Show every resolution, not just failures
        #[arg(short, long)]
        verbose: bool,
    },

    /// List discovered table files with entry counts
    List {
        /// Table files or directories (uses config defaults if none specified)
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_logging(Some("info"));

    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();

    match cli.command {
        Some(Commands::Verify { paths, resolver, format, verbose }) => {
            let tables = gather_tables(&config, paths)?;

            let resolver_command = resolver.unwrap_or_else(|| config.verify.resolver.clone());
            if resolver_command.is_empty() {
                anyhow::bail!("No resolver command given (use --resolver or set verify.resolver in config.yaml)");
            }
            let interpreter = ProcessInterpreter::new(resolver_command);
            let checker = AbbreviationResolver::new().with_verbose(verbose);

            let mut all_passed = true;
            let mut reports = Vec::new();

            for path in &tables {
                info!("Verifying {}", path.display());
                let table = MappingTable::load(path)?;
                let report = checker.verify(&interpreter, &table);
                all_passed &= report.passed;
                reports.push((path.clone(), report));
            }

            match format.as_str() {
                "json" => {
                    let listing: Vec<_> = reports
                        .iter()
                        .map(|(path, report)| {
                            serde_json::json!({
                                "table": path.display().to_string(),
                                "report": report,
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&listing)?);
                }
                _ => {
                    for (path, report) in &reports {
                        println!("\n{}", path.display());
                        report.print_summary(verbose);
                    }
                }
            }

            if !all_passed {
                std::process::exit(1);
            }
        }

        Some(Commands::List { paths }) => {
            let tables = gather_tables(&config, paths)?;
            for path in &tables {
                let table = MappingTable::load(path)?;
                println!("{}: {} mapping(s)", path.display(), table.len());
            }
        }

        None => {
            // No command specified, show help
            println!("Abbrevcheck - verify command-abbreviation tables");
            println!("\nUse --help for usage information");
        }
    }

    Ok(())
}

/// Discover table files from CLI paths, falling back to config defaults.
fn gather_tables(config: &Config, paths: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    let paths_to_search = if paths.is_empty() {
        config
            .verify
            .default_paths
            .iter()
            .map(PathBuf::from)
            .collect()
    } else {
        paths
    };

    let ignore = compile_ignore_patterns(&config.verify.ignore_patterns)?;
    let tables = discover_tables(&paths_to_search, &ignore)?;
    if tables.is_empty() {
        anyhow::bail!("No mapping tables found");
    }
    Ok(tables)
}
