//! xbrl-compare CLI - structural diff of XBRL instance documents

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use xbrl_compare::{BasicComparisons, ComparisonTypes, Instance, InstanceComparer};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Structural comparison of XBRL instance documents
#[derive(ClapParser)]
#[command(name = "xbrl-compare")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two instance documents
    Diff {
        /// First instance, reported as (a)
        a: PathBuf,

        /// Second instance, reported as (b)
        b: PathBuf,

        /// Comma separated comparison types (basic, contexts, facts, domain-namespaces,
        /// units, entity, period, taxonomy-version, schema-reference, filing-indicators, all)
        #[arg(short, long, default_value = "all")]
        types: String,

        /// Comma separated basic checks (null-instances, schema-reference, units,
        /// filing-indicators, context-count, fact-count, domain-namespaces, entity, period, all)
        #[arg(short, long, default_value = "all")]
        basic: String,

        /// Output the report as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Summarize an instance document
    Show {
        /// Input file
        input: PathBuf,

        /// Output the parsed instance as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn read_instance(path: &Path) -> Result<Instance> {
    Instance::from_file(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Diff {
            a,
            b,
            types,
            basic,
            json,
        } => {
            let types: ComparisonTypes = types
                .parse()
                .with_context(|| format!("Invalid --types '{}'", types))?;
            let basics: BasicComparisons = basic
                .parse()
                .with_context(|| format!("Invalid --basic '{}'", basic))?;

            let start = Instant::now();
            let instance_a = read_instance(&a)?;
            let instance_b = read_instance(&b)?;
            let report = InstanceComparer::new()
                .with_types(types)
                .with_basics(basics)
                .compare(&instance_a, &instance_b);
            let elapsed = start.elapsed();

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.success {
                println!(
                    "{} {} and {} are equal",
                    "✓".green().bold(),
                    a.display(),
                    b.display()
                );
            } else {
                println!(
                    "{} {} and {} differ ({} messages)",
                    "✗".red().bold(),
                    a.display(),
                    b.display(),
                    report.messages.len()
                );
                for message in &report.messages {
                    let line = if message.starts_with("(a)") {
                        message.yellow()
                    } else if message.starts_with("(b)") {
                        message.cyan()
                    } else {
                        message.red()
                    };
                    println!("  {}", line);
                }
            }
            log::debug!("Compared in {:.2}ms", elapsed.as_secs_f64() * 1000.0);

            if !report.success {
                std::process::exit(1);
            }
        }

        Commands::Show { input, json } => {
            let instance = read_instance(&input)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&instance)?);
                return Ok(());
            }

            println!("{} {}", "✓".green().bold(), input.display());
            if let Some(reference) = &instance.schema_reference {
                println!("  Schema: {}", reference);
            }
            if let Some(version) = &instance.taxonomy_version {
                println!("  Taxonomy version: {}", version);
            }
            println!("  Contexts: {}", instance.contexts.len());
            println!("  Facts: {}", instance.facts.len());
            println!("  Units: {}", instance.units.len());
            println!(
                "  Filing indicators: {} ({} filed)",
                instance.filing_indicators.len(),
                instance.filed_indicators().count()
            );
            let namespaces = instance.used_domain_namespaces();
            println!("  Domain namespaces: {}", namespaces.len());
            for namespace in namespaces {
                println!("    {}", namespace);
            }
        }
    }

    Ok(())
}
