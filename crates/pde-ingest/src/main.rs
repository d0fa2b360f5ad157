//! PDE Ingest - Product data enrichment tool

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pde_common::logging::{init_logging, LogConfig, LogLevel};
use pde_ingest::config::IngestConfig;
use pde_ingest::enrich::Enricher;
use pde_ingest::pipeline;
use pde_ingest::rules::RuleConfig;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "pde-ingest")]
#[command(author, version, about = "Product data enrichment tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enrich a CSV, TSV or Excel product table
    Enrich {
        /// Input table
        #[arg(short, long)]
        input: PathBuf,

        /// Output table (default: enriched_<input> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON rule file replacing the built-in rules
        #[arg(short, long, env = "PDE_RULES_FILE")]
        rules: Option<PathBuf>,

        /// Rows to include in the report preview
        #[arg(short, long)]
        preview: Option<usize>,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective rule set as JSON
    Rules {
        /// JSON rule file to load instead of the built-in rules
        #[arg(short, long, env = "PDE_RULES_FILE")]
        rules: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let base = LogConfig::builder()
        .level(if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        })
        .log_file_prefix("pde-ingest")
        .build();

    // Environment variables take precedence over flags
    let log_config = match base.clone().merge_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: invalid logging configuration: {:#}", e);
            base.clone()
        },
    };
    let _guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Warning: invalid logging configuration: {:#}", e);
            init_logging(&base).unwrap_or_else(|e| {
                eprintln!("Warning: logging disabled: {:#}", e);
                None
            })
        },
    };

    if let Err(e) = run(cli.command) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Enrich {
            input,
            output,
            rules,
            preview,
            json,
        } => {
            let mut config = IngestConfig::load()?;
            if let Some(rows) = preview {
                config.preview_rows = rows;
            }
            if rules.is_some() {
                config.rules_file = rules;
            }
            config.validate()?;

            let rule_config = RuleConfig::load(config.rules_file.as_deref())
                .context("Failed to load rules")?;
            let enricher = Enricher::from_rules(&rule_config)?;

            info!(input = %input.display(), "Enriching");
            let report = pipeline::enrich_file(&input, output.as_deref(), &enricher, &config)
                .with_context(|| format!("Failed to enrich {}", input.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.summary());
            }
        },
        Command::Rules { rules } => {
            let rule_config = RuleConfig::load(rules.as_deref())?;
            // Patterns must compile before the rules are echoed
            Enricher::from_rules(&rule_config)?;
            println!("{}", serde_json::to_string_pretty(&rule_config)?);
        },
    }

    Ok(())
}
