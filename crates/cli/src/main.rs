mod cli;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};

use rarity_core::{Config, RarityScore, TemporalWindowSet, WindowCount};
use rarity_engine::RarityEngine;
use rarity_rules::loader::{LoadStatus, RuleLoader};
use rarity_rules::schema::RuleDocument;
use rarity_rules::validation::validate_document;

use crate::cli::{CliArgs, Command, RulesAction};

fn main() -> Result<()> {
    rarity_core::config::load_dotenv();
    let mut config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.filter)),
        )
        .with_ansi(config.logging.ansi)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    if let Some(dir) = args.rules_dir {
        config.rules.rules_dir = Some(dir);
    }
    if args.strict {
        config.rules.strict = true;
    }
    config.log_summary();

    match args.command {
        Command::Classify { matches, total } => {
            let score = classify_counts(&config, matches, total)?;
            println!("{}", serde_json::to_string(&score)?);
        }
        Command::Narrate {
            input,
            with_rarity,
            pretty,
        } => {
            let engine = RarityEngine::from_config(&config)?;
            let windows = read_windows(input.as_deref())?;
            let value = if with_rarity {
                serde_json::to_value(engine.report(&windows))?
            } else {
                serde_json::to_value(engine.generate(&windows))?
            };
            let out = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            println!("{out}");
        }
        Command::Rules { action } => match action {
            RulesAction::Validate { dir } => {
                let dir = dir
                    .or(config.rules.rules_dir)
                    .context("no rules directory given and RULES_DIR is not set")?;
                validate_dir(&dir)?;
            }
            RulesAction::Init { dir } => init_dir(dir)?,
        },
    }

    Ok(())
}

/// Raw CLI counts go through the same normalization as JSON input.
fn classify_counts(config: &Config, matches: i64, total: i64) -> Result<RarityScore> {
    let engine = RarityEngine::from_config(config)?;
    let window = WindowCount::new(matches, total);
    Ok(engine.classifier().classify_window(&window))
}

fn read_windows(input: Option<&Path>) -> Result<TemporalWindowSet> {
    let raw = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read window set from stdin")?;
            buf
        }
    };
    TemporalWindowSet::from_json(&raw).context("invalid window set")
}

/// Print one line per file and fail if anything is broken.
fn validate_dir(dir: &Path) -> Result<()> {
    let mut loader = RuleLoader::new(dir.to_path_buf());
    let results = loader.load_all()?;
    let mut failures = 0usize;

    for result in &results {
        match &result.status {
            LoadStatus::Loaded { rule_id, .. } => {
                let Some(doc) = loader.get(rule_id) else {
                    continue;
                };
                let report = validate_document(doc);
                if report.valid {
                    println!("ok      {} ({})", result.path.display(), rule_id);
                } else {
                    failures += 1;
                    println!("invalid {} ({})", result.path.display(), rule_id);
                }
                for e in &report.errors {
                    println!("          error   {}: {}", e.path, e.message);
                }
                for w in &report.warnings {
                    println!("          warning {}: {}", w.path, w.message);
                }
            }
            LoadStatus::Failed { error } => {
                failures += 1;
                println!("failed  {}: {}", result.path.display(), error);
            }
            LoadStatus::Skipped { .. } => {}
        }
    }

    if failures > 0 {
        bail!("{failures} rule file(s) failed validation in {}", dir.display());
    }
    if loader.documents().is_empty() {
        warn!(dir = %dir.display(), "no rule documents found, built-in defaults apply");
    }
    // Catches cross-document problems the per-file pass does not see.
    RarityEngine::from_documents(loader.documents())?;
    info!(dir = %dir.display(), documents = loader.documents().len(), "rules valid");
    Ok(())
}

fn init_dir(dir: PathBuf) -> Result<()> {
    let mut loader = RuleLoader::new(dir);
    for doc in RuleDocument::builtin_defaults() {
        let path = loader
            .write_document(&doc)
            .with_context(|| format!("failed to write {}", doc.metadata().id))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}
