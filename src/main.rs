use anyhow::{Context, Result};
use clap::Parser;
use critnorm::config::Config;
use critnorm::criteria::{analyze_criteria, CombinatorPolicy, Normalizer, Schema};
use serde_json::Value;
use std::io::{self, Read};
use std::path::PathBuf;

/// Normalize Waterline query criteria for OrientDB
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Criteria JSON file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Waterline schema JSON file
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail on malformed and/or/nor values instead of dropping them
    #[arg(long)]
    strict: bool,

    /// Print compact JSON
    #[arg(long)]
    compact: bool,

    /// Print a structural analysis instead of the normalized criteria
    #[arg(long)]
    analyze: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging (stdout is reserved for JSON output)
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    let mut config = match cli.config {
        Some(ref path) => {
            let mut config = Config::load_from(path)?;
            config.apply_env(std::env::var(critnorm::config::POLICY_ENV).ok().as_deref())?;
            config
        }
        None => Config::load()?,
    };
    if cli.strict {
        config.normalizer.combinator_policy = CombinatorPolicy::Strict;
    }
    if cli.compact {
        config.output.pretty = false;
    }

    let schema = match cli.schema {
        Some(ref path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read schema {}", path.display()))?;
            Schema::from_json_str(&text)?
        }
        None => Schema::default(),
    };

    let input = read_input(cli.input.as_deref())?;
    let criteria: Value = serde_json::from_str(&input).context("criteria is not valid JSON")?;

    let output = if cli.analyze {
        serde_json::to_value(analyze_criteria(&criteria, &schema))?
    } else {
        Normalizer::new(&schema)
            .with_policy(config.normalizer.combinator_policy)
            .normalize_criteria(criteria)?
    };

    let rendered = if config.output.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");

    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read criteria {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read criteria from stdin")?;
            Ok(buf)
        }
    }
}
