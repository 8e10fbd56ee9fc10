// src/main.rs
// =============================================================================
// Entry point of the email-scout binary.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Install the tracing subscriber (logs go to stderr)
// 3. Read and validate the input object
// 4. Run the crawl and write the record exactly once
// 5. Exit with proper code (0 = record written, 1 = homepage unreachable, 2 = error)
//
// Rust concepts:
// - anyhow::Context: adds a readable message to I/O and JSON errors
// - Binding patterns (e @ Pattern): match a variant and keep the whole value
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use email_scout::links::KeywordSets;
use email_scout::{find_emails, FinderError, RawInput, Target};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

// Returns:
//   Ok(0) = record written
//   Ok(1) = every homepage form failed, run aborted without a record
//   Err   = bad input or I/O problem
async fn run(cli: Cli) -> Result<i32> {
    let input = read_input(&cli)?;
    let target = Target::from_input(input)?;
    let keywords = read_keywords(&cli)?;

    match find_emails(&target, cli.budget(), keywords).await {
        Ok(record) => {
            let json = serde_json::to_string_pretty(&record)?;
            match &cli.output {
                Some(path) => std::fs::write(path, json)
                    .with_context(|| format!("writing result to {}", path.display()))?,
                None => println!("{}", json),
            }
            tracing::info!(emails = record.emails.len(), "Result written");
            Ok(0)
        }
        Err(e @ FinderError::FallbackExhausted { .. }) => {
            tracing::error!("{}", e);
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}

fn read_input(cli: &Cli) -> Result<RawInput> {
    let raw = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading input from {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading input from stdin")?;
            buffer
        }
    };

    serde_json::from_str(&raw).context("input is not a JSON object with fullName and domain")
}

fn read_keywords(cli: &Cli) -> Result<KeywordSets> {
    match &cli.keywords {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading keywords from {}", path.display()))?;
            serde_json::from_str(&raw).context("keywords file is not valid JSON")
        }
        None => Ok(KeywordSets::default()),
    }
}
