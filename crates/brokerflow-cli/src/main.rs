use std::path::PathBuf;

use anyhow::{Context, Result};
use brokerflow_core::{ExtractError, ExtractionResult};
use brokerflow_extract::{classify_and_extract, partition_results, process_batch};
use brokerflow_insights as insights;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod display;
mod ingest;

#[derive(Parser, Debug)]
#[command(name = "brokerflow")]
#[command(version, about = "Mortgage document extraction and portfolio insights")]
struct Cli {
    /// Directory holding the documents to process
    #[arg(
        short,
        long,
        env = "BROKERFLOW_DOCUMENTS",
        default_value = "./documents",
        global = true
    )]
    documents: PathBuf,

    /// File extension of documents to load
    #[arg(short, long, env = "BROKERFLOW_EXTENSION", default_value = "txt", global = true)]
    extension: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify and extract every document in the directory
    Process,

    /// Extract every document, then run the aggregate analyses
    Insights {
        #[arg(value_enum, default_value_t = InsightKind::All)]
        kind: InsightKind,
    },

    /// Classify and extract a single file
    Classify {
        /// Document file path
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InsightKind {
    Borrowers,
    Lenders,
    Properties,
    Portfolio,
    All,
}

#[derive(Serialize)]
struct ProcessOutput<'a> {
    results: &'a [ExtractionResult],
    errors: Vec<ErrorEntry<'a>>,
}

#[derive(Serialize)]
struct ErrorEntry<'a> {
    source_id: &'a str,
    error: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("brokerflow v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Process => {
            let (results, errors) = load_and_extract(&cli.documents, &cli.extension).await?;
            match cli.format {
                OutputFormat::Json => {
                    let output = ProcessOutput {
                        results: &results,
                        errors: errors
                            .iter()
                            .map(|e| ErrorEntry {
                                source_id: e.source_id(),
                                error: e.to_string(),
                            })
                            .collect(),
                    };
                    println!("{}", display::to_json(&output)?);
                }
                OutputFormat::Table => {
                    println!("{}", display::summary_table(&results)?);
                    eprint!("{}", display::skipped(&errors));
                }
            }
        }
        Command::Insights { kind } => {
            let (results, errors) = load_and_extract(&cli.documents, &cli.extension).await?;
            print_insights(kind, &results, cli.format)?;
            eprint!("{}", display::skipped(&errors));
        }
        Command::Classify { file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;
            let source_id = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string());
            let result = classify_and_extract(&source_id, &text);
            match cli.format {
                OutputFormat::Json => println!("{}", display::to_json(&result)?),
                OutputFormat::Table => print!("{}", display::card(&source_id, &result)?),
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn load_and_extract(
    dir: &std::path::Path,
    extension: &str,
) -> Result<(Vec<ExtractionResult>, Vec<ExtractError>)> {
    let docs = ingest::read_documents(dir, extension).await?;
    let (results, errors) = partition_results(process_batch(&docs));
    if !errors.is_empty() {
        warn!(
            unreadable = errors.len(),
            "some documents could not be processed"
        );
    }
    Ok((results, errors))
}

fn print_insights(kind: InsightKind, batch: &[ExtractionResult], format: OutputFormat) -> Result<()> {
    match kind {
        InsightKind::Borrowers => emit("Borrower Insights", &insights::borrower_profile(batch), format),
        InsightKind::Lenders => emit("Lender Performance", &insights::lender_performance(batch), format),
        InsightKind::Properties => emit("Property Market", &insights::property_market(batch), format),
        InsightKind::Portfolio => emit("Portfolio Insights", &insights::portfolio_insights(batch), format),
        InsightKind::All => emit("Full Report", &insights::full_report(batch), format),
    }
}

fn emit<T: Serialize>(title: &str, value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", display::to_json(value)?),
        OutputFormat::Table => print!("{}", display::card(title, value)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_insights_with_default_kind() {
        let cli = Cli::try_parse_from(["brokerflow", "insights"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Insights {
                kind: InsightKind::All
            }
        ));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(!cli.verbose);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "brokerflow",
            "insights",
            "lenders",
            "--format",
            "table",
            "--documents",
            "/tmp/docs",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Insights {
                kind: InsightKind::Lenders
            }
        ));
        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.documents, PathBuf::from("/tmp/docs"));
    }

    #[test]
    fn classify_requires_a_file() {
        assert!(Cli::try_parse_from(["brokerflow", "classify"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
