//! gsearch CLI - run the Google searcher from the command line
//!
//! Prints the batch the searcher delivers. An unreachable or misbehaving
//! endpoint prints zero results, the same way an aggregator would see it.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use colored::*;
use gsearch::{
    providers::{GoogleConfig, GoogleProvider},
    utils::debug,
    Diagnostic, SearchResult, Searcher,
};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "gsearch")]
#[command(about = "Google search adapter CLI")]
#[command(version)]
struct Cli {
    /// Search query
    query: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Enable debug output and print failure diagnostics
    #[arg(short, long)]
    debug: bool,

    /// Override the search endpoint
    #[arg(long, env = "GSEARCH_BASE_URL")]
    base_url: Option<String>,

    /// Results requested per search (1-8)
    #[arg(long, default_value = "8")]
    page_size: u8,

    /// HTTP client timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
    Simple,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "gsearch=debug" } else { "gsearch=warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if cli.query.trim().is_empty() {
        bail!("A search query is required");
    }

    let mut config = GoogleConfig {
        page_size: cli.page_size,
        timeout_ms: cli.timeout_ms,
        ..Default::default()
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let mut provider =
        GoogleProvider::with_config(config).context("invalid search configuration")?;

    let (diag_tx, mut diag_rx) = mpsc::unbounded_channel();
    if cli.debug {
        provider = provider
            .with_debug(debug::debug_all())
            .with_diagnostics(diag_tx);
    } else {
        drop(diag_tx);
    }

    let (tx, mut rx) = mpsc::channel(1);
    provider.search(&cli.query, tx).await;
    let results = rx.recv().await.unwrap_or_default();

    display_results(&results, &cli.format, provider.name())?;

    let mut diagnostics = Vec::new();
    while let Ok(diagnostic) = diag_rx.try_recv() {
        diagnostics.push(diagnostic);
    }
    display_diagnostics(&diagnostics);

    Ok(())
}

fn display_results(
    results: &[SearchResult],
    format: &OutputFormat,
    engine: &str,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        }
        OutputFormat::Simple => {
            for (i, result) in results.iter().enumerate() {
                println!("{}. {}", i + 1, result.title);
                println!("   {}", result.link);
                if !result.content.is_empty() {
                    println!("   {}", result.content);
                }
                println!();
            }
        }
        OutputFormat::Table => {
            println!("{} {}", "Search Results from".bold(), engine.bold().blue());
            println!("{}", "-".repeat(80).dimmed());

            for (i, result) in results.iter().enumerate() {
                println!("{}. {}", (i + 1).to_string().bold(), result.title.bold());
                println!("   {}", result.link.blue().underline());

                if !result.content.is_empty() {
                    let truncated: String = if result.content.chars().count() > 200 {
                        let head: String = result.content.chars().take(200).collect();
                        format!("{head}...")
                    } else {
                        result.content.clone()
                    };
                    println!("   {}", truncated.italic());
                }

                println!();
            }

            println!("{} {}", "Total results:".bold(), results.len().to_string().bold());
        }
    }

    Ok(())
}

fn display_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    eprintln!();
    eprintln!("{}", "Diagnostics:".bold().yellow());
    for diagnostic in diagnostics {
        eprintln!(
            "  {} [{}] {}",
            diagnostic.engine.bold(),
            diagnostic.stage.to_string().red(),
            diagnostic.error
        );
    }
}
