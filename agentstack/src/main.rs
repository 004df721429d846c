//! Agentstack CLI
//!
//! Runs content through the processing pipeline and reports health,
//! configuration and metrics.

use agentstack::observability::init_tracing;
use agentstack::{AgentStackError, Orchestrator, Settings};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agentstack")]
#[command(about = "Parse, summarize and optimize text content", long_about = None)]
struct Cli {
    /// Path to a JSON settings file; AGENTSTACK_* variables apply on top
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process content and print the response as JSON
    Process {
        /// Content to process; read from stdin when omitted
        #[arg(long)]
        content: Option<String>,

        /// Request id to use instead of a generated one
        #[arg(long)]
        request_id: Option<String>,
    },

    /// Print the health snapshot of this process
    ///
    /// Counters start at zero in every invocation, so active_agents is 0.
    Health,

    /// Print the public settings view
    Config,

    /// Print the metrics exposition of this process
    ///
    /// Counters start at zero in every invocation; only the resource gauges
    /// carry live values. Embed the library to scrape a long-running process.
    Metrics,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_ref())?;
    init_tracing(&settings)?;

    match cli.command {
        Commands::Process {
            content,
            request_id,
        } => process_command(settings, content, request_id),
        Commands::Health => health_command(settings),
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&settings.public_view())?);
            Ok(())
        }
        Commands::Metrics => metrics_command(settings),
    }
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    let settings = match path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?
            .apply_env()?,
        None => Settings::from_env()?,
    };
    Ok(settings)
}

fn process_command(settings: Settings, content: Option<String>, request_id: Option<String>) -> Result<()> {
    let content = match content {
        Some(content) => content,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read content from stdin")?;
            buf
        }
    };

    let orchestrator = Orchestrator::new(settings)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let response = match runtime.block_on(orchestrator.run(&content, request_id)) {
        Ok(response) => response,
        Err(err @ AgentStackError::InvalidContent(_)) => {
            anyhow::bail!("invalid content: {err}");
        }
        Err(err) => return Err(err.into()),
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    if !response.success {
        tracing::warn!(request_id = %response.request_id, "Processing did not succeed");
    }
    Ok(())
}

fn health_command(settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;
    println!("{}", serde_json::to_string_pretty(&orchestrator.health())?);
    Ok(())
}

fn metrics_command(settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;
    print!("{}", orchestrator.metrics_text()?);
    Ok(())
}
