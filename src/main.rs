use anyhow::Result;
use clap::Parser;
use idea_forge::{
    config::{self, CONFIG_PATH_ENV},
    orchestrator::{Orchestrator, Outcome},
    presentation::TerminalSink,
};
use std::{path::PathBuf, sync::Arc};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

const QUIT_COMMAND: &str = ":q";

#[derive(Parser, Debug)]
#[command(name = "idea-forge", version, about)]
struct Cli {
    /// Topic to generate an idea for. Starts an interactive prompt when omitted.
    #[arg(num_args = 1.., trailing_var_arg = true)]
    topic: Vec<String>,

    /// Path to the YAML configuration file
    #[arg(long, short, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Backend endpoint, overrides the configuration file
    #[arg(long)]
    endpoint: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            validate_log_level(level)?;
            EnvFilter::try_new(level)?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging setup)
    let mut config = match config::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(endpoint) = cli.endpoint {
        config.backend.endpoint = endpoint;
        if let Err(e) = config.validate() {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
    if cli.no_color {
        config.display.color = false;
    }

    if let Err(e) = init_tracing(&config.logs.level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    info!("Starting idea-forge against {}", config.backend.endpoint);

    let sink = Arc::new(TerminalSink::stdio(config.display.color));
    let orchestrator = Orchestrator::from_config(&config.backend, sink.clone())?;

    if !cli.topic.is_empty() {
        let outcome = orchestrator.submit(&cli.topic.join(" ")).await;
        sink.render();
        if !outcome.is_generated() {
            std::process::exit(1);
        }
        return Ok(());
    }

    run_interactive(&orchestrator, &sink).await
}

async fn run_interactive(orchestrator: &Orchestrator, sink: &TerminalSink) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut prompt = tokio::io::stderr();

    loop {
        prompt.write_all(b"topic> ").await?;
        prompt.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim() == QUIT_COMMAND {
            break;
        }

        let outcome = orchestrator.submit(&line).await;
        if !matches!(outcome, Outcome::Ignored) {
            sink.render();
        }
    }

    info!("Input closed, exiting");
    Ok(())
}
