use crate::{commands::Commands, error::CliError};
use clap::Parser;
use engine_config::config::RunConfig;
use engine_core::{
    factory::{PgDestinationProvider, create_source},
    orchestrator::{OrchestratorParams, PipelineOrchestrator},
    sink::EventSink,
    transform::IdentityTransform,
};
use model::execution::result::MultiTaskTransferResult;
use std::sync::Arc;
use tracing::Level;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "tablift", version = "0.1.0", about = "Task-driven tabular data transfer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, mock } => {
            let mut config = RunConfig::from_file(&config)?;
            if mock {
                config.use_mock_source = true;
            }
            config.validate()?;

            let result = run_transfer(config).await?;
            output::print_summary(&result);
            if !result.is_success {
                std::process::exit(1);
            }
        }
        Commands::Tasks { config, json } => {
            let config = RunConfig::from_file(&config)?;
            if json {
                let rendered = serde_json::to_string_pretty(&config.tasks)
                    .map_err(CliError::JsonSerialize)?;
                println!("{rendered}");
            } else {
                output::print_tasks(&config);
            }
        }
    }

    Ok(())
}

async fn run_transfer(config: RunConfig) -> Result<MultiTaskTransferResult, CliError> {
    let source = create_source(&config)?;
    let config = Arc::new(config);
    let (sink, mut rx) = EventSink::channel();

    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            output::print_event(&event);
        }
    });

    let orchestrator = PipelineOrchestrator::new(OrchestratorParams {
        config,
        source,
        destinations: Arc::new(PgDestinationProvider),
        transform: Arc::new(IdentityTransform),
        sink,
    });

    let result = orchestrator.run().await;

    // Dropping the orchestrator closes the event channel so the printer
    // drains and exits.
    drop(orchestrator);
    let _ = printer.await;

    Ok(result)
}
