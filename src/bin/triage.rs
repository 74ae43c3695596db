//! # Patient Triage CLI
//!
//! Runs the fetch, classify, submit pipeline once, or serves it over HTTP.

use clap::{Parser, Subcommand};
use patient_triage::config::TriageConfig;
use patient_triage::logging::init_structured_logging;
use patient_triage::orchestration::AssessmentPipeline;
use patient_triage::web::{self, SubmissionResponse};
use serde_json::json;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Patient risk triage against the assessment API")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file (default: config/triage.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the pipeline once and print the result as JSON
    Run,

    /// Serve the submission trigger over HTTP
    Serve {
        /// Address to bind, overriding server.bind_address
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_structured_logging();

    let config = TriageConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run => {
            let pipeline = AssessmentPipeline::from_config(&config)?;

            match pipeline.process_and_submit_assessment().await {
                Ok(outcome) => {
                    let response = SubmissionResponse::from(outcome);
                    println!("{}", serde_json::to_string_pretty(&response)?);
                    info!("Pipeline run completed");
                }
                Err(e) => {
                    error!(error = %e, "Pipeline run failed");
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json!({
                            "success": false,
                            "error": e.to_string(),
                        }))?
                    );
                    process::exit(1);
                }
            }
        }
        Commands::Serve { bind } => {
            let bind_address = bind.unwrap_or_else(|| config.server.bind_address.clone());
            web::serve(&config, &bind_address).await?;
        }
    }

    Ok(())
}
