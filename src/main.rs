//! leadflow - CRM access and pipeline control service

use clap::Parser;
use leadflow_rs::server;
use std::process::ExitCode;

/// CRM access and pipeline control service
#[derive(Parser, Debug)]
#[command(name = "leadflow", version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "LEADFLOW_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let args = Args::parse();

    match server::builder::run_server(args.config.as_deref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
