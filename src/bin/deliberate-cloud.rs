//! Deliberation agent on Groq or Cerebras cloud inference

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use deliberate_agent::cli::{AppOptions, run_cloud};

#[derive(Debug, Parser)]
#[command(name = "deliberate-cloud", version, about = "Deliberation agent on Groq or Cerebras cloud inference")]
struct Cli {
    /// Config file overriding the server launch, step limit and timeout
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // A missing .env is fine
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = AppOptions {
        config_path: cli.config,
    };
    let code = run_cloud(&options).await?;
    Ok(ExitCode::from(code))
}
