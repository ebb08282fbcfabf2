//! Command-line entry point for the issue summariser.

use clap::Parser;
use copilot_adapter::{discover_copilot, CopilotCli};
use issue_summariser::config::{DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use issue_summariser::{render, CollaboratorStage, PersonaSource, SummariserConfig, SummariserError};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Turn a free-text issue description into `{version, title, prompt}` JSON.
///
/// The description is taken from the arguments, or read from stdin as
/// `{"message": "..."}` when no arguments are given.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the `copilot` executable (default: $COPILOT_ADAPTER_BIN, then PATH)
    #[arg(long, value_name = "PATH")]
    copilot_bin: Option<PathBuf>,

    /// Model requested from the agent
    #[arg(long, env = "ISSUE_SUMMARISER_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Seconds to wait for the agent's reply
    #[arg(long, env = "ISSUE_SUMMARISER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Persona document to use instead of the built-in one
    #[arg(long, env = "ISSUE_SUMMARISER_PERSONA", value_name = "PATH")]
    persona: Option<PathBuf>,

    /// Issue description; all words are joined with single spaces
    #[arg(trailing_var_arg = true)]
    message: Vec<String>,
}

impl Cli {
    fn config(&self) -> SummariserConfig {
        SummariserConfig {
            binary_path: self.copilot_bin.clone(),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            persona: self
                .persona
                .clone()
                .map_or(PersonaSource::Embedded, PersonaSource::File),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout is reserved for the result
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    match run(&cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<String, SummariserError> {
    let config = cli.config();

    let connect = || -> Result<CopilotCli, SummariserError> {
        let path = discover_copilot(config.binary_path.clone())
            .map_err(|e| SummariserError::collaborator(CollaboratorStage::Start, e))?;
        tracing::debug!(copilot = %path.display(), model = %config.model, "Using Copilot CLI");
        Ok(CopilotCli::new(path).with_config(config.copilot_config()))
    };

    let result = issue_summariser::run(
        &cli.message,
        std::io::stdin().lock(),
        &config.persona,
        connect,
    )
    .await?;
    render(&result)
}
