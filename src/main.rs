use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use kira_pathoscore::guard::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_MAX_VARIANTS, DEFAULT_SCORE_TIMEOUT_MS,
    DEFAULT_SUGGESTION_TIMEOUT_MS, ServiceConfig,
};
use kira_pathoscore::input::{InputError, read_request_body};
use kira_pathoscore::model::linear::{TrainOptions, synthetic_dataset, train};
use kira_pathoscore::model::params::{DEFAULT_MODEL_DIR, ModelError, save_model};
use kira_pathoscore::{ApiResponse, ModelPaths, Pipeline, Service, logging};

#[derive(Debug, Parser)]
#[command(
    name = "kira-pathoscore",
    version,
    about = "Variant pathogenicity scoring and therapy suggestions"
)]
struct Cli {
    #[arg(long, global = true, env = "KIRA_PATHOSCORE_MODEL_DIR", default_value = DEFAULT_MODEL_DIR)]
    model_dir: PathBuf,

    #[arg(long, global = true, default_value_t = DEFAULT_MAX_VARIANTS)]
    max_variants: usize,

    #[arg(long, global = true, default_value_t = DEFAULT_SCORE_TIMEOUT_MS)]
    score_timeout_ms: u64,

    #[arg(long, global = true, default_value_t = DEFAULT_SUGGESTION_TIMEOUT_MS)]
    suggestion_timeout_ms: u64,

    #[arg(long, global = true, default_value_t = DEFAULT_CACHE_TTL_SECS)]
    cache_ttl_secs: u64,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
enum Command {
    /// Score variants from a JSON body `{"variants": [...]}`.
    Score {
        #[arg(long, default_value = "-")]
        input: PathBuf,
    },
    /// Rank therapy suggestions for a JSON body `{"variants": [...]}`.
    Suggest {
        #[arg(long, default_value = "-")]
        input: PathBuf,
    },
    /// Train the linear model on synthetic data and save it.
    Train {
        #[arg(long, default_value_t = 800)]
        samples: usize,
        #[arg(long, default_value_t = 1500)]
        epochs: usize,
        #[arg(long, default_value_t = 0.05)]
        learning_rate: f64,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let paths = ModelPaths::new(&cli.model_dir);
    let config = service_config(&cli);

    match cli.command {
        Command::Score { ref input } | Command::Suggest { ref input } => {
            let body = read_request_body(input)?;
            let suggest = matches!(cli.command, Command::Suggest { .. });
            let service = Service::new(Arc::new(Pipeline::new(&paths)), config);
            let response = block_on_detached(async {
                if suggest {
                    service.suggestions(&body).await
                } else {
                    service.infer(&body).await
                }
            })?;
            print_response(&response)
        }
        Command::Train {
            samples,
            epochs,
            learning_rate,
            seed,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            tracing::info!(samples, epochs, learning_rate, "training linear model");
            let (x, y) = synthetic_dataset(samples, &mut rng);
            let params = train(
                &x,
                &y,
                TrainOptions {
                    epochs,
                    learning_rate,
                },
                &mut rng,
            )?;
            let path = paths.linear_model();
            save_model(&path, &params)?;
            println!("{}", serde_json::to_string_pretty(&params)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

// Work abandoned after a deadline must not keep the process alive.
fn block_on_detached<F: Future>(fut: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let output = runtime.block_on(fut);
    runtime.shutdown_background();
    Ok(output)
}

fn service_config(cli: &Cli) -> ServiceConfig {
    ServiceConfig {
        max_variants: cli.max_variants,
        score_timeout: Duration::from_millis(cli.score_timeout_ms),
        suggestion_timeout: Duration::from_millis(cli.suggestion_timeout_ms),
        cache_ttl: Duration::from_secs(cli.cache_ttl_secs),
    }
}

fn print_response(response: &ApiResponse) -> Result<ExitCode, CliError> {
    println!("{}", serde_json::to_string_pretty(&response.body)?);
    if response.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!(status = response.status, "request did not succeed");
        Ok(ExitCode::FAILURE)
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
