//! stepwise CLI - demo driver for the resumable step pipeline.
//!
//! Runs a built-in three-step pipeline (load → scale → fit a least-squares
//! line) so the resume behavior can be exercised from the command line:
//! run it once, then re-run with `--start-from` and watch earlier steps
//! load from their artifacts instead of recomputing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use stepwise::{
    BoxError, LogScope, Outputs, Pipeline, PipelineConfig, ProgressLogger, StepDef, TracingLogger,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "stepwise")]
#[command(version)]
#[command(about = "Resumable step-based pipeline runner with durable artifacts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML pipeline configuration file (optional)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo pipeline
    Run {
        /// Trust artifacts for steps below this id instead of recomputing
        #[arg(long, default_value = "0")]
        start_from: u32,
    },

    /// Show which steps have persisted outputs
    Outputs,

    /// Show example configuration
    Example,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

fn print_example_config() {
    let example = r#"# stepwise configuration file

# Artifact filename prefix; with version below, scopes every artifact
# as {name}-v{version}-step{id}.json
name = "classify-data"

# Folder for artifact files (created if missing)
storage_dir = ".artifacts"

# Bump to invalidate all prior artifacts without deleting them
version = 1
"#;
    println!("{example}");
}

/// Synthetic points on a known line, the stand-in for a real data source.
fn load_dataset(_outputs: &Outputs) -> std::result::Result<Value, BoxError> {
    info!("Loading dataset");
    let xs: Vec<f64> = (0..50).map(|i| i as f64 / 5.0).collect();
    let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
    Ok(json!({ "xs": xs, "ys": ys }))
}

/// Standardize the x values to zero mean and unit variance.
fn scale_features(outputs: &Outputs) -> std::result::Result<Value, BoxError> {
    info!("Applying standard scaler");
    let xs: Vec<f64> = serde_json::from_value(outputs["load"]["xs"].clone())?;

    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let variance = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    let scaled: Vec<f64> = xs.iter().map(|x| (x - mean) / std_dev).collect();

    Ok(json!({ "mean": mean, "std_dev": std_dev, "scaled": scaled }))
}

/// Fit a least-squares line through the scaled features.
fn fit_model(outputs: &Outputs) -> std::result::Result<Value, BoxError> {
    info!("Training model");
    let xs: Vec<f64> = serde_json::from_value(outputs["scale"]["scaled"].clone())?;
    let ys: Vec<f64> = serde_json::from_value(outputs["load"]["ys"].clone())?;

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let covariance: f64 = xs
        .iter()
        .zip(&ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    let variance: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
    let slope = covariance / variance;
    let intercept = mean_y - slope * mean_x;

    Ok(json!({ "slope": slope, "intercept": intercept }))
}

fn demo_steps() -> Vec<StepDef> {
    vec![
        StepDef::new(0, "load", load_dataset),
        StepDef::new(1, "scale", scale_features),
        StepDef::new(2, "fit", fit_model),
    ]
}

fn load_config(cli_config: &Option<PathBuf>) -> Result<PipelineConfig> {
    match cli_config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {path:?}")),
        None => Ok(PipelineConfig::new("classify-data", ".artifacts")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Example => {
            print_example_config();
            return Ok(());
        }

        Commands::Run { start_from } => {
            let config = load_config(&cli.config)?;
            let pipeline = Pipeline::new(config, demo_steps())?;
            let logger: Arc<dyn ProgressLogger> = Arc::new(TracingLogger);

            let scope = LogScope::start(
                format!("pipeline '{}'", pipeline.name()),
                Arc::clone(&logger),
            );
            pipeline.run(start_from)?;
            scope.finish();

            let outputs = pipeline.load_outputs()?;
            println!("\n=== Pipeline Complete ===");
            println!("Name:     {}", pipeline.name());
            println!("Version:  {}", pipeline.version());
            println!("Storage:  {}", pipeline.storage_dir().display());
            println!("Steps:    {}", outputs.len());
            if let Some(model) = outputs.get("fit") {
                println!("Model:    {model}");
            }
        }

        Commands::Outputs => {
            let config = load_config(&cli.config)?;
            let pipeline = Pipeline::new(config, demo_steps())?;
            let outputs = pipeline.load_outputs()?;

            println!("Found outputs for {} steps", outputs.len());
            for step in pipeline.steps() {
                let status = if outputs.contains_key(&step.name) {
                    "persisted"
                } else {
                    "missing"
                };
                println!("  #{} {:<8} {:<9} {}", step.step_id, step.name, status, step.filename);
            }
        }
    }

    Ok(())
}
