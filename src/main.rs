//! crossover CLI entrypoint
//! Parses command-line arguments and runs the converter.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use crossover::application::ConvertUseCase;
use crossover::core::{Config, ConfigOverrides};
use crossover::infrastructure::default_dispatcher;
use crossover::infrastructure::output::FileSystemOutputService;
use crossover::infrastructure::source::CompositeSourceReader;
use std::path::PathBuf;
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crossover")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Convert a route configuration into an API description document
    Convert(ConvertArgs),
    /// List the supported input and output formats
    Formats,
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Converter config file (TOML, YAML or JSON)
    #[arg(long, env = "CROSSOVER_CONFIG")]
    config: Option<PathBuf>,
    /// Path or URL of the route configuration to read
    #[arg(short, long, env = "CROSSOVER_INPUT")]
    input: Option<String>,
    /// Path of the document to write, `-` for stdout
    #[arg(short, long, env = "CROSSOVER_OUTPUT")]
    output: Option<String>,
    /// Input format tag [default: js:axios]
    #[arg(long, env = "CROSSOVER_INPUT_TYPE")]
    input_type: Option<String>,
    /// Output format tag [default: swagger]
    #[arg(long, env = "CROSSOVER_OUTPUT_TYPE")]
    output_type: Option<String>,
    /// Title of the emitted document
    #[arg(long, env = "CROSSOVER_TITLE")]
    title: Option<String>,
    /// Version of the emitted document
    #[arg(long, env = "CROSSOVER_API_VERSION")]
    api_version: Option<String>,
}

impl ConvertArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input_path: self.input.clone(),
            output_path: self.output.clone(),
            input_type: self.input_type.clone(),
            output_type: self.output_type.clone(),
            title: self.title.clone(),
            api_version: self.api_version.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging, INFO unless RUST_LOG says otherwise; stdout is reserved for documents
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::INFO.into()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Convert(args) => convert(args).await?,
        Commands::Formats => list_formats()?,
    }
    Ok(())
}

async fn convert(args: &ConvertArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => Config::default(),
    };
    let config = config.apply(args.overrides());
    debug!(?config, "Resolved configuration");

    let reader = CompositeSourceReader::new().context("Failed to create source reader")?;
    let dispatcher = Arc::new(default_dispatcher(Arc::new(reader)));
    let use_case = ConvertUseCase::new(dispatcher, Arc::new(FileSystemOutputService::new()));

    let input = config.input_path.clone();
    let response = use_case
        .execute(config)
        .await
        .with_context(|| format!("Failed to convert '{input}'"))?;

    info!(
        "✅ Wrote {} endpoint(s) for {} function(s) to {}",
        response.endpoints_count, response.functions_count, response.output_path
    );
    Ok(())
}

fn list_formats() -> anyhow::Result<()> {
    let reader = CompositeSourceReader::new().context("Failed to create source reader")?;
    let dispatcher = default_dispatcher(Arc::new(reader));

    println!("Input types:");
    for input_type in dispatcher.input_types() {
        println!("  {:<12} {}", input_type.as_str(), input_type.description());
    }
    println!("Output types:");
    for output_type in dispatcher.output_types() {
        println!("  {:<12} {}", output_type.as_str(), output_type.description());
    }
    Ok(())
}
