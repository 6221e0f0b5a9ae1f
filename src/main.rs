// Command-line entry point for ast-consumer-matrix.

use std::path::PathBuf;

use anyhow::Result;
use ast_consumer_matrix::application::AnalyzeUsecase;
use ast_consumer_matrix::config::AnalysisConfig;
use ast_consumer_matrix::infrastructure::{
    HtmlMatrixRenderer, SearchPathLocator, TreeSitterPythonParser,
};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input .py file
    #[arg(short, long)]
    input: PathBuf,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<Vec<PathBuf>> {
    let config = AnalysisConfig::for_input(&cli.input)?;
    let locator = SearchPathLocator::new(config.search_paths.clone());

    let usecase = AnalyzeUsecase {
        parser: &TreeSitterPythonParser,
        locator: &locator,
        renderer: &HtmlMatrixRenderer,
    };
    usecase.run(&config)
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(written) => {
            for path in written {
                info!("Output written to {}", path.display());
            }
        }
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}
