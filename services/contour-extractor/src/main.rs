//! `extract-contour`: trace an isocontour of a 2D VTK image.
//!
//! Reads a `.vti` file, extracts the segments where the active point scalars
//! cross the isovalue, and writes them to a `.vtp` file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use contour_extractor::{run, ExtractorConfig};
use vtk_xml::Encoding;

#[derive(Parser, Debug)]
#[command(name = "extract-contour")]
#[command(about = "Extract a 2D isocontour from VTK ImageData into VTK PolyData")]
struct Args {
    /// Input VTK ImageData file (.vti)
    #[arg(short, long, env = "CONTOUR_INPUT")]
    input: PathBuf,

    /// Isovalue to trace
    #[arg(short = 'v', long, env = "CONTOUR_ISOVALUE", allow_negative_numbers = true)]
    isovalue: f64,

    /// Output VTK PolyData file (.vtp)
    #[arg(short, long, env = "CONTOUR_OUTPUT")]
    output: PathBuf,

    /// Data array encoding of the output file (ascii or binary)
    #[arg(long, default_value = "binary", env = "CONTOUR_ENCODING")]
    encoding: Encoding,

    /// Contour row bands in parallel
    #[arg(long, env = "CONTOUR_PARALLEL")]
    parallel: bool,

    /// Number of worker threads for --parallel
    #[arg(long, env = "CONTOUR_THREADS")]
    threads: Option<usize>,

    /// Print a JSON run report to stdout
    #[arg(long, env = "CONTOUR_REPORT")]
    report: bool,

    /// Log level
    #[arg(long, default_value = "info", env = "CONTOUR_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, env = "CONTOUR_LOG_JSON")]
    log_json: bool,
}

impl From<&Args> for ExtractorConfig {
    fn from(args: &Args) -> Self {
        Self {
            input: args.input.clone(),
            output: args.output.clone(),
            isovalue: args.isovalue,
            encoding: args.encoding,
            parallel: args.parallel,
            threads: args.threads,
        }
    }
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args);

    if let Err(e) = try_main(&args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    // Logs go to stderr so --report output stays parseable.
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn try_main(args: &Args) -> Result<()> {
    let config = ExtractorConfig::from(args);

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to build worker thread pool")?;
    }

    info!(
        input = %config.input.display(),
        isovalue = config.isovalue,
        parallel = config.parallel,
        "Starting contour extraction"
    );

    let report = run(&config)?;

    if args.report {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize run report")?
        );
    }

    Ok(())
}
