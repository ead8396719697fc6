use std::process;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use pano_canvas::{
    inpaint, InpaintClient, MaskStrategy, PanoEngine, PipelineOptions, RunReport,
};

/// Credential value requesting that the inpaint step be skipped and only the
/// normalized canvas returned (kept for parity with upstream callers that
/// pass an unset environment variable through).
const SKIP_INPAINT_SENTINEL: &str = "undefined";

#[derive(Clone, Copy, ValueEnum)]
enum MaskStrategyArg {
    /// Derive the mask from placement offsets (exact, content-independent).
    Geometric,
    /// Derive the mask from pixel intensity with dilation.
    Threshold,
}

impl From<MaskStrategyArg> for MaskStrategy {
    fn from(arg: MaskStrategyArg) -> Self {
        match arg {
            MaskStrategyArg::Geometric => MaskStrategy::Geometric,
            MaskStrategyArg::Threshold => MaskStrategy::Threshold,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "pano-canvas",
    about = "Normalize photos onto a 2:1 equirectangular canvas and inpaint the gaps",
    version,
    after_help = "Prints a single JSON result on stdout: {\"success\":true,\"image\":\"data:image/png;base64,...\"}\n\
                  or {\"success\":false,\"error\":\"...\"}. Pass the API key \"undefined\" (or an empty\n\
                  string) to skip the inpaint call and get the normalized canvas back directly."
)]
struct Cli {
    /// Inpaint service API key ("undefined" or empty skips the inpaint step)
    api_key: String,

    /// Text prompt describing the scene for the inpainting model
    prompt: String,

    /// One or more source image paths, in stitching order
    #[arg(required = true)]
    images: Vec<String>,

    /// Mask synthesis strategy
    #[arg(long, value_enum, default_value = "geometric")]
    mask_strategy: MaskStrategyArg,

    /// Inpaint service endpoint
    #[arg(long, default_value = inpaint::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Timeout for the inpaint call, in seconds
    #[arg(long, default_value = "120")]
    timeout_secs: u64,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let report = run(&cli);
    let success = report.success;

    // stdout carries exactly one JSON document; everything else goes to stderr.
    match serde_json::to_string(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("failed to serialize result: {e}");
            process::exit(1);
        }
    }

    if !success {
        process::exit(1);
    }
}

fn run(cli: &Cli) -> RunReport {
    let client = if cli.api_key.is_empty() || cli.api_key == SKIP_INPAINT_SENTINEL {
        None
    } else {
        match InpaintClient::with_endpoint(
            cli.api_key.clone(),
            cli.endpoint.clone(),
            Duration::from_secs(cli.timeout_secs),
        ) {
            Ok(c) => Some(c),
            Err(e) => return RunReport::failure(e.to_string()),
        }
    };

    let opts = PipelineOptions {
        mask_strategy: cli.mask_strategy.into(),
        prompt: cli.prompt.clone(),
    };

    let engine = PanoEngine::new();
    match engine.run(&cli.images, client.as_ref(), &opts) {
        Ok(outcome) => RunReport::success(&outcome.image_png, &outcome.notes),
        Err(e) => RunReport::failure(e.to_string()),
    }
}
