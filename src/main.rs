use card_trust::assessor::assessor_from_file;
use card_trust::imaging::ImageCrateDecoder;
use card_trust::{config, output, pipeline};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Shared flags for commands that report on an image.
#[derive(clap::Args, Clone)]
struct ReportArgs {
    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
#[command(name = "card-trust")]
#[command(about = "Explainable trust signals for collectible card photos")]
#[command(long_about = "\
Explainable trust signals for collectible card photos

Analyzes a photo of a card in three independent ways and fuses the results:

  quality    resolution, brightness, focus and card-boundary checks
  metadata   capture provenance from EXIF (camera, screenshot or unknown)
  risk       an externally produced AI risk assessment (JSON, optional)

The trust score is a preliminary signal, not an authentication. Always show
the reported limitations next to it.

Risk assessment JSON shape:

  {\"riskScore\": 22, \"factors\": [{\"name\": \"...\", \"confidence\": 80}],
   \"positiveSignals\": [], \"uncertainAreas\": []}

Run 'card-trust gen-config' to generate a documented card-trust.toml.")]
#[command(version)]
struct Cli {
    /// Analysis config file (TOML); stock defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log per-check details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Full analysis: quality + metadata + risk assessment → trust score
    Analyze {
        /// Front image of the card
        front: PathBuf,
        /// Back image of the card
        #[arg(long)]
        back: Option<PathBuf>,
        /// Risk assessment JSON returned by the AI service
        #[arg(long)]
        risk: Option<PathBuf>,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Image-quality checks only
    Quality {
        image: PathBuf,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Capture-metadata forensics only
    Metadata {
        image: PathBuf,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Print a stock card-trust.toml with all options documented
    GenConfig,
}

/// JSON report envelope: which bytes were analyzed, and the result.
#[derive(Serialize)]
struct Report<'a, T: Serialize> {
    file: &'a Path,
    sha256: String,
    result: T,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::load_config(cli.config.as_deref())?;
    let decoder = ImageCrateDecoder::new();

    match cli.command {
        Command::Analyze {
            front,
            back,
            risk,
            report,
        } => {
            let front_bytes = std::fs::read(&front)?;
            let back_bytes = back.as_deref().map(std::fs::read).transpose()?;
            let assessor = assessor_from_file(risk.as_deref());
            let result = pipeline::analyze_submission(
                &front_bytes,
                back_bytes.as_deref(),
                assessor.as_ref(),
                &decoder,
                &config,
            )?;
            if report.json {
                print_json(&front, &front_bytes, &result)?;
            } else {
                output::print_authenticity(&result);
            }
        }
        Command::Quality { image, report } => {
            let bytes = std::fs::read(&image)?;
            let result = pipeline::analyze_image_quality(&bytes, &decoder, &config)?;
            if report.json {
                print_json(&image, &bytes, &result)?;
            } else {
                output::print_quality(&result);
            }
        }
        Command::Metadata { image, report } => {
            let bytes = std::fs::read(&image)?;
            let result = pipeline::analyze_image_metadata(&bytes, &decoder);
            if report.json {
                print_json(&image, &bytes, &result)?;
            } else {
                output::print_metadata(&result);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_json<T: Serialize>(
    file: &Path,
    bytes: &[u8],
    result: &T,
) -> Result<(), serde_json::Error> {
    let report = Report {
        file,
        sha256: format!("{:x}", Sha256::digest(bytes)),
        result,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
