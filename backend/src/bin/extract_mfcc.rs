use clap::Parser;
use phonon_backend::features::config::{MfccConfig, MfccConfigError};
use phonon_backend::features::dataset::FeaturePipeline;
use std::path::PathBuf;
use std::process::ExitCode;

/// Build per-phonon MFCC tables from annotated subject recordings.
#[derive(Parser, Debug)]
#[command(name = "extract-mfcc", version)]
struct Args {
    /// Dataset directory with one sub-directory per subject
    #[arg(long)]
    data_dir: PathBuf,

    /// Directory the `<phonon>.csv` tables are appended to
    #[arg(long)]
    save_dir: PathBuf,

    /// YAML file with MFCC parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hop between frames in milliseconds (overrides the config file)
    #[arg(long)]
    hop_ms: Option<f64>,

    /// Analysis window length in milliseconds (overrides the config file)
    #[arg(long)]
    window_ms: Option<f64>,

    /// Hide progress bars
    #[arg(long)]
    quiet: bool,
}

/// Config file (or defaults) with the command-line overrides applied.
fn load_config(args: &Args) -> Result<MfccConfig, MfccConfigError> {
    let config = match &args.config {
        Some(path) => MfccConfig::load(path)?,
        None => MfccConfig::default(),
    };
    config.with_overrides(args.hop_ms, args.window_ms)
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid MFCC configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Extracting MFCCs from {} into {}",
        args.data_dir.display(),
        args.save_dir.display()
    );

    let pipeline = FeaturePipeline::new(config, &args.save_dir).with_progress(!args.quiet);
    match pipeline.run(&args.data_dir) {
        Ok(report) => {
            log::info!(
                "Done: {} subjects processed, {} skipped, {} rows written",
                report.processed.len(),
                report.skipped.len(),
                report.rows_written
            );
            for name in &report.skipped {
                log::info!("Skipped: {}", name);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("MFCC extraction failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
