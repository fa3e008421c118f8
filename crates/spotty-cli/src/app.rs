//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use spotty_dxp::{extract_scripts, write_scripts, Settings};

/// Environment variable naming an optional TOML settings file
pub const CONFIG_ENV: &str = "SPOTTY_CONFIG";

#[derive(Parser)]
#[command(name = "spotty")]
#[command(author, version, about = "Extract scripts from a Spotfire DXP file", long_about = None)]
struct Cli {
    /// Input DXP file
    input: PathBuf,

    /// Output directory (JavaScript goes to js/, IronPython to python/)
    output: PathBuf,
}

/// Run the CLI application
///
/// Parses arguments, loads settings, sets up logging and runs the extraction.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(env::var_os(CONFIG_ENV).map(PathBuf::from).as_deref())?;
    init_logging(&settings);

    let written = extract_command(&cli.input, &cli.output, &settings)?;
    println!("Wrote {} script files to {}", written, cli.output.display());

    Ok(())
}

/// Load settings from `path`, or use the defaults
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display())),
        None => Ok(Settings::default()),
    }
}

/// Install a stderr tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise the level follows the settings.
pub fn init_logging(settings: &Settings) {
    let level = if settings.verbose {
        "debug"
    } else if settings.debug {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A subscriber may already be installed when embedded in another program
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute an extraction, returning the number of script files written
pub fn extract_command(input: &Path, output_dir: &Path, settings: &Settings) -> Result<usize> {
    // Check input file exists
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let scripts = extract_scripts(input, settings)
        .with_context(|| format!("Failed to read scripts from {}", input.display()))?;

    let report = write_scripts(output_dir, &scripts, settings).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let written = report.written.len();
    report
        .into_result()
        .with_context(|| format!("Wrote {} of {} script files", written, scripts.len()))?;

    Ok(written)
}
