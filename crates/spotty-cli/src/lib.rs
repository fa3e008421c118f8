//! spotty CLI - Command-line interface library
//!
//! # Library Usage
//!
//! ```ignore
//! use spotty_cli::{extract_command, run_cli};
//!
//! // Run the full CLI
//! run_cli();
//!
//! // Or run an extraction programmatically
//! extract_command(&input, &output, &Settings::default())?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # JavaScript lands in ./output/js, IronPython in ./output/python
//! spotty analysis.dxp ./output
//!
//! # Quieter or chattier runs
//! SPOTTY_CONFIG=spotty.toml spotty analysis.dxp ./output
//! RUST_LOG=debug spotty analysis.dxp ./output
//! ```

pub mod app;

pub use app::{extract_command, init_logging, load_settings, run_cli, CONFIG_ENV};
