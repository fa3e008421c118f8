//! # spotty-dxp
//!
//! Extract embedded scripts from Spotfire DXP files.
//!
//! A DXP file is a ZIP container. Its `EmbeddedResources.xml` names the
//! entry holding `EmbeddedScripts.xml`, which lists every script with its
//! language and escaped source. This crate provides functionality to:
//! - Find entries in a container with a single streaming pass
//! - Resolve the script catalog through the resource manifest
//! - Parse and decode script records
//! - Write each script to a language-specific directory
//!
//! ## Example
//!
//! ```no_run
//! use spotty_dxp::{run, Settings};
//!
//! let report = run("analysis.dxp", "scripts", &Settings::default())?;
//! println!("Wrote {} script files", report.written.len());
//! # Ok::<(), spotty_dxp::SpottyError>(())
//! ```

pub mod archive;
pub mod catalog;
pub mod decode;
pub mod error;
pub mod manifest;
pub mod markup;
pub mod output;
pub mod pipeline;
pub mod settings;

#[cfg(test)]
mod test_utils;

pub use archive::{extract_entry, extract_entry_from_reader, EMBEDDED_RESOURCES_ENTRY};
pub use catalog::{parse_scripts, ScriptRecord, WrapScript};
pub use decode::{decode, encode};
pub use error::{ErrorKind, Result, SpottyError, WriteFailure};
pub use manifest::{resolve_script_manifest_path, ResourceEntry, EMBEDDED_SCRIPTS_RESOURCE};
pub use markup::Element;
pub use output::{write_scripts, Language, OutputLocation, WriteReport};
pub use pipeline::{extract_scripts, run};
pub use settings::Settings;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
