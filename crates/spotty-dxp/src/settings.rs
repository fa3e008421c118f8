//! Run-scoped extraction settings
//!
//! Settings are passed explicitly to every pipeline stage. They can be
//! loaded from TOML:
//!
//! ```toml
//! debug = true
//! verbose = false
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SpottyError};

/// Toggles that control how chatty an extraction run is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Emit progress messages (entry searches, resolved paths, written files)
    pub debug: bool,
    /// Emit payload-level messages (attribute sets, raw document contents)
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            verbose: false,
        }
    }
}

impl Settings {
    /// Settings with all tracing switched off
    pub fn quiet() -> Self {
        Self {
            debug: false,
            verbose: false,
        }
    }

    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| SpottyError::Malformed {
            document: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
