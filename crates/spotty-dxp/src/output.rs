//! Script output placement
//!
//! Each script lands at `<root>/<subdirectory>/<name>.<extension>`, where the
//! subdirectory and extension follow from its declared language.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::catalog::ScriptRecord;
use crate::decode::decode;
use crate::error::{Result, SpottyError, WriteFailure};
use crate::settings::Settings;

/// Fallback directory for language names that cannot be used as a path component
const UNKNOWN_LANGUAGE_DIR: &str = "unknown";

/// Script language as classified for output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    IronPython,
    /// Any other declared language, kept verbatim
    Other(String),
}

impl Language {
    /// Classify a declared `LanguageName`
    pub fn from_name(name: &str) -> Self {
        match name {
            "JavaScript" => Language::JavaScript,
            "IronPython" => Language::IronPython,
            other => Language::Other(other.to_string()),
        }
    }

    /// Output subdirectory for scripts in this language
    pub fn subdirectory(&self) -> &str {
        match self {
            Language::JavaScript => "js",
            Language::IronPython => "python",
            Language::Other(name) => safe_component(name).unwrap_or(UNKNOWN_LANGUAGE_DIR),
        }
    }

    /// File extension for scripts in this language
    pub fn extension(&self) -> &str {
        match self {
            Language::JavaScript => "js",
            Language::IronPython => "py",
            Language::Other(name) => safe_component(name).unwrap_or(UNKNOWN_LANGUAGE_DIR),
        }
    }
}

/// Where a script is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    pub subdirectory: String,
    pub extension: String,
    pub path: PathBuf,
}

impl OutputLocation {
    /// Compute the output location of `script` under `root`
    pub fn for_script(root: &Path, script: &ScriptRecord) -> Result<Self> {
        let name = safe_component(&script.name)
            .ok_or_else(|| SpottyError::UnsafeName(script.name.clone()))?;
        let language = Language::from_name(&script.language_name);
        let subdirectory = language.subdirectory().to_string();
        let extension = language.extension().to_string();
        let path = root
            .join(&subdirectory)
            .join(format!("{}.{}", name, extension));

        Ok(Self {
            subdirectory,
            extension,
            path,
        })
    }
}

/// `value` if it can be used as a single path component
fn safe_component(value: &str) -> Option<&str> {
    let unsafe_name = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(['/', '\\', '\0']);
    (!unsafe_name).then_some(value)
}

/// Outcome of writing a batch of scripts
#[derive(Debug, Default)]
pub struct WriteReport {
    /// Files written, in catalog order
    pub written: Vec<PathBuf>,
    /// Scripts that could not be written
    pub failures: Vec<WriteFailure>,
}

impl WriteReport {
    /// Number of scripts processed
    pub fn processed(&self) -> usize {
        self.written.len() + self.failures.len()
    }

    /// Whether every script was written
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn per-script failures into an error
    pub fn into_result(self) -> Result<Vec<PathBuf>> {
        if self.failures.is_empty() {
            Ok(self.written)
        } else {
            Err(SpottyError::WriteFailures(self.failures))
        }
    }
}

/// Write every script under `root`
///
/// Failure to create `root` aborts. Failures on individual scripts are
/// collected in the report and the remaining scripts are still written.
pub fn write_scripts(
    root: &Path,
    scripts: &[ScriptRecord],
    settings: &Settings,
) -> Result<WriteReport> {
    fs::create_dir_all(root)?;

    let mut report = WriteReport::default();
    for script in scripts {
        match write_script(root, script, settings) {
            Ok(path) => report.written.push(path),
            Err((path, error)) => {
                warn!("Failed to write script {}: {}", script.name, error);
                report.failures.push(WriteFailure {
                    script: script.name.clone(),
                    path,
                    error: Box::new(error),
                });
            }
        }
    }

    if settings.debug {
        info!(
            "Wrote {} of {} script files to {}",
            report.written.len(),
            scripts.len(),
            root.display()
        );
    }

    Ok(report)
}

fn write_script(
    root: &Path,
    script: &ScriptRecord,
    settings: &Settings,
) -> std::result::Result<PathBuf, (Option<PathBuf>, SpottyError)> {
    let location = OutputLocation::for_script(root, script).map_err(|e| (None, e))?;
    let with_path = |e: std::io::Error| (Some(location.path.clone()), SpottyError::Io(e));

    fs::create_dir_all(root.join(&location.subdirectory)).map_err(with_path)?;
    fs::write(&location.path, decode(&script.code)).map_err(with_path)?;

    if settings.verbose {
        debug!("Wrote file: {}", location.path.display());
    }
    Ok(location.path)
}
