//! Error types for DXP extraction

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while extracting scripts from a DXP container
#[derive(Error, Debug)]
pub enum SpottyError {
    /// Error reading the ZIP container
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error tokenizing XML content
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Markup that tokenizes but is not a well-formed document
    #[error("Malformed XML in {document}: {reason}")]
    Malformed { document: String, reason: String },

    /// Requested entry is not present in the container
    #[error("Could not find file {entry} in file {container}")]
    EntryNotFound { entry: String, container: String },

    /// The resource manifest lists no resources
    #[error("No embedded resources in DXP file")]
    NoResources,

    /// No resource in the manifest points at the script catalog
    #[error("No {0} resource listed in the embedded resources")]
    NoScriptsResource(&'static str),

    /// The script catalog holds no scripts
    #[error("No scripts found embedded in DXP file")]
    NoScripts,

    /// A required child element is missing or repeated
    #[error("Expected exactly one <{child}> in <{parent}>, found {found}")]
    MissingElement {
        parent: String,
        child: String,
        found: usize,
    },

    /// A required attribute is missing
    #[error("Missing attribute {attribute} on <{element}>")]
    MissingAttribute { element: String, attribute: String },

    /// A script name that would escape its output directory
    #[error("Refusing to write script with unsafe name: {0:?}")]
    UnsafeName(String),

    /// One or more script files could not be written
    #[error("Failed to write {} script file(s): {}", .0.len(), join_failures(.0))]
    WriteFailures(Vec<WriteFailure>),
}

/// Coarse classification of a [`SpottyError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Container or filesystem failure
    Io,
    /// Input is not well-formed markup or violates the document shape
    Parse,
    /// Something the pipeline looks for is absent
    NotFound,
}

impl SpottyError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpottyError::Archive(_)
            | SpottyError::Io(_)
            | SpottyError::UnsafeName(_)
            | SpottyError::WriteFailures(_) => ErrorKind::Io,
            SpottyError::Xml(_)
            | SpottyError::Malformed { .. }
            | SpottyError::MissingAttribute { .. } => ErrorKind::Parse,
            SpottyError::EntryNotFound { .. }
            | SpottyError::NoResources
            | SpottyError::NoScriptsResource(_)
            | SpottyError::NoScripts
            | SpottyError::MissingElement { .. } => ErrorKind::NotFound,
        }
    }

    pub(crate) fn malformed(document: &str, reason: impl Into<String>) -> Self {
        SpottyError::Malformed {
            document: document.to_string(),
            reason: reason.into(),
        }
    }
}

/// A single script that could not be written
#[derive(Debug)]
pub struct WriteFailure {
    /// Name of the script as declared in the catalog
    pub script: String,
    /// Path the script was going to be written to, when known
    pub path: Option<PathBuf>,
    /// Underlying cause
    pub error: Box<SpottyError>,
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} ({}): {}", self.script, path.display(), self.error),
            None => write!(f, "{}: {}", self.script, self.error),
        }
    }
}

fn join_failures(failures: &[WriteFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for DXP operations
pub type Result<T> = std::result::Result<T, SpottyError>;
