//! Script catalog (`EmbeddedScripts.xml`)
//!
//! ```xml
//! <EmbeddedScripts>
//!   <EmbeddedScript>
//!     <ScriptDefinition Name="calc" LanguageName="JavaScript" LanguageVersion="1.0" WrapScript="True">
//!       <ScriptCode>var x _x09= 1;</ScriptCode>
//!     </ScriptDefinition>
//!   </EmbeddedScript>
//! </EmbeddedScripts>
//! ```

use std::fmt;

use tracing::debug;

use crate::error::{Result, SpottyError};
use crate::manifest::EMBEDDED_SCRIPTS_RESOURCE;
use crate::markup::Element;
use crate::settings::Settings;

const SCRIPTS_ELEMENT: &str = "EmbeddedScripts";
const SCRIPT_ELEMENT: &str = "EmbeddedScript";
const DEFINITION_ELEMENT: &str = "ScriptDefinition";
const CODE_ELEMENT: &str = "ScriptCode";

/// Value of the `WrapScript` attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrapScript {
    /// `true` / `false`, in any case
    Flag(bool),
    /// Anything else, kept verbatim
    Other(String),
}

impl WrapScript {
    /// Interpret an attribute value
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("true") {
            WrapScript::Flag(true)
        } else if value.eq_ignore_ascii_case("false") {
            WrapScript::Flag(false)
        } else {
            WrapScript::Other(value.to_string())
        }
    }
}

impl fmt::Display for WrapScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WrapScript::Flag(flag) => write!(f, "{}", flag),
            WrapScript::Other(value) => f.write_str(value),
        }
    }
}

/// One script from the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRecord {
    /// Script name, used as the output file stem
    pub name: String,
    /// Declared language (`JavaScript`, `IronPython`, ...)
    pub language_name: String,
    /// Declared language version
    pub language_version: Option<String>,
    /// Whether the host wraps the script body
    pub wrap_script: Option<WrapScript>,
    /// Raw code body, still escaped (see [`decode`](crate::decode::decode))
    pub code: String,
}

impl ScriptRecord {
    fn from_element(script: &Element) -> Result<Self> {
        let definition = script.only_child(DEFINITION_ELEMENT)?;
        let code = definition.only_child(CODE_ELEMENT)?;

        Ok(Self {
            name: definition.required_attr("Name")?.to_string(),
            language_name: definition.required_attr("LanguageName")?.to_string(),
            language_version: definition.attr("LanguageVersion").map(str::to_string),
            wrap_script: definition.attr("WrapScript").map(WrapScript::parse),
            code: code.text.trim().to_string(),
        })
    }
}

/// Parse every script in the catalog, in document order
pub fn parse_scripts(xml: &[u8], settings: &Settings) -> Result<Vec<ScriptRecord>> {
    let root = Element::parse(xml, EMBEDDED_SCRIPTS_RESOURCE)?;
    if root.name != SCRIPTS_ELEMENT {
        return Err(SpottyError::NoScripts);
    }

    let mut entries = root.children_named(SCRIPT_ELEMENT).peekable();
    if entries.peek().is_none() {
        return Err(SpottyError::NoScripts);
    }

    let scripts = entries
        .map(|entry| {
            let record = ScriptRecord::from_element(entry)?;
            if settings.verbose {
                debug!(
                    name = %record.name,
                    language = %record.language_name,
                    version = ?record.language_version,
                    wrap = ?record.wrap_script,
                    "Script definition"
                );
            }
            Ok(record)
        })
        .collect::<Result<Vec<_>>>()?;

    if scripts.is_empty() {
        return Err(SpottyError::NoScripts);
    }

    Ok(scripts)
}
