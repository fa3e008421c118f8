//! Resource manifest (`EmbeddedResources.xml`)
//!
//! The manifest maps embedded resource names to their paths inside the
//! container:
//!
//! ```xml
//! <EmbeddedResources>
//!   <EmbeddedResource Name="EmbeddedScripts.xml" ArchiveElementPath="Resources/1.xml" />
//! </EmbeddedResources>
//! ```

use tracing::{debug, info};

use crate::archive::EMBEDDED_RESOURCES_ENTRY;
use crate::error::{Result, SpottyError};
use crate::markup::Element;
use crate::settings::Settings;

/// Resource name under which the script catalog is registered
pub const EMBEDDED_SCRIPTS_RESOURCE: &str = "EmbeddedScripts.xml";

const RESOURCES_ELEMENT: &str = "EmbeddedResources";
const RESOURCE_ELEMENT: &str = "EmbeddedResource";

/// One `<EmbeddedResource>` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    /// Declared resource name
    pub name: String,
    /// Path of the resource inside the container
    pub archive_element_path: String,
}

impl ResourceEntry {
    fn from_element(element: &Element) -> Result<Self> {
        Ok(Self {
            name: element.required_attr("Name")?.to_string(),
            archive_element_path: element.required_attr("ArchiveElementPath")?.to_string(),
        })
    }
}

/// Find the container path of the script catalog
pub fn resolve_script_manifest_path(xml: &[u8], settings: &Settings) -> Result<String> {
    if settings.debug {
        info!(
            "Parsing {} to find {}",
            EMBEDDED_RESOURCES_ENTRY, EMBEDDED_SCRIPTS_RESOURCE
        );
    }

    let root = Element::parse(xml, EMBEDDED_RESOURCES_ENTRY)?;
    if root.name != RESOURCES_ELEMENT {
        return Err(SpottyError::NoResources);
    }

    let mut resources = root.children_named(RESOURCE_ELEMENT).peekable();
    if resources.peek().is_none() {
        return Err(SpottyError::NoResources);
    }

    for element in resources {
        let resource = ResourceEntry::from_element(element)?;
        if settings.verbose {
            debug!(?resource, "Embedded resource");
        }

        if resource.name == EMBEDDED_SCRIPTS_RESOURCE {
            if settings.debug {
                info!(
                    "Found {} in file {}",
                    EMBEDDED_SCRIPTS_RESOURCE, resource.archive_element_path
                );
            }
            return Ok(resource.archive_element_path);
        }
    }

    Err(SpottyError::NoScriptsResource(EMBEDDED_SCRIPTS_RESOURCE))
}
