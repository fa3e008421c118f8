//! End-to-end extraction
//!
//! Container → resource manifest → script catalog → script files. Every
//! stage before writing fails fast, so a run that errors early writes
//! nothing.

use std::path::Path;

use crate::archive::{extract_entry, EMBEDDED_RESOURCES_ENTRY};
use crate::catalog::{parse_scripts, ScriptRecord};
use crate::error::Result;
use crate::manifest::resolve_script_manifest_path;
use crate::output::{write_scripts, WriteReport};
use crate::settings::Settings;

/// Read every script record embedded in the container at `container`
pub fn extract_scripts<P: AsRef<Path>>(
    container: P,
    settings: &Settings,
) -> Result<Vec<ScriptRecord>> {
    let container = container.as_ref();

    let resources = extract_entry(container, EMBEDDED_RESOURCES_ENTRY, settings)?;
    let catalog_path = resolve_script_manifest_path(&resources, settings)?;
    let catalog = extract_entry(container, &catalog_path, settings)?;
    parse_scripts(&catalog, settings)
}

/// Extract every script in `container` into `output_root`
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    container: P,
    output_root: Q,
    settings: &Settings,
) -> Result<WriteReport> {
    let scripts = extract_scripts(container, settings)?;
    write_scripts(output_root.as_ref(), &scripts, settings)
}
