//! Streaming entry lookup for DXP containers
//!
//! DXP files are ZIP archives. Entries are read sequentially from their local
//! headers and a lookup stops at the first entry whose name matches. Entries
//! whose sizes live in a trailing data descriptor cannot be streamed; when one
//! is met the lookup restarts over the central directory, in the same order.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, info};
use zip::read::{read_zipfile_from_stream, ZipArchive};
use zip::result::ZipError;

use crate::error::{Result, SpottyError};
use crate::settings::Settings;

/// Name of the resource manifest at the root of every DXP container
pub const EMBEDDED_RESOURCES_ENTRY: &str = "EmbeddedResources.xml";

/// Read the contents of the first entry named `entry` in the container at `path`
pub fn extract_entry<P: AsRef<Path>>(
    path: P,
    entry: &str,
    settings: &Settings,
) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    extract_entry_from_reader(
        BufReader::new(file),
        entry,
        &path.display().to_string(),
        settings,
    )
}

/// Read the contents of the first entry named `entry` from a ZIP container
///
/// `container` only labels the container in logs and errors.
pub fn extract_entry_from_reader<R: Read + Seek>(
    mut reader: R,
    entry: &str,
    container: &str,
    settings: &Settings,
) -> Result<Vec<u8>> {
    if settings.debug {
        info!("Searching {} for {}", container, entry);
    }

    let start = reader.stream_position()?;
    let found = match find_in_stream(&mut reader, entry) {
        Err(SpottyError::Archive(ZipError::UnsupportedArchive(reason))) => {
            debug!(
                "Streaming {} stopped ({}), reading central directory",
                container, reason
            );
            reader.seek(SeekFrom::Start(start))?;
            find_in_directory(reader, entry)?
        }
        other => other?,
    };

    match found {
        Some(contents) => {
            if settings.debug {
                info!("Found file: {}", entry);
            }
            if settings.verbose {
                debug!("{}", String::from_utf8_lossy(&contents));
            }
            Ok(contents)
        }
        None => Err(SpottyError::EntryNotFound {
            entry: entry.to_string(),
            container: container.to_string(),
        }),
    }
}

/// Walk local headers in order
fn find_in_stream<R: Read>(reader: &mut R, entry: &str) -> Result<Option<Vec<u8>>> {
    while let Some(mut file) = read_zipfile_from_stream(&mut *reader)? {
        if file.is_dir() || file.name() != entry {
            // Dropping a streamed entry skips its remaining bytes.
            continue;
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        return Ok(Some(contents));
    }
    Ok(None)
}

/// Walk the central directory in order
fn find_in_directory<R: Read + Seek>(reader: R, entry: &str) -> Result<Option<Vec<u8>>> {
    let mut archive = ZipArchive::new(reader)?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() || file.name() != entry {
            continue;
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        return Ok(Some(contents));
    }
    Ok(None)
}
