//! Shared test utilities for spotty-dxp
//!
//! Builds small in-memory DXP containers for tests.

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

/// A file to place in a test container
pub struct ZipEntry<'a> {
    pub name: &'a str,
    pub contents: Vec<u8>,
    pub method: CompressionMethod,
}

impl<'a> ZipEntry<'a> {
    /// A stored (uncompressed) entry
    pub fn file(name: &'a str, contents: &str) -> Self {
        Self {
            name,
            contents: contents.as_bytes().to_vec(),
            method: CompressionMethod::Stored,
        }
    }

    /// A deflated entry
    pub fn deflated(name: &'a str, contents: &str) -> Self {
        Self {
            method: CompressionMethod::Deflated,
            ..Self::file(name, contents)
        }
    }
}

/// Write `entries` into a ZIP archive, in order
pub fn build_zip(entries: &[ZipEntry<'_>]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);

    for entry in entries {
        let options = SimpleFileOptions::default().compression_method(entry.method);
        zip.start_file(entry.name, options).unwrap();
        zip.write_all(&entry.contents).unwrap();
    }

    zip.finish().unwrap();
    buffer.into_inner()
}

/// A ZIP stream whose local entries may repeat a name
///
/// `ZipWriter` rejects duplicate names, so each entry is written as its own
/// archive and the local sections are concatenated. The central directory of
/// the last archive terminates the stream. Only sequential readers accept
/// the result.
pub fn build_zip_stream(entries: &[ZipEntry<'_>]) -> Vec<u8> {
    let mut stream = Vec::new();
    let mut tail = Vec::new();

    for entry in entries {
        let single = build_zip(std::slice::from_ref(entry));
        let cd_offset = central_directory_offset(&single);
        stream.extend_from_slice(&single[..cd_offset]);
        tail = single[cd_offset..].to_vec();
    }

    stream.extend_from_slice(&tail);
    stream
}

/// A ZIP archive of stored entries whose sizes trail the data
///
/// Every entry sets general-purpose flag bit 3: the local header carries
/// zero CRC and sizes, and a data descriptor follows the contents. The
/// central directory holds the real values.
pub fn build_zip_with_descriptors(entries: &[(&str, &str)]) -> Vec<u8> {
    const FLAGS: u16 = 0x0008;
    const DOS_DATE: u16 = 0x0021; // 1980-01-01

    let mut out = Vec::new();
    let mut directory = Vec::new();

    for (name, contents) in entries {
        let offset = out.len() as u32;
        let data = contents.as_bytes();
        let crc = crc32fast::hash(data);
        let size = data.len() as u32;

        out.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
        out.extend_from_slice(&20u16.to_le_bytes());
        out.extend_from_slice(&FLAGS.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes()); // stored
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&DOS_DATE.to_le_bytes());
        out.extend_from_slice(&[0u8; 12]); // crc, compressed, uncompressed
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(name.as_bytes());
        out.extend_from_slice(data);

        out.extend_from_slice(&0x0807_4b50u32.to_le_bytes());
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(&size.to_le_bytes());

        directory.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
        directory.extend_from_slice(&20u16.to_le_bytes());
        directory.extend_from_slice(&20u16.to_le_bytes());
        directory.extend_from_slice(&FLAGS.to_le_bytes());
        directory.extend_from_slice(&0u16.to_le_bytes());
        directory.extend_from_slice(&0u16.to_le_bytes());
        directory.extend_from_slice(&DOS_DATE.to_le_bytes());
        directory.extend_from_slice(&crc.to_le_bytes());
        directory.extend_from_slice(&size.to_le_bytes());
        directory.extend_from_slice(&size.to_le_bytes());
        directory.extend_from_slice(&(name.len() as u16).to_le_bytes());
        directory.extend_from_slice(&[0u8; 12]); // extra, comment, disk, attributes
        directory.extend_from_slice(&offset.to_le_bytes());
        directory.extend_from_slice(name.as_bytes());
    }

    let directory_offset = out.len() as u32;
    let count = entries.len() as u16;
    out.extend_from_slice(&directory);

    out.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // disk numbers
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&(directory.len() as u32).to_le_bytes());
    out.extend_from_slice(&directory_offset.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out
}

/// Offset of the central directory, read from the end-of-central-directory record
fn central_directory_offset(zip: &[u8]) -> usize {
    let eocd = zip.len() - 22;
    assert_eq!(&zip[eocd..eocd + 4], b"PK\x05\x06", "unexpected archive comment");
    let bytes: [u8; 4] = zip[eocd + 16..eocd + 20].try_into().unwrap();
    u32::from_le_bytes(bytes) as usize
}

/// An `EmbeddedResources.xml` pointing the script catalog at `scripts_path`
pub fn resources_xml(scripts_path: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<EmbeddedResources>
  <EmbeddedResource Name="Thumbnail.png" ArchiveElementPath="Thumbnail.png" />
  <EmbeddedResource Name="EmbeddedScripts.xml" ArchiveElementPath="{}" />
</EmbeddedResources>"#,
        scripts_path
    )
}

/// One `<EmbeddedScript>` element with an already-escaped code body
pub fn script_xml(name: &str, language: &str, code: &str) -> String {
    format!(
        r#"  <EmbeddedScript>
    <ScriptDefinition Name="{}" LanguageName="{}" LanguageVersion="1.0" WrapScript="True">
      <ScriptCode>{}</ScriptCode>
    </ScriptDefinition>
  </EmbeddedScript>
"#,
        name, language, code
    )
}

/// An `EmbeddedScripts.xml` document holding `scripts`
pub fn scripts_xml(scripts: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<EmbeddedScripts>\n{}</EmbeddedScripts>",
        scripts.concat()
    )
}

/// A complete DXP container with a resource manifest and script catalog
pub fn create_dxp(scripts: &[String]) -> Vec<u8> {
    let path = "Resources/7c3f1a.xml";
    let resources = resources_xml(path);
    let catalog = scripts_xml(scripts);
    build_zip(&[
        ZipEntry::file("[Content_Types].xml", "<Types/>"),
        ZipEntry::deflated("AnalysisDocument.xml", "<Document/>"),
        ZipEntry::file("EmbeddedResources.xml", &resources),
        ZipEntry::deflated(path, &catalog),
    ])
}
