//! Minimal owned XML tree
//!
//! Both DXP manifests are tiny, so they are read fully into a tree of
//! [`Element`]s. Text content is kept raw: entity references are left
//! escaped for [`decode`](crate::decode::decode) to handle.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{Result, SpottyError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// An XML element with its attributes, child elements and raw text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Local name (namespace prefix stripped)
    pub name: String,
    /// Attributes in document order, keyed by local name
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order
    pub children: Vec<Element>,
    /// Concatenated raw text and CDATA content directly inside this element
    pub text: String,
}

impl Element {
    /// Parse a complete document and return its root element
    ///
    /// `document` names the input in error messages.
    pub fn parse(xml: &[u8], document: &str) -> Result<Self> {
        let xml = xml.strip_prefix(UTF8_BOM).unwrap_or(xml);
        let mut reader = Reader::from_reader(xml);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    if root.is_some() {
                        return Err(SpottyError::malformed(document, "multiple root elements"));
                    }
                    stack.push(Self::from_start(e, document)?);
                }
                Event::Empty(ref e) => {
                    if root.is_some() {
                        return Err(SpottyError::malformed(document, "multiple root elements"));
                    }
                    let element = Self::from_start(e, document)?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
                Event::End(_) => {
                    // quick-xml has already matched the end name against the open tag
                    let element = stack
                        .pop()
                        .ok_or_else(|| SpottyError::malformed(document, "unexpected end tag"))?;
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => root = Some(element),
                    }
                }
                Event::Text(ref e) => match stack.last_mut() {
                    Some(current) => current.text.push_str(utf8(e, document)?),
                    None => {
                        if !e.iter().all(u8::is_ascii_whitespace) {
                            return Err(SpottyError::malformed(
                                document,
                                "text outside the root element",
                            ));
                        }
                    }
                },
                Event::CData(ref e) => match stack.last_mut() {
                    Some(current) => current.text.push_str(utf8(e, document)?),
                    None => {
                        return Err(SpottyError::malformed(
                            document,
                            "CDATA outside the root element",
                        ))
                    }
                },
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctype
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(SpottyError::malformed(
                document,
                format!("unclosed element <{}>", open.name),
            ));
        }

        root.ok_or_else(|| SpottyError::malformed(document, "no root element"))
    }

    fn from_start(start: &BytesStart<'_>, document: &str) -> Result<Self> {
        let name = local_name(start.local_name().as_ref());
        let mut attributes = Vec::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| SpottyError::malformed(document, e.to_string()))?;
            let value = attr
                .unescape_value()
                .map_err(|e| SpottyError::malformed(document, e.to_string()))?;
            attributes.push((local_name(attr.key.local_name().as_ref()), value.into_owned()));
        }

        Ok(Self {
            name,
            attributes,
            ..Default::default()
        })
    }

    /// Child elements with the given local name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// The single child element with the given local name
    pub fn only_child(&self, name: &str) -> Result<&Element> {
        let mut matches = self.children.iter().filter(|child| child.name == name);
        match (matches.next(), matches.next()) {
            (Some(child), None) => Ok(child),
            (first, second) => Err(SpottyError::MissingElement {
                parent: self.name.clone(),
                child: name.to_string(),
                found: first.iter().chain(second.iter()).count() + matches.count(),
            }),
        }
    }

    /// Value of an attribute, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of an attribute that must be present
    pub fn required_attr(&self, name: &str) -> Result<&str> {
        self.attr(name).ok_or_else(|| SpottyError::MissingAttribute {
            element: self.name.clone(),
            attribute: name.to_string(),
        })
    }
}

fn utf8<'a>(bytes: &'a [u8], document: &str) -> Result<&'a str> {
    std::str::from_utf8(bytes)
        .map_err(|e| SpottyError::malformed(document, format!("text is not UTF-8: {}", e)))
}

fn local_name(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
