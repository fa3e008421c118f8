//! Script body decoding
//!
//! Script bodies in the catalog are stored with three markup escapes and
//! with tabs written as `_x09`. Only these four tokens are recognised; this
//! is not a general entity decoder.

/// Token/replacement pairs, tried in this order at each position
const SUBSTITUTIONS: [(&str, &str); 4] = [
    ("_x09", "\t"),
    ("&amp;", "&"),
    ("&gt;", ">"),
    ("&lt;", "<"),
];

/// Turn a raw catalog code body into literal script text
///
/// A single left-to-right scan: replacements are never rescanned, so
/// `&amp;gt;` decodes to `&gt;`.
pub fn decode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find(['_', '&']) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        match SUBSTITUTIONS
            .iter()
            .find(|(token, _)| rest.starts_with(token))
        {
            Some((token, replacement)) => {
                out.push_str(replacement);
                rest = &rest[token.len()..];
            }
            None => {
                // '_' and '&' are single-byte, so this split is on a char boundary
                out.push_str(&rest[..1]);
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Inverse of [`decode`]: escape literal script text the way the catalog stores it
pub fn encode(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    for c in literal.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\t' => out.push_str("_x09"),
            c => out.push(c),
        }
    }
    out
}
