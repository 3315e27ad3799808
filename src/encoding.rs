//! Byte-to-text decoding for catalog files.
//!
//! Catalog writers commonly emit ISO-8859-1 with a matching XML declaration,
//! so bytes are decoded before they reach the XML parser. Decoding never
//! fails: malformed sequences become U+FFFD.

use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, warn};

/// How far into the input the XML declaration is searched for
const DECL_SCAN_LIMIT: usize = 200;

/// Decode raw catalog bytes to UTF-8 text.
///
/// A byte order mark wins, then the declared `encoding="..."`, then UTF-8.
/// Unknown labels fall back to UTF-8.
pub fn decode_catalog(bytes: &[u8], source_name: &str) -> String {
    let (encoding, bom_len) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, bom_len),
        None => (declared_encoding(bytes, source_name).unwrap_or(UTF_8), 0),
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
    if had_errors {
        warn!(
            source = %source_name,
            "catalog is not valid {}; malformed bytes were replaced",
            encoding.name()
        );
    } else if encoding != UTF_8 {
        debug!(source = %source_name, "decoded catalog from {}", encoding.name());
    }
    text.into_owned()
}

fn declared_encoding(bytes: &[u8], source_name: &str) -> Option<&'static Encoding> {
    let label = declared_label(bytes)?;
    let encoding = Encoding::for_label(label);
    if encoding.is_none() {
        warn!(
            source = %source_name,
            "unknown encoding '{}' in XML declaration, reading as UTF-8",
            String::from_utf8_lossy(label)
        );
    }
    encoding
}

/// The raw `encoding` value of a leading `<?xml ... ?>` declaration
fn declared_label(bytes: &[u8]) -> Option<&[u8]> {
    let scan = &bytes[..bytes.len().min(DECL_SCAN_LIMIT)];
    if !scan.starts_with(b"<?xml") {
        return None;
    }
    let decl_end = scan.windows(2).position(|w| w == b"?>")?;
    let decl = &scan[..decl_end];

    let needle = b"encoding";
    let at = decl.windows(needle.len()).position(|w| w == needle)?;
    let rest = trim_ascii_start(&decl[at + needle.len()..]);
    let rest = trim_ascii_start(rest.strip_prefix(b"=")?);

    let quote = *rest.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let value = &rest[1..];
    let end = value.iter().position(|&b| b == quote)?;
    Some(&value[..end])
}

fn trim_ascii_start(bytes: &[u8]) -> &[u8] {
    let skip = bytes
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count();
    &bytes[skip..]
}
