//! Markup extraction for lopecode notebooks.
//!
//! Lopecode embeds modules and file attachments as tagged script blocks:
//!
//! ```html
//! <script type="lope-module" id="app">const _main = function _main(){...}</script>
//! <script type="lope-file" id="f1" module="app" file="data.csv" mime="text/csv">...</script>
//! ```
//!
//! Only those two patterns matter, so this is a minimal DOM-less forward
//! scan, not a general HTML parser. Script attributes are snapshotted when
//! the element opens; text is accumulated only between that open and its
//! matching close. Malformed markup degrades to partial or empty results —
//! nothing here returns an error.

use crate::types::{FileAttachment, Notebook};

/// `type` attribute marking a module block.
pub const MODULE_TYPE: &str = "lope-module";
/// `type` attribute marking a file attachment block.
pub const FILE_TYPE: &str = "lope-file";
/// Module id used when a module block carries no `id` attribute.
pub const DEFAULT_MODULE_ID: &str = "unknown";

/// Scan a notebook's raw markup and collect its modules and attachments.
///
/// Modules with duplicate ids overwrite earlier ones (last write wins).
/// Attachments keep document order. Text outside script elements is
/// discarded, as is the content of script elements with an unrecognized
/// `type`.
pub fn extract_notebook(html: &str) -> Notebook {
    let mut notebook = Notebook::default();
    let bytes = html.as_bytes();
    let mut i = 0;

    while let Some(offset) = html[i..].find('<') {
        let lt = i + offset;
        let rest = &html[lt..];

        if rest.starts_with("<!--") {
            match html[lt + 4..].find("-->") {
                Some(end) => i = lt + 4 + end + 3,
                None => break,
            }
            continue;
        }

        if rest.starts_with("</") {
            // Close tag outside any tracked element; skip over it.
            match html[lt..].find('>') {
                Some(end) => i = lt + end + 1,
                None => break,
            }
            continue;
        }

        if !bytes.get(lt + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
            // Doctype, processing instruction, or a stray '<' in text.
            i = lt + 1;
            continue;
        }

        let Some(tag) = parse_open_tag(html, lt + 1) else {
            break; // tag runs past end of input
        };

        if !tag.name.eq_ignore_ascii_case("script") {
            i = tag.after;
            continue;
        }

        if tag.self_closing {
            record_script(&tag.attrs, "", &mut notebook);
            i = tag.after;
            continue;
        }

        // Script content is raw text through the matching close tag; nested
        // markup inside it is not interpreted.
        let Some(close) = find_ci(html, "</script", tag.after) else {
            break; // unterminated script: emit nothing for it
        };
        record_script(&tag.attrs, &html[tag.after..close], &mut notebook);
        i = match html[close..].find('>') {
            Some(end) => close + end + 1,
            None => break,
        };
    }

    notebook
}

struct OpenTag {
    name: String,
    attrs: Vec<(String, String)>,
    /// Byte position just past the closing '>'.
    after: usize,
    self_closing: bool,
}

/// Parse an open tag starting at the first byte of its name. Attribute names
/// are lowercased; values keep their case. Returns `None` only when the tag
/// is cut off by end of input.
fn parse_open_tag(html: &str, start: usize) -> Option<OpenTag> {
    let bytes = html.as_bytes();
    let mut i = start;

    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-') {
        i += 1;
    }
    let name = html[start..i].to_ascii_lowercase();

    let mut attrs = Vec::new();
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            return None;
        }
        match bytes[i] {
            b'>' => {
                return Some(OpenTag {
                    name,
                    attrs,
                    after: i + 1,
                    self_closing: false,
                })
            }
            b'/' => {
                while i < bytes.len() && bytes[i] != b'>' {
                    i += 1;
                }
                if i >= bytes.len() {
                    return None;
                }
                return Some(OpenTag {
                    name,
                    attrs,
                    after: i + 1,
                    self_closing: true,
                });
            }
            _ => {
                let key_start = i;
                while i < bytes.len()
                    && !bytes[i].is_ascii_whitespace()
                    && !matches!(bytes[i], b'=' | b'>' | b'/')
                {
                    i += 1;
                }
                let key = html[key_start..i].to_ascii_lowercase();

                while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                let mut value = String::new();
                if i < bytes.len() && bytes[i] == b'=' {
                    i += 1;
                    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    if i < bytes.len() && (bytes[i] == b'"' || bytes[i] == b'\'') {
                        let quote = bytes[i];
                        i += 1;
                        let value_start = i;
                        while i < bytes.len() && bytes[i] != quote {
                            i += 1;
                        }
                        if i >= bytes.len() {
                            return None;
                        }
                        value = html[value_start..i].to_string();
                        i += 1;
                    } else {
                        let value_start = i;
                        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>'
                        {
                            i += 1;
                        }
                        value = html[value_start..i].to_string();
                    }
                }
                if !key.is_empty() {
                    attrs.push((key, value));
                }
            }
        }
    }
}

/// Bucket one closed script element by its `type` attribute. Missing
/// attributes never fail extraction — defaults are substituted.
fn record_script(attrs: &[(String, String)], content: &str, notebook: &mut Notebook) {
    // Last occurrence wins for duplicated attributes.
    let attr = |name: &str| {
        attrs
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    };

    match attr("type").unwrap_or("") {
        MODULE_TYPE => {
            let id = attr("id").unwrap_or(DEFAULT_MODULE_ID);
            notebook.modules.insert(id.to_string(), content.to_string());
        }
        FILE_TYPE => notebook.files.push(FileAttachment {
            id: attr("id").unwrap_or("").to_string(),
            module: attr("module").unwrap_or("").to_string(),
            file: attr("file").unwrap_or("").to_string(),
            mime: attr("mime").unwrap_or("").to_string(),
            size: content.len(),
        }),
        _ => {}
    }
}

/// ASCII case-insensitive substring search starting at `from`.
fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}
