use serde::Serialize;
use std::collections::BTreeMap;

/// Everything extracted from one lopecode notebook.
///
/// Built as a plain value by the markup scan — there is no parser object
/// holding state between documents, so extracting two notebooks in parallel
/// contexts never shares anything.
#[derive(Debug, Default, Clone)]
pub struct Notebook {
    /// Module id → full text of its `lope-module` block.
    /// A later block with the same id overwrites an earlier one.
    pub modules: BTreeMap<String, String>,
    /// File attachment records, in the order they appear in the document.
    pub files: Vec<FileAttachment>,
}

impl Notebook {
    /// Module ids in sorted order, for listings and not-found messages.
    pub fn module_ids(&self) -> Vec<&str> {
        self.modules.keys().map(|s| s.as_str()).collect()
    }
}

/// Metadata for one `lope-file` block. The inline content itself is not
/// retained — attachments can be large base64 payloads — only its length.
#[derive(Debug, Clone, Serialize)]
pub struct FileAttachment {
    pub id: String,
    /// Owning module id.
    pub module: String,
    /// Declared filename.
    pub file: String,
    /// Declared media type.
    pub mime: String,
    /// Byte length of the inline content.
    pub size: usize,
}

/// One cell definition found in a module's source.
///
/// `start..end` is a half-open byte range into the module text; `end` sits
/// immediately after the brace that balances the definition's opening brace.
#[derive(Debug, Clone, Serialize)]
pub struct Cell {
    pub name: String,
    /// Declared dependency names, in parameter order. May be empty.
    pub dependencies: Vec<String>,
    pub start: usize,
    pub end: usize,
    /// Full cell text if ≤ 200 chars, else the first 200 chars plus "...".
    pub preview: String,
}

impl Cell {
    /// The cell's full source, sliced out of the owning module's text.
    pub fn text<'a>(&self, module_source: &'a str) -> &'a str {
        &module_source[self.start..self.end]
    }
}
