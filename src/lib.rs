//! lopelens — selective access to lopecode notebooks.
//!
//! Lopecode notebooks are single HTML files, often several megabytes, that
//! embed their code modules and file attachments as tagged `<script>`
//! blocks. This crate extracts just the pieces an agent asks for:
//!
//! - [`extract::extract_notebook`] scans the markup and buckets script
//!   blocks into modules and attachment records.
//! - [`extract::extract_cells`] finds the function-shaped cell definitions
//!   inside one module's source, with dependencies and exact byte spans.
//! - [`manifest`] aggregates both across a repository into a JSON index.
//!
//! Extraction is pure and synchronous: each call works on one document's
//! text and shares nothing, so callers may run extractions for different
//! documents concurrently without coordination.

pub mod cli;
pub mod error;
pub mod extract;
pub mod manifest;
pub mod types;

pub use error::LopeError;
pub use types::{Cell, FileAttachment, Notebook};
