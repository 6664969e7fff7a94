mod args;
mod cells;
mod manifest;
mod modules;
mod read;
mod summary;

pub use args::{Args, Command};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::error::LopeError;
use crate::extract::extract_notebook;
use crate::types::Notebook;

pub fn run(args: Args) -> Result<()> {
    match args.command {
        Command::ListModules { file } => modules::run_list_modules(&file),
        Command::ListCells { file, module } => cells::run_list_cells(&file, &module),
        Command::ReadCell { file, module, cell } => read::run_read_cell(&file, &module, &cell),
        Command::ReadModule { file, module } => read::run_read_module(&file, &module),
        Command::Summary { file } => summary::run_summary(&file),
        Command::Manifest { root } => manifest::run_manifest(&root),
    }
}

/// Read a notebook file and extract its modules and attachments.
pub(crate) fn load_notebook(path: &Path) -> Result<Notebook> {
    let html = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(extract_notebook(&html))
}

/// Look up a module's source, or fail with the list of valid ids.
pub(crate) fn require_module<'a>(notebook: &'a Notebook, id: &str) -> Result<&'a str> {
    notebook
        .modules
        .get(id)
        .map(|source| source.as_str())
        .ok_or_else(|| {
            LopeError::ModuleNotFound {
                id: id.to_string(),
                available: notebook.module_ids().join(", "),
            }
            .into()
        })
}

pub(crate) fn basename(path: &Path) -> &str {
    path.file_name().and_then(|name| name.to_str()).unwrap_or("")
}
