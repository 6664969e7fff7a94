use anyhow::Result;
use console::style;
use std::path::Path;

use crate::extract::extract_cells;

use super::{basename, load_notebook};

pub fn run_list_modules(path: &Path) -> Result<()> {
    let notebook = load_notebook(path)?;

    println!("Modules in {}:", basename(path));
    for (id, source) in &notebook.modules {
        let cell_count = extract_cells(source).len();
        println!("  {} ({} cells)", style(id).green(), cell_count);
    }
    println!("\nFile attachments: {}", notebook.files.len());

    Ok(())
}
