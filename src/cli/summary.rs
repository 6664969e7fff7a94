use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::Path;

use crate::extract::extract_cells;

use super::{basename, load_notebook};

pub fn run_summary(path: &Path) -> Result<()> {
    let notebook = load_notebook(path)?;
    let size_bytes = fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len();

    println!("Notebook: {}", style(basename(path)).bold());
    println!("Size: {:.1} MB", size_bytes as f64 / 1024.0 / 1024.0);
    println!("Modules: {}", notebook.modules.len());
    println!("File attachments: {}", notebook.files.len());
    println!();

    let mut total_cells = 0;
    for (id, source) in &notebook.modules {
        let cell_count = extract_cells(source).len();
        total_cells += cell_count;
        println!("  {}: {} cells", id, cell_count);
    }

    println!("\nTotal cells: {}", total_cells);

    Ok(())
}
