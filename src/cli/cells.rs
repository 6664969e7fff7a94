use anyhow::Result;
use console::style;
use std::path::Path;

use crate::extract::extract_cells;

use super::{load_notebook, require_module};

/// Dependencies shown per cell before collapsing to an overflow count.
const DEPS_SHOWN: usize = 3;

pub fn run_list_cells(path: &Path, module: &str) -> Result<()> {
    let notebook = load_notebook(path)?;
    let source = require_module(&notebook, module)?;
    let cells = extract_cells(source);

    println!("Cells in {}:", module);
    for cell in &cells {
        let mut deps = cell
            .dependencies
            .iter()
            .take(DEPS_SHOWN)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        if cell.dependencies.len() > DEPS_SHOWN {
            deps.push_str(&format!(", ... (+{})", cell.dependencies.len() - DEPS_SHOWN));
        }
        println!("  {}: ({})", style(&cell.name).cyan(), deps);
    }

    Ok(())
}
