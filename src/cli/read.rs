use anyhow::Result;
use std::path::Path;

use crate::error::LopeError;
use crate::extract::{extract_cells, find_cell};

use super::{load_notebook, require_module};

pub fn run_read_cell(path: &Path, module: &str, cell_name: &str) -> Result<()> {
    let notebook = load_notebook(path)?;
    let source = require_module(&notebook, module)?;
    let cells = extract_cells(source);

    match find_cell(&cells, cell_name) {
        Some(cell) => {
            println!("{}", cell.text(source));
            Ok(())
        }
        None => Err(LopeError::CellNotFound {
            name: cell_name.to_string(),
            module: module.to_string(),
            available: cells
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
        .into()),
    }
}

pub fn run_read_module(path: &Path, module: &str) -> Result<()> {
    let notebook = load_notebook(path)?;
    let source = require_module(&notebook, module)?;

    println!("{}", source);

    Ok(())
}
