pub mod cells;
pub mod markup;

pub use cells::{extract_cells, find_cell};
pub use markup::{extract_notebook, DEFAULT_MODULE_ID, FILE_TYPE, MODULE_TYPE};
