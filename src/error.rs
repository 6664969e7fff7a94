use thiserror::Error;

/// Lookup failures surfaced to the user. Extraction itself never errors —
/// malformed markup or unbalanced braces degrade to partial results instead.
/// Each variant carries the valid alternatives so the message is actionable.
#[derive(Debug, Error)]
pub enum LopeError {
    #[error("module '{id}' not found. Available modules: {available}")]
    ModuleNotFound { id: String, available: String },

    #[error("cell '{name}' not found in module '{module}'. Available cells: {available}")]
    CellNotFound {
        name: String,
        module: String,
        available: String,
    },
}
