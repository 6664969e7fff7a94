use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Extract modules, cells, and file attachments from lopecode notebooks.
///
/// Lopecode notebooks are large HTML files; these commands pull out the
/// relevant fragments so agents never have to load a whole file.
#[derive(Parser)]
#[command(name = "lopelens", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all modules in a notebook
    ListModules {
        /// Notebook HTML file
        file: PathBuf,
    },

    /// List cells in a specific module
    ListCells {
        /// Notebook HTML file
        file: PathBuf,
        /// Module id
        module: String,
    },

    /// Print a cell's full source (first name match, exact or substring)
    ReadCell {
        /// Notebook HTML file
        file: PathBuf,
        /// Module id
        module: String,
        /// Cell name or name fragment
        cell: String,
    },

    /// Print an entire module's source
    ReadModule {
        /// Notebook HTML file
        file: PathBuf,
        /// Module id
        module: String,
    },

    /// Show a notebook summary
    Summary {
        /// Notebook HTML file
        file: PathBuf,
    },

    /// Build a manifest.json index across all notebooks
    Manifest {
        /// Repository root containing lopecode/notebooks and lopecode/src
        #[arg(long, default_value = ".")]
        root: PathBuf,
    },
}
