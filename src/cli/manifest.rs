use anyhow::Result;
use console::{style, Emoji};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::manifest::{build_manifest, write_manifest};

static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "");
static SCANNING: Emoji<'_, '_> = Emoji("📚 ", "");

pub fn run_manifest(root: &Path) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!(
        "{}Scanning notebooks in {}...",
        SCANNING,
        root.display()
    ));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let manifest = build_manifest(root)?;
    let path = write_manifest(root, &manifest)?;

    pb.finish_and_clear();

    println!("{}Manifest written to: {}", SUCCESS, path.display());
    println!("Notebooks: {}", style(manifest.notebooks.len()).cyan());
    println!(
        "Unique modules: {}",
        style(manifest.module_index.len()).cyan()
    );

    Ok(())
}
