//! Cross-notebook manifest generation.
//!
//! Walks the repository's fixed notebook layout, runs extraction on every
//! HTML file, and aggregates the result into a JSON index agents can consult
//! instead of opening multi-megabyte notebooks directly.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::extract::{extract_cells, extract_notebook};

/// Directories under the repository root that hold notebooks.
pub const NOTEBOOK_DIRS: [&str; 2] = ["lopecode/notebooks", "lopecode/src"];
/// Output directory for extracted artifacts, relative to the root.
pub const OUTPUT_DIR: &str = ".lope-extracted";
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Default, Serialize)]
pub struct Manifest {
    /// Notebook basename (file stem) → per-notebook summary.
    pub notebooks: BTreeMap<String, NotebookEntry>,
    /// Module id → basenames of the notebooks defining it.
    pub module_index: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct NotebookEntry {
    /// Path relative to the repository root.
    pub path: String,
    pub size_mb: f64,
    pub modules: BTreeMap<String, ModuleEntry>,
    pub file_attachments: usize,
}

#[derive(Debug, Serialize)]
pub struct ModuleEntry {
    /// Cell names in the order they appear in the module source.
    pub cells: Vec<String>,
    pub cell_count: usize,
}

impl Manifest {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// HTML files in the fixed notebook directories, sorted for deterministic
/// manifest output. Missing directories are simply skipped.
pub fn collect_notebook_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = NOTEBOOK_DIRS
        .iter()
        .flat_map(|dir| {
            WalkDir::new(root.join(dir))
                .min_depth(1)
                .max_depth(1)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "html"))
        })
        .collect();
    files.sort();
    files
}

/// Extract every notebook under `root` and aggregate the results.
///
/// A module id lands in `module_index` once per notebook that defines it,
/// even when the notebook redefines the id (extraction already collapses
/// duplicates to the last occurrence).
pub fn build_manifest(root: &Path) -> Result<Manifest> {
    let mut manifest = Manifest::default();

    for path in collect_notebook_files(root) {
        let html = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let size_bytes = fs::metadata(&path)
            .with_context(|| format!("failed to stat {}", path.display()))?
            .len();

        let basename = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("")
            .to_string();
        let relpath = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .display()
            .to_string();

        let notebook = extract_notebook(&html);

        let mut modules = BTreeMap::new();
        for (module_id, source) in &notebook.modules {
            let cells = extract_cells(source);
            modules.insert(
                module_id.clone(),
                ModuleEntry {
                    cells: cells.iter().map(|c| c.name.clone()).collect(),
                    cell_count: cells.len(),
                },
            );
            manifest
                .module_index
                .entry(module_id.clone())
                .or_default()
                .push(basename.clone());
        }

        manifest.notebooks.insert(
            basename,
            NotebookEntry {
                path: relpath,
                size_mb: size_bytes as f64 / 1024.0 / 1024.0,
                modules,
                file_attachments: notebook.files.len(),
            },
        );
    }

    Ok(manifest)
}

/// Write the manifest to `<root>/.lope-extracted/manifest.json` and return
/// the destination path. The write goes through a temp file and rename so a
/// crash never leaves a half-written manifest behind.
pub fn write_manifest(root: &Path, manifest: &Manifest) -> Result<PathBuf> {
    let output_dir = root.join(OUTPUT_DIR);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    let path = output_dir.join(MANIFEST_FILE);
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, manifest.to_json())
        .with_context(|| format!("failed to write {}", temp_path.display()))?;
    fs::rename(&temp_path, &path)
        .with_context(|| format!("failed to move manifest into place at {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_notebook(root: &Path, dir: &str, name: &str, html: &str) {
        let dir = root.join(dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), html).unwrap();
    }

    const SIMPLE: &str = r#"
        <script type="lope-module" id="app">const _main = function _main(md){return(md`hi`)}</script>
        <script type="lope-file" id="f" module="app" file="a.txt" mime="text/plain">abc</script>
    "#;

    #[test]
    fn test_manifest_indexes_both_notebook_dirs() {
        let tmp = TempDir::new().unwrap();
        write_notebook(tmp.path(), "lopecode/notebooks", "alpha.html", SIMPLE);
        write_notebook(tmp.path(), "lopecode/src", "beta.html", SIMPLE);

        let manifest = build_manifest(tmp.path()).unwrap();

        assert_eq!(manifest.notebooks.len(), 2);
        assert_eq!(manifest.module_index["app"], vec!["alpha", "beta"]);

        let alpha = &manifest.notebooks["alpha"];
        assert_eq!(alpha.path, "lopecode/notebooks/alpha.html");
        assert_eq!(alpha.file_attachments, 1);
        assert_eq!(alpha.modules["app"].cells, vec!["_main"]);
        assert_eq!(alpha.modules["app"].cell_count, 1);
    }

    #[test]
    fn test_redefined_module_lists_basename_once() {
        let tmp = TempDir::new().unwrap();
        let html = r#"
            <script type="lope-module" id="app">const _a = function(){1}</script>
            <script type="lope-module" id="app">const _b = function(){2}</script>
        "#;
        write_notebook(tmp.path(), "lopecode/notebooks", "nb.html", html);

        let manifest = build_manifest(tmp.path()).unwrap();

        assert_eq!(manifest.module_index["app"], vec!["nb"]);
        // Last definition wins for the cell listing too.
        assert_eq!(manifest.notebooks["nb"].modules["app"].cells, vec!["_b"]);
    }

    #[test]
    fn test_non_html_files_ignored_and_missing_dirs_ok() {
        let tmp = TempDir::new().unwrap();
        write_notebook(tmp.path(), "lopecode/notebooks", "nb.html", SIMPLE);
        write_notebook(tmp.path(), "lopecode/notebooks", "notes.txt", "skip me");
        // lopecode/src intentionally absent

        let manifest = build_manifest(tmp.path()).unwrap();
        assert_eq!(manifest.notebooks.len(), 1);
    }

    #[test]
    fn test_write_manifest_round_trips_as_json() {
        let tmp = TempDir::new().unwrap();
        write_notebook(tmp.path(), "lopecode/notebooks", "nb.html", SIMPLE);

        let manifest = build_manifest(tmp.path()).unwrap();
        let path = write_manifest(tmp.path(), &manifest).unwrap();

        assert_eq!(path, tmp.path().join(".lope-extracted/manifest.json"));
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(json["notebooks"]["nb"]["modules"]["app"]["cell_count"].is_u64());
        assert_eq!(json["module_index"]["app"][0], "nb");
    }
}
