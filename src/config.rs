//! Analysis configuration derived from the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Names treated as a reference to the enclosing instance or class.
pub const DEFAULT_SELF_NAMES: &[&str] = &["self", "cls"];

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Canonical path of the root source file.
    pub input: PathBuf,
    /// Identifier of the root module; also names the output document.
    pub root_module: String,
    /// Package anchoring the root module's relative imports.
    pub root_package: String,
    /// Directories searched, in order, when resolving imports.
    pub search_paths: Vec<PathBuf>,
    /// Where rendered documents are written.
    pub output_dir: PathBuf,
    pub self_names: Vec<String>,
}

impl AnalysisConfig {
    /// Configuration for analyzing `input`.
    ///
    /// The search path is the input's own directory followed by the parent of
    /// that directory, so the directory holding the input is importable as a
    /// package. Documents go to the current working directory.
    pub fn for_input(input: &Path) -> Result<Self> {
        let input = input
            .canonicalize()
            .with_context(|| format!("Cannot access input file {}", input.display()))?;
        let output_dir = std::env::current_dir().context("Cannot determine working directory")?;
        Ok(Self::with_output_dir(input, output_dir))
    }

    /// Like `for_input`, for an already canonical `input`.
    pub fn with_output_dir(input: PathBuf, output_dir: PathBuf) -> Self {
        let containing = input.parent().map(Path::to_path_buf).unwrap_or_default();
        let package = containing
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let root_module = if stem == "__init__" && !package.is_empty() {
            package.clone()
        } else {
            stem
        };

        let mut search_paths = vec![containing.clone()];
        if let Some(parent) = containing.parent() {
            search_paths.push(parent.to_path_buf());
        }

        Self {
            input,
            root_module,
            root_package: package,
            search_paths,
            output_dir,
            self_names: DEFAULT_SELF_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
