use std::path::{Path, PathBuf};

use crate::domain::ast::AstNode;
use crate::domain::error::{ParseError, ResolveError};
use crate::domain::matrix::ModuleMatrices;

/// Turns source text into the language-neutral AST.
pub trait SourceParser {
    fn parse(&self, path: &Path, source: &str) -> Result<AstNode, ParseError>;
}

/// A module name located on the search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedModule {
    pub path: PathBuf,
    /// Dotted package that anchors the module's relative imports.
    pub package: String,
}

/// Maps dotted module names onto source files.
pub trait ModuleLocator {
    fn locate(&self, module: &str) -> Result<LocatedModule, ResolveError>;
}

/// Writes assembled matrices out as a document; returns the written path.
pub trait MatrixRenderer {
    fn render(&self, matrices: &ModuleMatrices, out_dir: &Path) -> std::io::Result<PathBuf>;
}
