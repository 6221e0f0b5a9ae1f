//! Error types shared by the analysis core and its collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn source text into an AST.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load grammar: {0}")]
    Grammar(String),

    #[error("parser produced no tree for {path}")]
    NoTree { path: PathBuf },

    #[error("syntax error in {path} at line {line}, column {column}")]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },
}

/// Failure to map a module name onto a source file.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("module `{0}` not found on the search path")]
    NotFound(String),

    #[error("module `{module}` at {path} is not backed by source")]
    NotSourceBacked { module: String, path: PathBuf },
}

/// A relative import that cannot be made absolute.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("relative import `{import}` climbs above the top-level package of `{package}`")]
pub struct BeyondTopLevel {
    pub import: String,
    pub package: String,
}

/// Failure while loading one module of the closure.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("cannot read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
