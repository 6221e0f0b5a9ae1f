//! Import Closure
//!
//! Folds the root module and every module it transitively imports into one
//! `AnalysisContext`.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::ast::AstNode;
use crate::domain::builder::{CallGraphBuilder, ModuleUnit};
use crate::domain::callgraph::AnalysisContext;
use crate::domain::error::AnalysisError;
use crate::ports::{ModuleLocator, SourceParser};

pub struct ImportClosure<'a> {
    pub parser: &'a dyn SourceParser,
    pub locator: &'a dyn ModuleLocator,
    pub builder: &'a CallGraphBuilder,
}

impl<'a> ImportClosure<'a> {
    /// Analyze `path` as `unit` and fold in its import closure.
    ///
    /// Only a failure on the root file is returned; failed imports are
    /// logged and recorded as skipped.
    pub fn run(&self, path: &Path, unit: &ModuleUnit) -> Result<AnalysisContext, AnalysisError> {
        let ctx = self.analyze_root(path, unit)?;
        Ok(self.close(ctx))
    }

    /// Parse and walk the root file into a fresh context.
    pub fn analyze_root(
        &self,
        path: &Path,
        unit: &ModuleUnit,
    ) -> Result<AnalysisContext, AnalysisError> {
        let source = read_source(path)?;
        let ast = self.parser.parse(path, &source)?;

        let mut ctx = AnalysisContext::new(&unit.id);
        ctx.mark_folded(&file_key(path));
        self.builder.build(unit, &ast, &mut ctx);
        Ok(ctx)
    }

    /// Drain the pending imports of `ctx`, folding each loaded module in.
    pub fn close(&self, mut ctx: AnalysisContext) -> AnalysisContext {
        let mut loaded = 0;

        while let Some(module) = ctx.next_pending() {
            match self.load(&module, &mut ctx) {
                Ok(Some((unit, ast))) => {
                    debug!(module = %module, package = %unit.package, "Folding import");
                    self.builder.build(&unit, &ast, &mut ctx);
                    loaded += 1;
                }
                Ok(None) => {}
                Err(e) => {
                    let reason = format!("{:#}", anyhow::Error::from(e));
                    warn!(module = %module, "Skipping import: {}", reason);
                    ctx.skip(&module, reason);
                }
            }
        }

        info!(
            root = %ctx.root_id(),
            loaded,
            skipped = ctx.skipped().len(),
            "Import closure complete"
        );
        ctx
    }

    /// Locate and parse `module`; `None` when its file was already folded
    /// under another name.
    fn load(
        &self,
        module: &str,
        ctx: &mut AnalysisContext,
    ) -> Result<Option<(ModuleUnit, AstNode)>, AnalysisError> {
        let located = self.locator.locate(module)?;
        if !ctx.mark_folded(&file_key(&located.path)) {
            debug!(module, path = %located.path.display(), "File already folded, skipping");
            return Ok(None);
        }
        let source = read_source(&located.path)?;
        let ast = self.parser.parse(&located.path, &source)?;
        Ok(Some((ModuleUnit::new(module, &located.package), ast)))
    }
}

/// Identity of a source file across the module names that reach it.
fn file_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Read a source file; the handle is released on every path.
fn read_source(path: &Path) -> Result<String, AnalysisError> {
    std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })
}
