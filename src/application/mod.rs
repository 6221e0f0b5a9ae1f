pub mod closure;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::domain::builder::{CallGraphBuilder, ModuleUnit};
use crate::domain::callgraph::ModuleRecord;
use crate::domain::matrix::MatrixAssembler;
use crate::domain::resolver::NameResolver;
use crate::ports::{MatrixRenderer, ModuleLocator, SourceParser};

pub use closure::ImportClosure;

pub struct AnalyzeUsecase<'a> {
    pub parser: &'a dyn SourceParser,
    pub locator: &'a dyn ModuleLocator,
    pub renderer: &'a dyn MatrixRenderer,
}

impl<'a> AnalyzeUsecase<'a> {
    /// Analyze the configured input and render its matrices.
    /// Returns the written documents; empty when nothing is defined.
    pub fn run(&self, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
        let record = self.analyze(config)?;

        let Some(matrices) = MatrixAssembler::assemble(&record) else {
            info!(module = %record.id, "No scope defines any function; nothing to render");
            return Ok(vec![]);
        };

        let path = self
            .renderer
            .render(&matrices, &config.output_dir)
            .with_context(|| format!("Failed to render matrices for {}", record.id))?;
        Ok(vec![path])
    }

    /// Build the record for the input and its import closure.
    pub fn analyze(&self, config: &AnalysisConfig) -> Result<ModuleRecord> {
        let builder = CallGraphBuilder::new(NameResolver::new(&config.self_names));
        let closure = ImportClosure {
            parser: self.parser,
            locator: self.locator,
            builder: &builder,
        };
        let unit = ModuleUnit::new(&config.root_module, &config.root_package);

        info!(input = %config.input.display(), module = %unit.id, "Analyzing");
        let ctx = closure
            .run(&config.input, &unit)
            .with_context(|| format!("Failed to analyze {}", config.input.display()))?;

        let record = ctx.into_record();
        debug!(
            scopes = record.scopes().len(),
            functions = record.functions().len(),
            provider_edges = record.provider_edges().len(),
            consumer_edges = record.consumer_edges().len(),
            external_callers = record.external_calls().len(),
            "Module record complete"
        );
        Ok(record)
    }
}
