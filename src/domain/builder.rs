//! Call Graph Builder
//!
//! Walks one module's AST and folds its scopes, provider edges, consumer
//! edges and top-level imports into an `AnalysisContext`.

use tracing::{debug, trace, warn};

use crate::domain::ast::{AstNode, AstNodeKind};
use crate::domain::callgraph::AnalysisContext;
use crate::domain::imports::imported_modules;
use crate::domain::resolver::NameResolver;

/// Identity of a module being walked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleUnit {
    /// Dotted module identifier, also the implicit top-level scope name.
    pub id: String,
    /// Dotted package used to anchor relative imports.
    pub package: String,
}

impl ModuleUnit {
    pub fn new(id: &str, package: &str) -> Self {
        Self {
            id: id.to_string(),
            package: package.to_string(),
        }
    }
}

/// Where the walker currently is.
#[derive(Debug, Clone, Copy)]
enum Enclosing<'a> {
    TopLevel,
    ClassBody(&'a str),
    Function(&'a str),
}

#[derive(Debug, Default)]
struct WalkStats {
    functions: usize,
    calls: usize,
    unattributed_calls: usize,
    imports: usize,
}

/// Populates module records from ASTs.
#[derive(Debug, Clone, Default)]
pub struct CallGraphBuilder {
    resolver: NameResolver,
}

impl CallGraphBuilder {
    pub fn new(resolver: NameResolver) -> Self {
        Self { resolver }
    }

    /// Walk `ast` and record everything it defines, calls and imports.
    pub fn build(&self, unit: &ModuleUnit, ast: &AstNode, ctx: &mut AnalysisContext) {
        let mut stats = WalkStats::default();
        self.visit(unit, ast, Enclosing::TopLevel, ctx, &mut stats);
        debug!(
            module = %unit.id,
            functions = stats.functions,
            calls = stats.calls,
            unattributed_calls = stats.unattributed_calls,
            imports = stats.imports,
            "Walked module"
        );
    }

    fn visit<'a>(
        &self,
        unit: &'a ModuleUnit,
        node: &'a AstNode,
        enclosing: Enclosing<'a>,
        ctx: &mut AnalysisContext,
        stats: &mut WalkStats,
    ) {
        match node.kind {
            AstNodeKind::Class => {
                ctx.record.add_scope(node.name());
                self.visit_children(unit, node, Enclosing::ClassBody(node.name()), ctx, stats);
            }
            AstNodeKind::Function => {
                let inner = match enclosing {
                    // Always under the module scope, even if a class elsewhere
                    // defines a method of the same name.
                    Enclosing::TopLevel => self.register(&unit.id, node.name(), ctx, stats),
                    Enclosing::ClassBody(scope) => self.register(scope, node.name(), ctx, stats),
                    // Nested definitions belong to the enclosing function.
                    Enclosing::Function(_) => enclosing,
                };
                self.visit_children(unit, node, inner, ctx, stats);
            }
            AstNodeKind::Call => {
                if let Some(target) = node.first_child() {
                    self.record_call(target, enclosing, ctx, stats);
                }
                self.visit_children(unit, node, enclosing, ctx, stats);
            }
            AstNodeKind::Import => {
                if let Enclosing::TopLevel = enclosing {
                    self.discover(unit, node, ctx, stats);
                }
            }
            _ => self.visit_children(unit, node, enclosing, ctx, stats),
        }
    }

    fn visit_children<'a>(
        &self,
        unit: &'a ModuleUnit,
        node: &'a AstNode,
        enclosing: Enclosing<'a>,
        ctx: &mut AnalysisContext,
        stats: &mut WalkStats,
    ) {
        for child in &node.children {
            self.visit(unit, child, enclosing, ctx, stats);
        }
    }

    fn register<'a>(
        &self,
        scope: &str,
        function: &'a str,
        ctx: &mut AnalysisContext,
        stats: &mut WalkStats,
    ) -> Enclosing<'a> {
        ctx.record.add_provider(scope, function);
        stats.functions += 1;
        Enclosing::Function(function)
    }

    fn record_call(
        &self,
        target: &AstNode,
        enclosing: Enclosing<'_>,
        ctx: &mut AnalysisContext,
        stats: &mut WalkStats,
    ) {
        let Enclosing::Function(function) = enclosing else {
            stats.unattributed_calls += 1;
            trace!("Call outside of a function body ignored");
            return;
        };

        let resolved = self.resolver.resolve(target);
        if !resolved.is_complete() {
            trace!(function, name = resolved.as_str(), "Partially resolved call target");
        }
        if resolved.as_str().is_empty() {
            return;
        }
        ctx.record.add_consumer(function, resolved.as_str());
        stats.calls += 1;
    }

    fn discover(
        &self,
        unit: &ModuleUnit,
        import: &AstNode,
        ctx: &mut AnalysisContext,
        stats: &mut WalkStats,
    ) {
        match imported_modules(&unit.package, import) {
            Ok(modules) => {
                for module in modules {
                    if ctx.discover_import(&module) {
                        trace!(from = %unit.id, module = %module, "Queued import");
                        stats.imports += 1;
                    }
                }
            }
            Err(e) => warn!(module = %unit.id, "Skipping import: {}", e),
        }
    }
}
