// Call graph structures for the consumer-matrix analysis.
// Represents scope/function definitions and function call relationships.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// The call graph of one analysis run, keyed by the root module identifier.
///
/// Imported modules are folded into the same record. Every provider edge's
/// scope and function are registered as well, which `add_provider` guarantees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleRecord {
    pub id: String,
    scopes: BTreeSet<String>,
    functions: BTreeSet<String>,
    // (scope, function)
    provider_edges: BTreeSet<(String, String)>,
    // (function, callee)
    consumer_edges: BTreeSet<(String, String)>,
}

impl ModuleRecord {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    pub fn add_scope(&mut self, scope: &str) {
        if !self.scopes.contains(scope) {
            self.scopes.insert(scope.to_string());
        }
    }

    /// Record that `scope` defines `function`.
    pub fn add_provider(&mut self, scope: &str, function: &str) {
        self.add_scope(scope);
        if !self.functions.contains(function) {
            self.functions.insert(function.to_string());
        }
        self.provider_edges
            .insert((scope.to_string(), function.to_string()));
    }

    /// Record that `function` calls `callee`.
    pub fn add_consumer(&mut self, function: &str, callee: &str) {
        self.consumer_edges
            .insert((function.to_string(), callee.to_string()));
    }

    pub fn scopes(&self) -> &BTreeSet<String> {
        &self.scopes
    }

    pub fn functions(&self) -> &BTreeSet<String> {
        &self.functions
    }

    pub fn provider_edges(&self) -> &BTreeSet<(String, String)> {
        &self.provider_edges
    }

    pub fn consumer_edges(&self) -> &BTreeSet<(String, String)> {
        &self.consumer_edges
    }

    pub fn defines(&self, scope: &str, function: &str) -> bool {
        self.provider_edges
            .contains(&(scope.to_string(), function.to_string()))
    }

    pub fn calls(&self, function: &str, callee: &str) -> bool {
        self.consumer_edges
            .contains(&(function.to_string(), callee.to_string()))
    }

    /// Consumer edges whose callee names no known scope.
    ///
    /// These never surface in the dependency matrix; they are kept here for
    /// reporting.
    pub fn external_calls(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        let mut out: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for (function, callee) in &self.consumer_edges {
            if !self.scopes.contains(callee) {
                out.entry(function.as_str()).or_default().insert(callee.as_str());
            }
        }
        out
    }
}

/// An import that the closure could not fold into the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedImport {
    pub module: String,
    pub reason: String,
}

/// Mutable state of one analysis run.
///
/// Threaded by `&mut` through the builder and by value through the import
/// closure, which hands it back once the pending set is drained.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    pub record: ModuleRecord,
    registered: BTreeSet<String>,
    pending: BTreeSet<String>,
    // Source files already walked, so a file reachable under two module
    // names is folded once.
    folded_files: BTreeSet<PathBuf>,
    skipped: Vec<SkippedImport>,
}

impl AnalysisContext {
    /// Create the context for a run rooted at `root_id`; the root is registered.
    pub fn new(root_id: &str) -> Self {
        let mut registered = BTreeSet::new();
        registered.insert(root_id.to_string());
        Self {
            record: ModuleRecord::new(root_id),
            registered,
            pending: BTreeSet::new(),
            folded_files: BTreeSet::new(),
            skipped: Vec::new(),
        }
    }

    pub fn root_id(&self) -> &str {
        &self.record.id
    }

    /// Queue `module` unless it is already registered or pending.
    /// Returns whether it was queued.
    pub fn discover_import(&mut self, module: &str) -> bool {
        if self.registered.contains(module) || self.pending.contains(module) {
            return false;
        }
        self.pending.insert(module.to_string())
    }

    /// Take the next pending module and register it, so it is never queued again.
    pub fn next_pending(&mut self) -> Option<String> {
        let module = self.pending.pop_first()?;
        self.registered.insert(module.clone());
        Some(module)
    }

    pub fn mark_registered(&mut self, module: &str) {
        self.pending.remove(module);
        self.registered.insert(module.to_string());
    }

    pub fn is_registered(&self, module: &str) -> bool {
        self.registered.contains(module)
    }

    pub fn pending(&self) -> &BTreeSet<String> {
        &self.pending
    }

    /// Claim `path` for folding. Returns false if it was already folded.
    pub fn mark_folded(&mut self, path: &Path) -> bool {
        if self.folded_files.contains(path) {
            return false;
        }
        self.folded_files.insert(path.to_path_buf())
    }

    pub fn skip(&mut self, module: &str, reason: String) {
        self.skipped.push(SkippedImport {
            module: module.to_string(),
            reason,
        });
    }

    pub fn skipped(&self) -> &[SkippedImport] {
        &self.skipped
    }

    /// Finish the run and release the record for matrix assembly.
    pub fn into_record(self) -> ModuleRecord {
        self.record
    }
}
