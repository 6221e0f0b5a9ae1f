//! Matrix Assembly
//!
//! Converts a finished `ModuleRecord` into the labeled boolean matrices the
//! renderer draws.

use serde::Serialize;

use crate::domain::callgraph::ModuleRecord;

/// Row-major boolean matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryMatrix {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<Vec<u8>>,
}

impl BinaryMatrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![0; cols]; rows],
        }
    }

    pub fn set(&mut self, row: usize, col: usize) {
        self.cells[row][col] = 1;
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row][col] == 1
    }

    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row]
    }

    pub fn ones(&self) -> usize {
        self.cells
            .iter()
            .map(|r| r.iter().filter(|c| **c == 1).count())
            .sum()
    }
}

/// Assembled matrices for one module.
///
/// Rows are functions, columns are scopes; both label lists are sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleMatrices {
    pub module: String,
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    /// Cell (function, scope) is set when the scope defines the function.
    pub provider: BinaryMatrix,
    /// Cell (function, scope) is set when the function calls the scope by name.
    pub dependencies: BinaryMatrix,
}

impl ModuleMatrices {
    pub fn row_index(&self, function: &str) -> Option<usize> {
        self.row_labels.iter().position(|l| l == function)
    }

    pub fn column_index(&self, scope: &str) -> Option<usize> {
        self.column_labels.iter().position(|l| l == scope)
    }
}

pub struct MatrixAssembler;

impl MatrixAssembler {
    /// Build the matrices for `record`, or `None` when it defines nothing.
    pub fn assemble(record: &ModuleRecord) -> Option<ModuleMatrices> {
        if record.provider_edges().is_empty() {
            return None;
        }

        let row_labels: Vec<String> = record.functions().iter().cloned().collect();
        let column_labels: Vec<String> = record.scopes().iter().cloned().collect();

        let mut provider = BinaryMatrix::zeros(row_labels.len(), column_labels.len());
        let mut dependencies = BinaryMatrix::zeros(row_labels.len(), column_labels.len());

        for (row, function) in row_labels.iter().enumerate() {
            for (col, scope) in column_labels.iter().enumerate() {
                if record.defines(scope, function) {
                    provider.set(row, col);
                }
                if record.calls(function, scope) {
                    dependencies.set(row, col);
                }
            }
        }

        Some(ModuleMatrices {
            module: record.id.clone(),
            row_labels,
            column_labels,
            provider,
            dependencies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_provider_set_is_excluded() {
        let mut record = ModuleRecord::new("empty");
        record.add_scope("Lonely");
        record.add_consumer("nobody", "Lonely");

        assert!(MatrixAssembler::assemble(&record).is_none());
    }

    #[test]
    fn test_provider_and_dependency_cells() {
        let mut record = ModuleRecord::new("shop");
        record.add_provider("Cart", "add");
        record.add_provider("Order", "place");
        record.add_consumer("place", "Cart");
        record.add_consumer("place", "print");

        let m = MatrixAssembler::assemble(&record).unwrap();
        assert_eq!(m.module, "shop");
        assert_eq!(m.row_labels, vec!["add", "place"]);
        assert_eq!(m.column_labels, vec!["Cart", "Order"]);

        let (add, place) = (m.row_index("add").unwrap(), m.row_index("place").unwrap());
        let (cart, order) = (m.column_index("Cart").unwrap(), m.column_index("Order").unwrap());

        assert!(m.provider.get(add, cart));
        assert!(m.provider.get(place, order));
        assert_eq!(m.provider.ones(), 2);

        assert!(m.dependencies.get(place, cart));
        assert_eq!(m.dependencies.ones(), 1);
    }

    #[test]
    fn test_shared_function_name_sets_both_columns() {
        let mut record = ModuleRecord::new("jobs");
        record.add_provider("C1", "run");
        record.add_provider("C2", "run");

        let m = MatrixAssembler::assemble(&record).unwrap();
        assert_eq!(m.provider.rows, 1);
        assert_eq!(m.provider.row(0), &[1, 1]);
    }
}
