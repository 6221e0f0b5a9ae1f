// Domain model and analysis core.

pub mod ast;
pub mod builder;
pub mod callgraph;
pub mod error;
pub mod imports;
pub mod matrix;
pub mod resolver;
