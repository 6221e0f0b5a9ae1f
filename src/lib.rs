// Main library entry point for ast-consumer-matrix.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ports;
