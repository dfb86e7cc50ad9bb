// Frameworks layer: configuration loading, tracing bootstrap and entry point.

pub mod config;
pub mod runner;
