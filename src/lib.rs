pub mod app;
pub mod classifier;
pub mod config;
pub mod metrics;
pub mod metrics_aggregate;
pub mod parser;
pub mod probe;
pub mod runtime;
pub mod settings;
pub mod ui;
