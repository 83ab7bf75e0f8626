// Library surface for headless/integration tests and the binary.
pub mod app;
pub mod config;
pub mod language;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod typing_policy;
pub mod ui;
pub mod word_generator;
pub mod word_view;
