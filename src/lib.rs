//! shminify: a shell script minifier.
//!
//! Removes comments, collapses redundant whitespace, turns newlines into
//! statement separators where that is safe, and strips blanks around
//! operator characters, without changing what the script does.
//!
//! # Architecture
//!
//! - **[`scan`]**: Lexical scanner: delimiter stack, escape tracking, per-character classification.
//! - **[`passes`]**: The four minification passes, each a thin consumer of the scanner.
//! - **[`pipeline`]**: Runs the configured passes in order.
//! - **[`config`]**: Configuration loading: embedded defaults + user overlay merge.
//! - **[`logging`]**: `simplelog` setup for stderr and the optional log file.

/// Configuration types, loading, and overlay merge logic.
pub mod config;
/// Error type for scanning, configuration and I/O.
pub mod error;
/// Logger initialisation.
pub mod logging;
/// Minification passes.
pub mod passes;
/// Ordered pass runner.
pub mod pipeline;
/// Lexical scanner for shell source.
pub mod scan;

pub use error::MinifyError;

/// Minify `source` with the default configuration.
///
/// Fails with [`MinifyError::UnbalancedDelimiter`] when a quote, backtick or
/// expansion is left open.
pub fn minify(source: &str) -> Result<String, MinifyError> {
    minify_with(source, &config::Config::default_config())
}

/// Minify `source` with an explicit configuration.
pub fn minify_with(source: &str, config: &config::Config) -> Result<String, MinifyError> {
    pipeline::Pipeline::from_config(config).run(source)
}
