//! Error type shared by the scanner, the passes and the CLI.

use std::path::PathBuf;

/// Errors that can occur while minifying.
#[derive(thiserror::Error, Debug)]
pub enum MinifyError {
    /// A quote, backtick or expansion was still open when a pass reached the
    /// end of its input. The whole minification is aborted.
    #[error("unbalanced delimiter `{delimiter}` at end of input ({pass} pass, depth {depth})")]
    UnbalancedDelimiter {
        pass: &'static str,
        delimiter: char,
        depth: usize,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: invalid configuration: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl MinifyError {
    /// Attach a pass name to an error raised by a bare scanner.
    pub(crate) fn in_pass(self, name: &'static str) -> Self {
        match self {
            MinifyError::UnbalancedDelimiter {
                delimiter, depth, ..
            } => MinifyError::UnbalancedDelimiter {
                pass: name,
                delimiter,
                depth,
            },
            other => other,
        }
    }
}
