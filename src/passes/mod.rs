//! Minification passes.
//!
//! Each pass re-scans the previous pass's output with a fresh [`Scanner`]
//! and keeps, drops or rewrites characters based on the scanner's
//! classification and a small window of lookaround.
//!
//! [`Scanner`]: crate::scan::Scanner

/// Drops comments, keeping the newline that ends them.
pub mod comments;
/// Turns newlines into `;`, `;;`, a space, or nothing.
pub mod newlines;
/// Removes spaces next to `| & ; < > ( )`.
pub mod operators;
/// Collapses runs of blanks and removes empty lines and line continuations.
pub mod whitespace;

use crate::error::MinifyError;

/// One stage of the minification pipeline.
pub trait Pass: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Rewrite `src`, failing if its delimiters are unbalanced.
    fn apply(&self, src: &str) -> Result<String, MinifyError>;
}

fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}
