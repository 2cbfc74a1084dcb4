//! Lexical scanner: per-character classification of shell source.
//!
//! The scanner answers, for every offset, whether the character sits inside
//! a quoted string, a comment, a here-document or an expansion, and whether
//! it is escaped. The minification passes only consume this classification.

pub mod delimiter;
pub mod escape;
mod lookaround;
pub mod scanner;

pub use delimiter::{Delimiter, DelimiterKind, DelimiterStack};
pub use escape::EscapeSet;
pub use lookaround::{is_any_word, is_word};
pub use scanner::{Classification, Scanner};
