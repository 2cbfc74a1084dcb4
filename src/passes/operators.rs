use super::{Pass, is_blank};
use crate::error::MinifyError;
use crate::scan::Scanner;

/// Characters that never need surrounding blanks.
const OPERATORS: &[char] = &['|', '&', ';', '<', '>', '(', ')'];

/// Removes blanks next to operator characters.
pub struct TightenOperators;

fn is_operator(ch: Option<char>) -> bool {
    ch.is_some_and(|c| OPERATORS.contains(&c))
}

impl Pass for TightenOperators {
    fn name(&self) -> &'static str {
        "operators"
    }

    fn apply(&self, src: &str) -> Result<String, MinifyError> {
        let mut scanner = Scanner::new(src);
        let mut out = String::with_capacity(src.len());
        while let Some(ch) = scanner.advance()? {
            if scanner.preserves_whitespace() {
                out.push(ch);
                continue;
            }
            let droppable = is_blank(ch)
                && (is_operator(scanner.previous_char()) || is_operator(scanner.next_char()));
            // `cmd <(list)` needs the blank before a process substitution
            let process_substitution = matches!(scanner.next_chars(2), ['<' | '>', '(']);
            if !droppable || process_substitution {
                out.push(ch);
            }
        }
        Ok(out)
    }
}
