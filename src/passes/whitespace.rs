use super::{Pass, is_blank};
use crate::error::MinifyError;
use crate::scan::Scanner;

/// Strips lines, drops empty ones, joins continued lines and squeezes runs of
/// blanks into a single space.
pub struct CollapseWhitespace;

impl Pass for CollapseWhitespace {
    fn name(&self) -> &'static str {
        "whitespace"
    }

    fn apply(&self, src: &str) -> Result<String, MinifyError> {
        let mut scanner = Scanner::new(src);
        let mut out = String::with_capacity(src.len());

        // nothing printed on the current line yet
        let mut empty_line = true;
        let mut space_printed = true;

        while let Some(ch) = scanner.advance()? {
            let next = scanner.next_char();

            if scanner.is_inside_single_quote() {
                // line continuation does not apply inside single quotes
                out.push(ch);
            } else if ch == '\\' && !scanner.is_escaped() && next == Some('\n') {
                // continuation: the escaped newline is dropped on the next step
                continue;
            } else if ch == '\n' && scanner.is_escaped() {
                continue;
            } else if scanner.preserves_whitespace() || scanner.is_escaped() {
                out.push(ch);
            } else if is_blank(ch)
                && !space_printed
                && !empty_line
                && !matches!(next, Some(' ' | '\t' | '\n'))
            {
                out.push(' ');
                space_printed = true;
            } else if ch == '\n' && scanner.previous_char() != Some('\n') && !empty_line {
                out.push(ch);
                space_printed = true;
                empty_line = true;
            } else if !is_blank(ch) && ch != '\n' {
                out.push(ch);
                space_printed = false;
                empty_line = false;
            }
        }
        Ok(out)
    }
}
