use super::Pass;
use crate::error::MinifyError;
use crate::scan::{Scanner, is_any_word, is_word};

/// Keywords after which a newline only needs to become a space.
const CONTINUING_KEYWORDS: &[&str] = &["until", "while", "then", "do", "else", "in", "elif", "if"];

/// Replaces top-level newlines with statement separators.
pub struct FlattenNewlines;

/// What a top-level newline turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Replacement {
    Drop,
    Space,
    Semicolon,
    DoubleSemicolon,
}

impl Replacement {
    fn as_str(self) -> &'static str {
        match self {
            Replacement::Drop => "",
            Replacement::Space => " ",
            Replacement::Semicolon => ";",
            Replacement::DoubleSemicolon => ";;",
        }
    }
}

fn replacement_for(scanner: &Scanner) -> Replacement {
    let previous = scanner.previous_char();
    let next = scanner.next_char();

    // function body on the line after `name()`
    if next == Some('{') {
        return if previous == Some(')') {
            Replacement::Drop
        } else {
            Replacement::Space
        };
    }

    let previous_two = scanner.previous_chars(2);
    if is_any_word(scanner.previous_word(), CONTINUING_KEYWORDS)
        || is_word(scanner.next_word(), "in")
        || matches!(previous, Some('{' | '('))
        || previous_two == ['&', '&']
        || previous_two == ['|', '|']
    {
        return Replacement::Space;
    }

    if is_word(scanner.next_word(), "esac") && previous_two != [';', ';'] {
        return if previous == Some(';') {
            Replacement::Semicolon
        } else {
            Replacement::DoubleSemicolon
        };
    }

    if next.is_some() && !matches!(previous, Some(';' | '|')) {
        Replacement::Semicolon
    } else {
        Replacement::Drop
    }
}

impl Pass for FlattenNewlines {
    fn name(&self) -> &'static str {
        "newlines"
    }

    fn apply(&self, src: &str) -> Result<String, MinifyError> {
        let mut scanner = Scanner::new(src);
        let mut out = String::with_capacity(src.len());
        while let Some(ch) = scanner.advance()? {
            if ch != '\n' || scanner.is_inside_anything() {
                out.push(ch);
            } else {
                out.push_str(replacement_for(&scanner).as_str());
            }
        }
        Ok(out)
    }
}
