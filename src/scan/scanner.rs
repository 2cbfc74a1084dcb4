use log::trace;

use super::delimiter::{DelimiterKind, DelimiterStack};
use super::escape::EscapeSet;
use crate::error::MinifyError;

/// Work scheduled for after the current character has been handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    /// The terminator line's newline still belongs to the here-document.
    CloseHereDoc,
}

/// Snapshot of every classification query at the current offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub single_quote: bool,
    pub double_quote: bool,
    pub comment: bool,
    pub heredoc: bool,
    pub parameter_expansion: bool,
    pub arithmetic_expansion: bool,
    pub command_substitution: bool,
    pub group: bool,
    pub escaped: bool,
}

impl Classification {
    pub fn preserves_whitespace(&self) -> bool {
        self.comment
            || self.single_quote
            || self.double_quote
            || self.heredoc
            || self.parameter_expansion
    }
}

/// Single-pass lexical walker over shell source.
///
/// Call [`Scanner::advance`] until it returns `None`; after each call the
/// query methods describe the character just returned. One scanner serves
/// exactly one traversal.
#[derive(Debug)]
pub struct Scanner {
    pub(super) src: Vec<char>,
    pub(super) pos: usize,
    started: bool,
    inside_comment: bool,
    inside_heredoc: bool,
    heredoc_word: String,
    verbatim: usize,
    deferred: Option<Deferred>,
    stack: DelimiterStack,
    pub(super) escapes: EscapeSet,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Self {
            src: source.chars().collect(),
            pos: 0,
            started: false,
            inside_comment: false,
            inside_heredoc: false,
            heredoc_word: String::new(),
            verbatim: 0,
            deferred: None,
            stack: DelimiterStack::new(),
            escapes: EscapeSet::new(),
        }
    }

    /// Advance to the next character, update state, and return it.
    ///
    /// Returns `Ok(None)` at end of input, or an
    /// [`MinifyError::UnbalancedDelimiter`] if anything is still open.
    pub fn advance(&mut self) -> Result<Option<char>, MinifyError> {
        if self.started {
            if let Some(Deferred::CloseHereDoc) = self.deferred.take() {
                trace!("here-document `{}` closed at {}", self.heredoc_word, self.pos);
                self.inside_heredoc = false;
            }
            self.pos += 1;
        } else {
            self.started = true;
        }

        let Some(&ch) = self.src.get(self.pos) else {
            self.pos = self.src.len();
            return self.finish().map(|()| None);
        };
        self.classify_step(ch);
        Ok(Some(ch))
    }

    fn finish(&self) -> Result<(), MinifyError> {
        if self.stack.is_empty() {
            Ok(())
        } else {
            Err(MinifyError::UnbalancedDelimiter {
                pass: "scan",
                delimiter: self.stack.top().character,
                depth: self.stack.len(),
            })
        }
    }

    fn classify_step(&mut self, ch: char) {
        if self.verbatim > 0 {
            self.verbatim -= 1;
            return;
        }
        if ch == '\\' && !self.is_escaped() {
            self.escapes.mark(self.pos + 1);
            return;
        }

        if ch == '\n' && !self.is_inside_single_quote() && !self.is_inside_double_quote() {
            if self.inside_comment {
                self.inside_comment = false;
            } else if self.inside_heredoc && self.line_before_matches_terminator() {
                self.deferred = Some(Deferred::CloseHereDoc);
            }
            return;
        }
        if self.inside_comment || self.inside_heredoc {
            return;
        }

        if ch == '"' || ch == '\'' {
            // a single quote cannot be escaped inside a single-quoted string
            if !self.is_escaped() || (ch == '\'' && self.is_inside_single_quote()) {
                self.stack.push(ch, DelimiterKind::None);
            }
            return;
        }
        if self.is_inside_single_quote() || self.is_escaped() {
            return;
        }

        match ch {
            '#' if self.starts_comment() => self.inside_comment = true,
            '`' => self.stack.push(ch, DelimiterKind::None),
            '$' => self.open_expansion(),
            '{' | '}' | '(' | ')' | '[' | ']' => self.stack.push(ch, DelimiterKind::None),
            '<' if self.next_char_is('<') && self.stack.is_empty() => self.open_heredoc(),
            _ => {}
        }
    }

    fn starts_comment(&self) -> bool {
        if !self.stack.is_empty() {
            return false;
        }
        self.pos == 0 || matches!(self.previous_char(), Some('\n' | '\t' | ' ' | ';'))
    }

    fn open_expansion(&mut self) {
        let kind = match self.next_chars(2) {
            ['(', '(', ..] => DelimiterKind::ArithParen,
            ['{', ..] => DelimiterKind::ParamExpansion,
            ['(', ..] => DelimiterKind::Substitution,
            ['[', ..] => DelimiterKind::ArithBracket,
            _ => return,
        };
        let opener = self.src[self.pos + 1];
        self.stack.push(opener, kind);
        self.verbatim = 1;
    }

    /// `<<` starts a here-document, `<<<` a here-string.
    fn open_heredoc(&mut self) {
        self.verbatim = 1;
        if self.next_chars(2) == ['<', '<'] {
            return;
        }
        let line: String = self.line_after(1).iter().collect();
        let word = line.strip_prefix('-').unwrap_or(&line);
        self.heredoc_word = word.trim().replace(['"', '\''], "");
        self.inside_heredoc = true;
        trace!("here-document `{}` opened at {}", self.heredoc_word, self.pos);
    }

    fn line_before_matches_terminator(&self) -> bool {
        self.line_before().iter().copied().eq(self.heredoc_word.chars())
    }

    fn next_char_is(&self, expected: char) -> bool {
        self.next_char() == Some(expected)
    }

    pub fn classify(&self) -> Classification {
        Classification {
            single_quote: self.is_inside_single_quote(),
            double_quote: self.is_inside_double_quote(),
            comment: self.inside_comment,
            heredoc: self.inside_heredoc,
            parameter_expansion: self.is_inside_parameter_expansion(),
            arithmetic_expansion: self.is_inside_arithmetic_expansion(),
            command_substitution: self.is_inside_command_substitution(),
            group: self.is_inside_group(),
            escaped: self.is_escaped(),
        }
    }

    pub fn is_escaped(&self) -> bool {
        self.escapes.contains(self.pos)
    }

    pub fn is_inside_comment(&self) -> bool {
        self.inside_comment
    }

    pub fn is_inside_heredoc(&self) -> bool {
        self.inside_heredoc
    }

    pub fn is_inside_single_quote(&self) -> bool {
        self.stack.last_group_opening().is('\'')
    }

    pub fn is_inside_double_quote(&self) -> bool {
        self.stack.last_group_opening().is('"')
    }

    pub fn is_inside_parameter_expansion(&self) -> bool {
        self.stack.last_group_opening().is('{')
    }

    pub fn is_inside_arithmetic_expansion(&self) -> bool {
        self.stack.last_group_opening().kind.is_arithmetic()
    }

    pub fn is_inside_command_substitution(&self) -> bool {
        let opening = self.stack.last_group_opening();
        opening.is('`') || opening.kind == DelimiterKind::Substitution
    }

    pub fn is_inside_group(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Inside a group, a here-document or a comment.
    pub fn is_inside_anything(&self) -> bool {
        self.is_inside_group() || self.inside_heredoc || self.inside_comment
    }

    pub fn preserves_whitespace(&self) -> bool {
        self.inside_comment
            || self.is_inside_single_quote()
            || self.is_inside_double_quote()
            || self.inside_heredoc
            || self.is_inside_parameter_expansion()
    }
}
