//! Nesting markers and the stack that tracks which quoting context is open.

/// What a tagged opener introduces.
///
/// Only the opening `(`, `{` or `[` of a `$`-prefixed form carries a kind;
/// in `$((1+2))` just the first `(` is tagged [`DelimiterKind::ArithParen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelimiterKind {
    #[default]
    None,
    /// `$((...))`
    ArithParen,
    /// `$[...]`
    ArithBracket,
    /// `$(...)`
    Substitution,
    /// `${...}`
    ParamExpansion,
}

impl DelimiterKind {
    pub fn is_arithmetic(self) -> bool {
        matches!(self, DelimiterKind::ArithParen | DelimiterKind::ArithBracket)
    }
}

/// One entry of the delimiter stack.
#[derive(Debug, Clone, Copy)]
pub struct Delimiter {
    pub character: char,
    pub kind: DelimiterKind,
}

impl Delimiter {
    /// Returned by stack queries when nothing matches.
    pub const EMPTY: Delimiter = Delimiter {
        character: '\0',
        kind: DelimiterKind::None,
    };

    pub fn new(character: char, kind: DelimiterKind) -> Self {
        Self { character, kind }
    }

    /// Quotes, backticks and tagged expansion openers change how the text up
    /// to their match is read.
    pub fn opens_group(&self) -> bool {
        self.kind != DelimiterKind::None || matches!(self.character, '\'' | '"' | '`')
    }

    /// Equality ignores the kind.
    pub fn is(&self, character: char) -> bool {
        self.character == character
    }

    pub fn same_character(&self, other: &Delimiter) -> bool {
        self.character == other.character
    }
}

/// LIFO stack of open delimiters.
#[derive(Debug, Default)]
pub struct DelimiterStack {
    entries: Vec<Delimiter>,
}

impl DelimiterStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The immediate top, or [`Delimiter::EMPTY`].
    pub fn top(&self) -> Delimiter {
        self.entries.last().copied().unwrap_or(Delimiter::EMPTY)
    }

    /// Nearest-to-top entry that opens a group, or [`Delimiter::EMPTY`].
    pub fn last_group_opening(&self) -> Delimiter {
        self.entries
            .iter()
            .rev()
            .find(|d| d.opens_group())
            .copied()
            .unwrap_or(Delimiter::EMPTY)
    }

    /// Feed a character that may affect nesting.
    ///
    /// Bare `{`, `(` and `[` are plain text unless the scanner tagged them
    /// with a kind. Closers pop only against a matching open entry; a stray
    /// paren or bracket inside an open `(`/`[` group is pushed so that it can
    /// be matched later (subshells inside `$(...)`). Quote characters toggle,
    /// but `'` is literal inside `"` and vice versa.
    pub fn push(&mut self, character: char, kind: DelimiterKind) {
        let incoming = Delimiter::new(character, kind);
        let last_opening = self.last_group_opening();
        let top = self.top();

        match character {
            '{' | '}' => {
                if kind != DelimiterKind::None {
                    self.entries.push(incoming);
                } else if character == '}' && top.is('{') {
                    self.entries.pop();
                }
            }
            '(' | ')' | '[' | ']' => {
                let (open, close) = if matches!(character, '(' | ')') {
                    ('(', ')')
                } else {
                    ('[', ']')
                };
                if kind != DelimiterKind::None {
                    self.entries.push(incoming);
                } else if last_opening.is(open) {
                    if top.is(open) && character == close {
                        self.entries.pop();
                    } else {
                        self.entries.push(incoming);
                    }
                }
            }
            '\'' | '"' | '`' => {
                let eligible = match character {
                    '\'' => !last_opening.is('"'),
                    '"' => !last_opening.is('\''),
                    _ => true,
                };
                if eligible {
                    if incoming.same_character(&last_opening) {
                        self.entries.pop();
                    } else {
                        self.entries.push(incoming);
                    }
                }
            }
            _ => {}
        }
    }
}
