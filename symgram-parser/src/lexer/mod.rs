use std::{fmt::Display, iter::FusedIterator};

use log::trace;
use logos::Logos;

pub(crate) mod error;

#[cfg(test)]
mod tests;

/// Token patterns of the grammar notation.
///
/// The patterns are disjoint on their leading character, so at most one of them can match at
/// any position and their order carries no meaning.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
enum RawToken {
    #[regex(r"[#A-Z]\S*")]
    Nonterminal,
    #[regex(r"[^#A-Z\-|\s]\S*")]
    TerminalOrRegex,
    #[token("->")]
    Arrow,
    #[token("|")]
    Or,
}

/// Kind of a [`Token`]. Whitespace is consumed by the lexer and never turned into a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Nonterminal,
    TerminalOrRegex,
    Arrow,
    Or,
    /// A character no pattern matches. Always the last token.
    Error,
    /// End of the input. Always the last token.
    EndOfStream,
}

/// [`Token`] returned by the [`Lexer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source string representation of the token.
    pub source: String,
    /// Byte position of the token in the input. The end points one position beyond the end of
    /// the token.
    pub pos: (usize, usize),
}

impl Token {
    fn new(kind: TokenKind, source: &str, pos: (usize, usize)) -> Self {
        Self {
            kind,
            source: source.to_owned(),
            pos,
        }
    }

    /// Number of bytes the token consumed.
    pub fn len(&self) -> usize {
        self.pos.1 - self.pos.0
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Single pass lexer over grammar source text.
///
/// The iterator yields tokens until it has yielded either one [`TokenKind::Error`] or one
/// [`TokenKind::EndOfStream`] token, and `None` afterwards. Tokenizing again requires a new
/// lexer.
pub struct Lexer<'input> {
    input: &'input str,
    inner: logos::Lexer<'input, RawToken>,
    done: bool,
}

impl<'input> Lexer<'input> {
    /// Creates a new [`Lexer`] over `input`.
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            inner: RawToken::lexer(input),
            done: false,
        }
    }

    /// Returns the end of stream token of this input.
    pub(crate) fn end_of_stream(&self) -> Token {
        let end = self.input.len();
        Token::new(TokenKind::EndOfStream, "", (end, end))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let token = match self.inner.next() {
            Some(Ok(raw)) => {
                let span = self.inner.span();
                Token::new(raw.into(), self.inner.slice(), (span.start, span.end))
            }
            Some(Err(())) => {
                // report only the first character, the rest of the input is not looked at
                self.done = true;
                let start = self.inner.span().start;
                let end = self.input[start..]
                    .chars()
                    .next()
                    .map_or(start, |ch| start + ch.len_utf8());
                Token::new(TokenKind::Error, &self.input[start..end], (start, end))
            }
            None => {
                self.done = true;
                self.end_of_stream()
            }
        };

        trace!("token {} `{}` at {:?}", token.kind, token.source, token.pos);
        Some(token)
    }
}

impl FusedIterator for Lexer<'_> {}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Nonterminal => TokenKind::Nonterminal,
            RawToken::TerminalOrRegex => TokenKind::TerminalOrRegex,
            RawToken::Arrow => TokenKind::Arrow,
            RawToken::Or => TokenKind::Or,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TokenKind::Nonterminal => "NONTERMINAL",
                TokenKind::TerminalOrRegex => "TERMINAL_OR_REGEX",
                TokenKind::Arrow => "ARROW",
                TokenKind::Or => "OR",
                TokenKind::Error => "ERROR",
                TokenKind::EndOfStream => "END",
            }
        )
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind, self.source)
    }
}
