use thiserror::Error;

use crate::{LexError, TokenKind};

/// Error returned when parsing grammar source fails. No partial grammar is ever returned.
#[derive(Debug, Error)]
pub enum ParseError<E> {
    #[error(transparent)]
    Lexer(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The fragment compiler failed. Its error is passed on unchanged.
    #[error(transparent)]
    Regex(E),
}

/// Token of an unexpected kind at the current parser state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("[ERROR] {pos:?}: expected NONTERMINAL to start the grammar, found {found} `{source_text}`")]
    ExpectedNonterminal {
        found: TokenKind,
        source_text: String,
        pos: (usize, usize),
    },
    #[error("[ERROR] {pos:?}: expected ARROW after `{lhs}`, found {found} `{source_text}`")]
    ExpectedArrow {
        lhs: String,
        found: TokenKind,
        source_text: String,
        pos: (usize, usize),
    },
    #[error("[ERROR] {pos:?}: ARROW has no nonterminal to continue from, the body is empty")]
    EmptyChain { pos: (usize, usize) },
    #[error("[ERROR] {pos:?}: ARROW has to follow a NONTERMINAL, found {found} `{source_text}`")]
    ChainFromNonNonterminal {
        found: TokenKind,
        source_text: String,
        pos: (usize, usize),
    },
}

impl<E> ParseError<E> {
    /// Returns the [`SyntaxError`] if this is one.
    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            ParseError::Syntax(err) => Some(err),
            _ => None,
        }
    }
}
