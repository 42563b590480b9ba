use thiserror::Error;

use super::{Token, TokenKind};

/// A character sequence no token pattern matches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[ERROR] ({}, {}): lexer could not identify token `{found}`", .pos.0, .pos.1)]
pub struct LexError {
    /// The offending input.
    pub found: String,
    pub pos: (usize, usize),
}

impl LexError {
    /// Creates a [`LexError`] from an error token.
    pub(crate) fn from_token(token: Token) -> Self {
        debug_assert_eq!(token.kind, TokenKind::Error);
        Self {
            found: token.source,
            pos: token.pos,
        }
    }
}
