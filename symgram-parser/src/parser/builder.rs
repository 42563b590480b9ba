use log::trace;
use symgram_automata::SymbolicAutomaton;

use super::error::{ParseError, SyntaxError};
use crate::{
    GrammarSymbol, LexError, Lexer, Nonterminal, Production, SymbolResolver, Token, TokenKind,
};

/// Builds productions from the token stream.
///
/// Tracks the current head and the body under construction. `|` finishes the body and starts a
/// new one for the same head. `->` after a nonterminal finishes the body without that
/// nonterminal and makes it the head of what follows.
pub(crate) struct ProductionBuilder<'r, 'c, A: SymbolicAutomaton, F> {
    resolver: &'r mut SymbolResolver<'c, A, F>,
    lhs: Nonterminal,
    rhs: Vec<GrammarSymbol<A::Label>>,
    productions: Vec<Production<A::Label>>,
}

impl<'r, 'c, A, E, F> ProductionBuilder<'r, 'c, A, F>
where
    A: SymbolicAutomaton,
    F: FnMut(&str) -> Result<A, E>,
{
    /// Consumes `tokens` and returns the start symbol with all productions written in the
    /// source, in source order.
    pub(crate) fn build(
        resolver: &'r mut SymbolResolver<'c, A, F>,
        mut tokens: Lexer<'_>,
    ) -> Result<(Nonterminal, Vec<Production<A::Label>>), ParseError<E>> {
        let start = match next_token(&mut tokens) {
            Token {
                kind: TokenKind::Nonterminal,
                source,
                ..
            } => Nonterminal::Named(source),
            token @ Token {
                kind: TokenKind::Error,
                ..
            } => {
                return Err(LexError::from_token(token).into())
            }
            Token { kind, source, pos } => {
                return Err(SyntaxError::ExpectedNonterminal {
                    found: kind,
                    source_text: source,
                    pos,
                }
                .into())
            }
        };

        let arrow = next_token(&mut tokens);
        if arrow.kind == TokenKind::Error {
            return Err(LexError::from_token(arrow).into());
        }
        if arrow.kind != TokenKind::Arrow {
            return Err(SyntaxError::ExpectedArrow {
                lhs: start.to_string(),
                found: arrow.kind,
                source_text: arrow.source,
                pos: arrow.pos,
            }
            .into());
        }

        let mut builder = Self {
            resolver,
            lhs: start.clone(),
            rhs: Vec::new(),
            productions: Vec::new(),
        };
        let mut previous = arrow;

        loop {
            let token = next_token(&mut tokens);

            match token.kind {
                TokenKind::Nonterminal => builder
                    .rhs
                    .push(Nonterminal::Named(token.source.clone()).into()),
                TokenKind::TerminalOrRegex => {
                    // an epsilon fragment adds nothing to the body
                    if let Some(symbol) = builder
                        .resolver
                        .resolve(&token.source)
                        .map_err(ParseError::Regex)?
                    {
                        builder.rhs.push(symbol);
                    }
                }
                TokenKind::Or => builder.commit(),
                TokenKind::Arrow => builder.chain(&previous, &token)?,
                TokenKind::EndOfStream => {
                    builder.commit();
                    return Ok((start, builder.productions));
                }
                TokenKind::Error => return Err(LexError::from_token(token).into()),
            }

            previous = token;
        }
    }

    /// Finishes the current body as a production of the current head.
    fn commit(&mut self) {
        let production = Production::new(self.lhs.clone(), std::mem::take(&mut self.rhs));
        trace!("production {production}");
        self.productions.push(production);
    }

    /// Makes the trailing nonterminal of the body the new head.
    fn chain(&mut self, previous: &Token, arrow: &Token) -> Result<(), SyntaxError> {
        if self.rhs.is_empty() {
            return Err(SyntaxError::EmptyChain { pos: arrow.pos });
        }

        let not_a_nonterminal = || SyntaxError::ChainFromNonNonterminal {
            found: previous.kind,
            source_text: previous.source.clone(),
            pos: arrow.pos,
        };

        // A fragment that resolved to a nonterminal or to nothing does not count.
        if previous.kind != TokenKind::Nonterminal {
            return Err(not_a_nonterminal());
        }

        let Some(GrammarSymbol::Nonterminal(next_lhs)) = self.rhs.pop() else {
            return Err(not_a_nonterminal());
        };

        self.commit();
        self.lhs = next_lhs;
        Ok(())
    }
}

/// Returns the next token. Error tokens are passed on to the caller.
fn next_token(tokens: &mut Lexer<'_>) -> Token {
    // The lexer ends every stream with an end or error token, so running dry only happens when
    // it was already drained.
    match tokens.next() {
        Some(token) => token,
        None => tokens.end_of_stream(),
    }
}
