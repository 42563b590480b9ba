use log::debug;
use symgram_automata::SymbolicAutomaton;

use self::builder::ProductionBuilder;
use crate::{AutomatonEmbedder, ContextFreeGrammar, Lexer, SymbolResolver};

pub use error::{ParseError, SyntaxError};

mod builder;
mod error;


/// Parses grammar source text whose terminals may be regex fragments.
///
/// `compile` turns a fragment into a symbolic automaton. Fragments accepting only the empty
/// word disappear, single terminal automata become terminals, and every other automaton is
/// embedded into the grammar as right-linear productions.
///
/// All bookkeeping lives in a single [`parse`](Self::parse) call, so calls never influence each
/// other.
pub struct GrammarParser<F> {
    compile: F,
}

impl<A, E, F> GrammarParser<F>
where
    A: SymbolicAutomaton,
    F: FnMut(&str) -> Result<A, E>,
{
    /// Creates a new [`GrammarParser`] compiling fragments with `compile`.
    pub fn new(compile: F) -> Self {
        Self { compile }
    }

    /// Parses `source` into a [`ContextFreeGrammar`].
    ///
    /// # Fails
    ///
    /// On the first lexer or syntax error, or when `compile` fails on a fragment.
    pub fn parse(&mut self, source: &str) -> Result<ContextFreeGrammar<A::Label>, ParseError<E>> {
        debug!("parsing grammar of {} bytes", source.len());

        let mut resolver = SymbolResolver::new(&mut self.compile);
        let (start, mut productions) = ProductionBuilder::build(&mut resolver, Lexer::new(source))?;

        let written = productions.len();
        for (regex, automaton) in resolver.into_automata() {
            productions.extend(AutomatonEmbedder::new(regex).embed(&automaton));
        }

        debug!(
            "parsed grammar starting at {start}: {written} written and {} embedded productions",
            productions.len() - written
        );

        Ok(ContextFreeGrammar::new(start, productions))
    }

    /// Consumes the parser and returns the fragment compiler.
    pub fn into_inner(self) -> F {
        self.compile
    }
}

/// Parses `source` with a one-off [`GrammarParser`].
pub fn parse<A, E, F>(source: &str, compile: F) -> Result<ContextFreeGrammar<A::Label>, ParseError<E>>
where
    A: SymbolicAutomaton,
    F: FnMut(&str) -> Result<A, E>,
{
    GrammarParser::new(compile).parse(source)
}
