use std::{collections::HashMap, sync::Arc};

use log::trace;
use symgram_automata::SymbolicAutomaton;

use crate::{GrammarSymbol, Nonterminal, Terminal};

/// Classifies terminal-or-regex fragments and remembers the result for one parse.
///
/// A fragment resolves to
/// - `None` when its automaton accepts only the empty word,
/// - a [`Terminal`] when its automaton is a single labeled move between two states,
/// - a fresh [`Nonterminal::Regex`] otherwise. The automaton is recorded so it can be embedded
///   into the grammar once parsing is done.
pub struct SymbolResolver<'c, A: SymbolicAutomaton, F> {
    compile: &'c mut F,
    /// Resolved fragments, keyed by their verbatim text.
    resolved: HashMap<String, Option<GrammarSymbol<A::Label>>>,
    /// Recorded automata in the order their ids were handed out.
    automata: Vec<(usize, A)>,
}

impl<'c, A, E, F> SymbolResolver<'c, A, F>
where
    A: SymbolicAutomaton,
    F: FnMut(&str) -> Result<A, E>,
{
    /// Creates a new [`SymbolResolver`] using `compile` to turn fragments into automata.
    pub fn new(compile: &'c mut F) -> Self {
        Self {
            compile,
            resolved: HashMap::new(),
            automata: Vec::new(),
        }
    }

    /// Resolves `fragment`. Resolving the same text again returns the stored symbol without
    /// compiling it a second time.
    ///
    /// # Fails
    ///
    /// When the fragment compiler fails. Its error is returned as is.
    pub fn resolve(&mut self, fragment: &str) -> Result<Option<GrammarSymbol<A::Label>>, E> {
        if let Some(symbol) = self.resolved.get(fragment) {
            return Ok(symbol.clone());
        }

        let automaton = (self.compile)(fragment)?;

        // The epsilon test has to come first: an epsilon automaton may have the two state shape
        // of a terminal as well.
        let symbol = if automaton.accepts_only_epsilon() {
            trace!("fragment `{fragment}` is epsilon");
            None
        } else if let Some(label) = automaton.single_terminal() {
            trace!("fragment `{fragment}` is a terminal");
            Some(GrammarSymbol::Terminal(Arc::new(Terminal::new(
                label, fragment,
            ))))
        } else {
            let regex = self.automata.len();
            trace!("fragment `{fragment}` is embedded as {}", Nonterminal::Regex(regex));
            self.automata.push((regex, automaton));
            Some(GrammarSymbol::Nonterminal(Nonterminal::Regex(regex)))
        };

        self.resolved.insert(fragment.to_owned(), symbol.clone());
        Ok(symbol)
    }

    /// Number of recorded automata.
    pub fn recorded(&self) -> usize {
        self.automata.len()
    }

    /// Consumes the resolver and returns the recorded automata with the id of the
    /// [`Nonterminal::Regex`] they stand for.
    pub fn into_automata(self) -> Vec<(usize, A)> {
        self.automata
    }
}

#[cfg(test)]
mod tests {
    use std::{convert::Infallible, sync::Arc};

    use symgram_automata::{Sfa, SfaError};

    use super::SymbolResolver;
    use crate::{GrammarSymbol, Nonterminal};

    type Label = Option<char>;

    /// Compiles `()` to epsilon, single characters to terminals and `c*` to a loop.
    fn compile(fragment: &str) -> Result<Sfa<Label>, SfaError> {
        let chars = fragment.chars().collect::<Vec<_>>();
        match chars.as_slice() {
            ['(', ')'] => Ok(Sfa::epsilon()),
            [c] => Ok(Sfa::terminal(Some(*c))),
            [c, '*'] => Sfa::builder(true).with_move(0, 0, Some(*c)).build(),
            _ => Sfa::builder(false).with_move(0, 9, None).build(),
        }
    }

    #[test]
    fn classification() -> Result<(), SfaError> {
        let mut compile = compile;
        let mut resolver = SymbolResolver::new(&mut compile);

        assert_eq!(resolver.resolve("()")?, None);

        let Some(GrammarSymbol::Terminal(a)) = resolver.resolve("a")? else {
            panic!("expected a terminal");
        };
        assert_eq!(a.predicate(), &Some('a'));
        assert_eq!(a.source(), "a");

        assert_eq!(
            resolver.resolve("a*")?,
            Some(GrammarSymbol::Nonterminal(Nonterminal::Regex(0)))
        );
        assert_eq!(
            resolver.resolve("b*")?,
            Some(GrammarSymbol::Nonterminal(Nonterminal::Regex(1)))
        );
        assert_eq!(resolver.recorded(), 2);

        let automata = resolver.into_automata();
        assert_eq!(
            automata.iter().map(|(id, _)| *id).collect::<Vec<_>>(),
            vec![0, 1]
        );

        Ok(())
    }

    #[test]
    fn memoized() -> Result<(), SfaError> {
        let mut calls = 0;
        let mut counting = |fragment: &str| {
            calls += 1;
            compile(fragment)
        };
        let mut resolver = SymbolResolver::new(&mut counting);

        let first = resolver.resolve("x")?;
        let second = resolver.resolve("x")?;
        assert!(matches!(
            (&first, &second),
            (Some(GrammarSymbol::Terminal(lhs)), Some(GrammarSymbol::Terminal(rhs)))
                if Arc::ptr_eq(lhs, rhs)
        ));

        assert_eq!(resolver.resolve("x*")?, resolver.resolve("x*")?);
        assert_eq!(resolver.resolve("()")?, None);
        assert_eq!(resolver.resolve("()")?, None);
        assert_eq!(resolver.recorded(), 1);

        drop(resolver);
        assert_eq!(calls, 3);

        Ok(())
    }

    #[test]
    fn two_state_epsilon_is_not_a_terminal() -> Result<(), SfaError> {
        let mut compile = |_: &str| {
            Sfa::<Label>::builder(false)
                .with_state(true)
                .with_epsilon(0, 1)
                .build()
        };
        let mut resolver = SymbolResolver::new(&mut compile);

        assert_eq!(resolver.resolve("(())")?, None);
        assert_eq!(resolver.recorded(), 0);

        Ok(())
    }

    #[test]
    fn terminal_shape_keeps_its_label() {
        let mut compile = |_: &str| Ok::<_, Infallible>(Sfa::terminal(Some('q')));
        let mut resolver = SymbolResolver::new(&mut compile);

        let symbol = resolver.resolve("[q]").unwrap_or_else(|never| match never {});
        assert_eq!(
            symbol.as_ref().and_then(GrammarSymbol::as_terminal).map(|t| t.predicate()),
            Some(&Some('q'))
        );
        assert_eq!(resolver.recorded(), 0);
    }

    #[test]
    fn compiler_errors_pass_through() {
        let mut compile = compile;
        let mut resolver = SymbolResolver::new(&mut compile);

        assert!(matches!(
            resolver.resolve("broken"),
            Err(SfaError::UnknownState { to: 9, .. })
        ));
        assert_eq!(resolver.recorded(), 0);
    }
}
