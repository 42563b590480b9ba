use std::{
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    sync::Arc,
};

use symgram_automata::StateId;

/// Nonterminal of a [`ContextFreeGrammar`](crate::ContextFreeGrammar). Its identity is its name.
///
/// The three kinds of names live in separate variants, so a synthesized nonterminal can never
/// collide with one written in the grammar source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Nonterminal {
    /// Written in the grammar source.
    Named(String),
    /// Occurrence of the n-th regex fragment that is neither epsilon nor a single terminal.
    Regex(usize),
    /// State of the automaton embedded for a regex fragment.
    State { regex: usize, state: StateId },
}

impl Nonterminal {
    /// Creates a nonterminal written in the grammar source.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl Display for Nonterminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Nonterminal::Named(name) => write!(f, "{name}"),
            Nonterminal::Regex(regex) => write!(f, "<r{regex}>"),
            Nonterminal::State { regex, state } => write!(f, "<r{regex}.{state}>"),
        }
    }
}

/// Terminal wrapping a single predicate.
///
/// The source text is kept for diagnostics only; equality and hashing look at the predicate.
#[derive(Debug, Clone)]
pub struct Terminal<T> {
    predicate: T,
    source: String,
}

impl<T> Terminal<T> {
    /// Creates a new [`Terminal`] from a predicate and the text it was written as.
    pub fn new(predicate: T, source: impl Into<String>) -> Self {
        Self {
            predicate,
            source: source.into(),
        }
    }

    /// Predicate the terminal matches.
    pub fn predicate(&self) -> &T {
        &self.predicate
    }

    /// Text the terminal was created from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl<T: PartialEq> PartialEq for Terminal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.predicate == other.predicate
    }
}

impl<T: Eq> Eq for Terminal<T> {}

impl<T: Hash> Hash for Terminal<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.predicate.hash(state)
    }
}

impl<T> Display for Terminal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Single symbol in the body of a [`Production`](crate::Production).
///
/// Terminals are shared: every occurrence of the same resolved fragment, or of the same label
/// within one embedded automaton, points to the same [`Terminal`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum GrammarSymbol<T> {
    Nonterminal(Nonterminal),
    Terminal(Arc<Terminal<T>>),
}

impl<T> GrammarSymbol<T> {
    pub fn as_nonterminal(&self) -> Option<&Nonterminal> {
        match self {
            GrammarSymbol::Nonterminal(nt) => Some(nt),
            GrammarSymbol::Terminal(_) => None,
        }
    }

    pub fn as_terminal(&self) -> Option<&Arc<Terminal<T>>> {
        match self {
            GrammarSymbol::Nonterminal(_) => None,
            GrammarSymbol::Terminal(t) => Some(t),
        }
    }

    pub fn is_nonterminal(&self) -> bool {
        matches!(self, GrammarSymbol::Nonterminal(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GrammarSymbol::Terminal(_))
    }
}

// Derived `Clone` would require `T: Clone`.
impl<T> Clone for GrammarSymbol<T> {
    fn clone(&self) -> Self {
        match self {
            GrammarSymbol::Nonterminal(nt) => GrammarSymbol::Nonterminal(nt.clone()),
            GrammarSymbol::Terminal(t) => GrammarSymbol::Terminal(Arc::clone(t)),
        }
    }
}

impl<T> From<Nonterminal> for GrammarSymbol<T> {
    fn from(value: Nonterminal) -> Self {
        GrammarSymbol::Nonterminal(value)
    }
}

impl<T> From<Arc<Terminal<T>>> for GrammarSymbol<T> {
    fn from(value: Arc<Terminal<T>>) -> Self {
        GrammarSymbol::Terminal(value)
    }
}

impl<T> From<Terminal<T>> for GrammarSymbol<T> {
    fn from(value: Terminal<T>) -> Self {
        GrammarSymbol::Terminal(Arc::new(value))
    }
}

impl<T> Display for GrammarSymbol<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarSymbol::Nonterminal(nt) => write!(f, "{nt}"),
            GrammarSymbol::Terminal(t) => write!(f, "{t}"),
        }
    }
}
