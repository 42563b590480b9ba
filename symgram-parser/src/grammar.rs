use std::{collections::HashSet, fmt::Display, hash::Hash, sync::Arc};

use crate::{GrammarSymbol, Nonterminal, Terminal};

/// Rule of a [`ContextFreeGrammar`]. An empty body is an epsilon production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production<T> {
    lhs: Nonterminal,
    rhs: Vec<GrammarSymbol<T>>,
}

impl<T> Production<T> {
    /// Creates a production of `lhs` with the body `rhs`.
    pub fn new(lhs: Nonterminal, rhs: impl Into<Vec<GrammarSymbol<T>>>) -> Self {
        Self {
            lhs,
            rhs: rhs.into(),
        }
    }

    /// Creates a production with an empty body.
    pub fn epsilon(lhs: Nonterminal) -> Self {
        Self::new(lhs, Vec::new())
    }

    /// Head of the production.
    pub fn lhs(&self) -> &Nonterminal {
        &self.lhs
    }

    /// Body of the production. Empty for epsilon productions.
    pub fn rhs(&self) -> &[GrammarSymbol<T>] {
        &self.rhs
    }

    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

/// Context-free grammar produced by the parser.
///
/// The start symbol is always the head of at least one production. Productions keep the order
/// in which they were created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFreeGrammar<T> {
    start: Nonterminal,
    productions: Vec<Production<T>>,
}

impl<T> ContextFreeGrammar<T> {
    pub(crate) fn new(start: Nonterminal, productions: Vec<Production<T>>) -> Self {
        debug_assert!(productions.iter().any(|p| p.lhs == start));
        Self { start, productions }
    }

    pub fn start(&self) -> &Nonterminal {
        &self.start
    }

    pub fn productions(&self) -> &[Production<T>] {
        &self.productions
    }

    /// Returns an iterator over the productions with `lhs` as head.
    pub fn productions_of<'a>(
        &'a self,
        lhs: &'a Nonterminal,
    ) -> impl Iterator<Item = &'a Production<T>> + 'a {
        self.productions.iter().filter(move |p| &p.lhs == lhs)
    }

    /// Returns every production head once, in order of first appearance.
    pub fn nonterminals(&self) -> Vec<&Nonterminal> {
        let mut seen = HashSet::new();
        self.productions
            .iter()
            .map(|p| &p.lhs)
            .filter(|lhs| seen.insert(*lhs))
            .collect()
    }

    pub fn into_parts(self) -> (Nonterminal, Vec<Production<T>>) {
        (self.start, self.productions)
    }
}

impl<T> ContextFreeGrammar<T>
where
    T: Eq + Hash,
{
    /// Returns every distinct terminal once, in order of first appearance.
    pub fn terminals(&self) -> Vec<&Arc<Terminal<T>>> {
        let mut seen = HashSet::new();
        self.productions
            .iter()
            .flat_map(|p| p.rhs.iter())
            .filter_map(GrammarSymbol::as_terminal)
            .filter(|t| seen.insert(&***t))
            .collect()
    }
}

impl<T> Display for Production<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ->", self.lhs)?;
        if self.rhs.is_empty() {
            return write!(f, " ε");
        }
        for symbol in &self.rhs {
            write!(f, " {symbol}")?;
        }
        Ok(())
    }
}

impl<T> Display for ContextFreeGrammar<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for production in &self.productions {
            writeln!(f, "{production}")?;
        }
        Ok(())
    }
}
