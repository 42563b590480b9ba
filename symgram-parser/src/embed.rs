use std::{
    collections::{hash_map::Entry, HashMap},
    sync::Arc,
};

use log::debug;
use symgram_automata::{Predicate, StateId, SymbolicAutomaton};

use crate::{GrammarSymbol, Nonterminal, Production, Terminal};

/// Turns a recorded automaton into right-linear productions.
///
/// The initial state becomes [`Nonterminal::Regex`] of the fragment, so the productions take
/// over exactly where the fragment occurs in the grammar. Every other state becomes a
/// [`Nonterminal::State`]. A move `p -a-> q` becomes `p -> a q`, an epsilon move `p -> q`, and
/// each final state `f` gets `f -> ε`.
pub struct AutomatonEmbedder<T> {
    regex: usize,
    states: HashMap<StateId, Nonterminal>,
    /// One terminal per distinct label.
    predicates: HashMap<T, Arc<Terminal<T>>>,
}

impl<T: Predicate> AutomatonEmbedder<T> {
    /// Creates a new [`AutomatonEmbedder`] for the fragment with id `regex`.
    pub fn new(regex: usize) -> Self {
        Self {
            regex,
            states: HashMap::new(),
            predicates: HashMap::new(),
        }
    }

    /// Returns the productions of `automaton`: one per move in move order, followed by one per
    /// final state in final state order.
    pub fn embed<A>(mut self, automaton: &A) -> Vec<Production<T>>
    where
        A: SymbolicAutomaton<Label = T>,
    {
        self.states
            .insert(automaton.initial_state(), Nonterminal::Regex(self.regex));

        let mut productions = automaton
            .moves()
            .map(|mv| {
                let source = self.state(mv.source);
                let target = GrammarSymbol::Nonterminal(self.state(mv.target));

                let rhs = if mv.is_epsilon() {
                    vec![target]
                } else {
                    vec![self.predicate(mv.label), target]
                };

                Production::new(source, rhs)
            })
            .collect::<Vec<_>>();

        productions.extend(
            automaton
                .final_states()
                .map(|q| Production::epsilon(self.state(q))),
        );

        debug!(
            "embedded {} as {} productions over {} nonterminals and {} terminals",
            Nonterminal::Regex(self.regex),
            productions.len(),
            self.states.len(),
            self.predicates.len()
        );

        productions
    }

    /// Returns the nonterminal of `state`, creating it on first use.
    fn state(&mut self, state: StateId) -> Nonterminal {
        let regex = self.regex;
        self.states
            .entry(state)
            .or_insert_with(|| Nonterminal::State { regex, state })
            .clone()
    }

    /// Returns the shared terminal of `label`, creating it on first use.
    fn predicate(&mut self, label: T) -> GrammarSymbol<T> {
        let terminal = match self.predicates.entry(label) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                let terminal = Arc::new(Terminal::new(
                    entry.key().clone(),
                    format!("{:?}", entry.key()),
                ));
                Arc::clone(entry.insert(terminal))
            }
        };

        GrammarSymbol::Terminal(terminal)
    }
}
