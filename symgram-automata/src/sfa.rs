use std::collections::BTreeSet;

use thiserror::Error;

use crate::{Move, Predicate, StateId, SymbolicAutomaton};

/// Symbolic finite automaton with an explicit move list.
///
/// Moves are kept in insertion order and final states in ascending order, so everything built
/// from an [`Sfa`] enumerates the same way on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sfa<L> {
    initial_state: StateId,
    state_count: usize,
    final_states: BTreeSet<StateId>,
    moves: Vec<Move<L>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SfaError {
    #[error("move ({from}, {to}) refers to a state that does not exist (state count {state_count})")]
    UnknownState {
        from: StateId,
        to: StateId,
        state_count: usize,
    },
    #[error("final state {state} does not exist (state count {state_count})")]
    UnknownFinalState { state: StateId, state_count: usize },
}

impl<L: Predicate> Sfa<L> {
    /// Creates a builder with a single initial state, which can be made final.
    pub fn builder(initial_is_final: bool) -> SfaBuilder<L> {
        SfaBuilder::new(initial_is_final)
    }

    /// Creates an automaton accepting only the empty word.
    pub fn epsilon() -> Self {
        Self {
            initial_state: 0,
            state_count: 1,
            final_states: BTreeSet::from([0]),
            moves: Vec::new(),
        }
    }

    /// Creates an automaton with two states connected by a single `label` move.
    pub fn terminal(label: L) -> Self {
        Self {
            initial_state: 0,
            state_count: 2,
            final_states: BTreeSet::from([1]),
            moves: Vec::from([Move::new(0, 1, label)]),
        }
    }
}

impl<L: Predicate> SymbolicAutomaton for Sfa<L> {
    type Label = L;

    fn initial_state(&self) -> StateId {
        self.initial_state
    }

    fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        0..self.state_count
    }

    fn final_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.final_states.iter().copied()
    }

    fn moves(&self) -> impl Iterator<Item = Move<L>> + '_ {
        self.moves.iter().cloned()
    }

    fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(&state)
    }

    fn state_count(&self) -> usize {
        self.state_count
    }
}

/// Builder struct for the [`Sfa`].
#[derive(Debug, Clone)]
pub struct SfaBuilder<L> {
    state_count: usize,
    final_states: BTreeSet<StateId>,
    moves: Vec<Move<L>>,
}

impl<L: Predicate> SfaBuilder<L> {
    /// Creates a new [`SfaBuilder`] with state `0` as initial state.
    pub fn new(initial_is_final: bool) -> Self {
        let mut builder = Self {
            state_count: 0,
            final_states: BTreeSet::new(),
            moves: Vec::new(),
        };
        builder.add_state(initial_is_final);
        builder
    }

    /// Creates a new state.
    pub fn with_state(mut self, fin: bool) -> Self {
        self.add_state(fin);
        self
    }

    /// Creates a move between two states.
    pub fn with_move(mut self, source: StateId, target: StateId, label: L) -> Self {
        self.add_move(source, target, label);
        self
    }

    /// Creates an epsilon move between two states.
    pub fn with_epsilon(mut self, source: StateId, target: StateId) -> Self {
        self.add_epsilon(source, target);
        self
    }

    /// Creates a new state and returns its id. Ids are handed out consecutively.
    pub fn add_state(&mut self, fin: bool) -> StateId {
        let id = self.state_count;
        self.state_count += 1;
        if fin {
            self.final_states.insert(id);
        }
        id
    }

    /// Marks `state` as final.
    pub fn set_final(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    /// Creates a move between two states. Adding the same move twice stores it once.
    pub fn add_move(&mut self, source: StateId, target: StateId, label: L) {
        let mv = Move::new(source, target, label);
        if !self.moves.contains(&mv) {
            self.moves.push(mv);
        }
    }

    /// Creates an epsilon move between two states.
    pub fn add_epsilon(&mut self, source: StateId, target: StateId) {
        self.add_move(source, target, L::epsilon());
    }

    /// Builds the [`Sfa`] and checks whether all moves connect existing states.
    pub fn build(self) -> Result<Sfa<L>, SfaError> {
        if let Some(mv) = self
            .moves
            .iter()
            .find(|m| m.source >= self.state_count || m.target >= self.state_count)
        {
            return Err(SfaError::UnknownState {
                from: mv.source,
                to: mv.target,
                state_count: self.state_count,
            });
        }

        if let Some(&state) = self.final_states.range(self.state_count..).next() {
            return Err(SfaError::UnknownFinalState {
                state,
                state_count: self.state_count,
            });
        }

        Ok(Sfa {
            initial_state: 0,
            state_count: self.state_count,
            final_states: self.final_states,
            moves: self.moves,
        })
    }
}
