use std::collections::{BTreeSet, VecDeque};

use crate::{Move, Predicate, StateId};

/// Read-only view of a symbolic automaton.
///
/// Only enumeration is required from implementors. The shape queries have structural default
/// implementations which assume every non-epsilon label is satisfiable; automata that know more
/// about their algebra can override them.
pub trait SymbolicAutomaton {
    /// Label algebra of the moves.
    type Label: Predicate;

    /// Returns the initial state.
    fn initial_state(&self) -> StateId;

    /// Returns an iterator over all states.
    fn states(&self) -> impl Iterator<Item = StateId> + '_;

    /// Returns an iterator over all final states.
    fn final_states(&self) -> impl Iterator<Item = StateId> + '_;

    /// Returns an iterator over the transition relation.
    fn moves(&self) -> impl Iterator<Item = Move<Self::Label>> + '_;

    /// Whether `state` is a final state.
    fn is_final(&self, state: StateId) -> bool {
        self.final_states().any(|q| q == state)
    }

    /// Number of states.
    fn state_count(&self) -> usize {
        self.states().count()
    }

    /// Returns an iterator over the moves leaving `state`.
    fn moves_from(&self, state: StateId) -> impl Iterator<Item = Move<Self::Label>> + '_ {
        self.moves().filter(move |m| m.source == state)
    }

    /// Whether the automaton accepts exactly the empty word.
    ///
    /// The empty word has to be accepted through epsilon moves alone, and no predicate move may
    /// lie on a path from the initial state to a final state.
    fn accepts_only_epsilon(&self) -> bool {
        let moves = self.moves().collect::<Vec<_>>();
        let initial = self.initial_state();

        let accepts_empty = closure(&moves, [initial], |m| {
            m.is_epsilon().then_some((m.source, m.target))
        })
        .into_iter()
        .any(|q| self.is_final(q));

        if !accepts_empty {
            return false;
        }

        let reachable = closure(&moves, [initial], |m| Some((m.source, m.target)));
        let productive = closure(&moves, self.final_states(), |m| Some((m.target, m.source)));

        !moves.iter().any(|m| {
            !m.is_epsilon() && reachable.contains(&m.source) && productive.contains(&m.target)
        })
    }

    /// Returns the label of the single move when the automaton has the shape of a lone
    /// terminal: exactly two states, a source without incoming moves, a single final sink
    /// without outgoing moves, and one labeled move between them.
    fn single_terminal(&self) -> Option<Self::Label> {
        if self.state_count() != 2 {
            return None;
        }

        let initial = self.initial_state();
        let mut moves = self.moves();
        let only = moves.next()?;

        if moves.next().is_some()
            || only.is_epsilon()
            || only.source != initial
            || only.is_self_loop()
        {
            return None;
        }

        let mut finals = self.final_states();
        let single_sink = finals.next() == Some(only.target) && finals.next().is_none();

        single_sink.then_some(only.label)
    }
}

/// Returns all states reachable from `seeds` along the edges selected by `edge`.
fn closure<L>(
    moves: &[Move<L>],
    seeds: impl IntoIterator<Item = StateId>,
    edge: impl Fn(&Move<L>) -> Option<(StateId, StateId)>,
) -> BTreeSet<StateId> {
    let mut result = BTreeSet::new();
    let mut not_visited = VecDeque::new();

    for seed in seeds {
        if result.insert(seed) {
            not_visited.push_back(seed);
        }
    }

    while let Some(state) = not_visited.pop_front() {
        let next_states = moves
            .iter()
            .filter_map(&edge)
            .filter_map(|(from, to)| (from == state).then_some(to));

        for next in next_states.collect::<Vec<_>>() {
            if result.insert(next) {
                not_visited.push_back(next);
            }
        }
    }

    result
}
