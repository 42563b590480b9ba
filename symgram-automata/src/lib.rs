//! Symbolic automata as read by the grammar parser.
//!
//! A [`Move`] connects two states with a label from a [`Predicate`] algebra, which names its own
//! epsilon marker. [`SymbolicAutomaton`] is the read-only view the parser needs, and [`Sfa`] is
//! a small implementation of it built through [`SfaBuilder`].

pub use automaton::SymbolicAutomaton;
pub use moves::{Move, Predicate, StateId};
pub use sfa::{Sfa, SfaBuilder, SfaError};

mod automaton;
mod moves;
mod sfa;
