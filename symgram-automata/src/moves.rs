use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

#[cfg(test)]
use proptest_derive::Arbitrary;

/// Identifier of a state within a single automaton.
pub type StateId = usize;

/// Label algebra of a symbolic automaton.
///
/// Every algebra has to name one distinguished value that marks epsilon moves. It is never
/// inferred from a default value of the type, so a predicate that merely compares equal to
/// `Default::default()` stays a regular predicate.
pub trait Predicate: Clone + Eq + Hash + Debug {
    /// The label carried by epsilon moves.
    fn epsilon() -> Self;

    /// Whether `self` is the epsilon marker.
    fn is_epsilon(&self) -> bool {
        *self == Self::epsilon()
    }
}

/// `None` is the epsilon marker, every `Some` is a predicate.
impl<T> Predicate for Option<T>
where
    T: Clone + Eq + Hash + Debug,
{
    fn epsilon() -> Self {
        None
    }

    fn is_epsilon(&self) -> bool {
        self.is_none()
    }
}

/// Labeled transition of a symbolic automaton.
///
/// Equality and hashing compare all three fields literally: two moves are equal only when they
/// connect the same states with equal labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
pub struct Move<L> {
    pub source: StateId,
    pub target: StateId,
    pub label: L,
}

impl<L> Move<L> {
    /// Creates a new [`Move`]. The move is an epsilon move when `label` is the epsilon marker of
    /// its algebra.
    pub fn new(source: StateId, target: StateId, label: L) -> Self {
        Self {
            source,
            target,
            label,
        }
    }

    /// Whether the move starts and ends in the same state.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl<L: Predicate> Move<L> {
    /// Creates an epsilon [`Move`] between two states.
    pub fn epsilon(source: StateId, target: StateId) -> Self {
        Self::new(source, target, L::epsilon())
    }

    /// Whether the label is the epsilon marker.
    pub fn is_epsilon(&self) -> bool {
        self.label.is_epsilon()
    }
}

/// Renders `(source,target)` for epsilon moves and `(source,label,target)` otherwise, with the
/// label in its `Debug` form.
impl<L: Predicate> Display for Move<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_epsilon() {
            write!(f, "({},{})", self.source, self.target)
        } else {
            write!(f, "({},{:?},{})", self.source, self.label, self.target)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::hash_map::DefaultHasher,
        hash::{Hash, Hasher},
    };

    use proptest::prelude::*;

    use super::{Move, Predicate};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    /// Label algebra whose epsilon marker is not its default value.
    #[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
    enum Class {
        #[default]
        Digit,
        Alpha,
        Eps,
    }

    impl Predicate for Class {
        fn epsilon() -> Self {
            Class::Eps
        }
    }

    #[test]
    fn epsilon_marker() {
        assert!(Move::<Option<char>>::epsilon(0, 1).is_epsilon());
        assert!(!Move::new(0, 1, Some('a')).is_epsilon());

        // the default value of an algebra is a regular predicate
        assert!(!Move::new(0, 1, Class::default()).is_epsilon());
        assert!(Move::<Class>::epsilon(0, 1).is_epsilon());
        assert!(!Move::new(2, 2, Class::Alpha).is_epsilon());
    }

    #[test]
    fn self_loop() {
        assert!(Move::new(3, 3, Some('a')).is_self_loop());
        assert!(Move::<Option<char>>::epsilon(1, 1).is_self_loop());
        assert!(!Move::new(3, 4, Some('a')).is_self_loop());
    }

    #[test]
    fn literal_equality() {
        assert_eq!(
            Move::<Option<char>>::epsilon(0, 1),
            Move::<Option<char>>::epsilon(0, 1)
        );
        assert_ne!(Move::epsilon(0, 1), Move::new(0, 1, Some('a')));
        assert_ne!(Move::new(0, 1, Some('a')), Move::new(0, 1, Some('b')));
        assert_ne!(Move::new(0, 1, Some('a')), Move::new(1, 0, Some('a')));
        assert_ne!(Move::new(0, 1, Class::Digit), Move::epsilon(0, 1));
    }

    #[test]
    fn display() {
        assert_eq!(Move::<Option<char>>::epsilon(0, 1).to_string(), "(0,1)");
        assert_eq!(Move::new(2, 3, Some('x')).to_string(), "(2,Some('x'),3)");

        assert_eq!(Move::<Class>::epsilon(4, 4).to_string(), "(4,4)");
        assert_eq!(Move::new(0, 1, Class::Alpha).to_string(), "(0,Alpha,1)");
        // the default value renders as a predicate
        assert_eq!(Move::new(0, 1, Class::default()).to_string(), "(0,Digit,1)");
    }

    proptest! {
        #[test]
        fn equal_moves_hash_equal(lhs: Move<Option<u8>>, rhs: Move<Option<u8>>) {
            if lhs == rhs {
                prop_assert_eq!(hash_of(&lhs), hash_of(&rhs));
            }
            prop_assert_eq!(hash_of(&lhs), hash_of(&lhs.clone()));
        }

        #[test]
        fn epsilon_never_equals_predicate(mv: Move<Option<u8>>) {
            let eps = Move::<Option<u8>>::epsilon(mv.source, mv.target);
            prop_assert_eq!(mv == eps, mv.is_epsilon());
        }
    }
}
