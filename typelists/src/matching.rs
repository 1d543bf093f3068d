use derive_more::Display;

use crate::identity::Identity;

/// Selects how two types are compared while counting and searching.
#[derive(Clone, Copy, Debug, Default, Display, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Matching {
    /// Strips top-level qualifiers first, so `T`, [`Const<T>`][crate::Const], `&T` and `&mut T`
    /// are all the same entry.
    #[default]
    #[display(fmt = "relaxed")]
    Relaxed,
    /// Types only match if they are exactly the same, including every qualifier.
    #[display(fmt = "strict")]
    Strict,
}

impl Matching {
    /// Prepares an [`Identity`] for comparison under this matching.
    pub const fn normalize(self, identity: Identity) -> Identity {
        match self {
            Self::Relaxed => identity.unqualified(),
            Self::Strict => identity,
        }
    }

    /// Returns whether `lhs` and `rhs` name the same entry under this matching.
    pub const fn same(self, lhs: Identity, rhs: Identity) -> bool {
        self.normalize(lhs).same(&self.normalize(rhs))
    }
}

/// A [`Matching`] lifted into the type system, for APIs that take it as a generic parameter.
pub trait Policy {
    const MATCHING: Matching;
}

/// Type-level [`Matching::Relaxed`].
#[derive(Debug)]
pub enum Relaxed {}

/// Type-level [`Matching::Strict`].
#[derive(Debug)]
pub enum Strict {}

impl Policy for Relaxed {
    const MATCHING: Matching = Matching::Relaxed;
}

impl Policy for Strict {
    const MATCHING: Matching = Matching::Strict;
}
