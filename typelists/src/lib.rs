// Invokes `$macro` once for every prefix of the given `index Type` pairs, including the empty one.
macro_rules! unroll {
    ( $macro:ident => [ $( $index:tt $T:ident )* ] [] ) => {
        $macro!( $( $index $T )* );
    };
    (
        $macro:ident => [ $( $index:tt $T:ident )* ]
        [ $next_index:tt $Next:ident $( $rest_index:tt $Rest:ident )* ]
    ) => {
        $macro!( $( $index $T )* );
        unroll!($macro => [ $( $index $T )* $next_index $Next ] [ $( $rest_index $Rest )* ]);
    };
}

/// Every tuple arity the engine supports, from `()` up to twelve elements.
macro_rules! unroll_tuples {
    ( $macro:ident ) => {
        unroll!($macro => [] [
            0 T0 1 T1 2 T2 3 T3 4 T4 5 T5 6 T6 7 T7 8 T8 9 T9 10 T10 11 T11
        ]);
    };
}

/// Number of the given type parameters, usable for the empty list as well.
macro_rules! arity {
    ( $( $T:ident )* ) => {
        <[&str]>::len(&[ $( stringify!($T), )* ])
    };
}

pub mod get;
pub mod get_or;
pub mod identity;
pub mod matching;
pub mod record;
pub mod strong;
pub mod typelist;

use thiserror::Error;

pub use get::{get, Get, Select, SelectInto, SelectMut};
pub use get_or::{
    assert_arguments, get_nth_or, get_nth_or_dynamic, get_nth_or_dynamic_with, get_or,
    get_or_strict, get_or_with, validate, Validation,
};
pub use identity::{Const, Element, Field, Identity, Qualifier, Qualifiers};
pub use matching::{Matching, Policy, Relaxed, Strict};
pub use record::{Fields, Record};
pub use strong::{Extensible, Scalar, Sealed, Strategy, Strong, Tag, Wrap};
pub use typelist::{
    count, count_identities, count_relaxed, find, find_first, find_identity, index_of, locate,
    Elements, Position, TypeList,
};

#[doc(hidden)]
pub use paste::paste as __paste;

/// The only failure that can happen while the program runs.
///
/// Everything else the engine checks is rejected while compiling the calling code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("index {index} is out of range for a sequence of length {len}")]
    OutOfRange { index: usize, len: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
