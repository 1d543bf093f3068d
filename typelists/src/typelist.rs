use std::any::Any;

use derive_more::Display;

use crate::{
    identity::{Element, Identity},
    matching::{Matching, Policy},
};

/// An ordered, fixed-length list of types.
///
/// Implemented for tuples of [`Element`]s with up to twelve entries, including the empty tuple.
///
/// A tuple such as `(String, f64, f64, i32)` doubles as a list of types that can be counted,
/// searched and indexed while the calling code is compiled:
///
/// ```
/// use typelists::{count, find, get_nth_or, get_or, Matching, Position};
///
/// type Arguments = (i32, bool, u32, i32);
///
/// const INTS: usize = count::<i32, Arguments>(Matching::Strict);
/// const SECOND_INT: Position = find::<i32, Arguments>(Matching::Strict, 2);
/// assert_eq!(INTS, 2);
/// assert_eq!(SECOND_INT, Position::Found(3));
///
/// let arguments = (String::from("Batman"), 1.5, 2.5);
/// assert_eq!(get_or(String::from("nobody"), &arguments), "Batman");
/// assert_eq!(get_nth_or::<f64, 2, _>(0.0, &arguments), 2.5);
/// assert_eq!(get_or(100, &arguments), 100);
/// ```
pub trait TypeList {
    /// The identities of all entries, in order.
    const IDENTITIES: &'static [Identity];

    const LEN: usize = Self::IDENTITIES.len();
}

/// A [`TypeList`] whose values can be read by position once the position is known.
pub trait Elements: TypeList {
    /// Returns the unqualified value at `index` if it is a `B`.
    fn base_at<B: Any>(&self, index: usize) -> Option<&B>;
}

/// Where an occurrence of a type was found in a [`TypeList`].
#[derive(Clone, Copy, Debug, Display, Hash, PartialEq, Eq)]
pub enum Position {
    #[display(fmt = "found at {}", _0)]
    Found(usize),
    #[display(fmt = "not found")]
    NotFound,
}

impl Position {
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Found(index) => Some(index),
            Self::NotFound => None,
        }
    }

    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub const fn is_not_found(self) -> bool {
        !self.is_found()
    }
}

/// Counts how often `target` occurs in `identities`.
pub const fn count_identities(matching: Matching, target: Identity, identities: &[Identity]) -> usize {
    let target = matching.normalize(target);
    let mut count = 0;
    let mut index = 0;
    while index < identities.len() {
        if matching.normalize(identities[index]).same(&target) {
            count += 1;
        }
        index += 1;
    }
    count
}

/// Finds the `nth` (1-based) occurrence of `target` in `identities`, scanning from the front.
///
/// An `nth` of `0` is never found.
pub const fn find_identity(
    matching: Matching,
    target: Identity,
    nth: usize,
    identities: &[Identity],
) -> Position {
    let target = matching.normalize(target);
    let mut matches = 0;
    let mut index = 0;
    while index < identities.len() {
        if matching.normalize(identities[index]).same(&target) {
            matches += 1;
            if matches == nth {
                return Position::Found(index);
            }
        }
        index += 1;
    }
    Position::NotFound
}

/// Counts how often `T` occurs in `L`.
pub const fn count<T: Element, L: TypeList>(matching: Matching) -> usize {
    count_identities(matching, T::IDENTITY, L::IDENTITIES)
}

/// [`count`] using [`Matching::Relaxed`].
pub const fn count_relaxed<T: Element, L: TypeList>() -> usize {
    count::<T, L>(Matching::Relaxed)
}

/// Finds the `nth` (1-based) occurrence of `T` in `L`.
///
/// This is the total form: an `nth` of `0` or an empty `L` simply yield [`Position::NotFound`].
/// Use [`locate`] to have those rejected at compile time instead.
pub const fn find<T: Element, L: TypeList>(matching: Matching, nth: usize) -> Position {
    find_identity(matching, T::IDENTITY, nth, L::IDENTITIES)
}

/// Finds the first occurrence of `T` in `L`.
pub const fn find_first<T: Element, L: TypeList>(matching: Matching) -> Position {
    find::<T, L>(matching, 1)
}

/// Finds the first occurrence of `T` in `L` using [`Matching::Relaxed`].
pub const fn index_of<T: Element, L: TypeList>() -> Position {
    find_first::<T, L>(Matching::Relaxed)
}

/// Finds the `NTH` occurrence of `T` in `L` under the policy `P`.
///
/// Fails to compile if `NTH` is `0` or `L` is empty.
///
/// ```compile_fail
/// use typelists::{locate, Relaxed};
///
/// let _ = locate::<Relaxed, i32, (i32,), 0>();
/// ```
pub const fn locate<P: Policy, T: Element, L: TypeList, const NTH: usize>() -> Position {
    const {
        assert!(NTH > 0, "occurrences are counted from 1");
        assert!(L::LEN > 0, "cannot search an empty type list");
    }
    find::<T, L>(P::MATCHING, NTH)
}

fn downcast<E: Element, B: Any>(element: &E) -> Option<&B> {
    let base: &dyn Any = element.base();
    base.downcast_ref()
}

macro_rules! impl_type_list {
    ( $( $index:tt $T:ident )* ) => {
        impl< $( $T: Element, )* > TypeList for ( $( $T, )* ) {
            const IDENTITIES: &'static [Identity] = &[ $( $T::IDENTITY, )* ];
        }

        impl< $( $T: Element, )* > Elements for ( $( $T, )* ) {
            #[allow(unused_variables)]
            fn base_at<B: Any>(&self, index: usize) -> Option<&B> {
                match index {
                    $( $index => downcast(&self.$index), )*
                    _ => None,
                }
            }
        }
    };
}

unroll_tuples!(impl_type_list);

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{Const, Relaxed, Strict};

    const _: () = assert!(count::<f32, (i32, f32, i32, f32, i32, f32, i32)>(Matching::Strict) == 3);
    const _: () = assert!(matches!(
        find::<i32, (i32, bool, u32, i32)>(Matching::Strict, 2),
        Position::Found(3)
    ));

    #[test]
    fn type_list_length() {
        assert_eq!(<() as TypeList>::LEN, 0);
        assert_eq!(<(i32,) as TypeList>::LEN, 1);
        assert_eq!(<(i32, &i32, Const<i32>) as TypeList>::LEN, 3);
        assert_eq!(
            <(u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8) as TypeList>::LEN,
            12
        );
    }

    #[test]
    fn count_in_empty_list() {
        assert_eq!(count::<i32, ()>(Matching::Strict), 0);
        assert_eq!(count::<i32, ()>(Matching::Relaxed), 0);
        assert_eq!(count::<String, ()>(Matching::Relaxed), 0);
    }

    #[test]
    fn count_with_repeats() {
        type List = (i32, f32, i32, f32, i32, f32, i32);
        assert_eq!(count::<f32, List>(Matching::Strict), 3);
        assert_eq!(count::<i32, List>(Matching::Strict), 4);
        assert_eq!(count::<f64, List>(Matching::Strict), 0);
    }

    #[test]
    fn count_respects_matching() {
        type List<'a> = (i32, &'a i32, &'a mut i32, Const<i32>, i64);
        assert_eq!(count::<i32, List>(Matching::Strict), 1);
        assert_eq!(count::<i32, List>(Matching::Relaxed), 4);
        assert_eq!(count_relaxed::<&i32, List>(), 4);
        assert_eq!(count::<&i32, List>(Matching::Strict), 1);
        assert_eq!(count::<i64, List>(Matching::Relaxed), 1);
    }

    #[test]
    fn count_never_exceeds_length() {
        type List = (u8, u8, u8);
        assert_eq!(count::<u8, List>(Matching::Relaxed), <List as TypeList>::LEN);
    }

    #[test]
    fn find_strict() {
        assert_eq!(find::<i32, (i32,)>(Matching::Strict, 1), Position::Found(0));
        assert_eq!(find::<i32, (Const<i32>,)>(Matching::Strict, 1), Position::NotFound);
        assert_eq!(find::<i32, (&i32,)>(Matching::Strict, 1), Position::NotFound);
        assert_eq!(find::<i32, (&mut i32,)>(Matching::Strict, 1), Position::NotFound);
        assert_eq!(find::<i32, (&Const<i32>,)>(Matching::Strict, 1), Position::NotFound);
        assert_eq!(
            find::<Const<f64>, (f64, Const<f64>)>(Matching::Strict, 1),
            Position::Found(1)
        );
        assert_eq!(find::<&i32, (i32, &i32)>(Matching::Strict, 1), Position::Found(1));
    }

    #[test]
    fn find_relaxed() {
        assert_eq!(find::<i32, (Const<i32>,)>(Matching::Relaxed, 1), Position::Found(0));
        assert_eq!(find::<i32, (&i32,)>(Matching::Relaxed, 1), Position::Found(0));
        assert_eq!(find::<i32, (&mut i32,)>(Matching::Relaxed, 1), Position::Found(0));
        assert_eq!(
            find::<Const<i32>, (bool, &i32)>(Matching::Relaxed, 1),
            Position::Found(1)
        );
        assert_eq!(find::<i32, (i64, u32)>(Matching::Relaxed, 1), Position::NotFound);
    }

    #[test]
    fn find_nth_occurrence() {
        type List = (i32, bool, u32, i32);
        assert_eq!(find::<i32, List>(Matching::Strict, 1), Position::Found(0));
        assert_eq!(find::<i32, List>(Matching::Strict, 2), Position::Found(3));
        assert_eq!(find::<i32, List>(Matching::Strict, 3), Position::NotFound);
        assert_eq!(find::<bool, List>(Matching::Strict, 1), Position::Found(1));
        assert_eq!(find::<u32, List>(Matching::Strict, 2), Position::NotFound);
    }

    #[test]
    fn find_nth_mixed_qualifiers() {
        type List<'a> = (&'a i32, bool, Const<i32>, i32);
        assert_eq!(find::<i32, List>(Matching::Relaxed, 2), Position::Found(2));
        assert_eq!(find::<i32, List>(Matching::Relaxed, 3), Position::Found(3));
        assert_eq!(find::<i32, List>(Matching::Strict, 1), Position::Found(3));
        assert_eq!(find::<i32, List>(Matching::Strict, 2), Position::NotFound);
    }

    #[test]
    fn find_total_form() {
        assert_eq!(find::<i32, (i32,)>(Matching::Relaxed, 0), Position::NotFound);
        assert_eq!(find::<i32, ()>(Matching::Relaxed, 1), Position::NotFound);
    }

    #[test]
    fn first_and_index_of() {
        type List<'a> = (bool, &'a String, String);
        assert_eq!(find_first::<String, List>(Matching::Strict), Position::Found(2));
        assert_eq!(find_first::<String, List>(Matching::Relaxed), Position::Found(1));
        assert_eq!(index_of::<String, List>(), Position::Found(1));
        assert_eq!(index_of::<char, List>(), Position::NotFound);
    }

    #[test]
    fn locate_with_policy() {
        type List = (i32, Const<i32>, i32);
        assert_eq!(locate::<Strict, i32, List, 2>(), Position::Found(2));
        assert_eq!(locate::<Relaxed, i32, List, 2>(), Position::Found(1));
        assert_eq!(locate::<Relaxed, i32, List, 4>(), Position::NotFound);
    }

    #[test]
    fn position_accessors() {
        assert_eq!(Position::Found(4).index(), Some(4));
        assert_eq!(Position::NotFound.index(), None);
        assert!(Position::Found(0).is_found());
        assert!(Position::NotFound.is_not_found());
        assert_eq!(Position::Found(2).to_string(), "found at 2");
        assert_eq!(Position::NotFound.to_string(), "not found");
    }

    #[test]
    fn base_at_reads_through_qualifiers() {
        let value = 5_i32;
        let list = (true, &value, Const::new(2.5_f64), String::from("x"));

        assert_eq!(list.base_at::<bool>(0), Some(&true));
        assert_eq!(list.base_at::<i32>(1), Some(&5));
        assert_eq!(list.base_at::<f64>(2), Some(&2.5));
        assert_eq!(list.base_at::<String>(3).map(String::as_str), Some("x"));
        assert_eq!(list.base_at::<i64>(1), None);
        assert_eq!(list.base_at::<bool>(4), None);
        assert_eq!(().base_at::<bool>(0), None);
    }
}
