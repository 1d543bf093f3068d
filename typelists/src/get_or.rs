use std::any::Any;

use derive_more::Display;

use crate::{
    identity::{Element, Identity},
    matching::{Matching, Policy, Relaxed, Strict},
    typelist::{count_identities, find, Elements, Position, TypeList},
};

/// Reads the value at `position`, falling back to `default` if there is none.
///
/// # Panics
///
/// If the entry at `position` is not a `B`, which means two distinct types share an identity.
pub(crate) fn resolve<A: Elements, B: Any + Clone>(arguments: &A, position: Position, default: B) -> B {
    match position {
        Position::Found(index) => arguments
            .base_at::<B>(index)
            .cloned()
            .unwrap_or_else(|| {
                panic!(
                    "argument {index} has the identity of {} but a different type",
                    std::any::type_name::<B>()
                )
            }),
        Position::NotFound => default,
    }
}

/// Returns the `NTH` occurrence of `T` in `arguments` under the policy `P`, or `default` if there
/// are fewer.
///
/// Qualified entries (`&T`, `&mut T`, [`Const<T>`][crate::Const]) yield a clone of the `T` they
/// hold. `NTH` is counted from `1`:
///
/// ```compile_fail
/// use typelists::{get_or_with, Relaxed};
///
/// let _ = get_or_with::<Relaxed, i32, 0, _>(0, &(1,));
/// ```
pub fn get_or_with<P, T, const NTH: usize, A>(default: T, arguments: &A) -> T
where
    P: Policy,
    T: Element<Base = T> + Clone + 'static,
    A: Elements,
{
    let position = const {
        assert!(NTH > 0, "occurrences are counted from 1");
        find::<T, A>(P::MATCHING, NTH)
    };
    resolve(arguments, position, default)
}

/// [`get_or_with`] using [`Matching::Relaxed`].
pub fn get_nth_or<T, const NTH: usize, A>(default: T, arguments: &A) -> T
where
    T: Element<Base = T> + Clone + 'static,
    A: Elements,
{
    get_or_with::<Relaxed, T, NTH, A>(default, arguments)
}

/// Returns the first `T` in `arguments`, ignoring qualifiers, or `default`.
///
/// A function taking a tuple of arguments asks for "the `n`th value of type `T`, or this default"
/// once per parameter. The caller may pass any subset of the parameters in any order, as long as
/// values of the same type keep their relative order.
///
/// ```
/// use typelists::{assert_arguments, get_nth_or, get_or, Elements};
///
/// struct Npc {
///     name: String,
///     position: [f64; 3],
///     hp: i32,
/// }
///
/// fn npc<A: Elements>(arguments: A) -> Npc {
///     assert_arguments::<(String, f64, f64, f64, i32), A>();
///     Npc {
///         name: get_or(String::from("NPC"), &arguments),
///         position: [
///             get_nth_or::<_, 1, _>(10.0, &arguments),
///             get_nth_or::<_, 2, _>(1.0, &arguments),
///             get_nth_or::<_, 3, _>(20.0, &arguments),
///         ],
///         hp: get_or(100, &arguments),
///     }
/// }
///
/// let batman = npc((400, String::from("Batman"), 1000.0));
/// assert_eq!(batman.name, "Batman");
/// assert_eq!(batman.position, [1000.0, 1.0, 20.0]);
/// assert_eq!(batman.hp, 400);
/// ```
pub fn get_or<T, A>(default: T, arguments: &A) -> T
where
    T: Element<Base = T> + Clone + 'static,
    A: Elements,
{
    get_or_with::<Relaxed, T, 1, A>(default, arguments)
}

/// Returns the first entry that is exactly `T`, or `default`.
pub fn get_or_strict<T, A>(default: T, arguments: &A) -> T
where
    T: Element<Base = T> + Clone + 'static,
    A: Elements,
{
    get_or_with::<Strict, T, 1, A>(default, arguments)
}

/// Like [`get_or_with`], but with an ordinal that is only known while the program runs.
///
/// An `nth` of `0` always yields `default`.
pub fn get_nth_or_dynamic_with<P, T, A>(nth: usize, default: T, arguments: &A) -> T
where
    P: Policy,
    T: Element<Base = T> + Clone + 'static,
    A: Elements,
{
    resolve(arguments, find::<T, A>(P::MATCHING, nth), default)
}

/// Like [`get_nth_or`], but with an ordinal that is only known while the program runs.
///
/// Matching is always [`Matching::Relaxed`]; use [`get_nth_or_dynamic_with`] to choose.
pub fn get_nth_or_dynamic<T, A>(nth: usize, default: T, arguments: &A) -> T
where
    T: Element<Base = T> + Clone + 'static,
    A: Elements,
{
    get_nth_or_dynamic_with::<Relaxed, T, A>(nth, default, arguments)
}

/// The outcome of checking a list of arguments against the accepted ones.
#[derive(Clone, Copy, Debug, Display, Hash, PartialEq, Eq)]
pub enum Validation {
    #[display(fmt = "valid")]
    Valid,
    /// The argument at `position` has a type that is not accepted at all.
    #[display(fmt = "argument {} is not accepted", position)]
    Unexpected { position: usize },
    /// The argument at `position` is one more of its type than accepted.
    #[display(fmt = "argument {} exceeds the accepted count of its type", position)]
    TooMany { position: usize },
}

impl Validation {
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Checks `arguments` against `accepted`, reporting the first offending argument.
///
/// Every type may occur in `arguments` as often as it occurs in `accepted`.
pub const fn validate(matching: Matching, accepted: &[Identity], arguments: &[Identity]) -> Validation {
    let mut position = 0;
    while position < arguments.len() {
        let argument = arguments[position];
        let capacity = count_identities(matching, argument, accepted);
        if capacity == 0 {
            return Validation::Unexpected { position };
        }
        let (seen, _) = arguments.split_at(position + 1);
        if count_identities(matching, argument, seen) > capacity {
            return Validation::TooMany { position };
        }
        position += 1;
    }
    Validation::Valid
}

/// Fails to compile unless every type in `Arguments` is accepted by `Accepted`, at most as often
/// as `Accepted` lists it. Qualifiers are ignored.
///
/// ```
/// use typelists::{assert_arguments, Const};
///
/// assert_arguments::<(String, i32, i32), (i32, &String, Const<i32>)>();
/// ```
///
/// Arguments that would be ignored are rejected, whether there are too many of a type:
///
/// ```compile_fail
/// use typelists::assert_arguments;
///
/// assert_arguments::<(String, i32), (i32, i32)>();
/// ```
///
/// or the type is not accepted at all:
///
/// ```compile_fail
/// use typelists::assert_arguments;
///
/// assert_arguments::<(String,), (u8,)>();
/// ```
pub const fn assert_arguments<Accepted: TypeList, Arguments: TypeList>() {
    const {
        match validate(Matching::Relaxed, Accepted::IDENTITIES, Arguments::IDENTITIES) {
            Validation::Valid => {}
            Validation::Unexpected { .. } => panic!("unexpected argument type"),
            Validation::TooMany { .. } => panic!("too many arguments of the same type"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Const;

    #[test]
    fn default_when_absent() {
        assert!(!get_or(false, &(1,)));
        assert_eq!(get_or(7_u8, &()), 7);
        assert_eq!(get_or(String::from("none"), &(1, 2.0, 'c')), "none");
    }

    fn optional_or_none<T, A>(arguments: &A) -> Option<T>
    where
        T: Element<Base = T> + Clone + 'static,
        A: Elements,
    {
        get_or(None, arguments)
    }

    #[test]
    fn generic_wrappers_from_generic_code() {
        let arguments = (Some(3_u8), vec![1.5_f64], Box::new('c'));
        assert_eq!(optional_or_none::<u8, _>(&arguments), Some(3));
        assert_eq!(optional_or_none::<i32, _>(&arguments), None);
        assert_eq!(get_or(Vec::<f64>::new(), &arguments), [1.5]);
        assert_eq!(*get_or(Box::new('z'), &arguments), 'c');
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(get_or(1, &(3, 4)), 3);
        assert_eq!(get_nth_or::<i32, 2, _>(1, &(3, 4)), 4);
        assert_eq!(get_nth_or::<i32, 3, _>(1, &(3, 4)), 1);
    }

    #[test]
    fn strict_skips_qualified_entries() {
        let i1 = 1;
        assert_eq!(get_or_strict(0, &(&i1, 3, 4)), 3);
        assert_eq!(get_or(0, &(&i1, 3, 4)), 1);
        assert_eq!(get_or_strict(0, &(&i1, Const::new(2))), 0);
    }

    #[test]
    fn no_numeric_coalescing() {
        assert_eq!(get_or(0_i32, &(0.5_f32, 1.0_f64, 7_i64)), 0);
        assert_eq!(get_or(0.0_f64, &(0_i32, 0.5_f32, 1.0_f64)), 1.0);
    }

    #[test]
    fn relaxed_reads_through_qualifiers() {
        let mut hp = 40;
        let name = String::from("Batman");
        let arguments = (Const::new(2.5), &name, &mut hp);

        assert_eq!(get_or(0.0, &arguments), 2.5);
        assert_eq!(get_or(String::new(), &arguments), "Batman");
        assert_eq!(get_or(0, &arguments), 40);
    }

    #[test]
    fn dynamic_ordinal() {
        let arguments = (1_u8, 'a', 2_u8, 3_u8);
        assert_eq!(get_nth_or_dynamic(0, 9_u8, &arguments), 9);
        assert_eq!(get_nth_or_dynamic(1, 9_u8, &arguments), 1);
        assert_eq!(get_nth_or_dynamic(3, 9_u8, &arguments), 3);
        assert_eq!(get_nth_or_dynamic(4, 9_u8, &arguments), 9);
        assert_eq!(get_nth_or_dynamic(1, 'z', &()), 'z');
    }

    #[test]
    fn dynamic_ordinal_with_policy() {
        let i1 = 1;
        let arguments = (&i1, 2, Const::new(3), 4);
        assert_eq!(get_nth_or_dynamic_with::<Relaxed, i32, _>(1, 0, &arguments), 1);
        assert_eq!(get_nth_or_dynamic_with::<Strict, i32, _>(1, 0, &arguments), 2);
        assert_eq!(get_nth_or_dynamic_with::<Strict, i32, _>(2, 0, &arguments), 4);
        assert_eq!(get_nth_or_dynamic_with::<Strict, i32, _>(3, 0, &arguments), 0);
        assert_eq!(get_nth_or_dynamic(3, 0, &arguments), 3);
    }

    #[test]
    fn explicit_policy() {
        let arguments = (Const::new(1), 2);
        assert_eq!(get_or_with::<Relaxed, i32, 1, _>(0, &arguments), 1);
        assert_eq!(get_or_with::<Strict, i32, 1, _>(0, &arguments), 2);
        assert_eq!(get_or_with::<Strict, i32, 2, _>(0, &arguments), 0);
    }

    #[test]
    fn validation() {
        type Accepted = (String, f64, f64, f64, i32);

        let check = |arguments: &[Identity]| {
            validate(Matching::Relaxed, <Accepted as TypeList>::IDENTITIES, arguments)
        };

        assert_eq!(check(<() as TypeList>::IDENTITIES), Validation::Valid);
        assert_eq!(
            check(<(f64, i32, f64, String, f64) as TypeList>::IDENTITIES),
            Validation::Valid
        );
        assert_eq!(
            check(<(&String, Const<i32>) as TypeList>::IDENTITIES),
            Validation::Valid
        );
        assert_eq!(
            check(<(String, u8) as TypeList>::IDENTITIES),
            Validation::Unexpected { position: 1 }
        );
        assert_eq!(
            check(<(i32, String, i32) as TypeList>::IDENTITIES),
            Validation::TooMany { position: 2 }
        );
        assert_eq!(
            check(<(f64, f64, f64, f64) as TypeList>::IDENTITIES),
            Validation::TooMany { position: 3 }
        );
        assert!(!Validation::TooMany { position: 3 }.is_valid());
        assert_eq!(
            Validation::Unexpected { position: 1 }.to_string(),
            "argument 1 is not accepted"
        );
    }

    #[test]
    fn strict_validation() {
        let accepted = <(i32,) as TypeList>::IDENTITIES;
        let arguments = <(&i32,) as TypeList>::IDENTITIES;
        assert_eq!(
            validate(Matching::Strict, accepted, arguments),
            Validation::Unexpected { position: 0 }
        );
        assert!(validate(Matching::Relaxed, accepted, arguments).is_valid());
    }

    #[derive(Debug)]
    struct Npc {
        name: String,
        x: f64,
        y: f64,
        z: f64,
        hp: i32,
    }

    fn initialize<A: Elements>(arguments: A) -> Npc {
        assert_arguments::<(String, f64, f64, f64, i32), A>();
        Npc {
            name: get_or(String::from("NPC 1"), &arguments),
            x: get_nth_or::<_, 1, _>(10.0, &arguments),
            y: get_nth_or::<_, 2, _>(1.0, &arguments),
            z: get_nth_or::<_, 3, _>(20.0, &arguments),
            hp: get_or(100, &arguments),
        }
    }

    #[test]
    fn npc_defaults() {
        let npc = initialize(());
        assert_eq!(npc.name, "NPC 1");
        assert_eq!((npc.x, npc.y, npc.z), (10.0, 1.0, 20.0));
        assert_eq!(npc.hp, 100);
    }

    #[test]
    fn npc_partial_arguments() {
        let npc = initialize((String::from("Batman"),));
        assert_eq!(npc.name, "Batman");
        assert_eq!(npc.hp, 100);

        let npc = initialize((100.0_f64, 1.5_f64));
        assert_eq!((npc.x, npc.y, npc.z), (100.0, 1.5, 20.0));
        assert_eq!(npc.name, "NPC 1");
    }

    #[test]
    fn npc_any_order() {
        let npc = initialize((10_000_i32, String::from("Wolverine"), 3_000.0_f64));
        assert_eq!(npc.name, "Wolverine");
        assert_eq!(npc.x, 3_000.0);
        assert_eq!(npc.y, 1.0);
        assert_eq!(npc.hp, 10_000);

        let npc = initialize((1.0_f64, 10_000_i32, 0.0_f64, String::from("Wolverine"), -1.0_f64));
        assert_eq!(npc.name, "Wolverine");
        assert_eq!((npc.x, npc.y, npc.z), (1.0, 0.0, -1.0));
        assert_eq!(npc.hp, 10_000);
    }
}
