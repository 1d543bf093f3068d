use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::{
        Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Deref,
        DerefMut, Div, DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Sub, SubAssign,
    },
};

use ordered_float::{NotNan, OrderedFloat};
use paste::paste;

use crate::identity::{Element, Field, Identity, Qualifiers};

/// Marker type that tells strong types apart.
///
/// Tags are never instantiated. Declare them with [`tag!`][crate::tag] or implicitly with
/// [`strong!`][crate::strong].
pub trait Tag: 'static {
    /// Path of the tag, used as the identity of every strong type carrying it.
    const PATH: &'static str;

    /// Source location of the declaration. Tells apart tags with the same path, such as two
    /// declared in different function bodies of one module.
    const SITE: &'static str = "";
}

pub trait Strategy {}

/// Primitive values with arithmetic.
#[derive(Debug)]
pub enum Scalar {}

/// Types whose whole interface is exposed mutably.
#[derive(Debug)]
pub enum Extensible {}

/// Types only exposed for reading.
#[derive(Debug)]
pub enum Sealed {}

impl Strategy for Scalar {}
impl Strategy for Extensible {}
impl Strategy for Sealed {}

/// Selects how [`Strong`] wraps a type.
///
/// Implemented for all primitives and a few standard types. Use [`wrap!`][crate::wrap] for your
/// own types.
pub trait Wrap {
    type Strategy: Strategy;
}

macro_rules! impl_wrap {
    ( $Strategy:ident => $( $ty:ty ),* $(,)? ) => { $(
        impl Wrap for $ty {
            type Strategy = $Strategy;
        }
    )* };
}

impl_wrap!(Scalar => bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
impl_wrap!(Extensible => String);

impl<F> Wrap for OrderedFloat<F> {
    type Strategy = Scalar;
}

impl<F> Wrap for NotNan<F> {
    type Strategy = Scalar;
}

impl<T> Wrap for Vec<T> {
    type Strategy = Extensible;
}

impl<T> Wrap for Option<T> {
    type Strategy = Extensible;
}

/// A `U` that is only interchangeable with other wrappers carrying the same tag `T`.
///
/// Two wrappers around the same representation never mix by accident:
///
/// ```compile_fail
/// use typelists::strong;
///
/// strong!(type Meters = f64;);
/// strong!(type Feet = f64;);
///
/// let mut distance = Meters::new(1.0);
/// distance = Feet::new(3.0);
/// ```
///
/// What a wrapper exposes depends on the [`Strategy`] of the wrapped type:
///
/// - [`Scalar`]: primitives. The value is read with `*` or [`Strong::get`] and changed through
///   arithmetic with the same wrapper or the bare type.
/// - [`Extensible`]: the wrapper dereferences mutably, so every method and field of the wrapped
///   type can be used as is.
/// - [`Sealed`]: read-only access through `Deref` and [`AsRef`]. Only whole values can be assigned.
///
/// Accessors are associated functions (`Strong::into_inner(value)`) so they never hide methods of
/// `U` reached through `Deref`.
///
/// ```
/// use typelists::{strong, wrap, Strong};
///
/// #[derive(Clone, Debug, Default, PartialEq)]
/// struct Counter {
///     count: i32,
/// }
///
/// impl Counter {
///     fn increment(&mut self) {
///         self.count += 1;
///     }
/// }
///
/// wrap!(Counter);
/// strong!(type Visits = Counter;);
///
/// let mut visits = Visits::default();
/// visits.increment();
/// visits.count += 1;
/// assert_eq!(visits.count, 2);
///
/// Strong::assign(&mut visits, Counter { count: 10 });
/// assert_eq!(Strong::into_inner(visits), Counter { count: 10 });
/// ```
pub struct Strong<U, T> {
    value: U,
    tag: PhantomData<fn() -> T>,
}

impl<U, T> Strong<U, T> {
    pub fn new(value: impl Into<U>) -> Self {
        Self::from_inner(value.into())
    }

    pub const fn from_inner(value: U) -> Self {
        Self {
            value,
            tag: PhantomData,
        }
    }

    pub fn into_inner(this: Self) -> U {
        this.value
    }

    /// Explicitly converts into a wrapper with another tag.
    pub fn retag<Other>(this: Self) -> Strong<U, Other> {
        Strong::from_inner(this.value)
    }

    /// Replaces the whole wrapped value.
    pub fn assign(this: &mut Self, value: impl Into<U>) {
        this.value = value.into();
    }
}

impl<U: Copy, T> Strong<U, T> {
    pub fn get(this: &Self) -> U {
        this.value
    }
}

impl<U, T> From<U> for Strong<U, T> {
    fn from(value: U) -> Self {
        Self::from_inner(value)
    }
}

impl<U, T> Deref for Strong<U, T> {
    type Target = U;

    fn deref(&self) -> &U {
        &self.value
    }
}

impl<U: Wrap<Strategy = Extensible>, T> DerefMut for Strong<U, T> {
    fn deref_mut(&mut self) -> &mut U {
        &mut self.value
    }
}

impl<U, T> AsRef<U> for Strong<U, T> {
    fn as_ref(&self) -> &U {
        &self.value
    }
}

impl<U: Clone, T> Clone for Strong<U, T> {
    fn clone(&self) -> Self {
        Self::from_inner(self.value.clone())
    }
}

impl<U: Copy, T> Copy for Strong<U, T> {}

impl<U: Default, T> Default for Strong<U, T> {
    fn default() -> Self {
        Self::from_inner(U::default())
    }
}

impl<U: PartialEq, T> PartialEq for Strong<U, T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<U: PartialEq, T> PartialEq<U> for Strong<U, T> {
    fn eq(&self, other: &U) -> bool {
        self.value == *other
    }
}

impl<U: Eq, T> Eq for Strong<U, T> {}

impl<U: PartialOrd, T> PartialOrd for Strong<U, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<U: PartialOrd, T> PartialOrd<U> for Strong<U, T> {
    fn partial_cmp(&self, other: &U) -> Option<Ordering> {
        self.value.partial_cmp(other)
    }
}

impl<U: Ord, T> Ord for Strong<U, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<U: Hash, T> Hash for Strong<U, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

/// Prints the name the tag was declared with, e.g. `Meters(1.5)`.
impl<U: fmt::Debug, T: Tag> fmt::Debug for Strong<U, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = T::PATH.rsplit("::").next().unwrap_or(T::PATH);
        f.debug_tuple(name).field(&self.value).finish()
    }
}

impl<U: fmt::Display, T> fmt::Display for Strong<U, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

macro_rules! impl_scalar_binop {
    ( $( $Op:ident $f:ident ),* $(,)? ) => { paste! { $(
        impl<U: Wrap<Strategy = Scalar> + $Op<Output = U>, T> $Op for Strong<U, T> {
            type Output = Self;

            fn $f(self, rhs: Self) -> Self::Output {
                Self::from_inner(<U as $Op>::$f(self.value, rhs.value))
            }
        }

        impl<U: Wrap<Strategy = Scalar> + $Op<Output = U>, T> $Op<U> for Strong<U, T> {
            type Output = Self;

            fn $f(self, rhs: U) -> Self::Output {
                Self::from_inner(<U as $Op>::$f(self.value, rhs))
            }
        }

        impl<U: Wrap<Strategy = Scalar> + [<$Op Assign>], T> [<$Op Assign>] for Strong<U, T> {
            fn [<$f _assign>](&mut self, rhs: Self) {
                <U as [<$Op Assign>]>::[<$f _assign>](&mut self.value, rhs.value);
            }
        }

        impl<U: Wrap<Strategy = Scalar> + [<$Op Assign>], T> [<$Op Assign>]<U> for Strong<U, T> {
            fn [<$f _assign>](&mut self, rhs: U) {
                <U as [<$Op Assign>]>::[<$f _assign>](&mut self.value, rhs);
            }
        }
    )* } };
}

impl_scalar_binop!(
    Add add,
    Sub sub,
    Mul mul,
    Div div,
    Rem rem,
    BitAnd bitand,
    BitOr bitor,
    BitXor bitxor,
);

impl<U: Wrap<Strategy = Scalar> + Neg<Output = U>, T> Neg for Strong<U, T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_inner(-self.value)
    }
}

impl<U: Wrap<Strategy = Scalar> + Not<Output = U>, T> Not for Strong<U, T> {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::from_inner(!self.value)
    }
}

impl<U: Element<Base = U> + 'static, T: Tag> Element for Strong<U, T> {
    type Base = Self;

    const IDENTITY: Identity = Identity {
        path: T::PATH,
        site: T::SITE,
        args: &[U::IDENTITY],
        qualifiers: Qualifiers::NONE,
    };

    fn base(&self) -> &Self::Base {
        self
    }
}

impl<U: Element<Base = U> + 'static, T: Tag> Field for Strong<U, T> {
    fn from_base(base: Self::Base) -> Self {
        base
    }

    fn base_mut(&mut self) -> Option<&mut Self::Base> {
        Some(self)
    }
}

/// Declares an uninhabited [`Tag`] type.
///
/// ```
/// use typelists::{tag, Strong};
///
/// tag!(pub Celsius);
///
/// let temperature = Strong::<f32, Celsius>::new(21.5);
/// assert_eq!(format!("{temperature:?}"), "Celsius(21.5)");
/// ```
#[macro_export]
macro_rules! tag {
    ( $( #[$meta:meta] )* $vis:vis $name:ident ) => {
        $( #[$meta] )*
        #[derive(Debug)]
        $vis enum $name {}

        impl $crate::Tag for $name {
            const PATH: &'static str = concat!(module_path!(), "::", stringify!($name));
            const SITE: &'static str = concat!(file!(), ":", line!(), ":", column!());
        }
    };
}

/// Declares a [`Strong`] type alias together with a fresh tag named after it.
///
/// ```
/// use typelists::strong;
///
/// strong!(pub type Meters = f64;);
///
/// let mut distance = Meters::new(1.5);
/// distance += 2.0;
/// assert_eq!(distance, 3.5);
/// ```
#[macro_export]
macro_rules! strong {
    ( $( #[$meta:meta] )* $vis:vis type $name:ident = $ty:ty; ) => {
        $crate::__paste! {
            #[derive(Debug)]
            $vis enum [<$name Tag>] {}

            impl $crate::Tag for [<$name Tag>] {
                const PATH: &'static str = concat!(module_path!(), "::", stringify!($name));
                const SITE: &'static str = concat!(file!(), ":", line!(), ":", column!());
            }

            $( #[$meta] )*
            $vis type $name = $crate::Strong<$ty, [<$name Tag>]>;
        }
    };
}

/// Opts a type into being wrapped by [`Strong`], as [`Extensible`] or as [`Sealed`].
///
/// Sealed wrappers hand out shared references only:
///
/// ```compile_fail
/// use typelists::{strong, wrap};
///
/// #[derive(Default)]
/// struct Player {
///     hp: i32,
/// }
///
/// wrap!(sealed Player);
/// strong!(type SafePlayer = Player;);
///
/// let mut player = SafePlayer::default();
/// player.hp = 10;
/// ```
#[macro_export]
macro_rules! wrap {
    ( sealed $( $ty:ty ),+ $(,)? ) => { $(
        impl $crate::Wrap for $ty {
            type Strategy = $crate::Sealed;
        }
    )+ };
    ( $( $ty:ty ),+ $(,)? ) => { $(
        impl $crate::Wrap for $ty {
            type Strategy = $crate::Extensible;
        }
    )+ };
}
