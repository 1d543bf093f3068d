use std::{any::Any, fmt};

use derive_more::{Deref, From};
use ordered_float::{NotNan, OrderedFloat};

/// A single qualifier layer around a type.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[repr(u8)]
pub enum Qualifier {
    /// [`Const<T>`]
    Const = 1,
    /// `&T`
    Shared = 2,
    /// `&mut T`
    Unique = 3,
}

/// The stack of top-level qualifiers of an [`Identity`], outermost layer first.
///
/// Every layer takes two bits, so up to 32 layers can be told apart.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Qualifiers {
    layers: u64,
    depth: u8,
}

impl Qualifiers {
    pub const NONE: Self = Self {
        layers: 0,
        depth: 0,
    };

    /// Wraps the current layers in one more, which becomes the outermost.
    pub const fn push(self, qualifier: Qualifier) -> Self {
        Self {
            layers: (self.layers << 2) | qualifier as u64,
            depth: self.depth.saturating_add(1),
        }
    }

    pub const fn is_empty(self) -> bool {
        self.depth == 0
    }

    pub const fn depth(self) -> usize {
        self.depth as usize
    }

    /// Returns the layer at `level`, where `0` is the outermost one.
    pub const fn get(self, level: usize) -> Option<Qualifier> {
        if level >= self.depth() || level >= 32 {
            return None;
        }
        match (self.layers >> (2 * level)) & 0b11 {
            1 => Some(Qualifier::Const),
            2 => Some(Qualifier::Shared),
            3 => Some(Qualifier::Unique),
            _ => None,
        }
    }

    /// Whether the outermost layer is [`Qualifier::Const`].
    pub const fn is_constant(self) -> bool {
        matches!(self.get(0), Some(Qualifier::Const))
    }

    pub const fn same(self, other: Self) -> bool {
        self.layers == other.layers && self.depth == other.depth
    }
}

/// Compile-time identity of a type.
///
/// Two types are the same entry of a type list if their identities are [`Identity::same`]. The
/// path names the nominal type and the site tells apart types of the same name declared in
/// different function bodies of one module. Generic arguments are compared recursively and
/// qualifiers only apply to the top level, so `Vec<&i32>` and `Vec<i32>` never match, whatever the
/// [`Matching`][crate::Matching].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Identity {
    pub(crate) path: &'static str,
    pub(crate) site: &'static str,
    pub(crate) args: &'static [Identity],
    pub(crate) qualifiers: Qualifiers,
}

impl Identity {
    /// The identity of a non-generic, unqualified type.
    ///
    /// `path` has to be unique to the type. Prefer [`element!`][crate::element], which derives it
    /// from the declaration.
    pub const fn new(path: &'static str) -> Self {
        Self::declared(path, "")
    }

    /// Like [`Identity::new`], with the source location the type was declared at.
    pub const fn declared(path: &'static str, site: &'static str) -> Self {
        Self {
            path,
            site,
            args: &[],
            qualifiers: Qualifiers::NONE,
        }
    }

    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// `file:line:column` of the declaring macro invocation, empty for built-in types.
    pub const fn site(&self) -> &'static str {
        self.site
    }

    pub const fn args(&self) -> &'static [Identity] {
        self.args
    }

    pub const fn qualifiers(&self) -> Qualifiers {
        self.qualifiers
    }

    /// Wraps the identity in another qualifier layer.
    pub const fn qualified(self, qualifier: Qualifier) -> Self {
        Self {
            qualifiers: self.qualifiers.push(qualifier),
            ..self
        }
    }

    /// Drops every top-level qualifier.
    pub const fn unqualified(self) -> Self {
        Self {
            qualifiers: Qualifiers::NONE,
            ..self
        }
    }

    /// Raw identity comparison, without any normalization.
    pub const fn same(&self, other: &Self) -> bool {
        if !self.qualifiers.same(other.qualifiers)
            || !str_eq(self.path, other.path)
            || !str_eq(self.site, other.site)
            || self.args.len() != other.args.len()
        {
            return false;
        }
        let mut index = 0;
        while index < self.args.len() {
            if !self.args[index].same(&other.args[index]) {
                return false;
            }
            index += 1;
        }
        true
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut constants = 0;
        for level in 0..self.qualifiers.depth() {
            match self.qualifiers.get(level) {
                Some(Qualifier::Const) => {
                    f.write_str("Const<")?;
                    constants += 1;
                }
                Some(Qualifier::Shared) => f.write_str("&")?,
                Some(Qualifier::Unique) => f.write_str("&mut ")?,
                None => {}
            }
        }
        f.write_str(self.path)?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            f.write_str(">")?;
        }
        for _ in 0..constants {
            f.write_str(">")?;
        }
        Ok(())
    }
}

const fn str_eq(lhs: &str, rhs: &str) -> bool {
    let (lhs, rhs) = (lhs.as_bytes(), rhs.as_bytes());
    if lhs.len() != rhs.len() {
        return false;
    }
    let mut index = 0;
    while index < lhs.len() {
        if lhs[index] != rhs[index] {
            return false;
        }
        index += 1;
    }
    true
}

/// A type that can be an entry of a [`TypeList`][crate::TypeList].
///
/// Qualified types ([`Const<T>`], `&T`, `&mut T`) share the [`Element::Base`] of the type they
/// qualify, which is how a value is read out of them once its position is known.
///
/// Use [`element!`][crate::element] to implement it for your own types.
pub trait Element {
    /// The unqualified type.
    type Base: Any;

    const IDENTITY: Identity;

    fn base(&self) -> &Self::Base;
}

/// An [`Element`] that owns its value and can therefore be stored in a
/// [`Record`][crate::Record].
pub trait Field: Element {
    fn from_base(base: Self::Base) -> Self;

    /// Returns [`None`] for constant fields.
    fn base_mut(&mut self) -> Option<&mut Self::Base>;
}

/// Implements [`Element`] and [`Field`] for non-generic types.
///
/// The identity is derived from the module and the source location the macro is invoked at, so
/// types with the same name never match, even when declared in different function bodies.
///
/// ```
/// use typelists::{count, element, Matching};
///
/// #[derive(Clone, Default)]
/// struct Health(u32);
///
/// element!(Health);
///
/// assert_eq!(count::<Health, (Health, &Health, u32)>(Matching::Relaxed), 2);
/// ```
#[macro_export]
macro_rules! element {
    ( $( $ty:ty ),* $(,)? ) => { $(
        impl $crate::Element for $ty {
            type Base = Self;

            const IDENTITY: $crate::Identity = $crate::Identity::declared(
                concat!(module_path!(), "::", stringify!($ty)),
                concat!(file!(), ":", line!(), ":", column!()),
            );

            fn base(&self) -> &Self::Base {
                self
            }
        }

        impl $crate::Field for $ty {
            fn from_base(base: Self::Base) -> Self {
                base
            }

            fn base_mut(&mut self) -> Option<&mut Self::Base> {
                Some(self)
            }
        }
    )* };
}

macro_rules! impl_element_for_primitive {
    ( $( $ty:ty => $path:literal ),* $(,)? ) => { $(
        impl Element for $ty {
            type Base = Self;

            const IDENTITY: Identity = Identity::new($path);

            fn base(&self) -> &Self::Base {
                self
            }
        }

        impl Field for $ty {
            fn from_base(base: Self::Base) -> Self {
                base
            }

            fn base_mut(&mut self) -> Option<&mut Self::Base> {
                Some(self)
            }
        }
    )* };
}

impl_element_for_primitive! {
    () => "()",
    bool => "bool",
    char => "char",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    String => "alloc::string::String",
}

macro_rules! impl_element_for_generic {
    ( $( $Outer:ident => $path:literal ),* $(,)? ) => { $(
        impl<T: Element<Base = T> + 'static> Element for $Outer<T> {
            type Base = Self;

            const IDENTITY: Identity = Identity {
                path: $path,
                site: "",
                args: &[T::IDENTITY],
                qualifiers: Qualifiers::NONE,
            };

            fn base(&self) -> &Self::Base {
                self
            }
        }

        impl<T: Element<Base = T> + 'static> Field for $Outer<T> {
            fn from_base(base: Self::Base) -> Self {
                base
            }

            fn base_mut(&mut self) -> Option<&mut Self::Base> {
                Some(self)
            }
        }
    )* };
}

impl_element_for_generic! {
    Option => "core::option::Option",
    Vec => "alloc::vec::Vec",
    Box => "alloc::boxed::Box",
    OrderedFloat => "ordered_float::OrderedFloat",
    NotNan => "ordered_float::NotNan",
}

impl<'a, T: Element> Element for &'a T {
    type Base = T::Base;

    const IDENTITY: Identity = T::IDENTITY.qualified(Qualifier::Shared);

    fn base(&self) -> &Self::Base {
        (**self).base()
    }
}

impl<'a, T: Element> Element for &'a mut T {
    type Base = T::Base;

    const IDENTITY: Identity = T::IDENTITY.qualified(Qualifier::Unique);

    fn base(&self) -> &Self::Base {
        (**self).base()
    }
}

/// Marks a value as constant.
///
/// Under [`Matching::Strict`][crate::Matching::Strict] `Const<T>` and `T` are different entries.
/// As a [`Record`][crate::Record] field it can be initialized but never set.
#[derive(Clone, Copy, Debug, Default, Deref, From, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Const<T>(T);

impl<T> Const<T> {
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Element> Element for Const<T> {
    type Base = T::Base;

    const IDENTITY: Identity = T::IDENTITY.qualified(Qualifier::Const);

    fn base(&self) -> &Self::Base {
        self.0.base()
    }
}

impl<T: Field> Field for Const<T> {
    fn from_base(base: Self::Base) -> Self {
        Self(T::from_base(base))
    }

    fn base_mut(&mut self) -> Option<&mut Self::Base> {
        None
    }
}
