use std::any::Any;

use crate::{
    get_or::{assert_arguments, resolve},
    identity::{Element, Field},
    matching::Matching,
    typelist::{count_identities, find_identity, index_of, Elements, Position, TypeList},
};

/// A tuple of [`Field`]s that can back a [`Record`].
pub trait Fields: Elements + Sized {
    /// Takes every field from `arguments`, or its default if there are not enough of its type.
    fn from_arguments<A: Elements>(arguments: &A) -> Self;

    /// Returns the unqualified value at `index` if it is a `B` and the field is not constant.
    fn base_at_mut<B: Any>(&mut self, index: usize) -> Option<&mut B>;
}

/// Which argument initializes the field at `index`.
///
/// The `n`th field of a type takes the `n`th argument of that type.
const fn field_argument<F: Element, Fs: TypeList, A: TypeList>(index: usize) -> Position {
    let (preceding, _) = Fs::IDENTITIES.split_at(index + 1);
    let nth = count_identities(Matching::Relaxed, F::IDENTITY, preceding);
    find_identity(Matching::Relaxed, F::IDENTITY, nth, A::IDENTITIES)
}

const fn field_index<T: Element, Fs: TypeList>() -> usize {
    match index_of::<T, Fs>() {
        Position::Found(index) => index,
        Position::NotFound => panic!("the record has no field of this type"),
    }
}

const fn mutable_field_index<T: Element, Fs: TypeList>() -> usize {
    let index = field_index::<T, Fs>();
    if Fs::IDENTITIES[index].qualifiers().is_constant() {
        panic!("cannot set a constant field");
    }
    index
}

fn downcast_mut<F: Field, B: Any>(field: &mut F) -> Option<&mut B> {
    let base: &mut dyn Any = field.base_mut()?;
    base.downcast_mut()
}

macro_rules! impl_fields {
    ( @impl $Fields:tt $( $index:tt $T:ident )* ) => {
        impl< $( $T, )* > Fields for $Fields
        where
            $( $T: Field, <$T as Element>::Base: Clone + Default, )*
        {
            #[allow(unused_variables)]
            fn from_arguments<A: Elements>(arguments: &A) -> Self {
                ( $(
                    $T::from_base(resolve(
                        arguments,
                        const { field_argument::<$T, $Fields, A>($index) },
                        Default::default(),
                    )),
                )* )
            }

            fn base_at_mut<B: Any>(&mut self, index: usize) -> Option<&mut B> {
                match index {
                    $( $index => downcast_mut(&mut self.$index), )*
                    _ => None,
                }
            }
        }
    };
    ( $( $index:tt $T:ident )* ) => {
        impl_fields!(@impl ( $( $T, )* ) $( $index $T )*);
    };
}

unroll_tuples!(impl_fields);

/// A struct whose fields are addressed by type and initialized from optional arguments in any
/// order.
///
/// Arguments are checked while compiling: every argument needs a field of its type, and there
/// may be at most as many arguments of a type as there are fields of it. Fields without an
/// argument are default-initialized.
///
/// ```
/// use typelists::{strong, Const, Record};
///
/// strong!(type Red = f64;);
/// strong!(type Green = f64;);
/// strong!(type Blue = f64;);
/// strong!(type Alpha = f64;);
///
/// let mut color = Record::<(Red, Green, Blue, Const<Alpha>)>::new((
///     Alpha::new(1.0),
///     Red::new(0.5),
///     Green::new(1.0),
/// ));
/// assert_eq!(*color.get::<Red>(), 0.5);
/// assert_eq!(*color.get::<Blue>(), 0.0);
/// assert_eq!(*color.get::<Alpha>(), 1.0);
///
/// color.set(Blue::new(0.25));
/// assert_eq!(*color.get::<Blue>(), 0.25);
/// ```
///
/// Constant fields cannot be set:
///
/// ```compile_fail
/// use typelists::{Const, Record};
///
/// let mut record = Record::<(Const<i32>, bool)>::new((1,));
/// record.set(2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Record<F> {
    fields: F,
}

impl<F: Fields> Record<F> {
    pub fn new<A: Elements>(arguments: A) -> Self {
        assert_arguments::<F, A>();
        Self {
            fields: F::from_arguments(&arguments),
        }
    }

    /// The first field of type `T`, whether it is constant or not.
    pub fn get<T: Element<Base = T> + 'static>(&self) -> &T {
        let index = const { field_index::<T, F>() };
        self.fields
            .base_at::<T>(index)
            .expect("field should hold a value of its own base type")
    }

    /// Overwrites the first field of type `T`, which must not be constant.
    pub fn set<T: Element<Base = T> + 'static>(&mut self, value: T) {
        let index = const { mutable_field_index::<T, F>() };
        let field = self
            .fields
            .base_at_mut::<T>(index)
            .expect("mutable field should hold a value of its own base type");
        *field = value;
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    pub fn into_fields(self) -> F {
        self.fields
    }
}

impl<F: Fields> Default for Record<F> {
    fn default() -> Self {
        Self::new(())
    }
}
