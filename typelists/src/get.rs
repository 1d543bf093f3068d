use std::borrow::{Borrow, BorrowMut};

use crate::{Error, Result};

/// Access to the element at the statically known position `I`.
///
/// Only implemented for positions that exist, so reading past the end does not compile:
///
/// ```compile_fail
/// let _ = typelists::get::<2, _>((1, 2));
/// ```
pub trait Get<const I: usize> {
    type Output;

    fn get(self) -> Self::Output;

    fn get_ref(&self) -> &Self::Output;

    fn get_mut(&mut self) -> &mut Self::Output;
}

/// Moves the element at position `I` out of `values`.
///
/// Pass a reference to a tuple of references to keep everything borrowed.
pub fn get<const I: usize, L: Get<I>>(values: L) -> L::Output {
    <L as Get<I>>::get(values)
}

/// Shared access to an element chosen while the program runs.
///
/// Every element has to be borrowable as `C`.
pub trait Select<C: ?Sized> {
    fn at(&self, index: usize) -> Result<&C>;
}

/// Mutable access to an element chosen while the program runs.
pub trait SelectMut<C: ?Sized> {
    fn at_mut(&mut self, index: usize) -> Result<&mut C>;
}

/// Converts the element chosen while the program runs into the common type `C`.
pub trait SelectInto<C> {
    fn into_at(self, index: usize) -> Result<C>;
}

fn out_of_range(index: usize, len: usize) -> Error {
    tracing::debug!(index, len, "dynamic index out of range");
    Error::OutOfRange { index, len }
}

macro_rules! impl_get {
    ( @each [ $( $All:ident )* ] ) => {};
    ( @each [ $( $All:ident )* ] $index:tt $T:ident $( $rest_index:tt $Rest:ident )* ) => {
        impl< $( $All, )* > Get<$index> for ( $( $All, )* ) {
            type Output = $T;

            fn get(self) -> Self::Output {
                self.$index
            }

            fn get_ref(&self) -> &Self::Output {
                &self.$index
            }

            fn get_mut(&mut self) -> &mut Self::Output {
                &mut self.$index
            }
        }

        impl_get!(@each [ $( $All )* ] $( $rest_index $Rest )*);
    };
    ( $( $index:tt $T:ident )* ) => {
        impl_get!(@each [ $( $T )* ] $( $index $T )*);
    };
}

unroll_tuples!(impl_get);

macro_rules! impl_select {
    ( $( $index:tt $T:ident )* ) => {
        impl<C: ?Sized, $( $T: Borrow<C>, )* > Select<C> for ( $( $T, )* ) {
            fn at(&self, index: usize) -> Result<&C> {
                match index {
                    $( $index => Ok(<$T as Borrow<C>>::borrow(&self.$index)), )*
                    _ => Err(out_of_range(index, arity!($( $T )*))),
                }
            }
        }

        impl<C: ?Sized, $( $T: BorrowMut<C>, )* > SelectMut<C> for ( $( $T, )* ) {
            fn at_mut(&mut self, index: usize) -> Result<&mut C> {
                match index {
                    $( $index => Ok(<$T as BorrowMut<C>>::borrow_mut(&mut self.$index)), )*
                    _ => Err(out_of_range(index, arity!($( $T )*))),
                }
            }
        }

        impl<C, $( $T: Into<C>, )* > SelectInto<C> for ( $( $T, )* ) {
            fn into_at(self, index: usize) -> Result<C> {
                match index {
                    $( $index => Ok(<$T as Into<C>>::into(self.$index)), )*
                    _ => Err(out_of_range(index, arity!($( $T )*))),
                }
            }
        }
    };
}

unroll_tuples!(impl_select);
