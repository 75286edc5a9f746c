//! Ground atoms over host-provided equatable types.
//!
//! Atoms carry arbitrary host values behind `dyn Atomic`. Equality between
//! atoms of different underlying types is always false; equality between
//! atoms of the same type delegates to that type's `PartialEq`. The type
//! tag check happens by downcasting, so user-defined payload types work
//! the same way as the built-in ones.

use downcast_rs::{impl_downcast, Downcast};
use std::fmt;

/// Trait for ground values that can live inside a term.
///
/// Implement this for any equatable, printable host type to use it as an
/// atom payload. Implementations for the standard primitives are provided.
pub trait Atomic: Downcast + fmt::Debug + fmt::Display {
    /// Same-type-and-equal-payload equality. Cross-type comparison is false.
    fn eq_atom(&self, other: &dyn Atomic) -> bool;
}

impl_downcast!(Atomic);

macro_rules! impl_atomic {
    ($($t:ty),* $(,)?) => {
        $(
            impl Atomic for $t {
                fn eq_atom(&self, other: &dyn Atomic) -> bool {
                    other
                        .downcast_ref::<$t>()
                        .map(|o| o == self)
                        .unwrap_or(false)
                }
            }
        )*
    };
}

impl_atomic!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    u8,
    u16,
    u32,
    u64,
    u128,
    f32,
    f64,
    String,
    &'static str,
);
