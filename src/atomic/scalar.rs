/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Scalar Values
//!
//! Maps every fixed-width value type onto a [`Word`] through a pair of
//! bit-reinterpretation functions, and defines how `add` folds a delta into
//! that value.
//!
//! # Author
//!
//! Haixing Hu

use crate::atomic::word::Word;

/// The atomic cell behind a scalar's word.
pub type Cell<T> = <<T as Scalar>::Word as Word>::Atomic;

/// A value type stored bit-for-bit in a single machine word.
///
/// # Author
///
/// Haixing Hu
pub trait Scalar: Copy + Send + Sync + 'static {
    /// The word the value is reinterpreted as.
    type Word: Word;

    /// Reinterprets the value as its word.
    fn into_word(self) -> Self::Word;

    /// Reinterprets a word as the value.
    fn from_word(word: Self::Word) -> Self;

    /// The combine policy used by `add`.
    fn combine(self, delta: Self) -> Self;

    /// Atomically folds `delta` into `cell`, returning the new value.
    ///
    /// The default is a CAS loop over [`Scalar::combine`]; types whose
    /// combine policy matches a hardware instruction override it.
    #[inline]
    fn add_in_place(cell: &Cell<Self>, delta: Self) -> Self {
        update_word::<Self, _>(cell, |current| current.combine(delta)).1
    }
}

/// Runs a load/compute/CAS loop on `cell` until the CAS wins.
///
/// # Returns
///
/// The `(old, new)` pair that was installed.
#[inline]
pub(crate) fn update_word<T, F>(cell: &Cell<T>, f: F) -> (T, T)
where
    T: Scalar,
    F: Fn(T) -> T,
{
    let mut current = T::Word::load(cell);
    loop {
        let new = f(T::from_word(current));
        match T::Word::compare_exchange_weak(cell, current, new.into_word()) {
            Ok(_) => return (T::from_word(current), new),
            Err(actual) => current = actual,
        }
    }
}

macro_rules! impl_integer_scalar {
    ($($int:ty),* $(,)?) => {
        $(
            impl Scalar for $int {
                type Word = $int;

                #[inline]
                fn into_word(self) -> Self::Word {
                    self
                }

                #[inline]
                fn from_word(word: Self::Word) -> Self {
                    word
                }

                #[inline]
                fn combine(self, delta: Self) -> Self {
                    self.wrapping_add(delta)
                }

                #[inline]
                fn add_in_place(cell: &Cell<Self>, delta: Self) -> Self {
                    <$int as Word>::add(cell, delta)
                }
            }
        )*
    };
}

impl_integer_scalar!(u8, i8, u16, i16, u32, i32, u64, i64, usize, isize);

// Floats travel as their IEEE-754 bit pattern; there is no hardware float
// add, so they keep the default CAS loop.
impl Scalar for f32 {
    type Word = u32;

    #[inline]
    fn into_word(self) -> u32 {
        self.to_bits()
    }

    #[inline]
    fn from_word(word: u32) -> Self {
        f32::from_bits(word)
    }

    #[inline]
    fn combine(self, delta: Self) -> Self {
        self + delta
    }
}

impl Scalar for f64 {
    type Word = u64;

    #[inline]
    fn into_word(self) -> u64 {
        self.to_bits()
    }

    #[inline]
    fn from_word(word: u64) -> Self {
        f64::from_bits(word)
    }

    #[inline]
    fn combine(self, delta: Self) -> Self {
        self + delta
    }
}

impl Scalar for bool {
    type Word = u8;

    #[inline]
    fn into_word(self) -> u8 {
        self as u8
    }

    #[inline]
    fn from_word(word: u8) -> Self {
        word != 0
    }

    /// Adding booleans is logical AND.
    #[inline]
    fn combine(self, delta: Self) -> Self {
        self && delta
    }

    #[inline]
    fn add_in_place(cell: &Cell<Self>, delta: Self) -> Self {
        let old = u8::fetch_and(cell, delta.into_word());
        bool::from_word(old) && delta
    }
}
