/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Scalar
//!
//! One register type for every fixed-width value: booleans, integers of
//! every width, and floats. The value is reinterpreted into its machine
//! word and all five operations go straight to the hardware atomic.
//!
//! # Author
//!
//! Haixing Hu

use std::fmt;
use std::marker::PhantomData;

use crate::atomic::scalar::{
    update_word,
    Cell,
    Scalar,
};
use crate::atomic::traits::{
    Atomic,
    AtomicAdd,
};
use crate::atomic::word::Word;

/// Atomic register over a fixed-width scalar.
///
/// All operations are wait-free except `add` on floats and the
/// functional updates, which retry a CAS loop until they win.
///
/// # Memory Ordering Strategy
///
/// - **Read operations** (`load`): `Acquire`.
/// - **Write operations** (`store`): `Release`.
/// - **Read-Modify-Write** (`swap`, `compare_and_swap`, `add`): `AcqRel`.
///
/// # Equality
///
/// `compare_and_swap` compares machine words. For floats this means bit
/// patterns: `0.0` and `-0.0` do not match, and a stored NaN matches the
/// very same NaN bits.
///
/// # Example
///
/// ```rust
/// use prism3_register::AtomicI32;
///
/// let atomic = AtomicI32::new(4);
/// assert_eq!(atomic.swap(5), 4);
/// assert!(atomic.compare_and_swap(5, 6));
/// assert!(!atomic.compare_and_swap(5, 6));
/// assert_eq!(atomic.load(), 6);
/// ```
///
/// # Author
///
/// Haixing Hu
#[repr(transparent)]
pub struct AtomicScalar<T: Scalar> {
    inner: Cell<T>,
    _marker: PhantomData<T>,
}

/// Atomic boolean. `add` is logical AND.
pub type AtomicBool = AtomicScalar<bool>;
/// Atomic 8-bit signed integer.
pub type AtomicI8 = AtomicScalar<i8>;
/// Atomic 8-bit unsigned integer.
pub type AtomicU8 = AtomicScalar<u8>;
/// Atomic 16-bit signed integer.
pub type AtomicI16 = AtomicScalar<i16>;
/// Atomic 16-bit unsigned integer.
pub type AtomicU16 = AtomicScalar<u16>;
/// Atomic 32-bit signed integer.
pub type AtomicI32 = AtomicScalar<i32>;
/// Atomic 32-bit unsigned integer.
pub type AtomicU32 = AtomicScalar<u32>;
/// Atomic 64-bit signed integer.
pub type AtomicI64 = AtomicScalar<i64>;
/// Atomic 64-bit unsigned integer.
pub type AtomicU64 = AtomicScalar<u64>;
/// Atomic pointer-width signed integer.
pub type AtomicIsize = AtomicScalar<isize>;
/// Atomic pointer-width unsigned integer.
pub type AtomicUsize = AtomicScalar<usize>;
/// Atomic 32-bit float, stored as its bit pattern.
pub type AtomicF32 = AtomicScalar<f32>;
/// Atomic 64-bit float, stored as its bit pattern.
pub type AtomicF64 = AtomicScalar<f64>;

impl<T: Scalar> AtomicScalar<T> {
    /// Creates a new register holding `value`.
    ///
    /// # Parameters
    ///
    /// * `value` - The initial value.
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            inner: T::Word::new_atomic(value.into_word()),
            _marker: PhantomData,
        }
    }

    /// Loads the current value.
    ///
    /// Uses `Acquire` ordering.
    ///
    /// # Returns
    ///
    /// The current value.
    #[inline]
    pub fn load(&self) -> T {
        T::from_word(T::Word::load(&self.inner))
    }

    /// Stores a new value.
    ///
    /// Uses `Release` ordering.
    ///
    /// # Parameters
    ///
    /// * `value` - The new value to store.
    #[inline]
    pub fn store(&self, value: T) {
        T::Word::store(&self.inner, value.into_word());
    }

    /// Swaps the current value with a new value, returning the old value.
    ///
    /// Uses `AcqRel` ordering.
    ///
    /// # Parameters
    ///
    /// * `value` - The new value to swap in.
    ///
    /// # Returns
    ///
    /// The old value.
    #[inline]
    pub fn swap(&self, value: T) -> T {
        T::from_word(T::Word::swap(&self.inner, value.into_word()))
    }

    /// Replaces the value by `desired` if it currently equals `expected`.
    ///
    /// # Memory Ordering
    ///
    /// - **Success**: `AcqRel`.
    /// - **Failure**: `Acquire`.
    ///
    /// # Parameters
    ///
    /// * `expected` - The expected current value.
    /// * `desired` - The new value to set if the current value matches.
    ///
    /// # Returns
    ///
    /// `true` if the swap happened.
    #[inline]
    pub fn compare_and_swap(&self, expected: T, desired: T) -> bool {
        T::Word::compare_and_swap(&self.inner, expected.into_word(), desired.into_word())
    }

    /// Combines `delta` into the value, returning the new value.
    ///
    /// Integers add with wrap-around, floats add through a CAS loop,
    /// booleans AND.
    ///
    /// # Parameters
    ///
    /// * `delta` - The value to combine in.
    ///
    /// # Returns
    ///
    /// The new value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_register::AtomicU8;
    ///
    /// let atomic = AtomicU8::new(250);
    /// assert_eq!(atomic.add(10), 4);
    /// ```
    #[inline]
    pub fn add(&self, delta: T) -> T {
        T::add_in_place(&self.inner, delta)
    }

    /// Updates the value with a function, returning the old value.
    ///
    /// Internally a CAS loop; `f` may run more than once under contention.
    ///
    /// # Parameters
    ///
    /// * `f` - Maps the current value to the new value.
    ///
    /// # Returns
    ///
    /// The value before the update.
    #[inline]
    pub fn fetch_update<F>(&self, f: F) -> T
    where
        F: Fn(T) -> T,
    {
        update_word(&self.inner, f).0
    }

    /// Updates the value with a function, returning the new value.
    ///
    /// # Parameters
    ///
    /// * `f` - Maps the current value to the new value.
    ///
    /// # Returns
    ///
    /// The value after the update.
    #[inline]
    pub fn update_and_get<F>(&self, f: F) -> T
    where
        F: Fn(T) -> T,
    {
        update_word(&self.inner, f).1
    }

    /// Consumes the register, returning the value it holds.
    #[inline]
    pub fn into_inner(self) -> T {
        T::from_word(T::Word::into_inner(self.inner))
    }
}

impl<T> AtomicScalar<T>
where
    T: Scalar<Word = T> + Word,
{
    /// Subtracts `delta` with wrap-around, returning the new value.
    ///
    /// # Parameters
    ///
    /// * `delta` - The value to subtract.
    ///
    /// # Returns
    ///
    /// The new value.
    #[inline]
    pub fn sub(&self, delta: T) -> T {
        <T as Word>::sub(&self.inner, delta)
    }
}

impl AtomicScalar<bool> {
    /// Sets the flag to `true` if it was `false`.
    ///
    /// # Returns
    ///
    /// `true` if this call flipped the flag.
    #[inline]
    pub fn set_if_false(&self) -> bool {
        self.compare_and_swap(false, true)
    }

    /// Logical OR, returning the old value.
    #[inline]
    pub fn fetch_or(&self, value: bool) -> bool {
        bool::from_word(u8::fetch_or(&self.inner, value.into_word()))
    }
}

impl<T: Scalar> Atomic for AtomicScalar<T> {
    type Value = T;

    #[inline]
    fn load(&self) -> T {
        self.load()
    }

    #[inline]
    fn store(&self, value: T) {
        self.store(value);
    }

    #[inline]
    fn swap(&self, value: T) -> T {
        self.swap(value)
    }

    #[inline]
    fn compare_and_swap(&self, expected: T, desired: T) -> bool {
        self.compare_and_swap(expected, desired)
    }
}

impl<T: Scalar> AtomicAdd for AtomicScalar<T> {
    #[inline]
    fn add(&self, delta: T) -> T {
        self.add(delta)
    }
}

impl<T: Scalar + Default> Default for AtomicScalar<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Scalar> From<T> for AtomicScalar<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Scalar + fmt::Debug> fmt::Debug for AtomicScalar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicScalar")
            .field("value", &self.load())
            .finish()
    }
}

impl<T: Scalar + fmt::Display> fmt::Display for AtomicScalar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.load())
    }
}
