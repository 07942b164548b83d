/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Pointer
//!
//! A pointer-width register over raw pointers. The register never
//! dereferences or frees what it points to; ownership stays with the
//! caller.
//!
//! # Author
//!
//! Haixing Hu

use std::fmt;
use std::ptr;
use std::sync::atomic::AtomicPtr;
use std::sync::atomic::Ordering;

use crate::atomic::traits::Atomic;

/// Atomic raw pointer register.
///
/// Offers load, store, swap and compare-and-swap with the same orderings
/// as the scalar registers. There is no `add`: address arithmetic belongs
/// on an [`AtomicUsize`](crate::AtomicUsize).
///
/// # Example
///
/// ```rust
/// use prism3_register::AtomicPointer;
///
/// let mut a = 1;
/// let mut b = 2;
/// let pointer = AtomicPointer::new(&mut a as *mut i32);
/// assert!(pointer.compare_and_swap(&mut a, &mut b));
/// assert_eq!(pointer.load(), &mut b as *mut i32);
/// ```
///
/// # Author
///
/// Haixing Hu
#[repr(transparent)]
pub struct AtomicPointer<T> {
    inner: AtomicPtr<T>,
}

impl<T> AtomicPointer<T> {
    /// Creates a new pointer register.
    ///
    /// # Parameters
    ///
    /// * `value` - The initial pointer, possibly null.
    #[inline]
    pub const fn new(value: *mut T) -> Self {
        Self {
            inner: AtomicPtr::new(value),
        }
    }

    /// Creates a register holding the null pointer.
    ///
    /// # Returns
    ///
    /// A register whose `load` returns `ptr::null_mut()` until a store.
    #[inline]
    pub const fn null() -> Self {
        Self::new(ptr::null_mut())
    }

    /// Loads the current pointer with `Acquire` ordering.
    ///
    /// # Returns
    ///
    /// The pointer last stored, possibly null.
    #[inline]
    pub fn load(&self) -> *mut T {
        self.inner.load(Ordering::Acquire)
    }

    /// Stores a new pointer with `Release` ordering.
    ///
    /// # Parameters
    ///
    /// * `value` - The pointer to store. The register never dereferences
    ///   it.
    #[inline]
    pub fn store(&self, value: *mut T) {
        self.inner.store(value, Ordering::Release);
    }

    /// Swaps in `value` with `AcqRel` ordering.
    ///
    /// # Parameters
    ///
    /// * `value` - The pointer to store.
    ///
    /// # Returns
    ///
    /// The previous pointer.
    #[inline]
    pub fn swap(&self, value: *mut T) -> *mut T {
        self.inner.swap(value, Ordering::AcqRel)
    }

    /// Replaces the pointer by `desired` if it is currently `expected`.
    ///
    /// Comparison is by address.
    ///
    /// # Parameters
    ///
    /// * `expected` - The address the register must currently hold.
    /// * `desired` - Installed on a match.
    ///
    /// # Returns
    ///
    /// `true` if the swap happened.
    #[inline]
    pub fn compare_and_swap(&self, expected: *mut T, desired: *mut T) -> bool {
        self.inner
            .compare_exchange(expected, desired, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Consumes the register, returning the pointer it holds.
    ///
    /// No atomic operation is needed since `self` is owned.
    #[inline]
    pub fn into_inner(self) -> *mut T {
        self.inner.into_inner()
    }
}

impl<T> Atomic for AtomicPointer<T> {
    type Value = *mut T;

    #[inline]
    fn load(&self) -> *mut T {
        self.load()
    }

    #[inline]
    fn store(&self, value: *mut T) {
        self.store(value);
    }

    #[inline]
    fn swap(&self, value: *mut T) -> *mut T {
        self.swap(value)
    }

    #[inline]
    fn compare_and_swap(&self, expected: *mut T, desired: *mut T) -> bool {
        self.compare_and_swap(expected, desired)
    }
}

impl<T> Default for AtomicPointer<T> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<*mut T> for AtomicPointer<T> {
    #[inline]
    fn from(value: *mut T) -> Self {
        Self::new(value)
    }
}

impl<T> fmt::Debug for AtomicPointer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicPointer")
            .field("value", &self.load())
            .finish()
    }
}
