/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic String
//!
//! A register over an owned UTF-8 string.
//!
//! # Author
//!
//! Haixing Hu

use std::fmt;
use std::sync::Arc;

use crate::atomic::atomic_value::AtomicValue;
use crate::atomic::slot::{
    LockFreeSlot,
    Slot,
};
use crate::atomic::traits::{
    Atomic,
    AtomicAdd,
};

/// Atomic string.
///
/// `compare_and_swap` compares contents. `add` concatenates.
///
/// # Example
///
/// ```rust
/// use prism3_register::AtomicString;
///
/// let name = AtomicString::new("foo");
/// assert_eq!(name.add("bar").as_str(), "foobar");
/// assert!(name.compare_and_swap("foobar", "baz"));
/// assert_eq!(name.to_string(), "baz");
/// ```
///
/// # Author
///
/// Haixing Hu
pub struct AtomicString<S: Slot = LockFreeSlot> {
    inner: AtomicValue<String, S>,
}

impl AtomicString {
    /// Creates a lock-free register holding `value`.
    ///
    /// # Parameters
    ///
    /// * `value` - The initial string.
    #[inline]
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_strategy(value)
    }
}

impl<S: Slot> AtomicString<S> {
    /// Creates a register on slot strategy `S` holding `value`.
    pub fn with_strategy(value: impl Into<String>) -> Self {
        Self {
            inner: AtomicValue::with_strategy(Arc::new(value.into()))
                .with_equality(|current: &String, expected: &String| current == expected)
                .with_combine(|current: &String, delta: &String| {
                    let mut out = String::with_capacity(current.len() + delta.len());
                    out.push_str(current);
                    out.push_str(delta);
                    out
                }),
        }
    }

    /// Loads the current string.
    #[inline]
    pub fn load(&self) -> Arc<String> {
        self.inner.load()
    }

    /// Stores `value` unconditionally.
    #[inline]
    pub fn store(&self, value: impl Into<String>) {
        self.inner.store(Arc::new(value.into()));
    }

    /// Swaps in `value`, returning the previous string.
    #[inline]
    pub fn swap(&self, value: impl Into<String>) -> Arc<String> {
        self.inner.swap(Arc::new(value.into()))
    }

    /// Replaces the string by `desired` if it currently equals `expected`.
    ///
    /// # Returns
    ///
    /// `true` if this call installed `desired`.
    #[inline]
    pub fn compare_and_swap(&self, expected: &str, desired: impl Into<String>) -> bool {
        self.inner
            .compare_and_swap_by(|current| current == expected, Arc::new(desired.into()))
    }

    /// Appends `delta`, returning the new string.
    #[inline]
    pub fn add(&self, delta: &str) -> Arc<String> {
        self.inner.add(&delta.to_owned())
    }
}

impl<S: Slot> Atomic for AtomicString<S> {
    type Value = Arc<String>;

    #[inline]
    fn load(&self) -> Arc<String> {
        self.inner.load()
    }

    #[inline]
    fn store(&self, value: Arc<String>) {
        self.inner.store(value);
    }

    #[inline]
    fn swap(&self, value: Arc<String>) -> Arc<String> {
        self.inner.swap(value)
    }

    #[inline]
    fn compare_and_swap(&self, expected: Arc<String>, desired: Arc<String>) -> bool {
        self.inner.compare_and_swap(&expected, desired)
    }
}

impl<S: Slot> AtomicAdd for AtomicString<S> {
    #[inline]
    fn add(&self, delta: Arc<String>) -> Arc<String> {
        self.inner.add(&delta)
    }
}

impl<S: Slot> Default for AtomicString<S> {
    #[inline]
    fn default() -> Self {
        Self::with_strategy(String::new())
    }
}

impl From<String> for AtomicString {
    #[inline]
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for AtomicString {
    #[inline]
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<S: Slot> fmt::Debug for AtomicString<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicString")
            .field("value", &self.load())
            .finish()
    }
}

impl<S: Slot> fmt::Display for AtomicString<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.load())
    }
}
