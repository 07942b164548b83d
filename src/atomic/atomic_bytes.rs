/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Bytes
//!
//! A register over a variable-length byte buffer.
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

/// Atomic byte buffer.
///
/// `compare_and_swap` compares contents, not storage: two independently
/// allocated buffers holding the same bytes match. `add` appends.
///
/// # Example
///
/// ```rust
/// use prism3_register::AtomicBytes;
///
/// let bytes = AtomicBytes::new(vec![1, 2, 3]);
/// assert!(bytes.compare_and_swap(&[1, 2, 3], vec![4]));
/// assert_eq!(bytes.add(&[5, 6]).as_slice(), &[4, 5, 6]);
/// ```
///
/// # Author
///
/// Haixing Hu
pub struct AtomicBytes<S: Slot = LockFreeSlot> {
    inner: AtomicValue<Vec<u8>, S>,
}

impl AtomicBytes {
    /// Creates a lock-free register holding `value`.
    ///
    /// # Parameters
    ///
    /// * `value` - The initial bytes.
    #[inline]
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self::with_strategy(value)
    }
}

impl<S: Slot> AtomicBytes<S> {
    /// Creates a register on slot strategy `S` holding `value`.
    pub fn with_strategy(value: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: AtomicValue::with_strategy(Arc::new(value.into()))
                .with_equality(|current: &Vec<u8>, expected: &Vec<u8>| current == expected)
                .with_combine(append),
        }
    }

    /// Loads the current bytes.
    #[inline]
    pub fn load(&self) -> Arc<Vec<u8>> {
        self.inner.load()
    }

    /// Stores `value` unconditionally.
    #[inline]
    pub fn store(&self, value: impl Into<Vec<u8>>) {
        self.inner.store(Arc::new(value.into()));
    }

    /// Swaps in `value`, returning the previous bytes.
    #[inline]
    pub fn swap(&self, value: impl Into<Vec<u8>>) -> Arc<Vec<u8>> {
        self.inner.swap(Arc::new(value.into()))
    }

    /// Replaces the bytes by `desired` if they currently equal `expected`.
    ///
    /// # Returns
    ///
    /// `true` if this call installed `desired`.
    #[inline]
    pub fn compare_and_swap(&self, expected: &[u8], desired: impl Into<Vec<u8>>) -> bool {
        self.inner.compare_and_swap_by(
            |current| current.as_slice() == expected,
            Arc::new(desired.into()),
        )
    }

    /// Appends `delta`, returning the new bytes.
    #[inline]
    pub fn add(&self, delta: &[u8]) -> Arc<Vec<u8>> {
        self.inner.add(&delta.to_vec())
    }

    /// The current length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.load().len()
    }

    /// Whether the buffer is currently empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.load().is_empty()
    }
}

#[allow(clippy::ptr_arg)]
fn append(current: &Vec<u8>, delta: &Vec<u8>) -> Vec<u8> {
    let mut out = Vec::with_capacity(current.len() + delta.len());
    out.extend_from_slice(current);
    out.extend_from_slice(delta);
    out
}

impl<S: Slot> Atomic for AtomicBytes<S> {
    type Value = Arc<Vec<u8>>;

    #[inline]
    fn load(&self) -> Arc<Vec<u8>> {
        self.inner.load()
    }

    #[inline]
    fn store(&self, value: Arc<Vec<u8>>) {
        self.inner.store(value);
    }

    #[inline]
    fn swap(&self, value: Arc<Vec<u8>>) -> Arc<Vec<u8>> {
        self.inner.swap(value)
    }

    #[inline]
    fn compare_and_swap(&self, expected: Arc<Vec<u8>>, desired: Arc<Vec<u8>>) -> bool {
        self.inner.compare_and_swap(&expected, desired)
    }
}

impl<S: Slot> AtomicAdd for AtomicBytes<S> {
    #[inline]
    fn add(&self, delta: Arc<Vec<u8>>) -> Arc<Vec<u8>> {
        self.inner.add(&delta)
    }
}

impl<S: Slot> Default for AtomicBytes<S> {
    #[inline]
    fn default() -> Self {
        Self::with_strategy(Vec::new())
    }
}

impl From<Vec<u8>> for AtomicBytes {
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

impl From<&[u8]> for AtomicBytes {
    #[inline]
    fn from(value: &[u8]) -> Self {
        Self::new(value)
    }
}

impl<S: Slot> fmt::Debug for AtomicBytes<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicBytes")
            .field("value", &self.load())
            .finish()
    }
}
