/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Register Traits
//!
//! Defines the uniform five-operation interface shared by every register,
//! so that generic code can be written over scalar, buffer and value
//! registers alike.
//!
//! # Author
//!
//! Haixing Hu

/// Common trait for all registers.
///
/// Provides load, store, swap and compare-and-swap.
///
/// # Author
///
/// Haixing Hu
pub trait Atomic {
    /// The value type stored in the register.
    type Value;

    /// Loads the current value.
    ///
    /// # Returns
    ///
    /// The value written by the most recent store, swap, successful
    /// compare-and-swap or add.
    fn load(&self) -> Self::Value;

    /// Stores a new value unconditionally.
    ///
    /// # Parameters
    ///
    /// * `value` - The new value to store.
    fn store(&self, value: Self::Value);

    /// Swaps the current value with a new value, returning the old value.
    ///
    /// # Parameters
    ///
    /// * `value` - The new value to swap in.
    ///
    /// # Returns
    ///
    /// The value immediately preceding the swap.
    fn swap(&self, value: Self::Value) -> Self::Value;

    /// Replaces the current value by `desired` if it matches `expected`.
    ///
    /// Whether the current value matches is decided by the register's
    /// equality policy: word equality for scalars, content equality for
    /// byte buffers and strings, the configured comparator for generic
    /// values.
    ///
    /// # Parameters
    ///
    /// * `expected` - The value the caller believes is current.
    /// * `desired` - The value to install on a match.
    ///
    /// # Returns
    ///
    /// `true` if this call installed `desired`. `false` means another
    /// writer got there first; callers retry or branch on it.
    fn compare_and_swap(&self, expected: Self::Value, desired: Self::Value) -> bool;
}

/// Trait for registers that can fold a delta into their value.
///
/// # Author
///
/// Haixing Hu
pub trait AtomicAdd: Atomic {
    /// Combines `delta` into the current value, returning the new value.
    ///
    /// Numeric registers add (wrapping for integers), booleans AND, byte
    /// buffers and strings append.
    ///
    /// # Parameters
    ///
    /// * `delta` - The value to combine in.
    ///
    /// # Returns
    ///
    /// The new value after combining.
    fn add(&self, delta: Self::Value) -> Self::Value;
}
