/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Words
//!
//! Hardware-atomic operations on fixed-size machine words. Every scalar
//! register is a bit-reinterpretation on top of one of these words.
//!
//! # Memory Ordering Strategy
//!
//! - **Read operations** (`load`): `Acquire`.
//! - **Write operations** (`store`): `Release`.
//! - **Read-Modify-Write** (`swap`, CAS, `add`): `AcqRel`, with `Acquire`
//!   on CAS failure so the caller observes the winning write.
//!
//! # Author
//!
//! Haixing Hu

use std::fmt;
use std::sync::atomic::Ordering;

/// A primitive integer that has a native atomic counterpart.
///
/// All operations are associated functions over `Self::Atomic` so that a
/// register can embed the std atomic directly, with no extra indirection.
pub trait Word: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// The `std::sync::atomic` type holding this word.
    type Atomic: Send + Sync;

    /// Creates an atomic cell holding `value`.
    fn new_atomic(value: Self) -> Self::Atomic;

    /// Consumes the atomic cell, returning the word it holds.
    fn into_inner(atomic: Self::Atomic) -> Self;

    /// Loads the current word.
    fn load(atomic: &Self::Atomic) -> Self;

    /// Stores a new word.
    fn store(atomic: &Self::Atomic, value: Self);

    /// Stores `value`, returning the previous word.
    fn swap(atomic: &Self::Atomic, value: Self) -> Self;

    /// Replaces `expected` by `desired` if the cell still holds `expected`.
    fn compare_and_swap(atomic: &Self::Atomic, expected: Self, desired: Self) -> bool;

    /// Weak CAS used inside retry loops; `Err` carries the observed word.
    fn compare_exchange_weak(atomic: &Self::Atomic, expected: Self, desired: Self)
        -> Result<Self, Self>;

    /// Adds `delta` modulo 2^width, returning the new word.
    fn add(atomic: &Self::Atomic, delta: Self) -> Self;

    /// Subtracts `delta` modulo 2^width, returning the new word.
    fn sub(atomic: &Self::Atomic, delta: Self) -> Self;

    /// Bitwise AND, returning the previous word.
    fn fetch_and(atomic: &Self::Atomic, value: Self) -> Self;

    /// Bitwise OR, returning the previous word.
    fn fetch_or(atomic: &Self::Atomic, value: Self) -> Self;
}

/// Binds a primitive integer to its std atomic type.
///
/// # Parameters
///
/// * `$word` - The primitive integer type (e.g., `u32`)
/// * `$atomic` - The matching std atomic type (e.g.,
///   `std::sync::atomic::AtomicU32`)
macro_rules! impl_word {
    ($($word:ty => $atomic:ty),* $(,)?) => {
        $(
            impl Word for $word {
                type Atomic = $atomic;

                #[inline]
                fn new_atomic(value: Self) -> Self::Atomic {
                    <$atomic>::new(value)
                }

                #[inline]
                fn into_inner(atomic: Self::Atomic) -> Self {
                    atomic.into_inner()
                }

                #[inline]
                fn load(atomic: &Self::Atomic) -> Self {
                    atomic.load(Ordering::Acquire)
                }

                #[inline]
                fn store(atomic: &Self::Atomic, value: Self) {
                    atomic.store(value, Ordering::Release);
                }

                #[inline]
                fn swap(atomic: &Self::Atomic, value: Self) -> Self {
                    atomic.swap(value, Ordering::AcqRel)
                }

                #[inline]
                fn compare_and_swap(
                    atomic: &Self::Atomic,
                    expected: Self,
                    desired: Self,
                ) -> bool {
                    atomic
                        .compare_exchange(
                            expected,
                            desired,
                            Ordering::AcqRel,
                            Ordering::Acquire,
                        )
                        .is_ok()
                }

                #[inline]
                fn compare_exchange_weak(
                    atomic: &Self::Atomic,
                    expected: Self,
                    desired: Self,
                ) -> Result<Self, Self> {
                    atomic.compare_exchange_weak(
                        expected,
                        desired,
                        Ordering::AcqRel,
                        Ordering::Acquire,
                    )
                }

                #[inline]
                fn add(atomic: &Self::Atomic, delta: Self) -> Self {
                    atomic.fetch_add(delta, Ordering::AcqRel).wrapping_add(delta)
                }

                #[inline]
                fn sub(atomic: &Self::Atomic, delta: Self) -> Self {
                    atomic.fetch_sub(delta, Ordering::AcqRel).wrapping_sub(delta)
                }

                #[inline]
                fn fetch_and(atomic: &Self::Atomic, value: Self) -> Self {
                    atomic.fetch_and(value, Ordering::AcqRel)
                }

                #[inline]
                fn fetch_or(atomic: &Self::Atomic, value: Self) -> Self {
                    atomic.fetch_or(value, Ordering::AcqRel)
                }
            }
        )*
    };
}

impl_word!(
    u8 => std::sync::atomic::AtomicU8,
    i8 => std::sync::atomic::AtomicI8,
    u16 => std::sync::atomic::AtomicU16,
    i16 => std::sync::atomic::AtomicI16,
    u32 => std::sync::atomic::AtomicU32,
    i32 => std::sync::atomic::AtomicI32,
    u64 => std::sync::atomic::AtomicU64,
    i64 => std::sync::atomic::AtomicI64,
    usize => std::sync::atomic::AtomicUsize,
    isize => std::sync::atomic::AtomicIsize,
);
