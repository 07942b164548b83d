/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Dynamic Value
//!
//! A register whose type is fixed by its first store rather than by the
//! Rust type system. It may start empty; the first store or
//! compare-and-swap publishes a value and pins its type for good.
//!
//! # Author
//!
//! Haixing Hu

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crossbeam_utils::Backoff;

use crate::atomic::slot::{
    LockFreeSlot,
    Payload,
    Slot,
    SlotState,
};
use crate::error::{
    fatal,
    RegisterError,
    Result,
};

/// Decides whether two payloads are equal for compare-and-swap.
pub type PayloadEquality = Arc<dyn Fn(&Payload, &Payload) -> bool + Send + Sync>;

/// Folds a delta into the current payload for `add`.
///
/// The current payload is `None` while the register is empty.
pub type PayloadCombine = Arc<dyn Fn(Option<&Payload>, &Payload) -> Payload + Send + Sync>;

/// Dynamically-typed atomic register.
///
/// `S` picks the slot strategy: [`LockFreeSlot`] by default, or
/// [`SpinSlot`](crate::SpinSlot) for a spinlock-guarded critical section.
/// Both behave identically.
///
/// # Contract
///
/// - Before the first store, `load` returns `None`.
/// - Once a value of type `τ` is published, every store, swap and
///   compare-and-swap must supply a `τ`. Supplying anything else is a
///   contract violation: the plain operations panic, the `try_` operations
///   return [`RegisterError::TypeMismatch`].
/// - A compare-and-swap on an empty register publishes `desired` if it can
///   but always returns `false`. Load afterwards to see what was stored.
/// - Without [`with_equality`](Self::with_equality), compare-and-swap
///   matches by data reference: `expected` must be a clone of a payload
///   previously loaded from this register.
///
/// # Example
///
/// ```rust
/// use prism3_register::{Payload, Value};
///
/// let value = Value::empty();
/// assert!(value.load().is_none());
/// value.store(Payload::new(4i32));
/// let old = value.swap(Payload::new(5i32)).unwrap();
/// assert_eq!(old.downcast_ref::<i32>(), Some(&4));
/// ```
///
/// # Author
///
/// Haixing Hu
pub struct Value<S: Slot = LockFreeSlot> {
    slot: S,
    equality: Option<PayloadEquality>,
    combine: Option<PayloadCombine>,
}

impl Value {
    /// Creates a lock-free register holding `initial`.
    ///
    /// # Parameters
    ///
    /// * `initial` - The first value; its type becomes the register's type.
    #[inline]
    pub fn new(initial: Payload) -> Self {
        Self::with_strategy(initial)
    }

    /// Creates an empty lock-free register.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }
}

impl<S: Slot> Value<S> {
    /// Creates a register on slot strategy `S` holding `initial`.
    ///
    /// # Parameters
    ///
    /// * `initial` - The first value; its type becomes the register's type.
    pub fn with_strategy(initial: Payload) -> Self {
        let value = Self::default();
        tracing::debug!(
            strategy = std::any::type_name::<S>(),
            type_name = initial.tag().name(),
            "creating value register"
        );
        value.slot.try_publish(initial);
        value
    }

    /// Sets the equality policy used by compare-and-swap.
    ///
    /// # Parameters
    ///
    /// * `equality` - Called as `equality(current, expected)`.
    pub fn with_equality<F>(mut self, equality: F) -> Self
    where
        F: Fn(&Payload, &Payload) -> bool + Send + Sync + 'static,
    {
        self.equality = Some(Arc::new(equality));
        self
    }

    /// Sets the combine policy used by `add`.
    ///
    /// # Parameters
    ///
    /// * `combine` - Called as `combine(current, delta)`; must return a
    ///   payload of the register's type. `current` is `None` when `add`
    ///   runs on an empty register, in which case the result becomes the
    ///   first value and fixes the type.
    pub fn with_combine<F>(mut self, combine: F) -> Self
    where
        F: Fn(Option<&Payload>, &Payload) -> Payload + Send + Sync + 'static,
    {
        self.combine = Some(Arc::new(combine));
        self
    }

    /// The register's state.
    #[inline]
    pub fn state(&self) -> SlotState {
        self.slot.state()
    }

    /// Loads the current value.
    ///
    /// # Returns
    ///
    /// The current payload, or `None` before the first store.
    #[inline]
    pub fn load(&self) -> Option<Payload> {
        self.slot.load()
    }

    /// Loads the current value as a `T`.
    ///
    /// # Returns
    ///
    /// `None` if the register is empty or holds another type.
    pub fn load_as<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.slot.load()?.downcast::<T>().ok()
    }

    /// Stores `value` unconditionally.
    ///
    /// # Panics
    ///
    /// If `value` is not of the register's type.
    #[track_caller]
    pub fn store(&self, value: Payload) {
        if let Err(err) = self.try_store(value) {
            fatal(err);
        }
    }

    /// Stores `value` unconditionally.
    ///
    /// # Errors
    ///
    /// [`RegisterError::TypeMismatch`] if `value` is not of the register's
    /// type; the register is left unchanged.
    #[inline]
    pub fn try_store(&self, value: Payload) -> Result<()> {
        self.slot.store(value)
    }

    /// Swaps in `value`, returning the previous value.
    ///
    /// On an empty register this publishes `value` and returns `None`.
    ///
    /// # Panics
    ///
    /// If `value` is not of the register's type.
    #[track_caller]
    pub fn swap(&self, value: Payload) -> Option<Payload> {
        self.try_swap(value).unwrap_or_else(|err| fatal(err))
    }

    /// Swaps in `value`, returning the previous value.
    ///
    /// # Errors
    ///
    /// [`RegisterError::TypeMismatch`] if `value` is not of the register's
    /// type.
    pub fn try_swap(&self, value: Payload) -> Result<Option<Payload>> {
        let backoff = Backoff::new();
        loop {
            if let Some((old, _)) = self.slot.update(&mut |_: &Payload| Ok(value.clone()))? {
                return Ok(Some(old));
            }
            if self.slot.try_publish(value.clone()) {
                return Ok(None);
            }
            backoff.snooze();
        }
    }

    /// Replaces the current value by `desired` if it matches `expected`.
    ///
    /// # Returns
    ///
    /// `true` if this call installed `desired`. Always `false` on an empty
    /// register, even when `desired` got published.
    ///
    /// # Panics
    ///
    /// If `expected` or `desired` is not of the register's type.
    #[track_caller]
    pub fn compare_and_swap(&self, expected: &Payload, desired: Payload) -> bool {
        self.try_compare_and_swap(expected, desired)
            .unwrap_or_else(|err| fatal(err))
    }

    /// Replaces the current value by `desired` if it matches `expected`.
    ///
    /// # Errors
    ///
    /// [`RegisterError::TypeMismatch`] if `expected` or `desired` is not of
    /// the register's type.
    pub fn try_compare_and_swap(&self, expected: &Payload, desired: Payload) -> Result<bool> {
        let matches = |current: &Payload| self.matches(current, expected);
        self.slot.compare_and_swap(&expected.tag(), &matches, desired)
    }

    /// Combines `delta` into the current value, returning the new value.
    ///
    /// On an empty register this publishes `combine(None, delta)` and
    /// returns it.
    ///
    /// # Panics
    ///
    /// If no combine function was configured, or the combined payload is
    /// not of the register's type.
    #[track_caller]
    pub fn add(&self, delta: &Payload) -> Payload {
        self.try_add(delta).unwrap_or_else(|err| fatal(err))
    }

    /// Combines `delta` into the current value, returning the new value.
    ///
    /// # Errors
    ///
    /// [`RegisterError::MissingCombine`] without a combine function;
    /// [`RegisterError::TypeMismatch`] if the combined payload is not of the
    /// register's type.
    pub fn try_add(&self, delta: &Payload) -> Result<Payload> {
        let combine = self.combine.as_ref().ok_or(RegisterError::MissingCombine)?;
        let backoff = Backoff::new();
        loop {
            let combined = self
                .slot
                .update(&mut |current: &Payload| Ok(combine(Some(current), delta)))?;
            if let Some((_, new)) = combined {
                return Ok(new);
            }
            let first = combine(None, delta);
            if self.slot.try_publish(first.clone()) {
                return Ok(first);
            }
            backoff.snooze();
        }
    }

    fn matches(&self, current: &Payload, expected: &Payload) -> bool {
        match &self.equality {
            Some(equality) => equality(current, expected),
            None => current.ptr_eq(expected),
        }
    }
}

impl<S: Slot> Default for Value<S> {
    #[inline]
    fn default() -> Self {
        Self {
            slot: S::default(),
            equality: None,
            combine: None,
        }
    }
}

impl From<Payload> for Value {
    #[inline]
    fn from(initial: Payload) -> Self {
        Self::new(initial)
    }
}

impl<S: Slot> fmt::Debug for Value<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("slot", &self.slot)
            .field("custom_equality", &self.equality.is_some())
            .field("combine", &self.combine.is_some())
            .finish()
    }
}
