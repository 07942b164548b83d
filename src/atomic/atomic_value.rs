/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Value
//!
//! A statically-typed register over any shared value. Values are held as
//! `Arc<T>` in a typed slot, so loads are cheap clones of the reference
//! and stores never copy the data.
//!
//! # Author
//!
//! Haixing Hu

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::ptr;
use std::sync::Arc;

use crate::atomic::slot::{
    typed,
    LockFreeSlot,
    Payload,
    Slot,
    TypeTag,
};
use crate::atomic::traits::{
    Atomic,
    AtomicAdd,
};
use crate::error::{
    fatal,
    RegisterError,
    Result,
};

/// Decides whether the current value equals the expected one.
pub type EqualFn<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Folds a delta into the current value.
pub type CombineFn<T> = Arc<dyn Fn(&T, &T) -> T + Send + Sync>;

/// Atomic register over `Arc<T>`.
///
/// # Equality
///
/// By default `compare_and_swap` matches by reference: `expected` must be
/// the very value currently held, as returned by `load`. Use
/// [`with_equality`](Self::with_equality) to compare contents instead.
///
/// # Add
///
/// `add` folds a delta in with the function given to
/// [`with_combine`](Self::with_combine). Calling it on a register built
/// without one panics.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use prism3_register::AtomicValue;
///
/// let config = AtomicValue::new(vec!["a"]);
/// let current = config.load();
/// assert!(config.compare_and_swap(&current, Arc::new(vec!["a", "b"])));
/// assert!(!config.compare_and_swap(&current, Arc::new(vec!["c"])));
/// ```
///
/// # Author
///
/// Haixing Hu
pub struct AtomicValue<T, S: Slot = LockFreeSlot> {
    slot: S,
    equal: Option<EqualFn<T>>,
    combine: Option<CombineFn<T>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> AtomicValue<T> {
    /// Creates a lock-free register holding `value`.
    ///
    /// # Parameters
    ///
    /// * `value` - The initial value.
    #[inline]
    pub fn new(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Creates a lock-free register holding an existing shared value.
    ///
    /// # Parameters
    ///
    /// * `value` - Held as is; later loads return clones of this `Arc`.
    #[inline]
    pub fn from_arc(value: Arc<T>) -> Self {
        Self::with_strategy(value)
    }
}

impl<T: Any + Send + Sync, S: Slot> AtomicValue<T, S> {
    /// Creates a register on slot strategy `S` holding `value`.
    ///
    /// # Parameters
    ///
    /// * `value` - The initial value.
    pub fn with_strategy(value: Arc<T>) -> Self {
        tracing::debug!(
            strategy = std::any::type_name::<S>(),
            type_name = std::any::type_name::<T>(),
            "creating atomic value register"
        );
        let slot = S::default();
        slot.try_publish(Payload::from_arc(value));
        Self {
            slot,
            equal: None,
            combine: None,
            _marker: PhantomData,
        }
    }

    /// Sets the equality policy used by `compare_and_swap`.
    ///
    /// # Parameters
    ///
    /// * `equal` - Called as `equal(current, expected)`.
    pub fn with_equality<F>(mut self, equal: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.equal = Some(Arc::new(equal));
        self
    }

    /// Sets the combine policy used by `add`.
    ///
    /// # Parameters
    ///
    /// * `combine` - Called as `combine(current, delta)`.
    pub fn with_combine<F>(mut self, combine: F) -> Self
    where
        F: Fn(&T, &T) -> T + Send + Sync + 'static,
    {
        self.combine = Some(Arc::new(combine));
        self
    }

    /// Loads the current value.
    ///
    /// # Returns
    ///
    /// A clone of the held `Arc`. Passing it back as `expected` to
    /// `compare_and_swap` matches under the default equality.
    #[inline]
    pub fn load(&self) -> Arc<T> {
        match self.slot.load() {
            Some(payload) => downcast(payload),
            None => unreachable!("atomic value is published on construction"),
        }
    }

    /// Stores `value` unconditionally.
    ///
    /// # Parameters
    ///
    /// * `value` - The new value. The one it replaces is released once no
    ///   reader still holds it.
    #[inline]
    pub fn store(&self, value: Arc<T>) {
        if let Err(err) = self.slot.store(Payload::from_arc(value)) {
            fatal(err);
        }
    }

    /// Swaps in `value`.
    ///
    /// # Parameters
    ///
    /// * `value` - The new value.
    ///
    /// # Returns
    ///
    /// The value it replaced.
    pub fn swap(&self, value: Arc<T>) -> Arc<T> {
        let value = Payload::from_arc(value);
        self.update_with(|_| Ok(value.clone())).0
    }

    /// Replaces the current value by `desired` if it equals `expected`.
    ///
    /// # Parameters
    ///
    /// * `expected` - Compared against the current value with the
    ///   register's equality policy.
    /// * `desired` - Installed on a match.
    ///
    /// # Returns
    ///
    /// `true` if this call installed `desired`.
    pub fn compare_and_swap(&self, expected: &T, desired: Arc<T>) -> bool {
        match &self.equal {
            Some(equal) => self.compare_and_swap_by(|current| equal(current, expected), desired),
            None => self.compare_and_swap_by(|current| ptr::eq(current, expected), desired),
        }
    }

    /// Replaces the current value by `desired` if `matches` accepts it.
    ///
    /// Lets callers compare against a borrowed form of `T`, for example a
    /// slice against a held `Vec`.
    ///
    /// # Parameters
    ///
    /// * `matches` - Called with the current value; may run more than once.
    /// * `desired` - Installed when `matches` accepts.
    ///
    /// # Returns
    ///
    /// `true` if this call installed `desired`.
    pub fn compare_and_swap_by<F>(&self, matches: F, desired: Arc<T>) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let matcher = |current: &Payload| current.downcast_ref::<T>().map_or(false, |c| matches(c));
        self.slot
            .compare_and_swap(&TypeTag::of::<T>(), &matcher, Payload::from_arc(desired))
            .unwrap_or_else(|err| fatal(err))
    }

    /// Combines `delta` into the current value.
    ///
    /// # Parameters
    ///
    /// * `delta` - Passed to the combine function as its second argument.
    ///
    /// # Returns
    ///
    /// The value this call installed.
    ///
    /// # Panics
    ///
    /// If the register has no combine function.
    #[track_caller]
    pub fn add(&self, delta: &T) -> Arc<T> {
        let Some(combine) = &self.combine else {
            fatal(RegisterError::MissingCombine);
        };
        self.update_with(|current| Ok(Payload::new(combine(typed::<T>(current)?, delta))))
            .1
    }

    /// Updates the value with a function, returning the old value.
    ///
    /// `f` may run more than once under contention.
    ///
    /// # Parameters
    ///
    /// * `f` - Maps the current value to its replacement.
    ///
    /// # Returns
    ///
    /// The value `f` was last applied to.
    pub fn fetch_update<F>(&self, f: F) -> Arc<T>
    where
        F: Fn(&T) -> T,
    {
        self.update_with(|current| Ok(Payload::new(f(typed::<T>(current)?))))
            .0
    }

    /// Updates the value with a function, returning the new value.
    ///
    /// `f` may run more than once under contention.
    ///
    /// # Parameters
    ///
    /// * `f` - Maps the current value to its replacement.
    ///
    /// # Returns
    ///
    /// The value this call installed.
    pub fn update_and_get<F>(&self, f: F) -> Arc<T>
    where
        F: Fn(&T) -> T,
    {
        self.update_with(|current| Ok(Payload::new(f(typed::<T>(current)?))))
            .1
    }

    fn update_with<F>(&self, mut f: F) -> (Arc<T>, Arc<T>)
    where
        F: FnMut(&Payload) -> Result<Payload>,
    {
        match self.slot.update(&mut f) {
            Ok(Some((old, new))) => (downcast(old), downcast(new)),
            Ok(None) => unreachable!("atomic value is published on construction"),
            Err(err) => fatal(err),
        }
    }
}

fn downcast<T: Any + Send + Sync>(payload: Payload) -> Arc<T> {
    match payload.downcast::<T>() {
        Ok(value) => value,
        Err(payload) => fatal(RegisterError::TypeMismatch {
            held: payload.tag().name(),
            supplied: std::any::type_name::<T>(),
        }),
    }
}

impl<T: Any + Send + Sync, S: Slot> Atomic for AtomicValue<T, S> {
    type Value = Arc<T>;

    #[inline]
    fn load(&self) -> Arc<T> {
        self.load()
    }

    #[inline]
    fn store(&self, value: Arc<T>) {
        self.store(value);
    }

    #[inline]
    fn swap(&self, value: Arc<T>) -> Arc<T> {
        self.swap(value)
    }

    #[inline]
    fn compare_and_swap(&self, expected: Arc<T>, desired: Arc<T>) -> bool {
        AtomicValue::compare_and_swap(self, &expected, desired)
    }
}

impl<T: Any + Send + Sync, S: Slot> AtomicAdd for AtomicValue<T, S> {
    #[inline]
    fn add(&self, delta: Arc<T>) -> Arc<T> {
        AtomicValue::add(self, &delta)
    }
}

impl<T: Any + Send + Sync + Default> Default for AtomicValue<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Any + Send + Sync> From<T> for AtomicValue<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Any + Send + Sync + fmt::Debug, S: Slot> fmt::Debug for AtomicValue<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicValue")
            .field("value", &self.load())
            .finish()
    }
}
