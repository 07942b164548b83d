/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Typed Slots
//!
//! A typed slot holds one dynamically-typed [`Payload`] and supports
//! atomic compound operations over it even though the payload is far
//! larger than a machine word.
//!
//! A slot moves through three states:
//!
//! ```text
//! Empty --(first store / compare-and-swap)--> Publishing --> Typed(τ)
//! ```
//!
//! `Publishing` is transient and never observable as a value: loads see
//! nothing until the first payload is fully published. Once `Typed(τ)` is
//! reached every later store and compare-and-swap must supply a `τ`.
//!
//! Two interchangeable strategies implement the same contract:
//!
//! - [`LockFreeSlot`]: a state word plus an epoch-managed data reference,
//!   updated with single-word CAS. The default.
//! - [`SpinSlot`]: the same operations run inside a spinlock-guarded
//!   critical section.
//!
//! # Author
//!
//! Haixing Hu

use std::any::{
    Any,
    TypeId,
};
use std::fmt;
use std::hash::{
    Hash,
    Hasher,
};
use std::sync::Arc;

use sealed::sealed;

use crate::error::{
    RegisterError,
    Result,
};

mod lock_free;
mod spin;

pub use lock_free::LockFreeSlot;
pub use spin::SpinSlot;

/// Identity of the concrete type held by a slot.
///
/// Two tags are equal exactly when they name the same type.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// The tag of `T`.
    #[inline]
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The type's name, for diagnostics only.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A type-tagged, shared, immutable value.
///
/// Cloning a payload clones the reference, not the data; two clones are
/// the same data reference.
#[derive(Clone)]
pub struct Payload {
    tag: TypeTag,
    data: Arc<dyn Any + Send + Sync>,
}

impl Payload {
    /// Wraps `value` in a new payload.
    #[inline]
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps an existing shared value without copying it.
    #[inline]
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            tag: TypeTag::of::<T>(),
            data: value,
        }
    }

    /// The payload's type tag.
    #[inline]
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Whether the payload holds a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.tag.id == TypeId::of::<T>()
    }

    /// Borrows the payload as a `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }

    /// Converts the payload into a shared `T`, or gives it back unchanged.
    #[inline]
    pub fn downcast<T: Any + Send + Sync>(self) -> std::result::Result<Arc<T>, Self> {
        let tag = self.tag;
        self.data.downcast::<T>().map_err(|data| Self { tag, data })
    }

    /// Whether both payloads are the same data reference.
    #[inline]
    pub fn ptr_eq(&self, other: &Payload) -> bool {
        self.addr() == other.addr()
    }

    #[inline]
    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.data) as *const ()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("type", &self.tag)
            .field("data", &self.addr())
            .finish()
    }
}

/// The observable state of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Nothing has been stored yet.
    Empty,
    /// A first store is in flight.
    Publishing,
    /// The slot holds a value of the tagged type.
    Typed(TypeTag),
}

/// Decides whether the current payload matches what the caller expected.
pub type Matcher<'a> = &'a dyn Fn(&Payload) -> bool;

/// Computes the replacement payload inside an update.
pub type Updater<'a> = &'a mut dyn FnMut(&Payload) -> Result<Payload>;

/// Storage strategy behind a typed register.
///
/// Sealed: the two implementations are [`LockFreeSlot`] and [`SpinSlot`].
/// Registers are generic over this trait so either can be chosen at
/// construction time without changing the public contract.
#[sealed]
pub trait Slot: Default + Send + Sync + fmt::Debug {
    /// The slot's current state.
    fn state(&self) -> SlotState;

    /// The current payload, or `None` before the first value is published.
    fn load(&self) -> Option<Payload>;

    /// Stores `value` unconditionally.
    ///
    /// On an empty slot this publishes the first value and fixes the type;
    /// a store racing with another thread's first store waits for it to
    /// finish and then overwrites.
    ///
    /// # Errors
    ///
    /// [`RegisterError::TypeMismatch`] if the slot holds another type.
    fn store(&self, value: Payload) -> Result<()>;

    /// Publishes `value` if the slot is still empty.
    ///
    /// # Returns
    ///
    /// `true` only if this call installed the first value.
    fn try_publish(&self, value: Payload) -> bool;

    /// Replaces the current payload by `desired` if `matches` accepts it.
    ///
    /// On an empty slot this attempts to publish `desired` and reports
    /// `false` whether or not that succeeded; callers confirm with a load.
    /// While another first store is in flight it reports `false`.
    ///
    /// # Errors
    ///
    /// [`RegisterError::TypeMismatch`] if `expected` or `desired` is not
    /// the held type.
    fn compare_and_swap(
        &self,
        expected: &TypeTag,
        matches: Matcher<'_>,
        desired: Payload,
    ) -> Result<bool>;

    /// Replaces the current payload by `f(current)`.
    ///
    /// `f` may run more than once. A failure from `f` aborts the update
    /// and is returned unchanged.
    ///
    /// # Returns
    ///
    /// `Some((old, new))` once installed, or `None` when there is no
    /// published value to update.
    fn update(&self, f: Updater<'_>) -> Result<Option<(Payload, Payload)>>;
}

/// Fails unless `supplied` names the type the slot holds.
#[inline]
pub(crate) fn check_type(held: &TypeTag, supplied: &TypeTag) -> Result<()> {
    if held == supplied {
        Ok(())
    } else {
        Err(RegisterError::TypeMismatch {
            held: held.name(),
            supplied: supplied.name(),
        })
    }
}

/// Borrows `payload` as a `T`, or reports which type it really holds.
#[inline]
pub(crate) fn typed<T: Any>(payload: &Payload) -> Result<&T> {
    payload
        .downcast_ref::<T>()
        .ok_or_else(|| RegisterError::TypeMismatch {
            held: payload.tag().name(),
            supplied: std::any::type_name::<T>(),
        })
}
