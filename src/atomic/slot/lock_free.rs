/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Lock-Free Slot
//!
//! The slot is two words: a state word (`EMPTY`, `PUBLISHING`, `TYPED`)
//! and a data reference. The type tag is written exactly once, by the
//! thread that wins the `EMPTY -> PUBLISHING` transition, before the data
//! reference and then the `TYPED` state are published with two ordered
//! release stores. After that, every operation is a single-word atomic on
//! the data reference.
//!
//! Replaced payloads are reclaimed through `crossbeam-epoch`, so a load
//! that raced with a swap never reads freed memory.
//!
//! # Author
//!
//! Haixing Hu

use std::fmt;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;
use std::sync::OnceLock;

use crossbeam_epoch::{
    self as epoch,
    Atomic,
    Owned,
};
use crossbeam_utils::Backoff;
use sealed::sealed;

use super::__seal_slot;
use super::{
    check_type,
    Matcher,
    Payload,
    Slot,
    SlotState,
    TypeTag,
    Updater,
};
use crate::error::Result;

const EMPTY: u8 = 0;
const PUBLISHING: u8 = 1;
const TYPED: u8 = 2;

/// Lock-free typed slot.
///
/// Loads never block. Stores and compare-and-swaps are single CAS
/// attempts on the data reference; only a store that arrives while the
/// very first store is being published waits for it.
///
/// # Author
///
/// Haixing Hu
pub struct LockFreeSlot {
    state: AtomicU8,
    tag: OnceLock<TypeTag>,
    data: Atomic<Payload>,
}

impl LockFreeSlot {
    /// Creates an empty slot.
    #[inline]
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(EMPTY),
            tag: OnceLock::new(),
            data: Atomic::null(),
        }
    }

    /// Waits out an in-flight first store.
    ///
    /// # Returns
    ///
    /// The held type, or `None` if the slot is empty.
    fn settle(&self) -> Option<TypeTag> {
        let backoff = Backoff::new();
        loop {
            match self.state.load(Ordering::Acquire) {
                EMPTY => return None,
                TYPED => return self.tag.get().copied(),
                _ => backoff.snooze(),
            }
        }
    }
}

#[sealed]
impl Slot for LockFreeSlot {
    fn state(&self) -> SlotState {
        match self.state.load(Ordering::Acquire) {
            EMPTY => SlotState::Empty,
            TYPED => self
                .tag
                .get()
                .map_or(SlotState::Publishing, |tag| SlotState::Typed(*tag)),
            _ => SlotState::Publishing,
        }
    }

    fn load(&self) -> Option<Payload> {
        if self.state.load(Ordering::Acquire) != TYPED {
            return None;
        }
        let guard = epoch::pin();
        let current = self.data.load(Ordering::Acquire, &guard);
        // SAFETY: the thread is pinned, and replaced payloads are only
        // destroyed once every thread pinned before the swap has unpinned.
        unsafe { current.as_ref() }.cloned()
    }

    fn store(&self, value: Payload) -> Result<()> {
        loop {
            match self.settle() {
                None => {
                    if self.try_publish(value.clone()) {
                        return Ok(());
                    }
                }
                Some(held) => {
                    check_type(&held, &value.tag())?;
                    let guard = epoch::pin();
                    let old = self.data.swap(Owned::new(value), Ordering::AcqRel, &guard);
                    if !old.is_null() {
                        // SAFETY: `old` is unlinked; pinned readers keep it
                        // alive until they unpin.
                        unsafe { guard.defer_destroy(old) };
                    }
                    return Ok(());
                }
            }
        }
    }

    fn try_publish(&self, value: Payload) -> bool {
        if self
            .state
            .compare_exchange(EMPTY, PUBLISHING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        let tag = value.tag();
        let first = self.tag.set(tag);
        debug_assert!(first.is_ok(), "only the winner of EMPTY -> PUBLISHING sets the tag");
        self.data.store(Owned::new(value), Ordering::Release);
        self.state.store(TYPED, Ordering::Release);
        tracing::trace!(type_name = tag.name(), "slot published its first value");
        true
    }

    fn compare_and_swap(
        &self,
        expected: &TypeTag,
        matches: Matcher<'_>,
        desired: Payload,
    ) -> Result<bool> {
        match self.state.load(Ordering::Acquire) {
            EMPTY => {
                // A first store never reports success; callers load to see
                // which value won.
                self.try_publish(desired);
                return Ok(false);
            }
            PUBLISHING => return Ok(false),
            _ => {}
        }
        let Some(held) = self.tag.get().copied() else {
            return Ok(false);
        };
        check_type(&held, expected)?;
        check_type(&held, &desired.tag())?;

        let guard = epoch::pin();
        let current = self.data.load(Ordering::Acquire, &guard);
        // SAFETY: see `load`.
        let matched = unsafe { current.as_ref() }.map_or(false, |payload| matches(payload));
        if !matched {
            return Ok(false);
        }
        match self.data.compare_exchange(
            current,
            Owned::new(desired),
            Ordering::AcqRel,
            Ordering::Acquire,
            &guard,
        ) {
            Ok(_) => {
                // SAFETY: `current` was unlinked by the successful CAS.
                unsafe { guard.defer_destroy(current) };
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    fn update(&self, f: Updater<'_>) -> Result<Option<(Payload, Payload)>> {
        let backoff = Backoff::new();
        loop {
            let Some(old) = self.load() else {
                return Ok(None);
            };
            let new = f(&old)?;
            let unchanged = |current: &Payload| current.ptr_eq(&old);
            if self.compare_and_swap(&old.tag(), &unchanged, new.clone())? {
                return Ok(Some((old, new)));
            }
            backoff.spin();
        }
    }
}

impl Default for LockFreeSlot {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LockFreeSlot {
    fn drop(&mut self) {
        // SAFETY: `&mut self` rules out any concurrent access.
        unsafe {
            let current = self.data.load(Ordering::Relaxed, epoch::unprotected());
            if !current.is_null() {
                drop(current.into_owned());
            }
        }
    }
}

impl fmt::Debug for LockFreeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockFreeSlot")
            .field("state", &self.state())
            .field("value", &self.load())
            .finish()
    }
}
