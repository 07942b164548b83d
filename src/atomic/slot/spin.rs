/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Spin-Guarded Slot
//!
//! Every operation acquires the slot's exclusion flag, works on a plain
//! `Option<Payload>`, and releases the flag. Observably identical to the
//! lock-free slot, including the first compare-and-swap reporting `false`.
//!
//! Matchers and update functions run while the flag is held: they must
//! not touch the same register, or they spin forever.
//!
//! # Author
//!
//! Haixing Hu

use std::cell::UnsafeCell;
use std::fmt;

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
use crate::atomic::flag::ExclusionFlag;
use crate::error::Result;

/// Spinlock-guarded typed slot.
///
/// # Author
///
/// Haixing Hu
pub struct SpinSlot {
    flag: ExclusionFlag,
    cell: UnsafeCell<Option<Payload>>,
}

// SAFETY: the cell is only touched while `flag` is held.
unsafe impl Sync for SpinSlot {}

impl SpinSlot {
    /// Creates an empty slot.
    #[inline]
    pub fn new() -> Self {
        Self {
            flag: ExclusionFlag::new(),
            cell: UnsafeCell::new(None),
        }
    }

    #[inline]
    fn critical<R>(&self, f: impl FnOnce(&mut Option<Payload>) -> R) -> R {
        let _guard = self.flag.acquire();
        // SAFETY: the flag is held, so this is the only live reference.
        f(unsafe { &mut *self.cell.get() })
    }
}

#[sealed]
impl Slot for SpinSlot {
    fn state(&self) -> SlotState {
        self.critical(|cell| match cell {
            Some(payload) => SlotState::Typed(payload.tag()),
            None => SlotState::Empty,
        })
    }

    fn load(&self) -> Option<Payload> {
        self.critical(|cell| cell.clone())
    }

    fn store(&self, value: Payload) -> Result<()> {
        self.critical(|cell| {
            if let Some(current) = cell {
                check_type(&current.tag(), &value.tag())?;
            } else {
                tracing::trace!(type_name = value.tag().name(), "slot published its first value");
            }
            *cell = Some(value);
            Ok(())
        })
    }

    fn try_publish(&self, value: Payload) -> bool {
        self.critical(|cell| {
            if cell.is_some() {
                return false;
            }
            tracing::trace!(type_name = value.tag().name(), "slot published its first value");
            *cell = Some(value);
            true
        })
    }

    fn compare_and_swap(
        &self,
        expected: &TypeTag,
        matches: Matcher<'_>,
        desired: Payload,
    ) -> Result<bool> {
        self.critical(|cell| {
            let Some(current) = cell else {
                *cell = Some(desired);
                return Ok(false);
            };
            let held = current.tag();
            check_type(&held, expected)?;
            check_type(&held, &desired.tag())?;
            if !matches(current) {
                return Ok(false);
            }
            *cell = Some(desired);
            Ok(true)
        })
    }

    fn update(&self, f: Updater<'_>) -> Result<Option<(Payload, Payload)>> {
        self.critical(|cell| {
            let Some(old) = cell.clone() else {
                return Ok(None);
            };
            let new = f(&old)?;
            check_type(&old.tag(), &new.tag())?;
            *cell = Some(new.clone());
            Ok(Some((old, new)))
        })
    }
}

impl Default for SpinSlot {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SpinSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("SpinSlot");
        match self.flag.try_acquire() {
            Some(_guard) => {
                // SAFETY: the flag is held.
                out.field("value", unsafe { &*self.cell.get() })
            }
            None => out.field("value", &format_args!("<locked>")),
        };
        out.finish()
    }
}
