/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Exclusion Flag
//!
//! A one-word spinlock that linearizes multi-step critical sections of the
//! spin-guarded slot. Acquisition busy-waits with exponential backoff; the
//! lock is not fair, so starvation under pathological scheduling is
//! possible.
//!
//! Critical sections must be short and must never block.
//!
//! # Author
//!
//! Haixing Hu

use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

use crossbeam_utils::Backoff;

const FREE: u32 = 0;
const HELD: u32 = 1;

/// Spinlock over a single atomic word.
#[derive(Debug, Default)]
pub(crate) struct ExclusionFlag {
    state: AtomicU32,
}

/// Releases the flag when dropped.
#[must_use = "the flag is released as soon as the guard is dropped"]
pub(crate) struct FlagGuard<'a> {
    flag: &'a ExclusionFlag,
}

impl ExclusionFlag {
    /// Creates a free flag.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            state: AtomicU32::new(FREE),
        }
    }

    /// Spins until the flag is acquired.
    pub(crate) fn acquire(&self) -> FlagGuard<'_> {
        let backoff = Backoff::new();
        let mut reported = false;
        loop {
            if self
                .state
                .compare_exchange_weak(FREE, HELD, Ordering::Acquire, Ordering::Relaxed)
                .is_ok()
            {
                return FlagGuard { flag: self };
            }
            // Spin on plain loads until the holder releases.
            while self.state.load(Ordering::Relaxed) == HELD {
                if !reported && backoff.is_completed() {
                    tracing::trace!("exclusion flag contended, yielding");
                    reported = true;
                }
                backoff.snooze();
            }
        }
    }

    /// Makes a single acquisition attempt.
    #[inline]
    pub(crate) fn try_acquire(&self) -> Option<FlagGuard<'_>> {
        self.state
            .compare_exchange(FREE, HELD, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| FlagGuard { flag: self })
    }
}

impl Drop for FlagGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        self.flag.state.store(FREE, Ordering::Release);
    }
}
