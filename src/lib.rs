/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # prism3-rust-register
//!
//! Atomic registers: typed containers supporting load, store, swap,
//! compare-and-swap and add under concurrent access, without external
//! locking.
//!
//! ## Design Goals
//!
//! - **Uniform API**: every register offers the same five operations,
//!   captured by the [`Atomic`] and [`AtomicAdd`] traits
//! - **Beyond a word**: byte buffers, strings and arbitrary values get the
//!   same atomic compound operations as integers
//! - **Type safety**: a dynamically-typed [`Value`] fixes its type on the
//!   first store and rejects every other type afterwards
//! - **Choice of strategy**: slot-backed registers run lock-free by default
//!   or inside a spinlock-guarded critical section ([`SpinSlot`])
//!
//! ## Features
//!
//! - Scalar registers: `AtomicBool`, `AtomicI8` … `AtomicU64`,
//!   `AtomicIsize`, `AtomicUsize`, `AtomicF32`, `AtomicF64`
//! - Pointer register: `AtomicPointer<T>`
//! - Buffer registers: `AtomicBytes`, `AtomicString`
//! - Generic registers: `AtomicValue<T>` and the dynamically-typed `Value`
//!
//! ## Example
//!
//! ```rust
//! use prism3_register::{AtomicI32, AtomicString};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let counter = Arc::new(AtomicI32::new(0));
//! let handles: Vec<_> = (0..10)
//!     .map(|_| {
//!         let counter = counter.clone();
//!         thread::spawn(move || {
//!             for _ in 0..100 {
//!                 counter.add(1);
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(counter.load(), 1000);
//!
//! let name = AtomicString::new("re");
//! name.add("gister");
//! assert!(name.compare_and_swap("register", "done"));
//! ```
//!
//! ## Author
//!
//! Haixing Hu

#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod atomic;
pub mod error;

// Re-export all registers and traits
pub use atomic::slot::{
    LockFreeSlot,
    Payload,
    Slot,
    SlotState,
    SpinSlot,
    TypeTag,
};
pub use atomic::{
    Atomic,
    AtomicAdd,
    AtomicBool,
    AtomicBytes,
    AtomicF32,
    AtomicF64,
    AtomicI16,
    AtomicI32,
    AtomicI64,
    AtomicI8,
    AtomicIsize,
    AtomicPointer,
    AtomicScalar,
    AtomicString,
    AtomicU16,
    AtomicU32,
    AtomicU64,
    AtomicU8,
    AtomicUsize,
    AtomicValue,
    Value,
};
pub use error::{
    RegisterError,
    Result,
};
