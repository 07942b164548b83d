/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Registers
//!
//! Registers come in two families:
//!
//! - Fixed-width scalars ([`AtomicScalar`] and its aliases, plus
//!   [`AtomicPointer`]) go straight to a hardware atomic word.
//! - Variable-length and arbitrary-type values ([`AtomicBytes`],
//!   [`AtomicString`], [`AtomicValue`], [`Value`]) live in a typed
//!   [`slot`], which makes compound operations atomic over payloads larger
//!   than a word.
//!
//! # Memory Ordering
//!
//! Loads use `Acquire`, stores use `Release`, and read-modify-write
//! operations use `AcqRel`, so every operation on one register is
//! linearizable.
//!
//! # Author
//!
//! Haixing Hu

mod atomic_bytes;
mod atomic_pointer;
mod atomic_scalar;
mod atomic_string;
mod atomic_value;
mod flag;
mod scalar;
pub mod slot;
mod traits;
mod value;
mod word;

pub use atomic_bytes::AtomicBytes;
pub use atomic_pointer::AtomicPointer;
pub use atomic_scalar::{
    AtomicBool,
    AtomicF32,
    AtomicF64,
    AtomicI16,
    AtomicI32,
    AtomicI64,
    AtomicI8,
    AtomicIsize,
    AtomicScalar,
    AtomicU16,
    AtomicU32,
    AtomicU64,
    AtomicU8,
    AtomicUsize,
};
pub use atomic_string::AtomicString;
pub use atomic_value::{
    AtomicValue,
    CombineFn,
    EqualFn,
};
pub use scalar::Scalar;
pub use traits::{
    Atomic,
    AtomicAdd,
};
pub use value::{
    PayloadCombine,
    PayloadEquality,
    Value,
};
pub use word::Word;
