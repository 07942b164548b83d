/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Register Errors
//!
//! Contract violations detected by the typed slot. A compare-and-swap that
//! loses a race is not an error; it simply returns `false`.
//!
//! # Author
//!
//! Haixing Hu

use thiserror::Error;

/// A broken register contract.
///
/// The `try_` operations of [`Value`](crate::Value) return these; every
/// other operation treats them as fatal and panics with the same message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// A value of a different concrete type than the one first stored.
    #[error("type mismatch: register holds `{held}` but `{supplied}` was supplied")]
    TypeMismatch {
        /// The type established by the first store.
        held: &'static str,
        /// The type the caller passed in.
        supplied: &'static str,
    },

    /// `add` was called on a register built without a combine function.
    #[error("add requires a combine function but none was configured")]
    MissingCombine,
}

/// Result alias for fallible register operations.
pub type Result<T> = std::result::Result<T, RegisterError>;

/// Reports a contract violation and aborts the operation path.
#[cold]
#[track_caller]
pub(crate) fn fatal(err: RegisterError) -> ! {
    tracing::error!(error = %err, "register contract violated");
    panic!("{err}")
}
