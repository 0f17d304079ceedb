//! Lazy values and the force/apply protocol.
//!
//! # Evaluation model
//! Generated programs build graphs of [`Thunk`]s and [`Closure`]s and drive
//! them with two operations:
//! - [`force`] evaluates a deferred computation at most once and memoizes
//!   the outcome; every holder of the thunk sees the same result.
//! - [`apply`] resolves curried calls, including partial and
//!   over-saturated application.
//!
//! Evaluation is single-threaded and synchronous: `Rc`/`RefCell` are used
//! throughout and none of these types are `Send`.
//!
//! # Self-reference
//! A thunk forced again while its own computation is running is a black
//! hole and fails with [`RuntimeError::BlackHole`] instead of recursing.

pub mod apply;
pub mod closure;
pub mod error;
pub mod list;
pub mod mutvar;
pub mod telemetry;
pub mod thunk;
pub mod value;

pub use apply::apply;
pub use closure::{Closure, NativeFn};
pub use error::RuntimeError;
pub use mutvar::{MVar, MutVar};
pub use thunk::{Thunk, force};
pub use value::{Data, Value};

/// Aborts the running computation with a user-supplied message.
pub fn die<T>(message: impl Into<String>) -> Result<T, RuntimeError> {
    let message = message.into();
    log::debug!("die: {message}");
    Err(RuntimeError::User(message))
}
