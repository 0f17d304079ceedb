use std::{cell::RefCell, fmt, rc::Rc};

use log::{debug, trace};

use crate::runtime::{error::RuntimeError, telemetry, value::Value};

type Computation = Box<dyn FnOnce() -> Result<Value, RuntimeError>>;

enum ThunkState {
    Pending(Computation),
    /// The computation is running; forcing again from inside it is a black hole.
    Forcing,
    Done(Value),
    Failed(RuntimeError),
}

/// A shared, memoizing deferred computation.
///
/// Cloning a `Thunk` clones the handle, not the computation: every clone
/// observes the same state, and the computation runs at most once across
/// all of them.
#[derive(Clone)]
pub struct Thunk(Rc<RefCell<ThunkState>>);

impl Thunk {
    pub fn new(computation: impl FnOnce() -> Result<Value, RuntimeError> + 'static) -> Self {
        telemetry::record_thunk_created();
        Self(Rc::new(RefCell::new(ThunkState::Pending(Box::new(computation)))))
    }

    /// An already-evaluated cell.
    pub fn done(value: Value) -> Self {
        Self(Rc::new(RefCell::new(ThunkState::Done(value))))
    }

    pub fn is_evaluated(&self) -> bool {
        matches!(*self.0.borrow(), ThunkState::Done(_))
    }

    pub fn ptr_eq(&self, other: &Thunk) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Evaluates the cell, or returns its memoized outcome.
    ///
    /// A computation that yields another thunk is followed until a
    /// non-thunk value is reached, so a `Done` cell never holds a thunk.
    /// Failures are memoized like values.
    pub fn force(&self) -> Result<Value, RuntimeError> {
        let state = std::mem::replace(&mut *self.0.borrow_mut(), ThunkState::Forcing);
        match state {
            ThunkState::Done(value) => {
                telemetry::record_memo_hit();
                *self.0.borrow_mut() = ThunkState::Done(value.clone());
                Ok(value)
            }
            ThunkState::Failed(err) => {
                *self.0.borrow_mut() = ThunkState::Failed(err.clone());
                Err(err)
            }
            ThunkState::Forcing => {
                debug!("black hole: thunk forced during its own evaluation");
                telemetry::record_black_hole();
                Err(RuntimeError::BlackHole)
            }
            ThunkState::Pending(computation) => {
                trace!("forcing thunk");
                telemetry::record_thunk_forced();
                let result = computation().and_then(|value| force(&value));
                *self.0.borrow_mut() = match &result {
                    Ok(value) => ThunkState::Done(value.clone()),
                    Err(err) => ThunkState::Failed(err.clone()),
                };
                result
            }
        }
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow().as_deref() {
            Ok(ThunkState::Pending(_)) => write!(f, "Thunk(<pending>)"),
            Ok(ThunkState::Done(value)) => write!(f, "Thunk({:?})", value),
            Ok(ThunkState::Failed(err)) => write!(f, "Thunk(<failed: {}>)", err),
            Ok(ThunkState::Forcing) | Err(_) => write!(f, "Thunk(<forcing>)"),
        }
    }
}

/// Forces `value` if it is a thunk; any other value is returned as is.
pub fn force(value: &Value) -> Result<Value, RuntimeError> {
    match value {
        Value::Thunk(thunk) => thunk.force(),
        other => Ok(other.clone()),
    }
}
