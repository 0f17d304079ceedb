use std::{cell::RefCell, fmt, rc::Rc};

use log::debug;

use crate::runtime::{apply::apply, error::RuntimeError, thunk::force, value::Value};

/// A mutable reference cell.
#[derive(Clone)]
pub struct MutVar(Rc<RefCell<Value>>);

impl MutVar {
    pub fn new(value: Value) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    pub fn read(&self) -> Value {
        self.0.borrow().clone()
    }

    pub fn write(&self, value: Value) {
        *self.0.borrow_mut() = value;
    }

    /// Applies `f` to the current contents. The result must evaluate to a
    /// pair `#0(new, result)`: `new` is stored and `result` returned.
    ///
    /// A result that is not a pair is a type error and leaves the cell as is.
    pub fn modify(&self, f: &Value) -> Result<Value, RuntimeError> {
        let current = self.read();
        let pair = force(&apply(f, vec![current])?)?;
        match &pair {
            Value::Data(data) if data.fields.len() == 2 => {
                self.write(data.fields[0].clone());
                Ok(data.fields[1].clone())
            }
            other => Err(RuntimeError::PrimOpType {
                name: "atomicModifyMutVar",
                expected: "pair",
                got: other.type_name(),
            }),
        }
    }

    pub fn same(&self, other: &MutVar) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for MutVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(value) => write!(f, "MutVar({:?})", *value),
            Err(_) => write!(f, "MutVar(<borrowed>)"),
        }
    }
}

/// A single-threaded MVar.
///
/// With one thread of control nothing can ever fill an empty MVar that is
/// being taken (or drain a full one being put), so blocking operations on
/// the wrong state fail instead of waiting forever.
#[derive(Clone)]
pub struct MVar(Rc<RefCell<Option<Value>>>);

impl MVar {
    pub fn new_empty() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    pub fn new_full(value: Value) -> Self {
        Self(Rc::new(RefCell::new(Some(value))))
    }

    pub fn take(&self) -> Result<Value, RuntimeError> {
        self.try_take().ok_or_else(|| {
            debug!("takeMVar on an empty MVar");
            RuntimeError::EmptyMVar
        })
    }

    pub fn put(&self, value: Value) -> Result<(), RuntimeError> {
        if self.try_put(value) {
            Ok(())
        } else {
            debug!("putMVar on a full MVar");
            Err(RuntimeError::FullMVar)
        }
    }

    pub fn try_take(&self) -> Option<Value> {
        self.0.borrow_mut().take()
    }

    /// Stores `value` if the MVar is empty; returns whether it did.
    pub fn try_put(&self, value: Value) -> bool {
        let mut slot = self.0.borrow_mut();
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_none()
    }

    pub fn same(&self, other: &MVar) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for MVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow().as_deref() {
            Ok(Some(value)) => write!(f, "MVar({:?})", value),
            Ok(None) => write!(f, "MVar(<empty>)"),
            Err(_) => write!(f, "MVar(<borrowed>)"),
        }
    }
}
