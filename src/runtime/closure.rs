use std::{fmt, rc::Rc};

use crate::runtime::{error::RuntimeError, telemetry, value::Value};

/// Body of a closure. Receives the bound prefix followed by the call's
/// arguments, exactly `arity` values in total.
pub type NativeFn = Rc<dyn Fn(Vec<Value>) -> Result<Value, RuntimeError>>;

/// A callable with a fixed remaining arity and zero or more bound leading
/// arguments.
#[derive(Clone)]
pub struct Closure {
    name: Option<Rc<str>>,
    arity: usize,
    bound: Vec<Value>,
    code: NativeFn,
}

impl Closure {
    pub fn new(
        arity: usize,
        code: impl Fn(Vec<Value>) -> Result<Value, RuntimeError> + 'static,
    ) -> Self {
        telemetry::record_closure();
        Self {
            name: None,
            arity,
            bound: Vec::new(),
            code: Rc::new(code),
        }
    }

    /// Like [`Closure::new`], with a name shown in traces and `Display`.
    pub fn named(
        name: &str,
        arity: usize,
        code: impl Fn(Vec<Value>) -> Result<Value, RuntimeError> + 'static,
    ) -> Self {
        Self {
            name: Some(Rc::from(name)),
            ..Self::new(arity, code)
        }
    }

    /// Number of arguments still required before the body runs.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn bound(&self) -> &[Value] {
        &self.bound
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// A closure with `args` appended to the bound prefix.
    ///
    /// Callers guarantee `args.len() < self.arity()`.
    pub(crate) fn partial(&self, args: Vec<Value>) -> Closure {
        debug_assert!(args.len() < self.arity);
        telemetry::record_closure();
        let arity = self.arity - args.len();
        let mut bound = Vec::with_capacity(self.bound.len() + args.len());
        bound.extend(self.bound.iter().cloned());
        bound.extend(args);
        Closure {
            name: self.name.clone(),
            arity,
            bound,
            code: Rc::clone(&self.code),
        }
    }

    /// Runs the body on the bound prefix plus `args`.
    ///
    /// Callers guarantee `args.len() == self.arity()`.
    pub(crate) fn invoke(&self, args: Vec<Value>) -> Result<Value, RuntimeError> {
        debug_assert_eq!(args.len(), self.arity);
        if self.bound.is_empty() {
            return (self.code)(args);
        }
        let mut all = Vec::with_capacity(self.bound.len() + args.len());
        all.extend(self.bound.iter().cloned());
        all.extend(args);
        (self.code)(all)
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("bound", &self.bound)
            .finish_non_exhaustive()
    }
}
