use std::{fmt, rc::Rc};

use crate::numeric::{BigInt, Int64, Word64};
use crate::runtime::{
    closure::Closure,
    mutvar::{MVar, MutVar},
    thunk::Thunk,
};

/// Runtime value handled by forced code, closures and primops.
///
/// ## Memory Management Model
///
/// Immediates (`Int`, `Word`, `Double`, `Bool`, `Char`, `Int64`, `Word64`)
/// are unboxed. Everything else is behind an `Rc`, so cloning a `Value` is
/// O(1) and sharing a [`Thunk`] shares its memoized result.
///
/// Lazy structures may be cyclic through thunks (a list whose tail refers
/// back to itself); such cycles are not reclaimed while the program holds
/// them. No reclamation policy beyond `Rc` is provided.
#[derive(Debug, Clone)]
pub enum Value {
    /// The empty tuple.
    Unit,
    /// 32-bit signed machine word.
    Int(i32),
    /// 32-bit unsigned machine word.
    Word(u32),
    /// 64-bit floating point number.
    Double(f64),
    Bool(bool),
    Char(char),
    /// UTF-8 string literal (not a lazy list, see [`crate::runtime::list`]).
    Str(Rc<str>),
    /// Arbitrary-precision integer.
    Integer(BigInt),
    Int64(Int64),
    Word64(Word64),
    /// Constructor application: a tag plus its fields.
    Data(Rc<Data>),
    Closure(Rc<Closure>),
    /// Deferred computation; see [`crate::runtime::force`].
    Thunk(Thunk),
    MutVar(MutVar),
    MVar(MVar),
}

/// A saturated data constructor. Tags are assigned by the code generator in
/// declaration order, starting from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Data {
    pub tag: u32,
    pub fields: Vec<Value>,
}

impl Value {
    pub fn data(tag: u32, fields: Vec<Value>) -> Value {
        Value::Data(Rc::new(Data { tag, fields }))
    }

    pub fn text(text: &str) -> Value {
        Value::Str(Rc::from(text))
    }

    pub fn closure(closure: Closure) -> Value {
        Value::Closure(Rc::new(closure))
    }

    /// Returns the canonical runtime type label used in diagnostics and primops.
    ///
    /// These labels are user-visible and are expected to remain stable.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "Unit",
            Value::Int(_) => "Int",
            Value::Word(_) => "Word",
            Value::Double(_) => "Double",
            Value::Bool(_) => "Bool",
            Value::Char(_) => "Char",
            Value::Str(_) => "String",
            Value::Integer(_) => "Integer",
            Value::Int64(_) => "Int64",
            Value::Word64(_) => "Word64",
            Value::Data(_) => "Data",
            Value::Closure(_) => "Closure",
            Value::Thunk(_) => "Thunk",
            Value::MutVar(_) => "MutVar",
            Value::MVar(_) => "MVar",
        }
    }

    /// Constructor tag of an evaluated value.
    ///
    /// `Bool` and `Unit` are nullary constructors (`False = 0`, `True = 1`,
    /// `() = 0`). Returns `None` for values that are not constructors,
    /// including unevaluated thunks.
    pub fn data_to_tag(&self) -> Option<u32> {
        match self {
            Value::Data(data) => Some(data.tag),
            Value::Bool(b) => Some(u32::from(*b)),
            Value::Unit => Some(0),
            _ => None,
        }
    }

    pub fn is_thunk(&self) -> bool {
        matches!(self, Value::Thunk(_))
    }
}

/// Structural on data, by identity on closures, thunks and mutable cells.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Unit, Value::Unit) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Word(a), Value::Word(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Word64(a), Value::Word64(b)) => a == b,
            (Value::Data(a), Value::Data(b)) => Rc::ptr_eq(a, b) || a == b,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Thunk(a), Value::Thunk(b)) => a.ptr_eq(b),
            (Value::MutVar(a), Value::MutVar(b)) => a.same(b),
            (Value::MVar(a), Value::MVar(b)) => a.same(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Word(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Char(c) => write!(f, "{:?}", c),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Int64(n) => write!(f, "{}", n),
            Value::Word64(n) => write!(f, "{}", n),
            Value::Data(data) => {
                if data.fields.is_empty() {
                    return write!(f, "#{}", data.tag);
                }
                let fields: Vec<String> = data.fields.iter().map(|v| v.to_string()).collect();
                write!(f, "#{}({})", data.tag, fields.join(", "))
            }
            Value::Closure(closure) => match closure.name() {
                Some(name) => write!(f, "<closure {}/{}>", name, closure.arity()),
                None => write!(f, "<closure/{}>", closure.arity()),
            },
            Value::Thunk(thunk) => {
                if thunk.is_evaluated() {
                    write!(f, "<thunk evaluated>")
                } else {
                    write!(f, "<thunk>")
                }
            }
            Value::MutVar(_) => write!(f, "<mutvar>"),
            Value::MVar(_) => write!(f, "<mvar>"),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Integer(value)
    }
}

impl From<Int64> for Value {
    fn from(value: Int64) -> Self {
        Value::Int64(value)
    }
}

impl From<Word64> for Value {
    fn from(value: Word64) -> Self {
        Value::Word64(value)
    }
}

impl From<Thunk> for Value {
    fn from(value: Thunk) -> Self {
        Value::Thunk(value)
    }
}
