//! Lazy cons lists and the string bridge.
//!
//! Lists use the constructor layout generated code expects: `[]` is
//! `#0` and `x : xs` is `#1(x, xs)`. Tails produced here are thunks, so a
//! list built from a host string is materialized one cell at a time.

use std::rc::Rc;

use crate::runtime::{
    apply::apply,
    error::RuntimeError,
    thunk::{Thunk, force},
    value::Value,
};

pub const NIL_TAG: u32 = 0;
pub const CONS_TAG: u32 = 1;

pub fn nil() -> Value {
    Value::data(NIL_TAG, Vec::new())
}

pub fn cons(head: Value, tail: Value) -> Value {
    Value::data(CONS_TAG, vec![head, tail])
}

/// Lazy list of the characters of `text`.
pub fn unpack_cstring(text: &str) -> Value {
    unpack_append_cstring(text, nil())
}

/// Lazy list of the characters of `text` followed by `rest`.
///
/// `rest` is forced once the characters are exhausted.
pub fn unpack_append_cstring(text: &str, rest: Value) -> Value {
    let chars: Rc<[char]> = text.chars().collect();
    match unpack_from(chars, 0, rest) {
        Ok(list) => list,
        // Only reachable when `text` is empty and `rest` fails to force;
        // defer the failure to whoever forces the list.
        Err(err) => Value::Thunk(Thunk::new(move || Err(err))),
    }
}

fn unpack_from(chars: Rc<[char]>, index: usize, rest: Value) -> Result<Value, RuntimeError> {
    let Some(&head) = chars.get(index) else {
        return force(&rest);
    };
    let tail = Thunk::new(move || unpack_from(chars, index + 1, rest));
    Ok(cons(Value::Char(head), Value::Thunk(tail)))
}

/// Right fold of `f` over the characters of `text`, starting from `z`.
///
/// Computed eagerly from the last character backwards:
/// `f c0 (f c1 (... (f cn z)))`.
pub fn unfoldr_cstring(text: &str, f: &Value, z: Value) -> Result<Value, RuntimeError> {
    text.chars()
        .rev()
        .try_fold(z, |acc, c| apply(f, vec![Value::Char(c), acc]))
}

/// Forces a list of characters back into a host string.
pub fn pack_string(list: &Value) -> Result<String, RuntimeError> {
    let mut out = String::new();
    for value in list_to_values(list)? {
        match value {
            Value::Char(c) => out.push(c),
            other => {
                return Err(RuntimeError::PrimOpType {
                    name: "packString",
                    expected: "Char",
                    got: other.type_name(),
                });
            }
        }
    }
    Ok(out)
}

/// Builds a list whose tails are already-evaluated cells.
pub fn list_from_values(values: Vec<Value>) -> Value {
    values
        .into_iter()
        .rev()
        .fold(nil(), |tail, head| cons(head, Value::Thunk(Thunk::done(tail))))
}

/// Forces the spine and every element of `list`.
pub fn list_to_values(list: &Value) -> Result<Vec<Value>, RuntimeError> {
    let mut out = Vec::new();
    let mut cell = force(list)?;
    loop {
        let next = match &cell {
            Value::Data(data) if data.tag == NIL_TAG && data.fields.is_empty() => return Ok(out),
            Value::Data(data) if data.tag == CONS_TAG && data.fields.len() == 2 => {
                out.push(force(&data.fields[0])?);
                force(&data.fields[1])?
            }
            other => {
                return Err(RuntimeError::PrimOpType {
                    name: "list",
                    expected: "list",
                    got: other.type_name(),
                });
            }
        };
        cell = next;
    }
}
