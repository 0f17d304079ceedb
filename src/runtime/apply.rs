use std::{cmp::Ordering, rc::Rc};

use log::trace;

use crate::runtime::{error::RuntimeError, telemetry, thunk::force, value::Value};

/// Applies `callable` to `args`, resolving currying.
///
/// The callable is forced first. A forced value that is not a closure is
/// returned unchanged: generated code may "apply" a non-function, and that
/// degenerates to identity. Against a closure of arity `k`:
/// - exactly `k` arguments run the body;
/// - fewer build a new closure with the arguments bound;
/// - more run the body on the first `k`, force the result and apply it to
///   the rest.
///
/// Applying a closure to no arguments returns it unchanged unless its arity
/// is zero, in which case the body runs.
pub fn apply(callable: &Value, args: Vec<Value>) -> Result<Value, RuntimeError> {
    let mut callee = force(callable)?;
    let mut args = args;
    loop {
        let closure = match &callee {
            Value::Closure(closure) => Rc::clone(closure),
            other => {
                if !args.is_empty() {
                    trace!("apply: {} is not callable, returning it", other.type_name());
                }
                return Ok(callee);
            }
        };

        let arity = closure.arity();
        match args.len().cmp(&arity) {
            Ordering::Equal => {
                trace!("apply: exact call ({} args)", arity);
                telemetry::record_exact_call();
                return closure.invoke(args);
            }
            Ordering::Less if args.is_empty() => return Ok(callee),
            Ordering::Less => {
                trace!("apply: partial ({} of {} args)", args.len(), arity);
                telemetry::record_partial_application();
                return Ok(Value::closure(closure.partial(args)));
            }
            Ordering::Greater => {
                trace!("apply: over-saturated ({} args, arity {})", args.len(), arity);
                telemetry::record_over_application();
                let rest = args.split_off(arity);
                let result = closure.invoke(args)?;
                callee = force(&result)?;
                args = rest;
            }
        }
    }
}
