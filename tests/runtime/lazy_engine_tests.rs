use std::{cell::Cell, cell::RefCell, rc::Rc};

use lazyrt::runtime::{
    Closure, RuntimeError, Thunk, Value, apply, die, force, telemetry,
};

fn digits(arity: usize) -> Value {
    Value::closure(Closure::named("digits", arity, |args| {
        let mut total = 0;
        for arg in &args {
            match force(arg)? {
                Value::Int(d) => total = total * 10 + d,
                other => return die(format!("digits: expected Int, got {}", other.type_name())),
            }
        }
        Ok(Value::Int(total))
    }))
}

fn ints(values: &[i32]) -> Vec<Value> {
    values.iter().copied().map(Value::Int).collect()
}

#[test]
fn thunk_is_evaluated_at_most_once() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let thunk = Value::Thunk(Thunk::new(move || {
        counter.set(counter.get() + 1);
        Ok(Value::Int(42))
    }));
    let alias = thunk.clone();

    assert_eq!(force(&thunk), Ok(Value::Int(42)));
    assert_eq!(force(&alias), Ok(Value::Int(42)));
    assert_eq!(calls.get(), 1);
}

#[test]
fn telemetry_counts_forces_and_memo_hits() {
    telemetry::reset();
    let thunk = Thunk::new(|| Ok(Value::Unit));
    thunk.force().unwrap();
    thunk.force().unwrap();
    thunk.force().unwrap();

    let stats = telemetry::snapshot();
    assert_eq!(stats.thunks_created, 1);
    assert_eq!(stats.thunks_forced, 1);
    assert_eq!(stats.memo_hits, 2);
}

#[test]
fn currying_is_associative_over_every_split() {
    let f = digits(4);
    let args = ints(&[1, 2, 3, 4]);
    let whole = apply(&f, args.clone()).unwrap();
    assert_eq!(whole, Value::Int(1234));

    for split in 0..=args.len() {
        let partial = apply(&f, args[..split].to_vec()).unwrap();
        let result = apply(&partial, args[split..].to_vec()).unwrap();
        assert_eq!(result, whole, "split at {split}");
    }
}

#[test]
fn partial_application_counts_in_telemetry() {
    telemetry::reset();
    let f = digits(3);
    let g = apply(&f, ints(&[7])).unwrap();
    let h = apply(&g, ints(&[8])).unwrap();
    assert_eq!(apply(&h, ints(&[9])), Ok(Value::Int(789)));

    let stats = telemetry::snapshot();
    assert_eq!(stats.partial_applications, 2);
    assert_eq!(stats.exact_calls, 1);
}

#[test]
fn over_application_reapplies_result() {
    // pair_then(a, b) returns a closure of arity 2 that appends two more digits.
    let pair_then = Value::closure(Closure::new(2, |prefix| {
        Ok(Value::closure(Closure::new(2, move |rest| {
            let mut all = prefix.clone();
            all.extend(rest);
            apply(&digits(4), all)
        })))
    }));

    let at_once = apply(&pair_then, ints(&[1, 2, 3, 4])).unwrap();
    let staged = apply(&apply(&pair_then, ints(&[1, 2])).unwrap(), ints(&[3, 4])).unwrap();
    assert_eq!(at_once, Value::Int(1234));
    assert_eq!(at_once, staged);
}

#[test]
fn arguments_are_passed_unforced() {
    let forced = Rc::new(Cell::new(false));
    let flag = forced.clone();
    let lazy_arg = Value::Thunk(Thunk::new(move || {
        flag.set(true);
        Ok(Value::Int(1))
    }));
    let konst = Value::closure(Closure::new(2, |args| Ok(args[0].clone())));

    assert_eq!(apply(&konst, vec![Value::Char('k'), lazy_arg]), Ok(Value::Char('k')));
    assert!(!forced.get());
}

#[test]
fn applying_a_non_function_is_identity() {
    let data = Value::data(3, vec![Value::Int(1)]);
    assert_eq!(apply(&data, ints(&[1, 2, 3])), Ok(data.clone()));
    let lazy = Value::Thunk(Thunk::new(|| Ok(Value::Double(2.5))));
    assert_eq!(apply(&lazy, ints(&[1])), Ok(Value::Double(2.5)));
}

#[test]
fn self_referential_thunk_is_a_black_hole() {
    let slot: Rc<RefCell<Value>> = Rc::new(RefCell::new(Value::Unit));
    let me = slot.clone();
    let thunk = Value::Thunk(Thunk::new(move || {
        let this = me.borrow().clone();
        let inner = force(&this)?;
        Ok(inner)
    }));
    *slot.borrow_mut() = thunk.clone();

    let err = force(&thunk).unwrap_err();
    assert_eq!(err, RuntimeError::BlackHole);
    insta::assert_snapshot!(err.render(), @"error[E1030]: BLACK HOLE: infinite loop detected (black hole)");

    *slot.borrow_mut() = Value::Unit;
}

#[test]
fn die_propagates_through_force_and_apply() {
    let failing = Value::closure(Closure::new(1, |_| die("no parse")));
    let thunk = Value::Thunk(Thunk::new(move || apply(&failing, ints(&[0]))));
    let err = force(&thunk).unwrap_err();
    assert_eq!(err, RuntimeError::User("no parse".to_string()));
    insta::assert_snapshot!(err.render(), @"error[E1099]: USER ERROR: no parse");
}

#[test]
fn display_of_runtime_values() {
    let f = apply(&digits(3), ints(&[1])).unwrap();
    let done = Value::Thunk(Thunk::done(Value::Int(1)));
    let rendered = format!("{f} {done} {}", Value::data(1, vec![Value::Char('a'), Value::Unit]));
    insta::assert_snapshot!(rendered, @"<closure digits/2> <thunk evaluated> #1('a', ())");
}
