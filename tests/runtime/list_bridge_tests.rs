use std::{cell::Cell, rc::Rc};

use lazyrt::runtime::{
    Closure, RuntimeError, Thunk, Value, die, force,
    list::{
        cons, list_from_values, list_to_values, nil, pack_string, unfoldr_cstring,
        unpack_append_cstring, unpack_cstring,
    },
};

#[test]
fn unpacked_string_round_trips() {
    let list = unpack_cstring("héllo, wörld");
    assert_eq!(pack_string(&list).unwrap(), "héllo, wörld");
    assert_eq!(unpack_cstring(""), nil());
}

#[test]
fn unpacked_tails_are_lazy() {
    let list = unpack_cstring("abc");
    let Value::Data(cell) = &list else {
        panic!("expected cons cell, got {list}");
    };
    assert_eq!(cell.tag, 1);
    assert_eq!(cell.fields[0], Value::Char('a'));
    match &cell.fields[1] {
        Value::Thunk(tail) => assert!(!tail.is_evaluated()),
        other => panic!("expected thunk tail, got {other}"),
    }
}

#[test]
fn append_forces_rest_only_at_the_end() {
    let forced = Rc::new(Cell::new(0));
    let counter = forced.clone();
    let rest = Value::Thunk(Thunk::new(move || {
        counter.set(counter.get() + 1);
        Ok(list_from_values(vec![Value::Char('!')]))
    }));
    let list = unpack_append_cstring("hi", rest);

    let Value::Data(first) = &list else {
        panic!("expected cons cell");
    };
    let second = force(&first.fields[1]).unwrap();
    assert_eq!(forced.get(), 0);
    let Value::Data(second) = second else {
        panic!("expected cons cell");
    };
    assert_eq!(second.fields[0], Value::Char('i'));

    assert_eq!(pack_string(&list).unwrap(), "hi!");
    assert_eq!(forced.get(), 1);
}

#[test]
fn failing_rest_surfaces_on_pack() {
    let rest = Value::Thunk(Thunk::new(|| die("boom")));
    let list = unpack_append_cstring("ab", rest);
    assert_eq!(pack_string(&list), Err(RuntimeError::User("boom".to_string())));
}

#[test]
fn unfoldr_is_a_right_fold() {
    let cons_fn = Value::closure(Closure::new(2, |args| {
        Ok(cons(args[0].clone(), args[1].clone()))
    }));
    let list = unfoldr_cstring("xyz", &cons_fn, nil()).unwrap();
    assert_eq!(pack_string(&list).unwrap(), "xyz");

    let first_seen = Value::closure(Closure::new(2, |args| match force(&args[1])? {
        Value::Unit => Ok(args[0].clone()),
        _ => Ok(args[1].clone()),
    }));
    // The last character is combined with `z` first.
    assert_eq!(unfoldr_cstring("xyz", &first_seen, Value::Unit), Ok(Value::Char('z')));
}

#[test]
fn values_round_trip_through_lists() {
    let values = vec![Value::Int(1), Value::Bool(false), Value::Char('c')];
    let list = list_from_values(values.clone());
    assert_eq!(list_to_values(&list).unwrap(), values);
    assert_eq!(list_to_values(&nil()).unwrap(), Vec::<Value>::new());
}

#[test]
fn pack_rejects_non_characters() {
    let list = list_from_values(vec![Value::Char('a'), Value::Int(2)]);
    let err = pack_string(&list).unwrap_err();
    assert_eq!(
        err,
        RuntimeError::PrimOpType {
            name: "packString",
            expected: "Char",
            got: "Int"
        }
    );
}

#[test]
fn improper_list_is_a_type_error() {
    let improper = cons(Value::Char('a'), Value::Int(0));
    assert!(matches!(
        list_to_values(&improper),
        Err(RuntimeError::PrimOpType { got: "Int", .. })
    ));
}
