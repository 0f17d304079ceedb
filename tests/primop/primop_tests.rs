use std::{cell::Cell, rc::Rc};

use lazyrt::numeric::{BigInt, Int64, Word64};
use lazyrt::primop::{PrimOp, execute_primop};
use lazyrt::runtime::{RuntimeError, Thunk, Value};

fn integer(text: &str) -> Value {
    Value::Integer(text.parse().unwrap())
}

#[test]
fn integer_arithmetic_through_primops() {
    let sum = execute_primop(
        PrimOp::IntegerAdd,
        vec![integer("99999999999999999999"), integer("1")],
    )
    .unwrap();
    assert_eq!(sum, integer("100000000000000000000"));

    let product = execute_primop(
        PrimOp::IntegerMul,
        vec![integer("4294967296"), integer("-4294967296")],
    )
    .unwrap();
    assert_eq!(product, integer("-18446744073709551616"));
}

#[test]
fn arguments_are_forced_once() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let lazy = Value::Thunk(Thunk::new(move || {
        counter.set(counter.get() + 1);
        Ok(Value::Integer(BigInt::from_i32(6)))
    }));

    let square = execute_primop(PrimOp::IntegerMul, vec![lazy.clone(), lazy]).unwrap();
    assert_eq!(square, Value::Integer(BigInt::from_i32(36)));
    assert_eq!(calls.get(), 1);
}

#[test]
fn quot_rem_and_div_mod_return_pairs() {
    let args = || vec![integer("-7"), integer("2")];
    let quot_rem = execute_primop(PrimOp::IntegerQuotRem, args()).unwrap();
    assert_eq!(quot_rem, Value::data(0, vec![integer("-3"), integer("-1")]));
    let div_mod = execute_primop(PrimOp::IntegerDivMod, args()).unwrap();
    assert_eq!(div_mod, Value::data(0, vec![integer("-4"), integer("1")]));
}

#[test]
fn division_by_zero_propagates() {
    for op in [PrimOp::IntegerQuot, PrimOp::IntegerRem, PrimOp::IntegerDiv, PrimOp::IntegerMod] {
        let err = execute_primop(op, vec![integer("5"), integer("0")]).unwrap_err();
        assert_eq!(err, RuntimeError::DivisionByZero, "{}", op.display_name());
    }
    let err = execute_primop(
        PrimOp::Int64Quot,
        vec![Value::Int64(Int64::ONE), Value::Int64(Int64::ZERO)],
    )
    .unwrap_err();
    assert_eq!(err, RuntimeError::DivisionByZero);
    let err = execute_primop(PrimOp::IntQuotRem, vec![Value::Int(1), Value::Int(0)]).unwrap_err();
    assert_eq!(err, RuntimeError::DivisionByZero);
}

#[test]
fn operand_types_are_checked() {
    let err = execute_primop(PrimOp::IntegerAdd, vec![integer("1"), Value::Int(1)]).unwrap_err();
    insta::assert_snapshot!(
        err.render(),
        @"error[E1004]: RUNTIME TYPE ERROR: primop integerAdd expected Integer, got Int"
    );
    let err = execute_primop(PrimOp::Int64Not, vec![]).unwrap_err();
    insta::assert_snapshot!(
        err.render(),
        @"error[E1000]: WRONG NUMBER OF ARGUMENTS: primop int64Not expects 1 arguments, got 0"
    );
}

#[test]
fn string_conversions() {
    let text = execute_primop(PrimOp::IntegerToString, vec![integer("255"), Value::Int(16)]);
    assert_eq!(text, Ok(Value::text("ff")));

    let parsed = execute_primop(PrimOp::IntegerFromString, vec![Value::text("-zz"), Value::Int(36)]);
    assert_eq!(parsed, Ok(integer("-1295")));

    let err = execute_primop(PrimOp::IntegerFromString, vec![Value::text("--1"), Value::Int(10)]);
    assert_eq!(err, Err(RuntimeError::InteriorMinus));
    let err = execute_primop(PrimOp::IntegerToString, vec![integer("1"), Value::Int(99)]);
    assert_eq!(err, Err(RuntimeError::RadixOutOfRange(99)));
}

#[test]
fn sixty_four_bit_ops() {
    let min = Value::Int64(Int64::MIN_VALUE);
    assert_eq!(execute_primop(PrimOp::Int64Negate, vec![min.clone()]), Ok(min.clone()));
    assert_eq!(
        execute_primop(PrimOp::Int64ShiftRL, vec![min.clone(), Value::Int(63)]),
        Ok(Value::Int64(Int64::ONE))
    );
    assert_eq!(
        execute_primop(PrimOp::Int64Compare, vec![min, Value::Int64(Int64::ZERO)]),
        Ok(Value::Int(-1))
    );
    assert_eq!(
        execute_primop(
            PrimOp::Word64Quot,
            vec![Value::Word64(Word64::MAX_VALUE), Value::Word64(Word64::from(2u64))]
        ),
        Ok(Value::Word64(Word64::from(u64::MAX / 2)))
    );
    assert_eq!(
        execute_primop(PrimOp::IntegerToWord64, vec![integer("-1")]),
        Ok(Value::Word64(Word64::MAX_VALUE))
    );
}

#[test]
fn machine_word_helpers() {
    assert_eq!(
        execute_primop(PrimOp::IntAddC, vec![Value::Int(i32::MAX), Value::Int(1)]),
        Ok(Value::data(0, vec![Value::Int(i32::MIN), Value::Int(1)]))
    );
    assert_eq!(
        execute_primop(PrimOp::IntMul, vec![Value::Int(65_536), Value::Int(65_536)]),
        Ok(Value::Int(0))
    );
    assert_eq!(
        execute_primop(PrimOp::WordPopCnt, vec![Value::Word(0xF0F0)]),
        Ok(Value::Int(8))
    );
    assert_eq!(
        execute_primop(PrimOp::DataToTag, vec![Value::data(4, vec![Value::Unit])]),
        Ok(Value::Int(4))
    );
}

#[test]
fn float_decoding() {
    assert_eq!(
        execute_primop(PrimOp::IntegerDecodeDouble, vec![Value::Double(1.0)]),
        Ok(Value::data(0, vec![integer("4503599627370496"), Value::Int(-52)]))
    );
    assert_eq!(
        execute_primop(PrimOp::IntegerEncodeDouble, vec![integer("3"), Value::Int(-2)]),
        Ok(Value::Double(0.75))
    );
    assert_eq!(
        execute_primop(PrimOp::DecodeFloat, vec![Value::Double(0.5)]),
        Ok(Value::data(0, vec![Value::Int(1 << 23), Value::Int(-24)]))
    );
}
