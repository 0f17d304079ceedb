use lazyrt::numeric::{BigInt, Int64, Word64};
use lazyrt::runtime::RuntimeError;

#[test]
fn max_plus_one_wraps_to_min() {
    assert_eq!(Int64::MAX_VALUE.add(Int64::from_i32(1)), Int64::MIN_VALUE);
}

#[test]
fn negating_min_value_is_a_fixed_point() {
    assert_eq!(Int64::MIN_VALUE.negate(), Int64::MIN_VALUE);
    assert_eq!(Int64::MIN_VALUE.quot(Int64::NEG_ONE), Ok(Int64::MIN_VALUE));
    assert_eq!(Int64::MIN_VALUE.rem(Int64::NEG_ONE), Ok(Int64::ZERO));
}

#[test]
fn two_to_the_31_squared_is_exact() {
    let x = Int64::from_f64(2_147_483_648.0);
    assert_eq!(x.mul(x), Int64::from(1i64 << 62));
    assert_eq!(x.mul(x).high_bits(), 1 << 30);
    assert_eq!(x.mul(x).low_bits(), 0);
}

#[test]
fn every_division_flavour_rejects_zero() {
    let n = Int64::from(123_456_789_012i64);
    assert_eq!(n.quot(Int64::ZERO), Err(RuntimeError::DivisionByZero));
    assert_eq!(n.rem(Int64::ZERO), Err(RuntimeError::DivisionByZero));
    assert_eq!(n.div(Int64::ZERO), Err(RuntimeError::DivisionByZero));
    assert_eq!(n.modulo(Int64::ZERO), Err(RuntimeError::DivisionByZero));
    assert_eq!(Word64::MAX_VALUE.quot(Word64::ZERO), Err(RuntimeError::DivisionByZero));
    assert_eq!(Word64::MAX_VALUE.rem(Word64::ZERO), Err(RuntimeError::DivisionByZero));
}

#[test]
fn floor_division_rounds_down() {
    let (a, b) = (Int64::from(-7i64), Int64::from(2i64));
    assert_eq!(a.quot(b), Ok(Int64::from(-3i64)));
    assert_eq!(a.div(b), Ok(Int64::from(-4i64)));
    assert_eq!(a.rem(b), Ok(Int64::from(-1i64)));
    assert_eq!(a.modulo(b), Ok(Int64::from(1i64)));
}

#[test]
fn word_pair_accessors() {
    let n = Int64::from(-2i64);
    assert_eq!(n.low_bits(), -2);
    assert_eq!(n.low_bits_unsigned(), u32::MAX - 1);
    assert_eq!(n.high_bits(), -1);
    assert!(n.is_negative());
    assert!(!n.is_odd());
    assert_eq!(n.to_i32(), -2);
    assert_eq!(n.to_string(), "-2");
}

#[test]
fn serializes_as_word_pair() {
    let json = serde_json::to_string(&Int64::from(-1i64)).unwrap();
    insta::assert_snapshot!(json, @r#"{"low":-1,"high":-1}"#);
    let back: Int64 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Int64::NEG_ONE);

    let word = Word64::from(1u64 << 32);
    insta::assert_snapshot!(serde_json::to_string(&word).unwrap(), @r#"{"low":0,"high":1}"#);
}

#[test]
fn word64_reinterprets_int64_bits() {
    let w = Word64::from_int64(Int64::NEG_ONE);
    assert_eq!(w, Word64::MAX_VALUE);
    assert_eq!(w.to_int64(), Int64::NEG_ONE);
    assert_eq!(w.to_f64(), 18_446_744_073_709_551_615.0);
    assert_eq!(BigInt::from_word64(w).to_string(), "18446744073709551615");
}
