use lazyrt::numeric::{BigInt, Int64, Word64};
use lazyrt::runtime::RuntimeError;

fn factorial(n: i32) -> BigInt {
    (1..=n).fold(BigInt::one(), |acc, k| acc.mul(&BigInt::from_i32(k)))
}

fn fibonacci(n: usize) -> BigInt {
    let (mut a, mut b) = (BigInt::zero(), BigInt::one());
    for _ in 0..n {
        let next = a.add(&b);
        a = b;
        b = next;
    }
    a
}

#[test]
fn known_large_values() {
    assert_eq!(factorial(30).to_string(), "265252859812191058636308480000000");
    assert_eq!(fibonacci(100).to_string(), "354224848179261915075");
    insta::assert_snapshot!(
        factorial(50).to_string(),
        @"30414093201713378043612608166064768844377641568960512000000000000"
    );
}

#[test]
fn factorial_divides_back_down() {
    let mut n = factorial(40);
    for k in (1..=40).rev() {
        let (q, r) = n.quot_rem(&BigInt::from_i32(k)).unwrap();
        assert!(r.is_zero(), "{k} does not divide");
        n = q;
    }
    assert_eq!(n, BigInt::one());
}

#[test]
fn hex_and_binary_rendering() {
    let n = BigInt::one().shift_left(100);
    insta::assert_snapshot!(n.to_string_radix(16).unwrap(), @"10000000000000000000000000");
    assert_eq!(BigInt::from_i32(-10).to_string_radix(2).unwrap(), "-1010");
    assert_eq!(
        BigInt::from_str_radix("-deadbeefcafe", 16).unwrap(),
        BigInt::from_i64(-0xdead_beef_cafe)
    );
}

#[test]
fn two_to_the_128_round_trips_through_decimal() {
    let text = "340282366920938463463374607431768211456";
    let n = BigInt::from_str_radix(text, 10).unwrap();
    assert_eq!(n.to_string_radix(10).unwrap(), text);
    assert_eq!(n.words(), &[0, 0, 0, 0, 1]);
}

#[test]
fn every_division_flavour_rejects_zero() {
    let n = factorial(25);
    let zero = BigInt::zero();
    assert_eq!(n.quot(&zero), Err(RuntimeError::DivisionByZero));
    assert_eq!(n.rem(&zero), Err(RuntimeError::DivisionByZero));
    assert_eq!(n.div(&zero), Err(RuntimeError::DivisionByZero));
    assert_eq!(n.modulo(&zero), Err(RuntimeError::DivisionByZero));
    assert_eq!(n.quot_rem(&zero), Err(RuntimeError::DivisionByZero));
    assert_eq!(n.div_mod(&zero), Err(RuntimeError::DivisionByZero));
}

#[test]
fn json_words_snapshot() {
    let n = BigInt::from_i64(-(1i64 << 40));
    insta::assert_snapshot!(serde_json::to_string(&n).unwrap(), @r#"{"words":[0,-256],"sign":-1}"#);
}

#[test]
fn bridges_to_sixty_four_bits_wrap() {
    let big = BigInt::one().shift_left(64).add(&BigInt::from_i32(-1));
    assert_eq!(big.to_word64(), Word64::MAX_VALUE);
    assert_eq!(big.to_int64(), Int64::NEG_ONE);
    assert_eq!(BigInt::from_int64(Int64::NEG_ONE), BigInt::from_i32(-1));
    assert_eq!(BigInt::from_word64(Word64::MAX_VALUE), big);
}

#[test]
fn signum_abs_and_parity() {
    let n = BigInt::from_str_radix("-99999999999999999999", 10).unwrap();
    assert_eq!(n.signum(), BigInt::from_i32(-1));
    assert_eq!(n.abs().negate(), n);
    assert!(n.is_odd());
    assert_eq!(BigInt::zero().signum(), BigInt::zero());
}
