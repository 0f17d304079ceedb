use lazyrt::numeric::{BigInt, Int64, Word64};
use proptest::prelude::*;

fn floor_div(a: i64, b: i64) -> i64 {
    let q = a.wrapping_div(b);
    if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

fn interesting() -> impl Strategy<Value = i64> {
    prop_oneof![
        any::<i64>(),
        -70_000i64..70_000,
        Just(i64::MIN),
        Just(i64::MAX),
        Just(-1i64),
        (0u32..63).prop_map(|bits| 1i64 << bits),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn arithmetic_matches_native(a in interesting(), b in interesting()) {
        let (x, y) = (Int64::from(a), Int64::from(b));
        prop_assert_eq!(i64::from(x.add(y)), a.wrapping_add(b));
        prop_assert_eq!(i64::from(x.sub(y)), a.wrapping_sub(b));
        prop_assert_eq!(i64::from(x.mul(y)), a.wrapping_mul(b));
        prop_assert_eq!(i64::from(x.negate()), a.wrapping_neg());
        prop_assert_eq!(x.cmp(&y), a.cmp(&b));
    }

    #[test]
    fn division_matches_native(a in interesting(), b in interesting()) {
        prop_assume!(b != 0);
        let (x, y) = (Int64::from(a), Int64::from(b));
        prop_assert_eq!(i64::from(x.quot(y).unwrap()), a.wrapping_div(b));
        prop_assert_eq!(i64::from(x.rem(y).unwrap()), a.wrapping_rem(b));
        prop_assert_eq!(i64::from(x.div(y).unwrap()), floor_div(a, b));
        prop_assert_eq!(
            i64::from(x.modulo(y).unwrap()),
            a.wrapping_sub(floor_div(a, b).wrapping_mul(b))
        );
    }

    #[test]
    fn bits_match_native(a in interesting(), b in interesting(), shift in any::<u32>()) {
        let (x, y) = (Int64::from(a), Int64::from(b));
        prop_assert_eq!(i64::from(x.and(y)), a & b);
        prop_assert_eq!(i64::from(x.or(y)), a | b);
        prop_assert_eq!(i64::from(x.xor(y)), a ^ b);
        prop_assert_eq!(i64::from(x.not()), !a);
        prop_assert_eq!(i64::from(x.shift_left(shift)), a.wrapping_shl(shift));
        prop_assert_eq!(i64::from(x.shift_right(shift)), a.wrapping_shr(shift));
        prop_assert_eq!(
            i64::from(x.shift_right_unsigned(shift)),
            (a as u64).wrapping_shr(shift) as i64
        );
    }

    #[test]
    fn double_conversions_match_native(a in interesting(), d in -1.0e19f64..1.0e19) {
        prop_assert_eq!(Int64::from(a).to_f64(), a as f64);
        prop_assert_eq!(i64::from(Int64::from_f64(d)), d as i64);
    }

    #[test]
    fn bigint_bridge_is_lossless(a in interesting()) {
        let x = Int64::from(a);
        prop_assert_eq!(BigInt::from_int64(x), BigInt::from_i64(a));
        prop_assert_eq!(BigInt::from_int64(x).to_int64(), x);
    }

    #[test]
    fn word64_matches_native(a in any::<u64>(), b in any::<u64>(), shift in any::<u32>()) {
        let (x, y) = (Word64::from(a), Word64::from(b));
        prop_assert_eq!(u64::from(x.add(y)), a.wrapping_add(b));
        prop_assert_eq!(u64::from(x.sub(y)), a.wrapping_sub(b));
        prop_assert_eq!(u64::from(x.mul(y)), a.wrapping_mul(b));
        prop_assert_eq!(x.cmp(&y), a.cmp(&b));
        prop_assert_eq!(u64::from(x.shift_left(shift)), a.wrapping_shl(shift));
        prop_assert_eq!(u64::from(x.shift_right(shift)), a.wrapping_shr(shift));
        if b != 0 {
            prop_assert_eq!(u64::from(x.quot(y).unwrap()), a / b);
            prop_assert_eq!(u64::from(x.rem(y).unwrap()), a % b);
        }
    }
}
