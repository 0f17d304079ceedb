//! 32-bit machine-word helpers shared by the integer engines and primops.

use crate::runtime::error::RuntimeError;

use super::TWO_PWR_32_DBL;

/// Truncates a double to a 32-bit word the way a host `x | 0` does:
/// drop the fraction, wrap modulo 2^32, reinterpret as signed.
/// Non-finite input yields 0.
pub fn to_int32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc().rem_euclid(TWO_PWR_32_DBL) as u32 as i32
}

/// Wrapping 32-bit multiply built from 16-bit partial products.
///
/// The high-by-high product only affects bits above 32 and is skipped.
pub fn imul(a: i32, b: i32) -> i32 {
    let a = a as u32 as u64;
    let b = b as u32 as u64;
    let lows = (a & 0xFFFF) * (b & 0xFFFF);
    let a_b = (a & 0xFFFF) * (b & 0xFFFF_0000);
    let b_a = (a & 0xFFFF_0000) * (b & 0xFFFF);
    lows.wrapping_add(a_b).wrapping_add(b_a) as u32 as i32
}

/// Adds two words, returning the wrapped sum and whether it overflowed.
pub fn add_c(a: i32, b: i32) -> (i32, bool) {
    a.overflowing_add(b)
}

/// Subtracts two words, returning the wrapped difference and whether it overflowed.
pub fn sub_c(a: i32, b: i32) -> (i32, bool) {
    a.overflowing_sub(b)
}

pub fn pop_cnt(word: u32) -> u32 {
    word.count_ones()
}

/// Truncating quotient and remainder of two words.
///
/// `i32::MIN / -1` wraps to `i32::MIN` with remainder 0.
pub fn quot_rem_i32(a: i32, b: i32) -> Result<(i32, i32), RuntimeError> {
    if b == 0 {
        log::debug!("quot_rem_i32: division by zero ({a} / 0)");
        return Err(RuntimeError::DivisionByZero);
    }
    Ok((a.wrapping_div(b), a.wrapping_rem(b)))
}
