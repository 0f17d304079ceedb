//! Exact integer arithmetic that a host `f64` cannot represent.
//!
//! Two engines live here:
//! - [`BigInt`]: arbitrary precision, stored as little-endian 32-bit words
//!   with an implicit sign-extension word.
//! - [`Int64`] / [`Word64`]: fixed 64-bit values held as a `(low, high)`
//!   pair of 32-bit words.
//!
//! Both split words into 16-bit limbs for addition and multiplication so
//! that every intermediate stays below 2^53, and both compute quotients by
//! refining a floating-point estimate. Results are bit-exact two's
//! complement regardless of the host.

pub mod bigint;
pub mod float;
pub mod int64;
pub mod word32;
pub mod word64;

pub use bigint::BigInt;
pub use int64::Int64;
pub use word64::Word64;

pub(crate) const TWO_PWR_16_DBL: f64 = (1u64 << 16) as f64;
pub(crate) const TWO_PWR_32_DBL: f64 = TWO_PWR_16_DBL * TWO_PWR_16_DBL;
pub(crate) const TWO_PWR_63_DBL: f64 = TWO_PWR_32_DBL * TWO_PWR_32_DBL / 2.0;

/// Splits a word into its high and low 16-bit limbs.
#[inline(always)]
pub(crate) fn limbs(word: i32) -> (u32, u32) {
    let word = word as u32;
    (word >> 16, word & 0xFFFF)
}

/// Reassembles a word from two 16-bit limbs.
#[inline(always)]
pub(crate) fn join_limbs(high: u32, low: u32) -> i32 {
    (((high & 0xFFFF) << 16) | (low & 0xFFFF)) as i32
}

/// Estimate adjustment step used by the quotient refinement loops.
///
/// Estimates above 2^48 lose low bits in the float division, so the
/// correction steps by the magnitude of that error instead of by one.
pub(crate) fn refinement_delta(approx_bits: u32) -> u32 {
    approx_bits.saturating_sub(48)
}
