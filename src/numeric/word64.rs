//! Unsigned 64-bit integers over the same `(low, high)` word pair as [`Int64`].
//!
//! Wrapping arithmetic and bit operations share [`Int64`]'s bit patterns;
//! ordering, division and right shifts read the pair as unsigned. Division
//! goes through [`BigInt`] so the quotient loop never sees a negative value.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use crate::runtime::error::RuntimeError;

use super::{BigInt, Int64, TWO_PWR_32_DBL};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Word64 {
    low: i32,
    high: i32,
}

impl Word64 {
    pub const ZERO: Word64 = Word64::from_bits(0, 0);
    pub const ONE: Word64 = Word64::from_bits(1, 0);
    pub const MAX_VALUE: Word64 = Word64::from_bits(-1, -1);

    pub const fn from_bits(low: i32, high: i32) -> Word64 {
        Word64 { low, high }
    }

    pub const fn from_u32(value: u32) -> Word64 {
        Word64::from_bits(value as i32, 0)
    }

    pub const fn low_bits(self) -> i32 {
        self.low
    }

    pub const fn high_bits(self) -> i32 {
        self.high
    }

    /// Same bits, read as signed.
    pub fn to_int64(self) -> Int64 {
        Int64::from_bits(self.low, self.high)
    }

    pub fn from_int64(value: Int64) -> Word64 {
        Word64::from_bits(value.low_bits(), value.high_bits())
    }

    pub fn to_u32(self) -> u32 {
        self.low as u32
    }

    pub fn to_f64(self) -> f64 {
        self.high as u32 as f64 * TWO_PWR_32_DBL + self.low as u32 as f64
    }

    pub fn is_zero(self) -> bool {
        self.low == 0 && self.high == 0
    }

    pub fn add(self, other: Word64) -> Word64 {
        Word64::from_int64(self.to_int64().add(other.to_int64()))
    }

    pub fn sub(self, other: Word64) -> Word64 {
        Word64::from_int64(self.to_int64().sub(other.to_int64()))
    }

    pub fn mul(self, other: Word64) -> Word64 {
        Word64::from_int64(self.to_int64().mul(other.to_int64()))
    }

    pub fn quot(self, other: Word64) -> Result<Word64, RuntimeError> {
        let quot = BigInt::from_word64(self).quot(&BigInt::from_word64(other))?;
        Ok(quot.to_word64())
    }

    pub fn rem(self, other: Word64) -> Result<Word64, RuntimeError> {
        let rem = BigInt::from_word64(self).rem(&BigInt::from_word64(other))?;
        Ok(rem.to_word64())
    }

    pub fn and(self, other: Word64) -> Word64 {
        Word64::from_bits(self.low & other.low, self.high & other.high)
    }

    pub fn or(self, other: Word64) -> Word64 {
        Word64::from_bits(self.low | other.low, self.high | other.high)
    }

    pub fn xor(self, other: Word64) -> Word64 {
        Word64::from_bits(self.low ^ other.low, self.high ^ other.high)
    }

    pub fn not(self) -> Word64 {
        Word64::from_bits(!self.low, !self.high)
    }

    /// Bits shifted past position 63 are discarded; amount taken modulo 64.
    pub fn shift_left(self, num_bits: u32) -> Word64 {
        Word64::from_int64(self.to_int64().shift_left(num_bits))
    }

    /// Logical shift; amount taken modulo 64.
    pub fn shift_right(self, num_bits: u32) -> Word64 {
        Word64::from_int64(self.to_int64().shift_right_unsigned(num_bits))
    }
}

impl Ord for Word64 {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.high as u32, self.low as u32).cmp(&(other.high as u32, other.low as u32))
    }
}

impl PartialOrd for Word64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u64> for Word64 {
    fn from(value: u64) -> Self {
        Word64::from_bits(value as i32, (value >> 32) as i32)
    }
}

impl From<Word64> for u64 {
    fn from(value: Word64) -> Self {
        ((value.high as u32 as u64) << 32) | value.low as u32 as u64
    }
}

impl fmt::Display for Word64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u64::from(*self))
    }
}

impl fmt::Debug for Word64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word64({})", u64::from(*self))
    }
}
