//! Signed 64-bit integers as a pair of 32-bit words.
//!
//! `value = high * 2^32 + (low as unsigned)`. All arithmetic wraps modulo
//! 2^64. Negating or dividing [`Int64::MIN_VALUE`] by `-1` yields
//! `MIN_VALUE` again: two's complement has no positive counterpart for it.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use crate::runtime::error::RuntimeError;

use super::{TWO_PWR_32_DBL, TWO_PWR_63_DBL, join_limbs, limbs, refinement_delta, word32::to_int32};

const FAST_MUL_LIMIT: Int64 = Int64::from_bits(1 << 24, 0);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Int64 {
    low: i32,
    high: i32,
}

impl Int64 {
    pub const ZERO: Int64 = Int64::from_bits(0, 0);
    pub const ONE: Int64 = Int64::from_bits(1, 0);
    pub const NEG_ONE: Int64 = Int64::from_bits(-1, -1);
    pub const MAX_VALUE: Int64 = Int64::from_bits(-1, i32::MAX);
    pub const MIN_VALUE: Int64 = Int64::from_bits(0, i32::MIN);

    pub const fn from_bits(low: i32, high: i32) -> Int64 {
        Int64 { low, high }
    }

    pub const fn from_i32(value: i32) -> Int64 {
        Int64::from_bits(value, if value < 0 { -1 } else { 0 })
    }

    /// Truncates toward zero, saturating at the representable range.
    /// NaN and infinities become zero.
    pub fn from_f64(value: f64) -> Int64 {
        if !value.is_finite() {
            Int64::ZERO
        } else if value <= -TWO_PWR_63_DBL {
            Int64::MIN_VALUE
        } else if value + 1.0 >= TWO_PWR_63_DBL {
            Int64::MAX_VALUE
        } else if value < 0.0 {
            Int64::from_f64(-value).negate()
        } else {
            Int64::from_bits(
                to_int32(value % TWO_PWR_32_DBL),
                to_int32(value / TWO_PWR_32_DBL),
            )
        }
    }

    pub const fn low_bits(self) -> i32 {
        self.low
    }

    pub const fn high_bits(self) -> i32 {
        self.high
    }

    pub fn low_bits_unsigned(self) -> u32 {
        self.low as u32
    }

    pub fn to_i32(self) -> i32 {
        self.low
    }

    pub fn to_f64(self) -> f64 {
        self.high as f64 * TWO_PWR_32_DBL + self.low_bits_unsigned() as f64
    }

    pub fn is_zero(self) -> bool {
        self.high == 0 && self.low == 0
    }

    pub fn is_negative(self) -> bool {
        self.high < 0
    }

    pub fn is_odd(self) -> bool {
        self.low & 1 == 1
    }

    pub fn not(self) -> Int64 {
        Int64::from_bits(!self.low, !self.high)
    }

    /// `MIN_VALUE.negate() == MIN_VALUE`.
    pub fn negate(self) -> Int64 {
        if self == Int64::MIN_VALUE {
            Int64::MIN_VALUE
        } else {
            self.not().add(Int64::ONE)
        }
    }

    pub fn add(self, other: Int64) -> Int64 {
        let (a48, a32) = limbs(self.high);
        let (a16, a00) = limbs(self.low);
        let (b48, b32) = limbs(other.high);
        let (b16, b00) = limbs(other.low);

        let mut c00 = a00 + b00;
        let mut c16 = c00 >> 16;
        c00 &= 0xFFFF;
        c16 += a16 + b16;
        let mut c32 = c16 >> 16;
        c16 &= 0xFFFF;
        c32 += a32 + b32;
        let mut c48 = c32 >> 16;
        c32 &= 0xFFFF;
        c48 += a48 + b48;
        Int64::from_bits(join_limbs(c16, c00), join_limbs(c48, c32))
    }

    pub fn sub(self, other: Int64) -> Int64 {
        self.add(other.negate())
    }

    pub fn mul(self, other: Int64) -> Int64 {
        if self.is_zero() || other.is_zero() {
            return Int64::ZERO;
        }

        if self == Int64::MIN_VALUE {
            return if other.is_odd() { Int64::MIN_VALUE } else { Int64::ZERO };
        } else if other == Int64::MIN_VALUE {
            return if self.is_odd() { Int64::MIN_VALUE } else { Int64::ZERO };
        }

        match (self.is_negative(), other.is_negative()) {
            (true, true) => return self.negate().mul(other.negate()),
            (true, false) => return self.negate().mul(other).negate(),
            (false, true) => return self.mul(other.negate()).negate(),
            (false, false) => {}
        }

        if self < FAST_MUL_LIMIT && other < FAST_MUL_LIMIT {
            return Int64::from_f64(self.to_f64() * other.to_f64());
        }

        let (a48, a32) = limbs(self.high);
        let (a16, a00) = limbs(self.low);
        let (b48, b32) = limbs(other.high);
        let (b16, b00) = limbs(other.low);

        // Limb products are below 2^32 and each slot is carried before the
        // next product lands, so u64 slots never overflow. Products that only
        // reach bits 64 and above are dropped.
        let (a48, a32, a16, a00) = (a48 as u64, a32 as u64, a16 as u64, a00 as u64);
        let (b48, b32, b16, b00) = (b48 as u64, b32 as u64, b16 as u64, b00 as u64);

        let mut c00 = a00 * b00;
        let mut c16 = c00 >> 16;
        c00 &= 0xFFFF;
        c16 += a16 * b00;
        let mut c32 = c16 >> 16;
        c16 &= 0xFFFF;
        c16 += a00 * b16;
        c32 += c16 >> 16;
        c16 &= 0xFFFF;
        c32 += a32 * b00;
        let mut c48 = c32 >> 16;
        c32 &= 0xFFFF;
        c32 += a16 * b16;
        c48 += c32 >> 16;
        c32 &= 0xFFFF;
        c32 += a00 * b32;
        c48 += c32 >> 16;
        c32 &= 0xFFFF;
        c48 = c48.wrapping_add(
            (a48 * b00)
                .wrapping_add(a32 * b16)
                .wrapping_add(a16 * b32)
                .wrapping_add(a00 * b48),
        );
        Int64::from_bits(
            join_limbs(c16 as u32, c00 as u32),
            join_limbs(c48 as u32, c32 as u32),
        )
    }

    /// Truncating quotient. `MIN_VALUE / -1` wraps to `MIN_VALUE`.
    pub fn quot(self, other: Int64) -> Result<Int64, RuntimeError> {
        if other.is_zero() {
            log::debug!("Int64::quot: division by zero");
            return Err(RuntimeError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Int64::ZERO);
        }

        if self == Int64::MIN_VALUE {
            if other == Int64::ONE || other == Int64::NEG_ONE {
                return Ok(Int64::MIN_VALUE);
            }
            if other == Int64::MIN_VALUE {
                return Ok(Int64::ONE);
            }
            // |MIN_VALUE| is not representable: halve, divide, double, then
            // divide what is left over.
            let approx = self.shift_right(1).quot(other)?.shift_left(1);
            if approx.is_zero() {
                return Ok(if other.is_negative() {
                    Int64::ONE
                } else {
                    Int64::NEG_ONE
                });
            }
            let rem = self.sub(other.mul(approx));
            return Ok(approx.add(rem.quot(other)?));
        }
        if other == Int64::MIN_VALUE {
            return Ok(Int64::ZERO);
        }

        Ok(match (self.is_negative(), other.is_negative()) {
            (true, true) => self.negate().quot_positive(other.negate()),
            (true, false) => self.negate().quot_positive(other).negate(),
            (false, true) => self.quot_positive(other.negate()).negate(),
            (false, false) => self.quot_positive(other),
        })
    }

    fn quot_positive(self, other: Int64) -> Int64 {
        let mut res = Int64::ZERO;
        let mut rem = self;
        while rem >= other {
            let mut approx = (rem.to_f64() / other.to_f64()).floor().max(1.0);
            let bits = 64 - (approx as u64).leading_zeros();
            let delta = 2f64.powi(refinement_delta(bits) as i32);

            let mut approx_res = Int64::from_f64(approx);
            let mut approx_rem = approx_res.mul(other);
            while approx_rem.is_negative() || approx_rem > rem {
                approx -= delta;
                if approx < 1.0 {
                    break;
                }
                approx_res = Int64::from_f64(approx);
                approx_rem = approx_res.mul(other);
            }

            if approx < 1.0 {
                approx_res = Int64::ONE;
                approx_rem = other;
            }

            res = res.add(approx_res);
            rem = rem.sub(approx_rem);
        }
        res
    }

    /// Remainder of [`Self::quot`]; takes the sign of the dividend.
    pub fn rem(self, other: Int64) -> Result<Int64, RuntimeError> {
        Ok(self.sub(self.quot(other)?.mul(other)))
    }

    /// Floor quotient.
    pub fn div(self, other: Int64) -> Result<Int64, RuntimeError> {
        let quot = self.quot(other)?;
        let rem = self.sub(quot.mul(other));
        if self.is_negative() != other.is_negative() && !rem.is_zero() {
            Ok(quot.sub(Int64::ONE))
        } else {
            Ok(quot)
        }
    }

    /// Floor modulus; takes the sign of the divisor.
    pub fn modulo(self, other: Int64) -> Result<Int64, RuntimeError> {
        let rem = self.rem(other)?;
        if self.is_negative() != other.is_negative() && !rem.is_zero() {
            Ok(rem.add(other))
        } else {
            Ok(rem)
        }
    }

    pub fn and(self, other: Int64) -> Int64 {
        Int64::from_bits(self.low & other.low, self.high & other.high)
    }

    pub fn or(self, other: Int64) -> Int64 {
        Int64::from_bits(self.low | other.low, self.high | other.high)
    }

    pub fn xor(self, other: Int64) -> Int64 {
        Int64::from_bits(self.low ^ other.low, self.high ^ other.high)
    }

    /// Shift amount is taken modulo 64.
    pub fn shift_left(self, num_bits: u32) -> Int64 {
        let num_bits = num_bits & 63;
        if num_bits == 0 {
            self
        } else if num_bits < 32 {
            Int64::from_bits(
                self.low << num_bits,
                (self.high << num_bits) | (self.low as u32 >> (32 - num_bits)) as i32,
            )
        } else {
            Int64::from_bits(0, self.low << (num_bits - 32))
        }
    }

    /// Arithmetic shift; amount taken modulo 64.
    pub fn shift_right(self, num_bits: u32) -> Int64 {
        let num_bits = num_bits & 63;
        if num_bits == 0 {
            self
        } else if num_bits < 32 {
            Int64::from_bits(
                (self.low as u32 >> num_bits) as i32 | (self.high << (32 - num_bits)),
                self.high >> num_bits,
            )
        } else {
            Int64::from_bits(
                self.high >> (num_bits - 32),
                if self.high >= 0 { 0 } else { -1 },
            )
        }
    }

    /// Logical shift; amount taken modulo 64.
    pub fn shift_right_unsigned(self, num_bits: u32) -> Int64 {
        let num_bits = num_bits & 63;
        let high = self.high as u32;
        if num_bits == 0 {
            self
        } else if num_bits < 32 {
            Int64::from_bits(
                (self.low as u32 >> num_bits) as i32 | (self.high << (32 - num_bits)),
                (high >> num_bits) as i32,
            )
        } else {
            Int64::from_bits((high >> (num_bits - 32)) as i32, 0)
        }
    }
}

impl Ord for Int64 {
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            // Same sign: the difference cannot overflow.
            _ if self.sub(*other).is_negative() => Ordering::Less,
            _ => Ordering::Greater,
        }
    }
}

impl PartialOrd for Int64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i64> for Int64 {
    fn from(value: i64) -> Self {
        Int64::from_bits(value as i32, (value >> 32) as i32)
    }
}

impl From<Int64> for i64 {
    fn from(value: Int64) -> Self {
        ((value.high as i64) << 32) | value.low as u32 as i64
    }
}

impl fmt::Display for Int64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", i64::from(*self))
    }
}

impl fmt::Debug for Int64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Int64({})", i64::from(*self))
    }
}
