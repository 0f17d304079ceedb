use std::ops::{Add, Mul, Neg, Sub};

use crate::runtime::error::RuntimeError;

use super::BigInt;
use crate::numeric::{join_limbs, limbs, refinement_delta};

/// Operands below this magnitude multiply exactly in an `f64`.
const FAST_MUL_LIMIT: u32 = 1 << 24;

impl BigInt {
    /// Word-by-word sum over 16-bit limbs, one word longer than the longer
    /// operand so the final carry lands in the sign position.
    pub fn add(&self, other: &BigInt) -> BigInt {
        let len = self.words.len().max(other.words.len());
        let mut words = Vec::with_capacity(len + 1);
        let mut carry = 0u32;
        for i in 0..=len {
            let (a1, a0) = limbs(self.word_at(i));
            let (b1, b0) = limbs(other.word_at(i));
            let c0 = carry + a0 + b0;
            let c1 = (c0 >> 16) + a1 + b1;
            carry = c1 >> 16;
            words.push(join_limbs(c1, c0));
        }
        BigInt::from_bits(&words)
    }

    /// Two's complement: NOT every word, then add one.
    pub fn negate(&self) -> BigInt {
        self.not().add(&BigInt::one())
    }

    pub fn sub(&self, other: &BigInt) -> BigInt {
        self.add(&other.negate())
    }

    pub fn mul(&self, other: &BigInt) -> BigInt {
        if self.is_zero() || other.is_zero() {
            return BigInt::zero();
        }

        match (self.is_negative(), other.is_negative()) {
            (true, true) => return self.negate().mul(&other.negate()),
            (true, false) => return self.negate().mul(other).negate(),
            (false, true) => return self.mul(&other.negate()).negate(),
            (false, false) => {}
        }

        if self.fits_fast_mul() && other.fits_fast_mul() {
            return BigInt::from_f64(self.to_f64() * other.to_f64());
        }

        // Schoolbook product over 16-bit limbs. Each limb slot is carried
        // back under 2^16 right after it is touched, so no slot ever holds
        // more than a limb product plus a limb.
        let len = self.words.len() + other.words.len();
        let mut acc = vec![0u64; 2 * len + 1];
        for i in 0..self.words.len() {
            let (a1, a0) = limbs(self.words[i]);
            let (a1, a0) = (a1 as u64, a0 as u64);
            for j in 0..other.words.len() {
                let (b1, b0) = limbs(other.words[j]);
                let (b1, b0) = (b1 as u64, b0 as u64);
                let base = 2 * i + 2 * j;

                acc[base] += a0 * b0;
                carry16(&mut acc, base);
                acc[base + 1] += a1 * b0;
                carry16(&mut acc, base + 1);
                acc[base + 1] += a0 * b1;
                carry16(&mut acc, base + 1);
                acc[base + 2] += a1 * b1;
                carry16(&mut acc, base + 2);
            }
        }
        for index in 0..acc.len() - 1 {
            carry16(&mut acc, index);
        }

        let words = (0..len)
            .map(|i| join_limbs(acc[2 * i + 1] as u32, acc[2 * i] as u32))
            .collect();
        BigInt::new(words, 0)
    }

    fn fits_fast_mul(&self) -> bool {
        !self.is_negative() && self.words.len() <= 1 && self.word_at_unsigned(0) < FAST_MUL_LIMIT
    }

    /// Truncating quotient (rounds toward zero).
    pub fn quot(&self, other: &BigInt) -> Result<BigInt, RuntimeError> {
        if other.is_zero() {
            log::debug!("BigInt::quot: division by zero");
            return Err(RuntimeError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(BigInt::zero());
        }
        Ok(match (self.is_negative(), other.is_negative()) {
            (true, true) => self.negate().quot_positive(&other.negate()),
            (true, false) => self.negate().quot_positive(other).negate(),
            (false, true) => self.quot_positive(&other.negate()).negate(),
            (false, false) => self.quot_positive(other),
        })
    }

    /// Remainder of [`Self::quot`]; takes the sign of the dividend.
    pub fn rem(&self, other: &BigInt) -> Result<BigInt, RuntimeError> {
        Ok(self.quot_rem(other)?.1)
    }

    pub fn quot_rem(&self, other: &BigInt) -> Result<(BigInt, BigInt), RuntimeError> {
        let quot = self.quot(other)?;
        let rem = self.sub(&quot.mul(other));
        Ok((quot, rem))
    }

    /// Floor quotient (rounds toward negative infinity).
    pub fn div(&self, other: &BigInt) -> Result<BigInt, RuntimeError> {
        Ok(self.div_mod(other)?.0)
    }

    /// Floor modulus; takes the sign of the divisor.
    pub fn modulo(&self, other: &BigInt) -> Result<BigInt, RuntimeError> {
        Ok(self.div_mod(other)?.1)
    }

    pub fn div_mod(&self, other: &BigInt) -> Result<(BigInt, BigInt), RuntimeError> {
        let (quot, rem) = self.quot_rem(other)?;
        if self.is_negative() != other.is_negative() && !rem.is_zero() {
            Ok((quot.sub(&BigInt::one()), rem.add(other)))
        } else {
            Ok((quot, rem))
        }
    }

    /// Quotient of two positive values by repeated estimate-and-correct.
    ///
    /// Each round estimates `rem / divisor` in floating point, walks the
    /// estimate down until `estimate * divisor <= rem`, then subtracts.
    pub(crate) fn quot_positive(&self, divisor: &BigInt) -> BigInt {
        debug_assert!(!self.is_negative() && !divisor.is_negative() && !divisor.is_zero());
        let mut res = BigInt::zero();
        let mut rem = self.clone();
        while rem >= *divisor {
            let mut approx = approx_quotient(&rem, divisor);
            let delta = BigInt::one().shift_left(refinement_delta(approx.bit_length()));
            let mut approx_rem = approx.mul(divisor);
            while approx_rem > rem {
                approx = approx.sub(&delta);
                if approx.is_negative() || approx.is_zero() {
                    approx = BigInt::one();
                    approx_rem = divisor.clone();
                    break;
                }
                approx_rem = approx.mul(divisor);
            }
            res = res.add(&approx);
            rem = rem.sub(&approx_rem);
        }
        res
    }
}

/// Floating estimate of `rem / divisor` for `rem >= divisor > 0`, never below one.
///
/// Both operands are reduced to their top 64 bits first, so the float
/// division stays finite however long the operands are; the binary scale
/// that was dropped is restored with a shift.
fn approx_quotient(rem: &BigInt, divisor: &BigInt) -> BigInt {
    let rem_shift = rem.bit_length().saturating_sub(64);
    let divisor_shift = divisor.bit_length().saturating_sub(64);
    let rem_top = rem.shift_right(rem_shift).to_f64();
    let divisor_top = divisor.shift_right(divisor_shift).to_f64();

    let scale = rem_shift - divisor_shift;
    let lift = scale.min(52);
    let approx = (rem_top / divisor_top * 2f64.powi(lift as i32)).floor().max(1.0);
    BigInt::from_f64(approx).shift_left(scale - lift)
}

/// Moves everything above 16 bits in `acc[index]` into the next slot.
fn carry16(acc: &mut [u64], index: usize) {
    let overflow = acc[index] >> 16;
    if overflow != 0 {
        acc[index + 1] += overflow;
        acc[index] &= 0xFFFF;
    }
}

impl Add for &BigInt {
    type Output = BigInt;

    fn add(self, other: &BigInt) -> BigInt {
        BigInt::add(self, other)
    }
}

impl Sub for &BigInt {
    type Output = BigInt;

    fn sub(self, other: &BigInt) -> BigInt {
        BigInt::sub(self, other)
    }
}

impl Mul for &BigInt {
    type Output = BigInt;

    fn mul(self, other: &BigInt) -> BigInt {
        BigInt::mul(self, other)
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        self.negate()
    }
}
