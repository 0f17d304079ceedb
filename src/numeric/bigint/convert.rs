use std::{fmt, str::FromStr};

use crate::numeric::{Int64, TWO_PWR_32_DBL, Word64, float, word32::to_int32};
use crate::runtime::error::RuntimeError;

use super::BigInt;

/// Digits per group when parsing: `radix^8` stays below 2^53 for every radix.
const PARSE_GROUP: usize = 8;
/// Digits per group when printing: `radix^6` fits an unsigned word.
const PRINT_GROUP: u32 = 6;

impl BigInt {
    /// Truncates toward zero; NaN and infinities become zero.
    pub fn from_f64(value: f64) -> BigInt {
        if !value.is_finite() {
            return BigInt::zero();
        }
        if value < 0.0 {
            return BigInt::from_f64(-value).negate();
        }
        let mut words = Vec::new();
        let mut pow = 1.0;
        while value >= pow {
            words.push(to_int32(value / pow));
            pow *= TWO_PWR_32_DBL;
        }
        BigInt::new(words, 0)
    }

    /// Nearest double (large magnitudes saturate to infinity).
    pub fn to_f64(&self) -> f64 {
        if self.is_negative() {
            return -self.negate().to_f64();
        }
        let mut value = 0.0;
        let mut pow = 1.0;
        for i in 0..self.words.len() {
            value += self.word_at_unsigned(i) as f64 * pow;
            pow *= TWO_PWR_32_DBL;
        }
        value
    }

    /// Lowest word, i.e. the value modulo 2^32 as a signed word.
    pub fn to_i32(&self) -> i32 {
        self.word_at(0)
    }

    pub fn to_u32(&self) -> u32 {
        self.word_at_unsigned(0)
    }

    /// `a / b` as a double.
    pub fn from_rat(numerator: &BigInt, denominator: &BigInt) -> f64 {
        numerator.to_f64() / denominator.to_f64()
    }

    /// Exact `(mantissa, exponent)` with `value == mantissa * 2^exponent`.
    pub fn decode_double(value: f64) -> (BigInt, i32) {
        let decoded = float::decode_double(value);
        let mantissa =
            BigInt::new(vec![decoded.mantissa_low as i32, decoded.mantissa_high as i32], 0);
        let mantissa = if decoded.sign < 0 {
            mantissa.negate()
        } else {
            mantissa
        };
        (mantissa, decoded.exponent)
    }

    /// Low two words reinterpreted as a signed 64-bit value.
    pub fn to_int64(&self) -> Int64 {
        Int64::from_bits(self.word_at(0), self.word_at(1))
    }

    pub fn from_int64(value: Int64) -> BigInt {
        BigInt::from_bits(&[value.low_bits(), value.high_bits()])
    }

    /// The value reduced modulo 2^64.
    pub fn to_word64(&self) -> Word64 {
        Word64::from_bits(self.word_at(0), self.word_at(1))
    }

    pub fn from_word64(value: Word64) -> BigInt {
        BigInt::new(vec![value.low_bits(), value.high_bits()], 0)
    }

    /// Parses an optionally `-`-prefixed digit string in `radix` (2..=36).
    ///
    /// Digits are consumed eight at a time; each group is folded in as
    /// `result * radix^size + group`.
    pub fn from_str_radix(text: &str, radix: u32) -> Result<BigInt, RuntimeError> {
        if !(2..=36).contains(&radix) {
            return Err(RuntimeError::RadixOutOfRange(radix));
        }
        if text.is_empty() {
            return Err(RuntimeError::EmptyNumber);
        }
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        if digits.contains('-') {
            return Err(RuntimeError::InteriorMinus);
        }
        if digits.is_empty() {
            return Err(RuntimeError::EmptyNumber);
        }

        let values = digits
            .chars()
            .map(|digit| {
                digit
                    .to_digit(radix)
                    .ok_or(RuntimeError::InvalidDigit { digit, radix })
            })
            .collect::<Result<Vec<u32>, RuntimeError>>()?;

        let full_power = BigInt::from_u64((radix as u64).pow(PARSE_GROUP as u32));
        let mut result = BigInt::zero();
        for group in values.chunks(PARSE_GROUP) {
            let value = group
                .iter()
                .fold(0u64, |acc, &digit| acc * radix as u64 + digit as u64);
            let power = if group.len() == PARSE_GROUP {
                full_power.clone()
            } else {
                BigInt::from_u64((radix as u64).pow(group.len() as u32))
            };
            result = result.mul(&power).add(&BigInt::from_u64(value));
        }

        Ok(if negative { result.negate() } else { result })
    }

    /// Renders in `radix` (2..=36) with lowercase digits.
    ///
    /// Peels off `radix^6` at a time, so decimal output is produced in
    /// zero-padded groups of six digits.
    pub fn to_string_radix(&self, radix: u32) -> Result<String, RuntimeError> {
        if !(2..=36).contains(&radix) {
            return Err(RuntimeError::RadixOutOfRange(radix));
        }
        if self.is_zero() {
            return Ok("0".to_string());
        }
        if self.is_negative() {
            return Ok(format!("-{}", self.negate().to_string_radix(radix)?));
        }

        let group_power = BigInt::from_u32(radix.pow(PRINT_GROUP));
        let mut rem = self.clone();
        let mut groups = Vec::new();
        loop {
            let next = rem.quot_positive(&group_power);
            let group = rem.sub(&next.mul(&group_power)).to_u32();
            rem = next;
            if rem.is_zero() {
                let mut out = format_word(group, radix, 0);
                for group in groups.iter().rev() {
                    out.push_str(&format_word(*group, radix, PRINT_GROUP as usize));
                }
                return Ok(out);
            }
            groups.push(group);
        }
    }
}

/// Formats one group, left-padded with zeros to `width`.
fn format_word(mut value: u32, radix: u32, width: usize) -> String {
    let mut digits = Vec::new();
    while value > 0 {
        // `from_digit` only fails for digits >= radix.
        digits.push(char::from_digit(value % radix, radix).unwrap_or('?'));
        value /= radix;
    }
    while digits.len() < width.max(1) {
        digits.push('0');
    }
    digits.iter().rev().collect()
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_string_radix(10) {
            Ok(text) => f.write_str(&text),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl FromStr for BigInt {
    type Err = RuntimeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        BigInt::from_str_radix(text, 10)
    }
}
