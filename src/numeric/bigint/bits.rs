use std::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

use super::BigInt;

impl BigInt {
    /// Bitwise complement, including the sign word.
    pub fn not(&self) -> BigInt {
        let words = self.words.iter().map(|word| !word).collect();
        BigInt::new(words, !self.sign)
    }

    pub fn and(&self, other: &BigInt) -> BigInt {
        self.zip_words(other, |a, b| a & b)
    }

    pub fn or(&self, other: &BigInt) -> BigInt {
        self.zip_words(other, |a, b| a | b)
    }

    pub fn xor(&self, other: &BigInt) -> BigInt {
        self.zip_words(other, |a, b| a ^ b)
    }

    fn zip_words(&self, other: &BigInt, op: impl Fn(i32, i32) -> i32) -> BigInt {
        let len = self.words.len().max(other.words.len());
        let words = (0..len)
            .map(|i| op(self.word_at(i), other.word_at(i)))
            .collect();
        BigInt::new(words, op(self.sign, other.sign))
    }

    /// Multiplies by `2^num_bits`.
    pub fn shift_left(&self, num_bits: u32) -> BigInt {
        let word_delta = (num_bits >> 5) as usize;
        let bit_delta = num_bits % 32;
        let len = self.words.len() + word_delta + usize::from(bit_delta > 0);
        let words = (0..len)
            .map(|i| {
                let word = self.word_below(i, word_delta);
                if bit_delta > 0 {
                    let carried = self.word_below(i, word_delta + 1) as u32 >> (32 - bit_delta);
                    (word << bit_delta) | carried as i32
                } else {
                    word
                }
            })
            .collect();
        BigInt::new(words, self.sign)
    }

    /// Arithmetic shift: divides by `2^num_bits`, rounding toward negative infinity.
    pub fn shift_right(&self, num_bits: u32) -> BigInt {
        let word_delta = (num_bits >> 5) as usize;
        let bit_delta = num_bits % 32;
        let len = self.words.len().saturating_sub(word_delta);
        let words = (0..len)
            .map(|i| {
                let word = self.word_at(i + word_delta);
                if bit_delta > 0 {
                    let shifted = (word as u32 >> bit_delta) as i32;
                    shifted | (self.word_at(i + word_delta + 1) << (32 - bit_delta))
                } else {
                    word
                }
            })
            .collect();
        BigInt::new(words, self.sign)
    }

    /// Keeps the low `num_bits` bits and sign-extends from the top one,
    /// i.e. reinterprets the value as a `num_bits`-wide signed integer.
    pub fn shorten(&self, num_bits: u32) -> BigInt {
        if num_bits == 0 {
            return BigInt::zero();
        }
        let top_word = ((num_bits - 1) >> 5) as usize;
        let top_bit = (num_bits - 1) % 32;
        let mut words: Vec<i32> = (0..top_word).map(|i| self.word_at(i)).collect();

        let significant: u32 = if top_bit == 31 {
            u32::MAX
        } else {
            (1u32 << (top_bit + 1)) - 1
        };
        let value = self.word_at_unsigned(top_word) & significant;
        if value & (1 << top_bit) != 0 {
            words.push((value | !significant) as i32);
            BigInt::new(words, -1)
        } else {
            words.push(value as i32);
            BigInt::new(words, 0)
        }
    }

    /// Word `index - delta`, or zero below the start of the sequence.
    fn word_below(&self, index: usize, delta: usize) -> i32 {
        index.checked_sub(delta).map_or(0, |i| self.word_at(i))
    }
}

impl BitAnd for &BigInt {
    type Output = BigInt;

    fn bitand(self, other: &BigInt) -> BigInt {
        self.and(other)
    }
}

impl BitOr for &BigInt {
    type Output = BigInt;

    fn bitor(self, other: &BigInt) -> BigInt {
        self.or(other)
    }
}

impl BitXor for &BigInt {
    type Output = BigInt;

    fn bitxor(self, other: &BigInt) -> BigInt {
        self.xor(other)
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        BigInt::not(self)
    }
}

impl Shl<u32> for &BigInt {
    type Output = BigInt;

    fn shl(self, num_bits: u32) -> BigInt {
        self.shift_left(num_bits)
    }
}

impl Shr<u32> for &BigInt {
    type Output = BigInt;

    fn shr(self, num_bits: u32) -> BigInt {
        self.shift_right(num_bits)
    }
}
