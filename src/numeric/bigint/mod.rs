//! Arbitrary-precision two's-complement integers.
//!
//! A [`BigInt`] is a little-endian sequence of 32-bit words followed by an
//! implicit, infinitely repeated sign word (`0` or `-1`). The explicit
//! sequence is always canonical: it never ends in a word equal to the sign
//! word, so every integer has exactly one representation.
//!
//! Values are immutable and cheap to clone (the word buffer is shared).

use std::{cmp::Ordering, fmt, hash, rc::Rc};

use serde::{Deserialize, Serialize};

mod arith;
mod bits;
mod convert;


#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "BigIntRepr", into = "BigIntRepr")]
pub struct BigInt {
    words: Rc<[i32]>,
    sign: i32,
}

/// Wire shape: explicit words plus the sign-extension word.
#[derive(Serialize, Deserialize)]
struct BigIntRepr {
    words: Vec<i32>,
    sign: i32,
}

impl From<BigIntRepr> for BigInt {
    fn from(repr: BigIntRepr) -> Self {
        BigInt::new(repr.words, if repr.sign < 0 { -1 } else { 0 })
    }
}

impl From<BigInt> for BigIntRepr {
    fn from(value: BigInt) -> Self {
        BigIntRepr {
            words: value.words.to_vec(),
            sign: value.sign,
        }
    }
}

#[cfg(feature = "small-int-cache")]
const CACHE_MIN: i32 = -128;
#[cfg(feature = "small-int-cache")]
const CACHE_MAX: i32 = 128;

#[cfg(feature = "small-int-cache")]
thread_local! {
    static SMALL_INTS: Vec<BigInt> = (CACHE_MIN..CACHE_MAX).map(BigInt::from_i32_uncached).collect();
}

impl BigInt {
    /// Builds a canonical value from explicit words and a sign word.
    ///
    /// Trailing words equal to `sign` are dropped.
    pub(crate) fn new(mut words: Vec<i32>, sign: i32) -> Self {
        debug_assert!(sign == 0 || sign == -1);
        while words.last() == Some(&sign) {
            words.pop();
        }
        Self {
            words: words.into(),
            sign,
        }
    }

    pub fn zero() -> Self {
        Self::from_i32(0)
    }

    pub fn one() -> Self {
        Self::from_i32(1)
    }

    pub fn from_i32(value: i32) -> Self {
        #[cfg(feature = "small-int-cache")]
        {
            if (CACHE_MIN..CACHE_MAX).contains(&value) {
                return SMALL_INTS.with(|cache| cache[(value - CACHE_MIN) as usize].clone());
            }
        }
        Self::from_i32_uncached(value)
    }

    fn from_i32_uncached(value: i32) -> Self {
        Self::new(vec![value], if value < 0 { -1 } else { 0 })
    }

    pub fn from_u32(value: u32) -> Self {
        Self::new(vec![value as i32], 0)
    }

    pub fn from_i64(value: i64) -> Self {
        if let Ok(small) = i32::try_from(value) {
            return Self::from_i32(small);
        }
        Self::new(
            vec![value as i32, (value >> 32) as i32],
            if value < 0 { -1 } else { 0 },
        )
    }

    pub fn from_u64(value: u64) -> Self {
        Self::new(vec![value as i32, (value >> 32) as i32], 0)
    }

    /// Builds a value from little-endian words; the top bit of the last
    /// word decides the sign. An empty slice is zero.
    pub fn from_bits(words: &[i32]) -> Self {
        let sign = match words.last() {
            Some(&high) if high < 0 => -1,
            _ => 0,
        };
        Self::new(words.to_vec(), sign)
    }

    /// Word `index` of the conceptually infinite two's-complement sequence.
    pub fn word_at(&self, index: usize) -> i32 {
        self.words.get(index).copied().unwrap_or(self.sign)
    }

    /// Like [`Self::word_at`] but reinterpreted as unsigned.
    pub fn word_at_unsigned(&self, index: usize) -> u32 {
        self.word_at(index) as u32
    }

    /// The explicit (canonical) words, least significant first.
    pub fn words(&self) -> &[i32] {
        &self.words
    }

    /// The sign-extension word: `0` or `-1`.
    pub fn sign_word(&self) -> i32 {
        self.sign
    }

    pub fn is_zero(&self) -> bool {
        self.sign == 0 && self.words.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.sign == -1
    }

    pub fn is_odd(&self) -> bool {
        self.word_at(0) & 1 != 0
    }

    /// Number of significant bits of a non-negative value (0 for zero).
    pub(crate) fn bit_length(&self) -> u32 {
        debug_assert!(!self.is_negative());
        match self.words.last() {
            None => 0,
            Some(&top) => 32 * (self.words.len() as u32 - 1) + (32 - (top as u32).leading_zeros()),
        }
    }

    pub fn compare_i32(&self, other: i32) -> Ordering {
        self.cmp(&Self::from_i32(other))
    }

    pub fn signum(&self) -> Self {
        match self.cmp(&Self::zero()) {
            Ordering::Greater => Self::one(),
            Ordering::Less => Self::from_i32(-1),
            Ordering::Equal => Self::zero(),
        }
    }

    pub fn abs(&self) -> Self {
        if self.is_negative() {
            self.negate()
        } else {
            self.clone()
        }
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        if self.sign != other.sign {
            return false;
        }
        let len = self.words.len().max(other.words.len());
        (0..len).all(|i| self.word_at(i) == other.word_at(i))
    }
}

impl Eq for BigInt {}

impl hash::Hash for BigInt {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.sign.hash(state);
        self.words.hash(state);
    }
}

impl Ord for BigInt {
    /// Sign first; with equal signs the words are compared as unsigned
    /// from the most significant position down.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
        let len = self.words.len().max(other.words.len());
        for i in (0..len).rev() {
            match self.word_at_unsigned(i).cmp(&other.word_at_unsigned(i)) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for BigInt {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({})", self)
    }
}

impl From<i32> for BigInt {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl From<i64> for BigInt {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}
