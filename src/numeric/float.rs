//! Decomposition of host floats into exact integer parts.

/// A double split into sign, 53-bit mantissa (as two words) and base-2 exponent.
///
/// `value == sign * (mantissa_high * 2^32 + mantissa_low) * 2^exponent`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedDouble {
    pub sign: i32,
    pub mantissa_high: u32,
    pub mantissa_low: u32,
    pub exponent: i32,
}

/// Splits a single-precision float into a signed 24-bit mantissa and an exponent.
///
/// Zero decodes to `(0, 0)`; subnormals carry no hidden bit.
pub fn decode_float(value: f32) -> (i32, i32) {
    if value == 0.0 {
        return (0, 0);
    }
    let bits = value.to_bits();
    let sign = if value.is_sign_negative() { -1 } else { 1 };
    let biased = ((bits >> 23) & 0xFF) as i32;
    let mut mantissa = (bits & 0x7F_FFFF) as i32;
    let exponent = if biased == 0 {
        1 - 150
    } else {
        mantissa |= 1 << 23;
        biased - 150
    };
    (sign * mantissa, exponent)
}

pub fn decode_double(value: f64) -> DecodedDouble {
    let sign = if value.is_sign_negative() { -1 } else { 1 };
    if value == 0.0 {
        return DecodedDouble {
            sign,
            mantissa_high: 0,
            mantissa_low: 0,
            exponent: 0,
        };
    }
    let bits = value.to_bits();
    let high = (bits >> 32) as u32;
    let mantissa_low = bits as u32;
    let mut mantissa_high = high & 0xF_FFFF;
    let biased = ((high >> 20) & 0x7FF) as i32;
    let exponent = if biased == 0 {
        1 - 1075
    } else {
        mantissa_high |= 1 << 20;
        biased - 1075
    };
    DecodedDouble {
        sign,
        mantissa_high,
        mantissa_low,
        exponent,
    }
}

/// `mantissa * 2^exponent`.
pub fn encode_double(mantissa: f64, exponent: i32) -> f64 {
    // Split the scale so neither factor overflows before the product
    // settles into range (subnormal results need exponents below -1022).
    let half = exponent / 2;
    mantissa * 2f64.powi(half) * 2f64.powi(exponent - half)
}
