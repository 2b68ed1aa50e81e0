//! Signed memory codec.
//!
//! Every token is parsed as an unsigned hex magnitude, negated when it carries a
//! leading `-`, then wrapped into the two's-complement range of the declared width:
//! `((raw + M) mod 2M) - M` with `M = 2^(W-1)`. The same wrap handles `-1` written as
//! a signed token and `ff` written as an 8-bit pattern.

use super::{signed_range, text_lines, SignedTensor};
use crate::error::{Error, Result};

const ANON: &str = "<memory image>";

/// Decodes an unnamed memory image. See [`decode_named`].
pub fn decode(image: &str, bit_width: u32) -> Result<SignedTensor> {
    decode_named(ANON, image, bit_width)
}

/// Decodes `image` into `bit_width`-bit signed values. Blank lines are skipped and not
/// counted; `resource` only labels parse errors.
pub fn decode_named(resource: &str, image: &str, bit_width: u32) -> Result<SignedTensor> {
    signed_range(bit_width)?;
    let mut values = Vec::new();
    for (i, line) in text_lines(image).enumerate() {
        let token = line.trim();
        if token.is_empty() { continue; }
        let v = decode_token(token, bit_width).map_err(|reason| Error::Parse {
            resource: resource.to_string(),
            line: i + 1,
            token: token.to_string(),
            reason,
        })?;
        values.push(v);
    }
    Ok(SignedTensor::from_decoded(values, bit_width))
}

/// Decodes one trimmed `[-]<hex>` token.
pub(crate) fn decode_token(token: &str, bit_width: u32) -> std::result::Result<i64, String> {
    if !(1..=64).contains(&bit_width) {
        return Err(format!("bit width {bit_width} outside 1..=64"));
    }
    let (negative, digits) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    if digits.is_empty() {
        return Err("no hex digits".into());
    }
    // from_str_radix would also take a '+' sign
    if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(format!("invalid hex digit {c:?}"));
    }
    let magnitude = u128::from_str_radix(digits, 16).map_err(|e| e.to_string())?;
    let magnitude = i128::try_from(magnitude).map_err(|_| "magnitude exceeds 127 bits".to_string())?;
    let raw = if negative { -magnitude } else { magnitude };
    Ok(wrap_signed(raw, bit_width))
}

/// Two's-complement wrap of `raw` into `bit_width` bits.
#[inline]
pub(crate) fn wrap_signed(raw: i128, bit_width: u32) -> i64 {
    let m = 1i128 << (bit_width - 1);
    let v = raw.rem_euclid(2 * m);
    (if v >= m { v - 2 * m } else { v }) as i64
}

/// Hex bit pattern of `value` in `bit_width` bits, zero padded to `ceil(W/4)` digits.
/// Values outside the signed range wrap, matching how the decoder reads them back.
pub fn encode(value: i64, bit_width: u32) -> Result<String> {
    signed_range(bit_width)?;
    let pattern = (value as i128).rem_euclid(1i128 << bit_width);
    let digits = bit_width.div_ceil(4) as usize;
    Ok(format!("{:0digits$x}", pattern))
}
