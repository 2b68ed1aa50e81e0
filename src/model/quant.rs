//! Integer kernels mirroring the accelerator datapath stage for stage.

/// Bus byte read as signed 8-bit: values >= 128 are negative.
#[inline]
pub fn signed_input(byte: u8) -> i64 {
    let v = byte as i64;
    if v >= 128 { v - 256 } else { v }
}

#[inline]
pub fn relu(acc: i64) -> i64 { acc.max(0) }

/// Keeps the low `width` bits of `acc` and reads them as two's complement.
/// This is a wrap, not a clamp: 128 -> -128, 256 -> 0 for width 8.
#[inline]
pub fn truncate_signed(acc: i64, width: u32) -> i64 {
    debug_assert!((1..=63).contains(&width));
    let mask = (1i64 << width) - 1;
    let raw = acc & mask;
    if raw >= 1i64 << (width - 1) { raw - (1i64 << width) } else { raw }
}

/// Row vector times row-major matrix, plus bias: `out[c] = bias[c] + sum_r x[r] * m[r][c]`.
/// Callers guarantee `x.len() == rows` and `bias.len() == cols`.
pub fn vec_mat_bias(x: &[i64], m: &crate::mem::Matrix, bias: &[i64]) -> Vec<i64> {
    let mut out = bias.to_vec();
    for (r, &xv) in x.iter().enumerate() {
        if xv == 0 { continue; }
        let row = m.row(r);
        for c in 0..out.len() { out[c] += xv * row[c]; }
    }
    out
}
