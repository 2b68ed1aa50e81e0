//! Hardware memory images (`$readmemh`-style, one hex token per line) and the
//! signed tensors decoded from them.

pub mod codec;

pub use codec::{decode, decode_named, encode};

use crate::error::{Error, Result};

/// Decoded memory image: signed values that all fit in `bit_width` bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTensor {
    bit_width: u32,
    values: Vec<i64>,
}

impl SignedTensor {
    /// Wraps already-decoded values, rejecting any that fall outside the signed range.
    pub fn new(values: Vec<i64>, bit_width: u32) -> Result<Self> {
        let (lo, hi) = signed_range(bit_width)?;
        if let Some(i) = values.iter().position(|&v| v < lo || v > hi) {
            return Err(Error::ValueRange { what: "tensor".into(), index: i, value: values[i], bits: bit_width });
        }
        Ok(Self { bit_width, values })
    }

    pub(crate) fn from_decoded(values: Vec<i64>, bit_width: u32) -> Self {
        Self { bit_width, values }
    }

    pub fn bit_width(&self) -> u32 { self.bit_width }
    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
    pub fn values(&self) -> &[i64] { &self.values }

    /// Fails with ShapeMismatch unless the tensor holds exactly `expected` elements.
    pub fn expect_len(self, what: &str, expected: usize) -> Result<Self> {
        if self.values.len() != expected {
            return Err(Error::shape(what, expected, self.values.len()));
        }
        Ok(self)
    }

    pub fn into_vector(self, what: &str, len: usize) -> Result<Vec<i64>> {
        Ok(self.expect_len(what, len)?.values)
    }

    /// Row-major reshape; the flat order is kept as-is.
    pub fn into_matrix(self, what: &str, rows: usize, cols: usize) -> Result<Matrix> {
        let data = self.expect_len(what, rows * cols)?.values;
        Ok(Matrix { rows, cols, data })
    }
}

/// Row-major integer matrix with fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<i64>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize, data: Vec<i64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::shape(format!("{rows}x{cols} matrix"), rows * cols, data.len()));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: vec![0; rows * cols] }
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> i64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols { data.push(f(r, c)); }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn as_slice(&self) -> &[i64] { &self.data }

    #[inline]
    pub fn row(&self, r: usize) -> &[i64] { &self.data[r * self.cols..(r + 1) * self.cols] }
}

/// Splits on `\n`, `\r\n` and a lone `\r`, like universal-newline reads.
pub(crate) fn text_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut rest = Some(text);
    std::iter::from_fn(move || {
        let s = rest.filter(|s| !s.is_empty())?;
        match s.find(|c: char| c == '\r' || c == '\n') {
            Some(i) => {
                let skip = if s[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&s[i + skip..]);
                Some(&s[..i])
            }
            None => {
                rest = None;
                Some(s)
            }
        }
    })
}

/// Inclusive two's-complement range for `bit_width`.
pub fn signed_range(bit_width: u32) -> Result<(i64, i64)> {
    if !(1..=64).contains(&bit_width) {
        return Err(Error::InvalidBitWidth(bit_width));
    }
    let m = 1i128 << (bit_width - 1);
    Ok(((-m) as i64, (m - 1) as i64))
}
