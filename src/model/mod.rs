//! Fixed two-layer quantized MLP: constants, parameters, and the golden engine.

pub mod loader;
pub mod network;
pub mod quant;

use crate::error::{Error, Result};
use crate::mem::{signed_range, Matrix, SignedTensor};

pub const IN_DIM: usize = 64;
pub const HIDDEN: usize = 8;
pub const OUT: usize = 10;
/// Width of weights and of the hidden bus between the two layers.
pub const DATA_W: u32 = 8;
pub const WEIGHT_BITS: u32 = 8;
/// Biases are stored as 32-bit words even though the HDL bias path is 40 bits wide.
pub const BIAS_BITS: u32 = 32;

/// Weight/bias set, loaded once and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    /// `IN_DIM x HIDDEN`, row-major.
    pub w1: Matrix,
    pub b1: Vec<i64>,
    /// `HIDDEN x OUT`, row-major.
    pub w2: Matrix,
    pub b2: Vec<i64>,
}

impl Params {
    /// Shape-checks four decoded tensors and reshapes them to the architecture.
    pub fn from_tensors(w1: SignedTensor, b1: SignedTensor, w2: SignedTensor, b2: SignedTensor) -> Result<Self> {
        let p = Self {
            w1: w1.into_matrix("W1", IN_DIM, HIDDEN)?,
            b1: b1.into_vector("b1", HIDDEN)?,
            w2: w2.into_matrix("W2", HIDDEN, OUT)?,
            b2: b2.into_vector("b2", OUT)?,
        };
        p.validate()?;
        Ok(p)
    }

    /// All-zero parameters.
    pub fn zeros() -> Self {
        Self {
            w1: Matrix::zeros(IN_DIM, HIDDEN),
            b1: vec![0; HIDDEN],
            w2: Matrix::zeros(HIDDEN, OUT),
            b2: vec![0; OUT],
        }
    }

    /// Checks shapes and element widths. Host accumulation cannot overflow i64 once
    /// weights fit 8 bits and biases 32 bits.
    pub fn validate(&self) -> Result<()> {
        check_matrix("W1", &self.w1, IN_DIM, HIDDEN)?;
        check_len("b1", &self.b1, HIDDEN)?;
        check_matrix("W2", &self.w2, HIDDEN, OUT)?;
        check_len("b2", &self.b2, OUT)?;
        check_range("W1", self.w1.as_slice(), WEIGHT_BITS)?;
        check_range("b1", &self.b1, BIAS_BITS)?;
        check_range("W2", self.w2.as_slice(), WEIGHT_BITS)?;
        check_range("b2", &self.b2, BIAS_BITS)
    }
}

pub(crate) fn check_matrix(what: &str, m: &Matrix, rows: usize, cols: usize) -> Result<()> {
    if m.rows() != rows || m.cols() != cols {
        return Err(Error::shape(format!("{what} ({}x{}, want {rows}x{cols})", m.rows(), m.cols()), rows * cols, m.rows() * m.cols()));
    }
    Ok(())
}

pub(crate) fn check_len<T>(what: &str, v: &[T], expected: usize) -> Result<()> {
    if v.len() != expected {
        return Err(Error::shape(what, expected, v.len()));
    }
    Ok(())
}

pub(crate) fn check_range(what: &str, values: &[i64], bits: u32) -> Result<()> {
    let (lo, hi) = signed_range(bits)?;
    match values.iter().position(|&v| v < lo || v > hi) {
        Some(index) => Err(Error::ValueRange { what: what.into(), index, value: values[index], bits }),
        None => Ok(()),
    }
}
