use crate::error::Result;
use crate::mem::Matrix;
use crate::model::quant::{relu, signed_input, truncate_signed, vec_mat_bias};
use crate::model::{check_len, check_matrix, check_range, Params, BIAS_BITS, DATA_W, HIDDEN, IN_DIM, OUT, WEIGHT_BITS};
use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Every tensor the hardware pipeline exposes for one bus vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceTrace {
    /// Bus bytes reinterpreted as signed 8-bit.
    pub input_signed: Vec<i64>,
    /// First-layer accumulator before the nonlinearity.
    pub z1: Vec<i64>,
    /// After ReLU, full width.
    pub a1: Vec<i64>,
    /// Low DATA_W bits of `a1` as forwarded on the hidden bus, signed.
    pub hidden: Vec<i64>,
    /// Output logits.
    pub z2: Vec<i64>,
}

/// Runs the fixed pipeline against explicit parameter tensors.
///
/// Shapes are checked before any arithmetic: `input` must hold IN_DIM bytes, `w1` be
/// IN_DIM x HIDDEN, `b1` HIDDEN, `w2` HIDDEN x OUT and `b2` OUT. Weights must fit
/// WEIGHT_BITS and biases BIAS_BITS, which keeps the i64 accumulation exact.
pub fn infer(input: &[u8], w1: &Matrix, b1: &[i64], w2: &Matrix, b2: &[i64]) -> Result<InferenceTrace> {
    check_len("input vector", input, IN_DIM)?;
    check_matrix("W1", w1, IN_DIM, HIDDEN)?;
    check_len("b1", b1, HIDDEN)?;
    check_matrix("W2", w2, HIDDEN, OUT)?;
    check_len("b2", b2, OUT)?;
    check_range("W1", w1.as_slice(), WEIGHT_BITS)?;
    check_range("b1", b1, BIAS_BITS)?;
    check_range("W2", w2.as_slice(), WEIGHT_BITS)?;
    check_range("b2", b2, BIAS_BITS)?;
    Ok(run(input, w1, b1, w2, b2))
}

fn run(input: &[u8], w1: &Matrix, b1: &[i64], w2: &Matrix, b2: &[i64]) -> InferenceTrace {
    let input_signed: Vec<i64> = input.iter().map(|&b| signed_input(b)).collect();
    let z1 = vec_mat_bias(&input_signed, w1, b1);
    let a1: Vec<i64> = z1.iter().map(|&v| relu(v)).collect();
    let hidden: Vec<i64> = a1.iter().map(|&v| truncate_signed(v, DATA_W)).collect();
    let z2 = vec_mat_bias(&hidden, w2, b2);
    InferenceTrace { input_signed, z1, a1, hidden, z2 }
}

/// Golden model of the accelerator: owns an immutable parameter set and evaluates
/// bus vectors against it. Shareable across threads.
#[derive(Debug, Clone)]
pub struct GoldenNetwork {
    params: Params,
}

impl GoldenNetwork {
    pub fn new(params: Params) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &Params { &self.params }

    pub fn infer(&self, input: &[u8]) -> Result<InferenceTrace> {
        check_len("input vector", input, IN_DIM)?;
        let p = &self.params;
        let trace = run(input, &p.w1, &p.b1, &p.w2, &p.b2);
        warn_if_wider_than_i32(&trace);
        Ok(trace)
    }

    /// Evaluates many vectors in parallel; traces come back in input order.
    /// Every vector is shape-checked before any is evaluated.
    pub fn infer_batch<V: AsRef<[u8]> + Sync>(&self, inputs: &[V]) -> Result<Vec<InferenceTrace>> {
        for (i, v) in inputs.iter().enumerate() {
            check_len(&format!("input vector #{i}"), v.as_ref(), IN_DIM)?;
        }
        inputs.par_iter().map(|v| self.infer(v.as_ref())).collect()
    }
}

// The RTL names its accumulators *_int32; anything outside that range will not
// match a 32-bit hardware register even though the golden value is exact.
fn warn_if_wider_than_i32(trace: &InferenceTrace) {
    let fits = |v: &i64| i32::try_from(*v).is_ok();
    if !trace.z1.iter().all(fits) {
        warn!("Z1 exceeds 32-bit accumulator range: {:?}", trace.z1);
    }
    if !trace.z2.iter().all(fits) {
        warn!("Z2 exceeds 32-bit accumulator range: {:?}", trace.z2);
    }
}
