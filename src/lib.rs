// Golden reference model for the quantized two-layer MLP accelerator
pub mod error;
pub mod mem;
pub mod model;
pub mod pack;
pub mod input;
pub mod report;

pub use error::{Error, Result};
pub use model::network::{infer, GoldenNetwork, InferenceTrace};
pub use model::Params;
