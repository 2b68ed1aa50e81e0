use pretty_assertions::assert_eq;
use qgolden::input::dummy_bus;
use qgolden::model::loader::{load_params, MemPaths};
use qgolden::{infer, GoldenNetwork, InferenceTrace};

fn fixture_paths() -> MemPaths {
    MemPaths::in_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/regression"))
}

fn recorded_trace() -> InferenceTrace {
    InferenceTrace {
        input_signed: vec![127; 64],
        z1: vec![1977, 1, 645, -3514, -1152, -2196, -2762, 2729],
        a1: vec![1977, 1, 645, 0, 0, 0, 0, 2729],
        hidden: vec![-71, 1, -123, 0, 0, 0, 0, -87],
        z2: vec![-49942, -13899, -28084, 48091, -46940, 98626, -4745, 26204, -27680, 15063],
    }
}

#[test]
fn all_127_reproduces_recorded_trace() {
    let net = GoldenNetwork::load(&fixture_paths()).unwrap();
    let t = net.infer(&dummy_bus()).unwrap();
    assert_eq!(t, recorded_trace());
}

#[test]
fn free_function_matches_engine() {
    let p = load_params(&fixture_paths()).unwrap();
    let t = infer(&dummy_bus(), &p.w1, &p.b1, &p.w2, &p.b2).unwrap();
    assert_eq!(t, recorded_trace());
}

#[test]
fn repeated_inference_is_bit_identical() {
    let net = GoldenNetwork::load(&fixture_paths()).unwrap();
    let before = net.params().clone();
    let mut seed = 0x5eed_u64;
    let bus: Vec<u8> = (0..64).map(|_| { seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1); (seed >> 56) as u8 }).collect();
    let a = net.infer(&bus).unwrap();
    let b = net.infer(&bus).unwrap();
    assert_eq!(a, b);
    assert_eq!(net.params(), &before, "inference must not touch the parameters");
}

#[test]
fn batch_matches_sequential_in_order() {
    let net = GoldenNetwork::load(&fixture_paths()).unwrap();
    let inputs: Vec<Vec<u8>> = (0..32u8).map(|k| (0..64u8).map(|i| i.wrapping_mul(7).wrapping_add(k.wrapping_mul(37))).collect()).collect();
    let batch = net.infer_batch(&inputs).unwrap();
    let seq: Vec<InferenceTrace> = inputs.iter().map(|v| net.infer(v).unwrap()).collect();
    assert_eq!(batch, seq);
}

#[test]
fn batch_rejects_any_short_vector() {
    let net = GoldenNetwork::load(&fixture_paths()).unwrap();
    let inputs = vec![vec![0u8; 64], vec![0u8; 63]];
    assert!(matches!(net.infer_batch(&inputs), Err(qgolden::Error::ShapeMismatch { found: 63, .. })));
}
