//! Golden-output reports: console text for pasting into a testbench, and JSON lines.

use crate::model::network::InferenceTrace;
use serde::Serialize;
use std::fmt::Write as _;

/// One labelled trace, as written per line in batch mode.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenRecord<'a> {
    pub label: String,
    pub bus: &'a [u8],
    #[serde(flatten)]
    pub trace: &'a InferenceTrace,
}

/// `[1, -2, 3]`
pub fn format_list(values: &[i64]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

pub fn render_text(title: &str, trace: &InferenceTrace) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "=== GOLDEN {title} ===");
    let _ = writeln!(s, "Signed input (Xq_signed):");
    let _ = writeln!(s, "{}", format_list(&trace.input_signed));
    let _ = writeln!(s, "\nHidden pre-accum (Z1_int32):");
    let _ = writeln!(s, "{}", format_list(&trace.z1));
    let _ = writeln!(s, "\nHidden post-ReLU (A1_int32):");
    let _ = writeln!(s, "{}", format_list(&trace.a1));
    let _ = writeln!(s, "\nHidden outputs seen by RTL (signed 8-bit):");
    let _ = writeln!(s, "{}", format_list(&trace.hidden));
    let _ = writeln!(s, "\nFinal integer logits (Z2_int32) -- paste these into your testbench as expected values:");
    let _ = writeln!(s, "{}", format_list(&trace.z2));
    s
}

pub fn to_json(trace: &InferenceTrace) -> serde_json::Result<String> {
    serde_json::to_string_pretty(trace)
}

pub fn to_json_line(record: &GoldenRecord<'_>) -> serde_json::Result<String> {
    serde_json::to_string(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InferenceTrace {
        InferenceTrace {
            input_signed: vec![127, -1],
            z1: vec![-5, 300],
            a1: vec![0, 300],
            hidden: vec![0, 44],
            z2: vec![1, 2],
        }
    }

    #[test]
    fn list_format_matches_python_repr() {
        assert_eq!(format_list(&[1, -2, 3]), "[1, -2, 3]");
        assert_eq!(format_list(&[]), "[]");
    }

    #[test]
    fn text_report_sections_in_pipeline_order() {
        let s = render_text("(DUMMY) TEST", &sample());
        let z1 = s.find("Z1_int32").unwrap();
        let a1 = s.find("A1_int32").unwrap();
        let hw = s.find("seen by RTL").unwrap();
        let z2 = s.find("Z2_int32").unwrap();
        assert!(z1 < a1 && a1 < hw && hw < z2);
        assert!(s.contains("[0, 44]"));
    }

    #[test]
    fn json_line_flattens_trace() {
        let t = sample();
        let rec = GoldenRecord { label: "v0".into(), bus: &[127, 255], trace: &t };
        let v: serde_json::Value = serde_json::from_str(&to_json_line(&rec).unwrap()).unwrap();
        assert_eq!(v["label"], "v0");
        assert_eq!(v["hidden"][1], 44);
        assert_eq!(v["z2"], serde_json::json!([1, 2]));
    }
}
