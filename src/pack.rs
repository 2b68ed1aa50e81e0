//! Repacks the node-major W1 image into one line per hidden node for the
//! `hidden_weight[0:HIDDEN-1]` memory in the RTL.

use crate::error::{Error, Result};
use crate::mem::text_lines;
use crate::model::{HIDDEN, IN_DIM};
use log::info;
use std::fs;
use std::path::Path;

pub const PACKED_W1_FILE: &str = "W1_q_packed.mem";

/// Returns `HIDDEN` lines; line `i` concatenates the `IN_DIM` tokens of node `i` in
/// input order, so the first weight lands in the most significant digits.
pub fn pack_w1(resource: &str, image: &str) -> Result<Vec<String>> {
    let tokens: Vec<&str> = text_lines(image).map(str::trim).filter(|l| !l.is_empty()).collect();
    if tokens.len() != IN_DIM * HIDDEN {
        return Err(Error::PackingSize { resource: resource.to_string(), expected: IN_DIM * HIDDEN, found: tokens.len() });
    }
    Ok(tokens.chunks(IN_DIM).map(|node| node.concat()).collect())
}

/// Packs `input` into `output`; returns the number of lines written.
pub fn pack_file(input: &Path, output: &Path) -> Result<usize> {
    let image = fs::read_to_string(input).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::ResourceMissing { paths: vec![input.to_path_buf()] },
        _ => Error::io(input, e),
    })?;
    let lines = pack_w1(&input.display().to_string(), &image)?;
    let mut text = String::new();
    for l in &lines {
        text.push_str(l);
        text.push('\n');
    }
    fs::write(output, text).map_err(|e| Error::io(output, e))?;
    info!("packed {} lines into {}", lines.len(), output.display());
    Ok(lines.len())
}
