//! Bus vectors as they appear in testbenches: `[0x10, 0x22, ...]` or plain decimals.

use crate::error::{Error, Result};
use crate::mem::text_lines;
use crate::model::IN_DIM;
use std::fs;
use std::path::Path;

/// Canonical regression stimulus: every input byte is 127.
pub fn dummy_bus() -> Vec<u8> {
    vec![127; IN_DIM]
}

/// Parses one bus vector. Tokens are separated by commas or whitespace, may be wrapped
/// in `[...]`, and are decimal or `0x` hex. Each must fit a byte; the vector must hold
/// exactly IN_DIM of them.
pub fn parse_bus(source: &str, line: usize, text: &str) -> Result<Vec<u8>> {
    let body = text.trim();
    let body = body.strip_prefix('[').unwrap_or(body);
    let body = body.strip_suffix(']').unwrap_or(body);
    let mut out = Vec::with_capacity(IN_DIM);
    for tok in body.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()) {
        out.push(parse_byte(tok).map_err(|reason| Error::Parse {
            resource: source.to_string(),
            line,
            token: tok.to_string(),
            reason,
        })?);
    }
    if out.len() != IN_DIM {
        return Err(Error::shape(format!("{source}:{line} bus vector"), IN_DIM, out.len()));
    }
    Ok(out)
}

fn parse_byte(tok: &str) -> std::result::Result<u8, String> {
    let v = match tok.strip_prefix("0x").or_else(|| tok.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => tok.parse::<i64>(),
    }
    .map_err(|e| e.to_string())?;
    u8::try_from(v).map_err(|_| format!("{v} outside 0..=255"))
}

/// Reads one bus vector per non-blank line; lines starting with `#` are comments.
pub fn read_bus_file(path: &Path) -> Result<Vec<Vec<u8>>> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::ResourceMissing { paths: vec![path.to_path_buf()] },
        _ => Error::io(path, e),
    })?;
    let name = path.display().to_string();
    text_lines(&text)
        .enumerate()
        .filter(|(_, l)| { let t = l.trim(); !t.is_empty() && !t.starts_with('#') })
        .map(|(i, l)| parse_bus(&name, i + 1, l))
        .collect()
}
