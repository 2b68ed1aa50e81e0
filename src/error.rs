//! Error types shared by the codec, loader, engine and packer.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more required memory images could not be located.
    #[error("missing memory image(s): {}", display_paths(.paths))]
    ResourceMissing { paths: Vec<PathBuf> },

    /// A line is not optionally-signed hexadecimal (or a bus token is not a byte).
    #[error("{resource}:{line}: cannot parse {token:?}: {reason}")]
    Parse {
        resource: String,
        line: usize,
        token: String,
        reason: String,
    },

    /// A tensor or input vector has the wrong number of elements.
    #[error("{what}: expected {expected} elements, found {found}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    /// The packer input does not hold exactly IN_DIM * HIDDEN weights.
    #[error("{resource}: expected {expected} lines to pack, got {found}")]
    PackingSize {
        resource: String,
        expected: usize,
        found: usize,
    },

    /// A value does not fit the signed range of its declared width.
    #[error("{what}[{index}] = {value} does not fit in {bits} signed bits")]
    ValueRange {
        what: String,
        index: usize,
        value: i64,
        bits: u32,
    },

    #[error("bit width {0} outside supported range 1..=64")]
    InvalidBitWidth(u32),

    #[error("i/o on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn shape(what: impl Into<String>, expected: usize, found: usize) -> Self {
        Error::ShapeMismatch { what: what.into(), expected, found }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_names_resource_and_counts() {
        let e = Error::shape("b1_q.mem", 8, 7);
        assert_eq!(e.to_string(), "b1_q.mem: expected 8 elements, found 7");
    }

    #[test]
    fn missing_lists_every_path() {
        let e = Error::ResourceMissing { paths: vec!["a/W1_q.mem".into(), "a/b2_q.mem".into()] };
        assert_eq!(e.to_string(), "missing memory image(s): a/W1_q.mem, a/b2_q.mem");
    }
}
