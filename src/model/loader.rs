use crate::error::{Error, Result};
use crate::mem::{decode_named, encode, SignedTensor};
use crate::model::network::GoldenNetwork;
use crate::model::{Params, BIAS_BITS, HIDDEN, IN_DIM, OUT, WEIGHT_BITS};
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const W1_FILE: &str = "W1_q.mem";
pub const B1_FILE: &str = "b1_q.mem";
pub const W2_FILE: &str = "W2_q.mem";
pub const B2_FILE: &str = "b2_q.mem";
/// Environment fallback for the memory image directory.
pub const MEM_DIR_ENV: &str = "QGOLDEN_MEM_DIR";

/// Locations of the four memory images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemPaths {
    pub w1: PathBuf,
    pub b1: PathBuf,
    pub w2: PathBuf,
    pub b2: PathBuf,
}

impl MemPaths {
    /// Default file names inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let d = dir.as_ref();
        Self { w1: d.join(W1_FILE), b1: d.join(B1_FILE), w2: d.join(W2_FILE), b2: d.join(B2_FILE) }
    }

    /// `dir` if given, else `$QGOLDEN_MEM_DIR`, else the current directory.
    pub fn resolve(dir: Option<PathBuf>) -> Self {
        let dir = dir
            .or_else(|| std::env::var(MEM_DIR_ENV).ok().filter(|s| !s.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::in_dir(dir)
    }

    fn entries(&self) -> [(&Path, u32, usize); 4] {
        [
            (self.w1.as_path(), WEIGHT_BITS, IN_DIM * HIDDEN),
            (self.b1.as_path(), BIAS_BITS, HIDDEN),
            (self.w2.as_path(), WEIGHT_BITS, HIDDEN * OUT),
            (self.b2.as_path(), BIAS_BITS, OUT),
        ]
    }
}

/// Reads a memory image and checks its element count.
pub fn load_tensor(path: &Path, bit_width: u32, expected: usize) -> Result<SignedTensor> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::ResourceMissing { paths: vec![path.to_path_buf()] },
        _ => Error::io(path, e),
    })?;
    let name = path.display().to_string();
    let t = decode_named(&name, &text, bit_width)?.expect_len(&name, expected)?;
    debug!("decoded {} ({} x int{})", name, t.len(), bit_width);
    Ok(t)
}

/// Loads and shape-checks all four parameter tensors. Every missing file is reported
/// at once, before anything is parsed.
pub fn load_params(paths: &MemPaths) -> Result<Params> {
    let missing: Vec<PathBuf> = paths.entries().iter()
        .filter(|(p, _, _)| !p.is_file())
        .map(|(p, _, _)| p.to_path_buf())
        .collect();
    if !missing.is_empty() {
        return Err(Error::ResourceMissing { paths: missing });
    }
    let [w1, b1, w2, b2] = paths.entries().map(|(p, bits, n)| load_tensor(p, bits, n));
    let params = Params::from_tensors(w1?, b1?, w2?, b2?)?;
    info!("loaded parameters from {}, {}, {}, {}", paths.w1.display(), paths.b1.display(), paths.w2.display(), paths.b2.display());
    Ok(params)
}

impl GoldenNetwork {
    pub fn load(paths: &MemPaths) -> Result<Self> {
        GoldenNetwork::new(load_params(paths)?)
    }
}

/// Writes `params` as four memory images (weights as 2 hex digits, biases as 8).
pub fn save_params(paths: &MemPaths, params: &Params) -> Result<()> {
    params.validate()?;
    write_image(&paths.w1, params.w1.as_slice(), WEIGHT_BITS)?;
    write_image(&paths.b1, &params.b1, BIAS_BITS)?;
    write_image(&paths.w2, params.w2.as_slice(), WEIGHT_BITS)?;
    write_image(&paths.b2, &params.b2, BIAS_BITS)
}

pub fn write_image(path: &Path, values: &[i64], bit_width: u32) -> Result<()> {
    let mut out = String::with_capacity(values.len() * (bit_width as usize / 4 + 1));
    for &v in values {
        out.push_str(&encode(v, bit_width)?);
        out.push('\n');
    }
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    let mut f = fs::File::create(path).map_err(|e| Error::io(path, e))?;
    f.write_all(out.as_bytes()).map_err(|e| Error::io(path, e))?;
    debug!("wrote {} ({} x int{})", path.display(), values.len(), bit_width);
    Ok(())
}
