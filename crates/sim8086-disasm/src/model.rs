use anyhow::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Input {
    pub path: PathBuf,
    pub skip: usize,
    pub bytes: Vec<u8>,
}

pub fn load_input(path: &Path, skip: usize, len: Option<usize>) -> Result<Input> {
    anyhow::ensure!(path.exists(), "The specified file {} doesn't exist", path.display());
    let file = std::fs::read(path)?;
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        anyhow::ensure!(lim <= payload.len(), "--len exceeds remaining file size after skip");
        payload = &payload[..lim];
    }
    Ok(Input { path: path.to_path_buf(), skip, bytes: payload.to_vec() })
}
