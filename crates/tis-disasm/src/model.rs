use anyhow::{Context, Result};
use std::path::Path;

use tis_rs::NodeImage;

/// Loads a raw little-endian word stream, optionally skipping a header and
/// limiting the number of bytes taken.
pub fn load_raw_bin(path: &Path, skip: usize, len: Option<usize>) -> Result<NodeImage> {
    let file = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        anyhow::ensure!(lim <= payload.len(), "--len exceeds remaining file size after skip");
        payload = &payload[..lim];
    }
    Ok(NodeImage::from_le_bytes(payload)?)
}

/// Accepts `0x`-prefixed hex or plain decimal.
pub fn parse_word(s: &str) -> Result<u16> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u16::from_str_radix(hex, 16).with_context(|| format!("bad hex word `{s}`"))?)
    } else {
        Ok(s.parse::<u16>().with_context(|| format!("bad word `{s}`"))?)
    }
}
