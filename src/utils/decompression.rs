//! Gzip decompression for compressed EPG feeds

use std::io::Read;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

/// Decompress a gzip payload and decode it as UTF-8 text.
///
/// Decoding is lossy: invalid byte sequences become U+FFFD instead of
/// failing the source. Feeds occasionally carry a few mangled bytes and the
/// rest of the guide is still worth keeping.
pub fn decompress_gzip_text(data: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .context("Failed to decompress gzip data")?;
    Ok(String::from_utf8_lossy(&decompressed).into_owned())
}
