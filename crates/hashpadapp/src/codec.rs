//! # Codec: Text ⇄ URL-Safe Token
//!
//! The codec turns an arbitrary string into something that can live in a URL
//! fragment and back again:
//!
//! ```text
//! text ──UTF-8──▶ bytes ──raw deflate──▶ compressed ──base64url (no pad)──▶ token
//! ```
//!
//! - **Raw deflate** means no zlib or gzip header. The stream is what a browser's
//!   `deflate-raw` compression produces, so tokens are portable between this crate
//!   and a browser client.
//! - **URL-safe base64 without padding** keeps the token inside the unreserved
//!   character set (`A-Z a-z 0-9 - _`).
//!
//! ## Determinism
//!
//! Decompression always reproduces the exact input, but the compressed bytes may
//! differ between compression levels or backends. Never compare tokens for
//! equality; compare what they decompress to.
//!
//! ## Strictness
//!
//! [`decompress`] rejects anything that is not a complete, well-formed stream:
//! characters outside the alphabet, truncated streams, trailing junk after the
//! end-of-stream marker, and payloads that are not UTF-8.

use crate::error::{DecodeError, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use flate2::write::DeflateEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use std::io::Write;

/// Compression level used when the caller does not pick one.
pub const DEFAULT_LEVEL: u32 = 6;

/// Compress and encode `text` at the default level.
pub fn compress(text: &str) -> Result<String> {
    compress_with_level(text, DEFAULT_LEVEL)
}

/// Compress and encode `text`. Levels above 9 are clamped.
pub fn compress_with_level(text: &str, level: u32) -> Result<String> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(level.min(9)));
    encoder.write_all(text.as_bytes())?;
    let compressed = encoder.finish()?;
    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

/// Decode and decompress a token produced by [`compress`].
///
/// The empty token decodes to the empty string.
pub fn decompress(encoded: &str) -> std::result::Result<String, DecodeError> {
    if encoded.is_empty() {
        return Ok(String::new());
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| DecodeError::Encoding(e.to_string()))?;
    let inflated = inflate_raw(&bytes)?;
    String::from_utf8(inflated).map_err(|_| DecodeError::Utf8)
}

fn inflate_raw(bytes: &[u8]) -> std::result::Result<Vec<u8>, DecodeError> {
    let mut inflater = Decompress::new(false);
    let mut out = Vec::with_capacity(bytes.len().saturating_mul(4).max(64));

    loop {
        if out.len() == out.capacity() {
            out.reserve(out.capacity());
        }

        let in_before = inflater.total_in();
        let out_before = inflater.total_out();
        let consumed = in_before as usize;

        let status = inflater
            .decompress_vec(&bytes[consumed..], &mut out, FlushDecompress::None)
            .map_err(|e| DecodeError::Compression(e.to_string()))?;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                let stalled =
                    inflater.total_in() == in_before && inflater.total_out() == out_before;
                let input_exhausted = inflater.total_in() as usize == bytes.len();
                if (input_exhausted && out.len() < out.capacity()) || stalled {
                    return Err(DecodeError::Compression(
                        "unexpected end of stream".to_string(),
                    ));
                }
            }
        }
    }

    if (inflater.total_in() as usize) < bytes.len() {
        return Err(DecodeError::Compression(
            "trailing bytes after end of stream".to_string(),
        ));
    }

    Ok(out)
}
