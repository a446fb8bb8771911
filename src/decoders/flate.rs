//! Zlib inflate for compressed glyph bitmaps.
//!
//! Uses the flate2 crate. Unlike general-purpose streams, the decoded size
//! of a glyph is known in advance, so output is capped at that size and any
//! difference is an error rather than a partial result.

use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::decoders::StreamDecoder;
use crate::error::DecodeError;

/// FlateDecode for a glyph of known decoded size.
#[derive(Debug, Clone, Copy)]
pub struct FlateDecoder {
    expected_len: usize,
}

impl FlateDecoder {
    /// Decoder that must produce exactly `expected_len` bytes.
    pub fn new(expected_len: usize) -> Self {
        Self { expected_len }
    }

    /// Number of bytes the stream must inflate to.
    pub fn expected_len(&self) -> usize {
        self.expected_len
    }
}

impl StreamDecoder for FlateDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>, DecodeError> {
        let mut output = Vec::new();
        output
            .try_reserve_exact(self.expected_len)
            .map_err(|_| DecodeError::Alloc(self.expected_len))?;

        // One byte past the expected size is enough to detect oversized streams.
        let limit = self.expected_len as u64 + 1;
        let mut decoder = ZlibDecoder::new(input).take(limit);
        if let Err(e) = decoder.read_to_end(&mut output) {
            log::debug!(
                "FlateDecode failed after {} of {} bytes: {}",
                output.len(),
                self.expected_len,
                e
            );
            return Err(DecodeError::Inflate(e.to_string()));
        }

        if output.len() != self.expected_len {
            return Err(DecodeError::SizeMismatch {
                expected: self.expected_len,
                actual: output.len(),
            });
        }
        Ok(output)
    }

    fn name(&self) -> &str {
        "FlateDecode"
    }
}
