//! Stateful UTF-8 decoding across chunk boundaries.

use crate::error::DecodeError;

/// Decodes a chunked byte stream to text.
///
/// A multi-byte character split across two chunks is held back until the
/// rest of it arrives. Invalid sequences become U+FFFD, or fail the decode
/// when `strict` is set.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
    strict: bool,
}

impl Utf8Decoder {
    pub fn new(strict: bool) -> Self {
        Self {
            pending: Vec::new(),
            strict,
        }
    }

    /// Bytes of an incomplete trailing character carried to the next chunk.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Decode one chunk, prefixed by any bytes held back from the last one.
    pub fn decode(&mut self, chunk: &[u8]) -> Result<String, DecodeError> {
        let carried = self.pending.len();
        let mut input = std::mem::take(&mut self.pending);
        input.extend_from_slice(chunk);

        let mut out = String::with_capacity(input.len());
        let mut offset = 0;
        loop {
            let rest = &input[offset..];
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&rest[..valid]));
                    match err.error_len() {
                        Some(invalid) => {
                            if self.strict {
                                return Err(DecodeError::InvalidUtf8 {
                                    offset: (offset + valid).saturating_sub(carried),
                                });
                            }
                            out.push(char::REPLACEMENT_CHARACTER);
                            offset += valid + invalid;
                        }
                        None => {
                            self.pending = rest[valid..].to_vec();
                            break;
                        }
                    }
                }
            }
        }
        Ok(out)
    }
}
