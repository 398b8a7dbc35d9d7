//! Turns a big-endian byte stream into a program segment.

use crate::consts::WORD_SIZE;
use crate::error::LoadError;
use crate::segment::Segment;
use crate::Word;

/// Groups `bytes` into big-endian 32-bit words, producing a fresh program
/// segment.
///
/// Fails with [`LoadError::TruncatedWord`] when `bytes.len()` is not a
/// multiple of [`WORD_SIZE`].
pub fn load(bytes: &[u8]) -> Result<Segment, LoadError> {
    if bytes.len() % WORD_SIZE != 0 {
        return Err(LoadError::TruncatedWord {
            len: bytes.len(),
            word_size: WORD_SIZE,
        });
    }

    Ok(bytes
        .chunks_exact(WORD_SIZE)
        .map(|chunk| {
            let array: [u8; WORD_SIZE] = chunk.try_into().expect("chunk is exactly WORD_SIZE");
            Word::from_be_bytes(array)
        })
        .collect())
}
