//! Error types surfaced by the loader and the interpreter.

use crate::segment::SegmentId;
use crate::Word;

/// Failure to turn a byte stream into a program segment.
///
/// These are reported before execution begins; the process exits non-zero without
/// ever constructing an [`crate::interpreter::Interpreter`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The underlying file could not be read.
    #[error("failed to read program file: {0}")]
    Io(#[from] std::io::Error),

    /// The byte stream length was not a multiple of the word size.
    #[error("program file length {len} is not a multiple of {word_size} bytes")]
    TruncatedWord {
        /// Total length of the offending stream, in bytes.
        len: usize,
        /// Size of a word, in bytes (always 4).
        word_size: usize,
    },
}

/// An undefined-behavior condition that halts the interpreter.
///
/// The running program never observes or recovers from one of these: a trap
/// unwinds straight to the host.
#[derive(Debug, thiserror::Error)]
pub enum Trap {
    /// `division` with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// `output` with an operand outside `0..=255`.
    #[error("output value {value} does not fit in a byte")]
    OutputOutOfRange {
        /// The offending register value.
        value: Word,
    },

    /// `map segment` could not allocate a fresh identifier.
    ///
    /// Practically unreachable (the identifier space is 2^32), but specified.
    #[error("segment identifier space is exhausted")]
    SegmentIdSpaceExhausted,

    /// Read, write, or `load program` referenced a freed or never-allocated segment.
    #[error("segment {id} is not mapped")]
    UnmappedSegment {
        /// The offending identifier.
        id: SegmentId,
    },

    /// Read or write referenced an offset past the end of the segment.
    #[error("offset {offset} is out of bounds for segment {id}")]
    SegmentOffsetOutOfBounds {
        /// The offending identifier.
        id: SegmentId,
        /// The offending offset.
        offset: Word,
    },

    /// `unmap segment` targeted an identifier that is already free.
    #[error("segment {id} is already unmapped")]
    DoubleFree {
        /// The offending identifier.
        id: SegmentId,
    },

    /// `unmap segment` targeted the reserved program segment (identifier 0).
    #[error("the program segment cannot be unmapped")]
    FreeReservedSegment,

    /// The fetched word's top 4 bits did not select one of the 14 known opcodes.
    #[error("opcode {opcode} does not name a known instruction")]
    InvalidOpcode {
        /// The offending opcode, in `0..16`.
        opcode: u8,
    },

    /// A host I/O operation (`input`/`output`) failed.
    #[error("host I/O error: {0}")]
    HostIo(#[from] std::io::Error),
}
