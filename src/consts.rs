//! Machine-wide constants.

/// Number of general-purpose registers.
pub const REGISTER_COUNT: usize = 8;

/// Width, in bits, of a register index field.
pub const REGISTER_INDEX_BITS: u32 = 3;

/// Mask isolating a single register index from an instruction word.
pub const REGISTER_INDEX_MASK: u32 = (1 << REGISTER_INDEX_BITS) - 1;

/// Width, in bits, of the opcode field.
pub const OPCODE_BITS: u32 = 4;

/// Width, in bits, of the immediate operand of `load value`.
pub const IMMEDIATE_BITS: u32 = 25;

/// Mask isolating the 25-bit immediate operand of `load value`.
pub const IMMEDIATE_MASK: u32 = (1 << IMMEDIATE_BITS) - 1;

/// Size of a word, in bytes.
pub const WORD_SIZE: usize = core::mem::size_of::<u32>();

/// Sentinel returned by `input` on end-of-stream.
pub const INPUT_EOF: u32 = u32::MAX;
