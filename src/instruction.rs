//! Decoding and in-memory representation of the 14 UM opcodes.
//!
//! An instruction word's top 4 bits select the opcode. Thirteen opcodes pack
//! three 3-bit register indices into bits 8..0 (`A` at 6..8, `B` at 3..5, `C`
//! at 0..2); `load value` instead packs a destination register into bits
//! 25..27 and a 25-bit immediate into bits 24..0.

use crate::consts::{IMMEDIATE_MASK, OPCODE_BITS};
use crate::error::Trap;
use crate::register::RegId;
use crate::Word;

/// A decoded instruction, ready for dispatch.
///
/// Decoding happens once per fetch; the execution loop matches on this enum
/// rather than re-masking bits inside every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `if R[C] != 0 { R[A] = R[B] }`
    CMov { a: RegId, b: RegId, c: RegId },
    /// `R[A] = segment[R[B]][R[C]]`
    SegLoad { a: RegId, b: RegId, c: RegId },
    /// `segment[R[A]][R[B]] = R[C]`
    SegStore { a: RegId, b: RegId, c: RegId },
    /// `R[A] = R[B].wrapping_add(R[C])`
    Add { a: RegId, b: RegId, c: RegId },
    /// `R[A] = R[B].wrapping_mul(R[C])`
    Mul { a: RegId, b: RegId, c: RegId },
    /// `R[A] = R[B] / R[C]`
    Div { a: RegId, b: RegId, c: RegId },
    /// `R[A] = !(R[B] & R[C])`
    Nand { a: RegId, b: RegId, c: RegId },
    /// Stop the execution loop.
    Halt,
    /// `R[B] = allocate(R[C])`
    MapSegment { b: RegId, c: RegId },
    /// `free(R[C])`
    UnmapSegment { c: RegId },
    /// Emit the low byte of `R[C]` to standard output.
    Output { c: RegId },
    /// `R[C] = ` next input byte, or the EOF sentinel.
    Input { c: RegId },
    /// If `R[B] != 0`, clone it over the program segment; then jump to `R[C]`.
    LoadProgram { b: RegId, c: RegId },
    /// `R[A] = ` a 25-bit unsigned immediate.
    LoadValue { a: RegId, value: Word },
}

/// Extracts the three 3-bit register fields common to all but `load value`.
fn unpack_abc(word: Word) -> (RegId, RegId, RegId) {
    (
        RegId::from_bits(word >> 6),
        RegId::from_bits(word >> 3),
        RegId::from_bits(word),
    )
}

impl Instruction {
    /// Decodes a 32-bit instruction word.
    ///
    /// Fails with [`Trap::InvalidOpcode`] when the top 4 bits don't name one
    /// of the 14 known opcodes.
    pub fn decode(word: Word) -> Result<Self, Trap> {
        let opcode = (word >> (32 - OPCODE_BITS)) as u8;

        Ok(match opcode {
            0 => {
                let (a, b, c) = unpack_abc(word);
                Instruction::CMov { a, b, c }
            }
            1 => {
                let (a, b, c) = unpack_abc(word);
                Instruction::SegLoad { a, b, c }
            }
            2 => {
                let (a, b, c) = unpack_abc(word);
                Instruction::SegStore { a, b, c }
            }
            3 => {
                let (a, b, c) = unpack_abc(word);
                Instruction::Add { a, b, c }
            }
            4 => {
                let (a, b, c) = unpack_abc(word);
                Instruction::Mul { a, b, c }
            }
            5 => {
                let (a, b, c) = unpack_abc(word);
                Instruction::Div { a, b, c }
            }
            6 => {
                let (a, b, c) = unpack_abc(word);
                Instruction::Nand { a, b, c }
            }
            7 => Instruction::Halt,
            8 => {
                let (_a, b, c) = unpack_abc(word);
                Instruction::MapSegment { b, c }
            }
            9 => {
                let (_a, _b, c) = unpack_abc(word);
                Instruction::UnmapSegment { c }
            }
            10 => {
                let (_a, _b, c) = unpack_abc(word);
                Instruction::Output { c }
            }
            11 => {
                let (_a, _b, c) = unpack_abc(word);
                Instruction::Input { c }
            }
            12 => {
                let (_a, b, c) = unpack_abc(word);
                Instruction::LoadProgram { b, c }
            }
            13 => {
                let a = RegId::from_bits(word >> 25);
                let value = word & IMMEDIATE_MASK;
                Instruction::LoadValue { a, value }
            }
            _ => return Err(Trap::InvalidOpcode { opcode }),
        })
    }
}
