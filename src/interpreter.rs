//! The fetch-decode-dispatch loop that owns the program counter, the register
//! file, and the segment table.

use crate::consts::INPUT_EOF;
use crate::error::Trap;
use crate::instruction::Instruction;
use crate::io::{ByteInput, ByteOutput};
use crate::register::{RegId, Registers};
use crate::segment::{Segment, SegmentId, SegmentTable};
use crate::state::ExecuteState;
use crate::Word;

/// A Universal Machine: registers, segment table, program counter, and the
/// host I/O streams `input`/`output` are wired to.
///
/// The machine owns every segment for its entire lifetime and releases them
/// automatically on drop; nothing here is shared across threads or escapes
/// to another agent.
#[derive(Debug)]
pub struct Interpreter<I, O> {
    pc: Word,
    registers: Registers,
    segments: SegmentTable,
    input: I,
    output: O,
}

impl<I: ByteInput, O: ByteOutput> Interpreter<I, O> {
    /// Builds a machine whose program segment is `program`, with zeroed
    /// registers and a program counter of zero.
    pub fn new(program: Segment, input: I, output: O) -> Self {
        Self {
            pc: 0,
            registers: Registers::ZERO,
            segments: SegmentTable::new(program),
            input,
            output,
        }
    }

    /// Returns the current register file, for inspection in tests.
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    /// Returns mutable access to the register file, for seeding state in tests.
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    /// Returns the current program counter, for inspection in tests.
    pub fn pc(&self) -> Word {
        self.pc
    }

    /// Runs the fetch-decode-dispatch cycle until `halt` or a trap.
    #[tracing::instrument(name = "run", skip(self))]
    pub fn run(&mut self) -> Result<(), Trap> {
        loop {
            if self.step()? == ExecuteState::Halted {
                return Ok(());
            }
        }
    }

    /// Fetches, decodes, and executes exactly one instruction.
    #[tracing::instrument(name = "step", skip(self), fields(pc = self.pc))]
    pub fn step(&mut self) -> Result<ExecuteState, Trap> {
        let word = self.segments.read(SegmentId::PROGRAM, self.pc)?;
        let instruction = Instruction::decode(word)?;
        tracing::trace!(?instruction, "decoded instruction");

        let state = self.dispatch(instruction)?;

        if state.should_continue() && !matches!(instruction, Instruction::LoadProgram { .. }) {
            self.pc = self.pc.wrapping_add(1);
        }

        Ok(state)
    }

    fn dispatch(&mut self, instruction: Instruction) -> Result<ExecuteState, Trap> {
        match instruction {
            Instruction::CMov { a, b, c } => {
                if self.reg(c) != 0 {
                    *self.reg_mut(a) = self.reg(b);
                }
            }
            Instruction::SegLoad { a, b, c } => {
                let id = SegmentId::from(self.reg(b));
                let offset = self.reg(c);
                let value = self.segments.read(id, offset)?;
                *self.reg_mut(a) = value;
            }
            Instruction::SegStore { a, b, c } => {
                let id = SegmentId::from(self.reg(a));
                let offset = self.reg(b);
                let value = self.reg(c);
                self.segments.write(id, offset, value)?;
            }
            Instruction::Add { a, b, c } => {
                *self.reg_mut(a) = self.reg(b).wrapping_add(self.reg(c));
            }
            Instruction::Mul { a, b, c } => {
                *self.reg_mut(a) = self.reg(b).wrapping_mul(self.reg(c));
            }
            Instruction::Div { a, b, c } => {
                let divisor = self.reg(c);
                if divisor == 0 {
                    return Err(Trap::DivisionByZero);
                }
                *self.reg_mut(a) = self.reg(b) / divisor;
            }
            Instruction::Nand { a, b, c } => {
                *self.reg_mut(a) = !(self.reg(b) & self.reg(c));
            }
            Instruction::Halt => return Ok(ExecuteState::Halted),
            Instruction::MapSegment { b, c } => {
                let id = self.segments.allocate(self.reg(c))?;
                *self.reg_mut(b) = id.into();
            }
            Instruction::UnmapSegment { c } => {
                let id = SegmentId::from(self.reg(c));
                self.segments.free(id)?;
            }
            Instruction::Output { c } => {
                let value = self.reg(c);
                let byte = u8::try_from(value).map_err(|_| Trap::OutputOutOfRange { value })?;
                self.output.write_byte(byte).map_err(Trap::HostIo)?;
            }
            Instruction::Input { c } => {
                let byte = self.input.read_byte().map_err(Trap::HostIo)?;
                *self.reg_mut(c) = byte.map_or(INPUT_EOF, Word::from);
            }
            Instruction::LoadProgram { b, c } => {
                let source = self.reg(b);
                if source != 0 {
                    let id = SegmentId::from(source);
                    self.segments.replace_zero(id)?;
                }
                self.pc = self.reg(c);
            }
            Instruction::LoadValue { a, value } => {
                *self.reg_mut(a) = value;
            }
        }

        Ok(ExecuteState::Proceed)
    }

    fn reg(&self, id: RegId) -> Word {
        self.registers[id]
    }

    fn reg_mut(&mut self, id: RegId) -> &mut Word {
        &mut self.registers[id]
    }
}
