use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::context::{ExecutionContext, Peripherals};
use crate::error::Fault;
use crate::instruction::{disassemble, Decoded, Instruction};
use crate::memory::Memory;
use crate::operations::operation;
use crate::registers::Registers;

/// The outcome of a single tick.
///
/// Anything other than `Executed` leaves registers and memory untouched, so the
/// caller can keep ticking.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    Executed(Decoded),
    /// Waiting for a key press
    Paused,
    /// The program counter left the loaded program
    OutsideProgram { pc: u16 },
    /// No instruction matches the opcode
    InvalidOpcode { opcode: u16, pc: u16 },
    /// The instruction is recognised but has no operation
    Unimplemented { instruction: Instruction, pc: u16 },
}

impl Step {
    /// Number of instructions this step executed
    pub fn count(&self) -> usize {
        match self {
            Step::Executed(_) => 1,
            _ => 0,
        }
    }
}

/// # CPU
/// Fetches, decodes and executes one instruction per tick, then counts the timers down.
pub struct Cpu {
    pub registers: Registers,
    rng: StdRng,
}

impl Cpu {
    /// A CPU whose random numbers come from `seed`, or from the OS if there is none
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Cpu {
            registers: Registers::new(),
            rng,
        }
    }

    pub fn reset(&mut self) {
        self.registers.reset();
        log::debug!("cpu reset");
    }

    /// Advances the CPU by a single instruction
    /// - does nothing while awaiting a keypress
    /// - gets, decodes and executes the opcode at the pc
    /// - decrements the timers
    pub fn tick(
        &mut self,
        memory: &mut Memory,
        peripherals: &mut dyn Peripherals,
    ) -> Result<Step, Fault> {
        if self.registers.paused() {
            return Ok(Step::Paused);
        }

        let pc = self.registers.pc;
        let op = memory.read_opcode(usize::from(pc))?;
        if !memory.opcode_in_program(usize::from(pc)) {
            return Ok(Step::OutsideProgram { pc });
        }

        let decoded = match disassemble(op) {
            Some(decoded) => decoded,
            None => {
                log::warn!("invalid opcode {:04X} at {:#06X}", op, pc);
                return Ok(Step::InvalidOpcode { opcode: op, pc });
            }
        };
        let operation = match operation(decoded.instruction) {
            Some(operation) => operation,
            None => {
                log::warn!("unimplemented instruction {} at {:#06X}", decoded, pc);
                return Ok(Step::Unimplemented {
                    instruction: decoded.instruction,
                    pc,
                });
            }
        };

        log::trace!(
            "{:04X} {:<16} v{:02X?} i{:04X} pc{:04X}",
            op,
            decoded.to_string(),
            self.registers.v,
            self.registers.i,
            pc
        );

        self.registers.advance();
        let mut ctx = ExecutionContext {
            registers: &mut self.registers,
            memory,
            peripherals,
            rng: &mut self.rng,
        };
        operation(&mut ctx, decoded.args(), op)?;
        ctx.decrement_timers();

        Ok(Step::Executed(decoded))
    }
}
