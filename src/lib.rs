pub use chip8::Chip8;
pub use config::Config;
pub use context::{ExecutionContext, Peripherals};
pub use cpu::{Cpu, Step};
pub use error::Fault;
pub use instruction::{disassemble, Decoded, Instruction};
pub use memory::Memory;
pub use registers::Registers;
pub use screen::FrameBuffer;

mod chip8;
mod config;
pub mod constants;
mod context;
mod cpu;
mod error;
pub mod instruction;
pub mod keypad;
mod memory;
pub mod opcode;
pub mod operations;
mod registers;
pub mod screen;
