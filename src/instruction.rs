use std::fmt;

use crate::opcode::Field;

/// Most operands any instruction declares
const MAX_OPERANDS: usize = 3;

/// Every instruction family an opcode can decode to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 0nnn; a call into native COSMAC VIP code
    Sys,
    /// 1nnn
    Jump,
    /// 2nnn
    Call,
    /// 3xkk
    SkipEqImm,
    /// 4xkk
    SkipNeqImm,
    /// 5xy0
    SkipEqReg,
    /// 6xkk
    LoadImm,
    /// 7xkk
    AddImm,
    /// 8xy0
    LoadReg,
    /// 8xy1
    Or,
    /// 8xy2
    And,
    /// 8xy3
    Xor,
    /// 8xy4
    AddReg,
    /// 8xy5
    SubReg,
    /// 8xy6
    Shr,
    /// 8xy7
    Subn,
    /// 8xyE
    Shl,
    /// 9xy0
    SkipNeqReg,
    /// Annn
    LoadIndex,
    /// Bnnn
    JumpOffset,
    /// Cxkk
    Random,
    /// Dxyn
    Draw,
    /// Ex9E
    SkipKeyPressed,
    /// ExA1
    SkipKeyNotPressed,
    /// Fx07
    LoadDelay,
    /// Fx0A
    WaitKey,
    /// Fx15
    SetDelay,
    /// Fx18
    SetSound,
    /// Fx1E
    AddIndex,
    /// Fx29
    LoadFont,
    /// Fx33
    StoreBcd,
    /// Fx55
    StoreRegs,
    /// Fx65
    LoadRegs,
}

/// An opcode matches a definition when `op & mask == pattern`.
#[derive(Debug)]
pub struct Definition {
    pub instruction: Instruction,
    pub mask: u16,
    pub pattern: u16,
    pub operands: &'static [Field],
}

const fn def(
    instruction: Instruction,
    mask: u16,
    pattern: u16,
    operands: &'static [Field],
) -> Definition {
    Definition {
        instruction,
        mask,
        pattern,
        operands,
    }
}

const NONE: &[Field] = &[];
const ADDR: &[Field] = &[Field::ADDR];
const X: &[Field] = &[Field::X];
const X_KK: &[Field] = &[Field::X, Field::KK];
const X_Y: &[Field] = &[Field::X, Field::Y];
const X_Y_N: &[Field] = &[Field::X, Field::Y, Field::N];

/// The Chip-8 instruction set, searched in order.
///
/// Fully specified opcodes come before the families they would otherwise be
/// swallowed by (00E0 and 00EE before 0nnn).
pub static INSTRUCTION_SET: [Definition; 35] = [
    def(Instruction::ClearScreen, 0xFFFF, 0x00E0, NONE),
    def(Instruction::Return, 0xFFFF, 0x00EE, NONE),
    def(Instruction::Sys, 0xF000, 0x0000, ADDR),
    def(Instruction::Jump, 0xF000, 0x1000, ADDR),
    def(Instruction::Call, 0xF000, 0x2000, ADDR),
    def(Instruction::SkipEqImm, 0xF000, 0x3000, X_KK),
    def(Instruction::SkipNeqImm, 0xF000, 0x4000, X_KK),
    def(Instruction::SkipEqReg, 0xF00F, 0x5000, X_Y),
    def(Instruction::LoadImm, 0xF000, 0x6000, X_KK),
    def(Instruction::AddImm, 0xF000, 0x7000, X_KK),
    def(Instruction::LoadReg, 0xF00F, 0x8000, X_Y),
    def(Instruction::Or, 0xF00F, 0x8001, X_Y),
    def(Instruction::And, 0xF00F, 0x8002, X_Y),
    def(Instruction::Xor, 0xF00F, 0x8003, X_Y),
    def(Instruction::AddReg, 0xF00F, 0x8004, X_Y),
    def(Instruction::SubReg, 0xF00F, 0x8005, X_Y),
    def(Instruction::Shr, 0xF00F, 0x8006, X_Y),
    def(Instruction::Subn, 0xF00F, 0x8007, X_Y),
    def(Instruction::Shl, 0xF00F, 0x800E, X_Y),
    def(Instruction::SkipNeqReg, 0xF00F, 0x9000, X_Y),
    def(Instruction::LoadIndex, 0xF000, 0xA000, ADDR),
    def(Instruction::JumpOffset, 0xF000, 0xB000, ADDR),
    def(Instruction::Random, 0xF000, 0xC000, X_KK),
    def(Instruction::Draw, 0xF000, 0xD000, X_Y_N),
    def(Instruction::SkipKeyPressed, 0xF0FF, 0xE09E, X),
    def(Instruction::SkipKeyNotPressed, 0xF0FF, 0xE0A1, X),
    def(Instruction::LoadDelay, 0xF0FF, 0xF007, X),
    def(Instruction::WaitKey, 0xF0FF, 0xF00A, X),
    def(Instruction::SetDelay, 0xF0FF, 0xF015, X),
    def(Instruction::SetSound, 0xF0FF, 0xF018, X),
    def(Instruction::AddIndex, 0xF0FF, 0xF01E, X),
    def(Instruction::LoadFont, 0xF0FF, 0xF029, X),
    def(Instruction::StoreBcd, 0xF0FF, 0xF033, X),
    def(Instruction::StoreRegs, 0xF0FF, 0xF055, X),
    def(Instruction::LoadRegs, 0xF0FF, 0xF065, X),
];

/// An opcode resolved to its instruction, with operands in declaration order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub instruction: Instruction,
    pub opcode: u16,
    operands: [u16; MAX_OPERANDS],
    len: usize,
}

impl Decoded {
    pub fn args(&self) -> &[u16] {
        &self.operands[..self.len]
    }
}

/// Selects the first Instruction in `INSTRUCTION_SET` matching `op` and extracts its operands.
///
/// Returns `None` if no definition matches.
pub fn disassemble(op: u16) -> Option<Decoded> {
    let definition = INSTRUCTION_SET
        .iter()
        .find(|definition| op & definition.mask == definition.pattern)?;

    let mut operands = [0; MAX_OPERANDS];
    for (operand, field) in operands.iter_mut().zip(definition.operands) {
        *operand = field.extract(op);
    }

    Some(Decoded {
        instruction: definition.instruction,
        opcode: op,
        operands,
        len: definition.operands.len(),
    })
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;

        let a = self.args();
        match self.instruction {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Sys => write!(f, "SYS {:#05X}", a[0]),
            Jump => write!(f, "JP {:#05X}", a[0]),
            Call => write!(f, "CALL {:#05X}", a[0]),
            SkipEqImm => write!(f, "SE V{:X}, {:#04X}", a[0], a[1]),
            SkipNeqImm => write!(f, "SNE V{:X}, {:#04X}", a[0], a[1]),
            SkipEqReg => write!(f, "SE V{:X}, V{:X}", a[0], a[1]),
            LoadImm => write!(f, "LD V{:X}, {:#04X}", a[0], a[1]),
            AddImm => write!(f, "ADD V{:X}, {:#04X}", a[0], a[1]),
            LoadReg => write!(f, "LD V{:X}, V{:X}", a[0], a[1]),
            Or => write!(f, "OR V{:X}, V{:X}", a[0], a[1]),
            And => write!(f, "AND V{:X}, V{:X}", a[0], a[1]),
            Xor => write!(f, "XOR V{:X}, V{:X}", a[0], a[1]),
            AddReg => write!(f, "ADD V{:X}, V{:X}", a[0], a[1]),
            SubReg => write!(f, "SUB V{:X}, V{:X}", a[0], a[1]),
            Shr => write!(f, "SHR V{:X}", a[0]),
            Subn => write!(f, "SUBN V{:X}, V{:X}", a[0], a[1]),
            Shl => write!(f, "SHL V{:X}", a[0]),
            SkipNeqReg => write!(f, "SNE V{:X}, V{:X}", a[0], a[1]),
            LoadIndex => write!(f, "LD I, {:#05X}", a[0]),
            JumpOffset => write!(f, "JP V0, {:#05X}", a[0]),
            Random => write!(f, "RND V{:X}, {:#04X}", a[0], a[1]),
            Draw => write!(f, "DRW V{:X}, V{:X}, {}", a[0], a[1], a[2]),
            SkipKeyPressed => write!(f, "SKP V{:X}", a[0]),
            SkipKeyNotPressed => write!(f, "SKNP V{:X}", a[0]),
            LoadDelay => write!(f, "LD V{:X}, DT", a[0]),
            WaitKey => write!(f, "LD V{:X}, K", a[0]),
            SetDelay => write!(f, "LD DT, V{:X}", a[0]),
            SetSound => write!(f, "LD ST, V{:X}", a[0]),
            AddIndex => write!(f, "ADD I, V{:X}", a[0]),
            LoadFont => write!(f, "LD F, V{:X}", a[0]),
            StoreBcd => write!(f, "LD B, V{:X}", a[0]),
            StoreRegs => write!(f, "LD [I], V{:X}", a[0]),
            LoadRegs => write!(f, "LD V{:X}, [I]", a[0]),
        }
    }
}
