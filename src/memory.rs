use std::ops::Range;

use crate::constants::{FONT_ADDRESS, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::Fault;

/// # Memory
/// 4096 bytes of addressable memory.
///
/// - `0x000..0x050` holds the sprite sheet, reseeded on every reset
/// - `0x200..` is where programs are loaded
///
/// Remembers the range occupied by the most recently loaded program so that
/// runaway execution can be spotted instead of decoding whatever happens to be in RAM.
pub struct Memory {
    bytes: Box<[u8]>,
    program: Range<usize>,
}

impl Memory {
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: vec![0; MEMORY_SIZE].into_boxed_slice(),
            program: PROGRAM_START..PROGRAM_START,
        };
        memory.reset();
        memory
    }

    /// Zero all memory, reseed the sprite sheet and forget the loaded program.
    pub fn reset(&mut self) {
        self.bytes.iter_mut().for_each(|byte| *byte = 0);
        self.bytes[FONT_ADDRESS..FONT_ADDRESS + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        self.program = PROGRAM_START..PROGRAM_START;
    }

    /// Read the byte at `address`
    pub fn read(&self, address: usize) -> Result<u8, Fault> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(Fault::OutOfBounds { address })
    }

    /// Write `value` to `address`. Values are bytes, so nothing wider can be stored.
    pub fn write(&mut self, address: usize, value: u8) -> Result<(), Fault> {
        let byte = self
            .bytes
            .get_mut(address)
            .ok_or(Fault::OutOfBounds { address })?;
        *byte = value;
        Ok(())
    }

    /// The bytes in `start..end`, failing if any of them lie outside of memory.
    pub fn slice(&self, start: usize, end: usize) -> Result<&[u8], Fault> {
        if start > end {
            return Err(Fault::OutOfBounds { address: start });
        }
        self.bytes.get(start..end).ok_or(Fault::OutOfBounds {
            address: start.max(MEMORY_SIZE),
        })
    }

    /// Gets the opcode stored at `address`.
    ///
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent
    /// bytes, most significant first. Opcodes not wholly inside the loaded program
    /// read as `0x0000` rather than failing.
    pub fn read_opcode(&self, address: usize) -> Result<u16, Fault> {
        if !self.opcode_in_program(address) {
            log::warn!(
                "opcode fetch at {:#06X} is outside of the program at {:#06X}..{:#06X}",
                address,
                self.program.start,
                self.program.end
            );
            return Ok(0x0000);
        }
        let left = u16::from(self.read(address)?);
        let right = u16::from(self.read(address + 1)?);
        Ok(left << 8 | right)
    }

    /// Copy `program` into memory at `PROGRAM_START` and remember where it lives.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Fault> {
        let capacity = MEMORY_SIZE - PROGRAM_START;
        if program.len() > capacity {
            return Err(Fault::CapacityExceeded {
                size: program.len(),
                capacity,
            });
        }
        let end = PROGRAM_START + program.len();
        self.bytes[PROGRAM_START..end].copy_from_slice(program);
        self.program = PROGRAM_START..end;
        log::debug!("loaded {} byte program at {:#06X}", program.len(), PROGRAM_START);
        Ok(())
    }

    /// Whether `address` lies within the most recently loaded program
    pub fn in_program(&self, address: usize) -> bool {
        self.program.contains(&address)
    }

    /// Whether both bytes of the opcode at `address` lie within the loaded program
    pub fn opcode_in_program(&self, address: usize) -> bool {
        self.in_program(address) && self.in_program(address.saturating_add(1))
    }

    pub fn program(&self) -> Range<usize> {
        self.program.clone()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_seeds_sprite_sheet() {
        let memory = Memory::new();
        assert_eq!(memory.slice(0x0, 0x50).unwrap(), &SPRITE_SHEET[..]);
        assert!(memory.bytes[0x50..].iter().all(|&byte| byte == 0));
    }

    #[test]
    fn test_write_then_read_every_address() {
        let mut memory = Memory::new();
        for address in 0..MEMORY_SIZE {
            let value = (address * 7 % 256) as u8;
            memory.write(address, value).unwrap();
            assert_eq!(memory.read(address), Ok(value));
        }
    }

    #[test]
    fn test_read_out_of_bounds() {
        let memory = Memory::new();
        assert_eq!(
            memory.read(MEMORY_SIZE),
            Err(Fault::OutOfBounds {
                address: MEMORY_SIZE
            })
        );
        assert!(memory.read(usize::MAX).is_err());
    }

    #[test]
    fn test_write_out_of_bounds() {
        let mut memory = Memory::new();
        assert_eq!(
            memory.write(0x1000, 0xAB),
            Err(Fault::OutOfBounds { address: 0x1000 })
        );
    }

    #[test]
    fn test_slice_out_of_bounds() {
        let memory = Memory::new();
        assert_eq!(memory.slice(0xFFE, 0x1000).unwrap(), &[0, 0]);
        assert_eq!(
            memory.slice(0xFFE, 0x1001),
            Err(Fault::OutOfBounds { address: 0x1000 })
        );
        assert!(memory.slice(0x10, 0x8).is_err());
    }

    #[test]
    fn test_slice_empty() {
        let memory = Memory::new();
        assert!(memory.slice(0x200, 0x200).unwrap().is_empty());
        assert!(memory.slice(0x0, 0x0).unwrap().is_empty());
    }

    #[test]
    fn test_load_program() {
        let mut memory = Memory::new();
        memory.load_program(&[0x00, 0xE0, 0x12, 0x00]).unwrap();
        assert_eq!(memory.slice(0x200, 0x204).unwrap(), &[0x00, 0xE0, 0x12, 0x00]);
        assert_eq!(memory.program(), 0x200..0x204);
    }

    #[test]
    fn test_load_program_fills_memory() {
        let mut memory = Memory::new();
        let program = vec![0xAA; MEMORY_SIZE - PROGRAM_START];
        assert!(memory.load_program(&program).is_ok());
        assert_eq!(memory.read(MEMORY_SIZE - 1), Ok(0xAA));
    }

    #[test]
    fn test_load_program_too_large() {
        let mut memory = Memory::new();
        let program = vec![0xAA; MEMORY_SIZE - PROGRAM_START + 1];
        assert_eq!(
            memory.load_program(&program),
            Err(Fault::CapacityExceeded {
                size: 0xE01,
                capacity: 0xE00
            })
        );
        assert_eq!(memory.read(PROGRAM_START), Ok(0));
    }

    #[test]
    fn test_read_opcode_is_big_endian() {
        let mut memory = Memory::new();
        memory.load_program(&[0xAA, 0xBB]).unwrap();
        assert_eq!(memory.read_opcode(0x200), Ok(0xAABB));
    }

    #[test]
    fn test_read_opcode_outside_program() {
        let mut memory = Memory::new();
        memory.load_program(&[0xAA, 0xBB]).unwrap();
        memory.write(0x202, 0x12).unwrap();
        assert_eq!(memory.read_opcode(0x202), Ok(0x0000));
        assert_eq!(memory.read_opcode(0x000), Ok(0x0000));
    }

    #[test]
    fn test_read_opcode_straddling_program_end() {
        let mut memory = Memory::new();
        let program = vec![0xAA; MEMORY_SIZE - PROGRAM_START];
        memory.load_program(&program).unwrap();
        assert!(memory.in_program(0xFFF));
        assert!(!memory.opcode_in_program(0xFFF));
        assert_eq!(memory.read_opcode(0xFFF), Ok(0x0000));
        assert_eq!(memory.read_opcode(0xFFE), Ok(0xAAAA));

        memory.load_program(&[0xAA, 0xBB, 0xCC]).unwrap();
        assert!(!memory.opcode_in_program(0x202));
        assert_eq!(memory.read_opcode(0x202), Ok(0x0000));
    }

    #[test]
    fn test_reset_clears_program() {
        let mut memory = Memory::new();
        memory.load_program(&[0xAA, 0xBB]).unwrap();
        memory.write(0x0, 0xFF).unwrap();
        memory.reset();
        assert_eq!(memory.read(0x200), Ok(0));
        assert_eq!(memory.read(0x0), Ok(SPRITE_SHEET[0]));
        assert!(!memory.in_program(0x200));
    }
}
