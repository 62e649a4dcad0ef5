use crate::constants::{PROGRAM_START, REGISTER_COUNT, STACK_DEPTH};
use crate::error::Fault;

/// The Chip-8 register file
///
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Stack
/// - 16 16-bit return addresses
/// - (sp) the number of addresses currently on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound) counting down towards 0
///
/// Input
/// - Emulation halts until a key's value is written to Some register
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    stack: [u16; STACK_DEPTH],
    sp: usize,
    register_needing_key: Option<u8>,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START as u16,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            sp: 0,
            register_needing_key: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Registers::new();
    }

    /// Move the program counter on to the next instruction
    pub fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(0x2);
    }

    /// STACK.push(addr)
    pub fn push(&mut self, addr: u16) -> Result<(), Fault> {
        if self.sp == STACK_DEPTH {
            return Err(Fault::StackOverflow);
        }
        self.stack[self.sp] = addr;
        self.sp += 1;
        log::debug!("push {:#06X}, depth {}", addr, self.sp);
        Ok(())
    }

    /// STACK.pop()
    pub fn pop(&mut self) -> Result<u16, Fault> {
        if self.sp == 0 {
            return Err(Fault::StackUnderflow);
        }
        self.sp -= 1;
        let addr = self.stack[self.sp];
        log::debug!("pop {:#06X}, depth {}", addr, self.sp);
        Ok(addr)
    }

    /// Number of return addresses on the stack
    pub fn depth(&self) -> usize {
        self.sp
    }

    /// Count both timers down towards 0.
    ///
    /// Returns true only on the call where the sound timer reaches 0, so that a
    /// tone can be stopped on that edge.
    pub fn tick_timers(&mut self) -> bool {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        if self.sound_timer == 0 {
            return false;
        }
        self.sound_timer -= 1;
        self.sound_timer == 0
    }

    /// Halt until a key press is delivered to Vx
    pub fn await_key(&mut self, register: u8) -> Result<(), Fault> {
        if let Some(register) = self.register_needing_key {
            return Err(Fault::KeyWaitPending { register });
        }
        self.register_needing_key = Some(register);
        Ok(())
    }

    /// Deliver a key press to the register awaiting one, if any, and resume.
    pub fn resolve_key(&mut self, key: u8) -> bool {
        match self.register_needing_key.take() {
            Some(register) => {
                self.v[register as usize] = key;
                true
            }
            None => false,
        }
    }

    pub fn paused(&self) -> bool {
        self.register_needing_key.is_some()
    }

    pub fn register_needing_key(&self) -> Option<u8> {
        self.register_needing_key
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registers() {
        let registers = Registers::new();
        assert_eq!(registers.pc, 0x200);
        assert_eq!(registers.depth(), 0);
        assert!(!registers.paused());
    }

    #[test]
    fn test_advance() {
        let mut registers = Registers::new();
        registers.advance();
        assert_eq!(registers.pc, 0x202);
    }

    #[test]
    fn test_stack_pops_in_reverse_order() {
        let mut registers = Registers::new();
        for addr in 0..STACK_DEPTH as u16 {
            registers.push(0x200 + addr * 2).unwrap();
        }
        for addr in (0..STACK_DEPTH as u16).rev() {
            assert_eq!(registers.pop(), Ok(0x200 + addr * 2));
        }
    }

    #[test]
    fn test_push_full_overflows() {
        let mut registers = Registers::new();
        for _ in 0..STACK_DEPTH {
            registers.push(0xABC).unwrap();
        }
        assert_eq!(registers.push(0xABC), Err(Fault::StackOverflow));
        assert_eq!(registers.depth(), STACK_DEPTH);
    }

    #[test]
    fn test_pop_empty_underflows() {
        let mut registers = Registers::new();
        assert_eq!(registers.pop(), Err(Fault::StackUnderflow));
        registers.push(0xABC).unwrap();
        registers.pop().unwrap();
        assert_eq!(registers.pop(), Err(Fault::StackUnderflow));
    }

    #[test]
    fn test_tick_timers_at_zero() {
        let mut registers = Registers::new();
        assert!(!registers.tick_timers());
        assert_eq!(registers.delay_timer, 0);
        assert_eq!(registers.sound_timer, 0);
    }

    #[test]
    fn test_tick_timers_sound_edge() {
        let mut registers = Registers::new();
        registers.delay_timer = 0x3;
        registers.sound_timer = 0x2;
        assert!(!registers.tick_timers());
        assert!(registers.tick_timers());
        assert!(!registers.tick_timers());
        assert_eq!(registers.delay_timer, 0x0);
        assert_eq!(registers.sound_timer, 0x0);
    }

    #[test]
    fn test_await_and_resolve_key() {
        let mut registers = Registers::new();
        registers.await_key(0x1).unwrap();
        assert!(registers.paused());
        assert!(registers.resolve_key(0xE));
        assert!(!registers.paused());
        assert_eq!(registers.v[0x1], 0xE);
        assert!(!registers.resolve_key(0x3));
        assert_eq!(registers.v[0x1], 0xE);
    }

    #[test]
    fn test_await_key_twice() {
        let mut registers = Registers::new();
        registers.await_key(0x1).unwrap();
        assert_eq!(
            registers.await_key(0x2),
            Err(Fault::KeyWaitPending { register: 0x1 })
        );
    }

    #[test]
    fn test_reset() {
        let mut registers = Registers::new();
        registers.v[0x3] = 0x4;
        registers.i = 0x300;
        registers.pc = 0x400;
        registers.sound_timer = 0x9;
        registers.push(0x202).unwrap();
        registers.await_key(0x0).unwrap();
        registers.reset();
        assert_eq!(registers, Registers::new());
    }
}
