use rand::RngCore;

use crate::error::Fault;
use crate::memory::Memory;
use crate::registers::Registers;

/// The devices a Chip-8 drives: a monochrome display, a hexadecimal keypad and a buzzer.
///
/// Implementations decide how pixels are shown and how keys are read; the CPU
/// only needs these few capabilities.
pub trait Peripherals {
    /// XOR `sprite` onto the display at (x, y), one byte per row.
    ///
    /// Returns whether any pixel was switched from set to unset.
    /// An empty sprite clears the display.
    fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool;

    fn is_key_pressed(&self, key: u8) -> bool;

    /// Called once per executed instruction, after the timers were counted down.
    /// `silenced` is true on the tick where the sound timer reached 0.
    fn on_timer_tick(&mut self, _sound_timer: u8, _silenced: bool) {}
}

/// Everything an operation may touch while it executes.
///
/// Borrowed from the emulator for the duration of a single tick.
pub struct ExecutionContext<'a> {
    pub registers: &'a mut Registers,
    pub memory: &'a mut Memory,
    pub peripherals: &'a mut dyn Peripherals,
    pub rng: &'a mut dyn RngCore,
}

impl<'a> ExecutionContext<'a> {
    /// Draw the `height` byte sprite at I to (x, y), returning whether it collided.
    ///
    /// A zero height sprite draws nothing; an empty sprite would clear the display.
    pub fn draw_sprite(&mut self, x: u8, y: u8, height: usize) -> Result<bool, Fault> {
        if height == 0 {
            return Ok(false);
        }
        let start = usize::from(self.registers.i);
        let sprite = self.memory.slice(start, start + height)?;
        Ok(self.peripherals.draw_sprite(x, y, sprite))
    }

    pub fn clear_screen(&mut self) {
        self.peripherals.draw_sprite(0, 0, &[]);
    }

    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.peripherals.is_key_pressed(key)
    }

    /// Pause until the next key press, which will be written to Vx.
    pub fn wait_for_key(&mut self, register: u8) -> Result<(), Fault> {
        self.registers.await_key(register)?;
        log::debug!("waiting for a key press into V{:X}", register);
        Ok(())
    }

    pub fn decrement_timers(&mut self) {
        let silenced = self.registers.tick_timers();
        self.peripherals
            .on_timer_tick(self.registers.sound_timer, silenced);
    }

    pub fn random_byte(&mut self) -> u8 {
        (self.rng.next_u32() & 0xFF) as u8
    }
}
