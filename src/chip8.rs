use std::io::{self, Read};

use crate::config::Config;
use crate::context::Peripherals;
use crate::cpu::{Cpu, Step};
use crate::error::Fault;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::screen::{FrameBuffer, Screen};

/// The built-in display and keypad the CPU drives
struct Devices {
    screen: Screen,
    keypad: Keypad,
}

impl Peripherals for Devices {
    fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        self.screen.draw_sprite(x, y, sprite)
    }

    fn is_key_pressed(&self, key: u8) -> bool {
        self.keypad.is_pressed(key)
    }

    fn on_timer_tick(&mut self, _sound_timer: u8, silenced: bool) {
        if silenced {
            log::debug!("sound timer expired");
        }
    }
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns its memory, CPU, frame buffer and keypad.
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU by an instruction or a frame's worth of instructions
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    cpu: Cpu,
    memory: Memory,
    devices: Devices,
    config: Config,
}

impl Chip8 {
    pub fn new(config: Config) -> Self {
        Chip8 {
            cpu: Cpu::new(config.seed),
            memory: Memory::new(),
            devices: Devices {
                screen: Screen::new(),
                keypad: Keypad::new(),
            },
            config,
        }
    }

    /// Reset the machine and load `rom` at the program start
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Fault> {
        self.memory.reset();
        self.cpu.reset();
        self.devices.screen.clear();
        self.memory.load_program(rom)
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom_from(&mut self, reader: &mut dyn Read) -> io::Result<()> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.load_rom(&rom)
            .map_err(|fault| io::Error::new(io::ErrorKind::InvalidData, fault))
    }

    /// Execute a single instruction
    pub fn tick(&mut self) -> Result<Step, Fault> {
        self.cpu.tick(&mut self.memory, &mut self.devices)
    }

    /// Execute `ticks_per_frame` ticks, returning how many instructions ran
    pub fn run_frame(&mut self) -> Result<usize, Fault> {
        let mut executed = 0;
        for _ in 0..self.config.ticks_per_frame {
            executed += self.tick()?.count();
        }
        Ok(executed)
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.devices.keypad.press(key);
        if self.cpu.registers.paused() && self.devices.keypad.is_pressed(key) {
            self.cpu.registers.resolve_key(key);
            log::debug!("key {:X} resumed execution", key);
        }
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.devices.keypad.release(key);
    }

    pub fn frame(&self) -> &FrameBuffer {
        self.devices.screen.frame()
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        self.devices.screen.take_frame()
    }

    /// Whether a tone should currently be playing
    pub fn sound_active(&self) -> bool {
        self.cpu.registers.sound_timer > 0
    }

    pub fn paused(&self) -> bool {
        self.cpu.registers.paused()
    }

    pub fn registers(&self) -> &Registers {
        &self.cpu.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
