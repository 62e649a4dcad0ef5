use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Error, Result};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use display::Display;
use emu8::constants::FRAME_RATE;
use emu8::{Chip8, Config};

use crate::keymap::keymap;

pub fn run(rom: &Path, config: Config, scale: u32) -> Result<()> {
    let mut chip8 = Chip8::new(config);

    // Load ROM
    let file = File::open(rom).with_context(|| format!("unable to open {}", rom.display()))?;
    let mut reader = BufReader::new(file);
    chip8
        .load_rom_from(&mut reader)
        .with_context(|| format!("unable to load {}", rom.display()))?;
    log::info!("loaded {}", rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(Error::msg)?;
    let mut display = Display::new(&sdl, scale).map_err(Error::msg)?;
    let mut events = sdl.event_pump().map_err(Error::msg)?;

    // Set initial timing
    let frame_time = Duration::from_secs(1) / FRAME_RATE;
    let mut last_frame = Instant::now();

    // Whether or not the frame rate should be respected
    let mut fast_forward = false;
    let mut sounding = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        chip8.run_frame().context("emulation halted")?;

        if chip8.sound_active() != sounding {
            sounding = !sounding;
            log::info!("tone {}", if sounding { "on" } else { "off" });
        }

        // If the frame changed, render it
        if let Some(frame) = chip8.take_frame() {
            display.render(frame).map_err(Error::msg)?;
        }

        // Handle timing
        let elapsed = last_frame.elapsed();
        if !fast_forward && frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
        last_frame = Instant::now();
    }

    Ok(())
}
