use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

use emu8::constants::TICKS_PER_FRAME;
use emu8::Config;

mod keymap;
mod run;

/// Run a Chip-8 ROM in an SDL2 window
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the ROM to run
    rom: PathBuf,

    /// Instructions executed per rendered frame
    #[arg(short, long, default_value_t = TICKS_PER_FRAME)]
    ticks_per_frame: usize,

    /// Seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,

    /// Window pixels per Chip-8 pixel
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Log more; repeat for debug and trace output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let config = Config {
        ticks_per_frame: args.ticks_per_frame,
        seed: args.seed,
    };
    run::run(&args.rom, config, args.scale)
}
