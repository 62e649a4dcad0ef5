use crate::constants::TICKS_PER_FRAME;

/// Runtime settings for a `Chip8`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed by each call to `run_frame`
    pub ticks_per_frame: usize,
    /// Seed for the random number instruction; taken from the OS when unset
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ticks_per_frame: TICKS_PER_FRAME,
            seed: None,
        }
    }
}
