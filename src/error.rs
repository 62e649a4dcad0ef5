use thiserror::Error;

/// Conditions that indicate a corrupted program or a broken emulator.
///
/// These abort the current tick and are handed back to the embedding application,
/// which decides whether to halt or reset. Malformed input that the CPU can step
/// around is reported through [`crate::Step`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("memory access out of bounds at {address:#06X}")]
    OutOfBounds { address: usize },

    #[error("program of {size} bytes exceeds the {capacity} bytes available")]
    CapacityExceeded { size: usize, capacity: usize },

    #[error("stack overflow: attempted to push beyond stack depth")]
    StackOverflow,

    #[error("stack underflow: attempted to pop from an empty stack")]
    StackUnderflow,

    #[error("V{register:X} is already waiting for a key press")]
    KeyWaitPending { register: u8 },
}
