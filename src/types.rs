// Machine constants of the CHIP-8 virtual machine
pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START_ADDRESS: usize = 0x200;
/// Largest ROM that fits between the program start and the end of memory.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START_ADDRESS;

pub const REGISTER_COUNT: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const KEY_COUNT: usize = 16;

pub const DISPLAY_X: usize = 64;
pub const DISPLAY_Y: usize = 32;

/// A type alias for the CHIP-8 display buffer representation
pub type Display<T> = [[T; DISPLAY_X]; DISPLAY_Y];

/// What a single `step` did, as far as the host is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The instruction executed without touching the framebuffer.
    Continue,
    /// The framebuffer changed; the draw flag is set.
    Draw,
    /// FX0A found no key down and rewound the program counter.
    WaitingForKey,
    /// The word did not decode to any instruction and was skipped.
    UnknownOpcode { opcode: u16 },
}

/// Error types that can occur while loading a program image
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("ROM is empty")]
    EmptyRom,

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },
}
