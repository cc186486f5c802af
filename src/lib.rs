//! A CHIP-8 interpreter core.
//!
//! [`Chip8`] owns the whole machine. A host loads a program image, calls
//! [`Chip8::step`] at its own pace, writes key state through [`Chip8::keypad_mut`] and
//! repaints from [`Chip8::display`] whenever the draw flag is raised.

mod chip8;
mod dump;
mod execute;
mod font;
mod keypad;
mod keymap;
mod nibble;
mod opcode;
mod runner;
mod trace;
mod types;

pub use chip8::*;
pub use font::*;
pub use keymap::*;
pub use keypad::*;
pub use nibble::u4;
pub use opcode::*;
pub use runner::*;
pub use trace::*;
pub use types::*;
