use crate::{Keypad, u4};

/// Mapping from physical keyboard keys to CHIP-8 keypad slots, in reading order:
/// the four left-hand keyboard rows cover slots 0x0-0xF.
pub const KEY_MAP: [char; 16] = [
    '1', '2', '3', '4', // 0x0 - 0x3
    'q', 'w', 'e', 'r', // 0x4 - 0x7
    'a', 's', 'd', 'f', // 0x8 - 0xB
    'z', 'x', 'c', 'v', // 0xC - 0xF
];

/// A key transition reported by the host's input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(char),
    Up(char),
}

/// Pad slot for a physical key, case-insensitive.
pub fn key_index(key: char) -> Option<u4> {
    let key = key.to_ascii_lowercase();
    KEY_MAP
        .iter()
        .position(|&k| k == key)
        .map(|idx| u4::new(idx as u8))
}

/// Applies a host key event to the keypad.
///
/// A key-down sets only its own slot. Any key-up clears the whole pad, whichever key was
/// released. Returns whether the event touched the pad.
pub fn apply_key_event(keypad: &mut Keypad, event: KeyEvent) -> bool {
    match event {
        KeyEvent::Down(key) => match key_index(key) {
            Some(idx) => {
                keypad.press(idx);
                true
            }
            None => false,
        },
        KeyEvent::Up(_) => {
            keypad.release_all();
            true
        }
    }
}
