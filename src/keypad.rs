use crate::{KEY_COUNT, u4};

/// The sixteen-key hex pad.
///
/// Written only by the host's input handler and read only by the interpreter. Each
/// slot is simply "physically down" or not; there is no edge or release tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the state of a key on the keypad.
    pub fn set_key(&mut self, key: u4, pressed: bool) {
        self.keys[key] = pressed;
    }

    pub fn press(&mut self, key: u4) {
        self.set_key(key, true);
    }

    pub fn release(&mut self, key: u4) {
        self.set_key(key, false);
    }

    /// Clears every slot at once.
    pub fn release_all(&mut self) {
        self.keys = [false; KEY_COUNT];
    }

    /// Looks up a key by the raw value held in a register. Values above 0xF name no key
    /// and always read as up.
    pub fn is_down(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest-numbered key that is currently down.
    pub fn first_down(&self) -> Option<u4> {
        self.keys
            .iter()
            .position(|&down| down)
            .map(|idx| u4::new(idx as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_down_prefers_lowest_index() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.first_down(), None);

        keypad.press(u4::new(0xC));
        keypad.press(u4::new(0x3));
        assert_eq!(keypad.first_down(), Some(u4::new(0x3)));

        keypad.release(u4::new(0x3));
        assert_eq!(keypad.first_down(), Some(u4::new(0xC)));
    }

    #[test]
    fn out_of_range_keys_read_as_up() {
        let mut keypad = Keypad::new();
        keypad.press(u4::new(0xF));
        assert!(keypad.is_down(0x0F));
        assert!(!keypad.is_down(0x10));
        assert!(!keypad.is_down(0xFF));
    }

    #[test]
    fn release_all_clears_every_slot() {
        let mut keypad = Keypad::new();
        for key in 0..16 {
            keypad.press(u4::new(key));
        }
        keypad.release_all();
        assert_eq!(keypad.first_down(), None);
        assert!((0..16).all(|key| !keypad.is_down(key)));
    }
}
