use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a 16 key hexadecimal keypad.
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
#[derive(Default)]
pub struct Keypad {
    pressed_keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of key; keys beyond 0xF are ignored
    pub fn press(&mut self, key: u8) {
        self.set(key, true)
    }

    pub fn release(&mut self, key: u8) {
        self.set(key, false)
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed_keys
            .get(key as usize)
            .copied()
            .unwrap_or(false)
    }

    fn set(&mut self, key: u8, pressed: bool) {
        match self.pressed_keys.get_mut(key as usize) {
            Some(state) => *state = pressed,
            None => log::warn!("ignoring key {:#04X}, the keypad only has 0x0..0xF", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keypad = Keypad::new();
        keypad.press(0xE);
        assert!(keypad.is_pressed(0xE));
        assert!(!keypad.is_pressed(0xD));
        keypad.release(0xE);
        assert!(!keypad.is_pressed(0xE));
    }

    #[test]
    fn test_ignores_unknown_keys() {
        let mut keypad = Keypad::new();
        keypad.press(0x10);
        assert!(!keypad.is_pressed(0x10));
        assert!(!keypad.is_pressed(0xFF));
    }
}
