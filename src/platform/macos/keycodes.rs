//! macOS virtual keycode translation.
//!
//! Carbon/AppKit virtual keycodes (the values CGEvent reports in
//! `KeyboardEventKeycode`). Left/right modifier variants collapse into the
//! logical modifier. Unmapped codes return `None`.

use crate::keycode::{Key, MouseButton};

/// Translate a macOS virtual keycode to the canonical key.
pub fn mac_keycode_to_key(code: u16) -> Option<Key> {
    let key = match code {
        0 => Key::A,
        1 => Key::S,
        2 => Key::D,
        3 => Key::F,
        4 => Key::H,
        5 => Key::G,
        6 => Key::Z,
        7 => Key::X,
        8 => Key::C,
        9 => Key::V,
        11 => Key::B,
        12 => Key::Q,
        13 => Key::W,
        14 => Key::E,
        15 => Key::R,
        16 => Key::Y,
        17 => Key::T,
        18 => Key::Digit1,
        19 => Key::Digit2,
        20 => Key::Digit3,
        21 => Key::Digit4,
        22 => Key::Digit6,
        23 => Key::Digit5,
        24 => Key::Equal,
        25 => Key::Digit9,
        26 => Key::Digit7,
        27 => Key::Minus,
        28 => Key::Digit8,
        29 => Key::Digit0,
        30 => Key::BracketRight,
        31 => Key::O,
        32 => Key::U,
        33 => Key::BracketLeft,
        34 => Key::I,
        35 => Key::P,
        36 => Key::Enter,
        37 => Key::L,
        38 => Key::J,
        39 => Key::Apostrophe,
        40 => Key::K,
        41 => Key::Semicolon,
        42 => Key::Backslash,
        43 => Key::Comma,
        44 => Key::Slash,
        45 => Key::N,
        46 => Key::M,
        47 => Key::Period,
        48 => Key::Tab,
        49 => Key::Space,
        50 => Key::Grave,
        51 => Key::Backspace,
        53 => Key::Escape,
        54 => Key::Meta, // right Command
        55 => Key::Meta, // Command
        56 => Key::Shift,
        57 => Key::CapsLock,
        58 => Key::Alt, // Option
        59 => Key::Control,
        60 => Key::Shift, // right Shift
        61 => Key::Alt,   // right Option
        62 => Key::Control, // right Control
        65 => Key::KpPeriod,
        67 => Key::KpMultiply,
        69 => Key::KpAdd,
        71 => Key::NumLock, // keypad Clear
        75 => Key::KpDivide,
        76 => Key::KpEnter,
        78 => Key::KpSubtract,
        82 => Key::Kp0,
        83 => Key::Kp1,
        84 => Key::Kp2,
        85 => Key::Kp3,
        86 => Key::Kp4,
        87 => Key::Kp5,
        88 => Key::Kp6,
        89 => Key::Kp7,
        91 => Key::Kp8,
        92 => Key::Kp9,
        96 => Key::F5,
        97 => Key::F6,
        98 => Key::F7,
        99 => Key::F3,
        100 => Key::F8,
        101 => Key::F9,
        103 => Key::F11,
        109 => Key::F10,
        111 => Key::F12,
        114 => Key::Insert, // Help on older keyboards
        115 => Key::Home,
        116 => Key::PageUp,
        117 => Key::Delete, // forward delete
        118 => Key::F4,
        119 => Key::End,
        120 => Key::F2,
        121 => Key::PageDown,
        122 => Key::F1,
        123 => Key::Left,
        124 => Key::Right,
        125 => Key::Down,
        126 => Key::Up,
        _ => return None,
    };
    Some(key)
}

/// Translate a CGEvent mouse button number to the canonical button.
pub fn number_to_button(button: i64) -> Option<MouseButton> {
    match button {
        0 => Some(MouseButton::Left),
        1 => Some(MouseButton::Right),
        2 => Some(MouseButton::Middle),
        3 => Some(MouseButton::X1),
        4 => Some(MouseButton::X2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_digits() {
        assert_eq!(mac_keycode_to_key(0), Some(Key::A));
        assert_eq!(mac_keycode_to_key(6), Some(Key::Z));
        assert_eq!(mac_keycode_to_key(29), Some(Key::Digit0));
        assert_eq!(mac_keycode_to_key(18), Some(Key::Digit1));
    }

    #[test]
    fn test_modifier_variants_collapse() {
        assert_eq!(mac_keycode_to_key(56), Some(Key::Shift));
        assert_eq!(mac_keycode_to_key(60), Some(Key::Shift));
        assert_eq!(mac_keycode_to_key(54), Some(Key::Meta));
        assert_eq!(mac_keycode_to_key(55), Some(Key::Meta));
        assert_eq!(mac_keycode_to_key(58), Some(Key::Alt));
        assert_eq!(mac_keycode_to_key(61), Some(Key::Alt));
    }

    #[test]
    fn test_unmapped_codes_are_discarded() {
        assert_eq!(mac_keycode_to_key(10), None);
        assert_eq!(mac_keycode_to_key(127), None);
        assert_eq!(number_to_button(5), None);
    }
}
