//! Linux native code translation.
//!
//! Two native spaces feed the same canonical codes:
//! - evdev codes, read straight from /dev/input event devices
//! - X11 keycodes, reported by XRecord (X11 keycode = evdev + 8)
//!
//! Left/right modifier variants collapse into the logical modifier here.
//! Unmapped codes return `None` and the event is discarded.

use crate::keycode::{Key, MouseButton};

// X11 keycode = evdev keycode + 8
const X11_EVDEV_OFFSET: u16 = 8;

/// Translate an evdev key code to the canonical key.
pub fn evdev_code_to_key(code: u16) -> Option<Key> {
    let key = match code {
        1 => Key::Escape,
        2 => Key::Digit1,
        3 => Key::Digit2,
        4 => Key::Digit3,
        5 => Key::Digit4,
        6 => Key::Digit5,
        7 => Key::Digit6,
        8 => Key::Digit7,
        9 => Key::Digit8,
        10 => Key::Digit9,
        11 => Key::Digit0,
        12 => Key::Minus,
        13 => Key::Equal,
        14 => Key::Backspace,
        15 => Key::Tab,
        16 => Key::Q,
        17 => Key::W,
        18 => Key::E,
        19 => Key::R,
        20 => Key::T,
        21 => Key::Y,
        22 => Key::U,
        23 => Key::I,
        24 => Key::O,
        25 => Key::P,
        26 => Key::BracketLeft,
        27 => Key::BracketRight,
        28 => Key::Enter,
        29 => Key::Control, // KEY_LEFTCTRL
        30 => Key::A,
        31 => Key::S,
        32 => Key::D,
        33 => Key::F,
        34 => Key::G,
        35 => Key::H,
        36 => Key::J,
        37 => Key::K,
        38 => Key::L,
        39 => Key::Semicolon,
        40 => Key::Apostrophe,
        41 => Key::Grave,
        42 => Key::Shift, // KEY_LEFTSHIFT
        43 => Key::Backslash,
        44 => Key::Z,
        45 => Key::X,
        46 => Key::C,
        47 => Key::V,
        48 => Key::B,
        49 => Key::N,
        50 => Key::M,
        51 => Key::Comma,
        52 => Key::Period,
        53 => Key::Slash,
        54 => Key::Shift, // KEY_RIGHTSHIFT
        55 => Key::KpMultiply,
        56 => Key::Alt, // KEY_LEFTALT
        57 => Key::Space,
        58 => Key::CapsLock,
        59 => Key::F1,
        60 => Key::F2,
        61 => Key::F3,
        62 => Key::F4,
        63 => Key::F5,
        64 => Key::F6,
        65 => Key::F7,
        66 => Key::F8,
        67 => Key::F9,
        68 => Key::F10,
        69 => Key::NumLock,
        70 => Key::ScrollLock,
        71 => Key::Kp7,
        72 => Key::Kp8,
        73 => Key::Kp9,
        74 => Key::KpSubtract,
        75 => Key::Kp4,
        76 => Key::Kp5,
        77 => Key::Kp6,
        78 => Key::KpAdd,
        79 => Key::Kp1,
        80 => Key::Kp2,
        81 => Key::Kp3,
        82 => Key::Kp0,
        83 => Key::KpPeriod,
        87 => Key::F11,
        88 => Key::F12,
        96 => Key::KpEnter,
        97 => Key::Control, // KEY_RIGHTCTRL
        98 => Key::KpDivide,
        99 => Key::PrintScreen,
        100 => Key::Alt, // KEY_RIGHTALT
        102 => Key::Home,
        103 => Key::Up,
        104 => Key::PageUp,
        105 => Key::Left,
        106 => Key::Right,
        107 => Key::End,
        108 => Key::Down,
        109 => Key::PageDown,
        110 => Key::Insert,
        111 => Key::Delete,
        119 => Key::Pause,
        125 => Key::Meta, // KEY_LEFTMETA
        126 => Key::Meta, // KEY_RIGHTMETA
        127 => Key::ContextMenu,
        _ => return None,
    };
    Some(key)
}

/// Translate an X11 keycode (as reported by XRecord) to the canonical key.
pub fn x11_keycode_to_key(code: u8) -> Option<Key> {
    (code as u16)
        .checked_sub(X11_EVDEV_OFFSET)
        .and_then(evdev_code_to_key)
}

/// Translate an evdev button code (BTN_LEFT..BTN_EXTRA) to a mouse button.
pub fn evdev_code_to_button(code: u16) -> Option<MouseButton> {
    match code {
        0x110 => Some(MouseButton::Left),   // BTN_LEFT
        0x111 => Some(MouseButton::Right),  // BTN_RIGHT
        0x112 => Some(MouseButton::Middle), // BTN_MIDDLE
        0x113 => Some(MouseButton::X1),     // BTN_SIDE
        0x114 => Some(MouseButton::X2),     // BTN_EXTRA
        _ => None,
    }
}

/// Translate an X11 pointer button number to a mouse button.
///
/// Buttons 4..=7 are wheel events in X11 and are handled separately.
pub fn x11_button_to_button(code: u8) -> Option<MouseButton> {
    match code {
        1 => Some(MouseButton::Left),
        2 => Some(MouseButton::Middle),
        3 => Some(MouseButton::Right),
        8 => Some(MouseButton::X1),
        9 => Some(MouseButton::X2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x11_codes_are_evdev_plus_eight() {
        assert_eq!(x11_keycode_to_key(38), Some(Key::A));
        assert_eq!(x11_keycode_to_key(65), Some(Key::Space));
        assert_eq!(x11_keycode_to_key(9), Some(Key::Escape));
        assert_eq!(evdev_code_to_key(30), Some(Key::A));
    }

    #[test]
    fn test_left_right_modifiers_collapse() {
        assert_eq!(evdev_code_to_key(42), Some(Key::Shift));
        assert_eq!(evdev_code_to_key(54), Some(Key::Shift));
        assert_eq!(evdev_code_to_key(29), Some(Key::Control));
        assert_eq!(evdev_code_to_key(97), Some(Key::Control));
        assert_eq!(evdev_code_to_key(125), Some(Key::Meta));
        assert_eq!(evdev_code_to_key(126), Some(Key::Meta));
    }

    #[test]
    fn test_unmapped_codes_are_discarded() {
        assert_eq!(evdev_code_to_key(0), None);
        assert_eq!(evdev_code_to_key(240), None);
        assert_eq!(x11_keycode_to_key(5), None);
        assert_eq!(evdev_code_to_button(0x100), None);
    }

    #[test]
    fn test_x11_wheel_buttons_are_not_buttons() {
        for code in 4..=7 {
            assert_eq!(x11_button_to_button(code), None);
        }
        assert_eq!(x11_button_to_button(1), Some(MouseButton::Left));
        assert_eq!(x11_button_to_button(9), Some(MouseButton::X2));
    }
}
