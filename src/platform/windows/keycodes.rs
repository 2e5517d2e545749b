//! Windows virtual-key translation.
//!
//! The low-level hooks report left/right modifier variants (VK_LSHIFT and
//! friends); the polling backend also samples the generic VK_SHIFT family.
//! All of them collapse onto the logical modifier. Unmapped VKs return
//! `None` and the event is discarded.

use crate::keycode::{Key, MouseButton};

/// Translate a Windows virtual-key code to the canonical key.
pub fn vk_to_key(vk: u32) -> Option<Key> {
    let key = match vk {
        0x08 => Key::Backspace,
        0x09 => Key::Tab,
        0x0D => Key::Enter,
        0x10 | 0xA0 | 0xA1 => Key::Shift, // VK_SHIFT, VK_LSHIFT, VK_RSHIFT
        0x11 | 0xA2 | 0xA3 => Key::Control,
        0x12 | 0xA4 | 0xA5 => Key::Alt,
        0x13 => Key::Pause,
        0x14 => Key::CapsLock,
        0x1B => Key::Escape,
        0x20 => Key::Space,
        0x21 => Key::PageUp,
        0x22 => Key::PageDown,
        0x23 => Key::End,
        0x24 => Key::Home,
        0x25 => Key::Left,
        0x26 => Key::Up,
        0x27 => Key::Right,
        0x28 => Key::Down,
        0x2C => Key::PrintScreen,
        0x2D => Key::Insert,
        0x2E => Key::Delete,

        0x30 => Key::Digit0,
        0x31 => Key::Digit1,
        0x32 => Key::Digit2,
        0x33 => Key::Digit3,
        0x34 => Key::Digit4,
        0x35 => Key::Digit5,
        0x36 => Key::Digit6,
        0x37 => Key::Digit7,
        0x38 => Key::Digit8,
        0x39 => Key::Digit9,

        0x41 => Key::A,
        0x42 => Key::B,
        0x43 => Key::C,
        0x44 => Key::D,
        0x45 => Key::E,
        0x46 => Key::F,
        0x47 => Key::G,
        0x48 => Key::H,
        0x49 => Key::I,
        0x4A => Key::J,
        0x4B => Key::K,
        0x4C => Key::L,
        0x4D => Key::M,
        0x4E => Key::N,
        0x4F => Key::O,
        0x50 => Key::P,
        0x51 => Key::Q,
        0x52 => Key::R,
        0x53 => Key::S,
        0x54 => Key::T,
        0x55 => Key::U,
        0x56 => Key::V,
        0x57 => Key::W,
        0x58 => Key::X,
        0x59 => Key::Y,
        0x5A => Key::Z,

        0x5B | 0x5C => Key::Meta, // VK_LWIN, VK_RWIN
        0x5D => Key::ContextMenu,

        0x60 => Key::Kp0,
        0x61 => Key::Kp1,
        0x62 => Key::Kp2,
        0x63 => Key::Kp3,
        0x64 => Key::Kp4,
        0x65 => Key::Kp5,
        0x66 => Key::Kp6,
        0x67 => Key::Kp7,
        0x68 => Key::Kp8,
        0x69 => Key::Kp9,
        0x6A => Key::KpMultiply,
        0x6B => Key::KpAdd,
        0x6D => Key::KpSubtract,
        0x6E => Key::KpPeriod,
        0x6F => Key::KpDivide,

        0x70 => Key::F1,
        0x71 => Key::F2,
        0x72 => Key::F3,
        0x73 => Key::F4,
        0x74 => Key::F5,
        0x75 => Key::F6,
        0x76 => Key::F7,
        0x77 => Key::F8,
        0x78 => Key::F9,
        0x79 => Key::F10,
        0x7A => Key::F11,
        0x7B => Key::F12,

        0x90 => Key::NumLock,
        0x91 => Key::ScrollLock,

        0xBA => Key::Semicolon,    // VK_OEM_1
        0xBB => Key::Equal,        // VK_OEM_PLUS
        0xBC => Key::Comma,        // VK_OEM_COMMA
        0xBD => Key::Minus,        // VK_OEM_MINUS
        0xBE => Key::Period,       // VK_OEM_PERIOD
        0xBF => Key::Slash,        // VK_OEM_2
        0xC0 => Key::Grave,        // VK_OEM_3
        0xDB => Key::BracketLeft,  // VK_OEM_4
        0xDC => Key::Backslash,    // VK_OEM_5
        0xDD => Key::BracketRight, // VK_OEM_6
        0xDE => Key::Apostrophe,   // VK_OEM_7
        _ => return None,
    };
    Some(key)
}

/// Translate a mouse virtual-key code to the canonical button.
pub fn vk_to_button(vk: u32) -> Option<MouseButton> {
    match vk {
        0x01 => Some(MouseButton::Left),   // VK_LBUTTON
        0x02 => Some(MouseButton::Right),  // VK_RBUTTON
        0x04 => Some(MouseButton::Middle), // VK_MBUTTON
        0x05 => Some(MouseButton::X1),     // VK_XBUTTON1
        0x06 => Some(MouseButton::X2),     // VK_XBUTTON2
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_variants_collapse() {
        assert_eq!(vk_to_key(0x10), Some(Key::Shift));
        assert_eq!(vk_to_key(0xA0), Some(Key::Shift));
        assert_eq!(vk_to_key(0xA1), Some(Key::Shift));
        assert_eq!(vk_to_key(0x5B), Some(Key::Meta));
        assert_eq!(vk_to_key(0x5C), Some(Key::Meta));
    }

    #[test]
    fn test_unmapped_vks_are_discarded() {
        assert_eq!(vk_to_key(0x00), None);
        assert_eq!(vk_to_key(0x07), None);
        assert_eq!(vk_to_key(0xFF), None);
        assert_eq!(vk_to_button(0x03), None); // VK_CANCEL is not a button
    }
}
