//! Canonical key and mouse button codes.
//!
//! Every backend translates its native codes into these enumerations before
//! touching the state tables, so everything above the translators is
//! platform-agnostic. Left/right modifier pairs collapse into a single
//! logical code during translation; the action matcher relies on that.

/// Canonical key codes.
///
/// Translators return `Option<Key>`; native codes with no mapping yield
/// `None` and the event is discarded before it reaches any state table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Key {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Digits (top row)
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Modifiers (left/right collapsed by the translators)
    Shift,
    Control,
    Alt,
    Meta,

    // Locks
    CapsLock,
    NumLock,
    ScrollLock,

    // Navigation and editing
    Escape,
    Tab,
    Space,
    Enter,
    Backspace,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,

    // Punctuation and symbols
    Grave,
    Minus,
    Equal,
    BracketLeft,
    BracketRight,
    Backslash,
    Semicolon,
    Apostrophe,
    Comma,
    Period,
    Slash,

    // Numpad
    Kp0,
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,
    KpAdd,
    KpSubtract,
    KpMultiply,
    KpDivide,
    KpPeriod,
    KpEnter,

    // Misc
    PrintScreen,
    Pause,
    ContextMenu,
}

impl Key {
    /// Check if this is one of the four logical modifier keys.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Key::Shift | Key::Control | Key::Alt | Key::Meta)
    }

    /// Stable name used by the detailed key-state queries.
    pub fn name(&self) -> &'static str {
        match self {
            Key::A => "A",
            Key::B => "B",
            Key::C => "C",
            Key::D => "D",
            Key::E => "E",
            Key::F => "F",
            Key::G => "G",
            Key::H => "H",
            Key::I => "I",
            Key::J => "J",
            Key::K => "K",
            Key::L => "L",
            Key::M => "M",
            Key::N => "N",
            Key::O => "O",
            Key::P => "P",
            Key::Q => "Q",
            Key::R => "R",
            Key::S => "S",
            Key::T => "T",
            Key::U => "U",
            Key::V => "V",
            Key::W => "W",
            Key::X => "X",
            Key::Y => "Y",
            Key::Z => "Z",
            Key::Digit0 => "0",
            Key::Digit1 => "1",
            Key::Digit2 => "2",
            Key::Digit3 => "3",
            Key::Digit4 => "4",
            Key::Digit5 => "5",
            Key::Digit6 => "6",
            Key::Digit7 => "7",
            Key::Digit8 => "8",
            Key::Digit9 => "9",
            Key::F1 => "F1",
            Key::F2 => "F2",
            Key::F3 => "F3",
            Key::F4 => "F4",
            Key::F5 => "F5",
            Key::F6 => "F6",
            Key::F7 => "F7",
            Key::F8 => "F8",
            Key::F9 => "F9",
            Key::F10 => "F10",
            Key::F11 => "F11",
            Key::F12 => "F12",
            Key::Shift => "Shift",
            Key::Control => "Ctrl",
            Key::Alt => "Alt",
            Key::Meta => "Meta",
            Key::CapsLock => "CapsLock",
            Key::NumLock => "NumLock",
            Key::ScrollLock => "ScrollLock",
            Key::Escape => "Escape",
            Key::Tab => "Tab",
            Key::Space => "Space",
            Key::Enter => "Enter",
            Key::Backspace => "Backspace",
            Key::Insert => "Insert",
            Key::Delete => "Delete",
            Key::Home => "Home",
            Key::End => "End",
            Key::PageUp => "PageUp",
            Key::PageDown => "PageDown",
            Key::Up => "Up",
            Key::Down => "Down",
            Key::Left => "Left",
            Key::Right => "Right",
            Key::Grave => "QuoteLeft",
            Key::Minus => "Minus",
            Key::Equal => "Equal",
            Key::BracketLeft => "BracketLeft",
            Key::BracketRight => "BracketRight",
            Key::Backslash => "Backslash",
            Key::Semicolon => "Semicolon",
            Key::Apostrophe => "Apostrophe",
            Key::Comma => "Comma",
            Key::Period => "Period",
            Key::Slash => "Slash",
            Key::Kp0 => "Kp 0",
            Key::Kp1 => "Kp 1",
            Key::Kp2 => "Kp 2",
            Key::Kp3 => "Kp 3",
            Key::Kp4 => "Kp 4",
            Key::Kp5 => "Kp 5",
            Key::Kp6 => "Kp 6",
            Key::Kp7 => "Kp 7",
            Key::Kp8 => "Kp 8",
            Key::Kp9 => "Kp 9",
            Key::KpAdd => "Kp Add",
            Key::KpSubtract => "Kp Subtract",
            Key::KpMultiply => "Kp Multiply",
            Key::KpDivide => "Kp Divide",
            Key::KpPeriod => "Kp Period",
            Key::KpEnter => "Kp Enter",
            Key::PrintScreen => "PrintScreen",
            Key::Pause => "Pause",
            Key::ContextMenu => "Menu",
        }
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
    /// Extra button 1 (typically back).
    X1,
    /// Extra button 2 (typically forward).
    X2,
}

impl MouseButton {
    /// Get the button number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 3,
            MouseButton::X1 => 4,
            MouseButton::X2 => 5,
        }
    }

    /// Create a button from a 1-indexed number.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(MouseButton::Left),
            2 => Some(MouseButton::Right),
            3 => Some(MouseButton::Middle),
            4 => Some(MouseButton::X1),
            5 => Some(MouseButton::X2),
            _ => None,
        }
    }

    /// Stable name for the detailed queries.
    pub fn name(&self) -> &'static str {
        match self {
            MouseButton::Left => "Mouse Left",
            MouseButton::Right => "Mouse Right",
            MouseButton::Middle => "Mouse Middle",
            MouseButton::X1 => "Mouse X1",
            MouseButton::X2 => "Mouse X2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_predicate() {
        assert!(Key::Shift.is_modifier());
        assert!(Key::Control.is_modifier());
        assert!(Key::Alt.is_modifier());
        assert!(Key::Meta.is_modifier());
        assert!(!Key::A.is_modifier());
        assert!(!Key::CapsLock.is_modifier());
    }

    #[test]
    fn test_button_numbers_round_trip() {
        for n in 1..=5 {
            let button = MouseButton::from_number(n).unwrap();
            assert_eq!(button.number(), n);
        }
        assert_eq!(MouseButton::from_number(0), None);
        assert_eq!(MouseButton::from_number(6), None);
    }

    #[test]
    fn test_names_are_unique() {
        let keys = [Key::A, Key::Shift, Key::Space, Key::Kp0, Key::Digit0];
        let mut seen = std::collections::HashSet::new();
        for key in keys {
            assert!(seen.insert(key.name()));
        }
    }
}
