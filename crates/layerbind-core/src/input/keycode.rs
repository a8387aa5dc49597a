//! Keyboard key codes.
//!
//! Each variant's discriminant is its USB HID Usage ID on the Keyboard/Keypad
//! page (0x07), so a key code identifies a *physical key position*, not the
//! character the active keyboard layout would produce.  Variant names double
//! as the human-readable form used in configuration files and in
//! [`BindingStore::layer_binds`](crate::BindingStore::layer_binds) output.

/// Declares [`KeyCode`] together with its name table so the two cannot drift.
macro_rules! key_codes {
    ($($variant:ident = $hid:literal),+ $(,)?) => {
        /// A keyboard key, numbered by USB HID usage.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum KeyCode {
            $($variant = $hid),+
        }

        impl KeyCode {
            /// Every key code, in ascending HID order.
            pub const ALL: &'static [KeyCode] = &[$(KeyCode::$variant),+];

            /// Returns the canonical name of this key (e.g. `"Space"`).
            pub fn name(self) -> &'static str {
                match self {
                    $(KeyCode::$variant => stringify!($variant)),+
                }
            }

            /// Looks up a key code by name, ignoring ASCII case.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|code| code.name().eq_ignore_ascii_case(name))
            }
        }
    };
}

key_codes! {
    A = 0x04, B = 0x05, C = 0x06, D = 0x07, E = 0x08, F = 0x09, G = 0x0A,
    H = 0x0B, I = 0x0C, J = 0x0D, K = 0x0E, L = 0x0F, M = 0x10, N = 0x11,
    O = 0x12, P = 0x13, Q = 0x14, R = 0x15, S = 0x16, T = 0x17, U = 0x18,
    V = 0x19, W = 0x1A, X = 0x1B, Y = 0x1C, Z = 0x1D,

    One = 0x1E, Two = 0x1F, Three = 0x20, Four = 0x21, Five = 0x22,
    Six = 0x23, Seven = 0x24, Eight = 0x25, Nine = 0x26, Zero = 0x27,

    Return = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equals = 0x2E,
    LeftBracket = 0x2F,
    RightBracket = 0x30,
    BackSlash = 0x31,
    Semicolon = 0x33,
    Quote = 0x34,
    Backquote = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,
    CapsLock = 0x39,

    F1 = 0x3A, F2 = 0x3B, F3 = 0x3C, F4 = 0x3D, F5 = 0x3E, F6 = 0x3F,
    F7 = 0x40, F8 = 0x41, F9 = 0x42, F10 = 0x43, F11 = 0x44, F12 = 0x45,

    Print = 0x46,
    ScrollLock = 0x47,
    Pause = 0x48,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    Right = 0x4F,
    Left = 0x50,
    Down = 0x51,
    Up = 0x52,

    NumLock = 0x53,
    KeypadDivide = 0x54,
    KeypadMultiply = 0x55,
    KeypadMinus = 0x56,
    KeypadPlus = 0x57,
    KeypadEnter = 0x58,
    KeypadOne = 0x59, KeypadTwo = 0x5A, KeypadThree = 0x5B,
    KeypadFour = 0x5C, KeypadFive = 0x5D, KeypadSix = 0x5E,
    KeypadSeven = 0x5F, KeypadEight = 0x60, KeypadNine = 0x61,
    KeypadZero = 0x62,
    KeypadPeriod = 0x63,
    Menu = 0x65,

    LeftControl = 0xE0,
    LeftShift = 0xE1,
    LeftAlt = 0xE2,
    LeftSuper = 0xE3,
    RightControl = 0xE4,
    RightShift = 0xE5,
    RightAlt = 0xE6,
    RightSuper = 0xE7,
}
