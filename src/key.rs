use winit::event::VirtualKeyCode;

/// Normalize a raw key identifier: lower case, trimmed.
///
/// Some platforms report the space bar as a blank identifier, so an empty
/// result becomes the literal name "space".
pub fn normalize_key(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    if key.is_empty() {
        String::from("space")
    } else {
        key
    }
}

/// Canonical lowercase name for a winit keycode.
///
/// Left/right modifier variants collapse to a single name and punctuation
/// maps to the character it types. Keycodes without a canonical name return
/// `None` and should be skipped by the caller.
pub fn key_name(code: VirtualKeyCode) -> Option<&'static str> {
    use VirtualKeyCode::*;

    let name = match code {
        // Alpha keys
        A => "a",
        B => "b",
        C => "c",
        D => "d",
        E => "e",
        F => "f",
        G => "g",
        H => "h",
        I => "i",
        J => "j",
        K => "k",
        L => "l",
        M => "m",
        N => "n",
        O => "o",
        P => "p",
        Q => "q",
        R => "r",
        S => "s",
        T => "t",
        U => "u",
        V => "v",
        W => "w",
        X => "x",
        Y => "y",
        Z => "z",

        // Number row and numpad digits
        Key1 | Numpad1 => "1",
        Key2 | Numpad2 => "2",
        Key3 | Numpad3 => "3",
        Key4 | Numpad4 => "4",
        Key5 | Numpad5 => "5",
        Key6 | Numpad6 => "6",
        Key7 | Numpad7 => "7",
        Key8 | Numpad8 => "8",
        Key9 | Numpad9 => "9",
        Key0 | Numpad0 => "0",

        // Modifiers, left/right collapsed
        LShift | RShift => "shift",
        LControl | RControl => "control",
        LAlt | RAlt => "alt",
        LWin | RWin => "meta",

        // Whitespace and editing
        Space => "space",
        Return | NumpadEnter => "enter",
        Back => "backspace",
        Tab => "tab",
        Escape => "escape",
        Capital => "capslock",
        Insert => "insert",
        Delete => "delete",

        // Arrows and navigation
        Up => "arrowup",
        Down => "arrowdown",
        Left => "arrowleft",
        Right => "arrowright",
        Home => "home",
        End => "end",
        PageUp => "pageup",
        PageDown => "pagedown",

        // Function keys
        F1 => "f1",
        F2 => "f2",
        F3 => "f3",
        F4 => "f4",
        F5 => "f5",
        F6 => "f6",
        F7 => "f7",
        F8 => "f8",
        F9 => "f9",
        F10 => "f10",
        F11 => "f11",
        F12 => "f12",

        // Punctuation, named after the character it types
        Minus => "-",
        Equals => "=",
        LBracket => "[",
        RBracket => "]",
        Backslash => "\\",
        Semicolon => ";",
        Apostrophe => "'",
        Grave => "`",
        Comma => ",",
        Period => ".",
        Slash => "/",

        _ => return None,
    };

    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(normalize_key("Shift"), "shift");
        assert_eq!(normalize_key(" W "), "w");
        assert_eq!(normalize_key("ArrowUp"), "arrowup");
    }

    #[test]
    fn test_normalize_blank_is_space() {
        assert_eq!(normalize_key(""), "space");
        assert_eq!(normalize_key(" "), "space");
        assert_eq!(normalize_key("\t"), "space");
    }

    #[test]
    fn test_key_name_letters_and_digits() {
        assert_eq!(key_name(VirtualKeyCode::W), Some("w"));
        assert_eq!(key_name(VirtualKeyCode::Key1), Some("1"));
        assert_eq!(key_name(VirtualKeyCode::Numpad1), Some("1"));
    }

    #[test]
    fn test_key_name_collapses_modifier_sides() {
        assert_eq!(key_name(VirtualKeyCode::LShift), Some("shift"));
        assert_eq!(key_name(VirtualKeyCode::RShift), Some("shift"));
        assert_eq!(key_name(VirtualKeyCode::LWin), Some("meta"));
    }

    #[test]
    fn test_key_name_unmapped() {
        assert_eq!(key_name(VirtualKeyCode::Compose), None);
        assert_eq!(key_name(VirtualKeyCode::VolumeUp), None);
    }

    #[test]
    fn test_key_name_is_already_normalized() {
        for code in [
            VirtualKeyCode::A,
            VirtualKeyCode::Space,
            VirtualKeyCode::Return,
            VirtualKeyCode::LShift,
            VirtualKeyCode::Up,
        ] {
            let name = key_name(code).unwrap();
            assert_eq!(normalize_key(name), name);
        }
    }
}
