//! Backend-neutral key names.

use std::fmt;
use std::str::FromStr;

/// A key press, independent of the terminal or window backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Left,
    Right,
    Up,
    Down,
    Enter,
    Tab,
    PageUp,
    PageDown,
    Home,
    End,
    Char(char),
    F(u8),
}

/// Error for key names that do not denote a key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown key name: {0:?}")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    /// Parse a key string like "esc", "right" or "f1"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let key = match lower.as_str() {
            "esc" | "escape" => Self::Escape,
            "left" => Self::Left,
            "right" => Self::Right,
            "up" => Self::Up,
            "down" => Self::Down,
            "enter" | "return" => Self::Enter,
            "tab" => Self::Tab,
            "pgup" | "pageup" => Self::PageUp,
            "pgdn" | "pagedown" => Self::PageDown,
            "home" => Self::Home,
            "end" => Self::End,
            "space" => Self::Char(' '),
            _ => {
                if let Some(n) = lower.strip_prefix('f')
                    && let Ok(n) = n.parse::<u8>()
                {
                    Self::F(n)
                } else {
                    let mut chars = s.trim().chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Self::Char(c),
                        _ => return Err(UnknownKey(s.to_string())),
                    }
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Escape => f.write_str("esc"),
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::Enter => f.write_str("enter"),
            Self::Tab => f.write_str("tab"),
            Self::PageUp => f.write_str("pgup"),
            Self::PageDown => f.write_str("pgdn"),
            Self::Home => f.write_str("home"),
            Self::End => f.write_str("end"),
            Self::Char(' ') => f.write_str("space"),
            Self::Char(c) => write!(f, "{c}"),
            Self::F(n) => write!(f, "f{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_names() {
        assert_eq!("esc".parse(), Ok(Key::Escape));
        assert_eq!("Escape".parse(), Ok(Key::Escape));
        assert_eq!("right".parse(), Ok(Key::Right));
        assert_eq!("f1".parse(), Ok(Key::F(1)));
        assert_eq!("f".parse(), Ok(Key::Char('f')));
        assert_eq!("space".parse(), Ok(Key::Char(' ')));
        assert_eq!("ctrl-t".parse::<Key>(), Err(UnknownKey("ctrl-t".into())));
    }

    #[test]
    fn test_display_roundtrip() {
        for key in [Key::Escape, Key::Left, Key::Char('q'), Key::F(5), Key::Char(' ')] {
            assert_eq!(key.to_string().parse(), Ok(key));
        }
    }
}
