//! RGB colours as used by styles, parsed from and printed as hex strings.

use core::fmt;
use core::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

/// An opaque 24-bit colour.
///
/// Serialises as an upper-case `#RRGGBB` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`, case-insensitively.
    ///
    /// ```rust
    /// use qrstyle::color::Color;
    ///
    /// assert_eq!(Color::from_hex("#f59e0b"), Some(Color::rgb(0xF5, 0x9E, 0x0B)));
    /// assert_eq!(Color::from_hex("fff"), Some(Color::WHITE));
    /// assert_eq!(Color::from_hex("#12345"), None);
    /// ```
    pub fn from_hex(text: &str) -> Option<Self> {
        let digits = text.trim().strip_prefix('#').unwrap_or(text.trim());
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok();
        match digits.len() {
            6 => {
                let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
                Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?))
            }
            3 => Some(Self::rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The string was not a recognisable hex colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex colour {:?}", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s).ok_or_else(|| ParseColorError(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let amber: Color = "#F59E0B".parse().unwrap();
        assert_eq!(amber, Color::rgb(245, 158, 11));
        assert_eq!(amber.to_string(), "#F59E0B");
        assert_eq!("1e40af".parse::<Color>().unwrap().to_hex(), "#1E40AF");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("".parse::<Color>().is_err());
        assert!("#GGGGGG".parse::<Color>().is_err());
        assert!("#ééé".parse::<Color>().is_err());
        assert!("#1234567".parse::<Color>().is_err());
        assert!("#+1+2+3".parse::<Color>().is_err());
        assert!("+F+F+F".parse::<Color>().is_err());
        assert!(serde_json::from_str::<Color>("\"#+1+2+3\"").is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(0, 0x11, 0x22)).unwrap();
        assert_eq!(json, "\"#001122\"");
        let back: Color = serde_json::from_str("\"#ff0080\"").unwrap();
        assert_eq!(back, Color::rgb(0xFF, 0x00, 0x80));
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }
}
