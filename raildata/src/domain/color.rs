//! Line and capacity colors.

use std::fmt;

/// Error returned when parsing an invalid HTML color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {input:?}: {reason}")]
pub struct InvalidColor {
    input: String,
    reason: &'static str,
}

/// An RGB color, as used by the API to render line names and capacity.
///
/// # Examples
///
/// ```
/// use raildata::domain::Color;
///
/// let red = Color::parse_html("#DD3439").unwrap();
/// assert_eq!(red.rgb(), (0xDD, 0x34, 0x39));
/// assert_eq!(Color::parse_html("#fff").unwrap().html(), "#ffffff");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color([u8; 3]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Build a color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8])
    }

    /// Parse `#RGB` or `#RRGGBB`.
    pub fn parse_html(s: &str) -> Result<Self, InvalidColor> {
        let invalid = |reason| InvalidColor {
            input: s.to_string(),
            reason,
        };

        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| invalid("must start with #"))?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("must contain only hex digits"));
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid("must have 3 or 6 hex digits")),
        };

        let hex = u32::from_str_radix(&expanded, 16).map_err(|_| invalid("not a hex number"))?;
        Ok(Self::from_hex(hex))
    }

    /// Lowercase `#rrggbb` form.
    pub fn html(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.0[0], self.0[1], self.0[2])
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.html())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html())
    }
}

/// Colors used to render a line name on a departure board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSet {
    pub foreground: Color,
    pub background: Color,
    /// Black when the API does not send one.
    pub shadow: Color,
}
