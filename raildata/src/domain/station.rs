//! Stations and lines.

use super::codes::{LineCode, StationCode};
use super::color::Color;

/// A station.
///
/// `aliases` are alternative spellings the API uses for this station. They
/// are only used for lookup, never for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub code: StationCode,
    pub name: String,
    /// Shorter form of the name, at most 14 characters.
    pub short_name: String,
    pub aliases: Vec<String>,
}

impl Station {
    pub fn new(
        code: impl Into<StationCode>,
        name: impl Into<String>,
        short_name: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            short_name: short_name.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_aliases<S: Into<String>>(mut self, aliases: impl IntoIterator<Item = S>) -> Self {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}

/// A rail line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub code: LineCode,
    pub name: String,
    /// 3 to 5 letter abbreviation, such as `NEC`.
    pub abbreviation: String,
    /// Other abbreviations the API uses for this line.
    pub other_abbreviations: Vec<String>,
    /// `None` for lines that are not in the built-in table.
    pub color: Option<Color>,
    pub aliases: Vec<String>,
}

impl Line {
    pub fn new(
        code: impl Into<LineCode>,
        name: impl Into<String>,
        abbreviation: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            abbreviation: abbreviation.into(),
            other_abbreviations: Vec::new(),
            color: None,
            aliases: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_other_abbreviations<S: Into<String>>(
        mut self,
        abbreviations: impl IntoIterator<Item = S>,
    ) -> Self {
        self.other_abbreviations = abbreviations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_aliases<S: Into<String>>(mut self, aliases: impl IntoIterator<Item = S>) -> Self {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }
}
