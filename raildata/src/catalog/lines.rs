//! Built-in line table.

use super::{Entity, UNKNOWN_CODE};
use crate::domain::{Color, Line};

struct LineSpec {
    code: &'static str,
    name: &'static str,
    abbreviation: &'static str,
    color: u32,
    other_abbreviations: &'static [&'static str],
    aliases: &'static [&'static str],
}

const LINES: &[LineSpec] = &[
    LineSpec {
        code: "AC",
        name: "Atlantic City Line",
        abbreviation: "ACRL",
        color: 0x075AAA,
        other_abbreviations: &["ATLC"],
        aliases: &["Atlantic City Rail Line", "Atl. City Line"],
    },
    LineSpec {
        code: "MC",
        name: "Montclair-Boonton Line",
        abbreviation: "MOBO",
        color: 0xE66859,
        other_abbreviations: &["BNTN", "BNTNM", "MNBTN"],
        aliases: &["Montclair-Boonton"],
    },
    LineSpec {
        code: "BC",
        name: "Bergen County Line",
        abbreviation: "BERG",
        color: 0xFFD411,
        other_abbreviations: &["MNBN"],
        aliases: &["Main/Bergen County Line", "Bergen Co. Line"],
    },
    LineSpec {
        code: "ML",
        name: "Main Line",
        abbreviation: "MAIN",
        color: 0xFFD411,
        other_abbreviations: &["MNBN"],
        aliases: &["Port Jervis Line"],
    },
    LineSpec {
        code: "ME",
        name: "Morris & Essex Line",
        abbreviation: "M&E",
        color: 0x08A652,
        other_abbreviations: &["MNE"],
        aliases: &["Morristown Line"],
    },
    LineSpec {
        code: "GS",
        name: "Gladstone Branch",
        abbreviation: "M&E",
        color: 0xA4C9AA,
        other_abbreviations: &["MNEG"],
        aliases: &[],
    },
    LineSpec {
        code: "NE",
        name: "Northeast Corridor Line",
        abbreviation: "NEC",
        color: 0xDD3439,
        other_abbreviations: &[],
        aliases: &["Northeast Corridor", "Northeast Corrdr"],
    },
    LineSpec {
        code: "NC",
        name: "North Jersey Coast Line",
        abbreviation: "NJCL",
        color: 0x03A3DF,
        other_abbreviations: &["NJCLL"],
        aliases: &["No Jersey Coast"],
    },
    LineSpec {
        code: "PV",
        name: "Pascack Valley Line",
        abbreviation: "PASC",
        color: 0x94219A,
        other_abbreviations: &[],
        aliases: &["Pascack Valley"],
    },
    LineSpec {
        code: "PR",
        name: "Princeton Branch",
        abbreviation: "PRIN",
        color: 0xDD3439,
        other_abbreviations: &[],
        aliases: &["Princeton Shuttle"],
    },
    LineSpec {
        code: "RV",
        name: "Raritan Valley Line",
        abbreviation: "RARV",
        color: 0xF2A537,
        other_abbreviations: &[],
        aliases: &["Raritan Valley"],
    },
    LineSpec {
        code: "SL",
        name: "BetMGM Meadowlands",
        abbreviation: "BMGM",
        color: 0xC1AA72,
        other_abbreviations: &[],
        aliases: &[],
    },
    LineSpec {
        code: "AM",
        name: "Amtrak",
        abbreviation: "AMTK",
        color: 0xFFFF00,
        other_abbreviations: &[],
        aliases: &[],
    },
    LineSpec {
        code: "SP",
        name: "Septa",
        abbreviation: "SEPTA",
        color: 0x1F4FA3,
        other_abbreviations: &[],
        aliases: &[],
    },
];

pub fn builtin_lines() -> Vec<Line> {
    LINES
        .iter()
        .map(|spec| {
            Line::new(spec.code, spec.name, spec.abbreviation)
                .with_color(Color::from_hex(spec.color))
                .with_other_abbreviations(spec.other_abbreviations.iter().copied())
                .with_aliases(spec.aliases.iter().copied())
        })
        .collect()
}

impl Entity for Line {
    fn code(&self) -> &str {
        self.code.as_str()
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    fn abbreviations(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.abbreviation.as_str())
            .chain(self.other_abbreviations.iter().map(String::as_str))
    }

    fn synthesize(code: Option<&str>, name: Option<&str>) -> Self {
        let code = code.unwrap_or(UNKNOWN_CODE);
        let name = name.map_or_else(|| format!("Unknown {code}"), str::to_string);
        Line::new(code, name, format!("{UNKNOWN_CODE}{code}"))
    }
}
