//! Secondary reference tables: train id prefixes, special tracks, station
//! positions and stop codes.
//!
//! Lookups that miss return a made-up entry describing the unknown code, so
//! conversion never fails on a value the tables do not know about.

use std::borrow::Cow;

use crate::domain::StationCode;

/// Meaning of a special train number prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainIdPrefix {
    pub prefix: &'static str,
    pub description: &'static str,
}

pub const TRAIN_ID_PREFIXES: &[TrainIdPrefix] = &[
    TrainIdPrefix {
        prefix: "A",
        description: "Amtrak Train",
    },
    TrainIdPrefix {
        prefix: "S",
        description: "Septa Train",
    },
    TrainIdPrefix {
        prefix: "X",
        description: "Non-Revenue train - Does not accept passengers",
    },
];

/// The prefix entry that applies to a train id, if any.
pub fn train_id_prefix(train_id: &str) -> Option<&'static TrainIdPrefix> {
    TRAIN_ID_PREFIXES
        .iter()
        .find(|p| train_id.starts_with(p.prefix))
}

/// A track number the API reports differently from the platform signage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialTrack {
    pub id: &'static str,
    pub station: &'static str,
    pub translation: &'static str,
}

const fn track(id: &'static str, station: &'static str, translation: &'static str) -> SpecialTrack {
    SpecialTrack {
        id,
        station,
        translation,
    }
}

pub const SPECIAL_TRACKS: &[SpecialTrack] = &[
    track("Single", "ON", "1"),
    track("2", "MP", "1"),
    track("B", "UV", "2"),
    track("Single", "UV", "1"),
    track("0", "NA", "A"),
    track("4", "TS", "E"),
    track("2", "TS", "F"),
    track("3", "TS", "H"),
    track("1", "TS", "G"),
    track("Single", "ST", "S"),
];

/// The track name passengers see for an API track id at a station.
///
/// Returns `track_id` unchanged when no translation exists.
pub fn translate_track_number<'a>(track_id: &'a str, station: &StationCode) -> &'a str {
    SPECIAL_TRACKS
        .iter()
        .find(|t| t.id == track_id && t.station == station.as_str())
        .map_or(track_id, |t| t.translation)
}

/// A station's position along a trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationPosition {
    pub code: Cow<'static, str>,
    pub description: Cow<'static, str>,
}

const STATION_POSITIONS: &[(&str, &str)] = &[
    ("0", "First station"),
    ("1", "Intermediate station"),
    ("2", "Final station"),
];

pub fn station_position(code: &str) -> StationPosition {
    match STATION_POSITIONS.iter().find(|(c, _)| *c == code) {
        Some((c, description)) => StationPosition {
            code: Cow::Borrowed(c),
            description: Cow::Borrowed(description),
        },
        None => StationPosition {
            code: Cow::Owned(code.to_string()),
            description: Cow::Owned(format!("Unknown station position \"{code}\"")),
        },
    }
}

/// How a train behaves at a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopCode {
    pub code: Cow<'static, str>,
    pub description: Cow<'static, str>,
}

const STOP_CODES: &[(&str, &str)] = &[
    ("A", "Arrival time"),
    ("S", "Normal Stop"),
    ("S*", "Normal stop. May leave up to 3 minutes early"),
    ("LV", "Leaves 1 minute after scheduled time"),
    (
        "L",
        "Train can leave before scheduled departure. Will hold for connections",
    ),
    (
        "H",
        "Will hold for connection unless authorize by dispatcher",
    ),
    (
        "D",
        "Stop to discharge passengers only. May leave ahead of schedule",
    ),
    ("R", "Stop to receive passengers only"),
    (
        "R*",
        "Stop to receive passengers only. May leave 3 minutes early",
    ),
    ("E", "Employee stop. May leave ahead of schedule"),
];

pub fn stop_code(code: &str) -> StopCode {
    match STOP_CODES.iter().find(|(c, _)| *c == code) {
        Some((c, description)) => StopCode {
            code: Cow::Borrowed(c),
            description: Cow::Borrowed(description),
        },
        None => StopCode {
            code: Cow::Owned(code.to_string()),
            description: Cow::Owned(format!("Unknown stop code \"{code}\"")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_known_tracks() {
        assert_eq!(translate_track_number("Single", &StationCode::new("UV")), "1");
        assert_eq!(translate_track_number("4", &StationCode::new("TS")), "E");
        assert_eq!(translate_track_number("0", &StationCode::new("NA")), "A");
    }

    #[test]
    fn leaves_other_tracks_alone() {
        assert_eq!(translate_track_number("4", &StationCode::new("NY")), "4");
        assert_eq!(translate_track_number("Single", &StationCode::new("TS")), "Single");
    }

    #[test]
    fn known_station_position() {
        let pos = station_position("2");
        assert_eq!(pos.description, "Final station");
    }

    #[test]
    fn unknown_station_position_is_described() {
        let pos = station_position("7");
        assert_eq!(pos.code, "7");
        assert_eq!(pos.description, "Unknown station position \"7\"");
    }

    #[test]
    fn stop_codes() {
        assert_eq!(stop_code("S*").description, "Normal stop. May leave up to 3 minutes early");
        assert_eq!(stop_code("Q").description, "Unknown stop code \"Q\"");
    }

    #[test]
    fn prefixes() {
        assert_eq!(train_id_prefix("A2150").map(|p| p.description), Some("Amtrak Train"));
        assert_eq!(train_id_prefix("X123").map(|p| p.prefix), Some("X"));
        assert!(train_id_prefix("3837").is_none());
    }
}
