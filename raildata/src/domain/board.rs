//! Messages and departure boards.

use chrono::Duration;

use super::LocalTime;
use super::color::ColorSet;
use super::station::{Line, Station};
use super::train::{Location, TrainCapacity, TrainStop};
use crate::reference::{StationPosition, StopCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgType {
    /// Displayed alongside other information.
    Banner,
    /// Takes over the screen.
    FullScreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Eastbound,
    Westbound,
}

/// A message or alert.
#[derive(Debug, Clone, PartialEq)]
pub struct StationMsg {
    pub msg_type: MsgType,
    /// May contain HTML markup and entities.
    pub text: String,
    pub pub_date: LocalTime,
    /// Only set for messages from third-party feeds.
    pub id: Option<String>,
    /// `NJT`, `AMT`, or absent.
    pub agency: Option<String>,
    pub source: Option<String>,
    pub station_scope: Vec<Station>,
    pub line_scope: Vec<Line>,
}

/// One station's schedule for the next 27 hours.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSchedule {
    pub station: Station,
    pub entries: Vec<ScheduleEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub departure_time: LocalTime,
    pub destination: String,
    /// Set when the destination name matches a known station.
    pub destination_station: Option<Station>,
    pub line: Line,
    pub train_id: String,
    /// Used for Long Branch connections to Bay Head.
    pub connecting_train_id: Option<String>,
    pub station_position: StationPosition,
    pub direction: Direction,
    pub dwell_time: Option<Duration>,
    pub pickup_only: bool,
    pub dropoff_only: bool,
    pub stop_code: Option<StopCode>,
}

/// The next departures from a station.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainSchedule {
    pub station: Station,
    pub messages: Vec<StationMsg>,
    pub entries: Vec<TrainScheduleEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainScheduleEntry {
    pub departure_time: LocalTime,
    pub destination: String,
    /// Track as shown on the platform signs.
    pub track: Option<String>,
    pub line: Line,
    /// Display name for the service; the line may be Amtrak while this says
    /// "Acela Express".
    pub line_name: Option<String>,
    pub train_id: String,
    pub connecting_train_id: Option<String>,
    pub status: Option<String>,
    pub delay: Option<Duration>,
    pub last_updated: Option<LocalTime>,
    pub color: Option<ColorSet>,
    pub gps_location: Option<Location>,
    pub gps_time: Option<LocalTime>,
    pub station_position: StationPosition,
    pub inline_message: Option<String>,
    pub capacity: Vec<TrainCapacity>,
    /// Only filled in by `getTrainSchedule`.
    pub stops: Vec<TrainStop>,
}
