//! Trains: stops, capacity and live positions.

use chrono::Duration;

use super::LocalTime;
use super::board::Direction;
use super::color::{Color, ColorSet};
use super::station::{Line, Station};

/// GPS position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionPosition {
    Front,
    Middle,
    Back,
}

/// How full a train is.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainCapacity {
    pub number: String,
    pub location: Location,
    pub created_time: LocalTime,
    pub vehicle_type: String,
    pub capacity_percent: Option<i32>,
    pub capacity_color: Option<Color>,
    pub passenger_count: Option<i32>,
    pub sections: Vec<TrainSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainSection {
    pub position: SectionPosition,
    pub capacity_percent: Option<i32>,
    pub capacity_color: Option<Color>,
    pub passenger_count: Option<i32>,
    pub cars: Vec<TrainCar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainCar {
    pub car_number: String,
    /// 1 is the front of the train.
    pub position: Option<i32>,
    pub restroom: bool,
    pub capacity_percent: Option<i32>,
    pub capacity_color: Option<Color>,
    pub passenger_count: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainStop {
    pub station: Station,
    pub arrival_time: Option<LocalTime>,
    pub pickup_only: bool,
    pub dropoff_only: bool,
    pub departed: bool,
    /// `OnTime`, `Delayed`, `Cancelled`, or absent.
    pub stop_status: Option<String>,
    pub departure_time: Option<LocalTime>,
    pub stop_lines: Vec<StopLine>,
}

/// A line that connects at a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct StopLine {
    pub line: Line,
    pub color: Option<Color>,
}

/// All stops of one train.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainStopList {
    pub train_id: String,
    pub line: Line,
    pub color: Option<ColorSet>,
    pub destination: String,
    pub destination_station: Option<Station>,
    /// Transfer station, used for Long Branch connections to Bay Head.
    pub transfer_at: Option<String>,
    pub stops: Vec<TrainStop>,
    pub capacity: Vec<TrainCapacity>,
}

/// An active train. Trains show up here if they moved in the last five
/// minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleData {
    pub train_id: String,
    pub line: Line,
    pub direction: Direction,
    /// Last track circuit the train was detected on.
    pub track_circuit_id: Option<String>,
    pub last_updated: LocalTime,
    /// Scheduled departure from the next stop.
    pub departure_time: Option<LocalTime>,
    pub delay: Option<Duration>,
    pub next_stop: Option<Station>,
    pub location: Option<Location>,
}

/// Result of `isValidToken`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenValidity {
    pub valid: bool,
    pub user_id: Option<String>,
}
