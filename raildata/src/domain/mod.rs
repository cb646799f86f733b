//! Typed model of RailData results.
//!
//! Wire payloads are converted into these types by [`crate::convert`].
//! Stations and lines are always canonical catalog entries or synthesized
//! placeholders, never raw strings; timestamps are in New Jersey local time.

mod board;
mod codes;
mod color;
mod station;
mod train;

use chrono::DateTime;
use chrono_tz::Tz;

pub use board::{
    Direction, MsgType, ScheduleEntry, StationMsg, StationSchedule, TrainSchedule,
    TrainScheduleEntry,
};
pub use codes::{LineCode, StationCode};
pub use color::{Color, ColorSet, InvalidColor};
pub use station::{Line, Station};
pub use train::{
    Location, SectionPosition, StopLine, TokenValidity, TrainCapacity, TrainCar, TrainSection,
    TrainStop, TrainStopList, VehicleData,
};

/// The zone all API timestamps are expressed in.
pub const RAIL_TIME_ZONE: Tz = chrono_tz::America::New_York;

/// A timestamp in [`RAIL_TIME_ZONE`].
pub type LocalTime = DateTime<Tz>;
