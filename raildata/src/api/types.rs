//! RailData wire DTOs.
//!
//! Request types serialize into form fields using the API's field names.
//! Response types map directly to the JSON the API returns. Almost every
//! value arrives as a string, and the API sends `null` or omits fields
//! freely, so response fields are `Option` throughout.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::method::TokenCarrier;

/// Request for `getToken`.
#[derive(Clone, Default, Serialize)]
pub struct GetTokenRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for GetTokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetTokenRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Request carrying nothing but the token.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetStationMsgRequest {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetStationScheduleRequest {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(rename = "NJTOnly")]
    pub njt_only: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetTrainScheduleRequest {
    pub token: String,
    pub station: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetTrainSchedule19RecRequest {
    pub token: String,
    pub station: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetTrainStopListRequest {
    pub token: String,
    pub train: String,
}

macro_rules! impl_token_carrier {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TokenCarrier for $ty {
                fn token(&self) -> &str {
                    &self.token
                }

                fn set_token(&mut self, token: String) {
                    self.token = token;
                }
            }
        )*
    };
}

impl_token_carrier!(
    TokenRequest,
    GetStationMsgRequest,
    GetStationScheduleRequest,
    GetTrainScheduleRequest,
    GetTrainSchedule19RecRequest,
    GetTrainStopListRequest,
);

/// Error body sent with non-2xx statuses.
///
/// Any JSON object is accepted; a missing message becomes an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorEnvelope {
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

/// Response from `getToken`.
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GetTokenResponse {
    /// `"True"` when the username and password were accepted.
    pub authenticated: Option<String>,
    pub user_token: Option<String>,
}

impl fmt::Debug for GetTokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GetTokenResponse")
            .field("authenticated", &self.authenticated)
            .field("user_token", &self.user_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Response from `isValidToken`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ValidTokenResponse {
    #[serde(rename = "validToken")]
    pub valid_token: bool,
    #[serde(rename = "userID")]
    pub user_id: Option<String>,
}

/// An entry of `getStationList`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct GetStations {
    pub station_2char: Option<String>,
    #[serde(rename = "STATIONNAME")]
    pub station_name: Option<String>,
    pub station_14char: Option<String>,
}

/// A message or alert, from `getStationMSG` and inline in schedules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StationMsgs {
    pub msg_type: Option<String>,
    pub msg_text: Option<String>,
    pub msg_pubdate: Option<String>,
    pub msg_id: Option<String>,
    pub msg_agency: Option<String>,
    pub msg_source: Option<String>,
    pub msg_station_scope: Option<String>,
    pub msg_line_scope: Option<String>,
    pub msg_pubdate_utc: Option<String>,
}

/// A station's 27-hour schedule, from `getStationSchedule`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DailyStationInfo {
    pub station_2char: Option<String>,
    #[serde(rename = "STATIONNAME")]
    pub station_name: Option<String>,
    pub items: Option<Vec<DailyScheduleInfo>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DailyScheduleInfo {
    pub sched_dep_date: Option<String>,
    pub destination: Option<String>,
    pub track: Option<String>,
    pub line: Option<String>,
    pub train_id: Option<String>,
    pub connecting_train_id: Option<String>,
    pub station_position: Option<String>,
    pub direction: Option<String>,
    pub dwell_time: Option<String>,
    pub perm_pickup: Option<String>,
    pub perm_dropoff: Option<String>,
    pub stop_code: Option<String>,
}

/// Departures from a station, from `getTrainSchedule` and `getTrainSchedule19Rec`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StationInfo {
    pub station_2char: Option<String>,
    #[serde(rename = "STATIONNAME")]
    pub station_name: Option<String>,
    #[serde(rename = "STATIONMSGS")]
    pub station_msgs: Option<Vec<StationMsgs>>,
    pub items: Option<Vec<ScheduleInfo>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ScheduleInfo {
    pub sched_dep_date: Option<String>,
    pub destination: Option<String>,
    pub track: Option<String>,
    pub line: Option<String>,
    pub train_id: Option<String>,
    pub connecting_train_id: Option<String>,
    pub status: Option<String>,
    pub sec_late: Option<String>,
    pub last_modified: Option<String>,
    #[serde(rename = "BACKCOLOR")]
    pub back_color: Option<String>,
    #[serde(rename = "FORECOLOR")]
    pub fore_color: Option<String>,
    #[serde(rename = "SHADOWCOLOR")]
    pub shadow_color: Option<String>,
    #[serde(rename = "GPSLATITUDE")]
    pub gps_latitude: Option<String>,
    #[serde(rename = "GPSLONGITUDE")]
    pub gps_longitude: Option<String>,
    #[serde(rename = "GPSTIME")]
    pub gps_time: Option<String>,
    pub station_position: Option<String>,
    #[serde(rename = "LINECODE")]
    pub line_code: Option<String>,
    #[serde(rename = "LINEABBREVIATION")]
    pub line_abbreviation: Option<String>,
    #[serde(rename = "INLINEMSG")]
    pub inline_msg: Option<String>,
    pub capacity: Option<Vec<CapacityList>>,
    pub stops: Option<Vec<StopList>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CapacityList {
    pub vehicle_no: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub created_time: Option<String>,
    pub vehicle_type: Option<String>,
    pub cur_percentage: Option<String>,
    pub cur_capacity_color: Option<String>,
    pub cur_passenger_count: Option<String>,
    pub prev_percentage: Option<String>,
    pub prev_capacity_color: Option<String>,
    pub prev_passenger_count: Option<String>,
    pub sections: Option<Vec<SectionList>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SectionList {
    pub section_position: Option<String>,
    pub cur_percentage: Option<String>,
    pub cur_capacity_color: Option<String>,
    pub cur_passenger_count: Option<String>,
    pub cars: Option<Vec<CarList>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct CarList {
    pub car_no: Option<String>,
    pub car_position: Option<String>,
    pub car_rest: Option<bool>,
    pub cur_percentage: Option<String>,
    pub cur_capacity_color: Option<String>,
    pub cur_passenger_count: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StopList {
    pub station_2char: Option<String>,
    #[serde(rename = "STATIONNAME")]
    pub station_name: Option<String>,
    pub time: Option<String>,
    pub pickup: Option<String>,
    pub dropoff: Option<String>,
    pub departed: Option<String>,
    pub stop_status: Option<String>,
    pub dep_time: Option<String>,
    pub time_utc_format: Option<String>,
    pub stop_lines: Option<Vec<StopLines>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StopLines {
    pub line_code: Option<String>,
    pub line_name: Option<String>,
    pub line_color: Option<String>,
}

/// A train's stops, from `getTrainStopList`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Stops {
    pub train_id: Option<String>,
    #[serde(rename = "LINECODE")]
    pub line_code: Option<String>,
    #[serde(rename = "BACKCOLOR")]
    pub back_color: Option<String>,
    #[serde(rename = "FORECOLOR")]
    pub fore_color: Option<String>,
    #[serde(rename = "SHADOWCOLOR")]
    pub shadow_color: Option<String>,
    pub destination: Option<String>,
    #[serde(rename = "TRANSFERAT")]
    pub transfer_at: Option<String>,
    pub stops: Option<Vec<StopList>>,
    pub capacity: Option<Vec<CapacityList>>,
}

/// An active train, from `getVehicleData`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct VehicleDataInfo {
    pub id: Option<String>,
    pub train_line: Option<String>,
    pub direction: Option<String>,
    pub ics_track_ckt: Option<String>,
    pub last_modified: Option<String>,
    pub sched_dep_time: Option<String>,
    pub sec_late: Option<String>,
    pub next_stop: Option<String>,
    pub longitude: Option<String>,
    pub latitude: Option<String>,
}
