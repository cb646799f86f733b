//! Low-level access to the RailData API.
//!
//! Each endpoint is a typed [`Method`] descriptor. The [`Executor`] performs
//! exactly one HTTP exchange per call and maps the API's error conventions
//! onto [`crate::RailDataError`]. Most callers should use [`crate::Client`],
//! which adds token management and normalizes the results.
//!
//! Wire protocol:
//! - requests are `POST {base_url}/{method}` with a `multipart/form-data`
//!   body and `Accept: text/plain`
//! - 2xx responses carry JSON; an empty 2xx body means the token was
//!   rejected
//! - other statuses carry `{"errorMessage": "..."}` when the API produced
//!   the error itself

mod executor;
mod method;
mod types;

pub use executor::{Executor, TokenIssuer, decode_response, form_fields};
pub use method::{
    GET_STATION_LIST, GET_STATION_MSG, GET_STATION_SCHEDULE, GET_TOKEN, GET_TRAIN_SCHEDULE,
    GET_TRAIN_SCHEDULE_19_REC, GET_TRAIN_STOP_LIST, GET_VEHICLE_DATA, IS_VALID_TOKEN, Method,
    TokenCarrier,
};
pub use types::{
    CapacityList, CarList, DailyScheduleInfo, DailyStationInfo, ErrorEnvelope, GetStationMsgRequest,
    GetStationScheduleRequest, GetStations, GetTokenRequest, GetTokenResponse,
    GetTrainSchedule19RecRequest, GetTrainScheduleRequest, GetTrainStopListRequest, ScheduleInfo,
    SectionList, StationInfo, StationMsgs, StopLines, StopList, Stops, TokenRequest,
    ValidTokenResponse, VehicleDataInfo,
};
