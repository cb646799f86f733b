//! Typed method descriptors.

use std::fmt;
use std::marker::PhantomData;

use super::types::{
    DailyStationInfo, GetStationMsgRequest, GetStationScheduleRequest, GetStations,
    GetTokenRequest, GetTokenResponse, GetTrainSchedule19RecRequest, GetTrainScheduleRequest,
    GetTrainStopListRequest, StationInfo, StationMsgs, Stops, TokenRequest, ValidTokenResponse,
    VehicleDataInfo,
};

/// A RailData endpoint together with its request and response types.
///
/// The endpoint is reached with `POST {base_url}/{name}`.
pub struct Method<I, O> {
    name: &'static str,
    _types: PhantomData<fn(&I) -> O>,
}

impl<I, O> Method<I, O> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _types: PhantomData,
        }
    }

    /// The endpoint name, as it appears in the URL path.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<I, O> Clone for Method<I, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, O> Copy for Method<I, O> {}

impl<I, O> fmt::Debug for Method<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Method({})", self.name)
    }
}

/// A request payload that carries the API token.
///
/// Only requests implementing this trait can be sent through
/// [`crate::Client::call`], which injects the current token and retries
/// once after a refresh when the server rejects it.
pub trait TokenCarrier {
    fn token(&self) -> &str;
    fn set_token(&mut self, token: String);
}

pub const GET_TOKEN: Method<GetTokenRequest, GetTokenResponse> = Method::new("getToken");
pub const IS_VALID_TOKEN: Method<TokenRequest, ValidTokenResponse> = Method::new("isValidToken");
pub const GET_STATION_LIST: Method<TokenRequest, Vec<GetStations>> =
    Method::new("getStationList");
pub const GET_STATION_MSG: Method<GetStationMsgRequest, Vec<StationMsgs>> =
    Method::new("getStationMSG");
pub const GET_STATION_SCHEDULE: Method<GetStationScheduleRequest, Vec<DailyStationInfo>> =
    Method::new("getStationSchedule");
pub const GET_TRAIN_SCHEDULE: Method<GetTrainScheduleRequest, StationInfo> =
    Method::new("getTrainSchedule");
pub const GET_TRAIN_SCHEDULE_19_REC: Method<GetTrainSchedule19RecRequest, StationInfo> =
    Method::new("getTrainSchedule19Rec");
pub const GET_TRAIN_STOP_LIST: Method<GetTrainStopListRequest, Stops> =
    Method::new("getTrainStopList");
pub const GET_VEHICLE_DATA: Method<TokenRequest, Vec<VehicleDataInfo>> =
    Method::new("getVehicleData");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_match_endpoints() {
        assert_eq!(GET_TOKEN.name(), "getToken");
        assert_eq!(GET_STATION_MSG.name(), "getStationMSG");
        assert_eq!(GET_TRAIN_SCHEDULE_19_REC.name(), "getTrainSchedule19Rec");
        assert_eq!(format!("{:?}", GET_VEHICLE_DATA), "Method(getVehicleData)");
    }

    #[test]
    fn token_carrier_round_trip() {
        let mut req = GetTrainStopListRequest {
            train: "3837".into(),
            ..Default::default()
        };
        assert_eq!(req.token(), "");
        req.set_token("abc".into());
        assert_eq!(req.token(), "abc");
        assert_eq!(req.train, "3837");
    }
}
