//! The RailData client.
//!
//! [`Client::call`] implements the token policy shared by every method: send
//! the request with the current token, and if the server rejects the token,
//! refresh it once and retry once. The per-method wrappers build the request
//! DTO, go through `call`, and convert the response into domain types.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{
    Executor, GET_STATION_LIST, GET_STATION_MSG, GET_STATION_SCHEDULE, GET_TRAIN_SCHEDULE,
    GET_TRAIN_SCHEDULE_19_REC, GET_TRAIN_STOP_LIST, GET_VEHICLE_DATA, GetStationMsgRequest,
    GetStationScheduleRequest, GetTrainSchedule19RecRequest, GetTrainScheduleRequest,
    GetTrainStopListRequest, IS_VALID_TOKEN, Method, TokenCarrier, TokenRequest,
};
use crate::catalog::Catalogs;
use crate::config::ClientConfig;
use crate::context::RequestContext;
use crate::convert;
use crate::domain::{
    LineCode, Station, StationCode, StationMsg, StationSchedule, TokenValidity, TrainSchedule,
    TrainStopList, VehicleData,
};
use crate::error::{RailDataError, Result};
use crate::token::TokenStore;


/// Client for the NJ Transit RailData API.
///
/// Cheap to clone; clones share the token and catalogs, so a refresh done
/// through one clone is seen by all of them.
#[derive(Debug, Clone)]
pub struct Client {
    executor: Executor,
    tokens: Arc<TokenStore>,
    catalogs: Arc<Catalogs>,
}

impl Client {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            RailDataError::Configuration(format!("invalid base URL {:?}: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RailDataError::Configuration(format!(
                "base URL {:?} cannot have path segments",
                config.base_url
            )));
        }

        let http = match config.http {
            Some(http) => http,
            None => reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .map_err(|e| {
                    RailDataError::Configuration(format!("could not build HTTP client: {e}"))
                })?,
        };

        let catalogs = config
            .catalogs
            .unwrap_or_else(|| Arc::new(Catalogs::builtin()));

        Ok(Self {
            executor: Executor::new(http, base_url),
            tokens: Arc::new(TokenStore::new(
                config.token,
                config.credentials,
                config.listeners,
            )),
            catalogs,
        })
    }

    /// The token currently in use. Does not contact the API.
    pub async fn token(&self) -> String {
        self.tokens.current_token().await
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Send a token-carrying request, refreshing the token at most once.
    ///
    /// 1. The current token is put in `input` and the request is sent.
    /// 2. Any result other than [`RailDataError::InvalidToken`] is returned.
    /// 3. Otherwise the token is refreshed; a refresh failure is returned
    ///    instead of the original error.
    /// 4. The request is sent once more with the new token and that result
    ///    is returned as is, even if the token is rejected again.
    pub async fn call<I, O>(&self, method: Method<I, O>, mut input: I, ctx: &RequestContext) -> Result<O>
    where
        I: TokenCarrier + Serialize + Send + Sync,
        O: DeserializeOwned,
    {
        let observed = self.tokens.current_token().await;
        input.set_token(observed.clone());

        match self.executor.execute(method, &input, ctx).await {
            Err(RailDataError::InvalidToken) => {}
            other => return other,
        }

        debug!(method = method.name(), "token rejected, refreshing");
        self.tokens.refresh(&observed, &self.executor, ctx).await?;

        input.set_token(self.tokens.current_token().await);
        self.executor.execute(method, &input, ctx).await
    }

    /// All stations, as the API lists them.
    pub async fn get_station_list(&self, ctx: &RequestContext) -> Result<Vec<Station>> {
        let output = self
            .call(GET_STATION_LIST, TokenRequest::default(), ctx)
            .await?;
        Ok(convert::convert_station_list(&output))
    }

    /// Messages and alerts, optionally limited to one station and/or line.
    pub async fn get_station_msg(
        &self,
        station: Option<&StationCode>,
        line: Option<&LineCode>,
        ctx: &RequestContext,
    ) -> Result<Vec<StationMsg>> {
        let input = GetStationMsgRequest {
            station: station.map(|s| s.to_string()),
            line: line.map(|l| l.to_string()),
            ..Default::default()
        };
        let output = self.call(GET_STATION_MSG, input, ctx).await?;
        Ok(convert::convert_station_msgs(&self.catalogs, &output))
    }

    /// The next 19 departures from a station, with each train's stops.
    pub async fn get_train_schedule(
        &self,
        station: &StationCode,
        ctx: &RequestContext,
    ) -> Result<TrainSchedule> {
        let input = GetTrainScheduleRequest {
            station: station.to_string(),
            ..Default::default()
        };
        let output = self.call(GET_TRAIN_SCHEDULE, input, ctx).await?;
        Ok(convert::convert_train_schedule(&self.catalogs, &output))
    }

    /// The next 19 departures from a station, optionally for one line only.
    ///
    /// Stops are not included; use [`Client::get_train_stop_list`].
    pub async fn get_train_schedule_19_records(
        &self,
        station: &StationCode,
        line: Option<&LineCode>,
        ctx: &RequestContext,
    ) -> Result<TrainSchedule> {
        let input = GetTrainSchedule19RecRequest {
            station: station.to_string(),
            line: line.map(|l| l.to_string()),
            ..Default::default()
        };
        let output = self.call(GET_TRAIN_SCHEDULE_19_REC, input, ctx).await?;
        Ok(convert::convert_train_schedule(&self.catalogs, &output))
    }

    /// A train's stops. `None` if the train id is unknown.
    pub async fn get_train_stop_list(
        &self,
        train_id: &str,
        ctx: &RequestContext,
    ) -> Result<Option<TrainStopList>> {
        let input = GetTrainStopListRequest {
            train: train_id.to_string(),
            ..Default::default()
        };
        let output = self.call(GET_TRAIN_STOP_LIST, input, ctx).await?;
        Ok(convert::convert_train_stop_list(&self.catalogs, &output))
    }

    /// Position and status of every train that moved in the last five minutes.
    pub async fn get_vehicle_data(&self, ctx: &RequestContext) -> Result<Vec<VehicleData>> {
        let output = self
            .call(GET_VEHICLE_DATA, TokenRequest::default(), ctx)
            .await?;
        Ok(convert::convert_vehicles(&self.catalogs, &output))
    }

    /// Methods NJ Transit only allows a few times per day.
    pub fn rate_limited(&self) -> RateLimitedMethods<'_> {
        RateLimitedMethods { client: self }
    }
}

/// Methods with a small daily quota.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitedMethods<'a> {
    client: &'a Client,
}

impl RateLimitedMethods<'_> {
    /// Whether the current token is valid. Limited to 10 calls per day.
    ///
    /// Any other method also validates the token and renews it when needed,
    /// so this is rarely useful.
    pub async fn is_valid_token(&self, ctx: &RequestContext) -> Result<TokenValidity> {
        let output = self
            .client
            .call(IS_VALID_TOKEN, TokenRequest::default(), ctx)
            .await?;
        Ok(convert::convert_token_validity(&output))
    }

    /// A station's schedule for the next 27 hours. Limited to 5 calls per day.
    ///
    /// With `njt_only` false the schedule also includes Amtrak trains.
    pub async fn get_station_schedule(
        &self,
        station: &StationCode,
        njt_only: bool,
        ctx: &RequestContext,
    ) -> Result<Vec<StationSchedule>> {
        let input = GetStationScheduleRequest {
            station: Some(station.to_string()),
            njt_only,
            ..Default::default()
        };
        let output = self.client.call(GET_STATION_SCHEDULE, input, ctx).await?;
        Ok(convert::convert_station_schedules(&self.client.catalogs, &output))
    }
}
