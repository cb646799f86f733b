//! Single HTTP exchange with the RailData API.

use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use reqwest::{StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::context::RequestContext;
use crate::error::{RailDataError, Result};

use super::method::{GET_TOKEN, Method};
use super::types::{ErrorEnvelope, GetTokenRequest, GetTokenResponse};

/// The message the API sends when a token is expired or unknown.
const INVALID_TOKEN_MESSAGE: &str = "Invalid token.";

/// Performs one request/response exchange per call, with no retries.
///
/// Maps the API's conventions onto [`RailDataError`]: an empty body on a
/// success status is `MissingCredentials`, an `Invalid token.` error
/// envelope is `InvalidToken`.
#[derive(Debug, Clone)]
pub struct Executor {
    http: reqwest::Client,
    base_url: Url,
}

impl Executor {
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// POST `input` to the method's endpoint and decode the response.
    pub async fn execute<I, O>(
        &self,
        method: Method<I, O>,
        input: &I,
        ctx: &RequestContext,
    ) -> Result<O>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        let name = method.name();
        let fields = form_fields(name, input)?;
        let url = self.endpoint(name)?;

        let form = fields
            .into_iter()
            .fold(Form::new(), |form, (key, value)| form.text(key, value));

        debug!(method = name, "sending request");

        ctx.run(name, async {
            let response = self
                .http
                .post(url)
                .header(ACCEPT, "text/plain")
                .multipart(form)
                .send()
                .await
                .map_err(|source| RailDataError::Http {
                    method: name,
                    source,
                })?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|source| RailDataError::Http {
                    method: name,
                    source,
                })?;

            debug!(method = name, %status, bytes = body.len(), "received response");
            decode_response(name, status, &body)
        })
        .await
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                RailDataError::Configuration(format!(
                    "base URL {} cannot have path segments",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }
}

/// Issues new tokens from a username and password.
///
/// This is the seam the token store refreshes through; tests substitute a
/// counting fake for the HTTP-backed [`Executor`].
pub trait TokenIssuer {
    fn issue_token(
        &self,
        request: &GetTokenRequest,
        ctx: &RequestContext,
    ) -> impl Future<Output = Result<GetTokenResponse>> + Send;
}

impl TokenIssuer for Executor {
    async fn issue_token(
        &self,
        request: &GetTokenRequest,
        ctx: &RequestContext,
    ) -> Result<GetTokenResponse> {
        self.execute(GET_TOKEN, request, ctx).await
    }
}

/// Flatten a request into `(wire name, text value)` form fields.
///
/// Absent optional fields are skipped; booleans and numbers use their JSON
/// spelling (`true`, `false`, `42`).
pub fn form_fields<I: Serialize>(method: &'static str, input: &I) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(input).map_err(|e| RailDataError::Encode {
        method,
        message: e.to_string(),
    })?;

    let Value::Object(map) = value else {
        return Err(RailDataError::Encode {
            method,
            message: "request must serialize to an object".to_string(),
        });
    };

    Ok(map
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

/// Interpret a response according to the API's status and body conventions.
pub fn decode_response<O: DeserializeOwned>(
    method: &'static str,
    status: StatusCode,
    body: &str,
) -> Result<O> {
    if !status.is_success() {
        return Err(decode_error(method, status, body));
    }

    if body.is_empty() {
        return Err(RailDataError::MissingCredentials);
    }

    serde_json::from_str(body).map_err(|e| RailDataError::Decode {
        method,
        message: e.to_string(),
    })
}

fn decode_error(method: &'static str, status: StatusCode, body: &str) -> RailDataError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if envelope.error_message == INVALID_TOKEN_MESSAGE => {
            RailDataError::InvalidToken
        }
        Ok(envelope) => RailDataError::Api {
            message: envelope.error_message,
        },
        Err(_) => RailDataError::Status {
            method,
            status: status.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::method::{GET_STATION_LIST, GET_STATION_SCHEDULE, GET_VEHICLE_DATA};
    use crate::api::types::{GetStationMsgRequest, GetStationScheduleRequest, TokenRequest};

    fn executor_for(server: &MockServer) -> Executor {
        let base = Url::parse(&format!("{}/api/TrainData", server.uri())).unwrap();
        Executor::new(reqwest::Client::new(), base)
    }

    fn token_request(token: &str) -> TokenRequest {
        TokenRequest {
            token: token.to_string(),
        }
    }

    #[test]
    fn form_fields_skip_absent_optionals() {
        let req = GetStationMsgRequest {
            token: "t".into(),
            station: Some("NY".into()),
            line: None,
        };
        let mut fields = form_fields("getStationMSG", &req).unwrap();
        fields.sort();
        assert_eq!(
            fields,
            vec![
                ("station".to_string(), "NY".to_string()),
                ("token".to_string(), "t".to_string()),
            ]
        );
    }

    #[test]
    fn form_fields_spell_booleans() {
        let req = GetStationScheduleRequest {
            token: "t".into(),
            station: None,
            njt_only: true,
        };
        let fields = form_fields("getStationSchedule", &req).unwrap();
        assert!(fields.contains(&("NJTOnly".to_string(), "true".to_string())));
        assert!(!fields.iter().any(|(k, _)| k == "station"));
    }

    #[test]
    fn form_fields_reject_non_objects() {
        let err = form_fields("getToken", &"just a string").unwrap_err();
        assert!(matches!(err, RailDataError::Encode { method: "getToken", .. }));
    }

    #[test]
    fn empty_success_body_is_missing_credentials() {
        let result: Result<Vec<Value>> = decode_response("getVehicleData", StatusCode::OK, "");
        assert!(matches!(result, Err(RailDataError::MissingCredentials)));
    }

    #[test]
    fn invalid_token_envelope() {
        let result: Result<Value> = decode_response(
            "getStationList",
            StatusCode::UNAUTHORIZED,
            r#"{"errorMessage": "Invalid token."}"#,
        );
        assert!(matches!(result, Err(RailDataError::InvalidToken)));
    }

    #[test]
    fn other_envelope_message_is_kept_verbatim() {
        let result: Result<Value> = decode_response(
            "getStationList",
            StatusCode::BAD_REQUEST,
            r#"{"errorMessage": "some error message"}"#,
        );
        match result {
            Err(RailDataError::Api { message }) => assert_eq!(message, "some error message"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_error_object_is_api_error() {
        let result: Result<Value> = decode_response("getStationList", StatusCode::BAD_REQUEST, "{}");
        match result {
            Err(RailDataError::Api { message }) => assert_eq!(message, ""),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unparseable_error_body_reports_status_line() {
        let result: Result<Value> =
            decode_response("getTrainSchedule", StatusCode::BAD_GATEWAY, "<html>oops</html>");
        match result {
            Err(RailDataError::Status { method, status }) => {
                assert_eq!(method, "getTrainSchedule");
                assert_eq!(status, "502 Bad Gateway");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let result: Result<Vec<Value>> =
            decode_response("getVehicleData", StatusCode::OK, "{not json");
        assert!(matches!(
            result,
            Err(RailDataError::Decode {
                method: "getVehicleData",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn posts_form_to_method_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/TrainData/getStationList"))
            .and(header("accept", "text/plain"))
            .and(body_string_contains("name=\"token\""))
            .and(body_string_contains("the-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"STATION_2CHAR": "NY", "STATIONNAME": "New York", "STATION_14CHAR": "New York"}]"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let executor = executor_for(&server);
        let stations = executor
            .execute(GET_STATION_LIST, &token_request("the-token"), &RequestContext::new())
            .await
            .unwrap();

        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].station_2char.as_deref(), Some("NY"));
    }

    #[tokio::test]
    async fn maps_invalid_token_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/TrainData/getVehicleData"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"errorMessage":"Invalid token."}"#),
            )
            .mount(&server)
            .await;

        let result = executor_for(&server)
            .execute(GET_VEHICLE_DATA, &token_request("stale"), &RequestContext::new())
            .await;
        assert!(matches!(result, Err(RailDataError::InvalidToken)));
    }

    #[tokio::test]
    async fn sends_njt_only_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/TrainData/getStationSchedule"))
            .and(body_string_contains("name=\"NJTOnly\"\r\n\r\nfalse"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let req = GetStationScheduleRequest {
            token: "t".into(),
            station: Some("NY".into()),
            njt_only: false,
        };
        let entries = executor_for(&server)
            .execute(GET_STATION_SCHEDULE, &req, &RequestContext::new())
            .await
            .unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn issues_tokens_through_get_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/TrainData/getToken"))
            .and(body_string_contains("the-user"))
            .and(body_string_contains("the-password"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"Authenticated": "True", "UserToken": "newtoken"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let req = GetTokenRequest {
            username: "the-user".into(),
            password: "the-password".into(),
        };
        let resp = executor_for(&server)
            .issue_token(&req, &RequestContext::new())
            .await
            .unwrap();
        assert_eq!(resp.user_token.as_deref(), Some("newtoken"));
    }

    #[tokio::test]
    async fn deadline_aborts_slow_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("[]")
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        let ctx = RequestContext::new().with_timeout(Duration::from_millis(100));
        let result = executor_for(&server)
            .execute(GET_VEHICLE_DATA, &token_request("t"), &ctx)
            .await;

        let err = result.unwrap_err();
        assert!(err.is_cancellation());
        assert!(!matches!(err, RailDataError::InvalidToken));
    }

    #[test]
    fn endpoint_appends_method_name() {
        let base = Url::parse("https://raildata.njtransit.com/api/TrainData").unwrap();
        let executor = Executor::new(reqwest::Client::new(), base);
        assert_eq!(
            executor.endpoint("getToken").unwrap().as_str(),
            "https://raildata.njtransit.com/api/TrainData/getToken"
        );

        let trailing = Url::parse("https://example.com/api/").unwrap();
        let executor = Executor::new(reqwest::Client::new(), trailing);
        assert_eq!(
            executor.endpoint("getToken").unwrap().as_str(),
            "https://example.com/api/getToken"
        );
    }
}
