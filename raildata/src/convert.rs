//! Conversion from RailData DTOs to domain types.
//!
//! The API sends almost everything as strings and leaves fields empty or
//! `null` freely. This module trims and parses those strings, resolves
//! station and line identifiers through the [`Catalogs`], and skips list
//! entries that lack a required field instead of failing the whole result.

use chrono::{Duration, NaiveDateTime, TimeZone};
use tracing::warn;

use crate::api::{
    CapacityList, CarList, DailyScheduleInfo, DailyStationInfo, GetStations, ScheduleInfo,
    SectionList, StationInfo, StationMsgs, StopLines, StopList, Stops, ValidTokenResponse,
    VehicleDataInfo,
};
use crate::catalog::{Catalogs, SearchQuery};
use crate::domain::{
    Color, ColorSet, Direction, Line, LocalTime, Location, MsgType, RAIL_TIME_ZONE, ScheduleEntry,
    SectionPosition, Station, StationMsg, StationSchedule, StopLine, TokenValidity,
    TrainCapacity, TrainCar, TrainSchedule, TrainScheduleEntry, TrainSection, TrainStop,
    TrainStopList, VehicleData,
};
use crate::reference::{station_position, stop_code, translate_track_number};

/// Format of most timestamps, e.g. `05-Mar-2024 10:15:00 AM`.
const DATE_TIME_FORMAT: &str = "%d-%b-%Y %I:%M:%S %p";

/// Format of message timestamps, e.g. `3/5/2024 9:02:11 AM`.
const MSG_DATE_TIME_FORMAT: &str = "%-m/%-d/%Y %-I:%M:%S %p";

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Failed to parse a timestamp
    #[error("invalid time in {field}: {value:?}")]
    InvalidTime { field: &'static str, value: String },
}

pub fn convert_token_validity(input: &ValidTokenResponse) -> TokenValidity {
    TokenValidity {
        valid: input.valid_token,
        user_id: text(&input.user_id),
    }
}

/// Convert `getStationList`. Entries without a code are skipped.
pub fn convert_station_list(input: &[GetStations]) -> Vec<Station> {
    convert_each("station", input, |item| {
        let code = text(&item.station_2char).ok_or(ConversionError::MissingField("STATION_2CHAR"))?;
        Ok(Station::new(
            code,
            text(&item.station_name).unwrap_or_default(),
            text(&item.station_14char).unwrap_or_default(),
        ))
    })
}

pub fn convert_station_msgs(catalogs: &Catalogs, input: &[StationMsgs]) -> Vec<StationMsg> {
    convert_each("message", input, |item| convert_station_msg(catalogs, item))
}

pub fn convert_station_msg(
    catalogs: &Catalogs,
    input: &StationMsgs,
) -> Result<StationMsg, ConversionError> {
    Ok(StationMsg {
        msg_type: msg_type(input.msg_type.as_deref()),
        text: input.msg_text.clone().unwrap_or_default(),
        pub_date: required_time(&input.msg_pubdate, "MSG_PUBDATE", MSG_DATE_TIME_FORMAT)?,
        id: text(&input.msg_id),
        agency: text(&input.msg_agency),
        source: text(&input.msg_source),
        station_scope: scope(input.msg_station_scope.as_deref())
            .map(|name| {
                catalogs
                    .stations
                    .resolve_or_synthesize(SearchQuery::with_name(name))
            })
            .collect(),
        line_scope: scope(input.msg_line_scope.as_deref())
            .filter_map(|name| catalogs.lines.lookup_name(name).cloned())
            .collect(),
    })
}

/// Convert `getStationSchedule`.
pub fn convert_station_schedules(
    catalogs: &Catalogs,
    input: &[DailyStationInfo],
) -> Vec<StationSchedule> {
    input
        .iter()
        .map(|info| StationSchedule {
            station: station(catalogs, &info.station_2char, &info.station_name),
            entries: convert_each("schedule entry", items(&info.items), |item| {
                convert_schedule_entry(catalogs, item)
            }),
        })
        .collect()
}

fn convert_schedule_entry(
    catalogs: &Catalogs,
    input: &DailyScheduleInfo,
) -> Result<ScheduleEntry, ConversionError> {
    let destination = destination(&input.destination);
    Ok(ScheduleEntry {
        departure_time: required_time(&input.sched_dep_date, "SCHED_DEP_DATE", DATE_TIME_FORMAT)?,
        destination_station: destination_station(catalogs, &destination),
        destination,
        line: line(catalogs, &None, &input.line),
        train_id: text(&input.train_id).ok_or(ConversionError::MissingField("TRAIN_ID"))?,
        connecting_train_id: text(&input.connecting_train_id),
        station_position: station_position(text_ref(&input.station_position).unwrap_or_default()),
        direction: direction(input.direction.as_deref()),
        dwell_time: seconds(&input.dwell_time),
        pickup_only: flag(&input.perm_pickup),
        dropoff_only: flag(&input.perm_dropoff),
        stop_code: text_ref(&input.stop_code).map(stop_code),
    })
}

/// Convert `getTrainSchedule` and `getTrainSchedule19Rec`.
pub fn convert_train_schedule(catalogs: &Catalogs, input: &StationInfo) -> TrainSchedule {
    let station = station(catalogs, &input.station_2char, &input.station_name);
    TrainSchedule {
        messages: convert_station_msgs(catalogs, items(&input.station_msgs)),
        entries: convert_each("train schedule entry", items(&input.items), |item| {
            convert_schedule_info(catalogs, item, &station)
        }),
        station,
    }
}

fn convert_schedule_info(
    catalogs: &Catalogs,
    input: &ScheduleInfo,
    station: &Station,
) -> Result<TrainScheduleEntry, ConversionError> {
    Ok(TrainScheduleEntry {
        departure_time: required_time(&input.sched_dep_date, "SCHED_DEP_DATE", DATE_TIME_FORMAT)?,
        destination: destination(&input.destination),
        track: text_ref(&input.track)
            .map(|track| translate_track_number(track, &station.code).to_string()),
        line: line(catalogs, &input.line_code, &input.line),
        line_name: text(&input.line),
        train_id: text(&input.train_id).ok_or(ConversionError::MissingField("TRAIN_ID"))?,
        connecting_train_id: text(&input.connecting_train_id),
        status: text(&input.status),
        delay: seconds(&input.sec_late),
        last_updated: time(&input.last_modified, DATE_TIME_FORMAT),
        color: color_set(&input.fore_color, &input.back_color, &input.shadow_color),
        gps_location: location(&input.gps_longitude, &input.gps_latitude),
        gps_time: time(&input.gps_time, DATE_TIME_FORMAT),
        station_position: station_position(text_ref(&input.station_position).unwrap_or_default()),
        inline_message: text(&input.inline_msg),
        capacity: convert_capacities(items(&input.capacity)),
        stops: convert_stops(catalogs, items(&input.stops)),
    })
}

fn convert_capacities(input: &[CapacityList]) -> Vec<TrainCapacity> {
    convert_each("capacity", input, convert_capacity)
}

fn convert_capacity(input: &CapacityList) -> Result<TrainCapacity, ConversionError> {
    Ok(TrainCapacity {
        number: text(&input.vehicle_no).ok_or(ConversionError::MissingField("VEHICLE_NO"))?,
        location: location(&input.longitude, &input.latitude)
            .ok_or(ConversionError::MissingField("LONGITUDE/LATITUDE"))?,
        created_time: required_time(&input.created_time, "CREATED_TIME", DATE_TIME_FORMAT)?,
        vehicle_type: text(&input.vehicle_type).unwrap_or_default(),
        capacity_percent: int(&input.cur_percentage),
        capacity_color: color(&input.cur_capacity_color),
        passenger_count: int(&input.cur_passenger_count),
        sections: items(&input.sections).iter().map(convert_section).collect(),
    })
}

fn convert_section(input: &SectionList) -> TrainSection {
    TrainSection {
        position: section_position(input.section_position.as_deref()),
        capacity_percent: int(&input.cur_percentage),
        capacity_color: color(&input.cur_capacity_color),
        passenger_count: int(&input.cur_passenger_count),
        cars: items(&input.cars).iter().map(convert_car).collect(),
    }
}

fn convert_car(input: &CarList) -> TrainCar {
    TrainCar {
        car_number: text(&input.car_no).unwrap_or_default(),
        position: int(&input.car_position),
        restroom: input.car_rest.unwrap_or(false),
        capacity_percent: int(&input.cur_percentage),
        capacity_color: color(&input.cur_capacity_color),
        passenger_count: int(&input.cur_passenger_count),
    }
}

fn convert_stops(catalogs: &Catalogs, input: &[StopList]) -> Vec<TrainStop> {
    input.iter().map(|stop| convert_stop(catalogs, stop)).collect()
}

fn convert_stop(catalogs: &Catalogs, input: &StopList) -> TrainStop {
    TrainStop {
        station: station(catalogs, &input.station_2char, &input.station_name),
        arrival_time: time(&input.time, DATE_TIME_FORMAT),
        pickup_only: flag(&input.pickup),
        dropoff_only: flag(&input.dropoff),
        departed: flag(&input.departed),
        stop_status: text(&input.stop_status),
        departure_time: time(&input.dep_time, DATE_TIME_FORMAT),
        stop_lines: items(&input.stop_lines)
            .iter()
            .map(|l| convert_stop_line(catalogs, l))
            .collect(),
    }
}

fn convert_stop_line(catalogs: &Catalogs, input: &StopLines) -> StopLine {
    StopLine {
        line: line(catalogs, &input.line_code, &input.line_name),
        color: color(&input.line_color),
    }
}

/// Convert `getTrainStopList`. The API answers an unknown train with an
/// empty `TRAIN_ID`, which becomes `None`.
pub fn convert_train_stop_list(catalogs: &Catalogs, input: &Stops) -> Option<TrainStopList> {
    let train_id = text(&input.train_id)?;
    let destination = destination(&input.destination);
    Some(TrainStopList {
        train_id,
        line: line(catalogs, &input.line_code, &None),
        color: color_set(&input.fore_color, &input.back_color, &input.shadow_color),
        destination_station: destination_station(catalogs, &destination),
        destination,
        transfer_at: text(&input.transfer_at),
        stops: convert_stops(catalogs, items(&input.stops)),
        capacity: convert_capacities(items(&input.capacity)),
    })
}

/// Convert `getVehicleData`.
pub fn convert_vehicles(catalogs: &Catalogs, input: &[VehicleDataInfo]) -> Vec<VehicleData> {
    convert_each("vehicle", input, |item| convert_vehicle(catalogs, item))
}

fn convert_vehicle(
    catalogs: &Catalogs,
    input: &VehicleDataInfo,
) -> Result<VehicleData, ConversionError> {
    Ok(VehicleData {
        train_id: text(&input.id).ok_or(ConversionError::MissingField("ID"))?,
        line: line(catalogs, &None, &input.train_line),
        direction: direction(input.direction.as_deref()),
        track_circuit_id: text(&input.ics_track_ckt),
        last_updated: required_time(&input.last_modified, "LAST_MODIFIED", DATE_TIME_FORMAT)?,
        departure_time: time(&input.sched_dep_time, DATE_TIME_FORMAT),
        delay: seconds(&input.sec_late),
        next_stop: text_ref(&input.next_stop).map(|name| {
            catalogs
                .stations
                .resolve_or_synthesize(SearchQuery::with_name(name))
        }),
        location: location(&input.longitude, &input.latitude),
    })
}

/// Convert every item, logging and dropping the ones that fail.
fn convert_each<'a, T, U>(
    kind: &'static str,
    input: &'a [T],
    convert: impl Fn(&'a T) -> Result<U, ConversionError>,
) -> Vec<U> {
    let mut results = Vec::with_capacity(input.len());
    for item in input {
        match convert(item) {
            Ok(converted) => results.push(converted),
            Err(e) => warn!(kind, error = %e, "skipping invalid entry"),
        }
    }
    results
}

fn items<T>(list: &Option<Vec<T>>) -> &[T] {
    list.as_deref().unwrap_or(&[])
}

fn station(catalogs: &Catalogs, code: &Option<String>, name: &Option<String>) -> Station {
    catalogs
        .stations
        .resolve_or_synthesize(SearchQuery::new(text_ref(code), text_ref(name)))
}

fn line(catalogs: &Catalogs, code: &Option<String>, name: &Option<String>) -> Line {
    catalogs
        .lines
        .resolve_or_synthesize(SearchQuery::new(text_ref(code), text_ref(name)))
}

fn destination(value: &Option<String>) -> String {
    text_ref(value).map(unescape_html).unwrap_or_default()
}

fn destination_station(catalogs: &Catalogs, destination: &str) -> Option<Station> {
    if destination.is_empty() {
        return None;
    }
    catalogs
        .stations
        .resolve(SearchQuery::with_name(destination))
        .cloned()
}

/// Trimmed string, or `None` if empty.
fn text_ref(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn text(value: &Option<String>) -> Option<String> {
    text_ref(value).map(str::to_string)
}

fn flag(value: &Option<String>) -> bool {
    text_ref(value).is_some_and(|s| s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes"))
}

fn int(value: &Option<String>) -> Option<i32> {
    text_ref(value)?.parse().ok()
}

fn seconds(value: &Option<String>) -> Option<Duration> {
    Duration::try_seconds(text_ref(value)?.parse().ok()?)
}

fn location(longitude: &Option<String>, latitude: &Option<String>) -> Option<Location> {
    Some(Location {
        longitude: text_ref(longitude)?.parse().ok()?,
        latitude: text_ref(latitude)?.parse().ok()?,
    })
}

fn color(value: &Option<String>) -> Option<Color> {
    Color::parse_html(text_ref(value)?).ok()
}

fn color_set(
    foreground: &Option<String>,
    background: &Option<String>,
    shadow: &Option<String>,
) -> Option<ColorSet> {
    Some(ColorSet {
        foreground: color(foreground)?,
        background: color(background)?,
        shadow: color(shadow).unwrap_or(Color::BLACK),
    })
}

fn time(value: &Option<String>, format: &str) -> Option<LocalTime> {
    parse_local_time(text_ref(value)?, format)
}

fn required_time(
    value: &Option<String>,
    field: &'static str,
    format: &str,
) -> Result<LocalTime, ConversionError> {
    let s = text_ref(value).ok_or(ConversionError::MissingField(field))?;
    parse_local_time(s, format).ok_or_else(|| ConversionError::InvalidTime {
        field,
        value: s.to_string(),
    })
}

/// Parse a New Jersey wall-clock time. During the autumn DST overlap the
/// earlier instant is used; times in the spring gap do not exist.
pub fn parse_local_time(s: &str, format: &str) -> Option<LocalTime> {
    let naive = NaiveDateTime::parse_from_str(s, format).ok()?;
    RAIL_TIME_ZONE.from_local_datetime(&naive).earliest()
}

fn msg_type(value: Option<&str>) -> MsgType {
    match value {
        Some("fullscreen") => MsgType::FullScreen,
        _ => MsgType::Banner,
    }
}

fn direction(value: Option<&str>) -> Direction {
    match value {
        Some("Eastbound") => Direction::Eastbound,
        _ => Direction::Westbound,
    }
}

fn section_position(value: Option<&str>) -> SectionPosition {
    match value {
        Some("Front") => SectionPosition::Front,
        Some("Back") => SectionPosition::Back,
        _ => SectionPosition::Middle,
    }
}

/// Split a message scope list such as `"New York*Newark Penn, Secaucus"`.
fn scope(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or_default()
        .split([',', '*'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

/// Decode the HTML entities the API puts in destination names.
fn unescape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let decoded = tail
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let number = entity.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogs() -> Catalogs {
        Catalogs::builtin()
    }

    fn s(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn nj(y: i32, mo: u32, d: u32, h: u32, mi: u32, sec: u32) -> LocalTime {
        RAIL_TIME_ZONE
            .with_ymd_and_hms(y, mo, d, h, mi, sec)
            .single()
            .unwrap()
    }

    #[test]
    fn parse_board_time() {
        assert_eq!(
            parse_local_time("05-Mar-2024 10:15:00 PM", DATE_TIME_FORMAT),
            Some(nj(2024, 3, 5, 22, 15, 0))
        );
        assert_eq!(parse_local_time("yesterday", DATE_TIME_FORMAT), None);
    }

    #[test]
    fn parse_message_time() {
        assert_eq!(
            parse_local_time("3/5/2024 9:02:11 AM", MSG_DATE_TIME_FORMAT),
            Some(nj(2024, 3, 5, 9, 2, 11))
        );
        assert_eq!(
            parse_local_time("12/25/2024 12:30:00 PM", MSG_DATE_TIME_FORMAT),
            Some(nj(2024, 12, 25, 12, 30, 0))
        );
    }

    #[test]
    fn spring_gap_time_does_not_exist() {
        assert_eq!(parse_local_time("10-Mar-2024 02:30:00 AM", DATE_TIME_FORMAT), None);
    }

    #[test]
    fn scalar_helpers() {
        assert_eq!(text(&s("  x ")), s("x"));
        assert_eq!(text(&s("   ")), None);
        assert!(flag(&s("YES")));
        assert!(flag(&s("True")));
        assert!(!flag(&s("no")));
        assert!(!flag(&None));
        assert_eq!(int(&s("42")), Some(42));
        assert_eq!(int(&s("4x")), None);
        assert_eq!(seconds(&s("90")), Some(Duration::seconds(90)));
        assert_eq!(location(&s("-74.1"), &None), None);
    }

    #[test]
    fn color_set_needs_foreground_and_background() {
        let set = color_set(&s("#FFFFFF"), &s("#DD3439"), &None).unwrap();
        assert_eq!(set.shadow, Color::BLACK);
        assert!(color_set(&s("#FFFFFF"), &None, &s("#000000")).is_none());
    }

    #[test]
    fn unescape_entities() {
        assert_eq!(unescape_html("Bay Head &amp; Long Branch"), "Bay Head & Long Branch");
        assert_eq!(unescape_html("&#9992; Airport &#x2708;"), "\u{2708} Airport \u{2708}");
        assert_eq!(unescape_html("A & B &bogus; C"), "A & B &bogus; C");
    }

    #[test]
    fn scope_splits_on_commas_and_asterisks() {
        let parts: Vec<_> = scope(Some("New York*Newark Penn Station, Secaucus Upper Lvl,")).collect();
        assert_eq!(parts, vec!["New York", "Newark Penn Station", "Secaucus Upper Lvl"]);
        assert_eq!(scope(None).count(), 0);
    }

    #[test]
    fn converts_station_message() {
        let msg = StationMsgs {
            msg_type: s("fullscreen"),
            msg_text: s("Delays of up to 15 minutes"),
            msg_pubdate: s("3/5/2024 9:02:11 AM"),
            msg_agency: s("NJT"),
            msg_station_scope: s("New York Penn Station*0000"),
            msg_line_scope: s("Northeast Corridor,NJCL,Unknown Line"),
            ..Default::default()
        };
        let msg = convert_station_msg(&catalogs(), &msg).unwrap();

        assert_eq!(msg.msg_type, MsgType::FullScreen);
        assert_eq!(msg.pub_date, nj(2024, 3, 5, 9, 2, 11));
        assert_eq!(msg.agency.as_deref(), Some("NJT"));
        assert!(msg.id.is_none());

        let stations: Vec<_> = msg.station_scope.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(stations, vec!["NY", "XX"]);
        assert_eq!(msg.station_scope[1].name, "0000");

        let lines: Vec<_> = msg.line_scope.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(lines, vec!["NE", "NC"]);
    }

    #[test]
    fn message_without_date_is_skipped() {
        let msgs = vec![
            StationMsgs {
                msg_text: s("no date"),
                ..Default::default()
            },
            StationMsgs {
                msg_text: s("dated"),
                msg_pubdate: s("3/5/2024 9:02:11 AM"),
                ..Default::default()
            },
        ];
        let converted = convert_station_msgs(&catalogs(), &msgs);
        assert_eq!(converted.len(), 1);
        assert_eq!(converted[0].text, "dated");
        assert_eq!(converted[0].msg_type, MsgType::Banner);
    }

    #[test]
    fn converts_train_schedule() {
        let json = r##"{
            "STATION_2CHAR": "TS",
            "STATIONNAME": "Secaucus Lower Lvl",
            "STATIONMSGS": [],
            "ITEMS": [{
                "SCHED_DEP_DATE": "05-Mar-2024 10:15:00 AM",
                "DESTINATION": "Bay Head &amp; Points South",
                "TRACK": "4",
                "LINE": "No Jersey Coast",
                "TRAIN_ID": "3237",
                "STATUS": "All Aboard",
                "SEC_LATE": "120",
                "BACKCOLOR": "#03A3DF",
                "FORECOLOR": "#FFFFFF",
                "SHADOWCOLOR": "",
                "GPSLATITUDE": "40.7612",
                "GPSLONGITUDE": "-74.0754",
                "STATION_POSITION": "1",
                "LINECODE": "NC",
                "STOPS": [{
                    "STATION_2CHAR": "BH",
                    "STATIONNAME": "Bay Head",
                    "TIME": "05-Mar-2024 11:45:00 AM",
                    "PICKUP": "",
                    "DROPOFF": "Yes",
                    "DEPARTED": "NO",
                    "STOP_LINES": [{"LINE_CODE": "NC", "LINE_NAME": "North Jersey Coast Line", "LINE_COLOR": "#03A3DF"}]
                }]
            }, {
                "DESTINATION": "New York",
                "TRAIN_ID": "9999"
            }]
        }"##;
        let info: StationInfo = serde_json::from_str(json).unwrap();
        let schedule = convert_train_schedule(&catalogs(), &info);

        assert_eq!(schedule.station.code.as_str(), "TS");
        assert!(schedule.messages.is_empty());
        assert_eq!(schedule.entries.len(), 1);

        let entry = &schedule.entries[0];
        assert_eq!(entry.departure_time, nj(2024, 3, 5, 10, 15, 0));
        assert_eq!(entry.destination, "Bay Head & Points South");
        assert_eq!(entry.track.as_deref(), Some("E"));
        assert_eq!(entry.line.code.as_str(), "NC");
        assert_eq!(entry.line_name.as_deref(), Some("No Jersey Coast"));
        assert_eq!(entry.delay, Some(Duration::seconds(120)));
        assert_eq!(entry.color.map(|c| c.shadow), Some(Color::BLACK));
        assert_eq!(
            entry.gps_location,
            Some(Location {
                longitude: -74.0754,
                latitude: 40.7612
            })
        );
        assert_eq!(entry.station_position.description, "Intermediate station");

        let stop = &entry.stops[0];
        assert_eq!(stop.station.name, "Bay Head");
        assert!(stop.dropoff_only);
        assert!(!stop.pickup_only);
        assert!(!stop.departed);
        assert_eq!(stop.stop_lines[0].line.abbreviation, "NJCL");
    }

    #[test]
    fn converts_station_schedule() {
        let json = r#"[{
            "STATION_2CHAR": "PJ",
            "STATIONNAME": "Princeton Junction",
            "ITEMS": [{
                "SCHED_DEP_DATE": "05-Mar-2024 06:01:00 AM",
                "DESTINATION": "New York Penn Station",
                "LINE": "Northeast Corrdr",
                "TRAIN_ID": "3804",
                "STATION_POSITION": "1",
                "DIRECTION": "Eastbound",
                "DWELL_TIME": "60",
                "PERM_PICKUP": "true",
                "STOP_CODE": "S*"
            }]
        }]"#;
        let info: Vec<DailyStationInfo> = serde_json::from_str(json).unwrap();
        let schedules = convert_station_schedules(&catalogs(), &info);

        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].station.short_name, "Princeton Jct.");
        let entry = &schedules[0].entries[0];
        assert_eq!(entry.destination_station.as_ref().map(|s| s.code.as_str()), Some("NY"));
        assert_eq!(entry.line.code.as_str(), "NE");
        assert_eq!(entry.direction, Direction::Eastbound);
        assert_eq!(entry.dwell_time, Some(Duration::seconds(60)));
        assert!(entry.pickup_only);
        assert_eq!(entry.stop_code.as_ref().map(|c| &*c.code), Some("S*"));
    }

    #[test]
    fn converts_stop_list() {
        let json = r##"{
            "TRAIN_ID": "3837",
            "LINECODE": "NE",
            "BACKCOLOR": "#DD3439",
            "FORECOLOR": "#FFFFFF",
            "SHADOWCOLOR": "#000000",
            "DESTINATION": "Trenton",
            "TRANSFERAT": "",
            "STOPS": [
                {"STATION_2CHAR": "NY", "STATIONNAME": "New York", "DEPARTED": "YES"},
                {"STATION_2CHAR": "TR", "STATIONNAME": "Trenton", "DEPARTED": "NO"}
            ],
            "CAPACITY": [{
                "VEHICLE_NO": "3837",
                "LATITUDE": "40.5",
                "LONGITUDE": "-74.4",
                "CREATED_TIME": "05-Mar-2024 10:00:00 AM",
                "VEHICLE_TYPE": "ML",
                "CUR_PERCENTAGE": "35",
                "CUR_CAPACITY_COLOR": "#00FF00",
                "CUR_PASSENGER_COUNT": "210",
                "SECTIONS": [{
                    "SECTION_POSITION": "Front",
                    "CUR_PERCENTAGE": "20",
                    "CARS": [{"CAR_NO": "7001", "CAR_POSITION": "1", "CAR_REST": true}]
                }]
            }]
        }"##;
        let stops: Stops = serde_json::from_str(json).unwrap();
        let list = convert_train_stop_list(&catalogs(), &stops).unwrap();

        assert_eq!(list.train_id, "3837");
        assert_eq!(list.line.name, "Northeast Corridor Line");
        assert_eq!(list.destination_station.map(|s| s.code.to_string()), Some("TR".into()));
        assert!(list.transfer_at.is_none());
        assert_eq!(list.stops.len(), 2);
        assert!(list.stops[0].departed);
        assert_eq!(list.stops[0].station.code.as_str(), "NY");

        let capacity = &list.capacity[0];
        assert_eq!(capacity.capacity_percent, Some(35));
        assert_eq!(capacity.passenger_count, Some(210));
        assert_eq!(capacity.sections[0].position, SectionPosition::Front);
        assert!(capacity.sections[0].cars[0].restroom);
        assert_eq!(capacity.sections[0].cars[0].position, Some(1));
    }

    #[test]
    fn unknown_train_has_no_stop_list() {
        let stops: Stops = serde_json::from_str(r#"{"TRAIN_ID": "", "STOPS": null}"#).unwrap();
        assert!(convert_train_stop_list(&catalogs(), &stops).is_none());
    }

    #[test]
    fn converts_vehicles() {
        let json = r#"[
            {"ID": "3837", "TRAIN_LINE": "Northeast Corridor Line", "DIRECTION": "Westbound",
             "ICS_TRACK_CKT": "CL-1234", "LAST_MODIFIED": "05-Mar-2024 10:20:00 AM",
             "SCHED_DEP_TIME": "05-Mar-2024 10:31:00 AM", "SEC_LATE": "45",
             "NEXT_STOP": "Metropark", "LONGITUDE": "-74.3", "LATITUDE": "40.56"},
            {"ID": "", "LAST_MODIFIED": "05-Mar-2024 10:20:00 AM"},
            {"ID": "1234"}
        ]"#;
        let info: Vec<VehicleDataInfo> = serde_json::from_str(json).unwrap();
        let vehicles = convert_vehicles(&catalogs(), &info);

        assert_eq!(vehicles.len(), 1);
        let v = &vehicles[0];
        assert_eq!(v.line.code.as_str(), "NE");
        assert_eq!(v.direction, Direction::Westbound);
        assert_eq!(v.next_stop.as_ref().map(|s| s.code.as_str()), Some("MP"));
        assert_eq!(v.delay, Some(Duration::seconds(45)));
        assert_eq!(v.last_updated, nj(2024, 3, 5, 10, 20, 0));
    }

    #[test]
    fn converts_station_list() {
        let list = vec![
            GetStations {
                station_2char: s("NY"),
                station_name: s("New York Penn Station"),
                station_14char: s("New York"),
            },
            GetStations {
                station_name: s("No code"),
                ..Default::default()
            },
        ];
        let stations = convert_station_list(&list);
        assert_eq!(stations, vec![Station::new("NY", "New York Penn Station", "New York")]);
    }

    #[test]
    fn converts_token_validity() {
        let validity = convert_token_validity(&ValidTokenResponse {
            valid_token: true,
            user_id: s("someone"),
        });
        assert!(validity.valid);
        assert_eq!(validity.user_id.as_deref(), Some("someone"));
    }
}
