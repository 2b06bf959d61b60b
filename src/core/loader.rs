use crate::core::{OptionalColumns, TripRecord, TripTable};
use crate::utils::error::{BikeshareError, Result};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;

pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Start Time",
    "Start Station",
    "End Station",
    "Trip Duration",
    "User Type",
];

const START_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "Trip Duration", default)]
    trip_duration: Option<f64>,
    #[serde(rename = "Start Station", default)]
    start_station: Option<String>,
    #[serde(rename = "End Station", default)]
    end_station: Option<String>,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

pub fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    START_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Parses a city CSV file into a [`TripTable`], deriving month and weekday
/// from `Start Time`.
pub fn parse_trips(data: &[u8]) -> Result<TripTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(BikeshareError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let columns = OptionalColumns {
        gender: headers.iter().any(|h| h == "Gender"),
        birth_year: headers.iter().any(|h| h == "Birth Year"),
    };

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let index = rows.len();
        rows.push(parse_row(index, &record, &headers)?);
    }

    tracing::debug!(
        "Parsed {} trips ({} columns, gender: {}, birth year: {})",
        rows.len(),
        headers.len(),
        columns.gender,
        columns.birth_year
    );

    Ok(TripTable {
        headers: headers.iter().map(str::to_string).collect(),
        rows,
        columns,
    })
}

fn parse_row(index: usize, record: &StringRecord, headers: &StringRecord) -> Result<TripRecord> {
    let raw: RawTrip =
        record
            .deserialize(Some(headers))
            .map_err(|e| BikeshareError::TripParseError {
                row: index,
                message: e.to_string(),
            })?;

    let start_time =
        parse_start_time(&raw.start_time).ok_or_else(|| BikeshareError::TripParseError {
            row: index,
            message: format!("unrecognised Start Time '{}'", raw.start_time),
        })?;
    let (month, day_of_week) = TripRecord::derive_calendar(&start_time);

    Ok(TripRecord {
        index,
        start_time,
        trip_duration: raw.trip_duration.filter(|d| d.is_finite()),
        start_station: non_blank(raw.start_station),
        end_station: non_blank(raw.end_station),
        user_type: non_blank(raw.user_type),
        gender: non_blank(raw.gender),
        birth_year: raw
            .birth_year
            .filter(|y| y.is_finite())
            .map(|y| y.round() as i32),
        month,
        day_of_week,
        raw: record.iter().map(str::to_string).collect(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
