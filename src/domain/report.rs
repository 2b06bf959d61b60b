use crate::utils::monitor::Timed;
use serde::Serialize;

/// The most frequent value of a column and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Popular<T> {
    pub value: T,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    /// 1-based month number.
    pub month: Popular<u32>,
    pub day_of_week: Popular<String>,
    pub start_hour: Popular<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub start_station: Popular<String>,
    pub end_station: Popular<String>,
    /// Rendered as `"<start> & <end>"`.
    pub trip: Popular<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_seconds: f64,
    pub mean_seconds: Option<f64>,
    pub trips_counted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: Popular<i32>,
}

/// Statistics over a column some cities do not publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "stats", rename_all = "snake_case")]
pub enum ColumnStats<T> {
    /// The source file has no such column.
    Unavailable,
    /// The column exists but every remaining row leaves it blank.
    Empty,
    Available(T),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<ValueCount>,
    pub gender: ColumnStats<Vec<ValueCount>>,
    pub birth_year: ColumnStats<BirthYearStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub trips: usize,
    pub time: Timed<Option<TimeStats>>,
    pub stations: Timed<Option<StationStats>>,
    pub duration: Timed<DurationStats>,
    pub users: Timed<UserStats>,
}
