use crate::core::TripTable;
use crate::domain::model::{weekday_name, WEEKDAYS};
use crate::domain::report::{
    BirthYearStats, ColumnStats, DurationStats, Popular, StationStats, StatsReport, TimeStats,
    UserStats, ValueCount,
};
use crate::utils::monitor::timed;
use std::collections::{BTreeMap, HashMap};

/// Most frequent value; ties resolve to the smallest value.
pub fn mode<T, I>(values: I) -> Option<Popular<T>>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    counts
        .into_iter()
        .fold(None, |best: Option<Popular<T>>, (value, count)| match best {
            Some(best) if best.count >= count => Some(best),
            _ => Some(Popular { value, count }),
        })
}

/// Occurrences of each value, most frequent first, ties by value.
pub fn value_counts<'a, I>(values: I) -> Vec<ValueCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut counts: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    counts
}

pub fn time_stats(table: &TripTable) -> Option<TimeStats> {
    let month = mode(table.rows.iter().map(|t| t.month))?;
    let start_hour = mode(table.rows.iter().map(|t| t.start_hour()))?;
    // Weekday has no ordering of its own; rank it Monday first.
    let day = mode(table.rows.iter().map(|t| t.day_of_week.num_days_from_monday()))?;

    Some(TimeStats {
        month,
        day_of_week: Popular {
            value: weekday_name(WEEKDAYS[day.value as usize]).to_string(),
            count: day.count,
        },
        start_hour,
    })
}

/// Rows with a blank station are left out; a trip pair needs both ends.
pub fn station_stats(table: &TripTable) -> Option<StationStats> {
    let start_station = mode(table.rows.iter().filter_map(|t| t.start_station.as_deref()))?;
    let end_station = mode(table.rows.iter().filter_map(|t| t.end_station.as_deref()))?;
    let trip = mode(
        table
            .rows
            .iter()
            .filter_map(|t| Some((t.start_station.as_deref()?, t.end_station.as_deref()?))),
    )?;

    Some(StationStats {
        start_station: owned(start_station),
        end_station: owned(end_station),
        trip: Popular {
            value: format!("{} & {}", trip.value.0, trip.value.1),
            count: trip.count,
        },
    })
}

pub fn duration_stats(table: &TripTable) -> DurationStats {
    let (total_seconds, trips_counted) = table
        .rows
        .iter()
        .filter_map(|t| t.trip_duration)
        .fold((0.0, 0usize), |(sum, n), d| (sum + d, n + 1));

    DurationStats {
        total_seconds,
        mean_seconds: (trips_counted > 0).then(|| total_seconds / trips_counted as f64),
        trips_counted,
    }
}

pub fn user_stats(table: &TripTable) -> UserStats {
    let user_types = value_counts(table.rows.iter().filter_map(|t| t.user_type.as_deref()));

    let gender = if !table.columns.gender {
        ColumnStats::Unavailable
    } else {
        let counts = value_counts(table.rows.iter().filter_map(|t| t.gender.as_deref()));
        if counts.is_empty() {
            ColumnStats::Empty
        } else {
            ColumnStats::Available(counts)
        }
    };

    let birth_year = if !table.columns.birth_year {
        ColumnStats::Unavailable
    } else {
        let years: Vec<i32> = table.rows.iter().filter_map(|t| t.birth_year).collect();
        match (
            years.iter().min(),
            years.iter().max(),
            mode(years.iter().copied()),
        ) {
            (Some(&earliest), Some(&most_recent), Some(most_common)) => {
                ColumnStats::Available(BirthYearStats {
                    earliest,
                    most_recent,
                    most_common,
                })
            }
            _ => ColumnStats::Empty,
        }
    };

    UserStats {
        user_types,
        gender,
        birth_year,
    }
}

/// Runs every reporter over `table`, timing each section.
pub fn summarize(table: &TripTable) -> StatsReport {
    StatsReport {
        trips: table.len(),
        time: timed("time stats", || time_stats(table)),
        stations: timed("station stats", || station_stats(table)),
        duration: timed("trip duration stats", || duration_stats(table)),
        users: timed("user stats", || user_stats(table)),
    }
}

fn owned(popular: Popular<&str>) -> Popular<String> {
    Popular {
        value: popular.value.to_string(),
        count: popular.count,
    }
}
