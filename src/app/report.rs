use crate::domain::model::{month_name, City, Filters, FilterSummary};
use crate::domain::report::{
    ColumnStats, DurationStats, StationStats, StatsReport, TimeStats, UserStats, ValueCount,
};
use crate::utils::error::Result;
use crate::utils::monitor::Timed;
use serde::Serialize;

pub const RULE: &str = "----------------------------------------";

const NO_TRIPS: &str = "No trips match the selected filters.";
const NO_STATIONS: &str = "No station data available for these trips.";

pub fn render_text(filters: &Filters, report: &StatsReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("\nAnalyzing {} trips for {}\n", report.trips, filters));
    out.push_str(&section(
        "Calculating The Most Frequent Times of Travel...",
        &report.time,
        |stats| match stats {
            Some(stats) => time_lines(stats),
            None => vec![NO_TRIPS.to_string()],
        },
    ));
    out.push_str(&section(
        "Calculating The Most Popular Stations and Trip...",
        &report.stations,
        |stats| match stats {
            Some(stats) => station_lines(stats),
            None if report.trips > 0 => vec![NO_STATIONS.to_string()],
            None => vec![NO_TRIPS.to_string()],
        },
    ));
    out.push_str(&section(
        "Calculating Trip Duration...",
        &report.duration,
        duration_lines,
    ));
    out.push_str(&section("Calculating User Stats...", &report.users, |stats| {
        user_lines(filters.city, stats)
    }));
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    filters: FilterSummary,
    report: &'a StatsReport,
}

pub fn render_json(filters: &Filters, report: &StatsReport) -> Result<String> {
    let json = serde_json::to_string_pretty(&JsonReport {
        filters: filters.summary(),
        report,
    })?;
    Ok(json)
}

fn section<T>(title: &str, timed: &Timed<T>, lines: impl FnOnce(&T) -> Vec<String>) -> String {
    let mut out = format!("\n{}\n\n", title);
    for line in lines(&timed.value) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!("\nThis took {} seconds.\n", timed.elapsed_secs));
    out.push_str(RULE);
    out.push('\n');
    out
}

fn time_lines(stats: &TimeStats) -> Vec<String> {
    vec![
        format!(
            "Month: {} ({} trips)",
            month_name(stats.month.value),
            stats.month.count
        ),
        format!(
            "Day of week: {} ({} trips)",
            stats.day_of_week.value, stats.day_of_week.count
        ),
        format!(
            "Start hour: {} ({} trips)",
            stats.start_hour.value, stats.start_hour.count
        ),
    ]
}

fn station_lines(stats: &StationStats) -> Vec<String> {
    vec![
        format!(
            "Start station: {} ({} trips)",
            stats.start_station.value, stats.start_station.count
        ),
        format!(
            "End station: {} ({} trips)",
            stats.end_station.value, stats.end_station.count
        ),
        format!(
            "Combination: {} ({} trips)",
            stats.trip.value, stats.trip.count
        ),
    ]
}

fn duration_lines(stats: &DurationStats) -> Vec<String> {
    let mut lines = vec![format!(
        "Total: {:.1} seconds ({})",
        stats.total_seconds,
        format_duration(stats.total_seconds)
    )];
    match stats.mean_seconds {
        Some(mean) => lines.push(format!(
            "Average: {:.1} seconds ({})",
            mean,
            format_duration(mean)
        )),
        None => lines.push("Average: n/a (no trip durations recorded)".to_string()),
    }
    lines
}

fn user_lines(city: City, stats: &UserStats) -> Vec<String> {
    let mut lines = vec!["Types:".to_string()];
    lines.extend(count_lines(&stats.user_types));

    match &stats.gender {
        ColumnStats::Unavailable => {
            lines.push(format!("[No gender data available for {}.]", city))
        }
        ColumnStats::Empty => lines.push("Gender: no values recorded".to_string()),
        ColumnStats::Available(counts) => {
            lines.push("Gender:".to_string());
            lines.extend(count_lines(counts));
        }
    }

    match &stats.birth_year {
        ColumnStats::Unavailable => {
            lines.push(format!("[No birth year data available for {}.]", city))
        }
        ColumnStats::Empty => lines.push("Birth year: no values recorded".to_string()),
        ColumnStats::Available(years) => {
            lines.push(format!("Oldest: {}", years.earliest));
            lines.push(format!("Youngest: {}", years.most_recent));
            lines.push(format!(
                "Most common: {} ({} riders)",
                years.most_common.value, years.most_common.count
            ));
        }
    }
    lines
}

fn count_lines(counts: &[ValueCount]) -> Vec<String> {
    if counts.is_empty() {
        return vec!["  (none)".to_string()];
    }
    let width = counts
        .iter()
        .map(|c| c.value.chars().count())
        .max()
        .unwrap_or(0);
    counts
        .iter()
        .map(|c| format!("  {:<width$}  {}", c.value, c.count, width = width))
        .collect()
}

/// `D days HH:MM:SS`, dropping the day part under one day.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let (days, rest) = (total / 86_400, total % 86_400);
    let (hours, rest) = (rest / 3_600, rest % 3_600);
    let (minutes, secs) = (rest / 60, rest % 60);

    let clock = format!("{:02}:{:02}:{:02}", hours, minutes, secs);
    match days {
        0 => clock,
        1 => format!("1 day {}", clock),
        n => format!("{} days {}", n, clock),
    }
}
