use crate::core::{Filters, TripTable};

/// Keeps the rows that pass `filters`. Headers, column availability and the
/// surviving rows are carried over untouched.
pub fn apply(table: TripTable, filters: &Filters) -> TripTable {
    let TripTable {
        headers,
        rows,
        columns,
    } = table;
    let before = rows.len();

    let rows: Vec<_> = rows.into_iter().filter(|trip| filters.matches(trip)).collect();

    tracing::debug!(
        "Filter {} kept {} of {} trips",
        filters,
        rows.len(),
        before
    );

    TripTable {
        headers,
        rows,
        columns,
    }
}
