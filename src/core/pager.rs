use crate::core::{TripRecord, TripTable};
use crate::domain::model::weekday_name;

pub const DEFAULT_PAGE_SIZE: usize = 5;

const DERIVED_COLUMNS: [&str; 2] = ["month", "day_of_week"];

/// Walks a table `page_size` rows at a time.
pub struct Paginator<'a> {
    table: &'a TripTable,
    page_size: usize,
    position: usize,
}

impl<'a> Paginator<'a> {
    pub fn new(table: &'a TripTable, page_size: usize) -> Self {
        Self {
            table,
            page_size: page_size.max(1),
            position: 0,
        }
    }

    pub fn has_more(&self) -> bool {
        self.position < self.table.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'a> Iterator for Paginator<'a> {
    type Item = &'a [TripRecord];

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_more() {
            return None;
        }
        let end = (self.position + self.page_size).min(self.table.len());
        let page = &self.table.rows[self.position..end];
        self.position = end;
        Some(page)
    }
}

/// Renders rows as an aligned table: row index, every source column, then
/// the derived month and weekday.
pub fn render_page(headers: &[String], rows: &[TripRecord]) -> String {
    let mut header_cells: Vec<String> = Vec::with_capacity(headers.len() + 3);
    header_cells.push(String::new());
    header_cells.extend(headers.iter().cloned());
    header_cells.extend(DERIVED_COLUMNS.iter().map(|c| c.to_string()));

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(header_cells.len());
            cells.push(row.index.to_string());
            cells.extend(
                (0..headers.len()).map(|i| row.raw.get(i).cloned().unwrap_or_default()),
            );
            cells.push(row.month.to_string());
            cells.push(weekday_name(row.day_of_week).to_string());
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header_cells.len())
        .map(|col| {
            body.iter()
                .map(|cells| cells[col].chars().count())
                .chain(std::iter::once(header_cells[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(body.len() + 1);
    lines.push(format_line(&header_cells, &widths));
    for cells in &body {
        lines.push(format_line(cells, &widths));
    }
    lines.join("\n")
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::parse_trips;

    fn table(rows: usize) -> TripTable {
        let mut data =
            String::from(",Start Time,Trip Duration,Start Station,End Station,User Type\n");
        for i in 0..rows {
            data.push_str(&format!(
                "{},2017-01-0{} 08:00:00,60,Station {},Dock,Subscriber\n",
                100 + i,
                (i % 9) + 1,
                i
            ));
        }
        parse_trips(data.as_bytes()).unwrap()
    }

    #[test]
    fn test_pages_include_last_partial_page() {
        let table = table(12);
        let sizes: Vec<usize> = Paginator::new(&table, 5).map(|p| p.len()).collect();
        assert_eq!(sizes, vec![5, 5, 2]);
    }

    #[test]
    fn test_small_table_is_one_page() {
        let table = table(3);
        let mut pager = Paginator::new(&table, 5);
        assert!(pager.has_more());
        assert_eq!(pager.next().map(|p| p.len()), Some(3));
        assert!(!pager.has_more());
        assert!(pager.next().is_none());
    }

    #[test]
    fn test_empty_table_has_no_pages() {
        let table = table(0);
        let mut pager = Paginator::new(&table, 5);
        assert!(!pager.has_more());
        assert!(pager.next().is_none());
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let table = table(2);
        assert_eq!(Paginator::new(&table, 0).count(), 2);
    }

    #[test]
    fn test_render_page_columns() {
        let table = table(2);
        let rendered = render_page(&table.headers, &table.rows);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Start Time"));
        assert!(lines[0].contains("day_of_week"));
        assert!(lines[1].starts_with("0  100"));
        assert!(lines[1].contains("Station 0"));
        assert!(lines[1].ends_with("Sunday"));
        assert!(lines[2].starts_with("1  101"));
        assert!(lines[2].ends_with("Monday"));
    }
}
