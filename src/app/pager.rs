use crate::app::console::Console;
use crate::core::pager::{render_page, Paginator};
use crate::core::TripTable;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

pub const MORE_PROMPT: &str = "\nDo you want to see some more lines? Enter yes or no.\n";
pub const NOT_UNDERSTOOD: &str = "\nSorry, I didn't catch that, come again.";
pub const END_OF_DATA: &str = "\nYou have reached the end of the data set.\n";

/// Shows `table` a page at a time for as long as the user asks for more.
/// Returns the number of rows shown.
pub fn page_raw_data<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    table: &TripTable,
    page_size: usize,
) -> Result<usize> {
    let mut pages = Paginator::new(table, page_size);

    while let Some(rows) = pages.next() {
        console.say(&render_page(&table.headers, rows))?;
        if !pages.has_more() {
            break;
        }
        if !console.confirm(MORE_PROMPT, NOT_UNDERSTOOD)? {
            tracing::debug!("Pager stopped after {} rows", pages.position());
            return Ok(pages.position());
        }
    }

    console.say(END_OF_DATA)?;
    Ok(pages.position())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::parse_trips;
    use std::io::Cursor;

    fn table(rows: usize) -> TripTable {
        let mut data = String::from("Start Time,Trip Duration,Start Station,End Station,User Type\n");
        for i in 0..rows {
            data.push_str(&format!(
                "2017-04-0{} 12:00:00,60,Station {},Dock,Customer\n",
                (i % 9) + 1,
                i
            ));
        }
        parse_trips(data.as_bytes()).unwrap()
    }

    fn run(table: &TripTable, input: &str) -> (usize, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let shown = page_raw_data(&mut console, table, 5).unwrap();
        (shown, String::from_utf8(console.into_output()).unwrap())
    }

    #[test]
    fn test_pages_until_end_of_data() {
        let table = table(12);
        let (shown, output) = run(&table, "yes\nyes\n");

        assert_eq!(shown, 12);
        assert!(output.contains("Station 11"));
        assert_eq!(output.matches("Do you want to see some more lines?").count(), 2);
        assert!(output.contains("You have reached the end of the data set."));
    }

    #[test]
    fn test_stops_on_no() {
        let table = table(12);
        let (shown, output) = run(&table, "no\n");

        assert_eq!(shown, 5);
        assert!(output.contains("Station 4"));
        assert!(!output.contains("Station 5"));
        assert!(!output.contains("end of the data set"));
    }

    #[test]
    fn test_reasks_on_unclear_answer() {
        let table = table(7);
        let (shown, output) = run(&table, "sure\nyes\n");

        assert_eq!(shown, 7);
        assert_eq!(output.matches("Sorry, I didn't catch that").count(), 1);
    }

    #[test]
    fn test_short_table_shows_everything_at_once() {
        let table = table(3);
        let (shown, output) = run(&table, "");

        assert_eq!(shown, 3);
        assert!(output.contains("Station 2"));
        assert!(!output.contains("Do you want to see some more lines?"));
        assert!(output.contains("You have reached the end of the data set."));
    }

    #[test]
    fn test_empty_table() {
        let table = table(0);
        let (shown, output) = run(&table, "");

        assert_eq!(shown, 0);
        assert!(output.contains("You have reached the end of the data set."));
    }
}
