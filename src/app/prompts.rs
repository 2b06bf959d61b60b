use crate::app::console::Console;
use crate::app::report::RULE;
use crate::domain::model::{City, DayFilter, Filters, MonthFilter};
use crate::utils::error::Result;
use std::io::{BufRead, Write};

pub const BANNER: &str = "\n        __o\n      _ \\<_\n.....(_)/(_)\n";
pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
pub const INVALID_INPUT: &str = "I'm sorry but this was not a valid input, try again!";

const CITY_PROMPT: &str =
    "First of all: Which city do you want to look at? (Chicago, New York City, Washington): ";
const MONTH_PROMPT: &str = "Now: Which month would you like to filter for? \
(January, February, ... , June OR 'all' for no filter): ";
const DAY_PROMPT: &str = "Lastly: Which weekday would you like to filter for? \
(Monday, Tuesday, ... , Sunday OR 'all' for no filter): ";

/// Greets the user and asks for city, month and day until each is valid.
pub fn collect_filters<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Filters> {
    console.say(BANNER)?;
    console.say(GREETING)?;

    let city = console.ask_until(CITY_PROMPT, INVALID_INPUT, |s| s.parse::<City>())?;
    let month = console.ask_until(MONTH_PROMPT, INVALID_INPUT, |s| s.parse::<MonthFilter>())?;
    let day = console.ask_until(DAY_PROMPT, INVALID_INPUT, |s| s.parse::<DayFilter>())?;

    console.say(RULE)?;

    let filters = Filters::new(city, month, day);
    tracing::debug!("Collected filters: {}", filters);
    Ok(filters)
}
