// Utility functions
use chrono::{Local, NaiveDate};

/// Current local date; names the report sheet and the dump file.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
