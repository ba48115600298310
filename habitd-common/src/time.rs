//! Calendar date helpers.
//!
//! Every user-facing date in habitd is a plain calendar day in ISO
//! `YYYY-MM-DD` form. The only timezone decision made anywhere is picking
//! the server's local "today" when a request omits its date.

use chrono::{Local, NaiveDate};

use crate::{Error, Result};

/// Wire format for all dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date, rejecting anything else.
///
/// A malformed date is fatal for the request that carried it; callers
/// should surface it as a client error before computing anything.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(raw.to_string()))
}

/// The server-local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
