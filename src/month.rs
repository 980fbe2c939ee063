//! The calendar month that drives the expense list, total, and CSV export.

use std::{fmt, str::FromStr};

use time::{Date, Month, OffsetDateTime, UtcOffset};

use crate::Error;

/// A calendar month in `YYYY-MM` form.
///
/// This is the value of the month filter control and the scope of the CSV
/// export. An expense belongs to a month when its date's year and month
/// match, which is the typed equivalent of comparing the first seven
/// characters of a `YYYY-MM-DD` date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveMonth {
    year: i32,
    month: Month,
}

impl ActiveMonth {
    /// The current calendar month at the UTC offset `local_offset`.
    pub fn current(local_offset: UtcOffset) -> Self {
        Self::from_date(OffsetDateTime::now_utc().to_offset(local_offset).date())
    }

    /// The month that `date` falls in.
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Whether `date` falls in this month.
    pub fn contains(self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for ActiveMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month as u8)
    }
}

impl FromStr for ActiveMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || Error::InvalidMonth(s.to_owned());
        let (year, month) = s.split_once('-').ok_or_else(error)?;

        if year.len() != 4 || month.len() != 2 {
            return Err(error());
        }

        let year: i32 = year.parse().map_err(|_| error())?;
        let month: u8 = month.parse().map_err(|_| error())?;
        let month = Month::try_from(month).map_err(|_| error())?;

        Ok(Self { year, month })
    }
}
