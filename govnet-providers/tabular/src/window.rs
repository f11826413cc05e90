//! Date-window filtering for governance tables.

use chrono::{NaiveDate, NaiveTime};

use crate::errors::TableError;

/// Keeps records strictly before a cutoff date.
///
/// The cutoff is midnight UTC at the start of the given day, matching the
/// upstream convention of `dd/mm/yyyy` snapshot dates.
///
/// # Examples
/// ```
/// use govnet_providers_tabular::TimeWindow;
///
/// let window = TimeWindow::parse("01/04/2021")?;
/// assert!(window.admits(1_610_000_000)); // January 2021
/// assert!(!window.admits(1_620_000_000)); // May 2021
/// # Ok::<(), govnet_providers_tabular::TableError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimeWindow {
    cutoff: i64,
}

impl TimeWindow {
    /// Creates a window admitting records strictly before `date`.
    #[must_use]
    pub fn before(date: NaiveDate) -> Self {
        Self {
            cutoff: date.and_time(NaiveTime::MIN).and_utc().timestamp(),
        }
    }

    /// Parses a `dd/mm/yyyy` cutoff.
    ///
    /// # Errors
    /// Returns [`TableError::InvalidDate`] when the input does not match
    /// the expected format.
    pub fn parse(raw: &str) -> Result<Self, TableError> {
        NaiveDate::parse_from_str(raw, "%d/%m/%Y")
            .map(Self::before)
            .map_err(|source| TableError::InvalidDate {
                provided: raw.to_owned(),
                source,
            })
    }

    /// Returns whether a record timestamp falls inside the window.
    #[must_use]
    pub fn admits(&self, timestamp: i64) -> bool {
        timestamp < self.cutoff
    }

    /// Returns the cutoff as epoch seconds.
    #[must_use]
    #[rustfmt::skip]
    pub fn cutoff(&self) -> i64 { self.cutoff }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_is_midnight_utc() {
        let window = TimeWindow::parse("02/01/1970").expect("valid date");
        assert_eq!(window.cutoff(), 86_400);
        assert!(window.admits(86_399));
        assert!(!window.admits(86_400));
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let err = TimeWindow::parse("2021-04-01").expect_err("wrong format");
        assert!(matches!(err, TableError::InvalidDate { .. }));
    }
}
