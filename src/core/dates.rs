use chrono::{Days, NaiveDate};

use crate::core::{AppError, Result};

/// Inclusive calendar-day range over the reporting period.
///
/// Iterates every date from `start` through `end` in ascending order. The
/// iterator is `Clone`, so the same range can be walked once per entity kind
/// without re-parsing the request. A range with `start > end` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    next: NaiveDate,
    end: NaiveDate,
    exhausted: bool,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            next: start,
            end,
            exhausted: start > end,
        }
    }

    /// Number of calendar days in the range (0 when start > end).
    pub fn len(&self) -> usize {
        if self.exhausted {
            0
        } else {
            (self.end - self.next).num_days() as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.exhausted
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.exhausted {
            return None;
        }
        let current = self.next;
        if current == self.end {
            self.exhausted = true;
        } else {
            // Succ always exists this side of NaiveDate::MAX
            self.next = current
                .checked_add_days(Days::new(1))
                .unwrap_or_else(|| current);
            self.exhausted = self.next == current;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len();
        (remaining, Some(remaining))
    }
}

/// Parse a request date in ISO `YYYY-MM-DD` form.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::validation(format!("Invalid date '{}'. Expected YYYY-MM-DD", raw))
    })
}
