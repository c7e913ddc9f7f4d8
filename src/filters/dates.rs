//! Date-range defaulting and picker rules.
//!
//! Dates travel as ISO `YYYY-MM-DD` strings in the URL and are not
//! timezone-aware; "today" is always injected by the caller so the rules
//! stay deterministic under test.

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::filters::query;

/// Stay length of the default window, in nights.
const DEFAULT_STAY_NIGHTS: u64 = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    /// The picker disables days in the past.
    #[error("date is before today")]
    BeforeToday,
    /// The end picker disables days before the chosen start date.
    #[error("date is before the selected start date")]
    BeforeStart,
}

/// Default check-in/check-out window: tomorrow through tomorrow + 3 days.
pub fn default_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let check_in = today + Days::new(1);
    let check_out = check_in + Days::new(DEFAULT_STAY_NIGHTS);
    (check_in, check_out)
}

/// Strict ISO date parsing; anything else reads as absent.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Fills a missing start or end date into `query` with the default window.
/// Returns the rewritten query string, or `None` when both dates are
/// already present — callers apply the rewrite as a history *replace* so
/// the defaults never become a back-navigable step.
pub fn ensure_date_window(query_string: &str, today: NaiveDate) -> Option<String> {
    let mut state = query::parse_query(query_string);
    if state.start_date.is_some() && state.end_date.is_some() {
        return None;
    }

    let (check_in, check_out) = default_window(today);
    if state.start_date.is_none() {
        state.start_date = Some(check_in);
    }
    if state.end_date.is_none() {
        state.end_date = Some(check_out.max(state.start_date.unwrap_or(check_out)));
    }

    Some(query::merge_query(query_string, &state))
}

/// Selection state of the paired check-in/check-out pickers.
///
/// The end picker refuses dates earlier than the chosen start date, and
/// choosing a start date later than the current end date opens the end
/// picker as a prompt without clearing the now-invalid end date.
#[derive(Clone, Debug)]
pub struct DatePicker {
    today: NaiveDate,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    end_open: bool,
}

impl DatePicker {
    pub fn new(today: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            today,
            start,
            end,
            end_open: false,
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Whether the end picker was opened as a prompt for a new end date.
    pub fn end_open(&self) -> bool {
        self.end_open
    }

    /// Days the check-in calendar greys out.
    pub fn start_disabled(&self, date: NaiveDate) -> bool {
        date < self.today
    }

    /// Days the check-out calendar greys out: anything before the chosen
    /// start date, or before today when no start date is chosen.
    pub fn end_disabled(&self, date: NaiveDate) -> bool {
        match self.start {
            Some(start) => date < start,
            None => date < self.today,
        }
    }

    pub fn select_start(&mut self, date: NaiveDate) -> Result<(), DateRangeError> {
        if self.start_disabled(date) {
            return Err(DateRangeError::BeforeToday);
        }
        self.start = Some(date);
        if let Some(end) = self.end
            && end < date
        {
            self.end_open = true;
        }
        Ok(())
    }

    pub fn select_end(&mut self, date: NaiveDate) -> Result<(), DateRangeError> {
        if self.end_disabled(date) {
            return Err(if self.start.is_some() {
                DateRangeError::BeforeStart
            } else {
                DateRangeError::BeforeToday
            });
        }
        self.end = Some(date);
        self.end_open = false;
        Ok(())
    }
}
