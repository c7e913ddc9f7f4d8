//! Bidirectional binding between locally-edited filter state and the URL.
//!
//! The synchronizer owns no timer and performs no I/O: callers feed it
//! timestamps and apply the [`Navigation`] values it emits. That keeps the
//! loop-prevention rules — debounce, adoption guard, last-pushed-tuple
//! comparison — testable without a UI toolkit attached.

use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::filters::FilterState;
use crate::filters::dates;
use crate::filters::query;

/// Quiet period after a local edit before a navigation is pushed.
pub const EDIT_DEBOUNCE: Duration = Duration::from_millis(400);
/// Window after adopting an external URL change during which no local
/// push may fire, so the write-back cannot re-trigger itself.
pub const URL_ADOPT_GUARD: Duration = Duration::from_millis(200);

/// A URL update the host should apply. `Replace` rewrites the current
/// history entry; `Push` creates a new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Push(String),
    Replace(String),
}

impl Navigation {
    pub fn query(&self) -> &str {
        match self {
            Navigation::Push(query) | Navigation::Replace(query) => query,
        }
    }
}

pub struct FilterSync {
    /// Locally edited form state.
    state: FilterState,
    /// Tracked fields as they currently stand in the URL.
    url_state: FilterState,
    /// Query parameters this component does not own, kept verbatim.
    foreign: Vec<(String, String)>,
    /// The last tuple this synchronizer itself pushed.
    last_pushed: FilterState,
    deadline: Option<Instant>,
    guard_until: Option<Instant>,
    debounce: Duration,
    guard: Duration,
}

impl FilterSync {
    /// Reads initial state from the URL. When the query lacks a start or
    /// end date the default window is filled in and returned as a
    /// `Replace` navigation, mirroring the date widget's mount behavior.
    pub fn new(initial_query: &str, today: NaiveDate) -> (Self, Option<Navigation>) {
        Self::with_windows(initial_query, today, EDIT_DEBOUNCE, URL_ADOPT_GUARD)
    }

    /// Like [`FilterSync::new`] with explicit debounce/guard windows.
    pub fn with_windows(
        initial_query: &str,
        today: NaiveDate,
        debounce: Duration,
        guard: Duration,
    ) -> (Self, Option<Navigation>) {
        let replace = dates::ensure_date_window(initial_query, today);
        let effective_query = replace.as_deref().unwrap_or(initial_query);

        let state = query::parse_query(effective_query);
        let sync = Self {
            url_state: state.clone(),
            last_pushed: state.clone(),
            state,
            foreign: query::foreign_pairs(effective_query),
            deadline: None,
            guard_until: None,
            debounce,
            guard,
        };

        (sync, replace.map(Navigation::Replace))
    }

    /// Current local form state.
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Applies a local edit and re-arms the single-shot debounce window.
    pub fn edit(&mut self, now: Instant, apply: impl FnOnce(&mut FilterState)) {
        apply(&mut self.state);
        self.deadline = Some(now + self.debounce);
    }

    /// Absorbs an external URL change (back/forward, direct link,
    /// pagination click). Only fields whose URL value differs from the
    /// current local value are overwritten, and the next local push is
    /// suppressed for the guard window.
    pub fn sync_from_url(&mut self, query_string: &str, now: Instant) {
        let incoming = query::parse_query(query_string);

        macro_rules! adopt {
            ($($field:ident),+ $(,)?) => {
                $(
                    if incoming.$field != self.state.$field {
                        self.state.$field = incoming.$field.clone();
                    }
                )+
            };
        }

        adopt!(
            search,
            country,
            city,
            property_types,
            min_price,
            max_price,
            guests,
            bedrooms,
            bathrooms,
            start_date,
            end_date,
            page,
        );

        self.url_state = incoming;
        self.foreign = query::foreign_pairs(query_string);
        // The adopted tuple counts as pushed: a pending debounce comparing
        // against it resolves as a no-op instead of echoing the URL back.
        self.last_pushed = self.state.clone();
        self.guard_until = Some(now + self.guard);
    }

    /// Next instant at which [`FilterSync::poll`] could do work.
    pub fn next_deadline(&self) -> Option<Instant> {
        let deadline = self.deadline?;
        Some(match self.guard_until {
            Some(guard) if guard > deadline => guard,
            _ => deadline,
        })
    }

    /// Fires the pending navigation if the debounce elapsed, the adoption
    /// guard passed, and the edited tuple actually differs from the last
    /// tuple pushed. Pushing resets the page to 1 whenever a non-date
    /// filter field changed.
    pub fn poll(&mut self, now: Instant) -> Option<Navigation> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        if let Some(guard) = self.guard_until {
            if now < guard {
                return None;
            }
            self.guard_until = None;
        }

        self.deadline = None;

        if self.state.fields_equal(&self.last_pushed) {
            return None;
        }

        let mut target = self.state.clone();
        target.page = if target.filters_equal(&self.url_state) {
            self.url_state.page
        } else {
            1
        };

        let navigation = query::serialize(&target, &self.foreign);
        self.state = target.clone();
        self.url_state = target.clone();
        self.last_pushed = target;

        Some(Navigation::Push(navigation))
    }
}
