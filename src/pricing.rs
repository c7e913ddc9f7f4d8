//! Displayed-price derivation for the booking card.
//!
//! A pure function of the nightly rate, the selected date range, and the
//! cart snapshot. Without a valid range the card shows the nightly rate
//! alone; otherwise the stay total plus the paid activities, with free
//! activities excluded from both the sum and the label count.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::activity::Activity;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PriceQuote {
    /// No usable date range: show the nightly rate alone.
    PerNight { rate: f64 },
    /// A positive number of nights is selected.
    Stay {
        total: f64,
        nights: i64,
        /// Activities contributing a positive amount; free ones don't count.
        paid_activities: usize,
    },
}

/// Derives the displayed quote. Recomputed whenever the start date, end
/// date, nightly rate, or cart contents change; there is no hidden state.
pub fn quote(
    nightly_rate: f64,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    cart: &[Activity],
) -> PriceQuote {
    let (Some(start), Some(end)) = (start_date, end_date) else {
        return PriceQuote::PerNight { rate: nightly_rate };
    };

    let nights = (end - start).num_days();
    if nights <= 0 {
        return PriceQuote::PerNight { rate: nightly_rate };
    }

    let paid: Vec<f64> = cart
        .iter()
        .map(Activity::price)
        .filter(|amount| *amount > 0.0)
        .collect();

    PriceQuote::Stay {
        total: nightly_rate * nights as f64 + paid.iter().sum::<f64>(),
        nights,
        paid_activities: paid.len(),
    }
}

impl PriceQuote {
    /// The amount rendered in the large figure, e.g. `170.00`.
    pub fn amount(&self) -> f64 {
        match self {
            PriceQuote::PerNight { rate } => *rate,
            PriceQuote::Stay { total, .. } => *total,
        }
    }

    /// The small-print label next to the amount: `/ night`, or
    /// `for 3 days and 1 activity`.
    pub fn label(&self) -> String {
        match self {
            PriceQuote::PerNight { .. } => "/ night".to_string(),
            PriceQuote::Stay {
                nights,
                paid_activities,
                ..
            } => {
                let days = if *nights == 1 { "day" } else { "days" };
                match paid_activities {
                    0 => format!("for {nights} {days}"),
                    1 => format!("for {nights} {days} and 1 activity"),
                    n => format!("for {nights} {days} and {n} activities"),
                }
            }
        }
    }

    /// Full display string, e.g. `€100.00 / night`.
    pub fn display(&self) -> String {
        format!("€{:.2} {}", self.amount(), self.label())
    }
}
