//! Filter/date state for the listings page.
//!
//! The query string is the canonical cross-navigation representation of
//! this state: widgets edit a local [`FilterState`], and [`sync`] pushes it
//! back into the URL after a quiet period. [`query`] owns the contract in
//! both directions.

use chrono::NaiveDate;
use serde::Serialize;

pub mod dates;
pub mod query;
pub mod sync;

/// Tracked filter fields of the listings page, one value per query
/// parameter. `1` means "any" for the three counters, and page numbers
/// start at 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub search: String,
    pub country: String,
    pub city: String,
    /// Order-preserving for display; membership checks ignore order.
    pub property_types: Vec<String>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub guests: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            country: String::new(),
            city: String::new(),
            property_types: Vec::new(),
            min_price: None,
            max_price: None,
            guests: 1,
            bedrooms: 1,
            bathrooms: 1,
            start_date: None,
            end_date: None,
            page: 1,
        }
    }
}

impl FilterState {
    /// Membership test over the selected property types, order-insensitive.
    pub fn has_property_type(&self, property_type: &str) -> bool {
        self.property_types.iter().any(|t| t == property_type)
    }

    /// True when the two states agree on every filter field — everything
    /// except the date range and the page number.
    pub fn filters_equal(&self, other: &Self) -> bool {
        self.search == other.search
            && self.country == other.country
            && self.city == other.city
            && self.property_types == other.property_types
            && self.min_price == other.min_price
            && self.max_price == other.max_price
            && self.guests == other.guests
            && self.bedrooms == other.bedrooms
            && self.bathrooms == other.bathrooms
    }

    /// True when the two states agree on everything except the page number.
    pub fn fields_equal(&self, other: &Self) -> bool {
        self.filters_equal(other)
            && self.start_date == other.start_date
            && self.end_date == other.end_date
    }

    /// Whether any narrowing filter is active (dates and page are
    /// navigation state, not filters).
    pub fn has_active_filters(&self) -> bool {
        !self.filters_equal(&Self::default())
    }
}
