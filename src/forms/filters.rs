use serde::Deserialize;

use crate::filters::FilterState;
use crate::filters::query;

/// The listings filter form. Posted as urlencoded with repeated
/// `property_type` keys, so it is parsed with `serde_html_form` rather
/// than the default urlencoded extractor. Numeric fields stay raw
/// strings here; the query codec applies the tolerant parsing rules.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FilterForm {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub property_type: Vec<String>,
    #[serde(default)]
    pub min_price: String,
    #[serde(default)]
    pub max_price: String,
    #[serde(default)]
    pub guests: String,
    #[serde(default)]
    pub bedrooms: String,
    #[serde(default)]
    pub bathrooms: String,
}

impl FilterForm {
    fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("search".to_string(), self.search.clone()),
            ("country".to_string(), self.country.clone()),
            ("city".to_string(), self.city.clone()),
            ("min_price".to_string(), self.min_price.clone()),
            ("max_price".to_string(), self.max_price.clone()),
            ("guests".to_string(), self.guests.clone()),
            ("bedrooms".to_string(), self.bedrooms.clone()),
            ("bathrooms".to_string(), self.bathrooms.clone()),
        ];
        for property_type in &self.property_type {
            pairs.push(("property_type".to_string(), property_type.clone()));
        }
        pairs
    }

    /// Filter state carried by this form, merged with the date range and
    /// page of the current URL state. Editing filters resets the page.
    pub fn into_state(self, current: &FilterState) -> FilterState {
        let mut state = query::parse_pairs(&self.to_pairs());
        state.start_date = current.start_date;
        state.end_date = current.end_date;
        state.page = if state.filters_equal(current) {
            current.page
        } else {
            1
        };
        state
    }
}
