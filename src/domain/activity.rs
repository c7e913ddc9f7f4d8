use serde::{Deserialize, Serialize};

use crate::domain::types::{ActivityId, HostId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ActivityImage {
    pub id: i64,
    #[serde(default)]
    pub activity_id: Option<i64>,
    pub image_url: String,
}

/// An optional add-on experience offered by a host. Immutable once fetched;
/// cart entries keep the snapshot taken at add time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: ActivityId,
    #[serde(alias = "user_id")]
    pub host_id: HostId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Wall-clock strings from the backend, not timezone-aware.
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    /// Decimal string, e.g. `"20.00"`; `"0.00"` marks a free activity.
    pub payment_amount: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub images: Vec<ActivityImage>,
}

fn default_true() -> bool {
    true
}

impl Activity {
    /// Price as a number; malformed or negative amounts read as zero.
    pub fn price(&self) -> f64 {
        self.payment_amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| *amount > 0.0)
            .unwrap_or(0.0)
    }

    pub fn is_free(&self) -> bool {
        self.price() == 0.0
    }
}

/// One page of activities in the backend's pagination envelope.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ActivitiesPage {
    pub data: Vec<Activity>,
    pub current_page: usize,
    pub last_page: usize,
    pub total: usize,
}
