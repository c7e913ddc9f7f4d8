use serde::{Deserialize, Serialize};

use crate::domain::types::{HostId, HouseId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HouseImage {
    pub id: i64,
    #[serde(default)]
    pub house_id: Option<i64>,
    /// Storage-relative path as stored by the backend.
    #[serde(default)]
    pub path: Option<String>,
    /// Absolute URL when the backend already resolved one.
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub order: i32,
}

/// Owner record nested inside a house payload.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HouseOwner {
    pub id: HostId,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct House {
    pub id: HouseId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub country: String,
    pub city: String,
    #[serde(default)]
    pub address: String,
    /// Decimal string, e.g. `"10.00"`, exactly as the backend sends it.
    pub price_per_night: String,
    #[serde(default)]
    pub property_type: Option<String>,
    pub guests: u32,
    pub bedrooms: u32,
    #[serde(default)]
    pub beds: u32,
    pub bathrooms: u32,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default, alias = "created_by")]
    pub owner: Option<HouseOwner>,
    #[serde(default)]
    pub images: Vec<HouseImage>,
}

impl House {
    /// Nightly rate as a number; a malformed decimal string reads as zero.
    pub fn nightly_rate(&self) -> f64 {
        self.price_per_night.trim().parse().unwrap_or(0.0)
    }

    /// Images ordered by their `order` column.
    pub fn sorted_images(&self) -> Vec<HouseImage> {
        let mut images = self.images.clone();
        images.sort_by_key(|image| image.order);
        images
    }
}

/// One page of house summaries in the backend's pagination envelope.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HousesPage {
    pub data: Vec<House>,
    pub current_page: usize,
    pub last_page: usize,
    pub per_page: usize,
    pub total: usize,
}

impl HousesPage {
    /// Empty first page, used when the backend call fails.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            current_page: 1,
            last_page: 1,
            per_page: 10,
            total: 0,
        }
    }
}
