//! Listing detail page loading and favorite toggling.

use serde::Serialize;

use crate::backend::{ActivityReader, FavoriteWriter, HouseReader};
use crate::cart::CartRegistry;
use crate::domain::activity::Activity;
use crate::domain::house::{House, HouseImage};
use crate::domain::types::HouseId;
use crate::filters::FilterState;
use crate::pricing::{self, PriceQuote};
use crate::services::{ServiceError, ServiceResult};

/// Carousel image with its URL already resolved against the backend.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedImage {
    pub id: i64,
    pub url: String,
}

/// Data required to render the detail template.
pub struct HousePageData {
    pub house: House,
    pub images: Vec<ResolvedImage>,
    pub activities: Vec<Activity>,
    pub cart: Vec<Activity>,
    pub quote: PriceQuote,
}

/// Bare storage paths become `<public>/storage/<path>`; absolute URLs
/// pass through untouched.
pub fn resolve_image_url(backend_public_url: &str, image: &HouseImage) -> String {
    let raw = image
        .image_url
        .as_deref()
        .or(image.path.as_deref())
        .unwrap_or_default();

    if raw.is_empty() {
        return format!(
            "{}/storage/placeholder-house.jpg",
            backend_public_url.trim_end_matches('/')
        );
    }
    if raw.starts_with("http") {
        return raw.to_string();
    }
    format!(
        "{}/storage/{}",
        backend_public_url.trim_end_matches('/'),
        raw.trim_start_matches('/')
    )
}

/// Loads everything the detail page needs: the house, its carousel
/// images in display order, the host's activities, the visitor's cart
/// for this listing, and the price quote derived from the selected
/// dates plus the cart. A missing listing is `NotFound`; a failed
/// activities fetch degrades to an empty section.
pub async fn load_house_page<B>(
    backend: &B,
    backend_public_url: &str,
    carts: &CartRegistry,
    id: HouseId,
    filters: &FilterState,
    token: Option<&str>,
) -> ServiceResult<HousePageData>
where
    B: HouseReader + ActivityReader + ?Sized,
{
    let house = backend
        .get_house(id, token)
        .await
        .map_err(ServiceError::from_api)?
        .ok_or(ServiceError::NotFound)?;

    let images = house
        .sorted_images()
        .iter()
        .map(|image| ResolvedImage {
            id: image.id,
            url: resolve_image_url(backend_public_url, image),
        })
        .collect();

    let activities = match &house.owner {
        Some(owner) => match backend.list_host_activities(owner.id, token).await {
            Ok(page) => page.data.into_iter().filter(|a| a.is_active).collect(),
            Err(err) => {
                log::error!("Failed to load activities for house {id}: {err}");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let cart = carts.cart(Some(id)).list();
    let quote = pricing::quote(
        house.nightly_rate(),
        filters.start_date,
        filters.end_date,
        &cart,
    );

    Ok(HousePageData {
        house,
        images,
        activities,
        cart,
        quote,
    })
}

/// Flips the favorite flag through the backend. Returns the confirmed
/// new state; the caller keeps its previous state on error.
pub async fn toggle_favorite<B>(
    backend: &B,
    id: HouseId,
    currently_favorite: bool,
    token: &str,
) -> ServiceResult<bool>
where
    B: FavoriteWriter + ?Sized,
{
    let target = !currently_favorite;
    backend
        .set_favorite(id, target, token)
        .await
        .map_err(ServiceError::from_api)?;
    Ok(target)
}
