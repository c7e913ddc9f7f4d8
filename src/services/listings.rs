//! Listings page loading.

use crate::backend::{HouseListQuery, HouseReader};
use crate::domain::house::House;
use crate::filters::FilterState;
use crate::pagination::Paginated;
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the listings template.
pub struct ListingsPageData {
    pub houses: Paginated<House>,
    pub total: usize,
}

/// Fetches the page of houses matching the current filter state. The
/// query string already went through the tolerant codec, so everything
/// here is well-formed.
pub async fn load_listings_page<B>(
    backend: &B,
    filters: &FilterState,
    token: Option<&str>,
) -> ServiceResult<ListingsPageData>
where
    B: HouseReader + ?Sized,
{
    let query = HouseListQuery::from_filters(filters);

    let page = backend
        .list_houses(&query, token)
        .await
        .map_err(ServiceError::from_api)?;

    Ok(ListingsPageData {
        total: page.total,
        houses: Paginated::new(page.data, page.current_page, page.last_page),
    })
}
