//! Actix handlers and the small helpers they share.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

use crate::filters::FilterState;
use crate::filters::query;
use crate::models::auth::MaybeUser;
use crate::pagination::Paginated;

pub mod auth;
pub mod house;
pub mod main;

/// Maps flash levels onto the alert classes the templates use.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// 303 redirect; form posts land back on a GET.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, name: &str, context: &Context) -> HttpResponse {
    match tera.render(name, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render {name}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context keys every page expects: alerts, login state, active nav item.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &MaybeUser,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("logged_in", &user.is_logged_in());
    context.insert("current_page", current_page);
    context
}

/// One rendered pagination slot: a numbered link, or a gap.
#[derive(Serialize)]
pub struct PageLink {
    pub page: Option<usize>,
    pub url: String,
    pub current: bool,
}

/// Builds the pagination links for the current result window, carrying
/// every other query parameter through unchanged.
pub fn page_links<T>(
    paginated: &Paginated<T>,
    query_string: &str,
    filters: &FilterState,
) -> Vec<PageLink> {
    paginated
        .pages
        .iter()
        .map(|slot| match slot {
            Some(page) => PageLink {
                page: Some(*page),
                url: page_url(query_string, filters, *page),
                current: *page == paginated.page,
            },
            None => PageLink {
                page: None,
                url: String::new(),
                current: false,
            },
        })
        .collect()
}

/// URL of the listings page with only the page number changed.
pub fn page_url(query_string: &str, filters: &FilterState, page: usize) -> String {
    let mut target = filters.clone();
    target.page = page as u32;
    format!("/houses?{}", query::merge_query(query_string, &target))
}
