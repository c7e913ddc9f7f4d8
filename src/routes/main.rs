use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use chrono::Local;
use tera::Tera;

use crate::backend::BackendApi;
use crate::filters::dates;
use crate::filters::query;
use crate::forms::filters::FilterForm;
use crate::models::auth::MaybeUser;
use crate::routes::{base_context, page_links, page_url, redirect, render_template};
use crate::services::listings;

/// Choices offered by the property-type checkboxes.
const PROPERTY_TYPE_OPTIONS: &[&str] = &["apartment", "house", "cabin", "villa"];

#[get("/")]
pub async fn index(user: MaybeUser) -> impl Responder {
    if user.is_logged_in() {
        redirect("/houses")
    } else {
        redirect("/login")
    }
}

#[get("/houses")]
pub async fn houses_index(
    req: HttpRequest,
    user: MaybeUser,
    backend: web::Data<dyn BackendApi>,
    tera: web::Data<Tera>,
    flash_messages: IncomingFlashMessages,
) -> impl Responder {
    let query_string = req.query_string();

    // Fill the default check-in window into the URL before rendering, so
    // the server-rendered results and the date widgets agree. A redirect
    // replaces rather than stacks history.
    let today = Local::now().date_naive();
    if let Some(with_dates) = dates::ensure_date_window(query_string, today) {
        return redirect(&format!("/houses?{with_dates}"));
    }

    let filters = query::parse_query(query_string);
    let mut context = base_context(&flash_messages, &user, "houses");
    context.insert("filters", &filters);
    context.insert("has_filters", &filters.has_active_filters());
    context.insert("query_string", query_string);
    context.insert("property_type_options", PROPERTY_TYPE_OPTIONS);
    // Hidden inputs of the date form, so a date change drops neither the
    // foreign parameters nor the current page.
    context.insert("foreign_params", &query::foreign_pairs(query_string));

    match listings::load_listings_page(backend.get_ref(), &filters, user.token()).await {
        Ok(data) => {
            context.insert("pages", &page_links(&data.houses, query_string, &filters));
            if data.houses.has_prev {
                context.insert(
                    "prev_url",
                    &page_url(query_string, &filters, data.houses.page - 1),
                );
            }
            if data.houses.has_next {
                context.insert(
                    "next_url",
                    &page_url(query_string, &filters, data.houses.page + 1),
                );
            }
            context.insert("total", &data.total);
            context.insert("houses", &data.houses);
        }
        Err(err) => {
            log::error!("Failed to list houses: {err}");
            context.insert("load_error", &"Failed to load houses");
        }
    }

    render_template(&tera, "houses/index.html", &context)
}

/// Applies the filter sidebar. The form posts to the current URL's query
/// string, so the date range and any foreign parameters survive the
/// rewrite; changing a filter resets the page to 1.
#[post("/houses/filters")]
pub async fn apply_filters(req: HttpRequest, body: web::Bytes) -> impl Responder {
    let form: FilterForm = match serde_html_form::from_bytes(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse filter form: {err}");
            return HttpResponse::BadRequest().finish();
        }
    };

    let current = query::parse_query(req.query_string());
    let state = form.into_state(&current);
    let target = query::merge_query(req.query_string(), &state);

    redirect(&format!("/houses?{target}"))
}
