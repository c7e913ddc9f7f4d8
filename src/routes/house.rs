use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::backend::BackendApi;
use crate::cart::CartRegistry;
use crate::domain::activity::Activity;
use crate::domain::types::{ActivityId, HouseId};
use crate::filters::query;
use crate::models::auth::{CurrentUser, MaybeUser};
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::house as house_service;

fn parse_house_id(raw: i64) -> Option<HouseId> {
    HouseId::new(raw).ok()
}

#[get("/houses/{id}")]
pub async fn show_house(
    req: HttpRequest,
    id: web::Path<i64>,
    user: MaybeUser,
    backend: web::Data<dyn BackendApi>,
    carts: web::Data<CartRegistry>,
    tera: web::Data<Tera>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, &user, "houses");
    let Some(house_id) = parse_house_id(id.into_inner()) else {
        return HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(render_not_found(&tera, &context));
    };

    let query_string = req.query_string();
    let filters = query::parse_query(query_string);

    match house_service::load_house_page(
        backend.get_ref(),
        &server_config.backend_public_url,
        &carts,
        house_id,
        &filters,
        user.token(),
    )
    .await
    {
        Ok(data) => {
            context.insert("house", &data.house);
            context.insert("images", &data.images);
            context.insert("activities", &data.activities);
            context.insert("cart", &data.cart);
            context.insert("price_amount", &format!("{:.2}", data.quote.amount()));
            context.insert("price_label", &data.quote.label());
            context.insert("filters", &filters);
            context.insert("query_string", query_string);
            render_template(&tera, "houses/show.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(render_not_found(&tera, &context)),
        Err(err) => {
            log::error!("Failed to load house {house_id}: {err}");
            FlashMessage::error("Failed to load the listing.").send();
            redirect("/houses")
        }
    }
}

fn render_not_found(tera: &Tera, context: &tera::Context) -> String {
    tera.render("houses/not_found.html", context)
        .unwrap_or_else(|err| {
            log::error!("Failed to render not-found page: {err}");
            "Not found".to_string()
        })
}

#[derive(Deserialize)]
pub struct FavoriteForm {
    /// Current displayed state; the handler requests the opposite.
    pub is_favorite: bool,
}

#[post("/houses/{id}/favorite")]
pub async fn toggle_favorite(
    req: HttpRequest,
    id: web::Path<i64>,
    user: CurrentUser,
    backend: web::Data<dyn BackendApi>,
    web::Form(form): web::Form<FavoriteForm>,
) -> impl Responder {
    let Some(house_id) = parse_house_id(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };

    match house_service::toggle_favorite(
        backend.get_ref(),
        house_id,
        form.is_favorite,
        &user.token,
    )
    .await
    {
        Ok(_) => {}
        Err(err) => {
            log::error!("Failed to toggle favorite for house {house_id}: {err}");
            FlashMessage::error("Could not update your favorites.").send();
        }
    }

    let query_string = req.query_string();
    if query_string.is_empty() {
        redirect(&format!("/houses/{house_id}"))
    } else {
        redirect(&format!("/houses/{house_id}?{query_string}"))
    }
}

/// JSON bodies of the cart endpoints consumed by the detail page.
#[derive(Deserialize)]
pub struct CartRemovePayload {
    pub activity_id: i64,
}

fn cart_snapshot(carts: &CartRegistry, house_id: HouseId) -> Vec<Activity> {
    carts.cart(Some(house_id)).list()
}

#[get("/houses/{id}/cart")]
pub async fn cart_list(id: web::Path<i64>, carts: web::Data<CartRegistry>) -> impl Responder {
    match parse_house_id(id.into_inner()) {
        Some(house_id) => HttpResponse::Ok().json(cart_snapshot(&carts, house_id)),
        None => HttpResponse::NotFound().finish(),
    }
}

#[post("/houses/{id}/cart/add")]
pub async fn cart_add(
    id: web::Path<i64>,
    carts: web::Data<CartRegistry>,
    activity: web::Json<Activity>,
) -> impl Responder {
    let Some(house_id) = parse_house_id(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    let cart = carts.cart(Some(house_id));
    cart.add(activity.into_inner());
    HttpResponse::Ok().json(cart.list())
}

#[post("/houses/{id}/cart/remove")]
pub async fn cart_remove(
    id: web::Path<i64>,
    carts: web::Data<CartRegistry>,
    payload: web::Json<CartRemovePayload>,
) -> impl Responder {
    let Some(house_id) = parse_house_id(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    let Ok(activity_id) = ActivityId::new(payload.activity_id) else {
        return HttpResponse::BadRequest().finish();
    };
    let cart = carts.cart(Some(house_id));
    cart.remove(activity_id);
    HttpResponse::Ok().json(cart.list())
}

#[post("/houses/{id}/cart/clear")]
pub async fn cart_clear(id: web::Path<i64>, carts: web::Data<CartRegistry>) -> impl Responder {
    let Some(house_id) = parse_house_id(id.into_inner()) else {
        return HttpResponse::NotFound().finish();
    };
    let cart = carts.cart(Some(house_id));
    cart.clear();
    HttpResponse::Ok().json(cart.list())
}
