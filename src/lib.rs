use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::backend::{BackendApi, RestBackend};
use crate::cart::{CartRegistry, FileCartStorage};
use crate::models::config::ServerConfig;
use crate::routes::auth::{login, login_page, logout, register, register_page};
use crate::routes::house::{
    cart_add, cart_clear, cart_list, cart_remove, show_house, toggle_favorite,
};
use crate::routes::main::{apply_filters, houses_index, index};

pub mod backend;
pub mod cart;
pub mod domain;
pub mod favorites;
pub mod filters;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod pricing;
pub mod routes;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let backend = RestBackend::new(&server_config.backend_url)
        .map_err(|e| std::io::Error::other(format!("Failed to build backend client: {e}")))?;
    let backend: web::Data<dyn BackendApi> = web::Data::from(Arc::new(backend) as Arc<dyn BackendApi>);

    let carts = web::Data::new(CartRegistry::new(Arc::new(FileCartStorage::new(
        &server_config.state_dir,
    ))));

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    // Keys and stores for the token session and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let bind_address = (server_config.address.clone(), server_config.port);
    let assets_dir = server_config.assets_dir.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", assets_dir.clone()))
            .service(index)
            .service(houses_index)
            .service(apply_filters)
            .service(show_house)
            .service(toggle_favorite)
            .service(cart_list)
            .service(cart_add)
            .service(cart_remove)
            .service(cart_clear)
            .service(login_page)
            .service(login)
            .service(register_page)
            .service(register)
            .service(logout)
            .app_data(web::Data::new(tera.clone()))
            .app_data(backend.clone())
            .app_data(carts.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
