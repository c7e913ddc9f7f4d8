use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::backend::BackendApi;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::models::auth::{MaybeUser, TOKEN_SESSION_KEY};
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth as auth_service;

#[get("/login")]
pub async fn login_page(
    user: MaybeUser,
    tera: web::Data<Tera>,
    flash_messages: IncomingFlashMessages,
) -> impl Responder {
    if user.is_logged_in() {
        return redirect("/houses");
    }
    let context = base_context(&flash_messages, &user, "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    user: MaybeUser,
    session: Session,
    backend: web::Data<dyn BackendApi>,
    tera: web::Data<Tera>,
    flash_messages: IncomingFlashMessages,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let email = form.email.clone();

    match auth_service::login(backend.get_ref(), form).await {
        Ok(token) => {
            if let Err(err) = session.insert(TOKEN_SESSION_KEY, token) {
                log::error!("Failed to store session token: {err}");
                FlashMessage::error("Login failed. Please try again.").send();
                return redirect("/login");
            }
            redirect("/houses")
        }
        Err(err) => {
            let mut context = base_context(&flash_messages, &user, "login");
            context.insert("email", &email);
            match err {
                ServiceError::Validation { message, errors } => {
                    context.insert("error", &message);
                    context.insert("field_errors", &errors);
                }
                ServiceError::Form(message) => {
                    context.insert("error", &message);
                }
                other => {
                    log::error!("Login failed: {other}");
                    context.insert("error", &"Something went wrong. Please try again later.");
                }
            }
            render_template(&tera, "auth/login.html", &context)
        }
    }
}

#[get("/register")]
pub async fn register_page(
    user: MaybeUser,
    tera: web::Data<Tera>,
    flash_messages: IncomingFlashMessages,
) -> impl Responder {
    if user.is_logged_in() {
        return redirect("/houses");
    }
    let context = base_context(&flash_messages, &user, "register");
    render_template(&tera, "auth/register.html", &context)
}

#[post("/register")]
pub async fn register(
    user: MaybeUser,
    backend: web::Data<dyn BackendApi>,
    tera: web::Data<Tera>,
    flash_messages: IncomingFlashMessages,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    let filled = form.clone();

    match auth_service::register(backend.get_ref(), form).await {
        Ok(()) => {
            FlashMessage::success("Account created. You can log in now.").send();
            redirect("/login")
        }
        Err(err) => {
            let mut context = base_context(&flash_messages, &user, "register");
            context.insert("name", &filled.name);
            context.insert("email", &filled.email);
            context.insert("role", &filled.role);
            match err {
                ServiceError::Validation { message, errors } => {
                    context.insert("error", &message);
                    context.insert("field_errors", &errors);
                }
                ServiceError::Form(message) => {
                    context.insert("error", &message);
                }
                other => {
                    log::error!("Registration failed: {other}");
                    context.insert("error", &"Something went wrong. Please try again later.");
                }
            }
            render_template(&tera, "auth/register.html", &context)
        }
    }
}

#[post("/logout")]
pub async fn logout(session: Session) -> impl Responder {
    session.purge();
    redirect("/login")
}
