//! Backend entry-point: wires the contact routes, session middleware, and
//! OpenAPI docs.

use std::env;
use std::sync::Arc;

use actix_web::cookie::Key;
use actix_web::{web, App, HttpServer};
use mockable::DefaultClock;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use contacts_backend::doc::ApiDoc;
use contacts_backend::domain::ContactService;
use contacts_backend::inbound::http::auth::session_middleware;
use contacts_backend::inbound::http::contacts;
use contacts_backend::inbound::http::state::HttpState;
use contacts_backend::outbound::persistence::{DbPool, DieselContactRepository, PoolConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let database_url = env::var("DATABASE_URL")
        .map_err(|_| std::io::Error::other("DATABASE_URL must be set"))?;
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("failed to build database pool: {e}")))?;
    let repository = Arc::new(DieselContactRepository::new(pool));
    let service = Arc::new(ContactService::new(repository, Arc::new(DefaultClock)));
    let state = web::Data::new(HttpState::new(service));

    HttpServer::new(move || {
        // The birthdays route precedes the id route so the literal path
        // segment wins over the `{contact_id}` match.
        let api = web::scope("/api/v1")
            .wrap(session_middleware(key.clone(), cookie_secure))
            .app_data(state.clone())
            .service(contacts::near_birthday_contacts)
            .service(contacts::list_contacts)
            .service(contacts::get_contact)
            .service(contacts::contacts_by_field)
            .service(contacts::create_contact)
            .service(contacts::update_contact)
            .service(contacts::delete_contact);

        let app = App::new().service(api);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}
