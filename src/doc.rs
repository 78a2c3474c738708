//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the contact REST API. It registers every contact endpoint, the
//! request/response schemas, and the session cookie security scheme used by
//! Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::contacts::{ContactRequestBody, ContactResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by the external auth provider.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Contacts backend API",
        description = "Per-user contact book with upcoming-birthday and field lookups."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::near_birthday_contacts,
        crate::inbound::http::contacts::get_contact,
        crate::inbound::http::contacts::contacts_by_field,
        crate::inbound::http::contacts::create_contact,
        crate::inbound::http::contacts::update_contact,
        crate::inbound::http::contacts::delete_contact,
    ),
    components(schemas(ContactRequestBody, ContactResponse, Error, ErrorCode)),
    tags(
        (name = "contacts", description = "Operations on the caller's contact book")
    )
)]
pub struct ApiDoc;
