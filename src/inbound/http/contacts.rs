//! Contact HTTP handlers.
//!
//! ```text
//! GET    /api/v1/contacts
//! GET    /api/v1/contacts/birthdays
//! GET    /api/v1/contacts/{contact_id}
//! GET    /api/v1/contacts/{field_name}/{field_value}
//! POST   /api/v1/contacts
//! PUT    /api/v1/contacts/{contact_id}
//! DELETE /api/v1/contacts/{contact_id}
//! ```
//!
//! Absence from the domain layer becomes `404 Not Found` here and nowhere
//! else. The `birthdays` route must be registered before the id route so
//! the literal segment wins.

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Contact, ContactDraft, ContactId, Error};
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request payload carrying the five editable contact fields.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequestBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Calendar date in `YYYY-MM-DD` form.
    pub birth_date: Option<String>,
}

/// Response payload for a single contact.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: i32,
    #[schema(format = "uuid")]
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Calendar date in `YYYY-MM-DD` form.
    pub birth_date: String,
}

impl From<Contact> for ContactResponse {
    fn from(value: Contact) -> Self {
        Self {
            id: value.id.get(),
            user_id: value.user_id.to_string(),
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            birth_date: value.birth_date.format("%Y-%m-%d").to_string(),
        }
    }
}

fn missing_field_error(field: &str) -> Error {
    Error::invalid_request("missing required field").with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

fn blank_field_error(field: &str) -> Error {
    Error::invalid_request("field must not be blank").with_details(json!({
        "field": field,
        "code": "blank_field",
    }))
}

fn require_text(value: Option<String>, field: &'static str) -> Result<String, Error> {
    let value = value.ok_or_else(|| missing_field_error(field))?;
    if value.trim().is_empty() {
        return Err(blank_field_error(field));
    }
    Ok(value)
}

fn parse_birth_date(value: Option<String>) -> Result<NaiveDate, Error> {
    let raw = value.ok_or_else(|| missing_field_error("birthDate"))?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
        Error::invalid_request("birth date must be a calendar date in YYYY-MM-DD form")
            .with_details(json!({
                "field": "birthDate",
                "value": raw,
                "code": "invalid_birth_date",
            }))
    })
}

fn parse_contact_draft(body: ContactRequestBody) -> Result<ContactDraft, Error> {
    Ok(ContactDraft {
        first_name: require_text(body.first_name, "firstName")?,
        last_name: require_text(body.last_name, "lastName")?,
        email: require_text(body.email, "email")?,
        phone: require_text(body.phone, "phone")?,
        birth_date: parse_birth_date(body.birth_date)?,
    })
}

fn parse_contact_id(raw: i32) -> Result<ContactId, Error> {
    if raw < 1 {
        return Err(
            Error::invalid_request("contact id must be a positive integer").with_details(json!({
                "field": "contactId",
                "value": raw,
            })),
        );
    }
    Ok(ContactId::new(raw))
}

fn contact_not_found() -> Error {
    Error::not_found("contact not found")
}

/// List every contact owned by the authenticated user.
#[utoipa::path(
    get,
    path = "/api/v1/contacts",
    responses(
        (status = 200, description = "Owned contacts", body = [ContactResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    user: CurrentUser,
) -> ApiResult<web::Json<Vec<ContactResponse>>> {
    let contacts = state.contacts.list(user.id()).await?;
    Ok(web::Json(
        contacts.into_iter().map(ContactResponse::from).collect(),
    ))
}

/// List owned contacts whose birthday falls within the next week.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/birthdays",
    responses(
        (status = 200, description = "Contacts with upcoming birthdays", body = [ContactResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "listNearBirthdayContacts"
)]
#[get("/contacts/birthdays")]
pub async fn near_birthday_contacts(
    state: web::Data<HttpState>,
    user: CurrentUser,
) -> ApiResult<web::Json<Vec<ContactResponse>>> {
    let contacts = state.contacts.near_birthdays(user.id()).await?;
    Ok(web::Json(
        contacts.into_iter().map(ContactResponse::from).collect(),
    ))
}

/// Fetch one owned contact by id.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/{contact_id}",
    params(("contact_id" = i32, Path, minimum = 1)),
    responses(
        (status = 200, description = "The contact", body = ContactResponse),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No owned contact with this id", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "getContact"
)]
#[get("/contacts/{contact_id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> ApiResult<web::Json<ContactResponse>> {
    let contact_id = parse_contact_id(path.into_inner())?;
    let contact = state
        .contacts
        .get(user.id(), contact_id)
        .await?
        .ok_or_else(contact_not_found)?;
    Ok(web::Json(ContactResponse::from(contact)))
}

/// List owned contacts whose named attribute equals the given value.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/{field_name}/{field_value}",
    params(
        ("field_name" = String, Path, description = "One of id, first_name, last_name, email, phone, birth_date"),
        ("field_value" = String, Path)
    ),
    responses(
        (status = 200, description = "Matching contacts", body = [ContactResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown field or no matches", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "getContactsByField"
)]
#[get("/contacts/{field_name}/{field_value}")]
pub async fn contacts_by_field(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<Vec<ContactResponse>>> {
    let (field_name, field_value) = path.into_inner();
    let contacts = state
        .contacts
        .get_by_field(user.id(), &field_name, &field_value)
        .await?;
    if contacts.is_empty() {
        return Err(Error::not_found("no contacts matched"));
    }
    Ok(web::Json(
        contacts.into_iter().map(ContactResponse::from).collect(),
    ))
}

/// Create a contact owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/contacts",
    request_body = ContactRequestBody,
    responses(
        (status = 201, description = "Created contact", body = ContactResponse),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contacts")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    user: CurrentUser,
    payload: web::Json<ContactRequestBody>,
) -> ApiResult<HttpResponse> {
    let draft = parse_contact_draft(payload.into_inner())?;
    let created = state.contacts.create(user.id(), draft).await?;
    Ok(HttpResponse::Created().json(ContactResponse::from(created)))
}

/// Replace all editable fields of an owned contact.
#[utoipa::path(
    put,
    path = "/api/v1/contacts/{contact_id}",
    params(("contact_id" = i32, Path, minimum = 1)),
    request_body = ContactRequestBody,
    responses(
        (status = 200, description = "Updated contact", body = ContactResponse),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No owned contact with this id", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[put("/contacts/{contact_id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<i32>,
    payload: web::Json<ContactRequestBody>,
) -> ApiResult<web::Json<ContactResponse>> {
    let contact_id = parse_contact_id(path.into_inner())?;
    let draft = parse_contact_draft(payload.into_inner())?;
    let updated = state
        .contacts
        .update(user.id(), contact_id, draft)
        .await?
        .ok_or_else(contact_not_found)?;
    Ok(web::Json(ContactResponse::from(updated)))
}

/// Delete an owned contact by id.
#[utoipa::path(
    delete,
    path = "/api/v1/contacts/{contact_id}",
    params(("contact_id" = i32, Path, minimum = 1)),
    responses(
        (status = 204, description = "Contact deleted"),
        (status = 400, description = "Invalid id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "No owned contact with this id", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{contact_id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let contact_id = parse_contact_id(path.into_inner())?;
    state
        .contacts
        .remove(user.id(), contact_id)
        .await?
        .ok_or_else(contact_not_found)?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "contacts_tests.rs"]
mod tests;
