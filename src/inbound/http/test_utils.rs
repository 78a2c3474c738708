//! Shared fixtures for HTTP handler tests.

use std::sync::{Arc, Mutex};

use actix_session::Session;
use actix_web::cookie::{Cookie, Key};
use actix_web::{test, web, App, HttpResponse};
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, ContactDraft, ContactField, ContactId, ContactService, UserId};
use crate::inbound::http::auth::{session_middleware, USER_ID_KEY};
use crate::inbound::http::contacts;
use crate::inbound::http::state::HttpState;

/// Functional in-memory implementation of the contact repository port.
///
/// Mirrors the ownership scoping and field comparison semantics of the
/// Diesel adapter so handler tests exercise realistic behaviour.
#[derive(Default)]
pub(crate) struct InMemoryContactRepository {
    inner: Mutex<Store>,
}

#[derive(Default)]
struct Store {
    contacts: Vec<Contact>,
    next_id: i32,
}

impl Store {
    fn assign_id(&mut self) -> ContactId {
        self.next_id += 1;
        ContactId::new(self.next_id)
    }
}

fn matches_field(contact: &Contact, field: ContactField, value: &str) -> bool {
    match field {
        ContactField::Id => value
            .parse::<i32>()
            .is_ok_and(|id| contact.id.get() == id),
        ContactField::FirstName => contact.first_name == value,
        ContactField::LastName => contact.last_name == value,
        ContactField::Email => contact.email == value,
        ContactField::Phone => contact.phone == value,
        ContactField::BirthDate => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .is_ok_and(|date| contact.birth_date == date),
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let store = self.inner.lock().expect("store lock");
        Ok(store
            .contacts
            .iter()
            .filter(|contact| contact.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        contact_id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let store = self.inner.lock().expect("store lock");
        Ok(store
            .contacts
            .iter()
            .find(|contact| contact.user_id == *user_id && contact.id == contact_id)
            .cloned())
    }

    async fn find_by_field(
        &self,
        user_id: &UserId,
        field: ContactField,
        value: &str,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let store = self.inner.lock().expect("store lock");
        Ok(store
            .contacts
            .iter()
            .filter(|contact| contact.user_id == *user_id && matches_field(contact, field, value))
            .cloned()
            .collect())
    }

    async fn insert(
        &self,
        user_id: &UserId,
        draft: &ContactDraft,
    ) -> Result<Contact, ContactRepositoryError> {
        let mut store = self.inner.lock().expect("store lock");
        let contact = Contact {
            id: store.assign_id(),
            user_id: *user_id,
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            birth_date: draft.birth_date,
        };
        store.contacts.push(contact.clone());
        Ok(contact)
    }

    async fn replace(
        &self,
        user_id: &UserId,
        contact_id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut store = self.inner.lock().expect("store lock");
        let found = store
            .contacts
            .iter_mut()
            .find(|contact| contact.user_id == *user_id && contact.id == contact_id);
        Ok(found.map(|contact| {
            contact.first_name = draft.first_name.clone();
            contact.last_name = draft.last_name.clone();
            contact.email = draft.email.clone();
            contact.phone = draft.phone.clone();
            contact.birth_date = draft.birth_date;
            contact.clone()
        }))
    }

    async fn delete(
        &self,
        user_id: &UserId,
        contact_id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut store = self.inner.lock().expect("store lock");
        let position = store
            .contacts
            .iter()
            .position(|contact| contact.user_id == *user_id && contact.id == contact_id);
        Ok(position.map(|index| store.contacts.remove(index)))
    }
}

/// Clock pinned to a fixed local timestamp.
pub(crate) struct FixtureClock {
    now: DateTime<Local>,
}

impl FixtureClock {
    /// Midday on the given local date.
    pub(crate) fn at(year: i32, month: u32, day: u32) -> Self {
        let now = Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp");
        Self { now }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }
}

/// HTTP state over an in-memory store and the given clock.
pub(crate) fn test_state(clock: impl Clock + 'static) -> web::Data<HttpState> {
    let repository = Arc::new(InMemoryContactRepository::default());
    let service = Arc::new(ContactService::new(repository, Arc::new(clock)));
    web::Data::new(HttpState::new(service))
}

async fn test_login(session: Session, path: web::Path<String>) -> HttpResponse {
    session
        .insert(USER_ID_KEY, path.into_inner())
        .expect("store test identity");
    HttpResponse::Ok().finish()
}

/// Full application under test: session middleware, a login shortcut, and
/// every contact route in production registration order.
pub(crate) fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().service(
        web::scope("/api/v1")
            .wrap(session_middleware(Key::generate(), false))
            .app_data(state)
            .route("/login/{user_id}", web::post().to(test_login))
            .service(contacts::near_birthday_contacts)
            .service(contacts::list_contacts)
            .service(contacts::get_contact)
            .service(contacts::contacts_by_field)
            .service(contacts::create_contact)
            .service(contacts::update_contact)
            .service(contacts::delete_contact),
    )
}

/// Log in as the given user and return the session cookie.
pub(crate) async fn login_cookie<S, B>(app: &S, user_id: UserId) -> Cookie<'static>
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/login/{user_id}"))
            .to_request(),
    )
    .await;
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
