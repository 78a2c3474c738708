//! Contact operations over the repository port.
//!
//! Implements the per-user contact CRUD surface plus two derived reads: the
//! generic field lookup with its closed allow-list, and the near-birthday
//! window. "Today" comes from the injected clock so the window is
//! deterministic under test.

use std::str::FromStr;
use std::sync::Arc;

use mockable::Clock;
use serde_json::json;

use crate::domain::contact::{
    birthday_within_window, Contact, ContactDraft, ContactField, ContactId,
};
use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{Error, UserId};

/// Domain service exposing the contact-book operations.
#[derive(Clone)]
pub struct ContactService {
    repository: Arc<dyn ContactRepository>,
    clock: Arc<dyn Clock>,
}

fn map_repository_error(error: ContactRepositoryError) -> Error {
    match error {
        ContactRepositoryError::Connection { .. } => {
            Error::service_unavailable("contact store unavailable")
        }
        ContactRepositoryError::Query { .. } => Error::internal("contact store query failed"),
    }
}

fn unknown_field_error(name: &str) -> Error {
    Error::invalid_field("unknown contact field").with_details(json!({
        "field": name,
        "code": "unknown_contact_field",
    }))
}

impl ContactService {
    /// Create a new service over the given repository and clock.
    pub fn new(repository: Arc<dyn ContactRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// List every contact owned by the user.
    pub async fn list(&self, user_id: &UserId) -> Result<Vec<Contact>, Error> {
        self.repository
            .list_for_user(user_id)
            .await
            .map_err(map_repository_error)
    }

    /// Fetch one owned contact; `None` when absent or owned by someone else.
    pub async fn get(
        &self,
        user_id: &UserId,
        contact_id: ContactId,
    ) -> Result<Option<Contact>, Error> {
        self.repository
            .find_by_id(user_id, contact_id)
            .await
            .map_err(map_repository_error)
    }

    /// List owned contacts whose named attribute equals `value`.
    ///
    /// Fails with an invalid-field error when `field_name` is not on the
    /// allow-list; a valid field with no matches yields an empty list.
    pub async fn get_by_field(
        &self,
        user_id: &UserId,
        field_name: &str,
        value: &str,
    ) -> Result<Vec<Contact>, Error> {
        let field =
            ContactField::from_str(field_name).map_err(|_| unknown_field_error(field_name))?;
        self.repository
            .find_by_field(user_id, field, value)
            .await
            .map_err(map_repository_error)
    }

    /// List owned contacts whose birthday falls within the next week.
    ///
    /// Fetches all of the user's contacts and keeps those whose birthday,
    /// projected into the current year, is one to six days ahead of today's
    /// local calendar date.
    pub async fn near_birthdays(&self, user_id: &UserId) -> Result<Vec<Contact>, Error> {
        let contacts = self.list(user_id).await?;
        let today = self.clock.local().date_naive();
        Ok(contacts
            .into_iter()
            .filter(|contact| birthday_within_window(contact.birth_date, today))
            .collect())
    }

    /// Create a contact owned by the user, ignoring any caller-supplied
    /// owner, and return it with its assigned id.
    pub async fn create(&self, user_id: &UserId, draft: ContactDraft) -> Result<Contact, Error> {
        self.repository
            .insert(user_id, &draft)
            .await
            .map_err(map_repository_error)
    }

    /// Overwrite all editable fields of an owned contact. `None` when
    /// absent; nothing is written in that case.
    pub async fn update(
        &self,
        user_id: &UserId,
        contact_id: ContactId,
        draft: ContactDraft,
    ) -> Result<Option<Contact>, Error> {
        self.repository
            .replace(user_id, contact_id, &draft)
            .await
            .map_err(map_repository_error)
    }

    /// Delete an owned contact, returning its last-known values. `None`
    /// when absent; nothing is deleted in that case.
    pub async fn remove(
        &self,
        user_id: &UserId,
        contact_id: ContactId,
    ) -> Result<Option<Contact>, Error> {
        self.repository
            .delete(user_id, contact_id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "contact_service_tests.rs"]
mod tests;
