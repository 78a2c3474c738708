//! Port for contact persistence.
//!
//! Every operation takes the owning [`UserId`] explicitly: adapters must
//! scope reads and writes to that user, so one user can never observe or
//! mutate another user's contacts. Absence of a matching owned record is
//! `None`, never an error.

use async_trait::async_trait;

use crate::domain::contact::{Contact, ContactDraft, ContactField, ContactId};
use crate::domain::UserId;

/// Errors raised by contact repository adapters.
///
/// Store failures propagate uninterpreted; the repository performs no
/// retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactRepositoryError {
    /// Repository connection could not be established.
    #[error("contact repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("contact repository query failed: {message}")]
    Query { message: String },
}

impl ContactRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for contact storage, scoped to the owning user on every call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// List every contact owned by the user, in store-native order.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Find one contact by id. `None` when the id does not exist or belongs
    /// to another user.
    async fn find_by_id(
        &self,
        user_id: &UserId,
        contact_id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError>;

    /// List the user's contacts whose `field` equals `value`.
    ///
    /// The value is compared after parsing it into the column's type; a
    /// value that cannot be parsed matches nothing.
    async fn find_by_field(
        &self,
        user_id: &UserId,
        field: ContactField,
        value: &str,
    ) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Persist a new contact owned by the user and return it with its
    /// assigned id.
    async fn insert(
        &self,
        user_id: &UserId,
        draft: &ContactDraft,
    ) -> Result<Contact, ContactRepositoryError>;

    /// Overwrite all editable fields of an owned contact. `None` when no
    /// owned record matches; nothing is written in that case.
    async fn replace(
        &self,
        user_id: &UserId,
        contact_id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Delete an owned contact, returning its last-known values. `None`
    /// when no owned record matches; nothing is deleted in that case.
    async fn delete(
        &self,
        user_id: &UserId,
        contact_id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Lookups return `None` or an empty list; writes are discarded. Inserts
/// echo the draft back with a placeholder id.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureContactRepository;

#[async_trait]
impl ContactRepository for FixtureContactRepository {
    async fn list_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _user_id: &UserId,
        _contact_id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        Ok(None)
    }

    async fn find_by_field(
        &self,
        _user_id: &UserId,
        _field: ContactField,
        _value: &str,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(
        &self,
        user_id: &UserId,
        draft: &ContactDraft,
    ) -> Result<Contact, ContactRepositoryError> {
        Ok(Contact {
            id: ContactId::new(1),
            user_id: *user_id,
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            birth_date: draft.birth_date,
        })
    }

    async fn replace(
        &self,
        _user_id: &UserId,
        _contact_id: ContactId,
        _draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        Ok(None)
    }

    async fn delete(
        &self,
        _user_id: &UserId,
        _contact_id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        Ok(None)
    }
}
