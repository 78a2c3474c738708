//! PostgreSQL-backed `ContactRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, ContactDraft, ContactField, ContactId, UserId};

use super::models::{ContactChangeset, ContactRow, NewContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::contacts;

/// Diesel-backed implementation of the `ContactRepository` port.
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type OwnedBy = diesel::dsl::Eq<contacts::user_id, uuid::Uuid>;

/// Ownership predicate applied by every query in this adapter, so the
/// per-user scoping cannot be forgotten when an operation is added.
fn owned_by(user_id: &UserId) -> OwnedBy {
    contacts::user_id.eq(*user_id.as_uuid())
}

/// Map pool errors to contact repository errors.
fn map_pool_error(error: PoolError) -> ContactRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ContactRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to contact repository errors without leaking driver
/// detail to callers.
fn map_diesel_error(error: diesel::result::Error) -> ContactRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => ContactRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ContactRepositoryError::connection("database connection error")
        }
        _ => ContactRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain contact.
fn row_to_contact(row: ContactRow) -> Contact {
    Contact {
        id: ContactId::new(row.id),
        user_id: UserId::new(row.user_id),
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        phone: row.phone,
        birth_date: row.birth_date,
    }
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ContactRow> = contacts::table
            .filter(owned_by(user_id))
            .select(ContactRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_contact).collect())
    }

    async fn find_by_id(
        &self,
        user_id: &UserId,
        contact_id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContactRow> = contacts::table
            .filter(owned_by(user_id))
            .filter(contacts::id.eq(contact_id.get()))
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_contact))
    }

    async fn find_by_field(
        &self,
        user_id: &UserId,
        field: ContactField,
        value: &str,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let scoped = contacts::table
            .filter(owned_by(user_id))
            .select(ContactRow::as_select())
            .into_boxed::<diesel::pg::Pg>();

        // Typed columns compare against the parsed value; a value that does
        // not parse can never match, so the lookup short-circuits to empty.
        let query = match field {
            ContactField::Id => match value.parse::<i32>() {
                Ok(id) => scoped.filter(contacts::id.eq(id)),
                Err(_) => return Ok(Vec::new()),
            },
            ContactField::BirthDate => match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                Ok(birth_date) => scoped.filter(contacts::birth_date.eq(birth_date)),
                Err(_) => return Ok(Vec::new()),
            },
            ContactField::FirstName => scoped.filter(contacts::first_name.eq(value.to_owned())),
            ContactField::LastName => scoped.filter(contacts::last_name.eq(value.to_owned())),
            ContactField::Email => scoped.filter(contacts::email.eq(value.to_owned())),
            ContactField::Phone => scoped.filter(contacts::phone.eq(value.to_owned())),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ContactRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_contact).collect())
    }

    async fn insert(
        &self,
        user_id: &UserId,
        draft: &ContactDraft,
    ) -> Result<Contact, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewContactRow {
            user_id: *user_id.as_uuid(),
            first_name: &draft.first_name,
            last_name: &draft.last_name,
            email: &draft.email,
            phone: &draft.phone,
            birth_date: draft.birth_date,
        };

        let row: ContactRow = diesel::insert_into(contacts::table)
            .values(&new_row)
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row_to_contact(row))
    }

    async fn replace(
        &self,
        user_id: &UserId,
        contact_id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = ContactChangeset {
            first_name: &draft.first_name,
            last_name: &draft.last_name,
            email: &draft.email,
            phone: &draft.phone,
            birth_date: draft.birth_date,
        };

        let row: Option<ContactRow> = diesel::update(
            contacts::table
                .filter(owned_by(user_id))
                .filter(contacts::id.eq(contact_id.get())),
        )
        .set(&changeset)
        .returning(ContactRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        Ok(row.map(row_to_contact))
    }

    async fn delete(
        &self,
        user_id: &UserId,
        contact_id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ContactRow> = diesel::delete(
            contacts::table
                .filter(owned_by(user_id))
                .filter(contacts::id.eq(contact_id.get())),
        )
        .returning(ContactRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        Ok(row.map(row_to_contact))
    }
}
