//! Diesel row structs for the contacts table.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::contacts;

/// Queryable row for contacts.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: i32,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

/// Insertable row for a new contact; the id comes back from the database.
#[derive(Debug, Insertable)]
#[diesel(table_name = contacts)]
pub(crate) struct NewContactRow<'a> {
    pub user_id: Uuid,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub birth_date: NaiveDate,
}

/// Full-replace changeset covering every editable column.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = contacts)]
pub(crate) struct ContactChangeset<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub birth_date: NaiveDate,
}
