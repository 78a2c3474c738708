//! Contact entity and the derived near-birthday window.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// Width of the near-birthday window in days. Birthdays strictly less than
/// this many days ahead (and strictly after today) qualify.
pub const NEAR_BIRTHDAY_WINDOW_DAYS: i64 = 7;

/// Stable contact identifier assigned by the persistence layer on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(i32);

impl ContactId {
    /// Wrap a raw database identifier.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub fn get(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single address-book entry owned by exactly one user.
///
/// ## Invariants
/// - `user_id` is fixed at creation; every read and write is scoped to it.
/// - `id` is unique and stable for the lifetime of the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

/// The five editable fields of a contact, as supplied by the caller.
///
/// Updates replace all five fields unconditionally; there are no partial
/// (merge) semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

/// Closed allow-list of attributes the generic field lookup may filter on.
///
/// Looking up any other name is an invalid-field error; internal attributes
/// such as `user_id` are deliberately not exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    BirthDate,
}

/// Error returned when a field name is not on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contact field: {name}")]
pub struct UnknownContactField {
    pub name: String,
}

impl ContactField {
    /// The attribute name exposed through the lookup API.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::BirthDate => "birth_date",
        }
    }
}

impl FromStr for ContactField {
    type Err = UnknownContactField;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "id" => Ok(Self::Id),
            "first_name" => Ok(Self::FirstName),
            "last_name" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "birth_date" => Ok(Self::BirthDate),
            other => Err(UnknownContactField {
                name: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether this contact's birthday falls in the upcoming window.
///
/// The birthday is projected into the current year; it qualifies when it is
/// strictly after `today` and strictly less than
/// [`NEAR_BIRTHDAY_WINDOW_DAYS`] days ahead. A birthday that already passed
/// this year, or is today, never qualifies. A 29 February birth date clamps
/// to 28 February in non-leap years.
pub fn birthday_within_window(birth_date: NaiveDate, today: NaiveDate) -> bool {
    let next_bday = NaiveDate::from_ymd_opt(today.year(), birth_date.month(), birth_date.day())
        .or_else(|| NaiveDate::from_ymd_opt(today.year(), birth_date.month(), 28));
    match next_bday {
        Some(next_bday) => {
            next_bday > today && (next_bday - today).num_days() < NEAR_BIRTHDAY_WINDOW_DAYS
        }
        None => false,
    }
}
