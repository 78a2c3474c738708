//! Diesel table definition for the PostgreSQL schema.
//!
//! Must match the deployed schema exactly; Diesel uses it for type-safe SQL
//! generation. Schema migration tooling is deliberately out of scope.

diesel::table! {
    /// Contact records, one row per address-book entry.
    contacts (id) {
        /// Primary key, assigned by the database on insert.
        id -> Int4,
        /// Owning user; every query is filtered on this column.
        user_id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
        phone -> Varchar,
        birth_date -> Date,
    }
}
