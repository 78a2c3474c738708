//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! The adapter only translates between Diesel rows and domain types; no
//! business logic lives here. Row structs and the table definition are
//! internal. Connections come from a `bb8` pool via `diesel-async`, and all
//! database errors are mapped to the domain's repository error type.

mod diesel_contact_repository;
mod models;
mod pool;
mod schema;

pub use diesel_contact_repository::DieselContactRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
