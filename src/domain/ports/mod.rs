//! Domain ports implemented by outbound adapters.

mod contact_repository;

pub use contact_repository::{
    ContactRepository, ContactRepositoryError, FixtureContactRepository,
};

#[cfg(test)]
pub use contact_repository::MockContactRepository;
