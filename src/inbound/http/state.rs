//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only on
//! the domain service and stay testable without a database.

use std::sync::Arc;

use crate::domain::ContactService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub contacts: Arc<ContactService>,
}

impl HttpState {
    /// Construct state around the contact service.
    pub fn new(contacts: Arc<ContactService>) -> Self {
        Self { contacts }
    }
}
