//! Contact-book backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use doc::ApiDoc;
