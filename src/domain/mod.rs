//! Transport-agnostic domain types and logic.

mod contact;
mod contact_service;
mod error;
pub mod ports;
mod user;

pub use contact::{
    birthday_within_window, Contact, ContactDraft, ContactField, ContactId, UnknownContactField,
    NEAR_BIRTHDAY_WINDOW_DAYS,
};
pub use contact_service::ContactService;
pub use error::{Error, ErrorCode};
pub use user::UserId;
