//! Service-request intake: schemas, validation and the form controller.
//!
//! This crate owns everything both ends of a quote request agree on. Front
//! ends (the `cli` crate, a browser build) drive [`IntakeForm`]; the relay
//! server deserializes the same [`ServiceRequest`] and answers with a
//! [`RelayReply`].

pub mod filter;
pub mod form;
pub mod schema;
pub mod validate;
pub mod wire;

pub use form::{IntakeForm, Notice};
pub use schema::{CompositeRule, FieldDescriptor, FieldKind, ServiceCategory, UnknownCategory};
pub use validate::IntakeError;
pub use wire::{RelayError, RelayReply, RelayTransport, ServiceRequest};
