//! v1 API Data Transfer Objects.
//!
//! These types define the wire format for the v1 REST API. They are completely
//! separate from the internal domain models in `src/models/` and handle
//! serialization, deserialization, and domain-model conversion.

pub mod circles;
pub mod common;
pub mod feed;
pub mod friends;
pub mod incidents;
pub mod notifications;
pub mod sos;

// Re-export all public types for convenient access via `dto::*`.
pub use circles::*;
pub use common::*;
pub use feed::*;
pub use friends::*;
pub use incidents::*;
pub use notifications::*;
pub use sos::*;
