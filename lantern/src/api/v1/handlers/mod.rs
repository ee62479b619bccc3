pub mod circles;
pub mod feed;
pub mod friends;
pub(crate) mod health;
pub mod incidents;
pub mod notifications;
pub mod sos;

pub use health::health_check;
