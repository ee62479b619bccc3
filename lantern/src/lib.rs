//! Lantern is a self-hostable personal safety backend. SOS alerts fan out
//! to the sender's trusted network (friends plus active-circle members),
//! and a tiered incident feed merges alerts, user-submitted reports, and
//! news-derived hazards for the map clients.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod models;
pub mod seed;
pub mod services;
