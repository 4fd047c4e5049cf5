//! Database models shared across the marketplace repository.

pub mod address;
pub mod application;
#[cfg(feature = "server")]
pub mod auth;
pub mod config;
pub mod job;
pub mod profile;
pub mod user;
