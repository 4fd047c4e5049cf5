//! Domain aggregates exposed by the marketplace service layer.

pub mod address;
pub mod application;
pub mod job;
pub mod profile;
pub mod types;
pub mod user;
pub mod verification;
