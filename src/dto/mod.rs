//! DTO modules that bridge services with templates and APIs.

pub mod jobs;
pub mod main;
pub mod profile;
pub mod users;
