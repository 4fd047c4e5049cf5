//! Server configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers.
pub struct ServerConfig {
    /// Cookie domain, without the leading dot.
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Glob handed to Tera, e.g. `templates/**/*`.
    pub templates_dir: String,
    /// Shared secret for session keys and token signatures.
    pub secret: String,
    pub auth_service_url: String,
}
