//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Base URL of the booking backend API, e.g. `http://localhost:8080/api`.
    pub backend_url: String,
    /// Public base URL used to resolve storage-relative image paths.
    pub backend_public_url: String,
    pub templates_dir: String,
    pub assets_dir: String,
    /// Directory holding the persisted cart records.
    pub state_dir: String,
    pub secret: String,
}
