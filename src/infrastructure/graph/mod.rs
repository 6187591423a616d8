//! Graph REST API client: session establishment and the directory provider

mod auth;
mod directory;
mod types;

pub use auth::{Credentials, Session, TokenClient};
pub use directory::GraphDirectory;

const DEFAULT_LOGIN_BASE_URL: &str = "https://login.microsoftonline.com";
const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com";

/// Endpoint roots, overridable for sovereign clouds and test servers
#[derive(Debug, Clone)]
pub struct GraphEndpoints {
    pub login_base_url: String,
    pub graph_base_url: String,
}

impl Default for GraphEndpoints {
    fn default() -> Self {
        Self {
            login_base_url: DEFAULT_LOGIN_BASE_URL.to_string(),
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
        }
    }
}
