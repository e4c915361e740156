//! LLM provider implementations

mod http_client;
mod mistral;

pub use http_client::{HttpClient, HttpClientTrait};
pub use mistral::{DEFAULT_MISTRAL_BASE_URL, MistralProvider};
