//! Credential lookup

mod env_provider;

pub use env_provider::{DEFAULT_API_KEY_VAR, EnvCredentialProvider};
