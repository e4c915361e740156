use std::env;

use crate::domain::DomainError;

/// Environment variable holding the Mistral API key
pub const DEFAULT_API_KEY_VAR: &str = "MISTRAL_API_KEY";

/// Credential provider that reads an API key from an environment variable
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    api_key_var: String,
}

impl EnvCredentialProvider {
    pub fn new(api_key_var: impl Into<String>) -> Self {
        Self {
            api_key_var: api_key_var.into(),
        }
    }

    pub fn api_key_var(&self) -> &str {
        &self.api_key_var
    }

    /// Read the API key. An unset or blank variable is an error.
    pub fn api_key(&self) -> Result<String, DomainError> {
        let value = env::var(&self.api_key_var).map_err(|_| {
            DomainError::credential(format!(
                "Environment variable '{}' not set",
                self.api_key_var
            ))
        })?;

        if value.trim().is_empty() {
            return Err(DomainError::credential(format!(
                "Environment variable '{}' is empty",
                self.api_key_var
            )));
        }

        Ok(value)
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new(DEFAULT_API_KEY_VAR)
    }
}
