//! Bearer-credential lookup for the content API.
//!
//! The credential source is injected into [`HttpContentApi`] as a trait
//! object instead of being read from a global, so API-facing code can be
//! exercised with a fixed token.
//!
//! [`HttpContentApi`]: crate::api::HttpContentApi

use anyhow::Result;

use crate::settings::{API_TOKEN_ENV, Settings};

/// Source of the bearer token attached to every API request.
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> Result<String>;
}

/// Fixed token, for tests and scripted use.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Token resolved from settings, with the environment taking precedence.
pub struct SettingsToken {
    stored: Option<String>,
}

impl SettingsToken {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            stored: settings.api_token.clone(),
        }
    }
}

impl TokenProvider for SettingsToken {
    fn bearer_token(&self) -> Result<String> {
        if let Ok(token) = std::env::var(API_TOKEN_ENV)
            && !token.is_empty()
        {
            return Ok(token);
        }
        match &self.stored {
            Some(token) if !token.is_empty() => Ok(token.clone()),
            _ => anyhow::bail!(
                "No API token configured.\n\
                 Set one with: folio config --api-token YOUR_TOKEN\n\
                 Or set the {API_TOKEN_ENV} environment variable."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_token_is_returned_verbatim() {
        let provider = StaticToken::new("tok-123");
        assert_eq!(provider.bearer_token().unwrap(), "tok-123");
    }

    #[test]
    fn missing_stored_token_is_an_error() {
        let provider = SettingsToken { stored: None };
        // Only meaningful when the env var is not set in the test environment
        if std::env::var(API_TOKEN_ENV).is_err() {
            assert!(provider.bearer_token().is_err());
        }
    }

    #[test]
    fn stored_token_is_used_when_env_is_absent() {
        let provider = SettingsToken {
            stored: Some("stored-tok".to_string()),
        };
        if std::env::var(API_TOKEN_ENV).is_err() {
            assert_eq!(provider.bearer_token().unwrap(), "stored-tok");
        }
    }
}
