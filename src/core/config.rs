//! Credentials and base-URL resolution

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::core::errors::{CrowdinError, Result};

/// Base URL used when neither an explicit URL nor an organization is set.
pub const DEFAULT_BASE_URL: &str = "https://api.crowdin.com/api/v2";

/// Credentials for the Crowdin API.
///
/// Immutable after construction. The effective base URL is resolved with a
/// strict precedence: an explicit `base_url` wins over `organization`, which
/// wins over [`DEFAULT_BASE_URL`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrowdinCredentials {
    /// Personal access token sent as `Authorization: Bearer {token}`.
    pub access_token: String,
    /// Organization name for the Enterprise API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Explicit base URL, used verbatim when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl CrowdinCredentials {
    /// Create credentials from an access token alone.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            organization: None,
            base_url: None,
        }
    }

    /// Set the organization name (Enterprise API).
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Set an explicit base URL, overriding organization resolution.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Load credentials from environment variables.
    ///
    /// Reads `CROWDIN_API_TOKEN` (required), `CROWDIN_ORGANIZATION` and
    /// `CROWDIN_BASE_URL` (both optional). A `.env` file is honored if
    /// present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(
            std::env::var("CROWDIN_API_TOKEN").ok(),
            std::env::var("CROWDIN_ORGANIZATION").ok(),
            std::env::var("CROWDIN_BASE_URL").ok(),
        )
    }

    /// Assemble credentials from already-looked-up variable values.
    fn from_vars(
        access_token: Option<String>,
        organization: Option<String>,
        base_url: Option<String>,
    ) -> Result<Self> {
        let access_token = access_token
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| CrowdinError::Config {
                message: "CROWDIN_API_TOKEN environment variable is required".to_string(),
            })?;

        Ok(Self {
            access_token,
            organization: organization.filter(|value| !value.trim().is_empty()),
            base_url: base_url.filter(|value| !value.trim().is_empty()),
        })
    }

    /// Validate the credentials.
    pub fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(CrowdinError::Config {
                message: "access token is required".to_string(),
            });
        }

        if let Some(base_url) = self.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            Url::parse(base_url).map_err(|e| CrowdinError::Config {
                message: format!("invalid base URL '{base_url}': {e}"),
            })?;
        }

        Ok(())
    }

    /// Resolve the effective base URL for every subsequent request.
    ///
    /// Precedence, first match wins: explicit `base_url` (used verbatim),
    /// then `https://{organization}.api.crowdin.com/api/v2`, then
    /// [`DEFAULT_BASE_URL`].
    pub fn resolve_base_url(&self) -> String {
        if let Some(base_url) = self.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            debug!("using explicit base URL: {}", base_url);
            return base_url.to_string();
        }

        if let Some(org) = self.organization.as_deref().filter(|o| !o.trim().is_empty()) {
            return format!("https://{org}.api.crowdin.com/api/v2");
        }

        DEFAULT_BASE_URL.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_base_url_wins_over_organization() {
        let credentials = CrowdinCredentials::new("token")
            .with_organization("acme")
            .with_base_url("https://proxy.internal/api/v2");

        assert_eq!(
            credentials.resolve_base_url(),
            "https://proxy.internal/api/v2"
        );
    }

    #[test]
    fn organization_derives_enterprise_url() {
        let credentials = CrowdinCredentials::new("token").with_organization("acme");
        assert_eq!(
            credentials.resolve_base_url(),
            "https://acme.api.crowdin.com/api/v2"
        );
    }

    #[test]
    fn default_url_when_nothing_else_is_set() {
        let credentials = CrowdinCredentials::new("token");
        assert_eq!(credentials.resolve_base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn blank_organization_falls_back_to_default() {
        let credentials = CrowdinCredentials::new("token").with_organization("  ");
        assert_eq!(credentials.resolve_base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn resolved_url_is_https() {
        for credentials in [
            CrowdinCredentials::new("token"),
            CrowdinCredentials::new("token").with_organization("acme"),
        ] {
            assert!(credentials.resolve_base_url().starts_with("https://"));
        }
    }

    #[test]
    fn validate_rejects_empty_token() {
        let credentials = CrowdinCredentials::new("");
        assert!(credentials.validate().is_err());
    }

    #[test]
    fn validate_rejects_malformed_base_url() {
        let credentials = CrowdinCredentials::new("token").with_base_url("not a url");
        assert!(credentials.validate().is_err());
    }

    #[test]
    fn from_vars_reads_token() {
        let credentials =
            CrowdinCredentials::from_vars(Some("env-token".to_string()), None, None).unwrap();
        assert_eq!(credentials.access_token, "env-token");
        assert!(credentials.organization.is_none());
    }

    #[test]
    fn from_vars_requires_token() {
        let result = CrowdinCredentials::from_vars(None, Some("acme".to_string()), None);
        assert!(matches!(result, Err(CrowdinError::Config { .. })));
    }

    #[test]
    fn from_vars_filters_blank_values() {
        let credentials = CrowdinCredentials::from_vars(
            Some("env-token".to_string()),
            Some("  ".to_string()),
            Some(String::new()),
        )
        .unwrap();

        assert!(credentials.organization.is_none());
        assert!(credentials.base_url.is_none());
    }

    #[test]
    fn validate_accepts_plain_token() {
        let credentials = CrowdinCredentials::new("token");
        assert!(credentials.validate().is_ok());
    }
}
