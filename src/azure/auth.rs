//! Azure credentials seam
//!
//! Token acquisition lives outside this crate: callers hand the client an
//! implementation of [`TokenCredential`]. The binary uses a static bearer
//! token taken from `AZURE_ACCESS_TOKEN` (e.g. `az account get-access-token`).
//!
//! This module also resolves the default subscription from the Azure CLI
//! profile, the way `az` itself does.

use crate::error::DescribeError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable holding a pre-acquired ARM bearer token
pub const ACCESS_TOKEN_ENV: &str = "AZURE_ACCESS_TOKEN";

/// Source of bearer tokens for ARM requests
#[async_trait]
pub trait TokenCredential: Send + Sync {
    async fn token(&self) -> Result<String, DescribeError>;
}

/// A fixed bearer token
#[derive(Clone)]
pub struct StaticTokenCredential {
    token: String,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Read the token from `AZURE_ACCESS_TOKEN`
    pub fn from_env() -> Result<Self, DescribeError> {
        match std::env::var(ACCESS_TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => Ok(Self::new(token.trim())),
            _ => Err(DescribeError::Credential(format!(
                "{} is not set. Run 'export {}=$(az account get-access-token --query accessToken -o tsv)'",
                ACCESS_TOKEN_ENV, ACCESS_TOKEN_ENV
            ))),
        }
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn token(&self) -> Result<String, DescribeError> {
        Ok(self.token.clone())
    }
}

/// Get the Azure CLI configuration directory
pub fn get_azure_config_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("AZURE_CONFIG_DIR") {
        return Some(PathBuf::from(path));
    }

    dirs::home_dir().map(|p| p.join(".azure"))
}

/// Subscription IDs are GUIDs
pub fn validate_subscription_id(subscription: &str) -> bool {
    uuid::Uuid::parse_str(subscription).is_ok()
}

#[derive(Debug, Deserialize)]
struct AzureProfile {
    #[serde(default)]
    subscriptions: Vec<ProfileSubscription>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileSubscription {
    id: String,
    #[serde(default)]
    is_default: bool,
}

/// Pick the default subscription out of an `azureProfile.json` document
fn default_subscription_from_profile(content: &str) -> Option<String> {
    // The CLI writes the profile with a UTF-8 BOM
    let content = content.trim_start_matches('\u{feff}');
    let profile: AzureProfile = serde_json::from_str(content).ok()?;

    profile
        .subscriptions
        .into_iter()
        .find(|s| s.is_default)
        .map(|s| s.id)
        .filter(|id| validate_subscription_id(id))
}

/// Read the default subscription from the environment or the Azure CLI profile
pub fn get_default_subscription() -> Option<String> {
    if let Ok(subscription) = std::env::var("AZURE_SUBSCRIPTION_ID") {
        if validate_subscription_id(&subscription) {
            return Some(subscription);
        }
        tracing::warn!("Invalid subscription ID format in AZURE_SUBSCRIPTION_ID");
    }

    let profile_path = get_azure_config_dir()?.join("azureProfile.json");
    let content = std::fs::read_to_string(profile_path).ok()?;
    default_subscription_from_profile(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_subscription_id() {
        assert!(validate_subscription_id("00000000-0000-0000-0000-000000000000"));
        assert!(!validate_subscription_id("my-subscription"));
        assert!(!validate_subscription_id(""));
    }

    #[test]
    fn test_default_subscription_from_profile() {
        let profile = "\u{feff}{\"subscriptions\": [\
            {\"id\": \"11111111-1111-1111-1111-111111111111\", \"isDefault\": false},\
            {\"id\": \"22222222-2222-2222-2222-222222222222\", \"isDefault\": true}\
        ]}";
        assert_eq!(
            default_subscription_from_profile(profile).as_deref(),
            Some("22222222-2222-2222-2222-222222222222")
        );
    }

    #[test]
    fn test_profile_without_default_subscription() {
        let profile = r#"{"subscriptions": [{"id": "11111111-1111-1111-1111-111111111111"}]}"#;
        assert_eq!(default_subscription_from_profile(profile), None);
    }

    #[tokio::test]
    async fn test_static_token() {
        let credential = StaticTokenCredential::new("abc");
        assert_eq!(credential.token().await.unwrap(), "abc");
    }
}
