//! ARM Client
//!
//! Main client for Azure Resource Manager, combining the token seam and the
//! HTTP client, plus URL helpers for subscription- and resource-scoped calls.

use super::auth::TokenCredential;
use super::http::ArmHttpClient;
use super::pager::ArmPager;
use crate::error::DescribeError;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Public-cloud ARM endpoint
pub const DEFAULT_MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";

/// Main ARM client. Cheap to clone; read-only after construction.
#[derive(Clone)]
pub struct ArmClient {
    credential: Arc<dyn TokenCredential>,
    http: ArmHttpClient,
    endpoint: String,
    subscription_id: String,
}

impl ArmClient {
    /// Create a client for one subscription against the public cloud
    pub fn new(
        subscription_id: &str,
        credential: Arc<dyn TokenCredential>,
    ) -> Result<Self, DescribeError> {
        Ok(Self {
            credential,
            http: ArmHttpClient::new()?,
            endpoint: DEFAULT_MANAGEMENT_ENDPOINT.to_string(),
            subscription_id: subscription_id.to_string(),
        })
    }

    /// Point the client at another ARM endpoint (sovereign clouds, tests)
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, DescribeError> {
        // Validate early so a bad config fails before the first request
        Url::parse(endpoint)?;
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Make a GET request to ARM
    pub async fn get(&self, url: &Url) -> Result<Value, DescribeError> {
        let token = self.credential.token().await?;
        self.http.get(url.as_str(), &token).await
    }

    /// Make a GET request that aborts as soon as `cancel` fires
    pub async fn get_cancellable(
        &self,
        url: &Url,
        cancel: &CancellationToken,
    ) -> Result<Value, DescribeError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DescribeError::Cancelled),
            result = self.get(url) => result,
        }
    }

    /// Start paging through an ARM collection
    pub fn pager(&self, url: Url) -> ArmPager {
        ArmPager::new(self.clone(), url)
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    /// Build `{endpoint}{path}?api-version=...&extra...`
    pub fn url(
        &self,
        path: &str,
        api_version: &str,
        query: &[(&str, &str)],
    ) -> Result<Url, DescribeError> {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        let mut url = Url::parse(&format!("{}{}", self.endpoint, path))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api-version", api_version);
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Build a subscription-scoped URL: `/subscriptions/{id}/{path}`
    pub fn subscription_url(&self, path: &str, api_version: &str) -> Result<Url, DescribeError> {
        self.url(
            &format!(
                "/subscriptions/{}/{}",
                self.subscription_id,
                path.trim_start_matches('/')
            ),
            api_version,
            &[],
        )
    }

    /// Build a URL under an existing resource: `{id}` or `{id}/{segment}`
    pub fn resource_url(
        &self,
        id: &str,
        segment: Option<&str>,
        api_version: &str,
    ) -> Result<Url, DescribeError> {
        let path = match segment {
            Some(segment) => format!("{}/{}", id.trim_end_matches('/'), segment),
            None => id.to_string(),
        };
        self.url(&path, api_version, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::auth::StaticTokenCredential;

    fn client() -> ArmClient {
        ArmClient::new(
            "00000000-0000-0000-0000-000000000000",
            Arc::new(StaticTokenCredential::new("token")),
        )
        .unwrap()
    }

    #[test]
    fn test_subscription_url() {
        let url = client()
            .subscription_url("providers/Microsoft.Network/loadBalancers", "2023-09-01")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://management.azure.com/subscriptions/00000000-0000-0000-0000-000000000000/providers/Microsoft.Network/loadBalancers?api-version=2023-09-01"
        );
    }

    #[test]
    fn test_resource_url_with_segment() {
        let url = client()
            .resource_url(
                "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/loadBalancers/lb",
                Some("probes"),
                "2023-09-01",
            )
            .unwrap();
        assert_eq!(
            url.path(),
            "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/loadBalancers/lb/probes"
        );
        assert_eq!(url.query(), Some("api-version=2023-09-01"));
    }

    #[test]
    fn test_with_endpoint_trims_trailing_slash() {
        let client = client().with_endpoint("http://127.0.0.1:8080/").unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:8080");
        assert!(client.with_endpoint("not a url").is_err());
    }

    #[tokio::test]
    async fn test_get_cancellable_honours_cancelled_token() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let url = client().subscription_url("resourcegroups", "2021-04-01").unwrap();
        let result = client().get_cancellable(&url, &cancel).await;
        assert!(matches!(result, Err(DescribeError::Cancelled)));
    }
}
