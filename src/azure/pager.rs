//! ARM collection pager
//!
//! ARM list operations return `{"value": [...], "nextLink": "..."}`; the
//! pager keeps following `nextLink` until the service stops returning one.

use super::client::ArmClient;
use crate::describer::PageSource;
use crate::error::DescribeError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

#[derive(Debug, Default, Deserialize)]
struct ArmPage {
    #[serde(default)]
    value: Vec<Value>,
    #[serde(rename = "nextLink", default)]
    next_link: Option<String>,
}

/// Pages through one ARM collection
pub struct ArmPager {
    client: ArmClient,
    next: Option<Url>,
    pages: usize,
}

impl ArmPager {
    pub fn new(client: ArmClient, url: Url) -> Self {
        Self {
            client,
            next: Some(url),
            pages: 0,
        }
    }
}

#[async_trait]
impl PageSource for ArmPager {
    type Item = Value;

    fn more(&self) -> bool {
        self.next.is_some()
    }

    async fn next_page(&mut self, cancel: &CancellationToken) -> Result<Vec<Value>, DescribeError> {
        let Some(url) = self.next.take() else {
            return Ok(Vec::new());
        };

        let body = self.client.get_cancellable(&url, cancel).await?;
        let page: ArmPage = if body.is_null() {
            ArmPage::default()
        } else {
            serde_json::from_value(body)?
        };

        self.pages += 1;
        self.next = match page.next_link.as_deref() {
            Some(link) if !link.is_empty() => Some(Url::parse(link)?),
            _ => None,
        };

        tracing::debug!(
            "page {} of {}: {} items, more: {}",
            self.pages,
            url.path(),
            page.value.len(),
            self.next.is_some()
        );

        Ok(page.value)
    }
}
