//! Enumeration engine
//!
//! The pagination/join/dispatch loop every describer runs. Sources expose a
//! "has more / fetch next page" protocol; the engine pulls pages in order,
//! projects each item into zero or more resources and writes them to a sink.
//! Any error ends the enumeration and is returned as is.

use super::sink::Sink;
use crate::error::DescribeError;
use crate::resource::Resource;
use async_trait::async_trait;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// A paginated provider list
#[async_trait]
pub trait PageSource: Send {
    type Item: Send;

    /// Whether another page can be fetched
    fn more(&self) -> bool;

    /// Fetch the next page. Must observe `cancel` while waiting.
    async fn next_page(&mut self, cancel: &CancellationToken)
        -> Result<Vec<Self::Item>, DescribeError>;
}

/// Collect every item of a source, in page order
pub async fn drain<P: PageSource>(
    mut source: P,
    cancel: &CancellationToken,
) -> Result<Vec<P::Item>, DescribeError> {
    let mut items = Vec::new();
    while source.more() {
        if cancel.is_cancelled() {
            return Err(DescribeError::Cancelled);
        }
        items.extend(source.next_page(cancel).await?);
    }
    Ok(items)
}

/// Page through `source`, project every item and write the results to `sink`.
///
/// Returns the number of delivered resources.
pub async fn enumerate<P, F, Fut>(
    mut source: P,
    cancel: &CancellationToken,
    sink: &mut dyn Sink,
    mut project: F,
) -> Result<usize, DescribeError>
where
    P: PageSource,
    F: FnMut(P::Item) -> Fut,
    Fut: Future<Output = Result<Vec<Resource>, DescribeError>>,
{
    let mut delivered = 0;

    while source.more() {
        if cancel.is_cancelled() {
            return Err(DescribeError::Cancelled);
        }

        let page = source.next_page(cancel).await?;
        for item in page {
            for resource in project(item).await? {
                sink.write(resource).await?;
                delivered += 1;
            }
        }
    }

    Ok(delivered)
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedPages;
    use super::*;
    use crate::describer::sink::{BufferSink, CallbackSink};
    use crate::resource::{Description, NetAppAccountDescription, GLOBAL_LOCATION};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn account(id: &str, joined: Vec<Value>) -> Resource {
        Resource::new(
            id,
            None,
            GLOBAL_LOCATION,
            Description::NetAppAccount(NetAppAccountDescription {
                account: json!({ "joined": joined }),
                resource_group: "rg".to_string(),
            }),
        )
        .unwrap()
    }

    fn ids(resources: &[Resource]) -> Vec<&str> {
        resources.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_zero_pages_is_empty_and_sink_untouched() {
        let cancel = CancellationToken::new();
        let calls = AtomicUsize::new(0);
        let mut sink = CallbackSink::new(|_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let delivered = enumerate(
            ScriptedPages::<&str>::ok(vec![]),
            &cancel,
            &mut sink,
            |id| async move { Ok(vec![account(id, vec![])]) },
        )
        .await
        .unwrap();

        assert_eq!(delivered, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_two_pages_with_one_join_each() {
        let cancel = CancellationToken::new();
        let join_calls = Arc::new(AtomicUsize::new(0));
        let mut sink = BufferSink::new();

        let primary = ScriptedPages::ok(vec![vec!["a", "b", "c"], vec!["d"]]);
        let delivered = enumerate(primary, &cancel, &mut sink, |id| {
            let join_calls = join_calls.clone();
            let cancel = cancel.clone();
            async move {
                join_calls.fetch_add(1, Ordering::SeqCst);
                let related =
                    drain(ScriptedPages::ok(vec![vec![json!({ "of": id })]]), &cancel).await?;
                Ok::<_, DescribeError>(vec![account(id, related)])
            }
        })
        .await
        .unwrap();

        let resources = sink.into_inner();
        assert_eq!(delivered, 4);
        assert_eq!(join_calls.load(Ordering::SeqCst), 4);
        assert_eq!(ids(&resources), vec!["a", "b", "c", "d"]);
        for resource in &resources {
            let Description::NetAppAccount(desc) = &resource.description else {
                panic!("unexpected description");
            };
            assert_eq!(desc.account["joined"].as_array().unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_page_failure_stops_delivery() {
        let cancel = CancellationToken::new();
        let mut delivered = Vec::new();
        let mut sink = CallbackSink::new(|r: Resource| {
            delivered.push(r.id);
            Ok(())
        });

        let source = ScriptedPages::new(vec![Some(vec!["a", "b"]), None, Some(vec!["c"])]);
        let fetches = source.fetches.clone();
        let result = enumerate(source, &cancel, &mut sink, |id| async move {
            Ok(vec![account(id, vec![])])
        })
        .await;

        assert!(matches!(result, Err(DescribeError::Api { status: 500, .. })));
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
        drop(sink);
        assert_eq!(delivered, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_sink_rejection_stops_enumeration() {
        let cancel = CancellationToken::new();
        let mut seen = 0;
        let mut sink = CallbackSink::new(|_| {
            seen += 1;
            if seen == 2 {
                anyhow::bail!("consumer is full");
            }
            Ok(())
        });

        let result = enumerate(
            ScriptedPages::ok(vec![vec!["a", "b", "c"]]),
            &cancel,
            &mut sink,
            |id| async move { Ok(vec![account(id, vec![])]) },
        )
        .await;

        assert!(matches!(result, Err(DescribeError::Sink(_))));
        drop(sink);
        assert_eq!(seen, 2);
    }

    #[tokio::test]
    async fn test_fan_out_preserves_expansion_order() {
        let cancel = CancellationToken::new();
        let mut sink = BufferSink::new();

        enumerate(
            ScriptedPages::ok(vec![vec!["p1"], vec!["p2"]]),
            &cancel,
            &mut sink,
            |parent| async move {
                Ok(vec![
                    account(&format!("{}/c1", parent), vec![]),
                    account(&format!("{}/c2", parent), vec![]),
                ])
            },
        )
        .await
        .unwrap();

        assert_eq!(
            ids(&sink.into_inner()),
            vec!["p1/c1", "p1/c2", "p2/c1", "p2/c2"]
        );
    }

    #[tokio::test]
    async fn test_cancelled_before_first_page() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let source = ScriptedPages::ok(vec![vec!["a"]]);
        let fetches = source.fetches.clone();
        let mut sink = BufferSink::new();

        let result = enumerate(source, &cancel, &mut sink, |id| async move {
            Ok(vec![account(id, vec![])])
        })
        .await;

        assert!(matches!(result, Err(DescribeError::Cancelled)));
        assert_eq!(fetches.load(Ordering::SeqCst), 0);
        assert!(sink.into_inner().is_empty());
    }

    #[tokio::test]
    async fn test_drain_collects_all_pages() {
        let cancel = CancellationToken::new();
        let items = drain(ScriptedPages::ok(vec![vec![1, 2], vec![], vec![3]]), &cancel)
            .await
            .unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }
}
