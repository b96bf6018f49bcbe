//! Delivery strategies
//!
//! Every describer writes resources through one [`Sink::write`] call; whether
//! that appends to a buffer, calls back into the caller or feeds a channel is
//! decided once, by the sink handed to the enumeration.

use crate::error::DescribeError;
use crate::resource::Resource;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Destination for produced resources
#[async_trait]
pub trait Sink: Send {
    /// Deliver one resource. An error stops the enumeration.
    async fn write(&mut self, resource: Resource) -> Result<(), DescribeError>;
}

/// Buffering mode: keeps resources in production order
#[derive(Debug, Default)]
pub struct BufferSink {
    resources: Vec<Resource>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn into_inner(self) -> Vec<Resource> {
        self.resources
    }
}

#[async_trait]
impl Sink for BufferSink {
    async fn write(&mut self, resource: Resource) -> Result<(), DescribeError> {
        self.resources.push(resource);
        Ok(())
    }
}

/// Streaming mode: invokes a caller closure synchronously, once per resource
pub struct CallbackSink<F> {
    callback: F,
}

impl<F> CallbackSink<F>
where
    F: FnMut(Resource) -> anyhow::Result<()> + Send,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

#[async_trait]
impl<F> Sink for CallbackSink<F>
where
    F: FnMut(Resource) -> anyhow::Result<()> + Send,
{
    async fn write(&mut self, resource: Resource) -> Result<(), DescribeError> {
        (self.callback)(resource).map_err(DescribeError::Sink)
    }
}

/// Streaming mode over a bounded channel; a dropped receiver rejects
pub struct ChannelSink {
    sender: mpsc::Sender<Resource>,
}

impl ChannelSink {
    pub fn new(sender: mpsc::Sender<Resource>) -> Self {
        Self { sender }
    }

    /// Create a sink and the receiving end of its channel
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Resource>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self::new(sender), receiver)
    }
}

#[async_trait]
impl Sink for ChannelSink {
    async fn write(&mut self, resource: Resource) -> Result<(), DescribeError> {
        self.sender
            .send(resource)
            .await
            .map_err(|_| DescribeError::Sink(anyhow::anyhow!("receiver closed")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Description, NetAppAccountDescription, GLOBAL_LOCATION};
    use serde_json::json;

    fn resource(id: &str) -> Resource {
        Resource::new(
            id,
            None,
            GLOBAL_LOCATION,
            Description::NetAppAccount(NetAppAccountDescription {
                account: json!({}),
                resource_group: "rg".to_string(),
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_buffer_keeps_order() {
        let mut sink = BufferSink::new();
        tokio_test::block_on(async {
            sink.write(resource("a")).await.unwrap();
            sink.write(resource("b")).await.unwrap();
        });
        assert_eq!(sink.len(), 2);
        let ids: Vec<_> = sink.into_inner().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_callback_error_is_sink_error() {
        let mut sink = CallbackSink::new(|_| Err(anyhow::anyhow!("nope")));
        let result = tokio_test::block_on(sink.write(resource("a")));
        assert!(matches!(result, Err(DescribeError::Sink(_))));
    }

    #[tokio::test]
    async fn test_channel_delivers_in_order() {
        let (mut sink, mut receiver) = ChannelSink::channel(4);
        sink.write(resource("a")).await.unwrap();
        sink.write(resource("b")).await.unwrap();
        assert_eq!(receiver.recv().await.unwrap().id, "a");
        assert_eq!(receiver.recv().await.unwrap().id, "b");
    }

    #[tokio::test]
    async fn test_channel_with_dropped_receiver_rejects() {
        let (mut sink, receiver) = ChannelSink::channel(1);
        drop(receiver);
        let result = sink.write(resource("a")).await;
        assert!(matches!(result, Err(DescribeError::Sink(_))));
    }
}
