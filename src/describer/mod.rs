//! Resource describers
//!
//! Every supported kind is a static [`Descriptor`]; the functions here look the
//! descriptor up and run it against ARM with one of the sinks.
//!
//! # Module Structure
//!
//! - [`engine`] - pagination loop shared by every kind
//! - [`sink`] - buffering, callback and channel delivery
//! - [`descriptor`] - level walk, joins and projection
//! - one module per provider namespace with the kind descriptors

pub mod descriptor;
pub mod engine;
pub mod sink;

pub mod appconfiguration;
pub mod compute;
pub mod eventgrid;
pub mod hdinsight;
pub mod healthcareapis;
pub mod lb;
pub mod mariadb;
pub mod netapp;
pub mod network;
pub mod security;

pub use descriptor::{Addressing, Descriptor};
pub use engine::{drain, enumerate, PageSource};
pub use sink::{BufferSink, CallbackSink, ChannelSink, Sink};

use crate::azure::client::ArmClient;
use crate::error::DescribeError;
use crate::resource::{Resource, ResourceKind};
use futures::stream::{self, StreamExt, TryStreamExt};
use tokio_util::sync::CancellationToken;

/// Everything an enumeration needs: the ARM client and its cancellation
#[derive(Clone)]
pub struct DescribeContext {
    pub client: ArmClient,
    pub cancel: CancellationToken,
}

impl DescribeContext {
    pub fn new(client: ArmClient) -> Self {
        Self {
            client,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancel(client: ArmClient, cancel: CancellationToken) -> Self {
        Self { client, cancel }
    }

    pub fn subscription_id(&self) -> &str {
        self.client.subscription_id()
    }
}

/// Descriptor for a kind
pub fn descriptor(kind: ResourceKind) -> &'static Descriptor {
    match kind {
        ResourceKind::AppConfiguration => &appconfiguration::APP_CONFIGURATION,
        ResourceKind::EventGridDomain => &eventgrid::EVENT_GRID_DOMAIN,
        ResourceKind::EventGridTopic => &eventgrid::EVENT_GRID_TOPIC,
        ResourceKind::EventGridDomainTopic => &eventgrid::EVENT_GRID_DOMAIN_TOPIC,
        ResourceKind::HdInsightCluster => &hdinsight::HDINSIGHT_CLUSTER,
        ResourceKind::HealthcareService => &healthcareapis::HEALTHCARE_SERVICE,
        ResourceKind::LoadBalancer => &lb::LOAD_BALANCER,
        ResourceKind::LoadBalancerBackendAddressPool => &lb::LOAD_BALANCER_BACKEND_ADDRESS_POOL,
        ResourceKind::LoadBalancerNatRule => &lb::LOAD_BALANCER_NAT_RULE,
        ResourceKind::LoadBalancerOutboundRule => &lb::LOAD_BALANCER_OUTBOUND_RULE,
        ResourceKind::LoadBalancerProbe => &lb::LOAD_BALANCER_PROBE,
        ResourceKind::LoadBalancerRule => &lb::LOAD_BALANCER_RULE,
        ResourceKind::NetAppAccount => &netapp::NETAPP_ACCOUNT,
        ResourceKind::NetAppCapacityPool => &netapp::NETAPP_CAPACITY_POOL,
        ResourceKind::NetworkInterface => &network::NETWORK_INTERFACE,
        ResourceKind::VpnGateway => &network::VPN_GATEWAY,
        ResourceKind::FirewallPolicy => &network::FIREWALL_POLICY,
        ResourceKind::SecurityCenterSetting => &security::SECURITY_CENTER_SETTING,
        ResourceKind::MariadbDatabase => &mariadb::MARIADB_DATABASE,
        ResourceKind::ComputeDiskReadOps => &compute::COMPUTE_DISK_READ_OPS,
    }
}

/// Describe every resource of `kind` (buffering mode).
///
/// Nothing is returned unless the whole enumeration succeeds.
pub async fn describe(
    ctx: &DescribeContext,
    kind: ResourceKind,
) -> Result<Vec<Resource>, DescribeError> {
    let mut sink = BufferSink::new();
    descriptor(kind).describe(ctx, &mut sink).await?;
    Ok(sink.into_inner())
}

/// Describe every resource of `kind` into a caller-provided sink (streaming
/// mode). Returns the number of delivered resources.
pub async fn describe_into(
    ctx: &DescribeContext,
    kind: ResourceKind,
    sink: &mut dyn Sink,
) -> Result<usize, DescribeError> {
    descriptor(kind).describe(ctx, sink).await
}

/// Describe several kinds, at most `concurrency` at a time.
///
/// Results come back in the order the kinds were requested; the first
/// failure wins.
pub async fn describe_many(
    ctx: &DescribeContext,
    kinds: &[ResourceKind],
    concurrency: usize,
) -> Result<Vec<(ResourceKind, Vec<Resource>)>, DescribeError> {
    stream::iter(kinds.iter().copied())
        .map(|kind| async move { describe(ctx, kind).await.map(|resources| (kind, resources)) })
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}

/// Fetch a single resource by ID; `None` when ARM reports it does not exist
pub async fn get(
    ctx: &DescribeContext,
    kind: ResourceKind,
    id: &str,
) -> Result<Option<Resource>, DescribeError> {
    descriptor(kind).get(ctx, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::auth::StaticTokenCredential;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    const SUB: &str = "00000000-0000-0000-0000-000000000000";

    fn context() -> DescribeContext {
        let credential = Arc::new(StaticTokenCredential::new("token"));
        DescribeContext::new(ArmClient::new(SUB, credential).unwrap())
    }

    fn keys(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_every_kind_has_its_descriptor() {
        for kind in ResourceKind::ALL {
            assert_eq!(descriptor(*kind).kind, *kind);
        }
    }

    #[test]
    fn test_resolve_id_for_group_scoped_kind() {
        let id = descriptor(ResourceKind::NetworkInterface)
            .resolve_id(SUB, &keys(&[("name", "nic 1"), ("resource_group", "rg")]))
            .unwrap();
        assert_eq!(
            id,
            format!(
                "/subscriptions/{}/resourceGroups/rg/providers/Microsoft.Network/networkInterfaces/nic%201",
                SUB
            )
        );
    }

    #[test]
    fn test_resolve_id_for_subscription_scoped_kind() {
        let id = descriptor(ResourceKind::SecurityCenterSetting)
            .resolve_id(SUB, &keys(&[("name", "MCAS")]))
            .unwrap();
        assert_eq!(
            id,
            format!("/subscriptions/{}/providers/Microsoft.Security/settings/MCAS", SUB)
        );
    }

    #[test]
    fn test_resolve_id_prefers_explicit_id() {
        let id = descriptor(ResourceKind::LoadBalancerProbe)
            .resolve_id(SUB, &keys(&[("id", "/x/y")]))
            .unwrap();
        assert_eq!(id, "/x/y");
    }

    #[test]
    fn test_child_kinds_need_an_id() {
        let result = descriptor(ResourceKind::LoadBalancerProbe)
            .resolve_id(SUB, &keys(&[("name", "p"), ("resource_group", "rg")]));
        assert!(matches!(result, Err(DescribeError::Unsupported(_))));
    }

    #[tokio::test]
    async fn test_cancelled_context_delivers_nothing() {
        let ctx = context();
        ctx.cancel.cancel();
        let result = describe(&ctx, ResourceKind::LoadBalancer).await;
        assert!(matches!(result, Err(DescribeError::Cancelled)));
    }

    #[tokio::test]
    async fn test_describe_many_with_cancelled_context_fails() {
        let ctx = context();
        ctx.cancel.cancel();
        let result = describe_many(
            &ctx,
            &[ResourceKind::VpnGateway, ResourceKind::FirewallPolicy],
            2,
        )
        .await;
        assert!(result.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn test_get_metrics_is_unsupported() {
        let ctx = context();
        let result = get(&ctx, ResourceKind::ComputeDiskReadOps, "/subscriptions/s/x").await;
        assert!(matches!(result, Err(DescribeError::Unsupported(_))));
    }
}
