//! Normalized resource records
//!
//! Every describer produces [`Resource`] values: a four-field envelope
//! (`id`, `name`, `location`, `description`) shared by all kinds, with a
//! kind-specific [`Description`] payload.
//!
//! - [`id`] - resource identifier decomposition
//! - [`model`] - per-kind description payloads

pub mod id;
pub mod model;

pub use model::*;

use crate::error::DescribeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Location used for resources that are not bound to a region
pub const GLOBAL_LOCATION: &str = "global";

/// Normalized output record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub location: String,
    pub description: Description,
}

impl Resource {
    /// Build a record; the ID is the dedup key and must not be empty
    pub fn new(
        id: impl Into<String>,
        name: Option<String>,
        location: impl Into<String>,
        description: Description,
    ) -> Result<Self, DescribeError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DescribeError::MalformedIdentifier(id));
        }

        Ok(Self {
            id,
            name,
            location: location.into(),
            description,
        })
    }

    pub fn kind(&self) -> ResourceKind {
        self.description.kind()
    }

    /// The record as JSON, the shape table columns are extracted from
    pub fn to_value(&self) -> Result<Value, DescribeError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Every resource kind this crate can describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "Microsoft.AppConfiguration/configurationStores")]
    AppConfiguration,
    #[serde(rename = "Microsoft.EventGrid/domains")]
    EventGridDomain,
    #[serde(rename = "Microsoft.EventGrid/topics")]
    EventGridTopic,
    #[serde(rename = "Microsoft.EventGrid/domains/topics")]
    EventGridDomainTopic,
    #[serde(rename = "Microsoft.HDInsight/clusters")]
    HdInsightCluster,
    #[serde(rename = "Microsoft.HealthcareApis/services")]
    HealthcareService,
    #[serde(rename = "Microsoft.Network/loadBalancers")]
    LoadBalancer,
    #[serde(rename = "Microsoft.Network/loadBalancers/backendAddressPools")]
    LoadBalancerBackendAddressPool,
    #[serde(rename = "Microsoft.Network/loadBalancers/inboundNatRules")]
    LoadBalancerNatRule,
    #[serde(rename = "Microsoft.Network/loadBalancers/outboundRules")]
    LoadBalancerOutboundRule,
    #[serde(rename = "Microsoft.Network/loadBalancers/probes")]
    LoadBalancerProbe,
    #[serde(rename = "Microsoft.Network/loadBalancers/loadBalancingRules")]
    LoadBalancerRule,
    #[serde(rename = "Microsoft.NetApp/netAppAccounts")]
    NetAppAccount,
    #[serde(rename = "Microsoft.NetApp/netAppAccounts/capacityPools")]
    NetAppCapacityPool,
    #[serde(rename = "Microsoft.Network/networkInterfaces")]
    NetworkInterface,
    #[serde(rename = "Microsoft.Network/vpnGateways")]
    VpnGateway,
    #[serde(rename = "Microsoft.Network/firewallPolicies")]
    FirewallPolicy,
    #[serde(rename = "Microsoft.Security/settings")]
    SecurityCenterSetting,
    #[serde(rename = "Microsoft.DBforMariaDB/servers/databases")]
    MariadbDatabase,
    #[serde(rename = "Microsoft.Compute/disks/metrics/readOps")]
    ComputeDiskReadOps,
}

impl ResourceKind {
    pub const ALL: &'static [ResourceKind] = &[
        ResourceKind::AppConfiguration,
        ResourceKind::EventGridDomain,
        ResourceKind::EventGridTopic,
        ResourceKind::EventGridDomainTopic,
        ResourceKind::HdInsightCluster,
        ResourceKind::HealthcareService,
        ResourceKind::LoadBalancer,
        ResourceKind::LoadBalancerBackendAddressPool,
        ResourceKind::LoadBalancerNatRule,
        ResourceKind::LoadBalancerOutboundRule,
        ResourceKind::LoadBalancerProbe,
        ResourceKind::LoadBalancerRule,
        ResourceKind::NetAppAccount,
        ResourceKind::NetAppCapacityPool,
        ResourceKind::NetworkInterface,
        ResourceKind::VpnGateway,
        ResourceKind::FirewallPolicy,
        ResourceKind::SecurityCenterSetting,
        ResourceKind::MariadbDatabase,
        ResourceKind::ComputeDiskReadOps,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::AppConfiguration => "Microsoft.AppConfiguration/configurationStores",
            ResourceKind::EventGridDomain => "Microsoft.EventGrid/domains",
            ResourceKind::EventGridTopic => "Microsoft.EventGrid/topics",
            ResourceKind::EventGridDomainTopic => "Microsoft.EventGrid/domains/topics",
            ResourceKind::HdInsightCluster => "Microsoft.HDInsight/clusters",
            ResourceKind::HealthcareService => "Microsoft.HealthcareApis/services",
            ResourceKind::LoadBalancer => "Microsoft.Network/loadBalancers",
            ResourceKind::LoadBalancerBackendAddressPool => {
                "Microsoft.Network/loadBalancers/backendAddressPools"
            }
            ResourceKind::LoadBalancerNatRule => "Microsoft.Network/loadBalancers/inboundNatRules",
            ResourceKind::LoadBalancerOutboundRule => {
                "Microsoft.Network/loadBalancers/outboundRules"
            }
            ResourceKind::LoadBalancerProbe => "Microsoft.Network/loadBalancers/probes",
            ResourceKind::LoadBalancerRule => "Microsoft.Network/loadBalancers/loadBalancingRules",
            ResourceKind::NetAppAccount => "Microsoft.NetApp/netAppAccounts",
            ResourceKind::NetAppCapacityPool => "Microsoft.NetApp/netAppAccounts/capacityPools",
            ResourceKind::NetworkInterface => "Microsoft.Network/networkInterfaces",
            ResourceKind::VpnGateway => "Microsoft.Network/vpnGateways",
            ResourceKind::FirewallPolicy => "Microsoft.Network/firewallPolicies",
            ResourceKind::SecurityCenterSetting => "Microsoft.Security/settings",
            ResourceKind::MariadbDatabase => "Microsoft.DBforMariaDB/servers/databases",
            ResourceKind::ComputeDiskReadOps => "Microsoft.Compute/disks/metrics/readOps",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = DescribeError;

    /// ARM type names are case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DescribeError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn network_interface() -> Resource {
        Resource::new(
            "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/networkInterfaces/nic1",
            Some("nic1".to_string()),
            "westeurope",
            Description::NetworkInterface(NetworkInterfaceDescription {
                interface: json!({"name": "nic1"}),
                resource_group: "rg".to_string(),
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let result = Resource::new(
            "",
            None,
            GLOBAL_LOCATION,
            Description::NetAppAccount(NetAppAccountDescription {
                account: json!({}),
                resource_group: "rg".to_string(),
            }),
        );
        assert!(matches!(result, Err(DescribeError::MalformedIdentifier(_))));
    }

    #[test]
    fn test_description_is_tagged_by_kind() {
        let value = network_interface().to_value().unwrap();
        assert_eq!(
            value["description"]["kind"],
            "Microsoft.Network/networkInterfaces"
        );
        assert_eq!(value["description"]["resource_group"], "rg");
        assert_eq!(value["description"]["interface"]["name"], "nic1");
    }

    #[test]
    fn test_kind_names_match_description_tags() {
        let resource = network_interface();
        let value = resource.to_value().unwrap();
        assert_eq!(value["description"]["kind"], resource.kind().as_str());
        let back: Resource = serde_json::from_value(value).unwrap();
        assert_eq!(back, resource);
    }

    #[test]
    fn test_kind_from_str_is_case_insensitive() {
        assert_eq!(
            "microsoft.network/loadbalancers".parse::<ResourceKind>().unwrap(),
            ResourceKind::LoadBalancer
        );
        assert!("Microsoft.Foo/bars".parse::<ResourceKind>().is_err());
    }

    /// Serde names, `as_str` and description tags spell every kind the same way
    #[test]
    fn test_every_kind_name_agrees() {
        // Superset of every description's fields; serde ignores the extras
        let mut fields = json!({
            "resource_group": "rg",
            "diagnostic_settings_resources": [],
            "diagnostic_settings": [],
            "private_endpoint_connections": [],
            "configuration_store": {}, "domain": {}, "topic": {}, "domain_topic": {},
            "cluster": {}, "services_description": {}, "load_balancer": {}, "pool": {},
            "rule": {}, "probe": {}, "account": {}, "capacity_pool": {}, "interface": {},
            "vpn_gateway": {}, "firewall_policy": {}, "setting": {}, "database": {},
            "domain_name": "d", "load_balancer_name": "lb", "account_name": "a",
            "server_name": "s", "export_setting_status": null,
            "monitoring_metric": {
                "dimension_value": "/disk", "metric_name": "m", "unit": null,
                "timestamp": "t", "average": null, "minimum": null, "maximum": null,
                "total": null, "count": null
            }
        });

        for kind in ResourceKind::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
            let back: ResourceKind = serde_json::from_value(json!(kind.as_str())).unwrap();
            assert_eq!(back, *kind);

            fields["kind"] = json!(kind.as_str());
            let description: Description = serde_json::from_value(fields.clone())
                .unwrap_or_else(|e| panic!("{} has no matching description tag: {}", kind, e));
            assert_eq!(description.kind(), *kind);
        }
    }

    #[test]
    fn test_all_kinds_are_unique() {
        let mut names: Vec<_> = ResourceKind::ALL.iter().map(|k| k.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ResourceKind::ALL.len());
    }
}
