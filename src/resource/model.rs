//! Per-kind description payloads
//!
//! Provider objects are kept as the raw ARM JSON; joined collections sit next
//! to them together with derived fields such as the resource group.

use super::ResourceKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tagged union of every description, keyed by resource kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Description {
    #[serde(rename = "Microsoft.AppConfiguration/configurationStores")]
    AppConfiguration(AppConfigurationDescription),
    #[serde(rename = "Microsoft.EventGrid/domains")]
    EventGridDomain(EventGridDomainDescription),
    #[serde(rename = "Microsoft.EventGrid/topics")]
    EventGridTopic(EventGridTopicDescription),
    #[serde(rename = "Microsoft.EventGrid/domains/topics")]
    EventGridDomainTopic(EventGridDomainTopicDescription),
    #[serde(rename = "Microsoft.HDInsight/clusters")]
    HdInsightCluster(HdInsightClusterDescription),
    #[serde(rename = "Microsoft.HealthcareApis/services")]
    HealthcareService(HealthcareServiceDescription),
    #[serde(rename = "Microsoft.Network/loadBalancers")]
    LoadBalancer(LoadBalancerDescription),
    #[serde(rename = "Microsoft.Network/loadBalancers/backendAddressPools")]
    LoadBalancerBackendAddressPool(LoadBalancerBackendAddressPoolDescription),
    #[serde(rename = "Microsoft.Network/loadBalancers/inboundNatRules")]
    LoadBalancerNatRule(LoadBalancerRuleDescription),
    #[serde(rename = "Microsoft.Network/loadBalancers/outboundRules")]
    LoadBalancerOutboundRule(LoadBalancerRuleDescription),
    #[serde(rename = "Microsoft.Network/loadBalancers/probes")]
    LoadBalancerProbe(LoadBalancerProbeDescription),
    #[serde(rename = "Microsoft.Network/loadBalancers/loadBalancingRules")]
    LoadBalancerRule(LoadBalancerRuleDescription),
    #[serde(rename = "Microsoft.NetApp/netAppAccounts")]
    NetAppAccount(NetAppAccountDescription),
    #[serde(rename = "Microsoft.NetApp/netAppAccounts/capacityPools")]
    NetAppCapacityPool(NetAppCapacityPoolDescription),
    #[serde(rename = "Microsoft.Network/networkInterfaces")]
    NetworkInterface(NetworkInterfaceDescription),
    #[serde(rename = "Microsoft.Network/vpnGateways")]
    VpnGateway(VpnGatewayDescription),
    #[serde(rename = "Microsoft.Network/firewallPolicies")]
    FirewallPolicy(FirewallPolicyDescription),
    #[serde(rename = "Microsoft.Security/settings")]
    SecurityCenterSetting(SecurityCenterSettingDescription),
    #[serde(rename = "Microsoft.DBforMariaDB/servers/databases")]
    MariadbDatabase(MariadbDatabaseDescription),
    #[serde(rename = "Microsoft.Compute/disks/metrics/readOps")]
    ComputeDiskReadOps(ComputeDiskReadOpsDescription),
}

impl Description {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Description::AppConfiguration(_) => ResourceKind::AppConfiguration,
            Description::EventGridDomain(_) => ResourceKind::EventGridDomain,
            Description::EventGridTopic(_) => ResourceKind::EventGridTopic,
            Description::EventGridDomainTopic(_) => ResourceKind::EventGridDomainTopic,
            Description::HdInsightCluster(_) => ResourceKind::HdInsightCluster,
            Description::HealthcareService(_) => ResourceKind::HealthcareService,
            Description::LoadBalancer(_) => ResourceKind::LoadBalancer,
            Description::LoadBalancerBackendAddressPool(_) => {
                ResourceKind::LoadBalancerBackendAddressPool
            }
            Description::LoadBalancerNatRule(_) => ResourceKind::LoadBalancerNatRule,
            Description::LoadBalancerOutboundRule(_) => ResourceKind::LoadBalancerOutboundRule,
            Description::LoadBalancerProbe(_) => ResourceKind::LoadBalancerProbe,
            Description::LoadBalancerRule(_) => ResourceKind::LoadBalancerRule,
            Description::NetAppAccount(_) => ResourceKind::NetAppAccount,
            Description::NetAppCapacityPool(_) => ResourceKind::NetAppCapacityPool,
            Description::NetworkInterface(_) => ResourceKind::NetworkInterface,
            Description::VpnGateway(_) => ResourceKind::VpnGateway,
            Description::FirewallPolicy(_) => ResourceKind::FirewallPolicy,
            Description::SecurityCenterSetting(_) => ResourceKind::SecurityCenterSetting,
            Description::MariadbDatabase(_) => ResourceKind::MariadbDatabase,
            Description::ComputeDiskReadOps(_) => ResourceKind::ComputeDiskReadOps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfigurationDescription {
    pub configuration_store: Value,
    pub diagnostic_settings_resources: Vec<Value>,
    pub resource_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventGridDomainDescription {
    pub domain: Value,
    pub diagnostic_settings_resources: Vec<Value>,
    pub resource_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventGridTopicDescription {
    pub topic: Value,
    pub diagnostic_settings_resources: Vec<Value>,
    pub resource_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventGridDomainTopicDescription {
    pub domain_topic: Value,
    pub domain_name: String,
    pub resource_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HdInsightClusterDescription {
    pub cluster: Value,
    pub diagnostic_settings_resources: Vec<Value>,
    pub resource_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthcareServiceDescription {
    pub services_description: Value,
    pub diagnostic_settings_resources: Vec<Value>,
    pub private_endpoint_connections: Vec<Value>,
    pub resource_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerDescription {
    pub load_balancer: Value,
    pub diagnostic_settings: Vec<Value>,
    pub resource_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerBackendAddressPoolDescription {
    pub load_balancer: Value,
    pub pool: Value,
    pub resource_group: String,
}

/// Shared by inbound NAT, outbound and load-balancing rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerRuleDescription {
    pub load_balancer_name: String,
    pub rule: Value,
    pub resource_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancerProbeDescription {
    pub load_balancer_name: String,
    pub probe: Value,
    pub resource_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetAppAccountDescription {
    pub account: Value,
    pub resource_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetAppCapacityPoolDescription {
    pub account_name: String,
    pub capacity_pool: Value,
    pub resource_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkInterfaceDescription {
    pub interface: Value,
    pub resource_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpnGatewayDescription {
    pub vpn_gateway: Value,
    pub resource_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallPolicyDescription {
    pub firewall_policy: Value,
    pub resource_group: String,
}

/// Subscription scoped, so there is no resource group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityCenterSettingDescription {
    pub setting: Value,
    pub export_setting_status: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MariadbDatabaseDescription {
    pub database: Value,
    pub server_name: String,
    pub resource_group: String,
}

/// One datapoint of an Azure Monitor metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringMetric {
    /// ID of the resource the metric was collected for
    pub dimension_value: String,
    pub metric_name: String,
    pub unit: Option<String>,
    pub timestamp: String,
    pub average: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub total: Option<f64>,
    pub count: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeDiskReadOpsDescription {
    pub monitoring_metric: MonitoringMetric,
    pub resource_group: String,
}
