//! Network interfaces, VPN gateways and firewall policies

use super::descriptor::{Addressing, Collection, Descriptor, Projection};
use crate::error::DescribeError;
use crate::resource::{
    Description, FirewallPolicyDescription, NetworkInterfaceDescription, Resource, ResourceKind,
    VpnGatewayDescription,
};

const API_VERSION: &str = "2023-09-01";

pub static NETWORK_INTERFACE: Descriptor = Descriptor {
    kind: ResourceKind::NetworkInterface,
    root: Collection {
        path: "providers/Microsoft.Network/networkInterfaces",
        api_version: API_VERSION,
    },
    levels: &[],
    joins: &[],
    addressing: Addressing::ResourceGroup,
    project: project_interface,
};

pub static VPN_GATEWAY: Descriptor = Descriptor {
    kind: ResourceKind::VpnGateway,
    root: Collection {
        path: "providers/Microsoft.Network/vpnGateways",
        api_version: API_VERSION,
    },
    levels: &[],
    joins: &[],
    addressing: Addressing::ResourceGroup,
    project: project_vpn_gateway,
};

pub static FIREWALL_POLICY: Descriptor = Descriptor {
    kind: ResourceKind::FirewallPolicy,
    root: Collection {
        path: "providers/Microsoft.Network/firewallPolicies",
        api_version: API_VERSION,
    },
    levels: &[],
    joins: &[],
    addressing: Addressing::ResourceGroup,
    project: project_firewall_policy,
};

fn project_interface(p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let (name, location) = (p.name(), p.location());
    let resource_group = p.resource_group()?;

    let description = Description::NetworkInterface(NetworkInterfaceDescription {
        interface: p.item,
        resource_group,
    });
    Resource::new(id, name, location, description)
}

fn project_vpn_gateway(p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let (name, location) = (p.name(), p.location());
    let resource_group = p.resource_group()?;

    let description = Description::VpnGateway(VpnGatewayDescription {
        vpn_gateway: p.item,
        resource_group,
    });
    Resource::new(id, name, location, description)
}

fn project_firewall_policy(p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let (name, location) = (p.name(), p.location());
    let resource_group = p.resource_group()?;

    let description = Description::FirewallPolicy(FirewallPolicyDescription {
        firewall_policy: p.item,
        resource_group,
    });
    Resource::new(id, name, location, description)
}
