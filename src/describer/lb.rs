//! Load balancers and their sub-resources
//!
//! Backend pools, NAT/outbound/load-balancing rules and probes are listed
//! per load balancer; rules and probes inherit the load balancer's region.

use super::descriptor::{
    string_at, Addressing, Collection, Descriptor, Level, Projection, DIAGNOSTIC_SETTINGS,
};
use crate::error::DescribeError;
use crate::resource::{
    Description, LoadBalancerBackendAddressPoolDescription, LoadBalancerDescription,
    LoadBalancerProbeDescription, LoadBalancerRuleDescription, Resource, ResourceKind,
    GLOBAL_LOCATION,
};

const API_VERSION: &str = "2023-09-01";

const LOAD_BALANCERS: Collection = Collection {
    path: "providers/Microsoft.Network/loadBalancers",
    api_version: API_VERSION,
};

const fn children(path: &'static str) -> Level {
    Level::Children(Collection {
        path,
        api_version: API_VERSION,
    })
}

pub static LOAD_BALANCER: Descriptor = Descriptor {
    kind: ResourceKind::LoadBalancer,
    root: LOAD_BALANCERS,
    levels: &[],
    joins: &[DIAGNOSTIC_SETTINGS],
    addressing: Addressing::ResourceGroup,
    project: project_load_balancer,
};

pub static LOAD_BALANCER_BACKEND_ADDRESS_POOL: Descriptor = Descriptor {
    kind: ResourceKind::LoadBalancerBackendAddressPool,
    root: LOAD_BALANCERS,
    levels: &[children("backendAddressPools")],
    joins: &[],
    addressing: Addressing::Id,
    project: project_backend_address_pool,
};

pub static LOAD_BALANCER_NAT_RULE: Descriptor = Descriptor {
    kind: ResourceKind::LoadBalancerNatRule,
    root: LOAD_BALANCERS,
    levels: &[children("inboundNatRules")],
    joins: &[],
    addressing: Addressing::Id,
    project: project_nat_rule,
};

pub static LOAD_BALANCER_OUTBOUND_RULE: Descriptor = Descriptor {
    kind: ResourceKind::LoadBalancerOutboundRule,
    root: LOAD_BALANCERS,
    levels: &[children("outboundRules")],
    joins: &[],
    addressing: Addressing::Id,
    project: project_outbound_rule,
};

pub static LOAD_BALANCER_PROBE: Descriptor = Descriptor {
    kind: ResourceKind::LoadBalancerProbe,
    root: LOAD_BALANCERS,
    levels: &[children("probes")],
    joins: &[],
    addressing: Addressing::Id,
    project: project_probe,
};

pub static LOAD_BALANCER_RULE: Descriptor = Descriptor {
    kind: ResourceKind::LoadBalancerRule,
    root: LOAD_BALANCERS,
    levels: &[children("loadBalancingRules")],
    joins: &[],
    addressing: Addressing::Id,
    project: project_rule,
};

fn project_load_balancer(mut p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let (name, location) = (p.name(), p.location());
    let resource_group = p.resource_group()?;

    let description = Description::LoadBalancer(LoadBalancerDescription {
        diagnostic_settings: p.joined.take(DIAGNOSTIC_SETTINGS.key),
        load_balancer: p.item,
        resource_group,
    });
    Resource::new(id, name, location, description)
}

/// Pools only have a location when they belong to a cross-region balancer
fn project_backend_address_pool(p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let name = p.name();
    let location = string_at(&p.item, "/properties/location")
        .unwrap_or_else(|| GLOBAL_LOCATION.to_string());
    let resource_group = p.resource_group()?;
    let load_balancer = p.parent()?.clone();

    let description =
        Description::LoadBalancerBackendAddressPool(LoadBalancerBackendAddressPoolDescription {
            pool: p.item,
            load_balancer,
            resource_group,
        });
    Resource::new(id, name, location, description)
}

fn project_nat_rule(p: Projection) -> Result<Resource, DescribeError> {
    project_rule_like(p, Description::LoadBalancerNatRule)
}

fn project_outbound_rule(p: Projection) -> Result<Resource, DescribeError> {
    project_rule_like(p, Description::LoadBalancerOutboundRule)
}

fn project_rule(p: Projection) -> Result<Resource, DescribeError> {
    project_rule_like(p, Description::LoadBalancerRule)
}

fn project_rule_like(
    p: Projection,
    wrap: fn(LoadBalancerRuleDescription) -> Description,
) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let name = p.name();
    let location = p.parent_location()?;
    let resource_group = p.resource_group()?;
    let load_balancer_name = p.parent_name()?;

    let description = wrap(LoadBalancerRuleDescription {
        rule: p.item,
        load_balancer_name,
        resource_group,
    });
    Resource::new(id, name, location, description)
}

fn project_probe(p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let name = p.name();
    let location = p.parent_location()?;
    let resource_group = p.resource_group()?;
    let load_balancer_name = p.parent_name()?;

    let description = Description::LoadBalancerProbe(LoadBalancerProbeDescription {
        probe: p.item,
        load_balancer_name,
        resource_group,
    });
    Resource::new(id, name, location, description)
}
