//! NetApp accounts and capacity pools

use super::descriptor::{Addressing, Collection, Descriptor, Level, Projection};
use crate::error::DescribeError;
use crate::resource::{
    Description, NetAppAccountDescription, NetAppCapacityPoolDescription, Resource, ResourceKind,
};

const API_VERSION: &str = "2023-07-01";

const ACCOUNTS: Collection = Collection {
    path: "providers/Microsoft.NetApp/netAppAccounts",
    api_version: API_VERSION,
};

pub static NETAPP_ACCOUNT: Descriptor = Descriptor {
    kind: ResourceKind::NetAppAccount,
    root: ACCOUNTS,
    levels: &[],
    joins: &[],
    addressing: Addressing::ResourceGroup,
    project: project_account,
};

pub static NETAPP_CAPACITY_POOL: Descriptor = Descriptor {
    kind: ResourceKind::NetAppCapacityPool,
    root: ACCOUNTS,
    levels: &[Level::Children(Collection {
        path: "capacityPools",
        api_version: API_VERSION,
    })],
    joins: &[],
    addressing: Addressing::Id,
    project: project_capacity_pool,
};

fn project_account(p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let (name, location) = (p.name(), p.location());
    let resource_group = p.resource_group()?;

    let description = Description::NetAppAccount(NetAppAccountDescription {
        account: p.item,
        resource_group,
    });
    Resource::new(id, name, location, description)
}

/// Pools are keyed by their own ID; the account only contributes its name
fn project_capacity_pool(p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let (name, location) = (p.name(), p.location());
    let resource_group = p.resource_group()?;
    let account_name = p.parent_name()?;

    let description = Description::NetAppCapacityPool(NetAppCapacityPoolDescription {
        capacity_pool: p.item,
        account_name,
        resource_group,
    });
    Resource::new(id, name, location, description)
}
