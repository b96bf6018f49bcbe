//! MariaDB databases, listed per server

use super::descriptor::{Addressing, Collection, Descriptor, Level, Projection};
use crate::error::DescribeError;
use crate::resource::{Description, MariadbDatabaseDescription, Resource, ResourceKind};

const API_VERSION: &str = "2018-06-01";

pub static MARIADB_DATABASE: Descriptor = Descriptor {
    kind: ResourceKind::MariadbDatabase,
    root: Collection {
        path: "providers/Microsoft.DBforMariaDB/servers",
        api_version: API_VERSION,
    },
    levels: &[Level::Children(Collection {
        path: "databases",
        api_version: API_VERSION,
    })],
    joins: &[],
    addressing: Addressing::Id,
    project: project_database,
};

/// Databases have no region of their own; they live where the server does
fn project_database(p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let name = p.name();
    let location = p.parent_location()?;
    let resource_group = p.resource_group()?;
    let server_name = p.parent_name()?;

    let description = Description::MariadbDatabase(MariadbDatabaseDescription {
        database: p.item,
        server_name,
        resource_group,
    });
    Resource::new(id, name, location, description)
}
