//! Healthcare APIs services
//!
//! Besides diagnostic settings, every service gets its private endpoint
//! connections attached.

use super::descriptor::{
    Addressing, Collection, Descriptor, Join, Projection, DIAGNOSTIC_SETTINGS,
};
use crate::error::DescribeError;
use crate::resource::{Description, HealthcareServiceDescription, Resource, ResourceKind};

const PRIVATE_ENDPOINT_CONNECTIONS: Join = Join {
    key: "private_endpoint_connections",
    segment: "privateEndpointConnections",
    api_version: "2021-11-01",
};

pub static HEALTHCARE_SERVICE: Descriptor = Descriptor {
    kind: ResourceKind::HealthcareService,
    root: Collection {
        path: "providers/Microsoft.HealthcareApis/services",
        api_version: "2021-11-01",
    },
    levels: &[],
    joins: &[DIAGNOSTIC_SETTINGS, PRIVATE_ENDPOINT_CONNECTIONS],
    addressing: Addressing::ResourceGroup,
    project: project_service,
};

fn project_service(mut p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let (name, location) = (p.name(), p.location());
    let resource_group = p.resource_group()?;

    let description = Description::HealthcareService(HealthcareServiceDescription {
        diagnostic_settings_resources: p.joined.take(DIAGNOSTIC_SETTINGS.key),
        private_endpoint_connections: p.joined.take(PRIVATE_ENDPOINT_CONNECTIONS.key),
        services_description: p.item,
        resource_group,
    });
    Resource::new(id, name, location, description)
}
