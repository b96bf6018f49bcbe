//! App Configuration stores

use super::descriptor::{Addressing, Collection, Descriptor, Projection, DIAGNOSTIC_SETTINGS};
use crate::error::DescribeError;
use crate::resource::{AppConfigurationDescription, Description, Resource, ResourceKind};

pub static APP_CONFIGURATION: Descriptor = Descriptor {
    kind: ResourceKind::AppConfiguration,
    root: Collection {
        path: "providers/Microsoft.AppConfiguration/configurationStores",
        api_version: "2023-03-01",
    },
    levels: &[],
    joins: &[DIAGNOSTIC_SETTINGS],
    addressing: Addressing::ResourceGroup,
    project: project_configuration_store,
};

fn project_configuration_store(mut p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let (name, location) = (p.name(), p.location());
    let resource_group = p.resource_group()?;

    let description = Description::AppConfiguration(AppConfigurationDescription {
        diagnostic_settings_resources: p.joined.take(DIAGNOSTIC_SETTINGS.key),
        configuration_store: p.item,
        resource_group,
    });
    Resource::new(id, name, location, description)
}
