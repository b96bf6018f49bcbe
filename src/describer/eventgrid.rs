//! Event Grid domains, topics and domain topics
//!
//! Domain topics are reached through resource groups: every group is
//! listed, then the domains in it, then the topics of each domain.

use super::descriptor::{
    Addressing, Collection, Descriptor, Level, Projection, DIAGNOSTIC_SETTINGS,
};
use crate::error::DescribeError;
use crate::resource::{
    Description, EventGridDomainDescription, EventGridDomainTopicDescription,
    EventGridTopicDescription, Resource, ResourceKind, GLOBAL_LOCATION,
};

const API_VERSION: &str = "2022-06-15";

pub static EVENT_GRID_DOMAIN: Descriptor = Descriptor {
    kind: ResourceKind::EventGridDomain,
    root: Collection {
        path: "providers/Microsoft.EventGrid/domains",
        api_version: API_VERSION,
    },
    levels: &[],
    joins: &[DIAGNOSTIC_SETTINGS],
    addressing: Addressing::ResourceGroup,
    project: project_domain,
};

pub static EVENT_GRID_TOPIC: Descriptor = Descriptor {
    kind: ResourceKind::EventGridTopic,
    root: Collection {
        path: "providers/Microsoft.EventGrid/topics",
        api_version: API_VERSION,
    },
    levels: &[],
    joins: &[DIAGNOSTIC_SETTINGS],
    addressing: Addressing::ResourceGroup,
    project: project_topic,
};

pub static EVENT_GRID_DOMAIN_TOPIC: Descriptor = Descriptor {
    kind: ResourceKind::EventGridDomainTopic,
    root: Collection {
        path: "resourcegroups",
        api_version: "2021-04-01",
    },
    levels: &[
        Level::Children(Collection {
            path: "providers/Microsoft.EventGrid/domains",
            api_version: API_VERSION,
        }),
        Level::Children(Collection {
            path: "topics",
            api_version: API_VERSION,
        }),
    ],
    joins: &[],
    addressing: Addressing::Id,
    project: project_domain_topic,
};

fn project_domain(mut p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let (name, location) = (p.name(), p.location());
    let resource_group = p.resource_group()?;

    let description = Description::EventGridDomain(EventGridDomainDescription {
        diagnostic_settings_resources: p.joined.take(DIAGNOSTIC_SETTINGS.key),
        domain: p.item,
        resource_group,
    });
    Resource::new(id, name, location, description)
}

fn project_topic(mut p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let (name, location) = (p.name(), p.location());
    let resource_group = p.resource_group()?;

    let description = Description::EventGridTopic(EventGridTopicDescription {
        diagnostic_settings_resources: p.joined.take(DIAGNOSTIC_SETTINGS.key),
        topic: p.item,
        resource_group,
    });
    Resource::new(id, name, location, description)
}

/// Domain topics carry no location of their own
fn project_domain_topic(p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let name = p.name();
    let resource_group = p.resource_group()?;
    let domain_name = p.parent_name()?;

    let description = Description::EventGridDomainTopic(EventGridDomainTopicDescription {
        domain_topic: p.item,
        domain_name,
        resource_group,
    });
    Resource::new(id, name, GLOBAL_LOCATION, description)
}
