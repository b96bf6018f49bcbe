//! HDInsight clusters

use super::descriptor::{Addressing, Collection, Descriptor, Projection, DIAGNOSTIC_SETTINGS};
use crate::error::DescribeError;
use crate::resource::{Description, HdInsightClusterDescription, Resource, ResourceKind};

pub static HDINSIGHT_CLUSTER: Descriptor = Descriptor {
    kind: ResourceKind::HdInsightCluster,
    root: Collection {
        path: "providers/Microsoft.HDInsight/clusters",
        api_version: "2021-06-01",
    },
    levels: &[],
    joins: &[DIAGNOSTIC_SETTINGS],
    addressing: Addressing::ResourceGroup,
    project: project_cluster,
};

fn project_cluster(mut p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let (name, location) = (p.name(), p.location());
    let resource_group = p.resource_group()?;

    let description = Description::HdInsightCluster(HdInsightClusterDescription {
        diagnostic_settings_resources: p.joined.take(DIAGNOSTIC_SETTINGS.key),
        cluster: p.item,
        resource_group,
    });
    Resource::new(id, name, location, description)
}
