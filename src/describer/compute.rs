//! Managed disk read-operation metrics
//!
//! Every disk is expanded into its recent "Composite Disk Read
//! Operations/sec" datapoints, one resource per datapoint.

use super::descriptor::{
    string_at, Addressing, Collection, Descriptor, Level, MetricQuery, Projection,
};
use crate::error::DescribeError;
use crate::resource::{
    id, ComputeDiskReadOpsDescription, Description, MonitoringMetric, Resource, ResourceKind,
};

pub static COMPUTE_DISK_READ_OPS: Descriptor = Descriptor {
    kind: ResourceKind::ComputeDiskReadOps,
    root: Collection {
        path: "providers/Microsoft.Compute/disks",
        api_version: "2023-04-02",
    },
    levels: &[Level::Metric(MetricQuery {
        metric: "Composite Disk Read Operations/sec",
        api_version: "2018-01-01",
        interval: "PT5M",
        lookback_hours: 24,
    })],
    joins: &[],
    addressing: Addressing::Unsupported,
    project: project_read_ops,
};

/// Datapoints are keyed by disk ID plus timestamp
fn project_read_ops(p: Projection) -> Result<Resource, DescribeError> {
    let name = string_at(p.parent()?, "/name");
    let location = p.parent_location()?;
    let metric: MonitoringMetric = serde_json::from_value(p.item)?;
    let resource_group = id::resource_group(&metric.dimension_value)?;
    let record_id = format!("{}/metrics/readOps/{}", metric.dimension_value, metric.timestamp);

    let description = Description::ComputeDiskReadOps(ComputeDiskReadOpsDescription {
        monitoring_metric: metric,
        resource_group,
    });
    Resource::new(record_id, name, location, description)
}
