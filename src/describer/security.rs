//! Security Center settings
//!
//! Settings live at subscription scope: no resource group, always `global`.

use super::descriptor::{Addressing, Collection, Descriptor, Projection};
use crate::error::DescribeError;
use crate::resource::{
    Description, Resource, ResourceKind, SecurityCenterSettingDescription, GLOBAL_LOCATION,
};
use serde_json::Value;

pub static SECURITY_CENTER_SETTING: Descriptor = Descriptor {
    kind: ResourceKind::SecurityCenterSetting,
    root: Collection {
        path: "providers/Microsoft.Security/settings",
        api_version: "2022-05-01",
    },
    levels: &[],
    joins: &[],
    addressing: Addressing::Subscription,
    project: project_setting,
};

fn project_setting(p: Projection) -> Result<Resource, DescribeError> {
    let id = p.id()?;
    let name = p.name();
    // Only data export settings (MCAS, WDATP, ...) carry an enabled flag
    let export_setting_status = p
        .item
        .pointer("/properties/enabled")
        .and_then(Value::as_bool);

    let description = Description::SecurityCenterSetting(SecurityCenterSettingDescription {
        setting: p.item,
        export_setting_status,
    });
    Resource::new(id, name, GLOBAL_LOCATION, description)
}
