//! ARM resource identifier helpers
//!
//! Resource-group scoped IDs look like
//! `/subscriptions/{sub}/resourceGroups/{group}/providers/{ns}/{type}/{name}`;
//! split on `/` the leading empty segment is index 0, so the group is index 4.

use crate::error::DescribeError;

const RESOURCE_GROUP_SEGMENT: usize = 4;

/// Extract the resource-group name from a resource-group scoped ID.
///
/// IDs with fewer than five segments (or an empty group) are invariant
/// violations, never "no group".
pub fn resource_group(id: &str) -> Result<String, DescribeError> {
    match id.split('/').nth(RESOURCE_GROUP_SEGMENT) {
        Some(group) if !group.is_empty() => Ok(group.to_string()),
        _ => Err(DescribeError::MalformedIdentifier(id.to_string())),
    }
}

/// Last `/`-delimited segment, e.g. the resource name
pub fn last_segment(id: &str) -> &str {
    id.trim_end_matches('/').rsplit('/').next().unwrap_or(id)
}

/// ID of the parent resource: drop the trailing `/{type}/{name}` pair.
///
/// `.../loadBalancers/lb/probes/p1` -> `.../loadBalancers/lb`
pub fn parent_id(id: &str) -> Result<&str, DescribeError> {
    let trimmed = id.trim_end_matches('/');
    let mut cut = trimmed.rsplitn(3, '/');
    let _name = cut.next();
    let _type = cut.next();
    match cut.next() {
        // Anything shorter than a provider resource has no parent to fetch
        Some(parent) if parent.split('/').count() > 8 => Ok(parent),
        _ => Err(DescribeError::MalformedIdentifier(id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LB: &str =
        "/subscriptions/sub/resourceGroups/rg-prod/providers/Microsoft.Network/loadBalancers/lb1";

    #[test]
    fn test_resource_group() {
        assert_eq!(resource_group(LB).unwrap(), "rg-prod");
    }

    #[test]
    fn test_resource_group_rejects_short_ids() {
        assert!(matches!(
            resource_group("/subscriptions/sub/resourceGroups"),
            Err(DescribeError::MalformedIdentifier(_))
        ));
        assert!(resource_group("").is_err());
        assert!(resource_group("/subscriptions/sub/resourceGroups//x").is_err());
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment(LB), "lb1");
        assert_eq!(last_segment("lb1"), "lb1");
        assert_eq!(last_segment("a/b/"), "b");
    }

    #[test]
    fn test_parent_id() {
        let probe = format!("{}/probes/p1", LB);
        assert_eq!(parent_id(&probe).unwrap(), LB);
        assert!(parent_id(LB).is_err());
    }
}
