//! Property-based tests using proptest
//!
//! These tests verify identifier decomposition, column transforms and
//! qual parsing using randomized inputs.

use azd::resource::id::{last_segment, parent_id, resource_group};
use azd::table::column::{apply_transform, coerce, lookup};
use azd::table::registry::{ColumnType, Transform};
use azd::table::Qual;
use proptest::prelude::*;
use serde_json::{json, Value};

/// Generate a subscription GUID
fn arb_subscription() -> impl Strategy<Value = String> {
    "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
}

/// Generate a resource group name (letters, digits, `-`, `_`, `.`, `(`, `)`)
fn arb_group() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9._()-]{0,40}"
}

/// Generate a provider resource ID inside a resource group
fn arb_resource_id() -> impl Strategy<Value = (String, String, String)> {
    (
        arb_subscription(),
        arb_group(),
        prop_oneof![
            Just("Microsoft.Network/loadBalancers"),
            Just("Microsoft.NetApp/netAppAccounts"),
            Just("Microsoft.EventGrid/domains"),
            Just("Microsoft.Compute/disks"),
        ],
        "[a-z][a-z0-9-]{0,30}",
    )
        .prop_map(|(sub, group, provider_type, name)| {
            (
                format!(
                    "/subscriptions/{}/resourceGroups/{}/providers/{}/{}",
                    sub, group, provider_type, name
                ),
                group,
                name,
            )
        })
}

proptest! {
    /// The group is always the fifth segment of a provider resource ID
    #[test]
    fn resource_group_is_extracted((id, group, _name) in arb_resource_id()) {
        prop_assert_eq!(resource_group(&id).unwrap(), group);
    }

    /// Child IDs keep the parent's group
    #[test]
    fn child_ids_keep_group(
        (id, group, _name) in arb_resource_id(),
        child in "[a-z]{1,10}"
    ) {
        let child_id = format!("{}/probes/{}", id, child);
        prop_assert_eq!(resource_group(&child_id).unwrap(), group);
    }

    /// Subscription-level IDs never yield a group
    #[test]
    fn short_ids_are_malformed(sub in arb_subscription(), extra in "(/resourceGroups)?") {
        let id = format!("/subscriptions/{}{}", sub, extra);
        prop_assert!(resource_group(&id).is_err());
    }

    /// The last segment of a resource ID is its name
    #[test]
    fn last_segment_is_name((id, _group, name) in arb_resource_id()) {
        prop_assert_eq!(last_segment(&id), name.as_str());
    }

    /// Stripping a child's type/name pair yields the parent ID
    #[test]
    fn parent_of_child_is_parent(
        (id, _group, _name) in arb_resource_id(),
        child in "[a-z]{1,10}"
    ) {
        let child_id = format!("{}/capacityPools/{}", id, child);
        prop_assert_eq!(parent_id(&child_id).unwrap(), id.as_str());
    }

    /// akas always hold the original and the lowercased ID
    #[test]
    fn akas_are_original_and_lowercase((id, _group, _name) in arb_resource_id()) {
        let akas = apply_transform(Transform::IdToAkas, json!(id));
        let akas = akas.as_array().unwrap();
        prop_assert_eq!(akas.len(), 2);
        prop_assert_eq!(akas[0].as_str().unwrap(), format!("azure://{}", id));
        prop_assert_eq!(akas[1].as_str().unwrap(), format!("azure://{}", id.to_lowercase()));
    }

    /// Lowercasing is idempotent
    #[test]
    fn lower_is_idempotent(s in "[A-Za-z0-9 ._/-]{0,40}") {
        let once = apply_transform(Transform::Lower, json!(s));
        let twice = apply_transform(Transform::Lower, once.clone());
        prop_assert_eq!(once, twice);
    }

    /// Integers survive a round trip through their string form
    #[test]
    fn int_coercion_parses_strings(n in any::<i64>()) {
        prop_assert_eq!(coerce(ColumnType::Int, json!(n.to_string())), json!(n));
    }

    /// Null stays null whatever the column type
    #[test]
    fn null_is_never_coerced(
        column_type in prop_oneof![
            Just(ColumnType::String),
            Just(ColumnType::Bool),
            Just(ColumnType::Int),
            Just(ColumnType::Double),
            Just(ColumnType::Json),
            Just(ColumnType::Timestamp),
        ]
    ) {
        prop_assert_eq!(coerce(column_type, Value::Null), Value::Null);
    }

    /// Quals split on the first `=` only
    #[test]
    fn qual_parsing(column in "[a-z_]{1,20}", value in "[^\n]{0,20}") {
        let qual: Qual = format!("{}={}", column, value).parse().unwrap();
        prop_assert_eq!(qual.column, column);
        prop_assert_eq!(qual.value, json!(value));
    }
}

/// Tests for JSON path lookup
mod json_path_tests {
    use super::*;

    proptest! {
        /// Array elements are reachable by index
        #[test]
        fn indexed_lookup(items in prop::collection::vec("[a-z]{1,5}", 1..20), pick in any::<prop::sample::Index>()) {
            let idx = pick.index(items.len());
            let doc = json!({"description": {"items": items.clone()}});
            let path = format!("description.items.{}", idx);
            prop_assert_eq!(lookup(&doc, &path), Some(&json!(items[idx])));
        }

        /// Missing paths resolve to nothing
        #[test]
        fn missing_path_is_none(key in "[a-z]{1,10}") {
            let doc = json!({"id": "/x"});
            let path = format!("nonexistent.{}", key);
            prop_assert!(lookup(&doc, &path).is_none());
        }
    }
}
