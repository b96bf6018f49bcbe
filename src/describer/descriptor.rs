//! Per-kind descriptors
//!
//! A [`Descriptor`] is static data: which subscription collection to list,
//! which child levels to walk under each listed item, which related
//! collections to join onto the leaf, and the function that turns the
//! collected JSON into a [`Resource`]. One walk drives every kind.

use super::engine::{drain, enumerate};
use super::sink::Sink;
use super::DescribeContext;
use crate::error::DescribeError;
use crate::resource::{id, Resource, ResourceKind, GLOBAL_LOCATION};
use chrono::{SecondsFormat, Utc};
use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::Instant;

/// An ARM collection: path relative to its scope plus the API version
#[derive(Debug, Clone, Copy)]
pub struct Collection {
    pub path: &'static str,
    pub api_version: &'static str,
}

/// A level walked under every item of the previous level
#[derive(Debug, Clone, Copy)]
pub enum Level {
    /// `GET {parent_id}/{path}`, paginated
    Children(Collection),
    /// Azure Monitor datapoints of the parent; always the last level
    Metric(MetricQuery),
}

/// A related collection attached to every leaf item: `GET {id}/{segment}`
#[derive(Debug, Clone, Copy)]
pub struct Join {
    pub key: &'static str,
    pub segment: &'static str,
    pub api_version: &'static str,
}

pub const DIAGNOSTIC_SETTINGS: Join = Join {
    key: "diagnostic_settings",
    segment: "providers/Microsoft.Insights/diagnosticSettings",
    api_version: "2021-05-01-preview",
};

/// How single items of a kind can be addressed for get-by-key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// Root kind living in resource groups: `id`, or `name` + `resource_group`
    ResourceGroup,
    /// Root kind scoped to the subscription: `id` or `name`
    Subscription,
    /// Child kind: `id` only
    Id,
    /// No single-item lookup
    Unsupported,
}

/// Related collections collected for one leaf item
#[derive(Debug, Default)]
pub struct Joined(BTreeMap<&'static str, Vec<Value>>);

impl Joined {
    pub fn insert(&mut self, key: &'static str, items: Vec<Value>) {
        self.0.insert(key, items);
    }

    /// Take a joined collection; a join that found nothing yields an empty list
    pub fn take(&mut self, key: &str) -> Vec<Value> {
        self.0.remove(key).unwrap_or_default()
    }
}

/// Everything a projector gets to build one resource
#[derive(Debug)]
pub struct Projection {
    pub kind: ResourceKind,
    pub item: Value,
    pub parent: Option<Value>,
    pub joined: Joined,
}

impl Projection {
    /// The item's ID; missing IDs are always an error
    pub fn id(&self) -> Result<String, DescribeError> {
        require_id(self.kind, &self.item).map(str::to_string)
    }

    pub fn name(&self) -> Option<String> {
        string_at(&self.item, "/name")
    }

    /// The item's region, or `global`
    pub fn location(&self) -> String {
        string_at(&self.item, "/location").unwrap_or_else(|| GLOBAL_LOCATION.to_string())
    }

    pub fn resource_group(&self) -> Result<String, DescribeError> {
        id::resource_group(&self.id()?)
    }

    pub fn parent(&self) -> Result<&Value, DescribeError> {
        self.parent
            .as_ref()
            .ok_or_else(|| DescribeError::MissingIdentifier {
                kind: self.kind.to_string(),
                field: "parent",
            })
    }

    /// Parent's name, falling back to the last segment of its ID
    pub fn parent_name(&self) -> Result<String, DescribeError> {
        let parent = self.parent()?;
        match string_at(parent, "/name") {
            Some(name) => Ok(name),
            None => Ok(id::last_segment(require_id(self.kind, parent)?).to_string()),
        }
    }

    pub fn parent_location(&self) -> Result<String, DescribeError> {
        Ok(string_at(self.parent()?, "/location")
            .unwrap_or_else(|| GLOBAL_LOCATION.to_string()))
    }
}

pub type Projector = fn(Projection) -> Result<Resource, DescribeError>;

/// Static description of one resource kind
pub struct Descriptor {
    pub kind: ResourceKind,
    /// Subscription-scoped collection the walk starts from
    pub root: Collection,
    /// Levels below the root; the last one yields the emitted items
    pub levels: &'static [Level],
    pub joins: &'static [Join],
    pub addressing: Addressing,
    pub project: Projector,
}

impl Descriptor {
    /// Enumerate every resource of this kind into `sink`
    pub async fn describe(
        &self,
        ctx: &DescribeContext,
        sink: &mut dyn Sink,
    ) -> Result<usize, DescribeError> {
        let started = Instant::now();
        let url = ctx
            .client
            .subscription_url(self.root.path, self.root.api_version)?;

        let delivered = enumerate(ctx.client.pager(url), &ctx.cancel, sink, |item| {
            self.expand(ctx, item, None, 0)
        })
        .await?;

        tracing::info!(
            "described {} {} resources in {:?}",
            delivered,
            self.kind,
            started.elapsed()
        );
        Ok(delivered)
    }

    /// Fetch one resource by ID, with the same joins and projection as a listing.
    ///
    /// Only a not-found on the resource itself yields `None`; the parent
    /// fetch and the joins propagate every error.
    pub async fn get(
        &self,
        ctx: &DescribeContext,
        id: &str,
    ) -> Result<Option<Resource>, DescribeError> {
        let (leaf, parent) = match self.levels {
            [] => (self.root, None),
            [.., Level::Metric(_)] => {
                return Err(DescribeError::Unsupported(format!(
                    "get is not available for {}",
                    self.kind
                )))
            }
            [rest @ .., Level::Children(leaf)] => {
                let parent = rest
                    .last()
                    .and_then(|level| match level {
                        Level::Children(collection) => Some(*collection),
                        Level::Metric(_) => None,
                    })
                    .unwrap_or(self.root);
                (*leaf, Some(parent))
            }
        };

        let item = match self.fetch(ctx, id, leaf).await {
            Ok(item) => item,
            Err(e) if e.is_not_found() => {
                tracing::debug!("{} {} not found", self.kind, id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        let parent = match parent {
            Some(collection) => Some(self.fetch(ctx, id::parent_id(id)?, collection).await?),
            None => None,
        };

        self.finish(ctx, item, parent).await.map(Some)
    }

    /// Turn get keys into a resource ID
    pub fn resolve_id(
        &self,
        subscription_id: &str,
        keys: &BTreeMap<String, String>,
    ) -> Result<String, DescribeError> {
        if let Some(id) = keys.get("id") {
            return Ok(id.clone());
        }

        let name = keys.get("name").map(|n| urlencoding::encode(n).into_owned());
        match (self.addressing, name, keys.get("resource_group")) {
            (Addressing::ResourceGroup, Some(name), Some(group)) => Ok(format!(
                "/subscriptions/{}/resourceGroups/{}/{}/{}",
                subscription_id,
                urlencoding::encode(group),
                self.root.path,
                name
            )),
            (Addressing::Subscription, Some(name), _) => Ok(format!(
                "/subscriptions/{}/{}/{}",
                subscription_id, self.root.path, name
            )),
            _ => Err(DescribeError::Unsupported(format!(
                "cannot address {} with keys {:?}",
                self.kind,
                keys.keys().collect::<Vec<_>>()
            ))),
        }
    }

    async fn fetch(
        &self,
        ctx: &DescribeContext,
        id: &str,
        collection: Collection,
    ) -> Result<Value, DescribeError> {
        let url = ctx.client.resource_url(id, None, collection.api_version)?;
        ctx.client.get_cancellable(&url, &ctx.cancel).await
    }

    /// Walk the levels below `item`, returning the resources it expands to
    fn expand<'a>(
        &'a self,
        ctx: &'a DescribeContext,
        item: Value,
        parent: Option<Value>,
        depth: usize,
    ) -> BoxFuture<'a, Result<Vec<Resource>, DescribeError>> {
        async move {
            match self.levels.get(depth) {
                None => Ok(vec![self.finish(ctx, item, parent).await?]),
                Some(Level::Children(collection)) => {
                    let parent_id = require_id(self.kind, &item)?;
                    let url = ctx.client.resource_url(
                        parent_id,
                        Some(collection.path),
                        collection.api_version,
                    )?;
                    let children = drain(ctx.client.pager(url), &ctx.cancel).await?;

                    let mut resources = Vec::new();
                    for child in children {
                        resources.extend(
                            self.expand(ctx, child, Some(item.clone()), depth + 1)
                                .await?,
                        );
                    }
                    Ok(resources)
                }
                Some(Level::Metric(query)) => {
                    let parent_id = require_id(self.kind, &item)?;
                    let points = query.fetch(ctx, parent_id).await?;
                    points
                        .into_iter()
                        .map(|point| {
                            (self.project)(Projection {
                                kind: self.kind,
                                item: point,
                                parent: Some(item.clone()),
                                joined: Joined::default(),
                            })
                        })
                        .collect()
                }
            }
        }
        .boxed()
    }

    /// Run the joins for a leaf item and project it
    async fn finish(
        &self,
        ctx: &DescribeContext,
        item: Value,
        parent: Option<Value>,
    ) -> Result<Resource, DescribeError> {
        let id = require_id(self.kind, &item)?.to_string();

        let mut joined = Joined::default();
        for join in self.joins {
            let url = ctx
                .client
                .resource_url(&id, Some(join.segment), join.api_version)?;
            joined.insert(join.key, drain(ctx.client.pager(url), &ctx.cancel).await?);
        }

        (self.project)(Projection {
            kind: self.kind,
            item,
            parent,
            joined,
        })
    }
}

/// Azure Monitor metric lookup for one resource
#[derive(Debug, Clone, Copy)]
pub struct MetricQuery {
    pub metric: &'static str,
    pub api_version: &'static str,
    /// ISO 8601 granularity, e.g. `PT5M`
    pub interval: &'static str,
    pub lookback_hours: i64,
}

impl MetricQuery {
    async fn fetch(
        &self,
        ctx: &DescribeContext,
        resource_id: &str,
    ) -> Result<Vec<Value>, DescribeError> {
        let end = Utc::now();
        let start = end - chrono::Duration::hours(self.lookback_hours);
        let timespan = format!(
            "{}/{}",
            start.to_rfc3339_opts(SecondsFormat::Secs, true),
            end.to_rfc3339_opts(SecondsFormat::Secs, true)
        );

        let url = ctx.client.url(
            &format!("{}/providers/Microsoft.Insights/metrics", resource_id),
            self.api_version,
            &[
                ("metricnames", self.metric),
                ("aggregation", "Average,Minimum,Maximum,Total,Count"),
                ("interval", self.interval),
                ("timespan", timespan.as_str()),
            ],
        )?;

        let body = ctx.client.get_cancellable(&url, &ctx.cancel).await?;
        Ok(flatten_metric_response(&body, resource_id))
    }
}

/// Flatten `value[].timeseries[].data[]` into one object per datapoint.
///
/// Datapoints without any aggregate (gaps in the series) are dropped.
pub fn flatten_metric_response(body: &Value, resource_id: &str) -> Vec<Value> {
    let mut points = Vec::new();

    for metric in body["value"].as_array().into_iter().flatten() {
        let metric_name = metric["name"]["value"].as_str().unwrap_or_default();
        let unit = &metric["unit"];

        for series in metric["timeseries"].as_array().into_iter().flatten() {
            for data in series["data"].as_array().into_iter().flatten() {
                let Some(timestamp) = data["timeStamp"].as_str() else {
                    continue;
                };
                let has_value = ["average", "minimum", "maximum", "total", "count"]
                    .iter()
                    .any(|field| data.get(*field).is_some_and(|v| !v.is_null()));
                if !has_value {
                    continue;
                }

                points.push(json!({
                    "dimension_value": resource_id,
                    "metric_name": metric_name,
                    "unit": unit,
                    "timestamp": timestamp,
                    "average": data["average"],
                    "minimum": data["minimum"],
                    "maximum": data["maximum"],
                    "total": data["total"],
                    "count": data["count"],
                }));
            }
        }
    }

    points
}

/// The `id` of a listed item; absence is an invariant violation
pub fn require_id(kind: ResourceKind, item: &Value) -> Result<&str, DescribeError> {
    match item.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(DescribeError::MissingIdentifier {
            kind: kind.to_string(),
            field: "id",
        }),
    }
}

/// String at a JSON pointer, if present and non-empty
pub fn string_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
