//! Table queries
//!
//! `list` streams a kind through a row-projecting sink and keeps the rows
//! matching every qual; `get` resolves key columns to a resource ID and
//! fetches that one resource.

use super::column::{coerce, column_value};
use super::registry::{get_table, ColumnType, TableDef};
use crate::describer::{self, DescribeContext, Sink};
use crate::error::DescribeError;
use crate::resource::Resource;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One projected row, columns in table order
pub type Row = Map<String, Value>;

/// Equality filter on one column
#[derive(Debug, Clone, PartialEq)]
pub struct Qual {
    pub column: String,
    pub value: Value,
}

impl Qual {
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Parses `column=value`; the value stays a string until matched against a
/// column type
impl FromStr for Qual {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((column, value)) if !column.trim().is_empty() => {
                Ok(Qual::new(column.trim(), value.to_string()))
            }
            _ => Err(format!("expected column=value, got '{}'", s)),
        }
    }
}

impl fmt::Display for Qual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.column, self.value)
    }
}

fn table(name: &str) -> Result<&'static TableDef, DescribeError> {
    get_table(name).ok_or_else(|| DescribeError::UnknownTable(name.to_string()))
}

/// Project a resource into a row of `table`
pub fn project_row(
    table: &TableDef,
    resource: &Resource,
    subscription_id: &str,
) -> Result<Row, DescribeError> {
    let mut source = resource.to_value()?;
    if let Value::Object(map) = &mut source {
        map.insert(
            "subscription_id".to_string(),
            Value::String(subscription_id.to_string()),
        );
    }

    Ok(table
        .all_columns()
        .map(|column| (column.name.clone(), column_value(column, &source)))
        .collect())
}

/// Quals with their values coerced to the column types
fn typed_quals(
    table_name: &str,
    table: &TableDef,
    quals: &[Qual],
) -> Result<Vec<Qual>, DescribeError> {
    quals
        .iter()
        .map(|qual| {
            let column = table.column(&qual.column).ok_or_else(|| {
                DescribeError::Unsupported(format!(
                    "table {} has no column {}",
                    table_name, qual.column
                ))
            })?;
            let value = match (&qual.value, column.column_type) {
                // `akas=["azure://..."]` compares as JSON; anything unparsable stays a string
                (Value::String(raw), ColumnType::Json) => {
                    serde_json::from_str(raw).unwrap_or_else(|_| qual.value.clone())
                }
                (value, column_type) => coerce(column_type, value.clone()),
            };
            Ok(Qual::new(qual.column.clone(), value))
        })
        .collect()
}

fn matches(row: &Row, quals: &[Qual]) -> bool {
    quals
        .iter()
        .all(|qual| row.get(&qual.column) == Some(&qual.value))
}

/// Sink adapter: resource -> row -> filter -> caller
struct RowSink<'a, F> {
    table: &'a TableDef,
    quals: Vec<Qual>,
    subscription_id: &'a str,
    on_row: F,
    emitted: usize,
}

#[async_trait]
impl<'a, F> Sink for RowSink<'a, F>
where
    F: FnMut(Row) -> anyhow::Result<()> + Send,
{
    async fn write(&mut self, resource: Resource) -> Result<(), DescribeError> {
        let row = project_row(self.table, &resource, self.subscription_id)?;
        if !matches(&row, &self.quals) {
            return Ok(());
        }
        self.emitted += 1;
        (self.on_row)(row).map_err(DescribeError::Sink)
    }
}

/// Stream the rows of `table_name` matching every qual into `on_row`.
///
/// Returns the number of emitted rows.
pub async fn list<F>(
    ctx: &DescribeContext,
    table_name: &str,
    quals: &[Qual],
    on_row: F,
) -> Result<usize, DescribeError>
where
    F: FnMut(Row) -> anyhow::Result<()> + Send,
{
    let table = table(table_name)?;
    let mut sink = RowSink {
        table,
        quals: typed_quals(table_name, table, quals)?,
        subscription_id: ctx.subscription_id(),
        on_row,
        emitted: 0,
    };

    describer::describe_into(ctx, table.kind, &mut sink).await?;
    tracing::debug!("{}: {} rows", table_name, sink.emitted);
    Ok(sink.emitted)
}

/// Collect the rows of `table_name` matching every qual
pub async fn list_rows(
    ctx: &DescribeContext,
    table_name: &str,
    quals: &[Qual],
) -> Result<Vec<Row>, DescribeError> {
    let mut rows = Vec::new();
    list(ctx, table_name, quals, |row| {
        rows.push(row);
        Ok(())
    })
    .await?;
    Ok(rows)
}

/// Fetch the row addressed by `keys`; `None` when it does not exist.
///
/// `id` is always accepted; otherwise every key column of the table must be
/// given.
pub async fn get(
    ctx: &DescribeContext,
    table_name: &str,
    keys: &BTreeMap<String, String>,
) -> Result<Option<Row>, DescribeError> {
    let table = table(table_name)?;
    let Some(config) = &table.get else {
        return Err(DescribeError::Unsupported(format!(
            "table {} does not support get",
            table_name
        )));
    };

    if !keys.contains_key("id") {
        if let Some(missing) = config.key_columns.iter().find(|k| !keys.contains_key(*k)) {
            return Err(DescribeError::Unsupported(format!(
                "get on {} requires {} (or id)",
                table_name, missing
            )));
        }
    }

    let descriptor = describer::descriptor(table.kind);
    let id = descriptor.resolve_id(ctx.subscription_id(), keys)?;

    match describer::get(ctx, table.kind, &id).await? {
        Some(resource) => Ok(Some(project_row(table, &resource, ctx.subscription_id())?)),
        None => Ok(None),
    }
}
