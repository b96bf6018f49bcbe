//! Table Registry - Load table definitions from JSON
//!
//! Table definitions are embedded in the binary and loaded once into a
//! process-wide registry; everything else only reads from it.

use crate::resource::ResourceKind;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded table JSON files (compiled into the binary)
const TABLE_FILES: &[&str] = &[
    include_str!("../tables/common.json"),
    include_str!("../tables/appconfiguration.json"),
    include_str!("../tables/compute.json"),
    include_str!("../tables/eventgrid.json"),
    include_str!("../tables/hdinsight.json"),
    include_str!("../tables/healthcareapis.json"),
    include_str!("../tables/lb.json"),
    include_str!("../tables/mariadb.json"),
    include_str!("../tables/netapp.json"),
    include_str!("../tables/network.json"),
    include_str!("../tables/security.json"),
];

/// Column value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Bool,
    Int,
    Double,
    Json,
    Timestamp,
}

/// Post-processing applied to the extracted value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    Lower,
    LastPathSegment,
    IdToAkas,
}

/// Column definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Dot path into `{id, name, location, description, subscription_id}`
    pub path: String,
    #[serde(default)]
    pub transform: Option<Transform>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Columns that address a single row
#[derive(Debug, Clone, Deserialize)]
pub struct GetConfig {
    pub key_columns: Vec<String>,
}

/// Table definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct TableDef {
    pub description: String,
    pub kind: ResourceKind,
    #[serde(default)]
    pub get: Option<GetConfig>,
    pub columns: Vec<ColumnDef>,
}

impl TableDef {
    /// Table columns followed by the common columns
    pub fn all_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns
            .iter()
            .chain(get_registry().common_columns.iter())
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.all_columns().find(|c| c.name == name)
    }
}

/// Root structure of tables/*.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableConfig {
    #[serde(default)]
    pub common_columns: Vec<ColumnDef>,
    #[serde(default)]
    pub tables: HashMap<String, TableDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<TableConfig> = OnceLock::new();

/// Get the table registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static TableConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = TableConfig::default();

        for content in TABLE_FILES {
            let partial: TableConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded table JSON: {}", e));
            final_config.common_columns.extend(partial.common_columns);
            final_config.tables.extend(partial.tables);
        }

        final_config
    })
}

/// Get a table definition by name
pub fn get_table(name: &str) -> Option<&'static TableDef> {
    get_registry().tables.get(name)
}

/// Get all table names, sorted
pub fn get_all_table_names() -> Vec<&'static str> {
    let mut names: Vec<&str> = get_registry()
        .tables
        .keys()
        .map(|s| s.as_str())
        .collect();
    names.sort_unstable();
    names
}
