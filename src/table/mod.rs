//! Table projection layer
//!
//! Presents every resource kind as a flat table with typed columns.
//!
//! - [`registry`] - embedded table definitions
//! - [`column`] - path lookup, transforms and type coercion
//! - [`query`] - list with equality quals, get by key columns

pub mod column;
pub mod query;
pub mod registry;

pub use query::{get, list, list_rows, project_row, Qual, Row};
pub use registry::{get_all_table_names, get_table, ColumnDef, ColumnType, TableDef};
