//! Describe Azure resources
//!
//! Enumerates Azure Resource Manager resources of a fixed set of kinds,
//! enriches them with related collections (diagnostic settings, private
//! endpoint connections, monitor metrics) and normalizes them into
//! [`Resource`] records, either buffered or streamed through a [`Sink`].
//! The [`table`] layer presents every kind as a typed table.
//!
//! # Module Structure
//!
//! - [`azure`] - ARM client, pager and credentials
//! - [`describer`] - enumeration engine and per-kind descriptors
//! - [`resource`] - normalized records and identifier helpers
//! - [`table`] - table definitions and queries
//! - [`config`] - persistent user configuration

pub mod azure;
pub mod config;
pub mod describer;
pub mod error;
pub mod resource;
pub mod table;

pub use describer::{
    describe, describe_into, describe_many, BufferSink, CallbackSink, ChannelSink,
    DescribeContext, Sink,
};
pub use error::DescribeError;
pub use resource::{Description, Resource, ResourceKind};
