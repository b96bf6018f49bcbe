//! Azure Resource Manager interaction module
//!
//! # Module Structure
//!
//! - [`auth`] - Bearer token seam and default subscription discovery
//! - [`client`] - Main ARM client and URL helpers
//! - [`http`] - HTTP utilities and ARM error decoding
//! - [`pager`] - `value`/`nextLink` collection pager
//!
//! # Example
//!
//! ```ignore
//! use azd::azure::{auth::StaticTokenCredential, client::ArmClient};
//! use std::sync::Arc;
//!
//! async fn example() -> Result<(), azd::DescribeError> {
//!     let credential = Arc::new(StaticTokenCredential::from_env()?);
//!     let client = ArmClient::new("00000000-0000-0000-0000-000000000000", credential)?;
//!     let url = client.subscription_url("resourcegroups", "2021-04-01")?;
//!     let groups = client.get(&url).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
pub mod pager;
