//! Typed, async client for the Zephyr Scale Cloud REST API (v2).
//!
//! ```no_run
//! # async fn run() -> Result<(), zephyr_sdk::ZephyrError> {
//! use zephyr_sdk::{types::Folder, Client};
//!
//! let client = Client::from_env()?;
//! let page = client.folders().project_key("PROJ").max_results(50).send().await?;
//! for folder in page.values {
//!     println!("{} {}", folder.id, folder.name);
//! }
//! let folder: Folder = client.folder(42).await?;
//! # let _ = folder;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod inputs;
pub mod pagination;
pub mod resources;
pub mod types;

// Re-export key types at crate root for convenience.
pub use client::Client;
pub use error::ZephyrError;
pub use pagination::{fetch_all, fetch_up_to, Page};
pub use resources::ListRequest;
