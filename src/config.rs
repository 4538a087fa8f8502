//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive runtime
//! behavior and helpers to load configuration from disk.

mod load;
mod schema;

pub use load::{default_download_dir, default_log_path};
pub use schema::*;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;
