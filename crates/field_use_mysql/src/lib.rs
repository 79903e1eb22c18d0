//! MySQL implementations of the field_use_core port traits.
//!
//! Reads the WordPress `posts`, `postmeta` and `options` tables. All SQL is
//! runtime-checked (`sqlx::query_as`, not `sqlx::query!`) so builds never
//! need a live database.

pub mod pool;
pub mod store;

pub use pool::{connect, mask_database_url, DatabaseConfig, TablePrefix};
pub use store::{MySqlFieldUseStore, MySqlPluginProbe, MySqlStores};
