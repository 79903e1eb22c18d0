//! Field-use reporter core.
//!
//! Pure domain logic for counting where a custom field is used across
//! published posts: key sanitizing, LIKE pattern handling, the submission
//! redirect builder, anti-forgery nonces and the `FieldUseReporter` service.
//! Storage is reached only through the port traits in [`ports`], so the
//! same service runs against MySQL or the in-memory store used in tests.

pub mod error;
pub mod memory;
pub mod nonce;
pub mod ports;
pub mod principal;
pub mod redirect;
pub mod reporter;
pub mod sanitize;
pub mod types;

pub use error::FieldUseError;
pub use reporter::{FieldUseReporter, REPORTER_MENU, SUBMIT_ACTION};
pub use types::{FieldName, FieldUse, FieldUseReport, MenuEntry, ReportRow};
