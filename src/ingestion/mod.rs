//! Loading raw sheets.
//!
//! Most callers should use [`load`] (from the `load` submodule) which:
//!
//! - checks that a local source exists, or fetches a remote one
//! - decodes it with the configured [`TextEncoding`] and splits on the configured delimiter
//! - canonicalizes header aliases and drops unnamed columns / empty rows
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! [`unify`] merges several exported sheets into one [`crate::types::RawTable`].

pub mod config;
pub mod csv;
pub mod load;
pub mod observability;
pub mod source;
pub mod unify;

pub use config::{default_column_aliases, SourceConfig, TextEncoding};
pub use load::{load, LoadOptions};
pub use observability::{
    severity_for_error, CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver,
};
pub use source::Source;
pub use unify::{expand_patterns, unify, unify_to_csv};
