//! # DPFA Common Library
//!
//! Shared code for the fan archive services:
//! - Error and result types
//! - Configuration resolution (CLI/env, TOML file, compiled defaults)
//! - Row Source abstraction over the catalog database
//! - Row-to-tree aggregation primitives used by the view builders

pub mod aggregate;
pub mod config;
pub mod db;
pub mod error;

pub use aggregate::{ChildList, OrderedGroups};
pub use db::{FlatRow, Param, RowSource, Scalar, SqlQuery};
pub use error::{Error, Result};
