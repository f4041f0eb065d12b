//! Translate an incoming query spec to SQL to be run against the database.

pub mod error;
pub mod query;
pub mod spec;
