//! SQL AST types and their conversion to a low-level SQL string.

pub mod sql;
