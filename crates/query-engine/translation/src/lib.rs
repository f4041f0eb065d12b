//! Normalize an incoming query spec and translate it to a SQL AST.

pub mod translation;
