//! Query execution and page navigation over an injected transport.

pub mod engine;
pub mod error;
pub mod transport;
