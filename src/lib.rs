//! Smart contract gateway for university records.
//!
//! Thin front-ends (HTTP JSON API, HTML form, CLI) over a small core that
//! talks to an Ethereum-compatible node: resolve a contract binding from
//! an address and ABI, execute read-only calls, and build / sign /
//! broadcast state-changing transactions. A domain facade maps a fixed
//! set of university operations onto the same two primitives.

pub mod blockchain;
pub mod config;
pub mod contract;
pub mod error;
pub mod facade;
pub mod http;
pub mod observability;
pub mod registry;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use http::HttpServer;
