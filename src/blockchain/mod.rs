//! Node connectivity and key management.
//!
//! # Components
//! - `client`: JSON-RPC node client (reads, broadcast, receipts)
//! - `wallet`: private key handling and signing identity
//!
//! Both are constructed once at startup and passed explicitly to every
//! component that needs them; there is no process-wide ambient state.

pub mod client;
pub mod wallet;

pub use client::NodeClient;
pub use wallet::Wallet;
