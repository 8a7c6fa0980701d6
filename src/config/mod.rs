//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → semantic validation
//!     → GatewayConfig (validated, immutable)
//!     → handed to each subsystem at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - The private key never appears in the config file, only the name of
//!   the environment variable that holds it

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ArtifactsConfig, ChainConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, SignerConfig,
};
