//! Contract interaction core.
//!
//! # Data Flow
//! ```text
//! {address, abi} → binding.rs (resolve once, name-indexed)
//!     → reader.rs (encode → eth_call → decode)
//!     → writer.rs (encode → build envelope → sign → broadcast → receipt)
//! value.rs converts JSON arguments/results to and from ABI types
//! ```

pub mod binding;
pub mod reader;
pub mod value;
pub mod writer;

pub use binding::ContractBinding;
pub use reader::Reader;
pub use writer::{BuiltTx, SignedTx, TxOutcome, Writer};
