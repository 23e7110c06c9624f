//! Ledger integration subsystem.
//!
//! # Data Flow
//! ```text
//! TransactionRequest
//!     → signer.rs (Signer: remote vault packs + signs)
//!     → client.rs (ChainClient: push_transaction with timeouts/failover)
//!     → Receipt | ChainError
//! ```
//!
//! # Security Constraints
//! - No private keys in this process; signing is delegated
//! - Never log signer tokens
//! - All chain API calls have configurable timeouts

pub mod client;
pub mod signer;
pub mod types;

pub use client::{ChainClient, RpcChainClient};
pub use signer::{RemoteSigner, Signer};
pub use types::{ChainError, ChainInfo, ChainResult, Receipt, SignedTransaction};
