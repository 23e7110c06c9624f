//! WAX wallet intent dispatcher library.
//!
//! Turns wallet intents (send NFTs, burn NFTs, mint from a template, pay the
//! native token, pay any fungible token) into authorized action batches and
//! submits each batch as one transaction through injected `Signer` and
//! `ChainClient` capabilities.

pub mod chain;
pub mod config;
pub mod dispatch;
pub mod observability;

pub use chain::{ChainClient, Signer};
pub use config::DispatcherConfig;
pub use dispatch::{Decimal, DispatchResult, Dispatcher, ErrorKind, Identity};
