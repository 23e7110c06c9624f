//! Intent dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher operation (send_assets, burn_assets, ...)
//!     → builder.rs (intent → Vec<Action>, pure, validated)
//!     → submitter.rs (TransactionRequest → Signer → ChainClient)
//!     → result.rs (Receipt | DispatchError → DispatchResult)
//! ```
//!
//! # Invariants
//! - Every action carries the dispatcher's identity as its sole authorizer
//! - Invalid input and empty batches never reach a capability
//! - Operations always return a tagged `DispatchResult`

pub mod action;
pub mod builder;
pub mod dispatcher;
pub mod error;
pub mod identity;
pub mod result;
pub mod submitter;

pub use action::{Action, ActionData, Authorization};
pub use builder::{ActionBuilder, AssetIds, NativeToken};
pub use rust_decimal::Decimal;
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, ErrorKind};
pub use identity::{DispatchWindow, Identity};
pub use result::DispatchResult;
pub use submitter::{TransactionRequest, TransactionSubmitter};
