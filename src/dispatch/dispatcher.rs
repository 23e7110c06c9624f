//! Top-level dispatcher binding an identity to the signing and chain capabilities.

use std::sync::Arc;
use std::time::Instant;

use rust_decimal::Decimal;
use tracing::Instrument;
use uuid::Uuid;

use crate::chain::client::ChainClient;
use crate::chain::signer::Signer;
use crate::config::schema::DispatcherConfig;
use crate::dispatch::action::Action;
use crate::dispatch::builder::{ActionBuilder, AssetIds, NativeToken};
use crate::dispatch::error::DispatchOutcome;
use crate::dispatch::identity::{DispatchWindow, Identity};
use crate::dispatch::result::DispatchResult;
use crate::dispatch::submitter::TransactionSubmitter;
use crate::observability::metrics;

/// Wallet intent dispatcher.
///
/// Immutable after construction; share it behind an `Arc` to issue
/// operations concurrently.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    builder: ActionBuilder,
    submitter: TransactionSubmitter,
}

impl Dispatcher {
    /// Bind `identity` to the given capabilities with default contracts.
    pub fn new(
        identity: Identity,
        window: DispatchWindow,
        signer: Arc<dyn Signer>,
        client: Arc<dyn ChainClient>,
    ) -> Self {
        Self::from_parts(
            ActionBuilder::new(Arc::new(identity)),
            TransactionSubmitter::new(signer, client, window),
        )
    }

    /// Build a dispatcher from validated configuration.
    pub fn from_config(
        config: &DispatcherConfig,
        signer: Arc<dyn Signer>,
        client: Arc<dyn ChainClient>,
    ) -> DispatchOutcome<Self> {
        let identity = Identity::from_config(&config.identity)?;
        let builder = ActionBuilder::new(Arc::new(identity))
            .with_assets_contract(config.contracts.assets.clone())
            .with_native_token(NativeToken::from(&config.native_token))
            .with_max_actions(config.limits.max_actions_per_transaction as usize);
        let submitter = TransactionSubmitter::new(signer, client, config.window.into());

        Ok(Self::from_parts(builder, submitter))
    }

    pub fn from_parts(builder: ActionBuilder, submitter: TransactionSubmitter) -> Self {
        tracing::info!(
            address = %builder.identity().address(),
            permission = %builder.identity().permission(),
            "Dispatcher initialized"
        );
        Self { builder, submitter }
    }

    pub fn identity(&self) -> &Identity {
        self.builder.identity()
    }

    pub fn window(&self) -> DispatchWindow {
        self.submitter.window()
    }

    pub fn chain_client(&self) -> &dyn ChainClient {
        self.submitter.client()
    }

    /// Transfer NFTs to `recipient` in a single action.
    pub async fn send_assets(
        &self,
        asset_ids: &[String],
        recipient: &str,
        memo: Option<&str>,
    ) -> DispatchResult {
        let actions = self.builder.transfer_assets(asset_ids, recipient, memo);
        self.dispatch("send_assets", actions).await
    }

    /// Burn one or many NFTs, one action per asset.
    pub async fn burn_assets(&self, asset_ids: impl Into<AssetIds>) -> DispatchResult {
        let actions = self.builder.burn_assets(asset_ids);
        self.dispatch("burn_assets", actions).await
    }

    /// Mint `amount` (default 1) assets from a template to `recipient`.
    pub async fn mint_from_template(
        &self,
        collection: &str,
        schema: &str,
        template_id: i32,
        recipient: &str,
        amount: Option<u32>,
    ) -> DispatchResult {
        let actions = self.builder.mint_from_template(
            collection,
            schema,
            template_id,
            recipient,
            amount.unwrap_or(1),
        );
        self.dispatch("mint_from_template", actions).await
    }

    /// Transfer the native token at its fixed precision.
    pub async fn send_wax(&self, quantity: Decimal, recipient: &str, memo: Option<&str>) -> DispatchResult {
        let actions = self.builder.pay_native(quantity, recipient, memo);
        self.dispatch("send_wax", actions).await
    }

    /// Alias of [`Dispatcher::send_wax`].
    pub async fn send_native(&self, quantity: Decimal, recipient: &str, memo: Option<&str>) -> DispatchResult {
        self.send_wax(quantity, recipient, memo).await
    }

    /// Transfer an arbitrary fungible token, written at the quantity's own scale.
    pub async fn send_tokens(
        &self,
        quantity: Decimal,
        ticker: &str,
        token_contract: &str,
        recipient: &str,
        memo: Option<&str>,
    ) -> DispatchResult {
        let actions = self
            .builder
            .pay_token(quantity, ticker, token_contract, recipient, memo);
        self.dispatch("send_tokens", actions).await
    }

    async fn dispatch(
        &self,
        operation: &'static str,
        actions: DispatchOutcome<Vec<Action>>,
    ) -> DispatchResult {
        let dispatch_id = Uuid::new_v4();
        let span = tracing::info_span!("dispatch", %dispatch_id, operation);

        async move {
            let started = Instant::now();

            let outcome = match actions {
                Ok(actions) => {
                    metrics::record_batch_size(operation, actions.len());
                    self.submitter.submit(actions).await
                }
                Err(e) => Err(e),
            };
            let result = DispatchResult::from_outcome(outcome);

            match &result {
                DispatchResult::Success { transaction_id, .. } => {
                    tracing::info!(transaction_id = %transaction_id, "Dispatch succeeded");
                }
                DispatchResult::Failure { kind, detail } => {
                    tracing::warn!(kind = %kind, detail = %detail, "Dispatch failed");
                }
            }
            metrics::record_dispatch(operation, result.outcome_label(), started.elapsed());

            result
        }
        .instrument(span)
        .await
    }
}
