//! Intent → action mapping.
//!
//! Every function here is pure: it validates its arguments and returns the
//! ordered actions for one intent. Nothing touches the network.

use std::sync::Arc;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::schema::NativeTokenConfig;
use crate::dispatch::action::{Action, ActionData, BurnAsset, MintAsset, TokenTransfer, TransferAssets};
use crate::dispatch::error::{DispatchError, DispatchOutcome};
use crate::dispatch::identity::{ensure_name, is_valid_symbol, Identity};

/// Default NFT standard contract.
pub const DEFAULT_ASSETS_CONTRACT: &str = "atomicassets";

/// Default cap on the actions a single intent may expand to.
pub const DEFAULT_MAX_ACTIONS: usize = 100;

/// One or many asset ids, normalized to an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetIds(Vec<String>);

impl AssetIds {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for AssetIds {
    fn from(id: &str) -> Self {
        Self(vec![id.to_string()])
    }
}

impl From<String> for AssetIds {
    fn from(id: String) -> Self {
        Self(vec![id])
    }
}

impl From<Vec<String>> for AssetIds {
    fn from(ids: Vec<String>) -> Self {
        Self(ids)
    }
}

impl From<Vec<&str>> for AssetIds {
    fn from(ids: Vec<&str>) -> Self {
        Self(ids.into_iter().map(str::to_string).collect())
    }
}

impl From<&[String]> for AssetIds {
    fn from(ids: &[String]) -> Self {
        Self(ids.to_vec())
    }
}

impl From<&[&str]> for AssetIds {
    fn from(ids: &[&str]) -> Self {
        Self(ids.iter().map(|id| id.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AssetIds {
    fn from(ids: [&str; N]) -> Self {
        Self(ids.iter().map(|id| id.to_string()).collect())
    }
}

/// Native token definition used by `pay_native`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeToken {
    pub symbol: String,
    pub precision: u8,
    pub contract: String,
}

impl Default for NativeToken {
    fn default() -> Self {
        Self::from(&NativeTokenConfig::default())
    }
}

impl From<&NativeTokenConfig> for NativeToken {
    fn from(config: &NativeTokenConfig) -> Self {
        Self {
            symbol: config.symbol.clone(),
            precision: config.precision,
            contract: config.contract.clone(),
        }
    }
}

/// Builds authorized actions for a single identity.
#[derive(Debug, Clone)]
pub struct ActionBuilder {
    identity: Arc<Identity>,
    assets_contract: String,
    native: NativeToken,
    max_actions: usize,
}

impl ActionBuilder {
    /// Builder with the default assets contract and native token.
    pub fn new(identity: Arc<Identity>) -> Self {
        Self {
            identity,
            assets_contract: DEFAULT_ASSETS_CONTRACT.to_string(),
            native: NativeToken::default(),
            max_actions: DEFAULT_MAX_ACTIONS,
        }
    }

    pub fn with_assets_contract(mut self, contract: impl Into<String>) -> Self {
        self.assets_contract = contract.into();
        self
    }

    pub fn with_native_token(mut self, native: NativeToken) -> Self {
        self.native = native;
        self
    }

    pub fn with_max_actions(mut self, max_actions: usize) -> Self {
        self.max_actions = max_actions;
        self
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn native_token(&self) -> &NativeToken {
        &self.native
    }

    pub fn max_actions(&self) -> usize {
        self.max_actions
    }

    /// One `transfer` carrying every asset id, in order.
    pub fn transfer_assets(
        &self,
        asset_ids: &[String],
        recipient: &str,
        memo: Option<&str>,
    ) -> DispatchOutcome<Vec<Action>> {
        if asset_ids.is_empty() {
            return Err(DispatchError::InvalidInput(
                "at least one asset id is required".to_string(),
            ));
        }
        ensure_asset_ids(asset_ids)?;
        ensure_name("recipient", recipient)?;

        let data = ActionData::TransferAssets(TransferAssets {
            from: self.identity.address().to_string(),
            to: recipient.to_string(),
            asset_ids: asset_ids.to_vec(),
            memo: memo.unwrap_or_default().to_string(),
        });

        Ok(vec![Action::new(&self.identity, &self.assets_contract, "transfer", data)])
    }

    /// One `burnasset` per id, in input order.
    ///
    /// An empty list yields no actions; the submitter rejects it as an empty batch.
    pub fn burn_assets(&self, asset_ids: impl Into<AssetIds>) -> DispatchOutcome<Vec<Action>> {
        let asset_ids = asset_ids.into();
        self.ensure_batch_size(asset_ids.len())?;
        ensure_asset_ids(asset_ids.as_slice())?;

        let actions = asset_ids
            .into_vec()
            .into_iter()
            .map(|asset_id| {
                let data = ActionData::BurnAsset(BurnAsset {
                    asset_owner: self.identity.address().to_string(),
                    asset_id,
                });
                Action::new(&self.identity, &self.assets_contract, "burnasset", data)
            })
            .collect();

        Ok(actions)
    }

    /// `amount` independent `mintasset` actions for one template.
    ///
    /// `amount` is checked against the action cap before anything is allocated.
    pub fn mint_from_template(
        &self,
        collection: &str,
        schema: &str,
        template_id: i32,
        recipient: &str,
        amount: u32,
    ) -> DispatchOutcome<Vec<Action>> {
        if amount < 1 {
            return Err(DispatchError::InvalidInput(
                "mint amount must be at least 1".to_string(),
            ));
        }
        self.ensure_batch_size(amount as usize)?;
        if template_id < 0 {
            return Err(DispatchError::InvalidInput(format!(
                "template id {} must not be negative",
                template_id
            )));
        }
        ensure_name("collection", collection)?;
        ensure_name("schema", schema)?;
        ensure_name("recipient", recipient)?;

        let actions = (0..amount)
            .map(|_| {
                let data = ActionData::MintAsset(MintAsset {
                    authorized_minter: self.identity.address().to_string(),
                    collection_name: collection.to_string(),
                    schema_name: schema.to_string(),
                    template_id,
                    new_asset_owner: recipient.to_string(),
                    immutable_data: Vec::new(),
                    mutable_data: Vec::new(),
                    tokens_to_back: Vec::new(),
                });
                Action::new(&self.identity, &self.assets_contract, "mintasset", data)
            })
            .collect();

        Ok(actions)
    }

    /// Native token transfer at the chain's fixed precision.
    pub fn pay_native(
        &self,
        quantity: Decimal,
        recipient: &str,
        memo: Option<&str>,
    ) -> DispatchOutcome<Vec<Action>> {
        let quantity = ensure_quantity(quantity)?;
        ensure_name("recipient", recipient)?;

        let formatted = format_fixed(quantity, self.native.precision, &self.native.symbol);
        Ok(vec![self.token_transfer(&self.native.contract, formatted, recipient, memo)])
    }

    /// Arbitrary fungible token transfer.
    ///
    /// The quantity is written with its own scale, so `1.0000` stays
    /// `1.0000 TLM` and matches the symbol precision the caller intended.
    pub fn pay_token(
        &self,
        quantity: Decimal,
        ticker: &str,
        token_contract: &str,
        recipient: &str,
        memo: Option<&str>,
    ) -> DispatchOutcome<Vec<Action>> {
        let quantity = ensure_quantity(quantity)?;
        if !is_valid_symbol(ticker) {
            return Err(DispatchError::InvalidInput(format!(
                "ticker '{}' must be 1-7 uppercase letters",
                ticker
            )));
        }
        ensure_name("token contract", token_contract)?;
        ensure_name("recipient", recipient)?;

        let formatted = format!("{} {}", quantity, ticker);
        Ok(vec![self.token_transfer(token_contract, formatted, recipient, memo)])
    }

    fn ensure_batch_size(&self, count: usize) -> DispatchOutcome<()> {
        if count > self.max_actions {
            return Err(DispatchError::InvalidInput(format!(
                "{} actions exceed the limit of {} per transaction",
                count, self.max_actions
            )));
        }
        Ok(())
    }

    fn token_transfer(
        &self,
        contract: &str,
        quantity: String,
        recipient: &str,
        memo: Option<&str>,
    ) -> Action {
        let data = ActionData::TokenTransfer(TokenTransfer {
            from: self.identity.address().to_string(),
            to: recipient.to_string(),
            quantity,
            memo: memo.unwrap_or_default().to_string(),
        });
        Action::new(&self.identity, contract, "transfer", data)
    }
}

/// Format `quantity` with exactly `precision` fractional digits, rounding
/// half away from zero.
pub fn format_fixed(quantity: Decimal, precision: u8, symbol: &str) -> String {
    let rounded =
        quantity.round_dp_with_strategy(precision as u32, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*} {}", precision as usize, rounded, symbol)
}

fn ensure_quantity(quantity: Decimal) -> DispatchOutcome<Decimal> {
    let mut quantity = quantity;
    if quantity.is_sign_negative() {
        if !quantity.is_zero() {
            return Err(DispatchError::InvalidInput(format!(
                "quantity {} must not be negative",
                quantity
            )));
        }
        // "-0.00" would otherwise print with its sign.
        quantity.set_sign_positive(true);
    }
    Ok(quantity)
}

fn is_numeric_id(id: &str) -> bool {
    id.bytes().all(|b| b.is_ascii_digit()) && id.parse::<u64>().is_ok()
}

fn ensure_asset_ids(asset_ids: &[String]) -> DispatchOutcome<()> {
    match asset_ids.iter().find(|id| !is_numeric_id(id)) {
        Some(bad) => Err(DispatchError::InvalidInput(format!(
            "asset id '{}' is not a valid numeric id",
            bad
        ))),
        None => Ok(()),
    }
}
