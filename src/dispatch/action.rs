//! Ledger action descriptors.
//!
//! An `Action` names one operation on one contract, carries its own
//! authorization and a typed payload. Payload field names match the ABI of
//! the target contract so the serialized form can go straight to a signer.

use serde::{Deserialize, Serialize};

use crate::dispatch::identity::Identity;

/// An (actor, permission) pair proving the right to execute an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub actor: String,
    pub permission: String,
}

impl From<&Identity> for Authorization {
    fn from(identity: &Identity) -> Self {
        Self {
            actor: identity.address().to_string(),
            permission: identity.permission().to_string(),
        }
    }
}

/// A single operation against a target contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Target contract account.
    pub account: String,
    /// Action name on that contract.
    pub name: String,
    pub authorization: Vec<Authorization>,
    pub data: ActionData,
}

impl Action {
    /// Build an action authorized solely by `identity`.
    pub fn new(
        identity: &Identity,
        account: impl Into<String>,
        name: impl Into<String>,
        data: ActionData,
    ) -> Self {
        Self {
            account: account.into(),
            name: name.into(),
            authorization: vec![Authorization::from(identity)],
            data,
        }
    }
}

/// Action payloads understood by this dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionData {
    TransferAssets(TransferAssets),
    BurnAsset(BurnAsset),
    MintAsset(MintAsset),
    TokenTransfer(TokenTransfer),
}

/// `atomicassets::transfer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferAssets {
    pub from: String,
    pub to: String,
    pub asset_ids: Vec<String>,
    pub memo: String,
}

/// `atomicassets::burnasset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnAsset {
    pub asset_owner: String,
    pub asset_id: String,
}

/// `atomicassets::mintasset`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintAsset {
    pub authorized_minter: String,
    pub collection_name: String,
    pub schema_name: String,
    pub template_id: i32,
    pub new_asset_owner: String,
    pub immutable_data: Vec<serde_json::Value>,
    pub mutable_data: Vec<serde_json::Value>,
    pub tokens_to_back: Vec<String>,
}

/// `<token contract>::transfer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransfer {
    pub from: String,
    pub to: String,
    /// Asset string, e.g. `1.00000000 WAX`.
    pub quantity: String,
    pub memo: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serializes_with_contract_field_names() {
        let identity = Identity::new("mywallet1234", None).unwrap();
        let action = Action::new(
            &identity,
            "atomicassets",
            "burnasset",
            ActionData::BurnAsset(BurnAsset {
                asset_owner: "mywallet1234".into(),
                asset_id: "1099511627776".into(),
            }),
        );

        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "account": "atomicassets",
                "name": "burnasset",
                "authorization": [{"actor": "mywallet1234", "permission": "active"}],
                "data": {"asset_owner": "mywallet1234", "asset_id": "1099511627776"}
            })
        );
    }

    #[test]
    fn test_mint_payload_has_empty_attribute_lists() {
        let data = ActionData::MintAsset(MintAsset {
            authorized_minter: "mywallet1234".into(),
            collection_name: "pixelgibs123".into(),
            schema_name: "gibs".into(),
            template_id: 42,
            new_asset_owner: "thepixelgibs".into(),
            immutable_data: Vec::new(),
            mutable_data: Vec::new(),
            tokens_to_back: Vec::new(),
        });

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["template_id"], 42);
        assert_eq!(json["immutable_data"], serde_json::json!([]));
        assert_eq!(json["tokens_to_back"], serde_json::json!([]));
    }
}
