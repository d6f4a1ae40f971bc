//! `hedera-token` attributes over `/tokens/{id}`, plus the `nft[serial]`
//! family over `/tokens/{id}/nfts/{serial}`.
//!
//! Supply amounts are scaled by the token document's own `decimals`.

use crate::coerce::Coercion::*;
use crate::kind::{AttributeSpec as A, EntityDescriptor, EntityKind, FamilySource, FamilyTable, IdSyntax};
use crate::tables::NONE;

pub static TOKEN: EntityDescriptor = EntityDescriptor {
    kind: EntityKind::Token,
    prefix: "hedera-token",
    path_template: "/tokens/{id}",
    document_root: None,
    id_syntax: IdSyntax::Entity,
    attributes: ATTRIBUTES,
    families: FAMILIES,
};

const ATTRIBUTES: &[A] = &[
    A::new("tokenId", "token_id", Text),
    A::new("name", "name", Text),
    A::new("symbol", "symbol", Text),
    A::new("type", "type", Text),
    A::new("decimals", "decimals", Text),
    A::new("supplyType", "supply_type", Text),
    A::new("treasuryAccountId", "treasury_account_id", Text),
    A::new("tokenMemo", "memo", Text),
    A::new("pauseStatus", "pause_status", Text),
    A::new("totalSupply", "total_supply", Scaled),
    A::new("initialSupply", "initial_supply", Scaled),
    A::new("maxSupply", "max_supply", Scaled),
    A::new("rawTotalSupply", "total_supply", Text),
    A::new("isDeleted", "deleted", Bool),
    A::new("freezeDefault", "freeze_default", Bool),
    A::new("createdTimestamp", "created_timestamp", Timestamp),
    A::new("modifiedTimestamp", "modified_timestamp", Timestamp),
    A::new("expiryTimestamp", "expiry_timestamp", Nanos).or(NONE),
    A::new("autoRenewPeriod", "auto_renew_period", Days).or(NONE),
    A::new("autoRenewAccount", "auto_renew_account", Text).or(NONE),
    A::new("adminKey", "admin_key.key", Text).or(NONE),
    A::new("kycKey", "kyc_key.key", Text).or(NONE),
    A::new("freezeKey", "freeze_key.key", Text).or(NONE),
    A::new("wipeKey", "wipe_key.key", Text).or(NONE),
    A::new("supplyKey", "supply_key.key", Text).or(NONE),
    A::new("pauseKey", "pause_key.key", Text).or(NONE),
    A::new("feeScheduleKey", "fee_schedule_key.key", Text).or(NONE),
    A::new("metadata", "metadata", Base64).or(NONE),
    A::new("customFees", "custom_fees", Json),
    A::new("customFees.fixedFees", "custom_fees.fixed_fees", Json).or(NONE),
    A::new("customFees.fractionalFees", "custom_fees.fractional_fees", Json).or(NONE),
    A::new("customFees.royaltyFees", "custom_fees.royalty_fees", Json).or(NONE),
];

const NFT_ATTRIBUTES: &[A] = &[
    A::new("accountId", "account_id", Text),
    A::new("serialNumber", "serial_number", Text),
    A::new("tokenId", "token_id", Text),
    A::new("metadata", "metadata", Base64),
    A::new("createdTimestamp", "created_timestamp", Timestamp),
    A::new("modifiedTimestamp", "modified_timestamp", Timestamp),
    A::new("isDeleted", "deleted", Bool),
    A::new("spender", "spender", Text).or(NONE),
    A::new("delegatingSpender", "delegating_spender", Text).or(NONE),
];

const FAMILIES: &[FamilyTable] = &[FamilyTable {
    marker: "nft",
    secondary: IdSyntax::Positive,
    source: FamilySource::Document {
        path_template: "/tokens/{id}/nfts/{secondary}",
        attributes: NFT_ATTRIBUTES,
    },
}];
