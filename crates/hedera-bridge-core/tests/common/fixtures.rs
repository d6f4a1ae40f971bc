//! Mirror documents trimmed from real testnet responses.

use serde_json::{json, Value};

pub fn account(id: &str, tokens: Value) -> Value {
    json!({
        "account": id,
        "alias": null,
        "auto_renew_period": 7776000,
        "balance": {
            "balance": 250000000,
            "timestamp": "1700000000.000000000",
            "tokens": tokens
        },
        "created_timestamp": "1690000000.123456789",
        "decline_reward": false,
        "deleted": false,
        "ethereum_nonce": 0,
        "evm_address": "0x00000000000000000000000000000000000003e9",
        "expiry_timestamp": null,
        "key": {"_type": "ED25519", "key": "4a5ad514f0957fa170a676210c9bdbddf3bc9519702cf915fa6767a40463b96f"},
        "max_automatic_token_associations": 0,
        "memo": "treasury",
        "pending_reward": 12345,
        "receiver_sig_required": false,
        "staked_account_id": null,
        "staked_node_id": null,
        "stake_period_start": null,
        "transactions": []
    })
}

pub fn token(id: &str, decimals: &str) -> Value {
    json!({
        "token_id": id,
        "name": "Bridge Token",
        "symbol": "BRG",
        "type": "FUNGIBLE_COMMON",
        "decimals": decimals,
        "total_supply": "1234",
        "initial_supply": "1000",
        "max_supply": "0",
        "supply_type": "INFINITE",
        "treasury_account_id": "0.0.1001",
        "memo": "",
        "pause_status": "NOT_APPLICABLE",
        "deleted": false,
        "freeze_default": false,
        "created_timestamp": "1690000000.000000000",
        "modified_timestamp": "1690000000.000000000",
        "expiry_timestamp": 1697776000000000000u64,
        "auto_renew_period": 7776000,
        "auto_renew_account": "0.0.1001",
        "admin_key": {"_type": "ED25519", "key": "abcd"},
        "kyc_key": null,
        "freeze_key": null,
        "wipe_key": null,
        "supply_key": {"_type": "ED25519", "key": "ef01"},
        "pause_key": null,
        "fee_schedule_key": null,
        "metadata": "",
        "custom_fees": {
            "created_timestamp": "1690000000.000000000",
            "fixed_fees": [{"amount": 5, "collector_account_id": "0.0.1001"}],
            "fractional_fees": []
        }
    })
}

pub fn topic_message(topic: &str, sequence: u64, base64: &str) -> Value {
    json!({
        "chunk_info": null,
        "consensus_timestamp": "1700000000.000000005",
        "message": base64,
        "payer_account_id": "0.0.1001",
        "running_hash": "cafe",
        "running_hash_version": 3,
        "sequence_number": sequence,
        "topic_id": topic
    })
}

pub fn schedule(id: &str, executed: bool, deleted: bool) -> Value {
    json!({
        "schedule_id": id,
        "creator_account_id": "0.0.1001",
        "payer_account_id": "0.0.1001",
        "memo": "payroll",
        "deleted": deleted,
        "wait_for_expiry": false,
        "consensus_timestamp": "1700000000.000000000",
        "executed_timestamp": if executed { json!("1700000100.000000000") } else { Value::Null },
        "expiration_time": null,
        "admin_key": null,
        "signatures": [],
        "transaction_body": "CgQQBxgC"
    })
}

pub fn not_found() -> Value {
    json!({"_status": {"messages": [{"message": "Not found"}]}})
}
