//! Transaction tools driven through the harness with a stubbed ledger.

mod common;

use std::sync::Arc;

use common::fixtures;
use common::{operator_config, MockMirror, MockSubmitter, StubFactory};
use hedera_bridge_core::{
    current_plugin, AssociationAction, BridgeError, ErrorKind, ExecutionContext, Harness,
    HbarTransferTool, Outcome, ScheduleSignTool, TokenAssociationTool, TokenTransferTool,
    TopicMessageTool, MESSAGE_CHUNK_SIZE,
};
use hedera_transport::TransactionRequest;
use hedera_types::{AccountRef, BridgeConfig, EntityId};
use serde_json::json;

fn harness(mirror: MockMirror, submitter: MockSubmitter) -> (Harness, Arc<StubFactory>) {
    let factory = Arc::new(StubFactory::with_submitter(mirror, submitter));
    (Harness::new(factory.clone()), factory)
}

fn operator_ctx() -> ExecutionContext {
    ExecutionContext::new(operator_config())
}

fn id(num: u64) -> EntityId {
    EntityId::new(0, 0, num)
}

fn association(account: &str, token: &str, action: AssociationAction) -> TokenAssociationTool {
    TokenAssociationTool {
        account: account.into(),
        token: token.into(),
        action,
    }
}

// =============================================================================
// Happy paths
// =============================================================================

#[test]
fn test_hbar_transfer_submits_tinybars() {
    let submitter = MockSubmitter::default();
    let (harness, factory) = harness(MockMirror::new(), submitter.clone());
    let ctx = operator_ctx();
    let tool = HbarTransferTool {
        sender: "0.0.1001".into(),
        receiver: "0.0.1002".into(),
        amount: "2.5".into(),
        memo: Some("rent".into()),
    };

    let record = harness.execute(&tool, &ctx).completed().unwrap();

    assert_eq!(record.status, "SUCCESS");
    assert_eq!(record.kind, "hbar_transfer");
    assert_eq!(record.network, ctx.config.network);
    assert_eq!(record.transaction_id, "0.0.1001@1700000000.000000001");
    assert_eq!(
        submitter.submitted(),
        vec![TransactionRequest::HbarTransfer {
            sender: id(1001),
            receiver: AccountRef::Id(id(1002)),
            tinybars: 250_000_000,
            memo: Some("rent".into()),
        }]
    );
    assert_eq!(submitter.close_count(), 1);
    // Hbar transfers need no mirror lookups.
    assert_eq!(factory.mirror.total_calls(), 0);
    assert_eq!(current_plugin(), None);
}

#[test]
fn test_token_transfer_scales_by_token_decimals() {
    let submitter = MockSubmitter::default();
    let receiver_tokens = json!([{"token_id": "0.0.50", "balance": 0}]);
    let (harness, factory) = harness(
        MockMirror::new()
            .with("/tokens/0.0.50", fixtures::token("0.0.50", "2"))
            .with("/accounts/0.0.1002", fixtures::account("0.0.1002", receiver_tokens)),
        submitter.clone(),
    );
    let tool = TokenTransferTool {
        token: "0.0.50".into(),
        sender: "0.0.1001".into(),
        receiver: "0.0.1002".into(),
        amount: "12.34".into(),
    };

    let record = harness.execute(&tool, &operator_ctx()).completed().unwrap();

    assert_eq!(record.kind, "token_transfer");
    assert_eq!(
        submitter.submitted(),
        vec![TransactionRequest::TokenTransfer {
            token: id(50),
            sender: id(1001),
            receiver: id(1002),
            amount: 1234,
            decimals: 2,
        }]
    );
    // Decimals are read once; the run step reuses the cached token document.
    assert_eq!(factory.mirror.calls_to("/tokens/0.0.50"), 1);
}

#[test]
fn test_associate_and_dissociate() {
    let tokens = json!([{"token_id": "0.0.60", "balance": 0}]);
    let submitter = MockSubmitter::default();
    let (harness, _) = harness(
        MockMirror::new().with("/accounts/0.0.1001", fixtures::account("0.0.1001", tokens)),
        submitter.clone(),
    );
    let ctx = operator_ctx();

    let associate = association("0.0.1001", "0.0.61", AssociationAction::Associate);
    assert_eq!(harness.execute(&associate, &ctx).completed().unwrap().kind, "token_associate");

    let dissociate = association("0.0.1001", "0.0.60", AssociationAction::Dissociate);
    assert_eq!(harness.execute(&dissociate, &ctx).completed().unwrap().kind, "token_dissociate");

    assert_eq!(
        submitter.submitted(),
        vec![
            TransactionRequest::TokenAssociate { account: id(1001), token: id(61) },
            TransactionRequest::TokenDissociate { account: id(1001), token: id(60) },
        ]
    );
    assert_eq!(submitter.close_count(), 2);
}

#[test]
fn test_topic_message_chunked() {
    let submitter = MockSubmitter::default();
    let (harness, _) = harness(MockMirror::new(), submitter.clone());
    let message = "m".repeat(MESSAGE_CHUNK_SIZE + 1);
    let tool = TopicMessageTool {
        topic: "0.0.777".into(),
        message: message.clone(),
    };

    assert!(harness.execute(&tool, &operator_ctx()).is_completed());
    assert_eq!(tool.chunk_count(), 2);
    assert_eq!(
        submitter.submitted(),
        vec![TransactionRequest::TopicMessageSubmit {
            topic: id(777),
            message: message.into_bytes(),
            chunk_size: MESSAGE_CHUNK_SIZE,
        }]
    );
}

#[test]
fn test_schedule_sign() {
    let submitter = MockSubmitter::default();
    let (harness, _) = harness(
        MockMirror::new().with("/schedules/0.0.88", fixtures::schedule("0.0.88", false, false)),
        submitter.clone(),
    );
    let tool = ScheduleSignTool { schedule: "0.0.88".into() };
    assert_eq!(
        harness.execute(&tool, &operator_ctx()).completed().unwrap().kind,
        "schedule_sign"
    );
    assert_eq!(
        submitter.submitted(),
        vec![TransactionRequest::ScheduleSign { schedule: id(88) }]
    );
}

// =============================================================================
// Prechecks
// =============================================================================

#[test]
fn test_offline_abort_never_acquires_client() {
    let (harness, factory) = harness(MockMirror::new(), MockSubmitter::default());
    let tool = HbarTransferTool {
        sender: "0.0.1001".into(),
        receiver: "0.0.1002".into(),
        amount: "0".into(),
        memo: None,
    };
    assert!(matches!(harness.execute(&tool, &operator_ctx()), Outcome::Aborted(_)));
    assert_eq!(factory.acquisitions(), 0);
}

#[test]
fn test_association_skipped_when_redundant() {
    let tokens = json!([{"token_id": "0.0.60", "balance": 0}]);
    let submitter = MockSubmitter::default();
    let (harness, _) = harness(
        MockMirror::new()
            .with("/accounts/0.0.1001", fixtures::account("0.0.1001", tokens))
            .with("/accounts/0.0.1003", fixtures::not_found()),
        submitter.clone(),
    );
    let ctx = operator_ctx();

    for tool in [
        association("0.0.1001", "0.0.60", AssociationAction::Associate),
        association("0.0.1001", "0.0.61", AssociationAction::Dissociate),
        association("0.0.1003", "0.0.60", AssociationAction::Associate),
    ] {
        match harness.execute(&tool, &ctx) {
            Outcome::Aborted(reason) => assert!(!reason.is_empty()),
            other => panic!("{:?} should abort, got {:?}", tool, other),
        }
    }
    assert!(submitter.submitted().is_empty());
    // Client aborts still release the client.
    assert_eq!(submitter.close_count(), 3);
}

#[test]
fn test_token_transfer_client_aborts() {
    let submitter = MockSubmitter::default();
    let (harness, _) = harness(
        MockMirror::new()
            .with("/tokens/0.0.50", fixtures::token("0.0.50", "2"))
            .with("/tokens/0.0.51", fixtures::not_found())
            .with("/tokens/0.0.52", fixtures::token("0.0.52", "4294967295"))
            .with("/accounts/0.0.1002", fixtures::account("0.0.1002", json!([]))),
        submitter.clone(),
    );
    let ctx = operator_ctx();
    let tool = |token: &str, amount: &str| TokenTransferTool {
        token: token.into(),
        sender: "0.0.1001".into(),
        receiver: "0.0.1002".into(),
        amount: amount.into(),
    };

    let too_precise = harness.execute(&tool("0.0.50", "1.001"), &ctx);
    assert!(matches!(too_precise, Outcome::Aborted(ref r) if r.contains("decimal places")));

    let unassociated = harness.execute(&tool("0.0.50", "1"), &ctx);
    assert!(matches!(unassociated, Outcome::Aborted(ref r) if r.contains("not associated")));

    let missing = harness.execute(&tool("0.0.51", "1"), &ctx);
    assert!(matches!(missing, Outcome::Aborted(ref r) if r.contains("not found")));

    let absurd_scale = harness.execute(&tool("0.0.52", "1"), &ctx);
    assert!(matches!(absurd_scale, Outcome::Aborted(ref r) if r.contains("no usable decimals")));

    assert!(submitter.submitted().is_empty());
}

#[test]
fn test_schedule_already_executed_or_deleted() {
    let (harness, _) = harness(
        MockMirror::new()
            .with("/schedules/0.0.1", fixtures::schedule("0.0.1", true, false))
            .with("/schedules/0.0.2", fixtures::schedule("0.0.2", false, true)),
        MockSubmitter::default(),
    );
    let ctx = operator_ctx();
    for schedule in ["0.0.1", "0.0.2", "0.0.3"] {
        let tool = ScheduleSignTool { schedule: schedule.into() };
        assert!(matches!(harness.execute(&tool, &ctx), Outcome::Aborted(_)), "{}", schedule);
    }
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn test_precheck_rejection_is_classified_and_released() {
    let submitter = MockSubmitter::rejecting("INSUFFICIENT_PAYER_BALANCE");
    let (harness, _) = harness(MockMirror::new(), submitter.clone());
    let tool = TopicMessageTool {
        topic: "0.0.777".into(),
        message: "hi".into(),
    };

    match harness.execute(&tool, &operator_ctx()) {
        Outcome::Failed(BridgeError::PrecheckRejected { status, transaction_id }) => {
            assert_eq!(status, "INSUFFICIENT_PAYER_BALANCE");
            assert_eq!(transaction_id.as_deref(), Some("0.0.1001@1700000000.000000001"));
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(submitter.close_count(), 1);
    assert_eq!(current_plugin(), None);
}

#[test]
fn test_submitter_panic_still_releases() {
    let submitter = MockSubmitter {
        panic_on_submit: true,
        ..MockSubmitter::default()
    };
    let (harness, _) = harness(
        MockMirror::new().with("/schedules/0.0.88", fixtures::schedule("0.0.88", false, false)),
        submitter.clone(),
    );
    let tool = ScheduleSignTool { schedule: "0.0.88".into() };

    match harness.execute(&tool, &operator_ctx()) {
        Outcome::Failed(err) => {
            assert_eq!(err.kind(), ErrorKind::Unclassified);
            assert!(err.to_string().contains("sdk exploded"));
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(submitter.close_count(), 1);
    assert_eq!(current_plugin(), None);
}

#[test]
fn test_malformed_credential_fails_before_submission() {
    let submitter = MockSubmitter::default();
    let (harness, factory) = harness(MockMirror::new(), submitter.clone());
    let ctx = ExecutionContext::new(BridgeConfig {
        operator_key: Some("not-a-key".into()),
        ..operator_config()
    });
    let tool = TopicMessageTool {
        topic: "0.0.777".into(),
        message: "hi".into(),
    };

    match harness.execute(&tool, &ctx) {
        Outcome::Failed(err) => {
            assert_eq!(err.kind(), ErrorKind::MalformedCredential);
            assert!(!err.is_recoverable());
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(factory.acquisitions(), 1);
    assert!(submitter.submitted().is_empty());
    assert_eq!(submitter.close_count(), 0);
}

#[test]
fn test_missing_operator_is_malformed_credential() {
    let (harness, _) = harness(MockMirror::new(), MockSubmitter::default());
    let tool = ScheduleSignTool { schedule: "0.0.88".into() };
    let outcome = harness.execute(&tool, &ExecutionContext::new(BridgeConfig::default()));
    assert!(matches!(outcome, Outcome::Failed(BridgeError::MalformedCredential { .. })));
}
