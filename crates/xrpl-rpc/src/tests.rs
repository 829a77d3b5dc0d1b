//! Tests for the JSON-RPC client and reliable submission.

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::method;
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};
use xrpl_primitives::{ClassicAddress, Seed};

use crate::client::JsonRpcClient;
use crate::error::RpcError;
use crate::types::{RpcConfig, SignResponse, SignedTransaction};

const ADDRESS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
const SEED: &str = "sEdSKaCy2JT7JaM7v95H9SxkhP9wS2r";
const HASH: &str = "E08D6E9754025BA2534A78707605E0601F03ACE063687A0CA1BDDACFCD1698C7";

/// Matches a JSON-RPC call by method name and, optionally, one params field.
struct RpcCall {
    method: &'static str,
    param: Option<(&'static str, Value)>,
}

fn rpc(method: &'static str) -> RpcCall {
    RpcCall {
        method,
        param: None,
    }
}

fn rpc_with(method: &'static str, key: &'static str, value: Value) -> RpcCall {
    RpcCall {
        method,
        param: Some((key, value)),
    }
}

impl Match for RpcCall {
    fn matches(&self, request: &Request) -> bool {
        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return false;
        };
        if body["method"] != self.method {
            return false;
        }
        let params = &body["params"][0];
        match &self.param {
            Some((key, value)) => &params[*key] == value,
            // A bare `ledger` call must not swallow the validated-ledger lookup.
            None if self.method == "ledger" => params.get("ledger_index").is_none(),
            None => true,
        }
    }
}

fn result(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "result": body }))
}

fn test_client(server: &MockServer) -> JsonRpcClient {
    JsonRpcClient::new(RpcConfig {
        url: server.uri(),
        poll_interval: Duration::from_millis(5),
    })
}

fn signed_tx(last_ledger_sequence: u32) -> SignedTransaction {
    SignedTransaction {
        tx_blob: "1200142200000000".to_string(),
        hash: HASH.to_string(),
        last_ledger_sequence,
        tx_json: json!({}),
    }
}

async fn mount_validated_ledger(server: &MockServer, index: u32) {
    Mock::given(method("POST"))
        .and(rpc_with("ledger", "ledger_index", json!("validated")))
        .respond_with(result(json!({
            "ledger_index": index,
            "validated": true,
            "status": "success"
        })))
        .mount(server)
        .await;
}

async fn mount_submit(server: &MockServer, engine_result: &str) {
    Mock::given(method("POST"))
        .and(rpc("submit"))
        .respond_with(result(json!({
            "engine_result": engine_result,
            "engine_result_code": 0,
            "engine_result_message": "engine message",
            "accepted": true,
            "status": "success"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[test]
fn test_config_defaults() {
    let config = RpcConfig::default();
    assert_eq!(config.url, "https://s.altnet.rippletest.net:51234/");
    assert_eq!(config.poll_interval, Duration::from_secs(1));
}

#[tokio::test]
async fn test_ledger_reads_closed_section() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(rpc("ledger"))
        .respond_with(result(json!({
            "closed": { "ledger": { "ledger_index": 100, "closed": true } },
            "open": { "ledger": { "ledger_index": "101", "closed": false } },
            "status": "success"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp = client.ledger().await.unwrap();

    assert_eq!(resp.closed_ledger_index(), Some(100));
    let open = resp.open.and_then(|s| s.ledger).and_then(|l| l.ledger_index);
    assert_eq!(open, Some(101));
}

#[tokio::test]
async fn test_ledger_index_as_string() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(rpc("ledger"))
        .respond_with(result(json!({
            "closed": { "ledger": { "ledger_index": "4321" } },
            "status": "success"
        })))
        .mount(&server)
        .await;

    let resp = test_client(&server).ledger().await.unwrap();
    assert_eq!(resp.closed_ledger_index(), Some(4321));
}

#[tokio::test]
async fn test_ledger_falls_back_to_top_level_index() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(rpc("ledger"))
        .respond_with(result(json!({
            "ledger": { "ledger_hash": "ABC" },
            "ledger_index": 77,
            "status": "success"
        })))
        .mount(&server)
        .await;

    let resp = test_client(&server).ledger().await.unwrap();
    assert_eq!(resp.closed_ledger_index(), Some(77));
}

#[tokio::test]
async fn test_account_info_sequence() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(rpc_with("account_info", "account", json!(ADDRESS)))
        .respond_with(result(json!({
            "account_data": {
                "Account": ADDRESS,
                "Balance": "99999999999",
                "Sequence": 5,
                "OwnerCount": 0,
                "Flags": 0
            },
            "ledger_current_index": 101,
            "validated": false,
            "status": "success"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let address: ClassicAddress = ADDRESS.parse().unwrap();
    let resp = test_client(&server).account_info(&address).await.unwrap();

    assert_eq!(resp.account_data.sequence, 5);
    assert_eq!(resp.account_data.balance.as_deref(), Some("99999999999"));
    assert_eq!(resp.ledger_current_index, Some(101));
}

#[tokio::test]
async fn test_account_info_missing_sequence_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(rpc("account_info"))
        .respond_with(result(json!({
            "account_data": { "Account": ADDRESS },
            "status": "success"
        })))
        .mount(&server)
        .await;

    let address: ClassicAddress = ADDRESS.parse().unwrap();
    let err = test_client(&server).account_info(&address).await.unwrap_err();
    assert!(matches!(err, RpcError::SerializationError(_)));
}

#[tokio::test]
async fn test_node_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(rpc("account_info"))
        .respond_with(result(json!({
            "error": "actNotFound",
            "error_code": 19,
            "error_message": "Account not found.",
            "status": "error"
        })))
        .mount(&server)
        .await;

    let address: ClassicAddress = ADDRESS.parse().unwrap();
    let err = test_client(&server).account_info(&address).await.unwrap_err();

    assert!(err.is_node_error("actNotFound"));
    match err {
        RpcError::Node { code, message, .. } => {
            assert_eq!(code, Some(19));
            assert_eq!(message, "Account not found.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_fee_base_fee() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(rpc("fee"))
        .respond_with(result(json!({
            "current_ledger_size": "14",
            "drops": {
                "base_fee": "10",
                "median_fee": "11000",
                "minimum_fee": "10",
                "open_ledger_fee": "10"
            },
            "ledger_current_index": 26575101,
            "status": "success"
        })))
        .mount(&server)
        .await;

    let resp = test_client(&server).fee().await.unwrap();
    assert_eq!(resp.drops.base_fee, "10");
    assert_eq!(resp.drops.median_fee.as_deref(), Some("11000"));
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = test_client(&server).fee().await.unwrap_err();
    match err {
        RpcError::ServerError {
            status_code,
            message,
        } => {
            assert_eq!(status_code, 503);
            assert_eq!(message, "overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_result_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .mount(&server)
        .await;

    let err = test_client(&server).fee().await.unwrap_err();
    assert!(matches!(err, RpcError::MissingField("result")));
}

#[tokio::test]
async fn test_sign_sends_seed_and_key_type_offline() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(rpc_with("sign", "key_type", json!("ed25519")))
        .and(rpc_with("sign", "seed", json!(SEED)))
        .and(rpc_with("sign", "offline", json!(true)))
        .respond_with(result(json!({
            "tx_blob": "12001422",
            "tx_json": {
                "TransactionType": "TrustSet",
                "LastLedgerSequence": 110,
                "hash": HASH
            },
            "status": "success"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let seed: Seed = SEED.parse().unwrap();
    let tx_json = json!({ "TransactionType": "TrustSet", "LastLedgerSequence": 110 });
    let signed = test_client(&server)
        .sign(&tx_json, &seed)
        .await
        .unwrap()
        .into_signed()
        .unwrap();

    assert_eq!(signed.tx_blob, "12001422");
    assert_eq!(signed.hash, HASH);
    assert_eq!(signed.last_ledger_sequence, 110);
}

#[test]
fn test_sign_response_without_hash() {
    let resp = SignResponse {
        tx_blob: "00".to_string(),
        tx_json: json!({ "LastLedgerSequence": 110 }),
    };
    assert!(matches!(
        resp.into_signed(),
        Err(RpcError::MissingField("tx_json.hash"))
    ));
}

#[tokio::test]
async fn test_wallet_propose() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(rpc_with("wallet_propose", "seed", json!(SEED)))
        .respond_with(result(json!({
            "account_id": ADDRESS,
            "key_type": "ed25519",
            "public_key_hex": "ED0123",
            "status": "success"
        })))
        .mount(&server)
        .await;

    let seed: Seed = SEED.parse().unwrap();
    let resp = test_client(&server).wallet_propose(&seed).await.unwrap();
    assert_eq!(resp.account_id, ADDRESS);
    assert_eq!(resp.public_key_hex.as_deref(), Some("ED0123"));
}

#[tokio::test]
async fn test_submit_and_wait_validated_success() {
    let server = MockServer::start().await;

    mount_submit(&server, "tesSUCCESS").await;
    mount_validated_ledger(&server, 105).await;

    // First poll: not in a ledger yet.
    Mock::given(method("POST"))
        .and(rpc_with("tx", "transaction", json!(HASH)))
        .respond_with(result(json!({
            "error": "txnNotFound",
            "status": "error"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(rpc_with("tx", "transaction", json!(HASH)))
        .respond_with(result(json!({
            "hash": HASH,
            "ledger_index": 106,
            "validated": true,
            "meta": { "TransactionResult": "tesSUCCESS", "TransactionIndex": 0 },
            "TransactionType": "TrustSet",
            "status": "success"
        })))
        .mount(&server)
        .await;

    let resp = test_client(&server)
        .submit_and_wait(&signed_tx(110))
        .await
        .unwrap();

    assert!(resp.validated);
    assert_eq!(resp.ledger_index, Some(106));
    assert_eq!(resp.transaction_result(), Some("tesSUCCESS"));
    assert_eq!(resp.extra["TransactionType"], "TrustSet");
}

#[tokio::test]
async fn test_submit_and_wait_keeps_polling_unvalidated() {
    let server = MockServer::start().await;

    mount_submit(&server, "terQUEUED").await;
    mount_validated_ledger(&server, 100).await;

    Mock::given(method("POST"))
        .and(rpc("tx"))
        .respond_with(result(json!({
            "hash": HASH,
            "validated": false,
            "status": "success"
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(rpc("tx"))
        .respond_with(result(json!({
            "hash": HASH,
            "ledger_index": 102,
            "validated": true,
            "meta": { "TransactionResult": "tesSUCCESS" },
            "status": "success"
        })))
        .mount(&server)
        .await;

    let resp = test_client(&server)
        .submit_and_wait(&signed_tx(110))
        .await
        .unwrap();
    assert_eq!(resp.ledger_index, Some(102));
}

#[tokio::test]
async fn test_submit_and_wait_malformed() {
    let server = MockServer::start().await;

    mount_submit(&server, "temBAD_FEE").await;

    Mock::given(method("POST"))
        .and(rpc("tx"))
        .respond_with(result(json!({ "status": "success" })))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .submit_and_wait(&signed_tx(110))
        .await
        .unwrap_err();

    match err {
        RpcError::Malformed { engine_result, .. } => assert_eq!(engine_result, "temBAD_FEE"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_and_wait_failed_result() {
    let server = MockServer::start().await;

    mount_submit(&server, "tesSUCCESS").await;
    mount_validated_ledger(&server, 105).await;

    Mock::given(method("POST"))
        .and(rpc("tx"))
        .respond_with(result(json!({
            "hash": HASH,
            "ledger_index": 106,
            "validated": true,
            "meta": { "TransactionResult": "tecPATH_DRY" },
            "status": "success"
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .submit_and_wait(&signed_tx(110))
        .await
        .unwrap_err();

    match err {
        RpcError::Failed { hash, result } => {
            assert_eq!(hash, HASH);
            assert_eq!(result, "tecPATH_DRY");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_and_wait_expired() {
    let server = MockServer::start().await;

    mount_submit(&server, "tesSUCCESS").await;
    mount_validated_ledger(&server, 111).await;

    // One lookup before the ledger check and one after the bound has passed.
    Mock::given(method("POST"))
        .and(rpc("tx"))
        .respond_with(result(json!({ "error": "txnNotFound", "status": "error" })))
        .expect(2)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .submit_and_wait(&signed_tx(110))
        .await
        .unwrap_err();

    match err {
        RpcError::Expired {
            last_ledger_sequence,
            validated_ledger,
            ..
        } => {
            assert_eq!(last_ledger_sequence, 110);
            assert_eq!(validated_ledger, 111);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_and_wait_validated_in_last_ledger() {
    let server = MockServer::start().await;

    mount_submit(&server, "tesSUCCESS").await;
    mount_validated_ledger(&server, 111).await;

    Mock::given(method("POST"))
        .and(rpc("tx"))
        .respond_with(result(json!({
            "hash": HASH,
            "ledger_index": 110,
            "validated": true,
            "meta": { "TransactionResult": "tesSUCCESS" },
            "status": "success"
        })))
        .mount(&server)
        .await;

    let resp = test_client(&server)
        .submit_and_wait(&signed_tx(110))
        .await
        .unwrap();
    assert_eq!(resp.ledger_index, Some(110));
    assert_eq!(resp.transaction_result(), Some("tesSUCCESS"));
}

#[tokio::test]
async fn test_submit_and_wait_validated_after_bound_check() {
    let server = MockServer::start().await;

    mount_submit(&server, "tesSUCCESS").await;
    mount_validated_ledger(&server, 111).await;

    // Still pending on the first lookup, validated by the re-check.
    Mock::given(method("POST"))
        .and(rpc("tx"))
        .respond_with(result(json!({ "hash": HASH, "validated": false, "status": "success" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(rpc("tx"))
        .respond_with(result(json!({
            "hash": HASH,
            "ledger_index": 110,
            "validated": true,
            "meta": { "TransactionResult": "tesSUCCESS" },
            "status": "success"
        })))
        .mount(&server)
        .await;

    let resp = test_client(&server)
        .submit_and_wait(&signed_tx(110))
        .await
        .unwrap();
    assert_eq!(resp.ledger_index, Some(110));
}

#[tokio::test]
async fn test_submit_and_wait_propagates_other_node_errors() {
    let server = MockServer::start().await;

    mount_submit(&server, "tesSUCCESS").await;
    mount_validated_ledger(&server, 100).await;

    Mock::given(method("POST"))
        .and(rpc("tx"))
        .respond_with(result(json!({ "error": "tooBusy", "status": "error" })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .submit_and_wait(&signed_tx(110))
        .await
        .unwrap_err();
    assert!(err.is_node_error("tooBusy"));
}
