use super::*;

fn config() -> WalletConfig {
    WalletConfig {
        rpc_url: "http://127.0.0.1:8545".to_owned(),
        token_contract: DEFAULT_TOKEN_CONTRACT.to_owned(),
        chain_id: DEFAULT_CHAIN_ID,
    }
}

#[test]
fn parse_rpc_response_returns_result() {
    let value = parse_rpc_response(r#"{"jsonrpc":"2.0","id":1,"result":"0x38"}"#).unwrap();
    assert_eq!(value, json!("0x38"));
}

#[test]
fn parse_rpc_response_surfaces_error_object() {
    let err = parse_rpc_response(r#"{"jsonrpc":"2.0","id":1,"error":{"code":4001,"message":"User denied"}}"#)
        .expect_err("should fail");
    assert!(matches!(err, WalletError::Rpc { code: 4001, ref message } if message == "User denied"));
}

#[test]
fn parse_rpc_response_ignores_null_error() {
    let value = parse_rpc_response(r#"{"jsonrpc":"2.0","id":1,"error":null,"result":[]}"#).unwrap();
    assert_eq!(value, json!([]));
}

#[test]
fn parse_rpc_response_rejects_missing_result() {
    let err = parse_rpc_response(r#"{"jsonrpc":"2.0","id":1}"#).expect_err("should fail");
    assert!(matches!(err, WalletError::Parse(_)));
}

#[test]
fn parse_rpc_response_rejects_non_json() {
    let err = parse_rpc_response("<html>bad gateway</html>").expect_err("should fail");
    assert!(matches!(err, WalletError::Parse(_)));
}

#[test]
fn new_accepts_default_config() {
    assert!(JsonRpcWallet::new(&config()).is_ok());
}

#[test]
fn new_rejects_bad_token_contract() {
    let cfg = WalletConfig { token_contract: "usdt".to_owned(), ..config() };
    assert!(matches!(JsonRpcWallet::new(&cfg), Err(WalletError::InvalidAddress(_))));
}

#[tokio::test]
async fn send_transfer_rejects_bad_recipient_before_any_request() {
    let wallet = JsonRpcWallet::new(&config()).unwrap();
    let amount = Amount::parse("5").unwrap();
    let err = wallet.send_transfer("bob", &amount).await.expect_err("should fail");
    assert!(matches!(err, WalletError::InvalidAddress(_)));
}
