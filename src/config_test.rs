use std::collections::HashMap;

use super::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn room_url_is_required() {
    assert_eq!(SessionConfig::from_lookup(lookup(&[])), Err(ConfigError::Missing { var: "ROOM_URL" }));
    assert_eq!(
        SessionConfig::from_lookup(lookup(&[("ROOM_URL", "   ")])),
        Err(ConfigError::Missing { var: "ROOM_URL" })
    );
}

#[test]
fn defaults_apply_when_only_room_is_set() {
    let cfg = SessionConfig::from_lookup(lookup(&[("ROOM_URL", "https://rooms.test/abc")])).unwrap();
    assert_eq!(cfg.room_url, "https://rooms.test/abc");
    assert_eq!(cfg.display_name, DEFAULT_DISPLAY_NAME);
    assert_eq!(cfg.celebration_window, Duration::from_millis(DEFAULT_CELEBRATION_MS));
    assert!(cfg.directory.is_none());
    assert!(cfg.wallet.is_none());
    assert!(!cfg.peer_id.is_nil());
}

#[test]
fn explicit_values_are_used() {
    let id = Uuid::new_v4();
    let id_text = id.to_string();
    let cfg = SessionConfig::from_lookup(lookup(&[
        ("ROOM_URL", "https://rooms.test/abc"),
        ("DISPLAY_NAME", " Alice "),
        ("PEER_ID", &id_text),
        ("CELEBRATION_MS", "250"),
        ("PEERS_URL", "https://db.test"),
        ("PEERS_API_KEY", "anon"),
        ("WALLET_RPC_URL", "http://127.0.0.1:8545"),
        ("CHAIN_ID", "97"),
    ]))
    .unwrap();

    assert_eq!(cfg.display_name, "Alice");
    assert_eq!(cfg.peer_id, id);
    assert_eq!(cfg.celebration_window, Duration::from_millis(250));
    assert_eq!(
        cfg.directory,
        Some(DirectoryConfig { base_url: "https://db.test".into(), api_key: "anon".into() })
    );
    assert_eq!(
        cfg.wallet,
        Some(WalletConfig {
            rpc_url: "http://127.0.0.1:8545".into(),
            token_contract: DEFAULT_TOKEN_CONTRACT.into(),
            chain_id: 97,
        })
    );
}

#[test]
fn invalid_numbers_and_ids_are_rejected() {
    let err = SessionConfig::from_lookup(lookup(&[("ROOM_URL", "r"), ("CELEBRATION_MS", "soon")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "CELEBRATION_MS", value: "soon".into() });

    let err = SessionConfig::from_lookup(lookup(&[("ROOM_URL", "r"), ("PEER_ID", "not-a-uuid")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "PEER_ID", .. }));

    let err = SessionConfig::from_lookup(lookup(&[("ROOM_URL", "r"), ("WALLET_RPC_URL", "x"), ("CHAIN_ID", "bsc")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "CHAIN_ID", .. }));
}

#[test]
fn chain_id_is_ignored_without_wallet() {
    let cfg = SessionConfig::from_lookup(lookup(&[("ROOM_URL", "r"), ("CHAIN_ID", "bsc")])).unwrap();
    assert!(cfg.wallet.is_none());
}

#[test]
fn peers_url_without_key_is_an_error() {
    let err = SessionConfig::from_lookup(lookup(&[("ROOM_URL", "r"), ("PEERS_URL", "https://db.test")])).unwrap_err();
    assert_eq!(err, ConfigError::Missing { var: "PEERS_API_KEY" });
}
