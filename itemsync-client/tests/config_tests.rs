use itemsync_client::{ClientConfig, ClientError, Credentials};
use pretty_assertions::assert_eq;
use serial_test::serial;

const VARS: [&str; 7] = [
    "ZABBIX_URL",
    "ZABBIX_SERVER_URL",
    "ZABBIX_USER",
    "ZABBIX_USERNAME",
    "ZABBIX_PASS",
    "ZABBIX_PASSWORD",
    "ZABBIX_TOKEN",
];

fn clear_env() {
    for var in VARS {
        unsafe { std::env::remove_var(var) };
    }
}

fn set_env(pairs: &[(&str, &str)]) {
    clear_env();
    for (key, value) in pairs {
        unsafe { std::env::set_var(key, value) };
    }
}

// ── Environment ─────────────────────────────────────────────────

#[test]
#[serial]
fn from_env_reads_primary_names() {
    set_env(&[
        ("ZABBIX_URL", "https://zbx.local/api_jsonrpc.php"),
        ("ZABBIX_USER", "Admin"),
        ("ZABBIX_PASS", "zabbix"),
    ]);

    let config = ClientConfig::from_env();
    assert_eq!(config.url, "https://zbx.local/api_jsonrpc.php");
    assert_eq!(config.username.as_deref(), Some("Admin"));
    assert_eq!(config.password.as_deref(), Some("zabbix"));
    assert_eq!(config.token, None);
    clear_env();
}

#[test]
#[serial]
fn from_env_falls_back_to_alternate_names() {
    set_env(&[
        ("ZABBIX_SERVER_URL", "http://zbx/api_jsonrpc.php"),
        ("ZABBIX_USERNAME", "ops"),
        ("ZABBIX_PASSWORD", "secret"),
    ]);

    let config = ClientConfig::from_env();
    assert_eq!(config.url, "http://zbx/api_jsonrpc.php");
    assert_eq!(config.username.as_deref(), Some("ops"));
    assert_eq!(config.password.as_deref(), Some("secret"));
    clear_env();
}

#[test]
#[serial]
fn from_env_skips_empty_primary() {
    set_env(&[("ZABBIX_URL", "  "), ("ZABBIX_SERVER_URL", "http://fallback")]);
    assert_eq!(ClientConfig::from_env().url, "http://fallback");
    clear_env();
}

#[test]
#[serial]
fn from_env_with_nothing_set() {
    clear_env();
    let config = ClientConfig::from_env();
    assert!(config.url.is_empty());
    assert!(matches!(config.validate(), Err(ClientError::Config(_))));
    assert!(matches!(config.credentials(), Err(ClientError::MissingCredentials)));
}

// ── Credentials ─────────────────────────────────────────────────

#[test]
fn token_wins_over_login() {
    let config = ClientConfig::new("http://z")
        .with_login("Admin", "zabbix")
        .with_token("abc");
    assert_eq!(config.credentials().unwrap(), Credentials::Token("abc".into()));
}

#[test]
fn blank_token_falls_back_to_login() {
    let config = ClientConfig::new("http://z")
        .with_token("")
        .with_login("Admin", "zabbix");
    assert_eq!(
        config.credentials().unwrap(),
        Credentials::Password {
            username: "Admin".into(),
            password: "zabbix".into(),
        }
    );
}

#[test]
fn username_without_password_is_missing() {
    let mut config = ClientConfig::new("http://z");
    config.username = Some("Admin".into());
    assert!(matches!(config.credentials(), Err(ClientError::MissingCredentials)));
}

#[test]
fn debug_redacts_secrets() {
    let config = ClientConfig::new("http://z")
        .with_login("Admin", "hunter2")
        .with_token("tok-123");
    let rendered = format!("{config:?}");
    assert!(rendered.contains("Admin"));
    assert!(!rendered.contains("hunter2"));
    assert!(!rendered.contains("tok-123"));

    let creds = format!("{:?}", Credentials::Token("tok-123".into()));
    assert!(!creds.contains("tok-123"));
}

// ── Validation ──────────────────────────────────────────────────

#[test]
fn validate_accepts_http_and_https() {
    assert!(ClientConfig::new("http://z/api_jsonrpc.php").validate().is_ok());
    assert!(ClientConfig::new("https://z/api_jsonrpc.php").validate().is_ok());
}

#[test]
fn validate_rejects_other_schemes() {
    let err = ClientConfig::new("zabbix.local").validate().unwrap_err();
    assert!(err.to_string().contains("http or https"));
}

#[test]
fn deserializes_with_defaults() {
    let config: ClientConfig =
        serde_json::from_str(r#"{"url": "http://z", "token": "t"}"#).unwrap();
    assert_eq!(config.timeout_secs, 60);
    assert!(!config.serialize);
    assert!(!config.tls_insecure);
}
