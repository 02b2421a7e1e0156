use itemsync_cli::ConnectionArgs;
use serial_test::serial;

fn set_env(pairs: &[(&str, &str)]) {
    for var in [
        "ZABBIX_URL",
        "ZABBIX_SERVER_URL",
        "ZABBIX_USER",
        "ZABBIX_USERNAME",
        "ZABBIX_PASS",
        "ZABBIX_PASSWORD",
        "ZABBIX_TOKEN",
    ] {
        unsafe { std::env::remove_var(var) };
    }
    for (key, value) in pairs {
        unsafe { std::env::set_var(key, value) };
    }
}

#[test]
#[serial]
fn flags_override_environment() {
    set_env(&[("ZABBIX_URL", "http://env/api_jsonrpc.php"), ("ZABBIX_TOKEN", "env-token")]);
    let args = ConnectionArgs {
        url: Some("https://flag/api_jsonrpc.php".into()),
        serialize: true,
        ..Default::default()
    };

    let config = args.client_config();
    assert_eq!(config.url, "https://flag/api_jsonrpc.php");
    assert_eq!(config.token.as_deref(), Some("env-token"));
    assert!(config.serialize);
    assert!(!config.tls_insecure);
    set_env(&[]);
}

#[test]
#[serial]
fn environment_fills_missing_flags() {
    set_env(&[("ZABBIX_USER", "Admin"), ("ZABBIX_PASS", "zabbix")]);
    let args = ConnectionArgs {
        url: Some("http://z".into()),
        ..Default::default()
    };

    let config = args.client_config();
    assert_eq!(config.username.as_deref(), Some("Admin"));
    assert_eq!(config.password.as_deref(), Some("zabbix"));
    assert!(config.credentials().is_ok());
    set_env(&[]);
}

#[test]
#[serial]
fn flag_credentials_replace_environment_ones() {
    set_env(&[("ZABBIX_USER", "env-user"), ("ZABBIX_PASS", "env-pass")]);
    let args = ConnectionArgs {
        username: Some("flag-user".into()),
        password: Some("flag-pass".into()),
        tls_insecure: true,
        ..Default::default()
    };

    let config = args.client_config();
    assert_eq!(config.username.as_deref(), Some("flag-user"));
    assert_eq!(config.password.as_deref(), Some("flag-pass"));
    assert!(config.tls_insecure);
    set_env(&[]);
}
