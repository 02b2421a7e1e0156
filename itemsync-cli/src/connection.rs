use clap::Args;
use itemsync_client::ClientConfig;

/// Connection flags. Each one overrides the matching `ZABBIX_*` variable.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// JSON-RPC endpoint, e.g. https://zabbix.example/api_jsonrpc.php
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// API token (preferred over username/password)
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[arg(long, global = true)]
    pub username: Option<String>,

    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub tls_insecure: bool,

    /// Send one request at a time
    #[arg(long, global = true)]
    pub serialize: bool,
}

impl ConnectionArgs {
    /// Environment settings with the flags applied on top.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.url {
            config.url.clone_from(url);
        }
        if self.token.is_some() {
            config.token.clone_from(&self.token);
        }
        if self.username.is_some() {
            config.username.clone_from(&self.username);
        }
        if self.password.is_some() {
            config.password.clone_from(&self.password);
        }
        config.tls_insecure |= self.tls_insecure;
        config.serialize |= self.serialize;
        config
    }
}
