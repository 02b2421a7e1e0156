//! Zabbix JSON-RPC client.
//!
//! Speaks JSON-RPC 2.0 over HTTP POST to a single endpoint. The session token
//! travels in an `Authorization: Bearer` header from 6.4 and in the request's
//! `auth` member before that.

use crate::api::{ItemApi, ItemQuery, endpoint};
use crate::config::{ClientConfig, Credentials};
use crate::error::{ClientError, ClientResult};
use crate::version::parse_api_version;
use crate::wire::RemoteItem;
use async_trait::async_trait;
use itemsync_model::ItemFlavor;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, trace};

/// First version that accepts the session token as a bearer header.
pub const BEARER_AUTH_SINCE: u32 = 60_400;

/// First version whose `user.login` takes `username` instead of `user`.
pub const USERNAME_LOGIN_SINCE: u32 = 50_400;

/// First version without applications.
pub const APPLICATIONS_REMOVED_IN: u32 = 50_400;

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    auth: Option<&'a str>,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: String,
}

#[derive(Deserialize)]
struct ItemIds {
    itemids: Vec<String>,
}

/// HTTP client for the Zabbix API.
pub struct ZabbixClient {
    config: ClientConfig,
    http: Client,
    auth: RwLock<Option<String>>,
    version: AtomicU32,
    next_id: AtomicU64,
    /// Held across a whole request in serialize mode.
    serial: Option<Mutex<()>>,
}

impl ZabbixClient {
    /// Creates an unauthenticated client with an unknown (zero) API version.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.tls_insecure)
            .build()?;

        let serial = config.serialize.then(|| Mutex::new(()));

        Ok(Self {
            config,
            http,
            auth: RwLock::new(None),
            version: AtomicU32::new(0),
            next_id: AtomicU64::new(1),
            serial,
        })
    }

    /// Creates a client, learns the server version and authenticates.
    pub async fn connect(config: ClientConfig) -> ClientResult<Self> {
        let credentials = config.credentials()?;
        let client = Self::new(config)?;
        let version = client.refresh_version().await?;
        info!("Connected to {} (API version {})", client.config.url, version);
        client.authenticate(&credentials).await?;
        Ok(client)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches `apiinfo.version` and caches it for [`ItemApi::api_version`].
    pub async fn refresh_version(&self) -> ClientResult<u32> {
        let value = self.send("apiinfo.version", json!([]), false).await?;
        let raw: String = serde_json::from_value(value)?;
        let version = parse_api_version(&raw)?;
        self.version.store(version, Ordering::Release);
        Ok(version)
    }

    /// Authenticates with a token or a username/password login.
    pub async fn authenticate(&self, credentials: &Credentials) -> ClientResult<()> {
        match credentials {
            Credentials::Token(token) => {
                self.set_token(token.clone()).await;
                Ok(())
            }
            Credentials::Password { username, password } => self.login(username, password).await,
        }
    }

    /// Opens a session with `user.login` and keeps its token.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<()> {
        let user_field = if self.api_version() >= USERNAME_LOGIN_SINCE {
            "username"
        } else {
            "user"
        };
        let mut params = Map::new();
        params.insert(user_field.into(), json!(username));
        params.insert("password".into(), json!(password));

        let value = self.send("user.login", Value::Object(params), false).await?;
        let token: String = serde_json::from_value(value)?;
        debug!("Logged in as {}", username);
        self.set_token(token).await;
        Ok(())
    }

    /// Uses an existing API token for subsequent calls.
    pub async fn set_token(&self, token: String) {
        *self.auth.write().await = Some(token);
    }

    /// Calls an authenticated API method and decodes its result.
    pub async fn call<P, R>(&self, method: &str, params: &P) -> ClientResult<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let params = serde_json::to_value(params)?;
        let result = self.send(method, params, true).await?;
        Ok(serde_json::from_value(result)?)
    }

    async fn send(&self, method: &str, params: Value, authenticated: bool) -> ClientResult<Value> {
        let _serial = match &self.serial {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        let token = if authenticated {
            self.auth.read().await.clone()
        } else {
            None
        };
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let mut body = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
            auth: None,
        };
        let mut request = self.http.post(&self.config.url);
        if let Some(token) = token.as_deref() {
            if self.api_version() >= BEARER_AUTH_SINCE {
                request = request.bearer_auth(token);
            } else {
                body.auth = Some(token);
            }
        }

        if authenticated {
            trace!("-> {} #{}: {}", method, id, body.params);
        } else {
            trace!("-> {} #{}", method, id);
        }
        let response = request.json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedResponse(format!(
                "{method} returned HTTP {status}: {text}"
            )));
        }

        let reply: RpcResponse = response.json().await?;
        match (reply.result, reply.error) {
            (_, Some(error)) => {
                debug!("{} #{} failed: {} {}", method, id, error.message, error.data);
                Err(ClientError::Api {
                    code: error.code,
                    message: error.message,
                    data: error.data,
                })
            }
            (Some(result), None) => {
                trace!("<- {} #{}: {}", method, id, result);
                Ok(result)
            }
            (None, None) => Err(ClientError::UnexpectedResponse(format!(
                "{method} returned neither result nor error"
            ))),
        }
    }

    /// Builds `*.get` parameters, dropping selections the server no longer knows.
    fn get_params(&self, query: &ItemQuery) -> Value {
        let mut params = Map::new();
        params.insert("output".into(), json!("extend"));
        params.insert("itemids".into(), json!(query.item_ids));
        if query.select_preprocessing {
            params.insert("selectPreprocessing".into(), json!("extend"));
        }
        if query.select_applications && self.api_version() < APPLICATIONS_REMOVED_IN {
            params.insert("selectApplications".into(), json!("extend"));
        }
        if query.select_tags {
            params.insert("selectTags".into(), json!("extend"));
        }
        if query.select_discovery_rule {
            params.insert("selectDiscoveryRule".into(), json!("extend"));
        }
        Value::Object(params)
    }
}

#[async_trait]
impl ItemApi for ZabbixClient {
    fn api_version(&self) -> u32 {
        self.version.load(Ordering::Acquire)
    }

    async fn create_items(
        &self,
        flavor: ItemFlavor,
        items: &[RemoteItem],
    ) -> ClientResult<Vec<String>> {
        let created: ItemIds = self
            .call(&format!("{}.create", endpoint(flavor)), items)
            .await?;
        Ok(created.itemids)
    }

    async fn update_items(&self, flavor: ItemFlavor, items: &[RemoteItem]) -> ClientResult<()> {
        let _: ItemIds = self
            .call(&format!("{}.update", endpoint(flavor)), items)
            .await?;
        Ok(())
    }

    async fn get_items(
        &self,
        flavor: ItemFlavor,
        query: &ItemQuery,
    ) -> ClientResult<Vec<RemoteItem>> {
        let params = self.get_params(query);
        self.call(&format!("{}.get", endpoint(flavor)), &params).await
    }

    async fn delete_items(&self, flavor: ItemFlavor, ids: &[String]) -> ClientResult<()> {
        let _: Value = self
            .call(&format!("{}.delete", endpoint(flavor)), ids)
            .await?;
        Ok(())
    }
}
