use std::collections::HashSet;
use std::net::SocketAddr;

use serde::Deserialize;
use wampgate_core::error::{Result, WampGateError};

use crate::transport::DecodeErrorPolicy;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub realms: Vec<RealmConfig>,

    /// Registered in addition to `wamp.2.json` and `wamp.2.msgpack`.
    #[serde(default)]
    pub protocols: Vec<ProtocolConfig>,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(WampGateError::UnsupportedVersion);
        }
        if self.realms.is_empty() {
            return Err(WampGateError::BadConfig("realms must not be empty".into()));
        }

        let mut seen = HashSet::new();
        for realm in &self.realms {
            if realm.name.trim().is_empty() {
                return Err(WampGateError::BadConfig("realm name must not be empty".into()));
            }
            if !seen.insert(realm.name.as_str()) {
                return Err(WampGateError::BadConfig(format!("duplicate realm: {}", realm.name)));
            }
        }

        for p in &self.protocols {
            if p.token.trim().is_empty() || p.token.contains(',') {
                return Err(WampGateError::BadConfig(format!("invalid protocol token: {:?}", p.token)));
            }
        }

        self.gateway.validate()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default)]
    pub decode_errors: DecodeErrorPolicy,

    /// Empty: same-origin only. `["*"]`: any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            path: default_path(),
            decode_errors: DecodeErrorPolicy::default(),
            allowed_origins: Vec::new(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.path.starts_with('/') {
            return Err(WampGateError::BadConfig("gateway.path must start with '/'".into()));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            WampGateError::BadConfig(format!("gateway.listen is not a socket address: {}", self.listen))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_path() -> String {
    "/ws".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RealmConfig {
    pub name: String,
}

impl RealmConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProtocolConfig {
    pub token: String,
    /// `text` or `binary`; checked at registration.
    pub frame: String,
    pub codec: CodecKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    Json,
    Msgpack,
}
