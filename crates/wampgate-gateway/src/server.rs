//! WebSocket transport server.
//!
//! Composes a [`Router`], the subprotocol registry and the upgrade policy.
//! Protocols can only be registered on the [`WebsocketServerBuilder`]; once
//! `build` runs the registry is frozen and shared read-only by every
//! connection.

use std::sync::Arc;

use wampgate_core::error::Result;
use wampgate_core::{FrameKind, JsonSerializer, MsgpackSerializer, Serializer};

use crate::config::{CodecKind, GatewayConfig, RealmConfig};
use crate::registry::ProtocolRegistry;
use crate::routing::{runtime_handle, BasicRouter, LocalClient, Router};
use crate::transport::{DecodeErrorPolicy, OriginPolicy};

#[derive(Clone)]
pub struct WebsocketServer {
    inner: Arc<ServerInner>,
}

struct ServerInner {
    router: Arc<dyn Router>,
    registry: ProtocolRegistry,
    origin_policy: OriginPolicy,
    decode_policy: DecodeErrorPolicy,
}

impl WebsocketServer {
    /// Builder with `wamp.2.json` and `wamp.2.msgpack` already registered.
    pub fn builder(router: Arc<dyn Router>) -> WebsocketServerBuilder {
        WebsocketServerBuilder {
            router,
            registry: ProtocolRegistry::with_builtins(),
            origin_policy: OriginPolicy::default(),
            decode_policy: DecodeErrorPolicy::default(),
        }
    }

    /// Builder over a fresh [`BasicRouter`] holding `realms`.
    pub fn with_realms<I>(realms: I) -> Result<WebsocketServerBuilder>
    where
        I: IntoIterator<Item = RealmConfig>,
    {
        let router = BasicRouter::new();
        for realm in realms {
            router.register_realm(realm)?;
        }
        Ok(Self::builder(Arc::new(router)))
    }

    /// Server with a single realm and default options.
    pub fn basic(realm: &str) -> Result<Self> {
        Ok(Self::with_realms([RealmConfig::new(realm)])?.build())
    }

    /// Register the configured realms on `router` and build a server with the
    /// configured protocols and policies.
    pub fn from_config(cfg: &GatewayConfig, router: Arc<dyn Router>) -> Result<Self> {
        for realm in &cfg.realms {
            router.register_realm(realm.clone())?;
        }

        let mut builder = Self::builder(router)
            .check_origin(OriginPolicy::from_allowed(&cfg.gateway.allowed_origins))
            .decode_errors(cfg.gateway.decode_errors);

        for p in &cfg.protocols {
            let frame_kind: FrameKind = p.frame.parse()?;
            let serializer: Arc<dyn Serializer> = match p.codec {
                CodecKind::Json => Arc::new(JsonSerializer::new()),
                CodecKind::Msgpack => Arc::new(MsgpackSerializer::new()),
            };
            builder.register_protocol(p.token.clone(), frame_kind, serializer)?;
        }

        Ok(builder.build())
    }

    pub fn router(&self) -> &Arc<dyn Router> {
        &self.inner.router
    }

    pub fn registry(&self) -> &ProtocolRegistry {
        &self.inner.registry
    }

    /// Tokens the upgrader accepts, in registration order.
    pub fn protocols(&self) -> &[String] {
        self.inner.registry.tokens()
    }

    pub fn origin_policy(&self) -> &OriginPolicy {
        &self.inner.origin_policy
    }

    pub fn decode_policy(&self) -> DecodeErrorPolicy {
        self.inner.decode_policy
    }

    /// In-process client attached to `realm`. Fails if the router has no
    /// such realm, or when called outside a Tokio runtime.
    pub fn get_local_peer(&self, realm: &str) -> Result<LocalClient> {
        runtime_handle()?;
        let peer = self.inner.router.get_local_peer(realm)?;
        LocalClient::new(peer)
    }
}

pub struct WebsocketServerBuilder {
    router: Arc<dyn Router>,
    registry: ProtocolRegistry,
    origin_policy: OriginPolicy,
    decode_policy: DecodeErrorPolicy,
}

impl WebsocketServerBuilder {
    pub fn register_protocol(
        &mut self,
        token: impl Into<String>,
        frame_kind: FrameKind,
        serializer: Arc<dyn Serializer>,
    ) -> Result<()> {
        self.registry.register(token, frame_kind, serializer)
    }

    /// Register with a raw WebSocket data opcode (1 = text, 2 = binary).
    pub fn register_protocol_opcode(
        &mut self,
        token: impl Into<String>,
        opcode: u8,
        serializer: Arc<dyn Serializer>,
    ) -> Result<()> {
        self.registry.register_opcode(token, opcode, serializer)
    }

    pub fn check_origin(mut self, policy: OriginPolicy) -> Self {
        self.origin_policy = policy;
        self
    }

    pub fn decode_errors(mut self, policy: DecodeErrorPolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    pub fn protocols(&self) -> &[String] {
        self.registry.tokens()
    }

    pub fn build(self) -> WebsocketServer {
        tracing::info!(protocols = ?self.registry.tokens(), origin = ?self.origin_policy, decode_errors = ?self.decode_policy, "websocket server ready");
        WebsocketServer {
            inner: Arc::new(ServerInner {
                router: self.router,
                registry: self.registry,
                origin_policy: self.origin_policy,
                decode_policy: self.decode_policy,
            }),
        }
    }
}

impl std::fmt::Debug for WebsocketServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebsocketServer")
            .field("protocols", &self.inner.registry.tokens())
            .field("origin_policy", &self.inner.origin_policy)
            .field("decode_policy", &self.inner.decode_policy)
            .finish()
    }
}
