//! Pre-upgrade checks.
//!
//! - Origin policy: a predicate over the request head, evaluated before the
//!   handshake completes. Rejection is reported as an upgrade failure.
//! - Subprotocol negotiation: picks the token the connection will speak from
//!   the client's `Sec-WebSocket-Protocol` list, restricted to the tokens the
//!   server advertises.

use std::fmt;
use std::sync::Arc;

use axum::http::header::{HOST, ORIGIN, SEC_WEBSOCKET_PROTOCOL};
use axum::http::{HeaderMap, Uri};

/// Read-only view of the upgrade request, handed to origin predicates.
#[derive(Debug, Clone, Copy)]
pub struct UpgradeRequest<'a> {
    pub uri: &'a Uri,
    pub headers: &'a HeaderMap,
}

impl<'a> UpgradeRequest<'a> {
    pub fn new(uri: &'a Uri, headers: &'a HeaderMap) -> Self {
        Self { uri, headers }
    }

    pub fn origin(&self) -> Option<&'a str> {
        self.headers.get(ORIGIN).and_then(|v| v.to_str().ok())
    }

    pub fn host(&self) -> Option<&'a str> {
        self.headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| self.uri.authority().map(|a| a.as_str()))
    }

    /// Tokens the client asked for, in the client's order. Repeated headers
    /// are concatenated.
    pub fn requested_protocols(&self) -> Vec<&'a str> {
        self.headers
            .get_all(SEC_WEBSOCKET_PROTOCOL)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

pub type OriginPredicate = Arc<dyn Fn(&UpgradeRequest<'_>) -> bool + Send + Sync>;

/// Which `Origin` values may open a connection.
#[derive(Clone, Default)]
pub enum OriginPolicy {
    /// Allow requests without an Origin, or whose Origin host equals Host.
    #[default]
    SameOrigin,
    AllowAny,
    /// Exact (case-insensitive) origins, e.g. `https://app.example.com`.
    AllowList(Vec<String>),
    Custom(OriginPredicate),
}

impl OriginPolicy {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&UpgradeRequest<'_>) -> bool + Send + Sync + 'static,
    {
        OriginPolicy::Custom(Arc::new(f))
    }

    /// Policy from a configured list: empty means same-origin, `*` means any.
    pub fn from_allowed(origins: &[String]) -> Self {
        if origins.is_empty() {
            OriginPolicy::SameOrigin
        } else if origins.iter().any(|o| o == "*") {
            OriginPolicy::AllowAny
        } else {
            OriginPolicy::AllowList(origins.to_vec())
        }
    }

    pub fn check(&self, req: &UpgradeRequest<'_>) -> bool {
        match self {
            OriginPolicy::SameOrigin => same_origin(req),
            OriginPolicy::AllowAny => true,
            OriginPolicy::AllowList(list) => match req.origin() {
                Some(origin) => list.iter().any(|o| o.eq_ignore_ascii_case(origin)),
                None => false,
            },
            OriginPolicy::Custom(f) => f(req),
        }
    }
}

impl fmt::Debug for OriginPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginPolicy::SameOrigin => f.write_str("SameOrigin"),
            OriginPolicy::AllowAny => f.write_str("AllowAny"),
            OriginPolicy::AllowList(list) => f.debug_tuple("AllowList").field(list).finish(),
            OriginPolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

fn same_origin(req: &UpgradeRequest<'_>) -> bool {
    let Some(origin) = req.origin() else {
        return true;
    };
    let Some(host) = req.host() else {
        return false;
    };
    match origin_authority(origin) {
        Some(authority) => authority.eq_ignore_ascii_case(host),
        None => false,
    }
}

// "https://example.com:8443/x" -> "example.com:8443"
fn origin_authority(origin: &str) -> Option<&str> {
    let (_, rest) = origin.split_once("://")?;
    let authority = rest.split('/').next().unwrap_or(rest);
    (!authority.is_empty()).then_some(authority)
}

/// First token in the client's list that the server offers.
pub fn negotiate(requested: &[&str], offered: &[String]) -> Option<String> {
    requested
        .iter()
        .find(|req| offered.iter().any(|o| o == *req))
        .map(|t| t.to_string())
}
