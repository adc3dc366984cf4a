use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use wampgate_core::error::{Result, WampGateError};

use crate::config::RealmConfig;

use super::local::LocalPeer;
use super::peer::{runtime_handle, Peer};

/// Message router collaborator: owns realms and every accepted peer.
pub trait Router: Send + Sync {
    fn register_realm(&self, realm: RealmConfig) -> Result<()>;

    /// Same-process peer into `realm`, bypassing any network framing.
    fn get_local_peer(&self, realm: &str) -> Result<Arc<dyn Peer>>;

    /// Take ownership of a freshly connected peer. Called from within the
    /// Tokio runtime.
    fn accept(&self, peer: Arc<dyn Peer>);
}

/// Realm registry plus session table.
///
/// Each accepted peer gets a drain task that consumes its messages until the
/// peer ends. Message handling beyond that belongs to a real router.
pub struct BasicRouter {
    realms: DashMap<String, RealmConfig>,
    sessions: Arc<DashMap<u64, Arc<dyn Peer>>>,
    next_session: AtomicU64,
}

impl BasicRouter {
    pub fn new() -> Self {
        Self {
            realms: DashMap::new(),
            sessions: Arc::new(DashMap::new()),
            next_session: AtomicU64::new(1),
        }
    }

    pub fn has_realm(&self, name: &str) -> bool {
        self.realms.contains_key(name)
    }

    pub fn registered_realms(&self) -> Vec<String> {
        self.realms.iter().map(|e| e.key().clone()).collect()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Close every live session.
    pub async fn close_all(&self) {
        let peers: Vec<Arc<dyn Peer>> = self.sessions.iter().map(|e| Arc::clone(e.value())).collect();
        for peer in peers {
            peer.close().await;
        }
    }
}

impl Default for BasicRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Router for BasicRouter {
    fn register_realm(&self, realm: RealmConfig) -> Result<()> {
        match self.realms.entry(realm.name.clone()) {
            Entry::Occupied(_) => Err(WampGateError::RealmExists(realm.name)),
            Entry::Vacant(slot) => {
                tracing::info!(realm = %realm.name, "realm registered");
                slot.insert(realm);
                Ok(())
            }
        }
    }

    fn get_local_peer(&self, realm: &str) -> Result<Arc<dyn Peer>> {
        if !self.realms.contains_key(realm) {
            return Err(WampGateError::RealmNotFound(realm.to_string()));
        }
        runtime_handle()?;
        let (router_end, client_end) = LocalPeer::pair();
        self.accept(Arc::new(router_end));
        tracing::debug!(realm = %realm, "local peer created");
        Ok(Arc::new(client_end))
    }

    fn accept(&self, peer: Arc<dyn Peer>) {
        let session = self.next_session.fetch_add(1, Ordering::Relaxed);
        self.sessions.insert(session, Arc::clone(&peer));
        tracing::debug!(session, frame_kind = ?peer.frame_kind(), "peer accepted");

        let sessions = Arc::clone(&self.sessions);
        tokio::spawn(async move {
            while let Some(msg) = peer.receive().await {
                tracing::debug!(session, type_code = ?msg.type_code(), "message received");
            }
            peer.close().await;
            sessions.remove(&session);
            tracing::debug!(session, "session ended");
        });
    }
}
