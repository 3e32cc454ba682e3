//! In-memory OAuth sessions and pending authorizations.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// How long an issued consent URL stays redeemable.
const PENDING_AUTHORIZATION_TTL_MINUTES: i64 = 15;

/// Access tokens are treated as expired slightly early so a request never starts with
/// a token that lapses mid-flight.
const EXPIRY_SKEW_SECONDS: i64 = 30;

/// Token set obtained from a completed authorization.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// `None` when the provider did not report a lifetime
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .map(|at| now + Duration::seconds(EXPIRY_SKEW_SECONDS) >= at)
            .unwrap_or(false)
    }
}

/// Session id → token set, plus the CSRF states of consent URLs not yet redeemed.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, AuthSession>>,
    pending: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new session and return its generated id.
    pub async fn create(&self, session: AuthSession) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(id.clone(), session);
        id
    }

    pub async fn get(&self, id: &str) -> Option<AuthSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Replace the token set of an existing session. Returns false if it was removed meanwhile.
    pub async fn update(&self, id: &str, session: AuthSession) -> bool {
        match self.sessions.write().await.get_mut(id) {
            Some(existing) => {
                *existing = session;
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, id: &str) -> Option<AuthSession> {
        self.sessions.write().await.remove(id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Remember a CSRF state handed out with a consent URL.
    pub async fn record_pending(&self, state: String, now: DateTime<Utc>) {
        let mut pending = self.pending.lock().await;
        let cutoff = now - Duration::minutes(PENDING_AUTHORIZATION_TTL_MINUTES);
        pending.retain(|_, issued_at| *issued_at > cutoff);
        pending.insert(state, now);
    }

    /// Consume a CSRF state. Each state can be redeemed once, within its lifetime.
    pub async fn take_pending(&self, state: &str, now: DateTime<Utc>) -> bool {
        let cutoff = now - Duration::minutes(PENDING_AUTHORIZATION_TTL_MINUTES);
        match self.pending.lock().await.remove(state) {
            Some(issued_at) => issued_at > cutoff,
            None => false,
        }
    }
}
