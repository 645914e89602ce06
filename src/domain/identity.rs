//! Local identity store: registered users plus the single active session.

use crate::crypto::hashing::{password_digest, verify_password};
use crate::domain::error::{LedgerError, Result};
use crate::domain::model::{new_id, now_timestamp, SessionIdentity, SessionState, User};
use crate::storage::kv::{load_entry, load_list, save_entry, save_list, SESSION_KEY, USERS_KEY};
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub struct IdentityStore {
    kv: Arc<dyn KeyValueStore>,
    session: RwLock<SessionState>,
    /// Serializes read-modify-write cycles on the `users` entry.
    write_lock: Mutex<()>,
}

impl IdentityStore {
    /// Opens the store and restores the persisted session, if any.
    ///
    /// A missing or malformed session entry starts the store `Anonymous`.
    pub async fn open(kv: Arc<dyn KeyValueStore>) -> Result<Self> {
        let session = match load_entry::<SessionIdentity>(kv.as_ref(), SESSION_KEY).await? {
            Some(Ok(identity)) if identity.is_well_formed() => {
                tracing::info!(user_id = %identity.id, "restored persisted session");
                SessionState::Authenticated(identity)
            }
            Some(Ok(_)) | Some(Err(_)) => {
                tracing::warn!("ignoring malformed session entry");
                SessionState::Anonymous
            }
            None => SessionState::Anonymous,
        };

        Ok(Self {
            kv,
            session: RwLock::new(session),
            write_lock: Mutex::new(()),
        })
    }

    /// Creates an account and signs it in.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<SessionIdentity> {
        let _guard = self.write_lock.lock().await;

        let previous = self.kv.get(USERS_KEY).await?;
        let mut users: Vec<User> = match previous.as_deref() {
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| anyhow::anyhow!("entry '{}' is not a valid JSON array: {}", USERS_KEY, e))?,
            None => Vec::new(),
        };
        if users.iter().any(|u| u.email == email) {
            return Err(LedgerError::DuplicateEmail);
        }

        let user = User {
            id: new_id(),
            name: name.to_string(),
            email: email.to_string(),
            password_digest: password_digest(password),
            created_at: now_timestamp(),
        };
        let identity = user.identity();
        users.push(user);
        save_list(self.kv.as_ref(), USERS_KEY, &users).await?;

        // The account only counts as registered once the session is persisted too.
        if let Err(e) = self.establish(identity.clone()).await {
            let restored = match previous.as_deref() {
                Some(raw) => self.kv.set(USERS_KEY, raw).await,
                None => self.kv.remove(USERS_KEY).await,
            };
            if let Err(restore_err) = restored {
                tracing::error!(error = %restore_err, "failed to roll back users entry");
            }
            return Err(e);
        }
        tracing::info!(user_id = %identity.id, "registered user");
        Ok(identity)
    }

    /// Checks credentials and signs the matching account in.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<SessionIdentity> {
        let users: Vec<User> = load_list(self.kv.as_ref(), USERS_KEY).await?;
        let user = users
            .iter()
            .find(|u| u.email == email)
            .ok_or(LedgerError::NotFound)?;

        if !verify_password(password, &user.password_digest) {
            tracing::debug!(user_id = %user.id, "password mismatch");
            return Err(LedgerError::InvalidCredentials);
        }

        let identity = user.identity();
        self.establish(identity.clone()).await?;
        tracing::info!(user_id = %identity.id, "user signed in");
        Ok(identity)
    }

    /// Clears the active session. Calling it while anonymous is a no-op.
    pub async fn end_session(&self) -> Result<()> {
        let mut session = self.session.write().await;
        self.kv.remove(SESSION_KEY).await?;
        if let SessionState::Authenticated(user) = &*session {
            tracing::info!(user_id = %user.id, "user signed out");
        }
        *session = SessionState::Anonymous;
        Ok(())
    }

    pub async fn session(&self) -> SessionState {
        self.session.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<SessionIdentity> {
        self.session.read().await.user().cloned()
    }

    pub async fn user_count(&self) -> Result<usize> {
        let users: Vec<User> = load_list(self.kv.as_ref(), USERS_KEY).await?;
        Ok(users.len())
    }

    async fn establish(&self, identity: SessionIdentity) -> Result<()> {
        let mut session = self.session.write().await;
        save_entry(self.kv.as_ref(), SESSION_KEY, &identity).await?;
        *session = SessionState::Authenticated(identity);
        Ok(())
    }
}
