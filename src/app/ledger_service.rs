//! The Ledger Service.
//!
//! One instance per process, built at startup and shared with whatever layer
//! needs it. It owns:
//! 1.  The identity store (`users` entry + the active session in `user`).
//! 2.  The certificate store (`certificates` entry).
//! 3.  Digest generation for newly issued certificates.

use crate::crypto::hashing::{generate_certificate_digest, DigestMode};
use crate::domain::error::{LedgerError, Result};
use crate::domain::model::{Certificate, CertificateFields, SessionIdentity, SessionState};
use crate::domain::{CertificateStore, IdentityStore};
use crate::infra::config::LedgerConfig;
use crate::infra::store::open_store;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use std::time::Duration;

pub struct LedgerService {
    kv: Arc<dyn KeyValueStore>,
    identity: IdentityStore,
    certificates: CertificateStore,
    digest_mode: DigestMode,
}

impl LedgerService {
    /// Opens the configured backend and restores any persisted session.
    pub async fn new(config: &LedgerConfig) -> anyhow::Result<Self> {
        let kv = open_store(&config.backend).await?;
        Ok(Self::with_store(kv, config.verify_delay, config.digest_mode).await?)
    }

    /// Builds the service on an existing key-value store.
    pub async fn with_store(
        kv: Arc<dyn KeyValueStore>,
        verify_delay: Duration,
        digest_mode: DigestMode,
    ) -> Result<Self> {
        let identity = IdentityStore::open(kv.clone()).await?;
        let certificates = CertificateStore::new(kv.clone(), verify_delay);
        Ok(Self {
            kv,
            identity,
            certificates,
            digest_mode,
        })
    }

    pub fn identity(&self) -> &IdentityStore {
        &self.identity
    }

    pub fn certificates(&self) -> &CertificateStore {
        &self.certificates
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.kv
    }

    pub fn digest_mode(&self) -> DigestMode {
        self.digest_mode
    }

    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<SessionIdentity> {
        self.identity.register(name, email, password).await
    }

    pub async fn log_in(&self, email: &str, password: &str) -> Result<SessionIdentity> {
        self.identity.authenticate(email, password).await
    }

    pub async fn log_out(&self) -> Result<()> {
        self.identity.end_session().await
    }

    pub async fn session(&self) -> SessionState {
        self.identity.session().await
    }

    /// Generates a digest for `fields` and issues the certificate to the signed-in user.
    pub async fn issue_certificate(&self, fields: CertificateFields) -> Result<Certificate> {
        let owner = self.require_user().await?;
        let digest = generate_certificate_digest(&fields, self.digest_mode);
        self.certificates.issue(fields, &owner.id, &digest).await
    }

    /// Looks a certificate up by digest or identifier. No session needed.
    pub async fn verify_certificate(&self, token: &str) -> Result<Option<Certificate>> {
        self.certificates.find_by_digest_or_id(token).await
    }

    /// The signed-in user's certificates, optionally narrowed by a search term.
    pub async fn my_certificates(&self, search: Option<&str>) -> Result<Vec<Certificate>> {
        let owner = self.require_user().await?;
        match search {
            Some(term) => self.certificates.search_by_owner(&owner.id, term).await,
            None => self.certificates.list_by_owner(&owner.id).await,
        }
    }

    async fn require_user(&self) -> Result<SessionIdentity> {
        self.identity
            .current_user()
            .await
            .ok_or(LedgerError::Unauthenticated)
    }
}
