//! Append-only certificate list with linear-scan lookups.

use crate::domain::error::Result;
use crate::domain::model::{new_id, now_timestamp, Certificate, CertificateFields};
use crate::storage::kv::{load_list, save_list, CERTIFICATES_KEY};
use crate::storage::KeyValueStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub struct CertificateStore {
    kv: Arc<dyn KeyValueStore>,
    /// Artificial latency before a verification lookup returns. Zero disables it.
    verify_delay: Duration,
    write_lock: Mutex<()>,
}

impl CertificateStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, verify_delay: Duration) -> Self {
        Self {
            kv,
            verify_delay,
            write_lock: Mutex::new(()),
        }
    }

    pub fn verify_delay(&self) -> Duration {
        self.verify_delay
    }

    /// Appends a new certificate and returns the stored record.
    ///
    /// Neither the fields nor `owner_id` are validated. A digest already present
    /// on another certificate is accepted and logged.
    pub async fn issue(
        &self,
        fields: CertificateFields,
        owner_id: &str,
        digest: &str,
    ) -> Result<Certificate> {
        let _guard = self.write_lock.lock().await;

        let mut certificates = self.all().await?;
        if certificates.iter().any(|c| c.digest == digest) {
            tracing::warn!(digest, "digest already recorded on another certificate");
        }

        let certificate = Certificate {
            id: new_id(),
            learner_name: fields.learner_name,
            course_name: fields.course_name,
            institute_name: fields.institute_name,
            completion_date: fields.completion_date,
            digest: digest.to_string(),
            owner_id: owner_id.to_string(),
            created_at: now_timestamp(),
        };
        certificates.push(certificate.clone());
        save_list(self.kv.as_ref(), CERTIFICATES_KEY, &certificates).await?;

        tracing::info!(
            certificate_id = %certificate.id,
            owner_id,
            digest,
            "issued certificate"
        );
        Ok(certificate)
    }

    /// First certificate whose digest or identifier equals `token`, in issuance order.
    pub async fn find_by_digest_or_id(&self, token: &str) -> Result<Option<Certificate>> {
        if !self.verify_delay.is_zero() {
            tokio::time::sleep(self.verify_delay).await;
        }
        let certificates = self.all().await?;
        let found = certificates.into_iter().find(|c| c.matches_token(token));
        tracing::debug!(token, found = found.is_some(), "verification lookup");
        Ok(found)
    }

    /// Every certificate owned by `owner_id`, in issuance order.
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Certificate>> {
        let certificates = self.all().await?;
        Ok(certificates
            .into_iter()
            .filter(|c| c.owner_id == owner_id)
            .collect())
    }

    /// `list_by_owner` narrowed by a case-insensitive substring of course,
    /// learner or institute name. A blank term returns the whole list.
    pub async fn search_by_owner(&self, owner_id: &str, term: &str) -> Result<Vec<Certificate>> {
        let owned = self.list_by_owner(owner_id).await?;
        if term.trim().is_empty() {
            return Ok(owned);
        }
        let needle = term.to_lowercase();
        Ok(owned
            .into_iter()
            .filter(|c| c.matches_search(&needle))
            .collect())
    }

    pub async fn all(&self) -> Result<Vec<Certificate>> {
        Ok(load_list(self.kv.as_ref(), CERTIFICATES_KEY).await?)
    }

    pub async fn count(&self) -> Result<usize> {
        Ok(self.all().await?.len())
    }
}
