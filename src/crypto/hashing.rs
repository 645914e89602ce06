// This file is used to produce the hex digests stored in the ledger.

use crate::domain::model::CertificateFields;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// How a certificate digest is derived from its fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestMode {
    /// Fields followed by the issuance time in Unix milliseconds.
    /// Two submissions of the same fields produce different digests.
    #[default]
    IssuanceTime,
    /// Fields only. The digest can be recomputed from the certificate content.
    Content,
}

impl std::str::FromStr for DigestMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "issuance_time" => Ok(DigestMode::IssuanceTime),
            "content" => Ok(DigestMode::Content),
            other => Err(format!(
                "unknown digest mode '{}' (expected issuance_time or content)",
                other
            )),
        }
    }
}

/// Lowercase hex SHA-256 of arbitrary bytes (64 characters).
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Hashes the certificate fields, plain concatenation with no separators.
///
/// `issued_at_millis` is appended when present, which is what makes the
/// time-salted digest non-reproducible from content alone.
pub fn certificate_digest(fields: &CertificateFields, issued_at_millis: Option<i64>) -> String {
    let mut data = String::with_capacity(
        fields.learner_name.len()
            + fields.course_name.len()
            + fields.institute_name.len()
            + fields.completion_date.len()
            + 13,
    );
    data.push_str(&fields.learner_name);
    data.push_str(&fields.course_name);
    data.push_str(&fields.institute_name);
    data.push_str(&fields.completion_date);
    if let Some(millis) = issued_at_millis {
        data.push_str(&millis.to_string());
    }
    sha256_hex(data.as_bytes())
}

/// Generates the "blockchain hash" for a certificate about to be issued.
pub fn generate_certificate_digest(fields: &CertificateFields, mode: DigestMode) -> String {
    match mode {
        DigestMode::IssuanceTime => {
            certificate_digest(fields, Some(Utc::now().timestamp_millis()))
        }
        DigestMode::Content => certificate_digest(fields, None),
    }
}

/// Unsalted password digest. Matches what is persisted in the `users` entry.
pub fn password_digest(password: &str) -> String {
    sha256_hex(password.as_bytes())
}

/// Compares a candidate password against a stored digest.
pub fn verify_password(password: &str, digest: &str) -> bool {
    password_digest(password) == digest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> CertificateFields {
        CertificateFields {
            learner_name: "Rahul Kumar".to_string(),
            course_name: "Web Dev".to_string(),
            institute_name: "NSDC".to_string(),
            completion_date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn sha256_of_empty_input_is_the_known_vector() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn digest_is_64_lowercase_hex_chars() {
        let d = generate_certificate_digest(&fields(), DigestMode::IssuanceTime);
        assert_eq!(d.len(), 64);
        assert!(d.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn timestamp_is_appended_to_concatenated_fields() {
        let expected = sha256_hex(b"Rahul KumarWeb DevNSDC2024-01-011704067200000");
        assert_eq!(certificate_digest(&fields(), Some(1_704_067_200_000)), expected);
    }

    #[test]
    fn different_issuance_times_give_different_digests() {
        let a = certificate_digest(&fields(), Some(1));
        let b = certificate_digest(&fields(), Some(2));
        assert_ne!(a, b);
    }

    #[test]
    fn content_mode_is_reproducible() {
        let a = generate_certificate_digest(&fields(), DigestMode::Content);
        let b = generate_certificate_digest(&fields(), DigestMode::Content);
        assert_eq!(a, b);
        assert_eq!(a, sha256_hex(b"Rahul KumarWeb DevNSDC2024-01-01"));
    }

    #[test]
    fn empty_fields_are_accepted() {
        let empty = CertificateFields::default();
        assert_eq!(certificate_digest(&empty, None), sha256_hex(b""));
    }

    #[test]
    fn password_round_trip() {
        let digest = password_digest("pw1");
        assert!(verify_password("pw1", &digest));
        assert!(!verify_password("pw2", &digest));
    }

    #[test]
    fn digest_mode_parses_env_spellings() {
        assert_eq!("content".parse::<DigestMode>(), Ok(DigestMode::Content));
        assert_eq!(" Issuance_Time ".parse::<DigestMode>(), Ok(DigestMode::IssuanceTime));
        assert!("merkle".parse::<DigestMode>().is_err());
        assert!("time".parse::<DigestMode>().is_err());
    }
}
