//! Issue / verify / list behaviour of the certificate store.

use skill_ledger::storage::kv::CERTIFICATES_KEY;
use skill_ledger::{CertificateFields, CertificateStore, KeyValueStore, MemoryStore};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn fields(learner: &str, course: &str, institute: &str) -> CertificateFields {
    CertificateFields {
        learner_name: learner.to_string(),
        course_name: course.to_string(),
        institute_name: institute.to_string(),
        completion_date: "2024-01-01".to_string(),
    }
}

fn store() -> CertificateStore {
    CertificateStore::new(Arc::new(MemoryStore::new()), Duration::ZERO)
}

#[tokio::test]
async fn issue_then_find_by_digest_and_by_id() {
    let store = store();
    let cert = store
        .issue(fields("Rahul Kumar", "Web Dev", "NSDC"), "u1", "abc123")
        .await
        .unwrap();

    assert!(!cert.id.is_empty());
    assert!(!cert.created_at.is_empty());
    assert_eq!(cert.digest, "abc123");
    assert_eq!(cert.owner_id, "u1");
    assert_eq!(cert.learner_name, "Rahul Kumar");

    let by_digest = store.find_by_digest_or_id("abc123").await.unwrap();
    assert_eq!(by_digest, Some(cert.clone()));

    let by_id = store.find_by_digest_or_id(&cert.id).await.unwrap();
    assert_eq!(by_id, Some(cert));

    assert_eq!(store.find_by_digest_or_id("zzz").await.unwrap(), None);
}

#[tokio::test]
async fn lookup_is_exact_and_case_sensitive() {
    let store = store();
    store
        .issue(fields("a", "b", "c"), "u1", "abcdef")
        .await
        .unwrap();
    assert_eq!(store.find_by_digest_or_id("ABCDEF").await.unwrap(), None);
    assert_eq!(store.find_by_digest_or_id("abcde").await.unwrap(), None);
    assert_eq!(store.find_by_digest_or_id("").await.unwrap(), None);
}

#[tokio::test]
async fn issued_ids_are_unique() {
    let store = store();
    let a = store.issue(fields("a", "b", "c"), "u1", "d1").await.unwrap();
    let b = store.issue(fields("a", "b", "c"), "u1", "d2").await.unwrap();
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn duplicate_digest_is_tolerated_and_first_match_wins() {
    let store = store();
    let first = store.issue(fields("a", "b", "c"), "u1", "same").await.unwrap();
    let second = store.issue(fields("x", "y", "z"), "u2", "same").await.unwrap();

    assert_eq!(store.count().await.unwrap(), 2);
    assert_eq!(store.find_by_digest_or_id("same").await.unwrap(), Some(first));
    assert_eq!(
        store.find_by_digest_or_id(&second.id).await.unwrap(),
        Some(second)
    );
}

#[tokio::test]
async fn list_by_owner_preserves_issuance_order() {
    let store = store();
    let a1 = store.issue(fields("a1", "c", "i"), "alice", "h1").await.unwrap();
    store.issue(fields("b1", "c", "i"), "bob", "h2").await.unwrap();
    let a2 = store.issue(fields("a2", "c", "i"), "alice", "h3").await.unwrap();
    let a3 = store.issue(fields("a3", "c", "i"), "alice", "h4").await.unwrap();

    let listed = store.list_by_owner("alice").await.unwrap();
    assert_eq!(listed, vec![a1, a2, a3]);

    assert_eq!(store.list_by_owner("bob").await.unwrap().len(), 1);
    assert!(store.list_by_owner("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn list_by_owner_is_idempotent() {
    let store = store();
    store.issue(fields("a", "b", "c"), "u1", "h1").await.unwrap();
    store.issue(fields("d", "e", "f"), "u1", "h2").await.unwrap();

    let first = store.list_by_owner("u1").await.unwrap();
    let second = store.list_by_owner("u1").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_fields_and_unknown_owner_are_accepted() {
    let store = store();
    let cert = store
        .issue(CertificateFields::default(), "no-such-user", "")
        .await
        .unwrap();
    assert_eq!(cert.learner_name, "");
    assert_eq!(store.list_by_owner("no-such-user").await.unwrap(), vec![cert]);
}

#[tokio::test]
async fn search_by_owner_matches_course_learner_or_institute() {
    let store = store();
    let web = store
        .issue(fields("Rahul Kumar", "Web Dev", "NSDC"), "u1", "h1")
        .await
        .unwrap();
    let weld = store
        .issue(fields("Priya Singh", "Welding", "ITI Pune"), "u1", "h2")
        .await
        .unwrap();
    // other owner's certificate never shows up
    store
        .issue(fields("Rahul Kumar", "Web Dev", "NSDC"), "u2", "h3")
        .await
        .unwrap();

    assert_eq!(store.search_by_owner("u1", "web").await.unwrap(), vec![web.clone()]);
    assert_eq!(store.search_by_owner("u1", "PRIYA").await.unwrap(), vec![weld.clone()]);
    assert_eq!(store.search_by_owner("u1", "pune").await.unwrap(), vec![weld.clone()]);
    assert_eq!(
        store.search_by_owner("u1", "   ").await.unwrap(),
        vec![web.clone(), weld.clone()]
    );
    // "We" matches both Web Dev and Welding, order preserved
    assert_eq!(store.search_by_owner("u1", "We").await.unwrap(), vec![web, weld]);
    assert!(store.search_by_owner("u1", "plumbing").await.unwrap().is_empty());
}

#[tokio::test]
async fn records_persist_in_the_certificates_entry() {
    let kv = Arc::new(MemoryStore::new());
    let store = CertificateStore::new(kv.clone(), Duration::ZERO);
    let cert = store
        .issue(fields("Rahul Kumar", "Web Dev", "NSDC"), "u1", "abc123")
        .await
        .unwrap();

    let raw = kv.get(CERTIFICATES_KEY).await.unwrap().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed[0]["id"], cert.id.as_str());
    assert_eq!(parsed[0]["blockchainHash"], "abc123");
    assert_eq!(parsed[0]["userId"], "u1");
    assert_eq!(parsed[0]["completionDate"], "2024-01-01");

    // a fresh store over the same backend sees the record
    let other = CertificateStore::new(kv, Duration::ZERO);
    assert_eq!(other.find_by_digest_or_id("abc123").await.unwrap(), Some(cert));
}

#[tokio::test]
async fn malformed_certificates_entry_is_a_storage_error() {
    let kv = Arc::new(MemoryStore::new());
    kv.set(CERTIFICATES_KEY, "not json").await.unwrap();
    let store = CertificateStore::new(kv.clone(), Duration::ZERO);

    assert!(store.list_by_owner("u1").await.is_err());
    assert!(store.issue(fields("a", "b", "c"), "u1", "h").await.is_err());
    // the failed issue did not overwrite what was there
    assert_eq!(kv.get(CERTIFICATES_KEY).await.unwrap().as_deref(), Some("not json"));
}

#[tokio::test(start_paused = true)]
async fn verification_waits_for_the_configured_delay() {
    let store = CertificateStore::new(Arc::new(MemoryStore::new()), Duration::from_millis(2_000));
    store.issue(fields("a", "b", "c"), "u1", "h1").await.unwrap();

    let started = tokio::time::Instant::now();
    let found = store.find_by_digest_or_id("h1").await.unwrap();
    assert!(found.is_some());
    assert!(started.elapsed() >= Duration::from_millis(2_000));
}

#[tokio::test]
async fn zero_delay_does_not_sleep() {
    let store = store();
    let started = Instant::now();
    store.find_by_digest_or_id("anything").await.unwrap();
    assert!(started.elapsed() < Duration::from_millis(500));
}
