// src/performance_test.rs
// Times issuance and the linear-scan lookups over an in-memory certificate list.
use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};

use skill_ledger::crypto::hashing::{generate_certificate_digest, DigestMode};
use skill_ledger::{CertificateFields, CertificateStore, MemoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let num_items: usize = std::env::args()
        .nth(1)
        .and_then(|v| v.parse().ok())
        .unwrap_or(1_000);
    let num_owners = 10;
    println!(
        "--- Certificate Store Performance Test: {} certificates across {} owners ---",
        num_items, num_owners
    );

    let store = CertificateStore::new(Arc::new(MemoryStore::new()), Duration::ZERO);
    let mut rng = rand::thread_rng();
    let mut digests = Vec::with_capacity(num_items);

    // --- Time issuance (each append rewrites the whole list) ---
    let start_time = Instant::now();
    for i in 0..num_items {
        let fields = CertificateFields {
            learner_name: format!("learner_{}", i),
            course_name: format!("course_{}", rng.gen_range(0..50)),
            institute_name: format!("institute_{}", rng.gen_range(0..5)),
            completion_date: "2024-01-01".to_string(),
        };
        let digest = generate_certificate_digest(&fields, DigestMode::IssuanceTime);
        let owner = format!("owner_{}", i % num_owners);
        store.issue(fields, &owner, &digest).await?;
        digests.push(digest);
    }
    let issue_elapsed = start_time.elapsed();

    // --- Time verification lookups against random existing digests ---
    let lookups = 200.min(num_items);
    let start_time = Instant::now();
    let mut found = 0usize;
    for _ in 0..lookups {
        let token = &digests[rng.gen_range(0..digests.len())];
        if store.find_by_digest_or_id(token).await?.is_some() {
            found += 1;
        }
    }
    let lookup_elapsed = start_time.elapsed();

    // --- Time owner listing ---
    let start_time = Instant::now();
    let mut listed = 0usize;
    for o in 0..num_owners {
        listed += store.list_by_owner(&format!("owner_{}", o)).await?.len();
    }
    let list_elapsed = start_time.elapsed();

    println!("\n--- Results ---");
    println!(
        "Issued {} certificates in {} ms ({:.2} µs each)",
        num_items,
        issue_elapsed.as_millis(),
        issue_elapsed.as_micros() as f64 / num_items.max(1) as f64
    );
    println!(
        "{} / {} lookups found, {:.2} µs per lookup",
        found,
        lookups,
        lookup_elapsed.as_micros() as f64 / lookups.max(1) as f64
    );
    println!(
        "Listed {} certificates for {} owners in {} ms",
        listed,
        num_owners,
        list_elapsed.as_millis()
    );

    println!("\nNote: every operation deserializes the full list. Cost grows linearly with the ledger size.");
    Ok(())
}
