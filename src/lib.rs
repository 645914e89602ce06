pub mod app;
pub mod crypto;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::LedgerService;
pub use crypto::hashing::{generate_certificate_digest, password_digest, DigestMode};
pub use domain::{
    Certificate, CertificateFields, CertificateStore, IdentityStore, LedgerError, SessionIdentity,
    SessionState, User,
};
pub use infra::config::{LedgerConfig, StoreBackend};
pub use storage::{FileStore, KeyValueStore, MemoryStore, PostgresStore};
