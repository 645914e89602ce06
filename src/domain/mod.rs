//! Domain layer: records, the two stores, and the error taxonomy.

pub mod certificates;
pub mod error;
pub mod identity;
pub mod model;

pub use certificates::CertificateStore;
pub use error::{LedgerError, Result};
pub use identity::IdentityStore;
pub use model::{Certificate, CertificateFields, SessionIdentity, SessionState, User};
