pub mod hashing;

pub use hashing::{
    certificate_digest, generate_certificate_digest, password_digest, verify_password, DigestMode,
};
