pub mod file;
pub mod kv;
pub mod memory;
pub mod postgres;

pub use file::FileStore;
pub use kv::{KeyValueStore, CERTIFICATES_KEY, SESSION_KEY, USERS_KEY};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
