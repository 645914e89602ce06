pub mod config;
pub mod store;

pub use config::{LedgerConfig, StoreBackend};
pub use store::open_store;
