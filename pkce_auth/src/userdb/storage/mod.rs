mod config;
mod edgeql;
mod memory;
mod types;

pub use config::{store_from_env, store_from_lookup};
pub use types::{EdgeqlHttpStore, MemoryUserStore, UpstreamStore};
