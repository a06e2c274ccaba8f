mod errors;
mod reconcile;
mod storage;
mod types;

pub use errors::UserError;
pub(crate) use reconcile::{create_user, find_linked_user, resolve_issuer};
pub use storage::{
    EdgeqlHttpStore, MemoryUserStore, UpstreamStore, store_from_env, store_from_lookup,
};
pub use types::{Identity, LinkOutcome, NewUser, User};
