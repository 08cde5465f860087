mod credentials;
mod error;
mod firebase;
mod memory_storage;
mod path;
mod remote_store;

pub use credentials::{AmbientCredentials, StaticToken, TokenSource, DATABASE_SCOPES};
pub use error::StoreError;
pub use firebase::FirebaseStore;
pub use memory_storage::MemoryStore;
pub use path::{InvalidKey, StorePath, MAX_KEY_BYTES};
pub use remote_store::RemoteStore;
