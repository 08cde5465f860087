pub mod config;
pub mod model;
pub mod store;

#[cfg(feature = "server")]
pub mod server;

pub mod prelude {
    pub use crate::config::Config;
    pub use crate::model::LobbyRoomRequest;
    pub use crate::model::LobbyRoomResponse;
    pub use crate::model::LobbyUser;
    pub use crate::model::MembershipStatus;
    pub use crate::store::FirebaseStore;
    pub use crate::store::MemoryStore;
    pub use crate::store::RemoteStore;
    pub use crate::store::StoreError;
    pub use crate::store::StorePath;
}
