// Collaborators and persistence

pub mod portal_api;
pub mod snapshot_cache;

#[cfg(target_arch = "wasm32")]
pub mod api_client;

pub use portal_api::{AuthApi, ProfileApi};
pub use snapshot_cache::{CachedSession, PersistedEntries, SnapshotCache};

#[cfg(target_arch = "wasm32")]
pub use api_client::ApiClient;
