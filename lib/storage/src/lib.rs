pub mod dataset;
pub mod cache;
pub mod manager;

pub use dataset::{fingerprint, load_catalog, read_catalog, REQUIRED_COLUMNS};
pub use cache::{CacheArtifacts, CacheLayer, CacheLock, CacheManifest};
pub use manager::{LoadSource, StorageManager, StoreConfig};
