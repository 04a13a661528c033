use crate::cache::{CacheLayer, CacheManifest, CACHE_FORMAT_VERSION};
use crate::dataset::{fingerprint, load_catalog};
use gamerec_core::{Error, NameIndex, Recommender, Result};
use gamerec_similarity::build_similarity;
use std::path::PathBuf;
use tracing::{info, warn};

/// Where the store reads its data from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub dataset_path: PathBuf,
    pub cache_dir: PathBuf,
    /// Compare the dataset fingerprint with the cache manifest
    pub verify_fingerprint: bool,
    /// Ignore any existing cache
    pub force_rebuild: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("dataset_steam_games.csv"),
            cache_dir: PathBuf::from("cache"),
            verify_fingerprint: true,
            force_rebuild: false,
        }
    }
}

/// How the model was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    Cache,
    Built,
    /// A cache existed but was unusable
    Rebuilt { reason: String },
}

/// Builds the model from the dataset or restores it from the cache
pub struct StorageManager {
    config: StoreConfig,
    cache: CacheLayer,
}

impl StorageManager {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let cache = CacheLayer::new(&config.cache_dir)?;
        Ok(Self { config, cache })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn cache(&self) -> &CacheLayer {
        &self.cache
    }

    /// Load the model, rebuilding when the cache is missing, stale or corrupt
    pub fn open(&self) -> Result<(Recommender, LoadSource)> {
        // Hashed at most once, and only when a check or a build needs it
        let mut dataset_fingerprint = None;

        let mut reason = None;
        if self.config.force_rebuild {
            info!("Rebuild requested, ignoring cache");
        } else if self.cache.exists() {
            match self.try_cache(&mut dataset_fingerprint) {
                Ok(Some(recommender)) => {
                    info!("Loaded {} games from cache {:?}", recommender.len(), self.cache.dir());
                    return Ok((recommender, LoadSource::Cache));
                }
                Ok(None) => reason = Some("cache is stale".to_string()),
                Err(e @ Error::CacheCorrupt { .. }) => {
                    warn!("{}; falling back to full recomputation", e);
                    reason = Some(e.to_string());
                }
                Err(e) => return Err(e),
            }
        }

        let recommender = self.build(dataset_fingerprint)?;
        let source = match reason {
            Some(reason) => LoadSource::Rebuilt { reason },
            None => LoadSource::Built,
        };
        Ok((recommender, source))
    }

    fn dataset_fingerprint(&self) -> Result<Option<String>> {
        if !self.config.dataset_path.is_file() {
            return Ok(None);
        }
        fingerprint(&self.config.dataset_path).map(Some)
    }

    /// Returns `None` when the cache does not match the dataset
    fn try_cache(
        &self,
        dataset_fingerprint: &mut Option<Option<String>>,
    ) -> Result<Option<Recommender>> {
        if self.config.verify_fingerprint {
            if let Some(manifest) = self.cache.manifest()? {
                if manifest.version != CACHE_FORMAT_VERSION {
                    warn!(
                        "Cache format version {} does not match {}",
                        manifest.version, CACHE_FORMAT_VERSION
                    );
                    return Ok(None);
                }
                if let Some(cached) = manifest.dataset_fingerprint.as_deref() {
                    if dataset_fingerprint.is_none() {
                        *dataset_fingerprint = Some(self.dataset_fingerprint()?);
                    }
                    let current = dataset_fingerprint.as_ref().and_then(Option::as_deref);
                    if current.is_some_and(|current| current != cached) {
                        warn!("Dataset changed since the cache was built");
                        return Ok(None);
                    }
                }
            }
        }

        let (matrix, index, catalog) = self.cache.load()?;
        Ok(Some(Recommender::new(matrix, index, catalog)))
    }

    fn build(&self, dataset_fingerprint: Option<Option<String>>) -> Result<Recommender> {
        let catalog = load_catalog(&self.config.dataset_path)?;
        let dataset_fingerprint = match dataset_fingerprint {
            Some(known) => known,
            None => self.dataset_fingerprint()?,
        };
        let matrix = build_similarity(&catalog)?;
        let index = NameIndex::build(&catalog);

        match self.cache.try_lock()? {
            Some(_lock) => {
                let manifest = CacheManifest::new(dataset_fingerprint, catalog.len());
                self.cache.save(&matrix, &index, &catalog, &manifest)?;
                info!("Cache written to {:?}", self.cache.dir());
            }
            None => warn!(
                "Another process is writing the cache in {:?}; skipping save",
                self.cache.dir()
            ),
        }

        Ok(Recommender::new(matrix, index, catalog))
    }
}
