//! On-disk cache of the processed catalog, name index and similarity matrix
//!
//! Three artifacts form the cache. They are only trusted together: the cache
//! exists when all three files are present. A small manifest records the
//! fingerprint of the dataset the artifacts were built from.

use atomicwrites::{AtomicFile, OverwriteBehavior};
use nix::errno::Errno;
use nix::fcntl::{Flock, FlockArg};
use gamerec_core::{CatalogRecord, Error, NameIndex, Result, SimilarityMatrix};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const MATRIX_FILE: &str = "cosine_sim.bin";
pub const INDEX_FILE: &str = "indices.json";
pub const CATALOG_FILE: &str = "dataset.bin";
pub const MANIFEST_FILE: &str = "manifest.json";
const LOCK_FILE: &str = ".lock";

pub const CACHE_FORMAT_VERSION: u32 = 1;

/// Describes what a cache was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheManifest {
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_fingerprint: Option<String>,
    pub records: usize,
}

impl CacheManifest {
    pub fn new(dataset_fingerprint: Option<String>, records: usize) -> Self {
        Self {
            version: CACHE_FORMAT_VERSION,
            dataset_fingerprint,
            records,
        }
    }
}

/// Contents of a loaded cache
pub type CacheArtifacts = (SimilarityMatrix, NameIndex, Vec<CatalogRecord>);

/// Exclusive builder lock.
///
/// Backed by an advisory `flock` on the lock file, so the kernel releases it
/// when the holder exits, even on a crash. The file itself is left in place.
#[derive(Debug)]
pub struct CacheLock {
    _file: Flock<File>,
}

pub struct CacheLayer {
    cache_dir: PathBuf,
}

impl CacheLayer {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        fs::create_dir_all(&cache_dir)?;
        Ok(Self { cache_dir })
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.cache_dir.join(file)
    }

    /// True iff all three artifacts are present
    pub fn exists(&self) -> bool {
        [MATRIX_FILE, INDEX_FILE, CATALOG_FILE]
            .iter()
            .all(|file| self.path(file).is_file())
    }

    /// Deserialize all three artifacts and check they agree with each other
    pub fn load(&self) -> Result<CacheArtifacts> {
        let matrix: SimilarityMatrix = bincode::deserialize(&self.read(MATRIX_FILE)?)
            .map_err(|e| Error::cache_corrupt(MATRIX_FILE, e))?;
        matrix
            .validate()
            .map_err(|e| Error::cache_corrupt(MATRIX_FILE, e))?;

        let index: NameIndex = serde_json::from_slice(&self.read(INDEX_FILE)?)
            .map_err(|e| Error::cache_corrupt(INDEX_FILE, e))?;

        let catalog: Vec<CatalogRecord> = bincode::deserialize(&self.read(CATALOG_FILE)?)
            .map_err(|e| Error::cache_corrupt(CATALOG_FILE, e))?;

        if matrix.dim() != catalog.len() {
            return Err(Error::cache_corrupt(
                MATRIX_FILE,
                format!(
                    "matrix has {} rows but catalog has {} records",
                    matrix.dim(),
                    catalog.len()
                ),
            ));
        }
        if let Some(row) = index.max_row().filter(|&row| row >= catalog.len()) {
            return Err(Error::cache_corrupt(
                INDEX_FILE,
                format!("row {} is out of range for {} records", row, catalog.len()),
            ));
        }

        debug!("Cache loaded from {:?}: {} records", self.cache_dir, catalog.len());
        Ok((matrix, index, catalog))
    }

    fn read(&self, file: &str) -> Result<Vec<u8>> {
        fs::read(self.path(file)).map_err(|e| Error::cache_corrupt(file, e))
    }

    /// Read the manifest, if one was written
    pub fn manifest(&self) -> Result<Option<CacheManifest>> {
        let path = self.path(MANIFEST_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let data = fs::read(&path)?;
        let manifest = serde_json::from_slice(&data)
            .map_err(|e| Error::cache_corrupt(MANIFEST_FILE, e))?;
        Ok(Some(manifest))
    }

    /// Write every artifact via temp file + rename; the manifest goes last
    pub fn save(
        &self,
        matrix: &SimilarityMatrix,
        index: &NameIndex,
        catalog: &[CatalogRecord],
        manifest: &CacheManifest,
    ) -> Result<()> {
        fs::create_dir_all(&self.cache_dir)?;

        let catalog_bytes = bincode::serialize(catalog)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        let index_bytes =
            serde_json::to_vec(index).map_err(|e| Error::Serialization(e.to_string()))?;
        let matrix_bytes =
            bincode::serialize(matrix).map_err(|e| Error::Serialization(e.to_string()))?;
        let manifest_bytes = serde_json::to_vec_pretty(manifest)
            .map_err(|e| Error::Serialization(e.to_string()))?;

        self.write_atomic(CATALOG_FILE, &catalog_bytes)?;
        self.write_atomic(INDEX_FILE, &index_bytes)?;
        self.write_atomic(MATRIX_FILE, &matrix_bytes)?;
        self.write_atomic(MANIFEST_FILE, &manifest_bytes)?;

        debug!("Cache saved to {:?}", self.cache_dir);
        Ok(())
    }

    fn write_atomic(&self, file: &str, bytes: &[u8]) -> Result<()> {
        AtomicFile::new(self.path(file), OverwriteBehavior::AllowOverwrite)
            .write(|f| f.write_all(bytes))
            .map_err(|e| match e {
                atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => Error::Io(e),
            })
    }

    /// Take the builder lock. Returns `None` when another process holds it.
    pub fn try_lock(&self) -> Result<Option<CacheLock>> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.path(LOCK_FILE))?;
        match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
            Ok(mut file) => {
                file.set_len(0)?;
                writeln!(&mut *file, "{}", std::process::id())?;
                Ok(Some(CacheLock { _file: file }))
            }
            Err((_, errno)) if errno == Errno::EWOULDBLOCK => Ok(None),
            Err((_, errno)) => Err(Error::Io(io::Error::from(errno))),
        }
    }
}
