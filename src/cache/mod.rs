// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Caching of decoded tile stacks.
//!
//! Decoding every source frame once per tile is the expensive part of an
//! out-of-core run, so tile stacks are persisted keyed by (source directory,
//! tile bounds). The cache is an explicit handle over an injected storage
//! backend; production uses a directory on disk, tests inject an in-memory
//! map. The index read-modify-write is serialized behind a mutex: parallel
//! tile workers never contend on payloads (distinct keys, distinct files)
//! but would otherwise race on the shared index.
//!
//! The cache only ever grows; `substacker cache clear` is the manual
//! eviction escape hatch.

mod error;
mod format;

pub use error::CacheError;

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::trace;
use ndarray::{Array3, ArrayView3};
use serde::{Deserialize, Serialize};

use crate::tiling::Tile;

/// The index lives alongside the payloads in the backend.
pub(crate) const CACHE_INDEX_NAME: &str = "index.json";

/// A cache key: where the frames came from, and which sub-rectangle of them
/// was extracted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub source_dir: String,
    pub tile: Tile,
}

impl CacheKey {
    /// The index is a JSON map, so keys are rendered to strings.
    fn index_key(&self) -> String {
        format!(
            "{}:rows={}..{}:cols={}..{}",
            self.source_dir, self.tile.y0, self.tile.y1, self.tile.x0, self.tile.x1
        )
    }

    /// A filesystem-safe payload name. Collisions are a non-issue at 64 bits;
    /// lookups go through the index anyway.
    fn payload_name(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.index_key().hash(&mut hasher);
        format!("{:016x}.tile", hasher.finish())
    }
}

/// What the index remembers about a persisted tile stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub payload: String,
    pub num_frames: usize,
    pub height: usize,
    pub width: usize,
}

impl CacheEntry {
    /// The size of the payload this entry describes.
    pub fn payload_bytes(&self) -> usize {
        format::payload_len(self.num_frames, self.height, self.width)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheIndex {
    entries: BTreeMap<String, CacheEntry>,
}

/// Storage seam for the cache. Implementations must tolerate concurrent
/// calls with distinct names.
pub trait CacheBackend: Send + Sync {
    /// `Ok(None)` means the name doesn't exist.
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, CacheError>;
    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), CacheError>;
    /// Removing a non-existent name is not an error.
    fn remove(&self, name: &str) -> Result<(), CacheError>;
}

/// The production backend: a directory of payload files plus the index.
pub struct FsBackend {
    dir: PathBuf,
}

impl FsBackend {
    pub fn new(dir: &Path) -> FsBackend {
        FsBackend {
            dir: dir.to_path_buf(),
        }
    }
}

impl CacheBackend for FsBackend {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match std::fs::read(self.dir.join(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.dir.join(name), bytes)?;
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), CacheError> {
        match std::fs::remove_file(self.dir.join(name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// An in-memory backend for tests. Clones share storage.
#[derive(Default, Clone)]
pub struct MemBackend {
    map: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}

impl CacheBackend for MemBackend {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.map.lock().unwrap().get(name).cloned())
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), CacheError> {
        self.map
            .lock()
            .unwrap()
            .insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), CacheError> {
        self.map.lock().unwrap().remove(name);
        Ok(())
    }
}

/// A handle to a tile cache.
pub struct TileCache {
    backend: Box<dyn CacheBackend>,
    index: Mutex<CacheIndex>,
}

impl TileCache {
    /// Open (or create) a filesystem-backed cache directory.
    pub fn open(dir: &Path) -> Result<TileCache, CacheError> {
        TileCache::with_backend(Box::new(FsBackend::new(dir)))
    }

    /// Create a cache over an arbitrary backend, loading any existing index.
    pub fn with_backend(backend: Box<dyn CacheBackend>) -> Result<TileCache, CacheError> {
        let index = match backend.read(CACHE_INDEX_NAME)? {
            Some(bytes) => serde_json::from_slice(&bytes)?,
            None => CacheIndex::default(),
        };
        Ok(TileCache {
            backend,
            index: Mutex::new(index),
        })
    }

    /// Load a cached tile stack, validating its shape against what the
    /// caller is asking for. `Ok(None)` is a miss; a shape mismatch means the
    /// cache is corrupted or stale (e.g. frames were added to the source
    /// directory) and is an error, not a miss.
    pub fn load(
        &self,
        key: &CacheKey,
        num_frames: usize,
    ) -> Result<Option<Array3<f32>>, CacheError> {
        let index_key = key.index_key();
        let entry = self.index.lock().unwrap().entries.get(&index_key).cloned();
        let entry = match entry {
            Some(entry) => entry,
            None => return Ok(None),
        };

        let expected = (num_frames, key.tile.height(), key.tile.width());
        let claimed = (entry.num_frames, entry.height, entry.width);
        if claimed != expected {
            return Err(CacheError::Corrupted {
                key: index_key,
                expected,
                found: claimed,
            });
        }

        let bytes = match self.backend.read(&entry.payload)? {
            Some(bytes) => bytes,
            None => {
                return Err(CacheError::MissingPayload {
                    payload: entry.payload,
                })
            }
        };
        let stack = format::read_stack(&bytes)?;
        if stack.dim() != expected {
            return Err(CacheError::Corrupted {
                key: index_key,
                expected,
                found: stack.dim(),
            });
        }
        trace!("cache hit for {index_key}");
        Ok(Some(stack))
    }

    /// Persist a tile stack and its index entry. Concurrent stores of
    /// distinct tiles are fine; the index update is the serialized part.
    pub fn store(&self, key: &CacheKey, stack: ArrayView3<f32>) -> Result<(), CacheError> {
        let (num_frames, height, width) = stack.dim();
        let payload = key.payload_name();
        self.backend.write(&payload, &format::write_stack(stack))?;

        let mut index = self.index.lock().unwrap();
        index.entries.insert(
            key.index_key(),
            CacheEntry {
                payload,
                num_frames,
                height,
                width,
            },
        );
        let bytes = serde_json::to_vec_pretty(&*index)?;
        self.backend.write(CACHE_INDEX_NAME, &bytes)?;
        Ok(())
    }

    /// The index contents, for diagnostics.
    pub fn entries(&self) -> Vec<(String, CacheEntry)> {
        self.index
            .lock()
            .unwrap()
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Delete every payload and the index itself. Returns how many entries
    /// were removed.
    pub fn clear(&self) -> Result<usize, CacheError> {
        let mut index = self.index.lock().unwrap();
        let num_entries = index.entries.len();
        for entry in index.entries.values() {
            self.backend.remove(&entry.payload)?;
        }
        index.entries.clear();
        self.backend.remove(CACHE_INDEX_NAME)?;
        Ok(num_entries)
    }
}
