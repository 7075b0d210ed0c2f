//! Passage parse cache and its stores.
//!
//! The cache key is the raw passage string; nothing is normalized, so any
//! difference in the text is a different entry. Entries are never evicted.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::model::SentenceMap;
use crate::pipeline::SyntacticPipeline;
use crate::traits::ParseStore;

/// Memoizes the syntactic pipeline per passage.
///
/// Concurrent misses on the same passage share one pipeline run: the first
/// caller parses while the others wait on that passage's lock and then read
/// the stored result.
pub struct PassageCache {
    store: Arc<dyn ParseStore>,
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl PassageCache {
    pub fn new(store: Arc<dyn ParseStore>) -> Self {
        Self {
            store,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Return the stored sentence map of `passage`, running `pipeline` and
    /// storing its result on a miss.
    ///
    /// Pipeline failures are returned and not stored, so a waiting caller
    /// runs the pipeline again. A failing store write is logged; the fresh
    /// result is still returned.
    pub async fn get_or_parse(
        &self,
        passage: &str,
        pipeline: &SyntacticPipeline,
    ) -> Result<SentenceMap> {
        if let Some(hit) = self.store.get(passage).await? {
            debug!(sentences = hit.len(), "parse cache hit");
            return Ok(hit);
        }

        let passage_lock = {
            let mut in_flight = self.in_flight.lock().await;
            Arc::clone(in_flight.entry(passage.to_string()).or_default())
        };
        let _guard = passage_lock.lock().await;

        let result = self.parse_and_store(passage, pipeline).await;

        let mut in_flight = self.in_flight.lock().await;
        if in_flight
            .get(passage)
            .is_some_and(|lock| Arc::ptr_eq(lock, &passage_lock) && Arc::strong_count(lock) == 2)
        {
            in_flight.remove(passage);
        }
        result
    }

    async fn parse_and_store(
        &self,
        passage: &str,
        pipeline: &SyntacticPipeline,
    ) -> Result<SentenceMap> {
        // Another caller may have finished while this one waited.
        if let Some(hit) = self.store.get(passage).await? {
            debug!(sentences = hit.len(), "parse cache hit after waiting");
            return Ok(hit);
        }

        debug!("parse cache miss");
        let sentences = pipeline.parse_passage(passage).await?;
        if let Err(e) = self.store.put(passage, sentences.clone()).await {
            warn!("failed to persist parse cache entry: {e:#}");
        }
        Ok(sentences)
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Process-local store.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, SentenceMap>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl ParseStore for MemoryStore {
    async fn get(&self, passage: &str) -> Result<Option<SentenceMap>> {
        Ok(self.entries.lock().await.get(passage).cloned())
    }

    async fn put(&self, passage: &str, sentences: SentenceMap) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(passage.to_string(), sentences);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON file store
// ---------------------------------------------------------------------------

type CacheFile = BTreeMap<String, SentenceMap>;

/// Store persisted as one JSON object `passage -> sentence map`.
///
/// The file is read on first access. Every `put` rewrites the whole file
/// through a temporary file in the same directory, under the store lock.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<Option<CacheFile>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of cached passages, loading the file if needed.
    pub async fn len(&self) -> usize {
        let mut guard = self.entries.lock().await;
        self.loaded(&mut guard).len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn loaded<'a>(&self, slot: &'a mut Option<CacheFile>) -> &'a mut CacheFile {
        slot.get_or_insert_with(|| load_cache_file(&self.path))
    }

    fn persist(&self, entries: &CacheFile) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create cache directory {}", dir.display()))?;

        let json = serde_json::to_string(entries).context("failed to serialize parse cache")?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        tmp.write_all(json.as_bytes())
            .context("failed to write parse cache")?;
        tmp.persist(&self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

fn load_cache_file(path: &Path) -> CacheFile {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no parse cache file, starting empty");
            return CacheFile::new();
        }
        Err(e) => {
            warn!(path = %path.display(), "cannot read parse cache, starting empty: {e}");
            return CacheFile::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %path.display(), "corrupt parse cache, starting empty: {e}");
            CacheFile::new()
        }
    }
}

#[async_trait]
impl ParseStore for JsonFileStore {
    async fn get(&self, passage: &str) -> Result<Option<SentenceMap>> {
        let mut guard = self.entries.lock().await;
        Ok(self.loaded(&mut guard).get(passage).cloned())
    }

    async fn put(&self, passage: &str, sentences: SentenceMap) -> Result<()> {
        let mut guard = self.entries.lock().await;
        let entries = self.loaded(&mut guard);
        entries.insert(passage.to_string(), sentences);
        self.persist(entries)
    }
}
