//! # Page Persistence
//!
//! The builder's only external collaborator. A store loads and upserts whole
//! pages; transport is the implementor's business. Saves must be safe to
//! retry.

use async_trait::async_trait;
use ienet_document::PageData;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("Invalid page id: {0:?}")]
    InvalidId(String),

    #[error("Slug '{slug}' is already used by page {owner}")]
    SlugConflict { slug: String, owner: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PageStore: Send + Sync {
    /// Fetch a full page by id
    async fn load_page(&self, id: &str) -> Result<PageData, StoreError>;

    /// Upsert a full page, returning what was stored
    async fn save_page(&self, page: &PageData) -> Result<PageData, StoreError>;
}

/// In-process store keyed by page id. Enforces slug uniqueness.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: RwLock<HashMap<String, PageData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(pages: impl IntoIterator<Item = PageData>) -> Self {
        Self {
            pages: RwLock::new(pages.into_iter().map(|p| (p.id.clone(), p)).collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.pages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pages.read().await.is_empty()
    }
}

#[async_trait]
impl PageStore for MemoryStore {
    async fn load_page(&self, id: &str) -> Result<PageData, StoreError> {
        self.pages
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn save_page(&self, page: &PageData) -> Result<PageData, StoreError> {
        let mut pages = self.pages.write().await;

        if let Some(owner) = pages
            .values()
            .find(|other| other.id != page.id && other.slug == page.slug)
        {
            return Err(StoreError::SlugConflict {
                slug: page.slug.clone(),
                owner: owner.id.clone(),
            });
        }

        pages.insert(page.id.clone(), page.clone());
        Ok(page.clone())
    }
}

/// One pretty-printed `<id>.json` file per page in a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
    writes: Arc<WriteLog>,
}

/// Orders file writes per page. A write started earlier never replaces
/// one started later, even if its caller stopped waiting for it.
#[derive(Debug, Default)]
struct WriteLog {
    next: AtomicU64,
    published: Mutex<HashMap<String, u64>>,
}

impl WriteLog {
    fn publish(
        &self,
        seq: u64,
        id: &str,
        root: &Path,
        path: &Path,
        json: &[u8],
    ) -> Result<bool, StoreError> {
        let mut published = self
            .published
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if published.get(id).is_some_and(|&last| last > seq) {
            return Ok(false);
        }

        // own temp file per write, renamed into place
        std::fs::create_dir_all(root)?;
        let mut tmp = tempfile::NamedTempFile::new_in(root)?;
        tmp.write_all(json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;

        published.insert(id.to_string(), seq);
        Ok(true)
    }
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            writes: Arc::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing page `id`
    pub fn page_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(format!("{}.json", id)))
    }
}

#[async_trait]
impl PageStore for JsonFileStore {
    async fn load_page(&self, id: &str) -> Result<PageData, StoreError> {
        let path = self.page_path(id)?;
        let source = match tokio::fs::read_to_string(&path).await {
            Ok(source) => source,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&source)?)
    }

    async fn save_page(&self, page: &PageData) -> Result<PageData, StoreError> {
        let path = self.page_path(&page.id)?;
        let json = serde_json::to_vec_pretty(page)?;
        let seq = self.writes.next.fetch_add(1, Ordering::SeqCst) + 1;

        let writes = Arc::clone(&self.writes);
        let root = self.root.clone();
        let id = page.id.clone();
        let written_path = path.clone();
        let written = tokio::task::spawn_blocking(move || {
            writes.publish(seq, &id, &root, &written_path, &json)
        })
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))??;

        if written {
            tracing::debug!(page = %page.id, path = %path.display(), "page written");
        } else {
            tracing::debug!(page = %page.id, seq, "write superseded by a newer save");
        }
        Ok(page.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        let page = PageData::new("home", "Home");

        store.save_page(&page).await.unwrap();
        assert_eq!(store.load_page("home").await.unwrap(), page);
        assert!(matches!(
            store.load_page("missing").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_memory_store_rejects_taken_slug() {
        let store = MemoryStore::with_pages([PageData::new("a", "Services")]);
        let clash = PageData::new("b", "Services");

        match store.save_page(&clash).await {
            Err(StoreError::SlugConflict { slug, owner }) => {
                assert_eq!(slug, "services");
                assert_eq!(owner, "a");
            }
            other => panic!("expected slug conflict, got {:?}", other),
        }
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("pages"));
        let page = PageData::new("about", "About Us");

        store.save_page(&page).await.unwrap();
        assert!(dir.path().join("pages/about.json").exists());
        assert_eq!(store.load_page("about").await.unwrap(), page);
    }

    #[tokio::test]
    async fn test_json_store_rejects_path_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(matches!(
            store.load_page("../etc/passwd").await,
            Err(StoreError::InvalidId(_))
        ));
        assert!(matches!(
            store.save_page(&PageData::new("my page", "Mine")).await,
            Err(StoreError::InvalidId(_))
        ));
        assert!(matches!(
            store.load_page("nope").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_stale_write_never_replaces_newer() {
        let dir = tempfile::tempdir().unwrap();
        let log = WriteLog::default();
        let path = dir.path().join("home.json");

        assert!(log.publish(2, "home", dir.path(), &path, b"newer").unwrap());
        assert!(!log.publish(1, "home", dir.path(), &path, b"older").unwrap());
        assert_eq!(std::fs::read(&path).unwrap(), b"newer");

        // other pages are ordered independently
        let other = dir.path().join("about.json");
        assert!(log.publish(1, "about", dir.path(), &other, b"about").unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_saves_leave_last_page_intact() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let mut first = PageData::new("home", "Home");
        first.seo.description = "x".repeat(64 * 1024);
        let second = PageData::new("home", "Home v2");

        let (a, b) = tokio::join!(store.save_page(&first), store.save_page(&second));
        a.unwrap();
        b.unwrap();

        assert_eq!(store.load_page("home").await.unwrap(), second);
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(true, |ext| ext != "json"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
