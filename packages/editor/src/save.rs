//! # Save Protocol
//!
//! Saving is split in three so the page stays editable while a save is in
//! flight:
//!
//! 1. [`Builder::begin_save`](crate::Builder::begin_save) validates and
//!    snapshots the page into a [`SaveRequest`], cancelling any older request
//! 2. [`SaveRequest::execute`] runs against a store, racing its cancellation token
//! 3. [`Builder::finish_save`](crate::Builder::finish_save) folds the
//!    [`SaveResponse`] back in; responses from superseded requests are ignored

use crate::store::{PageStore, StoreError};
use chrono::{DateTime, Utc};
use ienet_document::PageData;
use serde::Serialize;
use std::fmt;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    /// Every applied edit is persisted
    Saved,

    /// There are edits the store has not seen
    Unsaved,

    /// A save is in flight and no edit happened since it started
    Saving,
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SaveStatus::Saved => "saved",
            SaveStatus::Unsaved => "unsaved",
            SaveStatus::Saving => "saving",
        })
    }
}

/// A snapshot on its way to the store
#[derive(Debug)]
pub struct SaveRequest {
    pub generation: u64,

    /// Builder revision the snapshot was taken at
    pub revision: u64,

    pub page: PageData,

    cancel: CancellationToken,
}

impl SaveRequest {
    pub(crate) fn new(
        generation: u64,
        revision: u64,
        page: PageData,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            generation,
            revision,
            page,
            cancel,
        }
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Run the save. Never fails; the outcome is carried in the response.
    pub async fn execute(self, store: &dyn PageStore) -> SaveResponse {
        let outcome = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => SaveOutcome::Cancelled,
            result = store.save_page(&self.page) => match result {
                Ok(page) => SaveOutcome::Saved {
                    page,
                    saved_at: Utc::now(),
                },
                Err(e) => SaveOutcome::Failed(e),
            },
        };

        SaveResponse {
            generation: self.generation,
            revision: self.revision,
            outcome,
        }
    }
}

#[derive(Debug)]
pub enum SaveOutcome {
    Saved {
        /// The page as the store echoed it
        page: PageData,
        saved_at: DateTime<Utc>,
    },
    Failed(StoreError),
    Cancelled,
}

#[derive(Debug)]
pub struct SaveResponse {
    pub generation: u64,
    pub revision: u64,
    pub outcome: SaveOutcome,
}

impl SaveResponse {
    pub fn is_saved(&self) -> bool {
        matches!(self.outcome, SaveOutcome::Saved { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_execute_saves_snapshot() {
        let store = MemoryStore::new();
        let request = SaveRequest::new(1, 4, PageData::new("p", "Page"), CancellationToken::new());

        let response = request.execute(&store).await;
        assert!(response.is_saved());
        assert_eq!(response.revision, 4);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_cancelled_request_does_not_save() {
        let store = MemoryStore::new();
        let token = CancellationToken::new();
        let request = SaveRequest::new(1, 0, PageData::new("p", "Page"), token.clone());

        token.cancel();
        let response = request.execute(&store).await;

        assert!(matches!(response.outcome, SaveOutcome::Cancelled));
        assert!(store.is_empty().await);
    }
}
