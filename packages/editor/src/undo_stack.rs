//! # Undo/Redo Stack
//!
//! Linear history of whole-page snapshots.
//!
//! ## Design
//!
//! - The controller pushes the pre-mutation page before every edit
//! - Undo swaps the live page with the newest snapshot and moves the
//!   displaced state onto the redo stack; redo is the mirror image
//! - New edits clear the redo stack
//! - Batches collapse a burst of edits into one undo step: only the first
//!   snapshot inside a batch is recorded
//! - Depth is capped; the oldest snapshot is evicted first
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! stack.push_state(page.clone());
//! mutation.apply(&mut page, &mut ids)?;
//!
//! stack.undo(&mut page); // page is back to its pre-mutation state
//! stack.redo(&mut page);
//! ```

use ienet_document::PageData;
use std::collections::VecDeque;

/// Default number of undo levels kept
pub const DEFAULT_MAX_LEVELS: usize = 100;

/// One recorded page state
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub page: PageData,

    /// Label of the edit that followed this snapshot
    pub description: Option<String>,
}

#[derive(Debug, Default)]
struct OpenBatch {
    recorded: bool,
    description: Option<String>,
}

/// Undo/redo stack for page editing
#[derive(Debug)]
pub struct UndoStack {
    /// Snapshots before each edit (most recent last)
    undo_stack: VecDeque<HistoryEntry>,

    /// States displaced by undo (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<OpenBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record the state about to be changed
    pub fn push_state(&mut self, snapshot: PageData) {
        self.push_labeled(snapshot, None);
    }

    /// Record the state about to be changed, labelled with the edit
    pub fn push_labeled(&mut self, snapshot: PageData, description: Option<String>) {
        // New action invalidates future
        self.redo_stack.clear();

        if let Some(batch) = &mut self.current_batch {
            if batch.recorded {
                return;
            }
            batch.recorded = true;
        }

        self.undo_stack.push_back(HistoryEntry {
            page: snapshot,
            description,
        });

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.pop_front();
        }
    }

    /// Start a batch of edits (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(OpenBatch::default());
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    /// Close the current batch
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if let (true, Some(description)) = (batch.recorded, batch.description) {
                if let Some(entry) = self.undo_stack.back_mut() {
                    entry.description = Some(description);
                }
            }
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    /// Restore the most recent snapshot into `current`.
    ///
    /// Returns `false` (and leaves `current` alone) when there is nothing to undo.
    pub fn undo(&mut self, current: &mut PageData) -> bool {
        self.end_batch();

        match self.undo_stack.pop_back() {
            Some(entry) => {
                let displaced = std::mem::replace(current, entry.page);
                self.redo_stack.push(HistoryEntry {
                    page: displaced,
                    description: entry.description,
                });
                true
            }
            None => false, // Nothing to undo
        }
    }

    /// Re-apply the most recently undone state into `current`
    pub fn redo(&mut self, current: &mut PageData) -> bool {
        self.end_batch();

        match self.redo_stack.pop() {
            Some(entry) => {
                let displaced = std::mem::replace(current, entry.page);
                self.undo_stack.push_back(HistoryEntry {
                    page: displaced,
                    description: entry.description,
                });
                true
            }
            None => false, // Nothing to redo
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .back()
            .and_then(|entry| entry.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
