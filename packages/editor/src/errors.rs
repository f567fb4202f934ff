//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Drag error: {0}")]
    Drag(#[from] crate::drag_drop::DragError),

    #[error("Live edit error: {0}")]
    LiveEdit(#[from] crate::live_edit::LiveEditError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] crate::store::StoreError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl EditorError {
    /// Whether the error refers to something that does not exist
    pub fn is_not_found(&self) -> bool {
        use crate::live_edit::LiveEditError;
        use crate::mutations::MutationError;
        use crate::store::StoreError;

        matches!(
            self,
            EditorError::NotFound(_)
                | EditorError::Mutation(MutationError::NodeNotFound(_))
                | EditorError::Mutation(MutationError::ParentNotFound(_))
                | EditorError::LiveEdit(LiveEditError::RegionNotFound(_))
                | EditorError::Persistence(StoreError::NotFound(_))
        )
    }

    /// Whether a move was rejected for targeting the node's own subtree
    pub fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            EditorError::Mutation(crate::mutations::MutationError::CycleDetected { .. })
        )
    }
}
