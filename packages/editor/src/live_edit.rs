//! # Live Editing
//!
//! In-place text editing on the rendered page.
//!
//! The editor keeps an explicit registry of editable regions, keyed by
//! element id and rebuilt from the page: every text or button element whose
//! settings mark it `editable`. Edits never touch the page directly. A commit
//! yields an [`Mutation::UpdateText`] that the builder applies like any other
//! mutation, so live edits share history and save tracking.

use crate::Mutation;
use ienet_document::{ElementType, PageData};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiveEditError {
    #[error("Live editing is not active")]
    Inactive,

    #[error("No editable region for element: {0}")]
    RegionNotFound(String),

    #[error("Already editing element: {0}")]
    AlreadyEditing(String),

    #[error("No region is being edited")]
    NotEditing,
}

/// A text-bearing element open to in-place editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditableRegion {
    pub element_id: String,
    pub element_type: ElementType,

    /// Text as it is on the page
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenEdit {
    element_id: String,
    draft: String,
}

/// Registry of editable regions and the single open edit
#[derive(Debug, Default)]
pub struct LiveEditor {
    /// `None` while inactive
    regions: Option<Vec<EditableRegion>>,
    editing: Option<OpenEdit>,
}

impl LiveEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter live-edit mode, registering the page's editable regions
    pub fn activate(&mut self, page: &PageData) -> usize {
        let regions = collect_regions(page);
        let count = regions.len();
        self.regions = Some(regions);
        self.editing = None;
        tracing::debug!(regions = count, "live editing activated");
        count
    }

    /// Leave live-edit mode, discarding any open draft
    pub fn deactivate(&mut self) {
        self.regions = None;
        self.editing = None;
    }

    pub fn is_active(&self) -> bool {
        self.regions.is_some()
    }

    /// Re-register regions after the page changed.
    ///
    /// An open edit survives only if its region still exists.
    pub fn refresh(&mut self, page: &PageData) {
        if !self.is_active() {
            return;
        }
        let regions = collect_regions(page);
        if let Some(edit) = &self.editing {
            if !regions.iter().any(|r| r.element_id == edit.element_id) {
                self.editing = None;
            }
        }
        self.regions = Some(regions);
    }

    pub fn regions(&self) -> &[EditableRegion] {
        self.regions.as_deref().unwrap_or_default()
    }

    pub fn region(&self, element_id: &str) -> Option<&EditableRegion> {
        self.regions().iter().find(|r| r.element_id == element_id)
    }

    /// Id of the region being edited
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_ref().map(|edit| edit.element_id.as_str())
    }

    pub fn draft(&self) -> Option<&str> {
        self.editing.as_ref().map(|edit| edit.draft.as_str())
    }

    /// Open a region for editing; the draft starts as the current text
    pub fn begin_edit(&mut self, element_id: &str) -> Result<&str, LiveEditError> {
        let regions = self.regions.as_ref().ok_or(LiveEditError::Inactive)?;
        if let Some(edit) = &self.editing {
            return Err(LiveEditError::AlreadyEditing(edit.element_id.clone()));
        }
        let region = regions
            .iter()
            .find(|r| r.element_id == element_id)
            .ok_or_else(|| LiveEditError::RegionNotFound(element_id.to_string()))?;

        let edit = self.editing.insert(OpenEdit {
            element_id: region.element_id.clone(),
            draft: region.text.clone(),
        });
        Ok(&edit.draft)
    }

    pub fn update_draft(&mut self, text: impl Into<String>) -> Result<(), LiveEditError> {
        let edit = self.editing.as_mut().ok_or(LiveEditError::NotEditing)?;
        edit.draft = text.into();
        Ok(())
    }

    /// Close the open edit, producing the mutation that applies it
    pub fn commit(&mut self) -> Result<Mutation, LiveEditError> {
        let edit = self.editing.take().ok_or(LiveEditError::NotEditing)?;
        Ok(Mutation::UpdateText {
            node_id: edit.element_id,
            content: edit.draft,
        })
    }

    /// Close the open edit without changes
    pub fn cancel_edit(&mut self) -> Result<(), LiveEditError> {
        self.editing.take().map(|_| ()).ok_or(LiveEditError::NotEditing)
    }
}

fn collect_regions(page: &PageData) -> Vec<EditableRegion> {
    page.iter()
        .filter(|element| {
            element.element_type.carries_text() && element.properties.settings.editable
        })
        .map(|element| EditableRegion {
            element_id: element.id.clone(),
            element_type: element.element_type,
            text: element.content.clone().unwrap_or_default(),
        })
        .collect()
}
