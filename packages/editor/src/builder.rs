//! # Builder Controller
//!
//! Owns one page and everything that edits it: id generation, history,
//! selection, breakpoint, drag gesture, live editing and save tracking.
//!
//! Every change goes through [`Builder::apply`]:
//!
//! ```text
//! snapshot ─▶ apply mutation ─▶ push history (on success) ─▶ revision += 1 ─▶ Unsaved
//! ```
//!
//! A failed mutation restores the snapshot, so the page is never left
//! half-edited.

use crate::drag_drop::{drop_zones, CancelReason, DragController, DragOutcome, DragSource, DropZone};
use crate::library::ComponentLibrary;
use crate::live_edit::LiveEditor;
use crate::mutations::{Applied, ElementPatch, Mutation, MutationError, MutationResult, ShiftDirection};
use crate::responsive::{canvas_style, resolve_style};
use crate::save::{SaveOutcome, SaveRequest, SaveResponse, SaveStatus};
use crate::store::{PageStore, StoreError};
use crate::undo_stack::{UndoStack, DEFAULT_MAX_LEVELS};
use crate::EditorError;
use chrono::{DateTime, Utc};
use ienet_document::{
    Breakpoint, ElementTemplate, IDGenerator, PageData, PageElement, PageSettings, SeoMetadata,
    StyleMap,
};
use ienet_seo::SeoReport;
use tokio_util::sync::CancellationToken;

/// Tunables for a builder session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Undo levels kept (0 = unlimited)
    pub history_depth: usize,

    /// Breakpoint the canvas opens at
    pub default_breakpoint: Breakpoint,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_MAX_LEVELS,
            default_breakpoint: Breakpoint::Desktop,
        }
    }
}

/// Result of releasing a drag gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropResult {
    Applied(MutationResult),
    Cancelled(CancelReason),
}

#[derive(Debug)]
struct InFlightSave {
    generation: u64,
    cancel: CancellationToken,
}

/// Editing session over one page
#[derive(Debug)]
pub struct Builder {
    page: PageData,
    ids: IDGenerator,
    history: UndoStack,
    library: ComponentLibrary,
    drag: DragController,
    live: LiveEditor,

    selection: Option<String>,
    breakpoint: Breakpoint,

    /// Bumped by every applied mutation, undo and redo
    revision: u64,
    status: SaveStatus,
    save_generation: u64,
    in_flight: Option<InFlightSave>,
    last_saved_at: Option<DateTime<Utc>>,
}

impl Builder {
    /// Open a page that has not been persisted yet
    pub fn new(page: PageData) -> Self {
        Self::with_options(page, BuilderOptions::default())
    }

    pub fn with_options(page: PageData, options: BuilderOptions) -> Self {
        Self {
            ids: IDGenerator::new(&page.id),
            page,
            history: UndoStack::with_max_levels(options.history_depth),
            library: ComponentLibrary::new(),
            drag: DragController::new(),
            live: LiveEditor::new(),
            selection: None,
            breakpoint: options.default_breakpoint,
            revision: 0,
            status: SaveStatus::Unsaved,
            save_generation: 0,
            in_flight: None,
            last_saved_at: None,
        }
    }

    /// Load a stored page; it starts out `Saved`
    pub async fn load(
        store: &dyn PageStore,
        id: &str,
        options: BuilderOptions,
    ) -> Result<Self, EditorError> {
        let page = store.load_page(id).await.map_err(|e| match e {
            StoreError::NotFound(id) => EditorError::NotFound(id),
            other => EditorError::Persistence(other),
        })?;

        tracing::info!(page = %page.id, elements = page.element_count(), "page loaded");

        let mut builder = Self::with_options(page, options);
        builder.status = SaveStatus::Saved;
        Ok(builder)
    }

    pub fn page(&self) -> &PageData {
        &self.page
    }

    /// Consume the session, returning the page as edited
    pub fn into_page(self) -> PageData {
        self.page
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    pub fn is_dirty(&self) -> bool {
        self.status != SaveStatus::Saved
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    pub fn library(&self) -> &ComponentLibrary {
        &self.library
    }

    // ---- queries ----

    pub fn find_element(&self, id: &str) -> Option<&PageElement> {
        self.page.find_element(id)
    }

    pub fn find_parent_element(&self, id: &str) -> Option<&PageElement> {
        self.page.find_parent_element(id)
    }

    pub fn seo_report(&self) -> SeoReport {
        ienet_seo::analyze(&self.page)
    }

    // ---- selection & breakpoint ----

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn selected_element(&self) -> Option<&PageElement> {
        self.selection.as_deref().and_then(|id| self.page.find_element(id))
    }

    /// Select an element, or clear the selection with `None`
    pub fn select(&mut self, id: Option<&str>) -> Result<(), EditorError> {
        if let Some(id) = id {
            if !self.page.contains(id) {
                return Err(MutationError::NodeNotFound(id.to_string()).into());
            }
        }
        self.selection = id.map(str::to_string);
        Ok(())
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
        self.breakpoint = breakpoint;
    }

    /// Effective style of an element at the current breakpoint
    pub fn resolved_style(&self, id: &str) -> Option<StyleMap> {
        self.page
            .find_element(id)
            .map(|element| resolve_style(element, self.breakpoint))
    }

    /// Preview frame style at the current breakpoint
    pub fn canvas_style(&self) -> StyleMap {
        canvas_style(self.breakpoint)
    }

    // ---- mutations ----

    /// Apply a mutation, recording history on success
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let snapshot = self.page.clone();

        let applied = match mutation.apply(&mut self.page, &mut self.ids) {
            Ok(applied) => applied,
            Err(e) => {
                self.page = snapshot;
                tracing::debug!(mutation = mutation.label(), error = %e, "mutation rejected");
                return Err(e.into());
            }
        };

        if applied.changed() {
            self.history
                .push_labeled(snapshot, Some(mutation.label().to_string()));
            self.mark_changed();
        }

        Ok(MutationResult {
            revision: self.revision,
            applied,
        })
    }

    pub fn add_element(
        &mut self,
        template: ElementTemplate,
        parent_id: Option<&str>,
        index: Option<usize>,
    ) -> Result<String, EditorError> {
        let result = self.apply(Mutation::AddElement {
            template,
            parent_id: parent_id.map(str::to_string),
            index,
        })?;
        inserted(result)
    }

    /// Add a component library template by id
    pub fn add_from_library(
        &mut self,
        template_id: &str,
        parent_id: Option<&str>,
        index: Option<usize>,
    ) -> Result<String, EditorError> {
        let template = self
            .library
            .get(template_id)
            .map(|entry| entry.template.clone())
            .ok_or_else(|| EditorError::NotFound(format!("template {}", template_id)))?;
        self.add_element(template, parent_id, index)
    }

    pub fn update_element(&mut self, id: &str, patch: ElementPatch) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::UpdateElement {
            node_id: id.to_string(),
            patch,
        })
    }

    pub fn remove_element(&mut self, id: &str) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::RemoveElement {
            node_id: id.to_string(),
        })
    }

    /// Clone an element next to itself, returning the clone's id
    pub fn duplicate_element(&mut self, id: &str) -> Result<String, EditorError> {
        let result = self.apply(Mutation::DuplicateElement {
            node_id: id.to_string(),
        })?;
        inserted(result)
    }

    pub fn move_element(
        &mut self,
        id: &str,
        new_parent_id: Option<&str>,
        index: usize,
    ) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::MoveElement {
            node_id: id.to_string(),
            new_parent_id: new_parent_id.map(str::to_string),
            index,
        })
    }

    pub fn move_up(&mut self, id: &str) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::ShiftElement {
            node_id: id.to_string(),
            direction: ShiftDirection::Up,
        })
    }

    pub fn move_down(&mut self, id: &str) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::ShiftElement {
            node_id: id.to_string(),
            direction: ShiftDirection::Down,
        })
    }

    pub fn update_text(&mut self, id: &str, content: impl Into<String>) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::UpdateText {
            node_id: id.to_string(),
            content: content.into(),
        })
    }

    pub fn set_inline_style(
        &mut self,
        id: &str,
        property: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::SetInlineStyle {
            node_id: id.to_string(),
            property: property.into(),
            value: value.into(),
        })
    }

    /// Merge `delta` into the element's overrides for `breakpoint`
    pub fn update_responsive_styles(
        &mut self,
        id: &str,
        breakpoint: Breakpoint,
        delta: StyleMap,
    ) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::UpdateResponsiveStyle {
            node_id: id.to_string(),
            breakpoint,
            delta,
        })
    }

    pub fn update_page_info(
        &mut self,
        title: Option<String>,
        slug: Option<String>,
    ) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::UpdatePageInfo { title, slug })
    }

    pub fn update_seo(&mut self, seo: SeoMetadata) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::UpdateSeo { seo })
    }

    pub fn update_settings(&mut self, settings: PageSettings) -> Result<MutationResult, EditorError> {
        self.apply(Mutation::UpdateSettings { settings })
    }

    // ---- history ----

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.page);
        if undone {
            self.mark_changed();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.page);
        if redone {
            self.mark_changed();
        }
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.history.undo_description()
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.history.redo_description()
    }

    /// Group the following mutations into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    // ---- drag and drop ----

    pub fn drop_zones(&self) -> Vec<DropZone> {
        drop_zones(&self.page)
    }

    pub fn start_drag(&mut self, source: DragSource) -> Result<(), EditorError> {
        Ok(self.drag.start(source)?)
    }

    /// Start dragging a library template by id
    pub fn start_library_drag(&mut self, template_id: &str) -> Result<(), EditorError> {
        let template = self
            .library
            .get(template_id)
            .map(|entry| entry.template.clone())
            .ok_or_else(|| EditorError::NotFound(format!("template {}", template_id)))?;
        self.start_drag(DragSource::Template(template))
    }

    pub fn hover_drag(&mut self, zones: &[DropZone]) -> Result<Option<DropZone>, EditorError> {
        Ok(self.drag.hover(zones)?.cloned())
    }

    pub fn cancel_drag(&mut self) -> Result<CancelReason, EditorError> {
        match self.drag.cancel()? {
            DragOutcome::Cancelled(reason) => Ok(reason),
            DragOutcome::Dropped(_) => Ok(CancelReason::Escaped),
        }
    }

    /// Release the gesture; at most one mutation is applied
    pub fn drop_drag(&mut self) -> Result<DropResult, EditorError> {
        match self.drag.drop(&self.page)? {
            DragOutcome::Dropped(mutation) => Ok(DropResult::Applied(self.apply(mutation)?)),
            DragOutcome::Cancelled(reason) => Ok(DropResult::Cancelled(reason)),
        }
    }

    // ---- live editing ----

    pub fn live_editor(&self) -> &LiveEditor {
        &self.live
    }

    pub fn activate_live_edit(&mut self) -> usize {
        self.live.activate(&self.page)
    }

    pub fn deactivate_live_edit(&mut self) {
        self.live.deactivate();
    }

    /// Open an editable region, returning its current text
    pub fn begin_live_edit(&mut self, id: &str) -> Result<String, EditorError> {
        Ok(self.live.begin_edit(id)?.to_string())
    }

    pub fn update_live_draft(&mut self, text: impl Into<String>) -> Result<(), EditorError> {
        Ok(self.live.update_draft(text)?)
    }

    pub fn commit_live_edit(&mut self) -> Result<MutationResult, EditorError> {
        let mutation = self.live.commit()?;
        self.apply(mutation)
    }

    pub fn cancel_live_edit(&mut self) -> Result<(), EditorError> {
        Ok(self.live.cancel_edit()?)
    }

    // ---- saving ----

    /// Check the page can be persisted
    pub fn validate(&self) -> Result<(), EditorError> {
        if self.page.title.trim().is_empty() {
            return Err(EditorError::Validation("Page title is required".to_string()));
        }
        if self.page.slug.trim().is_empty() {
            return Err(EditorError::Validation("Page slug is required".to_string()));
        }
        self.page
            .check_integrity()
            .map_err(|e| EditorError::Validation(e.to_string()))
    }

    /// Snapshot the page for saving, superseding any save in flight
    pub fn begin_save(&mut self) -> Result<SaveRequest, EditorError> {
        self.validate()?;

        if let Some(previous) = self.in_flight.take() {
            tracing::debug!(generation = previous.generation, "superseding in-flight save");
            previous.cancel.cancel();
        }

        self.save_generation += 1;
        let cancel = CancellationToken::new();
        self.in_flight = Some(InFlightSave {
            generation: self.save_generation,
            cancel: cancel.clone(),
        });
        self.status = SaveStatus::Saving;

        Ok(SaveRequest::new(
            self.save_generation,
            self.revision,
            self.page.clone(),
            cancel,
        ))
    }

    /// Fold a save response back into the session.
    ///
    /// Stale responses (from superseded requests) change nothing.
    pub fn finish_save(&mut self, response: SaveResponse) -> Result<SaveStatus, EditorError> {
        if response.generation != self.save_generation {
            tracing::warn!(
                generation = response.generation,
                current = self.save_generation,
                "discarding stale save response"
            );
            return Ok(self.status);
        }
        self.in_flight = None;

        match response.outcome {
            SaveOutcome::Saved { saved_at, .. } => {
                self.last_saved_at = Some(saved_at);
                self.status = if response.revision == self.revision {
                    SaveStatus::Saved
                } else {
                    SaveStatus::Unsaved
                };
                tracing::info!(
                    page = %self.page.id,
                    revision = response.revision,
                    status = %self.status,
                    "page saved"
                );
                Ok(self.status)
            }
            SaveOutcome::Failed(e) => {
                self.status = SaveStatus::Unsaved;
                tracing::warn!(page = %self.page.id, error = %e, "save failed");
                Err(EditorError::Persistence(e))
            }
            SaveOutcome::Cancelled => {
                self.status = SaveStatus::Unsaved;
                Ok(self.status)
            }
        }
    }

    /// Abort the save in flight, if any
    pub fn cancel_save(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.cancel();
            self.status = SaveStatus::Unsaved;
        }
    }

    /// Validate, persist and record the result in one call
    pub async fn save(&mut self, store: &dyn PageStore) -> Result<SaveStatus, EditorError> {
        let request = self.begin_save()?;
        let response = request.execute(store).await;
        self.finish_save(response)
    }

    fn mark_changed(&mut self) {
        self.revision += 1;
        self.status = SaveStatus::Unsaved;

        if let Some(selected) = &self.selection {
            if !self.page.contains(selected) {
                self.selection = None;
            }
        }
        self.live.refresh(&self.page);
    }
}

fn inserted(result: MutationResult) -> Result<String, EditorError> {
    match result.applied {
        Applied::Inserted { id, .. } => Ok(id),
        other => Err(EditorError::Validation(format!(
            "expected an insertion, got {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ienet_document::ElementType;

    #[test]
    fn test_new_builder_is_unsaved() {
        let builder = Builder::new(PageData::untitled("p"));
        assert_eq!(builder.status(), SaveStatus::Unsaved);
        assert_eq!(builder.revision(), 0);
        assert_eq!(builder.breakpoint(), Breakpoint::Desktop);
    }

    #[test]
    fn test_failed_mutation_keeps_revision() {
        let mut builder = Builder::new(PageData::untitled("p"));
        let err = builder.remove_element("ghost").unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(builder.revision(), 0);
        assert!(!builder.can_undo());
    }

    #[test]
    fn test_removing_selected_clears_selection() {
        let mut builder = Builder::new(PageData::untitled("p"));
        let section = builder
            .add_element(ElementTemplate::new(ElementType::Section), None, None)
            .unwrap();
        let text = builder
            .add_element(ElementTemplate::new(ElementType::Text), Some(&section), None)
            .unwrap();

        builder.select(Some(&text)).unwrap();
        builder.remove_element(&section).unwrap();
        assert_eq!(builder.selection(), None);

        // undo brings the element back but not the selection
        builder.undo();
        assert!(builder.find_element(&text).is_some());
        assert_eq!(builder.selection(), None);
    }

    #[test]
    fn test_validation_requires_title_and_slug() {
        let mut builder = Builder::new(PageData::new("p", ""));
        assert!(matches!(builder.validate(), Err(EditorError::Validation(_))));

        builder
            .update_page_info(Some("About".to_string()), Some("about".to_string()))
            .unwrap();
        assert!(builder.validate().is_ok());
    }
}
