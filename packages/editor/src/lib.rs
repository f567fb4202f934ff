//! # IeNet Editor
//!
//! Editing engine for the IeNet page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: PageData / PageElement tree       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Builder session                     │
//! │  - Validated mutations                      │
//! │  - Snapshot undo/redo                       │
//! │  - Drag-and-drop, live text editing         │
//! │  - Responsive style resolution              │
//! │  - Save tracking against a PageStore        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ store: load / upsert whole pages            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Mutations are the only writers**: every edit is a [`Mutation`]
//! 2. **All or nothing**: a rejected mutation leaves the page untouched
//! 3. **History follows success**: only applied changes become undo steps
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ienet_editor::{Builder, MemoryStore};
//! use ienet_document::{ElementTemplate, ElementType, PageData};
//!
//! let mut builder = Builder::new(PageData::new("home", "Home"));
//!
//! let section = builder.add_element(ElementTemplate::new(ElementType::Section), None, None)?;
//! let heading = builder.add_from_library("text-heading", Some(&section), None)?;
//! builder.update_text(&heading, "Welcome")?;
//!
//! builder.undo();
//! builder.save(&MemoryStore::new()).await?;
//! ```

pub mod builder;
pub mod drag_drop;
pub mod errors;
pub mod library;
pub mod live_edit;
pub mod mutations;
pub mod responsive;
pub mod save;
pub mod store;
pub mod undo_stack;

pub use builder::{Builder, BuilderOptions, DropResult};
pub use drag_drop::{
    drop_zones, CancelReason, DragController, DragError, DragOutcome, DragSource, DragState,
    DropZone,
};
pub use errors::EditorError;
pub use library::{Category, ComponentLibrary, ComponentTemplate};
pub use live_edit::{EditableRegion, LiveEditError, LiveEditor};
pub use mutations::{
    Applied, ElementPatch, Mutation, MutationError, MutationResult, ShiftDirection,
};
pub use responsive::{canvas_style, resolve_page, resolve_style, viewport_width};
pub use save::{SaveOutcome, SaveRequest, SaveResponse, SaveStatus};
pub use store::{JsonFileStore, MemoryStore, PageStore, StoreError};
pub use undo_stack::{HistoryEntry, UndoStack, DEFAULT_MAX_LEVELS};
