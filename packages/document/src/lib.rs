//! # IeNet Document Model
//!
//! The page document the visual builder edits: a tree of [`PageElement`]s
//! plus page-level metadata ([`PageData`]).
//!
//! ```text
//! PageData
//!  ├─ seo / settings
//!  └─ elements: [PageElement]
//!        └─ children: [PageElement] ...
//! ```
//!
//! This crate only describes and queries the tree. All changes go through
//! the mutation API in `ienet-editor`, which owns id assignment and
//! parent/child bookkeeping.

pub mod element;
pub mod error;
pub mod id_generator;
pub mod page;
pub mod settings;
pub mod style;

mod wire;

pub use element::{ElementProperties, ElementTemplate, ElementType, PageElement};
pub use error::DocumentError;
pub use id_generator::{get_document_id, IDGenerator};
pub use page::{slugify, DepthFirst, ElementLocation, PageData, PageSettings, SeoMetadata};
pub use settings::{
    ButtonSettings, ElementSettings, FormSettings, ImageSettings, LayoutSettings, SettingsKind,
    TextSettings,
};
pub use style::{Breakpoint, ResponsiveStyles, StyleMap};
