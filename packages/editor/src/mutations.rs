//! # Page Mutations
//!
//! The only sanctioned way to change a [`PageData`].
//!
//! ## Semantics
//!
//! Every mutation is validated against the current page before anything is
//! touched, so a rejected mutation leaves the page exactly as it was.
//!
//! ### Add / Duplicate
//! - Fresh ids are minted for every node of the inserted subtree
//! - `parent_id` is set from the insertion point, never copied
//! - Duplicates land immediately after the original
//!
//! ### Move
//! - Detach, then re-insert; `index` counts siblings *after* the detach
//! - Fails if the target parent is the node itself or one of its descendants
//! - Indices are clamped to `[0, len]`
//!
//! ### Update
//! - Each field present in an [`ElementPatch`] replaces that property wholesale
//! - `id`, `parent_id` and children are never touched

use ienet_document::{
    Breakpoint, ElementSettings, ElementTemplate, IDGenerator, PageData, PageElement,
    PageSettings, ResponsiveStyles, SeoMetadata, StyleMap,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Intent-level page edits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Mutation {
    /// Insert a template under `parent_id` (root when `None`), appending by default
    #[serde(rename_all = "camelCase")]
    AddElement {
        template: ElementTemplate,
        parent_id: Option<String>,
        index: Option<usize>,
    },

    /// Shallow-merge element properties
    #[serde(rename_all = "camelCase")]
    UpdateElement { node_id: String, patch: ElementPatch },

    /// Detach an element and discard its subtree
    #[serde(rename_all = "camelCase")]
    RemoveElement { node_id: String },

    /// Deep-copy an element next to itself
    #[serde(rename_all = "camelCase")]
    DuplicateElement { node_id: String },

    /// Relocate an element
    #[serde(rename_all = "camelCase")]
    MoveElement {
        node_id: String,
        new_parent_id: Option<String>,
        index: usize,
    },

    /// Nudge an element one slot among its siblings
    #[serde(rename_all = "camelCase")]
    ShiftElement {
        node_id: String,
        direction: ShiftDirection,
    },

    /// Replace the text of a text or button element
    #[serde(rename_all = "camelCase")]
    UpdateText { node_id: String, content: String },

    /// Set one base style property (an empty value removes it)
    #[serde(rename_all = "camelCase")]
    SetInlineStyle {
        node_id: String,
        property: String,
        value: String,
    },

    /// Merge a delta into one breakpoint's overrides (empty values remove keys)
    #[serde(rename_all = "camelCase")]
    UpdateResponsiveStyle {
        node_id: String,
        breakpoint: Breakpoint,
        delta: StyleMap,
    },

    /// Change page title and/or slug
    UpdatePageInfo {
        title: Option<String>,
        slug: Option<String>,
    },

    /// Replace the SEO block
    UpdateSeo { seo: SeoMetadata },

    /// Replace page-wide settings
    UpdateSettings { settings: PageSettings },
}

/// Properties to overwrite on an element. `None` leaves a field alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsive: Option<ResponsiveStyles>,

    /// Flat settings object, in the same shape pages are stored with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Map<String, Value>>,
}

impl ElementPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_settings(mut self, settings: &ElementSettings) -> Self {
        self.settings = Some(settings.to_wire());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShiftDirection {
    Up,
    Down,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Would create cycle: cannot move {node} into {target}")]
    CycleDetected { node: String, target: String },

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Node is not text: {0}")]
    NotText(String),
}

/// What an applied mutation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// A new subtree was inserted; `id` is its root
    Inserted { id: String, count: usize },

    /// An element's own fields changed
    Updated { id: String },

    /// An update carried nothing to change
    Unchanged { id: String },

    /// A subtree was removed; `removed` lists every id in it
    Removed { id: String, removed: Vec<String> },

    /// An element was relocated; `moved` is false when it ended where it started
    Moved { id: String, moved: bool },

    /// Page-level metadata changed
    Page,
}

impl Applied {
    /// Id of the subtree root an add or duplicate created
    pub fn inserted_id(&self) -> Option<&str> {
        match self {
            Applied::Inserted { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Whether the page changed at all
    pub fn changed(&self) -> bool {
        !matches!(
            self,
            Applied::Moved { moved: false, .. } | Applied::Unchanged { .. }
        )
    }
}

/// Result of applying a mutation through the builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    /// Builder revision after the mutation
    pub revision: u64,

    pub applied: Applied,
}

impl Mutation {
    /// Short label for history entries and logs
    pub fn label(&self) -> &'static str {
        match self {
            Mutation::AddElement { .. } => "Add element",
            Mutation::UpdateElement { .. } => "Update element",
            Mutation::RemoveElement { .. } => "Remove element",
            Mutation::DuplicateElement { .. } => "Duplicate element",
            Mutation::MoveElement { .. } => "Move element",
            Mutation::ShiftElement {
                direction: ShiftDirection::Up,
                ..
            } => "Move element up",
            Mutation::ShiftElement {
                direction: ShiftDirection::Down,
                ..
            } => "Move element down",
            Mutation::UpdateText { .. } => "Edit text",
            Mutation::SetInlineStyle { .. } => "Set style",
            Mutation::UpdateResponsiveStyle { .. } => "Set responsive style",
            Mutation::UpdatePageInfo { .. } => "Update page info",
            Mutation::UpdateSeo { .. } => "Update SEO",
            Mutation::UpdateSettings { .. } => "Update page settings",
        }
    }

    /// The element this mutation targets, if any
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Mutation::UpdateElement { node_id, .. }
            | Mutation::RemoveElement { node_id }
            | Mutation::DuplicateElement { node_id }
            | Mutation::MoveElement { node_id, .. }
            | Mutation::ShiftElement { node_id, .. }
            | Mutation::UpdateText { node_id, .. }
            | Mutation::SetInlineStyle { node_id, .. }
            | Mutation::UpdateResponsiveStyle { node_id, .. } => Some(node_id),
            Mutation::AddElement { .. }
            | Mutation::UpdatePageInfo { .. }
            | Mutation::UpdateSeo { .. }
            | Mutation::UpdateSettings { .. } => None,
        }
    }

    /// Apply mutation to the page with validation
    pub fn apply(&self, page: &mut PageData, ids: &mut IDGenerator) -> Result<Applied, MutationError> {
        // Validate first
        self.validate(page)?;

        let applied = match self {
            Mutation::AddElement {
                template,
                parent_id,
                index,
            } => Self::apply_add(page, ids, template, parent_id.as_deref(), *index)?,

            Mutation::UpdateElement { node_id, patch } => {
                Self::apply_update(page, node_id, patch)?
            }

            Mutation::RemoveElement { node_id } => Self::apply_remove(page, node_id)?,

            Mutation::DuplicateElement { node_id } => Self::apply_duplicate(page, ids, node_id)?,

            Mutation::MoveElement {
                node_id,
                new_parent_id,
                index,
            } => Self::apply_move(page, node_id, new_parent_id.as_deref(), *index)?,

            Mutation::ShiftElement { node_id, direction } => {
                Self::apply_shift(page, node_id, *direction)?
            }

            Mutation::UpdateText { node_id, content } => {
                let element = find_mut(page, node_id)?;
                element.content = Some(content.clone());
                Applied::Updated {
                    id: node_id.clone(),
                }
            }

            Mutation::SetInlineStyle {
                node_id,
                property,
                value,
            } => {
                let element = find_mut(page, node_id)?;
                set_or_remove(&mut element.properties.style, property, value);
                Applied::Updated {
                    id: node_id.clone(),
                }
            }

            Mutation::UpdateResponsiveStyle {
                node_id,
                breakpoint,
                delta,
            } => {
                let element = find_mut(page, node_id)?;
                let overrides = element.properties.responsive.entry(*breakpoint);
                for (property, value) in delta {
                    set_or_remove(overrides, property, value);
                }
                Applied::Updated {
                    id: node_id.clone(),
                }
            }

            Mutation::UpdatePageInfo { title, slug } => {
                if let Some(title) = title {
                    page.title = title.clone();
                }
                if let Some(slug) = slug {
                    page.slug = slug.clone();
                }
                Applied::Page
            }

            Mutation::UpdateSeo { seo } => {
                page.seo = seo.clone();
                Applied::Page
            }

            Mutation::UpdateSettings { settings } => {
                page.settings = settings.clone();
                Applied::Page
            }
        };

        tracing::debug!(
            mutation = self.label(),
            node = self.target_id().unwrap_or("page"),
            "applied mutation"
        );

        Ok(applied)
    }

    fn apply_add(
        page: &mut PageData,
        ids: &mut IDGenerator,
        template: &ElementTemplate,
        parent_id: Option<&str>,
        index: Option<usize>,
    ) -> Result<Applied, MutationError> {
        let element = instantiate(template, parent_id, page, ids);
        let id = element.id.clone();
        let count = element.subtree_size();

        let siblings = siblings_mut(page, parent_id)?;
        let index = index.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(index, element);

        Ok(Applied::Inserted { id, count })
    }

    fn apply_update(
        page: &mut PageData,
        node_id: &str,
        patch: &ElementPatch,
    ) -> Result<Applied, MutationError> {
        let element = find_mut(page, node_id)?;
        if patch.is_empty() {
            return Ok(Applied::Unchanged {
                id: node_id.to_string(),
            });
        }

        if let Some(content) = &patch.content {
            element.content = Some(content.clone());
        }
        if let Some(class_name) = &patch.class_name {
            element.properties.class_name = Some(class_name.clone());
        }
        if let Some(style) = &patch.style {
            element.properties.style = style.clone();
        }
        if let Some(responsive) = &patch.responsive {
            element.properties.responsive = responsive.clone();
        }
        if let Some(settings) = &patch.settings {
            element.properties.settings =
                ElementSettings::from_wire(element.element_type, settings.clone());
        }

        Ok(Applied::Updated {
            id: node_id.to_string(),
        })
    }

    fn apply_remove(page: &mut PageData, node_id: &str) -> Result<Applied, MutationError> {
        let removed = detach(page, node_id)?;

        Ok(Applied::Removed {
            id: node_id.to_string(),
            removed: removed.iter().map(|element| element.id.clone()).collect(),
        })
    }

    fn apply_duplicate(
        page: &mut PageData,
        ids: &mut IDGenerator,
        node_id: &str,
    ) -> Result<Applied, MutationError> {
        let location = page
            .locate(node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;
        let template = find(page, node_id)?.to_template();

        let clone = instantiate(&template, location.parent_id.as_deref(), page, ids);
        let id = clone.id.clone();
        let count = clone.subtree_size();

        siblings_mut(page, location.parent_id.as_deref())?.insert(location.index + 1, clone);

        Ok(Applied::Inserted { id, count })
    }

    fn apply_move(
        page: &mut PageData,
        node_id: &str,
        new_parent_id: Option<&str>,
        index: usize,
    ) -> Result<Applied, MutationError> {
        let from = page
            .locate(node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;

        let mut element = detach(page, node_id)?;
        element.parent_id = new_parent_id.map(str::to_string);

        let siblings = siblings_mut(page, new_parent_id)?;
        let index = index.min(siblings.len());
        siblings.insert(index, element);

        let moved = from.parent_id.as_deref() != new_parent_id || from.index != index;
        Ok(Applied::Moved {
            id: node_id.to_string(),
            moved,
        })
    }

    fn apply_shift(
        page: &mut PageData,
        node_id: &str,
        direction: ShiftDirection,
    ) -> Result<Applied, MutationError> {
        let location = page
            .locate(node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;
        let siblings = siblings_mut(page, location.parent_id.as_deref())?;

        let target = match direction {
            ShiftDirection::Up => location.index.checked_sub(1),
            ShiftDirection::Down => Some(location.index + 1).filter(|i| *i < siblings.len()),
        };

        let moved = match target {
            Some(target) => {
                siblings.swap(location.index, target);
                true
            }
            None => false,
        };

        Ok(Applied::Moved {
            id: node_id.to_string(),
            moved,
        })
    }

    /// Validate without applying
    pub fn validate(&self, page: &PageData) -> Result<(), MutationError> {
        match self {
            Mutation::AddElement {
                template,
                parent_id,
                ..
            } => {
                if let Some(parent_id) = parent_id {
                    check_container(page, parent_id)?;
                }
                validate_template(template)
            }

            Mutation::UpdateElement { node_id, .. }
            | Mutation::RemoveElement { node_id }
            | Mutation::DuplicateElement { node_id }
            | Mutation::ShiftElement { node_id, .. }
            | Mutation::UpdateResponsiveStyle { node_id, .. } => {
                find(page, node_id)?;
                Ok(())
            }

            Mutation::MoveElement {
                node_id,
                new_parent_id,
                ..
            } => {
                // Check node exists
                find(page, node_id)?;

                if let Some(new_parent_id) = new_parent_id {
                    // Check wouldn't create cycle
                    if page.would_create_cycle(node_id, new_parent_id) {
                        return Err(MutationError::CycleDetected {
                            node: node_id.clone(),
                            target: new_parent_id.clone(),
                        });
                    }
                    check_container(page, new_parent_id)?;
                }

                Ok(())
            }

            Mutation::UpdateText { node_id, .. } => {
                let element = find(page, node_id)?;
                if element.element_type.carries_text() {
                    Ok(())
                } else {
                    Err(MutationError::NotText(node_id.clone()))
                }
            }

            Mutation::SetInlineStyle {
                node_id, property, ..
            } => {
                find(page, node_id)?;
                if property.trim().is_empty() {
                    return Err(MutationError::InvalidStructure(
                        "Style property name is empty".to_string(),
                    ));
                }
                Ok(())
            }

            Mutation::UpdatePageInfo { .. }
            | Mutation::UpdateSeo { .. }
            | Mutation::UpdateSettings { .. } => Ok(()),
        }
    }
}

fn find<'a>(page: &'a PageData, node_id: &str) -> Result<&'a PageElement, MutationError> {
    page.find_element(node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))
}

fn find_mut<'a>(page: &'a mut PageData, node_id: &str) -> Result<&'a mut PageElement, MutationError> {
    page.find_element_mut(node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))
}

fn siblings_mut<'a>(
    page: &'a mut PageData,
    parent_id: Option<&str>,
) -> Result<&'a mut Vec<PageElement>, MutationError> {
    page.siblings_mut(parent_id).ok_or_else(|| {
        MutationError::ParentNotFound(parent_id.unwrap_or_default().to_string())
    })
}

/// Parent must exist and be a type that holds children
fn check_container(page: &PageData, parent_id: &str) -> Result<(), MutationError> {
    let parent = page
        .find_element(parent_id)
        .ok_or_else(|| MutationError::ParentNotFound(parent_id.to_string()))?;

    if parent.element_type.accepts_children() {
        Ok(())
    } else {
        Err(MutationError::InvalidStructure(format!(
            "{} elements cannot have children",
            parent.element_type
        )))
    }
}

fn validate_template(template: &ElementTemplate) -> Result<(), MutationError> {
    if !template.properties.settings.kind.fits(template.element_type) {
        return Err(MutationError::InvalidStructure(format!(
            "Settings do not belong to a {} element",
            template.element_type
        )));
    }
    if !template.children.is_empty() && !template.element_type.accepts_children() {
        return Err(MutationError::InvalidStructure(format!(
            "{} elements cannot have children",
            template.element_type
        )));
    }
    template.children.iter().try_for_each(validate_template)
}

/// Give a template identity, minting ids that are not used in `page`
fn instantiate(
    template: &ElementTemplate,
    parent_id: Option<&str>,
    page: &PageData,
    ids: &mut IDGenerator,
) -> PageElement {
    let id = ids.fresh_id(|candidate| page.contains(candidate));
    let children = template
        .children
        .iter()
        .map(|child| instantiate(child, Some(&id), page, ids))
        .collect();

    PageElement {
        element_type: template.element_type,
        content: template.content.clone(),
        properties: template.properties.clone(),
        children,
        parent_id: parent_id.map(str::to_string),
        id,
    }
}

/// Remove an element from its parent and return it
fn detach(page: &mut PageData, node_id: &str) -> Result<PageElement, MutationError> {
    let location = page
        .locate(node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;
    let siblings = siblings_mut(page, location.parent_id.as_deref())?;
    Ok(siblings.remove(location.index))
}

fn set_or_remove(style: &mut StyleMap, property: &str, value: &str) {
    if value.is_empty() {
        style.remove(property);
    } else {
        style.insert(property.to_string(), value.to_string());
    }
}
