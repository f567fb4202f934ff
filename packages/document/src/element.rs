use crate::page::DepthFirst;
use crate::{ElementSettings, ResponsiveStyles, SettingsKind, StyleMap};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of visual building block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Container,
    Text,
    Image,
    Button,
    Form,
    Navigation,
    Hero,
    Grid,
    Card,
    Section,
}

impl ElementType {
    pub const ALL: [ElementType; 10] = [
        ElementType::Container,
        ElementType::Text,
        ElementType::Image,
        ElementType::Button,
        ElementType::Form,
        ElementType::Navigation,
        ElementType::Hero,
        ElementType::Grid,
        ElementType::Card,
        ElementType::Section,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Container => "container",
            ElementType::Text => "text",
            ElementType::Image => "image",
            ElementType::Button => "button",
            ElementType::Form => "form",
            ElementType::Navigation => "navigation",
            ElementType::Hero => "hero",
            ElementType::Grid => "grid",
            ElementType::Card => "card",
            ElementType::Section => "section",
        }
    }

    /// Leaf types render their own content and cannot hold children
    pub fn accepts_children(self) -> bool {
        !matches!(self, ElementType::Text | ElementType::Image | ElementType::Button)
    }

    /// Types whose `content` is user-visible text
    pub fn carries_text(self) -> bool {
        matches!(self, ElementType::Text | ElementType::Button)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual configuration of an element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Breakpoint-independent base style
    #[serde(skip_serializing_if = "StyleMap::is_empty")]
    pub style: StyleMap,

    #[serde(skip_serializing_if = "ResponsiveStyles::is_empty")]
    pub responsive: ResponsiveStyles,

    #[serde(serialize_with = "crate::wire::serialize_settings")]
    pub settings: ElementSettings,
}

impl ElementProperties {
    pub fn for_type(element_type: ElementType) -> Self {
        Self {
            class_name: None,
            style: StyleMap::new(),
            responsive: ResponsiveStyles::default(),
            settings: ElementSettings::for_type(element_type),
        }
    }
}

/// A node of the page's element tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "crate::wire::RawElement")]
pub struct PageElement {
    pub id: String,

    #[serde(rename = "type")]
    pub element_type: ElementType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    pub properties: ElementProperties,

    pub children: Vec<PageElement>,

    /// Id of the containing element (`None` for root elements). Lookup only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl PageElement {
    /// Find an element in this subtree (including self)
    pub fn find(&self, id: &str) -> Option<&PageElement> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut PageElement> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Whether `id` is this element or one of its descendants
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Depth-first walk over this subtree, starting with self
    pub fn iter(&self) -> DepthFirst<'_> {
        DepthFirst::new(std::slice::from_ref(self))
    }

    /// Number of elements in this subtree (including self)
    pub fn subtree_size(&self) -> usize {
        self.iter().count()
    }

    /// Strip identity, keeping structure and content
    pub fn to_template(&self) -> ElementTemplate {
        ElementTemplate {
            element_type: self.element_type,
            content: self.content.clone(),
            properties: self.properties.clone(),
            children: self.children.iter().map(PageElement::to_template).collect(),
        }
    }
}

/// An element not yet placed in a page: no id, no parent.
///
/// Templates come from the component library or from duplicating an
/// existing subtree; the mutation API assigns identities on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "crate::wire::RawElement")]
pub struct ElementTemplate {
    #[serde(rename = "type")]
    pub element_type: ElementType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    pub properties: ElementProperties,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementTemplate>,
}

impl ElementTemplate {
    pub fn new(element_type: ElementType) -> Self {
        Self {
            element_type,
            content: None,
            properties: ElementProperties::for_type(element_type),
            children: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.properties.class_name = Some(class_name.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.style.insert(property.into(), value.into());
        self
    }

    /// Replace the typed settings. Ignored if `kind` belongs to another family.
    pub fn with_settings(mut self, kind: SettingsKind) -> Self {
        if kind.fits(self.element_type) {
            self.properties.settings.kind = kind;
        }
        self
    }

    pub fn editable(mut self) -> Self {
        self.properties.settings.editable = true;
        self
    }

    pub fn with_child(mut self, child: ElementTemplate) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ElementTemplate>) -> Self {
        self.children.extend(children);
        self
    }
}
