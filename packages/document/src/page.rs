//! # Page Aggregate
//!
//! [`PageData`] is the unit the builder loads, edits and saves: the element
//! tree plus title, slug, SEO metadata and page settings.
//!
//! Tree lookups are depth-first walks. Pages are small enough that no
//! id index is kept.

use crate::{DocumentError, PageElement};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Search-engine metadata for a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,

    /// Comma-separated keyword list
    pub keywords: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

impl SeoMetadata {
    /// Individual keywords, trimmed, empty entries dropped
    pub fn keyword_list(&self) -> Vec<&str> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect()
    }
}

/// Page-wide presentation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSettings {
    pub template: String,
    pub theme: String,

    #[serde(rename = "customCSS", skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,

    #[serde(rename = "customJS", skip_serializing_if = "Option::is_none")]
    pub custom_js: Option<String>,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            template: "default".to_string(),
            theme: "light".to_string(),
            custom_css: None,
            custom_js: None,
        }
    }
}

/// A complete page document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "crate::wire::RawPage")]
pub struct PageData {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub elements: Vec<PageElement>,
    pub seo: SeoMetadata,
    pub settings: PageSettings,
}

/// Position of an element among its siblings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementLocation {
    /// `None` for root-level elements
    pub parent_id: Option<String>,
    pub index: usize,
}

impl PageData {
    /// Create an empty page, deriving the slug from the title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: id.into(),
            slug: slugify(&title),
            title,
            elements: Vec::new(),
            seo: SeoMetadata::default(),
            settings: PageSettings::default(),
        }
    }

    /// The blank document the builder opens for a new page
    pub fn untitled(id: impl Into<String>) -> Self {
        Self::new(id, "New Page")
    }

    pub fn find_element(&self, id: &str) -> Option<&PageElement> {
        self.elements.iter().find_map(|element| element.find(id))
    }

    pub fn find_element_mut(&mut self, id: &str) -> Option<&mut PageElement> {
        self.elements.iter_mut().find_map(|element| element.find_mut(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_element(id).is_some()
    }

    /// The element containing `id`; `None` if `id` is a root element or absent
    pub fn find_parent_element(&self, id: &str) -> Option<&PageElement> {
        let parent_id = self.find_element(id)?.parent_id.as_deref()?;
        self.find_element(parent_id)
    }

    pub fn locate(&self, id: &str) -> Option<ElementLocation> {
        let parent_id = self.find_element(id)?.parent_id.clone();
        let index = self
            .siblings(parent_id.as_deref())?
            .iter()
            .position(|element| element.id == id)?;

        Some(ElementLocation { parent_id, index })
    }

    /// Children of `parent_id`, or the root list for `None`
    pub fn siblings(&self, parent_id: Option<&str>) -> Option<&[PageElement]> {
        match parent_id {
            None => Some(&self.elements),
            Some(id) => self.find_element(id).map(|parent| parent.children.as_slice()),
        }
    }

    pub fn siblings_mut(&mut self, parent_id: Option<&str>) -> Option<&mut Vec<PageElement>> {
        match parent_id {
            None => Some(&mut self.elements),
            Some(id) => self.find_element_mut(id).map(|parent| &mut parent.children),
        }
    }

    /// Whether placing `node_id` under `new_parent_id` would make it its own ancestor
    pub fn would_create_cycle(&self, node_id: &str, new_parent_id: &str) -> bool {
        self.find_element(node_id)
            .map(|node| node.contains(new_parent_id))
            .unwrap_or(false)
    }

    /// Depth-first walk over every element
    pub fn iter(&self) -> DepthFirst<'_> {
        DepthFirst::new(&self.elements)
    }

    pub fn element_count(&self) -> usize {
        self.iter().count()
    }

    /// Verify id uniqueness and `parent_id` back-references
    pub fn check_integrity(&self) -> Result<(), DocumentError> {
        let mut seen = HashSet::new();
        check_level(&self.elements, None, &mut seen)
    }
}

fn check_level<'a>(
    elements: &'a [PageElement],
    parent_id: Option<&str>,
    seen: &mut HashSet<&'a str>,
) -> Result<(), DocumentError> {
    for element in elements {
        if !seen.insert(element.id.as_str()) {
            return Err(DocumentError::DuplicateId(element.id.clone()));
        }
        if element.parent_id.as_deref() != parent_id {
            return Err(DocumentError::ParentMismatch {
                child: element.id.clone(),
                recorded: element.parent_id.clone(),
                actual: parent_id.map(str::to_string),
            });
        }
        check_level(&element.children, Some(element.id.as_str()), seen)?;
    }
    Ok(())
}

/// Pre-order iterator over an element forest
pub struct DepthFirst<'a> {
    stack: Vec<&'a PageElement>,
}

impl<'a> DepthFirst<'a> {
    pub fn new(roots: &'a [PageElement]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a PageElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// URL-safe slug: lower-case alphanumerics separated by single hyphens
pub fn slugify(title: &str) -> String {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let separators =
        SEPARATORS.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid slug pattern"));

    separators
        .replace_all(&title.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> PageData {
        serde_json::from_value(json!({
            "id": "home",
            "title": "Home",
            "slug": "home",
            "elements": [
                {
                    "id": "section-1",
                    "type": "section",
                    "properties": { "settings": {} },
                    "children": [
                        { "id": "text-1", "type": "text", "content": "A", "properties": {} },
                        { "id": "text-2", "type": "text", "content": "B", "properties": {} }
                    ]
                },
                { "id": "button-1", "type": "button", "content": "Go", "properties": {} }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_find_and_locate() {
        let page = sample();

        assert_eq!(page.find_element("text-2").unwrap().content.as_deref(), Some("B"));
        assert_eq!(page.find_parent_element("text-2").unwrap().id, "section-1");
        assert!(page.find_parent_element("section-1").is_none());

        let location = page.locate("text-2").unwrap();
        assert_eq!(location.parent_id.as_deref(), Some("section-1"));
        assert_eq!(location.index, 1);

        assert_eq!(page.locate("button-1").unwrap().index, 1);
        assert!(page.locate("missing").is_none());
    }

    #[test]
    fn test_depth_first_order() {
        let page = sample();
        let ids: Vec<&str> = page.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["section-1", "text-1", "text-2", "button-1"]);
        assert_eq!(page.element_count(), 4);
    }

    #[test]
    fn test_cycle_detection() {
        let page = sample();
        assert!(page.would_create_cycle("section-1", "text-1"));
        assert!(page.would_create_cycle("section-1", "section-1"));
        assert!(!page.would_create_cycle("text-1", "section-1"));
    }

    #[test]
    fn test_duplicate_ids_rejected_on_load() {
        let result: Result<PageData, _> = serde_json::from_value(json!({
            "id": "p",
            "elements": [
                { "id": "x", "type": "container", "properties": {} },
                { "id": "x", "type": "container", "properties": {} }
            ]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialized_shape_uses_camel_case() {
        let mut page = PageData::new("about", "About Us");
        page.seo.og_image = Some("og.png".to_string());
        page.settings.custom_css = Some("body {}".to_string());

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["slug"], "about-us");
        assert_eq!(value["seo"]["ogImage"], "og.png");
        assert_eq!(value["settings"]["customCSS"], "body {}");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Web Development & Design!"), "web-development-design");
        assert_eq!(slugify("  --Hello  World-- "), "hello-world");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_keyword_list() {
        let seo = SeoMetadata {
            keywords: "web, design,, seo ".to_string(),
            ..Default::default()
        };
        assert_eq!(seo.keyword_list(), vec!["web", "design", "seo"]);
    }
}
