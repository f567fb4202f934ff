//! Stored JSON shape of elements.
//!
//! Elements are read through [`RawElement`] so that settings can be typed
//! against the element's `type` and `parentId` can be re-derived from the
//! tree structure instead of trusted from the payload.

use crate::{
    DocumentError, ElementProperties, ElementSettings, ElementTemplate, ElementType, PageData,
    PageElement, PageSettings, ResponsiveStyles, SeoMetadata, StyleMap,
};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawElement {
    #[serde(default)]
    id: Option<String>,

    #[serde(rename = "type")]
    element_type: ElementType,

    #[serde(default)]
    content: Option<String>,

    #[serde(default)]
    properties: RawProperties,

    #[serde(default)]
    children: Vec<RawElement>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawProperties {
    #[serde(default)]
    class_name: Option<String>,

    #[serde(default)]
    style: StyleMap,

    #[serde(default)]
    responsive: ResponsiveStyles,

    #[serde(default)]
    settings: Map<String, Value>,
}

impl RawProperties {
    fn into_properties(self, element_type: ElementType) -> ElementProperties {
        ElementProperties {
            class_name: self.class_name,
            style: self.style,
            responsive: self.responsive,
            settings: ElementSettings::from_wire(element_type, self.settings),
        }
    }
}

fn into_element(raw: RawElement, parent_id: Option<&str>) -> Result<PageElement, DocumentError> {
    let id = raw.id.ok_or(DocumentError::MissingId)?;
    let children = raw
        .children
        .into_iter()
        .map(|child| into_element(child, Some(&id)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PageElement {
        element_type: raw.element_type,
        content: raw.content,
        properties: raw.properties.into_properties(raw.element_type),
        children,
        parent_id: parent_id.map(str::to_string),
        id,
    })
}

impl TryFrom<RawElement> for PageElement {
    type Error = DocumentError;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        into_element(raw, None)
    }
}

impl From<RawElement> for ElementTemplate {
    fn from(raw: RawElement) -> Self {
        ElementTemplate {
            element_type: raw.element_type,
            content: raw.content,
            properties: raw.properties.into_properties(raw.element_type),
            children: raw.children.into_iter().map(ElementTemplate::from).collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    elements: Vec<PageElement>,
    #[serde(default)]
    seo: SeoMetadata,
    #[serde(default)]
    settings: PageSettings,
}

impl TryFrom<RawPage> for PageData {
    type Error = DocumentError;

    fn try_from(raw: RawPage) -> Result<Self, Self::Error> {
        let page = PageData {
            id: raw.id,
            title: raw.title,
            slug: raw.slug,
            elements: raw.elements,
            seo: raw.seo,
            settings: raw.settings,
        };
        page.check_integrity()?;
        Ok(page)
    }
}

pub(crate) fn serialize_settings<S: Serializer>(
    settings: &ElementSettings,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    settings.to_wire().serialize(serializer)
}
