//! # Element Settings
//!
//! Per-element configuration, typed by element family.
//!
//! Stored documents keep settings as a flat JSON object
//! (`{"tag": "h2", "editable": true}`). On load, the element's type decides
//! which keys are lifted into a [`SettingsKind`] variant; anything else is
//! kept verbatim in `extra` and written back unchanged.

use crate::ElementType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSettings {
    /// HTML tag to render (`h1`, `p`, `a`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Settings shared by the structural element types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_max_width: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Typed settings variant, one per element family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "camelCase")]
pub enum SettingsKind {
    Text(TextSettings),
    Button(ButtonSettings),
    Image(ImageSettings),
    Form(FormSettings),
    Layout(LayoutSettings),
}

impl SettingsKind {
    /// Empty settings of the family matching `element_type`
    pub fn default_for(element_type: ElementType) -> Self {
        match element_type {
            ElementType::Text => SettingsKind::Text(TextSettings::default()),
            ElementType::Button => SettingsKind::Button(ButtonSettings::default()),
            ElementType::Image => SettingsKind::Image(ImageSettings::default()),
            ElementType::Form => SettingsKind::Form(FormSettings::default()),
            ElementType::Container
            | ElementType::Navigation
            | ElementType::Hero
            | ElementType::Grid
            | ElementType::Card
            | ElementType::Section => SettingsKind::Layout(LayoutSettings::default()),
        }
    }

    /// Whether this variant belongs to `element_type`'s family
    pub fn fits(&self, element_type: ElementType) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(&Self::default_for(element_type))
    }
}

/// Element configuration: common flags, typed family settings, and
/// unrecognised keys carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSettings {
    #[serde(default)]
    pub editable: bool,

    pub kind: SettingsKind,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl ElementSettings {
    pub fn for_type(element_type: ElementType) -> Self {
        Self {
            editable: false,
            kind: SettingsKind::default_for(element_type),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_kind(mut self, kind: SettingsKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self.extra.remove("editable");
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Rendered HTML tag, if the family has one
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            SettingsKind::Text(text) => text.tag.as_deref(),
            SettingsKind::Layout(layout) => layout.tag.as_deref(),
            _ => None,
        }
    }

    /// Link target, if the family has one
    pub fn href(&self) -> Option<&str> {
        match &self.kind {
            SettingsKind::Text(text) => text.href.as_deref(),
            SettingsKind::Button(button) => button.href.as_deref(),
            _ => self.extra.get("href").and_then(Value::as_str),
        }
    }

    /// Lift known keys for `element_type` out of a flat settings object
    pub fn from_wire(element_type: ElementType, mut map: Map<String, Value>) -> Self {
        let editable = match map.get("editable") {
            Some(Value::Bool(flag)) => {
                let flag = *flag;
                map.remove("editable");
                flag
            }
            _ => false,
        };

        let kind = match element_type {
            ElementType::Text => SettingsKind::Text(TextSettings {
                tag: take_string(&mut map, "tag"),
                href: take_string(&mut map, "href"),
            }),
            ElementType::Button => SettingsKind::Button(ButtonSettings {
                href: take_string(&mut map, "href"),
                target: take_string(&mut map, "target"),
            }),
            ElementType::Image => SettingsKind::Image(ImageSettings {
                src: take_string(&mut map, "src"),
                alt: take_string(&mut map, "alt"),
            }),
            ElementType::Form => SettingsKind::Form(FormSettings {
                action: take_string(&mut map, "action"),
                method: take_string(&mut map, "method"),
            }),
            _ => SettingsKind::Layout(LayoutSettings {
                container_max_width: take_string(&mut map, "containerMaxWidth"),
                columns: take_u32(&mut map, "columns"),
                tag: take_string(&mut map, "tag"),
            }),
        };

        Self {
            editable,
            kind,
            extra: map.into_iter().collect(),
        }
    }

    /// Flatten back into the stored settings object
    pub fn to_wire(&self) -> Map<String, Value> {
        let mut map: Map<String, Value> = self
            .extra
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        // a non-bool `editable` from the wire stays in `extra` until the flag is set
        if self.editable || !map.contains_key("editable") {
            map.insert("editable".to_string(), Value::Bool(self.editable));
        }

        let mut put = |key: &str, value: &Option<String>| {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::String(value.clone()));
            }
        };

        match &self.kind {
            SettingsKind::Text(text) => {
                put("tag", &text.tag);
                put("href", &text.href);
            }
            SettingsKind::Button(button) => {
                put("href", &button.href);
                put("target", &button.target);
            }
            SettingsKind::Image(image) => {
                put("src", &image.src);
                put("alt", &image.alt);
            }
            SettingsKind::Form(form) => {
                put("action", &form.action);
                put("method", &form.method);
            }
            SettingsKind::Layout(layout) => {
                put("containerMaxWidth", &layout.container_max_width);
                put("tag", &layout.tag);
                if let Some(columns) = layout.columns {
                    map.insert("columns".to_string(), Value::from(columns));
                }
            }
        }

        map
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !matches!(map.get(key), Some(Value::String(_))) {
        return None;
    }
    match map.remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
}

fn take_u32(map: &mut Map<String, Value>, key: &str) -> Option<u32> {
    let value = map.get(key)?.as_u64()?;
    let value = u32::try_from(value).ok()?;
    map.remove(key);
    Some(value)
}
