use crate::DocumentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// CSS property name → value. Ordered so that resolved styles and
/// serialized documents are deterministic.
pub type StyleMap = BTreeMap<String, String>;

/// Responsive breakpoint the canvas is previewed at
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Desktop, Breakpoint::Tablet, Breakpoint::Mobile];

    pub fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Desktop => "desktop",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Mobile => "mobile",
        }
    }

    /// Maximum canvas width in pixels (`None` = full width)
    pub fn max_width_px(self) -> Option<u32> {
        match self {
            Breakpoint::Desktop => None,
            Breakpoint::Tablet => Some(768),
            Breakpoint::Mobile => Some(375),
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Breakpoint {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "desktop" => Ok(Breakpoint::Desktop),
            "tablet" => Ok(Breakpoint::Tablet),
            "mobile" => Ok(Breakpoint::Mobile),
            _ => Err(DocumentError::UnknownBreakpoint(s.to_string())),
        }
    }
}

/// Per-breakpoint style overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsiveStyles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desktop: Option<StyleMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tablet: Option<StyleMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<StyleMap>,
}

impl ResponsiveStyles {
    pub fn get(&self, breakpoint: Breakpoint) -> Option<&StyleMap> {
        match breakpoint {
            Breakpoint::Desktop => self.desktop.as_ref(),
            Breakpoint::Tablet => self.tablet.as_ref(),
            Breakpoint::Mobile => self.mobile.as_ref(),
        }
    }

    /// Override map for a breakpoint, created empty on first use
    pub fn entry(&mut self, breakpoint: Breakpoint) -> &mut StyleMap {
        let slot = match breakpoint {
            Breakpoint::Desktop => &mut self.desktop,
            Breakpoint::Tablet => &mut self.tablet,
            Breakpoint::Mobile => &mut self.mobile,
        };
        slot.get_or_insert_with(StyleMap::new)
    }

    pub fn is_empty(&self) -> bool {
        self.desktop.is_none() && self.tablet.is_none() && self.mobile.is_none()
    }
}
