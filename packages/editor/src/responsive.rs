//! Breakpoint-aware style resolution.
//!
//! An element's effective style is its base `style` overlaid with the
//! overrides for the requested breakpoint. Breakpoints do not cascade: an
//! element styled only for tablet renders with its base style on mobile.

use ienet_document::{Breakpoint, PageData, PageElement, StyleMap};

/// Effective style of `element` at `breakpoint`
pub fn resolve_style(element: &PageElement, breakpoint: Breakpoint) -> StyleMap {
    let mut style = element.properties.style.clone();
    if let Some(overrides) = element.properties.responsive.get(breakpoint) {
        style.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    style
}

/// Resolved style of every element in the page, in depth-first order
pub fn resolve_page(page: &PageData, breakpoint: Breakpoint) -> Vec<(&str, StyleMap)> {
    page.iter()
        .map(|element| (element.id.as_str(), resolve_style(element, breakpoint)))
        .collect()
}

/// Style of the preview frame the canvas is rendered into
pub fn canvas_style(breakpoint: Breakpoint) -> StyleMap {
    let pairs: &[(&str, &str)] = match breakpoint {
        Breakpoint::Desktop => &[
            ("width", "100%"),
            ("transform", "scale(1)"),
            ("transformOrigin", "top center"),
        ],
        Breakpoint::Tablet => &[
            ("maxWidth", "768px"),
            ("margin", "0 auto"),
            ("transform", "scale(0.9)"),
            ("transformOrigin", "top center"),
        ],
        Breakpoint::Mobile => &[
            ("maxWidth", "375px"),
            ("margin", "0 auto"),
            ("transform", "scale(0.8)"),
            ("transformOrigin", "top center"),
        ],
    };

    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Nominal viewport width used when previewing a breakpoint
pub fn viewport_width(breakpoint: Breakpoint) -> u32 {
    breakpoint.max_width_px().unwrap_or(1200)
}
