//! # Drag and Drop
//!
//! Turns a pointer gesture into at most one [`Mutation`].
//!
//! ```text
//! Idle ──start──▶ Dragging ◀──leave── Hovering(zone)
//!                    │  ──hover──▶       │
//!                    └──── drop / cancel ┘──▶ Dropped(mutation) | Cancelled(reason)
//! ```
//!
//! Drop zones sit between siblings and at both ends of every container's
//! children (and of the root list). Zone indices are in pre-removal
//! coordinates: when an element is dragged further down inside its own
//! parent, the resulting move index is one less than the zone index.

use crate::Mutation;
use ienet_document::{ElementTemplate, PageData, PageElement};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An addressable insertion point
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropZone {
    /// Container the zone belongs to (`None` = page root)
    pub parent_id: Option<String>,

    /// Insertion index among the container's current children
    pub index: usize,

    /// Nesting depth of the container; root zones are depth 0
    pub depth: usize,
}

impl DropZone {
    pub fn root(index: usize) -> Self {
        Self {
            parent_id: None,
            index,
            depth: 0,
        }
    }

    pub fn inside(parent_id: impl Into<String>, index: usize, depth: usize) -> Self {
        Self {
            parent_id: Some(parent_id.into()),
            index,
            depth,
        }
    }
}

/// Every drop zone of the page, in document order
pub fn drop_zones(page: &PageData) -> Vec<DropZone> {
    let mut zones = Vec::new();
    collect_zones(&page.elements, None, 0, &mut zones);
    zones
}

fn collect_zones(
    children: &[PageElement],
    parent_id: Option<&str>,
    depth: usize,
    zones: &mut Vec<DropZone>,
) {
    let zone = |index| DropZone {
        parent_id: parent_id.map(str::to_string),
        index,
        depth,
    };

    for (index, child) in children.iter().enumerate() {
        zones.push(zone(index));
        if child.element_type.accepts_children() {
            collect_zones(&child.children, Some(&child.id), depth + 1, zones);
        }
    }
    zones.push(zone(children.len()));
}

/// What is being dragged
#[derive(Debug, Clone, PartialEq)]
pub enum DragSource {
    /// A library item, not yet in the page
    Template(ElementTemplate),

    /// An element already in the page
    Element(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: DragSource,
    },
    Hovering {
        source: DragSource,
        zone: DropZone,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Released outside any zone
    NoZone,

    /// Aborted by the user
    Escaped,

    /// Dropped onto itself or into its own subtree
    SelfDrop,

    /// Dropped exactly where it already was
    Unchanged,

    /// The dragged element no longer exists
    SourceMissing,
}

/// Terminal result of a gesture
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    Dropped(Mutation),
    Cancelled(CancelReason),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DragError {
    #[error("A drag gesture is already in progress")]
    GestureInProgress,

    #[error("No drag gesture in progress")]
    NoGesture,
}

/// Per-gesture state machine
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Zone currently highlighted, if any
    pub fn hovered_zone(&self) -> Option<&DropZone> {
        match &self.state {
            DragState::Hovering { zone, .. } => Some(zone),
            _ => None,
        }
    }

    pub fn start(&mut self, source: DragSource) -> Result<(), DragError> {
        if self.is_active() {
            return Err(DragError::GestureInProgress);
        }
        self.state = DragState::Dragging { source };
        Ok(())
    }

    /// Pointer moved over `zones`; only the innermost one is tracked.
    ///
    /// An empty slice means the pointer left every zone.
    pub fn hover(&mut self, zones: &[DropZone]) -> Result<Option<&DropZone>, DragError> {
        let source = self.take_source()?;

        // first of the deepest zones
        let innermost = zones.iter().rev().max_by_key(|zone| zone.depth).cloned();

        self.state = match innermost {
            Some(zone) => DragState::Hovering { source, zone },
            None => DragState::Dragging { source },
        };
        Ok(self.hovered_zone())
    }

    pub fn leave(&mut self) -> Result<(), DragError> {
        self.hover(&[]).map(|_| ())
    }

    /// Abort the gesture without touching the page
    pub fn cancel(&mut self) -> Result<DragOutcome, DragError> {
        self.take_source()?;
        Ok(DragOutcome::Cancelled(CancelReason::Escaped))
    }

    /// Release the pointer, resolving the gesture against `page`.
    ///
    /// The controller is idle afterwards whatever the outcome.
    pub fn drop(&mut self, page: &PageData) -> Result<DragOutcome, DragError> {
        let state = std::mem::take(&mut self.state);

        let (source, zone) = match state {
            DragState::Idle => return Err(DragError::NoGesture),
            DragState::Dragging { .. } => {
                return Ok(DragOutcome::Cancelled(CancelReason::NoZone))
            }
            DragState::Hovering { source, zone } => (source, zone),
        };

        let outcome = match source {
            DragSource::Template(template) => DragOutcome::Dropped(Mutation::AddElement {
                template,
                parent_id: zone.parent_id,
                index: Some(zone.index),
            }),
            DragSource::Element(node_id) => resolve_move(page, node_id, zone),
        };

        match &outcome {
            DragOutcome::Cancelled(reason @ (CancelReason::SelfDrop | CancelReason::SourceMissing)) => {
                tracing::warn!(?reason, "drop rejected");
            }
            DragOutcome::Cancelled(reason) => tracing::debug!(?reason, "drop cancelled"),
            DragOutcome::Dropped(mutation) => tracing::debug!(mutation = mutation.label(), "drop accepted"),
        }

        Ok(outcome)
    }

    fn take_source(&mut self) -> Result<DragSource, DragError> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => Err(DragError::NoGesture),
            DragState::Dragging { source } | DragState::Hovering { source, .. } => Ok(source),
        }
    }
}

fn resolve_move(page: &PageData, node_id: String, zone: DropZone) -> DragOutcome {
    let Some(from) = page.locate(&node_id) else {
        return DragOutcome::Cancelled(CancelReason::SourceMissing);
    };

    if let Some(parent_id) = &zone.parent_id {
        if page.would_create_cycle(&node_id, parent_id) {
            return DragOutcome::Cancelled(CancelReason::SelfDrop);
        }
    }

    let mut index = zone.index;
    if from.parent_id == zone.parent_id {
        if from.index < index {
            index -= 1;
        }
        if from.index == index {
            return DragOutcome::Cancelled(CancelReason::Unchanged);
        }
    }

    DragOutcome::Dropped(Mutation::MoveElement {
        node_id,
        new_parent_id: zone.parent_id,
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ienet_document::{ElementType, IDGenerator};

    /// section[a, b, c] at root
    fn page() -> (PageData, Vec<String>) {
        let mut page = PageData::untitled("drag");
        let mut ids = IDGenerator::new("drag");
        let applied = Mutation::AddElement {
            template: ElementTemplate::new(ElementType::Section).with_children(
                ["a", "b", "c"]
                    .map(|text| ElementTemplate::new(ElementType::Text).with_content(text)),
            ),
            parent_id: None,
            index: None,
        }
        .apply(&mut page, &mut ids)
        .unwrap();

        let section = page.find_element(applied.inserted_id().unwrap()).unwrap();
        let mut order = vec![section.id.clone()];
        order.extend(section.children.iter().map(|child| child.id.clone()));
        (page, order)
    }

    #[test]
    fn test_zone_enumeration() {
        let (page, ids) = page();
        let zones = drop_zones(&page);

        // root: 0, [section: 0..=3], root: 1
        assert_eq!(zones.len(), 6);
        assert_eq!(zones[0], DropZone::root(0));
        assert_eq!(zones[1], DropZone::inside(ids[0].clone(), 0, 1));
        assert_eq!(zones[4], DropZone::inside(ids[0].clone(), 3, 1));
        assert_eq!(zones[5], DropZone::root(1));
    }

    #[test]
    fn test_innermost_zone_wins() {
        let (_, ids) = page();
        let mut drag = DragController::new();
        drag.start(DragSource::Element(ids[1].clone())).unwrap();

        let zone = drag
            .hover(&[DropZone::root(0), DropZone::inside(ids[0].clone(), 2, 1)])
            .unwrap()
            .cloned();
        assert_eq!(zone, Some(DropZone::inside(ids[0].clone(), 2, 1)));
    }

    #[test]
    fn test_move_down_within_parent_adjusts_index() {
        let (page, ids) = page();
        let mut drag = DragController::new();
        drag.start(DragSource::Element(ids[1].clone())).unwrap();
        drag.hover(&[DropZone::inside(ids[0].clone(), 3, 1)]).unwrap();

        let outcome = drag.drop(&page).unwrap();
        assert_eq!(
            outcome,
            DragOutcome::Dropped(Mutation::MoveElement {
                node_id: ids[1].clone(),
                new_parent_id: Some(ids[0].clone()),
                index: 2,
            })
        );
        assert!(!drag.is_active());
    }

    #[test]
    fn test_drop_into_own_subtree_cancelled() {
        let (page, ids) = page();
        let mut drag = DragController::new();
        drag.start(DragSource::Element(ids[0].clone())).unwrap();
        drag.hover(&[DropZone::inside(ids[0].clone(), 1, 1)]).unwrap();

        assert_eq!(
            drag.drop(&page).unwrap(),
            DragOutcome::Cancelled(CancelReason::SelfDrop)
        );
    }

    #[test]
    fn test_drop_in_place_is_unchanged() {
        let (page, ids) = page();
        let mut drag = DragController::new();
        drag.start(DragSource::Element(ids[2].clone())).unwrap();
        drag.hover(&[DropZone::inside(ids[0].clone(), 2, 1)]).unwrap();

        assert_eq!(
            drag.drop(&page).unwrap(),
            DragOutcome::Cancelled(CancelReason::Unchanged)
        );
    }

    #[test]
    fn test_second_gesture_rejected() {
        let mut drag = DragController::new();
        drag.start(DragSource::Element("x".to_string())).unwrap();
        assert_eq!(
            drag.start(DragSource::Element("y".to_string())),
            Err(DragError::GestureInProgress)
        );
    }

    #[test]
    fn test_release_outside_zones() {
        let (page, _) = page();
        let mut drag = DragController::new();
        drag.start(DragSource::Template(ElementTemplate::new(ElementType::Button)))
            .unwrap();
        drag.hover(&[DropZone::root(0)]).unwrap();
        drag.leave().unwrap();

        assert_eq!(
            drag.drop(&page).unwrap(),
            DragOutcome::Cancelled(CancelReason::NoZone)
        );
        assert_eq!(drag.drop(&page), Err(DragError::NoGesture));
    }
}
