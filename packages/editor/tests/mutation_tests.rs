//! Mutation API tests against a fresh builder

use ienet_document::{Breakpoint, ElementTemplate, ElementType, PageData, StyleMap};
use ienet_editor::{Builder, EditorError, ElementPatch, MutationError};
use std::collections::HashSet;

fn builder() -> Builder {
    Builder::new(PageData::untitled("page-1"))
}

fn text(content: &str) -> ElementTemplate {
    ElementTemplate::new(ElementType::Text).with_content(content)
}

#[test]
fn test_add_hero_to_empty_page() {
    let mut builder = builder();

    let id = builder
        .add_element(
            ElementTemplate::new(ElementType::Hero).with_content("Big news"),
            None,
            None,
        )
        .unwrap();

    let page = builder.page();
    assert_eq!(page.elements.len(), 1);
    assert_eq!(page.elements[0].id, id);
    assert_eq!(page.elements[0].element_type, ElementType::Hero);
    assert_eq!(page.elements[0].parent_id, None);
    assert!(!id.is_empty());
}

#[test]
fn test_add_at_index_and_append() {
    let mut builder = builder();
    let a = builder.add_element(text("a"), None, None).unwrap();
    let b = builder.add_element(text("b"), None, None).unwrap();
    let c = builder.add_element(text("c"), None, Some(1)).unwrap();

    let order: Vec<&str> = builder.page().elements.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(order, vec![a.as_str(), c.as_str(), b.as_str()]);
}

#[test]
fn test_add_under_missing_parent_fails() {
    let mut builder = builder();
    let err = builder.add_element(text("x"), Some("ghost"), None).unwrap_err();

    assert!(err.is_not_found());
    assert!(builder.page().elements.is_empty());
    assert_eq!(builder.revision(), 0);
}

#[test]
fn test_add_under_leaf_fails() {
    let mut builder = builder();
    let leaf = builder.add_element(text("leaf"), None, None).unwrap();

    let err = builder.add_element(text("child"), Some(&leaf), None).unwrap_err();
    assert!(matches!(
        err,
        EditorError::Mutation(MutationError::InvalidStructure(_))
    ));
}

#[test]
fn test_duplicate_clones_structure_with_fresh_ids() {
    let mut builder = builder();
    let a = builder
        .add_element(ElementTemplate::new(ElementType::Container), None, None)
        .unwrap();
    let b = builder.add_element(text("inner"), Some(&a), None).unwrap();
    let original = builder.page().elements[0].clone();

    let copy = builder.duplicate_element(&a).unwrap();

    let page = builder.page();
    assert_eq!(page.elements.len(), 2);
    assert_eq!(page.elements[0], original);

    let clone = &page.elements[1];
    assert_eq!(clone.id, copy);
    assert_ne!(clone.id, a);
    assert_eq!(clone.element_type, original.element_type);
    assert_eq!(clone.content, original.content);
    assert_eq!(clone.children.len(), 1);
    assert_ne!(clone.children[0].id, b);
    assert_eq!(clone.children[0].content.as_deref(), Some("inner"));
    assert_eq!(clone.children[0].parent_id.as_deref(), Some(copy.as_str()));
}

#[test]
fn test_ids_stay_unique() {
    let mut builder = builder();
    let section = builder
        .add_element(ElementTemplate::new(ElementType::Section), None, None)
        .unwrap();
    for i in 0..5 {
        builder
            .add_element(text(&format!("item {}", i)), Some(&section), None)
            .unwrap();
    }
    builder.duplicate_element(&section).unwrap();
    builder.duplicate_element(&section).unwrap();

    let page = builder.page();
    let ids: HashSet<&str> = page.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids.len(), page.element_count());
    assert_eq!(page.element_count(), 18);
    page.check_integrity().unwrap();
}

#[test]
fn test_remove_takes_subtree() {
    let mut builder = builder();
    let grid = builder
        .add_element(ElementTemplate::new(ElementType::Grid), None, None)
        .unwrap();
    let child = builder.add_element(text("cell"), Some(&grid), None).unwrap();

    builder.remove_element(&grid).unwrap();

    assert!(builder.find_element(&grid).is_none());
    assert!(builder.find_element(&child).is_none());
    assert!(builder.remove_element(&grid).unwrap_err().is_not_found());
}

#[test]
fn test_update_element_replaces_present_fields() {
    let mut builder = builder();
    let id = builder
        .add_element(text("hello").with_style("color", "red"), None, None)
        .unwrap();

    let mut style = StyleMap::new();
    style.insert("fontSize".to_string(), "18px".to_string());
    builder
        .update_element(&id, ElementPatch::content("bye").with_style(style))
        .unwrap();

    let element = builder.find_element(&id).unwrap();
    assert_eq!(element.content.as_deref(), Some("bye"));
    assert!(!element.properties.style.contains_key("color"));
    assert_eq!(element.properties.style.get("fontSize").map(String::as_str), Some("18px"));
    assert_eq!(element.parent_id, None);
}

#[test]
fn test_inline_style_empty_value_removes() {
    let mut builder = builder();
    let id = builder
        .add_element(text("x").with_style("color", "red"), None, None)
        .unwrap();

    builder.set_inline_style(&id, "margin", "4px").unwrap();
    builder.set_inline_style(&id, "color", "").unwrap();

    let style = &builder.find_element(&id).unwrap().properties.style;
    assert!(!style.contains_key("color"));
    assert_eq!(style.get("margin").map(String::as_str), Some("4px"));
}

#[test]
fn test_responsive_override_resolution() {
    let mut builder = builder();
    let id = builder
        .add_element(
            text("x").with_style("fontSize", "32px").with_style("color", "navy"),
            None,
            None,
        )
        .unwrap();

    let mut delta = StyleMap::new();
    delta.insert("fontSize".to_string(), "20px".to_string());
    builder
        .update_responsive_styles(&id, Breakpoint::Mobile, delta)
        .unwrap();

    assert_eq!(
        builder.resolved_style(&id).unwrap().get("fontSize").map(String::as_str),
        Some("32px")
    );

    builder.set_breakpoint(Breakpoint::Mobile);
    let mobile = builder.resolved_style(&id).unwrap();
    assert_eq!(mobile.get("fontSize").map(String::as_str), Some("20px"));
    assert_eq!(mobile.get("color").map(String::as_str), Some("navy"));

    // tablet has no overrides
    builder.set_breakpoint(Breakpoint::Tablet);
    assert_eq!(
        builder.resolved_style(&id).unwrap().get("fontSize").map(String::as_str),
        Some("32px")
    );
}

#[test]
fn test_update_text_rejects_containers() {
    let mut builder = builder();
    let id = builder
        .add_element(ElementTemplate::new(ElementType::Card), None, None)
        .unwrap();

    let err = builder.update_text(&id, "nope").unwrap_err();
    assert!(matches!(err, EditorError::Mutation(MutationError::NotText(_))));
}

#[test]
fn test_move_up_and_down() {
    let mut builder = builder();
    let a = builder.add_element(text("a"), None, None).unwrap();
    let b = builder.add_element(text("b"), None, None).unwrap();

    builder.move_up(&b).unwrap();
    assert_eq!(builder.page().elements[0].id, b);

    builder.move_down(&b).unwrap();
    assert_eq!(builder.page().elements[0].id, a);
    assert_eq!(builder.page().elements[1].id, b);
}

#[test]
fn test_page_info_updates_title_and_slug() {
    let mut builder = builder();
    builder
        .update_page_info(Some("About Us".to_string()), Some("about-us".to_string()))
        .unwrap();

    assert_eq!(builder.page().title, "About Us");
    assert_eq!(builder.page().slug, "about-us");
    assert!(builder.can_undo());
}

#[test]
fn test_out_of_range_index_lands_last() {
    let mut builder = builder();
    let a = builder.add_element(text("a"), None, None).unwrap();
    let b = builder.add_element(text("b"), None, None).unwrap();
    let c = builder.add_element(text("c"), None, Some(usize::MAX)).unwrap();
    assert_eq!(builder.page().elements[2].id, c);

    builder.move_element(&a, None, usize::MAX).unwrap();
    let order: Vec<&str> = builder.page().elements.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(order, vec![b.as_str(), c.as_str(), a.as_str()]);

    let section = builder
        .add_element(ElementTemplate::new(ElementType::Section), None, None)
        .unwrap();
    builder.add_element(text("inner"), Some(&section), None).unwrap();
    builder.move_element(&b, Some(&section), usize::MAX).unwrap();
    let children = &builder.find_element(&section).unwrap().children;
    assert_eq!(children.len(), 2);
    assert_eq!(children[1].id, b);
    builder.page().check_integrity().unwrap();
}

#[test]
fn test_empty_patch_records_nothing() {
    let mut builder = builder();
    let id = builder.add_element(text("a"), None, None).unwrap();
    let revision = builder.revision();
    let last_step = builder.undo_description().map(str::to_string);

    let result = builder.update_element(&id, ElementPatch::default()).unwrap();

    assert!(!result.applied.changed());
    assert_eq!(result.revision, revision);
    assert_eq!(builder.revision(), revision);
    assert_eq!(builder.undo_description().map(str::to_string), last_step);

    assert!(builder.undo());
    assert!(builder.page().elements.is_empty());
    assert!(!builder.can_undo());
}
