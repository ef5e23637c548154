//! Designer integration tests

use std::collections::HashSet;
use std::sync::Arc;

use mailforge_core::{DesignError, EventBus};
use mailforge_designer::{
    CanvasSize, CategoryFilter, DesignerOptions, DesignerState, ElementKind, ElementPatch,
    ElementType, Point, PointerButton, PointerOutcome, TemplateCategory, TemplateLibrary,
    MERGE_TAGS,
};

fn new_state() -> DesignerState {
    DesignerState::new(DesignerOptions::default(), Arc::new(EventBus::new()))
}

#[test]
fn test_many_adds_have_unique_ids() {
    let mut state = new_state();
    let types = [
        ElementType::Text,
        ElementType::Image,
        ElementType::Rectangle,
        ElementType::Circle,
        ElementType::MergeTag,
    ];
    let ids: Vec<_> = (0..25).map(|i| state.add_element(types[i % types.len()])).collect();

    assert_eq!(state.canvas().element_count(), 25);
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), 25);
}

#[test]
fn test_partial_updates_do_not_clobber() {
    let mut state = new_state();
    let id = state.add_element(ElementType::Text);

    state.update_element(
        id,
        &ElementPatch {
            x: Some(42.0),
            ..Default::default()
        },
    );
    state.update_element(
        id,
        &ElementPatch {
            y: Some(17.0),
            ..Default::default()
        },
    );
    state.update_element(
        id,
        &ElementPatch {
            content: Some("Open Sunday".to_string()),
            ..Default::default()
        },
    );

    let el = state.canvas().get_element(id).unwrap();
    assert_eq!((el.x, el.y), (42.0, 17.0));
    assert_eq!((el.width, el.height), (200.0, 40.0));
    match &el.kind {
        ElementKind::Text(text) => {
            assert_eq!(text.content, "Open Sunday");
            assert_eq!(text.style.font_size, 24.0);
        }
        other => panic!("unexpected kind {:?}", other),
    }
}

#[test]
fn test_delete_and_selection() {
    let mut state = new_state();
    let a = state.add_element(ElementType::Rectangle);
    let b = state.add_element(ElementType::Circle);

    state.select(a);
    state.delete_element(b);
    assert_eq!(state.canvas().selected_id(), Some(a));

    state.delete_element(a);
    assert_eq!(state.canvas().selected_id(), None);
}

#[test]
fn test_duplicate_offsets_copy() {
    let mut state = new_state();
    let id = state.add_merge_tag(&MERGE_TAGS[2]);
    state.update_element(id, &ElementPatch::position(10.0, 10.0));

    let copy = state.duplicate_element(id).unwrap();
    let original = state.canvas().get_element(id).unwrap().clone();
    let dup = state.canvas().get_element(copy).unwrap().clone();

    assert_ne!(copy, id);
    assert_eq!((dup.x, dup.y), (30.0, 30.0));
    assert_eq!(dup.kind, original.kind);
    assert_eq!((dup.width, dup.height), (original.width, original.height));
    assert_eq!(state.canvas().selected_id(), Some(copy));
}

#[test]
fn test_resize_keeps_element_on_canvas() {
    let mut state = new_state();
    let id = state.add_element(ElementType::Rectangle);
    state.update_element(id, &ElementPatch::position(500.0, 300.0));

    // 4x6 is 600 x 400
    state.update_element(id, &ElementPatch::size(400.0, 400.0));
    let el = state.canvas().get_element(id).unwrap();
    assert_eq!((el.width, el.height), (400.0, 400.0));
    assert_eq!((el.x, el.y), (200.0, 0.0));
}

#[test]
fn test_duplicate_near_edge_stays_on_canvas() {
    let mut state = new_state();
    let id = state.add_element(ElementType::Rectangle);
    state.update_element(id, &ElementPatch::position(500.0, 300.0));

    let copy = state.duplicate_element(id).unwrap();
    let dup = state.canvas().get_element(copy).unwrap();
    assert_eq!((dup.x, dup.y), (500.0, 300.0));
    assert!(dup.x + dup.width <= 600.0 && dup.y + dup.height <= 400.0);
}

#[test]
fn test_hidden_elements_stay_in_layers() {
    let mut state = new_state();
    let a = state.add_element(ElementType::Text);
    let b = state.add_element(ElementType::Image);
    state.toggle_visibility(a);

    let painted: Vec<_> = state.canvas().paint_list().iter().map(|p| p.id).collect();
    assert_eq!(painted, vec![b]);

    let rows = state.layer_rows();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().any(|r| r.id == a && r.hidden));

    // hidden elements cannot be picked on the canvas
    state.deselect();
    state.toggle_visibility(b);
    let outcome = state.press_at(PointerButton::Primary, Point::new(300.0, 200.0));
    assert_eq!(outcome, PointerOutcome::Deselected);
}

#[test]
fn test_template_switch_leaves_no_residue() {
    let library = TemplateLibrary::builtin();
    let mut state = new_state();

    state.load_template(library, "just-sold-stats").unwrap();
    let first_ids = state.canvas().element_ids();
    assert_eq!(state.canvas().size(), CanvasSize::SixByNine);

    state.load_template(library, "holiday-greetings").unwrap();
    let second = library.get("holiday-greetings").unwrap();
    assert_eq!(state.canvas().size(), CanvasSize::FourBySix);
    assert_eq!(state.canvas().element_count(), second.elements.len());
    assert!(state
        .canvas()
        .element_ids()
        .iter()
        .all(|id| !first_ids.contains(id)));
    for (loaded, expected) in state.canvas().elements().iter().zip(&second.elements) {
        assert_eq!(loaded.kind, expected.kind);
        assert_eq!((loaded.x, loaded.y), (expected.x, expected.y));
    }
    assert_eq!(state.canvas().selected_id(), None);
}

#[test]
fn test_template_filter_for_picker() {
    let library = TemplateLibrary::builtin();
    for size in CanvasSize::ALL {
        let all = library.filter(CategoryFilter::All, size);
        let per_category: usize = TemplateCategory::ALL
            .iter()
            .map(|c| library.filter(CategoryFilter::Only(*c), size).len())
            .sum();
        assert_eq!(all.len(), per_category);
    }
}

#[test]
fn test_layer_move_updates_paint_order() {
    let mut state = new_state();
    let a = state.add_element(ElementType::Rectangle);
    let b = state.add_element(ElementType::Circle);
    let c = state.add_element(ElementType::Text);

    // displayed [c, b, a]; drag the bottom row to the top
    state.move_layer(2, 0).unwrap();
    let rows: Vec<_> = state.layer_rows().iter().map(|r| r.id).collect();
    assert_eq!(rows, vec![a, c, b]);

    let painted: Vec<_> = state.canvas().paint_list().iter().map(|p| p.id).collect();
    assert_eq!(painted, vec![b, c, a]);

    assert!(matches!(state.move_layer(0, 3), Err(DesignError::LayerIndexOutOfRange { .. })));
    assert_eq!(state.canvas().paint_list().len(), 3);
}
