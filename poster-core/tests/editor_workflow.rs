//! End-to-end editing sessions driven through the interaction controller.
//!
//! Covers dropping components, gestures, form edits, export/import and
//! persistence across store recreation (simulating a page reload).

use poster_core::{
    ComponentType, EditorConfig, Element, ElementUpdate, FieldKey, FieldValue, InputEvent,
    InteractionController, KeyModifiers, PropertyForm, SceneStore,
};

fn drop_event(payload: &str) -> InputEvent {
    InputEvent::Drop {
        payload: payload.to_string(),
    }
}

fn key(key: &str) -> InputEvent {
    InputEvent::Key {
        key: key.to_string(),
        modifiers: KeyModifiers::default(),
        text_input_focused: false,
    }
}

// ===========================================================================
// Building a poster
// ===========================================================================

#[test]
fn test_build_poster_and_export() {
    let mut store = SceneStore::default();
    let mut controller = InteractionController::default();

    for payload in ["image", "text", "rect", "circle", "line"] {
        assert!(controller.handle_event(&mut store, &drop_event(payload)));
    }
    assert_eq!(store.layers().len(), 5);
    assert_eq!(
        store.active().map(Element::component_type),
        Some(ComponentType::Line)
    );

    // Edit the line through its property form.
    let form = PropertyForm::for_element(store.active().expect("active"));
    assert!(form.addable.iter().any(|d| d.key == FieldKey::Radius));
    store
        .update_active(ElementUpdate::SetField(
            FieldKey::StrokeStyle,
            FieldValue::from("#ff0000"),
        ))
        .expect("set stroke");
    store
        .update_active(ElementUpdate::AddField(FieldKey::Radius))
        .expect("add radius");

    let json = store.export_document().expect("export");
    assert!(store.active().is_none());

    let mut reloaded = SceneStore::default();
    assert_eq!(reloaded.import_document(&json).expect("import"), 5);
    let line = reloaded
        .elements()
        .iter()
        .find(|e| e.component_type() == ComponentType::Line)
        .expect("line");
    assert_eq!(
        line.field(FieldKey::StrokeStyle),
        Some(FieldValue::from("#ff0000"))
    );
    assert!(line.field(FieldKey::Radius).is_some());
    assert_eq!(reloaded.export_document().expect("re-export"), json);
}

#[test]
fn test_reorder_layers_while_editing() {
    let mut store = SceneStore::default();
    let mut controller = InteractionController::default();
    for payload in ["rect", "circle", "text"] {
        controller.handle_event(&mut store, &drop_event(payload));
    }
    let active = store.active().expect("active").id();

    let mut layers = store.layers();
    layers.reverse();
    store.update_list(layers);

    assert_eq!(store.active().map(Element::id), Some(active));
    controller.handle_event(&mut store, &key("Escape"));
    let names: Vec<_> = store.elements().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["text-1", "circle-1", "rect-1"]);
    assert!(store.scene().is_consistent());
}

#[test]
fn test_removing_required_field_fails() {
    let mut store = SceneStore::default();
    store.drop_component("text").expect("drop");
    let before = store.active().cloned();
    assert!(store
        .update_active(ElementUpdate::RemoveField(FieldKey::Content))
        .is_err());
    assert_eq!(store.active().cloned(), before);
}

// ===========================================================================
// Persistence across store recreation
// ===========================================================================

#[test]
fn test_session_survives_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = EditorConfig::default().with_data_dir(dir.path());

    let active = {
        let mut store = SceneStore::open(&config).expect("store1");
        let mut controller = InteractionController::new(&config);
        controller.handle_event(&mut store, &drop_event("rect"));
        controller.handle_event(&mut store, &drop_event("image"));
        controller.handle_event(&mut store, &key("ArrowRight"));
        store.active().cloned().expect("active")
    };

    let mut store = SceneStore::open(&config).expect("store2");
    assert_eq!(store.active(), Some(&active));
    assert_eq!(store.layers().len(), 2);

    store.reset_canvas();
    let store = SceneStore::open(&config).expect("store3");
    assert!(store.scene().is_empty());
}
