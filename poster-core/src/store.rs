//! The editor's scene store: the scene, the element factory and persistence.
//!
//! Every mutation goes through [`SceneStore`]. When the store has a data
//! directory, the affected blob is rewritten after each mutation; write failures
//! are logged and never abort the edit.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::EditorConfig;
use crate::document;
use crate::element::{CanvasSize, ComponentType, Element, ElementFactory, ElementId, ElementUpdate};
use crate::error::DocumentError;
use crate::scene::{NudgeDirection, Scene, SceneSnapshot};
use crate::EditorResult;

/// File holding the persisted canvas size.
pub const CANVAS_SIZE_FILE: &str = "canvas-size.json";

/// File holding the persisted scene snapshot.
pub const SCENE_FILE: &str = "canvas-scene.json";

/// Errors that can occur during store persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store was created without a data directory.
    #[error("No data directory configured")]
    NoDataDir,
    /// An I/O error occurred during persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A persisted blob could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Owns the scene and funnels every mutation through one place.
#[derive(Debug, Clone)]
pub struct SceneStore {
    scene: Scene,
    factory: ElementFactory,
    /// Canvas size restored by [`SceneStore::reset_canvas`].
    default_canvas: CanvasSize,
    /// Optional data directory for filesystem persistence.
    data_dir: Option<PathBuf>,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl SceneStore {
    /// Create an in-memory store. The config's data directory is ignored.
    #[must_use]
    pub fn new(config: &EditorConfig) -> Self {
        let canvas = config.canvas_size();
        Self {
            scene: Scene::new(canvas),
            factory: ElementFactory::new(),
            default_canvas: canvas,
            data_dir: None,
        }
    }

    /// Create a store with filesystem persistence.
    ///
    /// The directory is created if it doesn't exist and any persisted state in it is
    /// restored. Unreadable blobs are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn with_data_dir(
        data_dir: impl Into<PathBuf>,
        config: &EditorConfig,
    ) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        let mut store = Self::new(config);
        store.data_dir = Some(data_dir);
        if let Err(e) = store.load_from_disk() {
            tracing::warn!("Ignoring unreadable persisted state: {e}");
        }
        Ok(store)
    }

    /// Create a store as described by `config`: persistent if it names a data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the data directory cannot be created.
    pub fn open(config: &EditorConfig) -> Result<Self, StoreError> {
        match &config.data_dir {
            Some(dir) => Self::with_data_dir(dir.clone(), config),
            None => Ok(Self::new(config)),
        }
    }

    /// The scene.
    #[must_use]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Committed elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        self.scene.elements()
    }

    /// The element being edited.
    #[must_use]
    pub fn active(&self) -> Option<&Element> {
        self.scene.active()
    }

    /// Every element in paint order, the active one at its slot.
    #[must_use]
    pub fn layers(&self) -> Vec<Element> {
        self.scene.layers()
    }

    /// Canvas dimensions.
    #[must_use]
    pub const fn canvas_size(&self) -> CanvasSize {
        self.scene.canvas_size()
    }

    /// The persistence directory, if any.
    #[must_use]
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Build a default element of `ty` centered on the canvas. The scene is not changed.
    pub fn create_element(&mut self, ty: ComponentType) -> Element {
        self.factory.create(ty, self.scene.canvas_size())
    }

    /// Create the component named by a drop payload, commit it and start editing it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EditorError::InvalidDropType`] if the payload names no component;
    /// the scene is unchanged.
    pub fn drop_component(&mut self, payload: &str) -> EditorResult<ElementId> {
        let ty: ComponentType = payload.trim().parse()?;
        let element = self.create_element(ty);
        let id = self.scene.add(element.clone());
        self.scene.activate(element);
        tracing::debug!("Dropped {ty} element {id}");
        self.persist_scene();
        Ok(id)
    }

    /// Append an element to the list.
    pub fn add(&mut self, element: Element) -> ElementId {
        let id = self.scene.add(element);
        self.persist_scene();
        id
    }

    /// Start editing `element`, committing the previous active element.
    pub fn activate(&mut self, element: Element) {
        self.scene.activate(element);
        self.persist_scene();
    }

    /// Start editing the committed element with `id`. Returns `false` if it doesn't exist.
    pub fn select(&mut self, id: ElementId) -> bool {
        let found = self.scene.select(id);
        if found {
            self.persist_scene();
        }
        found
    }

    /// Merge `update` into the active element.
    ///
    /// # Errors
    ///
    /// Returns a field error if a form update does not fit the active element.
    pub fn update_active(&mut self, update: impl Into<ElementUpdate>) -> EditorResult<()> {
        if self.scene.active().is_none() {
            return Ok(());
        }
        self.scene.update_active(update)?;
        self.persist_scene();
        Ok(())
    }

    /// Commit the active element and clear the active slot.
    pub fn deactivate(&mut self) -> Option<ElementId> {
        let id = self.scene.deactivate();
        if id.is_some() {
            self.persist_scene();
        }
        id
    }

    /// Delete the active element. No-op when nothing is active.
    pub fn delete_active(&mut self) -> Option<Element> {
        let deleted = self.scene.delete_active();
        if deleted.is_some() {
            self.persist_scene();
        }
        deleted
    }

    /// Replace the element list wholesale.
    pub fn update_list(&mut self, list: Vec<Element>) {
        self.scene.update_list(list);
        self.persist_scene();
    }

    /// Nudge the active element by one pixel.
    pub fn move_active(&mut self, direction: NudgeDirection) -> bool {
        let moved = self.scene.move_active(direction);
        if moved {
            self.persist_scene();
        }
        moved
    }

    /// Change the canvas dimensions.
    pub fn set_canvas_size(&mut self, canvas: CanvasSize) {
        self.scene.set_canvas_size(canvas);
        self.persist_canvas_size();
    }

    /// Remove every element and restore the default canvas size.
    pub fn reset_canvas(&mut self) {
        self.scene.reset(self.default_canvas);
        self.factory = ElementFactory::new();
        tracing::info!("Canvas reset");
        self.persist_canvas_size();
        self.persist_scene();
    }

    /// Replace the scene's elements with those of a document.
    ///
    /// Returns the number of imported elements.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] if the document is malformed; the scene is unchanged.
    pub fn import_document(&mut self, text: &str) -> Result<usize, DocumentError> {
        let elements = document::import_document(text)?;
        let count = elements.len();
        self.scene.update_list(elements);
        self.factory.seed(self.scene.elements());
        tracing::info!("Imported {count} elements");
        self.persist_scene();
        Ok(count)
    }

    /// Commit any in-progress edit and serialize the element list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EditorError::Serialization`] if serialization fails.
    pub fn export_document(&mut self) -> EditorResult<String> {
        self.deactivate();
        document::export_document(self.scene.elements())
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Restore the canvas size and scene from the data directory.
    ///
    /// Missing files leave the corresponding state untouched. Both files are read
    /// before anything is applied, so a failure leaves the store as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no data directory or a file can't be read or parsed.
    pub fn load_from_disk(&mut self) -> Result<(), StoreError> {
        let data_dir = self.data_dir.as_ref().ok_or(StoreError::NoDataDir)?;
        let size = read_blob::<CanvasSize>(&data_dir.join(CANVAS_SIZE_FILE))?;
        let snapshot = read_blob::<SceneSnapshot>(&data_dir.join(SCENE_FILE))?;

        if let Some(size) = size {
            self.scene
                .set_canvas_size(CanvasSize::new(size.width, size.height));
        }
        if let Some(snapshot) = snapshot {
            self.scene.restore(snapshot);
            self.factory.seed(&self.scene.layers());
            tracing::debug!(
                "Restored {} elements from {}",
                self.scene.element_count(),
                data_dir.display()
            );
        }
        Ok(())
    }

    /// Save the scene snapshot. No-op without a data directory.
    fn persist_scene(&self) {
        self.write_blob(SCENE_FILE, &self.scene.snapshot());
    }

    /// Save the canvas size. No-op without a data directory.
    fn persist_canvas_size(&self) {
        self.write_blob(CANVAS_SIZE_FILE, &self.scene.canvas_size());
    }

    fn write_blob(&self, file: &str, value: &impl Serialize) {
        let Some(ref data_dir) = self.data_dir else {
            return;
        };
        let json = match serde_json::to_string_pretty(value) {
            Ok(j) => j,
            Err(e) => {
                tracing::warn!("Failed to serialize {file}: {e}");
                return;
            }
        };
        let path = data_dir.join(file);
        if let Err(e) = std::fs::write(&path, json) {
            tracing::warn!("Failed to persist {}: {e}", path.display());
        }
    }
}

fn read_blob<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| StoreError::Serialization(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryPatch;
    use crate::EditorError;

    fn store() -> SceneStore {
        SceneStore::new(&EditorConfig::default())
    }

    #[test]
    fn test_drop_component_adds_and_activates() {
        let mut store = store();
        let id = store.drop_component("rect").expect("drop");
        assert_eq!(store.active().map(Element::id), Some(id));
        assert_eq!(store.layers().len(), 1);
        assert_eq!(store.layers()[0].name, "rect-1");
        store.deactivate();
        assert_eq!(store.elements().len(), 1);
        assert_eq!(store.elements()[0].id(), id);
    }

    #[test]
    fn test_drop_unknown_type_is_rejected() {
        let mut store = store();
        let result = store.drop_component("hexagon");
        assert!(matches!(result, Err(EditorError::InvalidDropType(_))));
        assert!(store.scene().is_empty());
    }

    #[test]
    fn test_drop_second_commits_first() {
        let mut store = store();
        let first = store.drop_component("text").expect("drop");
        store
            .update_active(GeometryPatch {
                y: Some(5.0),
                ..GeometryPatch::default()
            })
            .expect("update");
        let second = store.drop_component("image").expect("drop");
        assert_eq!(store.active().map(Element::id), Some(second));
        let committed = store.elements().iter().find(|e| e.id() == first).expect("first");
        assert!((committed.y - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_export_commits_active() {
        let mut store = store();
        store.drop_component("circle").expect("drop");
        let json = store.export_document().expect("export");
        assert!(store.active().is_none());
        assert!(json.contains("\"circle\""));
    }

    #[test]
    fn test_import_replaces_and_seeds_names() {
        let mut store = store();
        store.drop_component("rect").expect("drop");
        let doc = r##"[{"type":"rect","name":"rect-1","x":0,"y":0,"fillStyle":"#fff"},
                      {"type":"rect","name":"rect-2","x":5,"y":5,"fillStyle":"#000"}]"##;
        assert_eq!(store.import_document(doc).expect("import"), 2);
        assert!(store.active().is_none());
        assert_eq!(store.elements().len(), 2);
        assert_eq!(store.create_element(ComponentType::Rect).name, "rect-3");
    }

    #[test]
    fn test_failed_import_leaves_scene() {
        let mut store = store();
        store.drop_component("rect").expect("drop");
        let before = store.scene().clone();
        assert!(store.import_document(r#"[{"type":"rect","name":"r"}]"#).is_err());
        assert!(store.import_document("not json").is_err());
        assert_eq!(store.scene(), &before);
    }

    #[test]
    fn test_reset_canvas() {
        let mut store = store();
        store.drop_component("rect").expect("drop");
        store.set_canvas_size(CanvasSize::new(750.0, 1300.0));
        store.reset_canvas();
        assert!(store.scene().is_empty());
        assert_eq!(store.canvas_size(), CanvasSize::default());
        assert_eq!(store.create_element(ComponentType::Rect).name, "rect-1");
    }

    #[test]
    fn test_load_without_data_dir_fails() {
        let mut store = store();
        assert!(matches!(store.load_from_disk(), Err(StoreError::NoDataDir)));
    }

    // -----------------------------------------------------------------------
    // Persistence tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_persistence_save_and_restore() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = EditorConfig::default();
        let (committed, active) = {
            let mut store = SceneStore::with_data_dir(dir.path(), &config).expect("store");
            let committed = store.drop_component("rect").expect("drop");
            let active = store.drop_component("text").expect("drop");
            store.set_canvas_size(CanvasSize::new(400.0, 800.0));
            (committed, active)
        };

        assert!(dir.path().join(SCENE_FILE).exists());
        assert!(dir.path().join(CANVAS_SIZE_FILE).exists());

        let mut store = SceneStore::with_data_dir(dir.path(), &config).expect("store2");
        assert_eq!(store.canvas_size(), CanvasSize::new(400.0, 800.0));
        assert_eq!(store.active().map(Element::id), Some(active));
        assert_eq!(store.elements().len(), 1);
        assert_eq!(store.elements()[0].id(), committed);
        assert!(store.scene().is_consistent());
        assert_eq!(store.create_element(ComponentType::Text).name, "text-2");
    }

    #[test]
    fn test_persistence_auto_save_on_update() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = EditorConfig::default();
        {
            let mut store = SceneStore::with_data_dir(dir.path(), &config).expect("store");
            store.drop_component("image").expect("drop");
            store
                .update_active(GeometryPatch {
                    x: Some(42.0),
                    ..GeometryPatch::default()
                })
                .expect("update");
        }
        let store = SceneStore::with_data_dir(dir.path(), &config).expect("store2");
        let active = store.active().expect("restored active");
        assert!((active.x - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_persistence_corrupt_blob_is_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(SCENE_FILE), "{ nope").expect("write");
        let mut store =
            SceneStore::with_data_dir(dir.path(), &EditorConfig::default()).expect("store");
        assert!(store.scene().is_empty());
        assert!(matches!(
            store.load_from_disk(),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_persistence_corrupt_scene_keeps_canvas_size() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store =
            SceneStore::with_data_dir(dir.path(), &EditorConfig::default()).expect("store");
        store.set_canvas_size(CanvasSize::new(500.0, 900.0));
        std::fs::write(dir.path().join(SCENE_FILE), "{ nope").expect("write");

        let mut fresh =
            SceneStore::with_data_dir(dir.path(), &EditorConfig::default()).expect("store2");
        assert_eq!(fresh.canvas_size(), CanvasSize::default());
        assert!(fresh.load_from_disk().is_err());
        assert_eq!(fresh.canvas_size(), CanvasSize::default());
        assert!(fresh.scene().is_empty());
    }

    #[test]
    fn test_persistence_names_continue_after_delete() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = EditorConfig::default();
        {
            let mut store = SceneStore::with_data_dir(dir.path(), &config).expect("store");
            let first = store.drop_component("rect").expect("drop");
            store.drop_component("rect").expect("drop");
            store.deactivate();
            assert!(store.select(first));
            assert_eq!(store.delete_active().map(|e| e.name), Some("rect-1".to_string()));
        }

        let mut store = SceneStore::with_data_dir(dir.path(), &config).expect("store2");
        let names: Vec<_> = store.elements().iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["rect-2"]);
        assert_eq!(store.create_element(ComponentType::Rect).name, "rect-3");
    }

    #[test]
    fn test_open_uses_configured_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = EditorConfig::default().with_data_dir(dir.path().join("nested"));
        let store = SceneStore::open(&config).expect("open");
        assert_eq!(store.data_dir(), Some(dir.path().join("nested").as_path()));
        assert!(dir.path().join("nested").is_dir());
    }
}
