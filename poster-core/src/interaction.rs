//! Translates input events into geometry and store operations.
//!
//! The controller owns the transient interaction state: the gesture in progress,
//! pointer moves waiting for the next animation frame, and the clipboard. All
//! persistent state lives in the [`SceneStore`] passed to each call.

use crate::config::EditorConfig;
use crate::element::{Element, ElementId};
use crate::event::{InputEvent, Shortcut};
use crate::geometry::{compute_geometry, OperationMode, PointerDelta, Rect};
use crate::store::SceneStore;

/// A drag in progress. Every pointer move is measured against its start.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragGesture {
    target: ElementId,
    mode: OperationMode,
    pointer_start: (f64, f64),
    start_rect: Rect,
}

/// Drives the editor from pointer, keyboard and drag-and-drop events.
#[derive(Debug, Clone)]
pub struct InteractionController {
    paste_offset: f64,
    batch_pointer_moves: bool,
    clipboard: Option<Element>,
    gesture: Option<DragGesture>,
    /// Latest pointer position not yet applied (batching only).
    pending_pointer: Option<(f64, f64)>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl InteractionController {
    /// Create a controller.
    #[must_use]
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            paste_offset: config.paste_offset,
            batch_pointer_moves: config.batch_pointer_moves,
            clipboard: None,
            gesture: None,
            pending_pointer: None,
        }
    }

    /// The element that the next paste will insert.
    #[must_use]
    pub fn clipboard(&self) -> Option<&Element> {
        self.clipboard.as_ref()
    }

    /// Whether a drag gesture is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Handle one event. Returns `true` if the event was acted on.
    pub fn handle_event(&mut self, store: &mut SceneStore, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { x, y, handle } => {
                self.pointer_down(store, *x, *y, handle.as_deref())
            }
            InputEvent::PointerMove { x, y } => self.pointer_move(store, *x, *y),
            InputEvent::PointerUp { x, y } => {
                if self.gesture.is_some() {
                    self.pending_pointer = Some((*x, *y));
                }
                self.end_gesture(store)
            }
            InputEvent::PointerLeave => self.end_gesture(store),
            InputEvent::Click { x, y } => match store.scene().element_at(*x, *y) {
                Some(id) => store.select(id),
                None => store.deactivate().is_some(),
            },
            InputEvent::SelectLayer { id } => store.select(*id),
            InputEvent::Drop { payload } => match store.drop_component(payload) {
                Ok(_) => true,
                Err(e) => {
                    tracing::debug!("Ignoring drop: {e}");
                    false
                }
            },
            InputEvent::Key {
                key,
                modifiers,
                text_input_focused,
            } => {
                if *text_input_focused {
                    return false;
                }
                Shortcut::resolve(key, *modifiers)
                    .is_some_and(|shortcut| self.run_shortcut(store, shortcut))
            }
        }
    }

    /// Apply the pointer move waiting for this frame, if any.
    pub fn on_animation_frame(&mut self, store: &mut SceneStore) -> bool {
        match self.pending_pointer.take() {
            Some((x, y)) => self.apply_pointer(store, x, y),
            None => false,
        }
    }

    fn pointer_down(&mut self, store: &mut SceneStore, x: f64, y: f64, handle: Option<&str>) -> bool {
        self.gesture = None;
        self.pending_pointer = None;

        let mode = match handle {
            Some(tag) => match tag.parse::<OperationMode>() {
                Ok(mode) => mode,
                Err(e) => {
                    tracing::debug!("Ignoring pointer down: {e}");
                    return false;
                }
            },
            None => OperationMode::Move,
        };

        if handle.is_none() || store.active().is_none() {
            match store.scene().element_at(x, y) {
                Some(id) => {
                    store.select(id);
                }
                None => return store.deactivate().is_some(),
            }
        }

        let Some(active) = store.active() else {
            return false;
        };
        if mode.is_resize() && !active.is_resizable() {
            tracing::debug!("Element {} cannot be resized", active.id());
            return false;
        }
        self.gesture = Some(DragGesture {
            target: active.id(),
            mode,
            pointer_start: (x, y),
            start_rect: active.rect(),
        });
        true
    }

    fn pointer_move(&mut self, store: &mut SceneStore, x: f64, y: f64) -> bool {
        if self.gesture.is_none() {
            return false;
        }
        if self.batch_pointer_moves {
            self.pending_pointer = Some((x, y));
            return false;
        }
        self.apply_pointer(store, x, y)
    }

    fn end_gesture(&mut self, store: &mut SceneStore) -> bool {
        let flushed = self.on_animation_frame(store);
        let ended = self.gesture.take().is_some();
        flushed || ended
    }

    fn apply_pointer(&mut self, store: &mut SceneStore, x: f64, y: f64) -> bool {
        let Some(gesture) = self.gesture else {
            return false;
        };
        if !store.scene().is_active(gesture.target) {
            self.gesture = None;
            return false;
        }
        let (start_x, start_y) = gesture.pointer_start;
        let delta = PointerDelta::new(x - start_x, y - start_y);
        let patch = compute_geometry(gesture.mode, gesture.start_rect, delta);
        if let Err(e) = store.update_active(patch) {
            tracing::warn!("Failed to apply {} gesture: {e}", gesture.mode);
            return false;
        }
        true
    }

    fn run_shortcut(&mut self, store: &mut SceneStore, shortcut: Shortcut) -> bool {
        match shortcut {
            Shortcut::Delete => {
                self.gesture = None;
                store.delete_active().is_some()
            }
            Shortcut::Nudge(direction) => store.move_active(direction),
            Shortcut::Deactivate => store.deactivate().is_some(),
            Shortcut::Copy => {
                let Some(active) = store.active() else {
                    return false;
                };
                let mut copy = active.duplicate(self.paste_offset);
                copy.internal.index = store.elements().len();
                tracing::debug!("Copied element {}", active.id());
                self.clipboard = Some(copy);
                true
            }
            Shortcut::Paste => {
                let Some(element) = self.clipboard.take() else {
                    return false;
                };
                self.clipboard = Some(element.duplicate(self.paste_offset));
                store.add(element.clone());
                store.activate(element);
                true
            }
        }
    }
}
