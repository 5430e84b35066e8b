//! Scene state: the committed element list plus the single active element.
//!
//! While an element is being edited it lives in the active slot and is detached
//! from the list; it remembers the list position it came from and is put back
//! there when the edit is committed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::element::{CanvasSize, Element, ElementId, ElementUpdate};
use crate::EditorResult;

/// Distance moved by one arrow-key nudge, in pixels.
pub const NUDGE_STEP: f64 = 1.0;

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NudgeDirection {
    /// Towards the top edge.
    Up,
    /// Towards the bottom edge.
    Down,
    /// Towards the left edge.
    Left,
    /// Towards the right edge.
    Right,
}

/// The element being edited and the list position it returns to.
#[derive(Debug, Clone, PartialEq)]
struct ActiveSlot {
    element: Element,
    /// `None` when the element was never committed to the list.
    slot: Option<usize>,
}

/// Serializable state of a scene: the committed view plus the active element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Elements in paint order, the active element included at its slot.
    pub elements: Vec<Element>,
    /// The element being edited, if any.
    pub active: Option<Element>,
}

/// A canvas with its elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Committed elements; position is paint order.
    elements: Vec<Element>,
    /// The element being edited.
    active: Option<ActiveSlot>,
    /// Canvas dimensions.
    canvas: CanvasSize,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            elements: Vec::new(),
            active: None,
            canvas,
        }
    }

    /// Committed elements in paint order. The active element is not among them.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The element being edited.
    #[must_use]
    pub fn active(&self) -> Option<&Element> {
        self.active.as_ref().map(|a| &a.element)
    }

    /// Whether `id` is the element being edited.
    #[must_use]
    pub fn is_active(&self, id: ElementId) -> bool {
        self.active().is_some_and(|a| a.id() == id)
    }

    /// Canvas dimensions.
    #[must_use]
    pub const fn canvas_size(&self) -> CanvasSize {
        self.canvas
    }

    /// Change the canvas dimensions.
    pub fn set_canvas_size(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
    }

    /// Number of elements, the active one included.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len() + usize::from(self.active.is_some())
    }

    /// Check if the scene has no elements at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    /// Look up an element in the list or the active slot.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.active()
            .filter(|a| a.id() == id)
            .or_else(|| self.elements.iter().find(|e| e.id() == id))
    }

    /// Every element in paint order, the active one at its slot.
    ///
    /// An active element that was never committed is painted last.
    #[must_use]
    pub fn layers(&self) -> Vec<Element> {
        let mut layers = self.elements.clone();
        if let Some(active) = &self.active {
            let at = active.slot.map_or(layers.len(), |slot| slot.min(layers.len()));
            layers.insert(at, active.element.clone());
        }
        layers
    }

    /// Find the element at the given canvas coordinates.
    ///
    /// The active element wins; otherwise the topmost committed element.
    #[must_use]
    pub fn element_at(&self, x: f64, y: f64) -> Option<ElementId> {
        self.active()
            .filter(|a| a.contains_point(x, y))
            .or_else(|| self.elements.iter().rev().find(|e| e.contains_point(x, y)))
            .map(Element::id)
    }

    /// Append an element to the list. The active slot is untouched.
    ///
    /// An element whose ID is already in the scene is ignored.
    pub fn add(&mut self, mut element: Element) -> ElementId {
        let id = element.id();
        if self.get(id).is_some() {
            tracing::warn!("Element {id} is already in the scene; ignoring add");
            return id;
        }
        element.internal.index = self.elements.len();
        element.normalize();
        self.elements.push(element);
        self.debug_check();
        id
    }

    /// Start editing `element`.
    ///
    /// Any element already being edited is committed first. If `element` is in the
    /// list it is detached from it until it is committed again.
    pub fn activate(&mut self, mut element: Element) {
        self.reconcile();
        let id = element.id();
        let slot = self.elements.iter().position(|e| e.id() == id);
        if let Some(pos) = slot {
            self.elements.remove(pos);
            self.reindex();
            element.internal.index = pos;
        }
        element.normalize();
        tracing::debug!("Activated element {id} (slot {slot:?})");
        self.active = Some(ActiveSlot { element, slot });
        self.debug_check();
    }

    /// Start editing the committed element with `id`.
    ///
    /// Returns `false` if no such element exists. Selecting the active element is a no-op.
    pub fn select(&mut self, id: ElementId) -> bool {
        if self.is_active(id) {
            return true;
        }
        match self.elements.iter().find(|e| e.id() == id) {
            Some(element) => {
                let element = element.clone();
                self.activate(element);
                true
            }
            None => false,
        }
    }

    /// Merge `update` into the active element. No-op when nothing is active.
    ///
    /// # Errors
    ///
    /// Returns a field error if a form update does not fit the element; the element is
    /// left unchanged.
    pub fn update_active(&mut self, update: impl Into<ElementUpdate>) -> EditorResult<()> {
        let Some(active) = self.active.as_mut() else {
            return Ok(());
        };
        let mut element = active.element.clone();
        element.apply(update.into())?;
        active.element = element;
        Ok(())
    }

    /// Commit the active element back into the list and clear the active slot.
    ///
    /// Returns the ID of the element that was active.
    pub fn deactivate(&mut self) -> Option<ElementId> {
        let id = self.active().map(Element::id);
        self.reconcile();
        self.debug_check();
        id
    }

    /// Remove the active element from the scene. No-op when nothing is active.
    pub fn delete_active(&mut self) -> Option<Element> {
        let ActiveSlot { element, .. } = self.active.take()?;
        let id = element.id();
        let before = self.elements.len();
        self.elements.retain(|e| e.id() != id);
        if self.elements.len() != before {
            self.reindex();
        }
        tracing::debug!("Deleted element {id}");
        self.debug_check();
        Some(element)
    }

    /// Replace the list wholesale, renumbering every element.
    ///
    /// If the new list contains the active element, its position becomes the active
    /// element's slot and the in-progress edit is kept. Otherwise the active element
    /// is discarded. Repeated IDs keep their first occurrence.
    pub fn update_list(&mut self, list: Vec<Element>) {
        let mut seen = HashSet::with_capacity(list.len());
        let mut list: Vec<Element> = list
            .into_iter()
            .filter(|e| {
                let fresh = seen.insert(e.id());
                if !fresh {
                    tracing::warn!("Dropping repeated element {}", e.id());
                }
                fresh
            })
            .collect();

        if let Some(id) = self.active().map(Element::id) {
            match list.iter().position(|e| e.id() == id) {
                Some(pos) => {
                    list.remove(pos);
                    if let Some(active) = self.active.as_mut() {
                        active.slot = Some(pos);
                        active.element.internal.index = pos;
                    }
                }
                None => {
                    tracing::debug!("Active element {id} not in new list; discarding");
                    self.active = None;
                }
            }
        }

        for element in &mut list {
            element.normalize();
        }
        self.elements = list;
        self.reindex();
        self.debug_check();
    }

    /// Nudge the active element one pixel. Returns `false` when nothing is active.
    pub fn move_active(&mut self, direction: NudgeDirection) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let element = &mut active.element;
        match direction {
            NudgeDirection::Up => element.y -= NUDGE_STEP,
            NudgeDirection::Down => element.y += NUDGE_STEP,
            NudgeDirection::Left => element.x -= NUDGE_STEP,
            NudgeDirection::Right => element.x += NUDGE_STEP,
        }
        true
    }

    /// Remove every element and restore the given canvas size.
    pub fn reset(&mut self, canvas: CanvasSize) {
        self.elements.clear();
        self.active = None;
        self.canvas = canvas;
    }

    /// Capture the scene for persistence.
    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        let mut elements = self.elements.clone();
        if let Some(ActiveSlot {
            element,
            slot: Some(slot),
        }) = &self.active
        {
            elements.insert((*slot).min(elements.len()), element.clone());
        }
        SceneSnapshot {
            elements,
            active: self.active().cloned(),
        }
    }

    /// Replace the scene contents with a snapshot, re-activating its active element.
    pub fn restore(&mut self, snapshot: SceneSnapshot) {
        self.active = None;
        self.update_list(snapshot.elements);
        if let Some(active) = snapshot.active {
            self.activate(active);
        }
    }

    /// Whether every list index matches its position and no element is both listed and active.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let indexed = self
            .elements
            .iter()
            .enumerate()
            .all(|(i, e)| e.internal.index == i);
        let detached = !self
            .active()
            .is_some_and(|a| self.elements.iter().any(|e| e.id() == a.id()));
        indexed && detached
    }

    /// Write the active element back at its slot and clear the active slot.
    fn reconcile(&mut self) {
        let Some(ActiveSlot { mut element, slot }) = self.active.take() else {
            return;
        };
        match slot {
            Some(slot) => {
                let at = slot.min(self.elements.len());
                element.internal.index = at;
                self.elements.insert(at, element);
                self.reindex();
            }
            None => {
                tracing::warn!(
                    "Active element {} was never committed; nothing to reconcile",
                    element.id()
                );
            }
        }
    }

    fn reindex(&mut self) {
        for (i, element) in self.elements.iter_mut().enumerate() {
            element.internal.index = i;
        }
    }

    fn debug_check(&self) {
        debug_assert!(self.is_consistent(), "scene invariants violated");
    }
}
