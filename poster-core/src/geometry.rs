//! Geometry engine: turns a drag gesture into a position/size patch.
//!
//! Everything here is pure. The caller captures the element rectangle when the
//! gesture starts and passes the pointer offset accumulated since then, so
//! intermediate frames never feed back into the computation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::MIN_SIZE;
use crate::EditorError;

/// Which handle (or the element body) is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationMode {
    /// Drag the whole element.
    Move,
    /// Top edge handle.
    LineTop,
    /// Bottom edge handle.
    LineBottom,
    /// Left edge handle.
    LineLeft,
    /// Right edge handle.
    LineRight,
    /// Top-left corner handle.
    PointerTopLeft,
    /// Top-right corner handle.
    PointerTopRight,
    /// Bottom-left corner handle.
    PointerBottomLeft,
    /// Bottom-right corner handle.
    PointerBottomRight,
}

impl OperationMode {
    /// Every mode, handles in clockwise order after `Move`.
    pub const ALL: [Self; 9] = [
        Self::Move,
        Self::LineTop,
        Self::LineRight,
        Self::LineBottom,
        Self::LineLeft,
        Self::PointerTopLeft,
        Self::PointerTopRight,
        Self::PointerBottomRight,
        Self::PointerBottomLeft,
    ];

    /// The handle tag carried by the rendered node.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::LineTop => "line-top",
            Self::LineBottom => "line-bottom",
            Self::LineLeft => "line-left",
            Self::LineRight => "line-right",
            Self::PointerTopLeft => "pointer-top-left",
            Self::PointerTopRight => "pointer-top-right",
            Self::PointerBottomLeft => "pointer-bottom-left",
            Self::PointerBottomRight => "pointer-bottom-right",
        }
    }

    /// Whether this mode changes the element's size.
    #[must_use]
    pub const fn is_resize(self) -> bool {
        !matches!(self, Self::Move)
    }

    /// Whether this is one of the four corner handles.
    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            Self::PointerTopLeft
                | Self::PointerTopRight
                | Self::PointerBottomLeft
                | Self::PointerBottomRight
        )
    }

    /// Whether dragging moves the top edge (the bottom edge stays put).
    const fn moves_top(self) -> bool {
        matches!(
            self,
            Self::LineTop | Self::PointerTopLeft | Self::PointerTopRight
        )
    }

    /// Whether dragging moves the bottom edge.
    const fn moves_bottom(self) -> bool {
        matches!(
            self,
            Self::LineBottom | Self::PointerBottomLeft | Self::PointerBottomRight
        )
    }

    /// Whether dragging moves the left edge (the right edge stays put).
    const fn moves_left(self) -> bool {
        matches!(
            self,
            Self::LineLeft | Self::PointerTopLeft | Self::PointerBottomLeft
        )
    }

    /// Whether dragging moves the right edge.
    const fn moves_right(self) -> bool {
        matches!(
            self,
            Self::LineRight | Self::PointerTopRight | Self::PointerBottomRight
        )
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationMode {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| EditorError::InvalidOperationMode(s.to_string()))
    }
}

/// An axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Pointer offset since the gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerDelta {
    /// Horizontal offset.
    pub dx: f64,
    /// Vertical offset.
    pub dy: f64,
}

impl PointerDelta {
    /// Create a delta.
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// The geometry fields a gesture changed. Absent fields are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryPatch {
    /// New left edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New top edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl GeometryPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.width.is_none() && self.height.is_none()
    }

    /// Merge this patch over `rect`.
    #[must_use]
    pub fn apply_to(&self, rect: Rect) -> Rect {
        Rect {
            x: self.x.unwrap_or(rect.x),
            y: self.y.unwrap_or(rect.y),
            width: self.width.unwrap_or(rect.width),
            height: self.height.unwrap_or(rect.height),
        }
    }
}

/// Compute the geometry produced by dragging `mode` by `delta` from `start`.
///
/// * `Move` translates, clamping the top-left corner at the canvas origin.
/// * Edge handles move one edge; the opposite edge stays anchored.
/// * Corner handles move two edges and then force a 1:1 aspect ratio, keeping
///   the corner opposite the dragged one anchored.
///
/// Sizes never drop below one pixel, and a moving top/left edge never crosses
/// the anchored bottom/right edge.
#[must_use]
pub fn compute_geometry(mode: OperationMode, start: Rect, delta: PointerDelta) -> GeometryPatch {
    if mode == OperationMode::Move {
        return GeometryPatch {
            x: Some((start.x + delta.dx).max(0.0)),
            y: Some((start.y + delta.dy).max(0.0)),
            ..GeometryPatch::default()
        };
    }

    let right = start.x + start.width;
    let bottom = start.y + start.height;

    let mut width = start.width;
    let mut height = start.height;
    if mode.moves_right() {
        width += delta.dx;
    }
    if mode.moves_left() {
        width -= delta.dx;
    }
    if mode.moves_bottom() {
        height += delta.dy;
    }
    if mode.moves_top() {
        height -= delta.dy;
    }

    if mode.is_corner() {
        let side = width.max(height);
        width = side;
        height = side;
    }

    width = width.max(MIN_SIZE);
    height = height.max(MIN_SIZE);

    let horizontal = mode.moves_left() || mode.moves_right();
    let vertical = mode.moves_top() || mode.moves_bottom();

    GeometryPatch {
        x: mode
            .moves_left()
            .then(|| (right - width).min(right - MIN_SIZE)),
        y: mode
            .moves_top()
            .then(|| (bottom - height).min(bottom - MIN_SIZE)),
        width: horizontal.then_some(width),
        height: vertical.then_some(height),
    }
}
