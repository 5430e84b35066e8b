//! Canvas elements - the building blocks of a poster.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::form::{FieldKey, FieldValue};
use crate::geometry::{GeometryPatch, Rect};
use crate::{EditorError, EditorResult};

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: f64 = 375.0;

/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 650.0;

/// Default width of image and shape components.
pub const COMPONENT_WIDTH: f64 = 100.0;

/// Default height of image and shape components.
pub const COMPONENT_HEIGHT: f64 = 100.0;

/// Default line height of text components.
pub const TEXT_LINE_HEIGHT: f64 = 20.0;

/// Smallest width or height an element can have.
pub const MIN_SIZE: f64 = 1.0;

/// Font size assumed when a font string carries no `px` size.
const FALLBACK_FONT_SIZE: f64 = 16.0;

/// Image shown for freshly dropped image components.
pub const PLACEHOLDER_IMAGE: &str =
    "https://static.guaguayoupin.com/ui/mini-ggyp/avatar/default_avatar.jpg";

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bookkeeping that never leaves the editor (stripped on export).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Internal {
    /// Identity key, stable for the element's lifetime.
    pub id: ElementId,
    /// Position in the element list, which is also the paint order.
    pub index: usize,
}

/// Size of the canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl CanvasSize {
    /// Create a canvas size, flooring both sides at one pixel.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(MIN_SIZE),
            height: height.max(MIN_SIZE),
        }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

/// The kinds of component a user can place on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    /// A bitmap image loaded from a URL.
    Image,
    /// A block of styled text.
    Text,
    /// A filled and/or stroked rectangle.
    Rect,
    /// A thin stroked rectangle used as a rule.
    Line,
    /// A rectangle rounded into a circle.
    Circle,
}

impl ComponentType {
    /// Every component type, in sidebar order.
    pub const ALL: [Self; 5] = [Self::Image, Self::Text, Self::Rect, Self::Circle, Self::Line];

    /// The wire name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Text => "text",
            Self::Rect => "rect",
            Self::Line => "line",
            Self::Circle => "circle",
        }
    }

    /// Whether this type shares the rectangle field set.
    #[must_use]
    pub const fn is_shape(self) -> bool {
        matches!(self, Self::Rect | Self::Line | Self::Circle)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| EditorError::InvalidDropType(s.to_string()))
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Align to the left edge.
    Left,
    /// Center within the box.
    Center,
    /// Align to the right edge.
    Right,
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    /// Align to the top.
    Top,
    /// Center vertically.
    Middle,
    /// Align to the bottom.
    Bottom,
}

/// How a shape is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeMode {
    /// Fill the content area only.
    Fill,
    /// Stroke the border only.
    Stroke,
    /// Fill and stroke.
    Both,
}

/// Fields specific to image elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageProps {
    /// Image address.
    pub url: String,
    /// Corner rounding in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

/// Fields specific to text elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    /// Text color.
    pub fill_style: String,
    /// Composite font: style, weight, size, family (`normal 400 14px PingFangSC-Regular`).
    pub font: String,
    /// The text itself.
    pub content: String,
    /// Horizontal alignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    /// Vertical alignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<TextBaseline>,
    /// Maximum width in pixels; overflow is ellipsized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    /// Maximum number of lines; enables multi-line clamping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u32>,
    /// Line height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    /// Text decoration, e.g. `line-through`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    /// Paint opacity in `0..=1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

impl TextProps {
    /// Font size in pixels, read from the `NNpx` token of the font string.
    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.font
            .split_whitespace()
            .find_map(|token| token.strip_suffix("px")?.parse::<f64>().ok())
            .filter(|size| *size > 0.0)
            .unwrap_or(FALLBACK_FONT_SIZE)
    }

    /// Width and height implied by the text properties.
    ///
    /// Width is `maxWidth`, or the content length times the font size when unset.
    /// Height is `rowCount` lines of `lineHeight` (font size when unset).
    #[must_use]
    pub fn derived_size(&self) -> (f64, f64) {
        let font_size = self.font_size();
        #[allow(clippy::cast_precision_loss)]
        let width = self
            .max_width
            .unwrap_or_else(|| self.content.chars().count() as f64 * font_size);
        let line_height = self.line_height.unwrap_or(font_size);
        let rows = f64::from(self.row_count.unwrap_or(1).max(1));
        (width.max(MIN_SIZE), (rows * line_height).max(MIN_SIZE))
    }
}

/// Fields shared by rectangles, lines and circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProps {
    /// Fill color.
    pub fill_style: String,
    /// Corner rounding in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Border width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    /// Border color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_style: Option<String>,
    /// Paint mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ShapeMode>,
}

/// Type-specific element content, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementProps {
    /// An image.
    Image(ImageProps),
    /// A text block.
    Text(TextProps),
    /// A rectangle.
    Rect(ShapeProps),
    /// A line.
    Line(ShapeProps),
    /// A circle.
    Circle(ShapeProps),
}

impl ElementProps {
    /// The component type of this content.
    #[must_use]
    pub const fn component_type(&self) -> ComponentType {
        match self {
            Self::Image(_) => ComponentType::Image,
            Self::Text(_) => ComponentType::Text,
            Self::Rect(_) => ComponentType::Rect,
            Self::Line(_) => ComponentType::Line,
            Self::Circle(_) => ComponentType::Circle,
        }
    }

    /// The shared shape fields, if this is a rectangle, line or circle.
    #[must_use]
    pub const fn shape(&self) -> Option<&ShapeProps> {
        match self {
            Self::Rect(shape) | Self::Line(shape) | Self::Circle(shape) => Some(shape),
            Self::Image(_) | Self::Text(_) => None,
        }
    }
}

fn default_width() -> f64 {
    COMPONENT_WIDTH
}

fn default_height() -> f64 {
    COMPONENT_HEIGHT
}

/// A canvas element: position, size, label and typed content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Type-specific content (carries the `type` tag).
    #[serde(flatten)]
    pub props: ElementProps,
    /// Display label.
    pub name: String,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    /// Width in pixels.
    #[serde(default = "default_width")]
    pub width: f64,
    /// Height in pixels.
    #[serde(default = "default_height")]
    pub height: f64,
    /// Editor bookkeeping.
    #[serde(default)]
    pub internal: Internal,
}

impl Element {
    /// Create a new element at the origin with default size and a fresh ID.
    #[must_use]
    pub fn new(props: ElementProps, name: impl Into<String>) -> Self {
        let mut element = Self {
            props,
            name: name.into(),
            x: 0.0,
            y: 0.0,
            width: COMPONENT_WIDTH,
            height: COMPONENT_HEIGHT,
            internal: Internal::default(),
        };
        element.normalize();
        element
    }

    /// Set the bounding rectangle.
    #[must_use]
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
        self.normalize();
        self
    }

    /// The element's identity.
    #[must_use]
    pub const fn id(&self) -> ElementId {
        self.internal.id
    }

    /// The element's component type.
    #[must_use]
    pub const fn component_type(&self) -> ComponentType {
        self.props.component_type()
    }

    /// Whether drag handles may change this element's size.
    #[must_use]
    pub const fn is_resizable(&self) -> bool {
        !matches!(self.props, ElementProps::Text(_))
    }

    /// The bounding rectangle.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Check if a point (in canvas coordinates) is within this element.
    #[must_use]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    /// A copy with a fresh identity, shifted by `offset` on both axes.
    #[must_use]
    pub fn duplicate(&self, offset: f64) -> Self {
        let mut copy = self.clone();
        copy.internal.id = ElementId::new();
        copy.x += offset;
        copy.y += offset;
        copy
    }

    /// Merge a geometry patch; text elements keep their derived size.
    pub fn apply_geometry(&mut self, patch: &GeometryPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        self.normalize();
    }

    /// Apply an update.
    ///
    /// # Errors
    ///
    /// Returns a field error if a field update does not fit this element's type.
    pub fn apply(&mut self, update: ElementUpdate) -> EditorResult<()> {
        match update {
            ElementUpdate::Geometry(patch) => self.apply_geometry(&patch),
            ElementUpdate::SetField(key, value) => self.set_field(key, value)?,
            ElementUpdate::AddField(key) => self.add_field(key)?,
            ElementUpdate::RemoveField(key) => self.remove_field(key)?,
            ElementUpdate::Replace(mut element) => {
                element.internal = self.internal;
                *self = *element;
            }
        }
        self.normalize();
        Ok(())
    }

    /// Re-establish the size invariants.
    ///
    /// Width and height are floored at [`MIN_SIZE`]; text size is derived from its properties.
    pub fn normalize(&mut self) {
        if let ElementProps::Text(text) = &self.props {
            let (width, height) = text.derived_size();
            self.width = width;
            self.height = height;
        }
        self.width = self.width.max(MIN_SIZE);
        self.height = self.height.max(MIN_SIZE);
    }
}

/// A change to merge into an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementUpdate {
    /// Position/size patch from the geometry engine.
    Geometry(GeometryPatch),
    /// Set one form field.
    SetField(FieldKey, FieldValue),
    /// Add an optional field with its default value.
    AddField(FieldKey),
    /// Delete an optional field.
    RemoveField(FieldKey),
    /// Replace everything except the element's identity.
    Replace(Box<Element>),
}

impl From<GeometryPatch> for ElementUpdate {
    fn from(patch: GeometryPatch) -> Self {
        Self::Geometry(patch)
    }
}

impl From<Element> for ElementUpdate {
    fn from(element: Element) -> Self {
        Self::Replace(Box::new(element))
    }
}

/// Builds default elements and numbers their names per type.
#[derive(Debug, Clone, Default)]
pub struct ElementFactory {
    counts: HashMap<ComponentType, u32>,
}

impl ElementFactory {
    /// Create a factory with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the counters from existing elements so new names continue the sequence.
    ///
    /// Each counter resumes after the highest `{type}-N` suffix in use, and never
    /// below the number of elements of that type.
    pub fn seed<'a>(&mut self, elements: impl IntoIterator<Item = &'a Element>) {
        let mut totals: HashMap<ComponentType, u32> = HashMap::new();
        let mut highest: HashMap<ComponentType, u32> = HashMap::new();
        for element in elements {
            let ty = element.component_type();
            *totals.entry(ty).or_default() += 1;
            if let Some(n) = name_suffix(ty, &element.name) {
                let top = highest.entry(ty).or_default();
                *top = (*top).max(n);
            }
        }
        self.counts = totals
            .into_iter()
            .map(|(ty, total)| (ty, total.max(highest.get(&ty).copied().unwrap_or(0))))
            .collect();
    }

    /// Build a default element of `ty`, centered on a canvas of `canvas` size.
    pub fn create(&mut self, ty: ComponentType, canvas: CanvasSize) -> Element {
        let count = self.counts.entry(ty).or_default();
        *count += 1;
        create_default(ty, canvas, &format!("{ty}-{count}"))
    }
}

/// The `N` of a generated `{type}-N` name.
fn name_suffix(ty: ComponentType, name: &str) -> Option<u32> {
    name.strip_prefix(ty.as_str())?
        .strip_prefix('-')?
        .parse()
        .ok()
}

/// Build the default element of `ty`, centered on the canvas.
///
/// Text spans the full canvas width.
#[must_use]
pub fn create_default(ty: ComponentType, canvas: CanvasSize, name: &str) -> Element {
    let (props, width, height) = match ty {
        ComponentType::Image => (
            ElementProps::Image(ImageProps {
                url: PLACEHOLDER_IMAGE.to_string(),
                radius: None,
            }),
            COMPONENT_WIDTH,
            COMPONENT_HEIGHT,
        ),
        ComponentType::Text => (
            ElementProps::Text(TextProps {
                fill_style: "#333333".to_string(),
                font: "normal 400 16px PingFangSC-Regular".to_string(),
                content: "Text".to_string(),
                align: Some(TextAlign::Left),
                baseline: None,
                max_width: Some(canvas.width),
                row_count: None,
                line_height: Some(TEXT_LINE_HEIGHT),
                text_decoration: None,
                alpha: None,
            }),
            canvas.width,
            TEXT_LINE_HEIGHT,
        ),
        ComponentType::Rect => (
            ElementProps::Rect(ShapeProps {
                fill_style: "#cccccc".to_string(),
                radius: None,
                line_width: None,
                stroke_style: None,
                mode: Some(ShapeMode::Fill),
            }),
            COMPONENT_WIDTH,
            COMPONENT_HEIGHT,
        ),
        ComponentType::Line => (
            ElementProps::Line(ShapeProps {
                fill_style: "#333333".to_string(),
                radius: None,
                line_width: Some(2.0),
                stroke_style: Some("#333333".to_string()),
                mode: Some(ShapeMode::Stroke),
            }),
            COMPONENT_WIDTH,
            2.0,
        ),
        ComponentType::Circle => (
            ElementProps::Circle(ShapeProps {
                fill_style: "#cccccc".to_string(),
                radius: Some(COMPONENT_WIDTH / 2.0),
                line_width: None,
                stroke_style: None,
                mode: Some(ShapeMode::Fill),
            }),
            COMPONENT_WIDTH,
            COMPONENT_HEIGHT,
        ),
    };

    Element::new(props, name).with_rect(Rect {
        x: (canvas.width - width) / 2.0,
        y: (canvas.height - height) / 2.0,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inside(element: &Element, canvas: CanvasSize) -> bool {
        element.x >= 0.0
            && element.y >= 0.0
            && element.x + element.width <= canvas.width
            && element.y + element.height <= canvas.height
    }

    #[test]
    fn test_defaults_fit_inside_canvas() {
        for canvas in [CanvasSize::default(), CanvasSize::new(100.0, 100.0)] {
            let mut factory = ElementFactory::new();
            for ty in ComponentType::ALL {
                let element = factory.create(ty, canvas);
                assert_eq!(element.component_type(), ty);
                assert!(inside(&element, canvas), "{ty} default escapes {canvas:?}");
            }
        }
    }

    #[test]
    fn test_text_default_spans_canvas() {
        let canvas = CanvasSize::default();
        let text = create_default(ComponentType::Text, canvas, "text-1");
        assert!((text.x - 0.0).abs() < f64::EPSILON);
        assert!((text.width - canvas.width).abs() < f64::EPSILON);
        assert!((text.height - TEXT_LINE_HEIGHT).abs() < f64::EPSILON);
    }

    #[test]
    fn test_factory_names_count_per_type() {
        let mut factory = ElementFactory::new();
        let canvas = CanvasSize::default();
        assert_eq!(factory.create(ComponentType::Rect, canvas).name, "rect-1");
        assert_eq!(factory.create(ComponentType::Rect, canvas).name, "rect-2");
        assert_eq!(factory.create(ComponentType::Text, canvas).name, "text-1");
    }

    #[test]
    fn test_element_id_parse() {
        let id = ElementId::new();
        assert_eq!(ElementId::parse(&id.to_string()).expect("parse"), id);
        assert!(ElementId::parse("rect-1").is_err());
    }

    #[test]
    fn test_factory_ids_are_unique() {
        let mut factory = ElementFactory::new();
        let a = factory.create(ComponentType::Image, CanvasSize::default());
        let b = factory.create(ComponentType::Image, CanvasSize::default());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_factory_seed_continues_sequence() {
        let canvas = CanvasSize::default();
        let existing = vec![
            create_default(ComponentType::Circle, canvas, "circle-1"),
            create_default(ComponentType::Circle, canvas, "circle-2"),
        ];
        let mut factory = ElementFactory::new();
        factory.seed(&existing);
        assert_eq!(factory.create(ComponentType::Circle, canvas).name, "circle-3");
    }

    #[test]
    fn test_factory_seed_skips_past_highest_name() {
        let canvas = CanvasSize::default();
        let existing = vec![
            create_default(ComponentType::Rect, canvas, "rect-2"),
            create_default(ComponentType::Rect, canvas, "logo"),
            create_default(ComponentType::Text, canvas, "headline"),
            create_default(ComponentType::Line, canvas, "line-x"),
        ];
        let mut factory = ElementFactory::new();
        factory.seed(&existing);
        assert_eq!(factory.create(ComponentType::Rect, canvas).name, "rect-3");
        assert_eq!(factory.create(ComponentType::Text, canvas).name, "text-2");
        assert_eq!(factory.create(ComponentType::Line, canvas).name, "line-2");
        assert_eq!(factory.create(ComponentType::Image, canvas).name, "image-1");
    }

    #[test]
    fn test_parse_component_type() {
        assert_eq!("circle".parse::<ComponentType>().ok(), Some(ComponentType::Circle));
        let err = "triangle".parse::<ComponentType>();
        assert!(matches!(err, Err(EditorError::InvalidDropType(ref s)) if s == "triangle"));
    }

    #[test]
    fn test_size_floor() {
        let mut element = create_default(ComponentType::Rect, CanvasSize::default(), "rect-1");
        element.apply_geometry(&GeometryPatch {
            width: Some(-5.0),
            height: Some(0.0),
            ..GeometryPatch::default()
        });
        assert!((element.width - MIN_SIZE).abs() < f64::EPSILON);
        assert!((element.height - MIN_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_ignores_resize_patch() {
        let mut text = create_default(ComponentType::Text, CanvasSize::default(), "text-1");
        let (width, height) = (text.width, text.height);
        text.apply_geometry(&GeometryPatch {
            x: Some(12.0),
            width: Some(10.0),
            height: Some(300.0),
            ..GeometryPatch::default()
        });
        assert!((text.x - 12.0).abs() < f64::EPSILON);
        assert!((text.width - width).abs() < f64::EPSILON);
        assert!((text.height - height).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_derived_size() {
        let text = TextProps {
            fill_style: "#000".to_string(),
            font: "normal 400 14px PingFangSC-Regular".to_string(),
            content: "abcd".to_string(),
            align: None,
            baseline: None,
            max_width: None,
            row_count: Some(3),
            line_height: None,
            text_decoration: None,
            alpha: None,
        };
        let (width, height) = text.derived_size();
        assert!((width - 56.0).abs() < f64::EPSILON);
        assert!((height - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_replace_keeps_identity() {
        let canvas = CanvasSize::default();
        let mut element = create_default(ComponentType::Rect, canvas, "rect-1");
        element.internal.index = 4;
        let internal = element.internal;
        let other = create_default(ComponentType::Circle, canvas, "circle-1");
        element.apply(other.into()).expect("replace");
        assert_eq!(element.internal, internal);
        assert_eq!(element.component_type(), ComponentType::Circle);
    }

    #[test]
    fn test_wire_shape() {
        let element = create_default(ComponentType::Rect, CanvasSize::default(), "rect-1");
        let value = serde_json::to_value(&element).expect("serialize");
        assert_eq!(value["type"], "rect");
        assert_eq!(value["fillStyle"], "#cccccc");
        assert_eq!(value["mode"], "fill");
        assert!(value.get("radius").is_none());
        let back: Element = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, element);
    }
}
