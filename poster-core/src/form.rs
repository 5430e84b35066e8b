//! Property form generation and per-field editing.
//!
//! Every component type has an ordered list of required fields (always shown) and
//! optional fields (shown only while the element carries a value for them).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{
    ComponentType, Element, ElementProps, ShapeMode, ShapeProps, TextAlign, TextBaseline,
    TEXT_LINE_HEIGHT,
};
use crate::{EditorError, EditorResult};

/// An editable property of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)] // Keys mirror the document field names one-to-one.
pub enum FieldKey {
    X,
    Y,
    Width,
    Height,
    Name,
    Url,
    Radius,
    FillStyle,
    Font,
    Content,
    Align,
    Baseline,
    MaxWidth,
    RowCount,
    LineHeight,
    Alpha,
    TextDecoration,
    Mode,
    LineWidth,
    StrokeStyle,
}

impl FieldKey {
    /// Every field key.
    pub const ALL: [Self; 20] = [
        Self::X,
        Self::Y,
        Self::Width,
        Self::Height,
        Self::Name,
        Self::Url,
        Self::Radius,
        Self::FillStyle,
        Self::Font,
        Self::Content,
        Self::Align,
        Self::Baseline,
        Self::MaxWidth,
        Self::RowCount,
        Self::LineHeight,
        Self::Alpha,
        Self::TextDecoration,
        Self::Mode,
        Self::LineWidth,
        Self::StrokeStyle,
    ];

    /// The document field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Width => "width",
            Self::Height => "height",
            Self::Name => "name",
            Self::Url => "url",
            Self::Radius => "radius",
            Self::FillStyle => "fillStyle",
            Self::Font => "font",
            Self::Content => "content",
            Self::Align => "align",
            Self::Baseline => "baseline",
            Self::MaxWidth => "maxWidth",
            Self::RowCount => "rowCount",
            Self::LineHeight => "lineHeight",
            Self::Alpha => "alpha",
            Self::TextDecoration => "textDecoration",
            Self::Mode => "mode",
            Self::LineWidth => "lineWidth",
            Self::StrokeStyle => "strokeStyle",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| EditorError::UnknownField(s.to_string()))
    }
}

/// One choice of a select input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Value written to the element.
    pub value: &'static str,
    /// Text shown to the user.
    pub label: &'static str,
}

/// The input control used to edit a field, with its constraints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldKind {
    /// Numeric input.
    Number {
        /// Smallest accepted value.
        min: Option<f64>,
        /// Largest accepted value.
        max: Option<f64>,
        /// Increment of the stepper.
        step: f64,
    },
    /// Single-line text.
    Text,
    /// Color picker producing a CSS color string.
    Color,
    /// Multi-line text.
    Textarea,
    /// Fixed list of choices.
    Select {
        /// The allowed values.
        options: &'static [SelectOption],
    },
}

const ALIGN_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "left", label: "Left" },
    SelectOption { value: "center", label: "Center" },
    SelectOption { value: "right", label: "Right" },
];

const BASELINE_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "top", label: "Top" },
    SelectOption { value: "middle", label: "Middle" },
    SelectOption { value: "bottom", label: "Bottom" },
];

const DECORATION_OPTIONS: &[SelectOption] = &[SelectOption {
    value: "line-through",
    label: "Strikethrough",
}];

const MODE_OPTIONS: &[SelectOption] = &[
    SelectOption { value: "fill", label: "Fill content" },
    SelectOption { value: "stroke", label: "Stroke border" },
    SelectOption { value: "both", label: "Fill and stroke" },
];

/// Describes how one field is presented and constrained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Which field.
    pub key: FieldKey,
    /// Human-readable label.
    pub label: &'static str,
    /// Input control and constraints.
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDescriptor {
    const fn number(key: FieldKey, label: &'static str, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Number { min, max, step: 1.0 },
        }
    }

    const fn with_kind(key: FieldKey, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind }
    }

    /// Check `value` against the input kind, clamping numbers into range.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidFieldValue`] if the value has the wrong type or is not one
    /// of the select options.
    pub fn coerce(&self, value: FieldValue) -> EditorResult<FieldValue> {
        match (self.kind, value) {
            (FieldKind::Number { min, max, .. }, FieldValue::Number(n)) => {
                if !n.is_finite() {
                    return Err(self.invalid("expected a finite number"));
                }
                let n = min.map_or(n, |min| n.max(min));
                Ok(FieldValue::Number(max.map_or(n, |max| n.min(max))))
            }
            (FieldKind::Number { .. }, FieldValue::Text(text)) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| self.invalid("expected a number"))
                .and_then(|n| self.coerce(FieldValue::Number(n))),
            (FieldKind::Select { options }, FieldValue::Text(text)) => {
                if options.iter().any(|option| option.value == text) {
                    Ok(FieldValue::Text(text))
                } else {
                    Err(self.invalid(&format!("{text:?} is not one of the options")))
                }
            }
            (FieldKind::Select { .. }, FieldValue::Number(_)) => {
                Err(self.invalid("expected one of the options"))
            }
            (FieldKind::Text | FieldKind::Color | FieldKind::Textarea, FieldValue::Text(text)) => {
                Ok(FieldValue::Text(text))
            }
            (FieldKind::Text | FieldKind::Color | FieldKind::Textarea, FieldValue::Number(_)) => {
                Err(self.invalid("expected text"))
            }
        }
    }

    fn invalid(&self, reason: &str) -> EditorError {
        EditorError::InvalidFieldValue {
            field: self.key,
            reason: reason.to_string(),
        }
    }
}

/// The fields of one component type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSet {
    /// Always-present fields, in display order.
    pub required: Vec<FieldDescriptor>,
    /// Fields that can be added and removed.
    pub optional: Vec<FieldDescriptor>,
}

impl FieldSet {
    /// Find a field's descriptor and whether it is required.
    #[must_use]
    pub fn find(&self, key: FieldKey) -> Option<(FieldDescriptor, bool)> {
        self.required
            .iter()
            .find(|d| d.key == key)
            .map(|d| (*d, true))
            .or_else(|| self.optional.iter().find(|d| d.key == key).map(|d| (*d, false)))
    }
}

/// The editable fields of `ty`.
#[must_use]
pub fn fields_for(ty: ComponentType) -> FieldSet {
    use FieldKey as K;

    let mut required = vec![
        FieldDescriptor::number(K::X, "X", Some(0.0), None),
        FieldDescriptor::number(K::Y, "Y", Some(0.0), None),
    ];
    if ty != ComponentType::Text {
        required.push(FieldDescriptor::number(K::Width, "Width", Some(1.0), None));
        required.push(FieldDescriptor::number(K::Height, "Height", Some(1.0), None));
    }
    required.push(FieldDescriptor::with_kind(K::Name, "Name", FieldKind::Text));

    let optional = match ty {
        ComponentType::Image => {
            required.push(FieldDescriptor::with_kind(K::Url, "Address", FieldKind::Text));
            vec![FieldDescriptor::number(K::Radius, "Corner radius", Some(0.0), None)]
        }
        ComponentType::Text => {
            required.extend([
                FieldDescriptor::with_kind(K::FillStyle, "Color", FieldKind::Color),
                FieldDescriptor::with_kind(K::Font, "Font", FieldKind::Text),
                FieldDescriptor::with_kind(K::Content, "Content", FieldKind::Textarea),
            ]);
            vec![
                FieldDescriptor::with_kind(
                    K::Align,
                    "Horizontal align",
                    FieldKind::Select { options: ALIGN_OPTIONS },
                ),
                FieldDescriptor::with_kind(
                    K::Baseline,
                    "Vertical align",
                    FieldKind::Select { options: BASELINE_OPTIONS },
                ),
                FieldDescriptor::number(K::MaxWidth, "Max width", Some(1.0), None),
                FieldDescriptor::number(K::RowCount, "Max rows", Some(1.0), None),
                FieldDescriptor::number(K::LineHeight, "Line height", Some(0.0), None),
                FieldDescriptor::with_kind(
                    K::Alpha,
                    "Opacity",
                    FieldKind::Number {
                        min: Some(0.0),
                        max: Some(1.0),
                        step: 0.1,
                    },
                ),
                FieldDescriptor::with_kind(
                    K::TextDecoration,
                    "Decoration",
                    FieldKind::Select { options: DECORATION_OPTIONS },
                ),
            ]
        }
        ComponentType::Rect | ComponentType::Line | ComponentType::Circle => {
            required.extend([
                FieldDescriptor::with_kind(K::FillStyle, "Fill color", FieldKind::Color),
                FieldDescriptor::with_kind(
                    K::Mode,
                    "Paint mode",
                    FieldKind::Select { options: MODE_OPTIONS },
                ),
            ]);
            vec![
                FieldDescriptor::number(K::Radius, "Corner radius", Some(0.0), None),
                FieldDescriptor::number(K::LineWidth, "Border width", Some(0.0), None),
                FieldDescriptor::with_kind(K::StrokeStyle, "Border color", FieldKind::Color),
            ]
        }
    };

    FieldSet { required, optional }
}

/// A field value as exchanged with the property form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A numeric value.
    Number(f64),
    /// A string value (text, color or select option).
    Text(String),
}

impl FieldValue {
    /// The numeric value, if this is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// The string value, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A field as shown in the property panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    /// How to present the field.
    #[serde(flatten)]
    pub descriptor: FieldDescriptor,
    /// Current value, if any.
    pub value: Option<FieldValue>,
    /// Whether the panel offers to remove the field.
    pub removable: bool,
}

/// The property panel for one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyForm {
    /// The element's component type.
    pub component: ComponentType,
    /// Fields to show: every required field, then optional fields that carry a value.
    pub fields: Vec<FormField>,
    /// Optional fields not yet present, offered by the "add field" control.
    pub addable: Vec<FieldDescriptor>,
}

impl PropertyForm {
    /// Build the panel for `element`.
    #[must_use]
    pub fn for_element(element: &Element) -> Self {
        let set = fields_for(element.component_type());
        let mut fields: Vec<FormField> = set
            .required
            .iter()
            .map(|descriptor| FormField {
                descriptor: *descriptor,
                value: element.field(descriptor.key),
                removable: false,
            })
            .collect();
        let mut addable = Vec::new();
        for descriptor in set.optional {
            match element.field(descriptor.key) {
                Some(value) => fields.push(FormField {
                    descriptor,
                    value: Some(value),
                    removable: true,
                }),
                None => addable.push(descriptor),
            }
        }
        Self {
            component: element.component_type(),
            fields,
            addable,
        }
    }
}

fn align_from(s: &str) -> Option<TextAlign> {
    match s {
        "left" => Some(TextAlign::Left),
        "center" => Some(TextAlign::Center),
        "right" => Some(TextAlign::Right),
        _ => None,
    }
}

const fn align_name(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
    }
}

fn baseline_from(s: &str) -> Option<TextBaseline> {
    match s {
        "top" => Some(TextBaseline::Top),
        "middle" => Some(TextBaseline::Middle),
        "bottom" => Some(TextBaseline::Bottom),
        _ => None,
    }
}

const fn baseline_name(baseline: TextBaseline) -> &'static str {
    match baseline {
        TextBaseline::Top => "top",
        TextBaseline::Middle => "middle",
        TextBaseline::Bottom => "bottom",
    }
}

fn mode_from(s: &str) -> Option<ShapeMode> {
    match s {
        "fill" => Some(ShapeMode::Fill),
        "stroke" => Some(ShapeMode::Stroke),
        "both" => Some(ShapeMode::Both),
        _ => None,
    }
}

const fn mode_name(mode: ShapeMode) -> &'static str {
    match mode {
        ShapeMode::Fill => "fill",
        ShapeMode::Stroke => "stroke",
        ShapeMode::Both => "both",
    }
}

fn number(value: Option<&FieldValue>) -> Option<f64> {
    value.and_then(FieldValue::as_number)
}

fn text(value: Option<&FieldValue>) -> Option<String> {
    value.and_then(FieldValue::as_text).map(str::to_string)
}

fn text_field(s: &str) -> Option<FieldValue> {
    Some(FieldValue::Text(s.to_string()))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn row_count(n: f64) -> u32 {
    n.round().max(1.0) as u32
}

impl Element {
    /// The current value of `key`, or `None` if absent or not applicable to this type.
    #[must_use]
    pub fn field(&self, key: FieldKey) -> Option<FieldValue> {
        match key {
            FieldKey::X => return Some(self.x.into()),
            FieldKey::Y => return Some(self.y.into()),
            FieldKey::Width | FieldKey::Height if !self.is_resizable() => return None,
            FieldKey::Width => return Some(self.width.into()),
            FieldKey::Height => return Some(self.height.into()),
            FieldKey::Name => return text_field(&self.name),
            _ => {}
        }

        match &self.props {
            ElementProps::Image(image) => match key {
                FieldKey::Url => text_field(&image.url),
                FieldKey::Radius => image.radius.map(FieldValue::Number),
                _ => None,
            },
            ElementProps::Text(t) => match key {
                FieldKey::FillStyle => text_field(&t.fill_style),
                FieldKey::Font => text_field(&t.font),
                FieldKey::Content => text_field(&t.content),
                FieldKey::Align => t.align.map(|a| align_name(a).into()),
                FieldKey::Baseline => t.baseline.map(|b| baseline_name(b).into()),
                FieldKey::MaxWidth => t.max_width.map(FieldValue::Number),
                FieldKey::RowCount => t.row_count.map(|n| FieldValue::Number(f64::from(n))),
                FieldKey::LineHeight => t.line_height.map(FieldValue::Number),
                FieldKey::Alpha => t.alpha.map(FieldValue::Number),
                FieldKey::TextDecoration => t.text_decoration.as_deref().and_then(text_field),
                _ => None,
            },
            ElementProps::Rect(shape) | ElementProps::Line(shape) | ElementProps::Circle(shape) => {
                shape_field(shape, key)
            }
        }
    }

    /// Set `key` to `value`, clamped to the field's constraints.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::FieldNotApplicable`] if this type has no such field, or
    /// [`EditorError::InvalidFieldValue`] if the value does not fit the field.
    pub fn set_field(&mut self, key: FieldKey, value: FieldValue) -> EditorResult<()> {
        let (descriptor, _) = self.descriptor(key)?;
        let value = descriptor.coerce(value)?;
        self.write_field(key, Some(&value));
        self.normalize();
        Ok(())
    }

    /// Add an optional field with its type-specific default. Present fields are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::FieldNotApplicable`] if this type has no such field.
    pub fn add_field(&mut self, key: FieldKey) -> EditorResult<()> {
        self.descriptor(key)?;
        if self.field(key).is_some() {
            return Ok(());
        }
        let value = self.default_value(key);
        self.write_field(key, Some(&value));
        self.normalize();
        Ok(())
    }

    /// Delete an optional field from the element.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::FieldRequired`] for required fields and
    /// [`EditorError::FieldNotApplicable`] if this type has no such field.
    pub fn remove_field(&mut self, key: FieldKey) -> EditorResult<()> {
        let (_, required) = self.descriptor(key)?;
        if required {
            return Err(EditorError::FieldRequired(key));
        }
        self.write_field(key, None);
        self.normalize();
        Ok(())
    }

    fn descriptor(&self, key: FieldKey) -> EditorResult<(FieldDescriptor, bool)> {
        let component = self.component_type();
        fields_for(component)
            .find(key)
            .ok_or(EditorError::FieldNotApplicable {
                field: key,
                component,
            })
    }

    fn default_value(&self, key: FieldKey) -> FieldValue {
        match key {
            FieldKey::Align => "left".into(),
            FieldKey::Baseline => "top".into(),
            FieldKey::TextDecoration => "line-through".into(),
            FieldKey::StrokeStyle => "#000000".into(),
            FieldKey::Mode => "fill".into(),
            FieldKey::MaxWidth => self.width.into(),
            FieldKey::RowCount | FieldKey::Alpha | FieldKey::LineWidth => 1.0.into(),
            FieldKey::LineHeight => TEXT_LINE_HEIGHT.into(),
            _ => 0.0.into(),
        }
    }

    /// Store an already-coerced value; `None` clears an optional field.
    fn write_field(&mut self, key: FieldKey, value: Option<&FieldValue>) {
        match key {
            FieldKey::X => self.x = number(value).unwrap_or(self.x),
            FieldKey::Y => self.y = number(value).unwrap_or(self.y),
            FieldKey::Width => self.width = number(value).unwrap_or(self.width),
            FieldKey::Height => self.height = number(value).unwrap_or(self.height),
            FieldKey::Name => {
                if let Some(name) = text(value) {
                    self.name = name;
                }
            }
            _ => match &mut self.props {
                ElementProps::Image(image) => match key {
                    FieldKey::Url => {
                        if let Some(url) = text(value) {
                            image.url = url;
                        }
                    }
                    FieldKey::Radius => image.radius = number(value),
                    _ => {}
                },
                ElementProps::Text(t) => match key {
                    FieldKey::FillStyle => {
                        if let Some(s) = text(value) {
                            t.fill_style = s;
                        }
                    }
                    FieldKey::Font => {
                        if let Some(s) = text(value) {
                            t.font = s;
                        }
                    }
                    FieldKey::Content => {
                        if let Some(s) = text(value) {
                            t.content = s;
                        }
                    }
                    FieldKey::Align => t.align = text(value).as_deref().and_then(align_from),
                    FieldKey::Baseline => {
                        t.baseline = text(value).as_deref().and_then(baseline_from);
                    }
                    FieldKey::MaxWidth => t.max_width = number(value),
                    FieldKey::RowCount => t.row_count = number(value).map(row_count),
                    FieldKey::LineHeight => t.line_height = number(value),
                    FieldKey::Alpha => t.alpha = number(value),
                    FieldKey::TextDecoration => t.text_decoration = text(value),
                    _ => {}
                },
                ElementProps::Rect(shape)
                | ElementProps::Line(shape)
                | ElementProps::Circle(shape) => write_shape_field(shape, key, value),
            },
        }
    }
}

fn shape_field(shape: &ShapeProps, key: FieldKey) -> Option<FieldValue> {
    match key {
        FieldKey::FillStyle => text_field(&shape.fill_style),
        FieldKey::Mode => shape.mode.map(|m| mode_name(m).into()),
        FieldKey::Radius => shape.radius.map(FieldValue::Number),
        FieldKey::LineWidth => shape.line_width.map(FieldValue::Number),
        FieldKey::StrokeStyle => shape.stroke_style.as_deref().and_then(text_field),
        _ => None,
    }
}

fn write_shape_field(shape: &mut ShapeProps, key: FieldKey, value: Option<&FieldValue>) {
    match key {
        FieldKey::FillStyle => {
            if let Some(s) = text(value) {
                shape.fill_style = s;
            }
        }
        FieldKey::Mode => shape.mode = text(value).as_deref().and_then(mode_from),
        FieldKey::Radius => shape.radius = number(value),
        FieldKey::LineWidth => shape.line_width = number(value),
        FieldKey::StrokeStyle => shape.stroke_style = text(value),
        _ => {}
    }
}
