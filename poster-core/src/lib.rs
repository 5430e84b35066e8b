//! # Poster Core
//!
//! Editing engine for a fixed-size poster canvas: users drop image, text and
//! shape components onto the canvas, drag and resize them, edit their
//! properties through generated forms, and exchange the result as a JSON
//! document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             InteractionController           │
//! │  - Pointer gestures  - Shortcuts            │
//! │  - Drop-to-create    - Clipboard            │
//! ├─────────────────────────────────────────────┤
//! │  SceneStore          │  Geometry Engine     │
//! │  - Element list      │  - Move / resize     │
//! │  - Active element    │  - Anchoring, floors │
//! │  - Persistence       │                      │
//! ├─────────────────────────────────────────────┤
//! │  Document            │  Forms               │
//! │  - Export / import   │  - Field schemas     │
//! │  - Validation        │  - Add / remove      │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod form;
pub mod geometry;
pub mod interaction;
pub mod scene;
pub mod store;

pub use config::EditorConfig;
pub use document::{export_document, import_document};
pub use element::{
    create_default, CanvasSize, ComponentType, Element, ElementFactory, ElementId, ElementProps,
    ElementUpdate, ImageProps, Internal, ShapeMode, ShapeProps, TextAlign, TextBaseline,
    TextProps,
};
pub use error::{DocumentError, EditorError, EditorResult, SchemaError};
pub use event::{InputEvent, KeyModifiers, Shortcut};
pub use form::{fields_for, FieldDescriptor, FieldKey, FieldKind, FieldSet, FieldValue, PropertyForm};
pub use geometry::{compute_geometry, GeometryPatch, OperationMode, PointerDelta, Rect};
pub use interaction::InteractionController;
pub use scene::{NudgeDirection, Scene, SceneSnapshot};
pub use store::{SceneStore, StoreError};

/// Poster core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
