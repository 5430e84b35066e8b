//! Editor configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::element::{CanvasSize, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};

/// Default offset applied to copied elements, in pixels.
pub const DEFAULT_PASTE_OFFSET: f64 = 10.0;

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas width restored by a reset.
    pub canvas_width: f64,
    /// Canvas height restored by a reset.
    pub canvas_height: f64,
    /// How far a copy is shifted from its source on both axes.
    pub paste_offset: f64,
    /// Coalesce pointer moves and apply them once per animation frame.
    pub batch_pointer_moves: bool,
    /// Directory for persisted state; `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            paste_offset: DEFAULT_PASTE_OFFSET,
            batch_pointer_moves: false,
            data_dir: None,
        }
    }
}

impl EditorConfig {
    /// The configured default canvas size.
    #[must_use]
    pub fn canvas_size(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }

    /// Set the persistence directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}
