//! # Poster CLI
//!
//! Command-line host for the poster canvas editor. Each invocation opens the
//! persisted editor state in the data directory, applies one command and saves.
//!
//! ## Usage
//!
//! ```bash
//! poster add rect
//! poster list
//! poster export --output poster.json
//! POSTER_DATA_DIR=/tmp/poster poster import poster.json
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use poster_core::{
    fields_for, import_document, CanvasSize, ComponentType, EditorConfig, Element, SceneStore,
};

/// Command-line arguments for poster.
#[derive(Debug, Clone, Parser)]
#[command(name = "poster")]
#[command(about = "Poster canvas editor")]
#[command(version)]
pub struct CliArgs {
    /// Directory holding the persisted canvas
    #[arg(long, env = "POSTER_DATA_DIR", default_value = ".poster")]
    pub data_dir: PathBuf,

    /// Canvas width in pixels restored by `reset`
    #[arg(long, env = "POSTER_CANVAS_WIDTH", default_value = "375")]
    pub canvas_width: f64,

    /// Canvas height in pixels restored by `reset`
    #[arg(long, env = "POSTER_CANVAS_HEIGHT", default_value = "650")]
    pub canvas_height: f64,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Editor commands.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Add a default component centered on the canvas
    Add {
        /// Component type: image, text, rect, line or circle
        component: String,
    },
    /// List the elements in paint order
    List,
    /// Export the elements as a JSON document
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Replace the elements with those of a JSON document
    Import {
        /// Document to import
        file: PathBuf,
    },
    /// Check a JSON document without importing it
    Validate {
        /// Document to check
        file: PathBuf,
    },
    /// Show the property fields of a component type
    Fields {
        /// Component type: image, text, rect, line or circle
        component: String,
    },
    /// Change the canvas size
    Resize {
        /// Width in pixels
        width: f64,
        /// Height in pixels
        height: f64,
    },
    /// Remove every element and restore the default canvas size
    Reset,
}

impl From<&CliArgs> for EditorConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            canvas_width: args.canvas_width,
            canvas_height: args.canvas_height,
            data_dir: Some(args.data_dir.clone()),
            ..Self::default()
        }
    }
}

/// Run one command against the store and return the text to print.
///
/// # Errors
///
/// Returns an error if the command's input is invalid or a file cannot be read or written.
pub fn run(command: &Command, store: &mut SceneStore) -> anyhow::Result<String> {
    match command {
        Command::Add { component } => {
            let id = store.drop_component(component)?;
            store.deactivate();
            let name = store
                .scene()
                .get(id)
                .map_or_else(|| id.to_string(), |e| e.name.clone());
            Ok(format!("Added {name} ({id})"))
        }
        Command::List => Ok(list(store)),
        Command::Export { output } => {
            let json = store.export_document()?;
            match output {
                Some(path) => {
                    std::fs::write(path, &json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    Ok(format!(
                        "Exported {} elements to {}",
                        store.elements().len(),
                        path.display()
                    ))
                }
                None => Ok(json),
            }
        }
        Command::Import { file } => {
            let text = read(file)?;
            let count = store
                .import_document(&text)
                .with_context(|| format!("Failed to import {}", file.display()))?;
            Ok(format!("Imported {count} elements"))
        }
        Command::Validate { file } => {
            let text = read(file)?;
            let elements = import_document(&text)
                .with_context(|| format!("{} is not a valid document", file.display()))?;
            Ok(format!("{} is valid ({} elements)", file.display(), elements.len()))
        }
        Command::Fields { component } => {
            let ty: ComponentType = component.parse()?;
            Ok(serde_json::to_string_pretty(&fields_for(ty))?)
        }
        Command::Resize { width, height } => {
            let size = CanvasSize::new(*width, *height);
            store.set_canvas_size(size);
            Ok(format!("Canvas is {}x{}", size.width, size.height))
        }
        Command::Reset => {
            store.reset_canvas();
            let size = store.canvas_size();
            Ok(format!("Canvas reset to {}x{}", size.width, size.height))
        }
    }
}

fn read(file: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn list(store: &SceneStore) -> String {
    let size = store.canvas_size();
    let mut out = format!("Canvas {}x{}\n", size.width, size.height);
    let active = store.active().map(Element::id);
    for (i, element) in store.layers().iter().enumerate() {
        let marker = if Some(element.id()) == active { "*" } else { " " };
        let _ = writeln!(
            out,
            "{marker}{i:>3}  {:<6}  {:<12}  ({}, {})  {}x{}",
            element.component_type(),
            element.name,
            element.x,
            element.y,
            element.width,
            element.height,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store() -> SceneStore {
        SceneStore::new(&EditorConfig::default())
    }

    #[test]
    fn test_parse_args() {
        let args = CliArgs::try_parse_from([
            "poster",
            "--data-dir",
            "/tmp/poster",
            "--canvas-width",
            "750",
            "add",
            "rect",
        ])
        .expect("parse");
        assert_eq!(
            args.command,
            Command::Add {
                component: "rect".to_string()
            }
        );
        let config = EditorConfig::from(&args);
        assert!((config.canvas_width - 750.0).abs() < f64::EPSILON);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/poster")));
    }

    #[test]
    fn test_parse_rejects_missing_subcommand() {
        assert!(CliArgs::try_parse_from(["poster"]).is_err());
    }

    #[test]
    fn test_add_and_list() {
        let mut store = memory_store();
        let out = run(
            &Command::Add {
                component: "circle".to_string(),
            },
            &mut store,
        )
        .expect("add");
        assert!(out.starts_with("Added circle-1"));
        assert!(store.active().is_none());

        let listing = run(&Command::List, &mut store).expect("list");
        assert!(listing.contains("circle-1"));
        assert!(listing.starts_with("Canvas 375x650"));
    }

    #[test]
    fn test_add_unknown_type_fails() {
        let mut store = memory_store();
        let result = run(
            &Command::Add {
                component: "star".to_string(),
            },
            &mut store,
        );
        assert!(result.is_err());
        assert!(store.scene().is_empty());
    }

    #[test]
    fn test_export_import_validate() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("poster.json");
        let mut store = memory_store();
        run(&Command::Add { component: "text".to_string() }, &mut store).expect("add");
        run(&Command::Export { output: Some(path.clone()) }, &mut store).expect("export");

        let out = run(&Command::Validate { file: path.clone() }, &mut store).expect("validate");
        assert!(out.contains("1 elements"));

        let mut other = memory_store();
        run(&Command::Import { file: path }, &mut other).expect("import");
        assert_eq!(other.elements().len(), 1);
    }

    #[test]
    fn test_validate_reports_schema_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"[{"type":"rect","name":"r"}]"#).expect("write");
        let err = run(&Command::Validate { file: path }, &mut memory_store())
            .expect_err("invalid");
        assert!(format!("{err:#}").contains("missing required field `x`"));
    }

    #[test]
    fn test_fields_lists_schema() {
        let out = run(
            &Command::Fields {
                component: "image".to_string(),
            },
            &mut memory_store(),
        )
        .expect("fields");
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(value["required"][0]["key"], "x");
        assert!(value["optional"]
            .as_array()
            .expect("optional")
            .iter()
            .any(|f| f["key"] == "radius"));
    }

    #[test]
    fn test_resize_and_reset() {
        let mut store = memory_store();
        run(&Command::Resize { width: 750.0, height: 1300.0 }, &mut store).expect("resize");
        assert_eq!(store.canvas_size(), CanvasSize::new(750.0, 1300.0));
        run(&Command::Reset, &mut store).expect("reset");
        assert_eq!(store.canvas_size(), CanvasSize::default());
    }
}
