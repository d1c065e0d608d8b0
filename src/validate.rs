//! Structural validation for pixicon documents.
//!
//! Works on raw JSON rather than [`Document`](crate::models::Document) so that
//! every problem in a file is reported with its path, instead of stopping at
//! the first one serde rejects.

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::color::is_valid_color;
use crate::models::{AnimationType, Direction, FillMode, EASING_OPTIONS, MAX_GRID_DIM};

static CELL_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)-(\d+)$").expect("cell id pattern compiles"));

/// A single problem, addressed by a JSON-ish path such as `frames[0].cells["1-2"].easing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into() }
    }
}

/// `{valid, errors}` as printed by the `validate` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

/// Collects issues while walking a document.
#[derive(Debug, Default)]
pub struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new(path, message));
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_report(self) -> ValidationReport {
        ValidationReport { valid: self.issues.is_empty(), errors: self.issues }
    }

    /// Validate a whole document value.
    pub fn validate_document(&mut self, doc: &Value) {
        if doc.get("version").map_or(true, Value::is_null) {
            self.push("version", "Missing version field");
        }

        let grid = grid_dims(doc);
        if grid.is_none() {
            self.push("gridSize", "Missing or invalid gridSize");
        }

        let frames = match doc.get("frames").and_then(Value::as_array) {
            Some(frames) if !frames.is_empty() => frames,
            _ => {
                self.push("frames", "Missing or empty frames array");
                return;
            }
        };

        for (fi, frame) in frames.iter().enumerate() {
            match frame.get("cells").and_then(Value::as_object) {
                Some(cells) => self.validate_cells(fi, cells, grid),
                None => self.push(format!("frames[{fi}].cells"), "Missing cells object"),
            }
        }
    }

    fn validate_cells(&mut self, fi: usize, cells: &Map<String, Value>, grid: Option<(usize, usize)>) {
        for (id, cell) in cells {
            let path = format!("frames[{fi}].cells[\"{id}\"]");
            let Some(caps) = CELL_ID.captures(id) else {
                self.push(path, "Invalid cell ID format");
                continue;
            };

            if let Some((rows, cols)) = grid {
                // digit runs too long for usize are out of bounds by definition
                let row = caps[1].parse::<usize>().unwrap_or(usize::MAX);
                let col = caps[2].parse::<usize>().unwrap_or(usize::MAX);
                if row >= rows || col >= cols {
                    self.push(&path, format!("Cell out of bounds (grid is {rows}x{cols})"));
                }
            }

            self.check_field(&path, cell, "animationType", "animation type", |s| AnimationType::from_name(s).is_some());
            self.check_field(&path, cell, "easing", "easing", |s| EASING_OPTIONS.iter().any(|(v, _)| *v == s));
            self.check_field(&path, cell, "direction", "direction", |s| Direction::ALL.iter().any(|d| d.as_str() == s));
            self.check_field(&path, cell, "fillMode", "fill mode", |s| FillMode::ALL.iter().any(|m| m.as_str() == s));

            if let Some(fill) = cell.get("fill").and_then(Value::as_str) {
                if !is_valid_color(fill) {
                    self.push(format!("{path}.fill"), format!("Invalid fill color: \"{fill}\""));
                }
            }
        }
    }

    /// Empty strings and non-strings are ignored, matching how the editor
    /// falls back to defaults for them.
    fn check_field(&mut self, path: &str, cell: &Value, key: &str, label: &str, known: impl Fn(&str) -> bool) {
        if let Some(value) = cell.get(key).and_then(Value::as_str) {
            if !value.is_empty() && !known(value) {
                self.push(format!("{path}.{key}"), format!("Unknown {label}: \"{value}\""));
            }
        }
    }
}

fn grid_dims(doc: &Value) -> Option<(usize, usize)> {
    let grid = doc.get("gridSize")?;
    let dim = |key: &str| {
        grid.get(key)
            .and_then(Value::as_u64)
            .map(|v| v as usize)
            .filter(|v| (1..=MAX_GRID_DIM).contains(v))
    };
    Some((dim("rows")?, dim("cols")?))
}

/// Validate an optional document; `None` is reported as a missing input.
pub fn validate_document(doc: Option<&Value>) -> ValidationReport {
    let mut validator = Validator::new();
    match doc {
        Some(doc) => validator.validate_document(doc),
        None => validator.push("stdin", "No document provided"),
    }
    let report = validator.into_report();
    tracing::debug!(issues = report.errors.len(), "validated document");
    report
}
