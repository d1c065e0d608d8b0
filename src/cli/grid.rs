//! `pixicon grid` - create and resize documents.

use serde_json::Value;

use super::{apply, to_json, Context};
use crate::action::Action;
use crate::error::{PixiconError, Result};
use crate::models::{Document, GridSize};

pub fn handle(verb: Option<&str>, ctx: &Context) -> Result<Value> {
    match verb {
        Some("create") => create(ctx),
        Some("resize") => resize(ctx),
        other => Err(PixiconError::unknown_verb("grid", other)),
    }
}

/// Missing dimensions fall back to the configured defaults.
fn create(ctx: &Context) -> Result<Value> {
    let rows = ctx.usize_param("rows")?.unwrap_or(ctx.config.defaults.rows);
    let cols = ctx.usize_param("cols")?.unwrap_or(ctx.config.defaults.cols);
    let mut document = Document::new(rows, cols)?;
    document.bg_color = ctx.config.defaults.bg_color.clone();
    to_json(&document)
}

fn resize(ctx: &Context) -> Result<Value> {
    let document = ctx.require_document("resize requires a document on stdin or --input")?;
    let (Some(rows), Some(cols)) = (ctx.usize_param("rows")?, ctx.usize_param("cols")?) else {
        return Err(PixiconError::missing_param("resize requires rows and cols", "data"));
    };
    GridSize::new(rows, cols).validate()?;
    apply(document.to_state()?, &[Action::SetGridSize { rows, cols }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tests::{ctx, doc};
    use serde_json::json;

    #[test]
    fn test_create_defaults() {
        let out = handle(Some("create"), &ctx(Value::Null, None)).unwrap();
        assert_eq!(out["version"], 1);
        assert_eq!(out["gridSize"], json!({"rows": 8, "cols": 8}));
        assert_eq!(out["bgColor"], "#1a1a24");
        assert_eq!(out["frames"][0]["cells"].as_object().unwrap().len(), 64);
        assert_eq!(out["frames"][0]["cells"]["7-7"]["active"], false);
    }

    #[test]
    fn test_create_bounds() {
        let out = handle(Some("create"), &ctx(json!({"rows": 4, "cols": 6}), None)).unwrap();
        assert_eq!(out["gridSize"], json!({"rows": 4, "cols": 6}));

        let err = handle(Some("create"), &ctx(json!({"rows": 65}), None)).unwrap_err();
        assert_eq!(err.kind(), "INVALID_SIZE");
    }

    #[test]
    fn test_resize() {
        let out = handle(Some("resize"), &ctx(json!({"rows": 2, "cols": 3}), Some(doc(4, 4)))).unwrap();
        assert_eq!(out["gridSize"], json!({"rows": 2, "cols": 3}));
        assert_eq!(out["frames"][0]["cells"].as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_resize_errors() {
        let err = handle(Some("resize"), &ctx(json!({"rows": 2, "cols": 3}), None)).unwrap_err();
        assert_eq!(err.kind(), "NO_DOCUMENT");

        let err = handle(Some("resize"), &ctx(json!({"rows": 2}), Some(doc(4, 4)))).unwrap_err();
        assert_eq!(err.kind(), "MISSING_PARAM");
        assert_eq!(err.path(), Some("data"));

        let err = handle(Some("explode"), &ctx(Value::Null, None)).unwrap_err();
        assert_eq!(err.to_string(), "Unknown grid verb: \"explode\"");
    }
}
