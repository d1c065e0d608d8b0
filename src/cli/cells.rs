//! `pixicon cells` - edit and inspect cells of the active frame.

use serde_json::{json, Value};

use super::{apply, Context};
use crate::action::Action;
use crate::color::parse_color;
use crate::error::{PixiconError, Result};
use crate::models::CellPatch;
use crate::patterns::Pattern;
use crate::targets;

const NEEDS_DOCUMENT: &str = "This command requires a document on stdin or --input";

pub fn handle(verb: Option<&str>, ctx: &Context) -> Result<Value> {
    match verb {
        Some("set") => set(ctx),
        Some("clear") => clear(ctx),
        Some("query") => query(ctx),
        Some("fill-rect") => fill_rect(ctx),
        Some("fill-pattern") => fill_pattern(ctx),
        other => Err(PixiconError::unknown_verb("cells", other)),
    }
}

/// Decode `data.props`, defaulting to "activate" when absent.
fn props(ctx: &Context, required: Option<&str>) -> Result<CellPatch> {
    let value = match (ctx.param("props"), required) {
        (Some(value), _) => value,
        (None, Some(message)) => return Err(PixiconError::missing_param(message, "data.props")),
        (None, None) => return Ok(CellPatch::activate()),
    };
    let patch: CellPatch = serde_json::from_value(value.clone())
        .map_err(|e| PixiconError::invalid_param(format!("Invalid props: {e}"), "data.props"))?;
    if let Some(fill) = &patch.fill {
        parse_color(fill)?;
    }
    Ok(patch)
}

fn set(ctx: &Context) -> Result<Value> {
    let document = ctx.require_document(NEEDS_DOCUMENT)?;
    let targets = ctx.require_param("targets", "set requires targets")?;
    let props = props(ctx, Some("set requires props"))?;
    let state = document.to_state()?;
    let ids = targets::resolve(targets, &state)?;
    apply(state, &[Action::UpdateCellProps { ids, props }])
}

fn clear(ctx: &Context) -> Result<Value> {
    let document = ctx.require_document(NEEDS_DOCUMENT)?;
    let targets = ctx.require_param("targets", "clear requires targets")?;
    let state = document.to_state()?;
    let ids = targets::resolve(targets, &state)?;
    apply(state, &[Action::DeactivateCells { ids }])
}

fn query(ctx: &Context) -> Result<Value> {
    let document = ctx.require_document(NEEDS_DOCUMENT)?;
    let targets = ctx.require_param("targets", "query requires targets")?;
    let state = document.to_state()?;
    let ids = targets::resolve(targets, &state)?;
    let cells: Vec<_> = ids.iter().filter_map(|id| state.cells().get(id)).collect();
    Ok(json!({ "count": cells.len(), "cells": cells }))
}

fn fill_rect(ctx: &Context) -> Result<Value> {
    let document = ctx.require_document(NEEDS_DOCUMENT)?;
    let (Some(from), Some(to)) = (ctx.param("from"), ctx.param("to")) else {
        return Err(PixiconError::missing_param("fill-rect requires from and to", "data.from/to"));
    };
    let props = props(ctx, None)?;
    let state = document.to_state()?;
    let ids = targets::resolve(&json!({ "from": from, "to": to }), &state)?;
    apply(state, &[Action::UpdateCellProps { ids, props }])
}

fn fill_pattern(ctx: &Context) -> Result<Value> {
    let document = ctx.require_document(NEEDS_DOCUMENT)?;
    let name = ctx
        .str_param("pattern")?
        .ok_or_else(|| PixiconError::missing_param("fill-pattern requires pattern", "data.pattern"))?;
    let pattern = Pattern::from_name(name).ok_or_else(|| PixiconError::UnknownPattern {
        name: name.to_string(),
        available: Pattern::names(),
        path: "data.pattern".to_string(),
    })?;
    let props = props(ctx, None)?;
    let state = document.to_state()?;

    let ids = pattern.cells(state.grid_size);
    if ids.is_empty() {
        return Err(PixiconError::EmptyPatternResult(name.to_string()));
    }
    apply(state, &[Action::UpdateCellProps { ids, props }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tests::{ctx, doc};

    fn active_ids(out: &Value) -> Vec<String> {
        out["frames"][0]["cells"]
            .as_object()
            .unwrap()
            .iter()
            .filter(|(_, c)| c["active"] == true)
            .map(|(id, _)| id.clone())
            .collect()
    }

    #[test]
    fn test_set_and_query() {
        let data = json!({"targets": ["1-1", "0-2"], "props": {"active": true, "fill": "#ff0000"}});
        let out = handle(Some("set"), &ctx(data, Some(doc(3, 3)))).unwrap();
        assert_eq!(active_ids(&out), vec!["0-2", "1-1"]);
        assert_eq!(out["frames"][0]["cells"]["1-1"]["fill"], "#ff0000");

        let result = handle(Some("query"), &ctx(json!({"targets": "*active"}), Some(out))).unwrap();
        assert_eq!(result["count"], 2);
        assert_eq!(result["cells"][0]["id"], "0-2");
        assert_eq!(result["cells"][1]["fill"], "#ff0000");
    }

    #[test]
    fn test_set_requires_params() {
        let err = handle(Some("set"), &ctx(json!({"props": {}}), Some(doc(2, 2)))).unwrap_err();
        assert_eq!(err.path(), Some("data.targets"));
        let err = handle(Some("set"), &ctx(json!({"targets": "*all"}), Some(doc(2, 2)))).unwrap_err();
        assert_eq!(err.path(), Some("data.props"));
        let err = handle(Some("set"), &ctx(json!({"targets": "*all", "props": {}}), None)).unwrap_err();
        assert_eq!(err.kind(), "NO_DOCUMENT");
    }

    #[test]
    fn test_set_rejects_bad_props() {
        let data = json!({"targets": "*all", "props": {"fill": "#nothex"}});
        let err = handle(Some("set"), &ctx(data, Some(doc(2, 2)))).unwrap_err();
        assert_eq!(err.kind(), "INVALID_PARAM");

        let data = json!({"targets": "*all", "props": {"animationType": "explode"}});
        let err = handle(Some("set"), &ctx(data, Some(doc(2, 2)))).unwrap_err();
        assert_eq!(err.path(), Some("data.props"));
    }

    #[test]
    fn test_invalid_target() {
        let data = json!({"targets": "9-9", "props": {"active": true}});
        let err = handle(Some("set"), &ctx(data, Some(doc(2, 2)))).unwrap_err();
        assert_eq!(err.kind(), "INVALID_TARGET");
        assert_eq!(err.to_string(), "Cell \"9-9\" not found in grid");
    }

    #[test]
    fn test_fill_rect_then_clear() {
        let out = handle(Some("fill-rect"), &ctx(json!({"from": [0, 0], "to": [1, 1]}), Some(doc(3, 3)))).unwrap();
        assert_eq!(active_ids(&out), vec!["0-0", "0-1", "1-0", "1-1"]);

        let out = handle(Some("clear"), &ctx(json!({"targets": ["0-0"]}), Some(out))).unwrap();
        assert_eq!(active_ids(&out), vec!["0-1", "1-0", "1-1"]);
    }

    #[test]
    fn test_fill_pattern() {
        let out = handle(Some("fill-pattern"), &ctx(json!({"pattern": "corners"}), Some(doc(4, 4)))).unwrap();
        assert_eq!(active_ids(&out), vec!["0-0", "0-3", "3-0", "3-3"]);

        let err = handle(Some("fill-pattern"), &ctx(json!({"pattern": "zigzag"}), Some(doc(4, 4)))).unwrap_err();
        assert_eq!(err.kind(), "UNKNOWN_PATTERN");
        let err = handle(Some("fill-pattern"), &ctx(json!({}), Some(doc(4, 4)))).unwrap_err();
        assert_eq!(err.kind(), "MISSING_PARAM");
    }

    #[test]
    fn test_fill_pattern_checks_grid_first() {
        for (rows, cols) in [(0, 8), (6000, 6000)] {
            let mut document = doc(2, 2);
            document["gridSize"] = json!({"rows": rows, "cols": cols});
            let err = handle(Some("fill-pattern"), &ctx(json!({"pattern": "border"}), Some(document))).unwrap_err();
            assert_eq!(err.kind(), "INVALID_SIZE", "{rows}x{cols}");
        }
    }
}
