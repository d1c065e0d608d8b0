//! `pixicon import` - rasterize an image file into a document.

use serde_json::Value;
use std::path::Path;

use super::{apply, to_json, Context};
use crate::error::{PixiconError, Result};
use crate::import::{import_image, DEFAULT_IMPORT_SIZE};
use crate::models::GridSize;

/// With an input document the image replaces its content (undoable in the
/// editor); otherwise a fresh single-frame document is produced.
pub fn handle(_verb: Option<&str>, ctx: &Context) -> Result<Value> {
    let path = ctx
        .str_param("path")?
        .ok_or_else(|| PixiconError::missing_param("import requires path", "data.path"))?;
    let grid_size = GridSize::new(
        ctx.usize_param("rows")?.unwrap_or(DEFAULT_IMPORT_SIZE.rows),
        ctx.usize_param("cols")?.unwrap_or(DEFAULT_IMPORT_SIZE.cols),
    );

    let imported = import_image(Path::new(path), grid_size)?;
    tracing::debug!(path, active = imported.active_count(), "imported image");

    match &ctx.document {
        Some(_) => {
            let state = ctx.require_document("import requires a document")?.to_state()?;
            apply(state, &[imported.load_action()])
        }
        None => to_json(&imported.to_document()),
    }
}
