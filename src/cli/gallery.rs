//! `pixicon gallery` - save, list and remove icons on disk.

use serde_json::{json, Value};

use super::{to_json, Context};
use crate::error::{PixiconError, Result};
use crate::gallery::Gallery;

pub fn handle(verb: Option<&str>, ctx: &Context) -> Result<Value> {
    let gallery = Gallery::new(&ctx.config.gallery.dir);
    match verb {
        Some("save") => save(&gallery, ctx),
        Some("list") => list(&gallery),
        Some("remove") => remove(&gallery, ctx),
        other => Err(PixiconError::unknown_verb("gallery", other)),
    }
}

/// Echoes the saved document with a `saved` record attached.
fn save(gallery: &Gallery, ctx: &Context) -> Result<Value> {
    let document = ctx.require_document("gallery save requires a document on stdin or --input")?;
    let entry = gallery.save(&document, ctx.str_param("name")?)?;
    let mut out = to_json(&document)?;
    out["saved"] = json!({ "id": entry.id, "name": entry.name, "file": entry.file });
    Ok(out)
}

fn list(gallery: &Gallery) -> Result<Value> {
    let icons = gallery.list();
    Ok(json!({ "count": icons.len(), "icons": to_json(&icons)? }))
}

fn remove(gallery: &Gallery, ctx: &Context) -> Result<Value> {
    let id = ctx
        .str_param("id")?
        .ok_or_else(|| PixiconError::missing_param("gallery remove requires an id in --data", "data.id"))?;
    let entry = gallery.remove(id)?;
    Ok(json!({ "removed": entry.id }))
}
