//! `pixicon export` - generate SVG, CSS or React source.

use serde_json::{Map, Value};

use super::{to_json, Context};
use crate::error::{PixiconError, Result};
use crate::export::{export_all, export_state, ExportFormat, ExportOptions};

pub fn handle(verb: Option<&str>, ctx: &Context) -> Result<Value> {
    let target = match verb {
        Some("all") => None,
        Some(name) => Some(ExportFormat::from_name(name).ok_or_else(|| PixiconError::unknown_verb("export", verb))?),
        None => return Err(PixiconError::unknown_verb("export", None)),
    };

    let state = ctx.require_document("export requires a document on stdin or --input")?.to_state()?;
    let fps = ctx.f64_param("fps")?.unwrap_or(ctx.config.defaults.fps);
    let options = ExportOptions::with_fps(fps)?;

    match target {
        Some(format) => {
            let result = export_state(&state, format, &options);
            tracing::debug!(format = format.as_str(), bytes = result.code.len(), "exported");
            to_json(&result)
        }
        None => {
            let mut all = Map::new();
            for result in export_all(&state, &options) {
                all.insert(result.format.as_str().to_string(), to_json(&result)?);
            }
            Ok(Value::Object(all))
        }
    }
}
