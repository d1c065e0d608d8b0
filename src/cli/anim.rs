//! `pixicon anim` - stagger delays and presets.

use serde_json::{json, Value};

use super::{apply, Context};
use crate::action::Action;
use crate::error::{PixiconError, Result};
use crate::models::GridSize;
use crate::presets::find_preset;
use crate::stagger::{stagger_delays, StaggerPattern};
use crate::state::State;
use crate::targets;

pub fn handle(verb: Option<&str>, ctx: &Context) -> Result<Value> {
    match verb {
        Some("stagger") => stagger(ctx),
        Some("preset") => preset(ctx),
        other => Err(PixiconError::unknown_verb("anim", other)),
    }
}

fn stagger(ctx: &Context) -> Result<Value> {
    let document = ctx.require_document("stagger requires a document on stdin or --input")?;
    let name = ctx
        .str_param("pattern")?
        .ok_or_else(|| PixiconError::missing_param("stagger requires pattern", "data.pattern"))?;
    let total_time = ctx
        .f64_param("totalTime")?
        .ok_or_else(|| PixiconError::missing_param("stagger requires totalTime", "data.totalTime"))?;
    if !(total_time.is_finite() && total_time >= 0.0) {
        return Err(PixiconError::invalid_param("totalTime must be a non-negative number", "data.totalTime"));
    }
    let pattern = StaggerPattern::from_name(name).ok_or_else(|| PixiconError::UnknownPattern {
        name: name.to_string(),
        available: StaggerPattern::names(),
        path: "data.pattern".to_string(),
    })?;

    let state = document.to_state()?;
    let default_targets = json!("*active");
    let ids = targets::resolve(ctx.param("targets").unwrap_or(&default_targets), &state)?;
    let delays = stagger_delays(&ids, pattern, total_time);
    tracing::debug!(pattern = pattern.as_str(), cells = delays.len(), "computed stagger");
    apply(state, &[Action::ApplyStagger { delays }])
}

/// `mode: "merge"` restyles the input document; anything else replaces it
/// (or starts from a blank 8x8 grid when there is none).
fn preset(ctx: &Context) -> Result<Value> {
    let name = ctx
        .str_param("preset")?
        .ok_or_else(|| PixiconError::missing_param("preset requires preset name", "data.preset"))?;
    let preset = find_preset(name)?;
    let merge = ctx.str_param("mode")? == Some("merge");

    let state = match &ctx.document {
        Some(_) => ctx.require_document("preset requires a document")?.to_state()?,
        None => State::new(GridSize::default()),
    };

    match (merge, ctx.document.is_some()) {
        (true, true) => apply(state, &[preset.merge_action()]),
        _ => apply(state, &[preset.load_action()]),
    }
}
