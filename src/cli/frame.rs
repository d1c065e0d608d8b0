//! `pixicon frame` - timeline frames.

use serde::Serialize;
use serde_json::{json, Value};

use super::{apply, Context};
use crate::action::Action;
use crate::error::{PixiconError, Result};
use crate::state::State;

const NEEDS_DOCUMENT: &str = "This command requires a document on stdin or --input";

/// One row of `frame list`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameSummary {
    index: usize,
    id: u32,
    active_cells: usize,
    is_active: bool,
}

pub fn handle(verb: Option<&str>, ctx: &Context) -> Result<Value> {
    match verb {
        Some("add") => add(ctx),
        Some("duplicate") => duplicate(ctx),
        Some("remove") => remove(ctx),
        Some("set-active") => set_active(ctx),
        Some("list") => list(ctx),
        other => Err(PixiconError::unknown_verb("frame", other)),
    }
}

/// `data.<key>` as an index into the document's frames.
fn frame_index(ctx: &Context, state: &State, key: &str) -> Result<Option<i64>> {
    let Some(index) = ctx.i64_param(key)? else {
        return Ok(None);
    };
    if usize::try_from(index).map_or(true, |i| i >= state.frame_count()) {
        return Err(PixiconError::invalid_param(
            format!("{key} {index} is out of range (document has {} frames)", state.frame_count()),
            format!("data.{key}"),
        ));
    }
    Ok(Some(index))
}

fn add(ctx: &Context) -> Result<Value> {
    let state = ctx.require_document(NEEDS_DOCUMENT)?.to_state()?;
    apply(state, &[Action::AddFrame])
}

fn duplicate(ctx: &Context) -> Result<Value> {
    let state = ctx.require_document(NEEDS_DOCUMENT)?.to_state()?;
    let mut actions = Vec::with_capacity(2);
    if let Some(index) = frame_index(ctx, &state, "sourceIndex")? {
        actions.push(Action::SetActiveFrame { index });
    }
    actions.push(Action::DuplicateFrame);
    apply(state, &actions)
}

fn remove(ctx: &Context) -> Result<Value> {
    let state = ctx.require_document(NEEDS_DOCUMENT)?.to_state()?;
    let index = frame_index(ctx, &state, "index")?
        .ok_or_else(|| PixiconError::missing_param("remove requires index", "data.index"))?;
    apply(state, &[Action::SetActiveFrame { index }, Action::RemoveFrame])
}

/// `index: -1` advances to the next frame, wrapping around.
fn set_active(ctx: &Context) -> Result<Value> {
    let state = ctx.require_document(NEEDS_DOCUMENT)?.to_state()?;
    let index = match ctx.i64_param("index")? {
        Some(-1) => -1,
        Some(_) => frame_index(ctx, &state, "index")?.unwrap_or_default(),
        None => return Err(PixiconError::missing_param("set-active requires index", "data.index")),
    };
    apply(state, &[Action::SetActiveFrame { index }])
}

fn list(ctx: &Context) -> Result<Value> {
    let state = ctx.require_document(NEEDS_DOCUMENT)?.to_state()?;
    let frames: Vec<FrameSummary> = state
        .frames
        .iter()
        .enumerate()
        .map(|(index, frame)| FrameSummary {
            index,
            id: frame.id,
            active_cells: frame.active_cells().count(),
            is_active: index == state.active_frame_index,
        })
        .collect();
    Ok(json!({ "count": frames.len(), "frames": frames }))
}
