//! Cell selection expressions.
//!
//! Commands name the cells they act on with a [`Targets`] expression, decoded
//! from JSON once at the boundary and then resolved against the active frame.

use serde_json::Value;

use crate::error::{PixiconError, Result};
use crate::models::CellId;
use crate::state::State;

/// A cell selection expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Targets {
    /// `"*all"`: every cell of the grid
    All,
    /// `"*active"`: every currently active cell
    Active,
    /// A single `"<row>-<col>"` id
    Single(String),
    /// An explicit ordered list of ids
    List(Vec<String>),
    /// `{"from": [r, c], "to": [r, c]}`, inclusive on both ends
    Range { from: (i64, i64), to: (i64, i64) },
}

impl Targets {
    /// Decode the JSON form. Every malformed shape is an `InvalidTarget`.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(s) if s == "*all" => Ok(Targets::All),
            Value::String(s) if s == "*active" => Ok(Targets::Active),
            Value::String(s) => Ok(Targets::Single(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(PixiconError::invalid_target(format!("Cell {} not found in grid", other))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Targets::List),
            Value::Object(obj) => match (obj.get("from").and_then(coord), obj.get("to").and_then(coord)) {
                (Some(from), Some(to)) => Ok(Targets::Range { from, to }),
                _ => Err(PixiconError::invalid_target(
                    "Range targets need \"from\" and \"to\" as [row, col] pairs",
                )),
            },
            _ => Err(PixiconError::invalid_target("Invalid targets format")),
        }
    }

    /// Resolve to concrete ids of the active frame.
    ///
    /// Named ids must all exist; a range silently keeps only in-grid cells,
    /// enumerated row-major with swapped bounds normalized.
    pub fn resolve(&self, state: &State) -> Result<Vec<CellId>> {
        let cells = state.cells();
        let lookup = |raw: &str| -> Result<CellId> {
            raw.parse::<CellId>()
                .ok()
                .filter(|id| cells.contains_key(id))
                .ok_or_else(|| PixiconError::invalid_target(format!("Cell \"{}\" not found in grid", raw)))
        };

        match self {
            Targets::All => Ok(cells.keys().copied().collect()),
            Targets::Active => Ok(cells.values().filter(|c| c.is_active()).map(|c| c.id).collect()),
            Targets::Single(raw) => Ok(vec![lookup(raw)?]),
            Targets::List(raws) => raws.iter().map(|raw| lookup(raw)).collect(),
            Targets::Range { from, to } => {
                let rows = from.0.min(to.0)..=from.0.max(to.0);
                let cols = from.1.min(to.1)..=from.1.max(to.1);
                Ok(cells
                    .keys()
                    .filter(|id| rows.contains(&(id.row as i64)) && cols.contains(&(id.col as i64)))
                    .copied()
                    .collect())
            }
        }
    }
}

fn coord(value: &Value) -> Option<(i64, i64)> {
    match value.as_array()?.as_slice() {
        [r, c] => Some((r.as_i64()?, c.as_i64()?)),
        _ => None,
    }
}

/// Decode and resolve in one step.
pub fn resolve(expr: &Value, state: &State) -> Result<Vec<CellId>> {
    Targets::from_value(expr)?.resolve(state)
}
