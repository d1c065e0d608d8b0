//! `pixicon palette` - built-in color palettes.

use serde_json::{json, Value};

use super::{to_json, Context};
use crate::error::Result;
use crate::palettes::all_builtins;

pub fn handle(_verb: Option<&str>, _ctx: &Context) -> Result<Value> {
    Ok(json!({ "palettes": to_json(&all_builtins())? }))
}
