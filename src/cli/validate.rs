//! `pixicon validate` - structural checks on the input document.

use serde_json::Value;

use super::{to_json, Context};
use crate::error::Result;
use crate::validate::validate_document;

/// Always succeeds; problems are reported in the result, not as an error.
pub fn handle(_verb: Option<&str>, ctx: &Context) -> Result<Value> {
    let report = validate_document(ctx.document.as_ref());
    if !report.valid {
        tracing::debug!(issues = report.errors.len(), "document failed validation");
    }
    to_json(&report)
}
