//! `pixicon describe` - the vocabulary an agent can use in `--data`.

use serde_json::{json, Value};

use super::{to_json, Context};
use crate::error::{PixiconError, Result};
use crate::models::{AnimationType, CellProps, Direction, FillMode, EASING_OPTIONS};
use crate::palettes::all_builtins;
use crate::presets::PRESET_NAMES;
use crate::stagger::StaggerPattern;

type Topic = (&'static str, fn() -> Result<Value>);

const TOPICS: &[Topic] = &[
    ("animation-types", animation_types),
    ("easing-options", easing_options),
    ("stagger-patterns", stagger_patterns),
    ("presets", presets),
    ("palettes", palettes),
    ("directions", directions),
    ("fill-modes", fill_modes),
    ("cell-properties", cell_properties),
];

/// The topic comes from the verb, or `data.topic`; with neither, list topics.
pub fn handle(verb: Option<&str>, ctx: &Context) -> Result<Value> {
    let topic = match verb {
        Some(topic) => Some(topic),
        None => ctx.str_param("topic")?,
    };
    let Some(topic) = topic else {
        let names: Vec<&str> = TOPICS.iter().map(|(name, _)| *name).collect();
        return Ok(json!({ "topics": names }));
    };

    let (_, describe) = TOPICS.iter().find(|(name, _)| *name == topic).ok_or_else(|| PixiconError::UnknownTopic {
        name: topic.to_string(),
        available: TOPICS.iter().map(|(name, _)| *name).collect::<Vec<_>>().join(", "),
    })?;
    describe()
}

fn items(topic: &str, items: Value) -> Result<Value> {
    Ok(json!({ "topic": topic, "items": items }))
}

fn animation_types() -> Result<Value> {
    let list: Vec<Value> = AnimationType::ALL.iter().map(|t| json!({ "value": t.as_str(), "label": t.label() })).collect();
    items("animation-types", json!(list))
}

fn easing_options() -> Result<Value> {
    let list: Vec<Value> = EASING_OPTIONS.iter().map(|(value, label)| json!({ "value": value, "label": label })).collect();
    items("easing-options", json!(list))
}

fn stagger_patterns() -> Result<Value> {
    let list: Vec<Value> = StaggerPattern::ALL.iter().map(|p| json!({ "value": p.as_str(), "label": p.label() })).collect();
    items("stagger-patterns", json!(list))
}

fn presets() -> Result<Value> {
    items("presets", json!(PRESET_NAMES))
}

fn palettes() -> Result<Value> {
    items("palettes", to_json(&all_builtins())?)
}

fn directions() -> Result<Value> {
    let list: Vec<&str> = Direction::ALL.iter().map(|d| d.as_str()).collect();
    items("directions", json!(list))
}

fn fill_modes() -> Result<Value> {
    let list: Vec<&str> = FillMode::ALL.iter().map(|f| f.as_str()).collect();
    items("fill-modes", json!(list))
}

fn cell_properties() -> Result<Value> {
    let defaults = to_json(&CellProps::default())?;
    let easings: Vec<&str> = EASING_OPTIONS.iter().map(|(value, _)| *value).collect();
    let types: Vec<&str> = AnimationType::ALL.iter().map(|t| t.as_str()).collect();
    let directions: Vec<&str> = Direction::ALL.iter().map(|d| d.as_str()).collect();
    let fill_modes: Vec<&str> = FillMode::ALL.iter().map(|f| f.as_str()).collect();

    let property = |key: &str, kind: &str, description: &str| {
        json!({ "type": kind, "description": description, "default": defaults[key] })
    };
    let with_options = |mut prop: Value, options: &[&str]| {
        prop["options"] = json!(options);
        prop
    };

    Ok(json!({
        "topic": "cell-properties",
        "properties": {
            "fill": property("fill", "string", "CSS color"),
            "opacity": property("opacity", "object", "{ from: number, to: number } opacity range for animation"),
            "scale": property("scale", "object", "{ from: number, to: number } scale range for animation"),
            "delay": property("delay", "number", "Animation delay in seconds"),
            "duration": property("duration", "number", "Animation duration in seconds"),
            "easing": with_options(property("easing", "string", "CSS easing function"), &easings),
            "animationType": with_options(property("animationType", "string", "Animation type"), &types),
            "direction": with_options(property("direction", "string", "Animation direction"), &directions),
            "iterationCount": property("iterationCount", "string|number", "Number of iterations or \"infinite\""),
            "fillMode": with_options(property("fillMode", "string", "Animation fill mode"), &fill_modes),
            "active": property("active", "boolean", "Whether cell is visible/painted"),
        }
    }))
}
