//! Cell types: per-cell paint and animation configuration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::core::{CellId, Range};

/// Named motion applied to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationType {
    #[default]
    None,
    Pulse,
    Fade,
    Bounce,
    Spin,
    Shake,
    Wobble,
    Flip,
    Glow,
    SlideIn,
    Typewriter,
}

impl AnimationType {
    pub const ALL: [AnimationType; 11] = [
        AnimationType::None,
        AnimationType::Pulse,
        AnimationType::Fade,
        AnimationType::Bounce,
        AnimationType::Spin,
        AnimationType::Shake,
        AnimationType::Wobble,
        AnimationType::Flip,
        AnimationType::Glow,
        AnimationType::SlideIn,
        AnimationType::Typewriter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationType::None => "none",
            AnimationType::Pulse => "pulse",
            AnimationType::Fade => "fade",
            AnimationType::Bounce => "bounce",
            AnimationType::Spin => "spin",
            AnimationType::Shake => "shake",
            AnimationType::Wobble => "wobble",
            AnimationType::Flip => "flip",
            AnimationType::Glow => "glow",
            AnimationType::SlideIn => "slide-in",
            AnimationType::Typewriter => "typewriter",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AnimationType::None => "None",
            AnimationType::Pulse => "Pulse",
            AnimationType::Fade => "Fade",
            AnimationType::Bounce => "Bounce",
            AnimationType::Spin => "Spin",
            AnimationType::Shake => "Shake",
            AnimationType::Wobble => "Wobble",
            AnimationType::Flip => "Flip",
            AnimationType::Glow => "Glow",
            AnimationType::SlideIn => "Slide In",
            AnimationType::Typewriter => "Typewriter",
        }
    }

    pub fn is_animated(&self) -> bool {
        *self != AnimationType::None
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for AnimationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CSS `animation-direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    Normal,
    Reverse,
    Alternate,
    AlternateReverse,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Normal, Direction::Reverse, Direction::Alternate, Direction::AlternateReverse];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Normal => "normal",
            Direction::Reverse => "reverse",
            Direction::Alternate => "alternate",
            Direction::AlternateReverse => "alternate-reverse",
        }
    }
}

/// CSS `animation-fill-mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FillMode {
    #[default]
    None,
    Forwards,
    Backwards,
    Both,
}

impl FillMode {
    pub const ALL: [FillMode; 4] = [FillMode::None, FillMode::Forwards, FillMode::Backwards, FillMode::Both];

    pub fn as_str(&self) -> &'static str {
        match self {
            FillMode::None => "none",
            FillMode::Forwards => "forwards",
            FillMode::Backwards => "backwards",
            FillMode::Both => "both",
        }
    }
}

/// CSS `animation-iteration-count`: `"infinite"` or a positive count.
///
/// Serialized as a string; numbers are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IterationCount {
    #[default]
    Infinite,
    Count(u32),
}

impl fmt::Display for IterationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterationCount::Infinite => f.write_str("infinite"),
            IterationCount::Count(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for IterationCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IterationCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        let count = match Raw::deserialize(deserializer)? {
            Raw::Text(s) if s == "infinite" => return Ok(IterationCount::Infinite),
            Raw::Text(s) => s.trim().parse::<u64>().map_err(|_| {
                serde::de::Error::custom(format!(
                    "invalid iterationCount \"{}\" (expected \"infinite\" or a positive integer)",
                    s
                ))
            })?,
            Raw::Number(n) => n,
        };
        if count == 0 || count > u32::MAX as u64 {
            return Err(serde::de::Error::custom("iterationCount must be a positive integer"));
        }
        Ok(IterationCount::Count(count as u32))
    }
}

/// Easing presets offered by the editor, with labels.
pub const EASING_OPTIONS: [(&str, &str); 6] = [
    ("linear", "Linear"),
    ("ease", "Ease"),
    ("ease-in", "Ease In"),
    ("ease-out", "Ease Out"),
    ("ease-in-out", "Ease In Out"),
    ("cubic-bezier(0.68, -0.55, 0.27, 1.55)", "Bouncy"),
];

pub const DEFAULT_FILL: &str = "#6366f1";
pub const DEFAULT_EASING: &str = "ease-in-out";

/// Everything about a cell except its coordinates.
///
/// This is the compact per-cell form stored in documents; missing fields take
/// the editor defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellProps {
    pub fill: String,
    pub opacity: Range,
    pub scale: Range,
    /// Seconds
    pub delay: f64,
    /// Seconds
    pub duration: f64,
    /// Named curve or `cubic-bezier(...)` expression
    pub easing: String,
    pub animation_type: AnimationType,
    pub direction: Direction,
    pub iteration_count: IterationCount,
    pub fill_mode: FillMode,
    pub active: bool,
}

impl Default for CellProps {
    fn default() -> Self {
        Self {
            fill: DEFAULT_FILL.to_string(),
            opacity: Range::new(1.0, 0.2),
            scale: Range::new(1.0, 1.0),
            delay: 0.0,
            duration: 1.0,
            easing: DEFAULT_EASING.to_string(),
            animation_type: AnimationType::None,
            direction: Direction::Normal,
            iteration_count: IterationCount::Infinite,
            fill_mode: FillMode::None,
            active: false,
        }
    }
}

/// One grid cell in working state.
///
/// Inactive cells keep their last styling, so reactivating restores it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub id: CellId,
    #[serde(flatten)]
    pub props: CellProps,
}

impl Cell {
    /// A default, inactive cell.
    pub fn new(id: CellId) -> Self {
        Self { id, props: CellProps::default() }
    }

    pub fn with_props(id: CellId, props: CellProps) -> Self {
        Self { id, props }
    }

    pub fn row(&self) -> usize {
        self.id.row
    }

    pub fn col(&self) -> usize {
        self.id.col
    }

    pub fn is_active(&self) -> bool {
        self.props.active
    }
}

/// A partial set of cell properties, shallow-merged onto cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Range>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_type: Option<AnimationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration_count: Option<IterationCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_mode: Option<FillMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl CellPatch {
    /// Patch that only activates cells.
    pub fn activate() -> Self {
        Self { active: Some(true), ..Default::default() }
    }

    /// The animation half of a cell's properties (everything but fill and active).
    pub fn animation_of(props: &CellProps) -> Self {
        Self {
            fill: None,
            opacity: Some(props.opacity),
            scale: Some(props.scale),
            delay: Some(props.delay),
            duration: Some(props.duration),
            easing: Some(props.easing.clone()),
            animation_type: Some(props.animation_type),
            direction: Some(props.direction),
            iteration_count: Some(props.iteration_count),
            fill_mode: Some(props.fill_mode),
            active: None,
        }
    }

    pub fn apply(&self, props: &mut CellProps) {
        if let Some(fill) = &self.fill {
            props.fill = fill.clone();
        }
        if let Some(opacity) = self.opacity {
            props.opacity = opacity;
        }
        if let Some(scale) = self.scale {
            props.scale = scale;
        }
        if let Some(delay) = self.delay {
            props.delay = delay;
        }
        if let Some(duration) = self.duration {
            props.duration = duration;
        }
        if let Some(easing) = &self.easing {
            props.easing = easing.clone();
        }
        if let Some(animation_type) = self.animation_type {
            props.animation_type = animation_type;
        }
        if let Some(direction) = self.direction {
            props.direction = direction;
        }
        if let Some(iteration_count) = self.iteration_count {
            props.iteration_count = iteration_count;
        }
        if let Some(fill_mode) = self.fill_mode {
            props.fill_mode = fill_mode;
        }
        if let Some(active) = self.active {
            props.active = active;
        }
    }
}
