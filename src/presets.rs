//! Built-in animated icon presets.
//!
//! Every preset is defined on an 8x8 grid. Loading one replaces the
//! document; merging one restyles the already-active cells of the current
//! document, scaled to its grid.

use std::collections::BTreeMap;

use crate::action::Action;
use crate::error::{PixiconError, Result};
use crate::models::{AnimationType, CellId, CellPatch, CellProps, GridSize, Range};

/// List of all built-in preset names, in catalog order.
pub const PRESET_NAMES: &[&str] = &["Spinner", "Dots", "Bars", "Wave", "Pulse Grid", "Heartbeat"];

const BOUNCY: &str = "cubic-bezier(0.68, -0.55, 0.27, 1.55)";

/// A preset: a full cell map at its own grid size.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub grid_size: GridSize,
    pub cells: BTreeMap<CellId, CellProps>,
}

impl Preset {
    /// Action replacing the document with this preset.
    pub fn load_action(&self) -> Action {
        Action::LoadPreset { cells: self.cells.clone(), grid_size: Some(self.grid_size) }
    }

    /// Action restyling active cells with this preset's animation.
    pub fn merge_action(&self) -> Action {
        let cells = self
            .cells
            .iter()
            .map(|(id, props)| (*id, CellPatch { active: Some(props.active), ..CellPatch::animation_of(props) }))
            .collect();
        Action::ApplyPresetAnimation { cells, grid_size: Some(self.grid_size) }
    }

    pub fn active_count(&self) -> usize {
        self.cells.values().filter(|p| p.active).count()
    }
}

/// Returns a list of all built-in preset names.
pub fn list_presets() -> Vec<&'static str> {
    PRESET_NAMES.to_vec()
}

/// Returns a preset by name (case-insensitive), or None if not found.
pub fn get_preset(name: &str) -> Option<Preset> {
    match name.to_lowercase().as_str() {
        "spinner" => Some(spinner()),
        "dots" => Some(dots()),
        "bars" => Some(bars()),
        "wave" => Some(wave()),
        "pulse grid" => Some(pulse_grid()),
        "heartbeat" => Some(heartbeat()),
        _ => None,
    }
}

/// Like [`get_preset`], failing with `UnknownPreset`.
pub fn find_preset(name: &str) -> Result<Preset> {
    get_preset(name).ok_or_else(|| PixiconError::UnknownPreset {
        name: name.to_string(),
        available: PRESET_NAMES.join(", "),
    })
}

/// Style shared by all cells of one preset; only the delay varies.
struct Motion {
    fill: &'static str,
    animation_type: AnimationType,
    opacity: Range,
    scale: Range,
    duration: f64,
    easing: &'static str,
}

impl Motion {
    fn cell(&self, delay: f64) -> CellProps {
        CellProps {
            fill: self.fill.to_string(),
            opacity: self.opacity,
            scale: self.scale,
            delay,
            duration: self.duration,
            easing: self.easing.to_string(),
            animation_type: self.animation_type,
            active: true,
            ..Default::default()
        }
    }
}

fn build(name: &'static str, cells: impl IntoIterator<Item = ((usize, usize), CellProps)>) -> Preset {
    let grid_size = GridSize::new(8, 8);
    let mut map: BTreeMap<CellId, CellProps> = grid_size.cell_ids().map(|id| (id, CellProps::default())).collect();
    for ((r, c), props) in cells {
        map.insert(CellId::new(r, c), props);
    }
    Preset { name, grid_size, cells: map }
}

/// 28 perimeter cells fading in sequence, clockwise from the top-left.
fn spinner() -> Preset {
    let motion = Motion {
        fill: "#6366f1",
        animation_type: AnimationType::Fade,
        opacity: Range::new(1.0, 0.1),
        scale: Range::new(1.0, 1.0),
        duration: 1.2,
        easing: "ease-in-out",
    };
    let perimeter: Vec<(usize, usize)> = (0..8)
        .map(|c| (0, c))
        .chain((1..8).map(|r| (r, 7)))
        .chain((0..7).rev().map(|c| (7, c)))
        .chain((1..7).rev().map(|r| (r, 0)))
        .collect();
    let total = perimeter.len() as f64;
    build(
        "Spinner",
        perimeter.iter().enumerate().map(|(i, rc)| (*rc, motion.cell(i as f64 / total * 1.2))),
    )
}

fn dots() -> Preset {
    let motion = Motion {
        fill: "#ec4899",
        animation_type: AnimationType::Bounce,
        opacity: Range::new(1.0, 0.6),
        scale: Range::new(1.0, 1.3),
        duration: 0.6,
        easing: BOUNCY,
    };
    build(
        "Dots",
        [(3, 2), (3, 4), (3, 6)].into_iter().enumerate().map(|(i, rc)| (rc, motion.cell(i as f64 * 0.15))),
    )
}

fn bars() -> Preset {
    const HEIGHTS: [usize; 8] = [3, 5, 7, 8, 7, 5, 3, 2];
    let motion = Motion {
        fill: "#22c55e",
        animation_type: AnimationType::Pulse,
        opacity: Range::new(1.0, 0.3),
        scale: Range::new(1.0, 1.0),
        duration: 0.8,
        easing: "ease-in-out",
    };
    build(
        "Bars",
        (0..8usize).flat_map(|c| {
            let cell = motion.cell(c as f64 * 0.12);
            (8 - HEIGHTS[c]..8).map(move |r| ((r, c), cell.clone()))
        }),
    )
}

fn wave() -> Preset {
    let motion = Motion {
        fill: "#3b82f6",
        animation_type: AnimationType::Bounce,
        opacity: Range::new(1.0, 0.5),
        scale: Range::new(1.0, 1.1),
        duration: 0.8,
        easing: "ease-in-out",
    };
    build(
        "Wave",
        (0..8usize).flat_map(|c| {
            let cell = motion.cell(c as f64 * 0.1);
            (5..8).map(move |r| ((r, c), cell.clone()))
        }),
    )
}

fn pulse_grid() -> Preset {
    let motion = Motion {
        fill: "#6366f1",
        animation_type: AnimationType::Pulse,
        opacity: Range::new(1.0, 0.2),
        scale: Range::new(1.0, 1.1),
        duration: 1.2,
        easing: "ease-in-out",
    };
    build(
        "Pulse Grid",
        (0..8usize).flat_map(|r| (0..8usize).map(move |c| (r, c))).map(|(r, c)| ((r, c), motion.cell((r + c) as f64 * 0.08))),
    )
}

fn heartbeat() -> Preset {
    let motion = Motion {
        fill: "#ef4444",
        animation_type: AnimationType::Pulse,
        opacity: Range::new(1.0, 0.6),
        scale: Range::new(1.0, 1.15),
        duration: 0.8,
        easing: "ease-in-out",
    };
    let rows: [(usize, std::ops::Range<usize>); 5] = [(2, 0..8), (3, 0..8), (4, 1..7), (5, 2..6), (6, 3..5)];
    let coords = [(1, 1), (1, 2), (1, 5), (1, 6)]
        .into_iter()
        .chain(rows.into_iter().flat_map(|(r, cols)| cols.map(move |c| (r, c))));
    build("Heartbeat", coords.map(|rc| (rc, motion.cell(0.0))))
}
