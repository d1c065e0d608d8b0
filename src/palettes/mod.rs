//! Built-in swatch palettes.
//!
//! Each palette is an ordered list of 16 `#rrggbb` colors offered by the
//! color picker and listed by the `palette` command.

use serde::Serialize;

/// List of all available built-in palette names.
const BUILTIN_NAMES: &[&str] = &["Custom", "Tailwind", "Material", "Radix", "iOS"];

/// The editor's default swatches.
pub const COLOR_SWATCHES: [&str; 16] = [
    "#6366f1", "#818cf8", "#a78bfa", "#c084fc", "#ec4899", "#f43f5e", "#ef4444", "#f97316", "#f59e0b", "#eab308",
    "#84cc16", "#22c55e", "#14b8a6", "#06b6d4", "#3b82f6", "#ffffff",
];

/// A named, ordered set of colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub name: &'static str,
    pub colors: Vec<&'static str>,
}

/// Returns a list of all available built-in palette names.
pub fn list_builtins() -> Vec<&'static str> {
    BUILTIN_NAMES.to_vec()
}

/// Returns a built-in palette by name, or None if not found.
pub fn get_builtin(name: &str) -> Option<Palette> {
    match name {
        "Custom" => Some(custom()),
        "Tailwind" => Some(tailwind()),
        "Material" => Some(material()),
        "Radix" => Some(radix()),
        "iOS" => Some(ios()),
        _ => None,
    }
}

/// All built-in palettes in display order.
pub fn all_builtins() -> Vec<Palette> {
    BUILTIN_NAMES.iter().filter_map(|name| get_builtin(name)).collect()
}

fn custom() -> Palette {
    Palette { name: "Custom", colors: COLOR_SWATCHES.to_vec() }
}

/// Tailwind 500 shades.
fn tailwind() -> Palette {
    Palette {
        name: "Tailwind",
        colors: vec![
            "#ef4444", "#f97316", "#f59e0b", "#eab308", "#84cc16", "#22c55e", "#14b8a6", "#06b6d4", "#0ea5e9",
            "#3b82f6", "#6366f1", "#8b5cf6", "#a855f7", "#d946ef", "#ec4899", "#f43f5e",
        ],
    }
}

/// Material Design 500 shades.
fn material() -> Palette {
    Palette {
        name: "Material",
        colors: vec![
            "#f44336", "#e91e63", "#9c27b0", "#673ab7", "#3f51b5", "#2196f3", "#03a9f4", "#00bcd4", "#009688",
            "#4caf50", "#8bc34a", "#cddc39", "#ffeb3b", "#ffc107", "#ff9800", "#ff5722",
        ],
    }
}

/// Radix step-9 colors.
fn radix() -> Palette {
    Palette {
        name: "Radix",
        colors: vec![
            "#e5484d", "#e54666", "#ab4aba", "#8e4ec6", "#6e56cf", "#3e63dd", "#0090ff", "#00a2c7", "#12a594",
            "#30a46c", "#46a758", "#a18072", "#f76b15", "#e5484d", "#ffb224", "#ffe629",
        ],
    }
}

/// Apple system colors plus grays.
fn ios() -> Palette {
    Palette {
        name: "iOS",
        colors: vec![
            "#ff3b30", "#ff9500", "#ffcc00", "#34c759", "#00c7be", "#30b0c7", "#32ade6", "#007aff", "#5856d6",
            "#af52de", "#ff2d55", "#a2845e", "#8e8e93", "#636366", "#48484a", "#ffffff",
        ],
    }
}
