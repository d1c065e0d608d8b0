//! Named motion curves, one `@keyframes` block per animated cell.
//!
//! Two renditions exist. SVG rects are positioned through the `--tx`/`--ty`
//! custom properties, so every transform there is prefixed with that
//! translation. Stylesheet and component output animate plain boxes
//! around their own center. The two sets agree on every curve except `flip`:
//! the box rendition is a 3-D perspective turn, the SVG one a horizontal
//! scale through zero.

use std::collections::HashMap;

use super::layout::Num;
use crate::models::{AnimationType, Cell};

/// Which coordinate convention the curves are written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyframeStyle {
    /// Boxes laid out by CSS grid (stylesheet and component output)
    Box,
    /// SVG rects translated via `--tx`/`--ty`
    Svg,
}

impl KeyframeStyle {
    fn transform(&self, inner: &str) -> String {
        match self {
            KeyframeStyle::Box => inner.to_string(),
            KeyframeStyle::Svg => format!("translate(var(--tx), var(--ty)) {}", inner),
        }
    }
}

/// The `@keyframes <type>-<id>` block for a cell, or `None` for unanimated cells.
pub fn keyframes(style: KeyframeStyle, cell: &Cell) -> Option<String> {
    let id = cell.id;
    let p = &cell.props;
    let (of, ot) = (Num(p.opacity.from), Num(p.opacity.to));
    let (sf, st) = (Num(p.scale.from), Num(p.scale.to));
    let tf = |inner: &str| style.transform(inner);

    let body = match p.animation_type {
        AnimationType::None => return None,
        AnimationType::Pulse => format!(
            "  0%, 100% {{ opacity: {of}; transform: {}; }}\n  50% {{ opacity: {ot}; transform: {}; }}",
            tf(&format!("scale({sf})")),
            tf(&format!("scale({st})")),
        ),
        AnimationType::Fade => format!("  0%, 100% {{ opacity: {of}; }}\n  50% {{ opacity: {ot}; }}"),
        AnimationType::Bounce => {
            let (rest, up) = match style {
                KeyframeStyle::Box => ("translateY(0)", "translateY(-8px)"),
                KeyframeStyle::Svg => (
                    "translate(var(--tx), var(--ty))",
                    "translate(var(--tx), calc(var(--ty) - 8px))",
                ),
            };
            format!(
                "  0%, 100% {{ transform: {rest} scale({sf}); opacity: {of}; }}\n  50% {{ transform: {up} scale({st}); opacity: {ot}; }}"
            )
        }
        AnimationType::Spin => format!(
            "  0% {{ transform: {}; opacity: {of}; }}\n  50% {{ opacity: {ot}; }}\n  100% {{ transform: {}; opacity: {of}; }}",
            tf(&format!("rotate(0deg) scale({sf})")),
            tf(&format!("rotate(360deg) scale({sf})")),
        ),
        AnimationType::Shake => format!(
            "  0%, 100% {{ transform: {}; opacity: {of}; }}\n  25% {{ transform: {}; }}\n  50% {{ transform: {}; opacity: {ot}; }}\n  75% {{ transform: {}; }}",
            tf("translateX(0)"),
            tf("translateX(-4px)"),
            tf("translateX(4px)"),
            tf("translateX(-4px)"),
        ),
        AnimationType::Wobble => format!(
            "  0%, 100% {{ transform: {}; opacity: {of}; }}\n  25% {{ transform: {}; }}\n  50% {{ opacity: {ot}; }}\n  75% {{ transform: {}; }}",
            tf(&format!("rotate(0deg) scale({sf})")),
            tf(&format!("rotate(-15deg) scale({st})")),
            tf(&format!("rotate(15deg) scale({st})")),
        ),
        AnimationType::Flip => match style {
            KeyframeStyle::Box => format!(
                "  0% {{ transform: perspective(200px) rotateY(0deg); opacity: {of}; }}\n  50% {{ transform: perspective(200px) rotateY(180deg); opacity: {ot}; }}\n  100% {{ transform: perspective(200px) rotateY(360deg); opacity: {of}; }}"
            ),
            KeyframeStyle::Svg => format!(
                "  0% {{ transform: {}; opacity: {of}; }}\n  50% {{ transform: {}; opacity: {ot}; }}\n  100% {{ transform: {}; opacity: {of}; }}",
                tf("scaleX(1)"),
                tf("scaleX(0)"),
                tf("scaleX(1)"),
            ),
        },
        AnimationType::Glow => format!(
            "  0%, 100% {{ filter: drop-shadow(0 0 0 currentColor) brightness(1); opacity: {of}; }}\n  50% {{ filter: drop-shadow(0 0 6px currentColor) brightness(1.3); opacity: {ot}; }}"
        ),
        AnimationType::SlideIn => {
            let (start, end) = match style {
                KeyframeStyle::Box => ("translateX(-30px)", "translateX(0)"),
                KeyframeStyle::Svg => (
                    "translate(calc(var(--tx) - 30px), var(--ty))",
                    "translate(var(--tx), var(--ty))",
                ),
            };
            format!(
                "  0% {{ transform: {start}; opacity: 0; }}\n  100% {{ transform: {end}; opacity: {of}; }}"
            )
        }
        AnimationType::Typewriter => format!(
            "  0% {{ opacity: 0; }}\n  50% {{ opacity: 0; }}\n  50.1% {{ opacity: {of}; }}\n  100% {{ opacity: {of}; }}"
        ),
    };

    Some(format!("@keyframes {}-{} {{\n{}\n}}", p.animation_type, id, body))
}

/// Keyframes with identical motion shared between cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupedKeyframes {
    /// One SVG-style block per distinct motion, in first-seen order
    pub keyframes: Vec<String>,
    /// Motion hash → id of the cell whose block represents it
    pub owners: HashMap<String, String>,
}

/// Group animated cells by `(type, opacity, scale)`; the first cell of each
/// group provides the keyframe block.
pub fn dedupe_keyframes<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> DedupedKeyframes {
    let mut out = DedupedKeyframes::default();
    for cell in cells {
        let p = &cell.props;
        if !p.animation_type.is_animated() {
            continue;
        }
        let hash = format!(
            "{}-{}-{}-{}-{}",
            p.animation_type,
            Num(p.opacity.from),
            Num(p.opacity.to),
            Num(p.scale.from),
            Num(p.scale.to)
        );
        if out.owners.contains_key(&hash) {
            continue;
        }
        if let Some(block) = keyframes(KeyframeStyle::Svg, cell) {
            out.keyframes.push(block);
        }
        out.owners.insert(hash, cell.id.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CellId, Range};

    fn animated(row: usize, col: usize, animation_type: AnimationType) -> Cell {
        let mut cell = Cell::new(CellId::new(row, col));
        cell.props.active = true;
        cell.props.animation_type = animation_type;
        cell
    }

    #[test]
    fn test_none_has_no_keyframes() {
        let cell = animated(0, 0, AnimationType::None);
        assert!(keyframes(KeyframeStyle::Box, &cell).is_none());
        assert!(keyframes(KeyframeStyle::Svg, &cell).is_none());
    }

    #[test]
    fn test_box_pulse_text() {
        let mut cell = animated(1, 2, AnimationType::Pulse);
        cell.props.scale = Range::new(1.0, 1.1);
        assert_eq!(
            keyframes(KeyframeStyle::Box, &cell).unwrap(),
            "@keyframes pulse-1-2 {\n  0%, 100% { opacity: 1; transform: scale(1); }\n  50% { opacity: 0.2; transform: scale(1.1); }\n}"
        );
    }

    #[test]
    fn test_svg_pulse_is_translated() {
        let cell = animated(0, 0, AnimationType::Pulse);
        let text = keyframes(KeyframeStyle::Svg, &cell).unwrap();
        assert!(text.contains("transform: translate(var(--tx), var(--ty)) scale(1);"));
    }

    #[test]
    fn test_flip_curves_diverge() {
        let cell = animated(0, 0, AnimationType::Flip);
        let boxed = keyframes(KeyframeStyle::Box, &cell).unwrap();
        let svg = keyframes(KeyframeStyle::Svg, &cell).unwrap();
        assert!(boxed.contains("perspective(200px) rotateY(180deg)"));
        assert!(svg.contains("translate(var(--tx), var(--ty)) scaleX(0)"));
        assert!(!svg.contains("rotateY"));
    }

    #[test]
    fn test_slide_in_and_typewriter() {
        let slide = keyframes(KeyframeStyle::Svg, &animated(0, 0, AnimationType::SlideIn)).unwrap();
        assert!(slide.starts_with("@keyframes slide-in-0-0 {"));
        assert!(slide.contains("translate(calc(var(--tx) - 30px), var(--ty)); opacity: 0;"));
        let typed = keyframes(KeyframeStyle::Box, &animated(0, 0, AnimationType::Typewriter)).unwrap();
        assert!(typed.contains("  50.1% { opacity: 1; }"));
    }

    #[test]
    fn test_dedupe_keeps_first_cell() {
        let cells = vec![
            animated(0, 0, AnimationType::Spin),
            animated(0, 1, AnimationType::Spin),
            animated(0, 2, AnimationType::Fade),
            animated(0, 3, AnimationType::None),
        ];
        let deduped = dedupe_keyframes(&cells);
        assert_eq!(deduped.keyframes.len(), 2);
        assert_eq!(deduped.owners.len(), 2);
        assert_eq!(deduped.owners["spin-1-0.2-1-1"], "0-0");
    }
}
