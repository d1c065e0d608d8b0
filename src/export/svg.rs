//! Standalone SVG output.

use std::sync::Arc;

use super::keyframes::{keyframes, KeyframeStyle};
use super::layout::{active_cells, animation_shorthand, pct, BoundingBox, Num, Timeline, CELL_PX};
use super::{CodeGenerator, ExportFormat};
use crate::state::Frame;

/// SVG generator.
///
/// Animated cells are drawn centered on the origin and moved into place with
/// `--tx`/`--ty`, so rotation and scale pivot around the cell center.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgGenerator;

impl SvgGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for SvgGenerator {
    fn generate(&self, frame: &Frame) -> String {
        let cells = active_cells(frame);
        let Some(bounds) = BoundingBox::from_ids(cells.iter().map(|c| c.id)) else {
            return String::new();
        };
        let (width, height) = bounds.svg_size();

        let mut keyframe_blocks = Vec::new();
        let mut cell_styles = Vec::new();
        let mut rects = Vec::new();

        for cell in &cells {
            let (x, y) = bounds.svg_origin(cell.id);
            let class = format!("c-{}", cell.id);

            match keyframes(KeyframeStyle::Svg, cell) {
                Some(block) => {
                    keyframe_blocks.push(block);
                    let (cx, cy) = (x + CELL_PX / 2, y + CELL_PX / 2);
                    let name = format!("{}-{}", cell.props.animation_type, cell.id);
                    cell_styles.push(format!(
                        ".{class} {{\n  --tx: {cx}px;\n  --ty: {cy}px;\n  animation: {};\n  transform-origin: 0 0;\n  transform: translate({cx}px, {cy}px);\n}}",
                        animation_shorthand(&name, &cell.props)
                    ));
                    rects.push(format!(
                        "    <rect class=\"{class}\" x=\"-{half}\" y=\"-{half}\" width=\"{CELL_PX}\" height=\"{CELL_PX}\" rx=\"2\" fill=\"{}\" />",
                        cell.props.fill,
                        half = CELL_PX / 2
                    ));
                }
                None => rects.push(format!(
                    "    <rect class=\"{class}\" x=\"{x}\" y=\"{y}\" width=\"{CELL_PX}\" height=\"{CELL_PX}\" rx=\"2\" fill=\"{}\" opacity=\"{}\" />",
                    cell.props.fill,
                    Num(cell.props.opacity.from)
                )),
            }
        }

        let style = if keyframe_blocks.is_empty() {
            String::new()
        } else {
            format!("  <style>\n{}\n{}\n  </style>\n", keyframe_blocks.join("\n"), cell_styles.join("\n"))
        };

        svg_document(width, height, &style, &rects.join("\n"))
    }

    fn generate_frames(&self, frames: &[Arc<Frame>], fps: f64) -> String {
        let Some(timeline) = Timeline::new(frames, fps) else {
            return String::new();
        };
        let bounds = timeline.bounds;
        let (width, height) = bounds.svg_size();
        let total = Num(timeline.total_duration);

        let mut groups = Vec::new();
        let mut keyframe_blocks = Vec::new();
        let mut group_styles = Vec::new();

        // one group per frame, visible only during its slice of the cycle
        for (fi, frame) in frames.iter().enumerate() {
            let rects: Vec<String> = frame
                .active_cells()
                .map(|cell| {
                    let (x, y) = bounds.svg_origin(cell.id);
                    format!(
                        "      <rect x=\"{x}\" y=\"{y}\" width=\"{CELL_PX}\" height=\"{CELL_PX}\" rx=\"2\" fill=\"{}\" opacity=\"{}\" />",
                        cell.props.fill,
                        Num(cell.props.opacity.from)
                    )
                })
                .collect();
            groups.push(format!("    <g class=\"frame-{fi}\">\n{}\n    </g>", rects.join("\n")));

            keyframe_blocks.push(format!(
                "@keyframes show-frame-{fi} {{\n  0% {{ opacity: 0; }}\n  {}% {{ opacity: 1; }}\n  {}% {{ opacity: 0; }}\n  100% {{ opacity: 0; }}\n}}",
                pct(timeline.start_pct(fi)),
                pct(timeline.start_pct(fi + 1))
            ));
            group_styles.push(format!(
                ".frame-{fi} {{ opacity: 0; animation: show-frame-{fi} {total}s step-end infinite; }}"
            ));
        }

        let style = format!("  <style>\n{}\n{}\n  </style>\n", keyframe_blocks.join("\n"), group_styles.join("\n"));
        svg_document(width, height, &style, &groups.join("\n"))
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Svg
    }
}

fn svg_document(width: usize, height: usize, style: &str, body: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {width} {height}\" width=\"{width}\" height=\"{height}\">\n{style}{body}\n</svg>"
    )
}
