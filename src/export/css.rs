//! HTML + CSS grid output.

use std::sync::Arc;

use super::keyframes::{keyframes, KeyframeStyle};
use super::layout::{active_cells, animation_shorthand, BoundingBox, Num, Timeline, CELL_PX, GAP_PX};
use super::{CodeGenerator, ExportFormat};
use crate::state::Frame;

#[derive(Debug, Default, Clone, Copy)]
pub struct CssGenerator;

impl CssGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for CssGenerator {
    fn generate(&self, frame: &Frame) -> String {
        let cells = active_cells(frame);
        let Some(bounds) = BoundingBox::from_ids(cells.iter().map(|c| c.id)) else {
            return String::new();
        };

        let mut keyframe_blocks = Vec::new();
        let mut cell_styles = Vec::new();
        let mut divs = Vec::new();

        for cell in &cells {
            let (grid_row, grid_col) = bounds.grid_position(cell.id);
            let class = format!("c-{}", cell.id);

            let opacity = match keyframes(KeyframeStyle::Box, cell) {
                Some(block) => {
                    keyframe_blocks.push(block);
                    let name = format!("{}-{}", cell.props.animation_type, cell.id);
                    cell_styles.push(format!(
                        ".{class} {{ animation: {}; transform-origin: center; }}",
                        animation_shorthand(&name, &cell.props)
                    ));
                    String::new()
                }
                None => format!("opacity:{};", Num(cell.props.opacity.from)),
            };
            divs.push(format!(
                "  <div class=\"pixel-cell {class}\" style=\"grid-row:{grid_row};grid-column:{grid_col};background:{};{opacity}\"></div>",
                cell.props.fill
            ));
        }

        html_document(bounds.span_cols(), keyframe_blocks, cell_styles, &divs)
    }

    fn generate_frames(&self, frames: &[Arc<Frame>], fps: f64) -> String {
        let Some(timeline) = Timeline::new(frames, fps) else {
            return String::new();
        };

        let keyframe_blocks = timeline.cell_ids.iter().map(|id| timeline.cell_keyframes(*id)).collect();
        let cell_styles = timeline.cell_ids.iter().map(|id| timeline.cell_rule(*id)).collect();
        let divs: Vec<String> = timeline
            .cell_ids
            .iter()
            .map(|id| {
                let (grid_row, grid_col) = timeline.bounds.grid_position(*id);
                format!(
                    "  <div class=\"pixel-cell c-{id}\" style=\"grid-row:{grid_row};grid-column:{grid_col};background:{};\"></div>",
                    timeline.first_fill(*id)
                )
            })
            .collect();

        html_document(timeline.bounds.span_cols(), keyframe_blocks, cell_styles, &divs)
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Css
    }
}

fn html_document(span_cols: usize, keyframe_blocks: Vec<String>, cell_styles: Vec<String>, divs: &[String]) -> String {
    let mut rules = vec![
        format!(".pixel-grid {{ display: grid; grid-template-columns: repeat({span_cols}, {CELL_PX}px); gap: {GAP_PX}px; }}"),
        format!(".pixel-cell {{ border-radius: 2px; width: {CELL_PX}px; height: {CELL_PX}px; }}"),
    ];
    rules.extend(keyframe_blocks);
    rules.extend(cell_styles);

    format!(
        "<div class=\"pixel-grid\">\n  <style>\n    {}\n  </style>\n{}\n</div>",
        rules.join("\n    "),
        divs.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnimationType, CellId, GridSize};

    fn frame_with(id: u32, cells: &[(usize, usize, AnimationType)]) -> Frame {
        let mut frame = Frame::blank(id, GridSize::new(8, 8));
        for (r, c, t) in cells {
            let cell = frame.cells.get_mut(&CellId::new(*r, *c)).unwrap();
            cell.props.active = true;
            cell.props.animation_type = *t;
        }
        frame
    }

    #[test]
    fn test_empty_is_empty_string() {
        assert_eq!(CssGenerator.generate(&Frame::blank(0, GridSize::new(3, 3))), "");
    }

    #[test]
    fn test_static_cell_markup() {
        let html = CssGenerator.generate(&frame_with(0, &[(2, 5, AnimationType::None)]));
        assert_eq!(
            html,
            "<div class=\"pixel-grid\">\n  <style>\n    .pixel-grid { display: grid; grid-template-columns: repeat(1, 10px); gap: 2px; }\n    .pixel-cell { border-radius: 2px; width: 10px; height: 10px; }\n  </style>\n  <div class=\"pixel-cell c-2-5\" style=\"grid-row:1;grid-column:1;background:#6366f1;opacity:1;\"></div>\n</div>"
        );
    }

    #[test]
    fn test_animated_cell_rule() {
        let html = CssGenerator.generate(&frame_with(0, &[(0, 0, AnimationType::Flip), (0, 2, AnimationType::None)]));
        assert!(html.contains("repeat(3, 10px)"));
        assert!(html.contains("perspective(200px) rotateY(180deg)"));
        assert!(html.contains(".c-0-0 { animation: flip-0-0 1s ease-in-out 0s infinite normal none; transform-origin: center; }"));
        assert!(html.contains("style=\"grid-row:1;grid-column:1;background:#6366f1;\""));
        assert!(html.contains("style=\"grid-row:1;grid-column:3;background:#6366f1;opacity:1;\""));
    }

    #[test]
    fn test_multi_frame_cells() {
        let frames = vec![
            Arc::new(frame_with(0, &[(1, 1, AnimationType::None)])),
            Arc::new(frame_with(1, &[(0, 0, AnimationType::Pulse)])),
        ];
        let html = CssGenerator.generate_frames(&frames, 4.0);
        assert!(html.contains("@keyframes frame-1-1 {\n  0.0% { background: #6366f1; opacity: 1; }\n  50.0% { background: transparent; opacity: 0; }"));
        assert!(html.contains(".c-0-0 { animation: frame-0-0 0.5s step-end infinite; }"));
        let first = html.find("c-1-1\" style").unwrap();
        let second = html.find("c-0-0\" style").unwrap();
        assert!(first < second);
        assert!(html.contains("style=\"grid-row:2;grid-column:2;background:#6366f1;\""));
    }
}
