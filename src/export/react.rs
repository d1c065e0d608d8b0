//! React function-component output.
//!
//! The component takes a `size` multiplier; motion curves are the stylesheet
//! ones, injected through a `<style>` element.

use std::sync::Arc;

use super::keyframes::{keyframes, KeyframeStyle};
use super::layout::{active_cells, animation_shorthand, BoundingBox, Num, Timeline};
use super::{CodeGenerator, ExportFormat};
use crate::models::CellId;
use crate::state::Frame;

#[derive(Debug, Default, Clone, Copy)]
pub struct ReactGenerator;

impl ReactGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for ReactGenerator {
    fn generate(&self, frame: &Frame) -> String {
        let cells = active_cells(frame);
        let Some(bounds) = BoundingBox::from_ids(cells.iter().map(|c| c.id)) else {
            return String::new();
        };

        let mut keyframe_blocks = Vec::new();
        let mut cell_styles = Vec::new();
        let mut divs = Vec::new();

        for cell in &cells {
            let animated = match keyframes(KeyframeStyle::Box, cell) {
                Some(block) => {
                    keyframe_blocks.push(block);
                    let name = format!("{}-{}", cell.props.animation_type, cell.id);
                    cell_styles.push(format!(
                        ".c-{} {{ animation: {}; transform-origin: center; }}",
                        cell.id,
                        animation_shorthand(&name, &cell.props)
                    ));
                    true
                }
                None => false,
            };
            let class_attr = if animated { format!("className=\"c-{}\" ", cell.id) } else { String::new() };
            let opacity = if animated { String::new() } else { format!(", opacity: {}", Num(cell.props.opacity.from)) };
            divs.push(div_line(&class_attr, &bounds, cell.id, &cell.props.fill, &opacity));
        }

        let (decl, style_tag) = if keyframe_blocks.is_empty() {
            (String::new(), "")
        } else {
            keyframe_blocks.extend(cell_styles);
            (declaration(&keyframe_blocks), "\n      {keyframesCSS && <style>{keyframesCSS}</style>}")
        };

        component(&decl, bounds.span_cols(), style_tag, &divs)
    }

    fn generate_frames(&self, frames: &[Arc<Frame>], fps: f64) -> String {
        let Some(timeline) = Timeline::new(frames, fps) else {
            return String::new();
        };

        let mut rules: Vec<String> = timeline.cell_ids.iter().map(|id| timeline.cell_keyframes(*id)).collect();
        rules.extend(timeline.cell_ids.iter().map(|id| timeline.cell_rule(*id)));

        let divs: Vec<String> = timeline
            .cell_ids
            .iter()
            .map(|id| {
                let class_attr = format!("className=\"c-{}\" ", id);
                div_line(&class_attr, &timeline.bounds, *id, timeline.first_fill(*id), "")
            })
            .collect();

        component(
            &declaration(&rules),
            timeline.bounds.span_cols(),
            "\n      <style>{keyframesCSS}</style>",
            &divs,
        )
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::React
    }
}

fn declaration(rules: &[String]) -> String {
    format!("const keyframesCSS = `\n{}\n`;\n\n", rules.join("\n"))
}

fn div_line(class_attr: &str, bounds: &BoundingBox, id: CellId, fill: &str, extra: &str) -> String {
    let (row, col) = bounds.grid_position(id);
    format!(
        r#"      <div {class_attr}style={{{{ gridRow: {row}, gridColumn: {col}, background: '{fill}', borderRadius: `${{2 * size}}px`, width: `${{cellPx}}px`, height: `${{cellPx}}px`{extra} }}}} />"#
    )
}

fn component(declaration: &str, span_cols: usize, style_tag: &str, divs: &[String]) -> String {
    let divs = divs.join("\n");
    format!(
        r#"{declaration}export default function PixelGrid({{ size = 1 }}) {{
  const cellPx = 10 * size;
  const gapPx = 2 * size;

  return (
    <div style={{{{ display: 'grid', gridTemplateColumns: `repeat({span_cols}, ${{cellPx}}px)`, gap: `${{gapPx}}px` }}}}>{style_tag}
{divs}
    </div>
  );
}}
"#
    )
}
