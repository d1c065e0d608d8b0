//! Image import: rasterize a picture onto a cell grid.
//!
//! The image is scaled to fit inside `cols x rows` keeping its aspect ratio,
//! centered on a transparent canvas, and sampled one pixel per cell. Pixels
//! at least half opaque become active cells filled with their RGB color.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbaImage};
use std::collections::BTreeMap;
use std::path::Path;

use crate::action::Action;
use crate::color::rgb_to_hex;
use crate::error::{PixiconError, Result};
use crate::models::{CellId, CellProps, Document, FrameDocument, GridSize, DOCUMENT_VERSION};
use crate::state::DEFAULT_BG_COLOR;

/// Minimum alpha for a pixel to count as drawn.
pub const ALPHA_THRESHOLD: u8 = 128;

/// Grid used when the caller does not pick one.
pub const DEFAULT_IMPORT_SIZE: GridSize = GridSize::new(16, 16);

/// A full cell map produced from an image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedImage {
    pub grid_size: GridSize,
    pub cells: BTreeMap<CellId, CellProps>,
}

impl ImportedImage {
    pub fn active_count(&self) -> usize {
        self.cells.values().filter(|p| p.active).count()
    }

    /// Single-frame document holding the imported cells.
    pub fn to_document(&self) -> Document {
        Document {
            version: DOCUMENT_VERSION,
            grid_size: self.grid_size,
            bg_color: DEFAULT_BG_COLOR.to_string(),
            active_frame_index: 0,
            next_frame_id: Some(1),
            frames: vec![FrameDocument { id: 0, cells: self.cells.clone() }],
        }
    }

    /// Replace an existing document's content with the imported cells.
    pub fn load_action(&self) -> Action {
        Action::LoadPreset { cells: self.cells.clone(), grid_size: Some(self.grid_size) }
    }
}

/// Read and rasterize an image file.
pub fn import_image(path: &Path, grid_size: GridSize) -> Result<ImportedImage> {
    let bytes = std::fs::read(path).map_err(|e| PixiconError::Io {
        message: e.to_string(),
        path: path.display().to_string(),
    })?;
    let img = image::load_from_memory(&bytes).map_err(|e| PixiconError::ImageDecode(e.to_string()))?;
    tracing::debug!(path = %path.display(), width = img.width(), height = img.height(), "decoded image");
    image_to_cells(&img, grid_size)
}

/// Rasterize an already-decoded image.
pub fn image_to_cells(img: &DynamicImage, grid_size: GridSize) -> Result<ImportedImage> {
    let grid_size = grid_size.validate()?;
    let canvas = contain(img, grid_size.cols as u32, grid_size.rows as u32)?;

    let cells = grid_size
        .cell_ids()
        .map(|id| {
            let px = canvas.get_pixel(id.col as u32, id.row as u32);
            let [r, g, b, a] = px.0;
            let props = if a >= ALPHA_THRESHOLD {
                CellProps { fill: rgb_to_hex(r, g, b), active: true, ..Default::default() }
            } else {
                CellProps::default()
            };
            (id, props)
        })
        .collect();

    Ok(ImportedImage { grid_size, cells })
}

/// Scale `img` to fit inside `width x height`, centered on transparency.
fn contain(img: &DynamicImage, width: u32, height: u32) -> Result<RgbaImage> {
    let (src_w, src_h) = img.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(PixiconError::ImageDecode("image has no pixels".to_string()));
    }

    let scale = f64::min(width as f64 / src_w as f64, height as f64 / src_h as f64);
    let fit_w = ((src_w as f64 * scale).round() as u32).clamp(1, width);
    let fit_h = ((src_h as f64 * scale).round() as u32).clamp(1, height);
    let resized = imageops::resize(&img.to_rgba8(), fit_w, fit_h, FilterType::Triangle);

    let mut canvas = RgbaImage::new(width, height);
    let x = (width - fit_w) / 2;
    let y = (height - fit_h) / 2;
    imageops::overlay(&mut canvas, &resized, x as i64, y as i64);
    Ok(canvas)
}
