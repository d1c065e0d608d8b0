//! Stagger: spread animation start delays across a set of cells.
//!
//! Each cell gets a raw progress value from the pattern, then the whole set
//! is min-max normalized into `[0, total_time]`.

use rand::Rng;
use std::collections::BTreeMap;

use crate::models::CellId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaggerPattern {
    LeftToRight,
    TopToBottom,
    Diagonal,
    Radial,
    Random,
    Spiral,
}

impl StaggerPattern {
    pub const ALL: [StaggerPattern; 6] = [
        StaggerPattern::LeftToRight,
        StaggerPattern::TopToBottom,
        StaggerPattern::Diagonal,
        StaggerPattern::Radial,
        StaggerPattern::Random,
        StaggerPattern::Spiral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StaggerPattern::LeftToRight => "left-to-right",
            StaggerPattern::TopToBottom => "top-to-bottom",
            StaggerPattern::Diagonal => "diagonal",
            StaggerPattern::Radial => "radial",
            StaggerPattern::Random => "random",
            StaggerPattern::Spiral => "spiral",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StaggerPattern::LeftToRight => "Left → Right",
            StaggerPattern::TopToBottom => "Top → Bottom",
            StaggerPattern::Diagonal => "Diagonal",
            StaggerPattern::Radial => "Radial",
            StaggerPattern::Random => "Random",
            StaggerPattern::Spiral => "Spiral",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }

    pub fn names() -> String {
        Self::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>().join(", ")
    }
}

/// Delays for `cells` under `pattern`, spanning `[0, total_time]`.
///
/// `Random` draws from the thread-local generator, so repeated calls differ.
pub fn stagger_delays(cells: &[CellId], pattern: StaggerPattern, total_time: f64) -> BTreeMap<CellId, f64> {
    stagger_delays_with_rng(cells, pattern, total_time, &mut rand::thread_rng())
}

/// [`stagger_delays`] with an explicit random source.
pub fn stagger_delays_with_rng<R: Rng + ?Sized>(
    cells: &[CellId],
    pattern: StaggerPattern,
    total_time: f64,
    rng: &mut R,
) -> BTreeMap<CellId, f64> {
    if cells.is_empty() {
        return BTreeMap::new();
    }

    // center of the subset's bounding box
    let min_r = cells.iter().map(|c| c.row).min().unwrap_or(0) as f64;
    let max_r = cells.iter().map(|c| c.row).max().unwrap_or(0) as f64;
    let min_c = cells.iter().map(|c| c.col).min().unwrap_or(0) as f64;
    let max_c = cells.iter().map(|c| c.col).max().unwrap_or(0) as f64;
    let (center_r, center_c) = ((min_r + max_r) / 2.0, (min_c + max_c) / 2.0);

    let progress: Vec<(CellId, f64)> = cells
        .iter()
        .map(|id| {
            let (row, col) = (id.row as f64, id.col as f64);
            let (dr, dc) = (row - center_r, col - center_c);
            let raw = match pattern {
                StaggerPattern::LeftToRight => col,
                StaggerPattern::TopToBottom => row,
                StaggerPattern::Diagonal => row + col,
                StaggerPattern::Radial => (dr * dr + dc * dc).sqrt(),
                StaggerPattern::Random => rng.gen::<f64>(),
                StaggerPattern::Spiral => dr.atan2(dc) + (dr * dr + dc * dc).sqrt() * 0.01,
            };
            (*id, raw)
        })
        .collect();

    let min = progress.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max = progress.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    progress
        .into_iter()
        .map(|(id, raw)| {
            let delay = if range == 0.0 { 0.0 } else { (raw - min) / range * total_time };
            (id, delay)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn row_cells(row: usize, cols: usize) -> Vec<CellId> {
        (0..cols).map(|c| CellId::new(row, c)).collect()
    }

    #[test]
    fn test_left_to_right_spans_total_time() {
        let delays = stagger_delays(&row_cells(0, 5), StaggerPattern::LeftToRight, 2.0);
        assert_eq!(delays[&CellId::new(0, 0)], 0.0);
        assert_eq!(delays[&CellId::new(0, 2)], 1.0);
        assert_eq!(delays[&CellId::new(0, 4)], 2.0);
    }

    #[test]
    fn test_degenerate_progress_is_zero() {
        let delays = stagger_delays(&row_cells(3, 4), StaggerPattern::TopToBottom, 5.0);
        assert!(delays.values().all(|d| *d == 0.0));
    }

    #[test]
    fn test_empty_subset() {
        assert!(stagger_delays(&[], StaggerPattern::Radial, 1.0).is_empty());
    }

    #[test]
    fn test_normalization_bounds() {
        let cells: Vec<CellId> = (0..4).flat_map(|r| (0..3).map(move |c| CellId::new(r, c))).collect();
        for pattern in StaggerPattern::ALL {
            let mut rng = StdRng::seed_from_u64(7);
            let delays = stagger_delays_with_rng(&cells, pattern, 3.0, &mut rng);
            assert_eq!(delays.len(), cells.len());
            assert!(delays.values().all(|d| (0.0..=3.0).contains(d)), "{:?}", pattern);
            let min = delays.values().cloned().fold(f64::INFINITY, f64::min);
            let max = delays.values().cloned().fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(min, 0.0, "{:?}", pattern);
            assert!((max - 3.0).abs() < 1e-9, "{:?}", pattern);
        }
    }

    #[test]
    fn test_radial_center_starts_first() {
        let cells: Vec<CellId> = (0..3).flat_map(|r| (0..3).map(move |c| CellId::new(r, c))).collect();
        let delays = stagger_delays(&cells, StaggerPattern::Radial, 1.0);
        assert_eq!(delays[&CellId::new(1, 1)], 0.0);
        assert_eq!(delays[&CellId::new(0, 0)], 1.0);
    }

    #[test]
    fn test_pattern_names() {
        assert_eq!(StaggerPattern::from_name("top-to-bottom"), Some(StaggerPattern::TopToBottom));
        assert_eq!(StaggerPattern::LeftToRight.label(), "Left → Right");
        assert!(StaggerPattern::from_name("zigzag").is_none());
    }
}
