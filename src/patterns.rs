//! Geometric cell patterns for bulk fills.

use crate::models::{CellId, GridSize};

/// Named closed-form cell pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    Border,
    Checkerboard,
    Diagonal,
    Cross,
    XMark,
    Circle,
    Diamond,
    Corners,
}

impl Pattern {
    pub const ALL: [Pattern; 8] = [
        Pattern::Border,
        Pattern::Checkerboard,
        Pattern::Diagonal,
        Pattern::Cross,
        Pattern::XMark,
        Pattern::Circle,
        Pattern::Diamond,
        Pattern::Corners,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Border => "border",
            Pattern::Checkerboard => "checkerboard",
            Pattern::Diagonal => "diagonal",
            Pattern::Cross => "cross",
            Pattern::XMark => "x-mark",
            Pattern::Circle => "circle",
            Pattern::Diamond => "diamond",
            Pattern::Corners => "corners",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }

    /// Comma-separated list of pattern names, for error messages.
    pub fn names() -> String {
        Self::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>().join(", ")
    }

    /// Cells matching the pattern, row-major.
    pub fn cells(&self, grid: GridSize) -> Vec<CellId> {
        if let Pattern::Corners = self {
            let mut ids = Vec::with_capacity(4);
            for row in [0, grid.rows.saturating_sub(1)] {
                for col in [0, grid.cols.saturating_sub(1)] {
                    let id = CellId::new(row, col);
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
            }
            return ids;
        }
        grid.cell_ids().filter(|id| self.contains(*id, grid)).collect()
    }

    fn contains(&self, id: CellId, grid: GridSize) -> bool {
        let (r, c) = (id.row, id.col);
        let (rows, cols) = (grid.rows, grid.cols);
        let (rf, cf, rowsf, colsf) = (r as f64, c as f64, rows as f64, cols as f64);

        match self {
            Pattern::Border => r == 0 || r == rows - 1 || c == 0 || c == cols - 1,
            Pattern::Checkerboard => (r + c) % 2 == 0,
            Pattern::Diagonal => r == c || r + c + 1 == cols,
            Pattern::Cross => r == (rows - 1) / 2 || c == (cols - 1) / 2,
            Pattern::XMark => {
                // normalized diagonals, so non-square grids still get a full X
                let tolerance = 1.0 / rowsf.max(colsf);
                let nr = rf / (rowsf - 1.0);
                let nc = cf / (colsf - 1.0);
                r == c
                    || r + c + 1 == rows
                    || (nr - nc).abs() < tolerance
                    || (nr - (1.0 - nc)).abs() < tolerance
            }
            Pattern::Circle => {
                let cr = (rowsf - 1.0) / 2.0;
                let cc = (colsf - 1.0) / 2.0;
                let radius = if cr.min(cc) == 0.0 { 1.0 } else { cr.min(cc) };
                let dist = (((rf - cr) / radius).powi(2) + ((cf - cc) / radius).powi(2)).sqrt();
                (0.7..=1.3).contains(&dist)
            }
            Pattern::Diamond => {
                let cr = (rowsf - 1.0) / 2.0;
                let cc = (colsf - 1.0) / 2.0;
                let dist = (rf - cr).abs() + (cf - cc).abs();
                (dist - cr.min(cc)).abs() <= 0.5
            }
            Pattern::Corners => (r == 0 || r == rows - 1) && (c == 0 || c == cols - 1),
        }
    }
}

/// Cells for a pattern given by name; unknown names yield no cells.
pub fn cells_for_pattern(name: &str, grid: GridSize) -> Vec<CellId> {
    Pattern::from_name(name).map(|p| p.cells(grid)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ids: Vec<CellId>) -> Vec<String> {
        ids.into_iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_corners() {
        assert_eq!(
            names(cells_for_pattern("corners", GridSize::new(8, 8))),
            vec!["0-0", "0-7", "7-0", "7-7"]
        );
        assert_eq!(names(cells_for_pattern("corners", GridSize::new(1, 1))), vec!["0-0"]);
    }

    #[test]
    fn test_border() {
        let ids = cells_for_pattern("border", GridSize::new(4, 4));
        assert_eq!(ids.len(), 12);
        assert!(!ids.contains(&CellId::new(1, 1)));
    }

    #[test]
    fn test_checkerboard_and_cross() {
        assert_eq!(cells_for_pattern("checkerboard", GridSize::new(4, 4)).len(), 8);
        let cross = cells_for_pattern("cross", GridSize::new(5, 5));
        assert_eq!(cross.len(), 9);
        assert!(cross.contains(&CellId::new(2, 0)));
        assert!(cross.contains(&CellId::new(0, 2)));
    }

    #[test]
    fn test_diagonal_square() {
        let ids = cells_for_pattern("diagonal", GridSize::new(4, 4));
        assert_eq!(names(ids), vec!["0-0", "0-3", "1-1", "1-2", "2-1", "2-2", "3-0", "3-3"]);
    }

    #[test]
    fn test_x_mark_covers_diagonals() {
        let ids = cells_for_pattern("x-mark", GridSize::new(8, 8));
        for i in 0..8 {
            assert!(ids.contains(&CellId::new(i, i)));
            assert!(ids.contains(&CellId::new(i, 7 - i)));
        }
        assert!(!ids.contains(&CellId::new(0, 3)));
    }

    #[test]
    fn test_circle_is_ring() {
        let ids = cells_for_pattern("circle", GridSize::new(9, 9));
        assert!(ids.contains(&CellId::new(0, 4)));
        assert!(!ids.contains(&CellId::new(4, 4)));
    }

    #[test]
    fn test_diamond() {
        let ids = cells_for_pattern("diamond", GridSize::new(5, 5));
        assert!(ids.contains(&CellId::new(0, 2)));
        assert!(ids.contains(&CellId::new(2, 0)));
        assert!(ids.contains(&CellId::new(1, 1)));
        assert!(!ids.contains(&CellId::new(2, 2)));
    }

    #[test]
    fn test_unknown_pattern_is_empty() {
        assert!(cells_for_pattern("zigzag", GridSize::new(8, 8)).is_empty());
        assert_eq!(Pattern::from_name("x-mark"), Some(Pattern::XMark));
    }
}
