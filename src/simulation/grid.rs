use std::fmt;

use crate::error::{EngineError, Result};

/// Rectangular two-state field stored row-major.
///
/// Every coordinate inside `[0, width) x [0, height)` holds exactly one value;
/// anything outside reads as dead. There is no wraparound.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid. Zero dimensions give an empty, inert grid.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; len],
        })
    }

    /// Build a grid from rows of `0`/`1`.
    ///
    /// Width is the longest row, height the row count. Short rows are padded
    /// with dead cells; any value other than 0 or 1 is rejected.
    pub fn from_pattern<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut grid = Self::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.as_ref().iter().enumerate() {
                let alive = match value {
                    0 => false,
                    1 => true,
                    other => {
                        return Err(EngineError::InvalidArgument(format!(
                            "pattern cell ({x}, {y}) is {other}, expected 0 or 1"
                        )))
                    }
                };
                grid.cells[y * width + x] = alive;
            }
        }

        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cell values, `width * height` long.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Out-of-bounds coordinates (including negative ones) are dead.
    pub fn is_alive(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Set a single cell. Fails for coordinates outside the grid.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(EngineError::InvalidArgument(format!(
                "cell ({x}, {y}) outside {}x{} grid",
                self.width, self.height
            )));
        }
        self.cells[y * self.width + x] = alive;
        Ok(())
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Return a grid of the new size. The overlap keeps its values, newly
    /// exposed cells are dead.
    pub fn resize(&self, new_width: usize, new_height: usize) -> Result<Self> {
        let mut resized = Self::new(new_width, new_height)?;
        let keep_w = self.width.min(new_width);
        let keep_h = self.height.min(new_height);

        for y in 0..keep_h {
            let src = &self.cells[y * self.width..y * self.width + keep_w];
            resized.cells[y * new_width..y * new_width + keep_w].copy_from_slice(src);
        }

        Ok(resized)
    }

    /// Build a grid from an already computed row-major buffer.
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }
}

pub(crate) fn cell_count(width: usize, height: usize) -> Result<usize> {
    width.checked_mul(height).ok_or_else(|| {
        EngineError::InvalidArgument(format!("grid of {width}x{height} cells overflows"))
    })
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(100, 100).unwrap();
        assert_eq!(grid.cells().len(), 10000);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_zero_sized_grid() {
        let grid = Grid::new(0, 5).unwrap();
        assert!(grid.is_empty());
        assert!(!grid.is_alive(0, 0));
        assert_eq!(grid.resize(0, 0).unwrap(), Grid::new(0, 0).unwrap());
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        let err = Grid::new(usize::MAX, 2).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
    }

    #[test]
    fn test_out_of_bounds_is_dead() {
        let grid = Grid::from_pattern(&[[1u8, 1], [1, 1]]).unwrap();
        assert!(!grid.is_alive(-1, 0));
        assert!(!grid.is_alive(0, -1));
        assert!(!grid.is_alive(grid.width() as isize, 0));
        assert!(!grid.is_alive(0, grid.height() as isize));
        assert!(grid.is_alive(1, 1));
    }

    #[test]
    fn test_from_pattern_pads_short_rows() {
        let rows: Vec<Vec<u8>> = vec![vec![1], vec![0, 0, 1], vec![]];
        let grid = Grid::from_pattern(&rows).unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 3));
        assert!(grid.is_alive(0, 0));
        assert!(!grid.is_alive(1, 0));
        assert!(!grid.is_alive(2, 0));
        assert!(grid.is_alive(2, 1));
        assert_eq!(grid.population(), 2);
    }

    #[test]
    fn test_from_pattern_rejects_bad_values() {
        let err = Grid::from_pattern(&[[0u8, 2]]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
    }

    #[test]
    fn test_resize_preserves_overlap() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(1, 1, true).unwrap();

        let grown = grid.resize(6, 6).unwrap();
        assert_eq!((grown.width(), grown.height()), (6, 6));
        assert!(grown.is_alive(1, 1));
        assert_eq!(grown.population(), 1);
    }

    #[test]
    fn test_resize_crops() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(3, 3, true).unwrap();
        grid.set(0, 1, true).unwrap();

        let shrunk = grid.resize(2, 2).unwrap();
        assert_eq!(shrunk.population(), 1);
        assert!(shrunk.is_alive(0, 1));
    }

    #[test]
    fn test_set_out_of_bounds_fails() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(grid.set(2, 0, true).is_err());
    }

    #[test]
    fn test_display() {
        let grid = Grid::from_pattern(&[[0u8, 1], [1, 0]]).unwrap();
        assert_eq!(grid.to_string(), ".#\n#.\n");
    }
}
