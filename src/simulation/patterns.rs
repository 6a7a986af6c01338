//! Built-in seed patterns as rows of `0`/`1`, ready for [`Grid::from_pattern`].
//!
//! [`Grid::from_pattern`]: crate::simulation::Grid::from_pattern

/// A named row table.
pub struct Pattern {
    pub name: &'static str,
    pub rows: &'static [&'static [u8]],
}

/// Single live cell in a 14x5 field. Dies after one generation.
pub const LONE_CELL: Pattern = Pattern {
    name: "Lone cell",
    rows: &[
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
};

/// Period-2 oscillator, horizontal phase.
pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    rows: &[&[0, 0, 0], &[1, 1, 1], &[0, 0, 0]],
};

/// Still life.
pub const BLOCK: Pattern = Pattern {
    name: "Block",
    rows: &[&[0, 0, 0, 0], &[0, 1, 1, 0], &[0, 1, 1, 0], &[0, 0, 0, 0]],
};

/// Diagonal spaceship heading down-right.
pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    rows: &[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]],
};

pub const PATTERNS: &[Pattern] = &[LONE_CELL, BLINKER, BLOCK, GLIDER];

/// Look up a built-in pattern by case-insensitive name.
pub fn by_name(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Grid;

    #[test]
    fn test_patterns_parse() {
        for pattern in PATTERNS {
            let grid = Grid::from_pattern(pattern.rows).unwrap();
            assert!(grid.population() > 0, "{} has no live cells", pattern.name);
        }
    }

    #[test]
    fn test_lone_cell_shape() {
        let grid = Grid::from_pattern(LONE_CELL.rows).unwrap();
        assert_eq!((grid.width(), grid.height()), (14, 5));
        assert!(grid.is_alive(6, 2));
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("glider").map(|p| p.name), Some("Glider"));
        assert!(by_name("spaceship").is_none());
    }
}
