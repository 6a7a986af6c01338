use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::{EngineError, Result};
use crate::simulation::Grid;

type Predicate = dyn Fn(bool, u8) -> bool + Send + Sync;

/// One predicate of a ruleset: `(alive, living neighbors) -> permitted`.
#[derive(Clone)]
pub struct Rule {
    name: Cow<'static, str>,
    predicate: Arc<Predicate>,
}

impl Rule {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(bool, u8) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn permits(&self, alive: bool, neighbors: u8) -> bool {
        (self.predicate)(alive, neighbors)
    }

    /// A live cell with fewer than two neighbors dies.
    pub fn loneliness() -> Self {
        Self::new("loneliness", |alive, n| !(alive && n < 2))
    }

    /// A live cell with more than three neighbors dies.
    pub fn overcrowding() -> Self {
        Self::new("overcrowding", |alive, n| !(alive && n > 3))
    }

    /// A dead cell comes alive with exactly three neighbors.
    pub fn birth_on_three() -> Self {
        Self::new("birth", |alive, n| alive || n == 3)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rule").field(&self.name).finish()
    }
}

/// Ordered rules whose logical AND decides a cell's next state.
#[derive(Clone, Debug)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Conway's B3/S23 as three rules: loneliness, overcrowding, birth.
    pub fn classic() -> Self {
        Self::new(vec![
            Rule::loneliness(),
            Rule::overcrowding(),
            Rule::birth_on_three(),
        ])
    }

    /// HighLife, B36/S23.
    pub fn high_life() -> Self {
        Self::new(vec![birth_rule(&[3, 6]), survival_rule(&[2, 3])])
    }

    /// Parse `B<digits>/S<digits>` notation (either order, case-insensitive)
    /// into a birth rule followed by a survival rule.
    pub fn from_notation(notation: &str) -> Result<Self> {
        let mut birth = None;
        let mut survival = None;

        for part in notation.trim().split('/') {
            let mut chars = part.chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survival,
                _ => return Err(bad_notation(notation)),
            };
            if slot.is_some() {
                return Err(bad_notation(notation));
            }
            let counts = chars
                .map(|c| match c.to_digit(10) {
                    Some(d) if d <= 8 => Ok(d as u8),
                    _ => Err(bad_notation(notation)),
                })
                .collect::<Result<Vec<u8>>>()?;
            *slot = Some(counts);
        }

        match (birth, survival) {
            (Some(b), Some(s)) => Ok(Self::new(vec![birth_rule(&b), survival_rule(&s)])),
            _ => Err(bad_notation(notation)),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Next state of one cell. Stops at the first rule that refuses.
    pub fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        self.rules.iter().all(|rule| rule.permits(alive, neighbors))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::classic()
    }
}

fn birth_rule(counts: &[u8]) -> Rule {
    let mask = count_mask(counts);
    Rule::new(format!("birth {counts:?}"), move |alive, n| {
        alive || mask & (1 << n) != 0
    })
}

fn survival_rule(counts: &[u8]) -> Rule {
    let mask = count_mask(counts);
    Rule::new(format!("survival {counts:?}"), move |alive, n| {
        !alive || mask & (1 << n) != 0
    })
}

fn count_mask(counts: &[u8]) -> u16 {
    counts.iter().fold(0, |mask, &n| mask | (1 << n))
}

fn bad_notation(notation: &str) -> EngineError {
    EngineError::InvalidArgument(format!("malformed rule notation {notation:?}"))
}

/// Living cells among the 8 Moore neighbors of `(x, y)`. Off-grid neighbors are dead.
pub fn surround_count(grid: &Grid, x: usize, y: usize) -> u8 {
    let (x, y) = (x as isize, y as isize);
    let mut count = 0;

    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            if grid.is_alive(x + dx, y + dy) {
                count += 1;
            }
        }
    }

    count
}

/// Compute the next generation into a freshly allocated grid.
///
/// Reads only from `grid`, so a cell's outcome never depends on neighbors
/// already updated in the same pass.
pub fn step(grid: &Grid, ruleset: &RuleSet) -> Grid {
    let (width, height) = (grid.width(), grid.height());
    let mut cells = Vec::with_capacity(grid.cells().len());

    for y in 0..height {
        for x in 0..width {
            let alive = grid.is_alive(x as isize, y as isize);
            cells.push(ruleset.next_state(alive, surround_count(grid, x, y)));
        }
    }

    Grid::from_cells(width, height, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::patterns;

    fn grid(rows: &[&[u8]]) -> Grid {
        Grid::from_pattern(rows).unwrap()
    }

    #[test]
    fn test_surround_count_center_only() {
        let g = grid(&[&[0, 0, 0], &[0, 1, 0], &[0, 0, 0]]);
        assert_eq!(surround_count(&g, 1, 1), 0);
        for (x, y) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
            assert_eq!(surround_count(&g, x, y), 1, "corner ({x}, {y})");
        }
    }

    #[test]
    fn test_surround_count_no_wraparound() {
        let g = grid(&[&[1, 0, 0, 1], &[0, 0, 0, 0], &[0, 0, 0, 0], &[1, 0, 0, 1]]);
        // A torus would see the other three corners.
        assert_eq!(surround_count(&g, 0, 0), 0);
        assert_eq!(surround_count(&g, 3, 3), 0);
    }

    #[test]
    fn test_surround_count_full() {
        let g = grid(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]);
        assert_eq!(surround_count(&g, 1, 1), 8);
        assert_eq!(surround_count(&g, 0, 0), 3);
        assert_eq!(surround_count(&g, 1, 0), 5);
    }

    #[test]
    fn test_classic_truth_table() {
        let rules = RuleSet::classic();
        for n in 0..=8 {
            assert_eq!(rules.next_state(true, n), n == 2 || n == 3, "alive, {n}");
            assert_eq!(rules.next_state(false, n), n == 3, "dead, {n}");
        }
    }

    #[test]
    fn test_rule_order_preserved() {
        let names: Vec<_> = RuleSet::classic()
            .rules()
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, ["loneliness", "overcrowding", "birth"]);
    }

    #[test]
    fn test_lone_cell_dies() {
        let g = Grid::from_pattern(patterns::LONE_CELL.rows).unwrap();
        let next = step(&g, &RuleSet::default());
        assert_eq!(next.population(), 0);
        assert_eq!((next.width(), next.height()), (g.width(), g.height()));
    }

    #[test]
    fn test_block_is_still() {
        let g = Grid::from_pattern(patterns::BLOCK.rows).unwrap();
        assert_eq!(step(&g, &RuleSet::default()), g);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = Grid::from_pattern(patterns::BLINKER.rows).unwrap();
        let vertical = grid(&[&[0, 1, 0], &[0, 1, 0], &[0, 1, 0]]);
        let rules = RuleSet::default();

        let once = step(&horizontal, &rules);
        assert_eq!(once, vertical);
        assert_eq!(step(&once, &rules), horizontal);
    }

    #[test]
    fn test_step_is_pure() {
        let g = Grid::from_pattern(patterns::GLIDER.rows)
            .unwrap()
            .resize(8, 8)
            .unwrap();
        let before = g.clone();
        let rules = RuleSet::default();

        assert_eq!(step(&g, &rules), step(&g, &rules));
        assert_eq!(g, before);
    }

    #[test]
    fn test_glider_translates() {
        let rules = RuleSet::default();
        let start = Grid::from_pattern(patterns::GLIDER.rows)
            .unwrap()
            .resize(6, 6)
            .unwrap();
        let mut g = start.clone();
        for _ in 0..4 {
            g = step(&g, &rules);
        }
        assert_eq!(g.population(), 5);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(g.is_alive(x + 1, y + 1), start.is_alive(x, y));
            }
        }
    }

    #[test]
    fn test_step_empty_grid() {
        let g = Grid::new(0, 0).unwrap();
        assert!(step(&g, &RuleSet::default()).is_empty());
    }

    #[test]
    fn test_notation_matches_classic() {
        let parsed = RuleSet::from_notation("B3/S23").unwrap();
        let classic = RuleSet::classic();
        for alive in [false, true] {
            for n in 0..=8 {
                assert_eq!(parsed.next_state(alive, n), classic.next_state(alive, n));
            }
        }
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_notation_high_life() {
        let parsed = RuleSet::from_notation("s23/b36").unwrap();
        assert!(parsed.next_state(false, 6));
        assert!(!parsed.next_state(true, 6));
        assert!(RuleSet::high_life().next_state(false, 6));
    }

    #[test]
    fn test_notation_rejects_garbage() {
        for bad in ["", "B3", "B3/S23/S1", "B9/S23", "X3/S23", "B3/Sx"] {
            let err = RuleSet::from_notation(bad).unwrap_err();
            assert!(matches!(err, EngineError::InvalidArgument(_)), "{bad}");
        }
    }

    #[test]
    fn test_empty_ruleset_keeps_everything_alive() {
        let rules = RuleSet::new(Vec::new());
        assert!(rules.is_empty());
        assert!(rules.next_state(false, 0));
    }
}
