use rand::Rng;

use crate::error::{EngineError, Result};
use crate::simulation::{grid, Grid};

/// Deterministic construction from a row table.
pub fn from_pattern<R: AsRef<[u8]>>(rows: &[R]) -> Result<Grid> {
    Grid::from_pattern(rows)
}

/// Fill a grid where each cell is alive independently with probability `bias`.
pub fn random<G: Rng>(width: usize, height: usize, bias: f64, rng: &mut G) -> Result<Grid> {
    check_bias(bias)?;
    let len = grid::cell_count(width, height)?;
    let cells = (0..len).map(|_| rng.gen_bool(bias)).collect();
    Ok(Grid::from_cells(width, height, cells))
}

pub(crate) fn check_bias(bias: f64) -> Result<()> {
    if (0.0..=1.0).contains(&bias) {
        Ok(())
    } else {
        Err(EngineError::InvalidArgument(format!(
            "random bias {bias} must be within [0, 1]"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_dimensions() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = random(30, 20, 0.5, &mut rng).unwrap();
        assert_eq!((grid.width(), grid.height()), (30, 20));
        assert_eq!(grid.cells().len(), 600);
    }

    #[test]
    fn test_extreme_bias() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random(10, 10, 0.0, &mut rng).unwrap().population(), 0);
        assert_eq!(random(10, 10, 1.0, &mut rng).unwrap().population(), 100);
    }

    #[test]
    fn test_low_bias_is_bernoulli() {
        // 40k trials at p = 0.25: standard deviation is ~87 cells.
        let mut rng = StdRng::seed_from_u64(42);
        let grid = random(200, 200, 0.25, &mut rng).unwrap();
        let population = grid.population() as f64;
        assert!(
            (population - 10_000.0).abs() < 600.0,
            "population {population} far from expected 10000"
        );
    }

    #[test]
    fn test_bias_out_of_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for bias in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let err = random(4, 4, bias, &mut rng).unwrap_err();
            assert!(matches!(err, EngineError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let err = random(usize::MAX, 2, 0.5, &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
    }

    #[test]
    fn test_same_seed_same_grid() {
        let a = random(16, 16, 0.3, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = random(16, 16, 0.3, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }
}
