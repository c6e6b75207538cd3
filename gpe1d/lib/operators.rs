//! Diagonal operator tables.
//!
//! The kinetic energy is diagonal in momentum space and the trap potential is
//! diagonal in position space, so both reduce to plain arrays over the
//! (native-order) grids.

use ndarray as nd;
use crate::{ Arr1, grid::Grid };

/// Kinetic energy ½ *k*² for each momentum mode.
pub fn kinetic<S>(k: &Arr1<S>) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    k.mapv(|kj| 0.5 * kj.powi(2))
}

/// Harmonic trap potential ½ *ω*² *z*² for each position.
pub fn harmonic<S>(z: &Arr1<S>, whoz: f64) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    z.mapv(|zj| 0.5 * whoz.powi(2) * zj.powi(2))
}

/// Precomputed kinetic and potential tables, both in native order.
#[derive(Clone, Debug, PartialEq)]
pub struct Operators {
    /// Trap frequency the potential was tabulated for.
    pub whoz: f64,
    /// Kinetic energy per momentum mode.
    pub ekin: nd::Array1<f64>,
    /// Trap potential per position.
    pub v: nd::Array1<f64>,
}

impl Operators {
    /// Tabulate the operators over `grid` for trap frequency `whoz`.
    pub fn new(grid: &Grid, whoz: f64) -> Self {
        Self { whoz, ekin: kinetic(&grid.k), v: harmonic(&grid.z, whoz) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn tables_follow_the_grid() {
        let grid = Grid::new(3.0, 16).unwrap();
        let ops = Operators::new(&grid, 2.0);
        assert_eq!(ops.whoz, 2.0);
        assert_eq!(ops.ekin.len(), 16);
        assert_eq!(ops.v.len(), 16);
        assert_eq!(ops.ekin[0], 0.0);
        assert_eq!(ops.v[0], 0.0);
        for j in 0..16 {
            assert_abs_diff_eq!(ops.ekin[j], 0.5 * grid.k[j] * grid.k[j], epsilon = 1e-12);
            assert_abs_diff_eq!(ops.v[j], 2.0 * grid.z[j] * grid.z[j], epsilon = 1e-12);
        }
        // both tables are even functions, maximal at the boundary point
        assert_abs_diff_eq!(ops.v[8], 0.5 * 4.0 * 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ops.ekin[1], ops.ekin[15], epsilon = 1e-12);
    }
}
