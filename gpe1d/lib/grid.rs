//! Coordinate grids in position and momentum space, and the permutation
//! between *ascending* order and *native* (FFT) order.
//!
//! For a grid of even size *N*, ascending order puts the most negative
//! coordinate at index 0. Native order puts the zero coordinate at index 0,
//! followed by the positive coordinates in increasing order and then the
//! negative coordinates, again increasing toward zero. The point at index
//! *N*/2 of the native ordering is the domain boundary ±*Z*<sub>max</sub> (or
//! the Nyquist wavenumber ±*K*<sub>max</sub>), which is a single point of the
//! periodic domain.
//!
//! ```
//! use ndarray as nd;
//! use gpe1d::grid::{ Direction, reorder };
//!
//! let asc: nd::Array1<i32> = nd::array![-2, -1, 0, 1, 2, 3];
//! let native = reorder(&asc, Direction::ToNative).unwrap();
//! assert_eq!(native, nd::array![0, 1, 2, 3, -2, -1]);
//! assert_eq!(reorder(&native, Direction::ToAscending).unwrap(), asc);
//! ```

use std::{ f64::consts::PI, str::FromStr };
use ndarray as nd;
use crate::{
    Arr1,
    error::{ ArgError, GPResult, LengthError },
};

/// Direction of a reordering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending → native.
    ToNative,
    /// Native → ascending.
    ToAscending,
}

impl Direction {
    /// Return the direction that undoes `self`.
    pub fn inverse(self) -> Self {
        match self {
            Self::ToNative => Self::ToAscending,
            Self::ToAscending => Self::ToNative,
        }
    }
}

/// Integer flags: `1` for ascending → native, `-1` for native → ascending.
impl TryFrom<i64> for Direction {
    type Error = ArgError;

    fn try_from(flag: i64) -> Result<Self, Self::Error> {
        match flag {
            1 => Ok(Self::ToNative),
            -1 => Ok(Self::ToAscending),
            _ => Err(ArgError::DirectionFlag(flag)),
        }
    }
}

impl FromStr for Direction {
    type Err = ArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "to-native" | "native" => Ok(Self::ToNative),
            "to-ascending" | "ascending" => Ok(Self::ToAscending),
            _ => Err(ArgError::DirectionName(s.to_string())),
        }
    }
}

// ascending index of the zero coordinate, which native order rotates to the
// front
fn zero_index(n: usize) -> usize { n / 2 - 1 }

/// Return a reordered copy of `f`.
///
/// This is pure data movement: applying [`Direction::ToNative`] and then
/// [`Direction::ToAscending`] (or vice versa) recovers `f` exactly. Fails with
/// [`ArgError::GridSize`] if the length of `f` is zero or odd.
pub fn reorder<S, A>(f: &Arr1<S>, dir: Direction) -> GPResult<nd::Array1<A>>
where
    S: nd::Data<Elem = A>,
    A: Clone,
{
    let n = f.len();
    ArgError::check_grid_size(n)?;
    let s = zero_index(n);
    let reordered: nd::Array1<A>
        = match dir {
            Direction::ToNative => {
                (0..n).map(|i| f[(i + s) % n].clone()).collect()
            },
            Direction::ToAscending => {
                (0..n).map(|j| f[(j + n - s) % n].clone()).collect()
            },
        };
    Ok(reordered)
}

/// Like [`reorder`], but with the direction given as an integer flag (see
/// [`Direction`]'s `TryFrom<i64>` impl) and the expected length given
/// explicitly.
pub fn reorder_flag<S, A>(f: &Arr1<S>, n: usize, flag: i64)
    -> GPResult<nd::Array1<A>>
where
    S: nd::Data<Elem = A>,
    A: Clone,
{
    LengthError::check_len(f, n)?;
    reorder(f, Direction::try_from(flag)?)
}

/// Shorthand for [`reorder`] with [`Direction::ToNative`].
pub fn to_native<S, A>(f: &Arr1<S>) -> GPResult<nd::Array1<A>>
where
    S: nd::Data<Elem = A>,
    A: Clone,
{
    reorder(f, Direction::ToNative)
}

/// Shorthand for [`reorder`] with [`Direction::ToAscending`].
pub fn to_ascending<S, A>(f: &Arr1<S>) -> GPResult<nd::Array1<A>>
where
    S: nd::Data<Elem = A>,
    A: Clone,
{
    reorder(f, Direction::ToAscending)
}

/// Position- and momentum-space grids for a periodic domain of length
/// 2 *Z*<sub>max</sub> sampled at *N* points.
///
/// The coordinate arrays stored here are in native order; ascending copies are
/// available through [`Self::z_ascending`] and [`Self::k_ascending`].
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    /// Number of points.
    pub n: usize,
    /// Half-length of the domain.
    pub zmax: f64,
    /// Position-space spacing, 2 *Z*<sub>max</sub> / *N*.
    pub dz: f64,
    /// Momentum-space spacing, π / *Z*<sub>max</sub>.
    pub dk: f64,
    /// Largest resolvable wavenumber, *δk* ⌊*N*/2⌋.
    pub kmax: f64,
    /// Position coordinates, native order.
    pub z: nd::Array1<f64>,
    /// Momentum coordinates, native order.
    pub k: nd::Array1<f64>,
}

impl Grid {
    /// Build grids for half-length `zmax` and point count `n`.
    ///
    /// Fails with [`ArgError::GridSize`] if `n` is zero or odd and with
    /// [`ArgError::NonPositive`] if `zmax` is not a positive, finite number.
    pub fn new(zmax: f64, n: usize) -> GPResult<Self> {
        ArgError::check_grid_size(n)?;
        ArgError::check_positive("zmax", zmax)?;
        let dz = 2.0 * zmax / n as f64;
        let dk = PI / zmax;
        let kmax = dk * (n / 2) as f64;
        let z = to_native(&Self::ascending(n, zmax, dz))?;
        let k = to_native(&Self::ascending(n, kmax, dk))?;
        Ok(Self { n, zmax, dz, dk, kmax, z, k })
    }

    // uniform points covering (-max + d, max]
    fn ascending(n: usize, max: f64, d: f64) -> nd::Array1<f64> {
        (0..n).map(|j| -max + (j + 1) as f64 * d).collect()
    }

    /// Number of grid points.
    pub fn len(&self) -> usize { self.n }

    /// Always `false`; grids are validated to be non-empty.
    pub fn is_empty(&self) -> bool { self.n == 0 }

    /// Position coordinates in ascending order.
    pub fn z_ascending(&self) -> nd::Array1<f64> {
        Self::ascending(self.n, self.zmax, self.dz)
    }

    /// Momentum coordinates in ascending order.
    pub fn k_ascending(&self) -> nd::Array1<f64> {
        Self::ascending(self.n, self.kmax, self.dk)
    }

    /// Reorder an array defined on this grid from ascending to native order.
    pub fn to_native<S, A>(&self, f: &Arr1<S>) -> GPResult<nd::Array1<A>>
    where
        S: nd::Data<Elem = A>,
        A: Clone,
    {
        LengthError::check_len(f, self.n)?;
        to_native(f)
    }

    /// Reorder an array defined on this grid from native to ascending order.
    pub fn to_ascending<S, A>(&self, f: &Arr1<S>) -> GPResult<nd::Array1<A>>
    where
        S: nd::Data<Elem = A>,
        A: Clone,
    {
        LengthError::check_len(f, self.n)?;
        to_ascending(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex64 as C64;
    use crate::error::GPError;

    #[test]
    fn reorder_is_an_involution() {
        for n in [2_usize, 4, 6, 10, 64, 128] {
            let f: nd::Array1<usize> = (0..n).map(|i| 7 * i + 3).collect();
            let there = to_native(&f).unwrap();
            assert_eq!(to_ascending(&there).unwrap(), f);
            let back = to_ascending(&f).unwrap();
            assert_eq!(to_native(&back).unwrap(), f);
        }
    }

    #[test]
    fn reorder_moves_complex_values_exactly() {
        let f: nd::Array1<C64>
            = (0..16).map(|i| C64::new(0.1 * i as f64, -1.0 / (i + 1) as f64))
            .collect();
        let there = reorder(&f, Direction::ToNative).unwrap();
        let back = reorder(&there, Direction::ToNative.inverse()).unwrap();
        assert!(back.iter().zip(&f).all(|(a, b)| a == b));
    }

    #[test]
    fn reorder_leaves_input_untouched() {
        let f: nd::Array1<i32> = nd::array![1, 2, 3, 4];
        let g = to_native(&f).unwrap();
        assert_eq!(f, nd::array![1, 2, 3, 4]);
        assert_eq!(g, nd::array![2, 3, 4, 1]);
    }

    #[test]
    fn odd_and_zero_sizes_are_rejected() {
        let f: nd::Array1<f64> = nd::Array1::zeros(5);
        assert!(matches!(
            to_native(&f),
            Err(GPError::InvalidArgument(ArgError::GridSize(5)))
        ));
        assert!(matches!(
            Grid::new(1.0, 7),
            Err(GPError::InvalidArgument(ArgError::GridSize(7)))
        ));
        assert!(matches!(
            Grid::new(1.0, 0),
            Err(GPError::InvalidArgument(ArgError::GridSize(0)))
        ));
        assert!(matches!(
            Grid::new(-1.0, 8),
            Err(GPError::InvalidArgument(ArgError::NonPositive("zmax", _)))
        ));
    }

    #[test]
    fn direction_flags() {
        assert_eq!(Direction::try_from(1).unwrap(), Direction::ToNative);
        assert_eq!(Direction::try_from(-1).unwrap(), Direction::ToAscending);
        assert!(matches!(
            Direction::try_from(0),
            Err(ArgError::DirectionFlag(0))
        ));
        assert_eq!("to-native".parse::<Direction>().unwrap(), Direction::ToNative);
        assert_eq!(" Ascending".parse::<Direction>().unwrap(), Direction::ToAscending);
        assert!("sideways".parse::<Direction>().is_err());

        let f: nd::Array1<f64> = nd::Array1::linspace(0.0, 1.0, 8);
        assert!(matches!(
            reorder_flag(&f, 8, 2),
            Err(GPError::InvalidArgument(ArgError::DirectionFlag(2)))
        ));
        assert!(matches!(
            reorder_flag(&f, 6, 1),
            Err(GPError::DimensionMismatch(LengthError(8, 6)))
        ));
        assert_eq!(reorder_flag(&f, 8, 1).unwrap(), to_native(&f).unwrap());
    }

    #[test]
    fn grid_coordinates() {
        let zmax = 2.0 * PI;
        let grid = Grid::new(zmax, 128).unwrap();
        assert_eq!(grid.len(), 128);
        assert_eq!(grid.z.len(), grid.k.len());
        assert_abs_diff_eq!(grid.dz, 4.0 * PI / 128.0, epsilon = 1e-15);
        assert_abs_diff_eq!(grid.dk, 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(grid.kmax, 32.0, epsilon = 1e-12);

        let z_asc = grid.z_ascending();
        assert_abs_diff_eq!(z_asc[0], -zmax + grid.dz, epsilon = 1e-12);
        assert_abs_diff_eq!(z_asc[127], zmax, epsilon = 1e-12);
        assert!(z_asc.iter().zip(z_asc.iter().skip(1)).all(|(a, b)| a < b));

        // native order: zero first, then positives, then negatives
        assert_abs_diff_eq!(grid.z[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(grid.k[0], 0.0, epsilon = 1e-12);
        for i in 1..64 {
            assert_abs_diff_eq!(grid.k[i], i as f64 * grid.dk, epsilon = 1e-12);
            assert_abs_diff_eq!(grid.z[i], i as f64 * grid.dz, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(grid.k[64], grid.kmax, epsilon = 1e-12);
        for i in 65..128 {
            assert_abs_diff_eq!(
                grid.k[i], -((128 - i) as f64) * grid.dk, epsilon = 1e-12);
        }

        assert_eq!(grid.to_ascending(&grid.z).unwrap(), z_asc);
        assert_eq!(grid.to_ascending(&grid.k).unwrap(), grid.k_ascending());
        assert!(matches!(
            grid.to_native(&nd::Array1::<f64>::zeros(64)),
            Err(GPError::DimensionMismatch(LengthError(64, 128)))
        ));
    }
}
