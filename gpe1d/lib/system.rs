//! The immutable context shared by the energy functional, the equation of
//! motion, and the evolution driver.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    error::{ ArgError, GPResult, LengthError },
    grid::Grid,
    operators::Operators,
    params::Params,
    utils::Fourier,
};

/// Grid, operator tables, coupling constant, and FFT plans for one parameter
/// set.
///
/// Built once, then only ever borrowed immutably.
#[derive(Clone, Debug)]
pub struct System {
    /// Coordinate grids.
    pub grid: Grid,
    /// Kinetic and potential tables.
    pub ops: Operators,
    /// Nonlinear coupling constant.
    pub g: f64,
    fourier: Fourier,
}

impl System {
    /// Build a system from run parameters.
    pub fn new(params: &Params) -> GPResult<Self> {
        params.validate()?;
        let grid = Grid::new(params.zmax, params.npoint)?;
        Self::from_grid(grid, params.whoz, params.coupling())
    }

    /// Build a system from an explicit grid, trap frequency, and coupling
    /// constant.
    pub fn from_grid(grid: Grid, whoz: f64, g: f64) -> GPResult<Self> {
        ArgError::check_finite("whoz", whoz)?;
        ArgError::check_finite("g", g)?;
        let ops = Operators::new(&grid, whoz);
        let fourier = Fourier::new(grid.len());
        log::debug!(
            "grid: n = {}, dz = {:.4e}, dk = {:.4e}, kmax = {:.4e}; g = {:.6}",
            grid.n, grid.dz, grid.dk, grid.kmax, g,
        );
        Ok(Self { grid, ops, g, fourier })
    }

    /// Number of grid points.
    pub fn len(&self) -> usize { self.grid.len() }

    /// Always `false`; see [`Grid::is_empty`].
    pub fn is_empty(&self) -> bool { self.grid.is_empty() }

    /// Transform a momentum-space state to position space, ψ = *N* IDFT(*c*).
    pub fn to_position<S>(&self, c: &Arr1<S>) -> GPResult<nd::Array1<C64>>
    where S: nd::Data<Elem = C64>
    {
        self.fourier.inverse(c)
    }

    /// Transform a position-space wavefunction to momentum space,
    /// *c* = DFT(ψ) / *N*.
    pub fn to_momentum<S>(&self, psi: &Arr1<S>) -> GPResult<nd::Array1<C64>>
    where S: nd::Data<Elem = C64>
    {
        let mut c = self.fourier.forward(psi)?;
        let n = self.len() as f64;
        c.map_inplace(|ck| { *ck /= n; });
        Ok(c)
    }

    /// Translate a momentum-space state by `d` in position space, i.e.
    /// ψ(*z*) → ψ(*z* - *d*), by multiplying each mode by exp(-*i* *k* *d*).
    ///
    /// The Nyquist mode at native index *N*/2 stands for both +*K*_max and
    /// -*K*_max, so it gets the real phase cos(*K*_max *d*) instead. The result
    /// is an exact translation when `d` is a multiple of the grid spacing.
    pub fn translate<S>(&self, c: &Arr1<S>, d: f64) -> GPResult<nd::Array1<C64>>
    where S: nd::Data<Elem = C64>
    {
        ArgError::check_finite("d", d)?;
        LengthError::check_len(c, self.len())?;
        let nyquist = self.len() / 2;
        Ok(
            c.iter().zip(&self.grid.k).enumerate()
                .map(|(j, (ck, kk))| {
                    if j == nyquist {
                        *ck * (kk * d).cos()
                    } else {
                        *ck * C64::cis(-kk * d)
                    }
                })
                .collect()
        )
    }

    /// Position-space density |ψ|² of a momentum-space state, in native
    /// order.
    pub fn density<S>(&self, c: &Arr1<S>) -> GPResult<nd::Array1<f64>>
    where S: nd::Data<Elem = C64>
    {
        Ok(self.to_position(c)?.mapv(|psik| psik.norm_sqr()))
    }

    /// Like [`Self::density`], but in ascending order to accompany
    /// [`Grid::z_ascending`].
    pub fn density_ascending<S>(&self, c: &Arr1<S>) -> GPResult<nd::Array1<f64>>
    where S: nd::Data<Elem = C64>
    {
        self.grid.to_ascending(&self.density(c)?)
    }
}
