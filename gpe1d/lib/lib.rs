#![allow(non_snake_case)]

//! Provides a pseudo-spectral solver for the one-dimensional Gross-Pitaevskii
//! (GP) equation on a periodic domain, aimed at finding the ground state of a
//! harmonically trapped, interacting Bose gas through imaginary-time
//! relaxation, or at following its unitary dynamics in real time.
//!
//! The state is held in momentum space (in the native ordering of the discrete
//! Fourier transform), where the kinetic operator is diagonal; the trap and
//! contact-interaction terms are applied in position space, where they are
//! diagonal instead. Each evaluation of the equation of motion therefore hops
//! between the two representations via the FFT.
//!
//! Components, leaves first:
//! - [`grid`]: coordinate grids and the ascending/native order permutation
//! - [`operators`]: the diagonal kinetic and trap-potential tables
//! - [`system`]: the immutable context bundling the above with the coupling
//!   constant and Fourier plans
//! - [`energy`]: kinetic, potential, interaction, mean, and chemical-potential
//!   energies of a state
//! - [`eom`]: the GP right-hand side in real or imaginary time
//! - [`ode`]: general-purpose fixed-step and adaptive RK4 integrators
//! - [`evolve`]: the time loop with renormalization and energy history
//!
//! Run parameters are read from TOML through [`params`]. See [`docs`] for
//! theoretical background.
//!
//! ```no_run
//! use gpe1d::{ params::Params, system::System, evolve::Evolution };
//!
//! let params = Params::default();
//! let system = System::new(&params).unwrap();
//! let mut evol = Evolution::new(&system, &params).unwrap();
//! let report = evol.run().unwrap();
//! println!("{}", report);
//! ```

pub mod error;
pub mod grid;
pub mod params;
pub mod operators;
pub mod system;
pub mod energy;
pub mod eom;
pub mod ode;
pub mod evolve;
pub mod utils;

pub mod docs;

/// Allowed deviation of a state's norm from unity before
/// [`renormalize`][utils::renormalize] emits a warning.
pub const NORM_TOL: f64 = 1e-4;

pub(crate) const RKA_MAXITERS: usize = 100;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
