//! Energy functional of a momentum-space state.
//!
//! For a normalized state *c* (native order) with position-space counterpart
//! ψ = *N* IDFT(*c*):
//! ```text
//! E_kin = Σ_k ½ k² |c[k]|²
//! E_pot = (1/N) Σ_z V[z] |ψ[z]|²
//! E_int = (g / 2N) Σ_z |ψ[z]|⁴
//! E     = E_kin + E_pot + E_int
//! μ     = E + E_int
//! ```
//! The chemical potential counts the interaction energy twice. This is the
//! usual GP identity μ = ⟨H_GP⟩ (the nonlinear term in the Hamiltonian is
//! *g* |ψ|², twice its share of the energy functional), not a bookkeeping
//! error.

use std::fmt;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    error::{ GPResult, LengthError },
    system::System,
};

/// Energies of a state, per particle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Energies {
    /// Mean energy per particle: kinetic + potential + interaction.
    pub mean: f64,
    /// Chemical potential: mean + interaction.
    pub mu: f64,
    /// Kinetic contribution.
    pub kinetic: f64,
    /// Trap-potential contribution.
    pub potential: f64,
    /// Interaction contribution.
    pub interaction: f64,
}

impl Energies {
    /// Assemble the mean energy and chemical potential from the three
    /// contributions.
    pub fn from_parts(kinetic: f64, potential: f64, interaction: f64) -> Self {
        let mean = kinetic + potential + interaction;
        let mu = mean + interaction;
        Self { mean, mu, kinetic, potential, interaction }
    }

    /// Return `[mean, mu, kinetic, potential, interaction]`.
    pub fn to_array(&self) -> [f64; 5] {
        [self.mean, self.mu, self.kinetic, self.potential, self.interaction]
    }
}

impl fmt::Display for Energies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "E = {:.8}, mu = {:.8}, kin = {:.8}, pot = {:.8}, int = {:.8}",
            self.mean, self.mu, self.kinetic, self.potential, self.interaction,
        )
    }
}

/// Compute the [`Energies`] of the momentum-space state `c`.
///
/// Fails with [`GPError::DimensionMismatch`][crate::error::GPError] if `c`
/// doesn't match the system's grid.
pub fn energies<S>(sys: &System, c: &Arr1<S>) -> GPResult<Energies>
where S: nd::Data<Elem = C64>
{
    LengthError::check_len(c, sys.len())?;
    let n = sys.len() as f64;
    let kinetic: f64
        = nd::Zip::from(&sys.ops.ekin).and(c)
        .fold(0.0, |acc, ek, ck| acc + ek * ck.norm_sqr());
    let rho: nd::Array1<f64> = sys.density(c)?;
    let potential: f64
        = nd::Zip::from(&sys.ops.v).and(&rho)
        .fold(0.0, |acc, vk, rk| acc + vk * rk)
        / n;
    let interaction: f64
        = sys.g / (2.0 * n) * rho.iter().map(|rk| rk.powi(2)).sum::<f64>();
    Ok(Energies::from_parts(kinetic, potential, interaction))
}
