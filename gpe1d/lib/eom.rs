//! Right-hand side of the Gross-Pitaevskii equation of motion in the
//! momentum-space representation.
//!
//! The GP Hamiltonian is applied in two stages. The kinetic part is diagonal
//! in momentum space and acts by simple multiplication with ½ *k*². For the
//! rest, the state is taken to position space, where the trap and nonlinear
//! terms act pointwise as (*V* + *g* |ψ|²) ψ, and the result is brought back
//! to momentum space. Then
//! ```text
//! dc/dt = -τ (E_kin c + H_K ψ)     (τ ≠ 0, imaginary time)
//! dc/dt = -i (E_kin c + H_K ψ)     (τ = 0, real time)
//! ```
//! Imaginary time is a gradient flow on the energy; combined with
//! renormalization after every step it relaxes any state with ground-state
//! overlap into the ground state.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    error::{ GPResult, LengthError },
    system::System,
    utils::{ pack, unpack },
};

/// Apply the GP Hamiltonian to the momentum-space state `c`, returning the
/// result in momentum space.
pub fn hamiltonian<S>(sys: &System, c: &Arr1<S>) -> GPResult<nd::Array1<C64>>
where S: nd::Data<Elem = C64>
{
    LengthError::check_len(c, sys.len())?;
    let g = sys.g;
    // position-space part; H_R ψ = (V + g|ψ|²) ψ
    let mut hpsi: nd::Array1<C64> = sys.to_position(c)?;
    nd::Zip::from(&mut hpsi).and(&sys.ops.v)
        .for_each(|psik, vk| {
            let local = vk + g * psik.norm_sqr();
            *psik *= local;
        });
    // back to momentum space and add the kinetic part
    let mut hc: nd::Array1<C64> = sys.to_momentum(&hpsi)?;
    nd::Zip::from(&mut hc).and(&sys.ops.ekin).and(c)
        .for_each(|hk, ek, ck| { *hk += *ck * *ek; });
    Ok(hc)
}

/// Compute the time derivative of the momentum-space state `c`.
///
/// `tau` selects the mode of evolution: any non-zero value gives
/// imaginary-time relaxation at rate `tau`, while zero gives unitary,
/// real-time evolution.
pub fn rhs<S>(sys: &System, c: &Arr1<S>, tau: f64) -> GPResult<nd::Array1<C64>>
where S: nd::Data<Elem = C64>
{
    let factor: C64 = if tau != 0.0 { C64::from(-tau) } else { -C64::i() };
    let mut dc = hamiltonian(sys, c)?;
    dc.map_inplace(|dck| { *dck *= factor; });
    Ok(dc)
}

/// Like [`rhs`], but for a state [packed][crate::utils::pack] into a real
/// vector of length 2*N*, returning the derivative in the same layout.
///
/// This is the form consumed by the real-valued integrators in
/// [`ode`][crate::ode]. The time argument is accepted for their benefit and
/// otherwise ignored; the Hamiltonian doesn't depend on time.
pub fn rhs_packed<S>(sys: &System, _t: f64, y: &Arr1<S>, tau: f64)
    -> GPResult<nd::Array1<f64>>
where S: nd::Data<Elem = f64>
{
    let c = unpack(y, sys.len())?;
    Ok(pack(&rhs(sys, &c, tau)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::{
        energy::energies,
        error::GPError,
        params::Params,
        utils::{ gaussian, renormalize, wf_dot },
    };

    fn setup() -> (System, nd::Array1<C64>) {
        let sys = System::new(&Params::default()).unwrap();
        // off-center and with a phase gradient, so that nothing is trivially
        // real
        let psi
            = gaussian(&sys.grid.z, 0.7, 1.3)
            * sys.grid.z.mapv(|z| C64::cis(0.4 * z));
        let c = renormalize(&sys.to_momentum(&psi).unwrap()).unwrap();
        (sys, c)
    }

    #[test]
    fn expectation_of_h_is_chemical_potential() {
        let (sys, c) = setup();
        let hc = hamiltonian(&sys, &c).unwrap();
        let e = energies(&sys, &c).unwrap();
        let h = wf_dot(&c, &hc).unwrap();
        assert_abs_diff_eq!(h.re, e.mu, epsilon = 1e-9);
        assert_abs_diff_eq!(h.im, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn real_time_preserves_norm_to_first_order() {
        let (sys, c) = setup();
        let dc = rhs(&sys, &c, 0.0).unwrap();
        // d/dt ⟨c|c⟩ = 2 Re ⟨c|dc⟩
        assert_abs_diff_eq!(wf_dot(&c, &dc).unwrap().re, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn imaginary_time_descends() {
        let (sys, c) = setup();
        let tau = 0.1;
        let dc = rhs(&sys, &c, tau).unwrap();
        let e = energies(&sys, &c).unwrap();
        assert_abs_diff_eq!(
            wf_dot(&c, &dc).unwrap().re, -tau * e.mu, epsilon = 1e-9);
    }

    #[test]
    fn packed_matches_complex() {
        let (sys, c) = setup();
        for tau in [0.0, 0.1] {
            let dy = rhs_packed(&sys, 0.0, &pack(&c), tau).unwrap();
            let dc = rhs(&sys, &c, tau).unwrap();
            assert_eq!(dy.len(), 2 * sys.len());
            assert_eq!(unpack(&dy, sys.len()).unwrap(), dc);
        }
    }

    #[test]
    fn wrong_length() {
        let (sys, _) = setup();
        let y: nd::Array1<f64> = nd::Array1::zeros(sys.len());
        assert!(matches!(
            rhs_packed(&sys, 0.0, &y, 0.1),
            Err(GPError::DimensionMismatch(LengthError(128, 256)))
        ));
        let c: nd::Array1<C64> = nd::Array1::zeros(sys.len() + 2);
        assert!(matches!(
            rhs(&sys, &c, 0.1),
            Err(GPError::DimensionMismatch(_))
        ));
    }
}
