//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Units and parameters](#units-and-parameters)
//! - [Grids and ordering](#grids-and-ordering)
//! - [The pseudo-spectral equation of motion](#the-pseudo-spectral-equation-of-motion)
//! - [Imaginary time](#imaginary-time)
//! - [Energies](#energies)
//!
//! # Background
//! A dilute Bose gas at zero temperature is described, at the mean-field level,
//! by a single condensate wavefunction ψ obeying the Gross-Pitaevskii (GP)
//! equation[^1]. In one dimension and natural units (*ħ* = *m* = 1),
//! ```text
//!   ∂ψ      1 ∂²ψ
//! i -- = - --- --- + V(z) ψ + g |ψ|² ψ
//!   ∂t      2 ∂z²
//! ```
//! which is the Schrödinger equation with an extra, density-dependent potential
//! *g* |ψ|² accounting for contact interactions between the atoms. Here the
//! external potential is a harmonic trap,
//! ```text
//!        1
//! V(z) = - ω² z²
//!        2
//! ```
//! The nonlinearity rules out the usual eigenvalue machinery; instead, the
//! ground state is found by relaxation, and dynamics by direct integration.
//!
//! # Units and parameters
//! Lengths are in units of the trap's oscillator length and energies in units
//! of *ħ* *ω*. The coupling constant follows from the *s*-wave scattering
//! length *a*<sub>*s*</sub> and the particle number *N*<sub>*p*</sub>, with the
//! wavefunction normalized over the box [-*Z*<sub>max</sub>,
//! *Z*<sub>max</sub>):
//! ```text
//!     2 a_s N_p
//! g = ---------
//!      2 Z_max
//! ```
//! For the default parameters (*Z*<sub>max</sub> = 2π, *a*<sub>*s*</sub> = 0.5,
//! *N*<sub>*p*</sub> = 50) this gives *g* ≈ 3.979.
//!
//! # Grids and ordering
//! The domain is periodic with *N* (even) points,
//! ```text
//! Δz = 2 Z_max / N
//! Δk = π / Z_max
//! K_max = Δk N / 2
//! ```
//! In ascending order, *z*<sub>*j*</sub> = -*Z*<sub>max</sub> + (*j* + 1) Δ*z*
//! for *j* = 0, ..., *N* - 1, and likewise for *k*. The discrete Fourier
//! transform, however, wants its samples in "native" order: the zero mode
//! first, then positive frequencies, then the negative ones.
//! ```text
//! ascending:  -Z+Δz  ...  -Δz   0   Δz  ...  Z-Δz   Z
//!                          \     \              \   \
//! native:      0   Δz  ...  Z-Δz   Z   -Z+Δz  ...  -Δz
//! ```
//! Native index *N*/2 holds the boundary point ±*Z*<sub>max</sub> (resp.
//! ±*K*<sub>max</sub>), which is a single point of the periodic domain. The two
//! orderings are related by a cyclic shift:
//! ```text
//! native[i] = ascending[(i + N/2 - 1) mod N]
//! ascending[j] = native[(j + N/2 + 1) mod N]
//! ```
//! Everything is computed in native order; ascending order is only needed when
//! presenting results.
//!
//! # The pseudo-spectral equation of motion
//! The state is held as momentum-space coefficients *c*, related to the
//! position-space wavefunction by
//! ```text
//! ψ = N IDFT(c)        c = DFT(ψ) / N
//! ```
//! where IDFT is the unnormalized inverse transform, so that Σ |*c*|² = (1/*N*)
//! Σ |ψ|². The kinetic operator is diagonal in momentum space and the trap and
//! interaction terms are diagonal in position space, so the action of the GP
//! Hamiltonian splits into
//! ```text
//! H c = E_kin c + DFT[ (V + g |ψ|²) ψ ] / N
//!       ^^^^^^^   ^^^^^^^^^^^^^^^^^^^^^^^^^^
//!       pointwise         H_K ψ
//! ```
//! costing two FFTs per evaluation rather than a dense matrix product[^2]. The
//! spatial derivatives are exact for every resolved mode, so accuracy is
//! limited only by the grid's bandwidth and the time integrator.
//!
//! The resulting system of ordinary differential equations is integrated with
//! the classic fourth-order Runge-Kutta scheme, either with a fixed number of
//! sub-steps per output step or adaptively via step doubling[^3]. The
//! integrators work on real vectors, so complex states are packed as
//! `[re..., im...]`.
//!
//! # Imaginary time
//! Substituting *t* → -*i* τ *t* turns the Schrödinger equation into a
//! diffusion equation,
//! ```text
//! dc
//! -- = -τ H c
//! dt
//! ```
//! under which every eigencomponent decays as exp(-τ *E* *t*). Excited states
//! decay faster than the ground state, so after renormalizing the state at
//! every step, only the ground-state component survives. For the nonlinear
//! problem this is a normalized gradient flow on the energy functional: the
//! mean energy decreases monotonically (up to discretization error) and the
//! flow stops at a stationary point, which is the ground state for any initial
//! state with non-zero overlap with it.
//!
//! With τ = 0, the same code instead applies
//! ```text
//! dc
//! -- = -i H c
//! dt
//! ```
//! which is unitary, conserving both the norm and the energy.
//!
//! # Energies
//! For a normalized state,
//! ```text
//! E_kin = Σ ½ k² |c|²
//! E_pot = (1/N) Σ V |ψ|²
//! E_int = (g / 2N) Σ |ψ|⁴
//! E     = E_kin + E_pot + E_int
//! μ     = E + E_int
//! ```
//! The factor ½ on the interaction energy reflects that the nonlinear term in
//! the equation of motion is the functional derivative of the energy: counting
//! each pair of particles once in *E* means it appears twice in the chemical
//! potential μ = ⟨ψ| *H* |ψ⟩. At the ground state, μ is the eigenvalue of the
//! stationary GP equation *H* ψ = μ ψ.
//!
//! [^1]: L. Pitaevskii and S. Stringari, *Bose-Einstein Condensation and
//! Superfluidity*. Oxford University Press (2016).
//!
//! [^2]: B. Fornberg, *A Practical Guide to Pseudospectral Methods*. Cambridge
//! University Press (1996).
//!
//! [^3]: W. H. Press, S. A. Teukolsky, W. T. Vetterling, and B. P. Flannery,
//! *Numerical Recipes*, 3rd ed. Cambridge University Press (2007), §17.2.
