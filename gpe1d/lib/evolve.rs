//! The evolution driver: owns the state and steps it through time, recording
//! energies along the way.
//!
//! Each step integrates the [equation of motion][crate::eom] over one interval
//! of length *Δt* = `evolution_time / nstep` with the configured
//! [integrator][crate::ode], renormalizes the result, and appends a
//! [`Sample`] to the [`History`]. The loop always runs the full number of
//! steps; the change in energy over the final step is reported as a
//! convergence diagnostic.
//!
//! ```text
//! Initialized --step--> Stepping --step (nstep-th)--> Finished
//! ```

use std::fmt;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    energy::{ energies, Energies },
    eom::rhs_packed,
    error::{ ArgError, GPResult, LengthError },
    ode::{ odeint, Integrator },
    params::Params,
    system::System,
    utils::{ gaussian, pack, renormalize, unpack, wf_norm },
};

/// Build the initial state: a Gaussian of the given center and width in
/// position space, taken to momentum space and normalized.
pub fn initial_state(sys: &System, center: f64, width: f64)
    -> GPResult<nd::Array1<C64>>
{
    ArgError::check_finite("center", center)?;
    ArgError::check_positive("width", width)?;
    let psi = gaussian(&sys.grid.z, center, width);
    renormalize(&sys.to_momentum(&psi)?)
}

/// A single entry in the energy history.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    /// Evolution time.
    pub t: f64,
    /// Norm of the state at the end of the step, before renormalization.
    pub norm: f64,
    /// Energies of the (renormalized) state.
    pub e: Energies,
}

/// Append-only record of [`Sample`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    samples: Vec<Sample>,
}

impl History {
    /// Create a new, empty history.
    pub fn new() -> Self { Self::default() }

    /// Add a sample to the end of the record.
    pub fn push(&mut self, sample: Sample) { self.samples.push(sample); }

    /// Number of samples.
    pub fn len(&self) -> usize { self.samples.len() }

    /// `true` if no samples have been recorded.
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    /// View all samples in order.
    pub fn samples(&self) -> &[Sample] { &self.samples }

    /// Return the first sample, if any.
    pub fn first(&self) -> Option<&Sample> { self.samples.first() }

    /// Return the most recent sample, if any.
    pub fn last(&self) -> Option<&Sample> { self.samples.last() }

    /// Change in mean energy between the last two samples, if there are at
    /// least two.
    pub fn last_change(&self) -> Option<f64> {
        let n = self.samples.len();
        (n >= 2).then(|| self.samples[n - 1].e.mean - self.samples[n - 2].e.mean)
    }

    /// Sample times.
    pub fn times(&self) -> nd::Array1<f64> {
        self.samples.iter().map(|s| s.t).collect()
    }

    /// Pre-renormalization norms.
    pub fn norms(&self) -> nd::Array1<f64> {
        self.samples.iter().map(|s| s.norm).collect()
    }

    /// Energies as an *M* × 5 array with columns ordered as in
    /// [`Energies::to_array`].
    pub fn energies(&self) -> nd::Array2<f64> {
        let mut arr: nd::Array2<f64> = nd::Array2::zeros((self.len(), 5));
        arr.outer_iter_mut().zip(&self.samples)
            .for_each(|(mut row, s)| {
                row.assign(&nd::ArrayView1::from(&s.e.to_array()[..]));
            });
        arr
    }
}

/// Stage of an [`Evolution`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Initial state prepared; no steps taken yet.
    Initialized,
    /// At least one, but not all, steps taken.
    Stepping,
    /// All steps taken.
    Finished,
}

/// Summary of a run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Report {
    /// Energies of the initial state.
    pub initial: Energies,
    /// Energies of the current (final, if finished) state.
    pub last: Energies,
    /// Change in mean energy over the most recent step; zero before the first
    /// step.
    pub change: f64,
    /// Number of steps taken.
    pub steps: usize,
    /// Current evolution time.
    pub t: f64,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "initial: {}", self.initial)?;
        writeln!(f, "final:   {}", self.last)?;
        write!(
            f,
            "after {} steps (t = {:.4}), last-step energy change: {:.3e}",
            self.steps, self.t, self.change,
        )
    }
}

/// Drives a state through `nstep` steps of size `dt`.
#[derive(Clone, Debug)]
pub struct Evolution<'a> {
    sys: &'a System,
    tau: f64,
    dt: f64,
    nstep: usize,
    integrator: Integrator,
    steps: usize,
    c: nd::Array1<C64>,
    initial: Energies,
    history: History,
    stage: Stage,
}

impl<'a> Evolution<'a> {
    /// Set up a run as described by `params`, starting from the Gaussian
    /// [initial state][initial_state].
    ///
    /// `params` must describe the same system as `sys`: the grid size, domain
    /// half-length, trap frequency, and coupling constant are all checked.
    pub fn new(sys: &'a System, params: &Params) -> GPResult<Self> {
        params.validate()?;
        (params.npoint == sys.len()).then_some(())
            .ok_or(LengthError(params.npoint, sys.len()))?;
        ArgError::check_match("zmax", params.zmax, sys.grid.zmax)?;
        ArgError::check_match("whoz", params.whoz, sys.ops.whoz)?;
        ArgError::check_match("coupling", params.coupling(), sys.g)?;
        let c0 = initial_state(sys, params.center, params.width)?;
        Self::with_state(
            sys, &c0, params.tau, params.dt(), params.nstep, params.integrator)
    }

    /// Set up a run from an arbitrary momentum-space state, which is
    /// normalized first.
    pub fn with_state<S>(
        sys: &'a System,
        c0: &Arr1<S>,
        tau: f64,
        dt: f64,
        nstep: usize,
        integrator: Integrator,
    ) -> GPResult<Self>
    where S: nd::Data<Elem = C64>
    {
        ArgError::check_finite("tau", tau)?;
        ArgError::check_positive("dt", dt)?;
        (nstep != 0).then_some(()).ok_or(ArgError::ZeroSteps)?;
        integrator.validate()?;
        LengthError::check_len(c0, sys.len())?;
        let norm = wf_norm(c0);
        let c = renormalize(c0)?;
        let initial = energies(sys, &c)?;
        let mut history = History::new();
        history.push(Sample { t: 0.0, norm, e: initial });
        log::info!(
            "{} evolution over {} steps of dt = {:.3e}; initial {}",
            if tau != 0.0 { "imaginary-time" } else { "real-time" },
            nstep, dt, initial,
        );
        Ok(Self {
            sys,
            tau,
            dt,
            nstep,
            integrator,
            steps: 0,
            c,
            initial,
            history,
            stage: Stage::Initialized,
        })
    }

    /// Current stage.
    pub fn stage(&self) -> Stage { self.stage }

    /// Current (normalized, momentum-space) state.
    pub fn state(&self) -> &nd::Array1<C64> { &self.c }

    /// Current evolution time.
    pub fn time(&self) -> f64 { self.steps as f64 * self.dt }

    /// Number of steps taken so far.
    pub fn steps(&self) -> usize { self.steps }

    /// Energy history, starting with the initial state.
    pub fn history(&self) -> &History { &self.history }

    /// The system being evolved.
    pub fn system(&self) -> &'a System { self.sys }

    /// Take a single step, returning the new sample, or `None` if the run is
    /// already finished.
    pub fn step(&mut self) -> GPResult<Option<Sample>> {
        if self.stage == Stage::Finished { return Ok(None); }
        let sys = self.sys;
        let tau = self.tau;
        let t: nd::Array1<f64> = nd::array![0.0, self.dt];
        let y = odeint(
            |tk, yk| rhs_packed(sys, tk, yk, tau),
            &pack(&self.c),
            &t,
            self.integrator,
        )?;
        let c = unpack(&y.row(1), sys.len())?;
        let norm = wf_norm(&c);
        let c = renormalize(&c)?;
        let e = energies(sys, &c)?;
        self.c = c;
        self.steps += 1;
        let sample = Sample { t: self.time(), norm, e };
        self.history.push(sample);
        log::trace!("step {}: t = {:.4}, {}", self.steps, sample.t, e);
        self.stage
            = if self.steps >= self.nstep {
                Stage::Finished
            } else {
                Stage::Stepping
            };
        Ok(Some(sample))
    }

    /// Take all remaining steps and return a [`Report`].
    pub fn run(&mut self) -> GPResult<Report> {
        while self.step()?.is_some() { }
        let report = self.report();
        log::info!(
            "finished at t = {:.4}; final {}; last-step change {:.3e}",
            report.t, report.last, report.change,
        );
        Ok(report)
    }

    /// Summarize the run so far.
    pub fn report(&self) -> Report {
        Report {
            initial: self.initial,
            last: self.history.last().map(|s| s.e).unwrap_or(self.initial),
            change: self.history.last_change().unwrap_or(0.0),
            steps: self.steps,
            t: self.time(),
        }
    }

    /// Consume `self`, returning the final state and the history.
    pub fn into_parts(self) -> (nd::Array1<C64>, History) {
        (self.c, self.history)
    }
}
