//! General-purpose integrators for real-valued systems of ordinary differential
//! equations
//! ```text
//! dy/dt = f(t, y)
//! ```
//! sampled at a series of output times.
//!
//! Two schemes are provided (see [`Integrator`]): classic fixed-step
//! fourth-order Runge-Kutta, and fourth-order Runge-Kutta with adaptive step
//! size chosen by step doubling. Neither knows anything about the
//! Gross-Pitaevskii equation; complex states are expected to be
//! [packed][crate::utils::pack] into real vectors beforehand.
//!
//! ```
//! use ndarray as nd;
//! use gpe1d::ode::{ odeint, Integrator };
//!
//! // exponential decay
//! let t: nd::Array1<f64> = nd::array![0.0, 1.0];
//! let y0: nd::Array1<f64> = nd::array![1.0];
//! let y = odeint(
//!     |_t, y: &nd::Array1<f64>| Ok(-y),
//!     &y0,
//!     &t,
//!     Integrator::Rk4 { substeps: 100 },
//! ).unwrap();
//! assert!((y[[1, 0]] - (-1.0_f64).exp()).abs() < 1e-9);
//! ```

use ndarray as nd;
use serde::{ Deserialize, Serialize };
use crate::{
    Arr1,
    RKA_MAXITERS,
    error::{ ArgError, GPError, GPResult, LengthError },
};

/// Choice of integration scheme.
///
/// Deserializes from a table tagged by `kind`, e.g.
/// ```toml
/// [integrator]
/// kind = "rka"
/// epsilon = 1e-8
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Integrator {
    /// Fixed-step RK4 taking `substeps` equal steps per output interval.
    Rk4 {
        #[serde(default = "default_substeps")]
        substeps: usize,
    },
    /// Adaptive-step RK4 with relative error bound `epsilon`.
    Rka {
        epsilon: f64,
    },
}

fn default_substeps() -> usize { 1 }

impl Default for Integrator {
    fn default() -> Self { Self::Rk4 { substeps: default_substeps() } }
}

impl Integrator {
    /// Check that the scheme's own parameters are valid.
    pub fn validate(&self) -> Result<(), ArgError> {
        match self {
            Self::Rk4 { substeps } => {
                (*substeps != 0).then_some(()).ok_or(ArgError::ZeroSubsteps)
            },
            Self::Rka { epsilon } => ArgError::check_epsilon(*epsilon),
        }
    }
}

// estimate the ratio between truncation errors at different step sizes for a
// fourth-order Runge-Kutta scheme
fn error_ratio(z: f64, w: f64, err: f64) -> f64 {
    let scale: f64 = err * (z.abs() + w.abs()) / 2.0;
    let diff: f64 = (z - w).abs();
    diff / (scale + f64::EPSILON)
}

// estimate the ratio between truncation errors at different step sizes for a
// fourth-order Runge-Kutta scheme with array values
fn error_ratio_arr<S, T>(z: &Arr1<S>, w: &Arr1<T>, err: f64) -> f64
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    z.iter().zip(w)
        .map(|(zk, wk)| error_ratio(*zk, *wk, err))
        .fold(0.0, |acc, r| if r.is_nan() || r > acc { r } else { acc })
}

// perform the operation `a + v * b` succinctly
fn array_step<S, T>(a: &Arr1<S>, v: f64, b: &Arr1<T>) -> nd::Array1<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    nd::Zip::from(a).and(b)
        .map_collect(|ak, bk| ak + v * bk)
}

// evaluate `f` and make sure it hands back something of the right shape
fn eval<F, S>(f: &mut F, t: f64, y: &Arr1<S>) -> GPResult<nd::Array1<f64>>
where
    F: FnMut(f64, &nd::Array1<f64>) -> GPResult<nd::Array1<f64>>,
    S: nd::Data<Elem = f64>,
{
    let y = y.to_owned();
    let dy = f(t, &y)?;
    LengthError::check(&dy, &y)?;
    Ok(dy)
}

// take a single RK4 step of size `h`
fn rk4_step<F, S>(f: &mut F, t: f64, y: &Arr1<S>, h: f64)
    -> GPResult<nd::Array1<f64>>
where
    F: FnMut(f64, &nd::Array1<f64>) -> GPResult<nd::Array1<f64>>,
    S: nd::Data<Elem = f64>,
{
    let k1 = eval(f, t, y)?;
    let k2 = eval(f, t + h / 2.0, &array_step(y, h / 2.0, &k1))?;
    let k3 = eval(f, t + h / 2.0, &array_step(y, h / 2.0, &k2))?;
    let k4 = eval(f, t + h, &array_step(y, h, &k3))?;
    Ok(
        nd::Zip::from(y).and(&k1).and(&k2).and(&k3).and(&k4)
            .map_collect(|yk, k1k, k2k, k3k, k4k| {
                yk + h / 6.0 * (k1k + 2.0 * (k2k + k3k) + k4k)
            })
    )
}

// take a single adaptive RK4 step *in place*, starting from a trial size `dt`
//
// returns the size of the step actually taken and the estimate for the next
fn rka_step<F>(
    f: &mut F,
    y: &mut nd::Array1<f64>,
    t: f64,
    dt: f64,
    err: f64,
) -> GPResult<(f64, f64)>
where F: FnMut(f64, &nd::Array1<f64>) -> GPResult<nd::Array1<f64>>
{
    // safety numbers -- particular to rk4
    const SAFE1: f64 = 0.9;
    const SAFE2: f64 = 4.0;

    let mut dt_try = dt;
    for _ in 0..RKA_MAXITERS {
        // take two half-sized steps
        let y_half = rk4_step(f, t, y, dt_try / 2.0)?;
        let y_half = rk4_step(f, t + dt_try / 2.0, &y_half, dt_try / 2.0)?;

        // take one full-sized step
        let y_full = rk4_step(f, t, y, dt_try)?;

        // compute the estimated local truncation error
        let er = error_ratio_arr(&y_half, &y_full, err);
        if er.is_nan() { break; }

        // estimate new step size (with safety factors)
        let dt_old = dt_try;
        let dt_new
            = if er == 0.0 {
                dt_old * SAFE2
            } else {
                (dt_old * er.powf(-0.2) * SAFE1)
                    .clamp(dt_old / SAFE2, dt_old * SAFE2)
            };

        if er < 1.0 {
            *y = y_half;
            return Ok((dt_old, dt_new));
        }
        dt_try = dt_new;
    }
    Err(GPError::RKAErrorBound)
}

// check that output times are non-empty and strictly ascending
fn check_times<S>(t: &Arr1<S>) -> Result<(), ArgError>
where S: nd::Data<Elem = f64>
{
    let ascending
        = t.iter().zip(t.iter().skip(1)).all(|(tk, tkp1)| tkp1 > tk);
    (!t.is_empty() && ascending && t.iter().all(|tk| tk.is_finite()))
        .then_some(())
        .ok_or(ArgError::BadTimes)
}

/// Integrate `dy/dt = f(t, y)` from `y(t[0]) = y0`, returning the state at
/// each of the output times `t` as the rows of a 2D array.
///
/// The first row is always `y0`. Output times must be strictly ascending. Any
/// error returned by `f` is passed through unchanged; a right-hand side
/// returning an array of the wrong length fails with
/// [`GPError::DimensionMismatch`].
pub fn odeint<F, S, U>(
    mut f: F,
    y0: &Arr1<S>,
    t: &Arr1<U>,
    integrator: Integrator,
) -> GPResult<nd::Array2<f64>>
where
    F: FnMut(f64, &nd::Array1<f64>) -> GPResult<nd::Array1<f64>>,
    S: nd::Data<Elem = f64>,
    U: nd::Data<Elem = f64>,
{
    integrator.validate()?;
    check_times(t)?;
    let mut y: nd::Array2<f64> = nd::Array2::zeros((t.len(), y0.len()));
    let mut y_temp: nd::Array1<f64> = y0.to_owned();
    y.row_mut(0).assign(y0);
    match integrator {
        Integrator::Rk4 { substeps } => {
            let iter
                = t.iter().zip(t.iter().skip(1))
                .zip(y.axis_iter_mut(nd::Axis(0)).skip(1));
            for ((&tk, &tkp1), mut ykp1) in iter {
                let h = (tkp1 - tk) / substeps as f64;
                for s in 0..substeps {
                    y_temp = rk4_step(&mut f, tk + s as f64 * h, &y_temp, h)?;
                }
                ykp1.assign(&y_temp);
            }
        },
        Integrator::Rka { epsilon } => {
            let mut dt = t[t.len() - 1] - t[0];
            let iter
                = t.iter().zip(t.iter().skip(1))
                .zip(y.axis_iter_mut(nd::Axis(0)).skip(1));
            for ((&tk, &tkp1), mut ykp1) in iter {
                let mut t_temp = tk;
                loop {
                    let remaining = tkp1 - t_temp;
                    let last = dt >= remaining;
                    let dt_trial = if last { remaining } else { dt };
                    let (used, next)
                        = rka_step(&mut f, &mut y_temp, t_temp, dt_trial, epsilon)?;
                    // don't let a truncated final step shrink the next interval
                    dt = if last && used == dt_trial { dt.max(next) } else { next };
                    if last && used == dt_trial {
                        break;
                    }
                    t_temp += used;
                }
                ykp1.assign(&y_temp);
            }
        },
    }
    Ok(y)
}
