//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when an operation requiring arrays of a particular (or equal)
/// length encounters one of the wrong length.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }

    pub(crate) fn check_len<S, A>(a: &nd::ArrayBase<S, nd::Ix1>, n: usize)
        -> Result<(), Self>
    where S: nd::Data<Elem = A>
    {
        let na = a.len();
        (na == n).then_some(()).ok_or(Self(na, n))
    }
}

/// Returned when a function or configuration receives an invalid argument.
#[derive(Debug, Error)]
pub enum ArgError {
    /// Returned when a grid size is zero or odd, for which the order
    /// permutation is not defined.
    #[error("grid size must be a positive, even number; got {0}")]
    GridSize(usize),

    /// Returned when an integer reordering direction flag is not one of `1`
    /// (ascending → native) or `-1` (native → ascending).
    #[error("invalid reordering direction flag {0}; expected 1 or -1")]
    DirectionFlag(i64),

    /// Returned when a named reordering direction cannot be parsed.
    #[error("invalid reordering direction {0:?}; expected \"to-native\" or \"to-ascending\"")]
    DirectionName(String),

    /// Returned when a parameter that must be strictly positive (and finite)
    /// is not.
    #[error("{0} must be positive and finite; got {1}")]
    NonPositive(&'static str, f64),

    /// Returned when a parameter that must be finite is not.
    #[error("{0} must be finite; got {1}")]
    NonFinite(&'static str, f64),

    /// Returned when a run is configured with zero time steps.
    #[error("number of time steps must be greater than 0")]
    ZeroSteps,

    /// Returned when a fixed-step integrator is configured with zero sub-steps.
    #[error("number of integrator sub-steps must be greater than 0")]
    ZeroSubsteps,

    /// Returned when a non-positive `epsilon` value is encountered.
    #[error("epsilon values must be greater than 0; got {0}")]
    BadEpsilon(f64),

    /// Returned when run parameters describe a different physical system
    /// than the one they're applied to.
    #[error("parameter {0} = {1} does not match the system's value {2}")]
    SystemMismatch(&'static str, f64, f64),

    /// Returned when integrator output times are missing or not ascending.
    #[error("integrator output times must be non-empty and strictly ascending")]
    BadTimes,
}

impl ArgError {
    pub(crate) fn check_positive(name: &'static str, x: f64)
        -> Result<(), Self>
    {
        (x > 0.0 && x.is_finite()).then_some(()).ok_or(Self::NonPositive(name, x))
    }

    pub(crate) fn check_finite(name: &'static str, x: f64)
        -> Result<(), Self>
    {
        x.is_finite().then_some(()).ok_or(Self::NonFinite(name, x))
    }

    pub(crate) fn check_grid_size(n: usize) -> Result<(), Self> {
        (n != 0 && n % 2 == 0).then_some(()).ok_or(Self::GridSize(n))
    }

    pub(crate) fn check_match(name: &'static str, given: f64, expected: f64)
        -> Result<(), Self>
    {
        ((given - expected).abs() <= 1e-12 * expected.abs().max(1.0))
            .then_some(())
            .ok_or(Self::SystemMismatch(name, given, expected))
    }

    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon > 0.0).then_some(()).ok_or(Self::BadEpsilon(epsilon))
    }
}

/// Returned from grid, energy, evolution, and integrator functions.
#[derive(Debug, Error)]
pub enum GPError {
    /// [`ArgError`]
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ArgError),

    /// [`LengthError`]
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(#[from] LengthError),

    /// Returned when a state with zero (or non-finite) norm is passed to the
    /// normalizer.
    #[error("cannot normalize a state with norm {0}")]
    DegenerateState(f64),

    /// Returned when the adaptive integrator cannot satisfy its error bound.
    #[error("rka error bound could not be satisfied")]
    RKAErrorBound,
}

pub type GPResult<T> = Result<T, GPError>;

/// Returned when loading run parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when a configuration file cannot be read.
    #[error("unable to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Returned when a configuration cannot be parsed as TOML.
    #[error("unable to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// [`ArgError`]
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ArgError),
}
