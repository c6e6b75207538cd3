//! Run parameters, loadable from TOML.
//!
//! Every key is optional; missing keys take the values of the reference
//! configuration ([`Params::default`]).
//!
//! ```
//! use gpe1d::params::Params;
//!
//! let params = Params::from_toml_str(r#"
//!     npoint = 256
//!     tau = 0.05
//!
//!     [integrator]
//!     kind = "rk4"
//!     substeps = 2
//! "#).unwrap();
//! assert_eq!(params.npoint, 256);
//! assert_eq!(params.nstep, Params::default().nstep);
//! ```

use std::{ f64::consts::PI, fs, path::Path };
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ ArgError, ConfigError },
    ode::Integrator,
};

/// Scalar parameters for a single run.
///
/// All quantities are dimensionless, measured in trap units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    /// Half-length of the periodic domain.
    pub zmax: f64,
    /// Number of grid points; must be even.
    pub npoint: usize,
    /// Number of particles in the condensate.
    pub nparticle: f64,
    /// Scattering length.
    #[serde(alias = "scattering_length")]
    pub a_s: f64,
    /// Trap (angular) frequency.
    #[serde(alias = "trap_frequency")]
    pub whoz: f64,
    /// Total evolution time.
    pub evolution_time: f64,
    /// Number of (output) time steps.
    pub nstep: usize,
    /// Imaginary-time coefficient; `0` selects real-time evolution.
    pub tau: f64,
    /// Center of the initial Gaussian.
    pub center: f64,
    /// Width of the initial Gaussian.
    pub width: f64,
    /// Integration scheme used for each step.
    pub integrator: Integrator,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            zmax: 2.0 * PI,
            npoint: 128,
            nparticle: 50.0,
            a_s: 0.5,
            whoz: 1.0,
            evolution_time: 25.0,
            nstep: 5000,
            tau: 0.1,
            center: 0.0,
            width: 1.0,
            integrator: Integrator::default(),
        }
    }
}

impl Params {
    /// Parse and validate parameters from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let params: Self = toml::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    /// Read, parse, and validate parameters from a TOML file.
    pub fn from_file<P>(path: P) -> Result<Self, ConfigError>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|source| {
                ConfigError::Read { path: path.display().to_string(), source }
            })?;
        Self::from_toml_str(&s)
    }

    /// Check that all parameters are in range.
    pub fn validate(&self) -> Result<(), ArgError> {
        ArgError::check_positive("zmax", self.zmax)?;
        ArgError::check_grid_size(self.npoint)?;
        ArgError::check_finite("nparticle", self.nparticle)?;
        ArgError::check_finite("a_s", self.a_s)?;
        ArgError::check_finite("whoz", self.whoz)?;
        ArgError::check_positive("evolution_time", self.evolution_time)?;
        (self.nstep != 0).then_some(()).ok_or(ArgError::ZeroSteps)?;
        ArgError::check_finite("tau", self.tau)?;
        ArgError::check_finite("center", self.center)?;
        ArgError::check_positive("width", self.width)?;
        self.integrator.validate()?;
        Ok(())
    }

    /// Wavefunction normalization factor, 1 / (2 *Z*<sub>max</sub>).
    pub fn norm_wf(&self) -> f64 { (2.0 * self.zmax).recip() }

    /// Nonlinear coupling constant *g* = 2 *a*<sub>s</sub> *N* / (2
    /// *Z*<sub>max</sub>).
    pub fn coupling(&self) -> f64 {
        2.0 * self.a_s * self.nparticle * self.norm_wf()
    }

    /// Size of a single time step.
    pub fn dt(&self) -> f64 { self.evolution_time / self.nstep as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn reference_defaults() {
        let params = Params::default();
        params.validate().unwrap();
        assert_abs_diff_eq!(params.dt(), 0.005, epsilon = 1e-15);
        assert_abs_diff_eq!(params.coupling(), 50.0 / (4.0 * PI), epsilon = 1e-12);
        assert_eq!(Params::from_toml_str("").unwrap(), params);
    }

    #[test]
    fn partial_overrides() {
        let params = Params::from_toml_str(r#"
            scattering_length = 1.0
            nstep = 10

            [integrator]
            kind = "rka"
            epsilon = 1e-9
        "#).unwrap();
        assert_eq!(params.a_s, 1.0);
        assert_eq!(params.nstep, 10);
        assert_eq!(params.npoint, 128);
        assert_eq!(params.integrator, Integrator::Rka { epsilon: 1e-9 });

        let params = Params::from_toml_str("[integrator]\nkind = \"rk4\"").unwrap();
        assert_eq!(params.integrator, Integrator::Rk4 { substeps: 1 });
    }

    #[test]
    fn invalid_values() {
        assert!(matches!(
            Params::from_toml_str("npoint = 127"),
            Err(ConfigError::Invalid(ArgError::GridSize(127)))
        ));
        assert!(matches!(
            Params::from_toml_str("nstep = 0"),
            Err(ConfigError::Invalid(ArgError::ZeroSteps))
        ));
        assert!(matches!(
            Params::from_toml_str("width = -1.0"),
            Err(ConfigError::Invalid(ArgError::NonPositive("width", _)))
        ));
        assert!(matches!(
            Params::from_toml_str("[integrator]\nkind = \"rk4\"\nsubsteps = 0"),
            Err(ConfigError::Invalid(ArgError::ZeroSubsteps))
        ));
        assert!(matches!(
            Params::from_toml_str("npoint = \"lots\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Params::from_toml_str("bogus = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Params::from_file("/nonexistent/params.toml"),
            Err(ConfigError::Read { .. })
        ));
    }
}
