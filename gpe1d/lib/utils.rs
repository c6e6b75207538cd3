//! Miscellaneous tools: Fourier transforms, wavefunction norms, and the
//! complex ↔ real packing used at the integrator boundary.

use std::{ fmt, sync::Arc };
use ndarray as nd;
use num_complex::{ Complex64 as C64, ComplexFloat };
use num_traits::{ Float, Zero };
use rustfft as fft;
use crate::{
    Arr1,
    NORM_TOL,
    error::{ GPError, GPResult, LengthError },
};

/// Forward and inverse complex FFT plans for a fixed length.
///
/// Both transforms are unnormalized:
/// ```text
/// forward(x)[k] = Σ_j x[j] exp(-2πi jk/N)
/// inverse(x)[j] = Σ_k x[k] exp(+2πi jk/N)
/// ```
/// so that `inverse(forward(x)) == N x`.
#[derive(Clone)]
pub struct Fourier {
    n: usize,
    fwd: Arc<dyn fft::Fft<f64>>,
    inv: Arc<dyn fft::Fft<f64>>,
}

impl fmt::Debug for Fourier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fourier").field("n", &self.n).finish()
    }
}

impl Fourier {
    /// Plan transforms of length `n`.
    pub fn new(n: usize) -> Self {
        let mut plan = fft::FftPlanner::new();
        let fwd = plan.plan_fft_forward(n);
        let inv = plan.plan_fft_inverse(n);
        Self { n, fwd, inv }
    }

    /// Transform length.
    pub fn len(&self) -> usize { self.n }

    /// `true` if the transform length is zero.
    pub fn is_empty(&self) -> bool { self.n == 0 }

    // run a plan over an array, falling back to a contiguous copy if the array
    // isn't laid out in standard order
    fn process<S>(plan: &dyn fft::Fft<f64>, x: &mut Arr1<S>)
    where S: nd::DataMut<Elem = C64>
    {
        if let Some(buf) = x.as_slice_mut() {
            plan.process(buf);
        } else {
            let mut buf: Vec<C64> = x.iter().copied().collect();
            plan.process(&mut buf);
            x.iter_mut().zip(buf).for_each(|(xk, bk)| { *xk = bk; });
        }
    }

    /// Perform the unnormalized forward transform.
    pub fn forward<S>(&self, x: &Arr1<S>) -> GPResult<nd::Array1<C64>>
    where S: nd::Data<Elem = C64>
    {
        let mut f = x.to_owned();
        self.forward_inplace(&mut f)?;
        Ok(f)
    }

    /// Perform the unnormalized forward transform in place.
    pub fn forward_inplace<S>(&self, f: &mut Arr1<S>) -> GPResult<()>
    where S: nd::DataMut<Elem = C64>
    {
        LengthError::check_len(f, self.n)?;
        Self::process(self.fwd.as_ref(), f);
        Ok(())
    }

    /// Perform the unnormalized inverse transform.
    pub fn inverse<S>(&self, f: &Arr1<S>) -> GPResult<nd::Array1<C64>>
    where S: nd::Data<Elem = C64>
    {
        let mut x = f.to_owned();
        self.inverse_inplace(&mut x)?;
        Ok(x)
    }

    /// Perform the unnormalized inverse transform in place.
    pub fn inverse_inplace<S>(&self, x: &mut Arr1<S>) -> GPResult<()>
    where S: nd::DataMut<Elem = C64>
    {
        LengthError::check_len(x, self.n)?;
        Self::process(self.inv.as_ref(), x);
        Ok(())
    }
}

/// Calculate the Euclidean norm of a wavefunction.
pub fn wf_norm<S, A>(q: &Arr1<S>) -> A::Real
where
    S: nd::Data<Elem = A>,
    A: ComplexFloat,
{
    let sq
        = q.iter()
        .fold(A::Real::zero(), |acc, qk| {
            let a = ComplexFloat::abs(*qk);
            acc + a * a
        });
    Float::sqrt(sq)
}

/// Calculate the inner product ⟨q|p⟩ of two wavefunctions.
pub fn wf_dot<S, T>(q: &Arr1<S>, p: &Arr1<T>) -> GPResult<C64>
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = C64>,
{
    LengthError::check(q, p)?;
    Ok(q.iter().zip(p).map(|(qk, pk)| qk.conj() * pk).sum())
}

/// Return a copy of `q` divided by its Euclidean norm.
///
/// A warning is logged if the norm deviates from 1 by more than [`NORM_TOL`];
/// the division is performed regardless. Fails with
/// [`GPError::DegenerateState`] if the norm is zero (or not finite).
pub fn renormalize<S>(q: &Arr1<S>) -> GPResult<nd::Array1<C64>>
where S: nd::Data<Elem = C64>
{
    renormalize_tol(q, NORM_TOL)
}

/// Like [`renormalize`], but with a custom warning tolerance.
pub fn renormalize_tol<S>(q: &Arr1<S>, tol: f64) -> GPResult<nd::Array1<C64>>
where S: nd::Data<Elem = C64>
{
    let norm = wf_norm(q);
    if norm == 0.0 || !norm.is_finite() {
        return Err(GPError::DegenerateState(norm));
    }
    if (norm - 1.0).abs() > tol {
        log::warn!(
            "state norm deviates from unity by {:.3e}; renormalizing",
            norm - 1.0,
        );
    }
    Ok(q.mapv(|qk| qk / norm))
}

/// Pack a complex vector of length *N* into a real vector of length 2*N*,
/// real parts first.
pub fn pack<S>(q: &Arr1<S>) -> nd::Array1<f64>
where S: nd::Data<Elem = C64>
{
    q.iter().map(|qk| qk.re)
        .chain(q.iter().map(|qk| qk.im))
        .collect()
}

/// Undo [`pack`], expecting a packed vector of length 2`n`.
pub fn unpack<S>(y: &Arr1<S>, n: usize) -> GPResult<nd::Array1<C64>>
where S: nd::Data<Elem = f64>
{
    LengthError::check_len(y, 2 * n)?;
    let (re, im) = y.view().split_at(nd::Axis(0), n);
    Ok(
        nd::Zip::from(&re).and(&im)
            .map_collect(|rek, imk| C64::new(*rek, *imk))
    )
}

/// Sample a Gaussian `exp(-(z - center)² / (2 width²))` over `z`.
pub fn gaussian<S>(z: &Arr1<S>, center: f64, width: f64) -> nd::Array1<C64>
where S: nd::Data<Elem = f64>
{
    z.mapv(|zk| C64::from((-(zk - center).powi(2) / (2.0 * width.powi(2))).exp()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample(n: usize) -> nd::Array1<C64> {
        (0..n).map(|k| C64::new((0.3 * k as f64).sin(), 1.0 / (1.0 + k as f64)))
            .collect()
    }

    #[test]
    fn inverse_undoes_forward_up_to_n() {
        let x = sample(32);
        let four = Fourier::new(32);
        let back = four.inverse(&four.forward(&x).unwrap()).unwrap();
        for (bk, xk) in back.iter().zip(&x) {
            assert_abs_diff_eq!((bk / 32.0 - xk).norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn forward_of_constant_is_a_spike() {
        let four = Fourier::new(8);
        let f = four.forward(&nd::Array1::from_elem(8, C64::from(1.0))).unwrap();
        assert_abs_diff_eq!(f[0].re, 8.0, epsilon = 1e-12);
        assert!(f.iter().skip(1).all(|fk| fk.norm() < 1e-12));
    }

    #[test]
    fn fourier_checks_length() {
        let four = Fourier::new(8);
        assert!(matches!(
            four.forward(&sample(6)),
            Err(GPError::DimensionMismatch(LengthError(6, 8)))
        ));
    }

    #[test]
    fn fourier_handles_strided_views() {
        let x = sample(16);
        let four = Fourier::new(8);
        let strided = x.slice(nd::s![..;2]);
        let expected = four.forward(&strided.to_owned()).unwrap();
        let mut y = x.clone();
        four.forward_inplace(&mut y.slice_mut(nd::s![..;2])).unwrap();
        for (yk, ek) in y.slice(nd::s![..;2]).iter().zip(&expected) {
            assert_abs_diff_eq!((yk - ek).norm(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn renormalize_is_idempotent() {
        let q = sample(20).mapv(|qk| 3.7 * qk);
        let once = renormalize(&q).unwrap();
        let twice = renormalize(&once).unwrap();
        assert_abs_diff_eq!(wf_norm(&once), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wf_norm(&twice), 1.0, epsilon = 1e-12);
        assert_eq!(renormalize(&q).unwrap(), once);
        assert_abs_diff_eq!(wf_norm(&q), 3.7 * wf_norm(&sample(20)), epsilon = 1e-12);
    }

    // records warnings per thread so that concurrently running tests don't
    // see each other's output
    struct Capture;

    static CAPTURED: std::sync::Mutex<Vec<(std::thread::ThreadId, String)>>
        = std::sync::Mutex::new(Vec::new());

    impl log::Log for Capture {
        fn enabled(&self, _: &log::Metadata) -> bool { true }

        fn log(&self, record: &log::Record) {
            if record.level() == log::Level::Warn {
                let id = std::thread::current().id();
                CAPTURED.lock().unwrap().push((id, record.args().to_string()));
            }
        }

        fn flush(&self) { }
    }

    static CAPTURE: Capture = Capture;

    fn warnings_from<F>(f: F) -> Vec<String>
    where F: FnOnce()
    {
        // fails harmlessly if another test already installed it
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);
        let id = std::thread::current().id();
        CAPTURED.lock().unwrap().retain(|(tid, _)| *tid != id);
        f();
        CAPTURED.lock().unwrap().iter()
            .filter(|(tid, _)| *tid == id)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    #[test]
    fn renormalize_warns_on_drift() {
        let unit = renormalize(&sample(20)).unwrap();
        let far = unit.mapv(|qk| 3.7 * qk);
        let near = unit.mapv(|qk| (1.0 + 5e-5) * qk);

        let warned = warnings_from(|| { renormalize(&far).unwrap(); });
        assert_eq!(warned.len(), 1);
        assert!(warned[0].contains("norm deviates"));

        assert!(warnings_from(|| { renormalize(&near).unwrap(); }).is_empty());
        assert!(warnings_from(|| { renormalize(&unit).unwrap(); }).is_empty());

        // custom thresholds move the cutoff both ways
        assert!(warnings_from(|| { renormalize_tol(&far, 5.0).unwrap(); }).is_empty());
        assert_eq!(
            warnings_from(|| { renormalize_tol(&near, 1e-6).unwrap(); }).len(), 1);
    }

    #[test]
    fn renormalize_rejects_zero_norm() {
        let q: nd::Array1<C64> = nd::Array1::zeros(10);
        assert!(matches!(renormalize(&q), Err(GPError::DegenerateState(_))));
    }

    #[test]
    fn real_norm() {
        let q: nd::Array1<f64> = nd::array![3.0, -4.0];
        assert_abs_diff_eq!(wf_norm(&q), 5.0, epsilon = 1e-15);
    }

    #[test]
    fn pack_unpack() {
        let q = sample(5);
        let y = pack(&q);
        assert_eq!(y.len(), 10);
        assert_eq!(y[0], q[0].re);
        assert_eq!(y[5], q[0].im);
        assert_eq!(unpack(&y, 5).unwrap(), q);
        assert!(matches!(
            unpack(&y, 4),
            Err(GPError::DimensionMismatch(LengthError(10, 8)))
        ));
    }

    #[test]
    fn dot_product() {
        let q = renormalize(&sample(12)).unwrap();
        let qq = wf_dot(&q, &q).unwrap();
        assert_abs_diff_eq!(qq.re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(qq.im, 0.0, epsilon = 1e-12);
        assert!(wf_dot(&q, &sample(3)).is_err());
    }
}
