use crate::flds::field::{Domain, Field};
use crate::{Float, Grid};
use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;
use rustfft::FftPlanner;

/// Wrapper around the external transform engine. Owns the planned
/// transforms and scratch buffers for an N x N grid and mediates every
/// space <-> frequency transition, keeping the field's domain tag honest.
pub struct Fft2D {
    n: usize,
    fft: std::sync::Arc<dyn rustfft::Fft<Float>>,
    ifft: std::sync::Arc<dyn rustfft::Fft<Float>>,
    fwd_scratch: Vec<Complex<Float>>,
    inv_scratch: Vec<Complex<Float>>,
    wrkspace: Vec<Complex<Float>>,
}

impl Fft2D {
    pub fn new(grid: &Grid) -> Fft2D {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(grid.points);
        let ifft = planner.plan_fft_inverse(grid.points);
        let fwd_scratch = vec![Complex::zero(); fft.get_outofplace_scratch_len()];
        let inv_scratch = vec![Complex::zero(); ifft.get_outofplace_scratch_len()];
        let wrkspace = vec![Complex::zero(); grid.n_nodes()];

        Fft2D {
            n: grid.points,
            fft,
            ifft,
            fwd_scratch,
            inv_scratch,
            wrkspace,
        }
    }

    fn transpose(in_vec: &[Complex<Float>], out_vec: &mut [Complex<Float>], n: usize) {
        // check to make sure the two slices are the same square size
        if !cfg!(feature = "unchecked") {
            assert!(in_vec.len() == out_vec.len());
            assert!(n * n == in_vec.len());
        }
        for i in 0..n {
            for j in 0..n {
                unsafe {
                    // If you don't trust this unsafe section,
                    // run the code without the unchecked feature
                    // len(out_vec) == len(in_vec)
                    // && n * n == len(out_vec)
                    *out_vec.get_unchecked_mut(j * n + i) = *in_vec.get_unchecked(i * n + j);
                }
                // bounds checked version
                // out_vec[j * n + i] = in_vec[i * n + j];
            }
        }
    }

    /// Row transforms, transpose, row transforms again, transpose back:
    /// a full 2-D transform built from the engine's 1-D plans.
    fn apply(
        plan: &std::sync::Arc<dyn rustfft::Fft<Float>>,
        data: &mut [Complex<Float>],
        wrkspace: &mut [Complex<Float>],
        scratch: &mut [Complex<Float>],
        n: usize,
    ) {
        for iy in (0..n * n).step_by(n) {
            plan.process_outofplace_with_scratch(
                &mut data[iy..iy + n],
                &mut wrkspace[iy..iy + n],
                scratch,
            );
        }
        Fft2D::transpose(wrkspace, data, n);
        for iy in (0..n * n).step_by(n) {
            plan.process_outofplace_with_scratch(
                &mut data[iy..iy + n],
                &mut wrkspace[iy..iy + n],
                scratch,
            );
        }
        Fft2D::transpose(wrkspace, data, n);
    }

    /// SPACE -> FREQUENCY. Transforming a field that is already in the
    /// frequency domain is a precondition violation and aborts.
    pub fn forward(&mut self, fld: &mut Field) {
        assert!(
            fld.domain() == Domain::Space,
            "fft forward: field `{}` is already in the frequency domain",
            fld.name
        );
        if !cfg!(feature = "unchecked") {
            assert_eq!(fld.data.len(), self.n * self.n);
        }
        Fft2D::apply(
            &self.fft,
            &mut fld.data,
            &mut self.wrkspace,
            &mut self.fwd_scratch,
            self.n,
        );
        fld.domain = Domain::Frequency;
    }

    /// FREQUENCY -> SPACE, applying the 1/N^2 normalization the engine
    /// leaves to the caller. Must be applied exactly once per inverse.
    pub fn inverse(&mut self, fld: &mut Field) {
        assert!(
            fld.domain() == Domain::Frequency,
            "fft inverse: field `{}` is already in the space domain",
            fld.name
        );
        if !cfg!(feature = "unchecked") {
            assert_eq!(fld.data.len(), self.n * self.n);
        }
        Fft2D::apply(
            &self.ifft,
            &mut fld.data,
            &mut self.wrkspace,
            &mut self.inv_scratch,
            self.n,
        );

        let norm = ((self.n * self.n) as Float).powi(-1);
        for v in fld.data.iter_mut() {
            *v *= norm;
        }
        fld.domain = Domain::Space;
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::{Grid, E_TOL};
    use rand::prelude::*;
    use rand_distr::StandardNormal;

    const PI: Float = std::f64::consts::PI as Float;

    fn build_test_grid() -> Grid {
        Grid::new(24, 200.0)
    }

    #[test]
    fn constant_field_concentrates_at_zero_mode() {
        let grid = build_test_grid();
        let mut fld = Field::new("c", &grid);
        let mut fft_2d = Fft2D::new(&grid);
        fld.fill_spatial(|_, _| Complex::new(0.53, 0.0));

        fft_2d.forward(&mut fld);
        assert_eq!(fld.domain(), Domain::Frequency);

        let n_nodes = (24 * 24) as Float;
        let spectral = fld.spectral();
        assert!((spectral[0].re - 0.53 * n_nodes).abs() < E_TOL * n_nodes);
        assert!(spectral[0].im.abs() < E_TOL * n_nodes);
        for v in spectral.iter().skip(1) {
            assert!(v.norm() < E_TOL * n_nodes);
        }
    }

    #[test]
    fn single_row_mode_lands_in_matching_bins() {
        // cos(2 pi i / N) along the row index must excite exactly the
        // (1, 0) and (N-1, 0) bins, each with weight N^2 / 2. This pins the
        // row-major layout to the operator's wavenumber indexing.
        let grid = build_test_grid();
        let n = grid.points;
        let mut fld = Field::new("c", &grid);
        let mut fft_2d = Fft2D::new(&grid);
        fld.fill_spatial(|row, _| {
            Complex::new((2.0 * PI * row as Float / n as Float).cos(), 0.0)
        });

        fft_2d.forward(&mut fld);
        let expected = (n * n) as Float / 2.0;
        let spectral = fld.spectral();
        for (ind, v) in spectral.iter().enumerate() {
            if ind == n || ind == (n - 1) * n {
                assert!((v.re - expected).abs() < E_TOL * expected);
                assert!(v.im.abs() < E_TOL * expected);
            } else {
                assert!(v.norm() < E_TOL * (n * n) as Float);
            }
        }
    }

    #[test]
    fn roundtrip_recovers_arbitrary_content() {
        let grid = build_test_grid();
        let n = grid.points;
        let mut rng = thread_rng();
        let noise: Vec<Float> = (0..n * n).map(|_| rng.sample(StandardNormal)).collect();

        let mut fld = Field::new("c", &grid);
        let mut fft_2d = Fft2D::new(&grid);
        fld.fill_spatial(|row, col| Complex::new(noise[row * n + col], 0.0));

        fft_2d.forward(&mut fld);
        fft_2d.inverse(&mut fld);

        assert_eq!(fld.domain(), Domain::Space);
        for (v, expected) in fld.spatial().iter().zip(noise.iter()) {
            assert!((v.re - expected).abs() < 1E3 * E_TOL);
            assert!(v.im.abs() < 1E3 * E_TOL);
        }
    }

    #[test]
    #[should_panic(expected = "already in the frequency domain")]
    fn double_forward_panics() {
        let grid = build_test_grid();
        let mut fld = Field::new("c", &grid);
        let mut fft_2d = Fft2D::new(&grid);
        fft_2d.forward(&mut fld);
        fft_2d.forward(&mut fld);
    }

    #[test]
    #[should_panic(expected = "already in the space domain")]
    fn inverse_of_spatial_field_panics() {
        let grid = build_test_grid();
        let mut fld = Field::new("c", &grid);
        let mut fft_2d = Fft2D::new(&grid);
        fft_2d.inverse(&mut fld);
    }
}
