use crate::{Float, Grid};
use rayon::prelude::*;
use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;

const PI: Float = std::f64::consts::PI as Float;

/// Discrete Laplacian eigenvalues over the frequency-space grid, one per
/// wavenumber pair, stored row-major like the fields they multiply.
/// A pure function of (grid points, physical size): computed once at
/// construction and read-only afterwards, so it can be shared across every
/// timestep without locking.
pub struct Laplacian {
    eigvals: Vec<Complex<Float>>,
    n: usize,
}

/// Signed wavenumber index for FFT bin `i`: bins above N/2 wrap around to
/// negative frequencies. The Nyquist bin (even N only) maps to wavenumber
/// zero — the grid cannot represent that mode's conjugate partner, so it
/// must not contribute to the operator.
fn signed_mode(i: usize, n: usize) -> Float {
    if i > n / 2 {
        i as Float - n as Float
    } else if 2 * i == n {
        0.0
    } else {
        i as Float
    }
}

impl Laplacian {
    pub fn new(grid: &Grid) -> Laplacian {
        let n = grid.points;
        let mut eigvals = vec![Complex::zero(); grid.n_nodes()];
        let scale = (n * n) as Float / (grid.size * grid.size);

        eigvals.par_chunks_mut(n).enumerate().for_each(|(i, line)| {
            let k_x = Complex::new(0.0, 2.0 * PI / n as Float) * signed_mode(i, n);
            for (j, v) in line.iter_mut().enumerate() {
                let k_y = Complex::new(0.0, 2.0 * PI / n as Float) * signed_mode(j, n);
                *v = (k_x * k_x + k_y * k_y) * scale;
            }
        });

        Laplacian { eigvals, n }
    }

    pub fn values(&self) -> &[Complex<Float>] {
        &self.eigvals
    }

    pub fn at(&self, row: usize, col: usize) -> Complex<Float> {
        if !cfg!(feature = "unchecked") {
            assert!(row < self.n);
            assert!(col < self.n);
        }
        self.eigvals[row * self.n + col]
    }
}
