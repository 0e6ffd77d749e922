use crate::{Float, Grid};
use rayon::prelude::*;
use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;

/// Which representation a field's values currently hold. Arithmetic and
/// initial-condition kernels require `Space`; pointwise multiplication
/// against the spectral operator requires `Frequency`. Touching a field in
/// the wrong domain is a programming error, so the accessors panic instead
/// of returning a recoverable error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Space,
    Frequency,
}

/// A named two-channel (real, imaginary) array over the grid, stored
/// row-major as `i * N + j`, tagged with the domain its values live in.
pub struct Field {
    pub name: String,
    pub(crate) data: Vec<Complex<Float>>,
    pub(crate) domain: Domain,
    n: usize,
}

impl Field {
    pub fn new(name: &str, grid: &Grid) -> Field {
        Field {
            name: name.to_string(),
            data: vec![Complex::zero(); grid.n_nodes()],
            domain: Domain::Space,
            n: grid.points,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    fn check_domain(&self, expected: Domain) {
        assert!(
            self.domain == expected,
            "field `{}` holds {:?}-domain values, caller expects {:?}",
            self.name,
            self.domain,
            expected
        );
    }

    pub fn spatial(&self) -> &[Complex<Float>] {
        self.check_domain(Domain::Space);
        &self.data
    }

    pub fn spatial_mut(&mut self) -> &mut [Complex<Float>] {
        self.check_domain(Domain::Space);
        &mut self.data
    }

    pub fn spectral(&self) -> &[Complex<Float>] {
        self.check_domain(Domain::Frequency);
        &self.data
    }

    pub fn spectral_mut(&mut self) -> &mut [Complex<Float>] {
        self.check_domain(Domain::Frequency);
        &mut self.data
    }

    /// Single-node read; only meaningful in the space domain.
    pub fn at(&self, row: usize, col: usize) -> Complex<Float> {
        self.check_domain(Domain::Space);
        if !cfg!(feature = "unchecked") {
            assert!(row < self.n);
            assert!(col < self.n);
        }
        self.data[row * self.n + col]
    }

    /// Host-readable copy of the real channel, row-major. The values are
    /// only physically meaningful in the space domain.
    pub fn snapshot(&self) -> Vec<Float> {
        self.check_domain(Domain::Space);
        self.data.iter().map(|v| v.re).collect()
    }

    /// Replace every node with a kernel evaluated at its (row, col) index,
    /// dispatched in parallel over the grid. The previous contents are
    /// discarded, so this also reclaims a field that was parked in the
    /// frequency domain; the field is tagged space-domain afterwards.
    pub fn fill_spatial<F>(&mut self, kernel: F)
    where
        F: Fn(usize, usize) -> Complex<Float> + Sync,
    {
        let n = self.n;
        self.data
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(row, line)| {
                for (col, v) in line.iter_mut().enumerate() {
                    *v = kernel(row, col);
                }
            });
        self.domain = Domain::Space;
    }

    /// Pointwise in-place update of a frequency-domain field, dispatched in
    /// parallel over the grid.
    pub fn map_spectral<F>(&mut self, kernel: F)
    where
        F: Fn(usize, usize, Complex<Float>) -> Complex<Float> + Sync,
    {
        self.check_domain(Domain::Frequency);
        let n = self.n;
        self.data
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(row, line)| {
                for (col, v) in line.iter_mut().enumerate() {
                    *v = kernel(row, col, *v);
                }
            });
    }
}
