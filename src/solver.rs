use crate::flds::fft_2d::Fft2D;
use crate::flds::laplacian::Laplacian;
use crate::flds::Flds;
use crate::problems::Variant;
use crate::save::save_field_spatial;
use crate::{Float, Grid};
use anyhow::Result;
use rustfft::num_complex::Complex;

/// Physical constants of the free-energy functional and the mobility.
/// Immutable once the solver is built; `Default` gives the benchmark
/// values.
#[derive(Debug, Clone, Copy)]
pub struct Physics {
    pub m: Float,
    pub kappa: Float,
    pub rho: Float,
    pub c_alpha: Float,
    pub c_beta: Float,
}

impl Default for Physics {
    fn default() -> Physics {
        Physics {
            m: 5.0,
            kappa: 2.0,
            rho: 5.0,
            c_alpha: 0.3,
            c_beta: 0.7,
        }
    }
}

/// The simulation instance: owns the field set, the transform plans and the
/// spectral operator cache, and advances the order parameter one
/// semi-implicit Euler step at a time.
pub struct Solver {
    pub grid: Grid,
    pub dt: Float,
    physics: Physics,
    variant: Variant,
    flds: Flds,
    fft: Fft2D,
    laplacian: Laplacian,
    initialized: bool,
    t: u32,
}

impl Solver {
    pub fn new(grid: Grid, dt: Float, physics: Physics, variant: Variant) -> Solver {
        let flds = Flds::new(&grid);
        let fft = Fft2D::new(&grid);
        let laplacian = Laplacian::new(&grid);
        Solver {
            grid,
            dt,
            physics,
            variant,
            flds,
            fft,
            laplacian,
            initialized: false,
            t: 0,
        }
    }

    /// Fill the order parameter from the variant's initial condition and
    /// arm stepping.
    pub fn initialize(&mut self) {
        let delta = self.grid.cell_size;
        let variant = self.variant.clone();
        self.flds.c.fill_spatial(|i, j| {
            let x = delta * i as Float;
            let y = delta * j as Float;
            Complex::new(variant.initial_condition(x, y), 0.0)
        });
        self.initialized = true;
        self.t = 0;
    }

    /// Evaluate the nonlinear potential derivative at every node, in real
    /// space. The imaginary channel is normally zero there but is carried
    /// through the complex arithmetic for uniformity.
    fn calc_dfdc(&mut self) {
        let Physics {
            rho,
            c_alpha,
            c_beta,
            ..
        } = self.physics;
        let n = self.grid.points;
        let Flds { c, df_dc } = &mut self.flds;
        let c_vals = c.spatial();
        df_dc.fill_spatial(|i, j| {
            let c = c_vals[i * n + j];
            rho * (2.0 * (c - c_alpha) * (c_beta - c) * (c_beta - c)
                - 2.0 * (c_beta - c) * (c - c_alpha) * (c - c_alpha))
        });
    }

    /// One full timestep: nonlinear term in real space, then the
    /// semi-implicit Euler update in Fourier space. The nonlinear term is
    /// explicit and the surface-tension term implicit, so the stiff linear
    /// operator imposes no timestep restriction.
    pub fn step(&mut self) {
        assert!(self.initialized, "step() called before initialize()");

        self.calc_dfdc();

        // enter Fourier space:
        self.fft.forward(&mut self.flds.c);
        self.fft.forward(&mut self.flds.df_dc);

        let n = self.grid.points;
        let dt = self.dt;
        let Physics { m, kappa, .. } = self.physics;
        {
            let Flds { c, df_dc } = &mut self.flds;
            let df_hat = df_dc.spectral();
            let lap = self.laplacian.values();
            c.map_spectral(|i, j, c_hat| {
                let ind = i * n + j;
                (c_hat + dt * m * lap[ind] * df_hat[ind])
                    / (1.0 + dt * m * kappa * lap[ind] * lap[ind])
            });
        }

        // rescue the concentration values from Fourier space; df_dc stays
        // parked there and is reclaimed by the full overwrite at the start
        // of the next step.
        self.fft.inverse(&mut self.flds.c);
        self.t += 1;
    }

    /// Order-parameter value at a grid index; valid only while the field is
    /// in the space domain.
    pub fn get_c(&self, row: usize, col: usize) -> Float {
        self.flds.c.at(row, col).re
    }

    /// Host-readable copy of the whole order-parameter field (real
    /// channel), row-major.
    pub fn c_snapshot(&self) -> Vec<Float> {
        self.flds.c.snapshot()
    }

    pub fn steps_taken(&self) -> u32 {
        self.t
    }

    /// File stem encoding the variant, resolution and timestep.
    pub fn output_name(&self) -> String {
        format!(
            "{}_N{}_DT{:.3e}",
            self.variant.name(),
            self.grid.points,
            self.dt
        )
    }

    /// Save a copy of the c grid to a file under `outdir`.
    pub fn save_c(&self, outdir: &str) -> Result<()> {
        save_field_spatial(&self.flds.c, &self.output_name(), outdir)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::{build_test_solver, E_TOL};

    fn mean_c(solver: &Solver) -> Float {
        let snap = solver.c_snapshot();
        snap.iter().sum::<Float>() / snap.len() as Float
    }

    #[test]
    fn benchmark_initial_condition_at_origin() {
        // cos(0) = 1 for every term, so c(0,0) = 0.5 + 0.01 * 3
        let solver = build_test_solver();
        assert!((solver.get_c(0, 0) - 0.53).abs() < E_TOL);
        assert_eq!(solver.steps_taken(), 0);
    }

    #[test]
    #[should_panic(expected = "before initialize()")]
    fn step_before_initialize_panics() {
        let mut solver = Solver::new(
            Grid::new(16, 200.0),
            1.0,
            Physics::default(),
            Variant::Benchmark,
        );
        solver.step();
    }

    #[test]
    fn mass_is_conserved_over_steps() {
        let mut solver = build_test_solver();
        let mean0 = mean_c(&solver);
        for _ in 0..10 {
            solver.step();
        }
        assert_eq!(solver.steps_taken(), 10);
        assert!((mean_c(&solver) - mean0).abs() < 1E4 * E_TOL);
    }

    #[test]
    fn imaginary_channel_stays_small() {
        let mut solver = build_test_solver();
        for _ in 0..5 {
            solver.step();
        }
        let n = solver.grid.points;
        for i in 0..n {
            for j in 0..n {
                assert!(solver.flds.c.at(i, j).im.abs() < 1E4 * E_TOL);
            }
        }
    }

    #[test]
    fn output_name_encodes_run_parameters() {
        let solver = Solver::new(
            Grid::new(64, 200.0),
            1.0,
            Physics::default(),
            Variant::Benchmark,
        );
        assert_eq!(solver.output_name(), "benchmark_N64_DT1.000e0");
    }
}
