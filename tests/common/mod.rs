use spinodal_rs::problems::{Variant, DOMAIN_SIZE};
use spinodal_rs::solver::{Physics, Solver};
use spinodal_rs::{Float, Grid};

// This sets up a small simulation so that it can be used in testing;
// the grid is kept coarse to keep the runs fast.
pub fn setup_solver(grid_points: usize, dt: Float, variant: Variant) -> Solver {
    let mut solver = Solver::new(
        Grid::new(grid_points, DOMAIN_SIZE),
        dt,
        Physics::default(),
        variant,
    );
    solver.initialize();
    solver
}

pub fn mean_c(solver: &Solver) -> Float {
    let snap = solver.c_snapshot();
    snap.iter().sum::<Float>() / snap.len() as Float
}
