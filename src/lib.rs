use serde::Deserialize;
use std::fs;

use anyhow::{Context, Result};
use thiserror::Error;

pub mod flds;
pub mod problems;
pub mod save;
pub mod solver;

use crate::problems::{Variant, DOMAIN_SIZE};
use crate::solver::{Physics, Solver};

// We use a type alias for f64/Float to easily support
// double and single precision.
#[cfg(feature = "sprec")]
pub type Float = f32;

#[cfg(not(feature = "sprec"))]
pub type Float = f64;

#[cfg(feature = "sprec")]
pub const E_TOL: Float = 1E-3;

#[cfg(not(feature = "sprec"))]
pub const E_TOL: Float = 1E-10;

/// Failures raised by the external collaborators. These are runtime
/// conditions surfaced to the caller, unlike precondition violations
/// (wrong domain, stepping before initializing), which abort.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("transform failure: {0}")]
    Transform(String),

    #[error("I/O failure: {0}")]
    Io(String),
}

#[derive(Deserialize)]
pub struct Config {
    pub params: Params,
    pub setup: Setup,
    pub output: Output,
}

#[derive(Deserialize)]
pub struct Params {
    pub grid_points: usize,
    pub dt: Float,
}

#[derive(Deserialize)]
pub struct Setup {
    pub n_steps: u32,
    pub variant: String,
    #[serde(default)]
    pub periods: Option<[i32; 10]>,
}

#[derive(Deserialize)]
pub struct Output {
    pub write_output: bool,
    pub output_interval: u32,
}

impl Config {
    pub fn new() -> Result<Config> {
        let contents =
            fs::read_to_string("config.toml").context("Could not open the config.toml file")?;
        toml::from_str(&contents).with_context(|| "Could not parse Config file")
    }
}

/// Square periodic grid: `points` nodes per axis over a physical length of
/// `size`. `cell_size` is always derived, never set independently.
#[derive(Debug, Clone, Copy)]
pub struct Grid {
    pub points: usize,
    pub size: Float,
    pub cell_size: Float,
}

impl Grid {
    pub fn new(points: usize, size: Float) -> Grid {
        assert!(points > 0, "grid must have at least one point per axis");
        assert!(size > 0.0, "grid must have a positive physical size");
        Grid {
            points,
            size,
            cell_size: size / points as Float,
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.points * self.points
    }
}

pub fn run(cfg: Config) -> Result<()> {
    if cfg.params.grid_points == 0 {
        return Err(anyhow::Error::msg(
            "Number of grid points per axis must be positive",
        ));
    }

    let variant = Variant::from_setup(&cfg.setup)?;
    let grid = Grid::new(cfg.params.grid_points, DOMAIN_SIZE);
    let mut solver = Solver::new(grid, cfg.params.dt, Physics::default(), variant);

    println!("initializing {}", solver.output_name());
    solver.initialize();

    for t in 0..cfg.setup.n_steps {
        solver.step();
        if cfg.output.write_output && (t + 1) % cfg.output.output_interval == 0 {
            println!("saving c at step {}", t + 1);
            let outdir = format!("output/dat_{:05}", (t + 1) / cfg.output.output_interval);
            solver.save_c(&outdir)?;
        }
    }
    Ok(())
}

/// Sets up a small solver for use in the unit tests.
pub fn build_test_solver() -> Solver {
    let mut solver = Solver::new(
        Grid::new(32, DOMAIN_SIZE),
        1.0,
        Physics::default(),
        Variant::Benchmark,
    );
    solver.initialize();
    solver
}
