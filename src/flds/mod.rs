pub mod fft_2d;
pub mod field;
pub mod laplacian;

use crate::flds::field::Field;
use crate::Grid;

/// The named fields the solver evolves: the order parameter `c` and the
/// nonlinear potential derivative `df_dc`. Each carries its own domain tag,
/// so the set never holds an ambiguous mix silently.
pub struct Flds {
    pub c: Field,
    pub df_dc: Field,
}

impl Flds {
    pub fn new(grid: &Grid) -> Flds {
        Flds {
            c: Field::new("c", grid),
            df_dc: Field::new("df_dc", grid),
        }
    }
}
