use crate::flds::field::Field;
use crate::{Float, RuntimeError};
use anyhow::{Context, Result};

/// Raw dump of a field's real channel over the grid, row-major, as
/// `<outdir>/<stem>.npy`. Persistence failures surface as distinct I/O
/// failures; retrying is left to the caller.
pub(crate) fn save_field_spatial(fld: &Field, stem: &str, outdir: &str) -> Result<()> {
    let out_vec: Vec<Float> = fld.snapshot();

    std::fs::create_dir_all(outdir)
        .map_err(|e| RuntimeError::Io(e.to_string()))
        .context("Unable to create output directory")?;

    npy::to_file(format!("{}/{}.npy", outdir, stem), out_vec)
        .map_err(|e| RuntimeError::Io(e.to_string()))
        .with_context(|| format!("Could not save {} data to file", fld.name))?;

    Ok(())
}
