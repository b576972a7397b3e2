use std::{fs, path::Path};

use log::info;

use crate::{
    data::Program,
    error::{Error, Result},
    graphics::Canvas,
};

pub fn encode_qoi(canvas: &Canvas) -> Result<Vec<u8>> {
    if canvas.is_empty() {
        return Err(Error::EmptyCanvas(canvas.width()));
    }

    let (w, h) = canvas.sizeu();

    Ok(qoi::encode_to_vec(canvas.to_rgba_bytes(), w as u32, h as u32)?)
}

/// Writes the current artwork to `path`.
pub fn write_snapshot(prog: &Program, path: &Path) -> Result<()> {
    let bytes = encode_qoi(prog.art())?;
    fs::write(path, &bytes)?;

    info!(
        "Wrote {}x{} artwork to {} ({} bytes).",
        prog.art().width(),
        prog.art().height(),
        path.display(),
        bytes.len()
    );

    Ok(())
}
