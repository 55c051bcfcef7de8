//! Involute gear outlines and spirograph curves as SVG drawings.
use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;

pub mod error;
pub mod gear;
pub mod geometry;
pub mod involute;
pub mod path;
pub mod render;
pub mod spirograph;

pub use error::{GeometryError, Result};
pub use gear::{GearParameters, GearWheel, ToothControlPoint};
pub use path::{PathCommand, PathCursor, Sweep};
pub use render::{Image, Style};
pub use spirograph::Spirograph;

/// Set up `env_logger`, showing `info` and above unless `RUST_LOG` says otherwise
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Open a fresh output file. Refuses to overwrite an existing one.
pub fn create_output(path: &Path) -> anyhow::Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    Ok(BufWriter::new(file))
}
