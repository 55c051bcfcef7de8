//! Draws every spirograph listed in a `.spiro` file into one SVG.
//!
//! A `.spiro` file is a JSON array of objects with the keys `ring`, `wheel` and optionally
//! `excenter` (0.8), `offset` (0) and `samples` (1). Any other key is copied onto the drawn path
//! as an SVG attribute, e.g. `"stroke": "red"`.
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gearpath::{create_output, init_logging, Image, Spirograph, Style};
use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "spiro_tool",
    about = "Generates spirograph SVG files from .spiro files"
)]
struct Opt {
    /// Input .spiro file; the drawing is written next to it with an .svg extension
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn default_excenter() -> f64 {
    0.8
}

fn default_samples() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
struct Entry {
    ring: i64,
    wheel: i64,
    #[serde(default = "default_excenter")]
    excenter: f64,
    #[serde(default)]
    offset: i64,
    #[serde(default = "default_samples")]
    samples: u32,
    #[serde(flatten)]
    attributes: BTreeMap<String, Value>,
}

impl Entry {
    fn spirograph(&self) -> gearpath::Result<Spirograph> {
        Spirograph::new(
            self.ring,
            self.wheel,
            self.excenter,
            self.offset,
            self.samples,
        )
    }

    fn style(&self) -> Style {
        self.attributes
            .iter()
            .fold(Style::thick(), |style, (name, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                style.with_attribute(name.as_str(), value)
            })
    }
}

/// `drawing.spiro` becomes `drawing.svg`, anything else gets `.svg` appended
fn output_path(input: &Path) -> PathBuf {
    if input.extension().map_or(false, |ext| ext == "spiro") {
        input.with_extension("svg")
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".svg");
        PathBuf::from(name)
    }
}

fn read_entries(input: &Path) -> Result<Vec<Entry>> {
    let file = File::open(input).with_context(|| format!("Could not open {}", input.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Could not parse {}", input.display()))
}

fn draw(input: &Path, entries: &[Entry]) -> Result<Image> {
    let spirographs = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entry
                .spirograph()
                .with_context(|| format!("Entry {i} of {}", input.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let r_max = spirographs.iter().map(Spirograph::r_max).fold(0.0, f64::max);
    let image = Image::centered((r_max + 2.0).floor())
        .description(format!("Spirograph from file: {}", input.display()));
    Ok(spirographs
        .iter()
        .zip(entries)
        .fold(image, |image, (spirograph, entry)| {
            debug!(
                "ring {} wheel {}: {} points",
                spirograph.ring(),
                spirograph.wheel(),
                spirograph.step_count()
            );
            image.path(&spirograph.path(), &entry.style())
        }))
}

fn main() -> Result<()> {
    init_logging();
    let opt = Opt::from_args();
    let entries = read_entries(&opt.input)?;
    println!("{} spirographs in {}", entries.len(), opt.input.display());

    let image = draw(&opt.input, &entries)?;
    let output = output_path(&opt.input);
    let mut file = create_output(&output)?;
    image.write_to(&mut file)?;
    file.flush()?;
    info!("Wrote {}", output.display());
    Ok(())
}
