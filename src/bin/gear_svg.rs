//! SVG drawing of an involute spur gear, with its head, pitch, base and foot circles
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use gearpath::{create_output, init_logging, GearParameters, GearWheel, Image, Style};
use log::info;
use nalgebra::geometry::Point2;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "gear_svg", about = "Draws the outline of an involute spur gear")]
struct Opt {
    /// Gear module, in mm
    #[structopt(short, long, default_value = "2")]
    module: f64,

    /// Number of gear teeth. The tooth model itself caps this: at most 184 teeth at 14.5 degrees,
    /// 82 at 20 degrees and 50 at 25 degrees
    #[structopt(short, long, default_value = "30")]
    teeth: u32,

    /// Pressure angle, in degrees
    #[structopt(short = "a", long, default_value = "20")]
    pressure_angle: f64,

    /// Output file for the resulting SVG
    #[structopt(short, long, parse(from_os_str))]
    output: PathBuf,
}

fn help_text(gear: &GearWheel) {
    println!(
        "Gear with {} teeth:
        - Head diameter {:.3}mm
        - Pitch diameter {:.3}mm
        - Base diameter {:.3}mm
        - Foot diameter {:.3}mm",
        gear.teeth(),
        2.0 * gear.head_radius(),
        2.0 * gear.pitch_radius(),
        2.0 * gear.base_radius(),
        2.0 * gear.foot_radius()
    )
}

fn draw(gear: &GearWheel) -> Result<Image> {
    let outline = gear
        .full_outline_path()
        .context("Could not build the gear outline")?;
    let center = Point2::origin();
    // Leave a millimetre around the head circle
    let half_size = (gear.head_radius() + 1.0).floor();
    Ok(Image::centered(half_size)
        .description(format!(
            "Gear wheel: module {}, {} teeth, pressure angle {:.1} degrees",
            gear.params().module(),
            gear.teeth(),
            gear.params().pressure_angle().to_degrees()
        ))
        .path(&outline, &Style::thick())
        .circle(center, gear.head_radius(), &Style::dash())
        .circle(center, gear.pitch_radius(), &Style::sym())
        .circle(center, gear.base_radius(), &Style::dot())
        .circle(center, gear.foot_radius(), &Style::dash()))
}

fn main() -> Result<()> {
    init_logging();
    let opt = Opt::from_args();
    let params = GearParameters::from_degrees(opt.module, opt.teeth, opt.pressure_angle)?;
    let gear = GearWheel::new(params).with_context(|| {
        format!(
            "The tooth model cannot draw {} teeth at {} degrees",
            opt.teeth, opt.pressure_angle
        )
    })?;
    help_text(&gear);

    let image = draw(&gear)?;
    let mut file = create_output(&opt.output)?;
    image.write_to(&mut file)?;
    file.flush()?;
    info!("Wrote {}", opt.output.display());
    Ok(())
}
