//! SVG drawing of a rosette of involutes unwound from one base circle
use std::f64::consts::TAU;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{ensure, Result};
use gearpath::involute::involute_points;
use gearpath::path::Path;
use gearpath::{create_output, init_logging, Image, PathCursor, Style};
use log::info;
use nalgebra::geometry::Point2;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "involute_svg", about = "Draws involutes of a circle")]
struct Opt {
    /// Radius of the base circle
    #[structopt(short, long, default_value = "1")]
    radius: f64,

    /// Number of involutes, evenly spread around the base circle
    #[structopt(short, long, default_value = "6")]
    count: u32,

    /// Line segments per involute
    #[structopt(short, long, default_value = "60")]
    segments: usize,

    /// Output file for the resulting SVG
    #[structopt(short, long, parse(from_os_str))]
    output: PathBuf,
}

/// One full turn of unwinding, as a polyline
fn involute_path(radius: f64, offset: f64, segments: usize) -> Path {
    let mut points = involute_points(radius, TAU, offset, segments).into_iter();
    let start = points.next().unwrap_or_else(Point2::origin);
    let mut cursor = PathCursor::new(start, offset);
    cursor.line_to_all(points);
    cursor.finish()
}

fn rosette(opt: &Opt) -> Image {
    let line = Style {
        stroke_width: 0.05 * opt.radius,
        ..Style::thin()
    };
    // A full turn ends at sqrt(4π² + 1) radii
    let half_size = (opt.radius * (TAU * TAU + 1.0).sqrt() * 1.5).ceil();
    let image = Image::centered(half_size).description(format!(
        "{} involutes of a circle with radius {}",
        opt.count, opt.radius
    ));
    (0..opt.count)
        .fold(image, |image, i| {
            let offset = i as f64 * TAU / opt.count as f64;
            image.path(&involute_path(opt.radius, offset, opt.segments), &line)
        })
        .circle(
            Point2::origin(),
            opt.radius,
            &line.clone().with_fill("yellow"),
        )
}

fn main() -> Result<()> {
    init_logging();
    let opt = Opt::from_args();
    ensure!(
        opt.radius.is_finite() && opt.radius > 0.0,
        "Radius must be > 0 but is {}",
        opt.radius
    );
    ensure!(opt.segments > 0, "Need at least one segment per involute");
    println!(
        "{} involutes of a base circle with radius {}",
        opt.count, opt.radius
    );

    let image = rosette(&opt);
    let mut file = create_output(&opt.output)?;
    image.write_to(&mut file)?;
    file.flush()?;
    info!("Wrote {}", opt.output.display());
    Ok(())
}
