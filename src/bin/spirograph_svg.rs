//! SVG drawing of a spirograph curve
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Result};
use gearpath::{create_output, init_logging, Image, Spirograph, Style};
use log::{info, warn};
use nalgebra::geometry::Point2;
use structopt::StructOpt;

/// Pens held further out catch the teeth of the ring
const MAX_EXCENTER: f64 = 0.9;

#[derive(Debug, StructOpt)]
#[structopt(name = "spirograph_svg", about = "Draws a spirograph curve")]
struct Opt {
    /// Number of teeth of the ring
    #[structopt(short, long, default_value = "150", allow_hyphen_values = true)]
    ring: i64,

    /// Number of teeth of the wheel, negative to roll on the outside of the ring
    #[structopt(short, long, default_value = "52", allow_hyphen_values = true)]
    wheel: i64,

    /// Distance of the pen from the wheel centre, as a fraction of the wheel radius
    #[structopt(short, long, default_value = "0.8", allow_hyphen_values = true)]
    excenter: f64,

    /// Teeth the wheel is turned by before it is engaged
    #[structopt(long, default_value = "0", allow_hyphen_values = true)]
    offset: i64,

    /// Pen positions per tooth step
    #[structopt(short, long, default_value = "1")]
    samples: u32,

    /// Output file for the resulting SVG
    #[structopt(short, long, parse(from_os_str))]
    output: PathBuf,
}

/// Bring the command line values into range the way a person holding the toy would
fn sanitize(mut opt: Opt) -> Result<Opt> {
    opt.ring = opt.ring.abs();
    opt.excenter = opt.excenter.abs();
    if opt.wheel == 0 {
        bail!("Wheel must not be zero, no spirograph generated");
    }
    if opt.ring <= opt.wheel {
        bail!("Wheel must be smaller than ring, no spirograph generated");
    }
    if opt.excenter > MAX_EXCENTER {
        warn!("Excenter limited to {MAX_EXCENTER}");
        opt.excenter = MAX_EXCENTER;
    }
    if opt.samples == 0 {
        warn!("Number of samples must be > 0, using 1");
        opt.samples = 1;
    }
    Ok(opt)
}

fn help_text(spirograph: &Spirograph) {
    println!(
        "Spirograph ring {} / wheel {}:
        - {} pen positions over {} revolutions
        - Largest radius {:.3}mm",
        spirograph.ring(),
        spirograph.wheel(),
        spirograph.step_count(),
        spirograph.revolutions(),
        spirograph.r_max()
    )
}

fn main() -> Result<()> {
    init_logging();
    let opt = sanitize(Opt::from_args())?;
    let spirograph = Spirograph::new(opt.ring, opt.wheel, opt.excenter, opt.offset, opt.samples)?;
    help_text(&spirograph);

    let center = Point2::origin();
    let half_size = (spirograph.r_max() + 2.0).floor();
    let image = Image::centered(half_size)
        .description(format!(
            "Spirograph: ring {}, wheel {}, excenter {}, offset {}",
            opt.ring, opt.wheel, opt.excenter, opt.offset
        ))
        .path(&spirograph.path(), &Style::thick())
        .circle(center, spirograph.r_ring(), &Style::dash())
        .circle(
            center,
            (spirograph.r_ring() - spirograph.r_wheel()).abs(),
            &Style::sym(),
        );

    let mut file = create_output(&opt.output)?;
    image.write_to(&mut file)?;
    file.flush()?;
    info!("Wrote {}", opt.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(ring: i64, wheel: i64, excenter: f64) -> Opt {
        Opt {
            ring,
            wheel,
            excenter,
            offset: 0,
            samples: 1,
            output: PathBuf::from("out.svg"),
        }
    }

    #[test]
    fn test_sanitize() {
        let clean = sanitize(opt(-150, 52, -0.95)).unwrap();
        assert_eq!(clean.ring, 150);
        assert_eq!(clean.excenter, MAX_EXCENTER);
        assert!(sanitize(opt(150, 0, 0.8)).is_err());
        assert!(sanitize(opt(50, 52, 0.8)).is_err());
        assert!(sanitize(opt(52, 52, 0.8)).is_err());
        assert!(sanitize(opt(96, -24, 0.5)).is_ok());
    }
}
