//! SVG output.
//!
//! Model coordinates have the y axis pointing up; the drawing content sits in a group that flips
//! it, so paths can be emitted untouched.
use std::collections::BTreeMap;
use std::io::{self, Write};

use nalgebra::geometry::Point2;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Description, Group, Path as SvgPath};
use svg::node::Text;
use svg::Document;

use crate::path::{Path, PathCommand, Sweep};

/// Presentation attributes of one drawn element
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub stroke: String,
    pub stroke_width: f64,
    pub fill: String,
    pub dasharray: Option<String>,
    /// Any further SVG attributes, emitted verbatim. They win over the fields above.
    pub extra: BTreeMap<String, String>,
}

impl Default for Style {
    fn default() -> Self {
        Style::thick()
    }
}

impl Style {
    fn stroked(width: f64, dasharray: Option<&str>) -> Self {
        Style {
            stroke: "black".to_string(),
            stroke_width: width,
            fill: "none".to_string(),
            dasharray: dasharray.map(str::to_string),
            extra: BTreeMap::new(),
        }
    }

    /// Outline of the drawn object
    pub fn thick() -> Self {
        Style::stroked(0.5, None)
    }

    /// Construction lines
    pub fn thin() -> Self {
        Style::stroked(0.1, None)
    }

    /// Dashed reference circles (head, foot)
    pub fn dash() -> Self {
        Style::stroked(0.1, Some("2 1"))
    }

    /// Dotted reference circles (base)
    pub fn dot() -> Self {
        Style::stroked(0.1, Some("0.2 0.6"))
    }

    /// Dash-dot symmetry lines and pitch circles
    pub fn sym() -> Self {
        Style::stroked(0.1, Some("4 1 0.5 1"))
    }

    pub fn with_stroke(mut self, stroke: impl Into<String>) -> Self {
        self.stroke = stroke.into();
        self
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    fn attributes(&self) -> BTreeMap<String, String> {
        let mut attributes = BTreeMap::new();
        attributes.insert("stroke".to_string(), self.stroke.clone());
        attributes.insert("stroke-width".to_string(), self.stroke_width.to_string());
        attributes.insert("fill".to_string(), self.fill.clone());
        if let Some(dasharray) = &self.dasharray {
            attributes.insert("stroke-dasharray".to_string(), dasharray.clone());
        }
        attributes.extend(self.extra.clone());
        attributes
    }
}

/// Convert a path description into SVG path data.
///
/// The group the data is drawn in flips y, so a clockwise arc is SVG's negative-angle direction
/// (sweep flag 0).
pub fn path_data(path: &Path) -> Data {
    // `svg::Data` stores `f32`
    let xy = |p: &Point2<f64>| vec![p.x as f32, p.y as f32];
    path.commands()
        .iter()
        .fold(Data::new(), |data, command| match command {
            PathCommand::MoveTo(p) => data.move_to(xy(p)),
            PathCommand::LineTo(p) => data.line_to(xy(p)),
            PathCommand::QuadTo { control, end } => data.quadratic_curve_to(vec![
                control.x as f32,
                control.y as f32,
                end.x as f32,
                end.y as f32,
            ]),
            PathCommand::ArcTo { radius, sweep, end } => {
                let sweep_flag = match sweep {
                    Sweep::Clockwise => 0.0,
                    Sweep::CounterClockwise => 1.0,
                };
                data.elliptical_arc_to(vec![
                    *radius as f32,
                    *radius as f32,
                    0.0,
                    0.0,
                    sweep_flag,
                    end.x as f32,
                    end.y as f32,
                ])
            }
            PathCommand::Close => data.close(),
        })
}

/// A square drawing centred on the origin
#[derive(Debug, Clone)]
pub struct Image {
    half_size: f64,
    description: Option<String>,
    content: Group,
}

impl Image {
    /// Drawing spanning `-half_size..half_size` on both axes, one unit per millimetre
    pub fn centered(half_size: f64) -> Self {
        Image {
            half_size,
            description: None,
            content: Group::new().set("transform", "scale(1,-1)"),
        }
    }

    pub fn half_size(&self) -> f64 {
        self.half_size
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn path(mut self, path: &Path, style: &Style) -> Self {
        let element = style
            .attributes()
            .into_iter()
            .fold(SvgPath::new(), |element, (name, value)| element.set(name, value))
            .set("d", path_data(path));
        self.content = self.content.add(element);
        self
    }

    pub fn circle(mut self, center: Point2<f64>, radius: f64, style: &Style) -> Self {
        let element = style
            .attributes()
            .into_iter()
            .fold(Circle::new(), |element, (name, value)| element.set(name, value))
            .set("cx", center.x)
            .set("cy", center.y)
            .set("r", radius);
        self.content = self.content.add(element);
        self
    }

    pub fn document(&self) -> Document {
        let size = 2.0 * self.half_size;
        let mut document = Document::new()
            .set("width", format!("{size}mm"))
            .set("height", format!("{size}mm"))
            .set(
                "viewBox",
                (-self.half_size, -self.half_size, size, size),
            );
        if let Some(text) = &self.description {
            document = document.add(Description::new().add(Text::new(text.clone())));
        }
        document.add(self.content.clone())
    }

    pub fn write_to(&self, target: impl Write) -> io::Result<()> {
        svg::write(target, &self.document())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::{GearParameters, GearWheel};
    use crate::path::PathCursor;
    use roxmltree::{Document as XmlDocument, ParsingOptions};
    use svg::node::element::path::Command;

    fn render(image: &Image) -> String {
        let mut out = Vec::new();
        image.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn parse(text: &str) -> XmlDocument<'_> {
        XmlDocument::parse_with_options(
            text,
            ParsingOptions {
                allow_dtd: true,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_style_attributes() {
        let style = Style::dash()
            .with_stroke("red")
            .with_attribute("stroke-width", "0.7")
            .with_attribute("opacity", "0.5");
        let attributes = style.attributes();
        assert_eq!(attributes["stroke"], "red");
        assert_eq!(attributes["stroke-dasharray"], "2 1");
        assert_eq!(attributes["opacity"], "0.5");
        // Extra attributes override the named ones
        assert_eq!(attributes["stroke-width"], "0.7");
        assert!(!Style::thick().attributes().contains_key("stroke-dasharray"));
    }

    #[test]
    fn test_path_data_commands() {
        let mut cursor = PathCursor::new(Point2::new(0.0, 1.0), std::f64::consts::FRAC_PI_2);
        cursor.line_to(Point2::new(1.0, 1.0));
        cursor.curve_to(Point2::new(2.0, 0.0), std::f64::consts::PI).unwrap();
        cursor
            .arc_to(Point2::new(0.0, -2.0), 2.0, Sweep::Clockwise)
            .unwrap();
        let data = path_data(&cursor.close());
        assert_eq!(data.len(), 5);
        assert!(matches!(data[0], Command::Move(..)));
        assert!(matches!(data[1], Command::Line(..)));
        assert!(matches!(data[2], Command::QuadraticCurve(..)));
        match &data[3] {
            Command::EllipticalArc(_, params) => {
                assert_eq!(params.len(), 7);
                assert_eq!(params[0], 2.0);
                assert_eq!(params[3], 0.0);
                assert_eq!(params[4], 0.0);
            }
            other => panic!("Expected an arc, got {other:?}"),
        }
        assert!(matches!(data[4], Command::Close));
    }

    #[test]
    fn test_gear_document() {
        let gear =
            GearWheel::new(GearParameters::from_degrees(2.0, 30, 20.0).unwrap()).unwrap();
        let image = Image::centered(33.0)
            .description("gear")
            .path(&gear.full_outline_path().unwrap(), &Style::thick())
            .circle(Point2::origin(), gear.pitch_radius(), &Style::sym());
        let text = render(&image);
        let doc = parse(&text);

        let root = doc.root_element();
        assert_eq!(root.tag_name().name(), "svg");
        assert_eq!(root.attribute("viewBox"), Some("-33 -33 66 66"));
        assert_eq!(root.attribute("width"), Some("66mm"));

        let desc = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "desc")
            .unwrap();
        assert_eq!(desc.text(), Some("gear"));

        let path = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "path")
            .unwrap();
        assert_eq!(path.attribute("fill"), Some("none"));
        let data = Data::parse(path.attribute("d").unwrap()).unwrap();
        assert_eq!(data.len(), 1 + 8 * 30 + 1);
        let arcs = data
            .iter()
            .filter(|c| matches!(c, Command::EllipticalArc(..)))
            .count();
        assert_eq!(arcs, 60);

        let circle = doc
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "circle")
            .unwrap();
        assert_eq!(circle.attribute("r"), Some("30"));
        assert_eq!(circle.attribute("stroke-dasharray"), Some("4 1 0.5 1"));

        let group = path.parent_element().unwrap();
        assert_eq!(group.attribute("transform"), Some("scale(1,-1)"));
    }
}
