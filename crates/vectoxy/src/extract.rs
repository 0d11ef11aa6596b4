//! The document walker: traverses the SVG element tree in document order,
//! dispatches each recognized element to the matching extractor and
//! aggregates the resulting points.

use log::warn;
use roxmltree::{Document, Node};

use crate::arc::SvgArc;
use crate::cubic_bezier::CubicBezierSegment;
use crate::math::Point;
use crate::parser::{parse_path_data, ParseError, PathCommand};
use crate::quadratic_bezier::QuadraticBezierSegment;
use crate::segment::Segment;
use crate::{shapes, FlattenConfig};

/// Two equal-length sequences of coordinates where `xs[i]`/`ys[i]` form one
/// logical point.
///
/// Order is append order across all processed elements, not spatial order.
/// The single `push` entry point keeps the equal-length invariant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoordinateArrays {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl CoordinateArrays {
    pub fn new() -> Self {
        CoordinateArrays::default()
    }

    pub fn push(&mut self, p: Point) {
        self.xs.push(p.x);
        self.ys.push(p.y);
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// A `path` element whose data attribute failed to parse. The element
/// contributes no points and extraction carries on with the next element.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedPath {
    /// Index of the element among recognized elements, in document order.
    pub element_index: usize,
    pub error: ParseError,
}

/// The outcome of walking one document: the aggregated raw coordinates plus
/// a report of the paths that had to be skipped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    pub coordinates: CoordinateArrays,
    pub skipped_paths: Vec<SkippedPath>,
}

/// Walks the document in document order and extracts points from every
/// recognized shape element (`path`, `rect`, `circle`, `ellipse`, `polygon`,
/// `polyline`). Unrecognized elements are skipped silently.
pub fn extract_document(document: &Document, config: &FlattenConfig) -> Extraction {
    let mut extraction = Extraction::default();
    let mut element_index = 0;

    for node in document.root().descendants() {
        if !node.is_element() {
            continue;
        }
        match node.tag_name().name() {
            "path" => extract_path(node, config, element_index, &mut extraction),
            "rect" => extract_rect(node, &mut extraction.coordinates),
            "circle" | "ellipse" => extract_ellipse(node, config, &mut extraction.coordinates),
            "polygon" | "polyline" => extract_polygon(node, &mut extraction.coordinates),
            _ => continue,
        }
        element_index += 1;
    }

    extraction
}

/// Converts a parsed command sequence into points.
///
/// The pen position is appended when a subpath begins; line commands append
/// their far endpoint (both endpoints of every line segment end up in the
/// output without duplication) and curves append their flattened samples
/// minus the leading one, which coincides with the pen position. `Close`
/// moves the pen back onto the subpath start without emitting a point.
pub fn append_path_points(
    commands: &[PathCommand],
    config: &FlattenConfig,
    out: &mut CoordinateArrays,
) {
    let samples = config.samples();
    let mut pen = Point::origin();
    let mut subpath_start = Point::origin();

    for command in commands {
        match *command {
            PathCommand::MoveTo { to } => {
                out.push(to);
                pen = to;
                subpath_start = to;
            }
            PathCommand::LineTo { to } => {
                out.push(to);
                pen = to;
            }
            PathCommand::QuadraticBezierTo { ctrl, to } => {
                let segment = Segment::Quadratic(QuadraticBezierSegment { from: pen, ctrl, to });
                append_curve(&segment, samples, out);
                pen = to;
            }
            PathCommand::CubicBezierTo { ctrl1, ctrl2, to } => {
                let segment = Segment::Cubic(CubicBezierSegment {
                    from: pen,
                    ctrl1,
                    ctrl2,
                    to,
                });
                append_curve(&segment, samples, out);
                pen = to;
            }
            PathCommand::ArcTo {
                radii,
                x_rotation,
                flags,
                to,
            } => {
                let arc = SvgArc {
                    from: pen,
                    to,
                    radii,
                    x_rotation,
                    flags,
                };
                if arc.is_straight_line() {
                    out.push(to);
                } else {
                    append_curve(&Segment::Arc(arc.to_arc()), samples, out);
                }
                pen = to;
            }
            PathCommand::Close => {
                pen = subpath_start;
            }
        }
    }
}

fn append_curve(segment: &Segment, samples: u32, out: &mut CoordinateArrays) {
    for p in segment.flatten(samples).into_iter().skip(1) {
        out.push(p);
    }
}

fn extract_path(
    node: Node,
    config: &FlattenConfig,
    element_index: usize,
    extraction: &mut Extraction,
) {
    // A missing data attribute is an empty path, not an error.
    let data = node.attribute("d").unwrap_or("");
    match parse_path_data(data) {
        Ok(commands) => append_path_points(&commands, config, &mut extraction.coordinates),
        Err(error) => {
            warn!("skipping unparsable path element: {}", error);
            extraction.skipped_paths.push(SkippedPath {
                element_index,
                error,
            });
        }
    }
}

fn extract_rect(node: Node, out: &mut CoordinateArrays) {
    let x = number_attribute(node, "x");
    let y = number_attribute(node, "y");
    let width = number_attribute(node, "width");
    let height = number_attribute(node, "height");

    for p in &shapes::rect_points(x, y, width, height) {
        out.push(*p);
    }
}

fn extract_ellipse(node: Node, config: &FlattenConfig, out: &mut CoordinateArrays) {
    let cx = number_attribute(node, "cx");
    let cy = number_attribute(node, "cy");
    let rx = radius_attribute(node, "rx");
    let ry = radius_attribute(node, "ry");

    for p in shapes::ellipse_points(cx, cy, rx, ry, config) {
        out.push(p);
    }
}

fn extract_polygon(node: Node, out: &mut CoordinateArrays) {
    let points = node.attribute("points").unwrap_or("");
    match shapes::polygon_points(points) {
        Some(vertices) => {
            for p in vertices {
                out.push(p);
            }
        }
        None => warn!(
            "skipping <{}> element with a malformed points list",
            node.tag_name().name()
        ),
    }
}

/// Reads a numeric attribute, defaulting to 0 when it is missing. A value
/// that does not parse as a finite number also defaults to 0 rather than
/// aborting the element (permissive SVG consumption).
fn number_attribute(node: Node, name: &str) -> f64 {
    match node.attribute(name) {
        Some(value) => match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                warn!(
                    "ignoring malformed {:?} attribute {:?} on <{}>",
                    name,
                    value,
                    node.tag_name().name()
                );
                0.0
            }
        },
        None => 0.0,
    }
}

// An axis-specific radius falls back to the shared `r` attribute, so a plain
// circle supplies one radius for both axes.
fn radius_attribute(node: Node, name: &str) -> f64 {
    if node.attribute(name).is_some() {
        number_attribute(node, name)
    } else {
        number_attribute(node, "r")
    }
}

#[cfg(test)]
fn extract_str(svg: &str, samples_per_curve: u32) -> Extraction {
    let document = Document::parse(svg).unwrap();
    extract_document(&document, &FlattenConfig::new(samples_per_curve))
}

#[test]
fn line_path_vertices_only() {
    let extraction = extract_str(r#"<svg><path d="M0,0 L10,0 L10,10 Z"/></svg>"#, 5);

    assert_eq!(extraction.coordinates.xs, vec![0.0, 10.0, 10.0]);
    assert_eq!(extraction.coordinates.ys, vec![0.0, 0.0, 10.0]);
    assert!(extraction.skipped_paths.is_empty());
}

#[test]
fn curve_sample_count() {
    // The move-to contributes one point, the cubic its samples minus the
    // leading one shared with the pen position.
    let extraction = extract_str(r#"<svg><path d="M0,0 C0,1 1,1 1,0"/></svg>"#, 5);

    assert_eq!(extraction.coordinates.len(), 5);
    assert_eq!(extraction.coordinates.xs[0], 0.0);
    assert_eq!(*extraction.coordinates.xs.last().unwrap(), 1.0);
}

#[test]
fn document_order() {
    let extraction = extract_str(
        r#"<svg>
            <rect x="1" y="1" width="2" height="2"/>
            <circle cx="10" cy="10" r="1"/>
        </svg>"#,
        4,
    );

    // The rect's 5 points first, then the circle's 4 samples.
    assert_eq!(extraction.coordinates.len(), 9);
    assert_eq!(&extraction.coordinates.xs[..5], &[1.0, 3.0, 3.0, 1.0, 1.0]);
    assert!((extraction.coordinates.xs[5] - 11.0).abs() < 1e-9);
}

#[test]
fn nested_groups_in_document_order() {
    let extraction = extract_str(
        r#"<svg>
            <g><rect width="1" height="1"/></g>
            <g><g><rect x="5" width="1" height="1"/></g></g>
        </svg>"#,
        2,
    );

    assert_eq!(extraction.coordinates.len(), 10);
    assert_eq!(extraction.coordinates.xs[0], 0.0);
    assert_eq!(extraction.coordinates.xs[5], 5.0);
}

#[test]
fn malformed_path_is_skipped() {
    let extraction = extract_str(
        r#"<svg><rect width="10" height="5"/><path d="garbage"/></svg>"#,
        5,
    );

    assert_eq!(extraction.coordinates.len(), 5);
    assert_eq!(extraction.skipped_paths.len(), 1);
    assert_eq!(extraction.skipped_paths[0].element_index, 1);
}

#[test]
fn missing_attributes_default_to_zero() {
    let extraction = extract_str(r#"<svg><rect width="4"/><circle r="1"/></svg>"#, 3);

    assert_eq!(&extraction.coordinates.ys[..5], &[0.0, 0.0, 0.0, 0.0, 0.0]);
    assert_eq!(&extraction.coordinates.xs[..5], &[0.0, 4.0, 4.0, 0.0, 0.0]);
}

#[test]
fn degenerate_arc_becomes_line() {
    let extraction = extract_str(r#"<svg><path d="M0,0 A 0 1 0 0 1 2 2"/></svg>"#, 8);

    assert_eq!(extraction.coordinates.xs, vec![0.0, 2.0]);
    assert_eq!(extraction.coordinates.ys, vec![0.0, 2.0]);
}

#[test]
fn unknown_elements_are_ignored() {
    let extraction = extract_str(
        r#"<svg><text x="3" y="4">hi</text><line x1="0" y1="0" x2="1" y2="1"/></svg>"#,
        5,
    );

    assert!(extraction.coordinates.is_empty());
    assert!(extraction.skipped_paths.is_empty());
}

#[test]
fn polygon_literal_vertices() {
    let extraction = extract_str(r#"<svg><polygon points="0,0 4,0 4,3"/></svg>"#, 17);

    assert_eq!(extraction.coordinates.xs, vec![0.0, 4.0, 4.0]);
    assert_eq!(extraction.coordinates.ys, vec![0.0, 0.0, 3.0]);
}

#[test]
fn multiple_subpaths() {
    let extraction = extract_str(r#"<svg><path d="M0,0 L1,0 Z M5,5 L6,5"/></svg>"#, 2);

    assert_eq!(extraction.coordinates.xs, vec![0.0, 1.0, 5.0, 6.0]);
    assert_eq!(extraction.coordinates.ys, vec![0.0, 0.0, 5.0, 5.0]);
}
