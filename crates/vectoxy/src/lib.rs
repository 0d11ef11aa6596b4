#![deny(bare_trait_objects)]
#![allow(clippy::many_single_char_names)]

//! Converts SVG documents into flat numeric coordinate sequences.
//!
//! # Overview
//!
//! The pipeline parses the shape elements of an SVG document (`path`,
//! `rect`, `circle`, `ellipse`, `polygon`, `polyline`), samples curved
//! segments into point sequences at a caller-chosen resolution, aggregates
//! every point into two parallel coordinate arrays and rescales them into
//! `[-1, 1]` per axis. The result is suitable for downstream numeric
//! consumers such as plotting or machine-control pipelines.
//!
//! Data flows strictly forward: document text → document walker → (path
//! parser → curve flattener) or shape extractors → coordinate arrays →
//! normalizer. The pipeline is a pure function of its input, so independent
//! documents can be processed concurrently from multiple threads.
//!
//! # Example
//!
//! ```
//! let svg = r#"<svg><path d="M0,0 L10,0 L10,10 Z"/></svg>"#;
//! let coordinates = vectoxy::extract_and_normalize(svg, 5).unwrap();
//!
//! assert_eq!(coordinates.xs, vec![-1.0, 1.0, 1.0]);
//! assert_eq!(coordinates.ys, vec![-1.0, -1.0, 1.0]);
//! ```

// Reexport dependencies.
pub use euclid;

pub mod arc;
pub mod cubic_bezier;
pub mod extract;
pub mod line;
pub mod math;
pub mod normalize;
pub mod parser;
pub mod quadratic_bezier;
pub mod segment;
pub mod shapes;

#[doc(inline)]
pub use crate::arc::{Arc, ArcFlags, SvgArc};
#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::extract::{
    extract_document, CoordinateArrays, Extraction, SkippedPath,
};
#[doc(inline)]
pub use crate::line::LineSegment;
#[doc(inline)]
pub use crate::normalize::normalize;
#[doc(inline)]
pub use crate::parser::{parse_path_data, ParseError, PathCommand, PathParser};
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;
#[doc(inline)]
pub use crate::segment::{Segment, MIN_SAMPLES_PER_CURVE};

use thiserror::Error;

/// Errors surfaced by [`extract_and_normalize`].
///
/// An individual path with unparsable data is not an error at this level:
/// it contributes zero points and the operation carries on (the skips are
/// logged and reported through [`Extraction::skipped_paths`]).
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The document was processed but no recognized element produced any
    /// point.
    #[error("the document contains no extractable points")]
    Empty,
    /// The input is not well-formed markup. No partial result is produced.
    #[error("malformed svg document: {0}")]
    MalformedDocument(#[from] roxmltree::Error),
}

/// Controls how many points approximate each curved segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlattenConfig {
    pub samples_per_curve: u32,
}

impl FlattenConfig {
    pub fn new(samples_per_curve: u32) -> Self {
        FlattenConfig { samples_per_curve }
    }

    /// The effective sample count, clamped to at least
    /// [`MIN_SAMPLES_PER_CURVE`] so the pipeline stays total instead of
    /// failing on a caller-level range error.
    pub fn samples(&self) -> u32 {
        self.samples_per_curve.max(MIN_SAMPLES_PER_CURVE)
    }
}

/// Extracts all shape geometry from an SVG document and rescales it into
/// `[-1, 1]` per axis.
///
/// `samples_per_curve` controls how many points approximate each curved
/// segment; values below 2 are clamped to 2.
///
/// Fails with [`ExtractionError::MalformedDocument`] when the input is not
/// well-formed markup and with [`ExtractionError::Empty`] when the whole
/// document yields no point at all.
pub fn extract_and_normalize(
    svg_text: &str,
    samples_per_curve: u32,
) -> Result<CoordinateArrays, ExtractionError> {
    let document = roxmltree::Document::parse(svg_text)?;
    let config = FlattenConfig::new(samples_per_curve);

    let extraction = extract_document(&document, &config);
    if extraction.coordinates.is_empty() {
        return Err(ExtractionError::Empty);
    }

    Ok(normalize(extraction.coordinates))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_triangle() {
        let svg = r#"<svg><path d="M0,0 L10,0 L10,10 Z"/></svg>"#;
        let coordinates = extract_and_normalize(svg, 5).unwrap();

        assert_eq!(coordinates.xs, vec![-1.0, 1.0, 1.0]);
        assert_eq!(coordinates.ys, vec![-1.0, -1.0, 1.0]);
    }

    #[test]
    fn output_stays_in_range() {
        let svg = r#"<svg>
            <rect x="-4" y="2" width="10" height="20"/>
            <circle cx="100" cy="-50" r="7"/>
            <path d="M0,0 C10,40 20,-40 30,0 A 5 5 0 0 1 40 0"/>
        </svg>"#;
        let coordinates = extract_and_normalize(svg, 12).unwrap();

        assert_eq!(coordinates.xs.len(), coordinates.ys.len());
        for v in coordinates.xs.iter().chain(&coordinates.ys) {
            assert!(v.is_finite());
            assert!(*v >= -1.0 && *v <= 1.0);
        }
    }

    #[test]
    fn degenerate_axis() {
        let svg = r#"<svg><path d="M5,0 L5,10 L5,20"/></svg>"#;
        let coordinates = extract_and_normalize(svg, 5).unwrap();

        assert_eq!(coordinates.xs, vec![0.0, 0.0, 0.0]);
        assert_eq!(coordinates.ys, vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn garbled_path_does_not_fail_the_document() {
        let svg = r#"<svg><rect width="10" height="5"/><path d="M 0 0 L oops"/></svg>"#;
        let coordinates = extract_and_normalize(svg, 5).unwrap();

        // The rect's 5 points survive.
        assert_eq!(coordinates.xs.len(), 5);
    }

    #[test]
    fn empty_document_is_an_error() {
        match extract_and_normalize("<svg></svg>", 5) {
            Err(ExtractionError::Empty) => {}
            other => panic!("expected Empty, got {:?}", other),
        }

        // Unrecognized elements only.
        match extract_and_normalize("<svg><text x=\"1\">hi</text></svg>", 5) {
            Err(ExtractionError::Empty) => {}
            other => panic!("expected Empty, got {:?}", other),
        }
    }

    #[test]
    fn malformed_document_is_an_error() {
        match extract_and_normalize("<svg><rect width=\"10\"", 5) {
            Err(ExtractionError::MalformedDocument(_)) => {}
            other => panic!("expected MalformedDocument, got {:?}", other),
        }
    }

    #[test]
    fn samples_are_clamped() {
        let svg = r#"<svg><circle r="1"/></svg>"#;

        // One sample requested, two emitted.
        let coordinates = extract_and_normalize(svg, 1).unwrap();
        assert_eq!(coordinates.xs.len(), 2);
    }
}
