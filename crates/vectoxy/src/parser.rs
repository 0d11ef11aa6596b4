//! A parser for the SVG path mini-language.
//!
//! Accepts the `M L H V C S Q T A Z` commands and their lowercase relative
//! variants, with implicit command repetition per the SVG grammar. All
//! coordinates in the output are resolved to absolute positions, and the
//! short-hand commands (`H`, `V`, `S`, `T`) are resolved to their general
//! form, so consumers only ever see the six core command kinds.

use crate::arc::ArcFlags;
use crate::math::{point, vector, Angle, Point, Vector};

use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseError {
    #[error("Offset {offset}: expected number, got {src:?}.")]
    Number { src: String, offset: usize },
    #[error("Offset {offset}: expected flag (0/1), got {src:?}.")]
    Flag { src: char, offset: usize },
    #[error("Offset {offset}: invalid command {command:?}.")]
    Command { command: char, offset: usize },
    #[error("Offset {offset}: expected move-to command, got {command:?}.")]
    MissingMoveTo { command: char, offset: usize },
}

/// A path drawing command with all coordinates resolved to absolute positions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo {
        to: Point,
    },
    LineTo {
        to: Point,
    },
    QuadraticBezierTo {
        ctrl: Point,
        to: Point,
    },
    CubicBezierTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    ArcTo {
        radii: Vector,
        x_rotation: Angle,
        flags: ArcFlags,
        to: Point,
    },
    Close,
}

// A buffered iterator of characters keeping track of the offset into the
// source string.
struct Source<Iter> {
    src: Iter,
    current: char,
    offset: usize,
    finished: bool,
}

impl<Iter: Iterator<Item = char>> Source<Iter> {
    fn new<IntoIter>(src: IntoIter) -> Self
    where
        IntoIter: IntoIterator<IntoIter = Iter>,
    {
        let mut src = src.into_iter();

        let (current, finished) = match src.next() {
            Some(c) => (c, false),
            None => (' ', true),
        };

        Source {
            src,
            current,
            offset: 0,
            finished,
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.finished && (self.current.is_whitespace() || self.current == ',') {
            self.advance_one();
        }
    }

    fn advance_one(&mut self) {
        if self.finished {
            return;
        }
        match self.src.next() {
            Some(c) => {
                self.current = c;
                self.offset += 1;
            }
            None => {
                self.current = '~';
                self.finished = true;
            }
        }
    }
}

/// A context object for parsing one path string.
///
/// The pen position used to resolve relative commands is local mutable state
/// scoped to a single `parse` call; it never leaks across path strings.
#[derive(Debug)]
pub struct PathParser {
    float_buffer: String,
    current_position: Point,
    first_position: Point,
}

impl Default for PathParser {
    fn default() -> Self {
        PathParser::new()
    }
}

impl PathParser {
    pub fn new() -> Self {
        PathParser {
            float_buffer: String::new(),
            current_position: point(0.0, 0.0),
            first_position: point(0.0, 0.0),
        }
    }

    /// Parses a path string into an absolute command sequence.
    ///
    /// An empty or whitespace-only string yields an empty sequence, not an
    /// error. A malformed string fails without partial recovery.
    pub fn parse(&mut self, src: &str) -> Result<Vec<PathCommand>, ParseError> {
        let mut output = Vec::new();
        self.parse_path(&mut Source::new(src.chars()), &mut output)?;
        Ok(output)
    }

    fn parse_path(
        &mut self,
        src: &mut Source<impl Iterator<Item = char>>,
        output: &mut Vec<PathCommand>,
    ) -> Result<(), ParseError> {
        // Per-spec: "If a relative moveto (m) appears as the first element of
        // the path, then it is treated as a pair of absolute coordinates."
        self.current_position = point(0.0, 0.0);
        self.first_position = point(0.0, 0.0);

        let mut need_start = true;
        let mut prev_cubic_ctrl = None;
        let mut prev_quadratic_ctrl = None;
        let mut implicit_cmd = 'M';

        src.skip_whitespace();

        while !src.finished {
            let mut cmd = src.current;
            let cmd_offset = src.offset;

            if cmd.is_ascii_alphabetic() {
                src.advance_one();
            } else {
                cmd = implicit_cmd;
            }

            if need_start && cmd != 'm' && cmd != 'M' {
                return Err(ParseError::MissingMoveTo {
                    command: cmd,
                    offset: cmd_offset,
                });
            }

            let is_relative = cmd.is_lowercase();

            match cmd {
                'l' | 'L' => {
                    let to = self.parse_endpoint(is_relative, src)?;
                    output.push(PathCommand::LineTo { to });
                }
                'h' | 'H' => {
                    let mut x = self.parse_number(src)?;
                    if is_relative {
                        x += self.current_position.x;
                    }
                    let to = point(x, self.current_position.y);
                    self.current_position = to;
                    output.push(PathCommand::LineTo { to });
                }
                'v' | 'V' => {
                    let mut y = self.parse_number(src)?;
                    if is_relative {
                        y += self.current_position.y;
                    }
                    let to = point(self.current_position.x, y);
                    self.current_position = to;
                    output.push(PathCommand::LineTo { to });
                }
                'q' | 'Q' => {
                    let ctrl = self.parse_point(is_relative, src)?;
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_quadratic_ctrl = Some(ctrl);
                    output.push(PathCommand::QuadraticBezierTo { ctrl, to });
                }
                't' | 'T' => {
                    let ctrl = self.get_smooth_ctrl(prev_quadratic_ctrl);
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_quadratic_ctrl = Some(ctrl);
                    output.push(PathCommand::QuadraticBezierTo { ctrl, to });
                }
                'c' | 'C' => {
                    let ctrl1 = self.parse_point(is_relative, src)?;
                    let ctrl2 = self.parse_point(is_relative, src)?;
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_cubic_ctrl = Some(ctrl2);
                    output.push(PathCommand::CubicBezierTo { ctrl1, ctrl2, to });
                }
                's' | 'S' => {
                    let ctrl1 = self.get_smooth_ctrl(prev_cubic_ctrl);
                    let ctrl2 = self.parse_point(is_relative, src)?;
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_cubic_ctrl = Some(ctrl2);
                    output.push(PathCommand::CubicBezierTo { ctrl1, ctrl2, to });
                }
                'a' | 'A' => {
                    let rx = self.parse_number(src)?;
                    let ry = self.parse_number(src)?;
                    let x_rotation = self.parse_number(src)?;
                    let large_arc = self.parse_flag(src)?;
                    let sweep = self.parse_flag(src)?;
                    let to = self.parse_endpoint(is_relative, src)?;
                    output.push(PathCommand::ArcTo {
                        radii: vector(rx, ry),
                        x_rotation: Angle::degrees(x_rotation),
                        flags: ArcFlags { large_arc, sweep },
                        to,
                    });
                }
                'm' | 'M' => {
                    let to = self.parse_endpoint(is_relative, src)?;
                    self.first_position = to;
                    output.push(PathCommand::MoveTo { to });
                    need_start = false;
                }
                'z' | 'Z' => {
                    output.push(PathCommand::Close);
                    self.current_position = self.first_position;
                    need_start = true;
                }
                _ => {
                    return Err(ParseError::Command {
                        command: cmd,
                        offset: cmd_offset,
                    });
                }
            }

            match cmd {
                'c' | 'C' | 's' | 'S' => {
                    prev_quadratic_ctrl = None;
                }
                'q' | 'Q' | 't' | 'T' => {
                    prev_cubic_ctrl = None;
                }
                _ => {
                    prev_cubic_ctrl = None;
                    prev_quadratic_ctrl = None;
                }
            }

            implicit_cmd = match cmd {
                'm' => 'l',
                'M' => 'L',
                'z' => 'm',
                'Z' => 'M',
                c => c,
            };

            src.skip_whitespace();
        }

        Ok(())
    }

    fn get_smooth_ctrl(&self, prev_ctrl: Option<Point>) -> Point {
        if let Some(prev_ctrl) = prev_ctrl {
            self.current_position + (self.current_position - prev_ctrl)
        } else {
            self.current_position
        }
    }

    fn parse_endpoint(
        &mut self,
        is_relative: bool,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<Point, ParseError> {
        let position = self.parse_point(is_relative, src)?;
        self.current_position = position;

        Ok(position)
    }

    fn parse_point(
        &mut self,
        is_relative: bool,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<Point, ParseError> {
        let mut x = self.parse_number(src)?;
        let mut y = self.parse_number(src)?;

        if is_relative {
            x += self.current_position.x;
            y += self.current_position.y;
        }

        Ok(point(x, y))
    }

    fn parse_number(
        &mut self,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<f64, ParseError> {
        self.float_buffer.clear();

        src.skip_whitespace();

        let offset = src.offset;

        if src.current == '-' || src.current == '+' {
            self.float_buffer.push(src.current);
            src.advance_one();
        }

        while src.current.is_numeric() {
            self.float_buffer.push(src.current);
            src.advance_one();
        }

        if src.current == '.' {
            self.float_buffer.push('.');
            src.advance_one();

            while src.current.is_numeric() {
                self.float_buffer.push(src.current);
                src.advance_one();
            }
        }

        if src.current == 'e' || src.current == 'E' {
            self.float_buffer.push(src.current);
            src.advance_one();

            if src.current == '-' || src.current == '+' {
                self.float_buffer.push(src.current);
                src.advance_one();
            }

            while src.current.is_numeric() {
                self.float_buffer.push(src.current);
                src.advance_one();
            }
        }

        match self.float_buffer.parse::<f64>() {
            // A value like 1e999 overflows to infinity while parsing; it must
            // not reach the coordinate arrays.
            Ok(val) if val.is_finite() => Ok(val),
            _ => Err(ParseError::Number {
                src: std::mem::take(&mut self.float_buffer),
                offset,
            }),
        }
    }

    fn parse_flag(
        &mut self,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<bool, ParseError> {
        src.skip_whitespace();
        match src.current {
            '1' => {
                src.advance_one();
                Ok(true)
            }
            '0' => {
                src.advance_one();
                Ok(false)
            }
            _ => Err(ParseError::Flag {
                src: src.current,
                offset: src.offset,
            }),
        }
    }
}

/// Parses an SVG path string into absolute drawing commands.
pub fn parse_path_data(src: &str) -> Result<Vec<PathCommand>, ParseError> {
    PathParser::new().parse(src)
}

#[test]
fn empty() {
    assert_eq!(parse_path_data(""), Ok(Vec::new()));
    assert_eq!(parse_path_data("  \t \n "), Ok(Vec::new()));
}

#[test]
fn simple_square() {
    let commands = parse_path_data("M 0 0 L 1 0 L 1 1 L 0 1 Z").unwrap();

    assert_eq!(
        commands,
        vec![
            PathCommand::MoveTo { to: point(0.0, 0.0) },
            PathCommand::LineTo { to: point(1.0, 0.0) },
            PathCommand::LineTo { to: point(1.0, 1.0) },
            PathCommand::LineTo { to: point(0.0, 1.0) },
            PathCommand::Close,
        ]
    );
}

#[test]
fn implicit_polyline() {
    // A leading bare coordinate pair is an implicit absolute move-to, and
    // the pairs after it implicit line-tos.
    let commands = parse_path_data("0 0 1 1 2 2").unwrap();

    assert_eq!(
        commands,
        vec![
            PathCommand::MoveTo { to: point(0.0, 0.0) },
            PathCommand::LineTo { to: point(1.0, 1.0) },
            PathCommand::LineTo { to: point(2.0, 2.0) },
        ]
    );
}

#[test]
fn relative_commands() {
    let commands = parse_path_data("m 1 2 l 3 4 l -1 -1").unwrap();

    assert_eq!(
        commands,
        vec![
            PathCommand::MoveTo { to: point(1.0, 2.0) },
            PathCommand::LineTo { to: point(4.0, 6.0) },
            PathCommand::LineTo { to: point(3.0, 5.0) },
        ]
    );
}

#[test]
fn horizontal_vertical() {
    let commands = parse_path_data("M 1 2 H 5 v 3 h -2 V 0").unwrap();

    assert_eq!(
        commands,
        vec![
            PathCommand::MoveTo { to: point(1.0, 2.0) },
            PathCommand::LineTo { to: point(5.0, 2.0) },
            PathCommand::LineTo { to: point(5.0, 5.0) },
            PathCommand::LineTo { to: point(3.0, 5.0) },
            PathCommand::LineTo { to: point(3.0, 0.0) },
        ]
    );
}

#[test]
fn smooth_cubic() {
    let commands = parse_path_data("M 0 0 C 0 1 1 1 1 0 S 2 -1 2 0").unwrap();

    assert_eq!(
        commands[2],
        PathCommand::CubicBezierTo {
            // Reflection of the previous ctrl2 (1, 1) through the pen (1, 0).
            ctrl1: point(1.0, -1.0),
            ctrl2: point(2.0, -1.0),
            to: point(2.0, 0.0),
        }
    );
}

#[test]
fn smooth_quadratic() {
    let commands = parse_path_data("M 0 0 Q 1 1 2 0 T 4 0").unwrap();

    assert_eq!(
        commands[2],
        PathCommand::QuadraticBezierTo {
            ctrl: point(3.0, -1.0),
            to: point(4.0, 0.0),
        }
    );

    // Without a preceding quadratic, the control point degenerates to the pen
    // position.
    let commands = parse_path_data("M 1 1 T 3 3").unwrap();
    assert_eq!(
        commands[1],
        PathCommand::QuadraticBezierTo {
            ctrl: point(1.0, 1.0),
            to: point(3.0, 3.0),
        }
    );
}

#[test]
fn arcs() {
    let commands = parse_path_data("M 0 0 A 1 2 30 1 0 3 4").unwrap();
    assert_eq!(
        commands[1],
        PathCommand::ArcTo {
            radii: vector(1.0, 2.0),
            x_rotation: Angle::degrees(30.0),
            flags: ArcFlags {
                large_arc: true,
                sweep: false,
            },
            to: point(3.0, 4.0),
        }
    );

    // Compact form with adjacent flags.
    let commands = parse_path_data("M 0 0 a1 1 0 011 0").unwrap();
    assert_eq!(
        commands[1],
        PathCommand::ArcTo {
            radii: vector(1.0, 1.0),
            x_rotation: Angle::degrees(0.0),
            flags: ArcFlags {
                large_arc: false,
                sweep: true,
            },
            to: point(1.0, 0.0),
        }
    );

    let err = parse_path_data("M 0 0 A 1 1 0 2 0 3 4").unwrap_err();
    assert_eq!(err, ParseError::Flag { src: '2', offset: 14 });
}

#[test]
fn close_resets_pen() {
    let commands = parse_path_data("M 1 1 L 2 2 Z m 1 0").unwrap();

    assert_eq!(commands[3], PathCommand::MoveTo { to: point(2.0, 1.0) });
}

#[test]
fn number_01() {
    // Per SVG spec, this is equivalent to "M 0.6 0.5".
    let commands = parse_path_data("M 0.6.5").unwrap();

    assert_eq!(commands, vec![PathCommand::MoveTo { to: point(0.6, 0.5) }]);
}

#[test]
fn number_scientific_notation() {
    parse_path_data("M 1e-2 -1E3").unwrap();
    parse_path_data("M 1e-9 0").unwrap();
    parse_path_data("M -1e-9 0").unwrap();
    parse_path_data("M -1e11 0").unwrap();
    parse_path_data("M 1.e-9 1.4e-4z").unwrap();
    parse_path_data("M 1.6e-9 1.4e-4 z").unwrap();
    parse_path_data("M0 1.6e-9L0 1.4e-4").unwrap();
    parse_path_data("M +1 1e+2").unwrap();
}

#[test]
fn bad_numbers() {
    let bad_number = &mut |src: &str| match parse_path_data(src) {
        Err(ParseError::Number { .. }) => true,
        r => {
            println!("{:?}", r);
            false
        }
    };

    assert!(bad_number("M 0 --1"));
    assert!(bad_number("M 0 1ee2"));
    assert!(bad_number("M 0 1e--1"));
    assert!(bad_number("M 0 *2"));
    assert!(bad_number("M 0 e"));
    assert!(bad_number("M 0 1e"));
    assert!(bad_number("M 0 1e999"));
}

#[test]
fn invalid_cmd() {
    let err = parse_path_data("M 0 0 x 1 1").unwrap_err();
    assert_eq!(err, ParseError::Command { command: 'x', offset: 6 });
}

#[test]
fn need_start() {
    let err = parse_path_data("L 1 1").unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingMoveTo { command: 'L', offset: 0 }
    );

    // A drawing command right after a close-path needs a move-to as well.
    let err = parse_path_data("M 0 0 Z L 1 1").unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingMoveTo { command: 'L', offset: 8 }
    );
}
