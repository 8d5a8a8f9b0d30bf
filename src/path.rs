// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use crate::{Error, Stream};

/// A single path data step.
///
/// Absolute and relative commands are different steps.
/// `ClosePath` has no coordinates, so `Z` and `z` are the same step.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PathStep {
    MoveToAbs { x: f64, y: f64 },
    MoveToRel { x: f64, y: f64 },
    LineToAbs { x: f64, y: f64 },
    LineToRel { x: f64, y: f64 },
    HorizontalLineToAbs { x: f64 },
    HorizontalLineToRel { x: f64 },
    VerticalLineToAbs { y: f64 },
    VerticalLineToRel { y: f64 },
    CurveToAbs { x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64 },
    CurveToRel { x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64 },
    SmoothCurveToAbs { x2: f64, y2: f64, x: f64, y: f64 },
    SmoothCurveToRel { x2: f64, y2: f64, x: f64, y: f64 },
    QuadraticAbs { x1: f64, y1: f64, x: f64, y: f64 },
    QuadraticRel { x1: f64, y1: f64, x: f64, y: f64 },
    SmoothQuadraticAbs { x: f64, y: f64 },
    SmoothQuadraticRel { x: f64, y: f64 },
    ArcAbs { rx: f64, ry: f64, x_axis_rotation: f64, large_arc: bool, sweep: bool, x: f64, y: f64 },
    ArcRel { rx: f64, ry: f64, x_axis_rotation: f64, large_arc: bool, sweep: bool, x: f64, y: f64 },
    ClosePath,
}

impl PathStep {
    /// Returns the command letter.
    pub fn command(&self) -> char {
        match self {
            PathStep::MoveToAbs { .. } => 'M',
            PathStep::MoveToRel { .. } => 'm',
            PathStep::LineToAbs { .. } => 'L',
            PathStep::LineToRel { .. } => 'l',
            PathStep::HorizontalLineToAbs { .. } => 'H',
            PathStep::HorizontalLineToRel { .. } => 'h',
            PathStep::VerticalLineToAbs { .. } => 'V',
            PathStep::VerticalLineToRel { .. } => 'v',
            PathStep::CurveToAbs { .. } => 'C',
            PathStep::CurveToRel { .. } => 'c',
            PathStep::SmoothCurveToAbs { .. } => 'S',
            PathStep::SmoothCurveToRel { .. } => 's',
            PathStep::QuadraticAbs { .. } => 'Q',
            PathStep::QuadraticRel { .. } => 'q',
            PathStep::SmoothQuadraticAbs { .. } => 'T',
            PathStep::SmoothQuadraticRel { .. } => 't',
            PathStep::ArcAbs { .. } => 'A',
            PathStep::ArcRel { .. } => 'a',
            PathStep::ClosePath => 'z',
        }
    }

    /// Checks that the step uses absolute coordinates.
    ///
    /// `ClosePath` is treated as absolute.
    pub fn is_absolute(&self) -> bool {
        self.command() == 'z' || self.command().is_ascii_uppercase()
    }

    /// Returns a copy with every coordinate passed through `f`.
    ///
    /// Arc flags are kept as is.
    pub fn map_numbers<F: Fn(f64) -> f64>(&self, f: F) -> PathStep {
        use PathStep::*;

        match *self {
            MoveToAbs { x, y } => MoveToAbs { x: f(x), y: f(y) },
            MoveToRel { x, y } => MoveToRel { x: f(x), y: f(y) },
            LineToAbs { x, y } => LineToAbs { x: f(x), y: f(y) },
            LineToRel { x, y } => LineToRel { x: f(x), y: f(y) },
            HorizontalLineToAbs { x } => HorizontalLineToAbs { x: f(x) },
            HorizontalLineToRel { x } => HorizontalLineToRel { x: f(x) },
            VerticalLineToAbs { y } => VerticalLineToAbs { y: f(y) },
            VerticalLineToRel { y } => VerticalLineToRel { y: f(y) },
            CurveToAbs { x1, y1, x2, y2, x, y } => CurveToAbs {
                x1: f(x1), y1: f(y1), x2: f(x2), y2: f(y2), x: f(x), y: f(y),
            },
            CurveToRel { x1, y1, x2, y2, x, y } => CurveToRel {
                x1: f(x1), y1: f(y1), x2: f(x2), y2: f(y2), x: f(x), y: f(y),
            },
            SmoothCurveToAbs { x2, y2, x, y } => SmoothCurveToAbs {
                x2: f(x2), y2: f(y2), x: f(x), y: f(y),
            },
            SmoothCurveToRel { x2, y2, x, y } => SmoothCurveToRel {
                x2: f(x2), y2: f(y2), x: f(x), y: f(y),
            },
            QuadraticAbs { x1, y1, x, y } => QuadraticAbs { x1: f(x1), y1: f(y1), x: f(x), y: f(y) },
            QuadraticRel { x1, y1, x, y } => QuadraticRel { x1: f(x1), y1: f(y1), x: f(x), y: f(y) },
            SmoothQuadraticAbs { x, y } => SmoothQuadraticAbs { x: f(x), y: f(y) },
            SmoothQuadraticRel { x, y } => SmoothQuadraticRel { x: f(x), y: f(y) },
            ArcAbs { rx, ry, x_axis_rotation, large_arc, sweep, x, y } => ArcAbs {
                rx: f(rx), ry: f(ry), x_axis_rotation: f(x_axis_rotation),
                large_arc, sweep, x: f(x), y: f(y),
            },
            ArcRel { rx, ry, x_axis_rotation, large_arc, sweep, x, y } => ArcRel {
                rx: f(rx), ry: f(ry), x_axis_rotation: f(x_axis_rotation),
                large_arc, sweep, x: f(x), y: f(y),
            },
            ClosePath => ClosePath,
        }
    }

    fn write_args(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let flag = |v: bool| if v { 1 } else { 0 };

        match *self {
            PathStep::MoveToAbs { x, y }
            | PathStep::MoveToRel { x, y }
            | PathStep::LineToAbs { x, y }
            | PathStep::LineToRel { x, y }
            | PathStep::SmoothQuadraticAbs { x, y }
            | PathStep::SmoothQuadraticRel { x, y } => write!(f, "{} {}", x, y),
            PathStep::HorizontalLineToAbs { x } | PathStep::HorizontalLineToRel { x } => {
                write!(f, "{}", x)
            }
            PathStep::VerticalLineToAbs { y } | PathStep::VerticalLineToRel { y } => {
                write!(f, "{}", y)
            }
            PathStep::CurveToAbs { x1, y1, x2, y2, x, y }
            | PathStep::CurveToRel { x1, y1, x2, y2, x, y } => {
                write!(f, "{} {} {} {} {} {}", x1, y1, x2, y2, x, y)
            }
            PathStep::SmoothCurveToAbs { x2, y2, x, y }
            | PathStep::SmoothCurveToRel { x2, y2, x, y } => {
                write!(f, "{} {} {} {}", x2, y2, x, y)
            }
            PathStep::QuadraticAbs { x1, y1, x, y } | PathStep::QuadraticRel { x1, y1, x, y } => {
                write!(f, "{} {} {} {}", x1, y1, x, y)
            }
            PathStep::ArcAbs { rx, ry, x_axis_rotation, large_arc, sweep, x, y }
            | PathStep::ArcRel { rx, ry, x_axis_rotation, large_arc, sweep, x, y } => {
                write!(
                    f,
                    "{} {} {} {} {} {} {}",
                    rx,
                    ry,
                    x_axis_rotation,
                    flag(large_arc),
                    flag(sweep),
                    x,
                    y
                )
            }
            PathStep::ClosePath => Ok(()),
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.command())?;
        self.write_args(f)
    }
}

/// A pull-based path data parser.
///
/// Implicit commands are converted into explicit ones:
/// `M 10 20 30 40` produces `MoveToAbs` followed by `LineToAbs`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PathParser<'a> {
    stream: Stream<'a>,
    prev_cmd: Option<u8>,
}

impl<'a> From<&'a str> for PathParser<'a> {
    #[inline]
    fn from(v: &'a str) -> Self {
        PathParser {
            stream: Stream::from(v),
            prev_cmd: None,
        }
    }
}

impl<'a> Iterator for PathParser<'a> {
    type Item = Result<PathStep, Error>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let s = &mut self.stream;

        s.skip_spaces();

        if s.at_end() {
            return None;
        }

        let res = next_impl(s, &mut self.prev_cmd);
        if res.is_err() {
            s.jump_to_end();
        }

        Some(res)
    }
}

fn next_impl(s: &mut Stream, prev_cmd: &mut Option<u8>) -> Result<PathStep, Error> {
    let start = s.pos();
    let first_char = s.curr_byte_unchecked();

    let cmd = match *prev_cmd {
        None if matches!(first_char, b'M' | b'm') => {
            s.advance(1);
            first_char
        }
        // The first step must be a MoveTo.
        None => return Err(Error::UnexpectedData(s.calc_char_pos_at(start))),
        Some(_) if is_cmd(first_char) => {
            s.advance(1);
            first_char
        }
        // ClosePath cannot be followed by a number.
        Some(b'Z') | Some(b'z') => {
            return Err(Error::UnexpectedData(s.calc_char_pos_at(start)));
        }
        // Coordinate pairs after a MoveTo are implicit LineTo.
        Some(b'M') if is_number_start(first_char) => b'L',
        Some(b'm') if is_number_start(first_char) => b'l',
        Some(p_cmd) if is_number_start(first_char) => p_cmd,
        Some(_) => return Err(Error::UnexpectedData(s.calc_char_pos_at(start))),
    };

    let step = match cmd {
        b'M' => PathStep::MoveToAbs {
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'm' => PathStep::MoveToRel {
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'L' => PathStep::LineToAbs {
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'l' => PathStep::LineToRel {
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'H' => PathStep::HorizontalLineToAbs {
            x: s.parse_list_number()?,
        },
        b'h' => PathStep::HorizontalLineToRel {
            x: s.parse_list_number()?,
        },
        b'V' => PathStep::VerticalLineToAbs {
            y: s.parse_list_number()?,
        },
        b'v' => PathStep::VerticalLineToRel {
            y: s.parse_list_number()?,
        },
        b'C' => PathStep::CurveToAbs {
            x1: s.parse_list_number()?,
            y1: s.parse_list_number()?,
            x2: s.parse_list_number()?,
            y2: s.parse_list_number()?,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'c' => PathStep::CurveToRel {
            x1: s.parse_list_number()?,
            y1: s.parse_list_number()?,
            x2: s.parse_list_number()?,
            y2: s.parse_list_number()?,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'S' => PathStep::SmoothCurveToAbs {
            x2: s.parse_list_number()?,
            y2: s.parse_list_number()?,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b's' => PathStep::SmoothCurveToRel {
            x2: s.parse_list_number()?,
            y2: s.parse_list_number()?,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'Q' => PathStep::QuadraticAbs {
            x1: s.parse_list_number()?,
            y1: s.parse_list_number()?,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'q' => PathStep::QuadraticRel {
            x1: s.parse_list_number()?,
            y1: s.parse_list_number()?,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'T' => PathStep::SmoothQuadraticAbs {
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b't' => PathStep::SmoothQuadraticRel {
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'A' => PathStep::ArcAbs {
            rx: s.parse_list_number()?,
            ry: s.parse_list_number()?,
            x_axis_rotation: s.parse_list_number()?,
            large_arc: s.parse_flag()?,
            sweep: s.parse_flag()?,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'a' => PathStep::ArcRel {
            rx: s.parse_list_number()?,
            ry: s.parse_list_number()?,
            x_axis_rotation: s.parse_list_number()?,
            large_arc: s.parse_flag()?,
            sweep: s.parse_flag()?,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        _ => PathStep::ClosePath,
    };

    *prev_cmd = Some(cmd);

    Ok(step)
}

/// Returns `true` if the selected char is the command.
#[rustfmt::skip]
#[inline]
fn is_cmd(c: u8) -> bool {
    matches!(c,
          b'M' | b'm'
        | b'Z' | b'z'
        | b'L' | b'l'
        | b'H' | b'h'
        | b'V' | b'v'
        | b'C' | b'c'
        | b'S' | b's'
        | b'Q' | b'q'
        | b'T' | b't'
        | b'A' | b'a')
}

#[inline]
fn is_number_start(c: u8) -> bool {
    matches!(c, b'0'..=b'9' | b'.' | b'-' | b'+')
}

/// Parses path data.
///
/// Fails on the first error. Use [`PathParser`] to keep the steps
/// parsed before the error.
pub fn parse_path(text: &str) -> Result<Vec<PathStep>, Error> {
    PathParser::from(text).collect()
}

/// Writes path data with steps separated by a space.
pub fn write_path(steps: &[PathStep]) -> String {
    let list: Vec<String> = steps.iter().map(|s| s.to_string()).collect();
    list.join(" ")
}
