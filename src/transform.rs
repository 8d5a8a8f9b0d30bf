// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use kurbo::Affine;

use crate::{Error, Stream};

/// A single operation of a `<transform-list>`.
///
/// Operations are kept exactly as written, so `rotate(a cx cy)`
/// stays a single operation.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum Transformation {
    Matrix {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
    },
    Translate {
        tx: f64,
        ty: f64,
    },
    Scale {
        sx: f64,
        sy: f64,
    },
    Rotate {
        angle: f64,
        center: Option<(f64, f64)>,
    },
    SkewX {
        angle: f64,
    },
    SkewY {
        angle: f64,
    },
}

impl Transformation {
    /// Returns an operation name.
    pub fn name(&self) -> &'static str {
        match self {
            Transformation::Matrix { .. } => "matrix",
            Transformation::Translate { .. } => "translate",
            Transformation::Scale { .. } => "scale",
            Transformation::Rotate { .. } => "rotate",
            Transformation::SkewX { .. } => "skewX",
            Transformation::SkewY { .. } => "skewY",
        }
    }

    /// Returns operation arguments in the order they are written.
    pub fn args(&self) -> Vec<f64> {
        match *self {
            Transformation::Matrix { a, b, c, d, e, f } => vec![a, b, c, d, e, f],
            Transformation::Translate { tx, ty } => vec![tx, ty],
            Transformation::Scale { sx, sy } => vec![sx, sy],
            Transformation::Rotate { angle, center: None } => vec![angle],
            Transformation::Rotate { angle, center: Some((cx, cy)) } => vec![angle, cx, cy],
            Transformation::SkewX { angle } | Transformation::SkewY { angle } => vec![angle],
        }
    }

    /// Returns a copy with every argument passed through `f`.
    pub fn map_numbers<F: Fn(f64) -> f64>(&self, f: F) -> Transformation {
        match *self {
            Transformation::Matrix { a, b, c, d, e, f: ff } => Transformation::Matrix {
                a: f(a),
                b: f(b),
                c: f(c),
                d: f(d),
                e: f(e),
                f: f(ff),
            },
            Transformation::Translate { tx, ty } => Transformation::Translate { tx: f(tx), ty: f(ty) },
            Transformation::Scale { sx, sy } => Transformation::Scale { sx: f(sx), sy: f(sy) },
            Transformation::Rotate { angle, center } => Transformation::Rotate {
                angle: f(angle),
                center: center.map(|(cx, cy)| (f(cx), f(cy))),
            },
            Transformation::SkewX { angle } => Transformation::SkewX { angle: f(angle) },
            Transformation::SkewY { angle } => Transformation::SkewY { angle: f(angle) },
        }
    }

    /// Converts the operation into an affine matrix.
    pub fn to_affine(&self) -> Affine {
        match *self {
            Transformation::Matrix { a, b, c, d, e, f } => Affine::new([a, b, c, d, e, f]),
            Transformation::Translate { tx, ty } => Affine::new([1.0, 0.0, 0.0, 1.0, tx, ty]),
            Transformation::Scale { sx, sy } => Affine::new([sx, 0.0, 0.0, sy, 0.0, 0.0]),
            Transformation::Rotate { angle, center } => {
                let v = angle.to_radians();
                let (sin, cos) = v.sin_cos();
                let rotate = Affine::new([cos, sin, -sin, cos, 0.0, 0.0]);
                match center {
                    Some((cx, cy)) => {
                        Affine::new([1.0, 0.0, 0.0, 1.0, cx, cy])
                            * rotate
                            * Affine::new([1.0, 0.0, 0.0, 1.0, -cx, -cy])
                    }
                    None => rotate,
                }
            }
            Transformation::SkewX { angle } => {
                Affine::new([1.0, 0.0, angle.to_radians().tan(), 1.0, 0.0, 0.0])
            }
            Transformation::SkewY { angle } => {
                Affine::new([1.0, angle.to_radians().tan(), 0.0, 1.0, 0.0, 0.0])
            }
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        for (i, n) in self.args().iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", n)?;
        }
        f.write_str(")")
    }
}

/// A pull-based `<transform-list>` parser.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TransformListParser<'a> {
    stream: Stream<'a>,
}

impl<'a> From<&'a str> for TransformListParser<'a> {
    fn from(text: &'a str) -> Self {
        TransformListParser {
            stream: Stream::from(text),
        }
    }
}

impl<'a> Iterator for TransformListParser<'a> {
    type Item = Result<Transformation, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.stream.skip_spaces();

        if self.stream.at_end() {
            // empty attribute is still a valid value
            return None;
        }

        let res = self.parse_next();
        if res.is_err() {
            self.stream.jump_to_end();
        }

        Some(res)
    }
}

impl<'a> TransformListParser<'a> {
    fn parse_next(&mut self) -> Result<Transformation, Error> {
        let s = &mut self.stream;

        let start = s.pos();
        let name = s.consume_ascii_ident();
        s.skip_spaces();
        s.consume_byte(b'(')?;

        let t = match name.as_bytes() {
            b"matrix" => Transformation::Matrix {
                a: s.parse_list_number()?,
                b: s.parse_list_number()?,
                c: s.parse_list_number()?,
                d: s.parse_list_number()?,
                e: s.parse_list_number()?,
                f: s.parse_list_number()?,
            },
            b"translate" => {
                let tx = s.parse_list_number()?;
                s.skip_spaces();
                // A missing `ty` is zero.
                let ty = if s.is_curr_byte_eq(b')') {
                    0.0
                } else {
                    s.parse_list_number()?
                };

                Transformation::Translate { tx, ty }
            }
            b"scale" => {
                let sx = s.parse_list_number()?;
                s.skip_spaces();
                // A missing `sy` is equal to `sx`.
                let sy = if s.is_curr_byte_eq(b')') {
                    sx
                } else {
                    s.parse_list_number()?
                };

                Transformation::Scale { sx, sy }
            }
            b"rotate" => {
                let angle = s.parse_list_number()?;
                s.skip_spaces();
                let center = if s.is_curr_byte_eq(b')') {
                    None
                } else {
                    let cx = s.parse_list_number()?;
                    let cy = s.parse_list_number()?;
                    Some((cx, cy))
                };

                Transformation::Rotate { angle, center }
            }
            b"skewX" => Transformation::SkewX {
                angle: s.parse_list_number()?,
            },
            b"skewY" => Transformation::SkewY {
                angle: s.parse_list_number()?,
            },
            _ => {
                return Err(Error::UnexpectedData(s.calc_char_pos_at(start)));
            }
        };

        s.skip_spaces();
        s.consume_byte(b')')?;
        s.skip_spaces();

        if s.is_curr_byte_eq(b',') {
            s.advance(1);
        }

        Ok(t)
    }
}

/// Parses a `<transform-list>`.
pub fn parse_transform_list(text: &str) -> Result<Vec<Transformation>, Error> {
    TransformListParser::from(text).collect()
}

/// Writes a `<transform-list>` with operations separated by a space.
pub fn write_transform_list(list: &[Transformation]) -> String {
    let list: Vec<String> = list.iter().map(|t| t.to_string()).collect();
    list.join(" ")
}

/// Composes a list into a single matrix, preserving the operations order.
pub fn to_affine(list: &[Transformation]) -> Affine {
    list.iter()
        .fold(Affine::IDENTITY, |ts, t| ts * t.to_affine())
}
