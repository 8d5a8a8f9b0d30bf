// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use crate::stream::ByteExt;
use crate::{Error, Stream};

/// List of all length units.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LengthUnit {
    /// The attribute is absent or its suffix is not a known unit.
    Unknown,
    /// A plain number without a suffix.
    Number,
    Percent,
    Em,
    Ex,
    Px,
    Cm,
    Mm,
    In,
    Pt,
    Pc,
}

impl LengthUnit {
    /// Returns a unit suffix as it appears in a document.
    pub fn suffix(&self) -> &'static str {
        match self {
            LengthUnit::Unknown | LengthUnit::Number => "",
            LengthUnit::Percent => "%",
            LengthUnit::Em => "em",
            LengthUnit::Ex => "ex",
            LengthUnit::Px => "px",
            LengthUnit::Cm => "cm",
            LengthUnit::Mm => "mm",
            LengthUnit::In => "in",
            LengthUnit::Pt => "pt",
            LengthUnit::Pc => "pc",
        }
    }

    fn from_suffix(text: &str) -> LengthUnit {
        match text {
            "" => LengthUnit::Number,
            "em" => LengthUnit::Em,
            "ex" => LengthUnit::Ex,
            "px" => LengthUnit::Px,
            "cm" => LengthUnit::Cm,
            "mm" => LengthUnit::Mm,
            "in" => LengthUnit::In,
            "pt" => LengthUnit::Pt,
            "pc" => LengthUnit::Pc,
            _ => LengthUnit::Unknown,
        }
    }
}

/// Representation of the `<length>` type.
///
/// A length with the `Unknown` unit marks an absent attribute.
/// It is never written back and the owning element falls back
/// to the attribute default.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Length {
    pub number: f64,
    pub unit: LengthUnit,
}

impl Length {
    /// Constructs a new length.
    #[inline]
    pub const fn new(number: f64, unit: LengthUnit) -> Length {
        Length { number, unit }
    }

    /// Constructs a new length with `LengthUnit::Number`.
    #[inline]
    pub const fn new_number(number: f64) -> Length {
        Length::new(number, LengthUnit::Number)
    }

    /// Constructs a new length with `LengthUnit::Percent`.
    #[inline]
    pub const fn new_percent(number: f64) -> Length {
        Length::new(number, LengthUnit::Percent)
    }

    /// Constructs a zero length.
    #[inline]
    pub const fn zero() -> Length {
        Length::new_number(0.0)
    }

    /// Constructs an unspecified length.
    #[inline]
    pub const fn unspecified() -> Length {
        Length::new(0.0, LengthUnit::Unknown)
    }

    /// Checks that the length has a known unit.
    ///
    /// Malformed and absent values are not valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.unit != LengthUnit::Unknown
    }

    /// Parses a length, never failing.
    ///
    /// A malformed number yields an unspecified zero length.
    /// An unknown suffix yields the number with the `Unknown` unit.
    /// Anything after the suffix is ignored.
    pub fn parse(text: &str) -> Length {
        let mut s = Stream::from(text);
        s.parse_length().unwrap_or_else(|_| Length::unspecified())
    }

    /// Converts the length into pixels.
    ///
    /// Physical units are rounded up. Font relative units are always zero.
    /// `Percent` and `Unknown` cannot be resolved without a reference
    /// and return `None`.
    pub fn to_px(&self, dpi: f64) -> Option<f64> {
        let n = self.number;
        let px = match self.unit {
            LengthUnit::Number | LengthUnit::Px => n,
            LengthUnit::In => (n * dpi).ceil(),
            LengthUnit::Cm => (n * dpi / 2.54).ceil(),
            LengthUnit::Mm => (n * dpi / 25.4).ceil(),
            LengthUnit::Pt => (n * dpi / 72.0).ceil(),
            LengthUnit::Pc => (n * dpi / 6.0).ceil(),
            LengthUnit::Em | LengthUnit::Ex => 0.0,
            LengthUnit::Percent | LengthUnit::Unknown => return None,
        };

        Some(px)
    }

    /// Converts the length into pixels, resolving percents against `reference`.
    ///
    /// An unknown unit resolves to zero.
    pub fn resolve(&self, dpi: f64, reference: f64) -> f64 {
        match self.unit {
            LengthUnit::Percent => reference * self.number / 100.0,
            _ => self.to_px(dpi).unwrap_or(0.0),
        }
    }
}

impl Default for Length {
    #[inline]
    fn default() -> Self {
        Length::unspecified()
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.number, self.unit.suffix())
    }
}

impl std::str::FromStr for Length {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Error> {
        let mut s = Stream::from(text);
        let l = s.parse_length()?;
        s.skip_spaces();

        if !s.at_end() {
            return Err(Error::UnexpectedData(s.calc_char_pos()));
        }

        if !l.is_valid() {
            return Err(Error::InvalidValue);
        }

        Ok(l)
    }
}

impl<'a> Stream<'a> {
    /// Parses length from the stream.
    ///
    /// The suffix is either a single `%` or up to two ASCII letters.
    pub fn parse_length(&mut self) -> Result<Length, Error> {
        self.skip_spaces();

        let n = self.parse_number()?;

        if self.is_curr_byte_eq(b'%') {
            self.advance(1);
            return Ok(Length::new_percent(n));
        }

        let start = self.pos();
        for _ in 0..2 {
            if !self.at_end() && self.curr_byte_unchecked().is_letter() {
                self.advance(1);
            }
        }

        let unit = LengthUnit::from_suffix(self.slice_back(start));
        Ok(Length::new(n, unit))
    }

    /// Parses length from a list of lengths.
    pub fn parse_list_length(&mut self) -> Result<Length, Error> {
        if self.at_end() {
            return Err(Error::UnexpectedEndOfStream);
        }

        let l = self.parse_length()?;
        self.skip_spaces();
        self.parse_list_separator();
        Ok(l)
    }
}

/// A pull-based `<list-of-length>` parser.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LengthListParser<'a>(Stream<'a>);

impl<'a> From<&'a str> for LengthListParser<'a> {
    #[inline]
    fn from(v: &'a str) -> Self {
        LengthListParser(Stream::from(v))
    }
}

impl<'a> Iterator for LengthListParser<'a> {
    type Item = Result<Length, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.skip_spaces();
        if self.0.at_end() {
            return None;
        }

        let v = self.0.parse_list_length();
        if v.is_err() {
            self.0.jump_to_end();
        }

        Some(v)
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    macro_rules! test_p {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(Length::parse($text), $result);
            }
        )
    }

    test_p!(parse_1,  "1",   Length::new(1.0, LengthUnit::Number));
    test_p!(parse_2,  "1em", Length::new(1.0, LengthUnit::Em));
    test_p!(parse_3,  "1ex", Length::new(1.0, LengthUnit::Ex));
    test_p!(parse_4,  "1px", Length::new(1.0, LengthUnit::Px));
    test_p!(parse_5,  "1in", Length::new(1.0, LengthUnit::In));
    test_p!(parse_6,  "1cm", Length::new(1.0, LengthUnit::Cm));
    test_p!(parse_7,  "1mm", Length::new(1.0, LengthUnit::Mm));
    test_p!(parse_8,  "1pt", Length::new(1.0, LengthUnit::Pt));
    test_p!(parse_9,  "1pc", Length::new(1.0, LengthUnit::Pc));
    test_p!(parse_10, "1%",  Length::new(1.0, LengthUnit::Percent));
    test_p!(parse_11, "1e1", Length::new(10.0, LengthUnit::Number));
    test_p!(parse_12, "1.0e1em", Length::new(10.0, LengthUnit::Em));
    test_p!(parse_13, "  -2.5mm", Length::new(-2.5, LengthUnit::Mm));
    test_p!(parse_14, "1qq", Length::new(1.0, LengthUnit::Unknown));
    test_p!(parse_15, "1q",  Length::new(1.0, LengthUnit::Unknown));
    test_p!(parse_16, "abc", Length::unspecified());
    test_p!(parse_17, "",    Length::unspecified());
    test_p!(parse_18, "3px;", Length::new(3.0, LengthUnit::Px));
    test_p!(parse_19, "1e",  Length::new(1.0, LengthUnit::Unknown));

    #[test]
    fn unknown_suffix_is_not_a_number() {
        assert!(!Length::parse("1zz").is_valid());
        assert!(Length::parse("1").is_valid());
    }

    #[test]
    fn from_str_rejects_trailing_data() {
        assert!(Length::from_str("1px q").is_err());
        assert!(Length::from_str("1zz").is_err());
        assert_eq!(Length::from_str(" 1px ").unwrap(), Length::new(1.0, LengthUnit::Px));
    }

    macro_rules! test_px {
        ($name:ident, $text:expr, $dpi:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(Length::parse($text).to_px($dpi), $result);
            }
        )
    }

    test_px!(to_px_1, "10",    96.0, Some(10.0));
    test_px!(to_px_2, "10px",  96.0, Some(10.0));
    test_px!(to_px_3, "1in",   96.0, Some(96.0));
    test_px!(to_px_4, "1cm",   96.0, Some(38.0));
    test_px!(to_px_5, "1mm",   96.0, Some(4.0));
    test_px!(to_px_6, "1pt",   96.0, Some(2.0));
    test_px!(to_px_7, "1pc",   96.0, Some(16.0));
    test_px!(to_px_8, "2em",   96.0, Some(0.0));
    test_px!(to_px_9, "2ex",   96.0, Some(0.0));
    test_px!(to_px_10, "50%",  96.0, None);
    test_px!(to_px_11, "5zz",  96.0, None);

    #[test]
    fn to_px_is_monotonic_in_dpi() {
        for text in &["0.3in", "1.7cm", "12mm", "7pt", "2.2pc"] {
            let l = Length::parse(text);
            let mut prev = 0.0;
            for dpi in 1..400 {
                let px = l.to_px(dpi as f64).unwrap();
                assert!(px >= prev, "{} at {} dpi", text, dpi);
                prev = px;
            }
        }
    }

    #[test]
    fn resolve_percent() {
        assert_eq!(Length::parse("50%").resolve(96.0, 300.0), 150.0);
        assert_eq!(Length::parse("5zz").resolve(96.0, 300.0), 0.0);
        assert_eq!(Length::parse("1in").resolve(72.0, 300.0), 72.0);
    }

    #[test]
    fn round_trip() {
        for text in &["0", "1", "-1.5", "0.001", "10%", "1e-7px", "2.5em", "3ex",
                      "4cm", "5mm", "6in", "7pt", "8pc", "1e21"] {
            let l = Length::parse(text);
            assert!(l.is_valid());
            assert_eq!(Length::parse(&l.to_string()), l);
        }
    }

    #[test]
    fn write() {
        assert_eq!(Length::new(5.0, LengthUnit::Mm).to_string(), "5mm");
        assert_eq!(Length::new(50.5, LengthUnit::Percent).to_string(), "50.5%");
        assert_eq!(Length::new(5.0, LengthUnit::Number).to_string(), "5");
        assert_eq!(Length::new(5.0, LengthUnit::Unknown).to_string(), "5");
    }

    #[test]
    fn list() {
        let list: Vec<_> = LengthListParser::from("10px, 20% 5").map(|l| l.unwrap()).collect();
        assert_eq!(list, vec![
            Length::new(10.0, LengthUnit::Px),
            Length::new(20.0, LengthUnit::Percent),
            Length::new(5.0, LengthUnit::Number),
        ]);
    }
}
