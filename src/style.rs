// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;
use std::str::FromStr;

use crate::names::define_names;
use crate::{Color, Error, Length, LengthListParser, Stream};

/// An alias to `NormalizedF64`.
pub type Opacity = strict_num::NormalizedF64;

define_names! {
    /// A style property.
    pub enum StyleProperty {
        AlignmentBaseline => "alignment-baseline",
        BaselineShift => "baseline-shift",
        Clip => "clip",
        ClipPath => "clip-path",
        ClipRule => "clip-rule",
        Color => "color",
        ColorInterpolation => "color-interpolation",
        ColorInterpolationFilters => "color-interpolation-filters",
        ColorProfile => "color-profile",
        ColorRendering => "color-rendering",
        Cursor => "cursor",
        Direction => "direction",
        Display => "display",
        DominantBaseline => "dominant-baseline",
        EnableBackground => "enable-background",
        Fill => "fill",
        FillOpacity => "fill-opacity",
        FillRule => "fill-rule",
        Filter => "filter",
        FloodColor => "flood-color",
        FloodOpacity => "flood-opacity",
        Font => "font",
        FontFamily => "font-family",
        FontSize => "font-size",
        FontSizeAdjust => "font-size-adjust",
        FontStretch => "font-stretch",
        FontStyle => "font-style",
        FontVariant => "font-variant",
        FontWeight => "font-weight",
        GlyphOrientationHorizontal => "glyph-orientation-horizontal",
        GlyphOrientationVertical => "glyph-orientation-vertical",
        ImageRendering => "image-rendering",
        Kerning => "kerning",
        LetterSpacing => "letter-spacing",
        LightingColor => "lighting-color",
        Marker => "marker",
        MarkerEnd => "marker-end",
        MarkerMid => "marker-mid",
        MarkerStart => "marker-start",
        Mask => "mask",
        Opacity => "opacity",
        Overflow => "overflow",
        PointerEvents => "pointer-events",
        ShapeRendering => "shape-rendering",
        StopColor => "stop-color",
        StopOpacity => "stop-opacity",
        Stroke => "stroke",
        StrokeDasharray => "stroke-dasharray",
        StrokeDashoffset => "stroke-dashoffset",
        StrokeLinecap => "stroke-linecap",
        StrokeLinejoin => "stroke-linejoin",
        StrokeMiterlimit => "stroke-miterlimit",
        StrokeOpacity => "stroke-opacity",
        StrokeWidth => "stroke-width",
        TextAnchor => "text-anchor",
        TextDecoration => "text-decoration",
        TextRendering => "text-rendering",
        UnicodeBidi => "unicode-bidi",
        Visibility => "visibility",
        WordSpacing => "word-spacing",
        WritingMode => "writing-mode",
    }
}

/// How a property value is interpreted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ValueKind {
    Paint,
    Color,
    Opacity,
    Length,
    LengthList,
    Number,
    FuncIri,
    LineCap,
    LineJoin,
    FillRule,
    Keyword,
    Text,
}

impl StyleProperty {
    /// Checks if the property is inherited by default.
    ///
    /// Non-inheritable properties can still be inherited
    /// explicitly with the `inherit` keyword.
    pub fn is_inheritable(&self) -> bool {
        !matches!(
            self,
            StyleProperty::AlignmentBaseline
                | StyleProperty::BaselineShift
                | StyleProperty::Clip
                | StyleProperty::ClipPath
                | StyleProperty::Display
                | StyleProperty::DominantBaseline
                | StyleProperty::EnableBackground
                | StyleProperty::Filter
                | StyleProperty::FloodColor
                | StyleProperty::FloodOpacity
                | StyleProperty::LightingColor
                | StyleProperty::Mask
                | StyleProperty::Opacity
                | StyleProperty::Overflow
                | StyleProperty::StopColor
                | StyleProperty::StopOpacity
                | StyleProperty::TextDecoration
                | StyleProperty::UnicodeBidi
        )
    }

    fn value_kind(&self) -> ValueKind {
        match self {
            StyleProperty::Fill | StyleProperty::Stroke => ValueKind::Paint,

            StyleProperty::Color
            | StyleProperty::FloodColor
            | StyleProperty::LightingColor
            | StyleProperty::StopColor => ValueKind::Color,

            StyleProperty::FillOpacity
            | StyleProperty::FloodOpacity
            | StyleProperty::Opacity
            | StyleProperty::StopOpacity
            | StyleProperty::StrokeOpacity => ValueKind::Opacity,

            StyleProperty::BaselineShift
            | StyleProperty::FontSize
            | StyleProperty::Kerning
            | StyleProperty::LetterSpacing
            | StyleProperty::StrokeDashoffset
            | StyleProperty::StrokeWidth
            | StyleProperty::WordSpacing => ValueKind::Length,

            StyleProperty::StrokeDasharray => ValueKind::LengthList,

            StyleProperty::FontSizeAdjust | StyleProperty::StrokeMiterlimit => ValueKind::Number,

            StyleProperty::ClipPath
            | StyleProperty::Filter
            | StyleProperty::Marker
            | StyleProperty::MarkerEnd
            | StyleProperty::MarkerMid
            | StyleProperty::MarkerStart
            | StyleProperty::Mask => ValueKind::FuncIri,

            StyleProperty::StrokeLinecap => ValueKind::LineCap,
            StyleProperty::StrokeLinejoin => ValueKind::LineJoin,
            StyleProperty::ClipRule | StyleProperty::FillRule => ValueKind::FillRule,

            StyleProperty::Clip
            | StyleProperty::Cursor
            | StyleProperty::EnableBackground
            | StyleProperty::Font
            | StyleProperty::FontFamily => ValueKind::Text,

            _ => ValueKind::Keyword,
        }
    }

    /// Returns the value used when the property is not set
    /// and cannot be inherited.
    pub fn initial_value(&self) -> StyleValue {
        let keyword = |s: &str| StyleValue::Keyword(s.to_string());
        let opaque = || StyleValue::Opacity(Opacity::ONE);

        match self {
            StyleProperty::Fill
            | StyleProperty::Color
            | StyleProperty::FloodColor
            | StyleProperty::StopColor => StyleValue::Color(Color::black()),
            StyleProperty::LightingColor => StyleValue::Color(Color::white()),

            StyleProperty::FillOpacity
            | StyleProperty::FloodOpacity
            | StyleProperty::Opacity
            | StyleProperty::StopOpacity
            | StyleProperty::StrokeOpacity => opaque(),

            StyleProperty::ClipPath
            | StyleProperty::Filter
            | StyleProperty::Marker
            | StyleProperty::MarkerEnd
            | StyleProperty::MarkerMid
            | StyleProperty::MarkerStart
            | StyleProperty::Mask
            | StyleProperty::Stroke
            | StyleProperty::StrokeDasharray
            | StyleProperty::TextDecoration => StyleValue::None,

            StyleProperty::ClipRule | StyleProperty::FillRule => {
                StyleValue::FillRule(FillRule::NonZero)
            }
            StyleProperty::StrokeLinecap => StyleValue::LineCap(LineCap::Butt),
            StyleProperty::StrokeLinejoin => StyleValue::LineJoin(LineJoin::Miter),
            StyleProperty::StrokeMiterlimit => StyleValue::Number(4.0),
            StyleProperty::StrokeWidth => StyleValue::Length(Length::new_number(1.0)),
            StyleProperty::StrokeDashoffset => StyleValue::Length(Length::zero()),

            StyleProperty::FontSize => keyword("medium"),
            StyleProperty::FontFamily => StyleValue::Text("serif".to_string()),
            StyleProperty::FontSizeAdjust => keyword("none"),
            StyleProperty::Font
            | StyleProperty::FontStretch
            | StyleProperty::FontStyle
            | StyleProperty::FontVariant
            | StyleProperty::FontWeight
            | StyleProperty::LetterSpacing
            | StyleProperty::UnicodeBidi
            | StyleProperty::WordSpacing => keyword("normal"),

            StyleProperty::BaselineShift => keyword("baseline"),
            StyleProperty::ColorInterpolation => keyword("sRGB"),
            StyleProperty::ColorInterpolationFilters => keyword("linearRGB"),
            StyleProperty::Direction => keyword("ltr"),
            StyleProperty::Display => keyword("inline"),
            StyleProperty::EnableBackground => StyleValue::Text("accumulate".to_string()),
            StyleProperty::GlyphOrientationHorizontal => keyword("0deg"),
            StyleProperty::Overflow | StyleProperty::Visibility => keyword("visible"),
            StyleProperty::PointerEvents => keyword("visiblePainted"),
            StyleProperty::TextAnchor => keyword("start"),
            StyleProperty::WritingMode => keyword("lr-tb"),

            StyleProperty::AlignmentBaseline
            | StyleProperty::Clip
            | StyleProperty::ColorProfile
            | StyleProperty::ColorRendering
            | StyleProperty::Cursor
            | StyleProperty::DominantBaseline
            | StyleProperty::GlyphOrientationVertical
            | StyleProperty::ImageRendering
            | StyleProperty::Kerning
            | StyleProperty::ShapeRendering
            | StyleProperty::TextRendering => keyword("auto"),
        }
    }
}

/// A `stroke-linecap` value.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

/// A `stroke-linejoin` value.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

/// A `fill-rule` and `clip-rule` value.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

/// A style value rule.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StyleRule {
    /// The value carries a payload.
    Normal,
    /// The `none` keyword.
    None,
    /// The `inherit` keyword.
    Inherit,
    /// A `url(#id)` reference.
    Url,
}

/// A style property value.
///
/// The payload meaning depends on the property it is attached to.
#[derive(Clone, PartialEq, Debug)]
pub enum StyleValue {
    /// The `none` keyword.
    None,
    /// The `inherit` keyword.
    Inherit,
    /// A `url(#id)` reference. Contains the id without `#`.
    Url(String),
    /// The `currentColor` keyword.
    CurrentColor,
    Color(Color),
    Opacity(Opacity),
    Length(Length),
    LengthList(Vec<Length>),
    Number(f64),
    LineCap(LineCap),
    LineJoin(LineJoin),
    FillRule(FillRule),
    /// An identifier the model doesn't interpret.
    Keyword(String),
    /// Free-form text, like a font family list.
    Text(String),
}

impl StyleValue {
    /// Returns the value rule.
    pub fn rule(&self) -> StyleRule {
        match self {
            StyleValue::None => StyleRule::None,
            StyleValue::Inherit => StyleRule::Inherit,
            StyleValue::Url(_) => StyleRule::Url,
            _ => StyleRule::Normal,
        }
    }

    /// Returns a color payload.
    pub fn color(&self) -> Option<Color> {
        match self {
            StyleValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns a referenced element id.
    pub fn url(&self) -> Option<&str> {
        match self {
            StyleValue::Url(id) => Some(id),
            _ => None,
        }
    }

    /// Parses a value for a specific property.
    ///
    /// `inherit` is accepted by every property.
    pub fn parse(property: StyleProperty, text: &str) -> Result<StyleValue, Error> {
        let text = text.trim();
        if text == "inherit" {
            return Ok(StyleValue::Inherit);
        }

        match property.value_kind() {
            ValueKind::Paint => parse_paint(text),
            ValueKind::Color => {
                if text == "currentColor" {
                    Ok(StyleValue::CurrentColor)
                } else {
                    Color::from_str(text).map(StyleValue::Color)
                }
            }
            ValueKind::Opacity => {
                let mut s = Stream::from(text);
                let n = s.parse_number_or_percent()?;
                check_end(&mut s)?;
                Ok(StyleValue::Opacity(Opacity::new_clamped(n)))
            }
            ValueKind::Length => match Length::from_str(text) {
                Ok(l) => Ok(StyleValue::Length(l)),
                Err(e) => parse_keyword(text).ok_or(e),
            },
            ValueKind::LengthList => {
                if text == "none" {
                    return Ok(StyleValue::None);
                }

                let list = LengthListParser::from(text).collect::<Result<Vec<_>, _>>()?;
                if list.iter().any(|l| !l.is_valid()) {
                    return Err(Error::InvalidValue);
                }

                Ok(StyleValue::LengthList(list))
            }
            ValueKind::Number => {
                let mut s = Stream::from(text);
                let n = s.parse_number();
                match n {
                    Ok(n) if check_end(&mut s).is_ok() => Ok(StyleValue::Number(n)),
                    _ => parse_keyword(text).ok_or(Error::InvalidValue),
                }
            }
            ValueKind::FuncIri => {
                if text == "none" {
                    Ok(StyleValue::None)
                } else {
                    let mut s = Stream::from(text);
                    let link = s.parse_func_iri()?;
                    check_end(&mut s)?;
                    Ok(StyleValue::Url(link.to_string()))
                }
            }
            ValueKind::LineCap => match text {
                "butt" => Ok(StyleValue::LineCap(LineCap::Butt)),
                "round" => Ok(StyleValue::LineCap(LineCap::Round)),
                "square" => Ok(StyleValue::LineCap(LineCap::Square)),
                _ => Err(Error::InvalidValue),
            },
            ValueKind::LineJoin => match text {
                "miter" => Ok(StyleValue::LineJoin(LineJoin::Miter)),
                "round" => Ok(StyleValue::LineJoin(LineJoin::Round)),
                "bevel" => Ok(StyleValue::LineJoin(LineJoin::Bevel)),
                _ => Err(Error::InvalidValue),
            },
            ValueKind::FillRule => match text {
                "nonzero" => Ok(StyleValue::FillRule(FillRule::NonZero)),
                "evenodd" => Ok(StyleValue::FillRule(FillRule::EvenOdd)),
                _ => Err(Error::InvalidValue),
            },
            ValueKind::Keyword => parse_keyword(text).ok_or(Error::InvalidValue),
            ValueKind::Text => {
                if text.is_empty() {
                    Err(Error::InvalidValue)
                } else {
                    Ok(StyleValue::Text(text.to_string()))
                }
            }
        }
    }
}

fn check_end(s: &mut Stream) -> Result<(), Error> {
    s.skip_spaces();
    if s.at_end() {
        Ok(())
    } else {
        Err(Error::UnexpectedData(s.calc_char_pos()))
    }
}

fn parse_keyword(text: &str) -> Option<StyleValue> {
    let mut s = Stream::from(text);
    let ident = s.consume_ascii_ident();
    if ident.is_empty() || !s.at_end() {
        return None;
    }

    if ident == "none" {
        Some(StyleValue::None)
    } else {
        Some(StyleValue::Keyword(ident.to_string()))
    }
}

/// Parses a `<paint>` value.
///
/// A fallback color after `url()` is ignored.
fn parse_paint(text: &str) -> Result<StyleValue, Error> {
    match text {
        "none" => Ok(StyleValue::None),
        "currentColor" => Ok(StyleValue::CurrentColor),
        _ => {
            let mut s = Stream::from(text);
            if s.starts_with(b"url(") {
                let link = s.parse_func_iri()?;
                Ok(StyleValue::Url(link.to_string()))
            } else {
                Color::from_str(text).map(StyleValue::Color)
            }
        }
    }
}

impl<'a> Stream<'a> {
    /// Parses a `url(#id)` value and returns the id.
    pub fn parse_func_iri(&mut self) -> Result<&'a str, Error> {
        self.skip_spaces();

        if !self.starts_with(b"url(") {
            return Err(Error::InvalidValue);
        }
        self.advance(4);
        self.skip_spaces();

        // Quotes are optional.
        let quote = match self.curr_byte()? {
            c @ b'\'' | c @ b'"' => {
                self.advance(1);
                Some(c)
            }
            _ => None,
        };

        self.consume_byte(b'#')?;
        let link = self.consume_bytes(|_, c| {
            !matches!(c, b' ' | b'\t' | b'\n' | b'\r' | b')' | b'\'' | b'"')
        });
        if link.is_empty() {
            return Err(Error::InvalidValue);
        }

        if let Some(quote) = quote {
            self.consume_byte(quote)?;
        }

        self.skip_spaces();
        self.consume_byte(b')')?;

        Ok(link)
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StyleValue::None => f.write_str("none"),
            StyleValue::Inherit => f.write_str("inherit"),
            StyleValue::Url(id) => write!(f, "url(#{})", id),
            StyleValue::CurrentColor => f.write_str("currentColor"),
            StyleValue::Color(c) => write!(f, "{}", c),
            StyleValue::Opacity(o) => write!(f, "{}", o.get()),
            StyleValue::Length(l) => write!(f, "{}", l),
            StyleValue::LengthList(list) => {
                for (i, l) in list.iter().enumerate() {
                    if i != 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", l)?;
                }
                Ok(())
            }
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::LineCap(v) => f.write_str(match v {
                LineCap::Butt => "butt",
                LineCap::Round => "round",
                LineCap::Square => "square",
            }),
            StyleValue::LineJoin(v) => f.write_str(match v {
                LineJoin::Miter => "miter",
                LineJoin::Round => "round",
                LineJoin::Bevel => "bevel",
            }),
            StyleValue::FillRule(v) => f.write_str(match v {
                FillRule::NonZero => "nonzero",
                FillRule::EvenOdd => "evenodd",
            }),
            StyleValue::Keyword(s) | StyleValue::Text(s) => f.write_str(s),
        }
    }
}

/// An ordered map of style properties.
///
/// Keys are unique. Insertion order is kept for serialization.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct StyleMap {
    entries: Vec<(StyleProperty, StyleValue)>,
}

impl StyleMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        StyleMap::default()
    }

    /// Parses a `style` attribute value.
    ///
    /// Unknown properties and invalid values are skipped.
    pub fn parse(text: &str) -> Self {
        let mut map = StyleMap::new();
        map.append_declarations(text);
        map
    }

    /// Parses declarations and inserts them, replacing existing values.
    pub fn append_declarations(&mut self, text: &str) {
        for declaration in simplecss::DeclarationTokenizer::from(text) {
            let property = match StyleProperty::from_str(declaration.name) {
                Some(v) => v,
                None => {
                    log::debug!("Unknown style property '{}' skipped.", declaration.name);
                    continue;
                }
            };

            self.insert_str(property, declaration.value);
        }
    }

    /// Parses a value and inserts it.
    ///
    /// Returns `false` and logs a warning when the value is invalid.
    pub fn insert_str(&mut self, property: StyleProperty, text: &str) -> bool {
        match StyleValue::parse(property, text) {
            Ok(value) => {
                self.insert(property, value);
                true
            }
            Err(_) => {
                log::warn!("Failed to parse {} value: '{}'.", property, text);
                false
            }
        }
    }

    /// Returns a property value.
    pub fn get(&self, property: StyleProperty) -> Option<&StyleValue> {
        self.entries
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v)
    }

    /// Checks that a property is set.
    pub fn contains(&self, property: StyleProperty) -> bool {
        self.get(property).is_some()
    }

    /// Sets a property value.
    ///
    /// An existing value is replaced in place.
    pub fn insert(&mut self, property: StyleProperty, value: StyleValue) {
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    /// Removes a property.
    pub fn remove(&mut self, property: StyleProperty) -> Option<StyleValue> {
        let idx = self.entries.iter().position(|(p, _)| *p == property)?;
        Some(self.entries.remove(idx).1)
    }

    /// Returns an iterator over properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &StyleValue)> {
        self.entries.iter().map(|(p, v)| (*p, v))
    }

    /// Returns the number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks that the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, (property, value)) in self.entries.iter().enumerate() {
            if i != 0 {
                f.write_str(";")?;
            }
            write!(f, "{}:{}", property, value)?;
        }

        Ok(())
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::LengthUnit;

    macro_rules! test {
        ($name:ident, $prop:expr, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(StyleValue::parse($prop, $text).unwrap(), $result);
            }
        )
    }

    test!(paint_none,     StyleProperty::Fill, "none", StyleValue::None);
    test!(paint_inherit,  StyleProperty::Fill, "inherit", StyleValue::Inherit);
    test!(paint_current,  StyleProperty::Stroke, "currentColor", StyleValue::CurrentColor);
    test!(paint_keyword,  StyleProperty::Fill, "red", StyleValue::Color(Color::new_rgb(255, 0, 0)));
    test!(paint_hex,      StyleProperty::Fill, "#0f0", StyleValue::Color(Color::new_rgb(0, 255, 0)));
    test!(paint_url,      StyleProperty::Fill, "url(#lg1)", StyleValue::Url("lg1".to_string()));
    test!(paint_url_fallback, StyleProperty::Fill, "url(#lg1) red", StyleValue::Url("lg1".to_string()));
    test!(paint_url_quoted, StyleProperty::Fill, "url('#lg1')", StyleValue::Url("lg1".to_string()));
    test!(opacity_number, StyleProperty::Opacity, "0.5", StyleValue::Opacity(Opacity::new_clamped(0.5)));
    test!(opacity_percent, StyleProperty::FillOpacity, "50%", StyleValue::Opacity(Opacity::new_clamped(0.5)));
    test!(opacity_clamped, StyleProperty::StrokeOpacity, "5", StyleValue::Opacity(Opacity::ONE));
    test!(length,         StyleProperty::StrokeWidth, "2mm", StyleValue::Length(Length::new(2.0, LengthUnit::Mm)));
    test!(length_keyword, StyleProperty::FontSize, "large", StyleValue::Keyword("large".to_string()));
    test!(dasharray,      StyleProperty::StrokeDasharray, "5, 10 2%",
          StyleValue::LengthList(vec![Length::new_number(5.0), Length::new_number(10.0),
                                      Length::new_percent(2.0)]));
    test!(dasharray_none, StyleProperty::StrokeDasharray, "none", StyleValue::None);
    test!(number,         StyleProperty::StrokeMiterlimit, "10", StyleValue::Number(10.0));
    test!(linecap,        StyleProperty::StrokeLinecap, "round", StyleValue::LineCap(LineCap::Round));
    test!(linejoin,       StyleProperty::StrokeLinejoin, "bevel", StyleValue::LineJoin(LineJoin::Bevel));
    test!(fill_rule,      StyleProperty::ClipRule, "evenodd", StyleValue::FillRule(FillRule::EvenOdd));
    test!(func_iri,       StyleProperty::Filter, "url(#f1)", StyleValue::Url("f1".to_string()));
    test!(func_iri_none,  StyleProperty::Mask, "none", StyleValue::None);
    test!(keyword,        StyleProperty::Visibility, "hidden", StyleValue::Keyword("hidden".to_string()));
    test!(text,           StyleProperty::FontFamily, "'Noto Sans', serif",
          StyleValue::Text("'Noto Sans', serif".to_string()));

    macro_rules! test_err {
        ($name:ident, $prop:expr, $text:expr) => (
            #[test]
            fn $name() {
                assert!(StyleValue::parse($prop, $text).is_err());
            }
        )
    }

    test_err!(paint_err,      StyleProperty::Fill, "qwe");
    test_err!(url_err,        StyleProperty::Fill, "url(lg1)");
    test_err!(opacity_err,    StyleProperty::Opacity, "0.5 1");
    test_err!(linecap_err,    StyleProperty::StrokeLinecap, "miter");
    test_err!(length_err,     StyleProperty::StrokeWidth, "1px 2px");
    test_err!(dasharray_err,  StyleProperty::StrokeDasharray, "5 q");

    #[test]
    fn rules() {
        assert_eq!(StyleValue::None.rule(), StyleRule::None);
        assert_eq!(StyleValue::Inherit.rule(), StyleRule::Inherit);
        assert_eq!(StyleValue::Url("a".to_string()).rule(), StyleRule::Url);
        assert_eq!(StyleValue::Color(Color::black()).rule(), StyleRule::Normal);
    }

    #[test]
    fn parse_map() {
        let map = StyleMap::parse("fill:red; unknown-prop: 5; stroke : none;stroke-width:1px 2px;opacity:0.5");
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(StyleProperty::Fill), Some(&StyleValue::Color(Color::new_rgb(255, 0, 0))));
        assert_eq!(map.get(StyleProperty::Stroke), Some(&StyleValue::None));
        assert!(!map.contains(StyleProperty::StrokeWidth));
        assert_eq!(map.to_string(), "fill:#ff0000;stroke:none;opacity:0.5");
    }

    #[test]
    fn map_insert_keeps_order() {
        let mut map = StyleMap::parse("fill:red;stroke:blue");
        map.insert(StyleProperty::Fill, StyleValue::None);
        assert_eq!(map.to_string(), "fill:none;stroke:#0000ff");
        assert_eq!(map.remove(StyleProperty::Fill), Some(StyleValue::None));
        assert_eq!(map.to_string(), "stroke:#0000ff");
    }

    #[test]
    fn map_round_trip() {
        let text = "fill:url(#g);stroke:#102030;stroke-width:2.5px;stroke-dasharray:1 2 3;\
                    stroke-linecap:square;fill-rule:evenodd;opacity:0.25;visibility:hidden;\
                    font-family:Arial, sans-serif;stroke-miterlimit:8;color:currentColor;fill-opacity:inherit";
        let map = StyleMap::parse(text);
        assert_eq!(map.len(), 12);
        assert_eq!(StyleMap::parse(&map.to_string()), map);
    }

    #[test]
    fn inheritable() {
        assert!(StyleProperty::Fill.is_inheritable());
        assert!(StyleProperty::StrokeWidth.is_inheritable());
        assert!(!StyleProperty::Opacity.is_inheritable());
        assert!(!StyleProperty::StopColor.is_inheritable());
    }

    #[test]
    fn initial_values() {
        assert_eq!(StyleProperty::Fill.initial_value(), StyleValue::Color(Color::black()));
        assert_eq!(StyleProperty::Stroke.initial_value(), StyleValue::None);
        assert_eq!(StyleProperty::Opacity.initial_value(), StyleValue::Opacity(Opacity::ONE));
        assert_eq!(StyleProperty::StrokeMiterlimit.initial_value(), StyleValue::Number(4.0));

        for p in StyleProperty::ALL {
            assert_ne!(p.initial_value(), StyleValue::Inherit);
        }
    }
}
