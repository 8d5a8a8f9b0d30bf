// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use super::*;
use crate::stream::parse_number_list;
use crate::{
    parse_transform_list, AspectRatio, PathParser, PathStep, StyleProperty, Transformation,
    ViewBox,
};

// Attributes that depend on other attributes of the same element.
fn is_deferred(name: &str) -> bool {
    matches!(name, "values" | "k1" | "k2" | "k3" | "k4")
}

impl Node {
    /// Creates an element from its attributes.
    ///
    /// Presentation attributes are stored in the style map,
    /// while the `style` attribute overrides them.
    /// Unknown attributes are ignored. Invalid values are replaced
    /// with defaults and a warning is logged.
    pub fn from_attributes<'a, I>(tag: ElementId, attributes: I) -> Node
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut node = Node::new(tag);

        let mut deferred = Vec::new();
        let mut style = None;
        for (name, value) in attributes {
            if name == "style" {
                style = Some(value);
            } else if is_deferred(name) {
                deferred.push((name, value));
            } else {
                node.set_attribute(name, value);
            }
        }

        for (name, value) in deferred {
            node.set_attribute(name, value);
        }

        if let Some(value) = style {
            node.set_attribute("style", value);
        }

        node
    }

    /// Parses and sets an attribute.
    ///
    /// An attribute that is not supported by the element is ignored.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match name {
            "id" => with_element!(self, e => e.id = value.to_string()),
            "style" => {
                if let Some(style) = self.style_mut() {
                    style.append_declarations(value);
                }
            }
            "class" => {
                if let Some(e) = self.element_mut().as_styleable_mut() {
                    *e.classes_mut() = value.split_whitespace().map(String::from).collect();
                }
            }
            "href" | "xlink:href" => self.set_href(value),
            _ => {
                if let Some(property) = StyleProperty::from_str(name) {
                    if let Some(style) = self.style_mut() {
                        style.insert_str(property, value);
                    }
                } else if let Some(aid) = AttributeId::from_str(name) {
                    self.set_known_attribute(aid, value);
                } else {
                    log::debug!("Unsupported attribute '{}' skipped.", name);
                }
            }
        }
    }

    fn set_href(&mut self, value: &str) {
        if let Node::Image(e) = self {
            e.href = value.to_string();
            return;
        }

        if let Some(e) = self.element_mut().as_referencing_mut() {
            match value.trim().strip_prefix('#') {
                Some(link) if !link.is_empty() => *e.href_mut() = link.to_string(),
                _ => log::warn!("Failed to parse href value: '{}'.", value),
            }
        }
    }

    fn set_known_attribute(&mut self, aid: AttributeId, value: &str) {
        if let Some(e) = self.element_mut().as_transformable_mut() {
            if e.transform_attribute() == aid {
                *e.transform_mut() = parse_transform(aid, value);
                return;
            }
        }

        if let Some(e) = self.element_mut().as_rectangle_mut() {
            let defaults = e.default_bounds();
            let bounds = e.bounds_mut();
            let target = match aid {
                AttributeId::X => Some((&mut bounds.x, defaults.x)),
                AttributeId::Y => Some((&mut bounds.y, defaults.y)),
                AttributeId::Width => Some((&mut bounds.width, defaults.width)),
                AttributeId::Height => Some((&mut bounds.height, defaults.height)),
                _ => None,
            };

            // A value equal to the default is stored as unspecified,
            // so it's elided on write and a reparsed tree stays equal.
            if let Some((target, default)) = target {
                let length = parse_length(aid, value);
                *target = if length == default { Length::unspecified() } else { length };
                return;
            }
        }

        match self {
            Node::Path(e) => {
                if aid == AttributeId::D {
                    e.d = parse_path_data(value);
                }
            }
            Node::Rect(e) => match aid {
                AttributeId::Rx => e.rx = parse_length(aid, value),
                AttributeId::Ry => e.ry = parse_length(aid, value),
                _ => {}
            },
            Node::Circle(e) => match aid {
                AttributeId::Cx => e.cx = parse_length(aid, value),
                AttributeId::Cy => e.cy = parse_length(aid, value),
                AttributeId::R => e.r = parse_length(aid, value),
                _ => {}
            },
            Node::Ellipse(e) => match aid {
                AttributeId::Cx => e.cx = parse_length(aid, value),
                AttributeId::Cy => e.cy = parse_length(aid, value),
                AttributeId::Rx => e.rx = parse_length(aid, value),
                AttributeId::Ry => e.ry = parse_length(aid, value),
                _ => {}
            },
            Node::Line(e) => match aid {
                AttributeId::X1 => e.x1 = parse_length(aid, value),
                AttributeId::Y1 => e.y1 = parse_length(aid, value),
                AttributeId::X2 => e.x2 = parse_length(aid, value),
                AttributeId::Y2 => e.y2 = parse_length(aid, value),
                _ => {}
            },
            Node::Polyline(e) => {
                if aid == AttributeId::Points {
                    e.points = parse_points(value);
                }
            }
            Node::Polygon(e) => {
                if aid == AttributeId::Points {
                    e.points = parse_points(value);
                }
            }
            Node::Svg(e) => match aid {
                AttributeId::ViewBox => e.view_box = parse_view_box(value),
                AttributeId::PreserveAspectRatio => e.aspect = parse_aspect(value),
                _ => {}
            },
            Node::Symbol(e) => match aid {
                AttributeId::ViewBox => e.view_box = parse_view_box(value),
                AttributeId::PreserveAspectRatio => e.aspect = parse_aspect(value),
                _ => {}
            },
            Node::Image(e) => {
                if aid == AttributeId::PreserveAspectRatio {
                    e.aspect = parse_aspect(value);
                }
            }
            Node::Mask(e) => match aid {
                AttributeId::MaskUnits => e.units = parse_units(aid, value),
                AttributeId::MaskContentUnits => e.content_units = parse_units(aid, value),
                _ => {}
            },
            Node::LinearGradient(e) => match aid {
                AttributeId::GradientUnits => e.units = parse_units(aid, value),
                AttributeId::SpreadMethod => e.spread_method = parse_spread_method(value),
                AttributeId::X1 => e.x1 = parse_length(aid, value),
                AttributeId::Y1 => e.y1 = parse_length(aid, value),
                AttributeId::X2 => e.x2 = parse_length(aid, value),
                AttributeId::Y2 => e.y2 = parse_length(aid, value),
                _ => {}
            },
            Node::RadialGradient(e) => match aid {
                AttributeId::GradientUnits => e.units = parse_units(aid, value),
                AttributeId::SpreadMethod => e.spread_method = parse_spread_method(value),
                AttributeId::Cx => e.cx = parse_length(aid, value),
                AttributeId::Cy => e.cy = parse_length(aid, value),
                AttributeId::R => e.r = parse_length(aid, value),
                AttributeId::Fx => e.fx = parse_length(aid, value),
                AttributeId::Fy => e.fy = parse_length(aid, value),
                _ => {}
            },
            Node::Stop(e) => {
                if aid == AttributeId::Offset {
                    e.offset = parse_offset(value);
                }
            }
            Node::Filter(e) => match aid {
                AttributeId::FilterUnits => e.units = parse_units(aid, value),
                AttributeId::PrimitiveUnits => e.primitive_units = parse_units(aid, value),
                _ => {}
            },
            Node::FeGaussianBlur(e) => match aid {
                AttributeId::Result => e.result = value.to_string(),
                AttributeId::In => e.input = value.to_string(),
                AttributeId::StdDeviation => {
                    let (x, y) = parse_std_deviation(value);
                    e.std_dev_x = x;
                    e.std_dev_y = y;
                }
                _ => {}
            },
            Node::FeColorMatrix(e) => match aid {
                AttributeId::Result => e.result = value.to_string(),
                AttributeId::In => e.input = value.to_string(),
                AttributeId::Type => e.kind = parse_color_matrix_type(value),
                AttributeId::Values => set_color_matrix_values(&mut e.kind, value),
                _ => {}
            },
            Node::FeBlend(e) => match aid {
                AttributeId::Result => e.result = value.to_string(),
                AttributeId::In => e.input = value.to_string(),
                AttributeId::In2 => e.input2 = value.to_string(),
                AttributeId::Mode => e.mode = parse_blend_mode(value),
                _ => {}
            },
            Node::FeComposite(e) => match aid {
                AttributeId::Result => e.result = value.to_string(),
                AttributeId::In => e.input = value.to_string(),
                AttributeId::In2 => e.input2 = value.to_string(),
                AttributeId::Operator => e.operator = parse_composite_operator(value),
                AttributeId::K1 | AttributeId::K2 | AttributeId::K3 | AttributeId::K4 => {
                    set_arithmetic_coefficient(&mut e.operator, aid, value)
                }
                _ => {}
            },
            _ => {}
        }
    }
}

fn warn_invalid(aid: AttributeId, value: &str) {
    log::warn!("Failed to parse {} value: '{}'.", aid, value);
}

fn parse_length(aid: AttributeId, value: &str) -> Length {
    let length = Length::parse(value);
    if !length.is_valid() {
        warn_invalid(aid, value);
    }

    length
}

fn parse_number(aid: AttributeId, value: &str) -> f64 {
    match parse_number_list(value) {
        (list, None) if list.len() == 1 => list[0],
        _ => {
            warn_invalid(aid, value);
            0.0
        }
    }
}

fn parse_transform(aid: AttributeId, value: &str) -> Vec<Transformation> {
    match parse_transform_list(value) {
        Ok(list) => list,
        Err(e) => {
            log::warn!("Failed to parse {} value: '{}' cause {}.", aid, value, e);
            Vec::new()
        }
    }
}

// Path data is rendered up to the first error, so valid steps are kept.
fn parse_path_data(value: &str) -> Vec<PathStep> {
    let mut steps = Vec::new();
    for step in PathParser::from(value) {
        match step {
            Ok(step) => steps.push(step),
            Err(e) => {
                log::warn!("Failed to parse path data: {}.", e);
                break;
            }
        }
    }

    steps
}

fn parse_points(value: &str) -> Vec<(f64, f64)> {
    let (list, err) = parse_number_list(value);
    if err.is_some() || list.len() % 2 != 0 {
        warn_invalid(AttributeId::Points, value);
    }

    list.chunks_exact(2).map(|p| (p[0], p[1])).collect()
}

fn parse_view_box(value: &str) -> Option<ViewBox> {
    match ViewBox::from_str(value) {
        Ok(v) => Some(v),
        Err(_) => {
            warn_invalid(AttributeId::ViewBox, value);
            None
        }
    }
}

fn parse_aspect(value: &str) -> AspectRatio {
    AspectRatio::from_str(value).unwrap_or_else(|_| {
        warn_invalid(AttributeId::PreserveAspectRatio, value);
        AspectRatio::default()
    })
}

fn parse_units(aid: AttributeId, value: &str) -> Option<Units> {
    match value {
        "userSpaceOnUse" => Some(Units::UserSpaceOnUse),
        "objectBoundingBox" => Some(Units::ObjectBoundingBox),
        _ => {
            warn_invalid(aid, value);
            None
        }
    }
}

fn parse_spread_method(value: &str) -> Option<SpreadMethod> {
    match value {
        "pad" => Some(SpreadMethod::Pad),
        "reflect" => Some(SpreadMethod::Reflect),
        "repeat" => Some(SpreadMethod::Repeat),
        _ => {
            warn_invalid(AttributeId::SpreadMethod, value);
            None
        }
    }
}

fn parse_offset(value: &str) -> StopOffset {
    let mut s = crate::Stream::from(value);
    match s.parse_number_or_percent() {
        Ok(n) => StopOffset::new_clamped(n),
        Err(_) => {
            warn_invalid(AttributeId::Offset, value);
            StopOffset::ZERO
        }
    }
}

fn parse_std_deviation(value: &str) -> (f64, f64) {
    let (list, err) = parse_number_list(value);
    match (list.as_slice(), err) {
        ([x], None) if *x >= 0.0 => (*x, *x),
        ([x, y], None) if *x >= 0.0 && *y >= 0.0 => (*x, *y),
        _ => {
            warn_invalid(AttributeId::StdDeviation, value);
            (0.0, 0.0)
        }
    }
}

fn parse_color_matrix_type(value: &str) -> ColorMatrixKind {
    match value {
        "matrix" => ColorMatrixKind::Matrix(Vec::new()),
        "saturate" => ColorMatrixKind::Saturate(1.0),
        "hueRotate" => ColorMatrixKind::HueRotate(0.0),
        "luminanceToAlpha" => ColorMatrixKind::LuminanceToAlpha,
        _ => {
            warn_invalid(AttributeId::Type, value);
            ColorMatrixKind::default()
        }
    }
}

fn set_color_matrix_values(kind: &mut ColorMatrixKind, value: &str) {
    let aid = AttributeId::Values;
    match kind {
        ColorMatrixKind::Matrix(values) => match parse_number_list(value) {
            (list, None) if list.len() == 20 => *values = list,
            _ => warn_invalid(aid, value),
        },
        ColorMatrixKind::Saturate(v) => {
            let n = parse_number(aid, value);
            // A negative saturation is an error.
            *v = if n >= 0.0 { n } else { 1.0 };
        }
        ColorMatrixKind::HueRotate(v) => *v = parse_number(aid, value),
        ColorMatrixKind::LuminanceToAlpha => {}
    }
}

fn parse_blend_mode(value: &str) -> BlendMode {
    match value {
        "normal" => BlendMode::Normal,
        "multiply" => BlendMode::Multiply,
        "screen" => BlendMode::Screen,
        "darken" => BlendMode::Darken,
        "lighten" => BlendMode::Lighten,
        _ => {
            warn_invalid(AttributeId::Mode, value);
            BlendMode::default()
        }
    }
}

fn parse_composite_operator(value: &str) -> CompositeOperator {
    match value {
        "over" => CompositeOperator::Over,
        "in" => CompositeOperator::In,
        "out" => CompositeOperator::Out,
        "atop" => CompositeOperator::Atop,
        "xor" => CompositeOperator::Xor,
        "arithmetic" => CompositeOperator::Arithmetic {
            k1: 0.0,
            k2: 0.0,
            k3: 0.0,
            k4: 0.0,
        },
        _ => {
            warn_invalid(AttributeId::Operator, value);
            CompositeOperator::default()
        }
    }
}

fn set_arithmetic_coefficient(operator: &mut CompositeOperator, aid: AttributeId, value: &str) {
    if let CompositeOperator::Arithmetic { k1, k2, k3, k4 } = operator {
        let n = parse_number(aid, value);
        match aid {
            AttributeId::K1 => *k1 = n,
            AttributeId::K2 => *k2 = n,
            AttributeId::K3 => *k3 = n,
            _ => *k4 = n,
        }
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, LengthUnit, StyleValue};

    fn build(tag: ElementId, attrs: &[(&str, &str)]) -> Node {
        Node::from_attributes(tag, attrs.iter().copied())
    }

    #[test]
    fn presentation_attributes() {
        let node = build(ElementId::Rect, &[
            ("style", "fill:blue"),
            ("fill", "red"),
            ("stroke", "green"),
        ]);

        let style = node.style().unwrap();
        assert_eq!(style.get(StyleProperty::Fill), Some(&StyleValue::Color(Color::new_rgb(0, 0, 255))));
        assert_eq!(style.get(StyleProperty::Stroke), Some(&StyleValue::Color(Color::new_rgb(0, 128, 0))));
    }

    #[test]
    fn rect() {
        let node = build(ElementId::Rect, &[
            ("id", "r"),
            ("x", "10"),
            ("width", "50%"),
            ("rx", "2mm"),
            ("class", " a  b "),
            ("transform", "translate(5) scale(2)"),
        ]);

        match node {
            Node::Rect(ref e) => {
                assert_eq!(e.id, "r");
                assert_eq!(e.bounds.x, Length::new_number(10.0));
                assert_eq!(e.bounds.width, Length::new_percent(50.0));
                assert!(!e.bounds.y.is_valid());
                assert_eq!(e.rx, Length::new(2.0, LengthUnit::Mm));
                assert_eq!(e.classes, vec!["a".to_string(), "b".to_string()]);
                assert_eq!(e.transform.len(), 2);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn default_bounds_are_unspecified() {
        let node = build(ElementId::Svg, &[("x", "0"), ("width", "100%"), ("height", "100")]);
        let bounds = node.element().as_rectangle().unwrap().bounds();
        assert!(!bounds.x.is_valid());
        assert!(!bounds.width.is_valid());
        assert_eq!(bounds.height, Length::new_number(100.0));

        let node = build(ElementId::Mask, &[("x", "-10%"), ("y", "0")]);
        let bounds = node.element().as_rectangle().unwrap().bounds();
        assert!(!bounds.x.is_valid());
        assert_eq!(bounds.y, Length::zero());
    }

    #[test]
    fn invalid_values() {
        let node = build(ElementId::Circle, &[
            ("r", "qwe"),
            ("transform", "translate(5) qwe"),
        ]);

        match node {
            Node::Circle(ref e) => {
                assert_eq!(e.r, Length::unspecified());
                assert!(e.transform.is_empty());
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn path_keeps_valid_prefix() {
        let node = build(ElementId::Path, &[("d", "M 10 20 L 30 40 L 50")]);
        match node {
            Node::Path(ref e) => {
                assert_eq!(e.d, vec![
                    PathStep::MoveToAbs { x: 10.0, y: 20.0 },
                    PathStep::LineToAbs { x: 30.0, y: 40.0 },
                ]);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn href() {
        let node = build(ElementId::Use, &[("xlink:href", "#target")]);
        assert_eq!(node.element().as_referencing().unwrap().href(), "target");

        let node = build(ElementId::LinearGradient, &[("href", "#lg")]);
        assert_eq!(node.element().as_referencing().unwrap().href(), "lg");

        let node = build(ElementId::Use, &[("href", "target")]);
        assert_eq!(node.element().as_referencing().unwrap().href(), "");

        let node = build(ElementId::Image, &[("xlink:href", "image.png")]);
        match node {
            Node::Image(ref e) => assert_eq!(e.href, "image.png"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn gradient() {
        let node = build(ElementId::RadialGradient, &[
            ("gradientUnits", "userSpaceOnUse"),
            ("spreadMethod", "reflect"),
            ("gradientTransform", "rotate(45)"),
            ("transform", "scale(2)"),
            ("fx", "10%"),
        ]);

        match node {
            Node::RadialGradient(ref e) => {
                assert_eq!(e.units, Some(Units::UserSpaceOnUse));
                assert_eq!(e.spread_method, Some(SpreadMethod::Reflect));
                assert_eq!(e.transform, vec![Transformation::Rotate { angle: 45.0, center: None }]);
                assert_eq!(e.fx, Length::new_percent(10.0));
                assert!(!e.cx.is_valid());
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn stop_offset() {
        for (text, n) in [("0.5", 0.5), ("50%", 0.5), ("2", 1.0), ("-1", 0.0), ("qwe", 0.0)] {
            match build(ElementId::Stop, &[("offset", text)]) {
                Node::Stop(ref e) => assert_eq!(e.offset.get(), n, "{}", text),
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn points() {
        match build(ElementId::Polygon, &[("points", "0,0 10,0 10,10 5")]) {
            Node::Polygon(ref e) => assert_eq!(e.points, vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]),
            _ => unreachable!(),
        }
    }

    #[test]
    fn color_matrix_values_before_type() {
        match build(ElementId::FeColorMatrix, &[("values", "0.5"), ("type", "saturate")]) {
            Node::FeColorMatrix(ref e) => assert_eq!(e.kind, ColorMatrixKind::Saturate(0.5)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn composite_arithmetic() {
        match build(ElementId::FeComposite, &[("k2", "0.5"), ("operator", "arithmetic"), ("in2", "b")]) {
            Node::FeComposite(ref e) => {
                assert_eq!(e.operator, CompositeOperator::Arithmetic { k1: 0.0, k2: 0.5, k3: 0.0, k4: 0.0 });
                assert_eq!(e.input2, "b");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn gaussian_blur() {
        match build(ElementId::FeGaussianBlur, &[("stdDeviation", "2 3"), ("in", "SourceGraphic")]) {
            Node::FeGaussianBlur(ref e) => {
                assert_eq!((e.std_dev_x, e.std_dev_y), (2.0, 3.0));
                assert_eq!(e.input, "SourceGraphic");
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn svg_view_box() {
        match build(ElementId::Svg, &[("viewBox", "0 0 10 20"), ("preserveAspectRatio", "xMinYMin slice")]) {
            Node::Svg(ref e) => {
                assert_eq!(e.view_box, Some(ViewBox::new(0.0, 0.0, 10.0, 20.0)));
                assert!(e.aspect.slice);
            }
            _ => unreachable!(),
        }
    }
}
