// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::Display;

use xmlwriter::{Indent, XmlWriter};

use crate::tree::*;
use crate::visitor::{relay_accept, ConstVisitor, Cursor};
use crate::{
    write_path, write_transform_list, AspectRatio, AttributeId, ElementId, Length, StyleValue,
    ViewBox,
};

/// XML writing options.
#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// Used to add a custom prefix to each element ID during writing.
    ///
    /// References are prefixed too.
    pub id_prefix: Option<String>,

    /// Set the coordinates numeric precision.
    ///
    /// Smaller precision can lead to a malformed output in some cases.
    /// When not set, numbers are written in the shortest form
    /// that parses back into the same value.
    ///
    /// Default: `None`
    pub coordinates_precision: Option<u8>,

    /// Set the transform values numeric precision.
    ///
    /// Default: `None`
    pub transforms_precision: Option<u8>,

    /// Use single quote marks instead of double quote.
    ///
    /// Default: disabled
    pub use_single_quote: bool,

    /// Set XML nodes indention.
    ///
    /// Default: 4 spaces
    pub indent: Indent,

    /// Set XML attributes indention.
    ///
    /// # Examples
    ///
    /// `Indent::Spaces(2)`
    ///
    /// ```text
    /// <svg>
    ///     <rect
    ///       fill="#ff0000"
    ///       stroke="#000000"/>
    /// </svg>
    /// ```
    ///
    /// Default: `None`
    pub attributes_indent: Indent,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            id_prefix: Default::default(),
            coordinates_precision: None,
            transforms_precision: None,
            use_single_quote: false,
            indent: Indent::Spaces(4),
            attributes_indent: Indent::None,
        }
    }
}

impl Node {
    /// Writes the subtree as SVG.
    ///
    /// Unspecified lengths and values equal to the attribute default are
    /// not written. The subtree root always carries the SVG namespace,
    /// but only an `svg` root can be parsed back as a document.
    /// Without precision options the output parses back into an equal tree.
    ///
    /// A trailing new line is added only when `indent` is set.
    pub fn to_string(&self, opt: &WriteOptions) -> String {
        let mut writer = Writer {
            xml: XmlWriter::new(xmlwriter::Options {
                use_single_quote: opt.use_single_quote,
                indent: opt.indent,
                attributes_indent: opt.attributes_indent,
            }),
            opt,
        };

        self.accept(&mut writer);
        writer.xml.end_document()
    }
}

struct Writer<'o> {
    xml: XmlWriter,
    opt: &'o WriteOptions,
}

impl Writer<'_> {
    fn start_element(&mut self, element: &dyn Element, cursor: &Cursor) {
        let tag = element.tag_name();
        self.xml.start_element(tag.to_str());

        if cursor.parent().is_none() {
            self.xml.write_attribute("xmlns", "http://www.w3.org/2000/svg");
            self.xml.write_attribute("xmlns:xlink", "http://www.w3.org/1999/xlink");
            if tag == ElementId::Svg {
                self.xml.write_attribute("version", "1.1");
            }
        }

        let id = element.id();
        if !id.is_empty() {
            match self.opt.id_prefix {
                Some(ref prefix) => self.xml.write_attribute_fmt("id", format_args!("{}{}", prefix, id)),
                None => self.xml.write_attribute("id", id),
            }
        }
    }

    // Must be called while the start tag is still open,
    // so after element specific attributes and before any content.
    fn write_capability_attributes(&mut self, element: &dyn Element) {
        if let Some(e) = element.as_rectangle() {
            let bounds = e.bounds();
            let defaults = e.default_bounds();
            self.write_length_or_default(AttributeId::X, bounds.x, defaults.x);
            self.write_length_or_default(AttributeId::Y, bounds.y, defaults.y);
            self.write_length_or_default(AttributeId::Width, bounds.width, defaults.width);
            self.write_length_or_default(AttributeId::Height, bounds.height, defaults.height);
        }

        if let Some(e) = element.as_transformable() {
            if !e.transform().is_empty() {
                let text = match self.opt.transforms_precision {
                    Some(p) => {
                        let list: Vec<_> = e.transform().iter().map(|t| t.map_numbers(|n| round(n, p))).collect();
                        write_transform_list(&list)
                    }
                    None => write_transform_list(e.transform()),
                };
                self.xml.write_attribute(e.transform_attribute().to_str(), &text);
            }
        }

        if let Some(e) = element.as_referencing() {
            self.write_link("xlink:href", e.href());
        }

        if let Some(e) = element.as_styleable() {
            for (property, value) in e.style().iter() {
                match value {
                    StyleValue::Url(link) => {
                        let prefix = self.opt.id_prefix.as_deref().unwrap_or_default();
                        self.xml.write_attribute_fmt(
                            property.to_str(),
                            format_args!("url(#{}{})", prefix, link),
                        );
                    }
                    _ => self.xml.write_attribute(property.to_str(), value),
                }
            }

            if !e.classes().is_empty() {
                self.xml.write_attribute("class", &e.classes().join(" "));
            }
        }
    }

    fn coord(&self, n: f64) -> f64 {
        match self.opt.coordinates_precision {
            Some(p) => round(n, p),
            None => n,
        }
    }

    fn write_attribute<V: Display + ?Sized>(&mut self, aid: AttributeId, value: &V) {
        self.xml.write_attribute(aid.to_str(), value);
    }

    fn write_str(&mut self, aid: AttributeId, value: &str) {
        if !value.is_empty() {
            self.write_attribute(aid, value);
        }
    }

    fn write_length(&mut self, aid: AttributeId, length: Length) {
        if length.is_valid() {
            let n = self.coord(length.number);
            self.xml.write_attribute_fmt(aid.to_str(), format_args!("{}{}", n, length.unit.suffix()));
        }
    }

    fn write_length_or_default(&mut self, aid: AttributeId, length: Length, default: Length) {
        if length != default {
            self.write_length(aid, length);
        }
    }

    fn write_number(&mut self, aid: AttributeId, n: f64) {
        let n = self.coord(n);
        self.write_attribute(aid, &n);
    }

    fn write_link(&mut self, name: &str, link: &str) {
        if !link.is_empty() {
            let prefix = self.opt.id_prefix.as_deref().unwrap_or_default();
            self.xml.write_attribute_fmt(name, format_args!("#{}{}", prefix, link));
        }
    }

    fn write_units(&mut self, aid: AttributeId, units: Option<Units>) {
        if let Some(units) = units {
            self.write_attribute(aid, units.to_str());
        }
    }

    fn write_view_box(&mut self, view_box: Option<ViewBox>, aspect: AspectRatio) {
        if let Some(v) = view_box {
            self.write_attribute(AttributeId::ViewBox, &v);
        }

        if aspect != AspectRatio::default() {
            self.write_attribute(AttributeId::PreserveAspectRatio, &aspect);
        }
    }

    fn write_points(&mut self, points: &[(f64, f64)]) {
        if points.is_empty() {
            return;
        }

        let list: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{},{}", self.coord(*x), self.coord(*y)))
            .collect();
        self.write_attribute(AttributeId::Points, &list.join(" "));
    }

    fn write_gradient_base(&mut self, units: Option<Units>, spread_method: Option<SpreadMethod>) {
        self.write_units(AttributeId::GradientUnits, units);
        if let Some(v) = spread_method {
            self.write_attribute(AttributeId::SpreadMethod, v.to_str());
        }
    }

    fn write_filter_io(&mut self, result: &str, input: &str) {
        self.write_str(AttributeId::In, input);
        self.write_str(AttributeId::Result, result);
    }

    fn write_leaf(&mut self, element: &dyn Element) {
        self.write_capability_attributes(element);
        self.xml.end_element();
    }

    fn write_children<'a>(&mut self, element: &'a dyn Element, cursor: &Cursor<'a, '_>) {
        self.write_capability_attributes(element);
        relay_accept(self, cursor);
        self.xml.end_element();
    }
}

impl<'a> ConstVisitor<'a> for Writer<'_> {
    fn default_visit(&mut self, element: &'a dyn Element, cursor: &Cursor<'a, '_>) {
        self.start_element(element, cursor);
        self.write_leaf(element);
    }

    fn default_visit_container(&mut self, element: &'a dyn Element, cursor: &Cursor<'a, '_>) {
        self.start_element(element, cursor);
        self.write_children(element, cursor);
    }

    fn visit_path(&mut self, e: &'a Path, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        if !e.d.is_empty() {
            let text = match self.opt.coordinates_precision {
                Some(p) => {
                    let steps: Vec<_> = e.d.iter().map(|s| s.map_numbers(|n| round(n, p))).collect();
                    write_path(&steps)
                }
                None => write_path(&e.d),
            };
            self.write_attribute(AttributeId::D, &text);
        }
        self.write_leaf(e);
    }

    fn visit_rect(&mut self, e: &'a Rect, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_length(AttributeId::Rx, e.rx);
        self.write_length(AttributeId::Ry, e.ry);
        self.write_leaf(e);
    }

    fn visit_circle(&mut self, e: &'a Circle, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_length(AttributeId::Cx, e.cx);
        self.write_length(AttributeId::Cy, e.cy);
        self.write_length(AttributeId::R, e.r);
        self.write_leaf(e);
    }

    fn visit_ellipse(&mut self, e: &'a Ellipse, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_length(AttributeId::Cx, e.cx);
        self.write_length(AttributeId::Cy, e.cy);
        self.write_length(AttributeId::Rx, e.rx);
        self.write_length(AttributeId::Ry, e.ry);
        self.write_leaf(e);
    }

    fn visit_line(&mut self, e: &'a Line, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_length(AttributeId::X1, e.x1);
        self.write_length(AttributeId::Y1, e.y1);
        self.write_length(AttributeId::X2, e.x2);
        self.write_length(AttributeId::Y2, e.y2);
        self.write_leaf(e);
    }

    fn visit_polyline(&mut self, e: &'a Polyline, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_points(&e.points);
        self.write_leaf(e);
    }

    fn visit_polygon(&mut self, e: &'a Polygon, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_points(&e.points);
        self.write_leaf(e);
    }

    fn visit_image(&mut self, e: &'a Image, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        if !e.href.is_empty() {
            self.xml.write_attribute("xlink:href", &e.href);
        }
        self.write_view_box(None, e.aspect);
        self.write_leaf(e);
    }

    fn visit_stop(&mut self, e: &'a Stop, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        if e.offset != StopOffset::ZERO {
            self.write_attribute(AttributeId::Offset, &e.offset.get());
        }
        self.write_leaf(e);
    }

    fn visit_svg(&mut self, e: &'a Svg, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_view_box(e.view_box, e.aspect);
        self.write_children(e, cursor);
    }

    fn visit_symbol(&mut self, e: &'a Symbol, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_view_box(e.view_box, e.aspect);
        self.write_children(e, cursor);
    }

    fn visit_mask(&mut self, e: &'a Mask, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_units(AttributeId::MaskUnits, e.units);
        self.write_units(AttributeId::MaskContentUnits, e.content_units);
        self.write_children(e, cursor);
    }

    fn visit_text(&mut self, e: &'a Text, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_capability_attributes(e);
        self.xml.set_preserve_whitespaces(true);
        if !e.text.is_empty() {
            self.xml.write_text(&e.text.replace('&', "&amp;"));
        }
        relay_accept(self, cursor);
        self.xml.end_element();
        self.xml.set_preserve_whitespaces(false);
    }

    fn visit_linear_gradient(&mut self, e: &'a LinearGradient, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_length(AttributeId::X1, e.x1);
        self.write_length(AttributeId::Y1, e.y1);
        self.write_length(AttributeId::X2, e.x2);
        self.write_length(AttributeId::Y2, e.y2);
        self.write_gradient_base(e.units, e.spread_method);
        self.write_children(e, cursor);
    }

    fn visit_radial_gradient(&mut self, e: &'a RadialGradient, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_length(AttributeId::Cx, e.cx);
        self.write_length(AttributeId::Cy, e.cy);
        self.write_length(AttributeId::R, e.r);
        self.write_length(AttributeId::Fx, e.fx);
        self.write_length(AttributeId::Fy, e.fy);
        self.write_gradient_base(e.units, e.spread_method);
        self.write_children(e, cursor);
    }

    fn visit_filter(&mut self, e: &'a Filter, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_units(AttributeId::FilterUnits, e.units);
        self.write_units(AttributeId::PrimitiveUnits, e.primitive_units);
        self.write_children(e, cursor);
    }

    fn visit_fe_gaussian_blur(&mut self, e: &'a FeGaussianBlur, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_filter_io(&e.result, &e.input);
        if e.std_dev_x == e.std_dev_y {
            self.write_number(AttributeId::StdDeviation, e.std_dev_x);
        } else {
            let (x, y) = (self.coord(e.std_dev_x), self.coord(e.std_dev_y));
            self.xml.write_attribute_fmt(
                AttributeId::StdDeviation.to_str(),
                format_args!("{} {}", x, y),
            );
        }
        self.write_leaf(e);
    }

    fn visit_fe_color_matrix(&mut self, e: &'a FeColorMatrix, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_filter_io(&e.result, &e.input);
        match e.kind {
            ColorMatrixKind::Matrix(ref values) => {
                if !values.is_empty() {
                    let list: Vec<String> = values.iter().map(|n| n.to_string()).collect();
                    self.write_attribute(AttributeId::Values, &list.join(" "));
                }
            }
            ColorMatrixKind::Saturate(n) => {
                self.write_attribute(AttributeId::Type, "saturate");
                self.write_attribute(AttributeId::Values, &n);
            }
            ColorMatrixKind::HueRotate(n) => {
                self.write_attribute(AttributeId::Type, "hueRotate");
                self.write_attribute(AttributeId::Values, &n);
            }
            ColorMatrixKind::LuminanceToAlpha => {
                self.write_attribute(AttributeId::Type, "luminanceToAlpha");
            }
        }
        self.write_leaf(e);
    }

    fn visit_fe_blend(&mut self, e: &'a FeBlend, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_filter_io(&e.result, &e.input);
        self.write_str(AttributeId::In2, &e.input2);
        if e.mode != BlendMode::Normal {
            self.write_attribute(AttributeId::Mode, e.mode.to_str());
        }
        self.write_leaf(e);
    }

    fn visit_fe_composite(&mut self, e: &'a FeComposite, cursor: &Cursor<'a, '_>) {
        self.start_element(e, cursor);
        self.write_filter_io(&e.result, &e.input);
        self.write_str(AttributeId::In2, &e.input2);
        if e.operator != CompositeOperator::Over {
            self.write_attribute(AttributeId::Operator, e.operator.to_str());
        }
        if let CompositeOperator::Arithmetic { k1, k2, k3, k4 } = e.operator {
            self.write_attribute(AttributeId::K1, &k1);
            self.write_attribute(AttributeId::K2, &k2);
            self.write_attribute(AttributeId::K3, &k3);
            self.write_attribute(AttributeId::K4, &k4);
        }
        self.write_leaf(e);
    }
}

// Rounds numbers up to the specified precision to prevent writing
// numbers like 29.999999999999996.
fn round(n: f64, precision: u8) -> f64 {
    if n.fract() == 0.0 {
        return n;
    }

    let p = 10f64.powi(i32::from(precision));
    let v = (n * p).round() / p;
    // Avoid `-0`.
    if v == 0.0 {
        0.0
    } else {
        v
    }
}
