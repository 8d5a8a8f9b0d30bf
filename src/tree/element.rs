// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::{Bounds, Container, Element, Node, Rectangle, Referencing, Styleable, Transformable};
use crate::{
    AspectRatio, AttributeId, ElementId, Length, LengthUnit, PathStep, StyleMap, Transformation,
    ViewBox,
};

/// An alias to `NormalizedF64`.
pub type StopOffset = strict_num::NormalizedF64;

/// A coordinate system units.
///
/// `*Units` attributes in SVG.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Units {
    UserSpaceOnUse,
    ObjectBoundingBox,
}

impl Units {
    pub(crate) fn to_str(self) -> &'static str {
        match self {
            Units::UserSpaceOnUse => "userSpaceOnUse",
            Units::ObjectBoundingBox => "objectBoundingBox",
        }
    }
}

/// A spread method.
///
/// `spreadMethod` attribute in SVG.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SpreadMethod {
    Pad,
    Reflect,
    Repeat,
}

impl SpreadMethod {
    pub(crate) fn to_str(self) -> &'static str {
        match self {
            SpreadMethod::Pad => "pad",
            SpreadMethod::Reflect => "reflect",
            SpreadMethod::Repeat => "repeat",
        }
    }
}

/// A color matrix used by the `feColorMatrix` filter.
#[derive(Clone, PartialEq, Debug)]
pub enum ColorMatrixKind {
    /// A 5x4 matrix. An empty list is the identity matrix.
    Matrix(Vec<f64>),
    #[allow(missing_docs)]
    Saturate(f64),
    #[allow(missing_docs)]
    HueRotate(f64),
    #[allow(missing_docs)]
    LuminanceToAlpha,
}

impl Default for ColorMatrixKind {
    fn default() -> Self {
        ColorMatrixKind::Matrix(Vec::new())
    }
}

/// An image blending mode.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Darken,
    Lighten,
}

impl BlendMode {
    pub(crate) fn to_str(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
        }
    }
}

/// An images compositing operation.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub enum CompositeOperator {
    #[default]
    Over,
    In,
    Out,
    Atop,
    Xor,
    Arithmetic { k1: f64, k2: f64, k3: f64, k4: f64 },
}

impl CompositeOperator {
    pub(crate) fn to_str(self) -> &'static str {
        match self {
            CompositeOperator::Over => "over",
            CompositeOperator::In => "in",
            CompositeOperator::Out => "out",
            CompositeOperator::Atop => "atop",
            CompositeOperator::Xor => "xor",
            CompositeOperator::Arithmetic { .. } => "arithmetic",
        }
    }
}

/// A `path` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Path {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub transform: Vec<Transformation>,
    /// Path data in the document order.
    ///
    /// `d` in SVG.
    pub d: Vec<PathStep>,
}

/// A `rect` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Rect {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub transform: Vec<Transformation>,
    pub bounds: Bounds,
    pub rx: Length,
    pub ry: Length,
}

/// A `circle` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Circle {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub transform: Vec<Transformation>,
    pub cx: Length,
    pub cy: Length,
    pub r: Length,
}

/// An `ellipse` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Ellipse {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub transform: Vec<Transformation>,
    pub cx: Length,
    pub cy: Length,
    pub rx: Length,
    pub ry: Length,
}

/// A `line` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Line {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub transform: Vec<Transformation>,
    pub x1: Length,
    pub y1: Length,
    pub x2: Length,
    pub y2: Length,
}

/// A `polyline` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Polyline {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub transform: Vec<Transformation>,
    pub points: Vec<(f64, f64)>,
}

/// A `polygon` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Polygon {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub transform: Vec<Transformation>,
    pub points: Vec<(f64, f64)>,
}

/// A `g` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Group {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub transform: Vec<Transformation>,
    pub children: Vec<Node>,
}

/// A `defs` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Defs {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub transform: Vec<Transformation>,
    pub children: Vec<Node>,
}

/// An `svg` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Svg {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub bounds: Bounds,
    pub view_box: Option<ViewBox>,
    pub aspect: AspectRatio,
    pub children: Vec<Node>,
}

/// A `symbol` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Symbol {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub view_box: Option<ViewBox>,
    pub aspect: AspectRatio,
    pub children: Vec<Node>,
}

/// A `mask` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Mask {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub bounds: Bounds,
    /// `maskUnits` in SVG.
    pub units: Option<Units>,
    /// `maskContentUnits` in SVG.
    pub content_units: Option<Units>,
    pub children: Vec<Node>,
}

/// A `use` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Use {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub transform: Vec<Transformation>,
    pub bounds: Bounds,
    pub href: String,
}

/// An `image` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Image {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub transform: Vec<Transformation>,
    pub bounds: Bounds,
    /// An external resource link.
    ///
    /// Unlike `use`, an image doesn't reference document elements.
    pub href: String,
    pub aspect: AspectRatio,
}

/// A `text` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Text {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub transform: Vec<Transformation>,
    /// Character data with collapsed whitespaces.
    pub text: String,
    pub children: Vec<Node>,
}

/// A gradient `stop` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub struct Stop {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub offset: StopOffset,
}

impl Default for Stop {
    fn default() -> Self {
        Stop {
            id: String::new(),
            style: StyleMap::default(),
            classes: Vec::new(),
            offset: StopOffset::ZERO,
        }
    }
}

/// A `linearGradient` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct LinearGradient {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub href: String,
    /// `gradientUnits` in SVG.
    pub units: Option<Units>,
    pub spread_method: Option<SpreadMethod>,
    /// `gradientTransform` in SVG.
    pub transform: Vec<Transformation>,
    pub x1: Length,
    pub y1: Length,
    pub x2: Length,
    pub y2: Length,
    pub children: Vec<Node>,
}

/// A `radialGradient` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct RadialGradient {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub href: String,
    /// `gradientUnits` in SVG.
    pub units: Option<Units>,
    pub spread_method: Option<SpreadMethod>,
    /// `gradientTransform` in SVG.
    pub transform: Vec<Transformation>,
    pub cx: Length,
    pub cy: Length,
    pub r: Length,
    pub fx: Length,
    pub fy: Length,
    pub children: Vec<Node>,
}

/// A `filter` element.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Filter {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub bounds: Bounds,
    pub href: String,
    /// `filterUnits` in SVG.
    pub units: Option<Units>,
    /// `primitiveUnits` in SVG.
    pub primitive_units: Option<Units>,
    pub children: Vec<Node>,
}

/// An `feGaussianBlur` filter primitive.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct FeGaussianBlur {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub bounds: Bounds,
    pub result: String,
    pub input: String,
    pub std_dev_x: f64,
    pub std_dev_y: f64,
}

/// An `feColorMatrix` filter primitive.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct FeColorMatrix {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub bounds: Bounds,
    pub result: String,
    pub input: String,
    pub kind: ColorMatrixKind,
}

/// An `feBlend` filter primitive.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct FeBlend {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub bounds: Bounds,
    pub result: String,
    pub input: String,
    pub input2: String,
    pub mode: BlendMode,
}

/// An `feComposite` filter primitive.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Default, Debug)]
pub struct FeComposite {
    pub id: String,
    pub style: StyleMap,
    pub classes: Vec<String>,
    pub bounds: Bounds,
    pub result: String,
    pub input: String,
    pub input2: String,
    pub operator: CompositeOperator,
}

macro_rules! impl_element {
    ($name:ident, $eid:ident, [$($cap:ident),*]) => {
        impl Element for $name {
            fn id(&self) -> &str {
                &self.id
            }

            fn tag_name(&self) -> ElementId {
                ElementId::$eid
            }

            $(impl_element!(@$cap);)*
        }
    };
    (@container) => {
        fn as_container(&self) -> Option<&dyn Container> { Some(self) }
        fn as_container_mut(&mut self) -> Option<&mut dyn Container> { Some(self) }
    };
    (@styleable) => {
        fn as_styleable(&self) -> Option<&dyn Styleable> { Some(self) }
        fn as_styleable_mut(&mut self) -> Option<&mut dyn Styleable> { Some(self) }
    };
    (@transformable) => {
        fn as_transformable(&self) -> Option<&dyn Transformable> { Some(self) }
        fn as_transformable_mut(&mut self) -> Option<&mut dyn Transformable> { Some(self) }
    };
    (@referencing) => {
        fn as_referencing(&self) -> Option<&dyn Referencing> { Some(self) }
        fn as_referencing_mut(&mut self) -> Option<&mut dyn Referencing> { Some(self) }
    };
    (@rectangle) => {
        fn as_rectangle(&self) -> Option<&dyn Rectangle> { Some(self) }
        fn as_rectangle_mut(&mut self) -> Option<&mut dyn Rectangle> { Some(self) }
    };
}

impl_element!(Circle, Circle, [styleable, transformable]);
impl_element!(Defs, Defs, [container, styleable, transformable]);
impl_element!(Ellipse, Ellipse, [styleable, transformable]);
impl_element!(FeBlend, FeBlend, [styleable, rectangle]);
impl_element!(FeColorMatrix, FeColorMatrix, [styleable, rectangle]);
impl_element!(FeComposite, FeComposite, [styleable, rectangle]);
impl_element!(FeGaussianBlur, FeGaussianBlur, [styleable, rectangle]);
impl_element!(Filter, Filter, [container, styleable, referencing, rectangle]);
impl_element!(Group, G, [container, styleable, transformable]);
impl_element!(Image, Image, [styleable, transformable, rectangle]);
impl_element!(Line, Line, [styleable, transformable]);
impl_element!(LinearGradient, LinearGradient, [container, styleable, transformable, referencing]);
impl_element!(Mask, Mask, [container, styleable, rectangle]);
impl_element!(Path, Path, [styleable, transformable]);
impl_element!(Polygon, Polygon, [styleable, transformable]);
impl_element!(Polyline, Polyline, [styleable, transformable]);
impl_element!(RadialGradient, RadialGradient, [container, styleable, transformable, referencing]);
impl_element!(Rect, Rect, [styleable, transformable, rectangle]);
impl_element!(Stop, Stop, [styleable]);
impl_element!(Svg, Svg, [container, styleable, rectangle]);
impl_element!(Symbol, Symbol, [container, styleable]);
impl_element!(Text, Text, [container, styleable, transformable]);
impl_element!(Use, Use, [styleable, transformable, referencing, rectangle]);

macro_rules! impl_styleable {
    ($($name:ident),+) => {
        $(
            impl Styleable for $name {
                fn style(&self) -> &StyleMap { &self.style }
                fn style_mut(&mut self) -> &mut StyleMap { &mut self.style }
                fn classes(&self) -> &[String] { &self.classes }
                fn classes_mut(&mut self) -> &mut Vec<String> { &mut self.classes }
            }
        )+
    };
}

impl_styleable!(
    Circle, Defs, Ellipse, FeBlend, FeColorMatrix, FeComposite, FeGaussianBlur, Filter, Group,
    Image, Line, LinearGradient, Mask, Path, Polygon, Polyline, RadialGradient, Rect, Stop, Svg,
    Symbol, Text, Use
);

macro_rules! impl_transformable {
    ($aid:ident: $($name:ident),+) => {
        $(
            impl Transformable for $name {
                fn transform(&self) -> &[Transformation] { &self.transform }
                fn transform_mut(&mut self) -> &mut Vec<Transformation> { &mut self.transform }
                fn transform_attribute(&self) -> AttributeId { AttributeId::$aid }
            }
        )+
    };
}

impl_transformable!(Transform:
    Circle, Defs, Ellipse, Group, Image, Line, Path, Polygon, Polyline, Rect, Text, Use
);
impl_transformable!(GradientTransform: LinearGradient, RadialGradient);

macro_rules! impl_referencing {
    ($($name:ident),+) => {
        $(
            impl Referencing for $name {
                fn href(&self) -> &str { &self.href }
                fn href_mut(&mut self) -> &mut String { &mut self.href }
            }
        )+
    };
}

impl_referencing!(Filter, LinearGradient, RadialGradient, Use);

const ZERO: Length = Length::zero();
const fn percent(n: f64) -> Length {
    Length::new(n, LengthUnit::Percent)
}

macro_rules! impl_rectangle {
    ([$x:expr, $y:expr, $w:expr, $h:expr] $($name:ident),+) => {
        $(
            impl Rectangle for $name {
                fn bounds(&self) -> &Bounds { &self.bounds }
                fn bounds_mut(&mut self) -> &mut Bounds { &mut self.bounds }
                fn default_bounds(&self) -> Bounds { Bounds::new($x, $y, $w, $h) }
            }
        )+
    };
}

impl_rectangle!([ZERO, ZERO, ZERO, ZERO] Image, Rect, Use);
impl_rectangle!([ZERO, ZERO, percent(100.0), percent(100.0)] Svg);
impl_rectangle!([percent(-10.0), percent(-10.0), percent(120.0), percent(120.0)] Filter, Mask);
impl_rectangle!(
    [percent(0.0), percent(0.0), percent(100.0), percent(100.0)]
    FeBlend, FeColorMatrix, FeComposite, FeGaussianBlur
);

// Containers are cloned without children. The children are cloned
// separately, by walking the tree.
macro_rules! impl_container {
    ($($name:ident { $($field:ident),* }),+ $(,)?) => {
        $(
            impl Container for $name {
                fn children(&self) -> &[Node] { &self.children }
                fn children_mut(&mut self) -> &mut Vec<Node> { &mut self.children }
            }

            impl $name {
                pub(crate) fn shallow_clone(&self) -> Self {
                    $name {
                        $($field: self.$field.clone(),)*
                        children: Vec::new(),
                    }
                }
            }
        )+
    };
}

impl_container!(
    Defs { id, style, classes, transform },
    Filter { id, style, classes, bounds, href, units, primitive_units },
    Group { id, style, classes, transform },
    LinearGradient { id, style, classes, href, units, spread_method, transform, x1, y1, x2, y2 },
    Mask { id, style, classes, bounds, units, content_units },
    RadialGradient { id, style, classes, href, units, spread_method, transform, cx, cy, r, fx, fy },
    Svg { id, style, classes, bounds, view_box, aspect },
    Symbol { id, style, classes, view_box, aspect },
    Text { id, style, classes, transform, text },
);

impl Node {
    /// Clones the node without its children.
    pub fn shallow_clone(&self) -> Node {
        match self {
            Node::Defs(e) => Node::Defs(e.shallow_clone()),
            Node::Filter(e) => Node::Filter(e.shallow_clone()),
            Node::G(e) => Node::G(e.shallow_clone()),
            Node::LinearGradient(e) => Node::LinearGradient(e.shallow_clone()),
            Node::Mask(e) => Node::Mask(e.shallow_clone()),
            Node::RadialGradient(e) => Node::RadialGradient(e.shallow_clone()),
            Node::Svg(e) => Node::Svg(e.shallow_clone()),
            Node::Symbol(e) => Node::Symbol(e.shallow_clone()),
            Node::Text(e) => Node::Text(e.shallow_clone()),
            Node::Circle(e) => Node::Circle(e.clone()),
            Node::Ellipse(e) => Node::Ellipse(e.clone()),
            Node::FeBlend(e) => Node::FeBlend(e.clone()),
            Node::FeColorMatrix(e) => Node::FeColorMatrix(e.clone()),
            Node::FeComposite(e) => Node::FeComposite(e.clone()),
            Node::FeGaussianBlur(e) => Node::FeGaussianBlur(e.clone()),
            Node::Image(e) => Node::Image(e.clone()),
            Node::Line(e) => Node::Line(e.clone()),
            Node::Path(e) => Node::Path(e.clone()),
            Node::Polygon(e) => Node::Polygon(e.clone()),
            Node::Polyline(e) => Node::Polyline(e.clone()),
            Node::Rect(e) => Node::Rect(e.clone()),
            Node::Stop(e) => Node::Stop(e.clone()),
            Node::Use(e) => Node::Use(e.clone()),
        }
    }
}
