// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The document tree.
//!
//! A [`Node`] is a closed set of element kinds. Shared behavior is exposed
//! through capability traits, so a consumer can ask "is it styleable?"
//! without matching on every kind.

use std::fmt::Debug;

use kurbo::Affine;

use crate::{AttributeId, ElementId, Length, StyleMap, Transformation};

pub use self::element::*;

mod builder;
mod element;

/// A common element interface.
pub trait Element: Debug {
    /// Returns element's ID.
    ///
    /// An empty string when not set.
    fn id(&self) -> &str;

    /// Returns element's tag kind.
    fn tag_name(&self) -> ElementId;

    /// Returns the container interface, if supported.
    fn as_container(&self) -> Option<&dyn Container> {
        None
    }

    /// Returns the mutable container interface, if supported.
    fn as_container_mut(&mut self) -> Option<&mut dyn Container> {
        None
    }

    /// Returns the styleable interface, if supported.
    fn as_styleable(&self) -> Option<&dyn Styleable> {
        None
    }

    /// Returns the mutable styleable interface, if supported.
    fn as_styleable_mut(&mut self) -> Option<&mut dyn Styleable> {
        None
    }

    /// Returns the transformable interface, if supported.
    fn as_transformable(&self) -> Option<&dyn Transformable> {
        None
    }

    /// Returns the mutable transformable interface, if supported.
    fn as_transformable_mut(&mut self) -> Option<&mut dyn Transformable> {
        None
    }

    /// Returns the referencing interface, if supported.
    fn as_referencing(&self) -> Option<&dyn Referencing> {
        None
    }

    /// Returns the mutable referencing interface, if supported.
    fn as_referencing_mut(&mut self) -> Option<&mut dyn Referencing> {
        None
    }

    /// Returns the rectangle interface, if supported.
    fn as_rectangle(&self) -> Option<&dyn Rectangle> {
        None
    }

    /// Returns the mutable rectangle interface, if supported.
    fn as_rectangle_mut(&mut self) -> Option<&mut dyn Rectangle> {
        None
    }
}

/// An element that owns children.
///
/// Children order is the document order and the paint order.
pub trait Container {
    /// Returns children.
    fn children(&self) -> &[Node];

    /// Returns mutable children.
    ///
    /// Must not be used to edit a list that is being traversed.
    fn children_mut(&mut self) -> &mut Vec<Node>;
}

/// An element with a style map.
pub trait Styleable {
    /// Returns explicitly set style properties.
    ///
    /// Absent properties are resolved by [`Finder`](crate::Finder).
    fn style(&self) -> &StyleMap;

    /// Returns mutable style properties.
    fn style_mut(&mut self) -> &mut StyleMap;

    /// Returns the `class` list.
    fn classes(&self) -> &[String];

    /// Returns the mutable `class` list.
    fn classes_mut(&mut self) -> &mut Vec<String>;
}

/// An element with a list of transformations.
pub trait Transformable {
    /// Returns transformations in the document order.
    fn transform(&self) -> &[Transformation];

    /// Returns mutable transformations.
    fn transform_mut(&mut self) -> &mut Vec<Transformation>;

    /// Returns the attribute the list is stored in.
    ///
    /// `transform` for most elements, `gradientTransform` for gradients.
    fn transform_attribute(&self) -> AttributeId {
        AttributeId::Transform
    }

    /// Composes transformations into a single matrix.
    fn to_affine(&self) -> Affine {
        crate::transform::to_affine(self.transform())
    }
}

/// An element that references another one by ID.
pub trait Referencing {
    /// Returns the referenced element ID, without `#`.
    ///
    /// An empty string when not set.
    fn href(&self) -> &str;

    /// Returns mutable reference.
    fn href_mut(&mut self) -> &mut String;
}

/// An element with `x`, `y`, `width` and `height`.
pub trait Rectangle {
    /// Returns the stored geometry.
    fn bounds(&self) -> &Bounds;

    /// Returns the mutable geometry.
    fn bounds_mut(&mut self) -> &mut Bounds;

    /// Returns the geometry used when an attribute is not set.
    fn default_bounds(&self) -> Bounds;

    /// Returns the geometry with unspecified values replaced by defaults.
    fn resolved_bounds(&self) -> Bounds {
        self.bounds().or(&self.default_bounds())
    }
}

/// A rectangle geometry.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Bounds {
    pub x: Length,
    pub y: Length,
    pub width: Length,
    pub height: Length,
}

impl Bounds {
    /// Creates a new `Bounds`.
    pub const fn new(x: Length, y: Length, width: Length, height: Length) -> Self {
        Bounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Replaces unspecified values with ones from `other`.
    pub fn or(&self, other: &Bounds) -> Bounds {
        let pick = |a: Length, b: Length| if a.is_valid() { a } else { b };
        Bounds {
            x: pick(self.x, other.x),
            y: pick(self.y, other.y),
            width: pick(self.width, other.width),
            height: pick(self.height, other.height),
        }
    }
}

/// A document node.
///
/// The tree is acyclic: a node is owned by exactly one container.
#[allow(missing_docs)]
#[derive(PartialEq, Debug)]
pub enum Node {
    Circle(Circle),
    Defs(Defs),
    Ellipse(Ellipse),
    FeBlend(FeBlend),
    FeColorMatrix(FeColorMatrix),
    FeComposite(FeComposite),
    FeGaussianBlur(FeGaussianBlur),
    Filter(Filter),
    G(Group),
    Image(Image),
    Line(Line),
    LinearGradient(LinearGradient),
    Mask(Mask),
    Path(Path),
    Polygon(Polygon),
    Polyline(Polyline),
    RadialGradient(RadialGradient),
    Rect(Rect),
    Stop(Stop),
    Svg(Svg),
    Symbol(Symbol),
    Text(Text),
    Use(Use),
}

macro_rules! with_element {
    ($node:expr, $e:ident => $body:expr) => {
        match $node {
            Node::Circle($e) => $body,
            Node::Defs($e) => $body,
            Node::Ellipse($e) => $body,
            Node::FeBlend($e) => $body,
            Node::FeColorMatrix($e) => $body,
            Node::FeComposite($e) => $body,
            Node::FeGaussianBlur($e) => $body,
            Node::Filter($e) => $body,
            Node::G($e) => $body,
            Node::Image($e) => $body,
            Node::Line($e) => $body,
            Node::LinearGradient($e) => $body,
            Node::Mask($e) => $body,
            Node::Path($e) => $body,
            Node::Polygon($e) => $body,
            Node::Polyline($e) => $body,
            Node::RadialGradient($e) => $body,
            Node::Rect($e) => $body,
            Node::Stop($e) => $body,
            Node::Svg($e) => $body,
            Node::Symbol($e) => $body,
            Node::Text($e) => $body,
            Node::Use($e) => $body,
        }
    };
}

pub(crate) use with_element;

impl Node {
    /// Creates an element of the specified kind with no attributes set.
    pub fn new(tag: ElementId) -> Node {
        match tag {
            ElementId::Circle => Node::Circle(Circle::default()),
            ElementId::Defs => Node::Defs(Defs::default()),
            ElementId::Ellipse => Node::Ellipse(Ellipse::default()),
            ElementId::FeBlend => Node::FeBlend(FeBlend::default()),
            ElementId::FeColorMatrix => Node::FeColorMatrix(FeColorMatrix::default()),
            ElementId::FeComposite => Node::FeComposite(FeComposite::default()),
            ElementId::FeGaussianBlur => Node::FeGaussianBlur(FeGaussianBlur::default()),
            ElementId::Filter => Node::Filter(Filter::default()),
            ElementId::G => Node::G(Group::default()),
            ElementId::Image => Node::Image(Image::default()),
            ElementId::Line => Node::Line(Line::default()),
            ElementId::LinearGradient => Node::LinearGradient(LinearGradient::default()),
            ElementId::Mask => Node::Mask(Mask::default()),
            ElementId::Path => Node::Path(Path::default()),
            ElementId::Polygon => Node::Polygon(Polygon::default()),
            ElementId::Polyline => Node::Polyline(Polyline::default()),
            ElementId::RadialGradient => Node::RadialGradient(RadialGradient::default()),
            ElementId::Rect => Node::Rect(Rect::default()),
            ElementId::Stop => Node::Stop(Stop::default()),
            ElementId::Svg => Node::Svg(Svg::default()),
            ElementId::Symbol => Node::Symbol(Symbol::default()),
            ElementId::Text => Node::Text(Text::default()),
            ElementId::Use => Node::Use(Use::default()),
        }
    }

    /// Returns the common element interface.
    pub fn element(&self) -> &dyn Element {
        with_element!(self, e => e)
    }

    /// Returns the mutable common element interface.
    pub fn element_mut(&mut self) -> &mut dyn Element {
        with_element!(self, e => e)
    }

    /// Returns element's ID.
    pub fn id(&self) -> &str {
        self.element().id()
    }

    /// Returns element's tag kind.
    pub fn tag_name(&self) -> ElementId {
        self.element().tag_name()
    }

    /// Checks that the node can own children.
    pub fn is_container(&self) -> bool {
        self.element().as_container().is_some()
    }

    /// Returns children.
    ///
    /// An empty slice for non-container elements.
    pub fn children(&self) -> &[Node] {
        match self.element().as_container() {
            Some(c) => c.children(),
            None => &[],
        }
    }

    /// Returns mutable children.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        self.element_mut().as_container_mut().map(|c| c.children_mut())
    }

    /// Returns explicitly set style properties.
    pub fn style(&self) -> Option<&StyleMap> {
        self.element().as_styleable().map(|s| s.style())
    }

    /// Returns mutable style properties.
    pub fn style_mut(&mut self) -> Option<&mut StyleMap> {
        self.element_mut().as_styleable_mut().map(|s| s.style_mut())
    }

    /// Searches for an element with the specified ID.
    ///
    /// Uses depth-first search in the document order, including the
    /// node itself. The first match is returned. An empty ID matches nothing.
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        if id.is_empty() {
            return None;
        }

        if self.id() == id {
            return Some(self);
        }

        self.children().iter().find_map(|child| child.find_by_id(id))
    }

    /// Searches for an element with the specified ID.
    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Node> {
        if id.is_empty() {
            return None;
        }

        if self.id() == id {
            return Some(self);
        }

        self.children_mut()?
            .iter_mut()
            .find_map(|child| child.find_by_id_mut(id))
    }

    /// Returns a descendant by its children indices path.
    ///
    /// An empty path returns the node itself.
    pub fn child_at(&self, path: &[usize]) -> Option<&Node> {
        match path.split_first() {
            Some((idx, rest)) => self.children().get(*idx)?.child_at(rest),
            None => Some(self),
        }
    }

    /// Returns a mutable descendant by its children indices path.
    pub fn child_at_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        match path.split_first() {
            Some((idx, rest)) => self.children_mut()?.get_mut(*idx)?.child_at_mut(rest),
            None => Some(self),
        }
    }

    /// Removes a descendant by its children indices path.
    ///
    /// Paths recorded during a traversal must be applied in reverse
    /// order, otherwise removal shifts the indices of later siblings.
    pub fn remove_at(&mut self, path: &[usize]) -> Option<Node> {
        let (idx, parent_path) = path.split_last()?;
        let children = self.child_at_mut(parent_path)?.children_mut()?;
        if *idx < children.len() {
            Some(children.remove(*idx))
        } else {
            None
        }
    }

    /// Returns the number of nodes in the subtree, including this one.
    pub fn descendants_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|c| c.descendants_count())
            .sum::<usize>()
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let mut root = Node::from_attributes(ElementId::Svg, vec![("id", "root")]);
        let mut g = Node::from_attributes(ElementId::G, vec![("id", "g1")]);
        let children = g.children_mut().unwrap();
        children.push(Node::from_attributes(ElementId::Rect, vec![("id", "r1")]));
        children.push(Node::from_attributes(ElementId::Circle, vec![("id", "c1")]));
        root.children_mut().unwrap().push(g);
        root.children_mut().unwrap().push(Node::from_attributes(ElementId::Path, vec![("id", "p1")]));
        root
    }

    #[test]
    fn capabilities() {
        let g = Node::new(ElementId::G);
        assert!(g.element().as_container().is_some());
        assert!(g.element().as_transformable().is_some());
        assert!(g.element().as_referencing().is_none());

        let r = Node::new(ElementId::Rect);
        assert!(r.element().as_container().is_none());
        assert!(r.element().as_rectangle().is_some());

        let u = Node::new(ElementId::Use);
        assert!(u.element().as_referencing().is_some());

        let lg = Node::new(ElementId::LinearGradient);
        assert_eq!(lg.element().as_transformable().unwrap().transform_attribute(),
                   AttributeId::GradientTransform);
    }

    #[test]
    fn stop_default() {
        match Node::new(ElementId::Stop) {
            Node::Stop(e) => assert_eq!(e.offset, StopOffset::ZERO),
            _ => unreachable!(),
        }
    }

    #[test]
    fn composed_transform() {
        let g = Node::from_attributes(ElementId::G, vec![("transform", "translate(10 20) scale(2)")]);
        let ts = g.element().as_transformable().unwrap().to_affine();
        let p = ts * kurbo::Point::new(1.0, 1.0);
        assert_eq!((p.x, p.y), (12.0, 22.0));
    }

    #[test]
    fn container_kinds() {
        for eid in ElementId::ALL {
            assert_eq!(Node::new(*eid).is_container(), eid.is_container(), "{}", eid);
            assert_eq!(Node::new(*eid).tag_name(), *eid);
        }
    }

    #[test]
    fn find_by_id() {
        let root = sample();
        assert_eq!(root.find_by_id("c1").unwrap().tag_name(), ElementId::Circle);
        assert_eq!(root.find_by_id("root").unwrap().tag_name(), ElementId::Svg);
        assert!(root.find_by_id("none").is_none());
    }

    #[test]
    fn find_by_id_first_wins() {
        let mut root = sample();
        root.children_mut().unwrap()
            .push(Node::from_attributes(ElementId::Ellipse, vec![("id", "r1")]));
        assert_eq!(root.find_by_id("r1").unwrap().tag_name(), ElementId::Rect);
    }

    #[test]
    fn child_at() {
        let root = sample();
        assert_eq!(root.child_at(&[0, 1]).unwrap().id(), "c1");
        assert_eq!(root.child_at(&[1]).unwrap().id(), "p1");
        assert_eq!(root.child_at(&[]).unwrap().id(), "root");
        assert!(root.child_at(&[1, 0]).is_none());
        assert!(root.child_at(&[5]).is_none());
    }

    #[test]
    fn remove_at() {
        let mut root = sample();
        assert_eq!(root.remove_at(&[0, 0]).unwrap().id(), "r1");
        assert_eq!(root.child_at(&[0, 0]).unwrap().id(), "c1");
        assert!(root.remove_at(&[]).is_none());
        assert!(root.remove_at(&[0, 7]).is_none());
        assert_eq!(root.descendants_count(), 4);
    }

    #[test]
    fn bounds_fallback() {
        let svg = Node::from_attributes(ElementId::Svg, vec![("width", "50")]);
        let b = svg.element().as_rectangle().unwrap().resolved_bounds();
        assert_eq!(b.x, Length::zero());
        assert_eq!(b.width, Length::new_number(50.0));
        assert_eq!(b.height, Length::new_percent(100.0));
    }
}
