// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tree traversal.
//!
//! A node dispatches itself to the `visit_*` method of its kind.
//! Every method falls back to `default_visit` for leaves and to
//! `default_visit_container` for containers. The latter continues
//! into children, depth-first, in the document order.
//!
//! Overriding a container method disables the recursion. A visitor
//! that still needs children must call [`relay_accept`] (or
//! [`relay_accept_mut`]) itself. Otherwise the subtree is skipped.
//!
//! # Examples
//!
//! ```
//! use std::str::FromStr;
//! use svgdom::{ConstVisitor, Cursor, Element, Group, Node};
//!
//! struct TopLevelOnly(usize);
//!
//! impl<'a> ConstVisitor<'a> for TopLevelOnly {
//!     fn default_visit(&mut self, _: &'a dyn Element, _: &Cursor<'a, '_>) {
//!         self.0 += 1;
//!     }
//!
//!     fn visit_g(&mut self, _: &'a Group, _: &Cursor<'a, '_>) {
//!         // No relay, so group children are not visited.
//!         self.0 += 1;
//!     }
//! }
//!
//! let root = Node::from_str("<svg xmlns='http://www.w3.org/2000/svg'>\
//!     <g><rect/><rect/></g><circle/></svg>").unwrap();
//! let mut v = TopLevelOnly(0);
//! root.accept(&mut v);
//! assert_eq!(v.0, 3);
//! ```

use crate::tree::*;
use crate::ElementId;

/// A position of a node visited by [`ConstVisitor`].
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a, 'p> {
    node: &'a Node,
    parent: Option<&'a Node>,
    path: &'p [usize],
}

impl<'a, 'p> Cursor<'a, 'p> {
    /// Returns the visited node.
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Returns the container that is being iterated.
    ///
    /// `None` for the node the walk has started from.
    pub fn parent(&self) -> Option<&'a Node> {
        self.parent
    }

    /// Returns children indices from the walk root to the visited node.
    ///
    /// Can be used with [`Node::child_at`] and [`Node::remove_at`]
    /// after the walk is finished.
    pub fn path(&self) -> &'p [usize] {
        self.path
    }

    /// Returns the node position in the parent's children.
    pub fn index(&self) -> Option<usize> {
        self.path.last().copied()
    }

    /// Returns the node depth. The walk root has a zero depth.
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

/// A position of a node visited by [`Visitor`].
///
/// Unlike [`Cursor`], it doesn't expose the parent container.
/// The container is mutably borrowed while its children are visited,
/// so only its kind is available. The container itself can be reached
/// after the walk with `Node::child_at_mut(cursor.parent_path())`.
#[derive(Clone, Copy, Debug)]
pub struct CursorMut<'p> {
    parent: Option<ElementId>,
    path: &'p [usize],
}

impl<'p> CursorMut<'p> {
    /// Returns the kind of the container that is being iterated.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Returns children indices from the walk root to the visited node.
    pub fn path(&self) -> &'p [usize] {
        self.path
    }

    /// Returns the node position in the parent's children.
    pub fn index(&self) -> Option<usize> {
        self.path.last().copied()
    }

    /// Returns children indices from the walk root to the parent.
    ///
    /// Empty for the walk root and its children.
    pub fn parent_path(&self) -> &'p [usize] {
        match self.path.split_last() {
            Some((_, parent)) => parent,
            None => self.path,
        }
    }

    /// Returns the node depth. The walk root has a zero depth.
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

macro_rules! define_visitors {
    (
        leaves { $($leaf:ident: $leaf_ty:ident,)+ }
        containers { $($cont:ident: $cont_ty:ident,)+ }
    ) => {
        /// A read-only tree visitor.
        ///
        /// Any number of read-only walks can share a tree.
        #[allow(unused_variables)]
        pub trait ConstVisitor<'a> {
            /// Called by leaf elements that have no dedicated handler.
            fn default_visit(&mut self, element: &'a dyn Element, cursor: &Cursor<'a, '_>) {}

            /// Called by container elements that have no dedicated handler.
            ///
            /// Calls `default_visit` and then visits children.
            fn default_visit_container(&mut self, element: &'a dyn Element, cursor: &Cursor<'a, '_>) {
                self.default_visit(element, cursor);
                relay_accept(self, cursor);
            }

            $(
                #[allow(missing_docs)]
                fn $leaf(&mut self, element: &'a $leaf_ty, cursor: &Cursor<'a, '_>) {
                    self.default_visit(element, cursor)
                }
            )+

            $(
                #[allow(missing_docs)]
                fn $cont(&mut self, element: &'a $cont_ty, cursor: &Cursor<'a, '_>) {
                    self.default_visit_container(element, cursor)
                }
            )+
        }

        /// A mutating tree visitor.
        ///
        /// Has an exclusive access to visited nodes. The children list
        /// that is being iterated cannot be edited, so structural edits
        /// should be recorded using [`CursorMut::path`] and applied
        /// after the walk.
        #[allow(unused_variables)]
        pub trait Visitor {
            /// Called by leaf elements that have no dedicated handler.
            fn default_visit(&mut self, element: &mut dyn Element, cursor: &CursorMut) {}

            /// Called by container elements that have no dedicated handler.
            ///
            /// Calls `default_visit` and then visits children.
            fn default_visit_container(&mut self, element: &mut dyn Element, cursor: &CursorMut) {
                self.default_visit(element, cursor);
                relay_accept_mut(self, element, cursor);
            }

            $(
                #[allow(missing_docs)]
                fn $leaf(&mut self, element: &mut $leaf_ty, cursor: &CursorMut) {
                    self.default_visit(element, cursor)
                }
            )+

            $(
                #[allow(missing_docs)]
                fn $cont(&mut self, element: &mut $cont_ty, cursor: &CursorMut) {
                    self.default_visit_container(element, cursor)
                }
            )+
        }
    };
}

define_visitors! {
    leaves {
        visit_circle: Circle,
        visit_ellipse: Ellipse,
        visit_fe_blend: FeBlend,
        visit_fe_color_matrix: FeColorMatrix,
        visit_fe_composite: FeComposite,
        visit_fe_gaussian_blur: FeGaussianBlur,
        visit_image: Image,
        visit_line: Line,
        visit_path: Path,
        visit_polygon: Polygon,
        visit_polyline: Polyline,
        visit_rect: Rect,
        visit_stop: Stop,
        visit_use: Use,
    }
    containers {
        visit_defs: Defs,
        visit_filter: Filter,
        visit_g: Group,
        visit_linear_gradient: LinearGradient,
        visit_mask: Mask,
        visit_radial_gradient: RadialGradient,
        visit_svg: Svg,
        visit_symbol: Symbol,
        visit_text: Text,
    }
}

fn dispatch<'a, V>(node: &'a Node, visitor: &mut V, cursor: &Cursor<'a, '_>)
where
    V: ConstVisitor<'a> + ?Sized,
{
    match node {
        Node::Circle(e) => visitor.visit_circle(e, cursor),
        Node::Defs(e) => visitor.visit_defs(e, cursor),
        Node::Ellipse(e) => visitor.visit_ellipse(e, cursor),
        Node::FeBlend(e) => visitor.visit_fe_blend(e, cursor),
        Node::FeColorMatrix(e) => visitor.visit_fe_color_matrix(e, cursor),
        Node::FeComposite(e) => visitor.visit_fe_composite(e, cursor),
        Node::FeGaussianBlur(e) => visitor.visit_fe_gaussian_blur(e, cursor),
        Node::Filter(e) => visitor.visit_filter(e, cursor),
        Node::G(e) => visitor.visit_g(e, cursor),
        Node::Image(e) => visitor.visit_image(e, cursor),
        Node::Line(e) => visitor.visit_line(e, cursor),
        Node::LinearGradient(e) => visitor.visit_linear_gradient(e, cursor),
        Node::Mask(e) => visitor.visit_mask(e, cursor),
        Node::Path(e) => visitor.visit_path(e, cursor),
        Node::Polygon(e) => visitor.visit_polygon(e, cursor),
        Node::Polyline(e) => visitor.visit_polyline(e, cursor),
        Node::RadialGradient(e) => visitor.visit_radial_gradient(e, cursor),
        Node::Rect(e) => visitor.visit_rect(e, cursor),
        Node::Stop(e) => visitor.visit_stop(e, cursor),
        Node::Svg(e) => visitor.visit_svg(e, cursor),
        Node::Symbol(e) => visitor.visit_symbol(e, cursor),
        Node::Text(e) => visitor.visit_text(e, cursor),
        Node::Use(e) => visitor.visit_use(e, cursor),
    }
}

fn dispatch_mut<V>(node: &mut Node, visitor: &mut V, cursor: &CursorMut)
where
    V: Visitor + ?Sized,
{
    match node {
        Node::Circle(e) => visitor.visit_circle(e, cursor),
        Node::Defs(e) => visitor.visit_defs(e, cursor),
        Node::Ellipse(e) => visitor.visit_ellipse(e, cursor),
        Node::FeBlend(e) => visitor.visit_fe_blend(e, cursor),
        Node::FeColorMatrix(e) => visitor.visit_fe_color_matrix(e, cursor),
        Node::FeComposite(e) => visitor.visit_fe_composite(e, cursor),
        Node::FeGaussianBlur(e) => visitor.visit_fe_gaussian_blur(e, cursor),
        Node::Filter(e) => visitor.visit_filter(e, cursor),
        Node::G(e) => visitor.visit_g(e, cursor),
        Node::Image(e) => visitor.visit_image(e, cursor),
        Node::Line(e) => visitor.visit_line(e, cursor),
        Node::LinearGradient(e) => visitor.visit_linear_gradient(e, cursor),
        Node::Mask(e) => visitor.visit_mask(e, cursor),
        Node::Path(e) => visitor.visit_path(e, cursor),
        Node::Polygon(e) => visitor.visit_polygon(e, cursor),
        Node::Polyline(e) => visitor.visit_polyline(e, cursor),
        Node::RadialGradient(e) => visitor.visit_radial_gradient(e, cursor),
        Node::Rect(e) => visitor.visit_rect(e, cursor),
        Node::Stop(e) => visitor.visit_stop(e, cursor),
        Node::Svg(e) => visitor.visit_svg(e, cursor),
        Node::Symbol(e) => visitor.visit_symbol(e, cursor),
        Node::Text(e) => visitor.visit_text(e, cursor),
        Node::Use(e) => visitor.visit_use(e, cursor),
    }
}

/// Visits children of the node under the cursor.
///
/// Does nothing for leaf nodes.
pub fn relay_accept<'a, V>(visitor: &mut V, cursor: &Cursor<'a, '_>)
where
    V: ConstVisitor<'a> + ?Sized,
{
    let children = cursor.node.children();
    if children.is_empty() {
        return;
    }

    let mut path = Vec::with_capacity(cursor.path.len() + 1);
    path.extend_from_slice(cursor.path);
    path.push(0);
    let last = path.len() - 1;

    for (i, child) in children.iter().enumerate() {
        path[last] = i;
        let child_cursor = Cursor {
            node: child,
            parent: Some(cursor.node),
            path: &path,
        };
        dispatch(child, visitor, &child_cursor);
    }
}

/// Visits children of a container.
///
/// Does nothing for leaf elements.
pub fn relay_accept_mut<V>(visitor: &mut V, element: &mut dyn Element, cursor: &CursorMut)
where
    V: Visitor + ?Sized,
{
    let parent = element.tag_name();
    let children = match element.as_container_mut() {
        Some(c) => c.children_mut(),
        None => return,
    };

    let mut path = Vec::with_capacity(cursor.path.len() + 1);
    path.extend_from_slice(cursor.path);
    path.push(0);
    let last = path.len() - 1;

    for (i, child) in children.iter_mut().enumerate() {
        path[last] = i;
        let child_cursor = CursorMut {
            parent: Some(parent),
            path: &path,
        };
        dispatch_mut(child, visitor, &child_cursor);
    }
}

impl Node {
    /// Starts a read-only walk from this node.
    pub fn accept<'a, V>(&'a self, visitor: &mut V)
    where
        V: ConstVisitor<'a> + ?Sized,
    {
        let cursor = Cursor {
            node: self,
            parent: None,
            path: &[],
        };
        dispatch(self, visitor, &cursor);
    }

    /// Starts a mutating walk from this node.
    pub fn accept_mut<V>(&mut self, visitor: &mut V)
    where
        V: Visitor + ?Sized,
    {
        let cursor = CursorMut {
            parent: None,
            path: &[],
        };
        dispatch_mut(self, visitor, &cursor);
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use crate::{StyleProperty, StyleValue};

    const SVG: &str = "\
<svg xmlns='http://www.w3.org/2000/svg' id='svg'>
    <g id='g1'>
        <rect id='r1'/>
        <g id='g2'>
            <circle id='c1'/>
        </g>
    </g>
    <path id='p1'/>
</svg>
";

    #[derive(Default)]
    struct Recorder {
        visited: Vec<(String, usize, Option<String>)>,
    }

    impl<'a> ConstVisitor<'a> for Recorder {
        fn default_visit(&mut self, element: &'a dyn Element, cursor: &Cursor<'a, '_>) {
            self.visited.push((
                element.id().to_string(),
                cursor.depth(),
                cursor.parent().map(|p| p.id().to_string()),
            ));
        }
    }

    #[test]
    fn pre_order() {
        let root = Node::from_str(SVG).unwrap();
        let mut v = Recorder::default();
        root.accept(&mut v);

        let ids: Vec<_> = v.visited.iter().map(|v| v.0.as_str()).collect();
        assert_eq!(ids, ["svg", "g1", "r1", "g2", "c1", "p1"]);
        assert_eq!(v.visited[4], ("c1".to_string(), 3, Some("g2".to_string())));
        assert_eq!(v.visited[0].2, None);
    }

    struct Pruner {
        visited: Vec<String>,
        relay: bool,
    }

    impl<'a> ConstVisitor<'a> for Pruner {
        fn default_visit(&mut self, element: &'a dyn Element, _: &Cursor<'a, '_>) {
            self.visited.push(element.id().to_string());
        }

        fn visit_g(&mut self, element: &'a Group, cursor: &Cursor<'a, '_>) {
            self.visited.push(element.id.clone());
            if self.relay {
                relay_accept(self, cursor);
            }
        }
    }

    #[test]
    fn override_without_relay() {
        let root = Node::from_str(SVG).unwrap();
        let mut v = Pruner { visited: Vec::new(), relay: false };
        root.accept(&mut v);
        assert_eq!(v.visited, ["svg", "g1", "p1"]);
    }

    #[test]
    fn override_with_relay() {
        let root = Node::from_str(SVG).unwrap();
        let mut v = Pruner { visited: Vec::new(), relay: true };
        root.accept(&mut v);
        assert_eq!(v.visited, ["svg", "g1", "r1", "g2", "c1", "p1"]);
    }

    #[test]
    fn paths() {
        struct Paths(Vec<Vec<usize>>);
        impl<'a> ConstVisitor<'a> for Paths {
            fn default_visit(&mut self, _: &'a dyn Element, cursor: &Cursor<'a, '_>) {
                self.0.push(cursor.path().to_vec());
            }
        }

        let root = Node::from_str(SVG).unwrap();
        let mut v = Paths(Vec::new());
        root.accept(&mut v);
        assert_eq!(v.0, vec![vec![], vec![0], vec![0, 0], vec![0, 1], vec![0, 1, 0], vec![1]]);

        for path in &v.0 {
            assert!(root.child_at(path).is_some());
        }
    }

    struct Painter;

    impl Visitor for Painter {
        fn default_visit(&mut self, element: &mut dyn Element, _: &CursorMut) {
            if let Some(s) = element.as_styleable_mut() {
                s.style_mut().insert_str(StyleProperty::Fill, "red");
            }
        }
    }

    #[test]
    fn mutate() {
        let mut root = Node::from_str(SVG).unwrap();
        root.accept_mut(&mut Painter);

        let red = StyleValue::parse(StyleProperty::Fill, "red").unwrap();
        let c1 = root.find_by_id("c1").unwrap();
        assert_eq!(c1.style().unwrap().get(StyleProperty::Fill), Some(&red));
        assert_eq!(root.style().unwrap().get(StyleProperty::Fill), Some(&red));
    }

    #[test]
    fn remove_after_walk() {
        struct Collect(Vec<Vec<usize>>);
        impl Visitor for Collect {
            fn visit_rect(&mut self, _: &mut Rect, cursor: &CursorMut) {
                assert_eq!(cursor.parent(), Some(ElementId::G));
                self.0.push(cursor.path().to_vec());
            }

            fn visit_circle(&mut self, _: &mut Circle, cursor: &CursorMut) {
                self.0.push(cursor.path().to_vec());
            }
        }

        let mut root = Node::from_str(SVG).unwrap();
        let mut v = Collect(Vec::new());
        root.accept_mut(&mut v);

        for path in v.0.iter().rev() {
            assert!(root.remove_at(path).is_some());
        }

        assert!(root.find_by_id("r1").is_none());
        assert!(root.find_by_id("c1").is_none());
        assert!(root.find_by_id("g2").is_some());
    }

    #[test]
    fn parent_after_walk() {
        struct Parents(Vec<Vec<usize>>);
        impl Visitor for Parents {
            fn visit_circle(&mut self, _: &mut Circle, cursor: &CursorMut) {
                assert_eq!(cursor.parent(), Some(ElementId::G));
                self.0.push(cursor.parent_path().to_vec());
            }
        }

        let mut root = Node::from_str(SVG).unwrap();
        let mut v = Parents(Vec::new());
        root.accept_mut(&mut v);
        assert_eq!(v.0, vec![vec![0, 1]]);

        let parent = root.child_at_mut(&v.0[0]).unwrap();
        assert_eq!(parent.id(), "g2");
        parent.children_mut().unwrap().clear();
        assert!(root.find_by_id("c1").is_none());
    }
}
