// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::tree::{Element, Node};
use crate::visitor::{relay_accept, ConstVisitor, Cursor};

/// Rebuilds a tree during a read-only walk.
///
/// Each level holds the cloned children of a container that is being
/// visited. The bottom level holds the walk root.
struct Cloner {
    levels: Vec<Vec<Node>>,
}

impl Cloner {
    fn new() -> Self {
        Cloner {
            levels: vec![Vec::new()],
        }
    }

    fn attach(&mut self, node: Node) {
        if let Some(level) = self.levels.last_mut() {
            level.push(node);
        }
    }
}

impl<'a> ConstVisitor<'a> for Cloner {
    fn default_visit(&mut self, _: &'a dyn Element, cursor: &Cursor<'a, '_>) {
        self.attach(cursor.node().shallow_clone());
    }

    fn default_visit_container(&mut self, _: &'a dyn Element, cursor: &Cursor<'a, '_>) {
        self.levels.push(Vec::new());
        relay_accept(self, cursor);
        let children = self.levels.pop().unwrap_or_default();

        let mut node = cursor.node().shallow_clone();
        if let Some(list) = node.children_mut() {
            *list = children;
        }

        self.attach(node);
    }
}

impl Clone for Node {
    /// Clones the whole subtree.
    ///
    /// The copy shares nothing with the original.
    fn clone(&self) -> Self {
        let mut cloner = Cloner::new();
        self.accept(&mut cloner);

        cloner
            .levels
            .pop()
            .and_then(|mut level| level.pop())
            .unwrap_or_else(|| self.shallow_clone())
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use crate::{ElementId, StyleProperty, StyleValue};
    use super::*;

    const SVG: &str = "\
<svg xmlns='http://www.w3.org/2000/svg' id='svg'>
    <defs>
        <linearGradient id='lg1'>
            <stop offset='0.5' stop-color='red'/>
        </linearGradient>
    </defs>
    <g id='g1' fill='red' transform='rotate(30)'>
        <rect id='r1' width='10' height='20'/>
        <text id='t1'>Text</text>
    </g>
</svg>
";

    #[test]
    fn deep_equal() {
        let root = Node::from_str(SVG).unwrap();
        let copy = root.clone();
        assert_eq!(copy, root);
        assert_eq!(copy.descendants_count(), root.descendants_count());
    }

    #[test]
    fn independent_children() {
        let root = Node::from_str(SVG).unwrap();
        let mut copy = root.clone();

        copy.find_by_id_mut("g1").unwrap().children_mut().unwrap().clear();
        copy.children_mut().unwrap().push(Node::new(ElementId::Circle));

        assert_eq!(root.find_by_id("g1").unwrap().children().len(), 2);
        assert_eq!(root.children().len(), 2);
        assert_ne!(copy, root);
    }

    #[test]
    fn independent_style() {
        let root = Node::from_str(SVG).unwrap();
        let mut copy = root.clone();

        let style = copy.find_by_id_mut("r1").unwrap().style_mut().unwrap();
        style.insert(StyleProperty::Stroke, StyleValue::None);

        assert!(root.find_by_id("r1").unwrap().style().unwrap().is_empty());
    }

    #[test]
    fn subtree() {
        let root = Node::from_str(SVG).unwrap();
        let g = root.find_by_id("g1").unwrap();
        let copy = g.clone();
        assert_eq!(&copy, g);
        assert_eq!(copy.tag_name(), ElementId::G);
    }

    #[test]
    fn leaf() {
        let rect = Node::from_attributes(ElementId::Rect, vec![("id", "r"), ("x", "5")]);
        assert_eq!(rect.clone(), rect);
    }
}
