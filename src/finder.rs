// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Indices and style resolution over an immutable tree.

use std::collections::HashMap;

use once_cell::unsync::OnceCell;

use crate::tree::{Element, Node};
use crate::visitor::{relay_accept, ConstVisitor, Cursor};
use crate::{ElementId, StyleProperty, StyleValue};

type Cascade<'a> = HashMap<StyleProperty, &'a StyleValue>;

struct Entry<'a> {
    node: &'a Node,
    parent: Option<usize>,
    // Inheritable properties resolved for this node.
    // Built from the parent cascade on the first query.
    cascade: OnceCell<Cascade<'a>>,
}

/// An index over a tree.
///
/// Borrows the tree, so it cannot be mutated while the finder is alive.
/// All indices are built by a single walk in [`Finder::new`].
pub struct Finder<'a> {
    root: &'a Node,
    entries: Vec<Entry<'a>>,
    positions: HashMap<*const Node, usize>,
    by_id: HashMap<&'a str, usize>,
    by_class: HashMap<&'a str, Vec<&'a Node>>,
    by_tag: HashMap<ElementId, Vec<&'a Node>>,
}

impl<'a> Finder<'a> {
    /// Indexes the subtree.
    pub fn new(root: &'a Node) -> Self {
        let mut finder = Finder {
            root,
            entries: Vec::new(),
            positions: HashMap::new(),
            by_id: HashMap::new(),
            by_class: HashMap::new(),
            by_tag: HashMap::new(),
        };

        root.accept(&mut finder);
        finder
    }

    /// Returns the indexed subtree root.
    pub fn root(&self) -> &'a Node {
        self.root
    }

    /// Returns the number of indexed nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks that nothing was indexed. Never true in practice.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of unique ids.
    pub fn ids_count(&self) -> usize {
        self.by_id.len()
    }

    /// Returns the number of unique class names.
    pub fn classes_count(&self) -> usize {
        self.by_class.len()
    }

    /// Returns the number of present tag kinds.
    pub fn tags_count(&self) -> usize {
        self.by_tag.len()
    }

    /// Finds a node by id.
    ///
    /// The first one in the document order wins when ids are duplicated.
    pub fn find_by_id(&self, id: &str) -> Option<&'a Node> {
        self.by_id.get(id).map(|i| self.entries[*i].node)
    }

    /// Returns nodes with the specified class in the document order.
    pub fn find_elements_by_class(&self, class: &str) -> &[&'a Node] {
        self.by_class.get(class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns nodes of the specified kind in the document order.
    pub fn find_elements_by_tag(&self, tag: ElementId) -> &[&'a Node] {
        self.by_tag.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns nodes with the specified tag name in the document order.
    pub fn find_elements_by_tag_name(&self, name: &str) -> &[&'a Node] {
        match ElementId::from_str(name) {
            Some(tag) => self.find_elements_by_tag(tag),
            None => &[],
        }
    }

    /// Returns a style stack for a node from the indexed subtree.
    ///
    /// Nodes are compared by address, so an equal node from another
    /// tree is not found.
    pub fn style_stack<'f>(&'f self, node: &Node) -> Option<StyleStack<'f, 'a>> {
        let index = *self.positions.get(&(node as *const Node))?;
        Some(StyleStack { finder: self, index })
    }

    /// Finds a node by id and returns its style stack.
    pub fn find_style_stack_by_id<'f>(&'f self, id: &str) -> Option<StyleStack<'f, 'a>> {
        let index = *self.by_id.get(id)?;
        Some(StyleStack { finder: self, index })
    }

    /// Returns a node referenced by the `href` of a referencing node.
    pub fn resolve_href(&self, node: &Node) -> Option<&'a Node> {
        let link = node.element().as_referencing()?.href();
        if link.is_empty() {
            return None;
        }

        self.find_by_id(link)
    }

    /// Returns a node referenced by a `url(#id)` value.
    pub fn resolve_url(&self, value: &StyleValue) -> Option<&'a Node> {
        self.find_by_id(value.url()?)
    }

    /// Follows `href` links starting from a node.
    ///
    /// The node itself is not included. Stops at a missing link or
    /// at a node that was already visited.
    pub fn href_chain(&self, node: &Node) -> Vec<&'a Node> {
        let mut chain: Vec<&'a Node> = Vec::new();
        let mut current = self.resolve_href(node);
        while let Some(link) = current {
            let seen = std::ptr::eq(link, node) || chain.iter().any(|n| std::ptr::eq(*n, link));
            if seen {
                log::warn!("'{}' has a recursive href.", node.id());
                break;
            }

            chain.push(link);
            current = self.resolve_href(link);
        }

        chain
    }

    fn cascade(&self, index: usize) -> &Cascade<'a> {
        let entry = &self.entries[index];
        entry.cascade.get_or_init(|| {
            let mut cascade = match entry.parent {
                Some(parent) => self.cascade(parent).clone(),
                None => HashMap::new(),
            };

            if let Some(style) = entry.node.style() {
                for (property, value) in style.iter() {
                    if property.is_inheritable() && *value != StyleValue::Inherit {
                        cascade.insert(property, value);
                    }
                }
            }

            cascade
        })
    }

    fn add(&mut self, cursor: &Cursor<'a, '_>) {
        let node = cursor.node();
        let index = self.entries.len();
        let parent = cursor
            .parent()
            .and_then(|p| self.positions.get(&(p as *const Node)).copied());

        self.entries.push(Entry {
            node,
            parent,
            cascade: OnceCell::new(),
        });
        self.positions.insert(node as *const Node, index);

        let id = node.id();
        if !id.is_empty() {
            self.by_id.entry(id).or_insert(index);
        }

        if let Some(e) = node.element().as_styleable() {
            for class in e.classes() {
                self.by_class.entry(class.as_str()).or_default().push(node);
            }
        }

        self.by_tag.entry(node.tag_name()).or_default().push(node);
    }
}

impl<'a> ConstVisitor<'a> for Finder<'a> {
    fn default_visit(&mut self, _: &'a dyn Element, cursor: &Cursor<'a, '_>) {
        self.add(cursor);
    }

    fn default_visit_container(&mut self, _: &'a dyn Element, cursor: &Cursor<'a, '_>) {
        self.add(cursor);
        relay_accept(self, cursor);
    }
}

impl std::fmt::Debug for Finder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Finder")
            .field("nodes", &self.entries.len())
            .field("ids", &self.by_id.len())
            .field("classes", &self.by_class.len())
            .field("tags", &self.by_tag.len())
            .finish()
    }
}

/// A style cascade of a node.
///
/// Inheritable properties are taken from the closest node in the
/// ancestors chain that sets them. Non-inheritable properties are taken
/// from the node itself, unless set to `inherit`.
#[derive(Clone, Copy)]
pub struct StyleStack<'f, 'a> {
    finder: &'f Finder<'a>,
    index: usize,
}

impl<'f, 'a> StyleStack<'f, 'a> {
    /// Returns the node this stack is built for.
    pub fn node(&self) -> &'a Node {
        self.finder.entries[self.index].node
    }

    /// Returns the stack of the parent node.
    ///
    /// `None` for the indexed subtree root.
    pub fn parent(&self) -> Option<StyleStack<'f, 'a>> {
        let index = self.finder.entries[self.index].parent?;
        Some(StyleStack {
            finder: self.finder,
            index,
        })
    }

    /// Returns the node followed by its ancestors, up to the indexed subtree root.
    pub fn ancestors(&self) -> impl Iterator<Item = &'a Node> + 'f {
        let finder = self.finder;
        std::iter::successors(Some(self.index), move |i| finder.entries[*i].parent)
            .map(move |i| finder.entries[i].node)
    }

    /// Returns a cascaded value.
    ///
    /// `None` when no node in the chain sets the property.
    pub fn get(&self, property: StyleProperty) -> Option<&'a StyleValue> {
        if property.is_inheritable() {
            return self.finder.cascade(self.index).get(&property).copied();
        }

        match self.node().style()?.get(property)? {
            StyleValue::Inherit => self.parent()?.get(property),
            value => Some(value),
        }
    }

    /// Returns a cascaded value or the property initial value.
    pub fn resolve(&self, property: StyleProperty) -> StyleValue {
        match self.get(property) {
            Some(value) => value.clone(),
            None => property.initial_value(),
        }
    }
}

impl std::fmt::Debug for StyleStack<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("StyleStack")
            .field("node", &self.node().tag_name())
            .field("id", &self.node().id())
            .finish()
    }
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use super::*;
    use crate::{Color, Opacity};

    const SVG: &str = "\
<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink' id='svg'>
    <defs>
        <linearGradient id='lg1'/>
        <linearGradient id='lg2' xlink:href='#lg1'/>
        <linearGradient id='lg3' xlink:href='#lg2'/>
        <radialGradient id='rg1' xlink:href='#rg2'/>
        <radialGradient id='rg2' xlink:href='#rg1'/>
    </defs>
    <g id='g1' class='a' fill='red' opacity='0.5' stroke='inherit'>
        <rect id='r1' class='a b'/>
        <rect id='r2' fill='inherit' opacity='inherit'/>
        <g id='g2' fill='url(#lg3)'>
            <circle id='c1'/>
        </g>
    </g>
    <rect id='r1' class='b'/>
</svg>
";

    #[test]
    fn ids() {
        let root = Node::from_str(SVG).unwrap();
        let finder = Finder::new(&root);
        assert_eq!(finder.find_by_id("g2").unwrap().tag_name(), ElementId::G);
        assert!(finder.find_by_id("qwe").is_none());
        assert_eq!(finder.len(), 13);
        assert_eq!(finder.ids_count(), 11);
    }

    #[test]
    fn duplicated_id() {
        let root = Node::from_str(SVG).unwrap();
        let finder = Finder::new(&root);
        let r1 = finder.find_by_id("r1").unwrap();
        assert!(std::ptr::eq(r1, root.find_by_id("r1").unwrap()));
        assert_eq!(finder.find_style_stack_by_id("r1").unwrap().ancestors().count(), 3);
    }

    #[test]
    fn classes() {
        let root = Node::from_str(SVG).unwrap();
        let finder = Finder::new(&root);
        let ids: Vec<_> = finder.find_elements_by_class("b").iter().map(|n| n.id()).collect();
        assert_eq!(ids, ["r1", "r1"]);
        assert_eq!(finder.find_elements_by_class("a").len(), 2);
        assert!(finder.find_elements_by_class("c").is_empty());
        assert_eq!(finder.classes_count(), 2);
    }

    #[test]
    fn tags() {
        let root = Node::from_str(SVG).unwrap();
        let finder = Finder::new(&root);
        assert_eq!(finder.find_elements_by_tag(ElementId::Rect).len(), 3);
        assert_eq!(finder.find_elements_by_tag_name("linearGradient").len(), 3);
        assert!(finder.find_elements_by_tag_name("tspan").is_empty());
        assert!(finder.find_elements_by_tag(ElementId::Mask).is_empty());
        assert_eq!(finder.tags_count(), 7);
    }

    #[test]
    fn inherited() {
        let root = Node::from_str(SVG).unwrap();
        let finder = Finder::new(&root);
        let stack = finder.find_style_stack_by_id("r1").unwrap();
        assert_eq!(stack.resolve(StyleProperty::Fill), StyleValue::Color(Color::new_rgb(255, 0, 0)));
        assert_eq!(stack.get(StyleProperty::Opacity), None);
        assert_eq!(stack.resolve(StyleProperty::Opacity), StyleValue::Opacity(Opacity::ONE));
    }

    #[test]
    fn explicit_inherit() {
        let root = Node::from_str(SVG).unwrap();
        let finder = Finder::new(&root);
        let stack = finder.find_style_stack_by_id("r2").unwrap();
        assert_eq!(stack.resolve(StyleProperty::Fill), StyleValue::Color(Color::new_rgb(255, 0, 0)));
        assert_eq!(stack.resolve(StyleProperty::Opacity), StyleValue::Opacity(Opacity::new_clamped(0.5)));

        // `inherit` on the topmost setter falls back to the initial value.
        assert_eq!(stack.resolve(StyleProperty::Stroke), StyleValue::None);
    }

    #[test]
    fn closest_wins() {
        let root = Node::from_str(SVG).unwrap();
        let finder = Finder::new(&root);
        let stack = finder.find_style_stack_by_id("c1").unwrap();
        let fill = stack.get(StyleProperty::Fill).unwrap();
        assert_eq!(fill, &StyleValue::Url("lg3".to_string()));
        assert_eq!(finder.resolve_url(fill).unwrap().id(), "lg3");

        let ids: Vec<_> = stack.ancestors().map(|n| n.id()).collect();
        assert_eq!(ids, ["c1", "g2", "g1", "svg"]);
    }

    #[test]
    fn initial() {
        let root = Node::from_str(SVG).unwrap();
        let finder = Finder::new(&root);
        let stack = finder.style_stack(&root).unwrap();
        assert!(stack.parent().is_none());
        assert_eq!(stack.resolve(StyleProperty::Fill), StyleValue::Color(Color::black()));
        assert_eq!(stack.resolve(StyleProperty::StrokeWidth), StyleValue::Length(crate::Length::new_number(1.0)));
    }

    #[test]
    fn cascade_is_shared() {
        let root = Node::from_str(SVG).unwrap();
        let finder = Finder::new(&root);
        let stack = finder.find_style_stack_by_id("c1").unwrap();
        stack.get(StyleProperty::Fill);

        let g1 = finder.positions[&(finder.find_by_id("g1").unwrap() as *const Node)];
        assert!(finder.entries[g1].cascade.get().is_some());
        let r1 = finder.positions[&(finder.find_by_id("r1").unwrap() as *const Node)];
        assert!(finder.entries[r1].cascade.get().is_none());
    }

    #[test]
    fn foreign_node() {
        let root = Node::from_str(SVG).unwrap();
        let copy = root.clone();
        let finder = Finder::new(&root);
        assert!(finder.style_stack(&copy).is_none());
    }

    #[test]
    fn href_chain() {
        let root = Node::from_str(SVG).unwrap();
        let finder = Finder::new(&root);

        let lg3 = finder.find_by_id("lg3").unwrap();
        let ids: Vec<_> = finder.href_chain(lg3).iter().map(|n| n.id()).collect();
        assert_eq!(ids, ["lg2", "lg1"]);

        let rg1 = finder.find_by_id("rg1").unwrap();
        let ids: Vec<_> = finder.href_chain(rg1).iter().map(|n| n.id()).collect();
        assert_eq!(ids, ["rg2"]);

        assert!(finder.resolve_href(finder.find_by_id("lg1").unwrap()).is_none());
        assert!(finder.resolve_href(finder.find_by_id("r1").unwrap()).is_none());
    }
}
