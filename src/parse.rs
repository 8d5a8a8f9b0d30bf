// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use crate::tree::Node;
use crate::{ElementId, Error};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

// Elements nesting limit. Deeper trees are rejected to keep
// recursive walks within the stack.
const MAX_DEPTH: usize = 1024;

/// Document loading options.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// The maximum number of loaded elements.
    ///
    /// Skipped elements are not counted.
    ///
    /// Default: 1_000_000
    pub nodes_limit: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            nodes_limit: 1_000_000,
        }
    }
}

/// Parses a tree from an SVG string.
///
/// Only elements from the SVG namespace with a known tag are loaded,
/// everything else is skipped with all its children.
pub fn parse_str(text: &str, opt: &ParseOptions) -> Result<Node, Error> {
    let xml_opt = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };

    let doc = roxmltree::Document::parse_with_options(text, xml_opt)?;
    parse_document(&doc, opt)
}

/// Parses a tree from a `roxmltree::Document`.
pub fn parse_document(doc: &roxmltree::Document, opt: &ParseOptions) -> Result<Node, Error> {
    let root = doc.root_element();
    if root.tag_name().namespace() != Some(SVG_NS) || root.tag_name().name() != "svg" {
        return Err(Error::InvalidRoot);
    }

    let mut loader = Loader {
        opt,
        nodes_count: 0,
    };

    loader.parse_element(root, ElementId::Svg, 0)
}

impl FromStr for Node {
    type Err = Error;

    /// Parses a tree using default [`ParseOptions`].
    fn from_str(text: &str) -> Result<Self, Error> {
        parse_str(text, &ParseOptions::default())
    }
}

struct Loader<'o> {
    opt: &'o ParseOptions,
    nodes_count: u32,
}

impl Loader<'_> {
    fn parse_element(
        &mut self,
        xml: roxmltree::Node,
        tag: ElementId,
        depth: usize,
    ) -> Result<Node, Error> {
        self.nodes_count += 1;
        if self.nodes_count > self.opt.nodes_limit || depth > MAX_DEPTH {
            return Err(Error::ElementsLimitReached);
        }

        let mut attributes = Vec::new();
        for attr in xml.attributes() {
            match attr.namespace() {
                None => attributes.push((attr.name(), attr.value())),
                Some(XLINK_NS) if attr.name() == "href" => {
                    attributes.push(("xlink:href", attr.value()))
                }
                Some(_) => {}
            }
        }

        let mut node = Node::from_attributes(tag, attributes);

        if let Node::Text(ref mut text) = node {
            text.text = collect_text(xml);
        }

        if !node.is_container() {
            if xml.children().any(|n| n.is_element()) {
                log::warn!("'{}' cannot have children. Skipped.", tag);
            }

            return Ok(node);
        }

        let mut children = Vec::new();
        for child in xml.children().filter(|n| n.is_element()) {
            let name = child.tag_name();
            if name.namespace() != Some(SVG_NS) {
                log::debug!("Non-SVG element '{}' skipped.", name.name());
                continue;
            }

            match ElementId::from_str(name.name()) {
                Some(child_tag) => children.push(self.parse_element(child, child_tag, depth + 1)?),
                None => log::warn!("Unsupported element '{}' skipped.", name.name()),
            }
        }

        if let Some(list) = node.children_mut() {
            *list = children;
        }

        Ok(node)
    }
}

// Text nodes are joined and whitespaces are collapsed.
fn collect_text(xml: roxmltree::Node) -> String {
    let mut text = String::new();
    for child in xml.children() {
        if let Some(s) = child.text().filter(|_| child.is_text()) {
            text.push_str(s);
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_err {
        ($name:ident, $text:expr, $err:pat) => (
            #[test]
            fn $name() {
                assert!(matches!(Node::from_str($text), Err($err)));
            }
        )
    }

    test_err!(not_svg_root, "<svg><rect/></svg>", Error::InvalidRoot);
    test_err!(html_root, "<html xmlns='http://www.w3.org/2000/svg'/>", Error::InvalidRoot);
    test_err!(malformed, "<svg xmlns='http://www.w3.org/2000/svg'>", Error::ParsingFailed(_));

    #[test]
    fn unknown_elements() {
        let root = Node::from_str("\
<svg xmlns='http://www.w3.org/2000/svg' xmlns:x='http://example.com'>
    <x:rect/>
    <tspan><rect/></tspan>
    <rect/>
    <!-- comment -->
</svg>").unwrap();
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].tag_name(), ElementId::Rect);
    }

    #[test]
    fn leaf_children() {
        let root = Node::from_str("\
<svg xmlns='http://www.w3.org/2000/svg'><rect><circle/></rect></svg>").unwrap();
        assert_eq!(root.descendants_count(), 2);
    }

    #[test]
    fn xlink() {
        let root = Node::from_str("\
<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>
    <use id='u1' xlink:href='#r1'/>
    <use id='u2' href='#r2'/>
</svg>").unwrap();

        match root.find_by_id("u1") {
            Some(Node::Use(e)) => assert_eq!(e.href, "r1"),
            _ => unreachable!(),
        }

        match root.find_by_id("u2") {
            Some(Node::Use(e)) => assert_eq!(e.href, "r2"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn text() {
        let root = Node::from_str("\
<svg xmlns='http://www.w3.org/2000/svg'>
    <text id='t1'>
        Some   long
        text &amp; more
    </text>
</svg>").unwrap();

        match root.find_by_id("t1") {
            Some(Node::Text(e)) => assert_eq!(e.text, "Some long text & more"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn nodes_limit() {
        let text = "<svg xmlns='http://www.w3.org/2000/svg'><g><rect/><rect/></g></svg>";
        let opt = ParseOptions { nodes_limit: 3 };
        assert!(matches!(parse_str(text, &opt), Err(Error::ElementsLimitReached)));

        let opt = ParseOptions { nodes_limit: 4 };
        assert_eq!(parse_str(text, &opt).unwrap().descendants_count(), 4);
    }

    #[test]
    fn depth_limit() {
        let mut text = String::from("<svg xmlns='http://www.w3.org/2000/svg'>");
        text.push_str(&"<g>".repeat(MAX_DEPTH + 1));
        text.push_str(&"</g>".repeat(MAX_DEPTH + 1));
        text.push_str("</svg>");
        assert!(matches!(Node::from_str(&text), Err(Error::ElementsLimitReached)));
    }
}
