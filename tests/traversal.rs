use std::str::FromStr;

use svgdom::*;

const SVG: &str = "\
<svg xmlns='http://www.w3.org/2000/svg' id='svg'>
    <defs id='defs1'>
        <linearGradient id='lg1'>
            <stop id='s1' offset='0'/>
            <stop id='s2' offset='1'/>
        </linearGradient>
    </defs>
    <g id='g1' opacity='0.5'>
        <rect id='r1' width='10' height='10'/>
        <g id='g2'>
            <circle id='c1' r='5'/>
            <path id='p1' d='M 10 20 L 30 40'/>
        </g>
    </g>
    <ellipse id='e1'/>
</svg>
";

#[derive(Default)]
struct Collector {
    ids: Vec<String>,
    paths: Vec<Vec<usize>>,
}

impl<'a> ConstVisitor<'a> for Collector {
    fn default_visit(&mut self, element: &'a dyn Element, cursor: &Cursor<'a, '_>) {
        self.ids.push(element.id().to_string());
        self.paths.push(cursor.path().to_vec());
    }
}

#[test]
fn pre_order() {
    let root = Node::from_str(SVG).unwrap();
    let mut v = Collector::default();
    root.accept(&mut v);
    assert_eq!(v.ids, [
        "svg", "defs1", "lg1", "s1", "s2", "g1", "r1", "g2", "c1", "p1", "e1",
    ]);
    assert_eq!(v.ids.len(), root.descendants_count());
}

#[test]
fn paths_resolve_back() {
    let root = Node::from_str(SVG).unwrap();
    let mut v = Collector::default();
    root.accept(&mut v);

    for (id, path) in v.ids.iter().zip(&v.paths) {
        assert_eq!(root.child_at(path).unwrap().id(), id);
    }
}

struct SkipGroups {
    visited: usize,
}

impl<'a> ConstVisitor<'a> for SkipGroups {
    fn default_visit(&mut self, _: &'a dyn Element, _: &Cursor<'a, '_>) {
        self.visited += 1;
    }

    fn visit_g(&mut self, _: &'a Group, _: &Cursor<'a, '_>) {}
}

#[test]
fn no_relay_no_descendants() {
    let root = Node::from_str(SVG).unwrap();
    let mut v = SkipGroups { visited: 0 };
    root.accept(&mut v);
    // svg, defs1, lg1, s1, s2, e1
    assert_eq!(v.visited, 6);
}

struct Parents {
    pairs: Vec<(String, Option<String>)>,
}

impl<'a> ConstVisitor<'a> for Parents {
    fn visit_circle(&mut self, e: &'a Circle, cursor: &Cursor<'a, '_>) {
        self.pairs.push((e.id.clone(), cursor.parent().map(|p| p.id().to_string())));
    }

    fn visit_g(&mut self, e: &'a Group, cursor: &Cursor<'a, '_>) {
        self.pairs.push((e.id.clone(), cursor.parent().map(|p| p.id().to_string())));
        relay_accept(self, cursor);
    }
}

#[test]
fn relay_exposes_parent() {
    let root = Node::from_str(SVG).unwrap();
    let mut v = Parents { pairs: Vec::new() };
    root.accept(&mut v);
    assert_eq!(v.pairs, [
        ("g1".to_string(), Some("svg".to_string())),
        ("g2".to_string(), Some("g1".to_string())),
        ("c1".to_string(), Some("g2".to_string())),
    ]);
}

#[test]
fn walk_from_subtree() {
    let root = Node::from_str(SVG).unwrap();
    let g2 = root.find_by_id("g2").unwrap();
    let mut v = Parents { pairs: Vec::new() };
    g2.accept(&mut v);
    assert_eq!(v.pairs, [
        ("g2".to_string(), None),
        ("c1".to_string(), Some("g2".to_string())),
    ]);
}

struct Scale(f64);

impl Visitor for Scale {
    fn visit_circle(&mut self, e: &mut Circle, _: &CursorMut) {
        e.r.number *= self.0;
    }

    fn visit_rect(&mut self, e: &mut Rect, _: &CursorMut) {
        e.bounds.width.number *= self.0;
        e.bounds.height.number *= self.0;
    }
}

#[test]
fn mutate() {
    let mut root = Node::from_str(SVG).unwrap();
    root.accept_mut(&mut Scale(2.0));

    match root.find_by_id("c1") {
        Some(Node::Circle(e)) => assert_eq!(e.r, Length::new_number(10.0)),
        _ => unreachable!(),
    }

    match root.find_by_id("r1") {
        Some(Node::Rect(e)) => assert_eq!(e.bounds.width, Length::new_number(20.0)),
        _ => unreachable!(),
    }
}

#[derive(Default)]
struct Strip {
    removed: Vec<Vec<usize>>,
}

impl Visitor for Strip {
    fn default_visit(&mut self, element: &mut dyn Element, cursor: &CursorMut) {
        if element.id().starts_with('s') && cursor.parent() == Some(ElementId::LinearGradient) {
            self.removed.push(cursor.path().to_vec());
        }

        if let Some(style) = element.as_styleable_mut().map(|e| e.style_mut()) {
            style.remove(StyleProperty::Opacity);
        }
    }
}

#[test]
fn structural_edit_after_walk() {
    let mut root = Node::from_str(SVG).unwrap();
    let mut v = Strip::default();
    root.accept_mut(&mut v);
    assert_eq!(v.removed, [vec![0, 0, 0], vec![0, 0, 1]]);

    for path in v.removed.iter().rev() {
        assert!(root.remove_at(path).is_some());
    }

    assert!(root.find_by_id("lg1").unwrap().children().is_empty());
    assert!(root.find_by_id("g1").unwrap().style().unwrap().is_empty());
    assert_eq!(root.descendants_count(), 9);
}

#[test]
fn clone_is_deep() {
    let root = Node::from_str(SVG).unwrap();
    let mut copy = root.clone();
    assert_eq!(copy, root);

    copy.accept_mut(&mut Scale(3.0));
    copy.remove_at(&[1, 1]);
    copy.find_by_id_mut("g1").unwrap().style_mut().unwrap().insert(StyleProperty::Fill, StyleValue::None);

    assert_ne!(copy, root);
    assert_eq!(root, Node::from_str(SVG).unwrap());
}
