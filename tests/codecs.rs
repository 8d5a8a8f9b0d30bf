use std::str::FromStr;

use svgdom::{
    parse_path, parse_transform_list, to_affine, write_path, write_transform_list, AspectRatio,
    Color, Length, LengthUnit, PathStep, StyleMap, StyleProperty, StyleValue, Transformation,
    ViewBox,
};

#[test]
fn length_units() {
    assert_eq!(Length::parse("10").unit, LengthUnit::Number);
    assert_eq!(Length::parse("10px").unit, LengthUnit::Px);
    assert_eq!(Length::parse("10%").unit, LengthUnit::Percent);
    assert_eq!(Length::parse("10zz").unit, LengthUnit::Unknown);
    assert_eq!(Length::parse("zz"), Length::unspecified());
}

#[test]
fn length_to_px() {
    assert_eq!(Length::parse("1in").to_px(96.0), Some(96.0));
    assert_eq!(Length::parse("1in").to_px(300.0), Some(300.0));
    assert_eq!(Length::parse("1em").to_px(96.0), Some(0.0));
    assert_eq!(Length::parse("10%").to_px(96.0), None);
}

#[test]
fn length_to_px_monotonic() {
    for text in &["1in", "2.54cm", "25mm", "72pt", "6pc"] {
        let l = Length::parse(text);
        let low = l.to_px(72.0).unwrap();
        let high = l.to_px(144.0).unwrap();
        assert!(high >= low, "{}", text);
    }
}

#[test]
fn transform_round_trip() {
    let text = "translate(10, 20) scale(2) rotate(45 5 5) skewX(10) matrix(1 0 0 1 3 4)";
    let list = parse_transform_list(text).unwrap();
    assert_eq!(list.len(), 5);
    assert_eq!(list[1], Transformation::Scale { sx: 2.0, sy: 2.0 });

    let written = write_transform_list(&list);
    assert_eq!(parse_transform_list(&written).unwrap(), list);
}

#[test]
fn transform_composition() {
    let list = parse_transform_list("translate(10 20) scale(2)").unwrap();
    let ts = to_affine(&list);
    let p = ts * kurbo::Point::new(1.0, 2.0);
    assert_eq!((p.x, p.y), (12.0, 24.0));

    let steps: svgdom::Affine = to_affine(&list[..1]) * to_affine(&list[1..]);
    assert_eq!(steps, ts);
}

#[test]
fn transform_error() {
    assert!(parse_transform_list("scale(2) qwe(1)").is_err());
    assert!(parse_transform_list("").unwrap().is_empty());
}

#[test]
fn path_implicit_commands() {
    let steps = parse_path("M 10 20 30 40 m 5 5 5 5").unwrap();
    assert_eq!(steps, vec![
        PathStep::MoveToAbs { x: 10.0, y: 20.0 },
        PathStep::LineToAbs { x: 30.0, y: 40.0 },
        PathStep::MoveToRel { x: 5.0, y: 5.0 },
        PathStep::LineToRel { x: 5.0, y: 5.0 },
    ]);

    assert_eq!(write_path(&steps), "M10 20 L30 40 m5 5 l5 5");
}

#[test]
fn path_round_trip() {
    let text = "M0 0 C1 1 2 2 3 3 S4 4 5 5 Q6 6 7 7 T8 8 A1 1 0 0 1 9 9 H10 V11 Z";
    let steps = parse_path(text).unwrap();
    assert_eq!(parse_path(&write_path(&steps)).unwrap(), steps);
}

#[test]
fn colors() {
    assert_eq!(Color::from_str("red").unwrap(), Color::new_rgb(255, 0, 0));
    assert_eq!(Color::from_str("#abc").unwrap(), Color::new_rgb(0xaa, 0xbb, 0xcc));
    assert_eq!(Color::from_str("rgb(0, 128, 255)").unwrap(), Color::new_rgb(0, 128, 255));
    assert_eq!(Color::new_rgb(255, 0, 16).to_string(), "#ff0010");
    assert!(Color::from_str("qwe").is_err());
}

#[test]
fn view_box() {
    let v = ViewBox::from_str("0 0 100 50").unwrap();
    assert_eq!(v, ViewBox::new(0.0, 0.0, 100.0, 50.0));
    assert_eq!(ViewBox::from_str(&v.to_string()).unwrap(), v);

    let a = AspectRatio::from_str("xMinYMax slice").unwrap();
    assert_eq!(AspectRatio::from_str(&a.to_string()).unwrap(), a);
}

#[test]
fn style_map() {
    let map = StyleMap::parse("fill:red;stroke-width:2;opacity:50%;unknown:1");
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(StyleProperty::Fill), Some(&StyleValue::Color(Color::new_rgb(255, 0, 0))));
    assert_eq!(map.to_string(), "fill:#ff0000;stroke-width:2;opacity:0.5");
    assert_eq!(StyleMap::parse(&map.to_string()), map);
}

#[test]
fn style_property_names() {
    for p in StyleProperty::ALL {
        assert_eq!(StyleProperty::from_str(p.to_str()), Some(*p));
    }

    assert_eq!(StyleProperty::from_str("stroke-dasharray"), Some(StyleProperty::StrokeDasharray));
    assert_eq!(StyleProperty::from_str("Fill"), None);
}
