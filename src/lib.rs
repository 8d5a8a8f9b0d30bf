// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgdom` is an in-memory [SVG] document model.

A document is a tree of strongly-typed elements. Each element kind stores
only the attributes it supports, already parsed into typed values,
while the shared parts, like the style map or the transform, are exposed
through capability traits.

## Features

- Parsing and writing of SVG attribute grammars: lengths, transform lists,
  path data, colors, `viewBox`, `preserveAspectRatio` and style declarations
- Double-dispatch tree traversal, read-only and mutating,
  with automatic recursion into containers
- Deep cloning and SVG writing built on top of the traversal
- Lookup by id, class and tag name
- Style cascade resolution along the ancestors chain

## Limitations

- No rendering
- No CSS selectors, only the `style` and `class` attributes
- Font relative units are always resolved to zero
- The tree is not synchronized. A [`Finder`] borrows it,
  so the tree cannot be changed while the indices are alive.

[SVG]: https://en.wikipedia.org/wiki/Scalable_Vector_Graphics
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod cloner;
mod color;
mod error;
mod finder;
mod length;
mod names;
mod parse;
mod path;
mod stream;
mod style;
mod transform;
mod tree;
mod viewbox;
mod visitor;
mod writer;

pub use kurbo::Affine;
pub use xmlwriter::Indent;

pub use crate::color::Color;
pub use crate::error::Error;
pub use crate::finder::{Finder, StyleStack};
pub use crate::length::{Length, LengthListParser, LengthUnit};
pub use crate::names::{AttributeId, ElementId};
pub use crate::parse::{parse_document, parse_str, ParseOptions};
pub use crate::path::{parse_path, write_path, PathParser, PathStep};
pub use crate::stream::{NumberListParser, Stream};
pub use crate::style::{
    FillRule, LineCap, LineJoin, Opacity, StyleMap, StyleProperty, StyleRule, StyleValue,
};
pub use crate::transform::{
    parse_transform_list, to_affine, write_transform_list, TransformListParser, Transformation,
};
pub use crate::tree::*;
pub use crate::viewbox::{Align, AspectRatio, ViewBox};
pub use crate::visitor::{
    relay_accept, relay_accept_mut, ConstVisitor, Cursor, CursorMut, Visitor,
};
pub use crate::writer::WriteOptions;
