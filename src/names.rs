// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

macro_rules! define_names {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[allow(missing_docs)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Parses a name.
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(text: &str) -> Option<Self> {
                match text {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Returns the name as it appears in a document.
            pub fn to_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str(self.to_str())
            }
        }
    };
}

pub(crate) use define_names;

define_names! {
    /// A tag kind.
    pub enum ElementId {
        Circle => "circle",
        Defs => "defs",
        Ellipse => "ellipse",
        FeBlend => "feBlend",
        FeColorMatrix => "feColorMatrix",
        FeComposite => "feComposite",
        FeGaussianBlur => "feGaussianBlur",
        Filter => "filter",
        G => "g",
        Image => "image",
        Line => "line",
        LinearGradient => "linearGradient",
        Mask => "mask",
        Path => "path",
        Polygon => "polygon",
        Polyline => "polyline",
        RadialGradient => "radialGradient",
        Rect => "rect",
        Stop => "stop",
        Svg => "svg",
        Symbol => "symbol",
        Text => "text",
        Use => "use",
    }
}

impl ElementId {
    /// Checks if this is a shape element.
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            ElementId::Circle
                | ElementId::Ellipse
                | ElementId::Line
                | ElementId::Path
                | ElementId::Polygon
                | ElementId::Polyline
                | ElementId::Rect
        )
    }

    /// Checks if this is a gradient element.
    pub fn is_gradient(&self) -> bool {
        matches!(self, ElementId::LinearGradient | ElementId::RadialGradient)
    }

    /// Checks if this is a filter primitive element.
    pub fn is_filter_primitive(&self) -> bool {
        matches!(
            self,
            ElementId::FeBlend
                | ElementId::FeColorMatrix
                | ElementId::FeComposite
                | ElementId::FeGaussianBlur
        )
    }

    /// Checks if elements of this kind own children.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ElementId::Defs
                | ElementId::Filter
                | ElementId::G
                | ElementId::LinearGradient
                | ElementId::Mask
                | ElementId::RadialGradient
                | ElementId::Svg
                | ElementId::Symbol
                | ElementId::Text
        )
    }
}

define_names! {
    /// A non-style attribute name.
    ///
    /// Style properties are listed in [`StyleProperty`](crate::StyleProperty).
    pub enum AttributeId {
        Class => "class",
        Cx => "cx",
        Cy => "cy",
        D => "d",
        FilterUnits => "filterUnits",
        Fx => "fx",
        Fy => "fy",
        GradientTransform => "gradientTransform",
        GradientUnits => "gradientUnits",
        Height => "height",
        Href => "href",
        Id => "id",
        In => "in",
        In2 => "in2",
        K1 => "k1",
        K2 => "k2",
        K3 => "k3",
        K4 => "k4",
        MaskContentUnits => "maskContentUnits",
        MaskUnits => "maskUnits",
        Mode => "mode",
        Offset => "offset",
        Operator => "operator",
        Points => "points",
        PreserveAspectRatio => "preserveAspectRatio",
        PrimitiveUnits => "primitiveUnits",
        R => "r",
        Result => "result",
        Rx => "rx",
        Ry => "ry",
        SpreadMethod => "spreadMethod",
        StdDeviation => "stdDeviation",
        Style => "style",
        Transform => "transform",
        Type => "type",
        Values => "values",
        ViewBox => "viewBox",
        Width => "width",
        X => "x",
        X1 => "x1",
        X2 => "x2",
        Y => "y",
        Y1 => "y1",
        Y2 => "y2",
    }
}
