// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use crate::stream::ByteExt;
use crate::{Error, Stream};

/// Representation of the `<color>` type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[allow(missing_docs)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    /// Constructs a new `Color` from RGB values.
    #[inline]
    pub const fn new_rgb(red: u8, green: u8, blue: u8) -> Color {
        Color { red, green, blue }
    }

    /// Constructs a new `Color` set to black.
    #[inline]
    pub const fn black() -> Color {
        Color::new_rgb(0, 0, 0)
    }

    /// Constructs a new `Color` set to white.
    #[inline]
    pub const fn white() -> Color {
        Color::new_rgb(255, 255, 255)
    }

    /// Packs the color as `0xRRGGBB`.
    #[inline]
    pub fn to_u32(&self) -> u32 {
        (u32::from(self.red) << 16) | (u32::from(self.green) << 8) | u32::from(self.blue)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl std::str::FromStr for Color {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Error> {
        let mut s = Stream::from(text);
        let color = s.parse_color()?;

        // ICC colors are not supported.
        s.skip_spaces();
        if !s.at_end() {
            return Err(Error::UnexpectedData(s.calc_char_pos()));
        }

        Ok(color)
    }
}

impl<'a> Stream<'a> {
    /// Parses a color.
    ///
    /// Supports `#rgb`, `#rrggbb`, `rgb(r, g, b)` with numbers or percents
    /// and case-insensitive color keywords.
    pub fn parse_color(&mut self) -> Result<Color, Error> {
        self.skip_spaces();

        if self.curr_byte()? == b'#' {
            self.advance(1);
            let color_str = self.consume_bytes(|_, c| c.is_hex_digit()).as_bytes();
            match *color_str {
                [r1, r2, g1, g2, b1, b2] => Ok(Color::new_rgb(
                    hex_pair(r1, r2),
                    hex_pair(g1, g2),
                    hex_pair(b1, b2),
                )),
                [r, g, b] => Ok(Color::new_rgb(short_hex(r), short_hex(g), short_hex(b))),
                _ => Err(Error::InvalidValue),
            }
        } else {
            let name = self.consume_ascii_ident().to_ascii_lowercase();
            if name == "rgb" {
                self.skip_spaces();
                self.consume_byte(b'(')?;

                let mut channels = [0u8; 3];
                for channel in channels.iter_mut() {
                    self.skip_spaces();
                    let value = self.parse_number()?;
                    let value = if self.is_curr_byte_eq(b'%') {
                        self.advance(1);
                        value * 255.0 / 100.0
                    } else {
                        value
                    };

                    *channel = value.round().max(0.0).min(255.0) as u8;

                    self.skip_spaces();
                    self.parse_list_separator();
                }

                self.skip_spaces();
                self.consume_byte(b')')?;

                Ok(Color::new_rgb(channels[0], channels[1], channels[2]))
            } else {
                from_name(&name).ok_or(Error::InvalidValue)
            }
        }
    }
}

#[inline]
fn from_hex(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

#[inline]
fn short_hex(c: u8) -> u8 {
    let h = from_hex(c);
    (h << 4) | h
}

#[inline]
fn hex_pair(c1: u8, c2: u8) -> u8 {
    (from_hex(c1) << 4) | from_hex(c2)
}

/// Returns a color by its CSS keyword. The name must be lowercase.
#[rustfmt::skip]
pub fn from_name(name: &str) -> Option<Color> {
    let (r, g, b) = match name {
        "aliceblue"            => (240, 248, 255),
        "antiquewhite"         => (250, 235, 215),
        "aqua"                 => (  0, 255, 255),
        "aquamarine"           => (127, 255, 212),
        "azure"                => (240, 255, 255),
        "beige"                => (245, 245, 220),
        "bisque"               => (255, 228, 196),
        "black"                => (  0,   0,   0),
        "blanchedalmond"       => (255, 235, 205),
        "blue"                 => (  0,   0, 255),
        "blueviolet"           => (138,  43, 226),
        "brown"                => (165,  42,  42),
        "burlywood"            => (222, 184, 135),
        "cadetblue"            => ( 95, 158, 160),
        "chartreuse"           => (127, 255,   0),
        "chocolate"            => (210, 105,  30),
        "coral"                => (255, 127,  80),
        "cornflowerblue"       => (100, 149, 237),
        "cornsilk"             => (255, 248, 220),
        "crimson"              => (220,  20,  60),
        "cyan"                 => (  0, 255, 255),
        "darkblue"             => (  0,   0, 139),
        "darkcyan"             => (  0, 139, 139),
        "darkgoldenrod"        => (184, 134,  11),
        "darkgray"             => (169, 169, 169),
        "darkgreen"            => (  0, 100,   0),
        "darkgrey"             => (169, 169, 169),
        "darkkhaki"            => (189, 183, 107),
        "darkmagenta"          => (139,   0, 139),
        "darkolivegreen"       => ( 85, 107,  47),
        "darkorange"           => (255, 140,   0),
        "darkorchid"           => (153,  50, 204),
        "darkred"              => (139,   0,   0),
        "darksalmon"           => (233, 150, 122),
        "darkseagreen"         => (143, 188, 143),
        "darkslateblue"        => ( 72,  61, 139),
        "darkslategray"        => ( 47,  79,  79),
        "darkslategrey"        => ( 47,  79,  79),
        "darkturquoise"        => (  0, 206, 209),
        "darkviolet"           => (148,   0, 211),
        "deeppink"             => (255,  20, 147),
        "deepskyblue"          => (  0, 191, 255),
        "dimgray"              => (105, 105, 105),
        "dimgrey"              => (105, 105, 105),
        "dodgerblue"           => ( 30, 144, 255),
        "firebrick"            => (178,  34,  34),
        "floralwhite"          => (255, 250, 240),
        "forestgreen"          => ( 34, 139,  34),
        "fuchsia"              => (255,   0, 255),
        "gainsboro"            => (220, 220, 220),
        "ghostwhite"           => (248, 248, 255),
        "gold"                 => (255, 215,   0),
        "goldenrod"            => (218, 165,  32),
        "gray"                 => (128, 128, 128),
        "green"                => (  0, 128,   0),
        "greenyellow"          => (173, 255,  47),
        "grey"                 => (128, 128, 128),
        "honeydew"             => (240, 255, 240),
        "hotpink"              => (255, 105, 180),
        "indianred"            => (205,  92,  92),
        "indigo"               => ( 75,   0, 130),
        "ivory"                => (255, 255, 240),
        "khaki"                => (240, 230, 140),
        "lavender"             => (230, 230, 250),
        "lavenderblush"        => (255, 240, 245),
        "lawngreen"            => (124, 252,   0),
        "lemonchiffon"         => (255, 250, 205),
        "lightblue"            => (173, 216, 230),
        "lightcoral"           => (240, 128, 128),
        "lightcyan"            => (224, 255, 255),
        "lightgoldenrodyellow" => (250, 250, 210),
        "lightgray"            => (211, 211, 211),
        "lightgreen"           => (144, 238, 144),
        "lightgrey"            => (211, 211, 211),
        "lightpink"            => (255, 182, 193),
        "lightsalmon"          => (255, 160, 122),
        "lightseagreen"        => ( 32, 178, 170),
        "lightskyblue"         => (135, 206, 250),
        "lightslategray"       => (119, 136, 153),
        "lightslategrey"       => (119, 136, 153),
        "lightsteelblue"       => (176, 196, 222),
        "lightyellow"          => (255, 255, 224),
        "lime"                 => (  0, 255,   0),
        "limegreen"            => ( 50, 205,  50),
        "linen"                => (250, 240, 230),
        "magenta"              => (255,   0, 255),
        "maroon"               => (128,   0,   0),
        "mediumaquamarine"     => (102, 205, 170),
        "mediumblue"           => (  0,   0, 205),
        "mediumorchid"         => (186,  85, 211),
        "mediumpurple"         => (147, 112, 219),
        "mediumseagreen"       => ( 60, 179, 113),
        "mediumslateblue"      => (123, 104, 238),
        "mediumspringgreen"    => (  0, 250, 154),
        "mediumturquoise"      => ( 72, 209, 204),
        "mediumvioletred"      => (199,  21, 133),
        "midnightblue"         => ( 25,  25, 112),
        "mintcream"            => (245, 255, 250),
        "mistyrose"            => (255, 228, 225),
        "moccasin"             => (255, 228, 181),
        "navajowhite"          => (255, 222, 173),
        "navy"                 => (  0,   0, 128),
        "oldlace"              => (253, 245, 230),
        "olive"                => (128, 128,   0),
        "olivedrab"            => (107, 142,  35),
        "orange"               => (255, 165,   0),
        "orangered"            => (255,  69,   0),
        "orchid"               => (218, 112, 214),
        "palegoldenrod"        => (238, 232, 170),
        "palegreen"            => (152, 251, 152),
        "paleturquoise"        => (175, 238, 238),
        "palevioletred"        => (219, 112, 147),
        "papayawhip"           => (255, 239, 213),
        "peachpuff"            => (255, 218, 185),
        "peru"                 => (205, 133,  63),
        "pink"                 => (255, 192, 203),
        "plum"                 => (221, 160, 221),
        "powderblue"           => (176, 224, 230),
        "purple"               => (128,   0, 128),
        "red"                  => (255,   0,   0),
        "rosybrown"            => (188, 143, 143),
        "royalblue"            => ( 65, 105, 225),
        "saddlebrown"          => (139,  69,  19),
        "salmon"               => (250, 128, 114),
        "sandybrown"           => (244, 164,  96),
        "seagreen"             => ( 46, 139,  87),
        "seashell"             => (255, 245, 238),
        "sienna"               => (160,  82,  45),
        "silver"               => (192, 192, 192),
        "skyblue"              => (135, 206, 235),
        "slateblue"            => (106,  90, 205),
        "slategray"            => (112, 128, 144),
        "slategrey"            => (112, 128, 144),
        "snow"                 => (255, 250, 250),
        "springgreen"          => (  0, 255, 127),
        "steelblue"            => ( 70, 130, 180),
        "tan"                  => (210, 180, 140),
        "teal"                 => (  0, 128, 128),
        "thistle"              => (216, 191, 216),
        "tomato"               => (255,  99,  71),
        "turquoise"            => ( 64, 224, 208),
        "violet"               => (238, 130, 238),
        "wheat"                => (245, 222, 179),
        "white"                => (255, 255, 255),
        "whitesmoke"           => (245, 245, 245),
        "yellow"               => (255, 255,   0),
        "yellowgreen"          => (154, 205,  50),
        _ => return None,
    };

    Some(Color::new_rgb(r, g, b))
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use super::*;

    macro_rules! test {
        ($name:ident, $text:expr, $color:expr) => {
            #[test]
            fn $name() {
                assert_eq!(Color::from_str($text).unwrap(), $color);
            }
        };
    }

    test!(rrggbb,            "#ff0000",             Color::new_rgb(255, 0, 0));
    test!(rrggbb_upper,      "#FF0000",             Color::new_rgb(255, 0, 0));
    test!(rgb_hex,           "#f00",                Color::new_rgb(255, 0, 0));
    test!(spaced,            "  #f00  ",            Color::new_rgb(255, 0, 0));
    test!(rgb_numeric,       "rgb(254, 203, 231)",  Color::new_rgb(254, 203, 231));
    test!(rgb_percentage,    "rgb(50%, 50%, 50%)",  Color::new_rgb(128, 128, 128));
    test!(rgb_clamped,       "rgb(300, -5, 10)",    Color::new_rgb(255, 0, 10));
    test!(rgb_upper,         "RGB(1 2 3)",          Color::new_rgb(1, 2, 3));
    test!(name_red,          "red",                 Color::new_rgb(255, 0, 0));
    test!(name_upper,        "RED",                 Color::new_rgb(255, 0, 0));
    test!(name_cornflower,   "cornflowerblue",      Color::new_rgb(100, 149, 237));

    macro_rules! test_err {
        ($name:ident, $text:expr, $err:expr) => {
            #[test]
            fn $name() {
                assert_eq!(Color::from_str($text).unwrap_err().to_string(), $err);
            }
        };
    }

    test_err!(not_a_color_1,     "text",             "invalid value");
    test_err!(icc_color,         "#CD853F icc-color(acmecmyk, 0.11, 0.48, 0.83, 0.00)",
                                 "unexpected data at position 9");
    test_err!(invalid_length,    "#ff00",            "invalid value");
    test_err!(unclosed_rgb,      "rgb(1, 2, 3",      "unexpected end of stream");

    #[test]
    fn write() {
        assert_eq!(Color::new_rgb(255, 0, 10).to_string(), "#ff000a");
        assert_eq!(Color::new_rgb(255, 0, 10).to_u32(), 0xff000a);
    }
}
