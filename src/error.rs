// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// List of all errors.
///
/// Attribute codecs never return these to the tree builder's callers:
/// a value that fails to parse is replaced by its default and logged.
/// Only document loading reports errors.
#[derive(Debug)]
pub enum Error {
    /// An input data ended earlier than expected.
    UnexpectedEndOfStream,

    /// An input text contains unknown data.
    UnexpectedData(usize),

    /// A provided string doesn't have a valid data.
    InvalidValue,

    /// An invalid/unexpected character.
    ///
    /// The first byte is an actual one, others - expected.
    InvalidChar(Vec<u8>, usize),

    /// An invalid number.
    InvalidNumber(usize),

    /// Only UTF-8 content is supported.
    NotAnUtf8Str,

    /// The root element is not `svg`.
    InvalidRoot,

    /// SVG has more than the allowed number of elements.
    ElementsLimitReached,

    /// Failed to parse an SVG data.
    ParsingFailed(roxmltree::Error),
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::ParsingFailed(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::UnexpectedEndOfStream => {
                write!(f, "unexpected end of stream")
            }
            Error::UnexpectedData(pos) => {
                write!(f, "unexpected data at position {}", pos)
            }
            Error::InvalidValue => {
                write!(f, "invalid value")
            }
            Error::InvalidChar(ref chars, pos) => {
                let expected: Vec<String> = chars
                    .iter()
                    .skip(1)
                    .map(|c| (*c as char).to_string())
                    .collect();

                write!(
                    f,
                    "expected '{}' not '{}' at position {}",
                    expected.join("', '"),
                    chars.first().map(|c| *c as char).unwrap_or(' '),
                    pos
                )
            }
            Error::InvalidNumber(pos) => {
                write!(f, "invalid number at position {}", pos)
            }
            Error::NotAnUtf8Str => {
                write!(f, "provided data has not an UTF-8 encoding")
            }
            Error::InvalidRoot => {
                write!(f, "the root element is not 'svg'")
            }
            Error::ElementsLimitReached => {
                write!(f, "the maximum number of SVG elements has been reached")
            }
            Error::ParsingFailed(ref e) => {
                write!(f, "SVG data parsing failed cause {}", e)
            }
        }
    }
}

impl std::error::Error for Error {}
