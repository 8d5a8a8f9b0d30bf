// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs::File;
use std::io::{self, Read, Write};
use std::process;

use pico_args::Arguments;

const HELP: &str = "\
svgdom loads an SVG into a typed tree and writes it back in a canonical form.

USAGE:
  svgdom [OPTIONS] <in-svg> <out-svg>  # from file to file
  svgdom [OPTIONS] <in-svg> -          # from file to stdout
  svgdom [OPTIONS] - <out-svg>         # from stdin to file
  svgdom --resolve ID <in-svg>         # prints the cascaded style of an element

OPTIONS:
  -h, --help                        Prints help information
  -V, --version                     Prints version information

  --id-prefix                       Adds a prefix to each ID attribute
  --indent INDENT                   Sets the XML nodes indent
                                    [values: none, 0, 1, 2, 3, 4, tabs] [default: 4]
  --attrs-indent INDENT             Sets the XML attributes indent
                                    [values: none, 0, 1, 2, 3, 4, tabs] [default: none]
  --coordinates-precision NUM       Set the coordinates numeric precision.
                                    Smaller precision can lead to a malformed output in some cases
                                    [values: 2..8 (inclusive)]
                                    [default: shortest lossless form]
  --transforms-precision NUM        Set the transform values numeric precision.
                                    Smaller precision can lead to a malformed output in some cases
                                    [values: 2..8 (inclusive)]
                                    [default: shortest lossless form]
  --resolve ID                      Prints style properties of the element with
                                    the specified ID, including inherited ones
  --dpi DPI                         Sets the resolution used to print lengths
                                    by --resolve
                                    [default: 96] [possible values: 10..4000 (inclusive)]
  --nodes-limit NUM                 Sets the maximum number of loaded elements
                                    [default: 1000000]
  --quiet                           Disables warnings

ARGS:
  <in-svg>                          Input file
  <out-svg>                         Output file
";

#[derive(Debug)]
struct Args {
    id_prefix: Option<String>,
    indent: svgdom::Indent,
    attrs_indent: svgdom::Indent,
    coordinates_precision: Option<u8>,
    transforms_precision: Option<u8>,
    resolve: Option<String>,
    dpi: u32,
    nodes_limit: Option<u32>,

    quiet: bool,

    input: String,
    output: Option<String>,
}

fn collect_args() -> Result<Args, pico_args::Error> {
    let mut input = Arguments::from_env();

    if input.contains(["-h", "--help"]) {
        print!("{}", HELP);
        process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    Ok(Args {
        id_prefix: input.opt_value_from_str("--id-prefix")?,
        indent: input
            .opt_value_from_fn("--indent", parse_indent)?
            .unwrap_or(svgdom::Indent::Spaces(4)),
        attrs_indent: input
            .opt_value_from_fn("--attrs-indent", parse_indent)?
            .unwrap_or(svgdom::Indent::None),
        coordinates_precision: input
            .opt_value_from_fn("--coordinates-precision", parse_precision)?,
        transforms_precision: input.opt_value_from_fn("--transforms-precision", parse_precision)?,
        resolve: input.opt_value_from_str("--resolve")?,
        dpi: input.opt_value_from_fn("--dpi", parse_dpi)?.unwrap_or(96),
        nodes_limit: input.opt_value_from_str("--nodes-limit")?,

        quiet: input.contains("--quiet"),

        input: input.free_from_str()?,
        output: input.opt_free_from_str()?,
    })
}

fn parse_dpi(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid number")?;

    if (10..=4000).contains(&n) {
        Ok(n)
    } else {
        Err("DPI out of bounds".to_string())
    }
}

fn parse_indent(s: &str) -> Result<svgdom::Indent, String> {
    let indent = match s {
        "none" => svgdom::Indent::None,
        "0" => svgdom::Indent::Spaces(0),
        "1" => svgdom::Indent::Spaces(1),
        "2" => svgdom::Indent::Spaces(2),
        "3" => svgdom::Indent::Spaces(3),
        "4" => svgdom::Indent::Spaces(4),
        "tabs" => svgdom::Indent::Tabs,
        _ => return Err("invalid INDENT value".to_string()),
    };

    Ok(indent)
}

fn parse_precision(s: &str) -> Result<u8, String> {
    let n: u8 = s.parse().map_err(|_| "invalid precision NUM value")?;

    if (2..=8).contains(&n) {
        Ok(n)
    } else {
        Err("precision NUM cannot be smaller than 2 or larger than 8".to_string())
    }
}

#[derive(Clone, PartialEq, Debug)]
enum InputFrom<'a> {
    Stdin,
    File(&'a str),
}

#[derive(Clone, PartialEq, Debug)]
enum OutputTo<'a> {
    Stdout,
    File(&'a str),
}

fn main() {
    let args = match collect_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(1);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    if let Err(e) = process(args) {
        eprintln!("Error: {}.", e);
        process::exit(1);
    }
}

fn process(args: Args) -> Result<(), String> {
    let in_svg = match args.input.as_str() {
        "-" => InputFrom::Stdin,
        path => InputFrom::File(path),
    };

    let input_svg = match in_svg {
        InputFrom::Stdin => load_stdin(),
        InputFrom::File(path) => std::fs::read_to_string(path).map_err(|e| e.to_string()),
    }?;

    let mut parse_opt = svgdom::ParseOptions::default();
    if let Some(n) = args.nodes_limit {
        parse_opt.nodes_limit = n;
    }

    let root = svgdom::parse_str(&input_svg, &parse_opt).map_err(|e| e.to_string())?;

    if let Some(ref id) = args.resolve {
        return print_style(&root, id, args.dpi);
    }

    let out_svg = match args.output.as_deref() {
        Some("-") => OutputTo::Stdout,
        Some(path) => OutputTo::File(path),
        None => return Err("<out-svg> is not set".to_string()),
    };

    let xml_opt = svgdom::WriteOptions {
        id_prefix: args.id_prefix,
        coordinates_precision: args.coordinates_precision,
        transforms_precision: args.transforms_precision,
        use_single_quote: false,
        indent: args.indent,
        attributes_indent: args.attrs_indent,
    };

    let s = root.to_string(&xml_opt);
    match out_svg {
        OutputTo::Stdout => {
            io::stdout()
                .write_all(s.as_bytes())
                .map_err(|_| "failed to write to the stdout".to_string())?;
        }
        OutputTo::File(path) => {
            let mut f =
                File::create(path).map_err(|_| "failed to create the output file".to_string())?;
            f.write_all(s.as_bytes())
                .map_err(|_| "failed to write to the output file".to_string())?;
        }
    }

    Ok(())
}

fn print_style(root: &svgdom::Node, id: &str, dpi: u32) -> Result<(), String> {
    let finder = svgdom::Finder::new(root);
    let stack = finder
        .find_style_stack_by_id(id)
        .ok_or_else(|| format!("an element with '{}' ID is not found", id))?;

    for property in svgdom::StyleProperty::ALL {
        let value = match stack.get(*property) {
            Some(v) => v,
            None => continue,
        };

        match value {
            svgdom::StyleValue::Length(len) => match len.to_px(f64::from(dpi)) {
                Some(px) => println!("{}: {} ({}px)", property, value, px),
                None => println!("{}: {}", property, value),
            },
            _ => println!("{}: {}", property, value),
        }
    }

    Ok(())
}

fn load_stdin() -> Result<String, String> {
    let mut buf = String::new();
    let stdin = io::stdin();
    let mut handle = stdin.lock();

    handle
        .read_to_string(&mut buf)
        .map_err(|_| "failed to read from stdin".to_string())?;

    Ok(buf)
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
