//! Parsing command-line arguments.

use clap::{command, error::Result as ClapResult, Arg, ArgAction};
use lifegrid_lib::{Preset, Rule};
use std::path::PathBuf;

fn positive(s: &str) -> Result<isize, String> {
    match s.parse::<isize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(String::from("must be a positive integer")),
    }
}

fn rule(s: &str) -> Result<String, String> {
    s.parse::<Rule>()
        .map(|_| s.to_string())
        .map_err(|e| e.to_string())
}

fn origin(s: &str) -> Result<(isize, isize), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| String::from("expected X,Y"))?;
    let x = x.trim().parse().map_err(|_| format!("invalid x: {:?}", x))?;
    let y = y.trim().parse().map_err(|_| format!("invalid y: {:?}", y))?;
    Ok((x, y))
}

/// Where the initial cells come from.
pub(crate) enum Source {
    /// An RLE file.
    File(PathBuf),
    /// A built-in pattern.
    Preset(Preset),
    /// A random fill, optionally seeded.
    Random(Option<u64>),
    /// An empty grid.
    Empty,
}

/// How to print the final generation.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Plaintext,
    Rle,
}

/// A struct to store the parse results.
pub(crate) struct Args {
    pub(crate) config_file: Option<PathBuf>,
    pub(crate) width: Option<isize>,
    pub(crate) height: Option<isize>,
    pub(crate) rule_string: Option<String>,
    pub(crate) source: Source,
    pub(crate) origin: Option<(isize, isize)>,
    pub(crate) lenient: bool,
    pub(crate) generations: u64,
    pub(crate) format: Format,
    pub(crate) verbose: u8,
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> ClapResult<Self> {
        let app = command!()
            .long_about(
                "Runs a two-state cellular automaton on a grid whose edges wrap around.\n\
                 \n\
                 The initial cells come from an RLE file, a built-in pattern, or a \
                 random fill. After the given number of generations the grid is \
                 printed in Plaintext or RLE format.\n\
                 * Dead cells are represented by `.` in Plaintext;\n\
                 * Living cells are represented by `o`.\n",
            )
            .arg(
                Arg::new("CONFIG")
                    .help("Configuration file (TOML, JSON or YAML)")
                    .long_help(
                        "Configuration file (TOML, JSON or YAML)\n\
                         The format is chosen by the extension. \
                         It may set `width`, `height` and `rule_string`; \
                         the options below override it.\n",
                    )
                    .short('c')
                    .long("config")
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("X")
                    .help("Width of the grid [default: 64]")
                    .short('x')
                    .long("width")
                    .allow_negative_numbers(true)
                    .value_parser(positive),
            )
            .arg(
                Arg::new("Y")
                    .help("Height of the grid [default: 64]")
                    .short('y')
                    .long("height")
                    .allow_negative_numbers(true)
                    .value_parser(positive),
            )
            .arg(
                Arg::new("RULE")
                    .help("Rule of the cellular automaton [default: B3/S23]")
                    .long_help(
                        "Rule of the cellular automaton [default: B3/S23]\n\
                         Written as B<digits>/S<digits>, e.g. B36/S23 for HighLife.\n",
                    )
                    .short('r')
                    .long("rule")
                    .value_parser(rule),
            )
            .arg(
                Arg::new("PATTERN")
                    .help("RLE file to load")
                    .short('p')
                    .long("pattern")
                    .value_parser(clap::value_parser!(PathBuf))
                    .conflicts_with_all(["PRESET", "RANDOM"]),
            )
            .arg(
                Arg::new("PRESET")
                    .help("Built-in pattern to load")
                    .long("preset")
                    .value_parser(["glider", "lwss", "gosper"])
                    .conflicts_with("RANDOM"),
            )
            .arg(
                Arg::new("AT")
                    .help("Position X,Y of the top left corner of the pattern")
                    .long_help(
                        "Position X,Y of the top left corner of the pattern\n\
                         By default the pattern is centered. \
                         Cells falling outside the grid are dropped.\n",
                    )
                    .long("at")
                    .allow_negative_numbers(true)
                    .value_parser(origin),
            )
            .arg(
                Arg::new("LENIENT")
                    .help("Stop at malformed runs instead of failing")
                    .long("lenient")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("RANDOM")
                    .help("Fill the grid at random")
                    .long("random")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("SEED")
                    .help("Seed for the random fill")
                    .long("seed")
                    .requires("RANDOM")
                    .value_parser(clap::value_parser!(u64)),
            )
            .arg(
                Arg::new("GENERATIONS")
                    .help("Number of generations to run")
                    .short('g')
                    .long("generations")
                    .default_value("0")
                    .value_parser(clap::value_parser!(u64)),
            )
            .arg(
                Arg::new("FORMAT")
                    .help("Output format")
                    .short('f')
                    .long("format")
                    .value_parser(["plain", "rle"])
                    .default_value("plain"),
            )
            .arg(
                Arg::new("VERBOSE")
                    .help("Print more logs; repeat for even more")
                    .long_help(
                        "Print more logs; repeat for even more\n\
                         The RUST_LOG environment variable takes precedence.\n",
                    )
                    .short('v')
                    .long("verbose")
                    .action(ArgAction::Count),
            );

        let matches = app.try_get_matches()?;

        let source = if let Some(path) = matches.get_one::<PathBuf>("PATTERN") {
            Source::File(path.clone())
        } else if let Some(name) = matches.get_one::<String>("PRESET") {
            let preset = name
                .parse()
                .unwrap_or_else(|e| unreachable!("clap accepted preset {}: {}", name, e));
            Source::Preset(preset)
        } else if matches.get_flag("RANDOM") {
            Source::Random(matches.get_one::<u64>("SEED").copied())
        } else {
            Source::Empty
        };

        let format = match matches.get_one::<String>("FORMAT").map(String::as_str) {
            Some("rle") => Format::Rle,
            _ => Format::Plaintext,
        };

        Ok(Args {
            config_file: matches.get_one::<PathBuf>("CONFIG").cloned(),
            width: matches.get_one::<isize>("X").copied(),
            height: matches.get_one::<isize>("Y").copied(),
            rule_string: matches.get_one::<String>("RULE").cloned(),
            source,
            origin: matches.get_one::<(isize, isize)>("AT").copied(),
            lenient: matches.get_flag("LENIENT"),
            generations: matches
                .get_one::<u64>("GENERATIONS")
                .copied()
                .unwrap_or_default(),
            format,
            verbose: matches.get_count("VERBOSE"),
        })
    }
}
