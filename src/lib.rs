//! `optbind` is a command line option parser for Rust.
//!
//! Options are declared over variables you already own.
//! Parsing writes straight into those variables, so there is no intermediate map of matches to query afterwards.
//! `optbind` prioritizes the following:
//! * *Typed options*:
//! Each option is declared with the type of its variable (flag, counter, integer, float, string, selector, file, or a list of these).
//! The user should not call any `&str -> T` conversion functions directly.
//! * *Familiar short flags*:
//! Zero value options combine in a single token (ex: `-vvf` counts `-v` twice and sets `-f`).
//! * *Precise errors*:
//! Every failure names the option involved, and is reported rather than silently ignored.
//! * *Clean resource handling*:
//! File options open their files during the parse.
//! When one file in a list fails to open, the files already opened for that list are released again.
//!
//! # Usage
//! More examples are outlined in [the source](https://github.com/optbind/optbind/tree/main/demos).
//!
//! ```no_run
#![doc = include_str!("../demos/demo_counter.rs")]
//! ```
//!
//! ```console
//! $ counter -h
//! usage: counter [-h|--help] [-v|--verbose] [-d|--dry-run] -n <integer> [-n <integer> ...]
//!
//! Sums the numbers, talking more with each -v.
//!
//! options:
//!   -h  --help      Print help information
//!   -v  --verbose   Verbosity
//!   -d  --dry-run   Print without summing
//!   -n              A number to sum
//!
//! $ counter -n 1 -n 2 -n 3
//! Sum: 6
//!
//! $ counter -vv -n 1 -n 2
//! Numbers: [1, 2]
//! Sum: 3
//!
//! $ counter
//! Parse error: [-n] is required.
//!
//! $ counter -n blah
//! Parse error: Option '-n' cannot convert 'blah' to i64.
//! ```
//!
//! # Declaring options
//! Configure `optbind` by starting with a [`CommandLineParser`] and `add`ing [`OptionDefinition`]s.
//! Each definition names its short form (`-n`), its long form (`--number`), or both.
//! The constructor decides the type of the variable, and how many value tokens follow each occurrence:
//! * [`OptionDefinition::flag`]: `bool`, no values; may only be present once.
//! * [`OptionDefinition::counter`]: `i64`, no values; adds one per occurrence.
//! * [`OptionDefinition::int`], [`OptionDefinition::float`], [`OptionDefinition::string`]: a single value; may only be present once.
//! * [`OptionDefinition::selector`]: a `String` restricted to a set of choices.
//! * [`OptionDefinition::file`]: a single resource, opened from its identifier with an [`OpenSpec`].
//! * [`OptionDefinition::int_list`], [`OptionDefinition::float_list`], [`OptionDefinition::string_list`], [`OptionDefinition::file_list`]: one value per occurrence, collected in order.
//! * [`OptionDefinition::custom`]: any other type, via a [`Capturable`] such as [`Parsed`].
//!
//! Definitions are further configured with [`OptionDefinition::help`], [`OptionDefinition::required`], [`OptionDefinition::default`] and [`OptionDefinition::validate`].
//!
//! ### Defaults
//! A default is applied only when its option is absent from the command line, and its type must match the option's variable.
//! File options take their defaults as identifiers.
//!
//! ```
//! use optbind::{CommandLineParser, OptionDefinition};
//!
//! let mut number: i64 = 0;
//! let mut names: Vec<String> = Vec::default();
//! let mut parser = CommandLineParser::new("program")
//!     .add(OptionDefinition::int(&mut number, Some('n'), None).default(3))
//!     .add(OptionDefinition::string_list(&mut names, None, Some("name")).default(vec!["a", "b"]))
//!     .build();
//!
//! parser.parse_tokens(vec!["--name", "c"].as_slice()).unwrap();
//! drop(parser);
//!
//! assert_eq!(number, 3);
//! assert_eq!(names, vec!["c"]);
//! ```
//!
//! ### Scan order
//! Options scan the tokens in the order they were added, each consuming the tokens it matches.
//! An option that takes a value takes the next unconsumed token, even if it looks like an option (ex: `--name -v` binds `"-v"`).
//! Tokens which no option consumes are reported as unknown.
//!
//! ### Help
//! `-h` and `--help` are reserved.
//! When either is present, [`GeneralParser::parse_tokens`] prints the help message, binds nothing, and returns `Err(0)`.
//! [`GeneralParser::parse`] exits the process with that code instead.
//!
//! ### Custom resources
//! File options open [`FileHandle`]s by default.
//! To bind other kinds of resource, implement [`Resource`] and build with [`CommandLineParser::with_resource`].
pub use optbind_engine::*;
