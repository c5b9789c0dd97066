use std::env;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{FileHandle, Resource};
use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::parser::printer::Printer;

/// The configured command line parser.
/// Built via `CommandLineParser::build`.
pub struct GeneralParser<'a, H = FileHandle> {
    parser: Parser<'a, H>,
    printer: Printer,
    user_interface: Box<dyn UserInterface>,
}

impl<'a, H> std::fmt::Debug for GeneralParser<'a, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneralParser")
            .field("parser", &self.parser)
            .finish_non_exhaustive()
    }
}

impl<'a, H: Resource> GeneralParser<'a, H> {
    pub(crate) fn new(
        parser: Parser<'a, H>,
        printer: Printer,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            parser,
            printer,
            user_interface,
        }
    }

    /// Run the command line parser against the input tokens.
    ///
    /// Each option is bound into its variable as it is matched, then defaults are applied to the options which were not present.
    ///
    /// If at any point the parser encounters an error (ex: un-matched token, un-convertable token, missing required option, etc), it prints the error and returns `Err(1)`.
    ///
    /// If the help switch (`-h` or `--help`) is present, the parser displays the help message and returns `Err(0)`.
    /// Nothing is bound in this case.
    /// A help switch combined with other short flags (ex: `-vh`) is the exception, see [`Parser::consume`](crate::Parser::consume).
    ///
    /// ### Example
    /// ```
    /// # use optbind_engine as optbind;
    /// use optbind::{CommandLineParser, OptionDefinition};
    ///
    /// let mut force = false;
    /// let mut parser = CommandLineParser::new("program")
    ///     .add(OptionDefinition::flag(&mut force, Some('f'), Some("force")))
    ///     .build();
    ///
    /// assert_eq!(parser.parse_tokens(vec!["--force"].as_slice()), Ok(()));
    /// assert!(parser.matched("force"));
    /// drop(parser);
    ///
    /// assert!(force);
    /// ```
    pub fn parse_tokens(&mut self, tokens: &[&str]) -> Result<(), i32> {
        match self.parser.consume(tokens) {
            Ok(Action::Continue) => Ok(()),
            Ok(Action::PrintHelp) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Printing help.");
                }
                self.printer.print_help(&*self.user_interface);
                Err(0)
            }
            Err(error) => {
                self.user_interface.print_error(error);
                Err(1)
            }
        }
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// Behaves like [`GeneralParser::parse_tokens`], except that on help or error the process exits (via [`std::process::exit`]) with the returned code.
    pub fn parse(mut self) {
        let command_input: Vec<String> = env::args().skip(1).collect();
        match self.parse_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            Ok(()) => {}
            Err(exit_code) => {
                std::process::exit(exit_code);
            }
        };
    }

    /// Whether the option named `name` (short or long, without dashes) was present on the command line.
    /// Unknown names are never matched.
    pub fn matched(&self, name: &str) -> bool {
        self.parser.definitions().iter().any(|definition| {
            let pattern = definition.pattern();
            let short = pattern
                .short()
                .map_or(false, |short| name.chars().eq(std::iter::once(short)));
            (short || pattern.long() == Some(name)) && definition.matched()
        })
    }

    /// The rendered help message.
    pub fn help(&self) -> String {
        self.printer.render().join("\n")
    }
}
