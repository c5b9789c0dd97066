use terminal_size::{terminal_size, Width};

use crate::api::OptionDefinition;
use crate::constant::*;
use crate::parser::interface::{wrap, ColumnRenderer, UserInterface};

/// The help facing view of a single option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionParameter {
    flags: String,
    usage: String,
    help: String,
}

impl OptionParameter {
    pub(crate) fn new(
        short: Option<char>,
        long: Option<&str>,
        usage: impl Into<String>,
        help: impl Into<String>,
    ) -> Self {
        // Longs line up whether or not there is a short.
        let flags = match (short, long) {
            (Some(short), Some(long)) => format!("-{short}  --{long}"),
            (Some(short), None) => format!("-{short}"),
            (None, Some(long)) => format!("    --{long}"),
            (None, None) => unreachable!("internal error - an option must have a name"),
        };

        Self {
            flags,
            usage: usage.into(),
            help: help.into(),
        }
    }
}

impl<'a, H> From<&OptionDefinition<'a, H>> for OptionParameter {
    fn from(value: &OptionDefinition<'a, H>) -> Self {
        OptionParameter::new(
            value.pattern().short(),
            value.pattern().long(),
            value.usage(),
            value.help_message(),
        )
    }
}

pub(crate) struct Printer {
    program: String,
    about: Option<String>,
    options: Vec<OptionParameter>,
    terminal_width: Option<usize>,
}

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 2;

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new("program", None, Vec::default(), None)
    }

    pub(crate) fn terminal(
        program: impl Into<String>,
        about: Option<String>,
        options: Vec<OptionParameter>,
    ) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(program, about, options, terminal_width)
    }

    pub(crate) fn new(
        program: impl Into<String>,
        about: Option<String>,
        options: Vec<OptionParameter>,
        terminal_width: Option<usize>,
    ) -> Self {
        Self {
            program: program.into(),
            about,
            options,
            terminal_width,
        }
    }

    /// Render the help text, one line per entry.
    /// Options are listed in declaration order, after the help option itself.
    pub(crate) fn render(&self) -> Vec<String> {
        let total_width = self.terminal_width.unwrap_or(DEFAULT_TERMINAL_WIDTH);
        let help_option = OptionParameter::new(
            Some(HELP_SHORT),
            Some(HELP_NAME),
            format!("[-{HELP_SHORT}|--{HELP_NAME}]"),
            HELP_MESSAGE,
        );
        let options: Vec<&OptionParameter> = std::iter::once(&help_option)
            .chain(self.options.iter())
            .collect();
        let left_column_width = options
            .iter()
            .map(|option| option.flags.chars().count())
            .max()
            .unwrap_or_default();
        let description_width = options
            .iter()
            .map(|option| option.help.chars().count())
            .max()
            .unwrap_or_default();
        let column_renderer = ColumnRenderer::guided(
            MAIN_INDENT,
            left_column_width,
            PADDING_WIDTH,
            description_width,
            total_width,
        );
        let summary = options
            .iter()
            .map(|option| option.usage.as_str())
            .collect::<Vec<&str>>()
            .join(" ");
        let mut lines = vec![format!("usage: {p} {summary}", p = self.program)];

        if let Some(about) = &self.about {
            lines.push(String::default());
            lines.extend(wrap(about, total_width));
        }

        lines.push(String::default());
        lines.push("options:".to_string());

        for option in options {
            lines.extend(column_renderer.render(&option.flags, &option.help));
        }

        lines
    }

    pub(crate) fn print_help(&self, user_interface: &(impl UserInterface + ?Sized)) {
        for line in self.render() {
            user_interface.print(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::util::InMemoryInterface;

    #[test]
    fn print_help_empty() {
        // Setup
        let printer = Printer::empty();
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_help(&interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(
            message,
            r#"usage: program [-h|--help]

options:
  -h  --help   Print help information"#
        );
    }

    #[test]
    fn print_help_options() {
        // Setup
        let printer = Printer::new(
            "program",
            Some("Does the things.".to_string()),
            vec![
                OptionParameter::new(Some('v'), None, "[-v]", "Verbosity"),
                OptionParameter::new(
                    Some('n'),
                    Some("number"),
                    "-n|--number <integer>",
                    "The number",
                ),
                OptionParameter::new(None, Some("mode"), "[--mode (a|b)]", ""),
            ],
            None,
        );
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_help(&interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(
            message,
            r#"usage: program [-h|--help] [-v] -n|--number <integer> [--mode (a|b)]

Does the things.

options:
  -h  --help     Print help information
  -v             Verbosity
  -n  --number   The number
      --mode"#
        );
    }

    #[test]
    fn render_wraps_description() {
        let printer = Printer::new(
            "program",
            Some("one two three four five six".to_string()),
            vec![OptionParameter::new(
                Some('x'),
                None,
                "[-x]",
                "alpha beta gamma delta epsilon zeta eta theta",
            )],
            Some(30),
        );

        assert_eq!(
            printer.render(),
            vec![
                "usage: program [-h|--help] [-x]",
                "",
                "one two three four five six",
                "",
                "options:",
                "  -h  --help   Print help",
                "               information",
                "  -x           alpha beta gamma",
                "               delta epsilon",
                "               zeta eta theta",
            ]
        );
    }

    #[test]
    fn option_parameter_from_definition() {
        let mut number: i64 = 0;
        let definition = OptionDefinition::<crate::api::FileHandle>::int(
            &mut number,
            Some('n'),
            Some("number"),
        )
        .help("The number")
        .default(3);

        assert_eq!(
            OptionParameter::from(&definition),
            OptionParameter::new(
                Some('n'),
                Some("number"),
                "[-n|--number <integer>]",
                "The number. Default: 3"
            )
        );
    }
}
