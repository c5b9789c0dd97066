use crate::api::{FileHandle, OptionDefinition, Resource};
use crate::parser::{
    ConfigError, ConsoleInterface, GeneralParser, OptionParameter, Parser, Printer, UserInterface,
};

/// The base command line parser.
///
/// ### Example
/// ```
/// # use optbind_engine as optbind;
/// use optbind::CommandLineParser;
///
/// let mut parser = CommandLineParser::new("program")
///     // Configure with CommandLineParser::add.
///     .build();
/// parser.parse_tokens(&[]).unwrap();
/// ```
pub struct CommandLineParser<'a, H = FileHandle> {
    program: String,
    about: Option<String>,
    definitions: Vec<OptionDefinition<'a, H>>,
}

impl<'a> CommandLineParser<'a> {
    /// Create a command line parser, whose file options open [`FileHandle`]s.
    ///
    /// ### Example
    /// ```
    /// # use optbind_engine as optbind;
    /// use optbind::CommandLineParser;
    ///
    /// let mut parser = CommandLineParser::new("program")
    ///     .build();
    ///
    /// parser.parse_tokens(vec![].as_slice()).unwrap();
    /// ```
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_resource(program)
    }
}

impl<'a, H: Resource> CommandLineParser<'a, H> {
    /// Create a command line parser, whose file options open resources of type `H`.
    pub fn with_resource(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            definitions: Vec::default(),
        }
    }

    /// Document the about message for this command line parser.
    /// If repeated, only the final message will apply.
    ///
    /// An about message documents the command line parser in full sentence/paragraph format.
    /// It is wrapped to the terminal when displayed, so line breaks (`'\n'`) are not recommended.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Add an option to the command line parser.
    ///
    /// Options are scanned in the order they are added.
    /// This only matters for combined short flags, where an option scanned earlier takes its characters first.
    ///
    /// ### Example
    /// ```
    /// # use optbind_engine as optbind;
    /// use optbind::{CommandLineParser, OptionDefinition};
    ///
    /// let mut a: i64 = 0;
    /// let mut b: Vec<String> = Vec::default();
    /// let mut parser = CommandLineParser::new("program")
    ///     .add(OptionDefinition::int(&mut a, Some('a'), None))
    ///     .add(OptionDefinition::string_list(&mut b, Some('b'), None))
    ///     .build();
    ///
    /// parser.parse_tokens(vec!["-b", "x", "-a", "1", "-b", "y"].as_slice()).unwrap();
    /// drop(parser);
    ///
    /// assert_eq!(a, 1);
    /// assert_eq!(b, vec!["x", "y"]);
    /// ```
    pub fn add(mut self, definition: OptionDefinition<'a, H>) -> Self {
        self.definitions.push(definition);
        self
    }

    fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<GeneralParser<'a, H>, ConfigError> {
        let parser = Parser::new(self.definitions)?;
        let option_parameters = parser
            .definitions()
            .iter()
            .map(OptionParameter::from)
            .collect();
        let printer = Printer::terminal(self.program, self.about, option_parameters);
        Ok(GeneralParser::new(parser, printer, user_interface))
    }

    /// Build the command line parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated option name).
    pub fn build_parser(self) -> Result<GeneralParser<'a, H>, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated option name).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> GeneralParser<'a, H> {
        match self.build_parser() {
            Ok(gp) => gp,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}
