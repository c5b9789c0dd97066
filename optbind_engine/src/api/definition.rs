use crate::api::{Capturable, FileHandle, OpenSpec, Resource, ResultSlot};
use crate::constant::*;
use crate::matcher::{Pattern, Recognition, TokenStream};
use crate::model::DefaultValue;
use crate::parser::ConfigError;

/// A caller supplied check over an option's raw value tokens, run before they are converted.
/// Returning `Err(message)` fails the parse with that message.
pub type Validator<'a> = Box<dyn Fn(&[&str]) -> Result<(), String> + 'a>;

#[derive(Default)]
pub(crate) struct Options<'a> {
    pub(crate) help: Option<String>,
    pub(crate) required: bool,
    pub(crate) default: Option<DefaultValue>,
    pub(crate) validator: Option<Validator<'a>>,
}

/// A declared command line option, bound to a caller owned variable.
///
/// Create one via the constructor matching the variable's type, then configure it with [`OptionDefinition::help`], [`OptionDefinition::required`], [`OptionDefinition::default`], or [`OptionDefinition::validate`].
///
/// ### Example
/// ```
/// # use optbind_engine as optbind;
/// use optbind::{CommandLineParser, OptionDefinition};
///
/// let mut verbosity: i64 = 0;
/// let mut number: i64 = 0;
/// let mut parser = CommandLineParser::new("program")
///     .add(OptionDefinition::counter(&mut verbosity, Some('v'), None))
///     .add(OptionDefinition::int(&mut number, Some('n'), Some("number")).default(7))
///     .build();
///
/// parser.parse_tokens(vec!["-vvv"].as_slice()).unwrap();
/// drop(parser);
///
/// assert_eq!(verbosity, 3);
/// assert_eq!(number, 7);
/// ```
pub struct OptionDefinition<'a, H = FileHandle> {
    pub(crate) pattern: Pattern,
    pub(crate) unique: bool,
    pub(crate) matched: bool,
    pub(crate) slot: ResultSlot<'a, H>,
    pub(crate) selector: Option<Vec<String>>,
    pub(crate) open_spec: OpenSpec,
    pub(crate) options: Options<'a>,
}

impl<'a, H> std::fmt::Debug for OptionDefinition<'a, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Opt[{t}, {arity}, {name}, unique={unique}, matched={matched}]",
            t = self.slot.type_name(),
            arity = self.pattern.arity(),
            name = self.pattern.canonical_name(),
            unique = self.unique,
            matched = self.matched,
        )
    }
}

impl<'a, H: Resource> OptionDefinition<'a, H> {
    fn new(
        slot: ResultSlot<'a, H>,
        short: Option<char>,
        long: Option<&str>,
        arity: u8,
        unique: bool,
    ) -> Self {
        Self {
            pattern: Pattern::new(short, long.map(|l| l.to_string()), arity),
            unique,
            matched: false,
            slot,
            selector: None,
            open_spec: OpenSpec::default(),
            options: Options::default(),
        }
    }

    /// A flag: sets the variable to `true` when present (ex: `-f` or `--force`).
    pub fn flag(variable: &'a mut bool, short: Option<char>, long: Option<&str>) -> Self {
        Self::new(ResultSlot::Bool(variable), short, long, 0, true)
    }

    /// A counter: adds the number of occurrences to the variable (ex: `-vvv` adds 3).
    pub fn counter(variable: &'a mut i64, short: Option<char>, long: Option<&str>) -> Self {
        Self::new(ResultSlot::Int(variable), short, long, 0, false)
    }

    /// An integer taking a single value (ex: `-n 5`).
    pub fn int(variable: &'a mut i64, short: Option<char>, long: Option<&str>) -> Self {
        Self::new(ResultSlot::Int(variable), short, long, 1, true)
    }

    /// A float taking a single value (ex: `--ratio 0.5`).
    pub fn float(variable: &'a mut f64, short: Option<char>, long: Option<&str>) -> Self {
        Self::new(ResultSlot::Float(variable), short, long, 1, true)
    }

    /// A string taking a single value (ex: `--name abc`).
    pub fn string(variable: &'a mut String, short: Option<char>, long: Option<&str>) -> Self {
        Self::new(ResultSlot::String(variable), short, long, 1, true)
    }

    /// A string restricted to one of `choices` (ex: `--mode fast`).
    pub fn selector(
        variable: &'a mut String,
        short: Option<char>,
        long: Option<&str>,
        choices: Vec<impl Into<String>>,
    ) -> Self {
        let mut definition = Self::new(ResultSlot::String(variable), short, long, 1, true);
        definition
            .selector
            .replace(choices.into_iter().map(|c| c.into()).collect());
        definition
    }

    /// A resource opened from a single identifier (ex: `--input data.txt`).
    pub fn file(
        variable: &'a mut Option<H>,
        short: Option<char>,
        long: Option<&str>,
        spec: OpenSpec,
    ) -> Self {
        let mut definition = Self::new(ResultSlot::Resource(variable), short, long, 1, true);
        definition.open_spec = spec;
        definition
    }

    /// Strings collected from each occurrence (ex: `-s a -s b`).
    pub fn string_list(
        variable: &'a mut Vec<String>,
        short: Option<char>,
        long: Option<&str>,
    ) -> Self {
        Self::new(ResultSlot::StringList(variable), short, long, 1, false)
    }

    /// Integers collected from each occurrence (ex: `-i 1 -i 2`).
    pub fn int_list(variable: &'a mut Vec<i64>, short: Option<char>, long: Option<&str>) -> Self {
        Self::new(ResultSlot::IntList(variable), short, long, 1, false)
    }

    /// Floats collected from each occurrence (ex: `-f 0.1 -f 0.2`).
    pub fn float_list(variable: &'a mut Vec<f64>, short: Option<char>, long: Option<&str>) -> Self {
        Self::new(ResultSlot::FloatList(variable), short, long, 1, false)
    }

    /// Resources opened from each occurrence (ex: `-i a.txt -i b.txt`).
    ///
    /// If any resource fails to open, those already opened into the variable are released and the variable is left empty.
    pub fn file_list(
        variable: &'a mut Vec<H>,
        short: Option<char>,
        long: Option<&str>,
        spec: OpenSpec,
    ) -> Self {
        let mut definition = Self::new(ResultSlot::ResourceList(variable), short, long, 1, false);
        definition.open_spec = spec;
        definition
    }

    /// Any other single value type, via a [`Capturable`] (ex: [`Parsed`](crate::Parsed)).
    ///
    /// Custom options cannot declare a default.
    pub fn custom(capture: impl Capturable + 'a, short: Option<char>, long: Option<&str>) -> Self {
        Self::new(ResultSlot::Custom(Box::new(capture)), short, long, 1, true)
    }

    /// Document the help message for this option.
    /// If repeated, only the final message will apply.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.options.help.replace(description.into());
        self
    }

    /// Require this option to be present on the command line.
    pub fn required(mut self) -> Self {
        self.options.required = true;
        self
    }

    /// Declare the value to use when the option is not present.
    /// Its type must match the option's variable (see [`DefaultValue`]).
    pub fn default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.options.default.replace(value.into());
        self
    }

    /// Validate the raw value tokens of each occurrence before they are converted.
    ///
    /// ### Example
    /// ```
    /// # use optbind_engine as optbind;
    /// use optbind::{CommandLineParser, OptionDefinition};
    ///
    /// let mut name = String::default();
    /// let mut parser = CommandLineParser::new("program")
    ///     .add(
    ///         OptionDefinition::string(&mut name, None, Some("name")).validate(|values| {
    ///             match values {
    ///                 [value] if value.is_empty() => Err("name must not be empty".to_string()),
    ///                 _ => Ok(()),
    ///             }
    ///         }),
    ///     )
    ///     .build();
    ///
    /// assert_eq!(parser.parse_tokens(vec!["--name", ""].as_slice()), Err(1));
    /// ```
    pub fn validate(mut self, validator: impl Fn(&[&str]) -> Result<(), String> + 'a) -> Self {
        self.options.validator.replace(Box::new(validator));
        self
    }
}

impl<'a, H> OptionDefinition<'a, H> {
    /// The names and arity of this option.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Whether this option has been bound from the command line.
    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Whether this option must be present on the command line.
    pub fn is_required(&self) -> bool {
        self.options.required
    }

    /// The variable this option binds into.
    pub fn slot(&self) -> &ResultSlot<'a, H> {
        &self.slot
    }

    /// Check whether `token` names this option, and how many times (see [`Pattern::check`]).
    pub fn check(&self, token: &str) -> Recognition {
        self.pattern.check(token)
    }

    /// Consume this option's match at `position` (see [`Pattern::reduce`]).
    pub fn reduce(&self, position: usize, tokens: &mut TokenStream) {
        self.pattern.reduce(position, tokens);
    }

    /// Render the option name as `-s`, `--long`, or `-s|--long`.
    pub fn canonical_name(&self) -> String {
        self.pattern.canonical_name()
    }

    /// Render the usage fragment of this option (ex: `[-n|--number <integer>]`).
    /// Optional options are wrapped in brackets.
    pub fn usage(&self) -> String {
        let name = self.canonical_name();
        let counter = self.pattern.arity() == 0;
        let hint = match &self.slot {
            ResultSlot::Bool(_) => None,
            ResultSlot::Int(_) if counter => None,
            ResultSlot::Int(_) => Some("<integer>".to_string()),
            ResultSlot::Float(_) => Some("<float>".to_string()),
            ResultSlot::String(_) => match &self.selector {
                Some(choices) => Some(format!("({})", choices.join("|"))),
                None => Some("\"<value>\"".to_string()),
            },
            ResultSlot::Resource(_) => Some("<file>".to_string()),
            ResultSlot::IntList(_) => Some(repeated(&name, "<integer>")),
            ResultSlot::FloatList(_) => Some(repeated(&name, "<float>")),
            ResultSlot::StringList(_) => Some(repeated(&name, "\"<value>\"")),
            ResultSlot::ResourceList(_) => Some(repeated(&name, "<file>")),
            ResultSlot::Custom(capture) => Some(format!("<{}>", capture.type_name())),
        };
        let fragment = match hint {
            Some(hint) => format!("{name} {hint}"),
            None => name,
        };

        if self.options.required {
            fragment
        } else {
            format!("[{fragment}]")
        }
    }

    /// Render the help message of this option, including its default when optional.
    pub fn help_message(&self) -> String {
        match (&self.options.help, &self.options.default) {
            (Some(help), Some(default)) if !self.options.required => {
                format!("{help}. Default: {default}")
            }
            (Some(help), _) => help.clone(),
            (None, _) => String::default(),
        }
    }

    pub(crate) fn check_config(&self) -> Result<(), ConfigError> {
        let short = self.pattern.short();
        let long = self.pattern.long();

        if short.is_none() && long.is_none() {
            return Err(ConfigError(
                "an option must have a short or a long name.".to_string(),
            ));
        }

        if let Some(short) = short {
            if short == '-' || short.is_whitespace() {
                return Err(ConfigError(format!("invalid short name '{short}'.")));
            }

            if short == HELP_SHORT {
                return Err(ConfigError(format!(
                    "short name '{HELP_SHORT}' is reserved for help."
                )));
            }
        }

        if let Some(long) = long {
            if long.is_empty() || long.starts_with('-') || long.contains(char::is_whitespace) {
                return Err(ConfigError(format!("invalid long name '{long}'.")));
            }

            if long == HELP_NAME {
                return Err(ConfigError(format!(
                    "long name '{HELP_NAME}' is reserved for help."
                )));
            }
        }

        if let Some(choices) = &self.selector {
            if choices.is_empty() {
                return Err(ConfigError(format!(
                    "option '{}' must allow at least one choice.",
                    self.canonical_name()
                )));
            }
        }

        Ok(())
    }
}

fn repeated(name: &str, hint: &str) -> String {
    format!("{hint} [{name} {hint} ...]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::resource::test::FakeResource;
    use crate::api::Parsed;
    use rstest::rstest;

    type Definition<'a> = OptionDefinition<'a, FakeResource>;

    #[test]
    fn usage_required_round_trip() {
        let mut number: i64 = 0;
        let definition = Definition::int(&mut number, Some('n'), Some("number")).required();
        assert_eq!(definition.canonical_name(), "-n|--number");
        assert_eq!(definition.usage(), "-n|--number <integer>");

        let mut number: i64 = 0;
        let definition = Definition::int(&mut number, Some('n'), Some("number"));
        assert_eq!(definition.usage(), "[-n|--number <integer>]");
    }

    #[test]
    fn usage_variants() {
        let mut flag = false;
        let mut count: i64 = 0;
        let mut ratio: f64 = 0.0;
        let mut text = String::default();
        let mut mode = String::default();
        let mut resource: Option<FakeResource> = None;
        let mut strings: Vec<String> = Vec::default();
        let mut ints: Vec<i64> = Vec::default();
        let mut floats: Vec<f64> = Vec::default();
        let mut resources: Vec<FakeResource> = Vec::default();
        let mut port: u16 = 0;

        assert_eq!(Definition::flag(&mut flag, Some('f'), None).usage(), "[-f]");
        assert_eq!(
            Definition::counter(&mut count, Some('v'), None).usage(),
            "[-v]"
        );
        assert_eq!(
            Definition::float(&mut ratio, None, Some("ratio")).usage(),
            "[--ratio <float>]"
        );
        assert_eq!(
            Definition::string(&mut text, Some('s'), None).usage(),
            "[-s \"<value>\"]"
        );
        assert_eq!(
            Definition::selector(&mut mode, Some('m'), Some("mode"), vec!["a", "b"]).usage(),
            "[-m|--mode (a|b)]"
        );
        assert_eq!(
            Definition::file(&mut resource, None, Some("input"), OpenSpec::default()).usage(),
            "[--input <file>]"
        );
        assert_eq!(
            Definition::string_list(&mut strings, Some('s'), None).usage(),
            "[-s \"<value>\" [-s \"<value>\" ...]]"
        );
        assert_eq!(
            Definition::int_list(&mut ints, Some('i'), None).usage(),
            "[-i <integer> [-i <integer> ...]]"
        );
        assert_eq!(
            Definition::float_list(&mut floats, Some('x'), None).usage(),
            "[-x <float> [-x <float> ...]]"
        );
        assert_eq!(
            Definition::file_list(&mut resources, Some('r'), None, OpenSpec::default())
                .required()
                .usage(),
            "-r <file> [-r <file> ...]"
        );
        assert_eq!(
            Definition::custom(Parsed::new(&mut port), Some('p'), None).usage(),
            "[-p <u16>]"
        );
    }

    #[rstest]
    #[case(None, None, false, "")]
    #[case(Some("The number"), None, false, "The number")]
    #[case(Some("The number"), Some(5), false, "The number. Default: 5")]
    #[case(Some("The number"), Some(5), true, "The number")]
    #[case(None, Some(5), false, "")]
    fn help_message(
        #[case] help: Option<&str>,
        #[case] default: Option<i64>,
        #[case] required: bool,
        #[case] expected: &str,
    ) {
        let mut number: i64 = 0;
        let mut definition = Definition::int(&mut number, Some('n'), None);

        if let Some(help) = help {
            definition = definition.help("--this will get discarded--").help(help);
        }

        if let Some(default) = default {
            definition = definition.default(default);
        }

        if required {
            definition = definition.required();
        }

        assert_eq!(definition.help_message(), expected);
    }

    #[rstest]
    #[case(Some('n'), Some("number"), true)]
    #[case(Some('n'), None, true)]
    #[case(None, Some("number"), true)]
    #[case(None, None, false)]
    #[case(Some('-'), None, false)]
    #[case(Some(' '), None, false)]
    #[case(Some('h'), None, false)]
    #[case(None, Some("help"), false)]
    #[case(None, Some(""), false)]
    #[case(None, Some("-number"), false)]
    #[case(None, Some("the number"), false)]
    fn check_config_names(
        #[case] short: Option<char>,
        #[case] long: Option<&str>,
        #[case] expected_ok: bool,
    ) {
        let mut number: i64 = 0;
        let definition = Definition::int(&mut number, short, long);
        assert_eq!(definition.check_config().is_ok(), expected_ok);
    }

    #[test]
    fn check_config_selector_empty() {
        let mut mode = String::default();
        let definition = Definition::selector(&mut mode, Some('m'), None, Vec::<String>::default());
        assert_matches!(definition.check_config(), Err(ConfigError(_)));
    }

    #[test]
    fn declaration() {
        let mut values: Vec<i64> = Vec::default();
        let definition = Definition::int_list(&mut values, Some('i'), Some("item")).required();
        assert_eq!(definition.pattern().short(), Some('i'));
        assert_eq!(definition.pattern().long(), Some("item"));
        assert_eq!(definition.pattern().arity(), 1);
        assert!(!definition.unique);
        assert!(!definition.matched());
        assert!(definition.is_required());
        assert_matches!(definition.slot(), ResultSlot::IntList(_));
        assert_eq!(
            format!("{definition:?}"),
            "Opt[Vec<i64>, 1, -i|--item, unique=false, matched=false]"
        );
    }

    #[test]
    fn unnamed() {
        let mut flag = false;
        let mut definition = Definition::flag(&mut flag, None, None);
        assert_eq!(
            format!("{definition:?}"),
            "Opt[bool, 0, , unique=true, matched=false]"
        );
        assert_eq!(definition.usage(), "[]");
        assert!(definition.check_config().is_err());
        definition.bind(&[], 1).unwrap();
        assert!(definition.matched());
    }
}
