use std::collections::HashMap;
use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{FileHandle, OptionDefinition, Resource};
use crate::binder::BindError;
use crate::matcher::{Recognition, TokenStream};

/// A declaration mistake, reported when the parser is built.
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// A failure to parse the command line tokens.
#[derive(Debug, Error)]
pub enum ParseError {
    /// An option's tokens, or its default, could not be bound.
    #[error("Parse error: {0}")]
    Bind(#[from] BindError),

    /// An option occurred without enough value tokens following it.
    #[error("Parse error: Option '{0}' requires {1} value(s), but not enough arguments were given.")]
    MissingValues(String, u8),

    /// A required option did not occur.
    #[error("Parse error: [{0}] is required.")]
    Required(String),

    /// Tokens were left over that no option recognized.
    #[error("Parse error: Unknown arguments '{}'.", .0.join(" "))]
    UnknownArguments(Vec<String>),
}

/// What the caller should do once the tokens have been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Every option was bound; the program may proceed.
    Continue,
    /// A help trigger was found; nothing was bound, and the caller should display help.
    PrintHelp,
}

/// Scans the command line tokens against the declared options, binding each option as it is matched.
pub struct Parser<'a, H = FileHandle> {
    definitions: Vec<OptionDefinition<'a, H>>,
}

impl<'a, H> std::fmt::Debug for Parser<'a, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("definitions", &self.definitions)
            .finish()
    }
}

impl<'a, H: Resource> Parser<'a, H> {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Vec::default()).unwrap()
    }

    /// Create a parser over the `definitions`, in the order they will be scanned.
    ///
    /// Fails if any definition is misconfigured, or if two definitions share a name.
    pub fn new(definitions: Vec<OptionDefinition<'a, H>>) -> Result<Self, ConfigError> {
        let mut shorts: HashMap<char, String> = HashMap::default();
        let mut longs: HashMap<String, String> = HashMap::default();

        for definition in &definitions {
            definition.check_config()?;
            let name = definition.canonical_name();

            if let Some(short) = definition.pattern().short() {
                if let Some(other) = shorts.insert(short, name.clone()) {
                    return Err(ConfigError(format!(
                        "short name '{short}' is shared by '{other}' and '{name}'."
                    )));
                }
            }

            if let Some(long) = definition.pattern().long() {
                if let Some(other) = longs.insert(long.to_string(), name.clone()) {
                    return Err(ConfigError(format!(
                        "long name '{long}' is shared by '{other}' and '{name}'."
                    )));
                }
            }
        }

        Ok(Self { definitions })
    }

    /// The declared options, in scan order.
    pub fn definitions(&self) -> &[OptionDefinition<'a, H>] {
        &self.definitions
    }

    /// Consume the command line `tokens`, binding every option.
    ///
    /// Each option scans the tokens left to right, in declaration order.
    /// A token (or a combined short flag character) consumed by one option is invisible to the options scanned after it.
    /// Once an option's scan completes it is checked for presence (when required) or given its default.
    /// Any tokens left over afterwards are an error.
    ///
    /// If a help trigger appears anywhere in `tokens`, returns [`Action::PrintHelp`] without binding anything.
    /// A help trigger left behind by reducing a combined short flag (ex: `-vh` reduced to `-h`) is only seen by the options scanned after the reduction.
    /// Those return [`Action::PrintHelp`] with the earlier options already bound; if there are none, the remainder is an unknown argument.
    pub fn consume(&mut self, tokens: &[&str]) -> Result<Action, ParseError> {
        let mut tokens = TokenStream::new(tokens);

        if tokens.help_requested() {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Help requested in {tokens:?}.");
            }
            return Ok(Action::PrintHelp);
        }

        for definition in self.definitions.iter_mut() {
            for position in 0..tokens.len() {
                let occurrences = match tokens.get(position).map(|token| definition.check(token)) {
                    Some(Recognition::Occurrences(occurrences)) if occurrences > 0 => occurrences,
                    Some(Recognition::Help) => return Ok(Action::PrintHelp),
                    _ => continue,
                };
                let arity = definition.pattern().arity();
                let values: Vec<String> = (position + 1..position + 1 + arity as usize)
                    .map_while(|index| tokens.get(index).map(|value| value.to_string()))
                    .collect();

                if values.len() < arity as usize {
                    return Err(ParseError::MissingValues(
                        definition.canonical_name(),
                        arity,
                    ));
                }

                #[cfg(feature = "tracing_debug")]
                {
                    debug!(
                        "Matched {definition:?} at {position} ({occurrences} occurrence(s)): {values:?}."
                    );
                }
                definition.bind(
                    values
                        .iter()
                        .map(AsRef::as_ref)
                        .collect::<Vec<&str>>()
                        .as_slice(),
                    occurrences,
                )?;
                definition.reduce(position, &mut tokens);
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Reduced to {:?}.", tokens.remaining());
                }
            }

            if definition.is_required() && !definition.matched() {
                return Err(ParseError::Required(definition.canonical_name()));
            }

            definition.apply_default()?;
        }

        let remaining = tokens.remaining();

        if remaining.is_empty() {
            Ok(Action::Continue)
        } else {
            Err(ParseError::UnknownArguments(remaining))
        }
    }
}
