use std::io;
use thiserror::Error;

/// A failure to release a resource while rolling back.
#[derive(Debug, Error)]
#[error("'{identifier}': {source}")]
pub struct ReleaseFailure {
    /// The identifier of the resource that could not be released.
    pub identifier: String,
    /// The underlying failure.
    pub source: io::Error,
}

/// A failure to bind an option's tokens, or its default, into the option's variable.
#[derive(Debug, Error)]
pub enum BindError {
    /// A unique option occurred more than once.
    #[error("Option '{0}' can only be present once.")]
    DuplicateOption(String),

    /// The option's validator rejected its tokens; the message is the validator's own.
    #[error("{message}")]
    ValidationFailed {
        /// The option name.
        name: String,
        /// The validator's message.
        message: String,
    },

    /// Too few or too many value tokens for the option.
    #[error("Option '{name}' takes {expected} value(s), but {provided} were provided.")]
    ArityMismatch {
        /// The option name.
        name: String,
        /// The number of value tokens expected.
        expected: usize,
        /// The number of value tokens provided.
        provided: usize,
    },

    /// A value token does not convert to the option's type.
    #[error("Option '{name}' cannot convert '{token}' to {type_name}.")]
    ConversionError {
        /// The option name.
        name: String,
        /// The offending token.
        token: String,
        /// The type the token was converted towards.
        type_name: &'static str,
    },

    /// A value token is not amongst the option's choices.
    #[error("Option '{name}' does not accept '{token}'; allowed values are ({}).", .choices.join("|"))]
    InvalidChoice {
        /// The option name.
        name: String,
        /// The offending token.
        token: String,
        /// The allowed values.
        choices: Vec<String>,
    },

    /// A resource could not be opened.
    /// For resource lists, also carries any failures from releasing the resources opened before it.
    #[error("Option '{name}' cannot open '{identifier}': {source}{}", render_release_failures(.release_failures))]
    ResourceOpenFailed {
        /// The option name.
        name: String,
        /// The identifier that failed to open.
        identifier: String,
        /// The underlying failure.
        source: io::Error,
        /// Failures while releasing the previously opened resources.
        release_failures: Vec<ReleaseFailure>,
    },

    /// One or more resources being replaced could not be released.
    #[error("Option '{name}' cannot release {}", join_release_failures(.release_failures))]
    ResourceReleaseFailed {
        /// The option name.
        name: String,
        /// Every release failure, in the order the resources were released.
        release_failures: Vec<ReleaseFailure>,
    },

    /// The option's type has no binding for this operation.
    #[error("Option '{name}' does not support this operation for type {type_name}.")]
    UnsupportedType {
        /// The option name.
        name: String,
        /// The option's type.
        type_name: &'static str,
    },

    /// The declared default does not match the option's type.
    #[error("Option '{name}' cannot use default type {found} as type {expected}.")]
    DefaultTypeMismatch {
        /// The option name.
        name: String,
        /// The default type the option accepts.
        expected: &'static str,
        /// The default type that was declared.
        found: &'static str,
    },
}

fn render_release_failures(release_failures: &[ReleaseFailure]) -> String {
    if release_failures.is_empty() {
        String::default()
    } else {
        format!(
            " (while releasing: {})",
            join_release_failures(release_failures)
        )
    }
}

fn join_release_failures(release_failures: &[ReleaseFailure]) -> String {
    release_failures
        .iter()
        .map(|failure| failure.to_string())
        .collect::<Vec<String>>()
        .join("; ")
}
