use std::str::FromStr;
use thiserror::Error;

/// Behaviour to capture a single token into a caller owned variable.
///
/// This is the extension point for result types outside the built-in set (see [`OptionDefinition::custom`](crate::OptionDefinition::custom)).
/// Most implementations should simply use [`Parsed`].
pub trait Capturable {
    /// Capture a value from the input token.
    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture>;

    /// The name of the captured type, used in error and help messages.
    fn type_name(&self) -> &'static str;
}

/// The reason a [`Capturable`] rejected its token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCapture {
    /// The token does not convert to the captured type.
    #[error("cannot convert '{token}' to {type_name}.")]
    InvalidConversion {
        /// The offending token.
        token: String,
        /// The type the token was converted towards.
        type_name: &'static str,
    },
}

/// Capture any `T: FromStr` into the borrowed variable.
///
/// ### Example
/// ```
/// # use optbind_engine as optbind;
/// use optbind::{Capturable, Parsed};
///
/// let mut port: u16 = 0;
/// Parsed::new(&mut port).capture("8080").unwrap();
/// assert_eq!(port, 8080);
/// ```
pub struct Parsed<'a, T> {
    variable: &'a mut T,
}

impl<'a, T> Parsed<'a, T> {
    /// Create a parsed capture over `variable`.
    pub fn new(variable: &'a mut T) -> Self {
        Self { variable }
    }
}

impl<'a, T: FromStr> Capturable for Parsed<'a, T> {
    fn capture(&mut self, token: &str) -> Result<(), InvalidCapture> {
        let value = T::from_str(token).map_err(|_| InvalidCapture::InvalidConversion {
            token: token.to_string(),
            type_name: std::any::type_name::<T>(),
        })?;
        *self.variable = value;
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}
