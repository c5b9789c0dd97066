//! Engine for `optbind`.
//! See [documentation root](https://docs.rs/optbind/latest/optbind/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod binder;
mod constant;
mod matcher;
mod model;
mod parser;

pub use api::*;
pub use binder::*;
pub use matcher::{Pattern, Recognition, TokenStream};
pub use model::*;
pub use parser::{Action, ConfigError, GeneralParser, ParseError, Parser};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
