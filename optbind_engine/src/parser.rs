mod base;
mod interface;
mod middleware;
mod printer;

pub use base::{Action, ConfigError, ParseError, Parser};
pub(crate) use interface::*;
pub use middleware::GeneralParser;
pub(crate) use printer::*;
