mod core;
mod defaults;
mod error;

pub use error::*;
