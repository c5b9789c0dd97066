mod core;
mod tokens;

pub use self::core::*;
pub use tokens::*;
