mod capture;
mod core;
mod definition;
pub(crate) mod resource;
mod slot;

pub use self::core::*;
pub use capture::*;
pub use definition::*;
pub use resource::{FileHandle, OpenSpec, Resource};
pub use slot::*;
