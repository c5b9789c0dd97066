use crate::api::{Capturable, FileHandle};

/// The caller owned destination that an option binds into.
///
/// The variant is fixed when the option is declared, and decides how tokens are converted, which default types are accepted, and how the option is rendered in the usage.
pub enum ResultSlot<'a, H = FileHandle> {
    /// A flag (or its default).
    Bool(&'a mut bool),
    /// An integer, either as a counter (arity 0) or a scalar (arity 1).
    Int(&'a mut i64),
    /// A floating point scalar.
    Float(&'a mut f64),
    /// A string scalar, optionally restricted to a set of choices.
    String(&'a mut String),
    /// A single opened resource.
    Resource(&'a mut Option<H>),
    /// Integers collected from repeated occurrences.
    IntList(&'a mut Vec<i64>),
    /// Floats collected from repeated occurrences.
    FloatList(&'a mut Vec<f64>),
    /// Strings collected from repeated occurrences.
    StringList(&'a mut Vec<String>),
    /// Resources collected from repeated occurrences.
    ResourceList(&'a mut Vec<H>),
    /// A caller provided capture, see [`Capturable`].
    Custom(Box<dyn Capturable + 'a>),
}

impl<'a, H> ResultSlot<'a, H> {
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            ResultSlot::Bool(_) => "bool",
            ResultSlot::Int(_) => "i64",
            ResultSlot::Float(_) => "f64",
            ResultSlot::String(_) => "String",
            ResultSlot::Resource(_) => "resource",
            ResultSlot::IntList(_) => "Vec<i64>",
            ResultSlot::FloatList(_) => "Vec<f64>",
            ResultSlot::StringList(_) => "Vec<String>",
            ResultSlot::ResourceList(_) => "Vec<resource>",
            ResultSlot::Custom(capture) => capture.type_name(),
        }
    }
}

impl<'a, H> std::fmt::Debug for ResultSlot<'a, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ResultSlot[{}]", self.type_name())
    }
}
