/// A declared default value for an option.
///
/// The variant must line up with the option's result slot, otherwise applying the default fails with
/// [`BindError::DefaultTypeMismatch`](crate::BindError::DefaultTypeMismatch).
/// Resource slots take their defaults as identifiers: `String` for a single resource, `StringList` for a list of them.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Default for a flag.
    Bool(bool),
    /// Default for an integer or counter.
    Int(i64),
    /// Default for a float.
    Float(f64),
    /// Default for a string, selector, or resource identifier.
    String(String),
    /// Default for an integer list.
    IntList(Vec<i64>),
    /// Default for a float list.
    FloatList(Vec<f64>),
    /// Default for a string list, or the identifiers of a resource list.
    StringList(Vec<String>),
}

impl DefaultValue {
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            DefaultValue::Bool(_) => "bool",
            DefaultValue::Int(_) => "i64",
            DefaultValue::Float(_) => "f64",
            DefaultValue::String(_) => "String",
            DefaultValue::IntList(_) => "Vec<i64>",
            DefaultValue::FloatList(_) => "Vec<f64>",
            DefaultValue::StringList(_) => "Vec<String>",
        }
    }
}

impl std::fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultValue::Bool(value) => write!(f, "{value}"),
            DefaultValue::Int(value) => write!(f, "{value}"),
            DefaultValue::Float(value) => write!(f, "{value}"),
            DefaultValue::String(value) => write!(f, "{value}"),
            DefaultValue::IntList(values) => write!(f, "{}", join(values)),
            DefaultValue::FloatList(values) => write!(f, "{}", join(values)),
            DefaultValue::StringList(values) => write!(f, "{}", join(values)),
        }
    }
}

fn join<T: std::fmt::Display>(values: &[T]) -> String {
    format!(
        "[{}]",
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<String>>()
            .join(", ")
    )
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        DefaultValue::Bool(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        DefaultValue::Int(value)
    }
}

impl From<f64> for DefaultValue {
    fn from(value: f64) -> Self {
        DefaultValue::Float(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::String(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        DefaultValue::String(value)
    }
}

impl From<Vec<i64>> for DefaultValue {
    fn from(values: Vec<i64>) -> Self {
        DefaultValue::IntList(values)
    }
}

impl From<Vec<f64>> for DefaultValue {
    fn from(values: Vec<f64>) -> Self {
        DefaultValue::FloatList(values)
    }
}

impl From<Vec<String>> for DefaultValue {
    fn from(values: Vec<String>) -> Self {
        DefaultValue::StringList(values)
    }
}

impl From<Vec<&str>> for DefaultValue {
    fn from(values: Vec<&str>) -> Self {
        DefaultValue::StringList(values.into_iter().map(|v| v.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DefaultValue::from(true), "true")]
    #[case(DefaultValue::from(3i64), "3")]
    #[case(DefaultValue::from(1.5f64), "1.5")]
    #[case(DefaultValue::from("abc"), "abc")]
    #[case(DefaultValue::from(vec![1i64, 2]), "[1, 2]")]
    #[case(DefaultValue::from(Vec::<f64>::default()), "[]")]
    #[case(DefaultValue::from(vec!["a", "b"]), "[a, b]")]
    fn display(#[case] value: DefaultValue, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn from_strings() {
        assert_eq!(
            DefaultValue::from(vec!["x".to_string()]),
            DefaultValue::from(vec!["x"])
        );
        assert_eq!(DefaultValue::from("x".to_string()), DefaultValue::from("x"));
    }
}
