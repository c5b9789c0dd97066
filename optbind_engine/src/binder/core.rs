use std::str::FromStr;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{InvalidCapture, OptionDefinition, Resource, ResultSlot};
use crate::binder::{BindError, ReleaseFailure};

impl<'a, H: Resource> OptionDefinition<'a, H> {
    /// Bind one occurrence of this option into its variable.
    ///
    /// `values` are the value tokens that followed the match, and `occurrences` the count reported by [`OptionDefinition::check`].
    /// Binding happens in three steps:
    /// 1. Unique options fail if already matched, or if matched several times in one token.
    /// 2. The validator (if any) is run against the raw `values`.
    /// 3. The `values` are converted and written according to the variable's type.
    ///
    /// Only a successful bind marks the option as matched.
    pub fn bind(&mut self, values: &[&str], occurrences: usize) -> Result<(), BindError> {
        let name = self.pattern.canonical_name();

        if self.unique && (self.matched || occurrences > 1) {
            return Err(BindError::DuplicateOption(name));
        }

        if let Some(validator) = &self.options.validator {
            validator(values).map_err(|message| BindError::ValidationFailed {
                name: name.clone(),
                message,
            })?;
        }

        let arity = self.pattern.arity();

        match &mut self.slot {
            ResultSlot::Bool(variable) => {
                expect_none(&name, values)?;
                **variable = true;
            }
            ResultSlot::Int(variable) if arity == 0 => {
                expect_none(&name, values)?;
                **variable = (**variable).saturating_add(occurrences as i64);
            }
            ResultSlot::Int(variable) => {
                **variable = convert(&name, expect_single(&name, values)?, "i64")?;
            }
            ResultSlot::Float(variable) => {
                **variable = convert(&name, expect_single(&name, values)?, "f64")?;
            }
            ResultSlot::String(variable) => {
                let token = expect_single(&name, values)?;

                if let Some(choices) = &self.selector {
                    if !choices.iter().any(|choice| choice == token) {
                        return Err(BindError::InvalidChoice {
                            name,
                            token: token.to_string(),
                            choices: choices.clone(),
                        });
                    }
                }

                **variable = token.to_string();
            }
            ResultSlot::Resource(variable) => {
                let identifier = expect_single(&name, values)?;
                let handle = H::open(identifier, &self.open_spec).map_err(|source| {
                    BindError::ResourceOpenFailed {
                        name: name.clone(),
                        identifier: identifier.to_string(),
                        source,
                        release_failures: Vec::default(),
                    }
                })?;

                if let Some(previous) = variable.replace(handle) {
                    release_replaced(&name, previous)?;
                }
            }
            ResultSlot::IntList(variable) => {
                variable.push(convert(&name, expect_single(&name, values)?, "i64")?);
            }
            ResultSlot::FloatList(variable) => {
                variable.push(convert(&name, expect_single(&name, values)?, "f64")?);
            }
            ResultSlot::StringList(variable) => {
                variable.push(expect_single(&name, values)?.to_string());
            }
            ResultSlot::ResourceList(variable) => {
                let identifier = expect_single(&name, values)?;

                match H::open(identifier, &self.open_spec) {
                    Ok(handle) => variable.push(handle),
                    Err(source) => {
                        let release_failures = release_all(std::mem::take(&mut **variable));
                        #[cfg(feature = "tracing_debug")]
                        {
                            debug!("Rolled back '{name}' after failing to open '{identifier}' ({} release failures).", release_failures.len());
                        }

                        return Err(BindError::ResourceOpenFailed {
                            name,
                            identifier: identifier.to_string(),
                            source,
                            release_failures,
                        });
                    }
                }
            }
            ResultSlot::Custom(capture) => {
                let token = expect_single(&name, values)?;
                capture.capture(token).map_err(|error| match error {
                    InvalidCapture::InvalidConversion { token, type_name } => {
                        BindError::ConversionError {
                            name: name.clone(),
                            token,
                            type_name,
                        }
                    }
                })?;
            }
        };

        self.matched = true;
        Ok(())
    }
}

fn expect_none(name: &str, values: &[&str]) -> Result<(), BindError> {
    if values.is_empty() {
        Ok(())
    } else {
        Err(BindError::ArityMismatch {
            name: name.to_string(),
            expected: 0,
            provided: values.len(),
        })
    }
}

fn expect_single<'t>(name: &str, values: &[&'t str]) -> Result<&'t str, BindError> {
    match values {
        [token] => Ok(*token),
        _ => Err(BindError::ArityMismatch {
            name: name.to_string(),
            expected: 1,
            provided: values.len(),
        }),
    }
}

fn convert<T: FromStr>(name: &str, token: &str, type_name: &'static str) -> Result<T, BindError> {
    T::from_str(token).map_err(|_| BindError::ConversionError {
        name: name.to_string(),
        token: token.to_string(),
        type_name,
    })
}

/// Release every handle, collecting (rather than stopping at) the failures.
pub(super) fn release_all<H: Resource>(handles: Vec<H>) -> Vec<ReleaseFailure> {
    let mut release_failures = Vec::default();

    for handle in handles {
        let identifier = handle.identifier().to_string();

        if let Err(source) = handle.release() {
            release_failures.push(ReleaseFailure { identifier, source });
        }
    }

    release_failures
}

pub(super) fn release_replaced<H: Resource>(name: &str, handle: H) -> Result<(), BindError> {
    let identifier = handle.identifier().to_string();
    handle
        .release()
        .map_err(|source| BindError::ResourceReleaseFailed {
            name: name.to_string(),
            release_failures: vec![ReleaseFailure { identifier, source }],
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::resource::test::{take_released, FakeResource};
    use crate::api::{OpenSpec, Parsed};
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    type Definition<'a> = OptionDefinition<'a, FakeResource>;

    #[test]
    fn bind_flag() {
        let mut variable = false;
        let mut definition = Definition::flag(&mut variable, Some('f'), None);
        definition.bind(&[], 1).unwrap();
        assert!(definition.matched());
        drop(definition);
        assert!(variable);
    }

    #[test]
    fn bind_flag_with_value() {
        let mut variable = false;
        let mut definition = Definition::flag(&mut variable, Some('f'), None);
        assert_matches!(
            definition.bind(&["x"], 1),
            Err(BindError::ArityMismatch {
                expected: 0,
                provided: 1,
                ..
            })
        );
        assert!(!definition.matched());
    }

    #[rstest]
    #[case(1, 1)]
    #[case(3, 3)]
    fn bind_counter(#[case] occurrences: usize, #[case] expected: i64) {
        let mut variable: i64 = 0;
        let mut definition = Definition::counter(&mut variable, Some('v'), None);
        definition.bind(&[], occurrences).unwrap();
        drop(definition);
        assert_eq!(variable, expected);
    }

    #[test]
    fn bind_counter_saturates() {
        let mut variable: i64 = i64::MAX - 1;
        let mut definition = Definition::counter(&mut variable, Some('v'), None);
        definition.bind(&[], 3).unwrap();
        definition.bind(&[], 1).unwrap();
        drop(definition);
        assert_eq!(variable, i64::MAX);
    }

    #[test]
    fn bind_counter_accumulates() {
        let mut variable: i64 = 0;
        let mut total: i64 = 0;
        let mut definition = Definition::counter(&mut variable, Some('v'), None);

        for _ in 0..100 {
            let n: usize = thread_rng().gen_range(1..16);
            definition.bind(&[], n).unwrap();
            total += n as i64;
        }

        drop(definition);
        assert_eq!(variable, total);
    }

    #[rstest]
    #[case(vec!["5"], 5)]
    #[case(vec!["-12"], -12)]
    #[case(vec!["007"], 7)]
    fn bind_int(#[case] values: Vec<&str>, #[case] expected: i64) {
        let mut variable: i64 = 0;
        let mut definition = Definition::int(&mut variable, Some('n'), None);
        definition.bind(values.as_slice(), 1).unwrap();
        drop(definition);
        assert_eq!(variable, expected);
    }

    #[rstest]
    #[case(vec!["abc"])]
    #[case(vec!["1.5"])]
    #[case(vec![""])]
    fn bind_int_invalid(#[case] values: Vec<&str>) {
        let mut variable: i64 = 3;
        let mut definition = Definition::int(&mut variable, Some('n'), Some("number"));
        let error = definition.bind(values.as_slice(), 1).unwrap_err();
        assert_matches!(error, BindError::ConversionError { ref name, type_name: "i64", .. } if name == "-n|--number");
        assert!(!definition.matched());
        drop(definition);
        assert_eq!(variable, 3);
    }

    #[rstest]
    #[case(vec![], 0)]
    #[case(vec!["1", "2"], 2)]
    fn bind_int_arity(#[case] values: Vec<&str>, #[case] provided: usize) {
        let mut variable: i64 = 0;
        let mut definition = Definition::int(&mut variable, Some('n'), None);
        let error = definition.bind(values.as_slice(), 1).unwrap_err();
        assert_matches!(error, BindError::ArityMismatch { expected: 1, provided: p, .. } if p == provided);
    }

    #[rstest]
    #[case("0.5", 0.5)]
    #[case("2", 2.0)]
    #[case("-1e3", -1000.0)]
    fn bind_float(#[case] token: &str, #[case] expected: f64) {
        let mut variable: f64 = 0.0;
        let mut definition = Definition::float(&mut variable, None, Some("ratio"));
        definition.bind(&[token], 1).unwrap();
        drop(definition);
        assert_eq!(variable, expected);
    }

    #[test]
    fn bind_float_invalid() {
        let mut variable: f64 = 0.0;
        let mut definition = Definition::float(&mut variable, None, Some("ratio"));
        assert_matches!(
            definition.bind(&["half"], 1),
            Err(BindError::ConversionError { type_name: "f64", .. })
        );
    }

    #[test]
    fn bind_string() {
        let mut variable = String::default();
        let mut definition = Definition::string(&mut variable, Some('s'), None);
        definition.bind(&["hello world"], 1).unwrap();
        drop(definition);
        assert_eq!(variable, "hello world");
    }

    #[rstest]
    #[case("a", true)]
    #[case("b", true)]
    #[case("c", false)]
    #[case("A", false)]
    fn bind_selector(#[case] token: &str, #[case] expected_ok: bool) {
        let mut variable = String::default();
        let mut definition = Definition::selector(&mut variable, Some('m'), None, vec!["a", "b"]);
        let result = definition.bind(&[token], 1);

        if expected_ok {
            result.unwrap();
            drop(definition);
            assert_eq!(variable, token);
        } else {
            let error = result.unwrap_err();
            assert_matches!(error, BindError::InvalidChoice { ref choices, .. } if choices == &vec!["a".to_string(), "b".to_string()]);
            drop(definition);
            assert_eq!(variable, "");
        }
    }

    #[rstest]
    #[case(1, false, true)]
    #[case(2, false, false)]
    #[case(1, true, false)]
    fn bind_unique(#[case] occurrences: usize, #[case] matched: bool, #[case] expected_ok: bool) {
        let mut variable = false;
        let mut definition = Definition::flag(&mut variable, Some('f'), Some("force"));
        definition.matched = matched;
        let result = definition.bind(&[], occurrences);

        if expected_ok {
            result.unwrap();
        } else {
            assert_matches!(result, Err(BindError::DuplicateOption(ref name)) if name == "-f|--force");
        }
    }

    #[test]
    fn bind_unique_twice() {
        let mut variable: i64 = 0;
        let mut definition = Definition::int(&mut variable, Some('n'), None);
        definition.bind(&["1"], 1).unwrap();
        assert_matches!(
            definition.bind(&["2"], 1),
            Err(BindError::DuplicateOption(_))
        );
        drop(definition);
        assert_eq!(variable, 1);
    }

    #[test]
    fn bind_validator() {
        let mut variable: i64 = 0;
        let mut definition = Definition::int(&mut variable, Some('n'), None).validate(|values| {
            match values {
                ["13"] => Err("13 is unlucky".to_string()),
                _ => Ok(()),
            }
        });

        assert_matches!(
            definition.bind(&["13"], 1),
            Err(BindError::ValidationFailed { ref message, .. }) if message == "13 is unlucky"
        );
        assert!(!definition.matched());
        definition.bind(&["12"], 1).unwrap();
        drop(definition);
        assert_eq!(variable, 12);
    }

    #[test]
    fn bind_validator_after_unique() {
        let mut variable = false;
        let mut definition = Definition::flag(&mut variable, Some('f'), None)
            .validate(|_| Err("never reached".to_string()));
        assert_matches!(
            definition.bind(&[], 2),
            Err(BindError::DuplicateOption(_))
        );
    }

    #[test]
    fn bind_lists() {
        let mut strings: Vec<String> = vec!["initial".to_string()];
        let mut ints: Vec<i64> = Vec::default();
        let mut floats: Vec<f64> = Vec::default();
        {
            let mut definition = Definition::string_list(&mut strings, Some('s'), None);
            definition.bind(&["a"], 1).unwrap();
            definition.bind(&["b"], 1).unwrap();
            assert!(definition.matched());
        }
        {
            let mut definition = Definition::int_list(&mut ints, Some('i'), None);
            definition.bind(&["1"], 1).unwrap();
            definition.bind(&["2"], 1).unwrap();
            assert_matches!(
                definition.bind(&["x"], 1),
                Err(BindError::ConversionError { .. })
            );
        }
        {
            let mut definition = Definition::float_list(&mut floats, Some('f'), None);
            definition.bind(&["0.5"], 1).unwrap();
            assert_matches!(
                definition.bind(&[], 1),
                Err(BindError::ArityMismatch { .. })
            );
        }

        assert_eq!(strings, vec!["initial", "a", "b"]);
        assert_eq!(ints, vec![1, 2]);
        assert_eq!(floats, vec![0.5]);
    }

    #[test]
    fn bind_resource() {
        let mut variable: Option<FakeResource> = None;
        let mut definition = Definition::file(&mut variable, Some('i'), None, OpenSpec::default());
        definition.bind(&["data"], 1).unwrap();
        drop(definition);
        assert_eq!(variable, Some(FakeResource("data".to_string())));
    }

    #[test]
    fn bind_resource_open_failed() {
        let mut variable: Option<FakeResource> = None;
        let mut definition = Definition::file(&mut variable, Some('i'), None, OpenSpec::default());
        let error = definition.bind(&["missing"], 1).unwrap_err();
        assert_matches!(error, BindError::ResourceOpenFailed { ref identifier, ref release_failures, .. } if identifier == "missing" && release_failures.is_empty());
        assert!(!definition.matched());
        drop(definition);
        assert_eq!(variable, None);
    }

    #[test]
    fn bind_resource_replaces() {
        take_released();
        let mut variable: Option<FakeResource> = Some(FakeResource("initial".to_string()));
        let mut definition = Definition::file(&mut variable, Some('i'), None, OpenSpec::default());
        definition.bind(&["data"], 1).unwrap();
        drop(definition);
        assert_eq!(variable, Some(FakeResource("data".to_string())));
        assert_eq!(take_released(), vec!["initial"]);
    }

    #[test]
    fn bind_resource_list() {
        let mut variable: Vec<FakeResource> = Vec::default();
        let mut definition =
            Definition::file_list(&mut variable, Some('i'), None, OpenSpec::default());
        definition.bind(&["a"], 1).unwrap();
        definition.bind(&["b"], 1).unwrap();
        drop(definition);
        assert_eq!(
            variable,
            vec![FakeResource("a".to_string()), FakeResource("b".to_string())]
        );
    }

    #[test]
    fn bind_resource_list_rollback() {
        take_released();
        let mut variable: Vec<FakeResource> = Vec::default();
        let mut definition =
            Definition::file_list(&mut variable, Some('i'), None, OpenSpec::default());
        definition.bind(&["a"], 1).unwrap();
        let error = definition.bind(&["missing-b"], 1).unwrap_err();
        assert_matches!(error, BindError::ResourceOpenFailed { ref identifier, ref release_failures, .. } if identifier == "missing-b" && release_failures.is_empty());

        drop(definition);
        assert!(variable.is_empty());
        assert_eq!(take_released(), vec!["a"]);
    }

    #[test]
    fn bind_resource_list_rollback_release_failure() {
        take_released();
        let mut variable: Vec<FakeResource> = Vec::default();
        let mut definition =
            Definition::file_list(&mut variable, Some('i'), None, OpenSpec::default());
        definition.bind(&["sticky-a"], 1).unwrap();
        definition.bind(&["b"], 1).unwrap();
        let error = definition.bind(&["missing-c"], 1).unwrap_err();

        match &error {
            BindError::ResourceOpenFailed {
                identifier,
                release_failures,
                ..
            } => {
                assert_eq!(identifier, "missing-c");
                assert_eq!(release_failures.len(), 1);
                assert_eq!(release_failures[0].identifier, "sticky-a");
            }
            _ => panic!("unexpected error: {error:?}"),
        }

        drop(definition);
        assert!(variable.is_empty());
        assert_eq!(take_released(), vec!["sticky-a", "b"]);
    }

    #[test]
    fn bind_custom() {
        let mut variable: u16 = 0;
        let mut definition = Definition::custom(Parsed::new(&mut variable), Some('p'), None);
        definition.bind(&["8080"], 1).unwrap();
        assert_matches!(
            definition.bind(&["8081"], 1),
            Err(BindError::DuplicateOption(_))
        );
        drop(definition);
        assert_eq!(variable, 8080);
    }

    #[test]
    fn bind_custom_invalid() {
        let mut variable: u16 = 0;
        let mut definition = Definition::custom(Parsed::new(&mut variable), Some('p'), None);
        assert_matches!(
            definition.bind(&["70000"], 1),
            Err(BindError::ConversionError { type_name: "u16", .. })
        );
    }
}
