#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::{OptionDefinition, Resource, ResultSlot};
use crate::binder::core::{release_all, release_replaced};
use crate::binder::BindError;
use crate::model::DefaultValue;

impl<'a, H: Resource> OptionDefinition<'a, H> {
    /// Apply the declared default to an option that was not matched.
    ///
    /// Does nothing when the option was matched, or when it declares no default.
    /// The default's type must match the option's variable; resources are opened from identifiers (see [`DefaultValue`]).
    /// A resource list is all-or-nothing: if any identifier fails to open, those already opened are released and the variable is left empty.
    pub fn apply_default(&mut self) -> Result<(), BindError> {
        if self.matched {
            return Ok(());
        }

        let OptionDefinition {
            pattern,
            slot,
            open_spec,
            options,
            ..
        } = self;
        let default = match &options.default {
            Some(default) => default,
            None => return Ok(()),
        };
        let name = pattern.canonical_name();
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Applying default to '{name}': {default}.");
        }

        match (slot, default) {
            (ResultSlot::Bool(variable), DefaultValue::Bool(value)) => **variable = *value,
            (ResultSlot::Int(variable), DefaultValue::Int(value)) => **variable = *value,
            (ResultSlot::Float(variable), DefaultValue::Float(value)) => **variable = *value,
            (ResultSlot::String(variable), DefaultValue::String(value)) => {
                **variable = value.clone()
            }
            (ResultSlot::Resource(variable), DefaultValue::String(identifier)) => {
                let handle =
                    H::open(identifier, open_spec).map_err(|source| BindError::ResourceOpenFailed {
                        name: name.clone(),
                        identifier: identifier.clone(),
                        source,
                        release_failures: Vec::default(),
                    })?;

                if let Some(previous) = variable.replace(handle) {
                    release_replaced(&name, previous)?;
                }
            }
            (ResultSlot::IntList(variable), DefaultValue::IntList(values)) => {
                **variable = values.clone()
            }
            (ResultSlot::FloatList(variable), DefaultValue::FloatList(values)) => {
                **variable = values.clone()
            }
            (ResultSlot::StringList(variable), DefaultValue::StringList(values)) => {
                **variable = values.clone()
            }
            (ResultSlot::ResourceList(variable), DefaultValue::StringList(identifiers)) => {
                let mut handles = Vec::with_capacity(identifiers.len());

                for identifier in identifiers {
                    match H::open(identifier, open_spec) {
                        Ok(handle) => handles.push(handle),
                        Err(source) => {
                            let mut release_failures = release_all(handles);
                            release_failures.extend(release_all(std::mem::take(&mut **variable)));
                            return Err(BindError::ResourceOpenFailed {
                                name,
                                identifier: identifier.clone(),
                                source,
                                release_failures,
                            });
                        }
                    }
                }

                let previous = std::mem::replace(&mut **variable, handles);

                let release_failures = release_all(previous);

                if !release_failures.is_empty() {
                    return Err(BindError::ResourceReleaseFailed {
                        name,
                        release_failures,
                    });
                }
            }
            (ResultSlot::Custom(capture), _) => {
                return Err(BindError::UnsupportedType {
                    name,
                    type_name: capture.type_name(),
                });
            }
            (slot, default) => {
                return Err(BindError::DefaultTypeMismatch {
                    name,
                    expected: accepted_default(slot),
                    found: default.type_name(),
                });
            }
        };

        Ok(())
    }
}

// The default type accepted by each slot; resources take identifiers.
fn accepted_default<H>(slot: &ResultSlot<'_, H>) -> &'static str {
    match slot {
        ResultSlot::Resource(_) => "String",
        ResultSlot::ResourceList(_) => "Vec<String>",
        _ => slot.type_name(),
    }
}
