//! Payload aspects and their composition.
//!
//! An aspect is one independently optional group of payload fields, for
//! example everything iOS-specific. A notification or command owns a fixed
//! list of aspects and composes their partial field maps into a single JSON
//! object. Aspects declare their field names up front, and composition
//! refuses to merge two aspects that declare the same name.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::{PushError, Result};

/// Partial JSON object produced by one aspect.
pub type Fields = Map<String, Value>;

/// A group of optional payload fields.
pub trait Aspect {
    /// Short name used in conflict errors.
    fn name(&self) -> &'static str;

    /// Every field name this aspect may emit.
    fn fields(&self) -> &'static [&'static str];

    /// Render the fields that are set.
    fn render(&self) -> Result<Fields>;
}

/// Merge the rendered fields of `aspects` into one object.
///
/// Fails with [`PushError::AspectConflict`] before rendering anything if two
/// aspects declare the same field, otherwise with the first render error.
pub fn compose(aspects: &[&dyn Aspect]) -> Result<Fields> {
    check_disjoint(aspects)?;

    let mut result = Fields::new();
    for aspect in aspects {
        result.extend(aspect.render()?);
    }
    Ok(result)
}

fn check_disjoint(aspects: &[&dyn Aspect]) -> Result<()> {
    let mut owners: HashMap<&'static str, &'static str> = HashMap::new();
    for aspect in aspects {
        for &field in aspect.fields() {
            if let Some(first) = owners.insert(field, aspect.name()) {
                return Err(PushError::AspectConflict {
                    field,
                    first,
                    second: aspect.name(),
                });
            }
        }
    }
    Ok(())
}

/// Serialize a struct into a JSON object.
pub(crate) fn to_fields<T: Serialize + ?Sized>(value: &T) -> Result<Fields> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(PushError::Serialization(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Implement [`Aspect`] for a struct whose `Serialize` impl already skips
/// unset fields.
macro_rules! serialized_aspect {
    ($ty:ty, $name:literal, [$($field:literal),+ $(,)?]) => {
        impl $crate::aspect::Aspect for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn fields(&self) -> &'static [&'static str] {
                &[$($field),+]
            }

            fn render(&self) -> $crate::Result<$crate::aspect::Fields> {
                $crate::aspect::to_fields(self)
            }
        }
    };
}

pub(crate) use serialized_aspect;
