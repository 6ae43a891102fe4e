//! Typed records for each resource kind and their mapping to and from
//! Terraform values and iControl REST objects.
//!
//! Null and unknown attributes both read as `None`. State records written by
//! `to_dynamic` carry every schema attribute, null when unset.

pub mod address_list;
pub mod persistence_profile;
pub mod traffic_matching_criteria;

pub use address_list::AddressListModel;
pub use persistence_profile::PersistenceProfileModel;
pub use traffic_matching_criteria::TrafficMatchingCriteriaModel;

use std::collections::HashMap;
use tfplug::types::{AttributePath, Diagnostic, Dynamic, DynamicValue};

pub(crate) fn get_string(value: &DynamicValue, name: &str) -> Option<String> {
    value.get_string(&AttributePath::new(name)).ok()
}

/// Numbers arrive as f64; fractional values are truncated
pub(crate) fn get_i64(value: &DynamicValue, name: &str) -> Option<i64> {
    value
        .get_number(&AttributePath::new(name))
        .ok()
        .map(|n| n as i64)
}

pub(crate) fn get_string_list(value: &DynamicValue, name: &str) -> Option<Vec<String>> {
    value.get_list(&AttributePath::new(name)).ok().map(|items| {
        items
            .into_iter()
            .filter_map(|item| match item {
                Dynamic::String(s) => Some(s),
                _ => None,
            })
            .collect()
    })
}

pub(crate) fn string_value(value: &Option<String>) -> Dynamic {
    value.clone().map(Dynamic::String).unwrap_or(Dynamic::Null)
}

pub(crate) fn i64_value(value: Option<i64>) -> Dynamic {
    value
        .map(|n| Dynamic::Number(n as f64))
        .unwrap_or(Dynamic::Null)
}

pub(crate) fn record(fields: Vec<(&str, Dynamic)>) -> DynamicValue {
    DynamicValue::new(Dynamic::Map(
        fields
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<HashMap<_, _>>(),
    ))
}

pub(crate) fn require(value: &Option<String>, name: &str) -> Result<(), Diagnostic> {
    match value {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(Diagnostic::error(
            format!("Missing {}", name),
            format!("The '{}' attribute is required", name),
        )
        .with_attribute(AttributePath::new(name))),
    }
}

/// Identity is the stored `id`, falling back to `name` before the first apply
pub(crate) fn identity(id: &Option<String>, name: &Option<String>) -> Option<String> {
    id.iter()
        .chain(name.iter())
        .find(|v| !v.is_empty())
        .cloned()
}
