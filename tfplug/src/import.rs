//! Import helpers for simplifying resource import implementations

use crate::context::Context;
use crate::resource::{ImportResourceStateRequest, ImportResourceStateResponse, ImportedResource};
use crate::types::{AttributePath, Diagnostic, Dynamic, DynamicValue};
use std::collections::HashMap;

/// Copies the import ID into each of the given attributes of a fresh state
///
/// Example: ID "/Common/list1" -> state.id = state.name = "/Common/list1"
pub fn import_state_passthrough_id(
    _ctx: &Context,
    attr_paths: &[AttributePath],
    request: &ImportResourceStateRequest,
    response: &mut ImportResourceStateResponse,
) {
    let mut state = DynamicValue::new(Dynamic::Map(HashMap::new()));

    for attr_path in attr_paths {
        if let Err(e) = state.set_string(attr_path, request.id.clone()) {
            response.diagnostics.push(
                Diagnostic::error(
                    format!("Failed to set import ID: {}", e),
                    format!(
                        "Could not set attribute '{:?}' to value '{}'",
                        attr_path, request.id
                    ),
                )
                .with_attribute(attr_path.clone()),
            );
            return;
        }
    }

    response.imported_resources.push(ImportedResource {
        type_name: request.type_name.clone(),
        state,
    });
}
