//! Resource implementations
//!
//! Every handler follows the same shape: pull a typed model out of the
//! request, make one remote call through `BigIpApi`, then refresh state from
//! the device. The helpers here hold the parts the three resources share.

pub mod ltm;
pub mod net;

pub use ltm::{PersistenceProfileUniversalResource, TrafficMatchingCriteriaResource};
pub use net::AddressListResource;

use crate::api::{ApiError, BigIpApi};
use crate::provider_data::BigIpProviderData;
use std::any::Any;
use std::sync::Arc;
use tfplug::context::Context;
use tfplug::import::import_state_passthrough_id;
use tfplug::resource::{
    ImportResourceStateRequest, ImportResourceStateResponse, ResourceSchemaResponse,
};
use tfplug::schema::{Schema, SchemaBuilder};
use tfplug::types::{AttributePath, Diagnostic, DynamicValue};

/// Result of looking an object up on the device
pub(crate) enum Fetched<T> {
    Found(T),
    Absent,
    Failed(Diagnostic),
}

impl<T> Fetched<T> {
    /// Folds a `get_*` result. Errors that still mean "not there" count as absence.
    pub(crate) fn from_result(
        result: Result<Option<T>, ApiError>,
        operation: &str,
        name: &str,
    ) -> Self {
        match result {
            Ok(Some(object)) => Fetched::Found(object),
            Ok(None) => Fetched::Absent,
            Err(e) if e.is_not_found() => Fetched::Absent,
            Err(e) => Fetched::Failed(remote_failure(operation, name, &e)),
        }
    }

    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Fetched::Found(object) => Fetched::Found(f(object)),
            Fetched::Absent => Fetched::Absent,
            Fetched::Failed(diag) => Fetched::Failed(diag),
        }
    }
}

pub(crate) fn configure_provider_data(
    provider_data: Option<Arc<dyn Any + Send + Sync>>,
) -> (Option<BigIpProviderData>, Vec<Diagnostic>) {
    let mut diagnostics = vec![];

    let data = match provider_data {
        Some(data) => match data.downcast_ref::<BigIpProviderData>() {
            Some(provider_data) => Some(provider_data.clone()),
            None => {
                diagnostics.push(Diagnostic::error(
                    "Invalid provider data",
                    "Failed to extract BigIpProviderData from provider data",
                ));
                None
            }
        },
        None => {
            diagnostics.push(Diagnostic::error(
                "No provider data",
                "No provider data was provided to the resource",
            ));
            None
        }
    };

    (data, diagnostics)
}

pub(crate) fn client(
    provider_data: &Option<BigIpProviderData>,
) -> Result<Arc<dyn BigIpApi>, Diagnostic> {
    provider_data
        .as_ref()
        .map(|data| Arc::clone(&data.client))
        .ok_or_else(|| {
            Diagnostic::error(
                "Provider not configured",
                "Provider data was not properly configured",
            )
        })
}

/// Summary names the operation, detail names the object
pub(crate) fn remote_failure(operation: &str, name: &str, error: &ApiError) -> Diagnostic {
    tracing::error!("Failed to {} {}: {}", operation, name, error);
    Diagnostic::error(format!("Failed to {}", operation), format!("{}: {}", name, error))
}

pub(crate) fn missing_identity() -> Diagnostic {
    Diagnostic::error(
        "Missing identity",
        "Neither 'id' nor 'name' is set in state",
    )
    .with_attribute(AttributePath::new("id"))
}

pub(crate) fn schema_response(schema: Result<Schema, regex::Error>) -> ResourceSchemaResponse {
    match schema {
        Ok(schema) => ResourceSchemaResponse {
            schema,
            diagnostics: vec![],
        },
        Err(e) => ResourceSchemaResponse {
            schema: SchemaBuilder::new().build(),
            diagnostics: vec![Diagnostic::error(
                "Invalid schema",
                format!("Name validator pattern failed to compile: {}", e),
            )],
        },
    }
}

pub(crate) fn validate_against(
    schema: Result<Schema, regex::Error>,
    config: &DynamicValue,
) -> Vec<Diagnostic> {
    match schema {
        Ok(schema) => schema.validate_config(config),
        Err(e) => vec![Diagnostic::error(
            "Invalid schema",
            format!("Name validator pattern failed to compile: {}", e),
        )],
    }
}

/// Seeds a state holding only the imported identity in `id` and `name`
pub(crate) fn import_seed(
    ctx: &Context,
    request: &ImportResourceStateRequest,
) -> Result<DynamicValue, Vec<Diagnostic>> {
    let mut seeded = ImportResourceStateResponse::failed(vec![]);

    import_state_passthrough_id(
        ctx,
        &[AttributePath::new("id"), AttributePath::new("name")],
        request,
        &mut seeded,
    );

    match seeded.imported_resources.pop() {
        Some(resource) if seeded.diagnostics.is_empty() => Ok(resource.state),
        _ => Err(seeded.diagnostics),
    }
}

pub(crate) fn import_absent(id: &str) -> Diagnostic {
    Diagnostic::error(
        "Cannot import non-existent remote object",
        format!("No object named {} exists on the device", id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::FakeBigIp;
    use tfplug::types::ClientCapabilities;

    #[test]
    fn not_found_errors_fold_into_absence() {
        let result: Result<Option<()>, ApiError> = Err(ApiError::ApiError {
            status: 400,
            message: "Object not found".to_string(),
        });
        assert!(matches!(
            Fetched::from_result(result, "read address list", "/Common/al1"),
            Fetched::Absent
        ));

        let result: Result<Option<()>, ApiError> = Ok(None);
        assert!(matches!(
            Fetched::from_result(result, "read address list", "/Common/al1"),
            Fetched::Absent
        ));
    }

    #[test]
    fn other_errors_name_operation_and_object() {
        let result: Result<Option<()>, ApiError> = Err(ApiError::ApiError {
            status: 500,
            message: "boom".to_string(),
        });

        match Fetched::from_result(result, "read address list", "/Common/al1") {
            Fetched::Failed(diag) => {
                assert_eq!(diag.summary, "Failed to read address list");
                assert!(diag.detail.starts_with("/Common/al1: "));
                assert!(diag.detail.contains("boom"));
            }
            _ => panic!("expected failure"),
        }
    }

    #[test]
    fn configure_rejects_foreign_provider_data() {
        let (data, diags) = configure_provider_data(Some(Arc::new("not provider data")));
        assert!(data.is_none());
        assert_eq!(diags[0].summary, "Invalid provider data");

        let (data, diags) = configure_provider_data(None);
        assert!(data.is_none());
        assert_eq!(diags[0].summary, "No provider data");
    }

    #[test]
    fn configure_accepts_provider_data() {
        let provider_data = BigIpProviderData::new(FakeBigIp::new());
        let (data, diags) = configure_provider_data(Some(Arc::new(provider_data)));

        assert!(diags.is_empty());
        assert!(client(&data).is_ok());
        assert_eq!(
            client(&None).err().map(|d| d.summary),
            Some("Provider not configured".to_string())
        );
    }

    #[test]
    fn import_seed_writes_id_and_name() {
        let request = ImportResourceStateRequest {
            type_name: "bigip_net_address_list".to_string(),
            id: "/Common/al1".to_string(),
            client_capabilities: ClientCapabilities::default(),
        };

        let state = import_seed(&Context::new(), &request).unwrap();
        assert_eq!(
            state.get_string(&AttributePath::new("id")).unwrap(),
            "/Common/al1"
        );
        assert_eq!(
            state.get_string(&AttributePath::new("name")).unwrap(),
            "/Common/al1"
        );
    }
}
