//! Resource traits and the request/response records exchanged with them
//!
//! A resource is created by its provider factory, configured once with the
//! provider data and then driven through plan/apply calls. Every call reports
//! problems as diagnostics rather than errors.

use crate::context::Context;
use crate::schema::Schema;
use crate::types::{ClientCapabilities, Diagnostic, DynamicValue};
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

/// CRUD surface of a managed resource type
#[async_trait]
pub trait Resource: Send + Sync {
    /// Constant type name, e.g. "bigip_net_address_list".
    /// MUST match the key used in Provider.resources()
    fn type_name(&self) -> &str;

    async fn metadata(
        &self,
        _ctx: Context,
        _request: ResourceMetadataRequest,
    ) -> ResourceMetadataResponse {
        ResourceMetadataResponse {
            type_name: self.type_name().to_string(),
        }
    }

    async fn schema(&self, ctx: Context, request: ResourceSchemaRequest) -> ResourceSchemaResponse;

    /// Called during plan, before any remote call
    async fn validate(
        &self,
        ctx: Context,
        request: ValidateResourceConfigRequest,
    ) -> ValidateResourceConfigResponse;

    /// new_state carries every attribute, computed ones included.
    /// A failed create returns a null state so nothing is recorded.
    async fn create(&self, ctx: Context, request: CreateResourceRequest) -> CreateResourceResponse;

    /// new_state is None when the remote object no longer exists
    async fn read(&self, ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse;

    /// A failed update returns the prior state unchanged
    async fn update(&self, ctx: Context, request: UpdateResourceRequest) -> UpdateResourceResponse;

    async fn delete(&self, ctx: Context, request: DeleteResourceRequest) -> DeleteResourceResponse;
}

pub struct ResourceMetadataRequest;

pub struct ResourceMetadataResponse {
    pub type_name: String,
}

pub struct ResourceSchemaRequest;

pub struct ResourceSchemaResponse {
    pub schema: Schema,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct ValidateResourceConfigRequest {
    pub type_name: String,
    pub config: DynamicValue,
    pub client_capabilities: ClientCapabilities,
}

pub struct ValidateResourceConfigResponse {
    pub diagnostics: Vec<Diagnostic>,
}

pub struct CreateResourceRequest {
    pub type_name: String,
    pub planned_state: DynamicValue,
    pub config: DynamicValue,
}

pub struct CreateResourceResponse {
    pub new_state: DynamicValue,
    pub diagnostics: Vec<Diagnostic>,
}

impl CreateResourceResponse {
    pub fn created(new_state: DynamicValue) -> Self {
        Self {
            new_state,
            diagnostics: vec![],
        }
    }

    pub fn failed(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            new_state: DynamicValue::null(),
            diagnostics,
        }
    }

    /// The remote object exists but could not be finished. Terraform records
    /// the state as tainted and replaces it on the next apply.
    pub fn incomplete(new_state: DynamicValue, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            new_state,
            diagnostics,
        }
    }
}

pub struct ReadResourceRequest {
    pub type_name: String,
    pub current_state: DynamicValue,
    pub client_capabilities: ClientCapabilities,
}

pub struct ReadResourceResponse {
    pub new_state: Option<DynamicValue>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ReadResourceResponse {
    pub fn found(new_state: DynamicValue) -> Self {
        Self {
            new_state: Some(new_state),
            diagnostics: vec![],
        }
    }

    /// The object is gone; Terraform drops it from state
    pub fn removed() -> Self {
        Self {
            new_state: None,
            diagnostics: vec![],
        }
    }

    /// Keeps the current state and reports why it could not be refreshed
    pub fn failed(current_state: DynamicValue, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            new_state: Some(current_state),
            diagnostics,
        }
    }
}

pub struct UpdateResourceRequest {
    pub type_name: String,
    pub prior_state: DynamicValue,
    pub planned_state: DynamicValue,
    pub config: DynamicValue,
}

pub struct UpdateResourceResponse {
    pub new_state: DynamicValue,
    pub diagnostics: Vec<Diagnostic>,
}

impl UpdateResourceResponse {
    pub fn updated(new_state: DynamicValue) -> Self {
        Self {
            new_state,
            diagnostics: vec![],
        }
    }

    pub fn failed(prior_state: DynamicValue, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            new_state: prior_state,
            diagnostics,
        }
    }
}

pub struct DeleteResourceRequest {
    pub type_name: String,
    pub prior_state: DynamicValue,
}

#[derive(Default)]
pub struct DeleteResourceResponse {
    pub diagnostics: Vec<Diagnostic>,
}

impl DeleteResourceResponse {
    pub fn failed(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

/// Receives the provider data right after the factory builds the resource
#[async_trait]
pub trait ResourceWithConfigure: Resource {
    async fn configure(
        &mut self,
        ctx: Context,
        request: ConfigureResourceRequest,
    ) -> ConfigureResourceResponse;
}

pub struct ConfigureResourceRequest {
    /// ConfigureProviderResponse.provider_data; downcast to the provider's type
    pub provider_data: Option<Arc<dyn Any + Send + Sync>>,
}

pub struct ConfigureResourceResponse {
    pub diagnostics: Vec<Diagnostic>,
}

/// `terraform import` support: turn an id into a full state
#[async_trait]
pub trait ResourceWithImportState: Resource {
    async fn import_state(
        &self,
        ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse;
}

pub struct ImportResourceStateRequest {
    pub type_name: String,
    pub id: String,
    pub client_capabilities: ClientCapabilities,
}

pub struct ImportResourceStateResponse {
    pub imported_resources: Vec<ImportedResource>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ImportResourceStateResponse {
    pub fn imported(type_name: impl Into<String>, state: DynamicValue) -> Self {
        Self {
            imported_resources: vec![ImportedResource {
                type_name: type_name.into(),
                state,
            }],
            diagnostics: vec![],
        }
    }

    pub fn failed(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            imported_resources: vec![],
            diagnostics,
        }
    }
}

pub struct ImportedResource {
    pub type_name: String,
    pub state: DynamicValue,
}
