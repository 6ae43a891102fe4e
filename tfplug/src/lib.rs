//! tfplug - Terraform Plugin Framework for Rust
//!
//! The provider-facing half of a Terraform plugin framework: configuration
//! records, schemas, validators, plan modifiers and the resource/provider
//! traits a provider implements.

// Core modules
pub mod context;
pub mod error;
pub mod schema;
pub mod types;

// Provider API modules
pub mod provider;
pub mod resource;

// Helper modules
pub mod import;
pub mod plan_modifier;
pub mod validator;

// Re-exports for convenience
pub use context::Context;
pub use error::{Result, TfplugError};
pub use import::import_state_passthrough_id;
pub use plan_modifier::{plan_resource_change, PlannedChange, RequiresReplace, UseStateForUnknown};
pub use provider::{Provider, ProviderResource, ResourceFactory};
pub use resource::{Resource, ResourceWithConfigure, ResourceWithImportState};
pub use schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
pub use types::{
    has_errors, AttributePath, ClientCapabilities, Diagnostic, DiagnosticSeverity, Dynamic,
    DynamicValue,
};
