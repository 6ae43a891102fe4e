//! Universal persistence profile resource (`/mgmt/tm/ltm/persistence/universal`)
//!
//! The device only accepts a name and parent profile on creation, so create
//! is followed by the same modify-then-read sequence update uses. A failed
//! modify removes the profile again so no half-configured object is left
//! behind.

use crate::api::BigIpApi;
use crate::mapper::PersistenceProfileModel;
use crate::provider_data::BigIpProviderData;
use crate::resources::{
    client, configure_provider_data, import_absent, import_seed, missing_identity,
    remote_failure, schema_response, validate_against, Fetched,
};
use crate::validators::f5_name;
use async_trait::async_trait;
use tfplug::context::Context;
use tfplug::plan_modifier::UseStateForUnknown;
use tfplug::resource::{
    ConfigureResourceRequest, ConfigureResourceResponse, CreateResourceRequest,
    CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse,
    ImportResourceStateRequest, ImportResourceStateResponse, ReadResourceRequest,
    ReadResourceResponse, Resource, ResourceSchemaRequest, ResourceSchemaResponse,
    ResourceWithConfigure, ResourceWithImportState, UpdateResourceRequest, UpdateResourceResponse,
    ValidateResourceConfigRequest, ValidateResourceConfigResponse,
};
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::types::Diagnostic;
use tfplug::validator::NumberRangeValidator;

#[derive(Default)]
pub struct PersistenceProfileUniversalResource {
    provider_data: Option<BigIpProviderData>,
}

fn optional_computed(name: &str, description: &str) -> AttributeBuilder {
    AttributeBuilder::new(name, AttributeType::String)
        .description(description)
        .optional()
        .computed()
}

impl PersistenceProfileUniversalResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_schema() -> Result<Schema, regex::Error> {
        Ok(SchemaBuilder::new()
            .version(0)
            .description("Manages a universal persistence profile on a BIG-IP")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .description("Identity of the profile, equal to its name")
                    .computed()
                    .plan_modifier(Box::new(UseStateForUnknown))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .description("Name of the persistence profile")
                    .required()
                    .validator(Box::new(f5_name()?))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("defaults_from", AttributeType::String)
                    .description("Inherit defaults from parent profile")
                    .required()
                    .validator(Box::new(f5_name()?))
                    .build(),
            )
            .attribute(
                optional_computed("app_service", "Application service the profile belongs to")
                    .build(),
            )
            .attribute(
                optional_computed(
                    "match_across_pools",
                    "enabled or disabled: match persistence records across pools",
                )
                .build(),
            )
            .attribute(
                optional_computed(
                    "match_across_services",
                    "enabled or disabled: match persistence records across services",
                )
                .build(),
            )
            .attribute(
                optional_computed(
                    "match_across_virtuals",
                    "enabled or disabled: match persistence records across virtual servers",
                )
                .build(),
            )
            .attribute(
                optional_computed(
                    "method",
                    "Persistence method reported by the device; never sent",
                )
                .build(),
            )
            .attribute(optional_computed("mirror", "enabled or disabled").build())
            .attribute(
                optional_computed(
                    "override_conn_limit",
                    "enabled or disabled: let persisted clients exceed pool member connection limits",
                )
                .build(),
            )
            .attribute(
                AttributeBuilder::new("timeout", AttributeType::Number)
                    .description("Timeout for persistence of the session, in seconds")
                    .optional()
                    .computed()
                    .validator(Box::new(NumberRangeValidator {
                        min: Some(0.0),
                        max: None,
                    }))
                    .build(),
            )
            .attribute(optional_computed("rule", "The iRule to use with this profile").build())
            .build())
    }

    async fn refresh(
        client: &dyn BigIpApi,
        name: &str,
        mut model: PersistenceProfileModel,
    ) -> Fetched<PersistenceProfileModel> {
        tracing::info!("Fetching universal persistence profile {}", name);

        Fetched::from_result(
            client.get_universal_persistence_profile(name).await,
            "read persistence profile",
            name,
        )
        .map(|profile| {
            model.apply_response(&profile);
            model.id = Some(name.to_string());
            model.name = Some(name.to_string());
            model
        })
    }

    /// Sends the full record, then reads it back. On a failed modify the
    /// profile is deleted; the modify error always comes first in the
    /// returned diagnostics.
    async fn modify_and_refresh(
        client: &dyn BigIpApi,
        name: &str,
        model: PersistenceProfileModel,
    ) -> Result<PersistenceProfileModel, ModifyFailure> {
        tracing::info!("Updating universal persistence profile {}", name);

        if let Err(e) = client
            .modify_universal_persistence_profile(name, &model.to_request())
            .await
        {
            let mut diagnostics = vec![remote_failure("update persistence profile", name, &e)];

            tracing::warn!("Rolling back universal persistence profile {}", name);
            let rolled_back = match client.delete_universal_persistence_profile(name).await {
                Ok(()) => true,
                Err(rollback) => {
                    tracing::error!("Rollback of {} failed: {}", name, rollback);
                    diagnostics.push(Diagnostic::warning(
                        "Failed to roll back persistence profile",
                        format!("{}: {}", name, rollback),
                    ));
                    false
                }
            };

            return Err(ModifyFailure {
                diagnostics,
                rolled_back,
            });
        }

        let diagnostics = match Self::refresh(client, name, model).await {
            Fetched::Found(model) => return Ok(model),
            Fetched::Absent => vec![Diagnostic::error(
                "Persistence profile disappeared after update",
                format!("{} was modified but could not be read back", name),
            )],
            Fetched::Failed(diag) => vec![diag],
        };

        Err(ModifyFailure {
            diagnostics,
            rolled_back: false,
        })
    }
}

/// A failed modify-then-read. `rolled_back` is set once the profile has been
/// deleted from the device again.
struct ModifyFailure {
    diagnostics: Vec<Diagnostic>,
    rolled_back: bool,
}

#[async_trait]
impl Resource for PersistenceProfileUniversalResource {
    fn type_name(&self) -> &str {
        "bigip_ltm_persistence_profile_universal"
    }

    async fn schema(
        &self,
        _ctx: Context,
        _request: ResourceSchemaRequest,
    ) -> ResourceSchemaResponse {
        schema_response(Self::build_schema())
    }

    async fn validate(
        &self,
        _ctx: Context,
        request: ValidateResourceConfigRequest,
    ) -> ValidateResourceConfigResponse {
        ValidateResourceConfigResponse {
            diagnostics: validate_against(Self::build_schema(), &request.config),
        }
    }

    async fn create(
        &self,
        _ctx: Context,
        request: CreateResourceRequest,
    ) -> CreateResourceResponse {
        let failed = CreateResourceResponse::failed;

        let client = match client(&self.provider_data) {
            Ok(client) => client,
            Err(diag) => return failed(vec![diag]),
        };

        let mut model = PersistenceProfileModel::from_dynamic(&request.planned_state);
        if let Err(diag) = model.validate_required() {
            return failed(vec![diag]);
        }
        let name = model.name.clone().unwrap_or_default();

        tracing::info!("Creating universal persistence profile {}", name);
        if let Err(e) = client
            .create_universal_persistence_profile(&model.to_create_request())
            .await
        {
            return failed(vec![remote_failure("create persistence profile", &name, &e)]);
        }
        model.id = Some(name.clone());
        let created = model.to_dynamic();

        match Self::modify_and_refresh(client.as_ref(), &name, model).await {
            Ok(model) => CreateResourceResponse::created(model.to_dynamic()),
            Err(failure) if failure.rolled_back => failed(failure.diagnostics),
            Err(failure) => CreateResourceResponse::incomplete(created, failure.diagnostics),
        }
    }

    async fn read(&self, _ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let client = match client(&self.provider_data) {
            Ok(client) => client,
            Err(diag) => return ReadResourceResponse::failed(request.current_state, vec![diag]),
        };

        let model = PersistenceProfileModel::from_dynamic(&request.current_state);
        let Some(name) = model.identity() else {
            return ReadResourceResponse::failed(request.current_state, vec![missing_identity()]);
        };

        match Self::refresh(client.as_ref(), &name, model).await {
            Fetched::Found(model) => ReadResourceResponse::found(model.to_dynamic()),
            Fetched::Absent => {
                tracing::warn!(
                    "Universal persistence profile {} not found, removing from state",
                    name
                );
                ReadResourceResponse::removed()
            }
            Fetched::Failed(diag) => ReadResourceResponse::failed(request.current_state, vec![diag]),
        }
    }

    async fn update(
        &self,
        _ctx: Context,
        request: UpdateResourceRequest,
    ) -> UpdateResourceResponse {
        let failed = |diagnostics: Vec<Diagnostic>| {
            UpdateResourceResponse::failed(request.prior_state.clone(), diagnostics)
        };

        let client = match client(&self.provider_data) {
            Ok(client) => client,
            Err(diag) => return failed(vec![diag]),
        };

        let Some(name) = PersistenceProfileModel::from_dynamic(&request.prior_state).identity()
        else {
            return failed(vec![missing_identity()]);
        };
        let mut model = PersistenceProfileModel::from_dynamic(&request.planned_state);
        model.id = Some(name.clone());

        match Self::modify_and_refresh(client.as_ref(), &name, model).await {
            Ok(model) => UpdateResourceResponse::updated(model.to_dynamic()),
            Err(failure) => failed(failure.diagnostics),
        }
    }

    async fn delete(
        &self,
        _ctx: Context,
        request: DeleteResourceRequest,
    ) -> DeleteResourceResponse {
        let client = match client(&self.provider_data) {
            Ok(client) => client,
            Err(diag) => return DeleteResourceResponse::failed(vec![diag]),
        };

        let Some(name) = PersistenceProfileModel::from_dynamic(&request.prior_state).identity()
        else {
            return DeleteResourceResponse::failed(vec![missing_identity()]);
        };

        tracing::info!("Deleting universal persistence profile {}", name);
        match client.delete_universal_persistence_profile(&name).await {
            Ok(()) => DeleteResourceResponse::default(),
            Err(e) => DeleteResourceResponse::failed(vec![remote_failure(
                "delete persistence profile",
                &name,
                &e,
            )]),
        }
    }
}

#[async_trait]
impl ResourceWithConfigure for PersistenceProfileUniversalResource {
    async fn configure(
        &mut self,
        _ctx: Context,
        request: ConfigureResourceRequest,
    ) -> ConfigureResourceResponse {
        let (provider_data, diagnostics) = configure_provider_data(request.provider_data);
        self.provider_data = provider_data;
        ConfigureResourceResponse { diagnostics }
    }
}

#[async_trait]
impl ResourceWithImportState for PersistenceProfileUniversalResource {
    async fn import_state(
        &self,
        ctx: Context,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let failed = ImportResourceStateResponse::failed;

        let client = match client(&self.provider_data) {
            Ok(client) => client,
            Err(diag) => return failed(vec![diag]),
        };

        let seed = match import_seed(&ctx, &request) {
            Ok(seed) => seed,
            Err(diagnostics) => return failed(diagnostics),
        };

        let model = PersistenceProfileModel::from_dynamic(&seed);
        match Self::refresh(client.as_ref(), &request.id, model).await {
            Fetched::Found(model) => {
                ImportResourceStateResponse::imported(self.type_name(), model.to_dynamic())
            }
            Fetched::Absent => failed(vec![import_absent(&request.id)]),
            Fetched::Failed(diag) => failed(vec![diag]),
        }
    }
}

#[cfg(test)]
#[path = "./resource_persistence_profile_universal_test.rs"]
mod resource_persistence_profile_universal_test;
