//! Traffic matching criteria resource (`/mgmt/tm/ltm/traffic-matching-criteria`)

use crate::api::BigIpApi;
use crate::mapper::TrafficMatchingCriteriaModel;
use crate::provider_data::BigIpProviderData;
use crate::resources::{
    client, configure_provider_data, import_absent, import_seed, missing_identity,
    remote_failure, schema_response, validate_against, Fetched,
};
use crate::validators::f5_name_with_directory;
use async_trait::async_trait;
use tfplug::context::Context;
use tfplug::plan_modifier::{RequiresReplace, UseStateForUnknown};
use tfplug::resource::{
    ConfigureResourceRequest, ConfigureResourceResponse, CreateResourceRequest,
    CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse,
    ImportResourceStateRequest, ImportResourceStateResponse, ReadResourceRequest,
    ReadResourceResponse, Resource, ResourceSchemaRequest, ResourceSchemaResponse,
    ResourceWithConfigure, ResourceWithImportState, UpdateResourceRequest, UpdateResourceResponse,
    ValidateResourceConfigRequest, ValidateResourceConfigResponse,
};
use tfplug::schema::{Attribute, AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::types::Diagnostic;
use tfplug::validator::NumberRangeValidator;

#[derive(Default)]
pub struct TrafficMatchingCriteriaResource {
    provider_data: Option<BigIpProviderData>,
}

fn optional_string(name: &str, description: &str) -> AttributeBuilder {
    AttributeBuilder::new(name, AttributeType::String)
        .description(description)
        .optional()
}

/// Both halves of a list/inline pair, each declaring the other as a conflict
fn exclusive_pair(
    list: AttributeBuilder,
    list_name: &str,
    inline: AttributeBuilder,
    inline_name: &str,
) -> [Attribute; 2] {
    [
        list.conflicts_with(inline_name).build(),
        inline.conflicts_with(list_name).build(),
    ]
}

impl TrafficMatchingCriteriaResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_schema() -> Result<Schema, regex::Error> {
        let mut builder = SchemaBuilder::new()
            .version(0)
            .description("Manages traffic matching criteria on a BIG-IP")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .description("Identity of the criteria, equal to its name")
                    .computed()
                    .plan_modifier(Box::new(UseStateForUnknown))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .description("Name of the traffic matching criteria, in /Partition/Name form")
                    .required()
                    .validator(Box::new(f5_name_with_directory()?))
                    .plan_modifier(Box::new(RequiresReplace))
                    .build(),
            )
            .attribute(optional_string("description", "User defined description").build())
            .attribute(optional_string("protocol", "IP protocol to match, e.g. tcp or udp").build())
            .attribute(
                optional_string("route_domain", "Route domain the criteria applies to").build(),
            );

        let pairs = [
            exclusive_pair(
                optional_string("destination_address_list", "Address list of destinations"),
                "destination_address_list",
                optional_string("destination_address_inline", "Destination address"),
                "destination_address_inline",
            ),
            exclusive_pair(
                optional_string("destination_port_list", "Port list of destinations"),
                "destination_port_list",
                optional_string("destination_port_inline", "Destination port"),
                "destination_port_inline",
            ),
            exclusive_pair(
                optional_string("source_address_list", "Address list of sources"),
                "source_address_list",
                optional_string(
                    "source_address_inline",
                    "Source address; 0.0.0.0 is sent when left empty",
                )
                .computed(),
                "source_address_inline",
            ),
            exclusive_pair(
                optional_string("source_port_list", "Port list of sources"),
                "source_port_list",
                AttributeBuilder::new("source_port_inline", AttributeType::Number)
                    .description("Source port")
                    .optional()
                    .validator(Box::new(NumberRangeValidator {
                        min: Some(0.0),
                        max: Some(65535.0),
                    })),
                "source_port_inline",
            ),
        ];

        for attribute in pairs.into_iter().flatten() {
            builder = builder.attribute(attribute);
        }

        Ok(builder.build())
    }

    async fn refresh(
        client: &dyn BigIpApi,
        name: &str,
        mut model: TrafficMatchingCriteriaModel,
    ) -> Fetched<TrafficMatchingCriteriaModel> {
        tracing::info!("Fetching traffic matching criteria {}", name);

        Fetched::from_result(
            client.get_traffic_matching_criteria(name).await,
            "read traffic matching criteria",
            name,
        )
        .map(|criteria| {
            model.apply_response(&criteria);
            model.id = Some(name.to_string());
            model.name = Some(name.to_string());
            model
        })
    }
}

#[async_trait]
impl Resource for TrafficMatchingCriteriaResource {
    fn type_name(&self) -> &str {
        "bigip_ltm_traffic_matching_criteria"
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

        let model = TrafficMatchingCriteriaModel::from_dynamic(&request.planned_state);
        if let Err(diag) = model.validate_required() {
            return failed(vec![diag]);
        }
        let name = model.name.clone().unwrap_or_default();

        tracing::info!("Creating traffic matching criteria {}", name);
        if let Err(e) = client
            .create_traffic_matching_criteria(&model.to_request())
            .await
        {
            return failed(vec![remote_failure(
                "create traffic matching criteria",
                &name,
                &e,
            )]);
        }

        let created = TrafficMatchingCriteriaModel {
            id: Some(name.clone()),
            ..model.clone()
        }
        .to_dynamic();
        let incomplete = |diag: Diagnostic| CreateResourceResponse::incomplete(created, vec![diag]);

        match Self::refresh(client.as_ref(), &name, model).await {
            Fetched::Found(model) => CreateResourceResponse::created(model.to_dynamic()),
            Fetched::Absent => incomplete(Diagnostic::error(
                "Traffic matching criteria disappeared after create",
                format!("{} was created but could not be read back", name),
            )),
            Fetched::Failed(diag) => incomplete(diag),
        }
    }

    async fn read(&self, _ctx: Context, request: ReadResourceRequest) -> ReadResourceResponse {
        let client = match client(&self.provider_data) {
            Ok(client) => client,
            Err(diag) => return ReadResourceResponse::failed(request.current_state, vec![diag]),
        };

        let model = TrafficMatchingCriteriaModel::from_dynamic(&request.current_state);
        let Some(name) = model.identity() else {
            return ReadResourceResponse::failed(request.current_state, vec![missing_identity()]);
        };

        match Self::refresh(client.as_ref(), &name, model).await {
            Fetched::Found(model) => ReadResourceResponse::found(model.to_dynamic()),
            Fetched::Absent => {
                tracing::warn!(
                    "Traffic matching criteria {} not found, removing from state",
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

        let Some(name) =
            TrafficMatchingCriteriaModel::from_dynamic(&request.prior_state).identity()
        else {
            return failed(vec![missing_identity()]);
        };
        let model = TrafficMatchingCriteriaModel::from_dynamic(&request.planned_state);

        tracing::info!("Updating traffic matching criteria {}", name);
        if let Err(e) = client
            .modify_traffic_matching_criteria(&name, &model.to_request())
            .await
        {
            return failed(vec![remote_failure(
                "update traffic matching criteria",
                &name,
                &e,
            )]);
        }

        match Self::refresh(client.as_ref(), &name, model).await {
            Fetched::Found(model) => UpdateResourceResponse::updated(model.to_dynamic()),
            Fetched::Absent => failed(vec![Diagnostic::error(
                "Traffic matching criteria disappeared after update",
                format!("{} was modified but could not be read back", name),
            )]),
            Fetched::Failed(diag) => failed(vec![diag]),
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

        let Some(name) =
            TrafficMatchingCriteriaModel::from_dynamic(&request.prior_state).identity()
        else {
            return DeleteResourceResponse::failed(vec![missing_identity()]);
        };

        tracing::info!("Deleting traffic matching criteria {}", name);
        match client.delete_traffic_matching_criteria(&name).await {
            Ok(()) => DeleteResourceResponse::default(),
            Err(e) => DeleteResourceResponse::failed(vec![remote_failure(
                "delete traffic matching criteria",
                &name,
                &e,
            )]),
        }
    }
}

#[async_trait]
impl ResourceWithConfigure for TrafficMatchingCriteriaResource {
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
impl ResourceWithImportState for TrafficMatchingCriteriaResource {
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

        let model = TrafficMatchingCriteriaModel::from_dynamic(&seed);
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
#[path = "./resource_traffic_matching_criteria_test.rs"]
mod resource_traffic_matching_criteria_test;
